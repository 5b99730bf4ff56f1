//! Swagger 2.0 model-definition generation from declared-type descriptors.
//!
//! Descriptor files in, one YAML document out. The pipeline walks each
//! discovered type's fields, classifies them (primitive, reference, array of
//! references, binary, map), breaks reference cycles with stub entries, and
//! renders the per-type field maps into a flat `definitions:` section with
//! configurable exclusion rules.

pub mod analyzer;
pub mod cli;
pub mod descriptions;
pub mod descriptor;
pub mod discovery;
pub mod error;
pub mod mapper;
pub mod pipeline;
pub mod writer;
