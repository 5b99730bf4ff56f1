//! Swagger 2.0 document rendering.
//!
//! The writer renders every surviving model into one in-memory buffer; it
//! never touches the filesystem, so a partially written document cannot
//! happen here. Exclusion rules decide which models and fields survive.

use std::collections::BTreeSet;
use std::path::Path;

use serde::Deserialize;

use crate::analyzer::{FieldClassification, ModelMap};
use crate::descriptions::{normalize_property_name, DescriptionSource};
use crate::error::Error;
use crate::mapper::SchemaPrimitive;

// ------------------------------ Configuration ----------------------------- //

/// Metadata block at the top of the document.
#[derive(Clone, Debug)]
pub struct DocumentInfo {
    pub title: String,
    pub version: String,
    pub description: String,
}

impl Default for DocumentInfo {
    fn default() -> Self {
        Self {
            title: "API Objects".into(),
            version: "1.0.0".into(),
            description: "API Objects".into(),
        }
    }
}

/// Names kept out of the public schema. The defaults mirror the internal
/// carrier types and serialization markers the document never advertises;
/// a config file replaces them wholesale.
#[derive(Clone, Debug)]
pub struct ExclusionRules {
    models: BTreeSet<String>,
    fields: BTreeSet<String>,
}

#[derive(Debug, Default, Deserialize)]
struct ExclusionFile {
    #[serde(default)]
    models: Vec<String>,
    #[serde(default)]
    fields: Vec<String>,
}

impl Default for ExclusionRules {
    fn default() -> Self {
        let models = ["AObjCPT", "ObjNwtPrcAux", "ObjNwtDto", "Dates", "CInsConstant", "AObjCCT"];
        let fields = ["atrPT", "serialVersionUID", "oTrnPrcS"];
        Self {
            models: models.iter().map(|s| s.to_string()).collect(),
            fields: fields.iter().map(|s| s.to_string()).collect(),
        }
    }
}

impl ExclusionRules {
    pub fn from_file(path: &Path) -> Result<Self, Error> {
        let source = std::fs::read_to_string(path).map_err(|source| Error::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let mut de = serde_json::Deserializer::from_str(&source);
        let file: ExclusionFile =
            serde_path_to_error::deserialize(&mut de).map_err(|e| Error::Config {
                path: path.to_path_buf(),
                message: e.to_string(),
            })?;
        Ok(Self {
            models: file.models.into_iter().collect(),
            fields: file.fields.into_iter().collect(),
        })
    }

    pub fn skip_model(&self, name: &str) -> bool {
        self.models.contains(name)
    }

    pub fn skip_field(&self, name: &str) -> bool {
        self.fields.contains(name)
    }
}

// --------------------------------- Writer --------------------------------- //

pub struct SchemaWriter<'a> {
    info: &'a DocumentInfo,
    exclusions: &'a ExclusionRules,
    /// Pre-existing definitions spliced in verbatim under `definitions:`.
    fragment: Option<&'a str>,
    descriptions: Option<&'a dyn DescriptionSource>,
}

impl<'a> SchemaWriter<'a> {
    pub fn new(info: &'a DocumentInfo, exclusions: &'a ExclusionRules) -> Self {
        Self { info, exclusions, fragment: None, descriptions: None }
    }

    pub fn with_fragment(mut self, fragment: &'a str) -> Self {
        self.fragment = Some(fragment);
        self
    }

    pub fn with_descriptions(mut self, source: &'a dyn DescriptionSource) -> Self {
        self.descriptions = Some(source);
        self
    }

    /// Render the whole document. Models render in map order, fields in
    /// declaration order; the caller owns both orderings.
    pub fn render(&self, models: &ModelMap) -> String {
        let mut out = String::new();

        out.push_str("swagger: '2.0'\n");
        out.push_str("info:\n");
        out.push_str(&format!("  description: '{}'\n", self.info.description));
        out.push_str(&format!("  version: '{}'\n", self.info.version));
        out.push_str(&format!("  title: '{}'\n", self.info.title));
        out.push_str("paths: {}\n");
        out.push_str("definitions:\n");

        if let Some(fragment) = self.fragment {
            out.push_str(fragment);
            if !fragment.is_empty() && !fragment.ends_with('\n') {
                out.push('\n');
            }
        }

        for (name, model) in models {
            if model.is_empty() || self.exclusions.skip_model(name) {
                continue;
            }
            out.push_str(&format!("  {name}:\n    type: object\n    properties:\n"));
            for (field, class) in &model.fields {
                if self.exclusions.skip_field(field) {
                    continue;
                }
                self.render_field(&mut out, field, class);
            }
        }

        out
    }

    fn render_field(&self, out: &mut String, field: &str, class: &FieldClassification) {
        match class {
            FieldClassification::ArrayOfReference(target) => {
                out.push_str(&format!(
                    "      {field}:\n        type: array\n        items:\n          $ref: '#/definitions/{target}'\n"
                ));
            }
            FieldClassification::Reference(target) | FieldClassification::CycleStub(target) => {
                out.push_str(&format!(
                    "      {field}:\n        $ref: '#/definitions/{target}'\n"
                ));
            }
            FieldClassification::Binary => {
                self.render_primitive(out, field, SchemaPrimitive::BinaryString);
            }
            FieldClassification::OpaqueMap => {
                out.push_str(&format!(
                    "      {field}:\n        type: object\n        additionalProperties:\n          type: string\n"
                ));
                self.render_description(out, field);
            }
            FieldClassification::Primitive(primitive) => {
                self.render_primitive(out, field, *primitive);
            }
        }
    }

    fn render_primitive(&self, out: &mut String, field: &str, primitive: SchemaPrimitive) {
        let (ty, format) = primitive_parts(primitive);
        out.push_str(&format!("      {field}:\n        type: {ty}\n"));
        if let Some(format) = format {
            out.push_str(&format!("        format: {format}\n"));
        }
        self.render_description(out, field);
    }

    /// `description:` line for inline fields. Sibling keys next to `$ref`
    /// are ignored by swagger tooling, so references are never decorated.
    fn render_description(&self, out: &mut String, field: &str) {
        let Some(source) = self.descriptions else { return };
        if let Some(text) = source.description(&normalize_property_name(field)) {
            out.push_str(&format!("        description: {text}\n"));
        }
    }
}

fn primitive_parts(primitive: SchemaPrimitive) -> (&'static str, Option<&'static str>) {
    use SchemaPrimitive::*;
    match primitive {
        Int32 => ("integer", Some("int32")),
        Int64 => ("integer", Some("int64")),
        Float => ("number", Some("float")),
        Double => ("number", Some("double")),
        Number => ("number", None),
        Boolean => ("boolean", None),
        Str => ("string", None),
        ByteString => ("string", Some("byte")),
        BinaryString => ("string", Some("binary")),
        // Routed to OpaqueMap by the analyzer; kept total over the enum.
        StringMap => ("object", None),
    }
}

// ---------------------------------- Tests --------------------------------- //
