//! Field classification over the declared type graph.
//!
//! One `Analyzer` per generation run; it owns the visited set, so repeated
//! runs (and tests) stay isolated. Classification never fails: every branch
//! degrades to a best-effort result and records a structured warning where
//! information was lost.

use std::collections::HashSet;
use std::fmt;

use indexmap::IndexMap;

use crate::descriptor::{FieldDecl, FieldType, TypeDecl, TypeRegistry};
use crate::mapper::{self, SchemaPrimitive};

// ----------------------------- Classifications ---------------------------- //

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum FieldClassification {
    Primitive(SchemaPrimitive),
    /// Field is itself a structured type; holds the referenced model name.
    Reference(String),
    /// Sequence of a structured type.
    ArrayOfReference(String),
    /// Raw byte sequence, rendered as a binary string.
    Binary,
    /// Untyped key → string map.
    OpaqueMap,
    /// The type was already under analysis higher up; rendered like a
    /// plain reference, never recursed into.
    CycleStub(String),
}

/// Field name → classification for one type, in declaration order.
/// Immutable once returned; the writer only filters what it emits.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Model {
    pub fields: IndexMap<String, FieldClassification>,
}

impl Model {
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

/// All analyzed models, keyed by short name in discovery order.
pub type ModelMap = IndexMap<String, Model>;

// -------------------------------- Warnings -------------------------------- //

/// Structured record of every place classification degraded, so callers can
/// audit fallbacks instead of grepping logs.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Warning {
    UnknownScalar { model: String, field: String, ty: String },
    UnresolvedSequence { model: String, field: String },
    DuplicateTypeName { name: String },
    DanglingReference { model: String, field: String, target: String },
}

impl fmt::Display for Warning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Warning::UnknownScalar { model, field, ty } => {
                write!(f, "unknown scalar type `{ty}` on {model}.{field}; fell back to string")
            }
            Warning::UnresolvedSequence { model, field } => {
                write!(f, "sequence field {model}.{field} has no resolvable element type; fell back to string")
            }
            Warning::DuplicateTypeName { name } => {
                write!(f, "type `{name}` was discovered more than once; keeping the latest declaration")
            }
            Warning::DanglingReference { model, field, target } => {
                write!(f, "{model}.{field} references `{target}`, which was never discovered")
            }
        }
    }
}

// -------------------------------- Analyzer -------------------------------- //

pub struct Analyzer<'r> {
    registry: &'r TypeRegistry,
    /// Qualified names already analyzed this run.
    visited: HashSet<String>,
    warnings: Vec<Warning>,
}

impl<'r> Analyzer<'r> {
    pub fn new(registry: &'r TypeRegistry) -> Self {
        Self { registry, visited: HashSet::new(), warnings: Vec::new() }
    }

    /// Produce the model for one declared type. Re-encountering a type that
    /// is already in the visited set yields a single-entry sentinel model
    /// (keyed by the qualified name) instead of re-analyzing.
    pub fn analyze(&mut self, decl: &TypeDecl) -> Model {
        let qualified = decl.qualified_name();
        if !self.visited.insert(qualified.clone()) {
            let mut fields = IndexMap::new();
            fields.insert(qualified, FieldClassification::CycleStub(decl.name.clone()));
            return Model { fields };
        }

        let mut fields = IndexMap::new();
        for field in &decl.fields {
            let class = self.classify(decl, field);
            fields.insert(field.name.clone(), class);
        }
        Model { fields }
    }

    fn classify(&mut self, decl: &TypeDecl, field: &FieldDecl) -> FieldClassification {
        let parsed = FieldType::parse(&field.ty);
        match &parsed {
            FieldType::Sequence { item: Some(item) } => {
                FieldClassification::ArrayOfReference(item.clone())
            }
            FieldType::Sequence { item: None } => {
                // Element type not spelled out; degrade rather than crash.
                self.warnings.push(Warning::UnresolvedSequence {
                    model: decl.name.clone(),
                    field: field.name.clone(),
                });
                FieldClassification::Primitive(SchemaPrimitive::Str)
            }
            FieldType::Bytes => FieldClassification::Binary,
            FieldType::Named { name, qualified } => {
                let short = parsed.short_name().unwrap_or_default();
                if *qualified || mapper::is_scalar(short) {
                    let mapped = mapper::map_primitive(short);
                    if mapped.fallback {
                        log::info!("type not found: {short}");
                        self.warnings.push(Warning::UnknownScalar {
                            model: decl.name.clone(),
                            field: field.name.clone(),
                            ty: name.clone(),
                        });
                    }
                    match mapped.primitive {
                        SchemaPrimitive::StringMap => FieldClassification::OpaqueMap,
                        primitive => FieldClassification::Primitive(primitive),
                    }
                } else {
                    FieldClassification::Reference(short.to_string())
                }
            }
        }
    }

    pub fn warnings(&self) -> &[Warning] {
        &self.warnings
    }

    pub fn take_warnings(&mut self) -> Vec<Warning> {
        std::mem::take(&mut self.warnings)
    }
}

/// Post-analysis pass over every reference-shaped field. Referenced types
/// that were never independently discovered dangle by contract; this
/// surfaces them instead of silently emitting refs to nowhere.
pub fn validate_references(models: &ModelMap, registry: &TypeRegistry) -> Vec<Warning> {
    let mut warnings = Vec::new();
    for (model_name, model) in models {
        for (field_name, class) in &model.fields {
            let target = match class {
                FieldClassification::Reference(t)
                | FieldClassification::ArrayOfReference(t) => t,
                _ => continue,
            };
            if !registry.contains(target) {
                warnings.push(Warning::DanglingReference {
                    model: model_name.clone(),
                    field: field_name.clone(),
                    target: target.clone(),
                });
            }
        }
    }
    warnings
}

// ---------------------------------- Tests --------------------------------- //
