//! Type declarations and the registry the analyzer resolves references against.
//!
//! A `TypeDecl` is an explicit schema description supplied at registration
//! time: short name, dotted namespace, declared fields. The registry is built
//! once by discovery and injected wherever a short name must resolve; nothing
//! here loads types at runtime.

use indexmap::IndexMap;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::Deserialize;

// ------------------------------ Declarations ------------------------------ //

/// One declared field: the name plus the textual form of its type
/// (`"int"`, `"String"`, `"List<Pet>"`, `"byte[]"`, `"java.util.Date"`).
#[derive(Clone, Debug, Deserialize, PartialEq, Eq)]
pub struct FieldDecl {
    pub name: String,
    #[serde(rename = "type")]
    pub ty: String,
}

/// A structured type's shape, as registered with the discovery collaborator.
#[derive(Clone, Debug, Default, Deserialize, PartialEq, Eq)]
pub struct TypeDecl {
    pub name: String,
    #[serde(default)]
    pub namespace: String,
    #[serde(default)]
    pub fields: Vec<FieldDecl>,
}

impl TypeDecl {
    /// Identity used for cycle bookkeeping: `namespace.name`, or the bare
    /// name when no namespace was declared.
    pub fn qualified_name(&self) -> String {
        if self.namespace.is_empty() {
            self.name.clone()
        } else {
            format!("{}.{}", self.namespace, self.name)
        }
    }
}

// ------------------------------ Field types ------------------------------- //

/// `List` / `List<T>`, with or without the `java.util.` prefix.
static SEQUENCE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(?:java\.util\.)?List(?:<\s*(.*?)\s*>)?$").unwrap());

/// A field's declared type after parsing its textual form.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum FieldType {
    /// Named type. `qualified` is true for dotted names (`java.util.Date`),
    /// which are standard/foreign types and never model references.
    Named { name: String, qualified: bool },
    /// One level of collection nesting. `item` is `None` when the element
    /// type is not spelled out in the declaration.
    Sequence { item: Option<String> },
    /// Raw byte sequence (`byte[]`).
    Bytes,
}

impl FieldType {
    /// Parse the textual form of a declared type. Total: anything that is
    /// not a recognized sequence or byte form is a `Named`.
    pub fn parse(decl: &str) -> FieldType {
        let decl = decl.trim();
        if decl == "byte[]" {
            return FieldType::Bytes;
        }
        if let Some(caps) = SEQUENCE_RE.captures(decl) {
            let item = caps
                .get(1)
                .map(|m| m.as_str().to_string())
                .filter(|s| !s.is_empty());
            return FieldType::Sequence { item };
        }
        FieldType::Named {
            name: decl.to_string(),
            qualified: decl.contains('.'),
        }
    }

    /// Last dotted segment of a named type (`java.util.Date` → `Date`).
    pub fn short_name(&self) -> Option<&str> {
        match self {
            FieldType::Named { name, .. } => Some(name.rsplit('.').next().unwrap_or(name)),
            _ => None,
        }
    }
}

// -------------------------------- Registry -------------------------------- //

/// Short name → declaration, in discovery order.
#[derive(Debug, Default)]
pub struct TypeRegistry {
    types: IndexMap<String, TypeDecl>,
}

impl TypeRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a declaration under its short name. Returns the previous
    /// declaration when the name was already taken (latest wins).
    pub fn register(&mut self, decl: TypeDecl) -> Option<TypeDecl> {
        self.types.insert(decl.name.clone(), decl)
    }

    pub fn resolve(&self, short_name: &str) -> Option<&TypeDecl> {
        self.types.get(short_name)
    }

    pub fn contains(&self, short_name: &str) -> bool {
        self.types.contains_key(short_name)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &TypeDecl)> {
        self.types.iter()
    }

    pub fn len(&self) -> usize {
        self.types.len()
    }

    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }
}

// ---------------------------------- Tests --------------------------------- //
