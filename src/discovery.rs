//! Descriptor discovery: walks the configured roots and builds the registry.
//!
//! Roots may be literal files, directories (walked recursively, entries
//! sorted by name so output order is reproducible), or glob patterns. Each
//! `.json` file holds one `TypeDecl`. A file that fails to parse is skipped
//! with an error log; discovery never aborts the run over one bad file.

use std::path::{Path, PathBuf};

use crate::analyzer::Warning;
use crate::descriptor::{TypeDecl, TypeRegistry};
use crate::error::Error;

/// Registry plus the warnings discovery itself produced (duplicate names).
pub struct Discovered {
    pub registry: TypeRegistry,
    pub warnings: Vec<Warning>,
}

pub fn discover<I>(roots: I) -> Result<Discovered, Error>
where
    I: IntoIterator,
    I::Item: AsRef<str>,
{
    let mut registry = TypeRegistry::new();
    let mut warnings = Vec::new();

    for path in resolve_roots(roots)? {
        let decl = match load_decl(&path) {
            Some(decl) => decl,
            None => continue,
        };
        log::debug!("discovered {} ({})", decl.qualified_name(), path.display());
        if let Some(displaced) = registry.register(decl) {
            warnings.push(Warning::DuplicateTypeName { name: displaced.name });
        }
    }

    Ok(Discovered { registry, warnings })
}

fn load_decl(path: &Path) -> Option<TypeDecl> {
    let source = match std::fs::read_to_string(path) {
        Ok(source) => source,
        Err(error) => {
            log::error!("cannot read {}: {error}", path.display());
            return None;
        }
    };
    let mut de = serde_json::Deserializer::from_str(&source);
    match serde_path_to_error::deserialize::<_, TypeDecl>(&mut de) {
        Ok(decl) if decl.name.is_empty() => {
            log::error!("descriptor {} has an empty type name; skipped", path.display());
            None
        }
        Ok(decl) => Some(decl),
        Err(error) => {
            log::error!("invalid descriptor {}: {error}", path.display());
            None
        }
    }
}

/// Expand every root into the sorted list of descriptor files underneath it.
fn resolve_roots<I>(roots: I) -> Result<Vec<PathBuf>, Error>
where
    I: IntoIterator,
    I::Item: AsRef<str>,
{
    fn has_glob_chars(s: &str) -> bool {
        s.bytes().any(|b| matches!(b, b'*' | b'?' | b'[' | b'{'))
    }

    let mut out = Vec::<PathBuf>::new();

    for raw in roots {
        let root = raw.as_ref();

        if has_glob_chars(root) {
            let entries = glob::glob(root).map_err(|source| Error::Pattern {
                pattern: root.to_string(),
                source,
            })?;
            let mut matched_any = false;
            for entry in entries {
                match entry {
                    Ok(matched) => {
                        matched_any = true;
                        collect_descriptors(&matched, &mut out);
                    }
                    Err(error) => log::error!("cannot access glob match: {error}"),
                }
            }
            if !matched_any {
                // An explicit glob matching nothing is a configuration error.
                return Err(Error::EmptyGlob { pattern: root.to_string() });
            }
        } else {
            let path = Path::new(root);
            // A misconfigured literal root would otherwise produce an empty
            // document with no diagnostic, same failure class as an empty glob.
            if !path.exists() {
                return Err(Error::MissingRoot { path: path.to_path_buf() });
            }
            collect_descriptors(path, &mut out);
        }
    }

    Ok(out)
}

fn collect_descriptors(path: &Path, out: &mut Vec<PathBuf>) {
    if path.is_dir() {
        let mut entries: Vec<PathBuf> = match std::fs::read_dir(path) {
            Ok(rd) => rd.filter_map(|e| e.ok()).map(|e| e.path()).collect(),
            Err(error) => {
                log::error!("cannot list {}: {error}", path.display());
                return;
            }
        };
        entries.sort();
        for entry in entries {
            collect_descriptors(&entry, out);
        }
    } else if path.extension().map(|e| e == "json").unwrap_or(false) {
        out.push(path.to_path_buf());
    }
}
