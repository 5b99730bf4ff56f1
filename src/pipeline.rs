//! One-shot generation run: discover → analyze → validate → render → write.

use std::path::PathBuf;

use crate::analyzer::{self, Analyzer, ModelMap, Warning};
use crate::descriptions::JsonDescriptions;
use crate::discovery;
use crate::error::Error;
use crate::writer::{DocumentInfo, ExclusionRules, SchemaWriter};

pub struct GenerateOptions {
    /// Descriptor roots: directories, literal paths, or glob patterns.
    pub inputs: Vec<String>,
    pub out: PathBuf,
    /// Pre-existing definitions spliced verbatim under `definitions:`.
    pub fragment: Option<PathBuf>,
    /// Exclusion config; built-in defaults when absent.
    pub exclusions: Option<PathBuf>,
    /// Optional field-description store.
    pub descriptions: Option<PathBuf>,
    pub info: DocumentInfo,
    /// Fail the run when any warning accumulated.
    pub strict: bool,
}

pub struct RunReport {
    /// Types discovered and analyzed.
    pub types: usize,
    pub warnings: Vec<Warning>,
}

pub fn generate(opts: &GenerateOptions) -> Result<RunReport, Error> {
    log::info!("swaggen running...");

    let discovered = discovery::discover(opts.inputs.iter().map(String::as_str))?;
    let registry = discovered.registry;
    let mut warnings = discovered.warnings;
    log::debug!("discovered {} type(s)", registry.len());

    // Sequential, one analyzer per run; the visited set dies with it.
    let mut models = ModelMap::new();
    {
        let mut an = Analyzer::new(&registry);
        for (name, decl) in registry.iter() {
            models.insert(name.clone(), an.analyze(decl));
        }
        warnings.extend(an.take_warnings());
    }
    warnings.extend(analyzer::validate_references(&models, &registry));

    let exclusions = match &opts.exclusions {
        Some(path) => ExclusionRules::from_file(path)?,
        None => ExclusionRules::default(),
    };

    // Missing fragment degrades to an empty splice, as the run must still
    // produce the generated definitions.
    let fragment = match &opts.fragment {
        Some(path) => match std::fs::read_to_string(path) {
            Ok(text) => Some(text),
            Err(error) => {
                log::error!("cannot read fragment {}: {error}", path.display());
                None
            }
        },
        None => None,
    };

    let descriptions = match &opts.descriptions {
        Some(path) => match JsonDescriptions::from_file(path) {
            Ok(source) => Some(source),
            Err(error) => {
                log::warn!("description store unavailable: {error}");
                None
            }
        },
        None => None,
    };

    let mut writer = SchemaWriter::new(&opts.info, &exclusions);
    if let Some(fragment) = fragment.as_deref() {
        writer = writer.with_fragment(fragment);
    }
    if let Some(source) = &descriptions {
        writer = writer.with_descriptions(source);
    }
    let document = writer.render(&models);

    // Whole document in one shot; a failure here aborts, never truncates.
    std::fs::write(&opts.out, &document).map_err(|source| Error::Write {
        path: opts.out.clone(),
        source,
    })?;

    for warning in &warnings {
        log::warn!("{warning}");
    }
    if opts.strict && !warnings.is_empty() {
        return Err(Error::Strict { count: warnings.len() });
    }

    log::info!("swaggen wrote {} ({} model(s))", opts.out.display(), models.len());
    Ok(RunReport { types: registry.len(), warnings })
}
