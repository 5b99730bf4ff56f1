//! Minimal CLI: discover → analyze → render
use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::discovery;
use crate::pipeline::{self, GenerateOptions};
use crate::writer::DocumentInfo;

// --------------------------------- Types ---------------------------------- //

/// generate swagger model definitions from declared-type descriptors
#[derive(Parser, Debug)]
pub struct CommandLineInterface {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// discover types, analyze them, and write the swagger document
    Generate(GenerateOut),
    /// list discovered types without rendering anything
    List(ListOut),
}

#[derive(Args, Debug, Clone)]
struct InputSettings {
    /// One or more descriptor roots. May be directories, literal paths, or
    /// quoted glob patterns
    #[arg(long, short, num_args = 1.., required = true)]
    input: Vec<String>,
}

#[derive(Args, Debug)]
struct GenerateOut {
    #[command(flatten)]
    input_settings: InputSettings,

    /// output swagger file
    #[arg(short, long, default_value = "swagger.yaml")]
    out: PathBuf,

    /// pre-existing definitions spliced verbatim into the document
    #[arg(long)]
    fragment: Option<PathBuf>,

    /// JSON exclusion config ({"models": [...], "fields": [...]});
    /// built-in defaults when omitted
    #[arg(long)]
    exclusions: Option<PathBuf>,

    /// JSON field-description store keyed by UPPER_SNAKE property name
    #[arg(long)]
    descriptions: Option<PathBuf>,

    /// document title
    #[arg(long, default_value = "API Objects")]
    title: String,

    /// document version
    #[arg(long, default_value = "1.0.0")]
    api_version: String,

    /// fail the run if any classification warning accumulated
    #[arg(long, default_value_t = false)]
    strict: bool,
}

#[derive(Args, Debug)]
struct ListOut {
    #[command(flatten)]
    input_settings: InputSettings,
}

// ----------------------------- Implementation ------------------------------ //

impl CommandLineInterface {
    pub fn load() -> Self {
        Self::parse()
    }

    pub fn run(&self) -> anyhow::Result<()> {
        match &self.cmd {
            Command::Generate(target) => {
                let opts = GenerateOptions {
                    inputs: target.input_settings.input.clone(),
                    out: target.out.clone(),
                    fragment: target.fragment.clone(),
                    exclusions: target.exclusions.clone(),
                    descriptions: target.descriptions.clone(),
                    info: DocumentInfo {
                        title: target.title.clone(),
                        version: target.api_version.clone(),
                        description: target.title.clone(),
                    },
                    strict: target.strict,
                };
                let report = pipeline::generate(&opts)?;
                for warning in &report.warnings {
                    eprintln!("warning: {warning}");
                }
                Ok(())
            }
            Command::List(target) => {
                let discovered =
                    discovery::discover(target.input_settings.input.iter().map(String::as_str))?;
                for (name, decl) in discovered.registry.iter() {
                    println!("{name}\t{}", decl.qualified_name());
                }
                Ok(())
            }
        }
    }
}
