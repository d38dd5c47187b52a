//! Command line entry point, maps every model of a directory onto a shared namespace
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::Parser;
use modelmap_core::batch::BatchRunner;
use modelmap_core::configuration::{ConfigError, MappingConfig};
use modelmap_core::io::json::JsonModelLoader;
use modelmap_core::io::mapping_table::TableFormat;
use modelmap_core::translate::annotation::AnnotationTranslator;
use modelmap_core::translate::lookup::LookupTranslator;
use modelmap_core::translate::{TranslationError, Translator};

mod logger;

const EXIT_CONFIG_ERROR: u8 = 1;
const EXIT_MODEL_FAILURES: u8 = 2;

#[derive(Debug, Parser)]
#[command(name = "modelmap")]
#[command(about = "Map metabolic model identifiers onto a shared namespace")]
struct Cli {
    /// TOML configuration file, flags override its values
    #[arg(long)]
    config: Option<PathBuf>,

    /// Directory holding the model files
    #[arg(long)]
    input_dir: Option<PathBuf>,

    /// Directory the mapping tables are written to
    #[arg(long)]
    output_dir: Option<PathBuf>,

    /// Namespace the models are translated into
    #[arg(long)]
    namespace: Option<String>,

    /// Prefix of canonical identifiers in the namespace
    #[arg(long)]
    prefix: Option<String>,

    /// Output table format (csv or tsv)
    #[arg(long)]
    format: Option<TableFormat>,

    /// Translate with a native_id,translated_id lookup table instead of model annotations.
    /// Tab separated when the file ends in .tsv, comma separated otherwise
    #[arg(long)]
    lookup: Option<PathBuf>,

    #[arg(long, short, help = "Enable verbose output")]
    verbose: bool,
}

impl Cli {
    fn into_config(self) -> Result<(MappingConfig, Option<PathBuf>), ConfigError> {
        let mut config = match &self.config {
            Some(path) => MappingConfig::from_toml_file(path)?,
            None => {
                let (input_dir, output_dir) = match (&self.input_dir, &self.output_dir) {
                    (Some(input_dir), Some(output_dir)) => (input_dir, output_dir),
                    _ => {
                        return Err(ConfigError::InvalidValue {
                            field: "input_dir/output_dir",
                            reason: "both are required without --config".to_string(),
                        })
                    }
                };
                MappingConfig::new(input_dir, output_dir)
            }
        };
        if let Some(input_dir) = self.input_dir {
            config.input_dir = input_dir;
        }
        if let Some(output_dir) = self.output_dir {
            config.output_dir = output_dir;
        }
        if let Some(namespace) = self.namespace {
            config.namespace = namespace;
        }
        if let Some(prefix) = self.prefix {
            config.prefix = prefix;
        }
        if let Some(format) = self.format {
            config.format = format;
        }
        config.validate()?;
        Ok((config, self.lookup))
    }
}

/// Translator for the run, a lookup table when one is given and model annotations otherwise
fn load_translator(
    config: &MappingConfig,
    lookup: Option<&Path>,
) -> Result<Box<dyn Translator>, TranslationError> {
    match lookup {
        Some(path) => {
            let translator = LookupTranslator::from_path(&config.namespace, path)?;
            tracing::info!(entries = translator.entries(), "Loaded lookup table {}", path.display());
            Ok(Box::new(translator))
        }
        None => Ok(Box::new(AnnotationTranslator)),
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    logger::init_cli_logger(cli.verbose);

    let (config, lookup) = match cli.into_config() {
        Ok(parsed) => parsed,
        Err(err) => {
            tracing::error!("Configuration failed: {}", err);
            return ExitCode::from(EXIT_CONFIG_ERROR);
        }
    };
    tracing::debug!("Configuration: {:?}", config);

    let translator = match load_translator(&config, lookup.as_deref()) {
        Ok(translator) => translator,
        Err(err) => {
            let path = lookup.as_deref().unwrap_or(Path::new(""));
            tracing::error!("Unable to load lookup table {}: {}", path.display(), err);
            return ExitCode::from(EXIT_CONFIG_ERROR);
        }
    };

    let loader = JsonModelLoader;
    let runner = BatchRunner::new(&config, &loader, translator.as_ref());
    let report = match runner.run() {
        Ok(report) => report,
        Err(err) => {
            tracing::error!("Mapping failed: {}", err);
            return ExitCode::from(EXIT_CONFIG_ERROR);
        }
    };

    for failed in &report.failed {
        eprintln!("{}: failed at {} ({})", failed.name, failed.stage, failed.error);
    }
    println!(
        "Mapped {} model(s) into {}",
        report.mapped.len(),
        config.output_dir.display()
    );
    if report.is_complete() {
        ExitCode::SUCCESS
    } else {
        ExitCode::from(EXIT_MODEL_FAILURES)
    }
}
