//! Mapping every model of an input directory
//!
//! Each model goes through load, translate, map and export on its own. A model which
//! fails at any stage is reported and skipped, the rest of the batch still runs.
use std::collections::HashSet;
use std::fmt::{Display, Formatter};
use std::fs;
use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::{info, warn};

use crate::configuration::MappingConfig;
use crate::io::mapping_table::{ExportError, ExportedTables, MappingExporter};
use crate::io::{LoadError, ModelLoader};
use crate::mapping::mapper::ModelMapper;
use crate::mapping::record::MappingSummary;
use crate::translate::{TranslationError, Translator};

/// Stage of the pipeline at which a model failed
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Stage {
    Load,
    Translate,
    Export,
}

impl Display for Stage {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Stage::Load => "load",
            Stage::Translate => "translate",
            Stage::Export => "export",
        };
        write!(f, "{}", name)
    }
}

#[derive(Error, Debug)]
pub enum PipelineError {
    #[error("Unable to load model")]
    Load(#[from] LoadError),
    #[error("Unable to translate model")]
    Translation(#[from] TranslationError),
    #[error("Unable to export mapping tables")]
    Export(#[from] ExportError),
    #[error("Model name {name} of {path} is already used by another file")]
    DuplicateModelName { name: String, path: PathBuf },
    #[error("Unable to list models in {path} due to {source}")]
    UnableToListModels {
        path: PathBuf,
        source: std::io::Error,
    },
}

impl PipelineError {
    /// Stage a per-model error happened at, `None` for errors affecting the whole batch
    pub fn stage(&self) -> Option<Stage> {
        match self {
            PipelineError::Load(_) | PipelineError::DuplicateModelName { .. } => {
                Some(Stage::Load)
            }
            PipelineError::Translation(_) => Some(Stage::Translate),
            PipelineError::Export(_) => Some(Stage::Export),
            PipelineError::UnableToListModels { .. } => None,
        }
    }
}

/// A model which was mapped and written
#[derive(Clone, Debug, PartialEq)]
pub struct MappedModel {
    pub name: String,
    pub tables: ExportedTables,
    pub summary: MappingSummary,
}

/// A model which produced no mapping tables
#[derive(Clone, Debug, PartialEq)]
pub struct FailedModel {
    pub name: String,
    pub stage: Stage,
    pub error: String,
}

/// Outcome of a batch, models listed in processing order
#[derive(Clone, Debug, Default, PartialEq)]
pub struct BatchReport {
    pub mapped: Vec<MappedModel>,
    pub failed: Vec<FailedModel>,
}

impl BatchReport {
    pub fn is_complete(&self) -> bool {
        self.failed.is_empty()
    }
}

/// Runs the mapping pipeline over the model files of a directory
pub struct BatchRunner<'a> {
    input_dir: PathBuf,
    loader: &'a dyn ModelLoader,
    translator: &'a dyn Translator,
    mapper: ModelMapper,
    exporter: MappingExporter,
}

impl<'a> BatchRunner<'a> {
    pub fn new(
        config: &MappingConfig,
        loader: &'a dyn ModelLoader,
        translator: &'a dyn Translator,
    ) -> Self {
        BatchRunner {
            input_dir: config.input_dir.clone(),
            loader,
            translator,
            mapper: ModelMapper::new(&config.namespace, &config.prefix),
            exporter: MappingExporter::new(&config.output_dir, config.format),
        }
    }

    /// Model files of the input directory accepted by the loader, sorted by file name
    pub fn model_files(&self) -> Result<Vec<PathBuf>, PipelineError> {
        let list_error = |source| PipelineError::UnableToListModels {
            path: self.input_dir.clone(),
            source,
        };
        let mut files = Vec::new();
        for entry in fs::read_dir(&self.input_dir).map_err(list_error)? {
            let path = entry.map_err(list_error)?.path();
            if path.is_file() && self.loader.accepts(&path) {
                files.push(path);
            }
        }
        files.sort();
        Ok(files)
    }

    /// Map every model file, only failing if the input directory can't be listed
    ///
    /// Files sharing a name, for example `a.json` and `a.JSON`, would write the same
    /// tables. Only the first one in file name order is mapped.
    pub fn run(&self) -> Result<BatchReport, PipelineError> {
        let files = self.model_files()?;
        info!(
            models = files.len(),
            input_dir = %self.input_dir.display(),
            namespace = self.mapper.namespace(),
            "starting mapping batch"
        );
        let mut report = BatchReport::default();
        let mut names = HashSet::new();
        for path in files {
            let name = model_name(&path);
            let outcome = if names.insert(name.clone()) {
                self.run_model(&name, &path)
            } else {
                Err(PipelineError::DuplicateModelName {
                    name: name.clone(),
                    path: path.clone(),
                })
            };
            match outcome {
                Ok(mapped) => report.mapped.push(mapped),
                Err(err) => {
                    let stage = err.stage().unwrap_or(Stage::Load);
                    let error = match std::error::Error::source(&err) {
                        Some(source) => format!("{}: {}", err, source),
                        None => err.to_string(),
                    };
                    warn!(model = %name, stage = %stage, error = %error, "model mapping failed");
                    report.failed.push(FailedModel { name, stage, error });
                }
            }
        }
        info!(
            mapped = report.mapped.len(),
            failed = report.failed.len(),
            "finished mapping batch"
        );
        Ok(report)
    }

    /// Load, translate, map and export one model
    pub fn run_model(&self, name: &str, path: &Path) -> Result<MappedModel, PipelineError> {
        let model = self.loader.load(path)?;
        let mapping = self.mapper.map_model(name, &model, self.translator)?;
        let tables = self.exporter.export(name, &mapping)?;
        let summary = mapping.summary();
        info!(
            model = %name,
            reactions = summary.reactions,
            transport = summary.transport_reactions,
            distinct_reactions = summary.distinct_reactions,
            metabolites = summary.metabolites,
            distinct_metabolites = summary.distinct_metabolites,
            "wrote mapping tables"
        );
        Ok(MappedModel {
            name: name.to_string(),
            tables,
            summary,
        })
    }
}

/// Models are named after their file, without the extension
fn model_name(path: &Path) -> String {
    path.file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::io::json::JsonModelLoader;
    use crate::io::mapping_table::TableFormat;
    use crate::metabolic_model::model::Model;
    use crate::translate::annotation::AnnotationTranslator;
    use tempfile::TempDir;

    /// Keeps ids unchanged but refuses models whose id starts with "broken"
    struct Picky;

    impl Translator for Picky {
        fn translate(&self, model: &Model, namespace: &str) -> Result<Model, TranslationError> {
            match &model.id {
                Some(id) if id.starts_with("broken") => {
                    Err(TranslationError::UnsupportedNamespace(namespace.to_string()))
                }
                _ => Ok(model.clone()),
            }
        }
    }

    /// Json loader which also reads `.jsn` files
    struct LenientJson;

    impl ModelLoader for LenientJson {
        fn accepts(&self, path: &Path) -> bool {
            JsonModelLoader.accepts(path)
                || path.extension().is_some_and(|ext| ext == "jsn")
        }

        fn load(&self, path: &Path) -> Result<Model, LoadError> {
            JsonModelLoader.load(path)
        }
    }

    const TOY_MODEL: &str = r#"{
"id":"ID",
"metabolites":[
{"id":"MNXM5_c","compartment":"c"},
{"id":"MNXM6_c","compartment":"c"}
],
"reactions":[
{"id":"MNXR1_c","metabolites":{"MNXM5_c":-1.0,"MNXM6_c":1.0}},
{"id":"MNXR2","metabolites":{"MNXM5_c":-1.0}}
]
}"#;

    fn write_model(dir: &Path, file: &str, id: &str) {
        fs::write(dir.join(file), TOY_MODEL.replace("\"ID\"", &format!("\"{}\"", id))).unwrap();
    }

    fn setup_dirs() -> (TempDir, MappingConfig) {
        let temp_dir = TempDir::new().unwrap();
        let input_dir = temp_dir.path().join("models");
        fs::create_dir(&input_dir).unwrap();
        let config = MappingConfig::new(&input_dir, temp_dir.path().join("mappings"));
        (temp_dir, config)
    }

    #[test]
    fn end_to_end_tables() {
        let (_temp_dir, config) = setup_dirs();
        write_model(&config.input_dir, "carveme_toy.json", "carveme_toy");
        let runner = BatchRunner::new(&config, &JsonModelLoader, &Picky);
        let report = runner.run().unwrap();
        assert!(report.is_complete());
        assert_eq!(report.mapped.len(), 1);

        let mapped = &report.mapped[0];
        assert_eq!(mapped.name, "carveme_toy");
        assert_eq!(
            mapped.tables.reactions,
            config.output_dir.join("carveme_toy_rxn_mergem_mapping.csv")
        );
        let reactions = fs::read_to_string(&mapped.tables.reactions).unwrap();
        let lines: Vec<&str> = reactions.lines().collect();
        assert_eq!(
            lines,
            vec![
                "Original ID,Raw translated ID,transport,Final ID",
                "MNXR1_c,MNXR1_c,0,MNXR1",
                "MNXR2,MNXR2,1,Transport removed",
            ]
        );
        let metabolites = fs::read_to_string(&mapped.tables.metabolites).unwrap();
        assert!(metabolites.contains("MNXM5_c,MNXM5_c,MNXM5\n"));
        assert_eq!(mapped.summary.transport_reactions, 1);
    }

    #[test]
    fn failed_translation_does_not_stop_batch() {
        let (_temp_dir, config) = setup_dirs();
        write_model(&config.input_dir, "a_model.json", "a_model");
        write_model(&config.input_dir, "b_model.json", "broken_model");
        write_model(&config.input_dir, "c_model.json", "c_model");
        let runner = BatchRunner::new(&config, &JsonModelLoader, &Picky);
        let report = runner.run().unwrap();

        let mapped: Vec<&str> = report.mapped.iter().map(|m| m.name.as_str()).collect();
        assert_eq!(mapped, vec!["a_model", "c_model"]);
        assert_eq!(report.failed.len(), 1);
        assert_eq!(report.failed[0].name, "b_model");
        assert_eq!(report.failed[0].stage, Stage::Translate);
        assert!(!report.is_complete());

        for name in ["a_model", "c_model"] {
            let rxn = config.output_dir.join(format!("{}_rxn_mergem_mapping.csv", name));
            let met = config.output_dir.join(format!("{}_met_mergem_mapping.csv", name));
            assert_eq!(fs::read_to_string(rxn).unwrap().lines().count(), 3);
            assert_eq!(fs::read_to_string(met).unwrap().lines().count(), 3);
        }
        assert!(!config.output_dir.join("b_model_rxn_mergem_mapping.csv").exists());
        assert!(!config.output_dir.join("b_model_met_mergem_mapping.csv").exists());
    }

    #[test]
    fn failed_load_is_reported() {
        let (_temp_dir, config) = setup_dirs();
        fs::write(config.input_dir.join("bad.json"), "{ not json").unwrap();
        write_model(&config.input_dir, "good.json", "good");
        fs::write(config.input_dir.join("notes.txt"), "ignored").unwrap();
        let runner = BatchRunner::new(&config, &JsonModelLoader, &Picky);
        let report = runner.run().unwrap();

        assert_eq!(report.mapped.len(), 1);
        assert_eq!(report.failed.len(), 1);
        assert_eq!(report.failed[0].name, "bad");
        assert_eq!(report.failed[0].stage, Stage::Load);
        assert!(report.failed[0].error.starts_with("Unable to load model"));
    }

    #[test]
    fn tsv_output_with_annotation_translator() {
        let (_temp_dir, mut config) = setup_dirs();
        config.format = TableFormat::Tsv;
        let fixture = PathBuf::from(env!("CARGO_MANIFEST_DIR"))
            .join("test_data")
            .join("test_models")
            .join("e_coli_subset.json");
        fs::copy(fixture, config.input_dir.join("e_coli_subset.json")).unwrap();
        let runner = BatchRunner::new(&config, &JsonModelLoader, &AnnotationTranslator);
        let report = runner.run().unwrap();

        assert!(report.is_complete());
        let reactions = fs::read_to_string(&report.mapped[0].tables.reactions).unwrap();
        assert!(reactions.contains("PGI_m\tMNXR102535~2\t0\tMNXR102535\n"));
        assert!(reactions.contains("GLCpts\tMNXR100253\t1\tTransport removed\n"));
    }

    #[test]
    fn shared_model_name_is_mapped_once() {
        let (_temp_dir, config) = setup_dirs();
        write_model(&config.input_dir, "a.jsn", "first");
        write_model(&config.input_dir, "a.json", "broken_second");
        let runner = BatchRunner::new(&config, &LenientJson, &Picky);
        let report = runner.run().unwrap();

        assert_eq!(report.mapped.len(), 1);
        assert_eq!(report.mapped[0].name, "a");
        assert_eq!(report.failed.len(), 1);
        assert_eq!(report.failed[0].name, "a");
        assert_eq!(report.failed[0].stage, Stage::Load);
        assert!(report.failed[0].error.contains("a.json"));
        assert!(report.failed[0].error.contains("already used"));
        assert_eq!(
            fs::read_to_string(config.output_dir.join("a_rxn_mergem_mapping.csv"))
                .unwrap()
                .lines()
                .count(),
            3
        );
    }

    #[test]
    fn missing_input_dir() {
        let temp_dir = TempDir::new().unwrap();
        let config = MappingConfig::new(temp_dir.path().join("missing"), temp_dir.path());
        let runner = BatchRunner::new(&config, &JsonModelLoader, &Picky);
        let err = runner.run().unwrap_err();
        assert!(matches!(err, PipelineError::UnableToListModels { .. }));
        assert_eq!(err.stage(), None);
    }

    #[test]
    fn names_from_file_stem() {
        assert_eq!(model_name(Path::new("models/gapseq_ecoli.json")), "gapseq_ecoli");
        assert_eq!(model_name(Path::new("models/model.v2.json")), "model.v2");
    }
}
