//! Writing reaction and metabolite mapping tables as delimited text
use std::fmt::{Display, Formatter};
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::warn;

use crate::mapping::record::{ModelMapping, METABOLITE_COLUMNS, REACTION_COLUMNS};

/// File name suffix of reaction mapping tables
pub const REACTION_TABLE_SUFFIX: &str = "_rxn_mergem_mapping";
/// File name suffix of metabolite mapping tables
pub const METABOLITE_TABLE_SUFFIX: &str = "_met_mergem_mapping";

/// Delimited text format of the mapping tables
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TableFormat {
    /// Comma separated, `.csv` files
    #[default]
    Csv,
    /// Tab separated, `.tsv` files
    Tsv,
}

impl TableFormat {
    pub fn delimiter(&self) -> u8 {
        match self {
            TableFormat::Csv => b',',
            TableFormat::Tsv => b'\t',
        }
    }

    pub fn extension(&self) -> &'static str {
        match self {
            TableFormat::Csv => "csv",
            TableFormat::Tsv => "tsv",
        }
    }
}

impl Display for TableFormat {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.extension())
    }
}

#[derive(Error, Debug)]
#[error("Unknown table format {0}, expected csv or tsv")]
pub struct UnknownTableFormat(pub String);

impl FromStr for TableFormat {
    type Err = UnknownTableFormat;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "csv" => Ok(TableFormat::Csv),
            "tsv" => Ok(TableFormat::Tsv),
            _ => Err(UnknownTableFormat(s.to_string())),
        }
    }
}

#[derive(Error, Debug)]
pub enum ExportError {
    #[error("Unable to write mapping table due to {0}")]
    UnableToWrite(#[from] std::io::Error),
    #[error("Unable to serialize mapping table due to {0}")]
    UnableToSerialize(#[from] csv::Error),
}

/// Paths of the two tables written for one model
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ExportedTables {
    pub reactions: PathBuf,
    pub metabolites: PathBuf,
}

/// Writes the mapping tables of each model into one output directory
///
/// Tables are named `<model_name>_rxn_mergem_mapping.<ext>` and
/// `<model_name>_met_mergem_mapping.<ext>`. Existing tables are replaced. A model either
/// gets both tables or, when writing fails, neither of its new tables.
#[derive(Clone, Debug)]
pub struct MappingExporter {
    output_dir: PathBuf,
    format: TableFormat,
}

impl MappingExporter {
    pub fn new<P: Into<PathBuf>>(output_dir: P, format: TableFormat) -> Self {
        MappingExporter {
            output_dir: output_dir.into(),
            format,
        }
    }

    pub fn reaction_path(&self, model_name: &str) -> PathBuf {
        self.table_path(model_name, REACTION_TABLE_SUFFIX)
    }

    pub fn metabolite_path(&self, model_name: &str) -> PathBuf {
        self.table_path(model_name, METABOLITE_TABLE_SUFFIX)
    }

    fn table_path(&self, model_name: &str, suffix: &str) -> PathBuf {
        self.output_dir
            .join(format!("{}{}.{}", model_name, suffix, self.format.extension()))
    }

    /// Write both mapping tables of a model, creating the output directory if needed
    pub fn export(
        &self,
        model_name: &str,
        mapping: &ModelMapping,
    ) -> Result<ExportedTables, ExportError> {
        fs::create_dir_all(&self.output_dir)?;
        let tables = ExportedTables {
            reactions: self.reaction_path(model_name),
            metabolites: self.metabolite_path(model_name),
        };
        let reactions = self.write_partial(&tables.reactions, &REACTION_COLUMNS, &mapping.reactions)?;
        let metabolites =
            match self.write_partial(&tables.metabolites, &METABOLITE_COLUMNS, &mapping.metabolites) {
                Ok(partial) => partial,
                Err(err) => {
                    remove_leftover(&reactions);
                    return Err(err);
                }
            };

        if let Err(err) = fs::rename(&reactions, &tables.reactions) {
            remove_leftover(&reactions);
            remove_leftover(&metabolites);
            return Err(err.into());
        }
        if let Err(err) = fs::rename(&metabolites, &tables.metabolites) {
            remove_leftover(&tables.reactions);
            remove_leftover(&metabolites);
            return Err(err.into());
        }
        Ok(tables)
    }

    /// Write rows to a sibling `.partial` file which is moved into place by the caller
    fn write_partial<T: Serialize>(
        &self,
        path: &Path,
        header: &[&str],
        rows: &[T],
    ) -> Result<PathBuf, ExportError> {
        let mut partial = path.as_os_str().to_owned();
        partial.push(".partial");
        let partial = PathBuf::from(partial);

        if let Err(err) = self.write_rows(&partial, header, rows) {
            remove_leftover(&partial);
            return Err(err);
        }
        Ok(partial)
    }

    fn write_rows<T: Serialize>(
        &self,
        path: &Path,
        header: &[&str],
        rows: &[T],
    ) -> Result<(), ExportError> {
        let mut writer = csv::WriterBuilder::new()
            .delimiter(self.format.delimiter())
            .has_headers(false)
            .from_path(path)?;
        writer.write_record(header)?;
        for row in rows {
            writer.serialize(row)?;
        }
        writer.flush()?;
        Ok(())
    }
}

/// Remove a file written by a failed export, missing files are fine
fn remove_leftover(path: &Path) {
    match fs::remove_file(path) {
        Ok(()) => {}
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => {}
        Err(err) => {
            warn!(path = %path.display(), error = %err, "unable to remove leftover mapping table");
        }
    }
}
