//! Module for reading Models and writing mapping tables
use std::path::Path;

use thiserror::Error;

use crate::metabolic_model::model::Model;

pub mod json;
pub mod mapping_table;

/// Reads a model exchange document into a [`Model`]
pub trait ModelLoader {
    /// Whether this loader handles the file at `path`
    fn accepts(&self, path: &Path) -> bool;

    fn load(&self, path: &Path) -> Result<Model, LoadError>;
}

#[derive(Error, Debug)]
pub enum LoadError {
    #[error("Unable to read file due to {0}")]
    UnableToRead(#[from] std::io::Error),
    #[error("Unable to parse json due to {0}")]
    UnableToParse(#[from] serde_json::Error),
    #[error("Reaction {reaction} references metabolite {metabolite} which is not in the model")]
    UnknownMetabolite { reaction: String, metabolite: String },
    #[error("Duplicate {kind} id {id}")]
    DuplicateId { kind: &'static str, id: String },
    #[error("Found a {0} with an empty id")]
    EmptyId(&'static str),
}
