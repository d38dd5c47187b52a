//! Module providing JSON IO for Models in the COBRA json format
use std::fs;
use std::path::Path;

use indexmap::IndexMap;
use serde::Deserialize;
use serde_json::Value;

use crate::io::{LoadError, ModelLoader};
use crate::metabolic_model::metabolite::Metabolite;
use crate::metabolic_model::model::Model;
use crate::metabolic_model::reaction::{Reaction, DEFAULT_LOWER_BOUND, DEFAULT_UPPER_BOUND};

// region JSON Model
/// Represents a JSON serialized model, used for reading models in json format
#[derive(Deserialize)]
struct JsonModel {
    metabolites: Vec<JsonMetabolite>,
    reactions: Vec<JsonReaction>,
    id: Option<String>,
    compartments: Option<IndexMap<String, String>>,
    version: Option<Value>,
}

#[derive(Deserialize)]
struct JsonMetabolite {
    id: String,
    name: Option<String>,
    compartment: Option<String>,
    charge: Option<i32>,
    formula: Option<String>,
    annotation: Option<Value>,
}

#[derive(Deserialize)]
struct JsonReaction {
    id: String,
    name: Option<String>,
    metabolites: IndexMap<String, f64>,
    lower_bound: Option<f64>,
    upper_bound: Option<f64>,
    subsystem: Option<String>,
    annotation: Option<Value>,
    /// Explicit boundary declaration, not part of the cobrapy schema
    boundary: Option<bool>,
}
// endregion JSON Model

// region Conversions
impl From<JsonMetabolite> for Metabolite {
    fn from(m: JsonMetabolite) -> Self {
        Self {
            id: m.id,
            name: m.name,
            compartment: m.compartment,
            charge: m.charge.unwrap_or_default(),
            formula: m.formula,
            annotation: m.annotation,
        }
    }
}

impl From<JsonReaction> for Reaction {
    fn from(r: JsonReaction) -> Self {
        // Exchange, demand and sink reactions have a single metabolite
        let boundary = r.boundary.unwrap_or(r.metabolites.len() == 1);
        Self {
            id: r.id,
            metabolites: r.metabolites,
            name: r.name,
            lower_bound: r.lower_bound.unwrap_or(DEFAULT_LOWER_BOUND),
            upper_bound: r.upper_bound.unwrap_or(DEFAULT_UPPER_BOUND),
            subsystem: r.subsystem,
            annotation: r.annotation,
            boundary,
        }
    }
}

impl Model {
    pub fn read_json<P: AsRef<Path>>(path: P) -> Result<Model, LoadError> {
        let model_str = fs::read_to_string(path)?;
        Model::from_json_str(&model_str)
    }

    pub fn from_json_str(model_str: &str) -> Result<Model, LoadError> {
        let json_model = serde_json::from_str::<JsonModel>(model_str)?;
        Model::from_json(json_model)
    }

    fn from_json(json_model: JsonModel) -> Result<Self, LoadError> {
        let mut model = Model::new_empty();
        for m in json_model.metabolites {
            if m.id.is_empty() {
                return Err(LoadError::EmptyId("metabolite"));
            }
            if model.metabolites.contains_key(&m.id) {
                return Err(LoadError::DuplicateId {
                    kind: "metabolite",
                    id: m.id,
                });
            }
            model.add_metabolite(Metabolite::from(m));
        }
        for r in json_model.reactions {
            if r.id.is_empty() {
                return Err(LoadError::EmptyId("reaction"));
            }
            if model.reactions.contains_key(&r.id) {
                return Err(LoadError::DuplicateId {
                    kind: "reaction",
                    id: r.id,
                });
            }
            if let Some(missing) = r
                .metabolites
                .keys()
                .find(|met| !model.metabolites.contains_key(*met))
            {
                return Err(LoadError::UnknownMetabolite {
                    reaction: r.id.clone(),
                    metabolite: missing.clone(),
                });
            }
            model.add_reaction(Reaction::from(r));
        }
        model.id = json_model.id;
        model.compartments = json_model.compartments;
        // cobrapy writes the version as either a string or a number
        model.version = json_model.version.map(|v| match v {
            Value::String(s) => s,
            other => other.to_string(),
        });
        Ok(model)
    }
}

/// [`ModelLoader`] for COBRA json documents (`.json` files)
#[derive(Clone, Debug, Default)]
pub struct JsonModelLoader;

impl ModelLoader for JsonModelLoader {
    fn accepts(&self, path: &Path) -> bool {
        path.extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| ext.eq_ignore_ascii_case("json"))
    }

    fn load(&self, path: &Path) -> Result<Model, LoadError> {
        Model::read_json(path)
    }
}
// endregion Conversions
