//! This module provides the metabolite struct representing a metabolite

use derive_builder::Builder;
use serde_json::Value;

/// Represents a metabolite
#[derive(Builder, Debug, Clone, PartialEq)]
pub struct Metabolite {
    /// Used to identify the metabolite (must be unique)
    pub id: String,
    /// Human Readable name of the metabolite
    #[builder(default = "None")]
    pub name: Option<String>,
    /// Which compartment the metabolite is in
    #[builder(default = "None")]
    pub compartment: Option<String>,
    /// Electrical charge of the Metabolite
    #[builder(default = "0")]
    pub charge: i32,
    /// Chemical Formula of the metabolite
    #[builder(default = "None")]
    pub formula: Option<String>,
    /// Metabolite annotations (cross references keyed by database name)
    #[builder(default = "None")]
    pub annotation: Option<Value>,
}

impl Metabolite {
    /// Create a metabolite with only an id and a compartment
    pub fn new(id: &str, compartment: Option<&str>) -> Self {
        Metabolite {
            id: id.to_string(),
            name: None,
            compartment: compartment.map(str::to_string),
            charge: 0,
            formula: None,
            annotation: None,
        }
    }
}
