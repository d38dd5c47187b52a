//! This module provides a struct for representing reactions
use derive_builder::Builder;
use indexmap::IndexMap;
use serde_json::Value;

/// Lower flux bound used when a model does not provide one
pub const DEFAULT_LOWER_BOUND: f64 = -1000.;
/// Upper flux bound used when a model does not provide one
pub const DEFAULT_UPPER_BOUND: f64 = 1000.;

/// Represents a reaction in the metabolic model
#[derive(Builder, Debug, Clone, PartialEq)]
pub struct Reaction {
    /// Used to identify the reaction
    pub id: String,
    /// Metabolite stoichiometry of the reaction, keyed by metabolite id
    #[builder(default = "IndexMap::new()")]
    pub metabolites: IndexMap<String, f64>,
    /// Human-readable reaction name
    #[builder(default = "None")]
    pub name: Option<String>,
    /// Lower flux bound
    #[builder(default = "DEFAULT_LOWER_BOUND")]
    pub lower_bound: f64,
    /// Upper flux bound
    #[builder(default = "DEFAULT_UPPER_BOUND")]
    pub upper_bound: f64,
    /// Reaction subsystem
    #[builder(default = "None")]
    pub subsystem: Option<String>,
    /// Reaction Annotations
    #[builder(default = "None")]
    pub annotation: Option<Value>,
    /// Whether the source model declares this reaction as a system boundary
    /// (exchange, demand or sink) reaction
    #[builder(default = "false")]
    pub boundary: bool,
}

impl Reaction {
    /// Create a reaction from an id and its stoichiometry
    ///
    /// # Examples
    /// ```rust
    /// use modelmap_core::metabolic_model::reaction::Reaction;
    /// let rxn = Reaction::new("PGI", &[("g6p_c", -1.0), ("f6p_c", 1.0)], false);
    /// assert_eq!(rxn.metabolites.len(), 2);
    /// ```
    pub fn new(id: &str, stoichiometry: &[(&str, f64)], boundary: bool) -> Self {
        Reaction {
            id: id.to_string(),
            metabolites: stoichiometry
                .iter()
                .map(|(met, coef)| (met.to_string(), *coef))
                .collect(),
            name: None,
            lower_bound: DEFAULT_LOWER_BOUND,
            upper_bound: DEFAULT_UPPER_BOUND,
            subsystem: None,
            annotation: None,
            boundary,
        }
    }
}
