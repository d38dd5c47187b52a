//! This module provides the Model struct for representing an entire metabolic model
use indexmap::{IndexMap, IndexSet};

use crate::metabolic_model::metabolite::Metabolite;
use crate::metabolic_model::reaction::Reaction;

/// Represents a Genome Scale Metabolic Model
///
/// Reactions and metabolites keep the order in which they were added, which is the order
/// the mapping tables are written in.
#[derive(Clone, Debug, PartialEq)]
pub struct Model {
    /// Map of reaction ids to Reaction Objects
    pub reactions: IndexMap<String, Reaction>,
    /// Map of metabolite ids to Metabolite Objects
    pub metabolites: IndexMap<String, Metabolite>,
    /// Id associated with the Model
    pub id: Option<String>,
    /// Compartments in the model
    ///
    /// An IndexMap<String, String> of {short name: long name}
    pub compartments: Option<IndexMap<String, String>>,
    /// A version identifier for the Model, stored as a string
    pub version: Option<String>,
}

impl Model {
    pub fn new_empty() -> Self {
        Model {
            reactions: IndexMap::new(),
            metabolites: IndexMap::new(),
            id: None,
            compartments: None,
            version: None,
        }
    }

    /// Add a reaction to the model
    ///
    /// # Parameters
    /// - reaction: Reaction to add
    ///
    /// # Examples
    /// ```rust
    /// use modelmap_core::metabolic_model::model::Model;
    /// use modelmap_core::metabolic_model::reaction::{Reaction, ReactionBuilder};
    /// let mut model = Model::new_empty();
    /// let new_reaction = ReactionBuilder::default().id("new_reaction".to_string()).build().unwrap();
    /// model.add_reaction(new_reaction);
    /// ```
    pub fn add_reaction(&mut self, reaction: Reaction) {
        let id = reaction.id.clone();
        self.reactions.insert(id, reaction);
    }

    /// Add a metabolite to the model
    ///
    /// # Parameters
    /// - metabolite: Metabolite to add
    ///
    /// # Examples
    /// ```rust
    /// use modelmap_core::metabolic_model::model::Model;
    /// use modelmap_core::metabolic_model::metabolite::Metabolite;
    /// let mut model = Model::new_empty();
    /// model.add_metabolite(Metabolite::new("glc__D_e", Some("e")));
    /// ```
    pub fn add_metabolite(&mut self, metabolite: Metabolite) {
        let id = metabolite.id.clone();
        self.metabolites.insert(id, metabolite);
    }

    /// Distinct compartments touched by the metabolites of a reaction, in stoichiometry order
    ///
    /// Metabolites without a compartment, or which are not present in this model, don't
    /// contribute a compartment.
    pub fn reaction_compartments<'a>(&'a self, reaction: &'a Reaction) -> IndexSet<&'a str> {
        reaction
            .metabolites
            .keys()
            .filter_map(|met_id| self.metabolites.get(met_id))
            .filter_map(|met| met.compartment.as_deref())
            .collect()
    }
}
