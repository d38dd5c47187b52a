//! Classification of reactions as transport/exchange or compartment local
use crate::metabolic_model::model::Model;
use crate::metabolic_model::reaction::Reaction;

/// Decide whether `reaction` moves metabolites between compartments or across the system
/// boundary
///
/// The compartment span comes from the stoichiometry, so it is checked before the model's
/// own boundary annotation. `model` must be the model owning `reaction`.
pub fn is_transport(model: &Model, reaction: &Reaction) -> bool {
    model.reaction_compartments(reaction).len() > 1 || reaction.boundary
}
