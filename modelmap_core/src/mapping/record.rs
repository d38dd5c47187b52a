//! Rows of the reaction and metabolite mapping tables
use indexmap::IndexSet;
use serde::{Serialize, Serializer};

use crate::mapping::dedup::FinalId;

/// Column headers of the reaction mapping table, in output order
pub const REACTION_COLUMNS: [&str; 4] = ["Original ID", "Raw translated ID", "transport", "Final ID"];
/// Column headers of the metabolite mapping table, in output order
pub const METABOLITE_COLUMNS: [&str; 3] = ["Original ID", "Raw translated ID", "Final ID"];

/// Mapping of one reaction onto the shared namespace
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ReactionMapping {
    pub original_id: String,
    pub translated_id: String,
    /// Written as `1` for transport reactions and `0` otherwise
    #[serde(serialize_with = "serialize_flag")]
    pub transport: bool,
    pub final_id: FinalId,
}

/// Mapping of one metabolite onto the shared namespace
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct MetaboliteMapping {
    pub original_id: String,
    pub translated_id: String,
    pub final_id: String,
}

fn serialize_flag<S: Serializer>(flag: &bool, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_u8(u8::from(*flag))
}

/// Both mapping tables of one model, in the model's reaction/metabolite order
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ModelMapping {
    pub reactions: Vec<ReactionMapping>,
    pub metabolites: Vec<MetaboliteMapping>,
}

/// Counts describing a model mapping
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct MappingSummary {
    pub reactions: usize,
    pub transport_reactions: usize,
    /// Distinct final reaction ids, not counting the transport tag
    pub distinct_reactions: usize,
    pub metabolites: usize,
    pub distinct_metabolites: usize,
}

impl ModelMapping {
    pub fn summary(&self) -> MappingSummary {
        let distinct_reactions: IndexSet<&FinalId> = self
            .reactions
            .iter()
            .map(|r| &r.final_id)
            .filter(|id| !id.is_transport_removed())
            .collect();
        let distinct_metabolites: IndexSet<&str> = self
            .metabolites
            .iter()
            .map(|m| m.final_id.as_str())
            .collect();
        MappingSummary {
            reactions: self.reactions.len(),
            transport_reactions: self.reactions.iter().filter(|r| r.transport).count(),
            distinct_reactions: distinct_reactions.len(),
            metabolites: self.metabolites.len(),
            distinct_metabolites: distinct_metabolites.len(),
        }
    }
}
