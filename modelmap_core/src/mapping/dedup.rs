//! Final identifiers for reactions, collapsing compartment copies of the same reaction
use std::fmt::{Display, Formatter};

use serde::{Serialize, Serializer};

use crate::mapping::canonical::Canonicalizer;

/// Final id written for every transport/exchange reaction
pub const TRANSPORT_REMOVED: &str = "Transport removed";

/// Final mapping identifier of a reaction
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum FinalId {
    /// Canonical cross-reference token shared by all compartment copies of a reaction
    Canonical(String),
    /// Transport reactions are excluded from deduplication
    TransportRemoved,
}

impl FinalId {
    pub fn as_str(&self) -> &str {
        match self {
            FinalId::Canonical(token) => token,
            FinalId::TransportRemoved => TRANSPORT_REMOVED,
        }
    }

    pub fn is_transport_removed(&self) -> bool {
        matches!(self, FinalId::TransportRemoved)
    }
}

impl Display for FinalId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl Serialize for FinalId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

/// Determine the final id of a reaction from its translated id and transport classification
///
/// Two transport reactions sharing a canonical token can still couple different
/// compartments or run in different directions, so they are tagged rather than merged.
pub fn final_reaction_id(
    canonicalizer: &Canonicalizer,
    translated_id: &str,
    transport: bool,
) -> FinalId {
    if transport {
        FinalId::TransportRemoved
    } else {
        FinalId::Canonical(canonicalizer.canonicalize(translated_id).to_string())
    }
}

/// Determine the final id of a metabolite, there is no transport exception for metabolites
pub fn final_metabolite_id(canonicalizer: &Canonicalizer, translated_id: &str) -> String {
    canonicalizer.canonicalize(translated_id).to_string()
}
