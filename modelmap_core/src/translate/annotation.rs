//! Translation using the cross references stored in model annotations
use serde_json::Value;

use crate::metabolic_model::metabolite::Metabolite;
use crate::metabolic_model::model::Model;
use crate::metabolic_model::reaction::Reaction;
use crate::translate::{rewrite_ids, TranslationError, Translator};

/// Name of the MetaNetX namespace
pub const METANETX: &str = "metanetx";

const REACTION_KEY: &str = "metanetx.reaction";
const METABOLITE_KEY: &str = "metanetx.chemical";

/// Translates ids into MetaNetX using the `metanetx.reaction` and `metanetx.chemical`
/// annotations of each entry
///
/// Metabolite ids get the metabolite's compartment as a `_<compartment>` suffix. Entries
/// without a cross reference keep their id.
#[derive(Clone, Debug, Default)]
pub struct AnnotationTranslator;

impl AnnotationTranslator {
    fn reaction_id(reaction: &Reaction) -> String {
        match first_cross_reference(reaction.annotation.as_ref(), REACTION_KEY) {
            Some(xref) => xref.to_string(),
            None => reaction.id.clone(),
        }
    }

    fn metabolite_id(metabolite: &Metabolite) -> String {
        match (
            first_cross_reference(metabolite.annotation.as_ref(), METABOLITE_KEY),
            &metabolite.compartment,
        ) {
            (Some(xref), Some(compartment)) => format!("{}_{}", xref, compartment),
            (Some(xref), None) => xref.to_string(),
            (None, _) => metabolite.id.clone(),
        }
    }
}

impl Translator for AnnotationTranslator {
    fn translate(&self, model: &Model, namespace: &str) -> Result<Model, TranslationError> {
        if !namespace.eq_ignore_ascii_case(METANETX) {
            return Err(TranslationError::UnsupportedNamespace(namespace.to_string()));
        }
        rewrite_ids(
            model,
            AnnotationTranslator::reaction_id,
            AnnotationTranslator::metabolite_id,
        )
    }
}

/// First cross reference stored under `key`, annotations hold either a string or a list
fn first_cross_reference<'a>(annotation: Option<&'a Value>, key: &str) -> Option<&'a str> {
    let xref = match annotation?.get(key)? {
        Value::String(xref) => Some(xref.as_str()),
        Value::Array(xrefs) => xrefs
            .iter()
            .filter_map(Value::as_str)
            .find(|xref| !xref.is_empty()),
        _ => None,
    };
    xref.filter(|xref| !xref.is_empty())
}
