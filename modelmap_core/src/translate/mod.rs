//! Translation of model identifiers into a shared namespace
//!
//! A [`Translator`] takes a model and returns a new model whose reaction and metabolite
//! ids are rewritten into the target namespace. Translators never modify their input, and
//! keep reactions and metabolites in the same order as the input model so translated
//! entries can be matched to the original ones by position.
use indexmap::IndexMap;
use thiserror::Error;

use crate::metabolic_model::metabolite::Metabolite;
use crate::metabolic_model::model::Model;
use crate::metabolic_model::reaction::Reaction;

pub mod annotation;
pub mod lookup;

/// Maps a model onto a shared identifier namespace
pub trait Translator {
    fn translate(&self, model: &Model, namespace: &str) -> Result<Model, TranslationError>;
}

#[derive(Error, Debug)]
pub enum TranslationError {
    #[error("Namespace {0} is not supported by this translator")]
    UnsupportedNamespace(String),
    #[error("Translated model has {translated} {kind} but the original model has {original}")]
    CorrespondenceMismatch {
        kind: &'static str,
        original: usize,
        translated: usize,
    },
    #[error("Unable to read lookup table due to {0}")]
    UnableToReadTable(#[from] csv::Error),
    #[error("Lookup table maps {0} to more than one identifier")]
    ConflictingLookupEntry(String),
    #[error("Lookup table maps {0} to an empty identifier")]
    EmptyLookupEntry(String),
    #[error("Translation of {kind} {id} produced an empty identifier")]
    EmptyTranslatedId { kind: &'static str, id: String },
}

/// Build a copy of `model` with every reaction and metabolite id rewritten
///
/// Ids produced twice get a `~2`, `~3`, ... suffix so that no entry is lost and the
/// positional correspondence with `model` holds. Stoichiometry keys follow the renamed
/// metabolites. An empty translated id fails the whole translation.
pub(crate) fn rewrite_ids<R, M>(
    model: &Model,
    mut reaction_id: R,
    mut metabolite_id: M,
) -> Result<Model, TranslationError>
where
    R: FnMut(&Reaction) -> String,
    M: FnMut(&Metabolite) -> String,
{
    let mut renamed: IndexMap<&str, String> = IndexMap::new();
    let mut metabolites: IndexMap<String, Metabolite> = IndexMap::new();
    for met in model.metabolites.values() {
        let translated = non_empty("metabolite", &met.id, metabolite_id(met))?;
        let id = disambiguate(&metabolites, translated);
        renamed.insert(met.id.as_str(), id.clone());
        metabolites.insert(
            id.clone(),
            Metabolite {
                id,
                ..met.clone()
            },
        );
    }

    let mut reactions: IndexMap<String, Reaction> = IndexMap::new();
    for rxn in model.reactions.values() {
        let translated = non_empty("reaction", &rxn.id, reaction_id(rxn))?;
        let id = disambiguate(&reactions, translated);
        let stoichiometry = rxn
            .metabolites
            .iter()
            .map(|(met, coef)| {
                let key = renamed.get(met.as_str()).cloned().unwrap_or_else(|| met.clone());
                (key, *coef)
            })
            .collect();
        reactions.insert(
            id.clone(),
            Reaction {
                id,
                metabolites: stoichiometry,
                ..rxn.clone()
            },
        );
    }

    Ok(Model {
        reactions,
        metabolites,
        id: model.id.clone(),
        compartments: model.compartments.clone(),
        version: model.version.clone(),
    })
}

fn non_empty(
    kind: &'static str,
    original: &str,
    translated: String,
) -> Result<String, TranslationError> {
    if translated.is_empty() {
        return Err(TranslationError::EmptyTranslatedId {
            kind,
            id: original.to_string(),
        });
    }
    Ok(translated)
}

fn disambiguate<V>(taken: &IndexMap<String, V>, candidate: String) -> String {
    if !taken.contains_key(&candidate) {
        return candidate;
    }
    let mut n = 2;
    loop {
        let id = format!("{}~{}", candidate, n);
        if !taken.contains_key(&id) {
            return id;
        }
        n += 1;
    }
}
