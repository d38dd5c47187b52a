//! Mapping of a whole model onto the shared namespace
use tracing::debug;

use crate::mapping::canonical::Canonicalizer;
use crate::mapping::dedup::{final_metabolite_id, final_reaction_id};
use crate::mapping::record::{MetaboliteMapping, ModelMapping, ReactionMapping};
use crate::mapping::transport::is_transport;
use crate::metabolic_model::model::Model;
use crate::translate::{TranslationError, Translator};

/// Builds the reaction and metabolite mapping tables of models
#[derive(Clone, Debug)]
pub struct ModelMapper {
    namespace: String,
    canonicalizer: Canonicalizer,
}

impl ModelMapper {
    /// Create a mapper translating into `namespace`, whose canonical tokens start with
    /// `prefix`
    pub fn new(namespace: &str, prefix: &str) -> Self {
        ModelMapper {
            namespace: namespace.to_string(),
            canonicalizer: Canonicalizer::new(prefix),
        }
    }

    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    /// Translate `model` and map every reaction and metabolite
    ///
    /// Rows follow the model's reaction and metabolite order. Entries of the translated
    /// model are matched to the original ones by position, and a translated model with a
    /// different number of reactions or metabolites is rejected. Transport classification
    /// runs on the translated model, since translation may rename compartments.
    pub fn map_model<T: Translator + ?Sized>(
        &self,
        model_name: &str,
        model: &Model,
        translator: &T,
    ) -> Result<ModelMapping, TranslationError> {
        let translated = translator.translate(model, &self.namespace)?;
        check_correspondence("reactions", model.reactions.len(), translated.reactions.len())?;
        check_correspondence(
            "metabolites",
            model.metabolites.len(),
            translated.metabolites.len(),
        )?;

        let reactions: Vec<ReactionMapping> = model
            .reactions
            .keys()
            .zip(translated.reactions.values())
            .map(|(original_id, rxn)| {
                let transport = is_transport(&translated, rxn);
                ReactionMapping {
                    original_id: original_id.clone(),
                    translated_id: rxn.id.clone(),
                    transport,
                    final_id: final_reaction_id(&self.canonicalizer, &rxn.id, transport),
                }
            })
            .collect();

        let metabolites: Vec<MetaboliteMapping> = model
            .metabolites
            .keys()
            .zip(translated.metabolites.keys())
            .map(|(original_id, translated_id)| MetaboliteMapping {
                original_id: original_id.clone(),
                translated_id: translated_id.clone(),
                final_id: final_metabolite_id(&self.canonicalizer, translated_id),
            })
            .collect();

        debug!(
            model = model_name,
            reactions = reactions.len(),
            metabolites = metabolites.len(),
            "mapped model"
        );
        Ok(ModelMapping {
            reactions,
            metabolites,
        })
    }
}

fn check_correspondence(
    kind: &'static str,
    original: usize,
    translated: usize,
) -> Result<(), TranslationError> {
    if original != translated {
        return Err(TranslationError::CorrespondenceMismatch {
            kind,
            original,
            translated,
        });
    }
    Ok(())
}
