//! Translation using a lookup table of native to translated identifiers
use std::io::Read;
use std::path::Path;

use indexmap::IndexMap;
use serde::Deserialize;

use crate::io::mapping_table::TableFormat;
use crate::metabolic_model::model::Model;
use crate::translate::{rewrite_ids, TranslationError, Translator};

#[derive(Debug, Deserialize)]
struct LookupRow {
    native_id: String,
    translated_id: String,
}

/// Translates ids with a fixed table, for example one exported from a previous
/// translation run
///
/// The table is delimited text with a `native_id,translated_id` header and is shared by
/// reactions and metabolites. Ids missing from the table are kept unchanged.
#[derive(Clone, Debug)]
pub struct LookupTranslator {
    namespace: String,
    table: IndexMap<String, String>,
}

impl LookupTranslator {
    pub fn new(namespace: &str, table: IndexMap<String, String>) -> Self {
        LookupTranslator {
            namespace: namespace.to_string(),
            table,
        }
    }

    /// Read a lookup table from a delimited file
    ///
    /// The delimiter follows the file extension, tab for `.tsv` and comma otherwise.
    pub fn from_path<P: AsRef<Path>>(namespace: &str, path: P) -> Result<Self, TranslationError> {
        let delimiter = table_delimiter(path.as_ref());
        let reader = csv::ReaderBuilder::new()
            .delimiter(delimiter)
            .trim(csv::Trim::All)
            .from_path(path)?;
        LookupTranslator::from_csv(namespace, reader)
    }

    /// Read a lookup table from any reader
    pub fn from_reader<R: Read>(
        namespace: &str,
        reader: R,
        delimiter: u8,
    ) -> Result<Self, TranslationError> {
        let reader = csv::ReaderBuilder::new()
            .delimiter(delimiter)
            .trim(csv::Trim::All)
            .from_reader(reader);
        LookupTranslator::from_csv(namespace, reader)
    }

    fn from_csv<R: Read>(
        namespace: &str,
        mut reader: csv::Reader<R>,
    ) -> Result<Self, TranslationError> {
        let mut table: IndexMap<String, String> = IndexMap::new();
        for row in reader.deserialize() {
            let row: LookupRow = row?;
            if row.translated_id.is_empty() {
                return Err(TranslationError::EmptyLookupEntry(row.native_id));
            }
            match table.get(&row.native_id) {
                Some(existing) if *existing != row.translated_id => {
                    return Err(TranslationError::ConflictingLookupEntry(row.native_id));
                }
                Some(_) => {}
                None => {
                    table.insert(row.native_id, row.translated_id);
                }
            }
        }
        Ok(LookupTranslator::new(namespace, table))
    }

    pub fn entries(&self) -> usize {
        self.table.len()
    }

    fn lookup(&self, id: &str) -> String {
        self.table
            .get(id)
            .cloned()
            .unwrap_or_else(|| id.to_string())
    }
}

/// Delimiter of a lookup table file, picked from its extension
pub fn table_delimiter(path: &Path) -> u8 {
    path.extension()
        .and_then(|ext| ext.to_str())
        .and_then(|ext| ext.parse::<TableFormat>().ok())
        .unwrap_or_default()
        .delimiter()
}

impl Translator for LookupTranslator {
    fn translate(&self, model: &Model, namespace: &str) -> Result<Model, TranslationError> {
        if !namespace.eq_ignore_ascii_case(&self.namespace) {
            return Err(TranslationError::UnsupportedNamespace(namespace.to_string()));
        }
        rewrite_ids(
            model,
            |rxn| self.lookup(&rxn.id),
            |met| self.lookup(&met.id),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::metabolic_model::metabolite::Metabolite;
    use crate::mapping::mapper::ModelMapper;
    use crate::metabolic_model::reaction::Reaction;
    use std::fs;
    use tempfile::TempDir;

    const TABLE: &str = "native_id,translated_id
PGI, MNXR102535_c
g6p_c,MNXM160_c
f6p_c,MNXM162_c
g6p_c,MNXM160_c
";

    #[test]
    fn read_table() {
        let translator = LookupTranslator::from_reader("metanetx", TABLE.as_bytes(), b',').unwrap();
        assert_eq!(translator.entries(), 3);
        assert_eq!(translator.lookup("PGI"), "MNXR102535_c");
        assert_eq!(translator.lookup("missing"), "missing");
    }

    #[test]
    fn conflicting_entries() {
        let table = "native_id\ttranslated_id\nPGI\tMNXR1\nPGI\tMNXR2\n";
        match LookupTranslator::from_reader("metanetx", table.as_bytes(), b'\t') {
            Err(TranslationError::ConflictingLookupEntry(id)) => assert_eq!(id, "PGI"),
            other => panic!("Expected conflicting entry, got {:?}", other.map(|t| t.entries())),
        }
    }

    #[test]
    fn malformed_table() {
        let table = "native_id,translated_id\nPGI\n";
        assert!(matches!(
            LookupTranslator::from_reader("metanetx", table.as_bytes(), b','),
            Err(TranslationError::UnableToReadTable(_))
        ));
    }

    #[test]
    fn translate_model() {
        let translator = LookupTranslator::from_reader("metanetx", TABLE.as_bytes(), b',').unwrap();
        let mut model = Model::new_empty();
        model.add_metabolite(Metabolite::new("g6p_c", Some("c")));
        model.add_metabolite(Metabolite::new("f6p_c", Some("c")));
        model.add_metabolite(Metabolite::new("h2o_c", Some("c")));
        model.add_reaction(Reaction::new("PGI", &[("g6p_c", -1.0), ("f6p_c", 1.0)], false));

        let translated = translator.translate(&model, "metanetx").unwrap();
        let met_ids: Vec<&String> = translated.metabolites.keys().collect();
        assert_eq!(met_ids, vec!["MNXM160_c", "MNXM162_c", "h2o_c"]);
        let pgi = &translated.reactions["MNXR102535_c"];
        assert_eq!(pgi.metabolites.get("MNXM160_c"), Some(&-1.0));

        assert!(matches!(
            translator.translate(&model, "bigg"),
            Err(TranslationError::UnsupportedNamespace(_))
        ));
    }

    #[test]
    fn empty_translations_are_rejected() {
        for table in [
            "native_id,translated_id\nPGI,\n",
            "native_id,translated_id\ng6p_c, \n",
        ] {
            assert!(matches!(
                LookupTranslator::from_reader("metanetx", table.as_bytes(), b','),
                Err(TranslationError::EmptyLookupEntry(_))
            ));
        }
    }

    #[test]
    fn empty_translations_never_reach_final_ids() {
        // A translator built around an empty entry is still refused at translation time
        let mut table = IndexMap::new();
        table.insert("PGI".to_string(), String::new());
        let translator = LookupTranslator::new("metanetx", table);
        let mut model = Model::new_empty();
        model.add_metabolite(Metabolite::new("g6p_c", Some("c")));
        model.add_reaction(Reaction::new("PGI", &[("g6p_c", -1.0)], false));

        let mapper = ModelMapper::new("metanetx", "MNX");
        assert!(matches!(
            mapper.map_model("toy", &model, &translator),
            Err(TranslationError::EmptyTranslatedId { kind: "reaction", .. })
        ));
    }

    #[test]
    fn delimiter_from_extension() {
        assert_eq!(table_delimiter(Path::new("lookup.tsv")), b'\t');
        assert_eq!(table_delimiter(Path::new("lookup.TSV")), b'\t');
        assert_eq!(table_delimiter(Path::new("lookup.csv")), b',');
        assert_eq!(table_delimiter(Path::new("lookup")), b',');

        let temp_dir = TempDir::new().unwrap();
        let csv_path = temp_dir.path().join("lookup.csv");
        fs::write(&csv_path, TABLE).unwrap();
        assert_eq!(LookupTranslator::from_path("metanetx", &csv_path).unwrap().entries(), 3);
        let tsv_path = temp_dir.path().join("lookup.tsv");
        fs::write(&tsv_path, TABLE.replace(',', "\t")).unwrap();
        assert_eq!(LookupTranslator::from_path("metanetx", &tsv_path).unwrap().entries(), 3);
    }
}
