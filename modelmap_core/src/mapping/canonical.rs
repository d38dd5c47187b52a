//! Extraction of canonical cross-reference tokens from model identifiers
//!
//! A canonical token starts at the first occurrence of the namespace prefix and runs up to
//! (not including) the next separator or the end of the identifier. Translated identifiers
//! carry compartment and disambiguation suffixes after a separator, e.g. `MNXR12345_c` or
//! `MNXM41_e~2`, which this strips.

/// Prefix of MetaNetX cross-reference identifiers (`MNXR...`, `MNXM...`)
pub const DEFAULT_PREFIX: &str = "MNX";

/// Characters which terminate a canonical token
pub const SEPARATORS: [char; 2] = ['~', '_'];

/// Check whether a character terminates a canonical token
pub fn is_separator(c: char) -> bool {
    SEPARATORS.contains(&c)
}

/// Scans identifiers for the canonical token of one namespace
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Canonicalizer {
    prefix: String,
}

impl Default for Canonicalizer {
    fn default() -> Self {
        Canonicalizer::new(DEFAULT_PREFIX)
    }
}

impl Canonicalizer {
    pub fn new(prefix: &str) -> Self {
        Canonicalizer {
            prefix: prefix.to_string(),
        }
    }

    /// Return the canonical token embedded in `identifier`
    ///
    /// Identifiers which don't contain the prefix are returned unchanged. This never fails,
    /// and the empty string maps to itself.
    ///
    /// # Examples
    /// ```rust
    /// use modelmap_core::mapping::canonical::Canonicalizer;
    /// let canonicalizer = Canonicalizer::default();
    /// assert_eq!(canonicalizer.canonicalize("MNXR12345_c"), "MNXR12345");
    /// assert_eq!(canonicalizer.canonicalize("MNXR999~extra"), "MNXR999");
    /// assert_eq!(canonicalizer.canonicalize("rxn001"), "rxn001");
    /// ```
    pub fn canonicalize<'a>(&self, identifier: &'a str) -> &'a str {
        extract_token(&self.prefix, identifier)
    }
}

/// Canonicalize an identifier using the MetaNetX prefix
pub fn canonicalize(identifier: &str) -> &str {
    extract_token(DEFAULT_PREFIX, identifier)
}

fn extract_token<'a>(prefix: &str, identifier: &'a str) -> &'a str {
    let start = match identifier.find(prefix) {
        Some(start) => start,
        None => return identifier,
    };
    let body_start = start + prefix.len();
    let end = identifier[body_start..]
        .char_indices()
        .find(|(_, c)| is_separator(*c))
        .map(|(offset, _)| body_start + offset)
        .unwrap_or(identifier.len());
    &identifier[start..end]
}
