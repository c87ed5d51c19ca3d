mod dicts;
pub use self::dicts::Dicts;

use std::collections::HashMap;

/// Reserved key for characters, tags and relations unseen at build time.
pub const OOV: &str = "<OOV>";

/// Reserved key for "feature not set on this token".
pub const UNSET: &str = "<UNSET>";

/// Id of the reserved key in every vocabulary, also used as padding value.
pub const RESERVED_ID: u32 = 0;

/// A dense string-to-id mapping.
///
/// Ids are assigned in first-seen order starting right after the reserved
/// key, so a vocabulary of `n` symbols covers exactly `0..n`. Lookups of
/// unknown symbols fall back to the reserved id.
#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Vocab {
    index: HashMap<String, u32>,
}

impl Vocab {
    /// Creates a vocabulary holding only `reserved` at id 0.
    pub fn with_reserved(reserved: &str) -> Self {
        let mut index = HashMap::new();
        index.insert(reserved.to_string(), RESERVED_ID);
        Vocab { index }
    }

    /// Returns the id of `symbol`, assigning the next free id on first sight.
    pub(crate) fn intern(&mut self, symbol: &str) -> u32 {
        if let Some(&id) = self.index.get(symbol) {
            return id;
        }

        let id = self.index.len() as u32;
        self.index.insert(symbol.to_string(), id);
        id
    }

    pub fn get(&self, symbol: &str) -> Option<u32> {
        self.index.get(symbol).copied()
    }

    /// Id lookup with the closed-world fallback to the reserved id.
    pub fn id(&self, symbol: &str) -> u32 {
        self.get(symbol).unwrap_or(RESERVED_ID)
    }

    pub fn contains(&self, symbol: &str) -> bool {
        self.index.contains_key(symbol)
    }

    /// Number of symbols, including the reserved key.
    pub fn len(&self) -> usize {
        self.index.len()
    }

    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use vocab::{Vocab, OOV, RESERVED_ID};

    #[test]
    pub fn test_intern_first_seen_order() {
        let mut vocab = Vocab::with_reserved(OOV);
        assert_eq!(vocab.intern("NOUN"), 1);
        assert_eq!(vocab.intern("VERB"), 2);
        // re-interning does not assign a new id
        assert_eq!(vocab.intern("NOUN"), 1);
        assert_eq!(vocab.intern("ADJ"), 3);
        assert_eq!(vocab.len(), 4);
    }

    #[test]
    pub fn test_unknown_symbols_map_to_reserved_id() {
        let mut vocab = Vocab::with_reserved(OOV);
        vocab.intern("NOUN");

        assert_eq!(vocab.get("NOUN"), Some(1));
        assert_eq!(vocab.get("X"), None);
        assert_eq!(vocab.id("X"), RESERVED_ID);
        assert_eq!(vocab.id(OOV), RESERVED_ID);
        assert!(vocab.contains("NOUN"));
        assert!(!vocab.contains("X"));
    }
}
