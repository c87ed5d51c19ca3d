mod batch;
pub use self::batch::{assemble, prepare, Batch, INP_CHAR_SEQ, INP_DEPREL, INP_POS};

mod vectorizer;
pub use self::vectorizer::Vectorizer;

use conll::Token;

/// Trait defining the minimal accessors needed to vectorize a token row.
pub trait TokenFeatures {
    fn form(&self) -> &str;
    fn upos(&self) -> &str;
    fn deprel(&self) -> &str;
    fn feats(&self) -> &str;
}

/// TokenFeatures for the crate's own token rows.
impl TokenFeatures for Token {
    fn form(&self) -> &str {
        self.form()
    }

    fn upos(&self) -> &str {
        self.upos()
    }

    fn deprel(&self) -> &str {
        self.deprel()
    }

    fn feats(&self) -> &str {
        self.feats()
    }
}

/// The numeric encoding of one token row.
///
/// `chars`, `pos` and `deprel` are the model inputs, `outputs` holds one
/// feature value id per known feature name in lexicographic name order.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Vectorized {
    pub chars: Vec<u32>,
    pub pos: u32,
    pub deprel: u32,
    pub outputs: Vec<u32>,
}
