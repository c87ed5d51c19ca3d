//! A library turning CoNLL-U dependency treebanks into the numeric tensors
//! of a character-based morphological tagger.
//!
//! Example usage:
//!
//! ```
//! extern crate stdinout;
//! extern crate udmorph_rs;
//!
//! use stdinout::OrExit;
//! use udmorph_rs::{Dicts, Reader, Vectorizer};
//!
//! // first pass: collect the symbol dictionaries over the corpus
//! let input = stdinout::Input::from(Some("testdata/sample.conllu"));
//! let reader = Reader::new(input.buf_read().or_exit("Cannot open input file", 1));
//! let dicts = Dicts::from_sentences(reader).or_exit("Building the dictionaries failed", 1);
//!
//! // second pass: vectorize against the frozen dictionaries and assemble
//! // the named input and output tensors
//! let input = stdinout::Input::from(Some("testdata/sample.conllu"));
//! let reader = Reader::new(input.buf_read().or_exit("Cannot open input file", 1));
//! let vectorizer = Vectorizer::new(&dicts);
//! let items = vectorizer
//!     .vectorize_corpus(reader)
//!     .or_exit("Vectorizing the corpus failed", 1);
//! let batch = udmorph_rs::assemble(items, vectorizer.output_features(), None, false, |feat| {
//!     format!("out_{}", feat.to_lowercase())
//! }).or_exit("Assembling the batch failed", 1);
//!
//! println!("{:?}", batch.inputs["inp_char_seq"].shape());
//! ```

extern crate ndarray;
extern crate rand;
#[macro_use]
extern crate serde;
extern crate serde_json;
extern crate stdinout;
extern crate thiserror;
extern crate toml;

mod conll;
pub use conll::{ReadOptions, Reader, Sentence, Token, TokenBuilder, EMPTY_FIELD};

pub mod errors;

mod util;
pub use util::Config;

mod vectorize;
pub use vectorize::{
    assemble, prepare, Batch, TokenFeatures, Vectorized, Vectorizer, INP_CHAR_SEQ, INP_DEPREL,
    INP_POS,
};

mod vocab;
pub use vocab::{Dicts, Vocab, OOV, RESERVED_ID, UNSET};
