use std::collections::BTreeMap;
use std::fs::File;
use std::io::{BufReader, BufWriter, Read, Write};
use std::path::Path;

use serde_json;

use conll::Sentence;
use errors::Result;
use vocab::{Vocab, OOV, UNSET};

/// The symbol dictionaries of a treebank.
///
/// One corpus pass collects four mappings: form characters, universal POS
/// tags and dependency relations, each seeded with [`OOV`] at id 0, plus
/// one value vocabulary per morphological feature name, each seeded with
/// [`UNSET`] at id 0. Vectorization requires the exact
/// dictionaries the corpus was built with, so they can be persisted to JSON
/// and loaded back.
#[derive(Clone, Debug, PartialEq)]
pub struct Dicts {
    chars: Vocab,
    pos: Vocab,
    deprels: Vocab,
    feats: BTreeMap<String, Vocab>,
}

impl Dicts {
    /// Collects the dictionaries from a sentence stream.
    ///
    /// Ids reflect first occurrence in corpus order. A feature value seen
    /// under two names is interned separately per name.
    pub fn from_sentences<I>(sentences: I) -> Result<Self>
    where
        I: IntoIterator<Item = Result<Sentence>>,
    {
        let mut chars = Vocab::with_reserved(OOV);
        let mut pos = Vocab::with_reserved(OOV);
        let mut deprels = Vocab::with_reserved(OOV);
        let mut feats: BTreeMap<String, Vocab> = BTreeMap::new();

        let mut buf = [0u8; 4];
        for sentence in sentences {
            let sentence = sentence?;
            for token in sentence.tokens() {
                for ch in token.form().chars() {
                    chars.intern(ch.encode_utf8(&mut buf));
                }
                pos.intern(token.upos());
                deprels.intern(token.deprel());

                for (name, value) in token.feature_pairs()? {
                    feats
                        .entry(name.to_string())
                        .or_insert_with(|| Vocab::with_reserved(UNSET))
                        .intern(value);
                }
            }
        }

        Ok(Dicts {
            chars,
            pos,
            deprels,
            feats,
        })
    }

    /// The character vocabulary over token forms.
    pub fn chars(&self) -> &Vocab {
        &self.chars
    }

    /// The universal POS tag vocabulary.
    pub fn pos(&self) -> &Vocab {
        &self.pos
    }

    /// The dependency relation vocabulary.
    pub fn deprels(&self) -> &Vocab {
        &self.deprels
    }

    /// The per-feature value vocabularies.
    pub fn feats(&self) -> &BTreeMap<String, Vocab> {
        &self.feats
    }

    /// Feature names in lexicographic order.
    ///
    /// This is the authoritative column order of the output vectors.
    pub fn feature_names(&self) -> Vec<String> {
        self.feats.keys().cloned().collect()
    }

    /// Serializes the dictionaries as a JSON array of four objects.
    pub fn to_writer<W>(&self, wtr: W) -> Result<()>
    where
        W: Write,
    {
        serde_json::to_writer_pretty(wtr, &(&self.chars, &self.pos, &self.deprels, &self.feats))?;
        Ok(())
    }

    pub fn from_reader<R>(rdr: R) -> Result<Self>
    where
        R: Read,
    {
        let (chars, pos, deprels, feats): (Vocab, Vocab, Vocab, BTreeMap<String, Vocab>) =
            serde_json::from_reader(rdr)?;
        Ok(Dicts {
            chars,
            pos,
            deprels,
            feats,
        })
    }

    pub fn save<P>(&self, path: P) -> Result<()>
    where
        P: AsRef<Path>,
    {
        let mut wtr = BufWriter::new(File::create(path)?);
        self.to_writer(&mut wtr)?;
        wtr.flush()?;
        Ok(())
    }

    pub fn load<P>(path: P) -> Result<Self>
    where
        P: AsRef<Path>,
    {
        Dicts::from_reader(BufReader::new(File::open(path)?))
    }
}
