use std::collections::HashMap;

use conll::{parse_feature_pairs, Sentence};
use errors::Result;
use vectorize::{TokenFeatures, Vectorized};
use vocab::{Dicts, RESERVED_ID};

/// Vectorizer that turns token rows into dictionary ids.
///
/// The output column order is fixed at construction time from the
/// dictionaries' feature names, in lexicographic order. Symbols the
/// dictionaries have not seen map to the reserved id 0, for the inputs
/// that is the out-of-vocabulary id, for the outputs it makes "unknown
/// value" and "feature not set" indistinguishable.
pub struct Vectorizer<'a> {
    dicts: &'a Dicts,
    output_features: Vec<String>,
}

impl<'a> Vectorizer<'a> {
    pub fn new(dicts: &'a Dicts) -> Self {
        let output_features = dicts.feature_names();
        Vectorizer {
            dicts,
            output_features,
        }
    }

    /// The feature names backing the output columns, in column order.
    pub fn output_features(&self) -> &[String] {
        &self.output_features
    }

    /// Vectorizes a single token row.
    ///
    /// Fails only on a malformed features column. When a feature name
    /// occurs more than once the last occurrence wins.
    pub fn vectorize<T>(&self, token: &T) -> Result<Vectorized>
    where
        T: TokenFeatures,
    {
        let mut buf = [0u8; 4];
        let chars = token
            .form()
            .chars()
            .map(|ch| self.dicts.chars().id(ch.encode_utf8(&mut buf)))
            .collect();
        let pos = self.dicts.pos().id(token.upos());
        let deprel = self.dicts.deprels().id(token.deprel());

        let mut present: HashMap<&str, &str> = HashMap::new();
        for (name, value) in parse_feature_pairs(token.feats())? {
            present.insert(name, value);
        }

        let mut outputs = Vec::with_capacity(self.output_features.len());
        for name in &self.output_features {
            let id = match present.get(name.as_str()) {
                Some(value) => self
                    .dicts
                    .feats()
                    .get(name)
                    .map_or(RESERVED_ID, |vocab| vocab.id(value)),
                None => RESERVED_ID,
            };
            outputs.push(id);
        }

        Ok(Vectorized {
            chars,
            pos,
            deprel,
            outputs,
        })
    }

    /// Vectorizes every token of a sentence stream into one flat list.
    pub fn vectorize_corpus<I>(&self, sentences: I) -> Result<Vec<Vectorized>>
    where
        I: IntoIterator<Item = Result<Sentence>>,
    {
        let mut items = Vec::new();
        for sentence in sentences {
            let sentence = sentence?;
            for token in sentence.tokens() {
                items.push(self.vectorize(token)?);
            }
        }
        Ok(items)
    }
}

#[cfg(test)]
mod tests {
    use conll::{Reader, TokenBuilder};
    use vectorize::{Vectorized, Vectorizer};
    use vocab::Dicts;

    static SAMPLE: &str = "1\tDogs\tdog\tNOUN\tNNS\tNumber=Plur\t2\tnsubj\t_\t_\n\
         2\tbark\tbark\tVERB\tVBP\tNumber=Plur|Tense=Pres\t0\troot\t_\t_\n";

    fn sample_dicts() -> Dicts {
        Dicts::from_sentences(Reader::new(SAMPLE.as_bytes())).unwrap()
    }

    #[test]
    pub fn test_vectorize() {
        let dicts = sample_dicts();
        let vectorizer = Vectorizer::new(&dicts);
        assert_eq!(vectorizer.output_features(), ["Number", "Tense"]);

        let token = TokenBuilder::new("bark")
            .upos("VERB")
            .feats("Number=Plur|Tense=Pres")
            .deprel("root")
            .token();
        assert_eq!(
            vectorizer.vectorize(&token).unwrap(),
            Vectorized {
                chars: vec![5, 6, 7, 8],
                pos: 2,
                deprel: 2,
                outputs: vec![1, 1],
            }
        );
    }

    #[test]
    pub fn test_unknown_symbols_vectorize_to_zero() {
        let dicts = sample_dicts();
        let vectorizer = Vectorizer::new(&dicts);

        // "Dozes": z and e are out of vocabulary, the rest is known
        let token = TokenBuilder::new("Dozes")
            .upos("AUX")
            .feats("Number=Dual|Case=Nom")
            .deprel("cop")
            .token();
        assert_eq!(
            vectorizer.vectorize(&token).unwrap(),
            Vectorized {
                chars: vec![1, 2, 0, 0, 4],
                pos: 0,
                deprel: 0,
                // Number=Dual is an unknown value, Case is an unknown name
                outputs: vec![0, 0],
            }
        );
    }

    #[test]
    pub fn test_unset_features_vectorize_to_zero() {
        let dicts = sample_dicts();
        let vectorizer = Vectorizer::new(&dicts);

        let token = TokenBuilder::new("bark")
            .upos("NOUN")
            .deprel("root")
            .token();
        assert_eq!(vectorizer.vectorize(&token).unwrap().outputs, [0, 0]);
    }

    #[test]
    pub fn test_outputs_follow_sorted_feature_order() {
        let data = "1\twrote\twrite\tVERB\tVBD\tTense=Past|Number=Sing\t0\troot\t_\t_\n\
             2\tletters\tletter\tNOUN\tNNS\tCase=Gen|Number=Plur\t1\tobj\t_\t_\n";
        let dicts = Dicts::from_sentences(Reader::new(data.as_bytes())).unwrap();
        let vectorizer = Vectorizer::new(&dicts);
        assert_eq!(vectorizer.output_features(), ["Case", "Number", "Tense"]);

        let token = TokenBuilder::new("letters")
            .upos("NOUN")
            .feats("Number=Sing|Case=Gen")
            .deprel("obj")
            .token();
        // column order is the sorted feature order, Tense stays unset
        assert_eq!(vectorizer.vectorize(&token).unwrap().outputs, [1, 1, 0]);
    }

    #[test]
    pub fn test_last_duplicate_feature_wins() {
        let dicts = sample_dicts();
        let vectorizer = Vectorizer::new(&dicts);

        let token = TokenBuilder::new("bark")
            .upos("VERB")
            .feats("Number=Sing|Number=Plur")
            .deprel("root")
            .token();
        assert_eq!(vectorizer.vectorize(&token).unwrap().outputs, [1, 0]);
    }

    #[test]
    pub fn test_malformed_feats_fail() {
        let dicts = sample_dicts();
        let vectorizer = Vectorizer::new(&dicts);

        let token = TokenBuilder::new("bark").feats("Broken").token();
        assert!(vectorizer.vectorize(&token).is_err());
    }

    #[test]
    pub fn test_vectorize_corpus() {
        let dicts = sample_dicts();
        let vectorizer = Vectorizer::new(&dicts);

        let items = vectorizer
            .vectorize_corpus(Reader::new(SAMPLE.as_bytes()))
            .unwrap();
        assert_eq!(items.len(), 2);
        assert_eq!(items[0].chars, [1, 2, 3, 4]);
        assert_eq!(items[1].chars, [5, 6, 7, 8]);
        assert_eq!(items[1].outputs, [1, 1]);
    }
}
