use std::io::BufRead;

use conll::{Sentence, Token, TOKEN_FIELDS};
use errors::{Result, UdmorphError};

/// Options steering sentence segmentation.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ReadOptions {
    /// Stop after this many sentences, `0` reads the whole input.
    pub max_sentences: usize,

    /// Drop multiword token spans (rows whose id column contains `-`).
    pub drop_spans: bool,

    /// Drop empty nodes (rows whose id column contains `.`).
    pub drop_empty_nodes: bool,
}

impl Default for ReadOptions {
    fn default() -> Self {
        ReadOptions {
            max_sentences: 0,
            drop_spans: true,
            drop_empty_nodes: true,
        }
    }
}

/// Sentence reader for treebanks in CoNLL-U format.
///
/// Sentences are delimited by blank lines, lines starting with `#` are
/// collected as comments of the following sentence. A token row must have
/// exactly ten tab-separated fields, anything else is a format error. After
/// an error the reader is fused and further reads return `None`.
pub struct Reader<R> {
    read: R,
    options: ReadOptions,
    line_no: usize,
    sentences: usize,
    done: bool,
}

impl<R> Reader<R>
where
    R: BufRead,
{
    pub fn new(read: R) -> Self {
        Reader::with_options(read, ReadOptions::default())
    }

    pub fn with_options(read: R, options: ReadOptions) -> Self {
        Reader {
            read,
            options,
            line_no: 0,
            sentences: 0,
            done: false,
        }
    }

    /// Reads the next sentence, `None` at the end of the input.
    ///
    /// Rows dropped through [`ReadOptions`] do not count towards sentence
    /// length. Once `max_sentences` is reached the rest of the input is left
    /// unread.
    pub fn read_sentence(&mut self) -> Result<Option<Sentence>> {
        if self.done {
            return Ok(None);
        }

        let mut tokens = Vec::new();
        let mut comments = Vec::new();
        let mut buf = String::new();

        loop {
            buf.clear();
            let n_read = match self.read.read_line(&mut buf) {
                Ok(n_read) => n_read,
                Err(err) => {
                    self.done = true;
                    return Err(err.into());
                }
            };

            if n_read == 0 {
                self.done = true;
                if tokens.is_empty() {
                    return Ok(None);
                }
                return Ok(Some(Sentence::new(tokens, comments)));
            }

            self.line_no += 1;
            let line = buf.trim();

            if line.starts_with('#') {
                comments.push(line.to_string());
            } else if line.is_empty() {
                if !tokens.is_empty() {
                    self.sentences += 1;
                    if self.options.max_sentences > 0
                        && self.sentences >= self.options.max_sentences
                    {
                        self.done = true;
                    }
                    return Ok(Some(Sentence::new(tokens, comments)));
                }
            } else {
                let fields: Vec<&str> = line.split('\t').collect();
                if fields.len() != TOKEN_FIELDS {
                    self.done = true;
                    return Err(UdmorphError::invalid_format(
                        "conllu",
                        format!(
                            "line {}: expected {} tab-separated fields, got {}",
                            self.line_no,
                            TOKEN_FIELDS,
                            fields.len()
                        ),
                    ));
                }

                if self.options.drop_spans && fields[0].contains('-') {
                    continue;
                }
                if self.options.drop_empty_nodes && fields[0].contains('.') {
                    continue;
                }

                tokens.push(Token::from_fields(&fields));
            }
        }
    }
}

impl<R> Iterator for Reader<R>
where
    R: BufRead,
{
    type Item = Result<Sentence>;

    fn next(&mut self) -> Option<Self::Item> {
        match self.read_sentence() {
            Ok(Some(sentence)) => Some(Ok(sentence)),
            Ok(None) => None,
            Err(err) => Some(Err(err)),
        }
    }
}

#[cfg(test)]
mod tests {
    use conll::{ReadOptions, Reader};

    static TWO_SENTENCES: &str = "# sent_id = 1\n\
         # text = Dogs bark\n\
         1\tDogs\tdog\tNOUN\tNNS\tNumber=Plur\t2\tnsubj\t_\t_\n\
         2\tbark\tbark\tVERB\tVBP\tNumber=Plur|Tense=Pres\t0\troot\t_\t_\n\
         \n\
         # sent_id = 2\n\
         1\tWait\twait\tVERB\tVB\tMood=Imp\t0\troot\t_\t_\n";

    #[test]
    pub fn test_read_sentences() {
        let mut reader = Reader::new(TWO_SENTENCES.as_bytes());

        let first = reader.read_sentence().unwrap().unwrap();
        assert_eq!(first.len(), 2);
        assert_eq!(
            first.comments(),
            ["# sent_id = 1", "# text = Dogs bark"]
        );
        assert_eq!(first.tokens()[0].form(), "Dogs");
        assert_eq!(first.tokens()[1].upos(), "VERB");
        assert_eq!(first.tokens()[1].feats(), "Number=Plur|Tense=Pres");

        // the last sentence is flushed without a trailing blank line
        let second = reader.read_sentence().unwrap().unwrap();
        assert_eq!(second.len(), 1);
        assert_eq!(second.tokens()[0].form(), "Wait");

        assert!(reader.read_sentence().unwrap().is_none());
        assert!(reader.read_sentence().unwrap().is_none());
    }

    #[test]
    pub fn test_drop_spans_and_empty_nodes() {
        let data = "1-2\tIt's\t_\t_\t_\t_\t_\t_\t_\t_\n\
             1\tIt\tit\tPRON\tPRP\tCase=Nom\t3\tnsubj\t_\t_\n\
             2\t's\tbe\tAUX\tVBZ\tNumber=Sing\t3\taux\t_\t_\n\
             2.1\training\train\tVERB\tVBG\t_\t_\t_\t_\t_\n";

        let mut reader = Reader::new(data.as_bytes());
        let sentence = reader.read_sentence().unwrap().unwrap();
        let forms: Vec<&str> = sentence.tokens().iter().map(|t| t.form()).collect();
        assert_eq!(forms, ["It", "'s"]);

        let options = ReadOptions {
            drop_spans: false,
            drop_empty_nodes: false,
            ..ReadOptions::default()
        };
        let mut reader = Reader::with_options(data.as_bytes(), options);
        let sentence = reader.read_sentence().unwrap().unwrap();
        let forms: Vec<&str> = sentence.tokens().iter().map(|t| t.form()).collect();
        assert_eq!(forms, ["It's", "It", "'s", "raining"]);
    }

    #[test]
    pub fn test_max_sentences() {
        let options = ReadOptions {
            max_sentences: 1,
            ..ReadOptions::default()
        };
        let mut reader = Reader::with_options(TWO_SENTENCES.as_bytes(), options);

        assert!(reader.read_sentence().unwrap().is_some());
        // the second sentence is still in the input but is never read
        assert!(reader.read_sentence().unwrap().is_none());
    }

    #[test]
    pub fn test_malformed_row() {
        // nine fields: misc is missing
        let data = "1\tDogs\tdog\tNOUN\tNNS\tNumber=Plur\t2\tnsubj\t_\n\
             \n\
             1\tWait\twait\tVERB\tVB\tMood=Imp\t0\troot\t_\t_\n";

        let mut reader = Reader::new(data.as_bytes());
        assert!(reader.read_sentence().is_err());
        // fused after the error, the well-formed rest is not picked up
        assert!(reader.read_sentence().unwrap().is_none());
    }

    #[test]
    pub fn test_fields_must_be_tab_separated() {
        let data = "1 Dogs dog NOUN NNS Number=Plur 2 nsubj _ _\n";
        let mut reader = Reader::new(data.as_bytes());
        assert!(reader.read_sentence().is_err());
    }

    #[test]
    pub fn test_comments_without_tokens() {
        let data = "# newdoc id = empty\n\n";
        let mut reader = Reader::new(data.as_bytes());
        assert!(reader.read_sentence().unwrap().is_none());
    }

    #[test]
    pub fn test_iterator() {
        let reader = Reader::new(TWO_SENTENCES.as_bytes());
        let lengths: Vec<usize> = reader.map(|s| s.unwrap().len()).collect();
        assert_eq!(lengths, [2, 1]);
    }
}
