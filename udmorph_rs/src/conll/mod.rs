mod reader;
pub use self::reader::{ReadOptions, Reader};

use errors::{Result, UdmorphError};

/// Placeholder for columns without a value.
pub const EMPTY_FIELD: &str = "_";

pub(crate) const TOKEN_FIELDS: usize = 10;

/// A single token row with the ten CoNLL-U columns.
///
/// All columns are kept verbatim, including the `_` placeholder. The
/// morphological features column is stored as its raw string and split on
/// demand through [`Token::feature_pairs`].
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Token {
    id: String,
    form: String,
    lemma: String,
    upos: String,
    xpos: String,
    feats: String,
    head: String,
    deprel: String,
    deps: String,
    misc: String,
}

impl Token {
    pub(crate) fn from_fields(fields: &[&str]) -> Self {
        debug_assert_eq!(fields.len(), TOKEN_FIELDS);
        Token {
            id: fields[0].to_string(),
            form: fields[1].to_string(),
            lemma: fields[2].to_string(),
            upos: fields[3].to_string(),
            xpos: fields[4].to_string(),
            feats: fields[5].to_string(),
            head: fields[6].to_string(),
            deprel: fields[7].to_string(),
            deps: fields[8].to_string(),
            misc: fields[9].to_string(),
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn form(&self) -> &str {
        &self.form
    }

    pub fn lemma(&self) -> &str {
        &self.lemma
    }

    /// The universal part-of-speech tag.
    pub fn upos(&self) -> &str {
        &self.upos
    }

    /// The language-specific part-of-speech tag.
    pub fn xpos(&self) -> &str {
        &self.xpos
    }

    /// The raw morphological features column.
    pub fn feats(&self) -> &str {
        &self.feats
    }

    pub fn head(&self) -> &str {
        &self.head
    }

    /// The dependency relation to the head.
    pub fn deprel(&self) -> &str {
        &self.deprel
    }

    pub fn deps(&self) -> &str {
        &self.deps
    }

    pub fn misc(&self) -> &str {
        &self.misc
    }

    /// Splits the features column into name/value pairs.
    ///
    /// `_` yields no pairs. Values may themselves contain `=`, entries are
    /// only split on the first one. Duplicate names are returned in column
    /// order, it is up to the caller to decide which occurrence wins.
    pub fn feature_pairs(&self) -> Result<Vec<(&str, &str)>> {
        parse_feature_pairs(&self.feats)
    }
}

/// Builder for token rows.
///
/// Columns that are not set explicitly hold the `_` placeholder, the id
/// column defaults to `1`.
pub struct TokenBuilder {
    token: Token,
}

impl TokenBuilder {
    pub fn new<S>(form: S) -> Self
    where
        S: Into<String>,
    {
        TokenBuilder {
            token: Token {
                id: "1".to_string(),
                form: form.into(),
                lemma: EMPTY_FIELD.to_string(),
                upos: EMPTY_FIELD.to_string(),
                xpos: EMPTY_FIELD.to_string(),
                feats: EMPTY_FIELD.to_string(),
                head: EMPTY_FIELD.to_string(),
                deprel: EMPTY_FIELD.to_string(),
                deps: EMPTY_FIELD.to_string(),
                misc: EMPTY_FIELD.to_string(),
            },
        }
    }

    pub fn id<S>(mut self, id: S) -> Self
    where
        S: Into<String>,
    {
        self.token.id = id.into();
        self
    }

    pub fn lemma<S>(mut self, lemma: S) -> Self
    where
        S: Into<String>,
    {
        self.token.lemma = lemma.into();
        self
    }

    pub fn upos<S>(mut self, upos: S) -> Self
    where
        S: Into<String>,
    {
        self.token.upos = upos.into();
        self
    }

    pub fn xpos<S>(mut self, xpos: S) -> Self
    where
        S: Into<String>,
    {
        self.token.xpos = xpos.into();
        self
    }

    pub fn feats<S>(mut self, feats: S) -> Self
    where
        S: Into<String>,
    {
        self.token.feats = feats.into();
        self
    }

    pub fn head<S>(mut self, head: S) -> Self
    where
        S: Into<String>,
    {
        self.token.head = head.into();
        self
    }

    pub fn deprel<S>(mut self, deprel: S) -> Self
    where
        S: Into<String>,
    {
        self.token.deprel = deprel.into();
        self
    }

    pub fn deps<S>(mut self, deps: S) -> Self
    where
        S: Into<String>,
    {
        self.token.deps = deps.into();
        self
    }

    pub fn misc<S>(mut self, misc: S) -> Self
    where
        S: Into<String>,
    {
        self.token.misc = misc.into();
        self
    }

    pub fn token(self) -> Token {
        self.token
    }
}

/// A sentence: its token rows plus the comment lines preceding them.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Sentence {
    tokens: Vec<Token>,
    comments: Vec<String>,
}

impl Sentence {
    pub fn new(tokens: Vec<Token>, comments: Vec<String>) -> Self {
        Sentence { tokens, comments }
    }

    pub fn tokens(&self) -> &[Token] {
        &self.tokens
    }

    pub fn comments(&self) -> &[String] {
        &self.comments
    }

    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }
}

pub(crate) fn parse_feature_pairs(feats: &str) -> Result<Vec<(&str, &str)>> {
    if feats == EMPTY_FIELD {
        return Ok(Vec::new());
    }

    let mut pairs = Vec::new();
    for entry in feats.split('|') {
        match entry.split_once('=') {
            Some(pair) => pairs.push(pair),
            None => {
                return Err(UdmorphError::invalid_format(
                    "feats",
                    format!("expected name=value, got '{}' in '{}'", entry, feats),
                ))
            }
        }
    }

    Ok(pairs)
}

#[cfg(test)]
mod tests {
    use conll::{parse_feature_pairs, TokenBuilder};

    #[test]
    pub fn test_feature_pairs() {
        assert_eq!(parse_feature_pairs("_").unwrap(), vec![]);
        assert_eq!(
            parse_feature_pairs("Case=Nom|Number=Sing").unwrap(),
            vec![("Case", "Nom"), ("Number", "Sing")]
        );
        // split on the first '=' only
        assert_eq!(
            parse_feature_pairs("Translit=o=law").unwrap(),
            vec![("Translit", "o=law")]
        );
        // duplicates are preserved in column order
        assert_eq!(
            parse_feature_pairs("Person=3|Person=2").unwrap(),
            vec![("Person", "3"), ("Person", "2")]
        );
        // empty values are values
        assert_eq!(parse_feature_pairs("Case=").unwrap(), vec![("Case", "")]);
    }

    #[test]
    pub fn test_feature_pairs_malformed() {
        assert!(parse_feature_pairs("").is_err());
        assert!(parse_feature_pairs("Case").is_err());
        assert!(parse_feature_pairs("Case=Nom|Broken").is_err());
    }

    #[test]
    pub fn test_token_builder() {
        let token = TokenBuilder::new("große")
            .id("3")
            .upos("ADJ")
            .feats("Case=Acc|Degree=Pos")
            .deprel("amod")
            .token();
        assert_eq!(token.id(), "3");
        assert_eq!(token.form(), "große");
        assert_eq!(token.lemma(), "_");
        assert_eq!(token.upos(), "ADJ");
        assert_eq!(token.feats(), "Case=Acc|Degree=Pos");
        assert_eq!(token.deprel(), "amod");
        assert_eq!(
            token.feature_pairs().unwrap(),
            vec![("Case", "Acc"), ("Degree", "Pos")]
        );
    }
}
