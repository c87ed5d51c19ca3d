use std::fs::read_to_string;
use std::path::Path;

use stdinout::OrExit;
use toml;

use conll::ReadOptions;

/// Run options for corpus reading and batch assembly.
///
/// Every field has a default, so a config file only needs to name the
/// options it changes.
#[derive(Clone, Debug, Deserialize, Eq, PartialEq)]
#[serde(default)]
pub struct Config {
    /// Stop reading after this many sentences, `0` reads everything.
    pub max_sentences: usize,
    pub drop_spans: bool,
    pub drop_empty_nodes: bool,
    /// Fixed width of the character id matrix. Defaults to the longest
    /// sequence of the batch.
    pub sequence_length: Option<usize>,
    pub shuffle: bool,
}

impl Config {
    pub fn read_options(&self) -> ReadOptions {
        ReadOptions {
            max_sentences: self.max_sentences,
            drop_spans: self.drop_spans,
            drop_empty_nodes: self.drop_empty_nodes,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Config {
            max_sentences: 0,
            drop_spans: true,
            drop_empty_nodes: true,
            sequence_length: None,
            shuffle: false,
        }
    }
}

impl<P: AsRef<Path>> From<P> for Config {
    /// Deserializes config from path.
    fn from(path: P) -> Self {
        let data = read_to_string(path).or_exit("Reading the config failed.", 1);
        toml::from_str(&data).or_exit("Parsing the config failed!", 1)
    }
}

#[cfg(test)]
mod tests {
    use super::Config;

    #[test]
    pub fn test_config() {
        let target = Config {
            max_sentences: 2,
            drop_spans: true,
            drop_empty_nodes: false,
            sequence_length: Some(25),
            shuffle: true,
        };
        let config: Config = Config::from("testdata/config.toml");
        assert_eq!(target, config);
    }

    #[test]
    pub fn test_missing_options_fall_back_to_defaults() {
        let config: Config = ::toml::from_str("max_sentences = 7").unwrap();
        assert_eq!(
            config,
            Config {
                max_sentences: 7,
                ..Config::default()
            }
        );

        let options = Config::default().read_options();
        assert_eq!(options.max_sentences, 0);
        assert!(options.drop_spans);
        assert!(options.drop_empty_nodes);
    }
}
