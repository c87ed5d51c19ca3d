//! Treebank preparation for character-based morphological tagging.
extern crate clap;
extern crate env_logger;
extern crate indicatif;
#[macro_use]
extern crate log;
extern crate serde_json;
extern crate stdinout;

use stdinout::OrExit;

use clap::{App, AppSettings, Arg, ArgMatches, SubCommand};

static DEFAULT_CLAP_SETTINGS: &[AppSettings] = &[
    AppSettings::DontCollapseArgsInUsage,
    AppSettings::UnifiedHelpMessage,
    AppSettings::SubcommandRequiredElseHelp,
];

extern crate udmorph_rs;
use udmorph_rs::{assemble, Config, Dicts, Reader, Vectorized, Vectorizer};

fn main() {
    env_logger::init();

    let parsed = args();
    match parsed.subcommand() {
        ("build-dicts", Some(matches)) => build_dicts(matches),
        ("vectorize", Some(matches)) => vectorize(matches),
        _ => unreachable!(),
    }
}

fn build_dicts(matches: &ArgMatches) {
    let config = load_config(matches);

    let input = stdinout::Input::from(matches.value_of("INPUT"));
    let reader = Reader::with_options(
        input.buf_read().or_exit("Cannot open input file", 1),
        config.read_options(),
    );

    let dicts = Dicts::from_sentences(reader).or_exit("Building the dictionaries failed!", 1);
    info!(
        "{} characters, {} pos tags, {} deprels, {} morphological features",
        dicts.chars().len(),
        dicts.pos().len(),
        dicts.deprels().len(),
        dicts.feats().len()
    );
    if dicts.feats().is_empty() {
        warn!("no morphological features found, vectorized batches will have no output slots");
    }

    let output = stdinout::Output::from(matches.value_of("OUTPUT"));
    dicts
        .to_writer(output.write().or_exit("Couldn't find output", 1))
        .or_exit("Writing the dictionaries failed!", 1);
}

fn vectorize(matches: &ArgMatches) {
    let config = load_config(matches);

    let dicts = Dicts::load(matches.value_of("DICTS").unwrap())
        .or_exit("Loading the dictionaries failed!", 1);
    let vectorizer = Vectorizer::new(&dicts);
    info!("{} output features", vectorizer.output_features().len());

    let input = stdinout::Input::from(matches.value_of("INPUT"));
    let mut reader = Reader::with_options(
        input.buf_read().or_exit("Cannot open input file", 1),
        config.read_options(),
    );
    let output = stdinout::Output::from(matches.value_of("OUTPUT"));

    let verbose = match output {
        stdinout::Output::File(_) => matches.is_present("VERBOSE"),
        _ => false,
    };

    let pb = indicatif::ProgressBar::new(0);
    pb.set_style(
        indicatif::ProgressStyle::default_spinner().template("Time: {elapsed_precise} ::: {msg}"),
    );

    if verbose {
        pb.enable_steady_tick(200);
    }

    let time = std::time::Instant::now();
    let mut items: Vec<Vectorized> = Vec::new();
    let mut sentences = 0;
    while let Some(sentence) = reader
        .read_sentence()
        .or_exit("Failed reading sentence!", 1)
    {
        for token in sentence.tokens() {
            items.push(
                vectorizer
                    .vectorize(token)
                    .or_exit("Failed vectorizing token!", 1),
            );
        }
        sentences += 1;

        if verbose && !items.is_empty() {
            pb.set_message(&format!(
                "Sentences: {:?} ::: tokens: {:?} ::: avg. time/token: {:?}",
                sentences,
                items.len(),
                time.elapsed() / items.len() as u32,
            ));
        }
    }
    pb.finish_and_clear();
    info!("vectorized {} tokens from {} sentences", items.len(), sentences);

    let batch = assemble(
        items,
        vectorizer.output_features(),
        config.sequence_length,
        config.shuffle,
        out_slot_name,
    ).or_exit("Assembling the batch failed!", 1);

    serde_json::to_writer(output.write().or_exit("Couldn't find output", 1), &batch)
        .or_exit("Writing the batch failed!", 1);
}

/// Output slot name for a morphological feature.
///
/// ASCII alphanumerics are lowercased, anything else becomes an underscore,
/// so the name is safe as the name of a model layer.
fn out_slot_name(feature: &str) -> String {
    let mut name = String::with_capacity(feature.len() + 4);
    name.push_str("out_");
    for ch in feature.chars() {
        if ch.is_ascii_alphanumeric() {
            name.push(ch.to_ascii_lowercase());
        } else {
            name.push('_');
        }
    }
    name
}

fn load_config(matches: &ArgMatches) -> Config {
    let mut config = match matches.value_of("CONFIG") {
        Some(path) => Config::from(path),
        None => Config::default(),
    };

    if let Some(value) = matches.value_of("MAX_SENTENCES") {
        config.max_sentences = parse_usize(value, "MAX_SENTENCES");
    }
    if matches.is_present("KEEP_SPANS") {
        config.drop_spans = false;
    }
    if matches.is_present("KEEP_EMPTY_NODES") {
        config.drop_empty_nodes = false;
    }
    if let Some(value) = matches.value_of("SEQUENCE_LENGTH") {
        config.sequence_length = Some(parse_usize(value, "SEQUENCE_LENGTH"));
    }
    if matches.is_present("SHUFFLE") {
        config.shuffle = true;
    }

    config
}

fn parse_usize(value: &str, name: &str) -> usize {
    value
        .parse::<usize>()
        .or_exit(format!("{} not a positive integer!", name), 1)
}

fn reader_args<'a, 'b>(app: App<'a, 'b>) -> App<'a, 'b> {
    app.arg(
        Arg::with_name("CONFIG")
            .help("Run options in toml format.")
            .long_help(
                "Run options in toml format. Options given on the command line take\
                 precedence over the config file.",
            ).long("config")
            .takes_value(true)
            .required(false),
    ).arg(
        Arg::with_name("MAX_SENTENCES")
            .help("Read at most N sentences. 0 reads the whole corpus.")
            .long("max-sentences")
            .takes_value(true)
            .required(false),
    ).arg(
        Arg::with_name("KEEP_SPANS")
            .help("Keep multiword token spans (ids containing '-').")
            .long("keep-spans")
            .required(false),
    ).arg(
        Arg::with_name("KEEP_EMPTY_NODES")
            .help("Keep empty nodes (ids containing '.').")
            .long("keep-empty-nodes")
            .required(false),
    )
}

fn args() -> ArgMatches<'static> {
    App::new("udmorph")
        .settings(DEFAULT_CLAP_SETTINGS)
        .subcommand(reader_args(
            SubCommand::with_name("build-dicts")
                .about("Build the symbol dictionaries of a treebank")
                .arg(
                    Arg::with_name("INPUT")
                        .help("Input file in conll-u format. If not provided input reads from stdin.")
                        .index(1)
                        .takes_value(true)
                        .required(false),
                ).arg(
                    Arg::with_name("OUTPUT")
                        .help("Output file for the dictionaries. If not provided output writes to stdout.")
                        .long("output")
                        .short("o")
                        .takes_value(true)
                        .required(false),
                ),
        )).subcommand(reader_args(
            SubCommand::with_name("vectorize")
                .about("Vectorize a treebank against previously built dictionaries")
                .arg(
                    Arg::with_name("DICTS")
                        .help("Dictionary file produced by build-dicts.")
                        .long_help(
                            "Dictionary file produced by build-dicts. Vectorization must use\
                             the dictionaries of the corpus the model is trained on, unknown\
                             symbols map to id 0.",
                        ).index(1)
                        .required(true),
                ).arg(
                    Arg::with_name("INPUT")
                        .help("Input file in conll-u format. If not provided input reads from stdin.")
                        .index(2)
                        .takes_value(true)
                        .required(false),
                ).arg(
                    Arg::with_name("OUTPUT")
                        .help("Output file for the batch. If not provided output writes to stdout.")
                        .long("output")
                        .short("o")
                        .takes_value(true)
                        .required(false),
                ).arg(
                    Arg::with_name("SEQUENCE_LENGTH")
                        .help("Pad character sequences to this width.")
                        .long_help(
                            "Pad character sequences to this width instead of the longest\
                             sequence of the batch. Fails if any sequence is longer, rows are\
                             never truncated.",
                        ).long("sequence-length")
                        .short("l")
                        .takes_value(true)
                        .required(false),
                ).arg(
                    Arg::with_name("SHUFFLE")
                        .help("Shuffle the tokens before assembling the batch.")
                        .long("shuffle")
                        .required(false),
                ).arg(
                    Arg::with_name("VERBOSE")
                        .help("Prints run metrics. Only available if '-o' is specified.")
                        .long_help(
                            "Prints throughput measures and elapsed time to stderr. Can only be\
                             used if an output file is specified using '-o'.",
                        ).long("verbose")
                        .short("-v")
                        .requires("OUTPUT")
                        .required(false),
                ),
        )).get_matches()
}

#[cfg(test)]
mod tests {
    use super::out_slot_name;

    #[test]
    pub fn test_out_slot_name() {
        assert_eq!(out_slot_name("Number"), "out_number");
        assert_eq!(out_slot_name("VerbForm"), "out_verbform");
        assert_eq!(out_slot_name("Number[psor]"), "out_number_psor_");
        assert_eq!(out_slot_name("Person"), "out_person");
    }
}
