use std::collections::HashMap;
use std::path::Path;

use ndarray::{Array1, Array2, ArrayD};
use rand::seq::SliceRandom;
use rand::thread_rng;

use conll::Sentence;
use errors::{Result, UdmorphError};
use vectorize::{Vectorized, Vectorizer};
use vocab::{Dicts, RESERVED_ID};

/// Slot name of the character id matrix.
pub const INP_CHAR_SEQ: &str = "inp_char_seq";

/// Slot name of the POS tag id vector.
pub const INP_POS: &str = "inp_pos";

/// Slot name of the dependency relation id vector.
pub const INP_DEPREL: &str = "inp_deprel";

/// Named input and output tensors over a vectorized corpus.
///
/// `inputs` holds the `[n, width]` character id matrix plus the two `[n]`
/// tag id vectors, `outputs` one `[n]` value id vector per feature name.
/// `output_features` records which feature backs which output slot, in the
/// order the slots were assembled.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Batch {
    pub inputs: HashMap<String, ArrayD<u32>>,
    pub outputs: HashMap<String, ArrayD<u32>>,
    pub output_features: Vec<String>,
}

/// Assembles vectorized tokens into named tensors.
///
/// Character sequences are pre-padded with the reserved id 0 to a common
/// width: the longest sequence in the batch, or `sequence_length` if given.
/// An explicit length shorter than the longest sequence is an error, rows
/// are never truncated. `slot_name` maps a feature name to the name of its
/// output slot. Items must carry one output per entry of `output_features`.
pub fn assemble<F>(
    mut items: Vec<Vectorized>,
    output_features: &[String],
    sequence_length: Option<usize>,
    shuffle: bool,
    slot_name: F,
) -> Result<Batch>
where
    F: Fn(&str) -> String,
{
    if shuffle {
        items.shuffle(&mut thread_rng());
    }

    let longest = items.iter().map(|item| item.chars.len()).max().unwrap_or(0);
    let width = match sequence_length {
        Some(length) => {
            if length < longest {
                return Err(UdmorphError::invalid_argument(
                    "sequence_length",
                    format!(
                        "requested width {} is shorter than the longest character sequence ({})",
                        length, longest
                    ),
                ));
            }
            length
        }
        None => longest,
    };

    let mut flat = Vec::with_capacity(items.len() * width);
    for item in &items {
        debug_assert_eq!(item.outputs.len(), output_features.len());
        for _ in item.chars.len()..width {
            flat.push(RESERVED_ID);
        }
        flat.extend_from_slice(&item.chars);
    }
    // the length is items.len() * width by construction
    let chars = Array2::from_shape_vec((items.len(), width), flat).unwrap();
    let pos = Array1::from(items.iter().map(|item| item.pos).collect::<Vec<u32>>());
    let deprels = Array1::from(items.iter().map(|item| item.deprel).collect::<Vec<u32>>());

    let mut inputs = HashMap::new();
    inputs.insert(INP_CHAR_SEQ.to_string(), chars.into_dyn());
    inputs.insert(INP_POS.to_string(), pos.into_dyn());
    inputs.insert(INP_DEPREL.to_string(), deprels.into_dyn());

    let mut outputs = HashMap::new();
    for (column, feature) in output_features.iter().enumerate() {
        let values =
            Array1::from(items.iter().map(|item| item.outputs[column]).collect::<Vec<u32>>());
        outputs.insert(slot_name(feature), values.into_dyn());
    }

    Ok(Batch {
        inputs,
        outputs,
        output_features: output_features.to_vec(),
    })
}

/// Reads, vectorizes and assembles a corpus against persisted dictionaries.
pub fn prepare<I, P, F>(
    sentences: I,
    dicts_path: P,
    sequence_length: Option<usize>,
    shuffle: bool,
    slot_name: F,
) -> Result<Batch>
where
    I: IntoIterator<Item = Result<Sentence>>,
    P: AsRef<Path>,
    F: Fn(&str) -> String,
{
    let dicts = Dicts::load(dicts_path)?;
    let vectorizer = Vectorizer::new(&dicts);
    let items = vectorizer.vectorize_corpus(sentences)?;
    assemble(
        items,
        vectorizer.output_features(),
        sequence_length,
        shuffle,
        slot_name,
    )
}
