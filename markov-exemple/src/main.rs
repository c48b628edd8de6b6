use std::env;

use markov_core::io::{join_records, read_records};
use markov_core::{MarkovChain, ModelError, Mode};
use rand::SeedableRng;
use rand::rngs::StdRng;

/// Seed phrases used for the demo, repeated ones show stochastic variety.
const PHRASES_TO_PREDICT: [&str; 9] = [
    "Hello",
    "Hello",
    "The weather",
    "Ah, yes... The weather",
    "Indeed",
    "Do",
    "No",
    "Goodbye",
    "Goodbye",
];

/// Seed of the single-record demo.
const TEST_SEED: &str = "Hello";

/// Renders a generated sentence, or why the seed was rejected.
fn describe_sentence(model: &MarkovChain, phrase: &str, mode: Mode, rng: &mut StdRng) -> String {
    match model.generate(phrase, mode, rng) {
        Ok(sentence) => sentence,
        // Seeds come from outside the corpus, an unknown word is expected
        Err(e @ ModelError::UnknownToken(_)) => format!("Skipping '{phrase}': {e}"),
        Err(e) => format!("'{phrase}' failed: {e}"),
    }
}

/// Trains a model on a single record and reports what it makes of [`TEST_SEED`].
fn single_record_report(record: &str, rng: &mut StdRng) -> Vec<String> {
    let model = MarkovChain::new(record);
    let prediction = match model.predict(TEST_SEED, Mode::Deterministic, rng) {
        Ok(next) => format!("{TEST_SEED} -> {next}"),
        Err(e) => format!("{TEST_SEED} -> {e}"),
    };
    vec![
        prediction,
        describe_sentence(&model, TEST_SEED, Mode::Deterministic, rng),
        describe_sentence(&model, TEST_SEED, Mode::Stochastic, rng),
    ]
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    // One dialogue line per record
    let path = env::args().nth(1).unwrap_or_else(|| "./data/dialogue.txt".to_owned());
    let records = read_records(&path)?;
    if records.is_empty() {
        return Err(format!("No record in {path}").into());
    }

    // Same draws on every run
    let mut rng = StdRng::seed_from_u64(0);

    // Small model trained on a single record
    let test_text = &records[records.len().min(4) - 1];
    println!("{test_text}\n");
    for line in single_record_report(test_text, &mut rng) {
        println!("{line}\n");
    }

    // Full model trained on every record
    let full_model = MarkovChain::new(&join_records(&records));

    println!("== Deterministic");
    for phrase in PHRASES_TO_PREDICT {
        println!("{}\n", describe_sentence(&full_model, phrase, Mode::Deterministic, &mut rng));
    }

    println!("== Stochastic");
    for phrase in PHRASES_TO_PREDICT {
        println!("{}\n", describe_sentence(&full_model, phrase, Mode::Stochastic, &mut rng));
    }

    Ok(())
}
