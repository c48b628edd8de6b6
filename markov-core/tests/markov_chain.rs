//! Integration tests for training, prediction and sentence generation.

use markov_core::io::join_records;
use markov_core::model::generator::format_sentence;
use markov_core::model::tokenizer::tokenize;
use markov_core::{MarkovChain, ModelError, Mode};
use rand::SeedableRng;
use rand::rngs::StdRng;

const DIALOGUE: [&str; 6] = [
	"Hello, Jerry.",
	"Hello, Newman. How is the weather today?",
	"The weather is fine, Jerry. The weather is always fine!",
	"Do you want some soup? No soup for you!",
	"Indeed, the soup is fine. Goodbye, Jerry.",
	"Goodbye, Newman. Goodbye!",
];

fn dialogue_model() -> MarkovChain {
	MarkovChain::new(&join_records(DIALOGUE))
}

/// Every row with an outgoing transition is a probability distribution.
#[test]
fn trained_rows_sum_to_one() {
	let model = dialogue_model();
	let matrix = model.transitions();
	assert_eq!(matrix.len(), model.vocabulary().len());

	for from in 0..matrix.len() {
		let sum: f64 = (0..matrix.len()).filter_map(|to| matrix.probability(from, to)).sum();
		if matrix.is_degenerate(from) {
			assert_eq!(sum, 0.0);
		} else {
			assert!((sum - 1.0).abs() < 1e-9, "row {from} sums to {sum}");
		}
	}
}

/// A token never followed by another one is the only degenerate row.
#[test]
fn only_unfollowed_tokens_are_degenerate() {
	let model = MarkovChain::new("a b c . d");
	let degenerate: Vec<&str> = model
		.vocabulary()
		.iter()
		.enumerate()
		.filter(|(index, _)| model.transitions().is_degenerate(*index))
		.map(|(_, token)| token)
		.collect();
	assert_eq!(degenerate, vec!["d"]);
}

#[test]
fn deterministic_prediction_is_repeatable() {
	let model = dialogue_model();
	let mut rng = StdRng::seed_from_u64(0);
	for token in model.vocabulary().iter() {
		let first = model.predict(token, Mode::Deterministic, &mut rng);
		let second = model.predict(token, Mode::Deterministic, &mut rng);
		assert_eq!(first, second);
	}
}

#[test]
fn go_stop_scenario() {
	let model = MarkovChain::new("go go stop . go stop .");
	let mut rng = StdRng::seed_from_u64(0);
	assert_eq!(model.vocabulary().iter().collect::<Vec<_>>(), vec![".", "go", "stop"]);
	assert_eq!(model.predict("go", Mode::Deterministic, &mut rng), Ok("stop"));
}

#[test]
fn unknown_token_is_reported() {
	let model = MarkovChain::new("a b c .");
	let mut rng = StdRng::seed_from_u64(0);
	let error = model.predict("z", Mode::Deterministic, &mut rng).unwrap_err();
	assert_eq!(error, ModelError::UnknownToken("z".to_owned()));
	assert_eq!(error.to_string(), "token 'z' not in vocabulary");
}

/// Seeds are matched without case folding.
#[test]
fn seed_lookup_is_case_sensitive() {
	let model = dialogue_model();
	let mut rng = StdRng::seed_from_u64(0);
	assert!(model.generate("Hello", Mode::Deterministic, &mut rng).is_ok());
	assert_eq!(
		model.generate("hello", Mode::Deterministic, &mut rng),
		Err(ModelError::UnknownToken("hello".to_owned()))
	);
}

#[test]
fn deterministic_sentences() {
	let model = dialogue_model();
	let mut rng = StdRng::seed_from_u64(0);
	// "fine" is followed once each by "!", "," and "."; "!" has the lowest index
	assert_eq!(model.generate("The weather", Mode::Deterministic, &mut rng), Ok("The weather is fine!".to_owned()));
	assert_eq!(model.generate("Hello", Mode::Deterministic, &mut rng), Ok("Hello, jerry.".to_owned()));
}

/// Generation stops even when no terminal punctuation is reachable.
#[test]
fn generation_is_bounded() {
	let model = MarkovChain::new("round and round and round and round");
	let mut rng = StdRng::seed_from_u64(42);
	for mode in [Mode::Deterministic, Mode::Stochastic] {
		let sentence = model.generate("round", mode, &mut rng).unwrap();
		let pieces = tokenize(&sentence);
		// Seed, 42 predictions, and the three dots of the marker
		assert_eq!(pieces.len(), 1 + 42 + 3);
		assert!(sentence.ends_with("..."));
	}
}

#[test]
fn stochastic_generation_is_reproducible() {
	let model = dialogue_model();
	let generate = |seed| {
		let mut rng = StdRng::seed_from_u64(seed);
		["Hello", "The weather", "Goodbye", "Do"]
			.iter()
			.map(|phrase| model.generate(phrase, Mode::Stochastic, &mut rng).unwrap())
			.collect::<Vec<_>>()
	};
	assert_eq!(generate(0), generate(0));
}

/// Re-tokenizing a generated sentence and formatting it again is a no-op.
#[test]
fn formatting_round_trip() {
	let model = dialogue_model();
	let mut rng = StdRng::seed_from_u64(1);
	for phrase in ["Hello", "Hello", "The weather", "Indeed", "Do", "No", "Goodbye"] {
		for mode in [Mode::Deterministic, Mode::Stochastic] {
			let sentence = model.generate(phrase, mode, &mut rng).unwrap();
			let body = sentence.strip_suffix("...").unwrap_or(&sentence);
			assert_eq!(format_sentence(&tokenize(body)), body);
		}
	}
}

#[test]
fn formatting_example() {
	assert_eq!(format_sentence(&["Hello", "world", "."]), "Hello world.");
}
