use hmm_core::{Hmm, HmmError, TerminalSelection, decode_all};

fn fixture(name: &str) -> Hmm {
	Hmm::load(format!("{}/../data/{name}", env!("CARGO_MANIFEST_DIR"))).unwrap()
}

const CAT_OBSERVATIONS: [&str; 5] = ["purr", "silent", "silent", "meow", "meow"];
const POS_OBSERVATIONS: [&str; 5] = ["i", "shot", "the", "elephant", "."];

#[test]
fn forward_on_cat_ends_hungry() {
	let hmm = fixture("cat");
	assert_eq!(hmm.forward(&CAT_OBSERVATIONS).unwrap(), Some("hungry"));
}

#[test]
fn viterbi_on_cat() {
	let hmm = fixture("cat");
	assert_eq!(
		hmm.viterbi(&CAT_OBSERVATIONS).unwrap(),
		["happy", "hungry", "grumpy", "happy", "happy"]
	);
}

#[test]
fn max_probability_terminal_on_cat() {
	// The highest final cell is hungry (0.0002592 against 0.000162 for happy)
	let hmm = fixture("cat");
	assert_eq!(
		hmm.viterbi_with(&CAT_OBSERVATIONS, TerminalSelection::MaxProbability).unwrap(),
		["happy", "hungry", "grumpy", "happy", "hungry"]
	);
	let best = hmm.viterbi_probability(&CAT_OBSERVATIONS).unwrap();
	assert!((best - 0.0002592).abs() < 1e-15);
}

#[test]
fn viterbi_on_part_of_speech() {
	let hmm = fixture("partofspeech");
	for selection in [TerminalSelection::SmallestBackpointer, TerminalSelection::MaxProbability] {
		assert_eq!(
			hmm.viterbi_with(&POS_OBSERVATIONS, selection).unwrap(),
			["PRON", "VERB", "DET", "NOUN", "."]
		);
	}
}

#[test]
fn forward_agrees_with_viterbi_on_deterministic_models() {
	let hmm = fixture("partofspeech");
	let path = hmm.viterbi(&POS_OBSERVATIONS).unwrap();
	assert_eq!(hmm.forward(&POS_OBSERVATIONS).unwrap(), path.last().copied());

	let dir = tempfile::tempdir().unwrap();
	std::fs::write(dir.path().join("lights.trans"), "# red 1\nred green 1\ngreen amber 1\namber red 1\n").unwrap();
	std::fs::write(dir.path().join("lights.emit"), "red stop 1\ngreen go 1\namber slow 1\n").unwrap();
	let hmm = Hmm::load(dir.path().join("lights")).unwrap();
	let observations = ["stop", "go", "slow", "stop", "go"];
	let path = hmm.viterbi(&observations).unwrap();
	assert_eq!(path, ["red", "green", "amber", "red", "green"]);
	assert_eq!(hmm.forward(&observations).unwrap(), path.last().copied());
	assert!((hmm.likelihood(&observations) - 1.0).abs() < 1e-12);
}

#[test]
fn empty_observations_are_a_no_op() {
	let hmm = fixture("cat");
	let empty: Vec<String> = Vec::new();
	assert!(hmm.viterbi(&empty).unwrap().is_empty());
	assert_eq!(hmm.forward(&empty).unwrap(), None);
}

#[test]
fn unseen_symbol_has_no_viable_path() {
	let hmm = fixture("cat");
	let observations = ["purr", "bark", "meow"];
	assert!(matches!(hmm.forward(&observations), Err(HmmError::NoViablePath)));
	assert!(matches!(hmm.viterbi(&observations), Err(HmmError::NoViablePath)));
	assert_eq!(hmm.likelihood(&observations), 0.0);
}

#[test]
fn batch_decoding_matches_single_calls() {
	let hmm = fixture("partofspeech");
	let sequences = vec![
		POS_OBSERVATIONS.to_vec(),
		vec!["you", "saw", "a", "big", "dog", "."],
		vec!["the", "unicorn"],
	];
	let decoded = decode_all(&hmm, &sequences, TerminalSelection::default());
	assert_eq!(decoded[0].as_ref().unwrap(), &["PRON", "VERB", "DET", "NOUN", "."]);
	assert_eq!(decoded[1].as_ref().unwrap(), &hmm.viterbi(&sequences[1]).unwrap());
	assert!(matches!(decoded[2], Err(HmmError::NoViablePath)));
}
