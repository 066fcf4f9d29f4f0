use std::collections::HashMap;
use std::fs;

use hmm_core::{Hmm, HmmError, START_STATE};

fn fixture(name: &str) -> String {
	format!("{}/../data/{name}", env!("CARGO_MANIFEST_DIR"))
}

fn nested(triples: &[(&str, &str, f64)]) -> HashMap<String, HashMap<String, f64>> {
	let mut table: HashMap<String, HashMap<String, f64>> = HashMap::new();
	for (first, second, p) in triples {
		table.entry(first.to_string()).or_default().insert(second.to_string(), *p);
	}
	table
}

#[test]
fn load_reproduces_cat_tables() {
	let hmm = Hmm::load(fixture("cat")).unwrap();

	let emissions = nested(&[
		("happy", "silent", 0.2), ("happy", "meow", 0.3), ("happy", "purr", 0.5),
		("grumpy", "silent", 0.5), ("grumpy", "meow", 0.4), ("grumpy", "purr", 0.1),
		("hungry", "silent", 0.2), ("hungry", "meow", 0.6), ("hungry", "purr", 0.2),
	]);
	assert_eq!(hmm.emissions().to_nested(), emissions);

	let transitions = nested(&[
		("#", "happy", 0.5), ("#", "grumpy", 0.5), ("#", "hungry", 0.0),
		("happy", "happy", 0.5), ("happy", "grumpy", 0.1), ("happy", "hungry", 0.4),
		("grumpy", "happy", 0.6), ("grumpy", "grumpy", 0.3), ("grumpy", "hungry", 0.1),
		("hungry", "happy", 0.1), ("hungry", "grumpy", 0.6), ("hungry", "hungry", 0.3),
	]);
	assert_eq!(hmm.transitions().to_nested(), transitions);

	assert_eq!(hmm.states(), ["happy", "grumpy", "hungry"]);
}

#[test]
fn fixture_distributions_sum_to_one() {
	for name in ["cat", "partofspeech"] {
		let hmm = Hmm::load(fixture(name)).unwrap();
		assert!(hmm.transitions().row(START_STATE).is_some());

		for row in hmm.transitions().rows().chain(hmm.emissions().rows()) {
			assert!(row.entries().all(|(_, p)| p >= 0.0), "{name}: negative entry in '{}'", row.key());
			assert!((row.total() - 1.0).abs() < 1e-9, "{name}: row '{}' sums to {}", row.key(), row.total());
		}
		for state in hmm.states() {
			assert!(hmm.transitions().row(state).is_some(), "{name}: '{state}' has no exits");
			assert!(hmm.emissions().row(state).is_some(), "{name}: '{state}' emits nothing");
		}
	}
}

#[test]
fn missing_resource_is_reported() {
	let err = Hmm::load(fixture("no-such-model")).unwrap_err();
	match err {
		HmmError::MissingResource { path } => assert!(path.ends_with("no-such-model.trans")),
		other => panic!("unexpected error: {other}"),
	}
}

#[test]
fn missing_emission_file_is_reported() {
	let dir = tempfile::tempdir().unwrap();
	let basename = dir.path().join("half");
	fs::write(dir.path().join("half.trans"), "# a 1\na a 1\n").unwrap();

	let err = Hmm::load(&basename).unwrap_err();
	match err {
		HmmError::MissingResource { path } => assert!(path.ends_with("half.emit")),
		other => panic!("unexpected error: {other}"),
	}
}

#[test]
fn dotted_basenames_keep_their_dots() {
	let dir = tempfile::tempdir().unwrap();
	fs::write(dir.path().join("pos.brown.trained.trans"), "# N 1\nN N 1\n").unwrap();
	fs::write(dir.path().join("pos.brown.trained.emit"), "N dog 1\n").unwrap();

	let hmm = Hmm::load(dir.path().join("pos.brown.trained")).unwrap();
	assert_eq!(hmm.states(), ["N"]);
}
