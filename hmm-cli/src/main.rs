use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use rand::SeedableRng;
use rand::rngs::StdRng;

use hmm_core::io::{read_observations, resource_path, write_observations};
use hmm_core::{Hmm, HmmError, TerminalSelection, decode_all};

/// Generate, evaluate and decode sequences with a Hidden Markov Model
#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Args {
	/// Model basename: `<BASENAME>.trans` and `<BASENAME>.emit` are loaded
	basename: PathBuf,

	/// Generate N observations and write them to `--output`
	#[arg(short, long, value_name = "N")]
	generate: Option<usize>,

	/// Output file for `--generate` (default: `<BASENAME>.obs`)
	#[arg(short, long)]
	output: Option<PathBuf>,

	/// Print the most probable final state for the observations in FILE
	#[arg(short, long, value_name = "FILE")]
	forward: Option<PathBuf>,

	/// Print the most probable state path for the observations in each FILE
	#[arg(short, long, value_name = "FILE", num_args = 1..)]
	viterbi: Vec<PathBuf>,

	/// Length of the sequence generated when an observation file is missing
	#[arg(short, long, default_value = "20")]
	length: usize,

	/// How viterbi picks the final state to backtrack from
	#[arg(short, long, value_enum, default_value_t = Terminal::SmallestBackpointer)]
	terminal: Terminal,

	/// Seed for generation (random if omitted)
	#[arg(short, long)]
	seed: Option<u64>,
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum Terminal {
	SmallestBackpointer,
	MaxProbability,
}

impl From<Terminal> for TerminalSelection {
	fn from(terminal: Terminal) -> Self {
		match terminal {
			Terminal::SmallestBackpointer => TerminalSelection::SmallestBackpointer,
			Terminal::MaxProbability => TerminalSelection::MaxProbability,
		}
	}
}

/// Returns the observations in `path`, generating `length` of them first
/// if the file does not exist yet.
fn observations_or_generate(hmm: &Hmm, path: &Path, length: usize, rng: &mut StdRng) -> Result<Vec<String>> {
	if !path.exists() {
		log::info!("{} not found, generating {length} observations", path.display());
		let sequence = hmm.generate(length, rng)?;
		write_observations(path, sequence.outputs())
			.with_context(|| format!("cannot write {}", path.display()))?;
	}
	read_observations(path).with_context(|| format!("cannot read {}", path.display()))
}

fn main() -> Result<()> {
	env_logger::init();
	let args = Args::parse();

	let hmm = Hmm::load(&args.basename)
		.with_context(|| format!("cannot load model '{}'", args.basename.display()))?;
	log::info!("loaded {} with {} states", args.basename.display(), hmm.n_states());

	let mut rng = match args.seed {
		Some(seed) => StdRng::seed_from_u64(seed),
		None => StdRng::from_os_rng(),
	};

	if let Some(n) = args.generate {
		let sequence = hmm.generate(n, &mut rng)?;
		let output = args.output.clone().unwrap_or_else(|| resource_path(&args.basename, "obs"));
		write_observations(&output, sequence.outputs())
			.with_context(|| format!("cannot write {}", output.display()))?;
		print!("{sequence}");
		println!("Wrote {n} observations to {}", output.display());
	}

	if let Some(path) = &args.forward {
		let observations = observations_or_generate(&hmm, path, args.length, &mut rng)?;
		match hmm.forward(&observations) {
			Ok(Some(state)) => println!("Most likely final state: {state}"),
			Ok(None) => println!("No observations in {}", path.display()),
			Err(HmmError::NoViablePath) => println!("No viable path for {}", path.display()),
			Err(e) => return Err(e.into()),
		}
	}

	if !args.viterbi.is_empty() {
		let mut sequences = Vec::with_capacity(args.viterbi.len());
		for path in &args.viterbi {
			sequences.push(observations_or_generate(&hmm, path, args.length, &mut rng)?);
		}

		let decoded = decode_all(&hmm, &sequences, args.terminal.into());
		for ((path, observations), result) in args.viterbi.iter().zip(&sequences).zip(decoded) {
			println!("{}:", path.display());
			match result {
				Ok(states) => {
					println!("{}", states.join(" "));
					println!("{}", observations.join(" "));
				}
				Err(HmmError::NoViablePath) => println!("No viable path"),
				Err(e) => return Err(e.into()),
			}
		}
	}

	Ok(())
}
