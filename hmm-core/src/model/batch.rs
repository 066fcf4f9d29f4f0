use std::sync::mpsc;
use std::thread;

use super::hmm::Hmm;
use super::viterbi::TerminalSelection;
use crate::error::Result;

/// Decodes several observation sequences against one shared model.
///
/// # Behavior
/// - Splits the sequences into chunks (based on CPU cores * factor)
/// - Decodes each chunk on its own scoped thread, borrowing the model
/// - Collects results through an MPSC channel and restores input order
///
/// # Notes
/// - The model is read-only, threads share it without locking
/// - Each item carries its own `Result`, one failing sequence does not
///   affect the others
pub fn decode_all<'a, S>(
	hmm: &'a Hmm,
	sequences: &[Vec<S>],
	selection: TerminalSelection,
) -> Vec<Result<Vec<&'a str>>>
where
	S: AsRef<str> + Sync,
{
	if sequences.is_empty() {
		return Vec::new();
	}

	let cpus = num_cpus::get();
	let factor = 8;
	let chunks = cpus * factor;
	let chunk_size = sequences.len().div_ceil(chunks);

	let (tx, rx) = mpsc::channel();
	thread::scope(|scope| {
		for (chunk_index, chunk) in sequences.chunks(chunk_size).enumerate() {
			let tx = tx.clone();
			scope.spawn(move || {
				for (offset, observations) in chunk.iter().enumerate() {
					let decoded = hmm.viterbi_with(observations, selection);
					tx.send((chunk_index * chunk_size + offset, decoded))
						.expect("Failed to send from thread");
				}
			});
		}
	});
	drop(tx);

	let mut results: Vec<Option<Result<Vec<&'a str>>>> = sequences.iter().map(|_| None).collect();
	for (index, decoded) in rx.iter() {
		results[index] = Some(decoded);
	}
	log::debug!("decoded {} sequences in chunks of {chunk_size}", sequences.len());

	results.into_iter().flatten().collect()
}
