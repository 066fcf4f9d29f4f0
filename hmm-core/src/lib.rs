//! Hidden Markov Model toolkit.
//!
//! This crate provides a small discrete HMM engine including:
//! - Loading transition / emission tables from plain-text triples
//! - Random sequence generation with an injectable randomness source
//! - Forward evaluation (most probable final state, sequence likelihood)
//! - Viterbi decoding (most probable hidden-state path)
//! - Parallel batch decoding against one shared model

/// Error taxonomy shared by every operation.
pub mod error;

/// Core model, tables and inference algorithms.
pub mod model;

/// I/O utilities (resource paths, table and observation files).
pub mod io;

pub use error::{HmmError, Result};
pub use model::batch::decode_all;
pub use model::hmm::{Hmm, START_STATE};
pub use model::sequence::Sequence;
pub use model::table::{ProbabilityTable, Row};
pub use model::viterbi::TerminalSelection;
