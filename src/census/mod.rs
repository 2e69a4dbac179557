// src/census/mod.rs
// =============================================================================
// This module turns downloaded file contents into letter statistics.
//
// Submodules:
// - letters: LetterTable and the pure count_letters function
// - aggregate: Downloads files and feeds them into one table
// =============================================================================

mod aggregate;
mod letters;

pub use aggregate::{aggregate, FailurePolicy};
pub use letters::{count_letters, LetterCount, LetterTable};
