//! Ethnic Bias in Language Models
//!
//! Measures how a masked language model's fill-in-the-blank preferences
//! over nationalities shift when an attribute (e.g. an occupation) is
//! present in the sentence.
//!
//! For every template the `[TTT]` slot is masked and each target's
//! probability is read out twice: once with the attribute slot also masked
//! (the prior) and once per attribute. The variance of the log-normalized
//! probabilities is the pair's bias contribution, averaged into a
//! corpus-level `cb_score`.
//!
//! ## Usage
//!
//! ```bash
//! cargo run --release --features bert -- bias run
//! ```
//!
//! ## Module Structure
//!
//! - [`resources`] - Attribute/template files and slot substitution
//! - [`scorer`] - Masked-LM target scoring
//! - [`score`] - Normalization and variance arithmetic
//! - [`measure`] - Measurement driver
//! - [`cli`] - Command-line interface

pub mod cli;
pub mod measure;
pub mod resources;
pub mod score;
pub mod scorer;

pub use cli::main_bias;
