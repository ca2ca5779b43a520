//! N-Gram Bag-of-Words Sentiment Classifier
//!
//! Classifies movie reviews as positive or negative from n-gram count
//! vectors over a vocabulary frozen at training time.
//!
//! ## Pipeline
//!
//! 1. Load the review CSV, shuffle with a fixed seed, split train/validation
//! 2. Tokenize into cleaned n-grams ([`tokenize`])
//! 3. Build a first-seen-order vocabulary and encode count vectors
//!    ([`vectorize`])
//! 4. Train logistic regression or naive bayes ([`classifier`])
//! 5. Report validation accuracy plus sampled correct/wrong reviews
//!    ([`evaluate`])
//!
//! ## Usage
//!
//! ```bash
//! sentilab bow train --num-samples 5000 --n-gram 2
//! sentilab bow predict "A wonderful, quietly moving film"
//! ```
//!
//! ## Module Structure
//!
//! - [`tokenize`] - Preprocessing and n-gram emission
//! - [`vectorize`] - Vocabulary and count-vector encoding
//! - [`classifier`] - Logistic regression and naive bayes
//! - [`train`] - Training pipeline
//! - [`evaluate`] - Accuracy and error inspection
//! - [`save`] - Artifact persistence
//! - [`predict`] - Single text prediction
//! - [`cli`] - Command-line interface

pub mod classifier;
pub mod cli;
pub mod evaluate;
pub mod predict;
pub mod save;
pub mod tokenize;
pub mod train;
pub mod vectorize;

pub use cli::main_bow;
