//! Pooling in BERT
//!
//! Fine-tunes a pretrained BERT encoder for sentiment classification with
//! one of several pooling heads over the last hidden states:
//!
//! | Strategy | Reduction |
//! |----------|-----------|
//! | `CLS` | first token (stock BERT pooler) |
//! | `MEAN_MAX` | mean ++ per-dimension max |
//! | `TOPK_MEAN` | mean of per-dimension top-k activations |
//! | `TOPHALF_MEAN` | top-k mean with k = seq_len / 2 |
//! | `MEAN_CLS` | mean ++ first token |
//! | `TOPK_MEAN_CLS` | top-k mean ++ first token |
//!
//! Every head projects back to `hidden_size` through dense + tanh, so the
//! classifier is identical across strategies and accuracy differences come
//! from the pooling alone.
//!
//! ## Usage
//!
//! ```bash
//! cargo run --release --features bert -- pooling train --pooler MEAN_MAX
//! ```
//!
//! ## Module Structure
//!
//! - [`poolers`] - Pooling strategies and the pooling head
//! - [`model`] - Pretrained encoder + pooling head + classifier
//! - [`train`] - Fine-tuning pipeline
//! - [`cli`] - Command-line interface

pub mod cli;
pub mod model;
pub mod poolers;
pub mod train;

pub use cli::main_pooling;
