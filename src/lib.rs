//! # Sentilab - Review Classification and Masked-LM Bias Probing
//!
//! Three independent NLP experiments sharing one dataset loader:
//!
//! - **bow**: an n-gram bag-of-words sentiment classifier over movie reviews
//! - **pooling**: alternative pooling heads on a pretrained BERT encoder
//! - **bias**: ethnic/national bias measurement on a fill-mask model
//!
//! ## Quick Start
//!
//! ```bash
//! # Bag-of-words baseline (CPU only)
//! cargo run --release -- bow train --n-gram 2
//!
//! # BERT experiments need libtorch
//! cargo run --release --features bert -- pooling train --pooler MEAN_MAX
//! cargo run --release --features bert -- bias run
//! ```
//!
//! ### As a Library
//!
//! ```no_run
//! use sentilab::bow::tokenize::tokenize_reviews;
//! use sentilab::bow::vectorize::Vocabulary;
//!
//! let texts = vec!["I like apples".to_string(), "I love Rust".to_string()];
//! let tokenized = tokenize_reviews(&texts, 2);
//! let vocab = Vocabulary::build(&tokenized);
//! let bow = vocab.encode(&tokenized[0]);
//! assert_eq!(bow.len(), vocab.len());
//! ```
//!
//! ## Features
//!
//! | Feature | Description | Default |
//! |---------|-------------|---------|
//! | `cli` | Include CLI binary | ✓ |
//! | `bert` | Pretrained BERT via libtorch (pooling + bias) | ✗ |
//! | `auto-download` | Fetch the review dataset from Hugging Face | ✗ |
//!
//! Without the `bert` feature the pooling and bias subcommands compile to
//! stubs that explain how to rebuild.
//!
//! ## Dataset
//!
//! The review dataset is a CSV with `review,sentiment` columns (sentiment is
//! 0 or 1). It is expected at `data/review_5k.csv`; enable `auto-download`
//! to fetch it on first run, or place it there manually.
//!
//! ## License
//!
//! GNU General Public License v3.0 (GPLv3)

pub mod bias;
pub mod bow;
pub mod config;
pub mod dataset;
pub mod pooling;

use csv::ReaderBuilder;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use serde::Deserialize;
use std::error::Error;
use std::fs::File;

/// A single labeled review from the dataset.
#[derive(Debug, Deserialize, Clone)]
pub struct ReviewRecord {
    /// Free-text review body
    pub review: String,
    /// Binary sentiment label (0 = negative, 1 = positive)
    pub sentiment: u8,
}

/// Load review records from a CSV file with `review,sentiment` headers.
///
/// # Example
/// ```no_run
/// use sentilab::load_reviews;
///
/// let records = load_reviews("data/review_5k.csv")?;
/// println!("Loaded {} records", records.len());
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
pub fn load_reviews(path: &str) -> Result<Vec<ReviewRecord>, Box<dyn Error>> {
    let file = File::open(path)?;
    let mut reader = ReaderBuilder::new().has_headers(true).from_reader(file);

    let mut records = Vec::new();
    for result in reader.deserialize() {
        let record: ReviewRecord = result?;
        records.push(record);
    }

    Ok(records)
}

/// Shuffle records with a fixed seed, keep `num_samples`, and split
/// train/validation.
///
/// The seed is pinned so every run sees the same split; a vocabulary built
/// from the training half stays valid across reruns.
pub fn shuffle_and_split(
    records: &[ReviewRecord],
    num_samples: usize,
    train_ratio: f64,
    seed: u64,
) -> (Vec<ReviewRecord>, Vec<ReviewRecord>) {
    let mut shuffled = records.to_vec();
    let mut rng = StdRng::seed_from_u64(seed);
    shuffled.shuffle(&mut rng);
    shuffled.truncate(num_samples);

    let train_size = (shuffled.len() as f64 * train_ratio) as usize;
    let val_data = shuffled.split_off(train_size);

    (shuffled, val_data)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(review: &str, sentiment: u8) -> ReviewRecord {
        ReviewRecord {
            review: review.to_string(),
            sentiment,
        }
    }

    #[test]
    fn test_split_sizes() {
        let records: Vec<_> = (0..10).map(|i| record(&format!("r{}", i), i % 2)).collect();
        let (train, val) = shuffle_and_split(&records, 10, 0.8, 42);
        assert_eq!(train.len(), 8);
        assert_eq!(val.len(), 2);
    }

    #[test]
    fn test_split_is_deterministic() {
        let records: Vec<_> = (0..20).map(|i| record(&format!("r{}", i), i % 2)).collect();
        let (train_a, _) = shuffle_and_split(&records, 20, 0.8, 42);
        let (train_b, _) = shuffle_and_split(&records, 20, 0.8, 42);
        let a: Vec<_> = train_a.iter().map(|r| r.review.clone()).collect();
        let b: Vec<_> = train_b.iter().map(|r| r.review.clone()).collect();
        assert_eq!(a, b);
    }

    #[test]
    fn test_num_samples_truncates() {
        let records: Vec<_> = (0..100).map(|i| record(&format!("r{}", i), i % 2)).collect();
        let (train, val) = shuffle_and_split(&records, 50, 0.8, 42);
        assert_eq!(train.len() + val.len(), 50);
    }
}
