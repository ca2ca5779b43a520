//! Fine-tuning pipeline for the pooled BERT sentiment classifier.

use super::model::PooledBertClassifier;
use super::poolers::PoolingStrategy;
use crate::bow::evaluate::accuracy;
use crate::config::Config;
use crate::dataset::ensure_review_data;
use crate::{load_reviews, shuffle_and_split};
use std::error::Error;
use std::time::Instant;

/// Command-line overrides applied on top of `config.toml`.
#[derive(Debug, Default)]
pub struct PoolingOverrides {
    pub strategy: Option<String>,
    pub num_samples: Option<usize>,
    pub epochs: Option<usize>,
}

/// Fine-tune a pooled BERT classifier on the review dataset and report
/// validation accuracy.
pub fn train_pooling(overrides: &PoolingOverrides) -> Result<(), Box<dyn Error>> {
    let mut config = Config::load_or_default();

    if let Some(ref strategy) = overrides.strategy {
        config.pooling.strategy = strategy.clone();
    }
    if let Some(num_samples) = overrides.num_samples {
        config.data.num_samples = num_samples;
    }
    if let Some(epochs) = overrides.epochs {
        config.pooling.epochs = epochs;
    }

    let strategy = PoolingStrategy::from_name(&config.pooling.strategy)?;

    println!("=== Pooling in BERT ===\n");
    println!("Pooling strategy: {}\n", strategy.name());

    // Load data
    ensure_review_data(&config.data.csv_path, cfg!(feature = "auto-download"))?;
    println!("Loading data at {}", config.data.csv_path);
    let start = Instant::now();
    let records = load_reviews(&config.data.csv_path)?;
    println!(
        "  Loaded {} records ({:.2}s)\n",
        records.len(),
        start.elapsed().as_secs_f64()
    );

    let (train_records, val_records) = shuffle_and_split(
        &records,
        config.data.num_samples,
        config.data.train_split,
        config.data.shuffle_seed,
    );
    println!(
        "Train: {} | Validation: {}\n",
        train_records.len(),
        val_records.len()
    );

    let train_texts: Vec<String> = train_records.iter().map(|r| r.review.clone()).collect();
    let train_labels: Vec<u8> = train_records.iter().map(|r| r.sentiment).collect();
    let val_texts: Vec<String> = val_records.iter().map(|r| r.review.clone()).collect();
    let val_labels: Vec<u8> = val_records.iter().map(|r| r.sentiment).collect();

    // Build model and fine-tune
    let mut model = PooledBertClassifier::new(
        strategy,
        config.pooling.top_k,
        config.pooling.num_labels,
        config.pooling.max_seq_len,
    )?;

    let train_start = Instant::now();
    model.train(
        &train_texts,
        &train_labels,
        config.pooling.epochs,
        config.pooling.batch_size,
        config.pooling.learning_rate,
        config.data.shuffle_seed,
    )?;
    println!(
        "Total training time: {:.2}s\n",
        train_start.elapsed().as_secs_f64()
    );

    // Validation
    println!("Evaluation\n");
    let val_start = Instant::now();
    let val_preds = model.predict_batch(&val_texts, config.pooling.batch_size)?;
    let val_acc = accuracy(&val_preds, &val_labels);
    println!("  [Validation] Accuracy: {:.2}%", val_acc * 100.0);
    println!("  Time: {:.2}s\n", val_start.elapsed().as_secs_f64());

    // Save weights
    std::fs::create_dir_all(&config.output.model_dir)?;
    let weights_path = format!(
        "{}/{}",
        config.output.model_dir, config.output.pooling_weights_file
    );
    model.save(&weights_path)?;

    Ok(())
}
