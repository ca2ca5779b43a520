//! End-to-end training pipeline for the n-gram bag-of-words classifier.

use super::classifier::{
    ClassifierKind, LogisticRegression, MultinomialNaiveBayes, SentimentClassifier,
};
use super::evaluate::{accuracy, print_example_errors};
use super::save::save_artifacts;
use super::tokenize::tokenize_reviews;
use super::vectorize::Vocabulary;
use crate::config::Config;
use crate::dataset::ensure_review_data;
use crate::{load_reviews, shuffle_and_split};
use std::error::Error;
use std::time::Instant;

/// Command-line overrides applied on top of `config.toml`.
#[derive(Debug, Default)]
pub struct TrainOverrides {
    pub num_samples: Option<usize>,
    pub n_gram: Option<usize>,
    pub classifier: Option<String>,
    pub quiet: bool,
}

/// Train the bag-of-words sentiment classifier.
///
/// Pipeline: load/shuffle/split the review CSV, tokenize the training half
/// into n-grams, freeze a vocabulary, train the configured classifier,
/// evaluate on the held-out split, and save the fitted artifacts.
pub fn train_bow(overrides: &TrainOverrides) -> Result<(), Box<dyn Error>> {
    let mut config = Config::load_or_default();

    if let Some(num_samples) = overrides.num_samples {
        config.data.num_samples = num_samples;
    }
    if let Some(n_gram) = overrides.n_gram {
        config.bow.n_gram = n_gram;
    }
    if let Some(ref classifier) = overrides.classifier {
        config.bow.classifier = classifier.clone();
    }
    let verbose = !overrides.quiet;

    if config.bow.n_gram == 0 {
        return Err("n_gram must be >= 1".into());
    }
    let kind = ClassifierKind::from_name(&config.bow.classifier)?;

    println!("=== N-Gram Bag-of-Words Sentiment Classifier ===\n");

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

    let train_texts: Vec<String> = train_records.iter().map(|r| r.review.clone()).collect();
    let train_labels: Vec<u8> = train_records.iter().map(|r| r.sentiment).collect();
    let val_texts: Vec<String> = val_records.iter().map(|r| r.review.clone()).collect();
    let val_labels: Vec<u8> = val_records.iter().map(|r| r.sentiment).collect();

    if train_texts.is_empty() {
        return Err("No training samples after split; increase --num-samples".into());
    }

    if verbose && train_texts.len() >= 2 {
        println!(
            "[Example of xs]: [\"{}...\", \"{}...\", ...]",
            head_chars(&train_texts[0], 70),
            head_chars(&train_texts[1], 70)
        );
        println!(
            "[Example of ys]: [{}, {}, ...]",
            train_labels[0], train_labels[1]
        );
        println!(
            "\n[Num Train]: {}\n[Num Validation]: {}\n",
            train_labels.len(),
            val_labels.len()
        );
    }

    // Vocabulary and training vectors
    println!("[Train] Vocab construction");
    let train_tokens = tokenize_reviews(&train_texts, config.bow.n_gram);
    let vocab = Vocabulary::build(&train_tokens);
    if verbose {
        println!("\n[Vocab]: {} tokens", vocab.len());
    }

    println!("[Train] BoW construction");
    let train_bows = vocab.encode_all(&train_tokens);

    // Train classifier
    let train_start = Instant::now();
    let classifier = match kind {
        ClassifierKind::Logistic => {
            let features: Vec<Vec<f64>> = train_bows
                .iter()
                .map(|bow| bow.iter().map(|&c| c as f64).collect())
                .collect();
            let mut model = LogisticRegression::new(vocab.len(), config.bow.learning_rate);
            model.train(
                &features,
                &train_labels,
                config.bow.epochs,
                config.bow.batch_size,
                config.data.shuffle_seed,
            );
            SentimentClassifier::Logistic(model)
        }
        ClassifierKind::NaiveBayes => {
            println!("Fitting multinomial naive bayes");
            SentimentClassifier::NaiveBayes(MultinomialNaiveBayes::fit(&train_bows, &train_labels))
        }
    };
    println!(
        "Training time: {:.2}s\n",
        train_start.elapsed().as_secs_f64()
    );

    // Validation
    println!("[Validation] BoW construction");
    let val_tokens = tokenize_reviews(&val_texts, config.bow.n_gram);
    let val_bows = vocab.encode_all(&val_tokens);
    let val_preds: Vec<u8> = val_bows.iter().map(|bow| classifier.predict(bow)).collect();

    let val_accuracy = accuracy(&val_preds, &val_labels);
    println!("\n[Validation] Accuracy: {:.4}", val_accuracy);

    if verbose {
        print_example_errors(
            &val_texts,
            &val_preds,
            &val_labels,
            config.data.shuffle_seed,
        );
    }

    save_artifacts(&vocab, &classifier, &config.output)?;

    Ok(())
}

fn head_chars(text: &str, max_chars: usize) -> String {
    text.chars().take(max_chars).collect()
}
