//! Single review prediction using saved artifacts.

use super::classifier::SentimentClassifier;
use super::tokenize::tokenize_reviews;
use super::vectorize::Vocabulary;
use crate::config::Config;
use std::error::Error;

/// Predict the sentiment of one review text with a previously trained model.
pub fn predict_single(text: &str) -> Result<(), Box<dyn Error>> {
    let config = Config::load_or_default();

    let vocab_path = format!("{}/{}", config.output.model_dir, config.output.vocab_file);
    let classifier_path = format!(
        "{}/{}",
        config.output.model_dir, config.output.classifier_file
    );

    println!("Loading model...");
    let vocab = Vocabulary::load(&vocab_path).map_err(|e| {
        format!(
            "Could not load {} ({}). Train a model first: sentilab bow train",
            vocab_path, e
        )
    })?;
    let classifier = SentimentClassifier::load(&classifier_path).map_err(|e| {
        format!(
            "Could not load {} ({}). Train a model first: sentilab bow train",
            classifier_path, e
        )
    })?;
    println!("  ✓ Vocabulary: {} tokens", vocab.len());

    let tokens = tokenize_reviews(&[text.to_string()], config.bow.n_gram);
    let bow = vocab.encode(&tokens[0]);
    let prediction = classifier.predict(&bow);

    let label = if prediction == 1 { "positive" } else { "negative" };
    println!("\nSentiment: {} ({})", label, prediction);

    Ok(())
}
