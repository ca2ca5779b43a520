//! Persistence of the fitted vocabulary and classifier.

use super::classifier::SentimentClassifier;
use super::vectorize::Vocabulary;
use crate::config::OutputConfig;
use std::error::Error;

/// Save the fitted vocabulary and classifier under the model directory.
pub fn save_artifacts(
    vocab: &Vocabulary,
    classifier: &SentimentClassifier,
    output: &OutputConfig,
) -> Result<(), Box<dyn Error>> {
    std::fs::create_dir_all(&output.model_dir)?;

    let vocab_path = format!("{}/{}", output.model_dir, output.vocab_file);
    let classifier_path = format!("{}/{}", output.model_dir, output.classifier_file);

    vocab.save(&vocab_path)?;
    classifier.save(&classifier_path)?;

    println!("\n✓ Model saved:");
    println!("  - {}", vocab_path);
    println!("  - {}", classifier_path);

    Ok(())
}
