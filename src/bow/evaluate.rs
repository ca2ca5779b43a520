//! Validation metrics and error inspection for the bag-of-words classifier.

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;

/// Fraction of predictions matching labels.
pub fn accuracy(predictions: &[u8], labels: &[u8]) -> f64 {
    if predictions.is_empty() {
        return 0.0;
    }
    let correct = predictions
        .iter()
        .zip(labels.iter())
        .filter(|(pred, label)| pred == label)
        .count();
    correct as f64 / predictions.len() as f64
}

/// Print a handful of correctly and incorrectly classified validation
/// reviews, sampled in shuffled order.
pub fn print_example_errors(texts: &[String], predictions: &[u8], labels: &[u8], seed: u64) {
    let mut indices: Vec<usize> = (0..texts.len()).collect();
    let mut rng = StdRng::seed_from_u64(seed);
    indices.shuffle(&mut rng);

    let correct: Vec<usize> = indices
        .iter()
        .copied()
        .filter(|&i| predictions[i] == labels[i])
        .take(5)
        .collect();
    let wrong: Vec<usize> = indices
        .iter()
        .copied()
        .filter(|&i| predictions[i] != labels[i])
        .take(5)
        .collect();

    println!("\n[Correct Sample Examples]");
    for &i in &correct {
        println!("\t- {}", truncate(&texts[i], 70));
    }
    println!("\n[Wrong Sample Examples]");
    for &i in &wrong {
        println!("\t- {}", truncate(&texts[i], 70));
    }
}

fn truncate(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        text.to_string()
    } else {
        let head: String = text.chars().take(max_chars).collect();
        format!("{}...", head)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accuracy() {
        assert_eq!(accuracy(&[1, 0, 1, 1], &[1, 0, 0, 1]), 0.75);
        assert_eq!(accuracy(&[], &[]), 0.0);
    }

    #[test]
    fn test_truncate_respects_char_boundaries() {
        let text = "é".repeat(100);
        let short = truncate(&text, 70);
        assert_eq!(short.chars().count(), 73); // 70 chars + "..."
    }
}
