//! Sentiment classifiers over bag-of-words count vectors.
//!
//! Two trainable classifiers are provided: a binary logistic regression
//! trained with mini-batch SGD, and a multinomial naive bayes with Laplace
//! smoothing. Both are serializable so a fitted model can be reloaded for
//! single-text prediction.

use ndarray::{Array1, ArrayView1, ArrayViewMut1};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};
use std::error::Error;

/// Classifier selection parsed from config or command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClassifierKind {
    Logistic,
    NaiveBayes,
}

impl ClassifierKind {
    /// Parse a classifier name. Unknown names are a hard error.
    pub fn from_name(name: &str) -> Result<Self, Box<dyn Error>> {
        match name {
            "logistic" => Ok(ClassifierKind::Logistic),
            "naive_bayes" | "naive-bayes" => Ok(ClassifierKind::NaiveBayes),
            other => Err(format!(
                "Unknown classifier kind: {} (expected \"logistic\" or \"naive_bayes\")",
                other
            )
            .into()),
        }
    }
}

/// Binary logistic regression over count vectors, mini-batch SGD with
/// sigmoid cross-entropy.
#[derive(Debug, Serialize, Deserialize)]
pub struct LogisticRegression {
    pub weights: Vec<f64>,
    pub bias: f64,
    pub learning_rate: f64,
}

fn sigmoid(z: f64) -> f64 {
    1.0 / (1.0 + (-z).exp())
}

impl LogisticRegression {
    pub fn new(input_dim: usize, learning_rate: f64) -> Self {
        LogisticRegression {
            weights: vec![0.0; input_dim],
            bias: 0.0,
            learning_rate,
        }
    }

    /// Train on count vectors with binary labels.
    ///
    /// Sample order is reshuffled each epoch from a fixed seed so repeated
    /// runs on the same split produce the same model.
    pub fn train(
        &mut self,
        features: &[Vec<f64>],
        labels: &[u8],
        epochs: usize,
        batch_size: usize,
        seed: u64,
    ) {
        let n_samples = features.len();
        let dim = self.weights.len();
        let mut rng = StdRng::seed_from_u64(seed);
        let mut indices: Vec<usize> = (0..n_samples).collect();

        println!(
            "Training logistic regression: {} epochs, batch size {}",
            epochs, batch_size
        );

        for epoch in 0..epochs {
            indices.shuffle(&mut rng);
            let mut total_loss = 0.0;
            let mut correct = 0;

            for batch in indices.chunks(batch_size) {
                let mut grad = Array1::<f64>::zeros(dim);
                let mut grad_bias = 0.0;

                for &i in batch {
                    let x = ArrayView1::from(features[i].as_slice());
                    let y = labels[i] as f64;
                    let p = sigmoid(ArrayView1::from(self.weights.as_slice()).dot(&x) + self.bias);

                    // Clamp to keep ln() finite on saturated predictions
                    let p_safe = p.clamp(1e-12, 1.0 - 1e-12);
                    total_loss -= y * p_safe.ln() + (1.0 - y) * (1.0 - p_safe).ln();
                    if (p >= 0.5) == (labels[i] == 1) {
                        correct += 1;
                    }

                    let err = p - y;
                    grad.scaled_add(err, &x);
                    grad_bias += err;
                }

                let scale = self.learning_rate / batch.len() as f64;
                let mut w = ArrayViewMut1::from(self.weights.as_mut_slice());
                w.scaled_add(-scale, &grad);
                self.bias -= scale * grad_bias;
            }

            if (epoch + 1) % 5 == 0 {
                println!(
                    "  Epoch {:3}/{}: Loss={:.4}, Acc={:.2}%",
                    epoch + 1,
                    epochs,
                    total_loss / n_samples as f64,
                    correct as f64 / n_samples as f64 * 100.0
                );
            }
        }
    }

    /// Probability of the positive class.
    pub fn predict_proba(&self, features: &[f64]) -> f64 {
        let x = ArrayView1::from(features);
        sigmoid(ArrayView1::from(self.weights.as_slice()).dot(&x) + self.bias)
    }

    pub fn predict(&self, features: &[f64]) -> u8 {
        u8::from(self.predict_proba(features) >= 0.5)
    }
}

/// Multinomial naive bayes over integer counts with Laplace smoothing.
#[derive(Debug, Serialize, Deserialize)]
pub struct MultinomialNaiveBayes {
    /// Log prior per class (index 0 = negative, 1 = positive)
    pub class_log_prior: [f64; 2],
    /// Per-class log probability of each feature
    pub feature_log_prob: Vec<Vec<f64>>,
}

impl MultinomialNaiveBayes {
    /// Fit priors and smoothed per-class token probabilities.
    pub fn fit(features: &[Vec<u32>], labels: &[u8]) -> Self {
        let n_samples = labels.len() as f64;
        let vocab_size = features.first().map(|f| f.len()).unwrap_or(0);

        let mut class_counts = [0usize; 2];
        let mut token_counts = vec![vec![0.0f64; vocab_size]; 2];
        let mut token_totals = [0.0f64; 2];

        for (bow, &label) in features.iter().zip(labels.iter()) {
            let class = label as usize;
            class_counts[class] += 1;
            for (idx, &count) in bow.iter().enumerate() {
                token_counts[class][idx] += count as f64;
                token_totals[class] += count as f64;
            }
        }

        let class_log_prior = [
            (class_counts[0] as f64 / n_samples).max(f64::MIN_POSITIVE).ln(),
            (class_counts[1] as f64 / n_samples).max(f64::MIN_POSITIVE).ln(),
        ];

        let mut feature_log_prob = vec![vec![0.0f64; vocab_size]; 2];
        for class in 0..2 {
            let denom = token_totals[class] + vocab_size as f64;
            for idx in 0..vocab_size {
                // Laplace smoothing
                feature_log_prob[class][idx] = ((token_counts[class][idx] + 1.0) / denom).ln();
            }
        }

        MultinomialNaiveBayes {
            class_log_prior,
            feature_log_prob,
        }
    }

    pub fn predict(&self, bow: &[u32]) -> u8 {
        let mut scores = [0.0f64; 2];
        for class in 0..2 {
            let mut score = self.class_log_prior[class];
            for (idx, &count) in bow.iter().enumerate() {
                if count > 0 {
                    score += self.feature_log_prob[class][idx] * count as f64;
                }
            }
            scores[class] = score;
        }
        u8::from(scores[1] > scores[0])
    }
}

/// A fitted sentiment classifier of either kind, serializable as one file.
#[derive(Debug, Serialize, Deserialize)]
#[serde(tag = "kind")]
pub enum SentimentClassifier {
    Logistic(LogisticRegression),
    NaiveBayes(MultinomialNaiveBayes),
}

impl SentimentClassifier {
    pub fn predict(&self, bow: &[u32]) -> u8 {
        match self {
            SentimentClassifier::Logistic(model) => {
                let features: Vec<f64> = bow.iter().map(|&c| c as f64).collect();
                model.predict(&features)
            }
            SentimentClassifier::NaiveBayes(model) => model.predict(bow),
        }
    }

    pub fn save(&self, path: &str) -> std::io::Result<()> {
        let json = serde_json::to_string_pretty(self).map_err(std::io::Error::other)?;
        std::fs::write(path, json)?;
        Ok(())
    }

    pub fn load(path: &str) -> std::io::Result<Self> {
        let json = std::fs::read_to_string(path)?;
        serde_json::from_str(&json)
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // Tiny linearly separable set: feature 0 marks positive, feature 1 negative
    fn toy_counts() -> (Vec<Vec<u32>>, Vec<u8>) {
        let features = vec![
            vec![3, 0, 1],
            vec![2, 1, 0],
            vec![4, 0, 2],
            vec![0, 3, 1],
            vec![1, 2, 0],
            vec![0, 4, 2],
        ];
        let labels = vec![1, 1, 1, 0, 0, 0];
        (features, labels)
    }

    #[test]
    fn test_classifier_kind_parsing() {
        assert_eq!(
            ClassifierKind::from_name("logistic").unwrap(),
            ClassifierKind::Logistic
        );
        assert_eq!(
            ClassifierKind::from_name("naive-bayes").unwrap(),
            ClassifierKind::NaiveBayes
        );
        assert!(ClassifierKind::from_name("svm").is_err());
    }

    #[test]
    fn test_logistic_learns_separable_data() {
        let (counts, labels) = toy_counts();
        let features: Vec<Vec<f64>> = counts
            .iter()
            .map(|bow| bow.iter().map(|&c| c as f64).collect())
            .collect();

        let mut model = LogisticRegression::new(3, 0.5);
        model.train(&features, &labels, 200, 2, 42);

        for (x, &y) in features.iter().zip(labels.iter()) {
            assert_eq!(model.predict(x), y);
        }
    }

    #[test]
    fn test_logistic_training_is_deterministic() {
        let (counts, labels) = toy_counts();
        let features: Vec<Vec<f64>> = counts
            .iter()
            .map(|bow| bow.iter().map(|&c| c as f64).collect())
            .collect();

        let mut a = LogisticRegression::new(3, 0.5);
        a.train(&features, &labels, 50, 2, 42);
        let mut b = LogisticRegression::new(3, 0.5);
        b.train(&features, &labels, 50, 2, 42);
        assert_eq!(a.weights, b.weights);
        assert_eq!(a.bias, b.bias);
    }

    #[test]
    fn test_naive_bayes_learns_separable_data() {
        let (counts, labels) = toy_counts();
        let model = MultinomialNaiveBayes::fit(&counts, &labels);
        for (bow, &y) in counts.iter().zip(labels.iter()) {
            assert_eq!(model.predict(bow), y);
        }
    }

    #[test]
    fn test_classifier_roundtrip() {
        let (counts, labels) = toy_counts();
        let model = SentimentClassifier::NaiveBayes(MultinomialNaiveBayes::fit(&counts, &labels));

        let dir = std::env::temp_dir().join("sentilab_classifier_test");
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("clf.json");
        let path = path.to_str().unwrap();

        model.save(path).unwrap();
        let loaded = SentimentClassifier::load(path).unwrap();
        for bow in &counts {
            assert_eq!(model.predict(bow), loaded.predict(bow));
        }
    }
}
