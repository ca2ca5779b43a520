//! Configuration structures shared by the three experiments.
//!
//! Strongly-typed configuration loaded from `config.toml`. Each experiment
//! reads its own section; `[data]` and `[output]` are shared. Command-line
//! flags override individual values after loading.

use serde::Deserialize;
use std::error::Error;

/// Main configuration structure loaded from `config.toml`.
#[derive(Debug, Deserialize)]
pub struct Config {
    /// Dataset loading and splitting
    pub data: DataConfig,
    /// Bag-of-words classifier settings
    pub bow: BowConfig,
    /// BERT pooling experiment settings
    pub pooling: PoolingConfig,
    /// Fill-mask bias measurement settings
    pub bias: BiasConfig,
    /// Output paths
    pub output: OutputConfig,
}

/// Dataset loading configuration.
#[derive(Debug, Deserialize)]
pub struct DataConfig {
    /// Path to the review CSV file
    pub csv_path: String,
    /// Number of samples kept after shuffling
    pub num_samples: usize,
    /// Train/validation split ratio (e.g., 0.8 = 80% train)
    pub train_split: f64,
    /// Fixed shuffle seed for reproducible splits
    pub shuffle_seed: u64,
}

/// Bag-of-words classifier configuration.
#[derive(Debug, Deserialize)]
pub struct BowConfig {
    /// N-gram size (1 = unigrams, 2 = bigrams, ...)
    pub n_gram: usize,
    /// Classifier kind: "logistic" or "naive_bayes"
    pub classifier: String,
    /// Learning rate for logistic regression SGD
    pub learning_rate: f64,
    /// Number of training epochs
    pub epochs: usize,
    /// Mini-batch size
    pub batch_size: usize,
}

/// BERT pooling experiment configuration.
#[derive(Debug, Deserialize)]
pub struct PoolingConfig {
    /// Pooling strategy name (CLS, MEAN_MAX, TOPK_MEAN, ...)
    pub strategy: String,
    /// k for the top-k pooling variants
    pub top_k: i64,
    /// Maximum wordpiece sequence length
    pub max_seq_len: usize,
    /// Number of output labels
    pub num_labels: i64,
    /// Learning rate for Adam
    pub learning_rate: f64,
    /// Number of fine-tuning epochs
    pub epochs: usize,
    /// Mini-batch size
    pub batch_size: usize,
}

/// Fill-mask bias measurement configuration.
#[derive(Debug, Deserialize)]
pub struct BiasConfig {
    /// Attribute list, one per line
    pub attributes_path: String,
    /// Template list, one per line
    pub templates_path: String,
    /// How many entries to print in ranked diagnostic tables
    pub top_report: usize,
}

/// Output paths configuration.
#[derive(Debug, Deserialize)]
pub struct OutputConfig {
    /// Directory for saved model files
    pub model_dir: String,
    /// Bag-of-words vocabulary filename
    pub vocab_file: String,
    /// Bag-of-words classifier filename
    pub classifier_file: String,
    /// Pooled BERT weights filename
    pub pooling_weights_file: String,
}

impl Config {
    /// Load configuration from a TOML file.
    pub fn load(path: &str) -> Result<Self, Box<dyn Error>> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        Ok(config)
    }

    /// Load `config.toml`, falling back to defaults with a warning.
    pub fn load_or_default() -> Self {
        Config::load("config.toml").unwrap_or_else(|e| {
            eprintln!("Warning: Could not load config.toml: {}", e);
            eprintln!("Using default configuration\n");
            Config::default()
        })
    }
}

impl Default for Config {
    /// Default configuration if `config.toml` is not available.
    fn default() -> Self {
        Config {
            data: DataConfig {
                csv_path: "data/review_5k.csv".to_string(),
                num_samples: 5000,
                train_split: 0.8,
                shuffle_seed: 42,
            },
            bow: BowConfig {
                n_gram: 1,
                classifier: "logistic".to_string(),
                learning_rate: 0.1,
                epochs: 30,
                batch_size: 64,
            },
            pooling: PoolingConfig {
                strategy: "CLS".to_string(),
                top_k: 20,
                max_seq_len: 128,
                num_labels: 2,
                learning_rate: 2e-5,
                epochs: 2,
                batch_size: 16,
            },
            bias: BiasConfig {
                attributes_path: "data/occ_en.txt".to_string(),
                templates_path: "data/templates_en.txt".to_string(),
                top_report: 10,
            },
            output: OutputConfig {
                model_dir: "models".to_string(),
                vocab_file: "bow_vocabulary.json".to_string(),
                classifier_file: "bow_classifier.json".to_string(),
                pooling_weights_file: "pooled_bert.pt".to_string(),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.bow.n_gram, 1);
        assert_eq!(config.data.shuffle_seed, 42);
        assert_eq!(config.pooling.strategy, "CLS");
    }

    #[test]
    fn test_parse_toml() {
        let toml_str = r#"
            [data]
            csv_path = "data/review_5k.csv"
            num_samples = 1000
            train_split = 0.9
            shuffle_seed = 7

            [bow]
            n_gram = 2
            classifier = "naive_bayes"
            learning_rate = 0.05
            epochs = 10
            batch_size = 32

            [pooling]
            strategy = "MEAN_MAX"
            top_k = 10
            max_seq_len = 64
            num_labels = 2
            learning_rate = 1e-5
            epochs = 1
            batch_size = 8

            [bias]
            attributes_path = "data/occ_en.txt"
            templates_path = "data/templates_en.txt"
            top_report = 5

            [output]
            model_dir = "models"
            vocab_file = "v.json"
            classifier_file = "c.json"
            pooling_weights_file = "p.pt"
        "#;
        let config: Config = toml::from_str(toml_str).unwrap();
        assert_eq!(config.bow.n_gram, 2);
        assert_eq!(config.data.num_samples, 1000);
        assert_eq!(config.pooling.strategy, "MEAN_MAX");
    }
}
