//! Bag-of-words vocabulary and count-vector encoding.
//!
//! The vocabulary maps each distinct token to a dense index in
//! first-seen order. It is built once from the training stream and then
//! frozen: validation and test encoding reuse it unchanged, and tokens
//! outside it are ignored.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Token-to-index mapping, frozen after construction.
#[derive(Debug, Serialize, Deserialize)]
pub struct Vocabulary {
    /// Token string to dense index
    pub index: HashMap<String, usize>,
}

impl Vocabulary {
    /// Build a vocabulary from tokenized documents in first-seen order.
    pub fn build(tokenized: &[Vec<String>]) -> Self {
        let mut index = HashMap::new();
        for tokens in tokenized {
            for token in tokens {
                if !index.contains_key(token) {
                    let next = index.len();
                    index.insert(token.clone(), next);
                }
            }
        }
        Vocabulary { index }
    }

    /// Number of distinct tokens.
    pub fn len(&self) -> usize {
        self.index.len()
    }

    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }

    /// Encode one token list as a count vector of length `self.len()`.
    ///
    /// Unknown tokens are ignored; the same tokens always produce the same
    /// vector for a given vocabulary.
    pub fn encode(&self, tokens: &[String]) -> Vec<u32> {
        let mut bow = vec![0u32; self.index.len()];
        for token in tokens {
            if let Some(&idx) = self.index.get(token) {
                bow[idx] += 1;
            }
        }
        bow
    }

    /// Encode a batch of token lists.
    pub fn encode_all(&self, tokenized: &[Vec<String>]) -> Vec<Vec<u32>> {
        tokenized.iter().map(|tokens| self.encode(tokens)).collect()
    }

    /// Save the vocabulary to a JSON file.
    pub fn save(&self, path: &str) -> std::io::Result<()> {
        let json = serde_json::to_string_pretty(self).map_err(std::io::Error::other)?;
        std::fs::write(path, json)?;
        Ok(())
    }

    /// Load a vocabulary from a JSON file.
    pub fn load(path: &str) -> std::io::Result<Self> {
        let json = std::fs::read_to_string(path)?;
        let vocab = serde_json::from_str(&json)
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e))?;
        Ok(vocab)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn docs(lists: &[&[&str]]) -> Vec<Vec<String>> {
        lists
            .iter()
            .map(|l| l.iter().map(|s| s.to_string()).collect())
            .collect()
    }

    #[test]
    fn test_vocab_size_is_distinct_token_count() {
        let tokenized = docs(&[&["a", "b", "a"], &["b", "c"]]);
        let vocab = Vocabulary::build(&tokenized);
        assert_eq!(vocab.len(), 3);
    }

    #[test]
    fn test_first_seen_order() {
        let tokenized = docs(&[&["i", "like"], &["like", "apples"]]);
        let vocab = Vocabulary::build(&tokenized);
        assert_eq!(vocab.index["i"], 0);
        assert_eq!(vocab.index["like"], 1);
        assert_eq!(vocab.index["apples"], 2);
    }

    #[test]
    fn test_encode_counts() {
        let tokenized = docs(&[&["a", "b", "a"]]);
        let vocab = Vocabulary::build(&tokenized);
        assert_eq!(vocab.encode(&tokenized[0]), vec![2, 1]);
    }

    #[test]
    fn test_encode_is_deterministic() {
        let tokenized = docs(&[&["a", "b", "c", "b"]]);
        let vocab = Vocabulary::build(&tokenized);
        assert_eq!(vocab.encode(&tokenized[0]), vocab.encode(&tokenized[0]));
    }

    #[test]
    fn test_unknown_tokens_ignored() {
        let train = docs(&[&["a", "b"]]);
        let vocab = Vocabulary::build(&train);
        let unseen = docs(&[&["a", "z", "z"]]);
        assert_eq!(vocab.encode(&unseen[0]), vec![1, 0]);
    }

    #[test]
    fn test_vector_length_matches_vocab() {
        let train = docs(&[&["a", "b", "c"]]);
        let vocab = Vocabulary::build(&train);
        assert_eq!(vocab.encode(&[]).len(), vocab.len());
    }
}
