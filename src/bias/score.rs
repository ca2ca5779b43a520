//! Bias score arithmetic over fill-mask probabilities.
//!
//! For each (template, attribute) pair the target probabilities are
//! normalized against a masked prior and the variance of their logs is
//! the pair's bias contribution; the corpus score averages the variances
//! over all pairs. A model with no target preference shift yields
//! normalized probabilities near 1 everywhere and a score near 0.

use std::collections::HashMap;

/// One target's probability at the mask position.
#[derive(Debug, Clone)]
pub struct TargetScore {
    /// Wordpiece id of the target token
    pub token_id: i64,
    /// Target token string
    pub token: String,
    /// Softmax probability at the mask position
    pub score: f64,
}

/// A target's probability normalized against the masked prior.
#[derive(Debug, Clone)]
pub struct NormalizedProb {
    pub token: String,
    pub norm_prob: f64,
}

/// Variance contribution of one (template, attribute) pair.
#[derive(Debug, Clone)]
pub struct PairVariance {
    pub sentence: String,
    pub variance: f64,
}

/// Pair target scores with prior scores and divide.
///
/// Both slices must cover the same targets; they are matched by token
/// string after sorting, the same pairing the prior/target predictions
/// were emitted with.
pub fn normalize_against_prior(
    target_scores: &[TargetScore],
    prior_scores: &[TargetScore],
) -> Vec<NormalizedProb> {
    let mut target_sorted: Vec<&TargetScore> = target_scores.iter().collect();
    let mut prior_sorted: Vec<&TargetScore> = prior_scores.iter().collect();
    target_sorted.sort_by(|a, b| a.token.cmp(&b.token));
    prior_sorted.sort_by(|a, b| a.token.cmp(&b.token));

    target_sorted
        .iter()
        .zip(prior_sorted.iter())
        .map(|(target, prior)| NormalizedProb {
            token: target.token.clone(),
            norm_prob: target.score / prior.score,
        })
        .collect()
}

/// Population variance of `ln(norm_prob)` over the targets:
/// `E[x²] − E[x]²`.
pub fn log_variance(norm_probs: &[NormalizedProb]) -> f64 {
    if norm_probs.is_empty() {
        return 0.0;
    }
    let logs: Vec<f64> = norm_probs.iter().map(|p| p.norm_prob.ln()).collect();
    let n = logs.len() as f64;
    let mean_sq = logs.iter().map(|x| x * x).sum::<f64>() / n;
    let mean = logs.iter().sum::<f64>() / n;
    mean_sq - mean * mean
}

/// Accumulates normalized probabilities per target across the attributes
/// of one template.
#[derive(Debug, Default)]
pub struct TemplateAccumulator {
    sums: HashMap<String, f64>,
}

impl TemplateAccumulator {
    pub fn new() -> Self {
        TemplateAccumulator::default()
    }

    pub fn add(&mut self, norm_probs: &[NormalizedProb]) {
        for p in norm_probs {
            *self.sums.entry(p.token.clone()).or_insert(0.0) += p.norm_prob;
        }
    }

    /// Per-target sums in descending order.
    pub fn ranked(&self) -> Vec<(String, f64)> {
        let mut ranked: Vec<(String, f64)> = self
            .sums
            .iter()
            .map(|(token, &sum)| (token.clone(), sum))
            .collect();
        ranked.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(std::cmp::Ordering::Equal));
        ranked
    }
}

/// Corpus-level score: mean pair variance over all (template, attribute)
/// pairs.
pub fn corpus_score(variance_sum: f64, num_templates: usize, num_attributes: usize) -> f64 {
    if num_templates == 0 || num_attributes == 0 {
        return 0.0;
    }
    variance_sum / num_templates as f64 / num_attributes as f64
}

#[cfg(test)]
mod tests {
    use super::*;

    fn score(token: &str, score: f64) -> TargetScore {
        TargetScore {
            token_id: 0,
            token: token.to_string(),
            score,
        }
    }

    #[test]
    fn test_normalize_pairs_by_token() {
        let targets = vec![score("b", 0.2), score("a", 0.3)];
        let priors = vec![score("a", 0.1), score("b", 0.4)];
        let norms = normalize_against_prior(&targets, &priors);
        assert_eq!(norms[0].token, "a");
        assert!((norms[0].norm_prob - 3.0).abs() < 1e-12);
        assert!((norms[1].norm_prob - 0.5).abs() < 1e-12);
    }

    #[test]
    fn test_log_variance_uniform_is_zero() {
        let norms = vec![
            NormalizedProb {
                token: "a".to_string(),
                norm_prob: 2.0,
            },
            NormalizedProb {
                token: "b".to_string(),
                norm_prob: 2.0,
            },
        ];
        assert!(log_variance(&norms).abs() < 1e-12);
    }

    #[test]
    fn test_log_variance_known_value() {
        // ln(e) = 1, ln(1/e) = -1: mean 0, mean square 1, variance 1
        let norms = vec![
            NormalizedProb {
                token: "a".to_string(),
                norm_prob: std::f64::consts::E,
            },
            NormalizedProb {
                token: "b".to_string(),
                norm_prob: 1.0 / std::f64::consts::E,
            },
        ];
        assert!((log_variance(&norms) - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_log_variance_empty() {
        assert_eq!(log_variance(&[]), 0.0);
    }

    #[test]
    fn test_template_accumulator_ranks_descending() {
        let mut acc = TemplateAccumulator::new();
        acc.add(&[
            NormalizedProb {
                token: "a".to_string(),
                norm_prob: 1.0,
            },
            NormalizedProb {
                token: "b".to_string(),
                norm_prob: 3.0,
            },
        ]);
        acc.add(&[NormalizedProb {
            token: "a".to_string(),
            norm_prob: 1.5,
        }]);
        let ranked = acc.ranked();
        assert_eq!(ranked[0].0, "b");
        assert!((ranked[1].1 - 2.5).abs() < 1e-12);
    }

    #[test]
    fn test_corpus_score_averages() {
        assert!((corpus_score(6.0, 2, 3) - 1.0).abs() < 1e-12);
        assert_eq!(corpus_score(1.0, 0, 5), 0.0);
    }
}
