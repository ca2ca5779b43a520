//! Bias measurement driver: templates × attributes × targets.
//!
//! Model outputs for some target/attribute combinations may be offensive
//! or upsetting; everything printed here is model behavior under
//! measurement, not an endorsement.

use super::resources::{fill_template, load_lines, prior_target_mask_index, MASK_TOKEN};
use super::score::{
    corpus_score, log_variance, normalize_against_prior, PairVariance, TemplateAccumulator,
};
use super::scorer::FillMaskScorer;
use crate::config::Config;
use std::error::Error;
use std::time::Instant;

/// Target nationalities whose mask probabilities are compared.
pub const TARGETS: &[&str] = &[
    "America",
    "Canada",
    "Japan",
    "China",
    "Korea",
    "England",
    "France",
    "Germany",
    "Mexico",
    "Iraq",
    "Ireland",
    "Iran",
    "Saudi",
    "Russia",
    "Vietnam",
    "Thailand",
    "Australia",
    "Spain",
    "Turkey",
    "Israel",
    "Italy",
    "Egypt",
    "Somalia",
    "India",
    "Brazil",
    "Colombia",
    "Greece",
    "Afghanistan",
    "Cuba",
    "Syria",
];

/// Command-line overrides applied on top of `config.toml`.
#[derive(Debug, Default)]
pub struct BiasOverrides {
    pub top_report: Option<usize>,
}

/// Measure fill-mask bias over all (template, attribute) pairs and print
/// per-template diagnostics plus the corpus-level score.
pub fn measure_bias(overrides: &BiasOverrides) -> Result<(), Box<dyn Error>> {
    let mut config = Config::load_or_default();
    if let Some(top_report) = overrides.top_report {
        config.bias.top_report = top_report;
    }

    println!("=== Ethnic Bias in Language Models ===\n");

    let attributes = load_lines(&config.bias.attributes_path)?;
    let templates = load_lines(&config.bias.templates_path)?;
    let targets: Vec<String> = TARGETS.iter().map(|t| t.to_string()).collect();

    println!(
        "Templates: {} | Attributes: {} | Targets: {}\n",
        templates.len(),
        attributes.len(),
        targets.len()
    );

    let scorer = FillMaskScorer::new()?;
    let start = Instant::now();

    let mut variance_sum = 0.0;
    let mut pair_variances: Vec<Vec<PairVariance>> = Vec::with_capacity(templates.len());

    for (template_idx, template) in templates.iter().enumerate() {
        println!(
            "--- Template {}/{}: {}",
            template_idx + 1,
            templates.len(),
            template
        );

        // Prior: both slots masked; score the [TTT] slot
        let prior_sentence = fill_template(template, MASK_TOKEN);
        let prior_scores =
            scorer.score_targets(&prior_sentence, &targets, prior_target_mask_index(template))?;

        let mut accumulator = TemplateAccumulator::new();
        let mut template_pairs = Vec::with_capacity(attributes.len());

        for attribute in &attributes {
            let target_sentence = fill_template(template, attribute);
            let target_scores = scorer.score_targets(&target_sentence, &targets, 0)?;

            let norm_probs = normalize_against_prior(&target_scores, &prior_scores);
            accumulator.add(&norm_probs);

            let variance = log_variance(&norm_probs);
            variance_sum += variance;
            template_pairs.push(PairVariance {
                sentence: target_sentence,
                variance,
            });
        }

        println!("\n[Average normalized probability per target]");
        for (token, sum) in accumulator.ranked().iter().take(config.bias.top_report) {
            println!("  {:<14} {:.4}", token, sum / attributes.len() as f64);
        }

        template_pairs.sort_by(|a, b| {
            b.variance
                .partial_cmp(&a.variance)
                .unwrap_or(std::cmp::Ordering::Equal)
        });
        println!("\n[Highest-variance attributes]");
        for pair in template_pairs.iter().take(config.bias.top_report.min(3)) {
            println!("  {:.4}  {}", pair.variance, pair.sentence);
        }
        println!();

        pair_variances.push(template_pairs);
    }

    // Overall worst offenders across every template
    let mut all_pairs: Vec<&PairVariance> = pair_variances.iter().flatten().collect();
    all_pairs.sort_by(|a, b| {
        b.variance
            .partial_cmp(&a.variance)
            .unwrap_or(std::cmp::Ordering::Equal)
    });
    println!("===================================================================\n");
    println!("[Highest-variance pairs overall]");
    for pair in all_pairs.iter().take(config.bias.top_report) {
        println!("  {:.4}  {}", pair.variance, pair.sentence);
    }

    let cb_score = corpus_score(variance_sum, templates.len(), attributes.len());
    println!("\ncb_score: {:.6}", cb_score);
    println!("Time: {:.2}s", start.elapsed().as_secs_f64());

    Ok(())
}
