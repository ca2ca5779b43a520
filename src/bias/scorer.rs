//! Fill-mask scoring with a pretrained masked language model.
//!
//! Wraps rust-bert's `BertForMaskedLM`: a sentence with a `[MASK]` slot is
//! run through the encoder and the vocabulary softmax at the mask position
//! is read out for a fixed set of target tokens.

use std::error::Error;

use super::score::TargetScore;

#[cfg(feature = "bert")]
use rust_bert::bert::{
    BertConfig, BertConfigResources, BertForMaskedLM, BertModelResources, BertVocabResources,
};
#[cfg(feature = "bert")]
use rust_bert::resources::{RemoteResource, ResourceProvider};
#[cfg(feature = "bert")]
use rust_bert::Config;
#[cfg(feature = "bert")]
use rust_tokenizers::tokenizer::{BertTokenizer, Tokenizer, TruncationStrategy};
#[cfg(feature = "bert")]
use rust_tokenizers::vocab::Vocab;
#[cfg(feature = "bert")]
use tch::{nn, Device, Kind, Tensor};

#[cfg(feature = "bert")]
pub struct FillMaskScorer {
    device: Device,
    tokenizer: BertTokenizer,
    model: BertForMaskedLM,
    mask_token_id: i64,
    max_seq_len: usize,
}

#[cfg(feature = "bert")]
impl FillMaskScorer {
    /// Load the pretrained masked LM, downloading resources on first run.
    pub fn new() -> Result<Self, Box<dyn Error>> {
        println!("Loading pretrained BERT masked LM (rust-bert resources)...");
        let config_resource = RemoteResource::from_pretrained(BertConfigResources::BERT);
        let vocab_resource = RemoteResource::from_pretrained(BertVocabResources::BERT);
        let weights_resource = RemoteResource::from_pretrained(BertModelResources::BERT);
        let config_path = config_resource.get_local_path()?;
        let vocab_path = vocab_resource.get_local_path()?;
        let weights_path = weights_resource.get_local_path()?;

        let device = Device::cuda_if_available();
        println!("  Device: {:?}", device);

        let tokenizer = BertTokenizer::from_file(
            vocab_path.to_str().ok_or("Invalid vocab path")?,
            true,
            true,
        )?;
        let mask_token_id = tokenizer.vocab().token_to_id("[MASK]");

        let config = BertConfig::from_file(config_path);
        let mut vs = nn::VarStore::new(device);
        let model = BertForMaskedLM::new(vs.root(), &config);
        vs.load(weights_path)?;

        println!("  ✓ Masked LM ready\n");

        Ok(FillMaskScorer {
            device,
            tokenizer,
            model,
            mask_token_id,
            max_seq_len: 128,
        })
    }

    /// Wordpiece id used to score a target word; multi-piece targets fall
    /// back to their first piece, the fill-mask pipeline convention.
    fn target_token_id(&self, target: &str) -> Result<i64, Box<dyn Error>> {
        let pieces = self.tokenizer.tokenize(target);
        let first = pieces
            .first()
            .ok_or_else(|| format!("Target tokenizes to nothing: {}", target))?;
        Ok(self.tokenizer.vocab().token_to_id(first))
    }

    /// Probability of each target at the sentence's `mask_index`-th mask.
    ///
    /// Returns one [`TargetScore`] per target, sorted by token string. A
    /// sentence without enough `[MASK]` slots is an error.
    pub fn score_targets(
        &self,
        sentence: &str,
        targets: &[String],
        mask_index: usize,
    ) -> Result<Vec<TargetScore>, Box<dyn Error>> {
        let tokenized = self.tokenizer.encode(
            sentence,
            None,
            self.max_seq_len,
            &TruncationStrategy::LongestFirst,
            0,
        );

        let mask_positions: Vec<usize> = tokenized
            .token_ids
            .iter()
            .enumerate()
            .filter(|(_, &id)| id == self.mask_token_id)
            .map(|(pos, _)| pos)
            .collect();
        let mask_position = *mask_positions.get(mask_index).ok_or_else(|| {
            format!(
                "Sentence has {} [MASK] slot(s), need index {}: {}",
                mask_positions.len(),
                mask_index,
                sentence
            )
        })?;

        let input_tensor = Tensor::from_slice(&tokenized.token_ids)
            .view([1, tokenized.token_ids.len() as i64])
            .to(self.device);

        let probs = tch::no_grad(|| {
            let output = self.model.forward_t(
                Some(&input_tensor),
                None,
                None,
                None,
                None,
                None,
                None,
                false,
            );
            output
                .prediction_scores
                .select(0, 0)
                .select(0, mask_position as i64)
                .softmax(-1, Kind::Float)
        });

        let mut scores = Vec::with_capacity(targets.len());
        for target in targets {
            let token_id = self.target_token_id(target)?;
            scores.push(TargetScore {
                token_id,
                token: target.clone(),
                score: probs.double_value(&[token_id]),
            });
        }
        scores.sort_by(|a, b| a.token.cmp(&b.token));

        Ok(scores)
    }
}

// Fallback for non-BERT builds
#[cfg(not(feature = "bert"))]
pub struct FillMaskScorer;

#[cfg(not(feature = "bert"))]
impl FillMaskScorer {
    pub fn new() -> Result<Self, Box<dyn Error>> {
        Err("BERT not enabled. Compile with: cargo build --features bert".into())
    }

    pub fn score_targets(
        &self,
        _sentence: &str,
        _targets: &[String],
        _mask_index: usize,
    ) -> Result<Vec<TargetScore>, Box<dyn Error>> {
        Err("BERT not enabled".into())
    }
}
