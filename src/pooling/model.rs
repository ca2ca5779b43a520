//! Pretrained BERT encoder with a swappable pooling head and linear
//! classifier.
//!
//! The encoder weights come from the rust-bert pretrained BERT resources;
//! the pooling head and classifier start freshly initialized and are
//! trained here. Without the `bert` feature this module compiles to a stub
//! that explains how to rebuild.

use std::error::Error;

use super::poolers::PoolingStrategy;

#[cfg(feature = "bert")]
use rand::rngs::StdRng;
#[cfg(feature = "bert")]
use rand::seq::SliceRandom;
#[cfg(feature = "bert")]
use rand::SeedableRng;
#[cfg(feature = "bert")]
use rust_bert::bert::{
    BertConfig, BertConfigResources, BertEmbeddings, BertModel, BertModelResources,
    BertVocabResources,
};
#[cfg(feature = "bert")]
use rust_bert::resources::{RemoteResource, ResourceProvider};
#[cfg(feature = "bert")]
use rust_bert::Config;
#[cfg(feature = "bert")]
use rust_tokenizers::tokenizer::{BertTokenizer, Tokenizer, TruncationStrategy};
#[cfg(feature = "bert")]
use tch::{nn, nn::OptimizerConfig, Device, Kind, Tensor};

#[cfg(feature = "bert")]
use super::poolers::Pooler;

/// BERT encoder + pooling head + linear classification head.
#[cfg(feature = "bert")]
pub struct PooledBertClassifier {
    device: Device,
    vs: nn::VarStore,
    tokenizer: BertTokenizer,
    bert: BertModel<BertEmbeddings>,
    pooler: Pooler,
    classifier: nn::Linear,
    dropout_prob: f64,
    max_seq_len: usize,
    strategy: PoolingStrategy,
}

#[cfg(feature = "bert")]
impl PooledBertClassifier {
    /// Build the model and load pretrained encoder weights.
    ///
    /// Downloads the BERT resources on first run via rust-bert's cache.
    /// Pooling head and classifier variables are not present in the
    /// pretrained file and keep their fresh initialization.
    pub fn new(
        strategy: PoolingStrategy,
        top_k: i64,
        num_labels: i64,
        max_seq_len: usize,
    ) -> Result<Self, Box<dyn Error>> {
        println!("Loading pretrained BERT (rust-bert resources)...");
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
        let config = BertConfig::from_file(config_path);

        let mut vs = nn::VarStore::new(device);
        let root = vs.root();
        let bert = BertModel::<BertEmbeddings>::new(&root / "bert", &config);
        let pooler = Pooler::new(&(&root / "pooler"), strategy, config.hidden_size, top_k);
        let classifier = nn::linear(
            &root / "classifier",
            config.hidden_size,
            num_labels,
            Default::default(),
        );

        // Encoder weights only; pooler/classifier names are absent from the
        // pretrained file
        vs.load_partial(weights_path)?;

        println!("  ✓ BERT ready ({} pooling)\n", strategy.name());

        Ok(PooledBertClassifier {
            device,
            vs,
            tokenizer,
            bert,
            pooler,
            classifier,
            dropout_prob: config.hidden_dropout_prob,
            max_seq_len,
            strategy,
        })
    }

    pub fn strategy(&self) -> PoolingStrategy {
        self.strategy
    }

    /// Wordpiece-encode a batch of texts into padded id and attention mask
    /// tensors.
    fn encode_batch(&self, texts: &[&str]) -> (Tensor, Tensor) {
        let tokenized: Vec<_> = texts
            .iter()
            .map(|text| {
                self.tokenizer
                    .encode(text, None, self.max_seq_len, &TruncationStrategy::LongestFirst, 0)
            })
            .collect();
        let max_len = tokenized
            .iter()
            .map(|t| t.token_ids.len())
            .max()
            .unwrap_or(1);

        let mut ids = Vec::with_capacity(texts.len() * max_len);
        let mut mask = Vec::with_capacity(texts.len() * max_len);
        for t in &tokenized {
            ids.extend_from_slice(&t.token_ids);
            mask.extend(std::iter::repeat(1i64).take(t.token_ids.len()));
            let padding = max_len - t.token_ids.len();
            ids.extend(std::iter::repeat(0i64).take(padding));
            mask.extend(std::iter::repeat(0i64).take(padding));
        }

        let shape = [texts.len() as i64, max_len as i64];
        (
            Tensor::from_slice(&ids).view(shape).to(self.device),
            Tensor::from_slice(&mask).view(shape).to(self.device),
        )
    }

    /// Forward pass to classification logits.
    fn forward_t(
        &self,
        input_ids: &Tensor,
        attention_mask: &Tensor,
        train: bool,
    ) -> Result<Tensor, Box<dyn Error>> {
        let encoder_output = self.bert.forward_t(
            Some(input_ids),
            Some(attention_mask),
            None,
            None,
            None,
            None,
            None,
            train,
        )?;
        let pooled = self.pooler.forward(&encoder_output.hidden_state);
        let logits = pooled
            .dropout(self.dropout_prob, train)
            .apply(&self.classifier);
        Ok(logits)
    }

    /// Fine-tune encoder, pooling head, and classifier end to end.
    pub fn train(
        &mut self,
        texts: &[String],
        labels: &[u8],
        epochs: usize,
        batch_size: usize,
        learning_rate: f64,
        seed: u64,
    ) -> Result<(), Box<dyn Error>> {
        let mut opt = nn::Adam::default().build(&self.vs, learning_rate)?;
        let n_samples = texts.len();
        let mut rng = StdRng::seed_from_u64(seed);
        let mut indices: Vec<usize> = (0..n_samples).collect();

        println!(
            "Fine-tuning ({} pooling): {} epochs, batch size {}",
            self.strategy.name(),
            epochs,
            batch_size
        );

        for epoch in 0..epochs {
            indices.shuffle(&mut rng);
            let mut total_loss = 0.0;
            let mut correct = 0i64;
            let mut batches = 0;

            for batch in indices.chunks(batch_size) {
                let batch_texts: Vec<&str> = batch.iter().map(|&i| texts[i].as_str()).collect();
                let batch_labels: Vec<i64> = batch.iter().map(|&i| labels[i] as i64).collect();

                let (input_ids, attention_mask) = self.encode_batch(&batch_texts);
                let targets = Tensor::from_slice(&batch_labels).to(self.device);

                let logits = self.forward_t(&input_ids, &attention_mask, true)?;
                let loss = logits.cross_entropy_for_logits(&targets);
                opt.backward_step(&loss);

                total_loss += f64::try_from(&loss)?;
                let predictions = logits.argmax(-1, false);
                correct += i64::try_from(predictions.eq_tensor(&targets).sum(Kind::Int64))?;
                batches += 1;
            }

            println!(
                "  Epoch {}/{}: Loss={:.4}, Acc={:.2}%",
                epoch + 1,
                epochs,
                total_loss / batches as f64,
                correct as f64 / n_samples as f64 * 100.0
            );
        }

        println!("Training complete!");
        Ok(())
    }

    /// Predict labels for a batch of texts.
    pub fn predict_batch(
        &self,
        texts: &[String],
        batch_size: usize,
    ) -> Result<Vec<u8>, Box<dyn Error>> {
        let mut predictions = Vec::with_capacity(texts.len());
        for chunk in texts.chunks(batch_size) {
            let batch_texts: Vec<&str> = chunk.iter().map(|t| t.as_str()).collect();
            let (input_ids, attention_mask) = self.encode_batch(&batch_texts);
            let preds = tch::no_grad(|| -> Result<Vec<i64>, Box<dyn Error>> {
                let logits = self.forward_t(&input_ids, &attention_mask, false)?;
                Ok(Vec::<i64>::try_from(logits.argmax(-1, false))?)
            })?;
            predictions.extend(preds.into_iter().map(|p| p as u8));
        }
        Ok(predictions)
    }

    /// Pooled representation per input, one hidden-size vector each.
    pub fn encode(
        &self,
        texts: &[String],
        batch_size: usize,
    ) -> Result<Vec<Vec<f64>>, Box<dyn Error>> {
        let mut pooled_vectors = Vec::with_capacity(texts.len());
        for chunk in texts.chunks(batch_size) {
            let batch_texts: Vec<&str> = chunk.iter().map(|t| t.as_str()).collect();
            let (input_ids, attention_mask) = self.encode_batch(&batch_texts);
            let pooled = tch::no_grad(|| -> Result<Tensor, Box<dyn Error>> {
                let encoder_output = self.bert.forward_t(
                    Some(&input_ids),
                    Some(&attention_mask),
                    None,
                    None,
                    None,
                    None,
                    None,
                    false,
                )?;
                Ok(self.pooler.forward(&encoder_output.hidden_state))
            })?;
            for i in 0..chunk.len() as i64 {
                let row = pooled.get(i).to_kind(Kind::Double);
                pooled_vectors.push(Vec::<f64>::try_from(&row)?);
            }
        }
        Ok(pooled_vectors)
    }

    /// Save all weights (encoder + pooling head + classifier).
    pub fn save(&self, path: &str) -> Result<(), Box<dyn Error>> {
        self.vs.save(path)?;
        println!("  ✓ Weights saved to {}", path);
        Ok(())
    }

    /// Rebuild the model structure and load fine-tuned weights.
    ///
    /// The strategy must match the one the weights were saved with; a
    /// mismatch fails on tensor-name or shape mismatch during load.
    pub fn load(
        path: &str,
        strategy: PoolingStrategy,
        top_k: i64,
        num_labels: i64,
        max_seq_len: usize,
    ) -> Result<Self, Box<dyn Error>> {
        let mut model = Self::new(strategy, top_k, num_labels, max_seq_len)?;
        model.vs.load(path)?;
        Ok(model)
    }
}

// Fallback for non-BERT builds
#[cfg(not(feature = "bert"))]
pub struct PooledBertClassifier;

#[cfg(not(feature = "bert"))]
impl PooledBertClassifier {
    pub fn new(
        _strategy: PoolingStrategy,
        _top_k: i64,
        _num_labels: i64,
        _max_seq_len: usize,
    ) -> Result<Self, Box<dyn Error>> {
        Err("BERT not enabled. Compile with: cargo build --features bert".into())
    }

    pub fn train(
        &mut self,
        _texts: &[String],
        _labels: &[u8],
        _epochs: usize,
        _batch_size: usize,
        _learning_rate: f64,
        _seed: u64,
    ) -> Result<(), Box<dyn Error>> {
        Err("BERT not enabled".into())
    }

    pub fn predict_batch(
        &self,
        _texts: &[String],
        _batch_size: usize,
    ) -> Result<Vec<u8>, Box<dyn Error>> {
        Err("BERT not enabled".into())
    }

    pub fn encode(
        &self,
        _texts: &[String],
        _batch_size: usize,
    ) -> Result<Vec<Vec<f64>>, Box<dyn Error>> {
        Err("BERT not enabled".into())
    }

    pub fn save(&self, _path: &str) -> Result<(), Box<dyn Error>> {
        Err("BERT not enabled".into())
    }
}
