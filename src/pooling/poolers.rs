//! Pooling strategies over the encoder's last hidden states.
//!
//! Every pooler reduces `[batch, seq, hidden]` to `[batch, hidden]` and
//! finishes with the standard dense + tanh projection, so the classifier
//! head downstream never cares which strategy produced its input.

use std::error::Error;

#[cfg(feature = "bert")]
use tch::{nn, Kind, Tensor};

/// Pooling strategy selection, parsed from config or command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PoolingStrategy {
    /// First-token ([CLS]) pooling, the stock BERT pooler
    Cls,
    /// Concatenated mean and per-dimension max over tokens
    MeanMax,
    /// Mean of the per-dimension top-k token activations
    TopKMean,
    /// Top-k mean with k = seq_len / 2
    TopHalfMean,
    /// Concatenated mean and [CLS] token
    MeanCls,
    /// Concatenated top-k mean and [CLS] token
    TopKMeanCls,
}

impl PoolingStrategy {
    /// Parse a strategy name. Unknown names are a hard error.
    pub fn from_name(name: &str) -> Result<Self, Box<dyn Error>> {
        match name {
            "CLS" => Ok(PoolingStrategy::Cls),
            "MEAN_MAX" => Ok(PoolingStrategy::MeanMax),
            "TOPK_MEAN" => Ok(PoolingStrategy::TopKMean),
            "TOPHALF_MEAN" => Ok(PoolingStrategy::TopHalfMean),
            "MEAN_CLS" => Ok(PoolingStrategy::MeanCls),
            "TOPK_MEAN_CLS" => Ok(PoolingStrategy::TopKMeanCls),
            other => Err(format!("Wrong pooling strategy: {}", other).into()),
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            PoolingStrategy::Cls => "CLS",
            PoolingStrategy::MeanMax => "MEAN_MAX",
            PoolingStrategy::TopKMean => "TOPK_MEAN",
            PoolingStrategy::TopHalfMean => "TOPHALF_MEAN",
            PoolingStrategy::MeanCls => "MEAN_CLS",
            PoolingStrategy::TopKMeanCls => "TOPK_MEAN_CLS",
        }
    }

    /// Whether the dense projection sees a doubled feature width.
    pub fn concatenates(&self) -> bool {
        matches!(
            self,
            PoolingStrategy::MeanMax | PoolingStrategy::MeanCls | PoolingStrategy::TopKMeanCls
        )
    }
}

/// Pooling head: strategy-specific reduction followed by dense + tanh.
///
/// The dense layer always lives at `<path>/dense` so checkpoints from
/// different strategies fail loudly on shape mismatch rather than silently
/// loading into the wrong head.
#[cfg(feature = "bert")]
pub struct Pooler {
    strategy: PoolingStrategy,
    dense: nn::Linear,
    top_k: i64,
}

#[cfg(feature = "bert")]
impl Pooler {
    pub fn new(p: &nn::Path, strategy: PoolingStrategy, hidden_size: i64, top_k: i64) -> Self {
        let in_dim = if strategy.concatenates() {
            hidden_size * 2
        } else {
            hidden_size
        };
        let dense = nn::linear(p / "dense", in_dim, hidden_size, Default::default());
        Pooler {
            strategy,
            dense,
            top_k,
        }
    }

    /// Reduce `[batch, seq, hidden]` to `[batch, hidden]`.
    pub fn forward(&self, hidden_states: &Tensor) -> Tensor {
        let features = match self.strategy {
            PoolingStrategy::Cls => hidden_states.select(1, 0),
            PoolingStrategy::MeanMax => {
                let mean = hidden_states.mean_dim(1, false, Kind::Float);
                let (max, _) = hidden_states.max_dim(1, false);
                Tensor::cat(&[mean, max], 1)
            }
            PoolingStrategy::TopKMean => top_k_mean(hidden_states, self.top_k),
            PoolingStrategy::TopHalfMean => {
                top_k_mean(hidden_states, hidden_states.size()[1] / 2)
            }
            PoolingStrategy::MeanCls => {
                let mean = hidden_states.mean_dim(1, false, Kind::Float);
                let cls = hidden_states.select(1, 0);
                Tensor::cat(&[mean, cls], 1)
            }
            PoolingStrategy::TopKMeanCls => {
                let top = top_k_mean(hidden_states, self.top_k);
                let cls = hidden_states.select(1, 0);
                Tensor::cat(&[top, cls], 1)
            }
        };
        features.apply(&self.dense).tanh()
    }
}

/// Mean over the per-dimension top-k token activations. k is clamped to
/// the sequence length.
#[cfg(feature = "bert")]
fn top_k_mean(hidden_states: &Tensor, k: i64) -> Tensor {
    let seq_len = hidden_states.size()[1];
    let k = k.clamp(1, seq_len);
    let (top_k, _) = hidden_states.topk(k, 1, true, true);
    top_k.mean_dim(1, false, Kind::Float)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strategy_parsing() {
        assert_eq!(
            PoolingStrategy::from_name("CLS").unwrap(),
            PoolingStrategy::Cls
        );
        assert_eq!(
            PoolingStrategy::from_name("TOPK_MEAN_CLS").unwrap(),
            PoolingStrategy::TopKMeanCls
        );
        assert!(PoolingStrategy::from_name("AVERAGE").is_err());
    }

    #[test]
    fn test_strategy_names_roundtrip() {
        for name in [
            "CLS",
            "MEAN_MAX",
            "TOPK_MEAN",
            "TOPHALF_MEAN",
            "MEAN_CLS",
            "TOPK_MEAN_CLS",
        ] {
            let strategy = PoolingStrategy::from_name(name).unwrap();
            assert_eq!(strategy.name(), name);
        }
    }

    #[cfg(feature = "bert")]
    mod tensor_tests {
        use super::super::*;
        use tch::{nn, Device, Kind, Tensor};

        fn pooled_shape(strategy: PoolingStrategy) -> Vec<i64> {
            let vs = nn::VarStore::new(Device::Cpu);
            let pooler = Pooler::new(&vs.root(), strategy, 8, 3);
            let hidden = Tensor::randn(&[2, 5, 8], (Kind::Float, Device::Cpu));
            pooler.forward(&hidden).size()
        }

        #[test]
        fn test_all_strategies_pool_to_hidden_size() {
            for strategy in [
                PoolingStrategy::Cls,
                PoolingStrategy::MeanMax,
                PoolingStrategy::TopKMean,
                PoolingStrategy::TopHalfMean,
                PoolingStrategy::MeanCls,
                PoolingStrategy::TopKMeanCls,
            ] {
                assert_eq!(pooled_shape(strategy), vec![2, 8], "{:?}", strategy);
            }
        }

        #[test]
        fn test_top_k_mean_clamps_k() {
            let hidden = Tensor::randn(&[1, 2, 4], (Kind::Float, Device::Cpu));
            // k larger than seq_len must not panic
            let pooled = top_k_mean(&hidden, 10);
            assert_eq!(pooled.size(), vec![1, 4]);
        }
    }
}
