//! Command-line interface for the BERT pooling experiment.

use super::train::{train_pooling, PoolingOverrides};
use std::error::Error;

/// Print command-line usage information.
pub fn print_usage() {
    println!("Usage:");
    println!("  sentilab pooling [COMMAND] [OPTIONS]\n");
    println!("Commands:");
    println!("  train              Fine-tune BERT with the chosen pooling head");
    println!("  help               Show this help\n");
    println!("Options:");
    println!("  --pooler NAME      CLS | MEAN_MAX | TOPK_MEAN | TOPHALF_MEAN |");
    println!("                     MEAN_CLS | TOPK_MEAN_CLS");
    println!("  --num-samples N    Number of samples to keep after shuffling");
    println!("  --epochs N         Number of fine-tuning epochs");
    println!("                     Defaults come from config.toml\n");
    println!("Examples:");
    println!("  sentilab pooling train --pooler MEAN_MAX");
    println!("  sentilab pooling train --pooler TOPK_MEAN --epochs 3");
    println!("\nRequires: cargo build --features bert (libtorch backend)");
}

fn flag_value(args: &[String], flag: &str) -> Option<String> {
    args.iter()
        .position(|a| a == flag)
        .and_then(|i| args.get(i + 1))
        .cloned()
}

/// Main entry point for the pooling subcommand.
pub fn main_pooling(args: Vec<String>) -> Result<(), Box<dyn Error>> {
    let command = if args.len() > 1 {
        args[1].as_str()
    } else {
        "train"
    };

    match command {
        "train" => {
            let overrides = PoolingOverrides {
                strategy: flag_value(&args, "--pooler"),
                num_samples: match flag_value(&args, "--num-samples") {
                    Some(v) => Some(v.parse()?),
                    None => None,
                },
                epochs: match flag_value(&args, "--epochs") {
                    Some(v) => Some(v.parse()?),
                    None => None,
                },
            };
            train_pooling(&overrides)
        }
        "help" | "--help" | "-h" => {
            print_usage();
            Ok(())
        }
        _ => {
            println!("Unknown command: {}\n", command);
            print_usage();
            Ok(())
        }
    }
}
