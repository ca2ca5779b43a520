//! Command-line interface for the bag-of-words classifier.

use super::predict::predict_single;
use super::train::{train_bow, TrainOverrides};
use std::error::Error;

/// Print command-line usage information.
pub fn print_usage() {
    println!("Usage:");
    println!("  sentilab bow [COMMAND] [OPTIONS]\n");
    println!("Commands:");
    println!("  train              Train the n-gram BoW classifier (saves to models/)");
    println!("  predict TEXT       Predict sentiment for a single review");
    println!("  help               Show this help\n");
    println!("Options:");
    println!("  --num-samples N    Number of samples to keep after shuffling");
    println!("  --n-gram N         N-gram size (1 = unigrams)");
    println!("  --classifier NAME  logistic | naive_bayes");
    println!("  --quiet            Suppress example listings");
    println!("                     Defaults come from config.toml\n");
    println!("Examples:");
    println!("  sentilab bow train --num-samples 5000 --n-gram 2");
    println!("  sentilab bow train --classifier naive_bayes");
    println!("  sentilab bow predict \"A wonderful, quietly moving film\"");
}

/// Value of `--flag VALUE` style options, if present.
fn flag_value(args: &[String], flag: &str) -> Option<String> {
    args.iter()
        .position(|a| a == flag)
        .and_then(|i| args.get(i + 1))
        .cloned()
}

/// Main entry point for the bow subcommand.
pub fn main_bow(args: Vec<String>) -> Result<(), Box<dyn Error>> {
    let command = if args.len() > 1 {
        args[1].as_str()
    } else {
        "train"
    };

    match command {
        "train" => {
            let overrides = TrainOverrides {
                num_samples: match flag_value(&args, "--num-samples") {
                    Some(v) => Some(v.parse()?),
                    None => None,
                },
                n_gram: match flag_value(&args, "--n-gram") {
                    Some(v) => Some(v.parse()?),
                    None => None,
                },
                classifier: flag_value(&args, "--classifier"),
                quiet: args.contains(&"--quiet".to_string()),
            };
            train_bow(&overrides)
        }
        "predict" => {
            if args.len() < 3 {
                println!("Error: TEXT argument required\n");
                print_usage();
                return Ok(());
            }
            predict_single(&args[2])
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

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flag_value() {
        let args: Vec<String> = ["bow", "train", "--n-gram", "2"]
            .iter()
            .map(|s| s.to_string())
            .collect();
        assert_eq!(flag_value(&args, "--n-gram"), Some("2".to_string()));
        assert_eq!(flag_value(&args, "--num-samples"), None);
    }
}
