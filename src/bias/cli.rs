//! Command-line interface for the fill-mask bias probe.

use super::measure::{measure_bias, BiasOverrides};
use std::error::Error;

/// Print command-line usage information.
pub fn print_usage() {
    println!("Usage:");
    println!("  sentilab bias [COMMAND] [OPTIONS]\n");
    println!("Commands:");
    println!("  run                Measure fill-mask bias and print cb_score");
    println!("  help               Show this help\n");
    println!("Options:");
    println!("  --top N            Entries shown in ranked diagnostic tables\n");
    println!("Examples:");
    println!("  sentilab bias run");
    println!("  sentilab bias run --top 5");
    println!("\nRequires: cargo build --features bert (libtorch backend)");
    println!("Note: some model outputs may be offensive or upsetting.");
}

fn flag_value(args: &[String], flag: &str) -> Option<String> {
    args.iter()
        .position(|a| a == flag)
        .and_then(|i| args.get(i + 1))
        .cloned()
}

/// Main entry point for the bias subcommand.
pub fn main_bias(args: Vec<String>) -> Result<(), Box<dyn Error>> {
    let command = if args.len() > 1 {
        args[1].as_str()
    } else {
        "run"
    };

    match command {
        "run" => {
            let overrides = BiasOverrides {
                top_report: match flag_value(&args, "--top") {
                    Some(v) => Some(v.parse()?),
                    None => None,
                },
            };
            measure_bias(&overrides)
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
