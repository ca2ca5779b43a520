use std::error::Error;

use sentilab::bias::cli::main_bias;
use sentilab::bow::cli::main_bow;
use sentilab::pooling::cli::main_pooling;

fn print_usage() {
    println!("Usage:");
    println!("  sentilab [SUBCOMMAND] [COMMAND] [OPTIONS]\n");
    println!("Subcommands:");
    println!("  bow                N-gram bag-of-words sentiment classifier");
    println!("  pooling            Pooling-layer variants on pretrained BERT (needs --features bert)");
    println!("  bias               Fill-mask bias measurement (needs --features bert)");
    println!("  help               Show this help\n");
    println!("Examples:");
    println!("  sentilab bow train --num-samples 5000 --n-gram 2");
    println!("  sentilab pooling train --pooler TOPK_MEAN");
    println!("  sentilab bias run");
}

fn main() -> Result<(), Box<dyn Error>> {
    let args: Vec<String> = std::env::args().collect();

    let subcommand = if args.len() > 1 {
        args[1].as_str()
    } else {
        "help"
    };

    // Each subcommand parses its own tail of the argument list
    match subcommand {
        "bow" => main_bow(args[1..].to_vec()),
        "pooling" => main_pooling(args[1..].to_vec()),
        "bias" => main_bias(args[1..].to_vec()),
        "help" | "--help" | "-h" => {
            print_usage();
            Ok(())
        }
        _ => {
            println!("Unknown subcommand: {}\n", subcommand);
            print_usage();
            Ok(())
        }
    }
}
