//! aget binary entry point.

use aget::tooling::{run, Cli};
use clap::Parser;
use std::process;

fn main() {
    let cli = Cli::parse();
    match run(&cli) {
        Ok(output) => {
            print!("{}", output.text);
            process::exit(output.exit_code);
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            process::exit(1);
        }
    }
}
