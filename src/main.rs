use std::error::Error;
use std::path::PathBuf;

use clap::{Parser, Subcommand};

use huffman_text::HuffmanCoding;

#[derive(Parser, Debug)]
#[command(about = "Huffman encode and decode 7-bit text files", version)]
struct Args {
    /// Log every stage of the pipeline
    #[arg(short, long, default_value_t = false)]
    verbose: bool,

    #[command(subcommand)]
    mode: Mode,
}

#[derive(Subcommand, Debug)]
enum Mode {
    /// Encode INPUT into ENCODED
    Encode {
        /// Text file the code is built from and that gets encoded
        input: PathBuf,
        /// Destination of the bit-packed encoding
        encoded: PathBuf,
    },
    /// Decode ENCODED into DECODED, rebuilding the code from INPUT
    Decode {
        /// The text file ENCODED was produced from
        input: PathBuf,
        /// File written by the encode command
        encoded: PathBuf,
        /// Destination of the decoded text
        decoded: PathBuf,
    },
    /// Print the sorted frequencies and the code of every symbol in INPUT
    Stats {
        input: PathBuf,
    },
}

fn printable(symbol: u8) -> String {
    format!("{:?}", symbol as char)
}

fn print_stats(coding: &HuffmanCoding) {
    println!("{:>8} {:>12}  code", "symbol", "probability");
    for entry in coding.sorted_frequencies() {
        let code = coding
            .code_table()
            .get(entry.symbol)
            .map(|code| code.to_string())
            .unwrap_or_default();
        println!(
            "{:>8} {:>12.6}  {}",
            printable(entry.symbol),
            entry.probability,
            code
        );
    }
    println!(
        "{} symbols, tree depth {}, {:.3} bits per symbol",
        coding.code_table().len(),
        coding.tree().depth(),
        coding.average_code_len()
    );
}

fn main() -> Result<(), Box<dyn Error>> {
    let args = Args::parse();

    let level = if args.verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();

    match args.mode {
        Mode::Encode { input, encoded } => {
            let coding = HuffmanCoding::from_file(&input)?;
            coding.encode_file(&input, &encoded)?;
            log::info!("encoded {} into {}", input.display(), encoded.display());
        }
        Mode::Decode {
            input,
            encoded,
            decoded,
        } => {
            let coding = HuffmanCoding::from_file(&input)?;
            coding.decode_file(&encoded, &decoded)?;
            log::info!("decoded {} into {}", encoded.display(), decoded.display());
        }
        Mode::Stats { input } => {
            let coding = HuffmanCoding::from_file(&input)?;
            print_stats(&coding);
        }
    }

    Ok(())
}
