use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, Subcommand};
use huffman_arena::{CodecConfig, HuffmanCodec, LogObserver};

#[derive(Parser, Debug)]
#[command(about = "Compress and decompress files with Huffman coding")]
struct Args {
    /// More log output (-v info, -vv debug, -vvv trace with the tree dump)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,
    /// Only print errors
    #[arg(short, long, global = true)]
    quiet: bool,
    /// Read and write buffer size in bytes
    #[arg(long, default_value_t = huffman_arena::config::DEFAULT_BUFFER_CAPACITY, global = true)]
    buffer_size: usize,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Compress INPUT into OUTPUT
    Encode { input: PathBuf, output: PathBuf },
    /// Restore OUTPUT from the compressed INPUT
    Decode { input: PathBuf, output: PathBuf },
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let level = match (args.quiet, args.verbose) {
        (true, _) => log::LevelFilter::Error,
        (false, 0) => log::LevelFilter::Warn,
        (false, 1) => log::LevelFilter::Info,
        (false, 2) => log::LevelFilter::Debug,
        (false, _) => log::LevelFilter::Trace,
    };
    env_logger::Builder::new().filter_level(level).init();

    let config = CodecConfig::new()
        .with_buffer_capacity(args.buffer_size)
        .with_dump_tree(level == log::LevelFilter::Trace);
    let mut codec = HuffmanCodec::with_observer(config, LogObserver);

    match args.command {
        Command::Encode { input, output } => {
            log::info!("start to encode {}", input.display());
            let summary = codec
                .encode_file(&input, &output)
                .with_context(|| format!("encoding {} into {}", input.display(), output.display()))?;
            if !args.quiet {
                println!("compress rate={:.3}", summary.compression_rate());
            }
        }
        Command::Decode { input, output } => {
            log::info!("start to decode {}", input.display());
            codec
                .decode_file(&input, &output)
                .with_context(|| format!("decoding {} into {}", input.display(), output.display()))?;
        }
    }
    Ok(())
}
