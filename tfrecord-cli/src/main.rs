use anyhow::Result;
use clap::{Parser, Subcommand};
use tfrecord_cli::commands::{self, extract::ExtractArgs};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

#[derive(Parser)]
#[command(name = "tfrecord")]
#[command(
    about = "tfrecord - Sequential, checksum-verified TFRecord extraction",
    long_about = None
)]
#[command(version)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Extract one record and print it as JSON
    Extract {
        /// Record file to read
        #[arg(short, long)]
        input: Option<String>,

        /// Ordinal of the record to extract (default 0)
        #[arg(long)]
        index: Option<u64>,

        /// Decode the record as tensorflow.Example
        #[arg(long)]
        example: bool,

        /// Decode the record as tensorflow.SequenceExample
        #[arg(long)]
        sequence_example: bool,

        /// Stream compression: none, zlib or gzip
        #[arg(long)]
        compression: Option<String>,

        /// Emit an empty message instead of failing on undecodable payloads
        #[arg(long)]
        lenient: bool,

        /// JSON configuration file; flags override its values
        #[arg(long)]
        config: Option<String>,

        /// Output JSON file (stdout when omitted)
        #[arg(short, long)]
        output: Option<String>,
    },

    /// Walk every record and list where it sits
    Scan {
        /// Record file to scan
        #[arg(short, long)]
        input: String,

        /// Output JSON file for the record list
        #[arg(short, long)]
        output: Option<String>,

        /// Stream compression: none, zlib or gzip
        #[arg(long)]
        compression: Option<String>,

        /// Show statistics only
        #[arg(long)]
        stats_only: bool,
    },

    /// Check every record's framing and checksums
    Verify {
        /// Record file to verify
        #[arg(short, long)]
        input: String,

        /// Stream compression: none, zlib or gzip
        #[arg(long)]
        compression: Option<String>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Setup logging
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();

    // Execute command
    match cli.command {
        Commands::Extract {
            input,
            index,
            example,
            sequence_example,
            compression,
            lenient,
            config,
            output,
        } => commands::extract::execute(&ExtractArgs {
            input,
            index,
            example,
            sequence_example,
            compression,
            lenient,
            config,
            output,
        }),

        Commands::Scan {
            input,
            output,
            compression,
            stats_only,
        } => commands::scan::execute(&input, output.as_deref(), compression.as_deref(), stats_only),

        Commands::Verify { input, compression } => {
            commands::verify::execute(&input, compression.as_deref()).map(|_| ())
        }
    }
}
