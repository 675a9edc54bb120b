use anyhow::{Context, Result};
use std::fs;
use tfrecord_core::{DecodePolicy, DecodedMessage, ReaderConfig, RecordSession};
use tracing::info;

/// Arguments of the `extract` command
#[derive(Debug, Clone, Default)]
pub struct ExtractArgs {
    pub input: Option<String>,
    pub index: Option<u64>,
    pub example: bool,
    pub sequence_example: bool,
    pub compression: Option<String>,
    pub lenient: bool,
    pub config: Option<String>,
    pub output: Option<String>,
}

/// Merge the optional JSON config file with command-line flags.
///
/// Flags win over file values; an output-kind flag replaces the file's
/// choice entirely so the two sources never combine into "both".
pub fn build_config(args: &ExtractArgs) -> Result<ReaderConfig> {
    let mut config = match &args.config {
        Some(path) => {
            let content = fs::read_to_string(path)
                .with_context(|| format!("Failed to read config file: {}", path))?;
            serde_json::from_str::<ReaderConfig>(&content)
                .with_context(|| format!("Failed to parse config file: {}", path))?
        }
        None => ReaderConfig::default(),
    };

    if let Some(input) = &args.input {
        config.path = Some(input.clone());
    }
    if let Some(index) = args.index {
        config.target_index = Some(index);
    }
    if args.example || args.sequence_example {
        config.example = args.example;
        config.sequence_example = args.sequence_example;
    }
    if let Some(compression) = &args.compression {
        config.compression = Some(compression.clone());
    }
    if args.lenient {
        config.decode_policy = DecodePolicy::Lenient;
    }

    Ok(config)
}

/// Run one retrieval session and return its message
pub fn run(args: &ExtractArgs) -> Result<DecodedMessage> {
    let config = build_config(args)?;
    let mut session = RecordSession::from_config(&config)?;

    let index = session.config().index();

    info!(
        "Extracting record {} from {} as {}",
        index,
        session.config().path().display(),
        session.config().kind().name()
    );

    session
        .run()
        .with_context(|| format!("Failed to extract record {}", index))?;

    Ok(session.into_output()?)
}

pub fn execute(args: &ExtractArgs) -> Result<()> {
    let message = run(args)?;

    let json = serde_json::to_string_pretty(&message)
        .with_context(|| "Failed to serialize decoded message")?;

    if let Some(output_path) = &args.output {
        fs::write(output_path, json)
            .with_context(|| format!("Failed to write output file: {}", output_path))?;

        info!("Decoded message written to: {}", output_path);
    } else {
        println!("{}", json);
    }

    Ok(())
}
