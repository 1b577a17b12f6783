//! amiwire CLI
//!
//! Decode, encode and round-trip manager protocol messages from the shell.

use std::fs;
use std::io::{self, Read, Write};
use std::path::PathBuf;

use amiwire::{AmiError, Config, Message, Result, VariableMode};
use clap::{Parser, Subcommand};
use tracing_subscriber::{fmt, EnvFilter};

/// amiwire CLI
#[derive(Parser, Debug)]
#[command(name = "amiwire")]
#[command(about = "Codec for CRLF-delimited manager protocol messages")]
#[command(version)]
struct Args {
    /// How `Variable:` lines are decoded (compat or routed)
    #[arg(long, default_value = "compat")]
    variables: VariableMode,

    /// Reject input that is not valid UTF-8 instead of replacing it
    #[arg(long)]
    strict_utf8: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Decode a message and print it as JSON
    Decode {
        /// Input file (stdin if omitted)
        file: Option<PathBuf>,
    },

    /// Encode fields and variables into wire text
    Encode {
        /// Fields as NAME=VALUE
        fields: Vec<String>,

        /// Variables as KEY=VALUE
        #[arg(long = "var")]
        vars: Vec<String>,
    },

    /// Decode a message and encode it again
    Roundtrip {
        /// Input file (stdin if omitted)
        file: Option<PathBuf>,
    },
}

fn main() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("warn,amiwire=info"));

    fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(io::stderr)
        .init();

    let args = Args::parse();

    if let Err(e) = run(args) {
        tracing::error!("{}", e);
        std::process::exit(1);
    }
}

fn run(args: Args) -> Result<()> {
    let config = Config::builder()
        .variable_mode(args.variables)
        .lossy_utf8(!args.strict_utf8)
        .build();

    tracing::debug!("amiwire v{} with {:?}", amiwire::VERSION, config);

    let output = match args.command {
        Commands::Decode { file } => {
            let message = read_message(file, &config)?;
            let json = serde_json::to_string_pretty(&message)
                .map_err(|e| AmiError::Serialization(e.to_string()))?;
            json + "\n"
        }
        Commands::Encode { fields, vars } => {
            let mut message = Message::new();
            for field in &fields {
                let (name, value) = split_assignment(field)?;
                message.set(name, value);
            }
            for var in &vars {
                let (key, value) = split_assignment(var)?;
                message.set_variable(key, value);
            }
            message.encode()
        }
        Commands::Roundtrip { file } => read_message(file, &config)?.encode(),
    };

    let mut stdout = io::stdout().lock();
    stdout.write_all(output.as_bytes())?;
    stdout.flush()?;
    Ok(())
}

/// Read one whole message from a file or stdin and decode it
fn read_message(file: Option<PathBuf>, config: &Config) -> Result<Message> {
    let bytes = match file {
        Some(path) => {
            tracing::info!("Reading message from {}", path.display());
            fs::read(&path)?
        }
        None => {
            let mut buf = Vec::new();
            io::stdin().lock().read_to_end(&mut buf)?;
            buf
        }
    };

    let mut message = Message::new();
    message.decode_bytes(&bytes, config)?;
    Ok(message)
}

/// Split `NAME=VALUE` on the first `=`
fn split_assignment(arg: &str) -> Result<(&str, &str)> {
    match arg.split_once('=') {
        Some((name, value)) if !name.is_empty() => Ok((name, value)),
        _ => Err(AmiError::InvalidArgument(format!(
            "expected NAME=VALUE, got '{}'",
            arg
        ))),
    }
}
