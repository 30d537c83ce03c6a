use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "courier", version, about = "Publish notification events to Kafka")]
pub struct Args {
    /// Enable debug logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Print the resolved configuration with secrets redacted
    Config,

    /// Publish one JSON payload and wait for the broker to acknowledge it
    Publish {
        /// Notification kind: email, sms, in-app, push or feedback
        #[arg(short, long)]
        kind: String,

        /// File holding the JSON payload, or `-` for stdin
        #[arg(short, long, default_value = "-")]
        payload: PathBuf,

        /// Topic to publish to instead of the configured one
        #[arg(short, long)]
        topic: Option<String>,

        /// Give up waiting for the acknowledgement after this many milliseconds
        #[arg(long, env = "COURIER_PUBLISH_TIMEOUT_MS")]
        timeout_ms: Option<u64>,
    },
}
