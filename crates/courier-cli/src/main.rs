mod cli;

use std::io::Read;
use std::path::Path;
use std::process;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use courier_core::{
    resolver, CancellationToken, NotificationKind, NotificationServices, PublishError, TracingLogger,
};
use serde_json::Value;
use tracing::{error, Level};
use tracing_subscriber::{filter::EnvFilter, fmt, prelude::*};

use crate::cli::{Args, Commands};

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    let args = Args::parse();
    init_tracing(args.verbose);

    if let Err(e) = run(args).await {
        error!("{:#}", e);
        eprintln!("Error: {:#}", e);
        process::exit(1);
    }
}

async fn run(args: Args) -> Result<()> {
    match args.command {
        Commands::Config => {
            let config = resolver::load().await.context("failed to resolve configuration")?;
            println!("{}", serde_json::to_string_pretty(&config)?);
        }
        Commands::Publish {
            kind,
            payload,
            topic,
            timeout_ms,
        } => {
            let kind: NotificationKind = kind.parse()?;
            let payload = read_payload(&payload)?;

            let services = NotificationServices::initialize(Arc::new(TracingLogger::new())).await?;

            let cancel = match timeout_ms {
                Some(ms) => CancellationToken::with_timeout(Duration::from_millis(ms)),
                None => CancellationToken::new(),
            };
            let topic = topic.unwrap_or_else(|| services.config.kafka.topic_for(kind).to_string());

            let result = services
                .publisher
                .publish(kind.as_str(), &topic, &payload, &cancel)
                .await;
            services.cleanup().await;

            let report = result.map_err(|e| {
                let context = failure_context(kind, &e);
                anyhow::Error::new(e).context(context)
            })?;
            println!(
                "{}",
                serde_json::json!({
                    "message_id": report.message_id,
                    "topic": report.topic,
                    "partition": report.partition,
                    "offset": report.offset,
                })
            );
        }
    }
    Ok(())
}

/// Headline for a failed publish; an abandoned wait leaves the outcome open
fn failure_context(kind: NotificationKind, error: &PublishError) -> String {
    if error.is_abandoned() {
        format!("stopped waiting for {} delivery; the broker may still accept it", kind)
    } else {
        format!("failed to publish {} notification", kind)
    }
}

fn read_payload(path: &Path) -> Result<Value> {
    let raw = if path == Path::new("-") {
        let mut buf = String::new();
        std::io::stdin()
            .read_to_string(&mut buf)
            .context("failed to read payload from stdin")?;
        buf
    } else {
        std::fs::read_to_string(path)
            .with_context(|| format!("failed to read payload file {}", path.display()))?
    };

    serde_json::from_str(&raw).context("payload is not valid JSON")
}

fn init_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::from_default_env().add_directive(Level::INFO.into())
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_target(verbose))
        .init();
}
