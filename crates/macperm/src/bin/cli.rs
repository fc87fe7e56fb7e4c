//! macperm CLI
//!
//! Query macOS privacy permissions for this process. Every command prints a
//! JSON envelope on stdout; logs go to stderr.

use anyhow::Result;
use clap::{Parser, Subcommand};
use serde::Serialize;
use std::time::Duration;
use tracing::debug;
use tracing_subscriber::EnvFilter;

use macperm::pane;
use macperm::prelude::*;

#[derive(Parser)]
#[command(name = "macperm")]
#[command(about = "macperm - inspect macOS privacy permissions")]
#[command(version)]
struct Cli {
    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Authorization status of one capability
    Status {
        /// Capability (e.g. camera, contacts, media, screen, full-disk-access)
        kind: String,

        /// Sub-kind for media, event and photos (e.g. microphone, calendar, read-write)
        param: Option<String>,
    },

    /// Authorization status of every capability
    All,

    /// Bring the accessibility authorization dialog to the front
    Dialog {
        /// Window snapshots to take before giving up
        #[arg(long, default_value = "5")]
        attempts: u32,

        /// Pause between snapshots in ms
        #[arg(long, default_value = "250")]
        interval_ms: u64,
    },

    /// Open a Privacy & Security pane
    Open {
        /// Capability name or pane id (e.g. camera, Privacy_AllFiles)
        pane: String,
    },

    /// Dump windows stacked above this process
    Windows,
}

#[derive(Serialize)]
struct Output<T: Serialize> {
    success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<Error>,
}

impl<T: Serialize> Output<T> {
    fn ok(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
        }
    }

    fn err(e: Error) -> Output<()> {
        Output {
            success: false,
            data: None,
            error: Some(e),
        }
    }
}

fn print_json<T: Serialize>(output: &T) {
    match serde_json::to_string_pretty(output) {
        Ok(json) => println!("{}", json),
        Err(e) => eprintln!("Error: could not serialize output: {}", e),
    }
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("macperm={level},macperm_core={level}")));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let result: Result<(), anyhow::Error> = match cli.command {
        Commands::Status { kind, param } => run(|| {
            let capability = Capability::parse(&kind, param.as_deref())?;
            let status = macperm::checker()?.status(capability)?;
            print_json(&Output::ok(serde_json::json!({
                "capability": capability.to_string(),
                "status": status,
            })));
            Ok(())
        }),
        Commands::All => run(|| {
            let report = macperm::checker()?.report();
            print_json(&Output::ok(report));
            Ok(())
        }),
        Commands::Dialog {
            attempts,
            interval_ms,
        } => run(|| {
            let config = DialogConfig {
                attempts,
                interval: Duration::from_millis(interval_ms),
                ..Default::default()
            };
            let found = macperm::checker()?
                .with_dialog_config(config)
                .detect_and_foreground_dialog();
            print_json(&Output::ok(serde_json::json!({ "found": found })));
            Ok(())
        }),
        Commands::Open { pane: input } => run(|| {
            let pane_id = pane::resolve_pane(&input);
            let url = pane::pane_url(&pane_id);
            debug!(%input, %url, "resolved pane");
            pane::open_url(&url)
                .map_err(|e| Error::action_failed("open", &e.to_string()))?;
            print_json(&Output::ok(serde_json::json!({ "opened": url })));
            Ok(())
        }),
        Commands::Windows => run(|| {
            let windows = macperm::checker()?.windows_above_self();
            print_json(&Output::ok(windows));
            Ok(())
        }),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

/// Run a command, printing structured errors as a JSON envelope.
fn run<F>(f: F) -> Result<(), anyhow::Error>
where
    F: FnOnce() -> Result<(), anyhow::Error>,
{
    match f() {
        Ok(()) => Ok(()),
        Err(e) => {
            if let Some(err) = e.downcast_ref::<Error>() {
                print_json(&Output::<()>::err(err.clone()));
            }
            Err(e)
        }
    }
}
