//! Twinlane replay tool.
//!
//! Loads a match snapshot, applies a JSON intent log to it and prints the
//! resulting snapshot.
//!
//! ## Usage
//!
//! ```text
//! twinlane <SNAPSHOT|-> <INTENTS> [--strict]
//!
//!   SNAPSHOT   exported snapshot JSON, or "-" for a fresh match
//!   INTENTS    JSON array of intents, e.g. [{"intent": "advancePhase"}]
//!   --strict   stop at the first rejected intent
//! ```
//!
//! Logs go to stderr and honor `RUST_LOG` (default `info`). The final
//! snapshot goes to stdout.

use std::env;
use std::fs;
use std::process::ExitCode;

use anyhow::{bail, Context, Result};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;
use twinlane_core::{apply_intent, check_winner, export_json, import_json, GameState, Intent};

struct Args {
    snapshot: String,
    intents: String,
    strict: bool,
}

fn parse_args() -> Result<Args> {
    let mut positional = Vec::new();
    let mut strict = false;
    for arg in env::args().skip(1) {
        match arg.as_str() {
            "--strict" => strict = true,
            _ => positional.push(arg),
        }
    }
    let [snapshot, intents]: [String; 2] = positional
        .try_into()
        .map_err(|_| anyhow::anyhow!("usage: twinlane <SNAPSHOT|-> <INTENTS> [--strict]"))?;
    Ok(Args {
        snapshot,
        intents,
        strict,
    })
}

fn load_snapshot(path: &str) -> Result<GameState> {
    if path == "-" {
        return Ok(GameState::default());
    }
    let json = fs::read_to_string(path).with_context(|| format!("reading snapshot {path}"))?;
    import_json(&json).with_context(|| format!("loading snapshot {path}"))
}

fn load_intents(path: &str) -> Result<Vec<Intent>> {
    let json = fs::read_to_string(path).with_context(|| format!("reading intents {path}"))?;
    serde_json::from_str(&json).with_context(|| format!("parsing intents {path}"))
}

fn run(args: &Args) -> Result<()> {
    let mut state = load_snapshot(&args.snapshot)?;
    let intents = load_intents(&args.intents)?;
    info!(intents = intents.len(), "replaying");

    let mut rejected = 0usize;
    for (index, intent) in intents.into_iter().enumerate() {
        let name = intent.name();
        match apply_intent(&state, intent) {
            Ok(transition) => {
                state = transition.state;
                if let Some(report) = transition.combat {
                    for entry in &report.log {
                        info!(lane = %report.lane, "{entry}");
                    }
                }
                if let Some(victory) = check_winner(&state) {
                    info!(index, "{victory}");
                    break;
                }
            }
            Err(err) if args.strict => bail!("intent {index} ({name}) rejected: {err}"),
            Err(err) => {
                rejected += 1;
                warn!(index, intent = name, %err, "intent rejected");
            }
        }
    }

    let phase = state.metadata.current_phase;
    info!(
        turn = state.metadata.current_turn,
        active = %state.metadata.active_player,
        %phase,
        rejected,
        "replay finished"
    );
    println!("{}", export_json(&state).context("exporting snapshot")?);
    Ok(())
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    match parse_args().and_then(|args| run(&args)) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {err:#}");
            ExitCode::FAILURE
        }
    }
}
