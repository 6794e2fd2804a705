//! Replays a lock session script and prints its transcript.

use std::path::PathBuf;

use acpstore_replay::{Script, replay};
use anyhow::Context;
use clap::Parser;
use tracing::info;

/// Replay command line arguments.
#[derive(Parser, Debug)]
#[command(name = "acpstore-replay")]
#[command(about = "Replay a scripted text store session against an in-memory document")]
struct Args {
	/// Script to replay
	#[arg(value_name = "SCRIPT")]
	script: PathBuf,

	/// Print the final document text after the transcript
	#[arg(long)]
	show_text: bool,

	/// Verbose logging
	#[arg(short, long)]
	verbose: bool,
}

fn main() -> anyhow::Result<()> {
	let args = Args::parse();

	setup_tracing(args.verbose);

	let source = std::fs::read_to_string(&args.script)
		.with_context(|| format!("reading {}", args.script.display()))?;
	let script = Script::from_toml_str(&source)
		.with_context(|| format!("parsing {}", args.script.display()))?;

	info!(script = %args.script.display(), steps = script.steps.len(), "replaying");
	let session = replay(&script);

	for event in session.transcript() {
		println!("{event}");
	}
	if args.show_text {
		println!("---");
		println!("{}", session.document().text());
	}

	Ok(())
}

fn setup_tracing(verbose: bool) {
	use std::fs::OpenOptions;

	use tracing_subscriber::EnvFilter;
	use tracing_subscriber::prelude::*;

	let filter = || {
		EnvFilter::try_from_default_env().unwrap_or_else(|_| {
			if verbose {
				EnvFilter::new("acpstore=debug,info")
			} else {
				EnvFilter::new("acpstore=info,warn")
			}
		})
	};

	// ACPSTORE_LOG_DIR sends logs to a file instead of stderr
	if let Some(log_dir) = std::env::var("ACPSTORE_LOG_DIR").ok().map(PathBuf::from)
		&& std::fs::create_dir_all(&log_dir).is_ok()
	{
		let log_path = log_dir.join(format!("acpstore-replay.{}.log", std::process::id()));

		if let Ok(file) = OpenOptions::new().create(true).append(true).open(&log_path) {
			let file_layer = tracing_subscriber::fmt::layer()
				.with_writer(file)
				.with_ansi(false)
				.with_target(true);

			tracing_subscriber::registry()
				.with(filter())
				.with(file_layer)
				.init();

			tracing::info!(path = ?log_path, "replay tracing initialized");
			return;
		}
	}

	tracing_subscriber::fmt()
		.with_env_filter(filter())
		.with_writer(std::io::stderr)
		.init();
}
