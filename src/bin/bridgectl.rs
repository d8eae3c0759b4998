//! Command-line driver for the bridge
//!
//! Opens a session on a headless view, optionally bulk-imports a config
//! document, then replays a script of commands, one JSON object per line:
//!
//! ```text
//! {"method": "setBarcodeTypeEnabled", "arguments": {"type": 2, "enabled": true}}
//! {"method": "getRegionOfInterest"}
//! ```
//!
//! Each reply is printed as one JSON line,
//! `{"method": "getRegionOfInterest", "reply": {"result": [0.0, 0.0, 1.0, 1.0]}}`.
//! Set `RUST_LOG=debug` to trace dispatch.

use clap::Parser;
use log::info;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fs;
use std::io::{self, BufRead, BufReader, Write};
use std::path::PathBuf;
use std::process;

use barkoder_bridge::view::HeadlessView;
use barkoder_bridge::{ConfigBridge, Reply};

/// Replay bridge commands against a headless scanner session
#[derive(Parser)]
#[command(name = "bridgectl")]
#[command(version)]
#[command(about = "Replay bridge commands against a headless scanner session", long_about = None)]
struct Args {
    /// License key the session is started with
    #[arg(short, long, default_value = "")]
    license: String,

    /// Config document applied with configureBarkoder before the script
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Stop at the first failed command and exit non-zero
    #[arg(long)]
    fail_fast: bool,

    /// Only print failed replies
    #[arg(short, long)]
    quiet: bool,

    /// Command script (JSON lines); reads stdin when omitted
    script: Option<PathBuf>,
}

#[derive(Deserialize)]
struct Call {
    method: String,
    #[serde(default)]
    arguments: Value,
}

#[derive(Serialize)]
struct Answer<'a> {
    method: &'a str,
    reply: &'a Reply,
}

/// One output line for a reply
fn render(method: &str, reply: &Reply) -> serde_json::Result<String> {
    serde_json::to_string(&Answer { method, reply })
}

fn main() {
    env_logger::init();
    let args = Args::parse();

    let mut bridge = ConfigBridge::new(HeadlessView::default());
    bridge.start_session(&args.license);

    if let Some(path) = &args.config {
        let document = match fs::read_to_string(path) {
            Ok(text) => text,
            Err(e) => {
                eprintln!("Failed to read config '{}': {}", path.display(), e);
                process::exit(1);
            }
        };
        if let Err(e) = bridge.dispatch("configureBarkoder", &Value::String(document)) {
            eprintln!("Config '{}' rejected: {}", path.display(), e);
            process::exit(1);
        }
        info!("Applied config {}", path.display());
    }

    let input: Box<dyn BufRead> = match &args.script {
        Some(path) => match fs::File::open(path) {
            Ok(file) => Box::new(BufReader::new(file)),
            Err(e) => {
                eprintln!("Failed to open script '{}': {}", path.display(), e);
                process::exit(1);
            }
        },
        None => Box::new(io::stdin().lock()),
    };

    let stdout = io::stdout();
    let mut out = stdout.lock();
    let mut failures = 0;

    for (index, line) in input.lines().enumerate() {
        let line = match line {
            Ok(line) => line,
            Err(e) => {
                eprintln!("Failed to read script: {}", e);
                process::exit(1);
            }
        };
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        let call: Call = match serde_json::from_str(line) {
            Ok(call) => call,
            Err(e) => {
                eprintln!("line {}: not a command: {}", index + 1, e);
                process::exit(1);
            }
        };

        let reply = bridge.answer(&call.method, &call.arguments);
        let failed = matches!(reply, Reply::Error(_));
        if failed {
            failures += 1;
        }

        if failed || !args.quiet {
            let text = match render(&call.method, &reply) {
                Ok(text) => text,
                Err(e) => {
                    eprintln!("line {}: failed to serialize reply: {}", index + 1, e);
                    process::exit(1);
                }
            };
            if writeln!(out, "{}", text).is_err() {
                process::exit(1);
            }
        }

        if failed && args.fail_fast {
            process::exit(1);
        }
    }

    bridge.end_session();
    info!("{} command(s) failed", failures);
}
