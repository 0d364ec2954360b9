//! Mine golden paths from JSONEachRow session rows on stdin.
//!
//! Usage: cargo run --example mine_jsonl < sessions.jsonl
//! Set RUST_LOG=debug to see pipeline phase logging.

use std::io::Read;

use goldenpath_mining::{ingest, mine, MiningConfig};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let mut input = String::new();
    std::io::stdin().read_to_string(&mut input)?;

    let (sessions, skipped) = ingest::parse_session_rows(&input);
    if skipped > 0 {
        eprintln!("skipped {skipped} malformed row(s)");
    }

    let outcome = mine(&sessions, MiningConfig::default())?;
    println!("{}", serde_json::to_string_pretty(&outcome.buckets)?);
    Ok(())
}
