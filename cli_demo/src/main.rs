extern crate serde_derive;
extern crate stroke_similarity;

use anyhow::{Context, Result};
use serde_derive::{Deserialize, Serialize};
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::time::Instant;
use stroke_similarity::{Drawing, ScorerConfig, StrokeSimilarityScorer};
use tracing_subscriber::EnvFilter;

const ITERS: usize = 10_000;
const DEFAULT_INPUTS: &str = "cli_demo/data/pairs.jsonl";

// One line of the inputs file
#[derive(Serialize, Deserialize)]
struct Input {
    name: String,
    a: Drawing,
    b: Drawing,
}

fn read_inputs(fname: &str) -> Result<Vec<Input>> {
    let mut res: Vec<Input> = Vec::new();
    let file = File::open(fname).with_context(|| format!("failed to open {}", fname))?;
    for (ix, line) in BufReader::new(file).lines().enumerate() {
        let line = line.with_context(|| format!("failed to read {}", fname))?;
        if line.trim().is_empty() {
            continue;
        }
        let input: Input =
            serde_json::from_str(&line).with_context(|| format!("{}:{}: malformed drawing pair", fname, ix + 1))?;
        res.push(input);
    }
    Ok(res)
}

fn read_config(fname: Option<&str>) -> Result<ScorerConfig> {
    match fname {
        Some(fname) => {
            let json = std::fs::read_to_string(fname).with_context(|| format!("failed to read {}", fname))?;
            ScorerConfig::from_json(&json).with_context(|| format!("invalid config in {}", fname))
        }
        None => Ok(ScorerConfig::default()),
    }
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let args: Vec<String> = std::env::args().collect();
    let inputs_fname = args.get(1).map(String::as_str).unwrap_or(DEFAULT_INPUTS);
    let config = read_config(args.get(2).map(String::as_str))?;
    let scorer = StrokeSimilarityScorer::new(config)?;

    tracing::info!(file = inputs_fname, "loading drawing pairs");
    let inputs = read_inputs(inputs_fname)?;
    for input in &inputs {
        println!("{:<24} {}", input.name, scorer.score(&input.a, &input.b));
    }

    tracing::info!(pairs = inputs.len(), cycles = ITERS, "starting evaluation");
    let start = Instant::now();
    let mut checksum = 0f64;
    for _ in 0..ITERS {
        for input in &inputs {
            checksum += scorer.score(&input.a, &input.b).value() as f64;
        }
    }
    let duration = start.elapsed();
    println!("Finished in {:?}. Score checksum: {:.3}.", duration, checksum);
    Ok(())
}
