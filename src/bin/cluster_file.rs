//! Binary for clustering a delimited text file of numeric vectors.
//!
//! Reads one item per line (fields separated by comma, semicolon, tab or
//! space, no header), runs a single ART-2a clustering pass and prints a
//! per-cluster summary.
//!
//! Usage: `cluster-file <input> <vigilance> <seed> <max_epochs>`

use art2a_rs::{Art2a, Art2aConfig, Metric};
use std::env;
use std::fs;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args: Vec<String> = env::args().collect();

    if args.len() != 5 {
        eprintln!("Usage: {} <input> <vigilance> <seed> <max_epochs>", args[0]);
        std::process::exit(1);
    }

    let input_path = &args[1];
    let vigilance: f32 = args[2].parse()?;
    let seed: u64 = args[3].parse()?;
    let max_epochs: usize = args[4].parse()?;

    let rows = parse_delimited(&fs::read_to_string(input_path)?)?;
    eprintln!(
        "Loaded data: {} items x {} features",
        rows.len(),
        rows.first().map_or(0, Vec::len)
    );
    eprintln!(
        "Clustering with vigilance={}, seed={}, max_epochs={}",
        vigilance, seed, max_epochs
    );

    let config = Art2aConfig::default()
        .with_max_epochs(max_epochs)
        .with_seed(seed);
    let model = Art2a::with_config(config, Metric::Cosine);

    let data = model.preprocess_rows(&rows)?;
    let result = model.cluster(&data, vigilance)?;

    println!(
        "clusters: {}  epochs: {}  converged: {}  overflow: {}  unassigned: {}",
        result.n_clusters(),
        result.epochs_run(),
        result.converged(),
        result.overflow(),
        result.n_unassigned()
    );
    for c in 0..result.n_clusters() {
        let size = result.cluster_size(c)?;
        if size == 0 {
            println!("cluster {:>4}: empty", c);
            continue;
        }
        println!(
            "cluster {:>4}: {:>6} members, representative item {}",
            c,
            size,
            result.representative_index(c)?
        );
    }

    Ok(())
}

/// Parse separator-delimited numeric lines into row vectors. Blank lines are
/// skipped; field validation (ragged rows etc.) is left to the library.
fn parse_delimited(content: &str) -> Result<Vec<Vec<f32>>, Box<dyn std::error::Error>> {
    let mut rows = Vec::new();
    for line in content.lines() {
        if line.trim().is_empty() {
            continue;
        }
        let row = line
            .split(|c: char| matches!(c, ',' | ';' | '\t' | ' '))
            .filter(|field| !field.is_empty())
            .map(str::parse::<f32>)
            .collect::<Result<Vec<f32>, _>>()?;
        rows.push(row);
    }
    Ok(rows)
}
