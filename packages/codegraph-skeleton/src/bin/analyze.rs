//! CLI entry point: run the analyzer over a directory and print a summary or
//! a JSON dump of the result. Grounded on `src/bin/bench-codegraph.rs`'s
//! clap-derive subcommand pattern.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use codegraph_skeleton::analyzer::analyze_project;
use codegraph_skeleton::config::AnalyzerConfig;
use codegraph_skeleton::features::changes::ChangeDetector;
use codegraph_skeleton::features::fingerprint::FingerprintEngine;

#[derive(Parser)]
#[command(name = "codegraph-skeleton")]
#[command(about = "Extract the structural skeleton of a Python project", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the full four-pass analysis once and print a summary or JSON.
    Analyze {
        /// Project root to scan.
        #[arg(short, long)]
        root: PathBuf,

        /// Print the full `AnalysisResult` as JSON instead of a summary.
        #[arg(long)]
        json: bool,

        /// Exclude docstrings from fingerprint composition.
        #[arg(long)]
        no_docstrings: bool,

        /// Pin the Pass 2 worker thread count (default: rayon's global pool).
        #[arg(long)]
        threads: Option<usize>,

        /// Persist the resulting fingerprint cache to this path for later `diff` runs.
        #[arg(long)]
        save_cache: Option<PathBuf>,
    },

    /// Re-analyze a project against a previously saved fingerprint cache and
    /// print the (added, removed, modified) change set.
    Diff {
        /// Project root to scan.
        #[arg(short, long)]
        root: PathBuf,

        /// Path to a cache file written by a prior `analyze --save-cache`.
        #[arg(long)]
        cache: PathBuf,

        /// Print the change set as JSON instead of a summary.
        #[arg(long)]
        json: bool,
    },
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Analyze { root, json, no_docstrings, threads, save_cache } => {
            run_analyze(root, json, no_docstrings, threads, save_cache)
        }
        Commands::Diff { root, cache, json } => run_diff(root, cache, json),
    }
}

fn build_config(root: PathBuf, no_docstrings: bool, threads: Option<usize>) -> AnalyzerConfig {
    let mut config = AnalyzerConfig::new(root.to_string_lossy().to_string());
    config.include_docstrings = !no_docstrings;
    config.thread_count = threads;
    config
}

fn run_analyze(
    root: PathBuf,
    json: bool,
    no_docstrings: bool,
    threads: Option<usize>,
    save_cache: Option<PathBuf>,
) {
    let config = build_config(root, no_docstrings, threads);
    let result = analyze_project(config);

    if let Some(cache_path) = save_cache {
        let engine = FingerprintEngine { include_docstrings: !no_docstrings };
        let mut detector = ChangeDetector::new(engine);
        detector.initialize_from_modules(&result.modules);
        if let Err(e) = detector.save_to_path(&cache_path) {
            eprintln!("failed to save cache to {}: {e}", cache_path.display());
            std::process::exit(1);
        }
    }

    if json {
        match serde_json::to_string_pretty(&result) {
            Ok(s) => println!("{s}"),
            Err(e) => {
                eprintln!("failed to serialize result: {e}");
                std::process::exit(1);
            }
        }
        return;
    }

    println!("packages:      {}", result.packages.len());
    println!("modules:       {}", result.modules.len());
    println!("relationships: {}", result.relationships.len());
    println!("fingerprints:  {}", result.fingerprints.len());
    if !result.errors.is_empty() {
        println!("errors:        {}", result.errors.len());
        for e in &result.errors {
            println!("  - {e}");
        }
    }
}

fn run_diff(root: PathBuf, cache_path: PathBuf, json: bool) {
    let engine = FingerprintEngine::default();
    let mut detector = match ChangeDetector::load_from_path(engine, &cache_path) {
        Ok(d) => d,
        Err(e) => {
            eprintln!("failed to load cache from {}: {e}", cache_path.display());
            std::process::exit(1);
        }
    };

    let config = AnalyzerConfig::new(root.to_string_lossy().to_string());
    let result = analyze_project(config);

    let mut files: Vec<(String, Option<codegraph_skeleton::domain::model::Module>)> = Vec::new();
    let mut seen: std::collections::HashSet<String> = std::collections::HashSet::new();
    for module in &result.modules {
        seen.insert(module.path.clone());
        files.push((module.path.clone(), Some(module.clone())));
    }
    for cached in detector.get_all_modules() {
        if !seen.contains(&cached.path) {
            files.push((cached.path.clone(), None));
        }
    }

    let change_set = detector.detect_changes_batch(&files);

    if json {
        match serde_json::to_string_pretty(&change_set) {
            Ok(s) => println!("{s}"),
            Err(e) => {
                eprintln!("failed to serialize change set: {e}");
                std::process::exit(1);
            }
        }
        return;
    }

    println!("added:    {}", change_set.added.len());
    println!("removed:  {}", change_set.removed.len());
    println!("modified: {}", change_set.modified.len());
    for name in &change_set.added {
        println!("  + {name}");
    }
    for name in &change_set.removed {
        println!("  - {name}");
    }
    for name in &change_set.modified {
        println!("  ~ {name}");
    }
}
