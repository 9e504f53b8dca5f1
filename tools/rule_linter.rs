/// Rule Linter: validates visual rule tables.
///
/// Usage: rule_linter <rules.ron | rules_dir> [--with-builtin]
///
/// Lints the given tables appended in load order. With --with-builtin the
/// built-in table goes first, so overlaps with it are reported too.
use anyhow::{bail, Result};
use clap::Parser;
use std::path::PathBuf;
use std::process;
use tracing::warn;

use storymode::cli::{init_tracing, LogArgs};
use storymode::core::rules::VisualRuleSet;

#[derive(Parser, Debug)]
#[command(name = "rule_linter")]
#[command(about = "Check visual rule tables for dead or overlapping rules", long_about = None)]
struct Args {
    /// Rule file or directory of .ron rule files
    path: PathBuf,

    /// Lint together with the built-in table
    #[arg(long)]
    with_builtin: bool,

    #[command(flatten)]
    log: LogArgs,
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_tracing(&args.log);

    let mut rules = if args.with_builtin {
        VisualRuleSet::builtin()
    } else {
        VisualRuleSet::default()
    };
    let mut load_errors = Vec::new();

    if args.path.is_file() {
        rules.merge(VisualRuleSet::load_from_ron(&args.path)?);
    } else if args.path.is_dir() {
        let load = VisualRuleSet::load_dir(&args.path);
        for (path, count) in &load.loaded {
            println!("  Loaded: {} ({} rules)", path.display(), count);
        }
        for (path, e) in &load.failures {
            warn!(path = %path.display(), error = %e, "rule file failed to load");
            load_errors.push(format!("cannot load {}: {}", path.display(), e));
        }
        rules.merge(load.rules);
    } else {
        bail!("Path '{}' does not exist", args.path.display());
    }

    println!("Loaded {} visual rules", rules.len());

    let lint = rules.lint();

    println!("\n=== Visual Rule Lint Report ===\n");

    if lint.is_clean() && load_errors.is_empty() {
        println!("All checks passed!");
    }

    for warning in &lint.warnings {
        println!("WARNING: {}", warning);
    }

    for error in load_errors.iter().chain(&lint.errors) {
        println!("ERROR: {}", error);
    }

    let error_count = load_errors.len() + lint.errors.len();
    println!(
        "\nSummary: {} errors, {} warnings",
        error_count,
        lint.warnings.len()
    );

    if error_count > 0 {
        process::exit(1);
    }
    Ok(())
}
