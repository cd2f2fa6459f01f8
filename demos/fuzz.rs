//! Randomized cross-check of diagrams against the brute-force oracle.
//!
//! For every variable count in the requested range, random DNF formulas are
//! compiled and evaluated on all assignments; the report lists passing tests,
//! the average reduction against the unreduced tree, and average build time.
//!
//! Run with:
//! ```bash
//! cargo run --release --example fuzz -- --min-vars 4 --max-vars 14 --tests 50 --best-order
//! ```

use std::collections::BTreeMap;
use std::time::{Duration, Instant};

use clap::Parser;
use log::{debug, info};
use rand::rngs::StdRng;
use rand::SeedableRng;

use dnf_bdd::diagram::Diagram;
use dnf_bdd::generate::random_dnf;
use dnf_bdd::oracle::verify;

#[derive(Debug, Parser)]
#[command(author, version)]
struct Cli {
    /// Smallest number of variables.
    #[arg(long, value_name = "INT", default_value = "4")]
    min_vars: usize,

    /// Largest number of variables.
    #[arg(long, value_name = "INT", default_value = "12")]
    max_vars: usize,

    /// Formulas per variable count.
    #[arg(long, value_name = "INT", default_value = "20")]
    tests: usize,

    /// Search for the best rotation instead of using the sorted order.
    #[arg(long)]
    best_order: bool,

    /// Seed for the formula generator.
    #[arg(long, value_name = "INT")]
    seed: Option<u64>,

    /// Print one line per formula.
    #[arg(short, long)]
    verbose: bool,

    /// Log level (off, error, warn, info, debug, trace).
    #[arg(long, value_name = "LEVEL", default_value = "info")]
    log_level: simplelog::LevelFilter,
}

#[derive(Debug, Default)]
struct Summary {
    passed: usize,
    reduction: f64,
    build_time: Duration,
}

fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;

    let args = Cli::parse();

    simplelog::TermLogger::init(
        args.log_level,
        simplelog::Config::default(),
        simplelog::TerminalMode::Mixed,
        simplelog::ColorChoice::Auto,
    )?;
    debug!("args = {:?}", args);

    color_eyre::eyre::ensure!(
        1 <= args.min_vars && args.min_vars <= args.max_vars && args.max_vars <= 26,
        "variable range must satisfy 1 <= min <= max <= 26"
    );
    color_eyre::eyre::ensure!(args.tests > 0, "at least one test per variable count is required");

    let seed = args.seed.unwrap_or_else(rand::random);
    info!("seed = {}", seed);
    let mut rng = StdRng::seed_from_u64(seed);

    let time_total = Instant::now();
    let mut summaries = BTreeMap::new();
    let mut failed = 0;

    for n in args.min_vars..=args.max_vars {
        let mut summary = Summary::default();

        for i in 0..args.tests {
            let dnf = random_dnf(&mut rng, n);

            let start = Instant::now();
            let diagram = if args.best_order {
                Diagram::with_best_order(&dnf)?
            } else {
                Diagram::with_sorted_order(&dnf)?
            };
            summary.build_time += start.elapsed();

            let verification = verify(&diagram)?;
            if verification.is_ok() {
                summary.passed += 1;
            } else {
                failed += 1;
                println!("FAIL ({} variables) {}: {}", n, diagram.order(), dnf);
                for bits in verification.mismatches.iter().take(5) {
                    println!("  mismatch at {}", bits);
                }
            }
            summary.reduction += diagram.reduction_ratio();

            if args.verbose {
                println!(
                    "({} variables) {}. order {}, {} nodes, valid {}/{}",
                    n,
                    i + 1,
                    diagram.order(),
                    diagram.size(),
                    verification.checked - verification.mismatches.len() as u64,
                    verification.checked
                );
            }
        }

        let average_reduction = summary.reduction / args.tests as f64 * 100.0;
        let average_time = summary.build_time / args.tests as u32;
        println!(
            "Testing ({} variables) has finished, successful tests: {}/{}",
            n, summary.passed, args.tests
        );
        println!("Average reduction: {:.3}%", average_reduction);
        println!("Average creation time: {:?}", average_time);
        println!("--------------------------------------------------");
        summaries.insert(n, (average_reduction, average_time));
    }

    println!("Average values by variable count:");
    for (n, (reduction, time)) in &summaries {
        println!("- {} variables: {:.3}%, {:?}", n, reduction, time);
    }
    let total_reduction = summaries.values().map(|(r, _)| r).sum::<f64>() / summaries.len() as f64;
    println!("[ Total average reduction: {:.3}% ]", total_reduction);

    let time_total = time_total.elapsed();
    println!("Done in {:.3} s", time_total.as_secs_f64());

    color_eyre::eyre::ensure!(failed == 0, "{} formulas disagreed with the oracle", failed);
    Ok(())
}
