use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{ArgAction, Args, Parser, Subcommand};
use tracing::level_filters::LevelFilter;
use tracing::{debug, info};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, EnvFilter, Layer};

use bst_ipl::study::{self, StudyConfig};
use bst_ipl::Tree;

/// Builds a binary search tree, deletes a few keys from it and reports its internal path length.
#[derive(Parser, Debug)]
#[command(name = "bst-ipl", version, about, args_conflicts_with_subcommands = true)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,

    #[command(flatten)]
    walk: WalkArgs,

    /// More logging: -v info, -vv debug, -vvv trace. `RUST_LOG` wins when set.
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Track the normalized IPL of random trees under insert/delete pairs, comparing plain and
    /// symmetric deletion.
    Study(StudyArgs),
}

#[derive(Args, Debug)]
struct StudyArgs {
    /// Keys in each tree.
    #[arg(short = 'n', long, default_value_t = 64)]
    size: usize,

    /// Insert/delete pairs per trial [default: 100 × size].
    #[arg(short, long)]
    pairs: Option<usize>,

    /// Trials to average over.
    #[arg(short, long, default_value_t = 2)]
    trials: usize,

    /// Seed for the random keys.
    #[arg(long, default_value_t = 0)]
    seed: u64,

    /// Print a row every this many pairs.
    #[arg(long, default_value_t = 100, value_parser = clap::value_parser!(u64).range(1..))]
    every: u64,
}

#[derive(Args, Debug)]
struct WalkArgs {
    /// Keys to insert, in order.
    #[arg(
        value_name = "KEY",
        default_values_t = [10, 5, 15, 2, 7, 20],
        allow_negative_numbers = true
    )]
    keys: Vec<i32>,

    /// Key to delete once the tree is built. May be repeated; deletions happen in order.
    #[arg(
        short,
        long = "delete",
        value_name = "KEY",
        default_values_t = [2, 15, 10],
        allow_negative_numbers = true
    )]
    deletes: Vec<i32>,

    /// Skip all deletions.
    #[arg(long, conflicts_with = "deletes")]
    no_delete: bool,

    /// Write a Graphviz DOT description of the final tree to this file.
    #[arg(long, value_name = "PATH")]
    dot: Option<PathBuf>,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    setup_logging(cli.verbose)?;
    debug!(?cli, "parsed arguments");

    match &cli.command {
        Some(Command::Study(args)) => run_study(args),
        None => {
            run_walk(&cli.walk);
            Ok(())
        }
    }
}

/// Builds the tree, deletes from it and reports as it goes.
fn run_walk(cli: &WalkArgs) {
    let mut tree: Tree<i32> = cli.keys.iter().copied().collect();
    info!(nodes = tree.len(), height = tree.height(), "built tree");
    println!("BST before deletion: {}", format_keys(&tree));

    let deletes: &[i32] = if cli.no_delete { &[] } else { &cli.deletes };
    for key in deletes {
        if tree.delete(key) {
            println!("BST after deleting {}: {}", key, format_keys(&tree));
        } else {
            println!("BST after deleting {} (not found): {}", key, format_keys(&tree));
        }
    }

    println!("Internal Path Length: {}", tree.ipl());

    if let Some(path) = &cli.dot {
        // A failed export is reported, not fatal.
        match tree.save_dot(path) {
            Ok(()) => println!("DOT file saved: {}", path.display()),
            Err(e) => eprintln!("Error: {}", e),
        }
    }
}

/// Runs the IPL study and prints a tab separated table of normalized IPLs.
fn run_study(args: &StudyArgs) -> Result<()> {
    let config = StudyConfig {
        pairs: args.pairs.unwrap_or(args.size * 100),
        trials: args.trials,
        seed: args.seed,
        ..StudyConfig::new(args.size)
    };
    let trace = study::run(&config).context("invalid study settings")?;

    println!(
        "# tree size {}, {} pairs, {} trials, expected IPL {:.3}",
        config.tree_size,
        config.pairs,
        config.trials,
        study::expected_ipl(config.tree_size)
    );
    println!("pairs\tasymmetric\tsymmetric");
    let rows = trace.asymmetric.iter().zip(&trace.symmetric).enumerate();
    for (pair, (asymmetric, symmetric)) in rows {
        if pair as u64 % args.every == 0 || pair == config.pairs {
            println!("{}\t{:.4}\t{:.4}", pair, asymmetric, symmetric);
        }
    }
    Ok(())
}

/// The keys of `tree` in order, separated by spaces.
fn format_keys(tree: &Tree<i32>) -> String {
    tree.traverse()
        .map(|key| key.to_string())
        .collect::<Vec<_>>()
        .join(" ")
}

fn setup_logging(verbosity: u8) -> Result<()> {
    let level = match verbosity {
        0 => LevelFilter::WARN,
        1 => LevelFilter::INFO,
        2 => LevelFilter::DEBUG,
        _ => LevelFilter::TRACE,
    };
    let filter = EnvFilter::builder()
        .with_default_directive(level.into())
        .from_env_lossy();

    let fmt_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_filter(filter);

    tracing_subscriber::registry()
        .with(fmt_layer)
        .try_init()
        .context("failed to set up logging")
}
