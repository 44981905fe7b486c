use std::time::Duration;

use clap::builder::RangedI64ValueParser;
use clap::{Parser, Subcommand};
use hashpass_analyzer::debug::{DEBUG_CHARSET, DEBUG_LENGTH, debug_hash};
use hashpass_analyzer::{
    AnalysisKind, Control, DEFAULT_ITERATIONS, Error, ITERATIONS_ENV, MAX_ITERATIONS,
    MIN_ITERATIONS, run_analysis,
};
use hashpass_synth::{
    Algorithm, CharClasses, CharacterSet, HashFunction, PasswordSynthesizer, evaluate,
};
use indicatif::{ProgressBar, ProgressStyle};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "hashpass")]
#[command(about = "Hash-driven password generation and analysis")]
struct Args {
    /// Enable debug logging (RUST_LOG takes precedence)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Generate passwords
    Generate(GenerateArgs),
    /// Run a performance or distribution analysis
    Analyze(AnalyzeArgs),
    /// Print sample passwords and raw hash mappings per strategy
    Debug(DebugArgs),
}

#[derive(clap::Args, Debug)]
struct GenerateArgs {
    /// Password length in characters
    #[arg(short, long, default_value_t = 12)]
    length: usize,

    /// Hash strategy: division, multiplicative or universal
    #[arg(short, long, default_value = "universal")]
    algorithm: Algorithm,

    /// Explicit character set, replaces the class flags
    #[arg(long, conflicts_with_all = ["no_upper", "no_lower", "no_digits", "symbols"])]
    charset: Option<String>,

    /// Exclude uppercase letters
    #[arg(long)]
    no_upper: bool,

    /// Exclude lowercase letters
    #[arg(long)]
    no_lower: bool,

    /// Exclude digits
    #[arg(long)]
    no_digits: bool,

    /// Include symbols
    #[arg(long)]
    symbols: bool,

    /// Number of passwords to generate
    #[arg(short = 'n', long, default_value_t = 1)]
    count: u32,

    /// Print a strength rating next to each password
    #[arg(long)]
    strength: bool,
}

#[derive(clap::Args, Debug)]
struct AnalyzeArgs {
    /// Analysis to run: performance, distribution, containers or complete
    kind: AnalysisKind,

    /// Iterations per algorithm (also the distribution sample count)
    #[arg(
        short,
        long,
        env = ITERATIONS_ENV,
        default_value_t = DEFAULT_ITERATIONS,
        value_parser = iteration_parser(),
    )]
    iterations: u32,

    /// Print the report as JSON
    #[arg(long)]
    json: bool,

    /// Disable progress bar
    #[arg(long)]
    no_progress: bool,
}

#[derive(clap::Args, Debug)]
struct DebugArgs {
    /// Hash strategy to inspect, all of them when omitted
    #[arg(short, long)]
    algorithm: Option<Algorithm>,

    /// Sample password length in characters
    #[arg(short, long, default_value_t = DEBUG_LENGTH)]
    length: usize,

    /// Character set the samples draw from
    #[arg(long, default_value = DEBUG_CHARSET)]
    charset: String,

    /// Print the reports as JSON
    #[arg(long)]
    json: bool,
}

fn iteration_parser() -> RangedI64ValueParser<u32> {
    let range = i64::from(MIN_ITERATIONS)..=i64::from(MAX_ITERATIONS);
    clap::value_parser!(u32).range(range)
}

#[tokio::main]
async fn main() -> Result<(), Error> {
    let args = Args::parse();

    let default_level = if args.verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    match args.command {
        Command::Generate(args) => generate(args),
        Command::Analyze(args) => analyze(args).await,
        Command::Debug(args) => debug(args),
    }
}

fn generate(args: GenerateArgs) -> Result<(), Error> {
    let charset = match &args.charset {
        Some(chars) => CharacterSet::new(chars)?,
        None => CharacterSet::from_classes(CharClasses {
            uppercase: !args.no_upper,
            lowercase: !args.no_lower,
            digits: !args.no_digits,
            symbols: args.symbols,
        })?,
    };

    let mut synth = PasswordSynthesizer::new(args.algorithm)?;
    tracing::info!(algorithm = %args.algorithm, size = charset.len(), "generating passwords");

    for _ in 0..args.count {
        let password = synth.generate(&charset, args.length)?;
        if args.strength {
            println!("{password}  {}", evaluate(&password));
        } else {
            println!("{password}");
        }
    }

    Ok(())
}

fn debug(args: DebugArgs) -> Result<(), Error> {
    let charset = CharacterSet::new(&args.charset)?;
    let algorithms = match args.algorithm {
        Some(algorithm) => vec![algorithm],
        None => Algorithm::ALL.to_vec(),
    };

    for algorithm in algorithms {
        let report = debug_hash(HashFunction::new(algorithm)?, &charset, args.length)?;
        if args.json {
            println!("{}", serde_json::to_string_pretty(&report)?);
        } else {
            println!("{report}");
        }
    }

    Ok(())
}

async fn analyze(args: AnalyzeArgs) -> Result<(), Error> {
    let ctl = Control::new();
    let total = args.kind.work_units(args.iterations);

    // Set up progress bar
    let progress_bar = if !args.no_progress {
        let pb = ProgressBar::new(total);
        pb.set_style(
            ProgressStyle::default_bar()
                .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} ({percent}%) {msg}")
                .expect("Invalid progress bar template")
                .progress_chars("#>-"),
        );
        pb.set_message(args.kind.label());
        Some(pb)
    } else {
        None
    };

    // Spawn progress updater task
    let progress_ctl = ctl.clone();
    let progress_bar_clone = progress_bar.clone();
    let progress_task = tokio::spawn(async move {
        loop {
            tokio::time::sleep(Duration::from_millis(100)).await;
            let current = progress_ctl.progress();
            if let Some(ref pb) = progress_bar_clone {
                pb.set_position(current);
            }
            if current >= total {
                break;
            }
        }
    });

    // Ctrl-C cancels between iterations
    let signal_ctl = ctl.clone();
    let signal_task = tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            tracing::warn!("interrupt received, cancelling analysis");
            signal_ctl.cancel();
        }
    });

    tracing::info!(kind = %args.kind, iterations = args.iterations, "starting analysis");
    let result = run_analysis(args.kind, args.iterations, ctl).await;

    // Clean up progress
    progress_task.abort();
    signal_task.abort();
    if let Some(pb) = progress_bar {
        match &result {
            Ok(_) => pb.finish_with_message("done"),
            Err(_) => pb.abandon_with_message("failed"),
        }
    }

    let report = result?;
    if args.json {
        println!("{}", report.to_json()?);
    } else {
        println!("{report}");
    }

    Ok(())
}
