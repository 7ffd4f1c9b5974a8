use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;
use std::time::Instant;
use tracing_subscriber::EnvFilter;

use lead_bro::filter::{filter_leads, LeadFilter};
use lead_bro::pipeline::{rank, score_records};

const EXIT_SUCCESS: i32 = 0;
const EXIT_INPUT: i32 = 2;
const EXIT_CONFIG: i32 = 4;

#[derive(ValueEnum, Clone, Copy, Debug, Default)]
enum OutputFormat {
    #[default]
    Table,
    Tsv,
    Json,
}

#[derive(Args, Debug)]
struct ScoreArgs {
    /// Lead file to score (.csv or .json)
    input: PathBuf,

    /// Only show leads scoring at least this much
    #[arg(long)]
    min_score: Option<u32>,

    /// Only show leads scoring at most this much
    #[arg(long)]
    max_score: Option<u32>,

    /// Only show leads in this industry (repeatable)
    #[arg(long = "industry")]
    industries: Vec<String>,

    /// Only show leads with a flag containing this text (e.g. "linkedin")
    #[arg(long)]
    flag: Option<String>,

    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Table)]
    format: OutputFormat,

    /// Export the shown leads as CSV (defaults to scored_leads_<timestamp>.csv)
    #[arg(long, num_args = 0..=1, value_name = "PATH")]
    export: Option<Option<PathBuf>>,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Score, rank and filter leads from a file
    Score(ScoreArgs),
    /// Print the effective scoring rules as YAML
    Rules,
    /// Write the default rules to the config file
    Init {
        /// Overwrite an existing config file
        #[arg(long)]
        force: bool,
    },
}

#[derive(Parser, Debug)]
#[command(name = "lead-bro")]
#[command(about = "Lead scoring and data-quality flagging CLI", long_about = None)]
#[command(version)]
struct Cli {
    /// Enable verbose logging and score breakdowns
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Path to config file (defaults to ~/.config/lead-bro/config.yaml)
    #[arg(short, long, global = true)]
    config: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

fn init_tracing(verbose: bool) {
    let default_directive = if verbose { "lead_bro=debug" } else { "lead_bro=warn" };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directive));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let config_path = cli.config.map(PathBuf::from);

    if let Commands::Init { force } = cli.command {
        let path = match config_path.map(Ok).unwrap_or_else(lead_bro::config::get_config_path) {
            Ok(p) => p,
            Err(e) => {
                eprintln!("Config error: {}", e);
                std::process::exit(EXIT_CONFIG);
            }
        };
        if let Err(e) = lead_bro::config::write_default_config(&path, force) {
            eprintln!("Config error: {:#}", e);
            std::process::exit(EXIT_CONFIG);
        }
        println!("Config written to {}", path.display());
        std::process::exit(EXIT_SUCCESS);
    }

    // Load config
    let config = match lead_bro::config::load_config(config_path) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Config error: {:#}", e);
            std::process::exit(EXIT_CONFIG);
        }
    };

    // Validate rules at startup
    if let Err(errors) = config.validate() {
        eprintln!("Config errors:");
        for error in errors {
            eprintln!("  - {}", error);
        }
        std::process::exit(EXIT_CONFIG);
    }
    let rules = config.rules();

    match cli.command {
        Commands::Rules => {
            let effective = lead_bro::config::Config::from_rules(&rules);
            match serde_saphyr::to_string(&effective) {
                Ok(yaml) => print!("{}", yaml),
                Err(e) => {
                    eprintln!("Failed to serialize rules: {}", e);
                    std::process::exit(EXIT_CONFIG);
                }
            }
        }
        Commands::Score(args) => run_score(args, &rules, cli.verbose),
        Commands::Init { .. } => unreachable!("handled before config load"),
    }

    std::process::exit(EXIT_SUCCESS);
}

fn run_score(args: ScoreArgs, rules: &lead_bro::Rules, verbose: bool) {
    let start_time = Instant::now();

    let table = match lead_bro::input::read_leads(&args.input) {
        Ok(t) => t,
        Err(e) => {
            eprintln!("Input error: {:#}", e);
            std::process::exit(EXIT_INPUT);
        }
    };
    tracing::debug!(rows = table.records.len(), "read input");

    let mut report = score_records(table.records, rules);
    let total = report.total();

    // Malformed rows are reported but never stop the batch
    for rejected in &report.rejected {
        eprintln!("Row {}: {}", rejected.index + 1, rejected.error);
    }

    rank(&mut report.scored);

    let filter = LeadFilter {
        min_score: args.min_score,
        max_score: args.max_score,
        industries: args.industries,
        flag_query: args.flag,
    };
    let shown = filter_leads(report.scored, &filter);

    match args.format {
        OutputFormat::Table => {
            let use_colors = lead_bro::output::should_use_colors();
            println!(
                "{}",
                lead_bro::output::format_scored_table(&shown, use_colors)
            );
            if verbose {
                for (i, scored) in shown.iter().enumerate() {
                    println!();
                    println!(
                        "{}. {} (score {})",
                        i + 1,
                        lead_bro::output::lead_label(scored),
                        scored.result.score
                    );
                    println!("{}", lead_bro::output::format_breakdown(&scored.result));
                }
            }
        }
        OutputFormat::Tsv => {
            let output = lead_bro::output::format_tsv(&shown);
            if !output.is_empty() {
                println!("{}", output);
            }
        }
        OutputFormat::Json => match lead_bro::output::format_json(&shown) {
            Ok(json) => println!("{}", json),
            Err(e) => {
                eprintln!("Failed to serialize results: {}", e);
                std::process::exit(EXIT_INPUT);
            }
        },
    }

    eprintln!(
        "{} leads processed, {} rejected, {} matching filter",
        total,
        report.rejected.len(),
        shown.len()
    );

    if let Some(export) = args.export {
        let path = export.unwrap_or_else(|| lead_bro::output::default_export_path(chrono::Local::now()));
        if let Err(e) = lead_bro::output::export_csv(&path, &table.headers, &shown) {
            eprintln!("Export error: {:#}", e);
            std::process::exit(EXIT_INPUT);
        }
        eprintln!("Exported {} leads to {}", shown.len(), path.display());
    }

    tracing::debug!(elapsed = ?start_time.elapsed(), "done");
}
