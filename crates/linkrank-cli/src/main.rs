#![forbid(unsafe_code)]

mod cmd;
mod output;

use clap::{CommandFactory, Parser, Subcommand};
use linkrank_core::ErrorCode;
use linkrank_core::config::{EffectiveConfig, resolve_config};
use output::{CliError, OutputMode, render_error, resolve_output_mode};
use std::env;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::{debug, info};
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

#[cfg(feature = "mimalloc")]
#[global_allocator]
static GLOBAL: mimalloc::MiMalloc = mimalloc::MiMalloc;

#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "linkrank: PageRank scores for crawled link graphs",
    long_about = None
)]
struct Cli {
    /// Enable verbose logging.
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Output format.
    #[arg(long, global = true, value_enum)]
    format: Option<OutputMode>,

    /// Emit JSON output (alias for --format json).
    #[arg(long, global = true, hide = true)]
    json: bool,

    /// Config file to use instead of .linkrank/config.toml.
    #[arg(long, global = true, value_name = "PATH")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    #[command(
        about = "Rank pages by PageRank",
        after_help = "EXAMPLES:\n    # Rank an analyzer matrix\n    linkrank rank data/adjacency_matrix.json\n\n    # Top five pages of an edge list, stopping once stable\n    linkrank rank links.txt --top 5 --tolerance 1e-8"
    )]
    Rank(cmd::rank::RankArgs),

    #[command(about = "Show link statistics for a dataset")]
    Summary(cmd::summary::SummaryArgs),

    #[command(about = "Rank the built-in four-page demo site")]
    Demo,

    #[command(about = "Generate shell completions")]
    Completions(cmd::completions::CompletionsArgs),
}

fn init_tracing(verbose: bool) {
    let filter = EnvFilter::try_from_env("LINKRANK_LOG").unwrap_or_else(|_| {
        EnvFilter::new(if verbose || env::var("DEBUG").is_ok() {
            "linkrank=debug,info"
        } else {
            "linkrank=info,warn"
        })
    });

    let format = env::var("LINKRANK_LOG_FORMAT").unwrap_or_else(|_| "compact".to_string());

    let registry = tracing_subscriber::registry().with(filter);

    // Logs go to stderr so stdout stays parseable.
    match format.as_str() {
        "json" => {
            registry
                .with(fmt::layer().json().with_ansi(false).with_writer(std::io::stderr))
                .init();
        }
        _ => {
            registry
                .with(fmt::layer().compact().with_writer(std::io::stderr))
                .init();
        }
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    if cli.verbose {
        info!("Verbose mode enabled");
    }

    let config = match load_config(&cli) {
        Ok(config) => config,
        Err(err) => {
            let mode = resolve_output_mode(cli.format, cli.json, None);
            return fail(mode, &CliError::from_anyhow(&err, ErrorCode::ConfigParseError));
        }
    };
    let output = resolve_output_mode(cli.format, cli.json, config.format.as_deref());
    debug!(?output, ?config, "resolved settings");

    let command_result = match cli.command {
        Commands::Rank(ref args) => cmd::rank::run_rank(args, &config, output),
        Commands::Summary(ref args) => cmd::summary::run_summary(args, output),
        Commands::Demo => cmd::rank::run_demo(&config, output),
        Commands::Completions(ref args) => {
            let mut command = Cli::command();
            cmd::completions::run_completions(args.shell, &mut command)
        }
    };

    match command_result {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => fail(output, &CliError::from_anyhow(&err, ErrorCode::InputParseError)),
    }
}

fn load_config(cli: &Cli) -> anyhow::Result<EffectiveConfig> {
    let project_root = env::current_dir()?;
    resolve_config(&project_root, cli.config.as_deref())
}

fn fail(mode: OutputMode, error: &CliError) -> ExitCode {
    if render_error(mode, error).is_err() {
        eprintln!("error: {}", error.message);
    }
    ExitCode::FAILURE
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn json_flag_parses_before_subcommand() {
        let cli = Cli::parse_from(["linkrank", "--json", "demo"]);
        assert!(cli.json);
        assert!(matches!(cli.command, Commands::Demo));
    }

    #[test]
    fn format_flag_after_subcommand() {
        let cli = Cli::parse_from(["linkrank", "rank", "--format", "text"]);
        assert_eq!(cli.format, Some(OutputMode::Text));
    }

    #[test]
    fn rank_subcommand_parses_all_flags() {
        let cli = Cli::parse_from([
            "linkrank",
            "rank",
            "links.json",
            "--damping",
            "0.9",
            "--iterations",
            "50",
            "--tolerance",
            "1e-8",
            "--top",
            "3",
            "--max-nodes",
            "500",
        ]);
        let Commands::Rank(args) = cli.command else {
            panic!("expected rank");
        };
        assert_eq!(args.input, Some(PathBuf::from("links.json")));
        assert_eq!(args.damping, Some(0.9));
        assert_eq!(args.iterations, Some(50));
        assert_eq!(args.tolerance, Some(1e-8));
        assert_eq!(args.top, Some(3));
        assert_eq!(args.max_nodes, Some(500));
    }

    #[test]
    fn fixed_conflicts_with_tolerance() {
        let cli = Cli::parse_from(["linkrank", "rank", "--fixed"]);
        let Commands::Rank(args) = cli.command else {
            panic!("expected rank");
        };
        assert!(args.fixed);

        let err = Cli::try_parse_from(["linkrank", "rank", "--fixed", "--tolerance", "1e-6"])
            .unwrap_err();
        assert_eq!(err.kind(), clap::error::ErrorKind::ArgumentConflict);
    }

    #[test]
    fn rank_input_is_optional() {
        let cli = Cli::parse_from(["linkrank", "rank"]);
        let Commands::Rank(args) = cli.command else {
            panic!("expected rank");
        };
        assert!(args.input.is_none());
    }

    #[test]
    fn config_flag_is_global() {
        let cli = Cli::parse_from(["linkrank", "summary", "--config", "alt.toml", "in.txt"]);
        assert_eq!(cli.config, Some(PathBuf::from("alt.toml")));
        assert!(matches!(cli.command, Commands::Summary(_)));
    }

    #[test]
    fn completions_subcommand_parses() {
        let cli = Cli::parse_from(["linkrank", "completions", "bash"]);
        assert!(matches!(cli.command, Commands::Completions(_)));
    }

    #[test]
    fn all_subcommands_listed() {
        let cmd = Cli::command();
        let names: Vec<&str> = cmd.get_subcommands().map(clap::Command::get_name).collect();
        for expected in ["rank", "summary", "demo", "completions"] {
            assert!(names.contains(&expected), "missing subcommand {expected}");
        }
    }

    #[test]
    fn cli_definition_is_valid() {
        Cli::command().debug_assert();
    }
}
