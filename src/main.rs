use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{ArgGroup, Parser};

use sbml::parallel::ParallelConfig;
use sbml::{run_source, DriverConfig, EvaluatorConfig, NumericPolicy, RunMode};

#[derive(Parser, Debug)]
#[command(name = "sbml")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Line-oriented SBML expression interpreter", long_about = None)]
#[command(group(ArgGroup::new("mode").required(true).args(["parse", "evaluate"])))]
struct Cli {
    /// Print the expression tree of each line
    #[arg(short = 'P')]
    parse: bool,

    /// Evaluate each line and print its value
    #[arg(short = 'E')]
    evaluate: bool,

    /// Source file, one expression per line
    #[arg(value_name = "FILE")]
    file: PathBuf,

    /// Dump trees as JSON (with -P)
    #[arg(long)]
    json: bool,

    /// How `+` treats mixed int/float operands: exact or unified
    #[arg(long, value_name = "POLICY", default_value = "exact")]
    numeric: NumericPolicy,

    /// Evaluate lines on N worker threads
    #[arg(short = 'j', long, value_name = "N")]
    jobs: Option<usize>,
}

impl Cli {
    fn driver_config(&self) -> DriverConfig {
        DriverConfig {
            mode: if self.parse {
                RunMode::Parse
            } else {
                RunMode::Evaluate
            },
            evaluator: EvaluatorConfig {
                numeric_policy: self.numeric,
            },
            parallel: self
                .jobs
                .filter(|&jobs| jobs > 1)
                .map(ParallelConfig::with_parallelism),
            json: self.json,
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = cli.driver_config();

    let source = fs::read_to_string(&cli.file)
        .with_context(|| format!("failed to read '{}'", cli.file.display()))?;

    for outcome in run_source(&source, &config) {
        println!("{}", outcome.render(config.json));
    }

    Ok(())
}
