use anyhow::Result;
use clap::{ArgAction, Parser, Subcommand};
use heart_bayes::{
    batch,
    bayes::{DEFAULT_NEGATIVE_LABEL, DEFAULT_OUTCOME_COLUMN, DEFAULT_POSITIVE_LABEL},
    prompt, report, AttributeSelection, Dataset, EstimatorConfig, LikelihoodEstimator,
};
use log::info;
use std::{
    io::{self, Write},
    path::PathBuf,
    process,
};

#[derive(Parser, Debug)]
#[command(
    name = "heart_bayes",
    version,
    about = "Estimates the likelihood of heart disease from categorical attributes."
)]
struct Args {
    /// Csv dataset with a header row; incomplete rows are ignored.
    #[arg(long, global = true, default_value = "Dataset.csv")]
    dataset: PathBuf,

    /// Name of the outcome column.
    #[arg(long, global = true, default_value = DEFAULT_OUTCOME_COLUMN)]
    outcome: String,

    /// Outcome label meaning heart disease is present.
    #[arg(long, global = true, default_value = DEFAULT_POSITIVE_LABEL)]
    positive: String,

    /// Outcome label meaning heart disease is absent.
    #[arg(long, global = true, default_value = DEFAULT_NEGATIVE_LABEL)]
    negative: String,

    /// Raise log verbosity (-v info, -vv debug). RUST_LOG takes precedence.
    #[arg(short, long, global = true, action = ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List every attribute column with the values observed in the dataset.
    Columns,
    /// Predict a single case, prompting for any value not given with --set.
    Predict {
        #[arg(long = "set", value_name = "COLUMN=VALUE")]
        set: Vec<String>,

        /// Also print the joint scores and per-attribute frequencies.
        #[arg(long)]
        explain: bool,
    },
    /// Predict every row of a csv file and write the results to another.
    Batch { input: PathBuf, output: PathBuf },
}

fn main() {
    let args = Args::parse();
    init_logging(args.verbose);

    if let Err(err) = run(args) {
        eprintln!("Error: {:#}", err);
        process::exit(1);
    }
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();
}

fn run(args: Args) -> Result<()> {
    let dataset = Dataset::from_path(&args.dataset)?;
    let config = EstimatorConfig {
        outcome_column: args.outcome,
        positive_label: args.positive,
        negative_label: args.negative,
    };
    let estimator = LikelihoodEstimator::new(&dataset, config)?;

    let stdout = io::stdout();
    let mut out = stdout.lock();

    match args.command {
        Command::Columns => {
            for (column, values) in estimator.choices() {
                writeln!(out, "{}: {}", column, values.join(", "))?;
            }
        }
        Command::Predict { set, explain } => {
            // Stop before asking for input when no prediction is possible:
            let (positive, negative) = estimator.check_outcomes()?;
            info!("{} positive and {} negative rows", positive, negative);

            let mut selection = AttributeSelection::new();
            for assignment in &set {
                selection.insert_assignment(assignment)?;
            }
            let stdin = io::stdin();
            let selection =
                prompt::collect_selection(&estimator, selection, &mut stdin.lock(), &mut out)?;

            let prediction = estimator.predict(&selection)?;
            writeln!(out)?;
            report::render(&mut out, &estimator, &prediction, explain)?;
        }
        Command::Batch { input, output } => {
            estimator.check_outcomes()?;
            let count = batch::predict_file(&estimator, &input, &output)?;
            writeln!(out, "Wrote {} predictions to {}", count, output.display())?;
        }
    }

    Ok(())
}
