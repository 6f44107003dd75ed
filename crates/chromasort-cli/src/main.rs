//! `chromasort` command line tool.
//!
//! Generates level packs, runs the QA checks over exported packs and solves
//! single states. Set `RUST_LOG` to see generator and tester progress.

use std::{
    fs,
    io::{self, Write as _},
    path::{Path, PathBuf},
    process::ExitCode,
};

use chromasort_core::{Level, LevelRecord, ModelError, ParseStateError, PuzzleState};
use chromasort_generator::{
    ConfigError, GeneratorConfig, LevelGenerator, PackError, PackFailurePolicy, PackRequest,
    generate_level_pack,
};
use chromasort_qa::BatchTester;
use chromasort_solver::{BfsSolver, Validation};
use clap::Parser as _;

use crate::cli::{Cli, Command, GenerateArgs, SolveArgs, TestArgs};

mod cli;

#[derive(Debug, derive_more::Display, derive_more::Error, derive_more::From)]
enum CliError {
    #[display("failed to read {}: {source}", path.display())]
    #[from(skip)]
    Read { path: PathBuf, source: io::Error },
    #[display("failed to write output: {_0}")]
    Write(io::Error),
    #[display("invalid JSON in {}: {source}", path.display())]
    #[from(skip)]
    Json {
        path: PathBuf,
        source: serde_json::Error,
    },
    #[display("failed to encode JSON: {_0}")]
    Encode(serde_json::Error),
    #[display("invalid configuration: {_0}")]
    Config(ConfigError),
    #[display("{_0}")]
    Pack(PackError),
    #[display("invalid level {id:?}: {source}")]
    #[from(skip)]
    Level { id: String, source: ModelError },
    #[display("invalid state: {_0}")]
    State(ParseStateError),
}

/// Outcome of a command that ran to completion.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Status {
    Passed,
    Failed,
}

fn main() -> ExitCode {
    better_panic::install();
    env_logger::init();

    let cli = Cli::parse();
    let result = match cli.command {
        Command::Generate(args) => generate(&args),
        Command::Test(args) => test(&args),
        Command::Solve(args) => solve(&args),
    };
    match result {
        Ok(Status::Passed) => ExitCode::SUCCESS,
        Ok(Status::Failed) => ExitCode::from(1),
        Err(err) => {
            eprintln!("error: {err}");
            ExitCode::from(2)
        }
    }
}

fn generate(args: &GenerateArgs) -> Result<Status, CliError> {
    let mut config = load_config(args.config.as_deref())?;
    config.strict |= args.strict;
    let generator = LevelGenerator::new(config)?;

    let policy = if args.skip_failed {
        PackFailurePolicy::Skip
    } else {
        PackFailurePolicy::Abort
    };
    let request =
        PackRequest::new(&args.themes, args.count, args.seed).with_failure_policy(policy);
    let pack = generate_level_pack(&generator, &request, |current, total| {
        log::debug!("generated {current}/{total} levels");
    })?;

    for failure in &pack.failed_themes {
        eprintln!("skipped theme {:?}: {}", failure.theme, failure.error);
    }
    let records: Vec<LevelRecord> = pack
        .levels
        .iter()
        .map(|generated| LevelRecord::from(&generated.level))
        .collect();
    let json = serde_json::to_string_pretty(&records)?;
    match &args.output {
        Some(path) => fs::write(path, json + "\n")?,
        None => writeln!(io::stdout().lock(), "{json}")?,
    }
    log::info!(
        "wrote {} levels ({} theme(s) skipped)",
        records.len(),
        pack.failed_themes.len()
    );

    Ok(if pack.failed_themes.is_empty() {
        Status::Passed
    } else {
        Status::Failed
    })
}

fn test(args: &TestArgs) -> Result<Status, CliError> {
    let records = read_json::<Vec<LevelRecord>>(&args.file)?;
    let levels = records
        .into_iter()
        .map(|record| {
            let id = record.id.clone();
            Level::try_from(record).map_err(|source| CliError::Level { id, source })
        })
        .collect::<Result<Vec<_>, _>>()?;

    let config = load_config(args.config.as_deref())?;
    let tester = BatchTester::from_fn(|difficulty| {
        BfsSolver::new(args.limits.apply_to(config.tiers.get(difficulty).limits))
    })
    .with_strict(args.strict);
    let report = tester.report(&levels, |done, total| {
        log::debug!("tested {done}/{total} levels");
    });

    let mut stdout = io::stdout().lock();
    if args.json {
        writeln!(stdout, "{}", serde_json::to_string_pretty(&report)?)?;
    } else {
        write!(stdout, "{report}")?;
    }

    Ok(if report.is_clean() {
        Status::Passed
    } else {
        Status::Failed
    })
}

fn solve(args: &SolveArgs) -> Result<Status, CliError> {
    let state: PuzzleState = args.state.parse()?;
    let validation = Validation::run(&BfsSolver::new(args.limits.to_limits()), &state);

    let mut stdout = io::stdout().lock();
    match (validation.optimal_move_count(), validation.error()) {
        (Some(moves), _) => writeln!(stdout, "solvable in {moves} move(s)")?,
        (None, Some(error)) => writeln!(stdout, "not solved: {error}")?,
        (None, None) => {}
    }
    writeln!(stdout, "states explored: {}", validation.states_explored())?;
    for warning in validation.warnings() {
        writeln!(stdout, "warning: {warning}")?;
    }

    Ok(if validation.is_solvable() {
        Status::Passed
    } else {
        Status::Failed
    })
}

/// Loads a generator configuration, or the defaults when no file is given.
fn load_config(path: Option<&Path>) -> Result<GeneratorConfig, CliError> {
    let config = match path {
        Some(path) => read_json::<GeneratorConfig>(path)?,
        None => GeneratorConfig::default(),
    };
    config.validate()?;
    Ok(config)
}

fn read_json<T>(path: &Path) -> Result<T, CliError>
where
    T: serde::de::DeserializeOwned,
{
    let text = fs::read_to_string(path).map_err(|source| CliError::Read {
        path: path.to_owned(),
        source,
    })?;
    serde_json::from_str(&text).map_err(|source| CliError::Json {
        path: path.to_owned(),
        source,
    })
}
