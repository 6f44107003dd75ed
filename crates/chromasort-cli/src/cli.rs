use std::path::PathBuf;

use chromasort_solver::SearchLimits;
use clap::{Args, Parser, Subcommand};

/// Generate, test and solve color-sorting levels.
#[derive(Debug, Parser)]
#[command(version, about, long_about = None)]
pub(crate) struct Cli {
    #[command(subcommand)]
    pub(crate) command: Command,
}

#[derive(Debug, Subcommand)]
pub(crate) enum Command {
    /// Generate a themed level pack as a JSON array of level records.
    Generate(GenerateArgs),
    /// Run the QA checks over a JSON array of level records.
    Test(TestArgs),
    /// Search a single state given in text form, e.g. "4:RBR 4:BRB 4: 4:".
    Solve(SolveArgs),
}

#[derive(Debug, Args)]
pub(crate) struct GenerateArgs {
    /// Theme names, one pack section per theme
    #[arg(short, long = "theme", required = true, num_args = 1..)]
    pub(crate) themes: Vec<String>,

    /// Levels generated for each theme
    #[arg(short, long, default_value_t = 8)]
    pub(crate) count: u32,

    /// Base seed of the pack
    #[arg(short, long, default_value_t = 0)]
    pub(crate) seed: u64,

    /// Generator configuration as JSON; missing fields keep their defaults
    #[arg(long)]
    pub(crate) config: Option<PathBuf>,

    /// Reject candidates with quality findings
    #[arg(long, default_value_t = false)]
    pub(crate) strict: bool,

    /// Skip themes that cannot be completed instead of aborting
    #[arg(long, default_value_t = false)]
    pub(crate) skip_failed: bool,

    /// Output file; standard output if omitted
    #[arg(short, long)]
    pub(crate) output: Option<PathBuf>,
}

#[derive(Debug, Args)]
pub(crate) struct TestArgs {
    /// JSON file holding an array of level records
    pub(crate) file: PathBuf,

    /// Generator configuration whose per-tier search limits are used
    #[arg(long)]
    pub(crate) config: Option<PathBuf>,

    #[command(flatten)]
    pub(crate) limits: LimitArgs,

    /// Count levels with quality findings as failures
    #[arg(long, default_value_t = false)]
    pub(crate) strict: bool,

    /// Print the report as JSON
    #[arg(long, default_value_t = false)]
    pub(crate) json: bool,
}

#[derive(Debug, Args)]
pub(crate) struct SolveArgs {
    /// Puzzle state in text form
    pub(crate) state: String,

    #[command(flatten)]
    pub(crate) limits: LimitArgs,
}

#[derive(Debug, Clone, Copy, Args)]
pub(crate) struct LimitArgs {
    /// Maximum number of states explored per level; overrides every tier
    #[arg(long)]
    pub(crate) max_states: Option<usize>,

    /// Maximum solution length in moves; overrides every tier
    #[arg(long)]
    pub(crate) max_depth: Option<usize>,
}

impl LimitArgs {
    pub(crate) fn to_limits(self) -> SearchLimits {
        self.apply_to(SearchLimits::default())
    }

    /// Replaces the bounds of `limits` that were given on the command line.
    pub(crate) fn apply_to(self, mut limits: SearchLimits) -> SearchLimits {
        if let Some(max_states) = self.max_states {
            limits = limits.with_max_states(max_states);
        }
        if let Some(max_depth) = self.max_depth {
            limits = limits.with_max_depth(max_depth);
        }
        limits
    }
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory as _;

    use super::*;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_generate() {
        let cli = Cli::try_parse_from([
            "chromasort",
            "generate",
            "--theme",
            "Ocean",
            "Forest",
            "--count",
            "4",
            "--skip-failed",
        ])
        .unwrap();
        let Command::Generate(args) = cli.command else {
            panic!("expected generate");
        };
        assert_eq!(args.themes, ["Ocean", "Forest"]);
        assert_eq!(args.count, 4);
        assert!(args.skip_failed);
        assert!(!args.strict);
        assert_eq!(args.output, None);
    }

    #[test]
    fn test_generate_requires_theme() {
        assert!(Cli::try_parse_from(["chromasort", "generate"]).is_err());
    }

    #[test]
    fn test_limits_default_to_search_defaults() {
        let cli = Cli::try_parse_from(["chromasort", "solve", "2:RB 2:BR 2:"]).unwrap();
        let Command::Solve(args) = cli.command else {
            panic!("expected solve");
        };
        assert_eq!(args.limits.to_limits(), SearchLimits::default());

        let cli = Cli::try_parse_from([
            "chromasort",
            "test",
            "pack.json",
            "--max-states",
            "100",
            "--json",
        ])
        .unwrap();
        let Command::Test(args) = cli.command else {
            panic!("expected test");
        };
        assert_eq!(args.limits.to_limits().max_states, 100);
        assert!(args.json);
        assert_eq!(args.config, None);
    }

    #[test]
    fn test_limit_overrides_keep_unset_bounds() {
        let cli = Cli::try_parse_from([
            "chromasort",
            "test",
            "pack.json",
            "--config",
            "tiers.json",
            "--max-depth",
            "30",
        ])
        .unwrap();
        let Command::Test(args) = cli.command else {
            panic!("expected test");
        };
        assert_eq!(args.config, Some(PathBuf::from("tiers.json")));

        let tier = SearchLimits::default().with_max_states(300_000);
        let limits = args.limits.apply_to(tier);
        assert_eq!(limits.max_states, 300_000);
        assert_eq!(limits.max_depth, 30);
    }
}
