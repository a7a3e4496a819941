use crate::io::OutputFormat;
use crate::priority::RankMode;
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "firmrank")]
#[command(about = "Law firm review aggregation and ranking", long_about = None)]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

/// Review-level and ranking filters shared by the read commands.
#[derive(Args, Debug, Clone, Default)]
pub struct FilterArgs {
    /// Only keep reviews from this platform (exact name, or ALL)
    #[arg(long)]
    pub platform: Option<String>,

    /// Ranking metric
    #[arg(long = "rank-mode", value_enum)]
    pub rank_mode: Option<RankMode>,

    /// Drop reviews that look like debt collection or mass-claim reactions
    #[arg(long = "exclude-enforcement")]
    pub exclude_enforcement: bool,

    /// Keep enforcement-pattern reviews even if config or env excludes them
    #[arg(long = "include-enforcement", conflicts_with = "exclude_enforcement")]
    pub include_enforcement: bool,

    /// Minimum ratings (or scored reviews) for a firm to be ranked
    #[arg(long = "min-n")]
    pub min_n: Option<usize>,
}

impl FilterArgs {
    /// `Some` only when one of the enforcement flags was given.
    pub fn exclude_enforcement_override(&self) -> Option<bool> {
        match (self.exclude_enforcement, self.include_enforcement) {
            (true, _) => Some(true),
            (_, true) => Some(false),
            _ => None,
        }
    }
}

#[derive(Args, Debug, Clone, Default)]
pub struct OutputArgs {
    /// Output format (defaults to [output] default_format, else terminal)
    #[arg(short, long, value_enum)]
    pub format: Option<OutputFormat>,

    /// Output file (defaults to stdout)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Disable colored terminal output
    #[arg(long)]
    pub plain: bool,

    /// Increase verbosity level (can be repeated: -v, -vv, -vvv)
    #[arg(short = 'v', long = "verbose", action = clap::ArgAction::Count)]
    pub verbosity: u8,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Filter firms and show the top ranking
    Rank {
        /// Snapshot file (defaults to [snapshot] path, else public/meta.json)
        snapshot: Option<PathBuf>,

        /// Case-insensitive substring of the firm name
        #[arg(short, long)]
        search: Option<String>,

        #[command(flatten)]
        filters: FilterArgs,

        #[command(flatten)]
        output: OutputArgs,
    },

    /// Show the detail card for one firm
    Firm {
        /// Firm identifier
        firm_id: String,

        /// Snapshot file (defaults to [snapshot] path, else public/meta.json)
        snapshot: Option<PathBuf>,

        #[command(flatten)]
        filters: FilterArgs,

        #[command(flatten)]
        output: OutputArgs,
    },

    /// Merge data/source_*.json into a snapshot
    Build {
        /// Directory holding source_*.json files
        #[arg(long = "data-dir", default_value = "data")]
        data_dir: PathBuf,

        /// Snapshot output path
        #[arg(long, default_value = "public/meta.json")]
        out: PathBuf,

        /// Increase verbosity level (can be repeated: -v, -vv, -vvv)
        #[arg(short = 'v', long = "verbose", action = clap::ArgAction::Count)]
        verbosity: u8,
    },

    /// Initialize configuration file
    Init {
        /// Force overwrite existing config
        #[arg(short, long)]
        force: bool,
    },
}
