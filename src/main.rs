use anyhow::Result;
use clap::Parser;
use firmrank::cli::{Cli, Commands};
use firmrank::commands::{self, FirmCommandConfig, RankConfig};
use firmrank::observability::{init_tracing, install_panic_hook};

fn main() -> Result<()> {
    install_panic_hook();
    let cli = Cli::parse();

    match cli.command {
        Commands::Rank {
            snapshot,
            search,
            filters,
            output,
        } => {
            init_tracing(output.verbosity);
            commands::run_rank(RankConfig {
                snapshot,
                search,
                filters,
                output,
            })
        }
        Commands::Firm {
            firm_id,
            snapshot,
            filters,
            output,
        } => {
            init_tracing(output.verbosity);
            commands::show_firm(FirmCommandConfig {
                firm_id,
                snapshot,
                filters,
                output,
            })
        }
        Commands::Build {
            data_dir,
            out,
            verbosity,
        } => {
            init_tracing(verbosity.max(1));
            commands::run_build_command(&data_dir, &out)
        }
        Commands::Init { force } => {
            init_tracing(0);
            commands::init_config(force)
        }
    }
}
