use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "kmodguard",
    about = "Keeps precompiled NVIDIA kernel modules in step with kernels",
    long_about = "Resolves which precompiled kmod package each kernel needs and adjusts \
                  package transactions so the driver keeps working across kernel changes",
    version,
    next_line_help = false,
    term_width = 80
)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalFlags,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Parser, Debug)]
pub struct GlobalFlags {
    /// Verbose output
    #[arg(short = 'v', long, global = true)]
    pub verbose: bool,

    /// Quiet mode
    #[arg(short = 'q', long, global = true)]
    pub quiet: bool,

    /// Plugin configuration file (KDL)
    #[arg(long, value_name = "FILE", global = true)]
    pub config: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Show installed and available kernels, drivers and kmods
    Scan {
        /// Read packages from a JSON snapshot instead of the rpm database
        #[arg(long, value_name = "FILE")]
        snapshot: Option<PathBuf>,
    },

    /// Run the resolve hooks against a transaction snapshot
    Plan {
        /// Transaction snapshot (JSON)
        #[arg(long, value_name = "FILE")]
        snapshot: PathBuf,

        /// Print the plan as JSON
        #[arg(long)]
        json: bool,
    },
}
