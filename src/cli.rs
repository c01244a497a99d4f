use clap::{Parser, Subcommand, ValueEnum};
use clap_complete::Shell;
use taloskit::Mode;

#[derive(Parser)]
#[command(name = "talosup")]
#[command(version)]
#[command(about = "Declaratively apply Talos machine configuration", long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Verbosity level
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress non-essential output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Apply a machine configuration file idempotently
    Apply(ApplyArgs),

    /// Run health checks on the talosctl setup
    Doctor,

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

#[derive(Parser)]
pub struct ApplyArgs {
    /// Machine configuration file to apply
    #[arg(short, long)]
    pub file: String,

    /// Cluster to use from the client configuration
    #[arg(long, env = "TALOSUP_CLUSTER")]
    pub cluster: Option<String>,

    /// Context to use from the client configuration
    #[arg(long, env = "TALOSUP_CONTEXT")]
    pub context: Option<String>,

    /// API endpoints to talk to (comma-separated or repeated)
    #[arg(short, long, value_delimiter = ',')]
    pub endpoints: Vec<String>,

    /// Target node addresses (comma-separated or repeated)
    #[arg(short, long, value_delimiter = ',')]
    pub nodes: Vec<String>,

    /// Path to the talos client configuration file
    #[arg(long, env = "TALOSCONFIG")]
    pub talosconfig: Option<String>,

    /// Server certificate fingerprints to accept
    #[arg(long = "cert-fingerprint")]
    pub cert_fingerprints: Vec<String>,

    /// Config patches applied on top of the file
    #[arg(long = "config-patch")]
    pub config_patches: Vec<String>,

    /// Skip TLS verification (required for nodes still in maintenance mode)
    #[arg(long)]
    pub insecure: bool,

    /// Reboot behavior when applying
    #[arg(long, value_enum, default_value = "auto")]
    pub mode: ModeArg,

    /// Timeout forwarded to talosctl, in seconds (0 disables the flag)
    #[arg(long, default_value_t = 60)]
    pub timeout: u64,

    /// Report the intended change without applying it
    #[arg(long)]
    pub check: bool,

    /// Include the configuration diff in the output
    #[arg(long)]
    pub diff: bool,

    /// Emit the result as JSON on stdout
    #[arg(long)]
    pub json: bool,
}

#[derive(Clone, Copy, ValueEnum)]
pub enum ModeArg {
    Auto,
    Interactive,
    NoReboot,
    Reboot,
    Staged,
    Try,
}

impl From<ModeArg> for Mode {
    fn from(mode: ModeArg) -> Self {
        match mode {
            ModeArg::Auto => Mode::Auto,
            ModeArg::Interactive => Mode::Interactive,
            ModeArg::NoReboot => Mode::NoReboot,
            ModeArg::Reboot => Mode::Reboot,
            ModeArg::Staged => Mode::Staged,
            ModeArg::Try => Mode::Try,
        }
    }
}
