//! Clap derive structures for the `netdash` CLI.
//!
//! Defines the complete command tree, global flags, and shared types.
//! The same [`Command`] tree is parsed line by line inside `netdash shell`.

use clap::{Args, Parser, Subcommand, ValueEnum};

use netdash_core::{
    AlertFilter, ConnectionMethod, DateRange, DeviceType, ExportFormat, ExportType,
};

// ── Top-Level CLI ────────────────────────────────────────────────────

/// netdash -- network management dashboard in the terminal
#[derive(Debug, Parser)]
#[command(
    name = "netdash",
    version,
    about = "Network management dashboard for the command line",
    long_about = "Browse the device and VLAN catalog, compose simulated device commands,\n\
        review outputs and AI alerts, and export reports.\n\n\
        Mutating commands require the caller's public address to be on the\n\
        configured allow-list. No device is ever contacted.",
    propagate_version = true,
    subcommand_required = true,
    arg_required_else_help = true
)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalOpts,

    #[command(subcommand)]
    pub command: Command,
}

/// One line typed at the `netdash shell` prompt.
#[derive(Debug, Parser)]
#[command(
    name = "shell",
    no_binary_name = true,
    disable_version_flag = true,
    subcommand_required = true
)]
pub struct ShellLine {
    #[command(subcommand)]
    pub command: Command,
}

// ── Global Options ───────────────────────────────────────────────────

#[derive(Debug, Clone, Args)]
pub struct GlobalOpts {
    /// Output format
    #[arg(
        long,
        short = 'o',
        env = "NETDASH_OUTPUT",
        default_value = "table",
        global = true
    )]
    pub output: OutputFormat,

    /// When to use color output
    #[arg(long, env = "NETDASH_COLOR", default_value = "auto", global = true)]
    pub color: ColorMode,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(long, short = 'v', action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress non-error output
    #[arg(long, short = 'q', global = true)]
    pub quiet: bool,

    /// Skip confirmation prompts
    #[arg(long, short = 'y', global = true)]
    pub yes: bool,

    /// Use this caller address instead of asking the echo service
    #[arg(long, env = "NETDASH_CALLER_IP", global = true)]
    pub caller_ip: Option<String>,

    /// Caller-resolution timeout in seconds
    #[arg(long, env = "NETDASH_TIMEOUT", default_value = "10", global = true)]
    pub timeout: u64,
}

// ── Output & Color Enums ─────────────────────────────────────────────

#[derive(Debug, Clone, ValueEnum)]
pub enum OutputFormat {
    /// Pretty table (default, interactive)
    Table,
    /// Pretty-printed JSON
    Json,
    /// Compact single-line JSON
    JsonCompact,
    /// YAML
    Yaml,
    /// Plain text, one value per line (scripting)
    Plain,
}

#[derive(Debug, Clone, ValueEnum)]
pub enum ColorMode {
    /// Auto-detect (color if terminal is interactive)
    Auto,
    /// Always emit color codes
    Always,
    /// Never emit color codes
    Never,
}

// ── Top-Level Command Enum ───────────────────────────────────────────

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Browse the device catalog and pick a connection target
    #[command(alias = "dev", alias = "d")]
    Devices(DevicesArgs),

    /// Browse VLAN definitions
    #[command(alias = "vl")]
    Vlans(VlansArgs),

    /// List predefined command templates
    Templates,

    /// Show previously sent commands, most recent first
    History,

    /// Compose and send a command
    Send(SendArgs),

    /// Manage simulated command outputs
    #[command(alias = "out")]
    Outputs(OutputsArgs),

    /// Review AI alerts and run network scans
    Alerts(AlertsArgs),

    /// Talk to the network assistant
    #[command(alias = "ai")]
    Assistant(AssistantArgs),

    /// Export devices, commands, outputs and alerts to a file
    Export(ExportArgs),

    /// Show the caller address and authorization verdict
    Auth,

    /// Interactive session keeping state between commands
    Shell,

    /// Manage CLI configuration
    Config(ConfigArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  DEVICES
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Args)]
pub struct DevicesArgs {
    #[command(subcommand)]
    pub command: DevicesCommand,
}

#[derive(Debug, Subcommand)]
pub enum DevicesCommand {
    /// List devices, optionally restricted to one category
    #[command(alias = "ls")]
    List {
        /// Device category (core lists online devices only)
        #[arg(long, short = 't')]
        r#type: Option<DeviceType>,
    },

    /// Show a single device
    Get {
        /// Device ID
        device: String,
    },

    /// Fleet health summary
    Health,

    /// Select a device as the command target
    Select {
        /// Device ID
        device: String,
    },

    /// Build a connection plan for a device
    Connect {
        /// Device ID (defaults to the selected device)
        device: Option<String>,

        /// Connection method
        #[arg(long, short = 'm', default_value = "ssh")]
        method: ConnectionMethod,
    },
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  VLANS
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Args)]
pub struct VlansArgs {
    #[command(subcommand)]
    pub command: VlansCommand,
}

#[derive(Debug, Subcommand)]
pub enum VlansCommand {
    /// List all VLANs
    #[command(alias = "ls")]
    List,

    /// Show a single VLAN
    Get {
        /// VLAN ID
        id: u16,
    },
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  SEND
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Args)]
pub struct SendArgs {
    /// Command text; a template is used verbatim, anything else is custom
    #[arg(trailing_var_arg = true, num_args = 0..)]
    pub command: Vec<String>,

    /// Target device ID
    #[arg(long, short = 'd')]
    pub device: Option<String>,

    /// Resend a history entry by position (0 = most recent)
    #[arg(long, conflicts_with = "command")]
    pub recall: Option<usize>,
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  OUTPUTS
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Args)]
pub struct OutputsArgs {
    #[command(subcommand)]
    pub command: OutputsCommand,
}

#[derive(Debug, Subcommand)]
pub enum OutputsCommand {
    /// List outputs, newest first
    #[command(alias = "ls")]
    List,

    /// Show one output (defaults to the selected output)
    Show {
        /// Output ID
        id: Option<String>,
    },

    /// Select an output for display
    Select {
        /// Output ID
        id: String,
    },

    /// Count outputs by status
    Stats,

    /// Delete an output
    #[command(alias = "rm")]
    Delete {
        /// Output ID
        id: String,
    },

    /// Delete every output
    Clear,

    /// Write an output's text to stdout for piping to a clipboard tool
    Copy {
        /// Output ID
        id: String,
    },

    /// Save a single output to a file
    Save {
        /// Output ID
        id: String,

        /// File format
        #[arg(long, short = 'f', default_value = "txt")]
        format: ExportFormat,
    },
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  ALERTS
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Args)]
pub struct AlertsArgs {
    #[command(subcommand)]
    pub command: AlertsCommand,
}

#[derive(Debug, Subcommand)]
pub enum AlertsCommand {
    /// List alerts, newest first
    #[command(alias = "ls")]
    List {
        /// Status filter
        #[arg(long, short = 's', default_value = "all")]
        status: AlertFilter,
    },

    /// Active and resolved counts
    Stats,

    /// Mark an alert resolved
    Resolve {
        /// Alert ID
        id: String,
    },

    /// Run a network scan and report the new alert
    Scan {
        /// Return immediately and let the scan run (shell only)
        #[arg(long)]
        detach: bool,
    },

    /// Stop a running scan
    Cancel,
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  ASSISTANT
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Args)]
pub struct AssistantArgs {
    #[command(subcommand)]
    pub command: AssistantCommand,
}

#[derive(Debug, Subcommand)]
pub enum AssistantCommand {
    /// Send a message and wait for the reply
    Ask {
        /// Message text
        #[arg(trailing_var_arg = true, required = true)]
        message: Vec<String>,
    },

    /// Show the conversation so far
    Transcript,

    /// Toggle voice input
    Voice,
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  EXPORT
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Args)]
pub struct ExportArgs {
    /// What to export
    #[arg(long, short = 't')]
    pub r#type: Option<ExportType>,

    /// File format
    #[arg(long, short = 'f', default_value = "csv")]
    pub format: ExportFormat,

    /// Date range applied to timestamped records
    #[arg(long, short = 'r', default_value = "today")]
    pub range: DateRange,

    /// Leave out device information
    #[arg(long)]
    pub no_device_info: bool,

    /// Leave out command history
    #[arg(long)]
    pub no_commands: bool,

    /// Leave out command outputs
    #[arg(long)]
    pub no_outputs: bool,

    /// Include failed outputs
    #[arg(long)]
    pub include_errors: bool,

    /// File name to use instead of the generated one
    #[arg(long)]
    pub file_name: Option<String>,
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  CONFIG
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

#[derive(Debug, Subcommand)]
pub enum ConfigCommand {
    /// Create initial config file with guided setup
    Init,

    /// Display current resolved configuration
    Show,

    /// Print the config file location
    Path,

    /// Store the device password in the system keyring
    SetPassword {
        /// Device username (defaults to the configured one)
        #[arg(long, short = 'u')]
        username: Option<String>,
    },
}

#[derive(Debug, Args)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    pub shell: clap_complete::Shell,
}
