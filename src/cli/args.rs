//! CLI argument definitions for `StudyFlow`

use clap::{builder::BoolishValueParser, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

use studyflow::config::ConfigOverrides;
use studyflow::logger::Level;

/// CLI log level argument
///
/// Represents log levels that can be passed via CLI arguments. Converts to lowercase
/// strings for config storage and to `logger::Level` for runtime use.
#[derive(Copy, Clone, Debug, ValueEnum, PartialEq, Eq)]
pub enum LogLevelArg {
    /// Error-level logging
    Error,
    /// Warning-level logging
    Warn,
    /// Info-level logging
    Info,
    /// Debug-level logging
    Debug,
}

impl From<LogLevelArg> for Level {
    fn from(arg: LogLevelArg) -> Self {
        match arg {
            LogLevelArg::Error => Self::Error,
            LogLevelArg::Warn => Self::Warn,
            LogLevelArg::Info => Self::Info,
            LogLevelArg::Debug => Self::Debug,
        }
    }
}

impl std::fmt::Display for LogLevelArg {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let as_str = match self {
            Self::Error => "error",
            Self::Warn => "warn",
            Self::Info => "info",
            Self::Debug => "debug",
        };
        write!(f, "{as_str}")
    }
}

/// Assignment status accepted by `--status`
#[derive(Copy, Clone, Debug, ValueEnum, PartialEq, Eq)]
pub enum StatusArg {
    /// Not done and not past due
    Pending,
    /// Done
    Completed,
    /// Not done and past due
    Overdue,
}

impl From<StatusArg> for studyflow::core::models::AssignmentStatus {
    fn from(arg: StatusArg) -> Self {
        match arg {
            StatusArg::Pending => Self::Pending,
            StatusArg::Completed => Self::Completed,
            StatusArg::Overdue => Self::Overdue,
        }
    }
}

/// Assignment priority accepted by `--priority`
#[derive(Copy, Clone, Debug, Default, ValueEnum, PartialEq, Eq)]
pub enum PriorityArg {
    /// High priority
    High,
    /// Medium priority
    #[default]
    Medium,
    /// Low priority
    Low,
}

impl From<PriorityArg> for studyflow::core::models::Priority {
    fn from(arg: PriorityArg) -> Self {
        match arg {
            PriorityArg::High => Self::High,
            PriorityArg::Medium => Self::Medium,
            PriorityArg::Low => Self::Low,
        }
    }
}

#[derive(Debug, Subcommand)]
pub enum ConfigSubcommand {
    /// Display configuration values.
    ///
    /// If a KEY is provided, displays only that configuration value.
    /// If no KEY is provided, displays all configuration values.
    Get {
        /// Optional configuration key to display (e.g., `level`, `data_file`, `format`)
        #[arg(value_name = "KEY")]
        key: Option<String>,
    },
    /// Set a configuration value.
    Set {
        /// Configuration key to set
        #[arg(value_name = "KEY")]
        key: String,
        /// Value to set
        #[arg(value_name = "VALUE")]
        value: String,
    },
    /// Unset a configuration value.
    Unset {
        /// Configuration key to unset
        #[arg(value_name = "KEY")]
        key: String,
    },
    /// Reset configuration to defaults (requires confirmation).
    Reset,
}

#[derive(Debug, Subcommand)]
pub enum AssignmentsSubcommand {
    /// Add a pending assignment and save the data file.
    Add {
        /// Assignment title
        #[arg(value_name = "TITLE")]
        title: String,

        /// Owning course id
        #[arg(long, value_name = "ID")]
        course: u32,

        /// Due date (YYYY-MM-DD)
        #[arg(long, value_name = "DATE")]
        due: String,

        /// Priority
        #[arg(long, value_enum, default_value_t = PriorityArg::Medium)]
        priority: PriorityArg,

        /// Optional description
        #[arg(long, value_name = "TEXT")]
        description: Option<String>,
    },
    /// Mark an assignment as completed and save the data file.
    Complete {
        /// Assignment id
        #[arg(value_name = "ID")]
        id: u32,
    },
    /// Record a new status for an assignment and save the data file.
    Status {
        /// Assignment id
        #[arg(value_name = "ID")]
        id: u32,

        /// New recorded status
        #[arg(value_enum, value_name = "STATUS")]
        status: StatusArg,
    },
    /// Delete an assignment (requires confirmation unless `--yes`).
    Delete {
        /// Assignment id
        #[arg(value_name = "ID")]
        id: u32,

        /// Skip the confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Manage configuration.
    ///
    /// If no subcommand is provided, displays all configuration values.
    Config {
        #[command(subcommand)]
        subcommand: Option<ConfigSubcommand>,
    },
    /// Show course grades and GPA.
    ///
    /// With `--course`, shows the per-category breakdown for one course.
    Grades {
        /// Course id to break down
        #[arg(long, value_name = "ID")]
        course: Option<u32>,
    },
    /// List courses with their current letter grade.
    Courses {
        /// Case-insensitive filter on name, code, or professor
        #[arg(short, long, value_name = "TERM")]
        search: Option<String>,
    },
    /// Show the dashboard: GPA, assignment counts, and deadlines.
    Dashboard {
        /// Date to treat as today (YYYY-MM-DD); defaults to the local date
        #[arg(long, value_name = "DATE")]
        today: Option<String>,
    },
    /// List assignments, or add, complete, update, or delete one.
    Assignments {
        /// Only assignments for this course id
        #[arg(long, value_name = "ID")]
        course: Option<u32>,

        /// Case-insensitive filter on title or description
        #[arg(short, long, value_name = "TERM")]
        search: Option<String>,

        /// Only assignments with this effective status
        #[arg(long, value_enum)]
        status: Option<StatusArg>,

        #[command(subcommand)]
        action: Option<AssignmentsSubcommand>,
    },
    /// Show a month of due dates and the assignments due on one day.
    Calendar {
        /// Day to show (YYYY-MM-DD); defaults to the local date
        #[arg(long, value_name = "DATE")]
        date: Option<String>,
    },
    /// Generate a grade report.
    ///
    /// Writes a Markdown or HTML report with course grades, category
    /// breakdowns, and upcoming deadlines.
    Report {
        /// Output file path (optional; defaults to the configured reports directory)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,

        /// Report format: markdown (md) or html. Falls back to config if omitted.
        #[arg(short, long, value_name = "FORMAT")]
        format: Option<String>,

        /// Date to treat as today (YYYY-MM-DD); defaults to the local date
        #[arg(long, value_name = "DATE")]
        today: Option<String>,
    },
}

#[derive(Parser, Debug)]
#[command(
    name = "studyflow",
    about = "StudyFlow command-line interface",
    version = env!("CARGO_PKG_VERSION")
)]
pub struct Cli {
    /// Set the runtime log level (error|warn|info|debug). Falls back to config if omitted.
    #[arg(long, value_enum)]
    pub log_level: Option<LogLevelArg>,

    /// Enable verbose output (runtime only)
    #[arg(short = 'v', long = "verbose")]
    pub verbose: bool,

    /// Enable debug-level logging and runtime debug flag (shorthand)
    #[arg(long = "debug")]
    pub debug_flag: bool,

    /// Write runtime logs to a file
    #[arg(long, value_name = "PATH")]
    pub log_file: Option<PathBuf>,

    // --- Config overrides ---
    /// Override config logging level (stored in config file)
    #[arg(long = "config-level", value_enum)]
    pub config_level: Option<LogLevelArg>,

    /// Override config log file path
    #[arg(long = "config-log-file", value_name = "PATH")]
    pub config_log_file: Option<PathBuf>,

    /// Override config verbose flag (true/false)
    #[arg(long = "config-verbose", value_parser = BoolishValueParser::new())]
    pub config_verbose: Option<bool>,

    /// Override config data file
    #[arg(long = "config-data-file", value_name = "PATH")]
    pub config_data_file: Option<PathBuf>,

    /// Override config data file (short form)
    #[arg(long = "data-file", value_name = "PATH")]
    pub data_file: Option<PathBuf>,

    /// Override config reports directory
    #[arg(long = "config-reports-dir", value_name = "DIR")]
    pub config_reports_dir: Option<PathBuf>,

    /// Override config reports directory (short form)
    #[arg(long = "reports-dir", value_name = "DIR")]
    pub reports_dir: Option<PathBuf>,

    /// Subcommand to execute.
    /// A subcommand is required to run the CLI.
    #[command(subcommand)]
    pub command: Command,
}

fn path_string(path: Option<&PathBuf>) -> Option<String> {
    path.map(|p| p.to_string_lossy().to_string())
}

impl Cli {
    /// Convert CLI flags into config overrides
    ///
    /// Short-form flags (e.g., `--data-file`) take precedence over long-form
    /// flags (e.g., `--config-data-file`) when both are provided.
    pub fn to_config_overrides(&self) -> ConfigOverrides {
        ConfigOverrides {
            level: self.config_level.map(|lvl| lvl.to_string().to_lowercase()),
            file: path_string(self.config_log_file.as_ref()),
            verbose: self.config_verbose,
            data_file: path_string(self.data_file.as_ref())
                .or_else(|| path_string(self.config_data_file.as_ref())),
            reports_dir: path_string(self.reports_dir.as_ref())
                .or_else(|| path_string(self.config_reports_dir.as_ref())),
        }
    }
}
