use std::path::PathBuf;

use clap::Parser;

use crate::calendar::CalendarDate;

/// Date picker for the bus booking form.
#[derive(Debug, Parser)]
#[command(name = "booking-datepicker", version, about = "Pick travel dates in the terminal")]
pub struct Cli {
    /// Increase verbosity (-v info, -vv debug, -vvv trace).
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Path to a YAML configuration file.
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Initial departure value, e.g. "15 Jun 2025".
    #[arg(long)]
    pub value: Option<String>,

    /// Earliest selectable departure date (defaults to today).
    #[arg(long)]
    pub min: Option<CalendarDate>,

    /// Latest selectable departure date.
    #[arg(long)]
    pub max: Option<CalendarDate>,

    /// Print the departure picker's day grid as JSON and exit.
    #[arg(long)]
    pub dump_grid: bool,

    /// Write logs to this file while the interactive form runs.
    #[arg(long)]
    pub log_file: Option<PathBuf>,
}
