//! Command line arguments

use std::path::PathBuf;
use std::str::FromStr;

use clap::{ArgGroup, Parser};
use rk_core::LengthUnit;

/// Remove small, non-structural links from a robot assembly
///
/// INPUT is a URDF file (.urdf) or an assembly snapshot (.ron, .json).
#[derive(Parser, Debug, Clone, Default, PartialEq)]
#[command(name = "rk-export", version, about)]
#[command(group(ArgGroup::new("toggle").args(["enable", "disable"])))]
pub struct Args {
    /// Assembly to filter (.urdf, .ron or .json)
    #[arg(value_name = "INPUT")]
    pub input: PathBuf,

    /// Load settings from FILE instead of the user config
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Minimum bounding-box diagonal (enables the filter)
    #[arg(short, long, value_name = "VALUE", allow_negative_numbers = true)]
    pub threshold: Option<f64>,

    /// Threshold unit: mm, cm or m
    #[arg(short, long, value_parser = LengthUnit::from_str)]
    pub unit: Option<LengthUnit>,

    /// Enable the small part filter
    #[arg(long)]
    pub enable: bool,

    /// Disable the small part filter
    #[arg(long, conflicts_with = "enable")]
    pub disable: bool,

    /// Measure URDF collision geometry instead of visual
    #[arg(long)]
    pub collision: bool,

    /// Print the decision for every link to stderr
    #[arg(long)]
    pub report: bool,

    /// Store the effective filter settings in the config file
    #[arg(long)]
    pub save_config: bool,

    /// Write the result to FILE instead of stdout
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,
}

impl Args {
    /// Explicit enable/disable request, if any
    pub fn enabled(&self) -> Option<bool> {
        match (self.enable, self.disable) {
            (true, _) => Some(true),
            (_, true) => Some(false),
            _ => None,
        }
    }
}
