//! Output formatting

use anyhow::Result;
use casework_dashboard::RatioStat;
use clap::ValueEnum;
use colored::Colorize;
use serde::Serialize;
use tabled::{settings::Style, Table, Tabled};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Table,
    Json,
    Yaml,
}

impl OutputFormat {
    /// Resolve the flag, then the config file, falling back to tables
    pub fn resolve(flag: Option<Self>, configured: Option<&str>) -> Self {
        flag.or_else(|| configured.and_then(|s| <Self as ValueEnum>::from_str(s, true).ok()))
            .unwrap_or(Self::Table)
    }

    /// Print `data` as JSON or YAML, or through `table` for human output
    pub fn emit<T: Serialize>(&self, data: &T, table: impl FnOnce(&T) -> String) -> Result<()> {
        match self {
            OutputFormat::Json => println!("{}", serde_json::to_string_pretty(data)?),
            OutputFormat::Yaml => print!("{}", serde_yaml::to_string(data)?),
            OutputFormat::Table => println!("{}", table(data)),
        }
        Ok(())
    }
}

pub fn table<R: Tabled>(rows: impl IntoIterator<Item = R>) -> String {
    Table::new(rows).with(Style::rounded()).to_string()
}

pub fn heading(title: &str) -> String {
    title.bold().underline().to_string()
}

/// `done/total (pct%)`, colored by how far along the ratio is
pub fn ratio(stat: &RatioStat) -> String {
    let text = format!("{}/{} ({:.1}%)", stat.numerator, stat.denominator, stat.percentage);
    if stat.denominator == 0 {
        text.dimmed().to_string()
    } else if stat.percentage >= 75.0 {
        text.green().to_string()
    } else if stat.percentage >= 40.0 {
        text.yellow().to_string()
    } else {
        text.red().to_string()
    }
}
