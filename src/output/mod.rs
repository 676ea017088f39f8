//! Output formatting for CLI results

use serde::Serialize;
use tabled::Tabled;

use crate::cli::OutputFormat;
use honeycombio::error::Result;

pub mod json;
pub mod table;

/// A single resource rendered as field/value pairs in table mode
pub trait Detailed {
    fn fields(&self) -> Vec<(&'static str, String)>;
}

/// Types that can be formatted for output
pub trait Formattable {
    fn format(&self, format: OutputFormat, team: Option<&str>) -> Result<String>;
}

impl<T: Tabled + Serialize> Formattable for Vec<T> {
    fn format(&self, format: OutputFormat, team: Option<&str>) -> Result<String> {
        match format {
            OutputFormat::Table => Ok(table::format_table(self)),
            OutputFormat::Json => Ok(json::format_json(self, team)?),
        }
    }
}

/// Wrapper selecting the detail view for one resource
pub struct Record<T>(pub T);

impl<T: Detailed + Serialize> Formattable for Record<T> {
    fn format(&self, format: OutputFormat, team: Option<&str>) -> Result<String> {
        match format {
            OutputFormat::Table => Ok(table::format_details(&self.0.fields())),
            OutputFormat::Json => Ok(json::format_json(&self.0, team)?),
        }
    }
}

/// Format and print data to stdout
pub fn print<T: Formattable>(data: &T, format: OutputFormat, team: Option<&str>) -> Result<()> {
    println!("{}", data.format(format, team)?);
    Ok(())
}
