//! Output formatting for conversion results

mod json;
mod terminal;

use std::io::Write;

use anyhow::Result;

use crate::config::{Config, OutputFormat};
use crate::infer::Conversion;

pub use json::JsonOutput;
pub use terminal::TerminalOutput;

/// Trait for output formatters
pub trait OutputFormatter {
    /// Render a conversion to a writer
    fn render(&self, conversion: &Conversion, writer: &mut dyn Write) -> Result<()>;
}

/// Factory for creating output formatters
pub struct OutputFactory;

impl OutputFactory {
    /// Create an output formatter based on format type
    pub fn create(format: OutputFormat) -> Box<dyn OutputFormatter> {
        match format {
            OutputFormat::Terminal => Box::new(TerminalOutput::new()),
            OutputFormat::Json => Box::new(JsonOutput::new()),
        }
    }
}

/// Render a conversion to stdout in the configured output format
pub fn render_to_stdout(conversion: &Conversion, config: &Config) -> Result<()> {
    let formatter = OutputFactory::create(config.output_format);
    let mut stdout = std::io::stdout();
    formatter.render(conversion, &mut stdout)
}
