//! Output formatter trait

use crate::cli::commands::OutputFormat;
use crate::output::console::ConsoleFormatter;
use tripscout_application::FindPlacesOutput;

/// Trait for rendering search results
pub trait OutputFormatter {
    fn format(&self, output: &FindPlacesOutput) -> String;
}

/// Human-readable console list
pub struct TextFormatter;

impl OutputFormatter for TextFormatter {
    fn format(&self, output: &FindPlacesOutput) -> String {
        ConsoleFormatter::format_places(output)
    }
}

/// Pretty-printed JSON
pub struct JsonFormatter;

impl OutputFormatter for JsonFormatter {
    fn format(&self, output: &FindPlacesOutput) -> String {
        ConsoleFormatter::format_json(output)
    }
}

/// Pick the formatter for a format choice
pub fn formatter_for(format: OutputFormat) -> Box<dyn OutputFormatter> {
    match format {
        OutputFormat::Text => Box::new(TextFormatter),
        OutputFormat::Json => Box::new(JsonFormatter),
    }
}
