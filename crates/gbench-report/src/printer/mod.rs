mod json;
mod text;

pub use json::JsonPrinter;
pub use text::TextPrinter;

use gbench_model::Summary;

use crate::ReportError;

/// Renders a [`Summary`] for stdout.
pub trait Printer: Send + Sync {
    fn print(&self, summary: &Summary) -> Result<Vec<u8>, ReportError>;
}
