mod error;
pub use error::ReportError;

mod printer;
pub use printer::{JsonPrinter, Printer, TextPrinter};

pub mod datadog;
