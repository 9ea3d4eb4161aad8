use gbench_model::Summary;

use crate::{Printer, ReportError};

#[derive(Debug, Default, Clone, Copy)]
pub struct JsonPrinter;

impl Printer for JsonPrinter {
    fn print(&self, summary: &Summary) -> Result<Vec<u8>, ReportError> {
        Ok(serde_json::to_vec(summary)?)
    }
}
