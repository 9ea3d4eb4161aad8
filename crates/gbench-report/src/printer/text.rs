use std::fmt::Write as _;

use gbench_model::Summary;

use crate::{Printer, ReportError};

/// Human readable report with dotted labels.
#[derive(Debug, Default, Clone, Copy)]
pub struct TextPrinter;

impl Printer for TextPrinter {
    fn print(&self, s: &Summary) -> Result<Vec<u8>, ReportError> {
        let mut out = String::with_capacity(512);
        // writing into a String cannot fail
        let _ = writeln!(out);
        let _ = writeln!(out, "Total images requested.: {}", s.total_images);
        let _ = writeln!(out, "Concurrency factor.....: {}", s.concurrency_factor);
        let _ = writeln!(out, "Using quota?...........: {}", s.ran_with_quota);
        let _ = writeln!(out, "Parallel clean?........: {}", s.ran_with_parallel_clean);
        let _ = writeln!(out, "\r........................                     ");
        let _ = writeln!(out, "Total duration.........: {:?}", s.total_duration);
        let _ = writeln!(out, "Images per second......: {:.3}", s.images_per_second);
        let _ = writeln!(out, "Average time per image.: {:.3}s", s.average_time_per_image);
        let _ = writeln!(out, "Number of cleans.......: {}", s.number_of_cleans);
        let _ = writeln!(out, "Number of deletes......: {}", s.number_of_deletes);
        let _ = writeln!(out, "Total errors...........: {}", s.total_errors_amt);
        let _ = writeln!(out, "Error Rate.............: {:.3}", s.error_rate);
        Ok(out.into_bytes())
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;

    #[test]
    fn renders_every_label() {
        let summary = Summary {
            total_duration: Duration::from_millis(2500),
            images_per_second: 4.0,
            ran_with_quota: true,
            number_of_cleans: 2,
            average_time_per_image: 0.25,
            total_errors_amt: 0,
            total_images: 10,
            concurrency_factor: 5,
            ..Default::default()
        };
        let text = String::from_utf8(TextPrinter.print(&summary).unwrap()).unwrap();

        assert!(text.starts_with('\n'));
        assert!(text.contains("Total images requested.: 10\n"));
        assert!(text.contains("Concurrency factor.....: 5\n"));
        assert!(text.contains("Using quota?...........: true\n"));
        assert!(text.contains("Parallel clean?........: false\n"));
        assert!(text.contains("Total duration.........: 2.5s\n"));
        assert!(text.contains("Images per second......: 4.000\n"));
        assert!(text.contains("Average time per image.: 0.250s\n"));
        assert!(text.contains("Number of cleans.......: 2\n"));
        assert!(text.contains("Number of deletes......: 0\n"));
        assert!(text.contains("Total errors...........: 0\n"));
        assert!(text.contains("Error Rate.............: 0.000\n"));
    }

    #[test]
    fn no_success_average_is_negative() {
        let summary = Summary {
            average_time_per_image: -1.0,
            error_rate: 100.0,
            total_errors_amt: 3,
            total_images: 3,
            ..Default::default()
        };
        let text = String::from_utf8(TextPrinter.print(&summary).unwrap()).unwrap();
        assert!(text.contains("Average time per image.: -1.000s\n"));
        assert!(text.contains("Error Rate.............: 100.000\n"));
    }
}
