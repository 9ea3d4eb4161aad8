pub mod args;
pub use args::{BenchArgs, DEFAULT_IMAGE, Mode, ReporterArgs};

pub mod spinner;
pub use spinner::{SPINNER_PREFIX, Spinner};
