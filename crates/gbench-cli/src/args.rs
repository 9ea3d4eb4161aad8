use clap::{Parser, Subcommand};

use gbench_model::{JobConfig, JobKind, Target};
use gbench_observe::{LoggerConfig, LoggerFormat};
use gbench_report::{JsonPrinter, Printer, TextPrinter};

pub const DEFAULT_IMAGE: &str = "docker:///busybox:latest";

#[derive(Debug, Parser)]
#[command(
    name = "grootfs-bench",
    version,
    about = "grootfs benchmarking tool",
    long_about = None,
    override_usage = "grootfs-bench --gbin <grootfs-bin> --store <store> --images <n> --concurrency <c> --image <docker:///img>"
)]
pub struct BenchArgs {
    /// Path to the grootfs binary
    #[arg(long, default_value = "grootfs")]
    pub gbin: String,

    /// Store path
    #[arg(long, default_value = "/var/lib/grootfs")]
    pub store: String,

    /// Filesystem driver passed to grootfs
    #[arg(long)]
    pub driver: Option<String>,

    /// Log level forwarded to grootfs
    #[arg(long, default_value = "debug")]
    pub log_level: String,

    /// Base image to create from; repeat for round-robin
    #[arg(long, value_name = "IMAGE", default_value = DEFAULT_IMAGE)]
    pub image: Vec<String>,

    /// Number of images to create
    #[arg(long, default_value_t = 500)]
    pub images: usize,

    /// Number of concurrent workers (0 = one per CPU)
    #[arg(long, default_value_t = 0)]
    pub concurrency: usize,

    /// Create images with a disk limit
    #[arg(long)]
    pub with_quota: bool,

    /// Print the result as json
    #[arg(long)]
    pub json: bool,

    /// Turn off the spinner
    #[arg(long)]
    pub nospin: bool,

    /// Run `clean` periodically while creating
    #[arg(long)]
    pub parallel_clean: bool,

    /// Seconds between cleans
    #[arg(long, value_name = "SECS", default_value_t = 1)]
    pub clean_interval: u64,

    /// Delete created images periodically while creating
    #[arg(long)]
    pub parallel_delete: bool,

    /// Seconds between deletes
    #[arg(long, value_name = "SECS", default_value_t = 1)]
    pub delete_interval: u64,

    /// Log filter for the harness itself (written to stderr)
    #[arg(long, value_name = "FILTER", default_value = "warn")]
    pub trace: String,

    /// Harness log format: text|json|journald
    #[arg(long, value_name = "FORMAT", default_value = "text")]
    pub trace_format: LoggerFormat,
}

impl BenchArgs {
    pub fn target(&self) -> Target {
        Target {
            bin_path: self.gbin.clone(),
            store_path: self.store.clone(),
            driver: self.driver.clone().filter(|d| !d.is_empty()),
            log_level: self.log_level.clone(),
        }
    }

    /// The bulk create job first, then the optional clean and delete jobs.
    pub fn job_configs(&self) -> Vec<JobConfig> {
        let target = self.target();
        let mut configs = vec![JobConfig::new(
            target.clone(),
            JobKind::Bulk {
                base_images: self.image.clone(),
                use_quota: self.with_quota,
                concurrency: self.concurrency,
                total: self.images,
            },
        )];

        if self.parallel_clean {
            configs.push(JobConfig::new(
                target.clone(),
                JobKind::periodic(self.clean_interval),
            ));
        }
        if self.parallel_delete {
            configs.push(JobConfig::new(target, JobKind::consumer(self.delete_interval)));
        }
        configs
    }

    pub fn logger_config(&self) -> LoggerConfig {
        LoggerConfig {
            format: self.trace_format,
            level: self.trace.clone(),
            ..Default::default()
        }
    }

    pub fn show_spinner(&self) -> bool {
        !self.nospin && !self.json
    }

    pub fn printer(&self) -> Box<dyn Printer> {
        if self.json {
            Box::new(JsonPrinter)
        } else {
            Box::new(TextPrinter)
        }
    }
}

#[derive(Debug, Parser)]
#[command(
    name = "grootfs-bench-reporter",
    version,
    about = "Push grootfs-bench results to Datadog",
    long_about = None
)]
pub struct ReporterArgs {
    #[command(subcommand)]
    pub mode: Mode,

    /// Log filter for the reporter (written to stderr)
    #[arg(long, global = true, value_name = "FILTER", default_value = "info")]
    pub trace: String,
}

#[derive(Debug, Subcommand)]
pub enum Mode {
    /// Run the bench binary and publish its json summary as metric series.
    Metrics {
        /// Path to the grootfs-bench binary
        #[arg(long, default_value = "grootfs-bench")]
        bench_bin: String,

        /// Metric name prefix
        #[arg(long, default_value = "ci")]
        prefix: String,

        /// Arguments passed to the bench binary (after `--`)
        #[arg(last = true, value_name = "ARGS")]
        bench_args: Vec<String>,
    },
    /// Publish a commit event unless one with the same title exists.
    Event {
        #[arg(long)]
        title: String,

        #[arg(long, default_value = "")]
        message: String,
    },
}

impl ReporterArgs {
    pub fn logger_config(&self) -> LoggerConfig {
        LoggerConfig {
            level: self.trace.clone(),
            ..Default::default()
        }
    }
}
