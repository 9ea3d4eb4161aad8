use std::io::Write;
use std::process::ExitCode;
use std::sync::Arc;

use anyhow::Context;
use clap::Parser;
use tracing::{debug, info};

use gbench_cli::{BenchArgs, SPINNER_PREFIX, Spinner};
use gbench_core::{JobExecutor, ProcessInvoker};
use gbench_exec::ProcInvoker;
use gbench_observe::logger_init;

#[tokio::main]
async fn main() -> ExitCode {
    match run().await {
        Ok(code) => code,
        Err(e) => {
            eprintln!("grootfs-bench: {e:#}");
            ExitCode::FAILURE
        }
    }
}

async fn run() -> anyhow::Result<ExitCode> {
    let args = BenchArgs::parse();
    logger_init(&args.logger_config()).context("init logger")?;

    let configs = args.job_configs();
    debug!(jobs = configs.len(), "job configs built");

    let invoker: Arc<dyn ProcessInvoker> = Arc::new(ProcInvoker::default().with_name("grootfs"));
    let executor = JobExecutor::from_configs(configs, invoker)?;

    let spinner = args.show_spinner().then(|| Spinner::start(SPINNER_PREFIX));
    let result = executor.run().await;
    if let Some(spinner) = spinner {
        spinner.stop().await;
    }
    let summary = result?;
    info!(
        total = summary.total_images,
        errors = summary.total_errors_amt,
        "benchmark finished"
    );

    let report = args.printer().print(&summary)?;
    {
        let mut stdout = std::io::stdout().lock();
        stdout.write_all(&report)?;
        if !report.ends_with(b"\n") {
            stdout.write_all(b"\n")?;
        }
        stdout.flush()?;
    }

    for msg in &summary.error_messages {
        eprintln!("{msg}");
    }
    if summary.has_errors() {
        eprintln!("{} failures", summary.total_errors_amt);
        return Ok(ExitCode::from(1));
    }
    Ok(ExitCode::SUCCESS)
}
