use anyhow::{Context, bail};
use clap::Parser;
use tracing::info;

use gbench_cli::{Mode, ReporterArgs};
use gbench_core::{CommandSpec, ProcessInvoker};
use gbench_exec::{ProcConfig, ProcInvoker};
use gbench_observe::logger_init;
use gbench_report::datadog::{DatadogClient, DatadogConfig, Event, metric_series, unix_now};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = ReporterArgs::parse();
    logger_init(&args.logger_config()).context("init logger")?;

    let client = DatadogClient::new(DatadogConfig::from_env()?);

    match args.mode {
        Mode::Metrics {
            bench_bin,
            prefix,
            bench_args,
        } => metrics(&client, bench_bin, &prefix, bench_args).await,
        Mode::Event { title, message } => event(&client, &title, message).await,
    }
}

async fn metrics(
    client: &DatadogClient,
    bench_bin: String,
    prefix: &str,
    bench_args: Vec<String>,
) -> anyhow::Result<()> {
    let invoker = ProcInvoker::new(ProcConfig {
        inherit_stderr: true,
        ..Default::default()
    })
    .with_name("grootfs-bench");

    let cmd = CommandSpec::new(bench_bin, bench_args);
    let out = invoker
        .run(&cmd)
        .await
        .with_context(|| format!("run `{cmd}`"))?;

    println!("sending the following metrics to datadog:\n{}", out.trim_end());

    let summary: serde_json::Value =
        serde_json::from_str(&out).context("bench output is not json")?;
    if !summary.is_object() {
        bail!(gbench_report::ReportError::NotAnObject);
    }

    let series = metric_series(prefix, &summary, unix_now());
    client.emit_series(&series).await?;
    info!(count = series.len(), "metric series accepted");
    Ok(())
}

async fn event(client: &DatadogClient, title: &str, message: String) -> anyhow::Result<()> {
    let event = Event::commit(title, message, unix_now());

    if client
        .event_already_published(&event.title, event.date_happened)
        .await?
    {
        println!("Already published");
        return Ok(());
    }

    println!("publishing event");
    client.publish_event(&event).await?;
    Ok(())
}
