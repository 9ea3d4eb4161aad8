use time::{UtcOffset, format_description::well_known::Rfc3339};
use tracing_subscriber::{
    EnvFilter, fmt, fmt::time::OffsetTime, layer::SubscriberExt, util::SubscriberInitExt,
};

use crate::{LoggerConfig, LoggerError, LoggerFormat};

/// Install the process-wide subscriber described by `cfg`.
///
/// Exactly one of the output layers is active; the others stay `None`.
pub fn logger_init(cfg: &LoggerConfig) -> Result<(), LoggerError> {
    let filter = env_filter(&cfg.level)?;

    let text = (cfg.format == LoggerFormat::Text).then(|| {
        fmt::layer()
            .with_writer(std::io::stderr)
            .with_ansi(cfg.use_color)
            .with_target(cfg.with_targets)
            .with_timer(local_rfc3339())
    });
    let json = (cfg.format == LoggerFormat::Json).then(|| {
        fmt::layer()
            .json()
            .with_writer(std::io::stderr)
            .with_ansi(false)
            .with_target(cfg.with_targets)
            .with_timer(local_rfc3339())
    });
    let journald = match cfg.format {
        LoggerFormat::Journald => Some(journald_layer()?),
        _ => None,
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(text)
        .with(json)
        .with(journald)
        .try_init()
        .map_err(|e| classify(e.to_string()))
}

fn env_filter(directives: &str) -> Result<EnvFilter, LoggerError> {
    EnvFilter::try_new(directives).map_err(|e| LoggerError::InvalidFilter {
        filter: directives.to_string(),
        reason: e.to_string(),
    })
}

fn local_rfc3339() -> OffsetTime<Rfc3339> {
    let offset = UtcOffset::current_local_offset().unwrap_or(UtcOffset::UTC);
    OffsetTime::new(offset, Rfc3339)
}

// Both the dispatcher and the `log` bridge report a second install with "already".
fn classify(msg: String) -> LoggerError {
    if msg.contains("already") {
        LoggerError::AlreadyInitialized
    } else {
        LoggerError::InitializationFailed(msg)
    }
}

#[cfg(all(target_os = "linux", feature = "journald"))]
type JournaldLayer = tracing_journald::Layer;
#[cfg(not(all(target_os = "linux", feature = "journald")))]
type JournaldLayer = tracing_subscriber::layer::Identity;

#[cfg(all(target_os = "linux", feature = "journald"))]
fn journald_layer() -> Result<JournaldLayer, LoggerError> {
    tracing_journald::layer().map_err(|e| LoggerError::InitializationFailed(format!("journald: {e}")))
}

#[cfg(not(all(target_os = "linux", feature = "journald")))]
fn journald_layer() -> Result<JournaldLayer, LoggerError> {
    Err(LoggerError::JournaldNotSupported)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn filter_accepts_target_directives() {
        assert!(env_filter("warn").is_ok());
        assert!(env_filter("gbench.core.job=debug,info").is_ok());
    }

    #[test]
    fn filter_rejects_bad_level() {
        let err = env_filter("gbench=loud").unwrap_err();
        assert!(matches!(err, LoggerError::InvalidFilter { ref filter, .. } if filter == "gbench=loud"));
    }

    #[test]
    fn classify_second_install() {
        assert!(matches!(
            classify("a global default trace dispatcher has already been set".into()),
            LoggerError::AlreadyInitialized
        ));
        assert!(matches!(
            classify("boom".into()),
            LoggerError::InitializationFailed(ref m) if m == "boom"
        ));
    }

    #[test]
    fn second_init_is_rejected() {
        let cfg = LoggerConfig::new(LoggerFormat::Json, "warn");
        let first = logger_init(&cfg);
        assert!(first.is_ok() || matches!(first, Err(LoggerError::AlreadyInitialized)));
        assert!(matches!(logger_init(&cfg), Err(LoggerError::AlreadyInitialized)));
    }
}
