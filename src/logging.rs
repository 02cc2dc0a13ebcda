use std::{fmt::Write as _, net::SocketAddr, path::Path, time::Instant};

use anyhow::Context;
use axum::{
    extract::{ConnectInfo, MatchedPath, Request, State},
    http::header::USER_AGENT,
    middleware::Next,
    response::Response,
};
use scaffold_config::{Environment, LogConfig};
use scaffold_core::response::timestamp;
use tracing::{Event, Level, Metadata, Subscriber, error, info, warn};
use tracing_appender::{
    non_blocking::WorkerGuard,
    rolling::{RollingFileAppender, Rotation},
};
use tracing_subscriber::{
    EnvFilter, Layer, Registry,
    filter::filter_fn,
    fmt::{self, FmtContext, FormatEvent, FormatFields, format},
    layer::SubscriberExt,
    registry::LookupSpan,
    util::SubscriberInitExt,
};

/// Events from this crate's targets are the only ones written to files.
pub const LOG_TARGET: &str = env!("CARGO_CRATE_NAME");

const FILE_LEVELS: [Level; 4] = [Level::ERROR, Level::WARN, Level::INFO, Level::DEBUG];

type BoxedLayer = Box<dyn Layer<Registry> + Send + Sync + 'static>;

pub async fn logging_middleware(
    State(environment): State<Environment>,
    req: Request,
    next: Next,
) -> Response {
    let start = Instant::now();
    let method = req.method().clone();
    let uri = req.uri().clone();
    let matched_path = req
        .extensions()
        .get::<MatchedPath>()
        .map(|p| p.as_str().to_string())
        .unwrap_or_else(|| uri.path().to_string());

    let (user_agent, remote_addr) = if environment.is_production() {
        let user_agent = req
            .headers()
            .get(USER_AGENT)
            .and_then(|value| value.to_str().ok())
            .map(str::to_string);
        let remote_addr = req
            .extensions()
            .get::<ConnectInfo<SocketAddr>>()
            .map(|ConnectInfo(addr)| *addr);
        (user_agent, remote_addr)
    } else {
        (None, None)
    };

    let request_id = uuid::Uuid::new_v4().to_string();

    info!(
        request_id = %request_id,
        method = %method,
        path = %matched_path,
        user_agent = user_agent.as_deref(),
        remote_addr = remote_addr.map(tracing::field::display),
        "Incoming request"
    );

    let response = next.run(req).await;
    let latency = start.elapsed();
    let status = response.status();

    match status.as_u16() {
        400..=499 => {
            warn!(
                request_id = %request_id,
                method = %method,
                path = %uri,
                status = %status.as_u16(),
                latency_ms = %latency.as_millis(),
                "Client error"
            );
        }
        500..=599 => {
            error!(
                request_id = %request_id,
                method = %method,
                path = %uri,
                status = %status.as_u16(),
                latency_ms = %latency.as_millis(),
                "Server error"
            );
        }
        _ => {
            info!(
                request_id = %request_id,
                method = %method,
                path = %uri,
                status = %status.as_u16(),
                latency_ms = %latency.as_millis(),
                "Request completed"
            );
        }
    }

    response
}

fn console_layer(config: &LogConfig) -> BoxedLayer {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(format!(
            "{}={},tower_http=warn,hyper=warn",
            LOG_TARGET,
            config.level.as_str().to_lowercase()
        ))
    });

    fmt::layer()
        .with_target(false)
        .with_thread_ids(false)
        .with_thread_names(false)
        .with_file(true)
        .with_line_number(true)
        .compact()
        .with_filter(filter)
        .boxed()
}

/// Plain line format for the level files:
/// `[2026-01-01T00:00:00.000Z] [ERROR] message key=value`.
#[derive(Debug, Clone, Copy, Default)]
pub struct LevelPrefixFormat;

impl<S, N> FormatEvent<S, N> for LevelPrefixFormat
where
    S: Subscriber + for<'a> LookupSpan<'a>,
    N: for<'a> FormatFields<'a> + 'static,
{
    fn format_event(
        &self,
        ctx: &FmtContext<'_, S, N>,
        mut writer: format::Writer<'_>,
        event: &Event<'_>,
    ) -> std::fmt::Result {
        write!(
            writer,
            "[{}] [{}] ",
            timestamp(),
            event.metadata().level().as_str()
        )?;
        ctx.field_format().format_fields(writer.by_ref(), event)?;
        writeln!(writer)
    }
}

/// One file per level, holding only events of exactly that level.
fn level_file_layer(dir: &Path, level: Level) -> anyhow::Result<(BoxedLayer, WorkerGuard)> {
    let file_name = format!("{}.log", level.as_str().to_lowercase());
    let appender = RollingFileAppender::builder()
        .rotation(Rotation::NEVER)
        .filename_prefix(&file_name)
        .build(dir)
        .with_context(|| format!("Failed to open log file {}", file_name))?;
    let (writer, guard) = tracing_appender::non_blocking(appender);

    let layer = fmt::layer()
        .event_format(LevelPrefixFormat)
        .with_writer(writer)
        .with_ansi(false)
        .with_filter(filter_fn(move |meta: &Metadata<'_>| {
            *meta.level() == level && meta.target().starts_with(LOG_TARGET)
        }))
        .boxed();

    Ok((layer, guard))
}

/// Builds the subscriber without installing it.
///
/// The returned guards flush the file writers when dropped and must be
/// held for as long as logging should reach disk.
pub fn build_subscriber(
    config: &LogConfig,
) -> anyhow::Result<(impl Subscriber + Send + Sync + 'static, Vec<WorkerGuard>)> {
    std::fs::create_dir_all(&config.dir).with_context(|| {
        format!("Failed to create log directory {}", config.dir.display())
    })?;

    let mut layers: Vec<BoxedLayer> = vec![console_layer(config)];
    let mut guards = Vec::new();

    for level in FILE_LEVELS.into_iter().filter(|level| config.enabled(*level)) {
        let (layer, guard) = level_file_layer(&config.dir, level)?;
        layers.push(layer);
        guards.push(guard);
    }

    Ok((tracing_subscriber::registry().with(layers), guards))
}

pub fn init_tracing(config: &LogConfig) -> anyhow::Result<Vec<WorkerGuard>> {
    let (subscriber, guards) = build_subscriber(config)?;
    subscriber
        .try_init()
        .context("Failed to install tracing subscriber")?;
    Ok(guards)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn read(dir: &TempDir, name: &str) -> String {
        std::fs::read_to_string(dir.path().join(name)).unwrap_or_default()
    }

    #[test]
    fn test_events_land_in_their_level_file() {
        let dir = TempDir::new().unwrap();
        let config = LogConfig {
            level: Level::INFO,
            dir: dir.path().to_path_buf(),
        };

        let (subscriber, guards) = build_subscriber(&config).unwrap();
        tracing::subscriber::with_default(subscriber, || {
            tracing::error!("database exploded");
            tracing::warn!("slow request");
            tracing::info!("server started");
            tracing::debug!("cache miss");
        });
        drop(guards);

        let error_log = read(&dir, "error.log");
        let warn_log = read(&dir, "warn.log");
        let info_log = read(&dir, "info.log");

        assert!(error_log.contains("database exploded"));
        assert!(!error_log.contains("slow request"));
        assert!(warn_log.contains("slow request"));
        assert!(!warn_log.contains("server started"));
        assert!(info_log.contains("server started"));
        assert!(!info_log.contains("database exploded"));
        assert!(!dir.path().join("debug.log").exists());
    }

    #[test]
    fn test_level_files_use_bracketed_prefix() {
        let dir = TempDir::new().unwrap();
        let config = LogConfig {
            level: Level::INFO,
            dir: dir.path().to_path_buf(),
        };

        let (subscriber, guards) = build_subscriber(&config).unwrap();
        tracing::subscriber::with_default(subscriber, || {
            tracing::error!(user.id = 7, "database exploded");
        });
        drop(guards);

        let error_log = read(&dir, "error.log");
        let line = error_log.lines().next().unwrap();
        let (stamp, rest) = line
            .strip_prefix('[')
            .and_then(|line| line.split_once("] "))
            .unwrap();

        assert!(chrono::DateTime::parse_from_rfc3339(stamp).is_ok());
        assert!(stamp.ends_with('Z'));
        assert_eq!(rest, "[ERROR] database exploded user.id=7");
    }

    #[test]
    fn test_foreign_targets_are_not_written() {
        let dir = TempDir::new().unwrap();
        let config = LogConfig {
            level: Level::DEBUG,
            dir: dir.path().to_path_buf(),
        };

        let (subscriber, guards) = build_subscriber(&config).unwrap();
        tracing::subscriber::with_default(subscriber, || {
            tracing::error!(target: "hyper::proto", "connection reset");
        });
        drop(guards);

        assert!(!read(&dir, "error.log").contains("connection reset"));
    }
}
