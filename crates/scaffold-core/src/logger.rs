//! Scoped logging
//!
//! Logging goes through `tracing`. This module adds the pieces the services
//! share on top of it: named log levels, scope labels carried on spans, and a
//! bounded buffer of the most recent formatted lines that callers hold and
//! pass around explicitly.

use serde::{Deserialize, Serialize};
use std::collections::VecDeque;
use std::fmt;
use std::str::FromStr;
use std::sync::{Arc, Mutex, PoisonError};
use tracing::field::{Field, Visit};
use tracing::span::{Attributes, Id};
use tracing::{Event, Level, Subscriber};
use tracing_subscriber::EnvFilter;
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::layer::{Context, SubscriberExt};
use tracing_subscriber::registry::LookupSpan;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::Layer;

/// Default number of formatted lines kept by a [`LogBuffer`]
pub const DEFAULT_BUFFER_SIZE: usize = 30_000;

/// Span field that carries the scope label
const SCOPE_FIELD: &str = "scope";

/// Log verbosity, ordered from silent to most verbose
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "UPPERCASE")]
pub enum LogLevel {
    None,
    Error,
    Warning,
    #[default]
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    /// Upper-case name, e.g. `WARNING`
    pub fn as_str(self) -> &'static str {
        match self {
            LogLevel::None => "NONE",
            LogLevel::Error => "ERROR",
            LogLevel::Warning => "WARNING",
            LogLevel::Info => "INFO",
            LogLevel::Debug => "DEBUG",
            LogLevel::Trace => "TRACE",
        }
    }

    /// Equivalent `tracing` filter
    pub fn to_level_filter(self) -> LevelFilter {
        match self {
            LogLevel::None => LevelFilter::OFF,
            LogLevel::Error => LevelFilter::ERROR,
            LogLevel::Warning => LevelFilter::WARN,
            LogLevel::Info => LevelFilter::INFO,
            LogLevel::Debug => LevelFilter::DEBUG,
            LogLevel::Trace => LevelFilter::TRACE,
        }
    }

    fn from_tracing(level: &Level) -> Self {
        match *level {
            Level::ERROR => LogLevel::Error,
            Level::WARN => LogLevel::Warning,
            Level::INFO => LogLevel::Info,
            Level::DEBUG => LogLevel::Debug,
            _ => LogLevel::Trace,
        }
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for LogLevel {
    type Err = crate::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "NONE" => Ok(LogLevel::None),
            "ERROR" => Ok(LogLevel::Error),
            "WARNING" => Ok(LogLevel::Warning),
            "INFO" => Ok(LogLevel::Info),
            "DEBUG" => Ok(LogLevel::Debug),
            "TRACE" => Ok(LogLevel::Trace),
            other => Err(crate::Error::UnknownLogLevel(other.to_string())),
        }
    }
}

/// Label identifying which component a log line came from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoggerScope {
    Name(String),
    Path(Vec<String>),
}

impl fmt::Display for LoggerScope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LoggerScope::Name(name) => write!(f, "[{name}]"),
            LoggerScope::Path(parts) if parts.is_empty() => f.write_str("-"),
            LoggerScope::Path(parts) => write!(f, "[{}]", parts.join(" / ")),
        }
    }
}

impl From<&str> for LoggerScope {
    fn from(name: &str) -> Self {
        LoggerScope::Name(name.to_string())
    }
}

impl From<String> for LoggerScope {
    fn from(name: String) -> Self {
        LoggerScope::Name(name)
    }
}

impl From<Vec<String>> for LoggerScope {
    fn from(parts: Vec<String>) -> Self {
        LoggerScope::Path(parts)
    }
}

/// Open a span tagging every event inside it with `scope`.
///
/// Nested scopes are joined outermost first, e.g. `[App / Mapper]`.
pub fn scoped(scope: impl Into<LoggerScope>) -> tracing::Span {
    let label = match scope.into() {
        LoggerScope::Name(name) => name,
        LoggerScope::Path(parts) => parts.join(" / "),
    };
    tracing::info_span!("scope", scope = %label)
}

/// Logging settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Most verbose level written; `RUST_LOG` takes precedence when set
    pub level: LogLevel,

    /// Number of formatted lines kept in the [`LogBuffer`]
    pub buffer_size: usize,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: LogLevel::Info,
            buffer_size: DEFAULT_BUFFER_SIZE,
        }
    }
}

/// Bounded store of the most recent formatted log lines.
///
/// Cloning shares the same storage. Install it as a `tracing` layer and keep a
/// clone wherever recent logs need to be read back.
#[derive(Debug, Clone)]
pub struct LogBuffer {
    lines: Arc<Mutex<VecDeque<String>>>,
    capacity: usize,
}

impl LogBuffer {
    /// Create an empty buffer holding at most `capacity` lines
    pub fn new(capacity: usize) -> Self {
        Self {
            lines: Arc::new(Mutex::new(VecDeque::new())),
            capacity,
        }
    }

    /// Append a line, evicting the oldest one when full
    pub fn push(&self, line: impl Into<String>) {
        if self.capacity == 0 {
            return;
        }
        let mut lines = self.lines.lock().unwrap_or_else(PoisonError::into_inner);
        lines.push_back(line.into());
        while lines.len() > self.capacity {
            lines.pop_front();
        }
    }

    /// Most recent `count` lines (all when `None` or larger than the buffer), oldest first
    pub fn last(&self, count: Option<usize>) -> Vec<String> {
        let lines = self.lines.lock().unwrap_or_else(PoisonError::into_inner);
        let skip = match count {
            Some(n) if n < lines.len() => lines.len() - n,
            _ => 0,
        };
        lines.iter().skip(skip).cloned().collect()
    }

    /// Number of stored lines
    pub fn len(&self) -> usize {
        self.lines.lock().unwrap_or_else(PoisonError::into_inner).len()
    }

    /// True when nothing has been logged yet
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Maximum number of stored lines
    pub fn capacity(&self) -> usize {
        self.capacity
    }
}

impl Default for LogBuffer {
    fn default() -> Self {
        Self::new(DEFAULT_BUFFER_SIZE)
    }
}

/// Scope label stored on a span's extensions
struct ScopeLabel(String);

/// Collects a single named field from span attributes or events
struct FieldVisitor {
    name: &'static str,
    value: Option<String>,
}

impl FieldVisitor {
    fn new(name: &'static str) -> Self {
        Self { name, value: None }
    }
}

impl Visit for FieldVisitor {
    fn record_str(&mut self, field: &Field, value: &str) {
        if field.name() == self.name {
            self.value = Some(value.to_string());
        }
    }

    fn record_debug(&mut self, field: &Field, value: &dyn fmt::Debug) {
        if field.name() == self.name {
            self.value = Some(format!("{value:?}"));
        }
    }
}

impl<S> Layer<S> for LogBuffer
where
    S: Subscriber + for<'a> LookupSpan<'a>,
{
    fn on_new_span(&self, attrs: &Attributes<'_>, id: &Id, ctx: Context<'_, S>) {
        let mut visitor = FieldVisitor::new(SCOPE_FIELD);
        attrs.record(&mut visitor);
        if let (Some(label), Some(span)) = (visitor.value, ctx.span(id)) {
            span.extensions_mut().insert(ScopeLabel(label));
        }
    }

    fn on_event(&self, event: &Event<'_>, ctx: Context<'_, S>) {
        let mut visitor = FieldVisitor::new("message");
        event.record(&mut visitor);

        let scopes: Vec<String> = ctx
            .event_scope(event)
            .map(|spans| {
                spans
                    .from_root()
                    .filter_map(|span| span.extensions().get::<ScopeLabel>().map(|s| s.0.clone()))
                    .collect()
            })
            .unwrap_or_default();

        let level = LogLevel::from_tracing(event.metadata().level());
        let timestamp = chrono::Local::now().format("%Y-%m-%d %H:%M:%S%.3f");
        self.push(format!(
            "{:<7} {timestamp} {} {}",
            level.as_str(),
            LoggerScope::Path(scopes),
            visitor.value.unwrap_or_default()
        ));
    }
}

/// Install the global subscriber: env filter, stderr formatter, and a fresh [`LogBuffer`].
///
/// # Errors
///
/// Returns an error if a global subscriber is already installed.
pub fn init_logging(config: &LoggingConfig) -> crate::Result<LogBuffer> {
    let buffer = LogBuffer::new(config.buffer_size);
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::default().add_directive(config.level.to_level_filter().into()));

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(buffer.clone())
        .try_init()
        .map_err(|e| crate::Error::Logging(e.to_string()))?;

    Ok(buffer)
}

/// Route panics through `tracing::error!` before the default hook runs
pub fn log_panics() {
    let default_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        tracing::error!("### Panic: {info}");
        default_hook(info);
    }));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_level_round_trip() {
        for level in [
            LogLevel::None,
            LogLevel::Error,
            LogLevel::Warning,
            LogLevel::Info,
            LogLevel::Debug,
            LogLevel::Trace,
        ] {
            assert_eq!(level.as_str().parse::<LogLevel>().unwrap(), level);
        }
        assert!("VERBOSE".parse::<LogLevel>().is_err());
    }

    #[test]
    fn test_log_level_ordering() {
        assert!(LogLevel::Error < LogLevel::Info);
        assert_eq!(LogLevel::None.to_level_filter(), LevelFilter::OFF);
        assert_eq!(LogLevel::Warning.to_level_filter(), LevelFilter::WARN);
    }

    #[test]
    fn test_scope_display() {
        assert_eq!(LoggerScope::from("Mapper").to_string(), "[Mapper]");
        assert_eq!(
            LoggerScope::from(vec!["App".to_string(), "Mapper".to_string()]).to_string(),
            "[App / Mapper]"
        );
        assert_eq!(LoggerScope::Path(Vec::new()).to_string(), "-");
    }

    #[test]
    fn test_buffer_evicts_oldest() {
        let buffer = LogBuffer::new(2);
        buffer.push("a");
        buffer.push("b");
        buffer.push("c");
        assert_eq!(buffer.last(None), vec!["b", "c"]);
        assert_eq!(buffer.last(Some(1)), vec!["c"]);
        assert_eq!(buffer.last(Some(10)), vec!["b", "c"]);
    }

    #[test]
    fn test_zero_capacity_buffer_stays_empty() {
        let buffer = LogBuffer::new(0);
        buffer.push("a");
        assert!(buffer.is_empty());
    }

    #[test]
    fn test_buffer_layer_records_scope_and_level() {
        let buffer = LogBuffer::new(10);
        let subscriber = tracing_subscriber::registry().with(buffer.clone());

        tracing::subscriber::with_default(subscriber, || {
            let _outer = scoped("App").entered();
            let _inner = scoped("Mapper").entered();
            tracing::warn!("mapping failed");
        });

        let lines = buffer.last(None);
        assert_eq!(lines.len(), 1);
        assert!(lines[0].starts_with("WARNING "), "{}", lines[0]);
        assert!(lines[0].ends_with("[App / Mapper] mapping failed"), "{}", lines[0]);
    }

    #[test]
    fn test_logging_config_defaults() -> anyhow::Result<()> {
        let config: LoggingConfig = serde_json::from_str(r#"{"level": "DEBUG"}"#)?;
        assert_eq!(config.level, LogLevel::Debug);
        assert_eq!(config.buffer_size, DEFAULT_BUFFER_SIZE);
        Ok(())
    }
}
