//! Logger builder implementation

use tracing_subscriber::fmt::writer::{BoxMakeWriter, TestWriter};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer, Registry};

use crate::config::{Config, DisplayConfig, Format, WriterConfig};
use crate::error::{LogError, LogResult};

type BoxedLayer = Box<dyn Layer<Registry> + Send + Sync + 'static>;

/// Logger builder
#[derive(Debug)]
pub struct LoggerBuilder {
    config: Config,
}

/// Guard that keeps the logger alive
///
/// Holds the root span carrying the configured global fields; the span is
/// exited when the guard is dropped.
#[derive(Debug)]
pub struct LoggerGuard {
    #[allow(dead_code)]
    root_span: Option<tracing::span::EnteredSpan>,
}

impl LoggerGuard {
    /// A guard that owns nothing, returned when a subscriber was already set.
    pub(crate) fn noop() -> Self {
        Self { root_span: None }
    }
}

/// Apply the shared display toggles to a fmt layer and box it.
macro_rules! finish_fmt_layer {
    ($layer:expr, $display:expr, $writer:expr) => {{
        let layer = $layer
            .with_writer($writer)
            .with_ansi($display.colors)
            .with_target($display.target)
            .with_file($display.source)
            .with_line_number($display.source)
            .with_thread_ids($display.thread_ids);
        if $display.time {
            layer.boxed()
        } else {
            layer.without_time().boxed()
        }
    }};
}

impl LoggerBuilder {
    /// Create builder from config
    #[must_use]
    pub fn from_config(config: Config) -> Self {
        Self { config }
    }

    /// Build and install the global subscriber.
    ///
    /// # Errors
    ///
    /// - [`LogError::Filter`] if the level string cannot be parsed
    /// - [`LogError::AlreadyInitialized`] if a global subscriber is already set
    pub fn build(self) -> LogResult<LoggerGuard> {
        let filter = EnvFilter::try_new(&self.config.level)
            .map_err(|e| LogError::Filter(format!("{}: {e}", self.config.level)))?;

        let fmt_layer = fmt_layer(
            self.config.format,
            &self.config.display,
            self.config.writer,
        );

        Registry::default()
            .with(fmt_layer)
            .with(filter)
            .try_init()
            .map_err(|_| LogError::AlreadyInitialized)?;

        let root_span = if self.config.fields.is_empty() {
            None
        } else {
            let fields = &self.config.fields;
            let custom = serde_json::to_string(&fields.custom).unwrap_or_default();
            let span = tracing::info_span!(
                "app",
                service = fields.service.as_deref().unwrap_or(""),
                env = fields.env.as_deref().unwrap_or(""),
                version = fields.version.as_deref().unwrap_or(""),
                custom = %custom,
            );
            Some(span.entered())
        };

        tracing::debug!(level = %self.config.level, format = ?self.config.format, "logger initialized");

        Ok(LoggerGuard { root_span })
    }
}

fn fmt_layer(format: Format, display: &DisplayConfig, writer: WriterConfig) -> BoxedLayer {
    let make_writer = match writer {
        WriterConfig::Stderr => BoxMakeWriter::new(std::io::stderr),
        WriterConfig::Stdout => BoxMakeWriter::new(std::io::stdout),
        WriterConfig::Test => BoxMakeWriter::new(TestWriter::new()),
    };

    match format {
        Format::Pretty => {
            finish_fmt_layer!(tracing_subscriber::fmt::layer().pretty(), display, make_writer)
        }
        Format::Compact => {
            finish_fmt_layer!(tracing_subscriber::fmt::layer().compact(), display, make_writer)
        }
        Format::Json => finish_fmt_layer!(
            tracing_subscriber::fmt::layer()
                .json()
                .with_current_span(true)
                .with_span_list(display.span_list)
                .flatten_event(display.flatten),
            display,
            make_writer
        ),
    }
}
