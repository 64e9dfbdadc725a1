use anyhow::{anyhow, Result};
use tracing::Subscriber;
use tracing_subscriber::layer::Context;
use tracing_subscriber::Layer;

/// The `message` field of an event; `log` records bridged by `tracing-log` carry it too.
fn event_message(event: &tracing::Event<'_>) -> String {
    struct MessageVisitor {
        message: String,
    }

    impl tracing::field::Visit for MessageVisitor {
        fn record_debug(&mut self, field: &tracing::field::Field, value: &dyn std::fmt::Debug) {
            if field.name() == "message" {
                self.message = format!("{:?}", value);
            }
        }

        fn record_str(&mut self, field: &tracing::field::Field, value: &str) {
            if field.name() == "message" {
                self.message = value.to_string();
            }
        }
    }

    let mut visitor = MessageVisitor {
        message: String::new(),
    };
    event.record(&mut visitor);
    visitor.message
}

pub struct LogCaptureLayer;

impl<S> Layer<S> for LogCaptureLayer
where
    S: Subscriber,
{
    fn on_event(&self, event: &tracing::Event<'_>, _ctx: Context<'_, S>) {
        let metadata = event.metadata();
        let level = metadata.level();
        let target = metadata.target();

        let message = event_message(event);

        let log_line = format!("[{}] {}: {}", level, target, message);

        let level = match *level {
            tracing::Level::ERROR => crate::LogLevel::Error,
            tracing::Level::WARN => crate::LogLevel::Warn,
            tracing::Level::INFO => crate::LogLevel::Info,
            tracing::Level::DEBUG => crate::LogLevel::Debug,
            tracing::Level::TRACE => crate::LogLevel::Trace,
        };

        crate::tv_launcher_app::append_log(level, log_line);
    }
}

/// Forwards events to logcat. `log` cannot have a second global logger once
/// `tracing-log` owns it, so logcat is fed from the subscriber instead.
#[cfg(target_os = "android")]
pub struct LogcatLayer {
    logger: android_logger::AndroidLogger,
}

#[cfg(target_os = "android")]
impl LogcatLayer {
    pub fn new() -> Self {
        Self {
            logger: android_logger::AndroidLogger::new(
                android_logger::Config::default()
                    .with_max_level(log::LevelFilter::Trace)
                    .with_tag("TvLauncher"),
            ),
        }
    }
}

#[cfg(target_os = "android")]
impl<S> Layer<S> for LogcatLayer
where
    S: Subscriber,
{
    fn on_event(&self, event: &tracing::Event<'_>, _ctx: Context<'_, S>) {
        use log::Log;

        let metadata = event.metadata();
        let level = match *metadata.level() {
            tracing::Level::ERROR => log::Level::Error,
            tracing::Level::WARN => log::Level::Warn,
            tracing::Level::INFO => log::Level::Info,
            tracing::Level::DEBUG => log::Level::Debug,
            tracing::Level::TRACE => log::Level::Trace,
        };
        let message = event_message(event);
        self.logger.log(
            &log::Record::builder()
                .level(level)
                .target(metadata.target())
                .args(format_args!("{}", message))
                .build(),
        );
    }
}

/// Install the global subscriber (`RUST_LOG` if set, else `log_level`) and
/// bridge `log` records into it. Must run before anything else claims the
/// `log` logger, or `log::` records never reach the capture panel.
pub fn init_tracing(log_level: &str) -> Result<()> {
    use tracing_subscriber::layer::SubscriberExt;
    use tracing_subscriber::util::SubscriberInitExt;
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::try_new(log_level).unwrap_or_else(|_| EnvFilter::new("error")));

    let registry = tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .with(LogCaptureLayer);

    #[cfg(target_os = "android")]
    let registry = registry.with(LogcatLayer::new());

    registry
        .try_init()
        .map_err(|e| anyhow!("Failed to install tracing subscriber: {}", e))
}

/// Log panics before the default hook runs.
pub fn install_panic_hook() {
    let default_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic_info| {
        log::error!("PANIC OCCURRED: {}", panic_info);
        if let Some(location) = panic_info.location() {
            log::error!("Panic location: {}:{}", location.file(), location.line());
        }
        default_hook(panic_info);
    }));
}
