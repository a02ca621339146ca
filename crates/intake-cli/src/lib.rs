use intake_client::{Notification, Notifier, Severity};

/// Initialize tracing for CLI binaries. Logs go to stderr so stdout stays JSON.
pub fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();
}

/// One line per notification, e.g. `[error] Submission Failed: Please try again...`
pub fn format_notification(notification: &Notification) -> String {
    let label = match notification.severity {
        Severity::Success => "success",
        Severity::Error => "error",
    };
    format!(
        "[{}] {}: {}",
        label, notification.title, notification.description
    )
}

/// Prints notifications to stderr
#[derive(Debug, Clone, Copy, Default)]
pub struct ConsoleNotifier;

impl Notifier for ConsoleNotifier {
    fn notify(&self, notification: Notification) {
        eprintln!("{}", format_notification(&notification));
    }
}
