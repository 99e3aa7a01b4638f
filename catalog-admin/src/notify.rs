use catalog_client::{Notice, Notifier};

/// Prints delete failures for the operator
#[derive(Debug, Clone, Copy, Default)]
pub struct ConsoleNotifier;

impl Notifier for ConsoleNotifier {
    fn notify(&self, notice: &Notice) {
        tracing::debug!(resource = notice.resource, "notice raised");
        eprintln!("error: {}", notice);
    }
}
