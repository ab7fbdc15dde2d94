//! Hard-redirect handling for the CLI session loop.

use dashboard_core::Navigator;
use tokio::sync::mpsc::{unbounded_channel, UnboundedReceiver, UnboundedSender};

/// Forwards redirects to the session loop, which reboots the dashboard.
pub struct RebootNavigator {
    tx: UnboundedSender<String>,
}

impl RebootNavigator {
    pub fn channel() -> (Self, UnboundedReceiver<String>) {
        let (tx, rx) = unbounded_channel();
        (Self { tx }, rx)
    }
}

impl Navigator for RebootNavigator {
    fn hard_redirect(&self, path: &str) {
        if self.tx.send(path.to_string()).is_err() {
            tracing::warn!(path, "redirect requested after session loop exited");
        }
    }
}
