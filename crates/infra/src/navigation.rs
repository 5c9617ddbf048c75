//! Navigator implementations
//!
//! The client calls [`Navigator::navigate`] from inside request handling.
//! Both implementations here return immediately.

use courseportal_core::{NavigationRequest, Navigator};
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};
use tracing::{info, warn};

/// Forwards navigation requests to the application shell over a channel
#[derive(Debug, Clone)]
pub struct ChannelNavigator {
    sender: UnboundedSender<NavigationRequest>,
}

impl ChannelNavigator {
    /// Create the navigator and the receiver the shell listens on
    pub fn new() -> (Self, UnboundedReceiver<NavigationRequest>) {
        let (sender, receiver) = mpsc::unbounded_channel();
        (Self { sender }, receiver)
    }
}

impl Navigator for ChannelNavigator {
    fn navigate(&self, request: NavigationRequest) {
        if let Err(err) = self.sender.send(request) {
            warn!(path = %err.0.path, "navigation receiver dropped; request discarded");
        }
    }
}

/// Only logs; used when no navigator is supplied
#[derive(Debug, Clone, Copy, Default)]
pub struct LoggingNavigator;

impl Navigator for LoggingNavigator {
    fn navigate(&self, request: NavigationRequest) {
        info!(path = %request.path, reason = ?request.reason, "navigation requested");
    }
}

#[cfg(test)]
mod tests {
    use courseportal_core::NavigationReason;

    use super::*;

    #[tokio::test]
    async fn channel_navigator_delivers_requests_in_order() {
        let (navigator, mut receiver) = ChannelNavigator::new();

        navigator.navigate(NavigationRequest::session_expired("/login"));
        navigator.navigate(NavigationRequest::logged_out("/login"));

        let first = receiver.recv().await.unwrap();
        assert_eq!(first.path, "/login");
        assert_eq!(first.reason, NavigationReason::SessionExpired);
        assert_eq!(receiver.recv().await.unwrap().reason, NavigationReason::LoggedOut);
    }

    #[test]
    fn dropped_receiver_does_not_panic() {
        let (navigator, receiver) = ChannelNavigator::new();
        drop(receiver);
        navigator.navigate(NavigationRequest::session_expired("/login"));
    }
}
