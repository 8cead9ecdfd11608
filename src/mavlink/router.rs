//! MAVLink Message Router
//!
//! Routes incoming MAVLink messages to registered handlers by message id.
//! Registrations are keyed by an opaque owner token so a component can drop
//! every subscription it owns in one call at teardown.

use async_trait::async_trait;
use mavlink::common::MavMessage;
use mavlink::Message;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::debug;

/// Opaque token identifying the owner of a set of registrations.
pub type HandlerToken = u64;

/// A handler for one MAVLink message type.
#[async_trait]
pub trait MessageHandler: Send + Sync {
    async fn handle_message(&self, message: &MavMessage);
}

struct Registration {
    message_id: u32,
    owner: HandlerToken,
    handler: Arc<dyn MessageHandler>,
}

/// Dispatches incoming messages to handlers registered for their message id.
pub struct MessageRouter {
    registrations: RwLock<Vec<Registration>>,
    next_token: AtomicU64,
}

impl MessageRouter {
    pub fn new() -> Self {
        Self {
            registrations: RwLock::new(Vec::new()),
            next_token: AtomicU64::new(1),
        }
    }

    /// Mint a fresh owner token.
    pub fn issue_token(&self) -> HandlerToken {
        self.next_token.fetch_add(1, Ordering::Relaxed)
    }

    /// Register a handler for a message id under the given owner token.
    pub async fn register(
        &self,
        message_id: u32,
        handler: Arc<dyn MessageHandler>,
        owner: HandlerToken,
    ) {
        let mut registrations = self.registrations.write().await;
        registrations.push(Registration {
            message_id,
            owner,
            handler,
        });
    }

    /// Drop every registration owned by the token.
    pub async fn unregister_all(&self, owner: HandlerToken) {
        let mut registrations = self.registrations.write().await;
        registrations.retain(|r| r.owner != owner);
        debug!(owner, "dropped router registrations");
    }

    /// Deliver a message to every handler registered for its id.
    ///
    /// Messages with no matching registration are ignored.
    pub async fn route(&self, message: &MavMessage) {
        let message_id = message.message_id();
        let registrations = self.registrations.read().await;
        for registration in registrations.iter() {
            if registration.message_id == message_id {
                registration.handler.handle_message(message).await;
            }
        }
    }

    /// Number of live registrations.
    pub async fn registration_count(&self) -> usize {
        self.registrations.read().await.len()
    }
}

impl Default for MessageRouter {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mavlink::common::{HEARTBEAT_DATA, SYS_STATUS_DATA};
    use std::sync::atomic::AtomicUsize;

    struct CountingHandler {
        calls: AtomicUsize,
    }

    impl CountingHandler {
        fn new() -> Arc<Self> {
            Arc::new(Self {
                calls: AtomicUsize::new(0),
            })
        }

        fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl MessageHandler for CountingHandler {
        async fn handle_message(&self, _message: &MavMessage) {
            self.calls.fetch_add(1, Ordering::SeqCst);
        }
    }

    fn heartbeat() -> MavMessage {
        MavMessage::HEARTBEAT(HEARTBEAT_DATA::default())
    }

    fn sys_status() -> MavMessage {
        MavMessage::SYS_STATUS(SYS_STATUS_DATA::default())
    }

    #[tokio::test]
    async fn routes_only_matching_message_ids() {
        let router = MessageRouter::new();
        let handler = CountingHandler::new();
        let token = router.issue_token();
        router
            .register(heartbeat().message_id(), handler.clone(), token)
            .await;

        router.route(&heartbeat()).await;
        router.route(&sys_status()).await;
        router.route(&heartbeat()).await;

        assert_eq!(handler.calls(), 2);
    }

    #[tokio::test]
    async fn unregister_all_removes_only_the_owners_registrations() {
        let router = MessageRouter::new();
        let mine = CountingHandler::new();
        let theirs = CountingHandler::new();
        let my_token = router.issue_token();
        let their_token = router.issue_token();
        assert_ne!(my_token, their_token);

        router
            .register(heartbeat().message_id(), mine.clone(), my_token)
            .await;
        router
            .register(sys_status().message_id(), mine.clone(), my_token)
            .await;
        router
            .register(heartbeat().message_id(), theirs.clone(), their_token)
            .await;
        assert_eq!(router.registration_count().await, 3);

        router.unregister_all(my_token).await;
        assert_eq!(router.registration_count().await, 1);

        router.route(&heartbeat()).await;
        router.route(&sys_status()).await;
        assert_eq!(mine.calls(), 0);
        assert_eq!(theirs.calls(), 1);
    }
}
