//! Broadcast event bus carrying page observations between the tap, the
//! click capture and the dialog watcher. Delivery is fire-and-forget:
//! losing a subscriber never fails the publisher.

use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::broadcast;

use posinfo_core_types::OverlayError;

/// Trait implemented by payload types that can be carried on the bus.
pub trait Event: Clone + Send + Sync + std::fmt::Debug + 'static {}

impl<T> Event for T where T: Clone + Send + Sync + std::fmt::Debug + 'static {}

#[async_trait]
pub trait EventBus<E>: Send + Sync
where
    E: Event,
{
    async fn publish(&self, event: E) -> Result<(), OverlayError>;
    fn subscribe(&self) -> broadcast::Receiver<E>;
}

/// In-memory bus backed by a tokio broadcast channel; the only
/// implementation the engine needs, and directly usable in tests.
pub struct InMemoryBus<E>
where
    E: Event,
{
    sender: broadcast::Sender<E>,
}

impl<E> InMemoryBus<E>
where
    E: Event,
{
    pub fn new(capacity: usize) -> Arc<Self> {
        let (sender, _) = broadcast::channel(capacity.max(1));
        Arc::new(Self { sender })
    }
}

#[async_trait]
impl<E> EventBus<E> for InMemoryBus<E>
where
    E: Event,
{
    async fn publish(&self, event: E) -> Result<(), OverlayError> {
        self.sender
            .send(event)
            .map(|_| ())
            .map_err(|err| OverlayError::new(err.to_string()))
    }

    fn subscribe(&self) -> broadcast::Receiver<E> {
        self.sender.subscribe()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn publish_reaches_all_subscribers() {
        let bus = InMemoryBus::<u32>::new(8);
        let mut a = bus.subscribe();
        let mut b = bus.subscribe();

        bus.publish(7).await.expect("publish");

        assert_eq!(a.recv().await.unwrap(), 7);
        assert_eq!(b.recv().await.unwrap(), 7);
    }

    #[tokio::test]
    async fn publish_without_subscribers_is_an_error_the_caller_may_ignore() {
        let bus = InMemoryBus::<u32>::new(8);
        assert!(bus.publish(1).await.is_err());
    }
}
