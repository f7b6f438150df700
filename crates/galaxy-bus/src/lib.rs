use std::collections::HashMap;
use std::sync::Arc;

use anyhow::Result;
use galaxy_schema::BusMessage;
use tokio::sync::{mpsc, RwLock};

#[derive(Debug, Clone, Hash, Eq, PartialEq)]
pub enum Topic {
    QuerySubmitted,
    ResponseReady,
    DatasetSelected,
    CanvasOpened,
    CanvasClosed,
}

impl Topic {
    pub fn from_message(msg: &BusMessage) -> Self {
        match msg {
            BusMessage::QuerySubmitted { .. } => Topic::QuerySubmitted,
            BusMessage::ResponseReady { .. } => Topic::ResponseReady,
            BusMessage::DatasetSelected { .. } => Topic::DatasetSelected,
            BusMessage::CanvasOpened { .. } => Topic::CanvasOpened,
            BusMessage::CanvasClosed { .. } => Topic::CanvasClosed,
        }
    }
}

type Subscriber = mpsc::Sender<BusMessage>;
type SubscriberMap = Arc<RwLock<HashMap<Topic, Vec<Subscriber>>>>;

pub struct EventBus {
    subscribers: SubscriberMap,
    capacity: usize,
}

impl EventBus {
    pub fn new(capacity: usize) -> Self {
        Self {
            subscribers: Arc::new(RwLock::new(HashMap::new())),
            capacity,
        }
    }

    pub async fn subscribe(&self, topic: Topic) -> mpsc::Receiver<BusMessage> {
        let (tx, rx) = mpsc::channel(self.capacity);
        let mut subs = self.subscribers.write().await;
        subs.entry(topic).or_default().push(tx);
        rx
    }

    pub async fn publish(&self, msg: BusMessage) -> Result<()> {
        deliver(&self.subscribers, msg).await
    }

    pub fn publisher(&self) -> BusPublisher {
        BusPublisher {
            subscribers: self.subscribers.clone(),
        }
    }
}

/// Cloneable publish-only handle, handed to tasks that outlive a borrow of the bus.
#[derive(Clone)]
pub struct BusPublisher {
    subscribers: SubscriberMap,
}

impl BusPublisher {
    pub async fn publish(&self, msg: BusMessage) -> Result<()> {
        deliver(&self.subscribers, msg).await
    }
}

// Full subscriber queues drop the message rather than block the publisher.
async fn deliver(subscribers: &SubscriberMap, msg: BusMessage) -> Result<()> {
    let topic = Topic::from_message(&msg);
    let subs = subscribers.read().await;
    if let Some(subscribers) = subs.get(&topic) {
        for tx in subscribers {
            if tx.try_send(msg.clone()).is_err() {
                tracing::debug!(?topic, "bus subscriber full or closed, dropping message");
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use galaxy_schema::{Dataset, Intent, TurnId};
    use tokio::time::{timeout, Duration};

    fn response_ready() -> BusMessage {
        BusMessage::ResponseReady {
            turn_id: TurnId::new(),
            intent: Intent::MoistureRiskTrend,
        }
    }

    #[tokio::test]
    async fn publish_to_no_subscribers_succeeds() {
        let bus = EventBus::new(8);
        let result = bus.publish(BusMessage::CanvasClosed { turn_id: None }).await;
        assert!(result.is_ok());
    }

    #[tokio::test]
    async fn subscribe_and_receive() {
        let bus = EventBus::new(8);
        let mut rx = bus.subscribe(Topic::ResponseReady).await;

        bus.publish(response_ready()).await.unwrap();

        let received = timeout(Duration::from_millis(100), rx.recv())
            .await
            .unwrap()
            .unwrap();
        assert!(matches!(received, BusMessage::ResponseReady { .. }));
    }

    #[tokio::test]
    async fn multiple_subscribers_same_topic() {
        let bus = EventBus::new(8);
        let mut rx1 = bus.subscribe(Topic::ResponseReady).await;
        let mut rx2 = bus.subscribe(Topic::ResponseReady).await;

        bus.publish(response_ready()).await.unwrap();

        let got1 = timeout(Duration::from_millis(100), rx1.recv())
            .await
            .unwrap()
            .unwrap();
        let got2 = timeout(Duration::from_millis(100), rx2.recv())
            .await
            .unwrap()
            .unwrap();
        assert!(matches!(got1, BusMessage::ResponseReady { .. }));
        assert!(matches!(got2, BusMessage::ResponseReady { .. }));
    }

    #[tokio::test]
    async fn different_topics_no_crosstalk() {
        let bus = EventBus::new(8);
        let mut ready_rx = bus.subscribe(Topic::ResponseReady).await;

        bus.publish(BusMessage::DatasetSelected {
            dataset: Dataset::Qms,
        })
        .await
        .unwrap();

        let received = timeout(Duration::from_millis(50), ready_rx.recv()).await;
        assert!(received.is_err());
    }

    #[tokio::test]
    async fn publisher_clone_reaches_bus_subscribers() {
        let bus = EventBus::new(8);
        let mut rx = bus.subscribe(Topic::QuerySubmitted).await;
        let publisher = bus.publisher().clone();

        publisher
            .publish(BusMessage::QuerySubmitted {
                turn_id: TurnId::new(),
                text: "Show recent audit findings".into(),
                dataset: Dataset::Lims,
            })
            .await
            .unwrap();

        let received = timeout(Duration::from_millis(100), rx.recv())
            .await
            .unwrap()
            .unwrap();
        match received {
            BusMessage::QuerySubmitted { text, .. } => {
                assert_eq!(text, "Show recent audit findings")
            }
            other => panic!("unexpected message: {other:?}"),
        }
    }

    #[tokio::test]
    async fn full_queue_drops_extra_messages() {
        let bus = EventBus::new(1);
        let mut rx = bus.subscribe(Topic::ResponseReady).await;

        bus.publish(response_ready()).await.unwrap();
        bus.publish(response_ready()).await.unwrap();

        assert!(timeout(Duration::from_millis(100), rx.recv()).await.is_ok());
        assert!(timeout(Duration::from_millis(50), rx.recv()).await.is_err());
    }

    #[test]
    fn topic_from_message_covers_all_variants() {
        let turn_id = TurnId::new();
        let cases = vec![
            (
                BusMessage::QuerySubmitted {
                    turn_id,
                    text: "q".into(),
                    dataset: Dataset::Mes,
                },
                Topic::QuerySubmitted,
            ),
            (
                BusMessage::ResponseReady {
                    turn_id,
                    intent: Intent::Unsupported,
                },
                Topic::ResponseReady,
            ),
            (
                BusMessage::DatasetSelected {
                    dataset: Dataset::Eln,
                },
                Topic::DatasetSelected,
            ),
            (BusMessage::CanvasOpened { turn_id }, Topic::CanvasOpened),
            (
                BusMessage::CanvasClosed {
                    turn_id: Some(turn_id),
                },
                Topic::CanvasClosed,
            ),
        ];

        for (msg, expected) in cases {
            assert_eq!(Topic::from_message(&msg), expected);
        }
    }
}
