//! Async driver around the store: simulated thinking delay, response
//! production, and lifecycle events on the bus.

use std::sync::Arc;

use anyhow::{anyhow, Context, Result};
use galaxy_bus::BusPublisher;
use galaxy_schema::{BusMessage, Dataset, Query, Turn, TurnId};
use tokio::sync::Mutex;
use tokio::task::JoinHandle;

use crate::canvas::{self, CanvasView};
use crate::config::{AssistantConfig, DatasetBinding};
use crate::error::StoreError;
use crate::responder::QueryResponder;
use crate::store::{Action, ConversationStore, Outcome};

/// Handle to a response that is still "thinking". Dropping it does not
/// cancel anything: the turn is appended regardless.
pub struct PendingReply {
    pub turn_id: TurnId,
    handle: JoinHandle<Result<Turn>>,
}

impl PendingReply {
    pub async fn wait(self) -> Result<Turn> {
        self.handle.await.context("response task panicked")?
    }
}

#[derive(Clone)]
pub struct Assistant {
    store: Arc<Mutex<ConversationStore>>,
    responder: Arc<QueryResponder>,
    bus: BusPublisher,
    config: AssistantConfig,
}

impl Assistant {
    pub fn new(config: AssistantConfig, responder: QueryResponder, bus: BusPublisher) -> Self {
        Self {
            store: Arc::new(Mutex::new(ConversationStore::from_config(&config))),
            responder: Arc::new(responder),
            bus,
            config,
        }
    }

    async fn dispatch(&self, action: Action) -> Result<Outcome> {
        let outcome = {
            let mut store = self.store.lock().await;
            store.dispatch(action).map_err(rejected)?
        };
        self.bus.publish(bus_message(&outcome)).await?;
        Ok(outcome)
    }

    /// Accepts a query and schedules its response after the configured delay.
    pub async fn submit(&self, text: &str) -> Result<PendingReply> {
        let query = match self
            .dispatch(Action::SubmitQuery {
                text: text.to_string(),
            })
            .await?
        {
            Outcome::Respond(query) => query,
            other => return Err(anyhow!("unexpected outcome for submit: {other:?}")),
        };
        tracing::info!(
            turn_id = %query.turn_id,
            dataset = %query.dataset,
            "query submitted"
        );

        let turn_id = query.turn_id;
        let handle = tokio::spawn(respond_later(
            self.store.clone(),
            self.responder.clone(),
            self.bus.clone(),
            self.config.clone(),
            query,
        ));
        Ok(PendingReply { turn_id, handle })
    }

    /// Submits and waits for the response.
    pub async fn ask(&self, text: &str) -> Result<Turn> {
        self.submit(text).await?.wait().await
    }

    pub async fn select_dataset(&self, dataset: Dataset) -> Result<()> {
        self.dispatch(Action::SelectDataset { dataset }).await?;
        Ok(())
    }

    /// Opens the canvas on `turn_id` and returns that turn's view. The view is
    /// built under the same lock as the selection change.
    pub async fn open_canvas(&self, turn_id: TurnId) -> Result<CanvasView> {
        let (outcome, view) = {
            let mut store = self.store.lock().await;
            let outcome = store
                .dispatch(Action::OpenCanvas { turn_id })
                .map_err(rejected)?;
            let view = canvas::present(store.transcript(), &turn_id)
                .ok_or_else(|| anyhow!("turn {turn_id} has no canvas view"))?;
            (outcome, view)
        };
        self.bus.publish(bus_message(&outcome)).await?;
        Ok(view)
    }

    pub async fn close_canvas(&self) -> Result<Option<TurnId>> {
        match self.dispatch(Action::CloseCanvas).await? {
            Outcome::CanvasClosed(previous) => Ok(previous),
            other => Err(anyhow!("unexpected outcome for close: {other:?}")),
        }
    }

    pub async fn canvas_view(&self) -> Option<CanvasView> {
        let store = self.store.lock().await;
        canvas::present_selection(store.transcript(), store.canvas())
    }

    pub async fn transcript(&self) -> Vec<Turn> {
        self.store.lock().await.transcript().turns().to_vec()
    }

    pub async fn turn_at(&self, position: usize) -> Option<Turn> {
        self.store.lock().await.transcript().nth(position).cloned()
    }

    pub async fn selected_dataset(&self) -> Dataset {
        self.store.lock().await.selected_dataset()
    }

    pub async fn is_typing(&self) -> bool {
        self.store.lock().await.is_typing()
    }
}

async fn respond_later(
    store: Arc<Mutex<ConversationStore>>,
    responder: Arc<QueryResponder>,
    bus: BusPublisher,
    config: AssistantConfig,
    query: Query,
) -> Result<Turn> {
    tokio::time::sleep(config.response_delay()).await;

    let turn_id = query.turn_id;
    let (outcome, turn) = {
        let mut store = store.lock().await;
        let dataset = match config.fallback_dataset {
            DatasetBinding::AtCompletion => store.selected_dataset(),
            DatasetBinding::AtSubmission => query.dataset,
        };
        let response = responder.respond(&query.text, dataset);
        let outcome = store.dispatch(Action::ResponseReady { turn_id, response })?;
        let turn = store
            .transcript()
            .get(&turn_id)
            .cloned()
            .ok_or_else(|| anyhow!("turn {turn_id} missing after append"))?;
        (outcome, turn)
    };
    tracing::info!(
        turn_id = %turn_id,
        intent = %turn.response.intent,
        "response ready"
    );

    bus.publish(bus_message(&outcome)).await?;
    Ok(turn)
}

fn rejected(err: StoreError) -> anyhow::Error {
    tracing::warn!("action rejected: {err}");
    err.into()
}

fn bus_message(outcome: &Outcome) -> BusMessage {
    match outcome {
        Outcome::Respond(query) => BusMessage::QuerySubmitted {
            turn_id: query.turn_id,
            text: query.text.clone(),
            dataset: query.dataset,
        },
        Outcome::Appended { turn_id, intent } => BusMessage::ResponseReady {
            turn_id: *turn_id,
            intent: intent.clone(),
        },
        Outcome::CanvasOpened(turn_id) => BusMessage::CanvasOpened { turn_id: *turn_id },
        Outcome::CanvasClosed(turn_id) => BusMessage::CanvasClosed { turn_id: *turn_id },
        Outcome::DatasetSelected(dataset) => BusMessage::DatasetSelected { dataset: *dataset },
    }
}
