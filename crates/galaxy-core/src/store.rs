//! Single owner of conversation state, mutated only through [`Action`]s.

use std::collections::HashMap;

use chrono::Utc;
use galaxy_schema::{Dataset, Intent, Query, Response, Turn, TurnId};

use crate::canvas::CanvasState;
use crate::config::AssistantConfig;
use crate::error::StoreError;
use crate::transcript::Transcript;

#[derive(Debug, Clone)]
pub enum Action {
    SubmitQuery { text: String },
    ResponseReady { turn_id: TurnId, response: Response },
    OpenCanvas { turn_id: TurnId },
    CloseCanvas,
    SelectDataset { dataset: Dataset },
}

/// What a successful dispatch did; the caller turns these into follow-up work.
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    /// Query accepted; a response must be produced for it.
    Respond(Query),
    Appended { turn_id: TurnId, intent: Intent },
    CanvasOpened(TurnId),
    CanvasClosed(Option<TurnId>),
    DatasetSelected(Dataset),
}

#[derive(Debug, Clone)]
pub struct ConversationStore {
    transcript: Transcript,
    pending: HashMap<TurnId, Query>,
    canvas: CanvasState,
    selected_dataset: Dataset,
    submit_while_pending: bool,
}

impl Default for ConversationStore {
    fn default() -> Self {
        Self::new(Dataset::default(), true)
    }
}

impl ConversationStore {
    pub fn new(selected_dataset: Dataset, submit_while_pending: bool) -> Self {
        Self {
            transcript: Transcript::new(),
            pending: HashMap::new(),
            canvas: CanvasState::Closed,
            selected_dataset,
            submit_while_pending,
        }
    }

    pub fn from_config(config: &AssistantConfig) -> Self {
        Self::new(config.default_dataset, config.submit_while_pending)
    }

    pub fn dispatch(&mut self, action: Action) -> Result<Outcome, StoreError> {
        match action {
            Action::SubmitQuery { text } => self.submit(text),
            Action::ResponseReady { turn_id, response } => self.complete(turn_id, response),
            Action::OpenCanvas { turn_id } => {
                let turn = self
                    .transcript
                    .get(&turn_id)
                    .ok_or(StoreError::UnknownTurn(turn_id))?;
                if turn.response.canvas.is_none() {
                    return Err(StoreError::NoCanvas(turn_id));
                }
                self.canvas = CanvasState::Open(turn_id);
                Ok(Outcome::CanvasOpened(turn_id))
            }
            Action::CloseCanvas => {
                let previous = self.canvas.open_turn();
                self.canvas = CanvasState::Closed;
                Ok(Outcome::CanvasClosed(previous))
            }
            Action::SelectDataset { dataset } => {
                self.selected_dataset = dataset;
                Ok(Outcome::DatasetSelected(dataset))
            }
        }
    }

    fn submit(&mut self, text: String) -> Result<Outcome, StoreError> {
        if text.trim().is_empty() {
            return Err(StoreError::EmptyQuery);
        }
        if !self.submit_while_pending && self.is_typing() {
            return Err(StoreError::ResponsePending);
        }

        let turn_id = TurnId::new();
        let query = Query {
            turn_id,
            text,
            dataset: self.selected_dataset,
            submitted_at: Utc::now(),
        };
        self.pending.insert(turn_id, query.clone());
        Ok(Outcome::Respond(query))
    }

    fn complete(&mut self, turn_id: TurnId, response: Response) -> Result<Outcome, StoreError> {
        let query = self
            .pending
            .remove(&turn_id)
            .ok_or(StoreError::UnknownTurn(turn_id))?;
        let intent = response.intent.clone();
        let appended = self.transcript.append(Turn {
            id: turn_id,
            query,
            response,
            completed_at: Utc::now(),
        });
        if !appended {
            return Err(StoreError::UnknownTurn(turn_id));
        }
        Ok(Outcome::Appended { turn_id, intent })
    }

    pub fn transcript(&self) -> &Transcript {
        &self.transcript
    }

    pub fn canvas(&self) -> CanvasState {
        self.canvas
    }

    pub fn selected_dataset(&self) -> Dataset {
        self.selected_dataset
    }

    pub fn pending_query(&self, turn_id: &TurnId) -> Option<&Query> {
        self.pending.get(turn_id)
    }

    pub fn pending_count(&self) -> usize {
        self.pending.len()
    }

    /// True while any submitted query is waiting for its response.
    pub fn is_typing(&self) -> bool {
        !self.pending.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures;

    fn submit(store: &mut ConversationStore, text: &str) -> Query {
        match store
            .dispatch(Action::SubmitQuery {
                text: text.to_string(),
            })
            .unwrap()
        {
            Outcome::Respond(query) => query,
            other => panic!("unexpected outcome: {other:?}"),
        }
    }

    fn ready(store: &mut ConversationStore, turn_id: TurnId, response: Response) {
        store
            .dispatch(Action::ResponseReady { turn_id, response })
            .unwrap();
    }

    #[test]
    fn blank_queries_are_rejected() {
        let mut store = ConversationStore::default();
        for text in ["", "   ", "\n\t"] {
            let err = store
                .dispatch(Action::SubmitQuery { text: text.into() })
                .unwrap_err();
            assert_eq!(err, StoreError::EmptyQuery);
        }
        assert!(!store.is_typing());
    }

    #[test]
    fn submission_captures_selected_dataset() {
        let mut store = ConversationStore::default();
        store
            .dispatch(Action::SelectDataset {
                dataset: Dataset::Eln,
            })
            .unwrap();
        let query = submit(&mut store, "Summarize Lisa D's ELN notes for May 12.");

        assert_eq!(query.dataset, Dataset::Eln);
        assert!(store.is_typing());
        assert_eq!(store.pending_query(&query.turn_id), Some(&query));
        assert!(store.transcript().is_empty());
    }

    #[test]
    fn response_consumes_pending_query() {
        let mut store = ConversationStore::default();
        let query = submit(&mut store, "asdf");
        ready(&mut store, query.turn_id, fixtures::ash_content());

        assert!(!store.is_typing());
        let turn = store.transcript().get(&query.turn_id).unwrap();
        assert_eq!(turn.query, query);
        assert_eq!(turn.response.intent, Intent::AshContent);
    }

    #[test]
    fn second_response_for_same_turn_is_rejected() {
        let mut store = ConversationStore::default();
        let query = submit(&mut store, "first");
        ready(&mut store, query.turn_id, fixtures::soy_trend());

        let err = store
            .dispatch(Action::ResponseReady {
                turn_id: query.turn_id,
                response: fixtures::root_cause(),
            })
            .unwrap_err();
        assert_eq!(err, StoreError::UnknownTurn(query.turn_id));
        assert_eq!(store.transcript().len(), 1);
        assert_eq!(
            store.transcript().nth(0).unwrap().response.intent,
            Intent::SoyTrend
        );
    }

    #[test]
    fn responses_append_in_completion_order() {
        let mut store = ConversationStore::default();
        let first = submit(&mut store, "first");
        let second = submit(&mut store, "second");
        assert_eq!(store.pending_count(), 2);

        ready(&mut store, second.turn_id, fixtures::root_cause());
        ready(&mut store, first.turn_id, fixtures::soy_trend());

        let texts: Vec<_> = store
            .transcript()
            .turns()
            .iter()
            .map(|t| t.query.text.as_str())
            .collect();
        assert_eq!(texts, vec!["second", "first"]);
    }

    #[test]
    fn pending_query_blocks_submit_when_configured() {
        let mut store = ConversationStore::new(Dataset::Lims, false);
        let query = submit(&mut store, "first");

        let err = store
            .dispatch(Action::SubmitQuery {
                text: "second".into(),
            })
            .unwrap_err();
        assert_eq!(err, StoreError::ResponsePending);

        ready(&mut store, query.turn_id, fixtures::ash_content());
        submit(&mut store, "third");
    }

    #[test]
    fn canvas_open_replace_and_close() {
        let mut store = ConversationStore::default();
        let a = submit(&mut store, "a");
        let b = submit(&mut store, "b");
        ready(&mut store, a.turn_id, fixtures::moisture_risk_trend());
        ready(&mut store, b.turn_id, fixtures::failure_pattern());

        store
            .dispatch(Action::OpenCanvas { turn_id: a.turn_id })
            .unwrap();
        assert_eq!(store.canvas(), CanvasState::Open(a.turn_id));

        store
            .dispatch(Action::OpenCanvas { turn_id: b.turn_id })
            .unwrap();
        assert_eq!(store.canvas(), CanvasState::Open(b.turn_id));

        let outcome = store.dispatch(Action::CloseCanvas).unwrap();
        assert_eq!(outcome, Outcome::CanvasClosed(Some(b.turn_id)));
        assert_eq!(store.canvas(), CanvasState::Closed);
    }

    #[test]
    fn canvas_requires_existing_turn_with_detail() {
        let mut store = ConversationStore::default();
        let pending = submit(&mut store, "still thinking");
        assert_eq!(
            store
                .dispatch(Action::OpenCanvas {
                    turn_id: pending.turn_id
                })
                .unwrap_err(),
            StoreError::UnknownTurn(pending.turn_id)
        );

        ready(&mut store, pending.turn_id, fixtures::note_rewrite());
        assert_eq!(
            store
                .dispatch(Action::OpenCanvas {
                    turn_id: pending.turn_id
                })
                .unwrap_err(),
            StoreError::NoCanvas(pending.turn_id)
        );
        assert_eq!(store.canvas(), CanvasState::Closed);
    }
}
