//! Side-panel selection and the detail view built for the selected turn.

use galaxy_schema::{Chart, DataTableRow, ResponseActions, TurnId};
use serde::{Deserialize, Serialize};

use crate::transcript::Transcript;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "state", content = "turn_id")]
pub enum CanvasState {
    #[default]
    Closed,
    Open(TurnId),
}

impl CanvasState {
    pub fn open_turn(&self) -> Option<TurnId> {
        match self {
            Self::Closed => None,
            Self::Open(id) => Some(*id),
        }
    }
}

/// Everything the canvas panel shows for one turn.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CanvasView {
    pub turn_id: TurnId,
    pub position: usize,
    pub query: String,
    pub title: String,
    pub description: String,
    pub chart: Chart,
    pub rows: Vec<DataTableRow>,
    pub additional_info: Option<String>,
    pub actions: ResponseActions,
}

/// Builds the view from the turn's own response. `None` when the turn is
/// missing or carries no canvas detail.
pub fn present(transcript: &Transcript, turn_id: &TurnId) -> Option<CanvasView> {
    let position = transcript.position(turn_id)?;
    let turn = transcript.nth(position)?;
    let detail = turn.response.canvas.as_ref()?;
    Some(CanvasView {
        turn_id: turn.id,
        position,
        query: turn.query.text.clone(),
        title: detail.title.clone(),
        description: detail.description.clone(),
        chart: detail.chart.clone(),
        rows: detail.data_table.clone(),
        additional_info: detail.additional_info.clone(),
        actions: turn.response.actions,
    })
}

pub fn present_selection(transcript: &Transcript, state: CanvasState) -> Option<CanvasView> {
    state.open_turn().and_then(|id| present(transcript, &id))
}
