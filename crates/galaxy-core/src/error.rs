use galaxy_schema::TurnId;
use thiserror::Error;

/// Rejections from the conversation store.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum StoreError {
    #[error("query is empty")]
    EmptyQuery,

    #[error("a response is still pending; wait before submitting again")]
    ResponsePending,

    #[error("unknown turn: {0}")]
    UnknownTurn(TurnId),

    #[error("turn {0} has no canvas detail")]
    NoCanvas(TurnId),
}
