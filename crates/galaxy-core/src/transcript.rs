use std::collections::HashMap;

use galaxy_schema::{Turn, TurnId};

/// Append-only log of completed turns. Entries are never mutated once pushed.
#[derive(Debug, Clone, Default)]
pub struct Transcript {
    turns: Vec<Turn>,
    index: HashMap<TurnId, usize>,
}

impl Transcript {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns false, leaving the log untouched, when the id is already present.
    pub fn append(&mut self, turn: Turn) -> bool {
        if self.index.contains_key(&turn.id) {
            return false;
        }
        self.index.insert(turn.id, self.turns.len());
        self.turns.push(turn);
        true
    }

    pub fn get(&self, id: &TurnId) -> Option<&Turn> {
        self.index.get(id).map(|&pos| &self.turns[pos])
    }

    /// Zero-based position, as shown in listings.
    pub fn nth(&self, pos: usize) -> Option<&Turn> {
        self.turns.get(pos)
    }

    pub fn position(&self, id: &TurnId) -> Option<usize> {
        self.index.get(id).copied()
    }

    pub fn turns(&self) -> &[Turn] {
        &self.turns
    }

    pub fn last(&self) -> Option<&Turn> {
        self.turns.last()
    }

    pub fn len(&self) -> usize {
        self.turns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.turns.is_empty()
    }
}
