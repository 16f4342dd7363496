//! Deck lists and their plain-text export.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum DeckError {
    #[error("deck has no leader")]
    MissingLeader,
}

/// A deck: one leader plus card id → number of copies.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Deck {
    #[serde(default)]
    pub name: String,
    pub leader: String,
    #[serde(default)]
    pub cards: BTreeMap<String, u32>,
}

impl Deck {
    /// Total copies in the main deck, leader excluded.
    pub fn card_count(&self) -> u32 {
        self.cards.values().sum()
    }

    /// Render the deck as `<count>x<card id>` lines, sorted by card id.
    ///
    /// ```text
    /// # Red Straw Hats
    /// 1xOP01-001
    /// 4xOP01-016
    /// ```
    pub fn export_text(&self) -> Result<String, DeckError> {
        let leader = self.leader.trim();
        if leader.is_empty() {
            return Err(DeckError::MissingLeader);
        }

        let mut lines = Vec::with_capacity(self.cards.len() + 2);
        let name = self.name.trim();
        if !name.is_empty() {
            lines.push(format!("# {name}"));
        }
        lines.push(format!("1x{leader}"));
        for (card_id, count) in &self.cards {
            if *count > 0 {
                lines.push(format!("{count}x{}", card_id.trim()));
            }
        }
        Ok(lines.join("\n"))
    }
}
