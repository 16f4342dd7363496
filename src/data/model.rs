use std::collections::BTreeSet;

use serde::Serialize;

/// Card type of the leader slot.
pub const LEADER_TYPE: &str = "LEADER";

/// Series bucket for cards whose acquisition info names no bracketed series.
pub const SERIES_OTHER: &str = "その他";

/// Series marker for cards whose acquisition info is empty or `-`.
pub const SERIES_NONE: &str = "-";

// ---------------------------------------------------------------------------
// Card – one row of a card list
// ---------------------------------------------------------------------------

/// A single card printing.
///
/// `card_id` is assigned by the source and is not unique: a parallel printing
/// shares the id of its normal printing.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Card {
    pub card_id: String,
    pub name: String,
    /// Raw color cell, e.g. `赤` or `赤/緑` for multicolor cards.
    pub color: String,
    #[serde(rename = "type")]
    pub card_type: String,
    pub cost: u32,
    pub counter: String,
    pub features: Vec<String>,
    pub attributes: Vec<String>,
    /// Rules text.
    pub text: String,
    pub trigger: String,
    pub block_icon: String,
    pub is_parallel: bool,
    pub image_url: String,
    /// Never empty; see [`SERIES_OTHER`] and [`SERIES_NONE`].
    pub series_id: String,
}

impl Card {
    pub fn is_leader(&self) -> bool {
        self.card_type == LEADER_TYPE
    }
}

// ---------------------------------------------------------------------------
// FacetIndex – distinct values per filter facet
// ---------------------------------------------------------------------------

/// Sorted distinct values of every facet, used to populate filter choices.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct FacetIndex {
    pub colors: BTreeSet<String>,
    pub types: BTreeSet<String>,
    pub costs: BTreeSet<u32>,
    pub counters: BTreeSet<String>,
    pub attributes: BTreeSet<String>,
    pub features: BTreeSet<String>,
    pub block_icons: BTreeSet<String>,
    pub series_ids: BTreeSet<String>,
}

impl FacetIndex {
    /// Collect facet values from the loaded cards.
    ///
    /// Placeholders (`""`, `-`) are skipped and multicolor cells contribute
    /// each of their colors.
    pub fn from_cards(cards: &[Card]) -> Self {
        let mut index = FacetIndex::default();

        for card in cards {
            for color in card.color.split(['/', '／']) {
                insert_value(&mut index.colors, color);
            }
            insert_value(&mut index.types, &card.card_type);
            index.costs.insert(card.cost);
            insert_value(&mut index.counters, &card.counter);
            insert_value(&mut index.block_icons, &card.block_icon);
            for attr in &card.attributes {
                insert_value(&mut index.attributes, attr);
            }
            for feature in &card.features {
                insert_value(&mut index.features, feature);
            }
            if card.series_id != SERIES_NONE {
                index.series_ids.insert(card.series_id.clone());
            }
        }
        index
    }
}

fn insert_value(set: &mut BTreeSet<String>, raw: &str) {
    let value = raw.trim();
    if !value.is_empty() && value != "-" {
        set.insert(value.to_string());
    }
}
