use serde::{Deserialize, Deserializer, Serialize};

use super::model::Card;

// ---------------------------------------------------------------------------
// Filter options: one optional constraint per facet
// ---------------------------------------------------------------------------

/// Which printings a query accepts.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ParallelMode {
    /// Normal printings only.
    Normal,
    /// Parallel printings only.
    Parallel,
    /// No constraint.
    #[default]
    #[serde(alias = "")]
    Both,
}

/// A multi-facet card query.
///
/// Every facet defaults to inactive. An empty list is the same as an absent
/// facet: it constrains nothing. Active facets combine with AND; the values
/// inside one facet combine with OR.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FilterOptions {
    /// Substring match against the color cell.
    #[serde(deserialize_with = "null_as_default")]
    pub colors: Vec<String>,
    /// Exact match against the card type.
    #[serde(deserialize_with = "null_as_default")]
    pub types: Vec<String>,
    /// Exact match against the cost. Negative values match nothing.
    #[serde(deserialize_with = "null_as_default")]
    pub costs: Vec<i64>,
    /// Exact match against the counter cell.
    #[serde(deserialize_with = "null_as_default")]
    pub counters: Vec<String>,
    /// Substring match against any attribute.
    #[serde(deserialize_with = "null_as_default")]
    pub attributes: Vec<String>,
    /// Exact match against the block icon.
    #[serde(deserialize_with = "null_as_default")]
    pub blocks: Vec<String>,
    /// Substring match against any feature.
    #[serde(deserialize_with = "null_as_default")]
    pub features: Vec<String>,
    /// Whitespace separated keywords; each must appear, case-insensitively,
    /// in the name, rules text, features or trigger.
    #[serde(deserialize_with = "null_as_default")]
    pub free_words: String,
    #[serde(deserialize_with = "null_as_default")]
    pub series_ids: Vec<String>,
    /// Deck-building mode: leaders are excluded and the color cell must
    /// contain one of the leader's colors.
    #[serde(deserialize_with = "null_as_default")]
    pub leader_colors: Vec<String>,
    #[serde(deserialize_with = "null_as_default")]
    pub parallel_mode: ParallelMode,
}

// JSON clients send `null` for an unset facet.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

impl FilterOptions {
    /// Whether a single card passes every active facet.
    pub fn matches(&self, card: &Card) -> bool {
        card_matches(card, self, &keywords(&self.free_words))
    }
}

// ---------------------------------------------------------------------------
// Evaluation
// ---------------------------------------------------------------------------

/// Return the cards that pass all active facets, in their original order.
pub fn filter_cards<'a>(cards: &'a [Card], options: &FilterOptions) -> Vec<&'a Card> {
    let keywords = keywords(&options.free_words);
    cards
        .iter()
        .filter(|card| card_matches(card, options, &keywords))
        .collect()
}

fn keywords(free_words: &str) -> Vec<String> {
    free_words.split_whitespace().map(str::to_lowercase).collect()
}

fn card_matches(card: &Card, opt: &FilterOptions, keywords: &[String]) -> bool {
    match opt.parallel_mode {
        ParallelMode::Normal if card.is_parallel => return false,
        ParallelMode::Parallel if !card.is_parallel => return false,
        _ => {}
    }

    if !opt.leader_colors.is_empty()
        && (card.is_leader() || !contains_any(&card.color, &opt.leader_colors))
    {
        return false;
    }

    if !opt.colors.is_empty() && !contains_any(&card.color, &opt.colors) {
        return false;
    }

    if !opt.types.is_empty() && !opt.types.contains(&card.card_type) {
        return false;
    }

    if !opt.costs.is_empty() && !opt.costs.contains(&i64::from(card.cost)) {
        return false;
    }

    if !opt.counters.is_empty() && !opt.counters.contains(&card.counter) {
        return false;
    }

    if !opt.attributes.is_empty()
        && !card.attributes.iter().any(|a| contains_any(a, &opt.attributes))
    {
        return false;
    }

    if !opt.blocks.is_empty() && !opt.blocks.contains(&card.block_icon) {
        return false;
    }

    if !opt.features.is_empty() && !card.features.iter().any(|f| contains_any(f, &opt.features)) {
        return false;
    }

    if !opt.series_ids.is_empty() && !opt.series_ids.contains(&card.series_id) {
        return false;
    }

    if !keywords.is_empty() {
        let haystacks = [
            card.name.to_lowercase(),
            card.text.to_lowercase(),
            card.features.join(" ").to_lowercase(),
            card.trigger.to_lowercase(),
        ];
        // every keyword must hit at least one field
        if !keywords.iter().all(|k| haystacks.iter().any(|h| h.contains(k.as_str()))) {
            return false;
        }
    }

    true
}

/// Unanchored substring match against any of the needles.
fn contains_any(haystack: &str, needles: &[String]) -> bool {
    needles.iter().any(|n| haystack.contains(n.as_str()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn card(id: &str, color: &str, card_type: &str) -> Card {
        Card {
            card_id: id.to_string(),
            color: color.to_string(),
            card_type: card_type.to_string(),
            series_id: "OP-01".to_string(),
            ..Card::default()
        }
    }

    #[test]
    fn parallel_mode_deserializes_empty_as_both() {
        let opts: FilterOptions = serde_json::from_str(r#"{"parallel_mode": ""}"#).unwrap();
        assert_eq!(opts.parallel_mode, ParallelMode::Both);

        let opts: FilterOptions = serde_json::from_str("{}").unwrap();
        assert_eq!(opts, FilterOptions::default());
    }

    #[test]
    fn null_facets_are_inactive() {
        let json = r#"{
            "colors": null, "types": null, "costs": null, "counters": null,
            "attributes": null, "blocks": null, "features": null,
            "free_words": null, "series_ids": null, "leader_colors": null,
            "parallel_mode": null
        }"#;
        let opts: FilterOptions = serde_json::from_str(json).unwrap();
        assert_eq!(opts, FilterOptions::default());
    }

    #[test]
    fn negative_cost_matches_nothing() {
        let opts: FilterOptions = serde_json::from_str(r#"{"costs": [-1]}"#).unwrap();
        assert_eq!(opts.costs, vec![-1]);
        assert!(!opts.matches(&card("OP01-001", "赤", "LEADER")));
    }

    #[test]
    fn unknown_parallel_mode_is_rejected() {
        let result = serde_json::from_str::<FilterOptions>(r#"{"parallel_mode": "nromal"}"#);
        assert!(result.is_err());
    }

    #[test]
    fn leader_colors_match_multicolor_cards() {
        let opts = FilterOptions {
            leader_colors: vec!["緑".to_string()],
            ..FilterOptions::default()
        };
        assert!(opts.matches(&card("OP01-013", "赤/緑", "CHARACTER")));
        assert!(!opts.matches(&card("OP01-001", "赤/緑", "LEADER")));
        assert!(!opts.matches(&card("OP01-060", "青", "EVENT")));
    }

    #[test]
    fn whitespace_free_words_are_inactive() {
        let opts = FilterOptions {
            free_words: "  \t ".to_string(),
            ..FilterOptions::default()
        };
        assert!(opts.matches(&card("OP01-001", "赤", "LEADER")));
    }

    #[test]
    fn free_words_are_case_insensitive() {
        let mut c = card("ST01-012", "赤", "CHARACTER");
        c.name = "Monkey.D.Luffy".to_string();
        let opts = FilterOptions {
            free_words: "LUFFY".to_string(),
            ..FilterOptions::default()
        };
        assert!(opts.matches(&c));
    }
}
