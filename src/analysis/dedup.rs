//! Exact-sequence deduplication of combos.
//!
//! Combos sharing a [Combo::dedup_key] collapse into the first occurrence. The
//! survivor gains the duplicates' sources and the highest reliability seen;
//! every other field of the survivor is left as it was.

use std::collections::HashMap;

use crate::data::combo::Combo;

pub fn deduplicate_combos(combos: Vec<Combo>) -> Vec<Combo> {
    let mut index_by_key: HashMap<String, usize> = HashMap::with_capacity(combos.len());
    let mut kept: Vec<Combo> = Vec::with_capacity(combos.len());

    for combo in combos {
        let key = combo.dedup_key();
        match index_by_key.get(&key) {
            Some(&position) => {
                let existing = &mut kept[position];
                tracing::debug!(
                    key = %key,
                    kept = %existing.id,
                    dropped = %combo.id,
                    "merging duplicate combo"
                );
                merge_duplicate(existing, combo);
            }
            None => {
                index_by_key.insert(key, kept.len());
                kept.push(combo);
            }
        }
    }

    kept
}

fn merge_duplicate(existing: &mut Combo, duplicate: Combo) {
    existing.sources.extend(duplicate.sources);
    if duplicate.effectiveness.reliability > existing.effectiveness.reliability {
        existing.effectiveness.reliability = duplicate.effectiveness.reliability;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn combo(id: &str, champion: &str, slots: &[&str], reliability: f64, source_url: &str) -> Combo {
        serde_json::from_value(json!({
            "id": id,
            "championId": champion,
            "name": id,
            "description": format!("{id} description"),
            "abilities": slots.iter().map(|k| json!({ "key": k })).collect::<Vec<_>>(),
            "effectiveness": { "reliability": reliability, "damageOutput": 400 },
            "sources": [{ "type": "guide", "url": source_url }],
            "tags": [id],
        }))
        .expect("combo parses")
    }

    #[test]
    fn merges_sources_and_keeps_highest_reliability() {
        let a = combo("a", "Ahri", &["E", "Q", "R"], 0.7, "s1");
        let b = combo("b", "Ahri", &["E", "Q", "R"], 0.9, "s2");

        let deduped = deduplicate_combos(vec![a, b]);
        assert_eq!(deduped.len(), 1);
        let kept = &deduped[0];
        assert_eq!(kept.id, "a");
        assert_eq!(kept.effectiveness.reliability, 0.9);
        let urls: Vec<&str> = kept.sources.iter().map(|s| s.url.as_str()).collect();
        assert_eq!(urls, vec!["s1", "s2"]);
        assert_eq!(kept.tags, vec!["a"]);
        assert_eq!(kept.description, "a description");
    }

    #[test]
    fn lower_reliability_duplicate_does_not_lower_survivor() {
        let a = combo("a", "Ahri", &["Q", "W"], 0.8, "s1");
        let b = combo("b", "Ahri", &["Q", "W"], 0.3, "s2");
        let deduped = deduplicate_combos(vec![a, b]);
        assert_eq!(deduped[0].effectiveness.reliability, 0.8);
        assert_eq!(deduped[0].sources.len(), 2);
    }

    #[test]
    fn keys_are_champion_scoped_ordered_and_case_sensitive() {
        let deduped = deduplicate_combos(vec![
            combo("a", "Ahri", &["Q", "W"], 0.5, "s1"),
            combo("b", "Nidalee", &["Q", "W"], 0.5, "s2"),
            combo("c", "Ahri", &["W", "Q"], 0.5, "s3"),
            combo("d", "Ahri", &["q", "w"], 0.5, "s4"),
            combo("e", "Ahri", &["Q", "W"], 0.5, "s5"),
        ]);
        let ids: Vec<&str> = deduped.iter().map(|c| c.id.as_str()).collect();
        assert_eq!(ids, vec!["a", "b", "c", "d"]);
    }

    #[test]
    fn empty_input_yields_empty_output() {
        assert!(deduplicate_combos(Vec::new()).is_empty());
    }
}
