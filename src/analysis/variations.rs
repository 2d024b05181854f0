//! Suggested variations derived from a combo's own sequence.
//!
//! Suggestions are returned to the caller; the combo's `variations` list is not touched.

use crate::data::combo::{Combo, Variation};

pub const ULTIMATE_SLOT: &str = "R";
const QUICK_VARIATION_STEPS: usize = 2;

pub fn suggest_variations(combo: &Combo) -> Vec<Variation> {
    let mut variations = Vec::new();

    if combo.slots().any(|slot| slot == ULTIMATE_SLOT) {
        let without_ultimate: Vec<String> = combo
            .slots()
            .filter(|slot| *slot != ULTIMATE_SLOT)
            .map(str::to_string)
            .collect();
        if !without_ultimate.is_empty() {
            variations.push(Variation {
                name: format!("{} (Early Game)", combo.name),
                description: "Without ultimate for early laning".to_string(),
                context: "early_game".to_string(),
                abilities: without_ultimate,
            });
        }
    }

    if combo.abilities.len() > QUICK_VARIATION_STEPS {
        variations.push(Variation {
            name: format!("{} (Quick)", combo.name),
            description: "Short burst opener".to_string(),
            context: "laning".to_string(),
            abilities: combo
                .slots()
                .take(QUICK_VARIATION_STEPS)
                .map(str::to_string)
                .collect(),
        });
    }

    variations
}
