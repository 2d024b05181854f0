use serde::Serialize;

use crate::data::champion::Champion;
use crate::data::combo::{Combo, Difficulty};

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RankedCombo {
    pub rank: usize,
    pub champion_id: String,
    pub combo_id: String,
    pub name: String,
    pub sequence: String,
    pub ranking_score: f64,
    pub viability_score: Option<f64>,
    pub difficulty: Option<Difficulty>,
    pub is_valid: Option<bool>,
}

/// Sort descending by [Combo::ranking_score]; equal scores keep their input order.
pub fn rank_combos(combos: &mut [Combo]) {
    combos.sort_by(|left, right| right.ranking_score().total_cmp(&left.ranking_score()));
}

/// Every combo of every champion, best first, with 1-based ranks.
pub fn rank_across_champions(champions: &[Champion]) -> Vec<RankedCombo> {
    let mut all: Vec<&Combo> = champions
        .iter()
        .flat_map(|champion| champion.combos.iter())
        .collect();
    all.sort_by(|left, right| right.ranking_score().total_cmp(&left.ranking_score()));

    all.into_iter()
        .enumerate()
        .map(|(index, combo)| RankedCombo {
            rank: index + 1,
            champion_id: combo.champion_id.clone(),
            combo_id: combo.id.clone(),
            name: combo.name.clone(),
            sequence: combo.ability_sequence(),
            ranking_score: combo.ranking_score(),
            viability_score: combo.analysis.as_ref().map(|a| a.viability_score),
            difficulty: combo.effectiveness.difficulty,
            is_valid: combo.analysis.as_ref().map(|a| a.is_valid),
        })
        .collect()
}
