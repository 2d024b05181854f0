//! Corpus-wide statistics over processed champions.
//!
//! Averages are zero whenever their denominator is zero.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::data::champion::Champion;
use crate::data::combo::{Combo, Difficulty};

pub const DEFAULT_TOP_COMBOS: usize = 10;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DifficultyHistogram {
    pub easy: usize,
    pub medium: usize,
    pub hard: usize,
    pub extreme: usize,
}

impl DifficultyHistogram {
    fn record(&mut self, difficulty: Difficulty) {
        match difficulty {
            Difficulty::Easy => self.easy += 1,
            Difficulty::Medium => self.medium += 1,
            Difficulty::Hard => self.hard += 1,
            Difficulty::Extreme => self.extreme += 1,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TopCombo {
    pub name: String,
    pub champion: String,
    /// Ranking score formatted with three decimals.
    pub score: String,
    pub difficulty: Option<Difficulty>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Statistics {
    pub total_champions: usize,
    pub total_combos: usize,
    pub average_combos_per_champion: f64,
    pub champions_with_combos: usize,
    pub average_combo_score: f64,
    pub combos_by_difficulty: DifficultyHistogram,
    pub combos_by_tag: BTreeMap<String, usize>,
    pub top_combos: Vec<TopCombo>,
}

pub fn compute_statistics(champions: &[Champion]) -> Statistics {
    compute_statistics_with(champions, DEFAULT_TOP_COMBOS)
}

pub fn compute_statistics_with(champions: &[Champion], top_n: usize) -> Statistics {
    let mut total_combos = 0;
    let mut champions_with_combos = 0;
    let mut total_score = 0.0;
    let mut combos_by_difficulty = DifficultyHistogram::default();
    let mut combos_by_tag: BTreeMap<String, usize> = BTreeMap::new();
    let mut all: Vec<(&Combo, f64)> = Vec::new();

    for champion in champions.iter().filter(|c| !c.combos.is_empty()) {
        champions_with_combos += 1;
        total_combos += champion.combos.len();

        for combo in &champion.combos {
            let score = combo.ranking_score();
            total_score += score;
            all.push((combo, score));

            if let Some(difficulty) = combo.effectiveness.difficulty {
                combos_by_difficulty.record(difficulty);
            }
            for tag in &combo.tags {
                *combos_by_tag.entry(tag.clone()).or_insert(0) += 1;
            }
        }
    }

    let average_combos_per_champion = if champions_with_combos > 0 {
        round_to(total_combos as f64 / champions_with_combos as f64, 2)
    } else {
        0.0
    };
    let average_combo_score = if total_combos > 0 {
        round_to(total_score / total_combos as f64, 3)
    } else {
        0.0
    };

    all.sort_by(|left, right| right.1.total_cmp(&left.1));
    let top_combos = all
        .into_iter()
        .take(top_n)
        .map(|(combo, score)| TopCombo {
            name: combo.name.clone(),
            champion: combo.champion_id.clone(),
            score: format!("{score:.3}"),
            difficulty: combo.effectiveness.difficulty,
        })
        .collect();

    Statistics {
        total_champions: champions.len(),
        total_combos,
        average_combos_per_champion,
        champions_with_combos,
        average_combo_score,
        combos_by_difficulty,
        combos_by_tag,
        top_combos,
    }
}

fn round_to(value: f64, decimals: i32) -> f64 {
    let factor = 10f64.powi(decimals);
    (value * factor).round() / factor
}
