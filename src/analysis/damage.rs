//! Theoretical combo damage at a fixed mid-game baseline.
//!
//! Per step: `base(slot, level) + ability_power * coefficient(slot)`, then reduced by
//! `100 / (100 + resistance)` against the baseline spell resist, whatever the combo's
//! declared damage type. Steps whose slot the champion does not expose are skipped
//! here; logic validation reports them.

use serde::{Deserialize, Serialize};

use crate::data::champion::Champion;
use crate::data::combo::{Combo, DamageType};

/// Base damage used for slots without a table (including the passive).
pub const UNKNOWN_SLOT_BASE_DAMAGE: f64 = 50.0;
pub const MAX_TABLE_LEVEL: usize = 18;

const Q_BASE: [f64; MAX_TABLE_LEVEL] = [
    50.0, 65.0, 80.0, 95.0, 110.0, 125.0, 140.0, 155.0, 170.0, 185.0, 200.0, 215.0, 230.0, 245.0,
    260.0, 275.0, 290.0, 305.0,
];
const W_BASE: [f64; MAX_TABLE_LEVEL] = [
    40.0, 55.0, 70.0, 85.0, 100.0, 115.0, 130.0, 145.0, 160.0, 175.0, 190.0, 205.0, 220.0, 235.0,
    250.0, 265.0, 280.0, 295.0,
];
const E_BASE: [f64; MAX_TABLE_LEVEL] = [
    30.0, 45.0, 60.0, 75.0, 90.0, 105.0, 120.0, 135.0, 150.0, 165.0, 180.0, 195.0, 210.0, 225.0,
    240.0, 255.0, 270.0, 285.0,
];
const R_BASE: [f64; MAX_TABLE_LEVEL] = [
    100.0, 150.0, 200.0, 250.0, 300.0, 350.0, 400.0, 450.0, 500.0, 550.0, 600.0, 650.0, 700.0,
    750.0, 800.0, 850.0, 900.0, 950.0,
];

/// Assumed game state the damage estimate is computed against.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DamageBaseline {
    pub level: u32,
    pub ability_power: f64,
    pub attack_damage: f64,
    pub enemy_armor: f64,
    pub enemy_spell_resist: f64,
}

pub const MID_GAME_BASELINE: DamageBaseline = DamageBaseline {
    level: 9,
    ability_power: 150.0,
    attack_damage: 80.0,
    enemy_armor: 80.0,
    enemy_spell_resist: 60.0,
};

impl Default for DamageBaseline {
    fn default() -> Self {
        MID_GAME_BASELINE
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DamageBreakdown {
    pub ability: String,
    pub base_damage: f64,
    pub scaling_damage: f64,
    pub final_damage: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DamageCalculation {
    /// Sum of per-step final damage, rounded to the nearest integer.
    pub total_damage: i64,
    pub breakdown: Vec<DamageBreakdown>,
    pub stats: DamageBaseline,
}

/// Table value for `slot` at `level` (1-based, capped at 18).
pub fn ability_base_damage(slot: &str, level: u32) -> f64 {
    let table = match slot.to_uppercase().as_str() {
        "Q" => &Q_BASE,
        "W" => &W_BASE,
        "E" => &E_BASE,
        "R" => &R_BASE,
        _ => return UNKNOWN_SLOT_BASE_DAMAGE,
    };
    let index = (level.max(1) as usize - 1).min(MAX_TABLE_LEVEL - 1);
    table[index]
}

pub fn ability_power_coefficient(slot: &str) -> f64 {
    match slot.to_uppercase().as_str() {
        "Q" => 0.6,
        "W" => 0.5,
        "E" => 0.4,
        "R" => 0.8,
        _ => 0.0,
    }
}

pub fn apply_resistances(damage: f64, damage_type: DamageType, armor: f64, spell_resist: f64) -> f64 {
    let resistance = match damage_type {
        DamageType::True => return damage,
        DamageType::Physical => armor,
        DamageType::Magic => spell_resist,
    };
    damage * (100.0 / (100.0 + resistance))
}

pub fn calculate_damage(combo: &Combo, champion: &Champion) -> DamageCalculation {
    calculate_damage_with(combo, champion, MID_GAME_BASELINE)
}

pub fn calculate_damage_with(
    combo: &Combo,
    champion: &Champion,
    baseline: DamageBaseline,
) -> DamageCalculation {
    let mut breakdown = Vec::with_capacity(combo.abilities.len());
    let mut total = 0.0;

    for step in &combo.abilities {
        let Some(ability) = champion.get_ability(&step.key) else {
            continue;
        };
        let base_damage = ability_base_damage(&step.key, baseline.level);
        let scaling_damage = baseline.ability_power * ability_power_coefficient(&step.key);
        let final_damage = apply_resistances(
            base_damage + scaling_damage,
            DamageType::Magic,
            baseline.enemy_armor,
            baseline.enemy_spell_resist,
        );
        total += final_damage;
        breakdown.push(DamageBreakdown {
            ability: ability.name.clone(),
            base_damage,
            scaling_damage,
            final_damage,
        });
    }

    DamageCalculation {
        total_damage: total.round() as i64,
        breakdown,
        stats: baseline,
    }
}
