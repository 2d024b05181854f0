//! Per-combo analysis: logic validation, damage estimate, timing validation,
//! context flags and the viability score.
//!
//! [analyze_combo] is pure. [attach_analysis] stores the result on the combo,
//! replacing whatever a previous run left there.

use serde::{Deserialize, Serialize};

use crate::analysis::damage::{calculate_damage, DamageCalculation};
use crate::data::champion::Champion;
use crate::data::combo::{Combo, Difficulty};

/// Longest allowed offset for a single step.
pub const MAX_STEP_TIMING_MS: i64 = 5000;
pub const EARLY_GAME_MAX_EXECUTION_MS: i64 = 1000;
pub const MID_GAME_MAX_EXECUTION_MS: i64 = 2000;
pub const LATE_GAME_MIN_DAMAGE: f64 = 500.0;
pub const LANING_MAX_MIN_LEVEL: u32 = 3;
pub const TEAMFIGHT_TAG: &str = "teamfight";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LogicValidation {
    pub is_valid: bool,
    pub issues: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimingValidation {
    pub is_valid: bool,
    pub issues: Vec<String>,
    pub total_execution_time: i64,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComboContext {
    pub earlygame_viable: bool,
    pub midgame_viable: bool,
    pub lategame_viable: bool,
    pub teamfight_viable: bool,
    pub laning_viable: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComboAnalysis {
    /// Logic validity only; timing problems live in `timing_validation`.
    pub is_valid: bool,
    pub issues: Vec<String>,
    pub warnings: Vec<String>,
    pub damage_calculation: DamageCalculation,
    pub timing_validation: TimingValidation,
    pub viability_score: f64,
    pub context: ComboContext,
}

/// Every step must name a slot the champion has, and no slot may repeat back to back.
///
/// `Q,Q,R` style double casts are rejected by the second rule.
pub fn validate_combo_logic(combo: &Combo, champion: &Champion) -> LogicValidation {
    let mut issues = Vec::new();

    for (index, step) in combo.abilities.iter().enumerate() {
        if !champion.has_ability(&step.key) {
            issues.push(format!(
                "Unknown ability slot '{}' at step {} for {}",
                step.key, index, champion.name
            ));
        }
    }

    for (index, pair) in combo.abilities.windows(2).enumerate() {
        if pair[0].key == pair[1].key {
            issues.push(format!(
                "Ability slot '{}' repeated at steps {} and {}",
                pair[1].key,
                index,
                index + 1
            ));
        }
    }

    LogicValidation {
        is_valid: issues.is_empty(),
        issues,
    }
}

pub fn validate_timing(combo: &Combo) -> TimingValidation {
    let mut issues = Vec::new();
    let mut total = 0;

    for step in &combo.abilities {
        total += step.timing_ms;
        if step.timing_ms < 0 {
            issues.push(format!("Invalid timing for {}: negative value", step.name));
        }
        if step.timing_ms > MAX_STEP_TIMING_MS {
            issues.push(format!(
                "Timing too long for {}: {}ms",
                step.name, step.timing_ms
            ));
        }
    }

    TimingValidation {
        is_valid: issues.is_empty(),
        issues,
        total_execution_time: total,
    }
}

pub fn analyze_context(combo: &Combo) -> ComboContext {
    let execution_time = combo.total_execution_time();
    ComboContext {
        earlygame_viable: execution_time < EARLY_GAME_MAX_EXECUTION_MS,
        midgame_viable: execution_time < MID_GAME_MAX_EXECUTION_MS,
        lategame_viable: combo.effectiveness.damage_output > LATE_GAME_MIN_DAMAGE,
        teamfight_viable: combo.has_tag(TEAMFIGHT_TAG),
        laning_viable: combo
            .conditions
            .min_level
            .is_some_and(|level| level <= LANING_MAX_MIN_LEVEL),
    }
}

/// Difficulty weight for viability; easier combos score higher.
pub fn viability_difficulty_score(difficulty: Option<Difficulty>) -> f64 {
    match difficulty {
        Some(Difficulty::Easy) => 1.0,
        Some(Difficulty::Medium) => 0.8,
        Some(Difficulty::Hard) => 0.6,
        Some(Difficulty::Extreme) => 0.4,
        None => 0.5,
    }
}

/// `timing*0.4 + damage*0.3 + difficulty*0.2 + reliability*0.1`, clamped to [0, 1].
pub fn viability_score(combo: &Combo, timing_valid: bool, total_damage: i64) -> f64 {
    let timing_score = if timing_valid { 1.0 } else { 0.5 };
    let mut score = 1.0;
    score *= timing_score * 0.4;

    let damage_score = (total_damage as f64 / 1000.0).min(1.0);
    score += damage_score * 0.3;

    score += viability_difficulty_score(combo.effectiveness.difficulty) * 0.2;
    score += combo.effectiveness.reliability * 0.1;

    score.clamp(0.0, 1.0)
}

pub fn analyze_combo(combo: &Combo, champion: &Champion) -> ComboAnalysis {
    tracing::debug!(combo = %combo.name, champion = %champion.name, "analyzing combo");

    let damage_calculation = calculate_damage(combo, champion);
    let timing_validation = validate_timing(combo);
    let context = analyze_context(combo);
    let logic = validate_combo_logic(combo, champion);

    let warnings = combo
        .abilities
        .iter()
        .enumerate()
        .filter(|(_, step)| !champion.has_ability(&step.key))
        .map(|(index, step)| {
            format!(
                "Step {} ('{}') contributes no damage: slot not found",
                index, step.key
            )
        })
        .collect();

    let score = viability_score(
        combo,
        timing_validation.is_valid,
        damage_calculation.total_damage,
    );

    ComboAnalysis {
        is_valid: logic.is_valid,
        issues: logic.issues,
        warnings,
        damage_calculation,
        timing_validation,
        viability_score: score,
        context,
    }
}

/// Analyze and store the result on `combo`, overwriting any earlier analysis.
pub fn attach_analysis<'a>(combo: &'a mut Combo, champion: &Champion) -> &'a ComboAnalysis {
    let analysis = analyze_combo(combo, champion);
    combo.analysis.insert(analysis)
}
