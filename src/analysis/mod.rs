pub mod analyzer;
pub mod damage;
pub mod dedup;
pub mod similarity;
pub mod variations;

pub use analyzer::{
    analyze_combo, analyze_context, attach_analysis, validate_combo_logic, validate_timing,
    viability_difficulty_score, viability_score, ComboAnalysis, ComboContext, LogicValidation,
    TimingValidation, MAX_STEP_TIMING_MS,
};
pub use damage::{
    ability_base_damage, ability_power_coefficient, apply_resistances, calculate_damage,
    calculate_damage_with, DamageBaseline, DamageBreakdown, DamageCalculation, MID_GAME_BASELINE,
};
pub use dedup::deduplicate_combos;
pub use similarity::{
    combo_similarity, find_similar_pairs, levenshtein, sequence_similarity, SimilarPair,
};
pub use variations::suggest_variations;
