pub mod champion;
pub mod combo;
pub mod loader;
pub mod seed;
pub mod validate;

pub use champion::{Ability, BaseStats, Champion};
pub use combo::{
    AbilityStep, Combo, ComboSource, Conditions, DamageType, Difficulty, Effectiveness,
    EnemyPositioning, SourceType, Variation,
};
pub use loader::{
    load_champions, load_combos, load_dataset, Dataset, DEFAULT_CHAMPIONS_PATH,
    DEFAULT_COMBOS_PATH,
};
pub use validate::{
    prepare_champions, prepare_combos, sanitize_combos, validate_champions, validate_combos, ValidationReport,
    ValidationSeverity,
};
