//! Built-in demo dataset, used when no data files are present on disk.

use crate::data::champion::Champion;
use crate::data::combo::Combo;
use crate::data::loader::{parse_champions_json, parse_combos_json};
use crate::error::Result;

const SEED_CHAMPIONS: &str = include_str!("../../data/seed/champions.json");
const SEED_COMBOS: &str = include_str!("../../data/seed/combos.json");

pub fn seed_champions() -> Result<Vec<Champion>> {
    parse_champions_json(SEED_CHAMPIONS, "<seed>/champions.json").map(|(champions, _)| champions)
}

pub fn seed_combos() -> Result<Vec<Combo>> {
    parse_combos_json(SEED_COMBOS, "<seed>/combos.json").map(|(combos, _)| combos)
}
