//! Champion records: identity, base stats and the slot-keyed ability set.
//!
//! Abilities are stored under lowercase slot keys (`p`, `q`, `w`, `e`, `r`);
//! [Champion::has_ability] and [Champion::get_ability] match slots case-insensitively.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::data::combo::Combo;

pub const DEFAULT_MOVEMENT_SPEED: f64 = 330.0;
pub const DEFAULT_RESOURCE_TYPE: &str = "Mana";
const SPLASH_URL_BASE: &str = "https://ddragon.leagueoflegends.com/cdn/img/champion/splash";
const SPELL_SLOTS: [&str; 4] = ["q", "w", "e", "r"];

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Ability {
    pub key: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub cooldowns: Vec<f64>,
    #[serde(default)]
    pub costs: Vec<f64>,
    #[serde(default)]
    pub range: f64,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct BaseStats {
    pub health: f64,
    pub mana: f64,
    pub armor: f64,
    pub spell_resist: f64,
    pub attack_damage: f64,
    pub attack_speed: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Champion {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default = "default_resource_type")]
    pub resource_type: String,
    #[serde(default)]
    pub attack_range: f64,
    #[serde(default = "default_movement_speed")]
    pub movement_speed: f64,
    #[serde(default)]
    pub abilities: BTreeMap<String, Ability>,
    #[serde(default)]
    pub base_stats: BaseStats,
    #[serde(default)]
    pub roles: Vec<String>,
    /// Ranked combos; empty until the pipeline assigns them.
    #[serde(default)]
    pub combos: Vec<Combo>,
    #[serde(default)]
    pub image_url: String,
}

fn default_resource_type() -> String {
    DEFAULT_RESOURCE_TYPE.to_string()
}

fn default_movement_speed() -> f64 {
    DEFAULT_MOVEMENT_SPEED
}

impl Champion {
    pub fn has_ability(&self, slot: &str) -> bool {
        self.abilities.contains_key(&slot.to_lowercase())
    }

    pub fn get_ability(&self, slot: &str) -> Option<&Ability> {
        self.abilities.get(&slot.to_lowercase())
    }

    /// Build a champion from a Data Dragon champion object.
    ///
    /// The passive becomes slot `p` and the first four spells become `q`, `w`, `e`, `r`.
    /// Missing numeric stats default to zero (movement speed to 330).
    pub fn from_ddragon(raw: &Value) -> Option<Self> {
        let id = raw.get("id").and_then(Value::as_str)?.to_string();
        let name = raw
            .get("name")
            .and_then(Value::as_str)
            .unwrap_or(id.as_str())
            .to_string();
        let stats = raw.get("stats");
        let stat = |field: &str| {
            stats
                .and_then(|s| s.get(field))
                .and_then(Value::as_f64)
                .unwrap_or(0.0)
        };

        let mut abilities = BTreeMap::new();
        let passive = raw.get("passive");
        abilities.insert(
            "p".to_string(),
            Ability {
                key: "P".to_string(),
                name: passive
                    .and_then(|p| p.get("name"))
                    .and_then(Value::as_str)
                    .unwrap_or("Passive")
                    .to_string(),
                description: passive
                    .and_then(|p| p.get("description"))
                    .and_then(Value::as_str)
                    .unwrap_or_default()
                    .to_string(),
                cooldowns: Vec::new(),
                costs: Vec::new(),
                range: 0.0,
            },
        );

        let spells = raw.get("spells").and_then(Value::as_array);
        for (slot, spell) in SPELL_SLOTS.iter().zip(spells.into_iter().flatten()) {
            abilities.insert(
                slot.to_string(),
                Ability {
                    key: slot.to_uppercase(),
                    name: spell
                        .get("name")
                        .and_then(Value::as_str)
                        .unwrap_or_default()
                        .to_string(),
                    description: spell
                        .get("description")
                        .and_then(Value::as_str)
                        .unwrap_or_default()
                        .to_string(),
                    cooldowns: number_list(spell.get("cooldown")),
                    costs: number_list(spell.get("cost")),
                    range: number_list(spell.get("range"))
                        .first()
                        .copied()
                        .unwrap_or(0.0),
                },
            );
        }

        let movement_speed = stats
            .and_then(|s| s.get("movespeed"))
            .and_then(Value::as_f64)
            .filter(|speed| *speed > 0.0)
            .unwrap_or(DEFAULT_MOVEMENT_SPEED);

        Some(Self {
            image_url: format!("{SPLASH_URL_BASE}/{id}_0.jpg"),
            title: raw
                .get("title")
                .and_then(Value::as_str)
                .unwrap_or_default()
                .to_string(),
            description: raw
                .get("blurb")
                .and_then(Value::as_str)
                .unwrap_or_default()
                .to_string(),
            resource_type: raw
                .get("partype")
                .and_then(Value::as_str)
                .unwrap_or(DEFAULT_RESOURCE_TYPE)
                .to_string(),
            attack_range: stat("attackrange"),
            movement_speed,
            abilities,
            base_stats: BaseStats {
                health: stat("hp"),
                mana: stat("mp"),
                armor: stat("armor"),
                spell_resist: stat("spellblock"),
                attack_damage: stat("attackdamage"),
                attack_speed: stat("attackspeed"),
            },
            roles: raw
                .get("tags")
                .and_then(Value::as_array)
                .map(|tags| {
                    tags.iter()
                        .filter_map(Value::as_str)
                        .map(str::to_string)
                        .collect()
                })
                .unwrap_or_default(),
            combos: Vec::new(),
            id,
            name,
        })
    }
}

fn number_list(value: Option<&Value>) -> Vec<f64> {
    value
        .and_then(Value::as_array)
        .map(|items| items.iter().filter_map(Value::as_f64).collect())
        .unwrap_or_default()
}
