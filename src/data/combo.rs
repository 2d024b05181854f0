//! Combo records as supplied by combo repositories.
//!
//! Field names serialize in camelCase so records round-trip with the JSON
//! interchange files in `data/`.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::analysis::ComboAnalysis;

/// Separator used when rendering slot sequences ("E-Q-W-R").
pub const SEQUENCE_SEPARATOR: &str = "-";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
    Extreme,
}

impl Difficulty {
    pub const ALL: [Difficulty; 4] = [Self::Easy, Self::Medium, Self::Hard, Self::Extreme];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Easy => "easy",
            Self::Medium => "medium",
            Self::Hard => "hard",
            Self::Extreme => "extreme",
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DamageType {
    Physical,
    #[default]
    Magic,
    True,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EnemyPositioning {
    Isolated,
    #[default]
    Any,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SourceType {
    Guide,
    Video,
    Community,
    ProPlayer,
}

/// One ability use inside a combo. Steps execute in list order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AbilityStep {
    /// Empty when the record omits it; ingestion validation rejects such steps.
    #[serde(default)]
    pub key: String,
    #[serde(default)]
    pub name: String,
    /// Offset in milliseconds; may be negative in malformed records.
    #[serde(default)]
    pub timing_ms: i64,
    #[serde(default)]
    pub notes: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Conditions {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_level: Option<u32>,
    pub items_required: Vec<String>,
    pub enemy_positioning: EnemyPositioning,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Effectiveness {
    pub damage_output: f64,
    pub damage_type: DamageType,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub difficulty: Option<Difficulty>,
    pub reliability: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub execution_time: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cooldown_after: Option<u64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComboSource {
    #[serde(rename = "type")]
    pub source_type: SourceType,
    #[serde(default)]
    pub url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub channel_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub author_name: Option<String>,
    #[serde(default)]
    pub published_date: String,
    #[serde(default)]
    pub confidence_score: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub upvotes: Option<u32>,
}

impl ComboSource {
    /// Channel or author credited for the combo, whichever the source recorded.
    pub fn attribution(&self) -> Option<&str> {
        self.channel_name
            .as_deref()
            .or(self.author_name.as_deref())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Variation {
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub context: String,
    #[serde(default)]
    pub abilities: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Combo {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub champion_id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub abilities: Vec<AbilityStep>,
    #[serde(default)]
    pub conditions: Conditions,
    #[serde(default)]
    pub effectiveness: Effectiveness,
    #[serde(default)]
    pub sources: Vec<ComboSource>,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub variations: Vec<Variation>,
    /// Latest analyzer output; replaced, never accumulated, on re-analysis.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub analysis: Option<ComboAnalysis>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<String>,
}

impl Combo {
    pub fn slots(&self) -> impl Iterator<Item = &str> + '_ {
        self.abilities.iter().map(|step| step.key.as_str())
    }

    /// Slot sequence joined with `-`, e.g. `E-Q-W-R`.
    pub fn ability_sequence(&self) -> String {
        self.slots().collect::<Vec<_>>().join(SEQUENCE_SEPARATOR)
    }

    /// Identity used for exact deduplication: `<championId>_<slot sequence>`.
    pub fn dedup_key(&self) -> String {
        format!("{}_{}", self.champion_id, self.ability_sequence())
    }

    /// Sum of every step's timing offset.
    pub fn total_execution_time(&self) -> i64 {
        self.abilities.iter().map(|step| step.timing_ms).sum()
    }

    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags.iter().any(|t| t == tag)
    }

    /// Difficulty weight for ranking; harder combos weigh more.
    pub fn difficulty_score(&self) -> f64 {
        match self.effectiveness.difficulty {
            Some(Difficulty::Easy) => 0.1,
            Some(Difficulty::Medium) => 0.3,
            Some(Difficulty::Hard) => 0.6,
            Some(Difficulty::Extreme) => 0.9,
            None => 0.5,
        }
    }

    /// Sort key for presenting combos. Independent of the analyzer's viability score.
    pub fn ranking_score(&self) -> f64 {
        let reliability = self.effectiveness.reliability;
        let damage_score = (self.effectiveness.damage_output / 1000.0).clamp(0.0, 1.0);
        let score =
            reliability * 0.4 + (1.0 - self.difficulty_score()) * 0.3 + damage_score * 0.3;
        score.clamp(0.0, 1.0)
    }
}
