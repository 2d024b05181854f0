use std::fmt;

use serde::{Deserialize, Serialize};

use crate::aggregate::{PipelineOutput, Statistics};
use crate::analysis::{analyze_combo, sequence_similarity, ComboAnalysis};
use crate::data::champion::Champion;
use crate::data::combo::{Combo, Difficulty};

#[derive(Debug, Clone, Deserialize)]
pub struct AnalyzeRequest {
    pub champion: Champion,
    pub combo: Combo,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalyzeResponse {
    pub status: &'static str,
    pub combo_id: String,
    pub sequence: String,
    pub ranking_score: f64,
    pub analysis: ComboAnalysis,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SimilarityRequest {
    pub a: Vec<String>,
    pub b: Vec<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct SimilarityResponse {
    pub status: &'static str,
    pub similarity: f64,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ComboSummary {
    pub id: String,
    pub name: String,
    pub sequence: String,
    pub ranking_score: f64,
    pub difficulty: Option<Difficulty>,
    pub is_valid: Option<bool>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChampionListItem {
    pub id: String,
    pub name: String,
    pub title: String,
    pub roles: Vec<String>,
    pub combos: Vec<ComboSummary>,
}

#[derive(Debug)]
pub enum PayloadError {
    Parse(serde_json::Error),
    Validation(String),
}

impl fmt::Display for PayloadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Parse(err) => write!(f, "Invalid request body: {err}"),
            Self::Validation(msg) => write!(f, "{msg}"),
        }
    }
}

impl std::error::Error for PayloadError {}

pub fn health_payload() -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(&serde_json::json!({
        "status": "ok",
        "service": "combodex-api",
        "version": env!("CARGO_PKG_VERSION")
    }))
}

pub fn statistics_payload(statistics: &Statistics) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(statistics)
}

pub fn champions_payload(output: &PipelineOutput) -> Result<String, serde_json::Error> {
    let list: Vec<ChampionListItem> = output
        .champions
        .iter()
        .map(|champion| ChampionListItem {
            id: champion.id.clone(),
            name: champion.name.clone(),
            title: champion.title.clone(),
            roles: champion.roles.clone(),
            combos: champion
                .combos
                .iter()
                .map(|combo| ComboSummary {
                    id: combo.id.clone(),
                    name: combo.name.clone(),
                    sequence: combo.ability_sequence(),
                    ranking_score: combo.ranking_score(),
                    difficulty: combo.effectiveness.difficulty,
                    is_valid: combo.analysis.as_ref().map(|analysis| analysis.is_valid),
                })
                .collect(),
        })
        .collect();
    serde_json::to_string_pretty(&list)
}

/// Analyze one combo against the champion sent alongside it. Nothing is stored.
pub fn analyze_payload(body: &str) -> Result<String, PayloadError> {
    let request: AnalyzeRequest = serde_json::from_str(body).map_err(PayloadError::Parse)?;
    if request.combo.abilities.is_empty() {
        return Err(PayloadError::Validation(
            "combo.abilities must contain at least one step".to_string(),
        ));
    }

    let analysis = analyze_combo(&request.combo, &request.champion);
    tracing::debug!(
        combo = %request.combo.id,
        champion = %request.champion.id,
        valid = analysis.is_valid,
        "analyzed combo"
    );
    let response = AnalyzeResponse {
        status: "ok",
        combo_id: request.combo.id.clone(),
        sequence: request.combo.ability_sequence(),
        ranking_score: request.combo.ranking_score(),
        analysis,
    };
    serde_json::to_string_pretty(&response).map_err(PayloadError::Parse)
}

pub fn similarity_payload(body: &str) -> Result<String, PayloadError> {
    let request: SimilarityRequest = serde_json::from_str(body).map_err(PayloadError::Parse)?;
    let response = SimilarityResponse {
        status: "ok",
        similarity: sequence_similarity(&request.a.concat(), &request.b.concat()),
    };
    serde_json::to_string_pretty(&response).map_err(PayloadError::Parse)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::Value;

    #[test]
    fn similarity_payload_scores_concatenated_slots() {
        let body = r#"{"a":["Q","W","E"],"b":["Q","W","E","R"]}"#;
        let payload: Value =
            serde_json::from_str(&similarity_payload(body).expect("valid request")).expect("json");
        assert_eq!(payload["similarity"], 0.75);
    }

    #[test]
    fn analyze_payload_rejects_empty_sequence() {
        let body = r#"{"champion":{"id":"Ahri","name":"Ahri"},"combo":{"championId":"Ahri","abilities":[]}}"#;
        match analyze_payload(body) {
            Err(PayloadError::Validation(msg)) => assert!(msg.contains("abilities")),
            other => panic!("expected validation error, got {other:?}"),
        }
    }

    #[test]
    fn analyze_payload_reports_parse_errors() {
        assert!(matches!(analyze_payload("{not json"), Err(PayloadError::Parse(_))));
    }
}
