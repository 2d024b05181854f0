//! Write processed records to disk: JSON interchange files and a CSV ranking table.

use std::fs;
use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::aggregate::{PipelineOutput, RankedCombo};
use crate::data::combo::Combo;
use crate::error::{DataError, Result};

pub const CHAMPIONS_FILE: &str = "champions.json";
pub const COMBOS_FILE: &str = "combos.json";
pub const STATISTICS_FILE: &str = "statistics.json";
pub const REPORT_FILE: &str = "report.json";

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportReport {
    pub generated_at: String,
    pub champions: usize,
    pub combos: usize,
    pub orphans: usize,
    pub files: Vec<PathBuf>,
}

#[derive(Debug, Serialize)]
struct RankingRow<'a> {
    rank: usize,
    champion: &'a str,
    combo_id: &'a str,
    combo: &'a str,
    sequence: &'a str,
    ranking_score: String,
    viability_score: Option<String>,
    difficulty: &'static str,
    valid: Option<bool>,
}

/// Write `champions.json`, `combos.json`, `statistics.json` and `report.json` under `dir`.
pub fn write_processed(dir: &Path, output: &PipelineOutput) -> Result<ExportReport> {
    fs::create_dir_all(dir).map_err(|source| DataError::Write {
        path: dir.to_path_buf(),
        source,
    })?;

    let combos: Vec<&Combo> = output
        .champions
        .iter()
        .flat_map(|champion| champion.combos.iter())
        .collect();

    let mut files = vec![
        write_json(&dir.join(CHAMPIONS_FILE), &output.champions)?,
        write_json(&dir.join(COMBOS_FILE), &combos)?,
        write_json(&dir.join(STATISTICS_FILE), &output.statistics)?,
    ];

    let mut report = ExportReport {
        generated_at: chrono::Utc::now().to_rfc3339(),
        champions: output.champions.len(),
        combos: combos.len(),
        orphans: output.orphans.len(),
        files: files.clone(),
    };
    let report_path = dir.join(REPORT_FILE);
    files.push(report_path.clone());
    report.files = files;
    write_json(&report_path, &report)?;

    tracing::info!(dir = %dir.display(), files = report.files.len(), "processed data written");
    Ok(report)
}

pub fn write_rankings_csv(path: &Path, ranked: &[RankedCombo]) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|source| DataError::Write {
            path: parent.to_path_buf(),
            source,
        })?;
    }

    let mut writer = csv::Writer::from_path(path)?;
    for entry in ranked {
        writer.serialize(RankingRow {
            rank: entry.rank,
            champion: &entry.champion_id,
            combo_id: &entry.combo_id,
            combo: &entry.name,
            sequence: &entry.sequence,
            ranking_score: format!("{:.3}", entry.ranking_score),
            viability_score: entry.viability_score.map(|score| format!("{score:.3}")),
            difficulty: entry.difficulty.map_or("", |d| d.as_str()),
            valid: entry.is_valid,
        })?;
    }
    writer.flush().map_err(|source| DataError::Write {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(())
}

fn write_json<T: Serialize + ?Sized>(path: &Path, value: &T) -> Result<PathBuf> {
    let payload = serde_json::to_string_pretty(value)?;
    fs::write(path, payload).map_err(|source| DataError::Write {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(path.to_path_buf())
}
