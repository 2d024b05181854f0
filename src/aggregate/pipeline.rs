//! analyze → dedupe → rank, per champion, followed by corpus statistics.
//!
//! Each champion owns its combo list, so champions are processed in parallel
//! without shared state. Results are identical to a sequential run.

use std::collections::HashMap;
use std::path::Path;

use rayon::prelude::*;
use serde::Serialize;

use crate::aggregate::ranking::rank_combos;
use crate::aggregate::statistics::{compute_statistics_with, Statistics, DEFAULT_TOP_COMBOS};
use crate::analysis::{attach_analysis, deduplicate_combos};
use crate::data::champion::Champion;
use crate::data::combo::Combo;
use crate::data::loader::load_dataset;
use crate::data::validate::{
    prepare_champions, prepare_combos, ValidationReport, ValidationSeverity,
};
use crate::error::Result;
use crate::parallel::WorkerPool;

#[derive(Debug, Clone, Copy)]
pub struct PipelineOptions {
    pub pool: WorkerPool,
    pub top_combos: usize,
}

impl Default for PipelineOptions {
    fn default() -> Self {
        Self {
            pool: WorkerPool::default(),
            top_combos: DEFAULT_TOP_COMBOS,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PipelineOutput {
    pub champions: Vec<Champion>,
    /// Combos whose `championId` matched no champion.
    pub orphans: Vec<Combo>,
    pub statistics: Statistics,
}

/// Hand each combo to its champion, matching `championId` against the champion id
/// first and the display name second. Returns the combos nobody claimed.
///
/// Combos are appended to whatever the champion already carries, in input order.
pub fn assign_combos(champions: &mut [Champion], combos: Vec<Combo>) -> Vec<Combo> {
    let mut by_key: HashMap<&str, usize> = HashMap::with_capacity(champions.len() * 2);
    for (index, champion) in champions.iter().enumerate() {
        by_key.entry(champion.id.as_str()).or_insert(index);
    }
    for (index, champion) in champions.iter().enumerate() {
        by_key.entry(champion.name.as_str()).or_insert(index);
    }
    let lookup: HashMap<String, usize> = by_key
        .into_iter()
        .map(|(key, index)| (key.to_string(), index))
        .collect();

    let mut orphans = Vec::new();
    for combo in combos {
        match lookup.get(&combo.champion_id) {
            Some(&index) => champions[index].combos.push(combo),
            None => {
                tracing::warn!(
                    combo = %combo.id,
                    champion = %combo.champion_id,
                    "combo references unknown champion"
                );
                orphans.push(combo);
            }
        }
    }
    orphans
}

/// Analyze every combo of one champion, drop exact duplicates and sort by ranking score.
pub fn process_champion(champion: &mut Champion) {
    let raw = std::mem::take(&mut champion.combos);
    let raw_count = raw.len();

    let mut analyzed = raw;
    for combo in &mut analyzed {
        attach_analysis(combo, champion);
    }

    let mut combos = deduplicate_combos(analyzed);
    rank_combos(&mut combos);

    tracing::debug!(
        champion = %champion.id,
        raw = raw_count,
        kept = combos.len(),
        "processed champion"
    );
    champion.combos = combos;
}

pub fn process_champions(champions: &mut [Champion], pool: &WorkerPool) {
    pool.install(|| champions.par_iter_mut().for_each(process_champion));
}

/// Full run: assign combos, process every champion, then compute statistics.
pub fn run_pipeline(
    mut champions: Vec<Champion>,
    combos: Vec<Combo>,
    options: &PipelineOptions,
) -> PipelineOutput {
    let combo_count = combos.len();
    let orphans = assign_combos(&mut champions, combos);
    process_champions(&mut champions, &options.pool);
    let statistics = compute_statistics_with(&champions, options.top_combos);

    tracing::info!(
        champions = champions.len(),
        combos_in = combo_count,
        combos_out = statistics.total_combos,
        orphans = orphans.len(),
        "pipeline complete"
    );

    PipelineOutput {
        champions,
        orphans,
        statistics,
    }
}

/// Load both files (seed data fills in for missing ones), drop champions and combos
/// that fail ingestion validation, then run the pipeline.
pub fn run_from_files(
    champions_path: impl AsRef<Path>,
    combos_path: impl AsRef<Path>,
    options: &PipelineOptions,
) -> Result<PipelineOutput> {
    let dataset = load_dataset(champions_path, combos_path)?;

    let (champions, champion_report) = prepare_champions(dataset.champions);
    log_rejections("champions", &champion_report);
    let (combos, combo_report) = prepare_combos(dataset.combos);
    log_rejections("combos", &combo_report);

    Ok(run_pipeline(champions, combos, options))
}

fn log_rejections(kind: &'static str, report: &ValidationReport) {
    for diagnostic in &report.diagnostics {
        match diagnostic.severity {
            ValidationSeverity::Error => tracing::warn!(kind, %diagnostic, "record rejected"),
            _ => tracing::debug!(kind, %diagnostic, "ingestion diagnostic"),
        }
    }
    let rejected = report.rejected_entries().len();
    if rejected > 0 {
        tracing::warn!(
            kind,
            rejected,
            warnings = report.count(ValidationSeverity::Warning),
            "records rejected during ingestion"
        );
    }
}
