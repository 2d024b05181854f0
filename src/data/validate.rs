//! Ingestion-boundary checks for champion and combo records.
//!
//! Errors mark records the pipeline cannot use; warnings mark records that are
//! usable after [sanitize_combos] repairs them.

use std::collections::{BTreeSet, HashSet};
use std::fmt;

use serde::Serialize;

use crate::data::champion::Champion;
use crate::data::combo::Combo;

/// Slot letters champions normally expose.
pub const KNOWN_SLOTS: &[&str] = &["P", "Q", "W", "E", "R"];
const ID_PREFIX: &str = "combo_";

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ValidationSeverity {
    Error,
    Warning,
    Info,
}

impl ValidationSeverity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Error => "error",
            Self::Warning => "warning",
            Self::Info => "info",
        }
    }
}

impl fmt::Display for ValidationSeverity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValidationDiagnostic {
    pub severity: ValidationSeverity,
    /// Position of the offending record in its input list.
    pub entry: usize,
    pub context: String,
    pub message: String,
}

impl fmt::Display for ValidationDiagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}: {}", self.severity, self.context, self.message)
    }
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct ValidationReport {
    pub diagnostics: Vec<ValidationDiagnostic>,
}

impl ValidationReport {
    pub fn push(
        &mut self,
        severity: ValidationSeverity,
        entry: usize,
        context: impl Into<String>,
        message: impl Into<String>,
    ) {
        self.diagnostics.push(ValidationDiagnostic {
            severity,
            entry,
            context: context.into(),
            message: message.into(),
        });
    }

    pub fn has_errors(&self) -> bool {
        self.diagnostics
            .iter()
            .any(|diag| diag.severity == ValidationSeverity::Error)
    }

    pub fn count(&self, severity: ValidationSeverity) -> usize {
        self.diagnostics
            .iter()
            .filter(|diag| diag.severity == severity)
            .count()
    }

    /// Entry indices carrying at least one error.
    pub fn rejected_entries(&self) -> BTreeSet<usize> {
        self.diagnostics
            .iter()
            .filter(|diag| diag.severity == ValidationSeverity::Error)
            .map(|diag| diag.entry)
            .collect()
    }

    pub fn extend(&mut self, other: ValidationReport) {
        self.diagnostics.extend(other.diagnostics);
    }
}

pub fn validate_champions(champions: &[Champion]) -> ValidationReport {
    let mut report = ValidationReport::default();
    let mut seen_ids = HashSet::new();

    for (index, champion) in champions.iter().enumerate() {
        let context = format!("champion[{index}]");
        if champion.id.trim().is_empty() {
            report.push(ValidationSeverity::Error, index, &context, "missing non-empty 'id'");
        } else if !seen_ids.insert(champion.id.as_str()) {
            report.push(
                ValidationSeverity::Error,
                index,
                &context,
                format!("duplicate id '{}'", champion.id),
            );
        }
        if champion.name.trim().is_empty() {
            report.push(ValidationSeverity::Error, index, &context, "missing non-empty 'name'");
        }
        if champion.abilities.is_empty() {
            report.push(ValidationSeverity::Warning, index, &context, "no abilities");
        }
        for (slot, ability) in &champion.abilities {
            if !ability.key.eq_ignore_ascii_case(slot) {
                report.push(
                    ValidationSeverity::Warning,
                    index,
                    format!("{context}.abilities.{slot}"),
                    format!("ability key '{}' does not match slot '{slot}'", ability.key),
                );
            }
        }
    }

    report
}

pub fn validate_combos(combos: &[Combo]) -> ValidationReport {
    let mut report = ValidationReport::default();
    let mut seen_ids = HashSet::new();

    for (index, combo) in combos.iter().enumerate() {
        let context = if combo.id.is_empty() {
            format!("combo[{index}]")
        } else {
            format!("combo[{index}] id='{}'", combo.id)
        };

        if combo.id.trim().is_empty() {
            report.push(ValidationSeverity::Info, index, &context, "missing id, one will be assigned");
        } else if !seen_ids.insert(combo.id.as_str()) {
            report.push(
                ValidationSeverity::Warning,
                index,
                &context,
                format!("duplicate id '{}'", combo.id),
            );
        }

        if combo.champion_id.trim().is_empty() {
            report.push(ValidationSeverity::Error, index, &context, "missing non-empty 'championId'");
        }
        if combo.abilities.is_empty() {
            report.push(ValidationSeverity::Error, index, &context, "empty 'abilities' sequence");
        }

        for (step_index, step) in combo.abilities.iter().enumerate() {
            let step_context = format!("{context}.abilities[{step_index}]");
            if step.key.trim().is_empty() {
                report.push(ValidationSeverity::Error, index, step_context, "missing slot key");
            } else if !KNOWN_SLOTS.iter().any(|slot| slot.eq_ignore_ascii_case(&step.key)) {
                report.push(
                    ValidationSeverity::Warning,
                    index,
                    step_context,
                    format!("unusual slot '{}'", step.key),
                );
            }
        }

        let reliability = combo.effectiveness.reliability;
        if !(0.0..=1.0).contains(&reliability) {
            report.push(
                ValidationSeverity::Warning,
                index,
                format!("{context}.effectiveness.reliability"),
                format!("{reliability} outside [0, 1]; will be clamped"),
            );
        }

        for (source_index, source) in combo.sources.iter().enumerate() {
            if !(0.0..=1.0).contains(&source.confidence_score) {
                report.push(
                    ValidationSeverity::Warning,
                    index,
                    format!("{context}.sources[{source_index}].confidenceScore"),
                    format!("{} outside [0, 1]; will be clamped", source.confidence_score),
                );
            }
        }

        if let Some(declared) = combo.effectiveness.execution_time {
            let summed = combo.total_execution_time();
            if i64::try_from(declared).map_or(true, |declared| declared != summed) {
                report.push(
                    ValidationSeverity::Info,
                    index,
                    format!("{context}.effectiveness.executionTime"),
                    format!("declared {declared}ms, step offsets sum to {summed}ms"),
                );
            }
        }
    }

    report
}

/// Clamp reliability and source confidence into [0, 1] and assign ids to anonymous combos.
pub fn sanitize_combos(combos: &mut [Combo]) {
    for combo in combos.iter_mut() {
        if combo.id.trim().is_empty() {
            combo.id = generate_combo_id();
        }
        combo.effectiveness.reliability = clamp_unit(combo.effectiveness.reliability);
        for source in &mut combo.sources {
            source.confidence_score = clamp_unit(source.confidence_score);
        }
    }
}

/// Drop champions with errors. Duplicate ids keep the first occurrence.
pub fn prepare_champions(champions: Vec<Champion>) -> (Vec<Champion>, ValidationReport) {
    let report = validate_champions(&champions);
    let rejected = report.rejected_entries();
    let accepted = champions
        .into_iter()
        .enumerate()
        .filter(|(index, _)| !rejected.contains(index))
        .map(|(_, champion)| champion)
        .collect();
    (accepted, report)
}

/// Drop rejected entries, sanitize the rest, and return them with the combined report.
pub fn prepare_combos(combos: Vec<Combo>) -> (Vec<Combo>, ValidationReport) {
    let report = validate_combos(&combos);
    let rejected = report.rejected_entries();
    let mut accepted: Vec<Combo> = combos
        .into_iter()
        .enumerate()
        .filter(|(index, _)| !rejected.contains(index))
        .map(|(_, combo)| combo)
        .collect();
    sanitize_combos(&mut accepted);
    (accepted, report)
}

pub fn generate_combo_id() -> String {
    format!("{ID_PREFIX}{}", uuid::Uuid::new_v4().simple())
}

fn clamp_unit(value: f64) -> f64 {
    if value.is_nan() {
        0.0
    } else {
        value.clamp(0.0, 1.0)
    }
}
