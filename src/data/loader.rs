//! Load champion and combo records from JSON files.
//!
//! Champion files may hold plain records (array or `{ "champions": [...] }`) or a
//! Data Dragon `champion.json` payload (`{ "data": { "<id>": {...} } }`).
//! Combo files hold an array or `{ "combos": [...] }`.
//!
//! Records are deserialized one at a time. An entry that does not fit the record
//! shape becomes an error diagnostic carrying its position in the file, and the
//! remaining entries still load. Only an unreadable file or a document of the
//! wrong overall shape fails the whole load.

use std::fs;
use std::path::Path;

use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::data::champion::Champion;
use crate::data::combo::Combo;
use crate::data::seed::{seed_champions, seed_combos};
use crate::data::validate::{ValidationReport, ValidationSeverity};
use crate::error::{DataError, Result};

pub const DEFAULT_CHAMPIONS_PATH: &str = "data/seed/champions.json";
pub const DEFAULT_COMBOS_PATH: &str = "data/seed/combos.json";

/// Everything [load_dataset] read, with the diagnostics for entries it had to skip.
#[derive(Debug, Clone, Default)]
pub struct Dataset {
    pub champions: Vec<Champion>,
    pub combos: Vec<Combo>,
    pub report: ValidationReport,
}

pub fn load_champions(path: impl AsRef<Path>) -> Result<(Vec<Champion>, ValidationReport)> {
    let path = path.as_ref();
    let payload = read_json(path)?;
    parse_champions_value(payload, path)
}

pub fn load_combos(path: impl AsRef<Path>) -> Result<(Vec<Combo>, ValidationReport)> {
    let path = path.as_ref();
    let payload = read_json(path)?;
    parse_list(payload, "combos", path)
}

/// Load both files, substituting the built-in seed data for any file that does not exist.
pub fn load_dataset(
    champions_path: impl AsRef<Path>,
    combos_path: impl AsRef<Path>,
) -> Result<Dataset> {
    let champions_path = champions_path.as_ref();
    let combos_path = combos_path.as_ref();
    let mut report = ValidationReport::default();

    let champions = if champions_path.exists() {
        let (champions, skipped) = load_champions(champions_path)?;
        report.extend(skipped);
        champions
    } else {
        tracing::warn!(path = %champions_path.display(), "champion file missing, using seed data");
        seed_champions()?
    };
    let combos = if combos_path.exists() {
        let (combos, skipped) = load_combos(combos_path)?;
        report.extend(skipped);
        combos
    } else {
        tracing::warn!(path = %combos_path.display(), "combo file missing, using seed data");
        seed_combos()?
    };

    tracing::info!(
        champions = champions.len(),
        combos = combos.len(),
        skipped = report.count(ValidationSeverity::Error),
        "dataset loaded"
    );
    Ok(Dataset {
        champions,
        combos,
        report,
    })
}

pub fn parse_champions_json(raw: &str, origin: &str) -> Result<(Vec<Champion>, ValidationReport)> {
    let payload: Value = serde_json::from_str(raw).map_err(|source| DataError::Json {
        path: origin.into(),
        source,
    })?;
    parse_champions_value(payload, Path::new(origin))
}

pub fn parse_combos_json(raw: &str, origin: &str) -> Result<(Vec<Combo>, ValidationReport)> {
    let payload: Value = serde_json::from_str(raw).map_err(|source| DataError::Json {
        path: origin.into(),
        source,
    })?;
    parse_list(payload, "combos", Path::new(origin))
}

fn read_json(path: &Path) -> Result<Value> {
    let raw = fs::read_to_string(path).map_err(|source| DataError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_str(&raw).map_err(|source| DataError::Json {
        path: path.to_path_buf(),
        source,
    })
}

fn parse_champions_value(
    payload: Value,
    path: &Path,
) -> Result<(Vec<Champion>, ValidationReport)> {
    let Some(data) = payload.get("data").and_then(Value::as_object) else {
        return parse_list(payload, "champions", path);
    };

    let mut champions = Vec::with_capacity(data.len());
    let mut report = ValidationReport::default();
    for (index, (key, raw)) in data.iter().enumerate() {
        match Champion::from_ddragon(raw) {
            Some(champion) => champions.push(champion),
            None => report.push(
                ValidationSeverity::Error,
                index,
                format!("{}: data.{key}", path.display()),
                "entry skipped: missing string 'id'",
            ),
        }
    }
    log_skipped(path, &report);
    Ok((champions, report))
}

fn parse_list<T: DeserializeOwned>(
    payload: Value,
    field: &'static str,
    path: &Path,
) -> Result<(Vec<T>, ValidationReport)> {
    let entries = match payload {
        Value::Array(items) => items,
        Value::Object(mut object) => match object.remove(field) {
            Some(Value::Array(items)) => items,
            _ => {
                return Err(DataError::UnexpectedShape {
                    path: path.to_path_buf(),
                    field,
                })
            }
        },
        _ => {
            return Err(DataError::UnexpectedShape {
                path: path.to_path_buf(),
                field,
            })
        }
    };

    let mut records = Vec::with_capacity(entries.len());
    let mut report = ValidationReport::default();
    for (index, entry) in entries.into_iter().enumerate() {
        match serde_json::from_value::<T>(entry) {
            Ok(record) => records.push(record),
            Err(err) => report.push(
                ValidationSeverity::Error,
                index,
                format!("{}: {field}[{index}]", path.display()),
                format!("entry skipped: {err}"),
            ),
        }
    }
    log_skipped(path, &report);
    Ok((records, report))
}

fn log_skipped(path: &Path, report: &ValidationReport) {
    for diagnostic in &report.diagnostics {
        tracing::warn!(path = %path.display(), %diagnostic, "skipped malformed entry");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_wrapped_and_bare_combo_lists() {
        let (bare, _) = parse_combos_json(r#"[{"id":"a","championId":"Ahri"}]"#, "inline").unwrap();
        let (wrapped, _) =
            parse_combos_json(r#"{"combos":[{"id":"a","championId":"Ahri"}]}"#, "inline").unwrap();
        assert_eq!(bare, wrapped);
    }

    #[test]
    fn malformed_combo_entry_is_skipped_and_reported() {
        let raw = r#"[
            {"id":"good","championId":"Ahri","abilities":[{"key":"Q"}],"effectiveness":{"difficulty":"easy"}},
            {"id":"bad","championId":"Ahri","abilities":[{"key":"Q"}],"effectiveness":{"difficulty":"Insane"}},
            {"id":"also_good","championId":"Ahri","abilities":[{"key":"W"}],"sources":[{"type":"guide"}]}
        ]"#;
        let (combos, report) = parse_combos_json(raw, "inline").expect("document shape is fine");

        let ids: Vec<&str> = combos.iter().map(|combo| combo.id.as_str()).collect();
        assert_eq!(ids, vec!["good", "also_good"]);
        assert_eq!(report.count(ValidationSeverity::Error), 1);
        let diagnostic = &report.diagnostics[0];
        assert_eq!(diagnostic.entry, 1);
        assert!(diagnostic.context.contains("combos[1]"));
        assert!(diagnostic.message.contains("Insane"));
    }

    #[test]
    fn malformed_champion_entry_is_skipped() {
        let raw = r#"{"champions":[{"id":"Ahri","name":"Ahri"},{"id":7}]}"#;
        let (champions, report) = parse_champions_json(raw, "inline").unwrap();
        assert_eq!(champions.len(), 1);
        assert_eq!(report.rejected_entries().into_iter().collect::<Vec<_>>(), vec![1]);
    }

    #[test]
    fn parses_ddragon_payload() {
        let raw = r#"{"data":{"Ahri":{"id":"Ahri","name":"Ahri","spells":[{"name":"Orb"}]},"Broken":{"name":"x"}}}"#;
        let (champions, report) = parse_champions_json(raw, "inline").unwrap();
        assert_eq!(champions.len(), 1);
        assert!(champions[0].has_ability("Q"));
        assert_eq!(report.count(ValidationSeverity::Error), 1);
        assert!(report.diagnostics[0].context.contains("data.Broken"));
    }

    #[test]
    fn rejects_unexpected_shape() {
        let err = parse_combos_json(r#"{"items":[]}"#, "inline").unwrap_err();
        assert!(matches!(err, DataError::UnexpectedShape { field: "combos", .. }));
        let err = parse_combos_json(r#"{"combos":{"a":1}}"#, "inline").unwrap_err();
        assert!(matches!(err, DataError::UnexpectedShape { field: "combos", .. }));
        assert!(parse_combos_json("not json", "inline").is_err());
    }

    #[test]
    fn missing_files_fall_back_to_seed() {
        let dataset = load_dataset("no/champions.json", "no/combos.json").unwrap();
        assert_eq!(dataset.champions.len(), 3);
        assert_eq!(dataset.combos.len(), 5);
        assert!(dataset.report.diagnostics.is_empty());
    }

    #[test]
    fn missing_file_reports_path() {
        let err = load_combos("does/not/exist.json").unwrap_err();
        assert!(err.to_string().contains("does/not/exist.json"));
    }
}
