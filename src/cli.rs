use std::path::{Path, PathBuf};

use crate::aggregate::{rank_across_champions, run_from_files, PipelineOutput};
use crate::analysis::{find_similar_pairs, suggest_variations};
use crate::config::AppConfig;
use crate::data::combo::Combo;
use crate::data::loader::load_combos;
use crate::data::validate::{validate_combos, ValidationSeverity};
use crate::export::{write_processed, write_rankings_csv};
use crate::logging::init_logging;
use crate::server;

const USAGE: &str = "usage: combodex <analyze|stats|similar|variations|validate|serve> [--config PATH]";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Analyze,
    Stats,
    Similar,
    Variations,
    Validate,
    Serve,
}

pub fn parse_command(args: &[String]) -> Option<Command> {
    match args.get(1).map(String::as_str) {
        Some("analyze") => Some(Command::Analyze),
        Some("stats") => Some(Command::Stats),
        Some("similar") => Some(Command::Similar),
        Some("variations") => Some(Command::Variations),
        Some("validate") => Some(Command::Validate),
        Some("serve") => Some(Command::Serve),
        _ => None,
    }
}

/// Arguments after the command word, with `--flag value` pairs pulled out.
#[derive(Debug, Default, PartialEq, Eq)]
struct Options {
    positional: Vec<String>,
    config: Option<PathBuf>,
    out: Option<PathBuf>,
    csv: Option<PathBuf>,
}

fn parse_options(args: &[String]) -> Result<Options, String> {
    let mut options = Options::default();
    let mut rest = args.iter().skip(2);
    while let Some(arg) = rest.next() {
        let slot = match arg.as_str() {
            "--config" => &mut options.config,
            "--out" => &mut options.out,
            "--csv" => &mut options.csv,
            flag if flag.starts_with("--") => return Err(format!("unknown option '{flag}'")),
            _ => {
                options.positional.push(arg.clone());
                continue;
            }
        };
        let Some(value) = rest.next() else {
            return Err(format!("option '{arg}' needs a value"));
        };
        *slot = Some(PathBuf::from(value));
    }
    Ok(options)
}

pub fn run_with_args(args: &[String]) -> i32 {
    let Some(command) = parse_command(args) else {
        eprintln!("{USAGE}");
        return 2;
    };
    let options = match parse_options(args) {
        Ok(options) => options,
        Err(msg) => {
            eprintln!("{msg}\n{USAGE}");
            return 2;
        }
    };
    let config = match AppConfig::load(options.config.as_deref()) {
        Ok(config) => config,
        Err(err) => {
            eprintln!("config error: {err}");
            return 1;
        }
    };
    init_logging(&config.log_filter);

    match command {
        Command::Analyze => handle_analyze(&config, &options),
        Command::Stats => handle_stats(&config),
        Command::Similar => handle_similar(&config, &options),
        Command::Variations => handle_variations(&config, &options),
        Command::Validate => handle_validate(&config, &options),
        Command::Serve => handle_serve(&config),
    }
}

fn handle_analyze(config: &AppConfig, options: &Options) -> i32 {
    let champions_path = options
        .positional
        .first()
        .map(PathBuf::from)
        .unwrap_or_else(|| config.champions_path.clone());
    let combos_path = options
        .positional
        .get(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| config.combos_path.clone());

    let Some(output) = process(config, &champions_path, &combos_path) else {
        return 1;
    };

    if let Some(dir) = &options.out {
        if let Err(err) = write_processed(dir, &output) {
            eprintln!("export failed: {err}");
            return 1;
        }
    }
    if let Some(path) = &options.csv {
        if let Err(err) = write_rankings_csv(path, &rank_across_champions(&output.champions)) {
            eprintln!("csv export failed: {err}");
            return 1;
        }
    }

    print_json(&output.statistics)
}

fn handle_stats(config: &AppConfig) -> i32 {
    match process(config, &config.champions_path, &config.combos_path) {
        Some(output) => print_json(&output.statistics),
        None => 1,
    }
}

fn handle_similar(config: &AppConfig, options: &Options) -> i32 {
    let threshold = match options.positional.first() {
        Some(raw) => match parse_threshold(raw) {
            Ok(threshold) => threshold,
            Err(msg) => {
                eprintln!("{msg}\nusage: combodex similar [threshold]");
                return 2;
            }
        },
        None => config.similarity_threshold,
    };
    let Some(output) = process(config, &config.champions_path, &config.combos_path) else {
        return 1;
    };
    let combos: Vec<Combo> = output
        .champions
        .into_iter()
        .flat_map(|champion| champion.combos)
        .collect();
    print_json(&find_similar_pairs(&combos, threshold))
}

fn handle_variations(config: &AppConfig, options: &Options) -> i32 {
    let Some(combo_id) = options.positional.first() else {
        eprintln!("usage: combodex variations <combo-id>");
        return 2;
    };
    let Some(output) = process(config, &config.champions_path, &config.combos_path) else {
        return 1;
    };
    let found = output
        .champions
        .iter()
        .flat_map(|champion| champion.combos.iter())
        .chain(output.orphans.iter())
        .find(|combo| &combo.id == combo_id);

    match found {
        Some(combo) => print_json(&serde_json::json!({
            "comboId": combo.id,
            "sequence": combo.ability_sequence(),
            "variations": suggest_variations(combo),
        })),
        None => {
            eprintln!("combo not found: {combo_id}");
            1
        }
    }
}

fn handle_validate(config: &AppConfig, options: &Options) -> i32 {
    let path = options
        .positional
        .first()
        .map(PathBuf::from)
        .unwrap_or_else(|| config.combos_path.clone());

    let (combos, mut report) = match load_combos(&path) {
        Ok(loaded) => loaded,
        Err(err) => {
            eprintln!("validation failed: {err}");
            return 1;
        }
    };
    report.extend(validate_combos(&combos));
    for diagnostic in &report.diagnostics {
        eprintln!("- {diagnostic}");
    }

    if report.has_errors() {
        eprintln!(
            "validation failed: {} error(s), {} warning(s)",
            report.count(ValidationSeverity::Error),
            report.count(ValidationSeverity::Warning)
        );
        1
    } else {
        println!(
            "validation passed: {} ({} combos, {} warning(s))",
            path.display(),
            combos.len(),
            report.count(ValidationSeverity::Warning)
        );
        0
    }
}

fn handle_serve(config: &AppConfig) -> i32 {
    match server::run_server(config) {
        Ok(()) => 0,
        Err(err) => {
            eprintln!("server error: {err}");
            1
        }
    }
}

fn process(config: &AppConfig, champions_path: &Path, combos_path: &Path) -> Option<PipelineOutput> {
    match run_from_files(champions_path, combos_path, &config.pipeline_options()) {
        Ok(output) => Some(output),
        Err(err) => {
            eprintln!("failed to load dataset: {err}");
            None
        }
    }
}

fn print_json<T: serde::Serialize + ?Sized>(value: &T) -> i32 {
    match serde_json::to_string_pretty(value) {
        Ok(payload) => {
            println!("{payload}");
            0
        }
        Err(err) => {
            eprintln!("failed to serialize result: {err}");
            1
        }
    }
}

fn parse_threshold(raw: &str) -> Result<f64, String> {
    raw.parse::<f64>()
        .ok()
        .filter(|value| (0.0..=1.0).contains(value))
        .ok_or_else(|| format!("invalid threshold '{raw}': expected a number in [0, 1]"))
}
