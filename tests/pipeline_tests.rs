use std::collections::HashSet;
use std::fs;
use std::path::PathBuf;

use combodex::aggregate::{rank_across_champions, run_from_files, run_pipeline, PipelineOptions};
use combodex::analysis::find_similar_pairs;
use combodex::data::seed::{seed_champions, seed_combos};
use combodex::data::{prepare_combos, Combo, Difficulty};
use combodex::parallel::WorkerPool;

fn seeded(options: &PipelineOptions) -> combodex::aggregate::PipelineOutput {
    run_pipeline(
        seed_champions().expect("seed champions"),
        seed_combos().expect("seed combos"),
        options,
    )
}

#[test]
fn seed_run_produces_expected_statistics() {
    let output = seeded(&PipelineOptions::default());
    let stats = &output.statistics;

    assert_eq!(stats.total_champions, 3);
    assert_eq!(stats.total_combos, 5);
    assert_eq!(stats.champions_with_combos, 3);
    assert_eq!(stats.average_combos_per_champion, 1.67);
    assert_eq!(stats.average_combo_score, 0.706);
    assert_eq!(stats.combos_by_difficulty.medium, 2);
    assert_eq!(stats.combos_by_difficulty.extreme, 1);
    assert_eq!(stats.combos_by_tag.get("teamfight"), Some(&3));

    let top = &stats.top_combos[0];
    assert_eq!(top.name, "Kite and Burst");
    assert_eq!(top.score, "0.810");
    assert_eq!(top.difficulty, Some(Difficulty::Easy));
}

#[test]
fn every_combo_is_analyzed_and_sorted_per_champion() {
    let output = seeded(&PipelineOptions::default());

    for champion in &output.champions {
        assert!(champion.combos.iter().all(|combo| combo.analysis.is_some()));
        let scores: Vec<f64> = champion.combos.iter().map(Combo::ranking_score).collect();
        assert!(scores.windows(2).all(|pair| pair[0] >= pair[1]), "{scores:?}");
    }

    let ahri = output
        .champions
        .iter()
        .find(|champion| champion.id == "Ahri")
        .expect("Ahri processed");
    let ids: Vec<&str> = ahri.combos.iter().map(|combo| combo.id.as_str()).collect();
    assert_eq!(
        ids,
        vec!["ahri_kite_combo_v1", "ahri_charm_combo_v1", "ahri_ult_chase_v1"]
    );
}

#[test]
fn duplicate_input_collapses_to_unique_keys() {
    let mut combos = seed_combos().expect("seed combos");
    let copies: Vec<Combo> = combos
        .iter()
        .map(|combo| {
            let mut copy = combo.clone();
            copy.id = format!("{}_copy", combo.id);
            copy
        })
        .collect();
    combos.extend(copies);

    let output = run_pipeline(
        seed_champions().expect("seed champions"),
        combos,
        &PipelineOptions::default(),
    );
    let keys: Vec<String> = output
        .champions
        .iter()
        .flat_map(|champion| champion.combos.iter().map(Combo::dedup_key))
        .collect();
    let unique: HashSet<&String> = keys.iter().collect();
    assert_eq!(keys.len(), 5);
    assert_eq!(unique.len(), keys.len());
    assert!(output
        .champions
        .iter()
        .flat_map(|champion| champion.combos.iter())
        .all(|combo| combo.sources.len() == 2));
}

#[test]
fn worker_count_does_not_change_results() {
    let single = seeded(&PipelineOptions {
        pool: WorkerPool::with_workers(1),
        ..PipelineOptions::default()
    });
    let many = seeded(&PipelineOptions {
        pool: WorkerPool::with_workers(4),
        ..PipelineOptions::default()
    });
    assert_eq!(single.champions, many.champions);
    assert_eq!(single.statistics, many.statistics);
}

#[test]
fn global_ranking_is_descending_with_one_based_ranks() {
    let output = seeded(&PipelineOptions::default());
    let ranked = rank_across_champions(&output.champions);

    assert_eq!(ranked.len(), 5);
    assert_eq!(ranked[0].rank, 1);
    assert_eq!(ranked[0].combo_id, "ahri_kite_combo_v1");
    assert_eq!(ranked[4].combo_id, "leesin_insec_combo_v1");
    assert_eq!(ranked[4].is_valid, Some(false));
    assert!(ranked
        .windows(2)
        .all(|pair| pair[0].ranking_score >= pair[1].ranking_score));
}

#[test]
fn rejected_combos_never_reach_the_pipeline() {
    let mut combos = seed_combos().expect("seed combos");
    let mut broken = combos[0].clone();
    broken.id = "broken".to_string();
    broken.abilities.clear();
    combos.push(broken);

    let (accepted, report) = prepare_combos(combos);
    assert!(report.has_errors());
    assert_eq!(accepted.len(), 5);
    assert!(accepted.iter().all(|combo| combo.id != "broken"));
}

#[test]
fn near_duplicates_are_reported_within_a_champion() {
    let mut combos = seed_combos().expect("seed combos");
    let mut variant = combos[0].clone();
    variant.id = "ahri_charm_short".to_string();
    variant.abilities.pop();
    combos.push(variant);

    // E-Q-W-R is one edit away from both Q-W-R and E-Q-W.
    let pairs = find_similar_pairs(&combos, 0.75);
    let ids: Vec<(&str, &str)> = pairs
        .iter()
        .map(|pair| (pair.first_id.as_str(), pair.second_id.as_str()))
        .collect();
    assert_eq!(
        ids,
        vec![
            ("ahri_charm_combo_v1", "ahri_kite_combo_v1"),
            ("ahri_charm_combo_v1", "ahri_charm_short"),
        ]
    );
    assert!(pairs.iter().all(|pair| pair.champion_id == "Ahri"));
    assert!(pairs.iter().all(|pair| (pair.similarity - 0.75).abs() < 1e-9));
}

fn write_temp(name: &str, contents: &str) -> PathBuf {
    let path = std::env::temp_dir().join(format!("combodex_{}_{name}", std::process::id()));
    fs::write(&path, contents).expect("write temp file");
    path
}

#[test]
fn rejected_champions_are_excluded_from_file_runs() {
    let champions = write_temp(
        "dup_champions.json",
        r#"[
            {"id":"Ahri","name":"Ahri","abilities":{"q":{"key":"Q","name":"Orb of Deception"}}},
            {"id":"Ahri","name":"Ahri Clone"},
            {"id":"","name":"Nameless"}
        ]"#,
    );
    let combos = write_temp(
        "dup_combos.json",
        r#"[{"id":"ahri_poke","championId":"Ahri","name":"Poke","abilities":[{"key":"Q"}]}]"#,
    );

    let output = run_from_files(&champions, &combos, &PipelineOptions::default())
        .expect("file run succeeds");
    let _ = fs::remove_file(&champions);
    let _ = fs::remove_file(&combos);

    assert_eq!(output.statistics.total_champions, 1);
    assert_eq!(output.champions.len(), 1);
    let ahri = &output.champions[0];
    assert_eq!(ahri.name, "Ahri");
    assert_eq!(ahri.combos.len(), 1);
    let analysis = ahri.combos[0].analysis.as_ref().expect("combo analyzed");
    assert!(analysis.is_valid, "issues: {:?}", analysis.issues);
    assert!(output.orphans.is_empty());
}

#[test]
fn one_malformed_combo_does_not_discard_the_file() {
    let champions = write_temp(
        "mixed_champions.json",
        r#"[{"id":"Ahri","name":"Ahri","abilities":{"q":{"key":"Q","name":"Orb of Deception"}}}]"#,
    );
    let combos = write_temp(
        "mixed_combos.json",
        r#"{"combos":[
            {"id":"ahri_poke","championId":"Ahri","name":"Poke","abilities":[{"key":"Q"}]},
            {"id":"ahri_bad","championId":"Ahri","name":"Bad","abilities":[{"key":"Q"}],
             "effectiveness":{"difficulty":"Insane"}}
        ]}"#,
    );

    let output = run_from_files(&champions, &combos, &PipelineOptions::default())
        .expect("file run succeeds");
    let _ = fs::remove_file(&champions);
    let _ = fs::remove_file(&combos);

    assert_eq!(output.statistics.total_combos, 1);
    assert_eq!(output.champions[0].combos[0].id, "ahri_poke");
}
