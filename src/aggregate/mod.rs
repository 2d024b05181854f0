pub mod pipeline;
pub mod ranking;
pub mod statistics;

pub use pipeline::{
    assign_combos, process_champion, process_champions, run_from_files, run_pipeline, PipelineOptions,
    PipelineOutput,
};
pub use ranking::{rank_across_champions, rank_combos, RankedCombo};
pub use statistics::{
    compute_statistics, compute_statistics_with, DifficultyHistogram, Statistics, TopCombo,
    DEFAULT_TOP_COMBOS,
};
