//! Command workflows, decoupled from argument parsing

pub mod orchestration;

pub use orchestration::{
    parse_date, run_crosslinks, run_generate, run_new_change, run_release, CrosslinkResult,
    GenerateResult, ReleaseResult,
};
