//! # Matchup Fairness
//!
//! Scores how fair a round-based team-matchmaking schedule is.
//!
//! ## Architecture
//!
//! - **models**: Core data structures (match records, statistics, weights, reports)
//! - **calculate**: Per-player statistics, global fairness indices and the weighted loss
//! - **storage**: JSONL schedule input, JSON/JSONL report output
//! - **config**: Configuration loading and validation
//!
//! The engine is a pure function: [`score`] takes a chronological list of
//! [`MatchRecord`]s and returns the twelve fairness indices plus one loss value,
//! suitable for calling repeatedly from a schedule search loop.

pub mod calculate;
pub mod config;
pub mod models;
pub mod storage;

pub use calculate::{evaluate, run_lengths, score, ScoreError};
pub use models::*;
