//! Candidate/job skill matching.
//!
//! Turns uploaded resumes into structured records, scores candidate skills
//! against job requirements and keeps each candidate's persisted job matches
//! in sync with the catalog. [`service::MatchingService`] is the entry point.

pub mod config;
pub mod db;
pub mod errors;
pub mod matching;
pub mod models;
pub mod parsing;
pub mod service;
pub mod store;
pub mod telemetry;

pub use errors::AppError;
pub use service::MatchingService;
