//! Resume parsing: heuristic extraction of structured fields from raw resume text.
//!
//! `resume_parser` drives the pipeline; `extractor` and `sections` hold the
//! individual rules; `vocabulary` is the skill table the extractor matches against.

pub mod extractor;
pub mod resume_parser;
pub mod sections;
pub mod vocabulary;
