//! Deterministic scoring engine
//!
//! Turns a practice-session transcript into an OET-style `ScoringResult`:
//! structural analysis of the professional speaker's lines, six independently
//! bounded sub-scores, a weighted overall score, and narrative strengths and
//! improvements assembled from fixed templates.
//!
//! The engine is a pure function of its inputs. Two calls with identical
//! (transcript, persona, duration, profession) return identical results, so
//! the whole pipeline is unit-testable without mocks.

mod analysis;
mod dimensions;
mod engine;
mod narrative;

pub use engine::ScoringEngine;
