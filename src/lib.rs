//! Community Content: deterministic neighborhood page generation.
//!
//! Turns a table of neighborhood facts into marketing descriptions,
//! highlights, "best for" tags and nearby landmarks, using a small closed
//! set of prose templates selected by distance from downtown.

pub mod builtin_templates;
pub mod core;
pub mod schema;
