//! Shared test fixtures for the timetabling crates.
//!
//! This crate only depends on `timetable-core`, so every other crate can use
//! it as a dev-dependency without cycles.
//!
//! - [`builder`] - [`TimetableBuilder`] for hand-placed scenarios
//! - [`school`] - a small, feasible sample school
//!
//! # Usage
//!
//! ```toml
//! [dev-dependencies]
//! timetable-test = { workspace = true }
//! ```

pub mod builder;
pub mod school;

pub use builder::TimetableBuilder;
pub use school::{sample_school, SampleSchool};
