//! SeaORM entities.
//!
//! These map tables one to one and stay separate from the API models in
//! `crate::models`. Storage works on them and converts results with the
//! `into_*` helpers. Timestamps are stored as unix seconds.

pub mod prelude;

pub mod academic_programs;
pub mod completion_exams;
pub mod grades;
pub mod professors;
pub mod school_years;
pub mod students;
pub mod subjects;
pub mod users;
pub mod year_levels;

use chrono::{DateTime, Utc};

pub(crate) fn to_datetime(ts: i64) -> DateTime<Utc> {
    DateTime::<Utc>::from_timestamp(ts, 0).unwrap_or_default()
}
