//! Tracker - command handler over the table store
//!
//! Each user action is one call: load the tables it touches, apply a single
//! mutation, write the full tables back, return the result to render.

mod core;
mod error;

pub use core::{LogOutcome, Tracker};
pub use error::{TrackerError, TrackerResult};
