//! engage-heatmap - Users by time of the day
//!
//! This crate turns a week of hourly active-user samples into the grid
//! behind the engagement dashboard heatmap:
//!
//! - **Period**: the `[start, end]` range and the date columns it spans
//! - **Samples**: lenient parsing of backend `{ users, hour, day, month, year }` records
//! - **Grid**: 24 hour rows × one column per date, summed per cell
//! - **Axis**: weekday and hour labels for the renderer
//! - **Export**: the raw samples as a `Date,Users` CSV
//!
//! # Timezones
//!
//! Samples are reported in UTC calendar hours. In [`TimezoneMode::Local`]
//! they are shifted into the viewer's zone, which is passed explicitly as a
//! [`chrono::FixedOffset`] rather than read from the process.

pub mod axis;
pub mod error;
pub mod export;
pub mod grid;
pub mod period;
pub mod sample;

pub use axis::*;
pub use error::*;
pub use export::*;
pub use grid::*;
pub use period::*;
pub use sample::*;
