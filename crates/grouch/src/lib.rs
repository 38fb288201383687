//! Entities for course scheduling data scraped from Georgia Tech's OSCAR.
//!
//! A [`Course`] owns its [`Section`]s, and each section owns the [`Meeting`]s
//! it is made of. Sections aggregate their meetings into cached views (days,
//! time windows, meeting types, locations) and carry seat counts that an
//! availability poller can refresh through [`Catalog::apply_availability`].
//!
//! ```
//! use grouch::{Meeting, Section};
//!
//! let lecture = Meeting::new("Monica Sweat", "mwf", "8:05am", "8:55am", "lecture", "CULC 102")?;
//! let recitation = Meeting::new("Tommy Rogers", "w", "5:05pm", "6:25pm", "recitation", "IC 204")?;
//! let section = Section::new(87201, "A1", vec!["Monica Sweat".into()], vec![lecture, recitation]);
//!
//! assert_eq!(section.meeting_days().len(), 3);
//! assert_eq!(section.meeting_times().len(), 4);
//! # Ok::<(), grouch::GrouchError>(())
//! ```

pub mod catalog;
pub mod codec;
pub mod entities;
pub mod error;

pub use catalog::{AvailabilityUpdate, Catalog, CatalogConfig};
pub use codec::{LetterCodec, Letters, DAYS, GRADING_BASIS};
pub use entities::{Course, Meeting, Section, SeatCounts, Semester, TimeWindow};
pub use error::{GrouchError, Result};
