//! Courses, sections, and meetings as scraped from OSCAR
mod course;
mod meeting;
mod section;
mod types;

pub use course::Course;
pub use meeting::Meeting;
pub use section::Section;
pub use types::*;
