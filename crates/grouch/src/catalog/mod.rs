//! Loading scraped courses into a term catalog and keeping seat counts fresh.

mod config;
mod raw;

pub use config::CatalogConfig;
pub use raw::{AvailabilityUpdate, RawCourse, RawMeeting, RawSection};

use serde_json::Value;
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

use crate::entities::{Course, Section};
use crate::error::{GrouchError, Result};

/// The courses of one term, with sections indexed by CRN.
#[derive(Debug, Default)]
pub struct Catalog {
    courses: Vec<Course>,
    /// CRN -> (course index, section index)
    crn_index: HashMap<u32, (usize, usize)>,
}

impl Catalog {
    /// Creates a catalog from already-built courses.
    ///
    /// CRNs are unique within a term; if two sections share one, the first is
    /// indexed and the other is only reachable through its course.
    pub fn new(courses: Vec<Course>) -> Self {
        let mut crn_index = HashMap::new();

        for (course_idx, course) in courses.iter().enumerate() {
            for (section_idx, section) in course.sections().iter().enumerate() {
                if crn_index.contains_key(&section.crn()) {
                    warn!(
                        "Duplicate CRN {} in {}; keeping the first section",
                        section.crn(),
                        course.full_name().unwrap_or_default()
                    );
                    continue;
                }
                crn_index.insert(section.crn(), (course_idx, section_idx));
            }
        }

        Self { courses, crn_index }
    }

    /// Builds a catalog from raw records.
    ///
    /// Invalid courses are skipped with a warning, unless `config.strict` is
    /// set, in which case the first invalid course is returned as an error.
    pub fn from_raw(raw_courses: Vec<RawCourse>, config: &CatalogConfig) -> Result<Self> {
        Self::from_records(raw_courses.into_iter().map(Ok), config)
    }

    /// Builds courses from records that may already have failed to
    /// deserialize, skipping or aborting on each failure like [`Self::from_raw`].
    fn from_records(
        records: impl IntoIterator<Item = Result<RawCourse>>,
        config: &CatalogConfig,
    ) -> Result<Self> {
        let mut courses = Vec::new();

        for (idx, record) in records.into_iter().enumerate() {
            match record.and_then(Course::try_from) {
                Ok(course) => courses.push(course),
                Err(e) if !config.strict && e.is_input_error() => {
                    warn!("Skipping course #{idx}: {e}");
                }
                Err(e) => return Err(e),
            }
        }

        Ok(Self::new(courses))
    }

    /// Loads every dump file in `dir`, in path order.
    ///
    /// # Arguments
    /// * `dir` - Directory holding scrape dumps
    /// * `config` - Which files to read and how strictly to validate
    ///
    /// # Returns
    /// * `Ok(Catalog)` - All valid courses; empty if `dir` does not exist
    /// * `Err` - If a file can't be read or isn't JSON, or (in strict mode) a course is invalid
    ///
    /// A file holds one course object or an array of them. Each course is
    /// deserialized on its own, so one mistyped record doesn't take its
    /// siblings down with it.
    pub fn load_from_directory(dir: &Path, config: &CatalogConfig) -> Result<Self> {
        if !dir.is_dir() {
            warn!("Dump directory {} does not exist", dir.display());
            return Ok(Self::default());
        }

        let mut paths: Vec<PathBuf> = fs::read_dir(dir)?
            .map(|entry| entry.map(|e| e.path()))
            .collect::<std::io::Result<_>>()?;
        paths.retain(|p| {
            p.is_file()
                && p.extension().and_then(|s| s.to_str()) == Some(config.extension.as_str())
        });
        paths.sort();

        let mut records = Vec::new();
        for path in &paths {
            let content = fs::read_to_string(path)?;
            let source_name = path
                .file_name()
                .map(|name| name.to_string_lossy().into_owned())
                .unwrap_or_default();

            match serde_json::from_str::<Value>(&content)? {
                Value::Array(values) => records.extend(
                    values
                        .into_iter()
                        .enumerate()
                        .map(|(index, value)| course_record(&source_name, index, value)),
                ),
                value => records.push(course_record(&source_name, 0, value)),
            }
        }

        let catalog = Self::from_records(records, config)?;
        let section_count: usize = catalog.courses.iter().map(|c| c.sections().len()).sum();
        info!(
            "Loaded {} courses ({} sections) from {} files in {}",
            catalog.len(),
            section_count,
            paths.len(),
            dir.display()
        );

        Ok(catalog)
    }

    pub fn courses(&self) -> &[Course] {
        &self.courses
    }

    pub fn len(&self) -> usize {
        self.courses.len()
    }

    pub fn is_empty(&self) -> bool {
        self.courses.is_empty()
    }

    /// Gets a section by CRN.
    pub fn section(&self, crn: u32) -> Option<&Section> {
        let &(course_idx, section_idx) = self.crn_index.get(&crn)?;
        self.courses.get(course_idx)?.sections().get(section_idx)
    }

    /// Gets the course that owns the section with this CRN.
    pub fn course_for_crn(&self, crn: u32) -> Option<&Course> {
        let &(course_idx, _) = self.crn_index.get(&crn)?;
        self.courses.get(course_idx)
    }

    /// Gets a section by CRN for a count refresh.
    pub fn section_mut(&mut self, crn: u32) -> Option<&mut Section> {
        let &(course_idx, section_idx) = self.crn_index.get(&crn)?;
        self.courses
            .get_mut(course_idx)?
            .sections_mut()
            .get_mut(section_idx)
    }

    /// Writes a polled availability snapshot into the matching section.
    pub fn apply_availability(&mut self, update: &AvailabilityUpdate) -> Result<()> {
        let section = self
            .section_mut(update.crn)
            .ok_or(GrouchError::UnknownCrn { crn: update.crn })?;
        update.apply_to(section)?;

        debug!(
            crn = update.crn,
            seats_remaining = ?section.seats_remaining(),
            "Applied availability update"
        );
        Ok(())
    }
}

/// Deserializes one course of a dump file.
fn course_record(source_name: &str, index: usize, value: Value) -> Result<RawCourse> {
    serde_json::from_value(value).map_err(|e| GrouchError::InvalidCourse {
        source_name: source_name.to_string(),
        index,
        reason: e.to_string(),
    })
}
