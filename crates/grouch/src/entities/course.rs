use serde::Serialize;
use serde_json::Value;

use super::section::Section;
use super::types::Semester;
use crate::codec::{Letters, GRADING_BASIS};
use crate::error::Result;

/// A college course scraped from OSCAR, with its sections.
///
/// Nothing is required; whatever the scrape produced is stored, normalized to
/// lower case where noted.
#[derive(Debug, Clone, Default, Serialize)]
pub struct Course {
    school: Option<String>,
    number: Option<u32>,
    name: Option<String>,
    semester: Option<Semester>,
    year: Option<i32>,
    hours: Option<u32>,
    grade_basis: Option<Letters>,
    sections: Vec<Section>,
    restrictions: Option<Value>,
    prerequisites: Option<Value>,
    corequisites: Option<Value>,
}

impl Course {
    /// Creates a course with the identifying fields set.
    ///
    /// `school` is stored lower-cased (`"CS"` becomes `"cs"`). Empty strings
    /// are stored as absent.
    pub fn new(school: Option<&str>, number: Option<u32>, name: Option<&str>) -> Self {
        Self {
            school: non_empty(school).map(str::to_lowercase),
            number,
            name: non_empty(name).map(str::to_string),
            ..Self::default()
        }
    }

    pub fn with_term(self, semester: Semester, year: i32) -> Self {
        self.with_semester(semester).with_year(year)
    }

    pub fn with_semester(mut self, semester: Semester) -> Self {
        self.semester = Some(semester);
        self
    }

    pub fn with_year(mut self, year: i32) -> Self {
        self.year = Some(year);
        self
    }

    pub fn with_hours(mut self, hours: u32) -> Self {
        self.hours = Some(hours);
        self
    }

    /// Sets the ALP grading basis, lower-cased. Letters are only checked
    /// when decoded by [`Course::grading_formats`].
    pub fn with_grade_basis(mut self, grade_basis: impl Into<Letters>) -> Self {
        self.grade_basis = Some(grade_basis.into().to_lowercase());
        self
    }

    pub fn with_sections(mut self, sections: Vec<Section>) -> Self {
        self.sections = sections;
        self
    }

    pub fn with_restrictions(mut self, restrictions: Value) -> Self {
        self.restrictions = Some(restrictions);
        self
    }

    pub fn with_prerequisites(mut self, prerequisites: Value) -> Self {
        self.prerequisites = Some(prerequisites);
        self
    }

    pub fn with_corequisites(mut self, corequisites: Value) -> Self {
        self.corequisites = Some(corequisites);
        self
    }

    /// Lower-cased school code, e.g. `"cs"`.
    pub fn school(&self) -> Option<&str> {
        self.school.as_deref()
    }

    pub fn number(&self) -> Option<u32> {
        self.number
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn semester(&self) -> Option<Semester> {
        self.semester
    }

    pub fn year(&self) -> Option<i32> {
        self.year
    }

    /// Credit hours.
    pub fn hours(&self) -> Option<u32> {
        self.hours
    }

    pub fn grade_basis(&self) -> Option<&Letters> {
        self.grade_basis.as_ref()
    }

    pub fn sections(&self) -> &[Section] {
        &self.sections
    }

    pub(crate) fn sections_mut(&mut self) -> &mut [Section] {
        &mut self.sections
    }

    pub fn restrictions(&self) -> Option<&Value> {
        self.restrictions.as_ref()
    }

    pub fn prerequisites(&self) -> Option<&Value> {
        self.prerequisites.as_ref()
    }

    pub fn corequisites(&self) -> Option<&Value> {
        self.corequisites.as_ref()
    }

    /// Display name such as `"CS 1332 - Data Structures and Algorithms"`.
    ///
    /// Missing parts are left out: `"CS 1332"`, `"CS - Data Structures and
    /// Algorithms"`, `"1332"`, or just the name. Returns `None` when school,
    /// number, and name are all absent.
    pub fn full_name(&self) -> Option<String> {
        let code = [
            self.school.as_ref().map(|s| s.to_uppercase()),
            self.number.map(|n| n.to_string()),
        ]
        .into_iter()
        .flatten()
        .collect::<Vec<_>>()
        .join(" ");

        match (code.is_empty(), self.name.as_deref()) {
            (true, None) => None,
            (true, Some(name)) => Some(name.to_string()),
            (false, None) => Some(code),
            (false, Some(name)) => Some(format!("{code} - {name}")),
        }
    }

    /// Human-readable grading bases, e.g. `["letter grade", "pass/fail"]` for
    /// `"lp"`. Empty when no grade basis was scraped.
    pub fn grading_formats(&self) -> Result<Vec<&'static str>> {
        match &self.grade_basis {
            Some(letters) => GRADING_BASIS.letters_to_names(letters),
            None => Ok(Vec::new()),
        }
    }

    /// The term as displayed, e.g. `"fall 2016"`.
    pub fn term(&self) -> Option<String> {
        Some(format!("{} {}", self.semester?, self.year?))
    }

    pub fn section_by_crn(&self, crn: u32) -> Option<&Section> {
        self.sections.iter().find(|s| s.crn() == crn)
    }

    /// Finds a section by its exact identifier; `"a1"` does not match `"A1"`.
    pub fn section_by_identifier(&self, identifier: &str) -> Option<&Section> {
        self.sections.iter().find(|s| s.identifier() == identifier)
    }
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|s| !s.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::Meeting;
    use crate::error::GrouchError;
    use serde_json::json;

    const NAME: &str = "Data Structures and Algorithms";

    #[test]
    fn test_full_name() {
        let course = Course::new(Some("CS"), Some(1332), Some(NAME));
        assert_eq!(
            course.full_name().as_deref(),
            Some("CS 1332 - Data Structures and Algorithms")
        );
    }

    #[test]
    fn test_full_name_with_missing_parts() {
        let cases = [
            (Some("CS"), Some(1332), None, Some("CS 1332")),
            (Some("CS"), None, Some(NAME), Some("CS - Data Structures and Algorithms")),
            (None, Some(1332), Some(NAME), Some("1332 - Data Structures and Algorithms")),
            (Some("cs"), None, None, Some("CS")),
            (None, Some(1332), None, Some("1332")),
            (None, None, Some(NAME), Some(NAME)),
            (None, None, None, None),
            (Some(""), None, Some(" "), None),
        ];

        for (school, number, name, expected) in cases {
            let course = Course::new(school, number, name);
            assert_eq!(course.full_name().as_deref(), expected);
        }
    }

    #[test]
    fn test_school_is_lowercased() {
        let course = Course::new(Some("CS"), Some(1332), Some(NAME));
        assert_eq!(course.school(), Some("cs"));
    }

    #[test]
    fn test_grading_formats() {
        let course = Course::new(Some("CS"), Some(1332), Some(NAME)).with_grade_basis("LP");
        assert_eq!(course.grade_basis(), Some(&Letters::from("lp")));
        assert_eq!(
            course.grading_formats().unwrap(),
            vec!["letter grade", "pass/fail"]
        );
    }

    #[test]
    fn test_grading_formats_without_basis_is_empty() {
        let course = Course::new(Some("CS"), Some(1332), Some(NAME));
        assert!(course.grading_formats().unwrap().is_empty());
    }

    #[test]
    fn test_grading_formats_rejects_unknown_letter() {
        let course = Course::default().with_grade_basis("lx");
        assert!(matches!(
            course.grading_formats(),
            Err(GrouchError::InvalidCode { .. })
        ));
    }

    #[test]
    fn test_term_and_section_lookup() {
        let meeting =
            Meeting::new("Monica Sweat", "mwf", "8:05am", "8:55am", "lecture", "CULC 102")
                .unwrap();
        let course = Course::new(Some("CS"), Some(1332), Some(NAME))
            .with_term(Semester::Fall, 2016)
            .with_hours(3)
            .with_sections(vec![Section::new(
                87201,
                "A1",
                vec!["Monica Sweat".to_string()],
                vec![meeting],
            )])
            .with_prerequisites(json!({"and": ["CS 1331"]}));

        assert_eq!(course.term().as_deref(), Some("fall 2016"));
        assert_eq!(course.hours(), Some(3));
        assert_eq!(course.section_by_crn(87201).map(|s| s.identifier()), Some("A1"));
        assert_eq!(
            course.section_by_identifier("A1").map(|s| s.crn()),
            Some(87201)
        );
        assert!(course.section_by_identifier("a1").is_none());
        assert!(course.section_by_crn(1).is_none());
        assert_eq!(course.prerequisites(), Some(&json!({"and": ["CS 1331"]})));
        assert!(course.corequisites().is_none());
    }
}
