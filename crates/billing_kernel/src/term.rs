//! Academic term identity
//!
//! A ledger account belongs to exactly one student in exactly one term, so
//! the pair `(StudentId, TermKey)` is the natural storage key for
//! collaborators. Term values are plain value objects: orderable, hashable,
//! and serializable.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Semester within a school year
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
pub enum Semester {
    /// First semester (June - October)
    First,
    /// Second semester (November - March)
    Second,
    /// Summer term (April - May)
    Summer,
}

impl Semester {
    /// Returns the short code used in printed assessments
    pub fn code(&self) -> &'static str {
        match self {
            Semester::First => "1st",
            Semester::Second => "2nd",
            Semester::Summer => "summer",
        }
    }
}

impl fmt::Display for Semester {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Semester::First => write!(f, "1st Semester"),
            Semester::Second => write!(f, "2nd Semester"),
            Semester::Summer => write!(f, "Summer"),
        }
    }
}

/// A school year identified by its starting calendar year
///
/// Displays as the conventional two-year span, e.g. `2024-2025`.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct SchoolYear(u16);

impl SchoolYear {
    pub fn new(start_year: u16) -> Self {
        Self(start_year)
    }

    /// The calendar year the school year starts in
    pub fn start_year(&self) -> u16 {
        self.0
    }

    /// The calendar year the school year ends in
    pub fn end_year(&self) -> u16 {
        self.0 + 1
    }
}

impl fmt::Display for SchoolYear {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.start_year(), self.end_year())
    }
}

/// Identity of one student-billing term: school year + semester
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
pub struct TermKey {
    pub school_year: SchoolYear,
    pub semester: Semester,
}

impl TermKey {
    pub fn new(school_year: SchoolYear, semester: Semester) -> Self {
        Self {
            school_year,
            semester,
        }
    }
}

impl fmt::Display for TermKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.semester, self.school_year)
    }
}
