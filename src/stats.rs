//! The stats module guesses a few well-known figures from free page text.
//!
//! Every rule is an independent regex; a rule that does not match leaves its key out.
//! Results are guesses and may be wrong.

use std::collections::BTreeMap;
use std::fmt;

use once_cell::sync::Lazy;
use regex::{Captures, Regex};

/// Statistic names a page can contribute.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
pub enum Stat {
    UndergradStudents,
    StudentFacultyRatio,
    AvgClassSize,
    GradStudents,
}

impl Stat {
    pub fn key(self) -> &'static str {
        match self {
            Stat::UndergradStudents => "undergrad_students_guess",
            Stat::StudentFacultyRatio => "student_faculty_ratio_guess",
            Stat::AvgClassSize => "avg_class_size_guess",
            Stat::GradStudents => "grad_students_guess",
        }
    }
}

impl fmt::Display for Stat {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str(self.key())
    }
}

pub type Stats = BTreeMap<Stat, String>;

struct StatRule {
    stat: Stat,
    pattern: Regex,
    normalize: fn(&Captures<'_>) -> Option<String>,
}

impl StatRule {
    fn new(stat: Stat, pattern: &str, normalize: fn(&Captures<'_>) -> Option<String>) -> Self {
        Self {
            stat,
            pattern: Regex::new(pattern).expect("Failed to compile statistic regex"),
            normalize,
        }
    }
}

fn headcount(captures: &Captures<'_>) -> Option<String> {
    captures.get(1).map(|m| m.as_str().replace(',', ""))
}

fn ratio(captures: &Captures<'_>) -> Option<String> {
    let students = captures.get(1)?.as_str();
    let faculty = captures.get(2)?.as_str();
    Some(format!("{students}:{faculty}"))
}

fn first_group(captures: &Captures<'_>) -> Option<String> {
    captures.get(1).map(|m| m.as_str().to_string())
}

static STAT_RULES: Lazy<Vec<StatRule>> = Lazy::new(|| {
    vec![
        StatRule::new(
            Stat::UndergradStudents,
            r"(?i)\b(\d{1,2},\d{3}|\d{3,5})\s+(?:undergraduate\s+students|undergraduates|students)\b",
            headcount,
        ),
        StatRule::new(
            Stat::StudentFacultyRatio,
            r"(?i)\b(\d{1,2})\s*(?::|to)\s*(\d{1,2})\s+student[\s/-]*(?:to[\s/-]*)?faculty\s+ratio",
            ratio,
        ),
        StatRule::new(
            Stat::AvgClassSize,
            r"(?i)\b(?:average|avg\.?)\s+class\s+size\s*(?:of|is|:)?\s*(?:about|approximately)?\s*(\d{1,2})\b",
            first_group,
        ),
        StatRule::new(
            Stat::GradStudents,
            r"(?i)\b(\d{1,2},\d{3}|\d{2,5})\s+(?:graduate\s+students|graduate\s+enrollment)\b",
            headcount,
        ),
    ]
});

/// Applies every statistic rule to `text` and collects the first match of each.
pub fn extract_stats(text: &str) -> Stats {
    STAT_RULES
        .iter()
        .filter_map(|rule| {
            let captures = rule.pattern.captures(text)?;
            (rule.normalize)(&captures).map(|value| (rule.stat, value))
        })
        .collect()
}
