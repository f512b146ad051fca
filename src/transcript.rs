use anyhow::{Context, Result};
use regex::Regex;

use crate::model::{CourseRecord, ResultStatus};

// PolyU 4.3-scale letter grades.
pub const GRADE_TO_POINT: [(&str, f64); 11] = [
    ("A+", 4.3),
    ("A", 4.0),
    ("A-", 3.7),
    ("B+", 3.3),
    ("B", 3.0),
    ("B-", 2.7),
    ("C+", 2.3),
    ("C", 2.0),
    ("D+", 1.3),
    ("D", 1.0),
    ("F", 0.0),
];

// R = registered, # = assessment pending, W = withdrawal.
pub const NON_FINAL_RESULTS: [&str; 3] = ["R", "#", "W"];
// RC = credit transfer without grade.
pub const NO_GRADE_RESULTS: [&str; 1] = ["RC"];

pub const INITIAL_SECTION: &str = "UNKNOWN";

pub fn grade_point_for(result: &str) -> Option<f64> {
    GRADE_TO_POINT
        .iter()
        .find(|(grade, _)| *grade == result)
        .map(|(_, point)| *point)
}

/// Maps a raw result token to a status and, for letter grades, a grade point.
/// Tokens outside the known vocabulary classify as `Unknown`, never as an
/// error.
pub fn classify_result(result: &str) -> (ResultStatus, Option<f64>) {
    if result.is_empty() {
        return (ResultStatus::Unknown, None);
    }

    if let Some(point) = grade_point_for(result) {
        return (ResultStatus::Included, Some(point));
    }

    if NON_FINAL_RESULTS.contains(&result) || NO_GRADE_RESULTS.contains(&result) {
        return (ResultStatus::Excluded, None);
    }

    (ResultStatus::Unknown, None)
}

pub struct LineParser {
    course_code: Regex,
    credits: Regex,
    year_sem: Regex,
    section_prefix: Regex,
}

impl LineParser {
    pub fn new() -> Result<Self> {
        Ok(Self {
            // e.g. COMP1000, AMA1100, APSS2504, COMP1001A
            course_code: Regex::new(r"^[A-Za-z]{2,5}[A-Za-z0-9]{0,4}\d{3,5}[A-Za-z0-9]{0,3}$")
                .context("failed to compile course-code regex")?,
            credits: Regex::new(r"^\d+\.\d$").context("failed to compile credits regex")?,
            year_sem: Regex::new(r"^\d{4}/[12]$").context("failed to compile term regex")?,
            section_prefix: Regex::new(
                r"^\d+/\d+\s+(?P<label>Compulsory|COMP Elective|Free elective|WIE)\b",
            )
            .context("failed to compile section-prefix regex")?,
        })
    }

    /// Section header state machine: one pass, no lookahead, first rule wins.
    /// Non-header lines leave the current section untouched.
    pub fn next_section(&self, line: &str, current: &str) -> String {
        if line == "Major/DSR" {
            return "Major/DSR".to_string();
        }

        if let Some(captures) = self.section_prefix.captures(line) {
            let label = &captures["label"];
            // "<n>/<m> Compulsory" headers nest under a Major/DSR block.
            if current.contains("Major/DSR") {
                let head = current.split(" - ").next().unwrap_or(current);
                return format!("{head} - {label}");
            }
            return label.to_string();
        }

        if line == "GUR" || line == "LCR" {
            return line.to_string();
        }
        if line.contains("(Service Learning)") {
            return "Service Learning".to_string();
        }
        if line.contains("(LIPD)") {
            return "LIPD".to_string();
        }
        if line.contains("(LCR-Chinese)") {
            return "LCR-Chinese".to_string();
        }
        if line.contains("(LCR-English)") {
            return "LCR-English".to_string();
        }

        current.to_string()
    }

    /// Parses one normalized line as a course row, or `None` for anything that
    /// does not look like one (headers, continuations, elective lists).
    ///
    /// Expected token layout:
    ///   CODE <TITLE...> <CREDITS> [RESULT] [YEAR/SEM] [Y]
    pub fn parse_course(&self, line: &str, section: &str) -> Option<CourseRecord> {
        let tokens: Vec<&str> = line.split_whitespace().collect();
        let code = *tokens.first()?;
        if !self.course_code.is_match(code) {
            return None;
        }

        // First one-decimal numeric token after the code is the credits column.
        let credit_idx = tokens
            .iter()
            .skip(1)
            .position(|token| self.credits.is_match(token))
            .map(|offset| offset + 1)?;

        let title = tokens[1..credit_idx].join(" ");
        let credits: f64 = tokens[credit_idx].parse().ok()?;

        // Trailing tokens are positional, not semantic: strip the retake
        // marker first, then the term, then whatever is left is the result.
        let mut rest = &tokens[credit_idx + 1..];

        let mut duplicate = false;
        if rest.last() == Some(&"Y") {
            duplicate = true;
            rest = &rest[..rest.len() - 1];
        }

        let mut year_sem = "";
        if let Some(&last) = rest.last() {
            if self.year_sem.is_match(last) {
                year_sem = last;
                rest = &rest[..rest.len() - 1];
            }
        }

        let result = rest.first().copied().unwrap_or("");
        let (status, grade_point) = classify_result(result);

        Some(CourseRecord {
            course_code: code.to_string(),
            course_title: title,
            credits,
            result: result.to_string(),
            year_sem: year_sem.to_string(),
            duplicate,
            section: section.to_string(),
            status,
            grade_point,
        })
    }
}
