use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResultStatus {
    Included,
    Excluded,
    Unknown,
}

/// One parsed transcript row. Built once by the line parser, never mutated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CourseRecord {
    pub course_code: String,
    pub course_title: String,
    pub credits: f64,
    pub result: String,
    pub year_sem: String,
    pub duplicate: bool,
    pub section: String,
    pub status: ResultStatus,
    pub grade_point: Option<f64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SourceInfo {
    pub path: String,
    pub sha256: Option<String>,
    pub pages: usize,
    pub lines: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CgpaSummary {
    pub current_cgpa: Option<f64>,
    pub total_credits_counted: f64,
    pub grade_points_sum: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GoalAnalysis {
    pub goal_cgpa: f64,
    pub total_required_credits: f64,
    pub remaining_credits: f64,
    pub required_average_gp: Option<f64>,
    pub required_letter_equivalent: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DedupLogEntry {
    pub course_code: String,
    pub dropped_section: String,
    pub kept_section: String,
    pub reason: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExclusionLogEntry {
    pub course_code: String,
    pub result: String,
    pub section: String,
    pub reason: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TranscriptReport {
    pub university: String,
    pub grading_scale: String,
    pub generated_at: String,
    pub source: SourceInfo,
    pub summary: CgpaSummary,
    pub goal_analysis: GoalAnalysis,
    pub courses: Vec<CourseRecord>,
    pub dedup_logs: Vec<DedupLogEntry>,
    pub excluded_logs: Vec<ExclusionLogEntry>,
}
