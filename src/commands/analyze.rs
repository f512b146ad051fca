use std::path::PathBuf;

use anyhow::{Result, bail};
use tracing::info;

use crate::aggregate::{compute_cgpa, project_goal};
use crate::cli::AnalyzeArgs;
use crate::dedup::dedup_by_course_code;
use crate::model::{
    CourseRecord, ExclusionLogEntry, ResultStatus, SourceInfo, TranscriptReport,
};
use crate::pages;
use crate::transcript::{INITIAL_SECTION, LineParser, NO_GRADE_RESULTS, NON_FINAL_RESULTS};
use crate::util::{now_utc_string, sha256_file, write_json_pretty};

const UNIVERSITY: &str = "PolyU";
const GRADING_SCALE: &str = "4.3";

pub fn run(args: AnalyzeArgs) -> Result<()> {
    if !args.goal.is_finite() || !(0.0..=4.3).contains(&args.goal) {
        bail!("target CGPA must be between 0.00 and 4.30, got {}", args.goal);
    }
    if args.total_required_credits <= 0.0 {
        bail!(
            "total required credits must be positive, got {}",
            args.total_required_credits
        );
    }

    let (source_path, sha256, page_texts) = load_pages(&args)?;
    let lines = pages::normalize_lines(&page_texts);
    info!(
        source = %source_path.display(),
        pages = page_texts.len(),
        lines = lines.len(),
        "normalized transcript text"
    );

    let parser = LineParser::new()?;
    let records = collect_records(&parser, &lines);
    info!(course_rows = records.len(), "parsed course rows");

    let (mut kept, dedup_logs) = dedup_by_course_code(&records);
    let excluded_logs = build_exclusion_logs(&kept);
    info!(
        courses = kept.len(),
        dedup_dropped = dedup_logs.len(),
        excluded = excluded_logs.len(),
        "reconciled course records"
    );

    let summary = compute_cgpa(&kept);
    let goal_analysis = project_goal(
        summary.grade_points_sum,
        summary.total_credits_counted,
        args.total_required_credits,
        args.goal,
    );

    kept.sort_by(|a, b| {
        a.section
            .cmp(&b.section)
            .then_with(|| a.course_code.cmp(&b.course_code))
    });

    let report = TranscriptReport {
        university: UNIVERSITY.to_string(),
        grading_scale: GRADING_SCALE.to_string(),
        generated_at: now_utc_string(),
        source: SourceInfo {
            path: source_path.display().to_string(),
            sha256,
            pages: page_texts.len(),
            lines: lines.len(),
        },
        summary,
        goal_analysis,
        courses: kept,
        dedup_logs,
        excluded_logs,
    };

    write_json_pretty(&args.output, &report)?;
    info!(path = %args.output.display(), "wrote transcript report");
    info!(
        current_cgpa = ?report.summary.current_cgpa,
        credits_counted = report.summary.total_credits_counted,
        required_average = ?report.goal_analysis.required_average_gp,
        required_letter = report
            .goal_analysis
            .required_letter_equivalent
            .as_deref()
            .unwrap_or("-"),
        "analysis complete"
    );

    Ok(())
}

fn load_pages(args: &AnalyzeArgs) -> Result<(PathBuf, Option<String>, Vec<String>)> {
    if let Some(pdf_path) = &args.pdf {
        let page_texts = pages::extract_pdf_pages(pdf_path, args.max_pages)?;
        let sha256 = sha256_file(pdf_path)?;
        return Ok((pdf_path.clone(), Some(sha256), page_texts));
    }

    let Some(text_path) = &args.pages_text else {
        bail!("either --pdf or --pages-text must be provided");
    };
    let page_texts = pages::read_text_pages(text_path)?;
    Ok((text_path.clone(), None, page_texts))
}

/// Single forward pass: each line first updates the section context, then is
/// offered to the course parser under that section.
fn collect_records(parser: &LineParser, lines: &[String]) -> Vec<CourseRecord> {
    let mut section = INITIAL_SECTION.to_string();
    let mut records = Vec::new();

    for line in lines {
        section = parser.next_section(line, &section);
        if let Some(record) = parser.parse_course(line, &section) {
            records.push(record);
        }
    }

    records
}

// Reasons come from the raw result token, not the resolved status, so an
// unrecognized token reports as missing_or_unknown_result.
fn build_exclusion_logs(records: &[CourseRecord]) -> Vec<ExclusionLogEntry> {
    records
        .iter()
        .filter(|record| record.status != ResultStatus::Included)
        .map(|record| ExclusionLogEntry {
            course_code: record.course_code.clone(),
            result: record.result.clone(),
            section: record.section.clone(),
            reason: exclusion_reason(&record.result).to_string(),
        })
        .collect()
}

fn exclusion_reason(result: &str) -> &'static str {
    if NON_FINAL_RESULTS.contains(&result) {
        "result_non_final"
    } else if NO_GRADE_RESULTS.contains(&result) {
        "result_no_grade"
    } else {
        "missing_or_unknown_result"
    }
}
