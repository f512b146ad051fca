use crate::model::{CgpaSummary, CourseRecord, GoalAnalysis, ResultStatus};
use crate::util::round_to;

// Scanned in listed order; the first band at minimal distance wins.
const GOAL_BANDS: [(&str, f64); 8] = [
    ("A+", 4.3),
    ("A", 4.0),
    ("A-", 3.7),
    ("B+", 3.3),
    ("B", 3.0),
    ("B-", 2.7),
    ("C+", 2.3),
    ("C", 2.0),
];

/// Credit-weighted average over the included records. `current_cgpa` is absent
/// when nothing counts toward the average; the division never runs on zero.
pub fn compute_cgpa(records: &[CourseRecord]) -> CgpaSummary {
    let mut total_credits = 0.0_f64;
    let mut total_gp = 0.0_f64;

    for record in records {
        if record.status != ResultStatus::Included {
            continue;
        }
        let Some(point) = record.grade_point else {
            continue;
        };
        total_credits += record.credits;
        total_gp += record.credits * point;
    }

    let cgpa = if total_credits > 0.0 {
        Some(total_gp / total_credits)
    } else {
        None
    };

    CgpaSummary {
        current_cgpa: cgpa.map(|value| round_to(value, 3)),
        total_credits_counted: round_to(total_credits, 1),
        grade_points_sum: round_to(total_gp, 3),
    }
}

/// Average grade point needed on the remaining credits to land on the goal.
/// Absent once no credits remain. The letter label is a nearest-band
/// approximation, never clamped into the table's range.
pub fn project_goal(
    current_gp_sum: f64,
    current_credits: f64,
    total_required_credits: f64,
    goal_cgpa: f64,
) -> GoalAnalysis {
    let remaining = total_required_credits - current_credits;
    let needed_total_gp = total_required_credits * goal_cgpa;
    let needed_from_remaining = needed_total_gp - current_gp_sum;

    let required_avg = if remaining > 0.0 {
        Some(needed_from_remaining / remaining)
    } else {
        None
    };

    GoalAnalysis {
        goal_cgpa,
        total_required_credits,
        remaining_credits: round_to(remaining, 1),
        required_average_gp: required_avg.map(|value| round_to(value, 3)),
        required_letter_equivalent: required_avg.map(nearest_band_label),
    }
}

fn nearest_band_label(required_avg: f64) -> String {
    let mut best = &GOAL_BANDS[0];
    for band in &GOAL_BANDS[1..] {
        if (band.1 - required_avg).abs() < (best.1 - required_avg).abs() {
            best = band;
        }
    }
    format!("~{}", best.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn included(credits: f64, grade_point: f64) -> CourseRecord {
        CourseRecord {
            course_code: "COMP1234".to_string(),
            course_title: String::new(),
            credits,
            result: "A".to_string(),
            year_sem: String::new(),
            duplicate: false,
            section: "GUR".to_string(),
            status: ResultStatus::Included,
            grade_point: Some(grade_point),
        }
    }

    fn excluded(credits: f64) -> CourseRecord {
        CourseRecord {
            course_code: "AMA1100".to_string(),
            course_title: String::new(),
            credits,
            result: "R".to_string(),
            year_sem: String::new(),
            duplicate: false,
            section: "GUR".to_string(),
            status: ResultStatus::Excluded,
            grade_point: None,
        }
    }

    #[test]
    fn compute_cgpa_weights_by_credits_over_included_subset() {
        let records = vec![included(3.0, 4.0), included(2.0, 3.0), excluded(3.0)];
        let summary = compute_cgpa(&records);

        // (3*4 + 2*3) / 5 = 3.6
        assert_eq!(summary.current_cgpa, Some(3.6));
        assert_eq!(summary.total_credits_counted, 5.0);
        assert_eq!(summary.grade_points_sum, 18.0);
    }

    #[test]
    fn compute_cgpa_of_empty_or_excluded_input_has_no_value() {
        let summary = compute_cgpa(&[]);
        assert_eq!(summary.current_cgpa, None);
        assert_eq!(summary.total_credits_counted, 0.0);
        assert_eq!(summary.grade_points_sum, 0.0);

        let summary = compute_cgpa(&[excluded(3.0), excluded(6.0)]);
        assert_eq!(summary.current_cgpa, None);
        assert_eq!(summary.total_credits_counted, 0.0);
    }

    #[test]
    fn project_goal_reference_scenario() {
        let goal = project_goal(30.0, 10.0, 109.0, 3.5);

        assert_eq!(goal.remaining_credits, 99.0);
        // needed_total_gp = 381.5, needed_from_remaining = 351.5
        assert_eq!(goal.required_average_gp, Some(3.551));
        assert_eq!(goal.required_letter_equivalent.as_deref(), Some("~A-"));
    }

    #[test]
    fn project_goal_at_current_average_requires_current_average() {
        // current average 3.2 over 40 credits, goal equals current
        let goal = project_goal(128.0, 40.0, 109.0, 3.2);

        let required = goal.required_average_gp.expect("credits remain");
        assert!((required - 3.2).abs() < 1e-9);
    }

    #[test]
    fn project_goal_with_no_remaining_credits_has_no_value() {
        let goal = project_goal(400.0, 109.0, 109.0, 3.5);
        assert_eq!(goal.required_average_gp, None);
        assert_eq!(goal.required_letter_equivalent, None);
        assert_eq!(goal.remaining_credits, 0.0);

        let over = project_goal(450.0, 120.0, 109.0, 3.5);
        assert_eq!(over.required_average_gp, None);
        assert_eq!(over.remaining_credits, -11.0);
    }

    #[test]
    fn nearest_band_label_ties_take_the_earlier_band() {
        // 4.15 is equidistant from A+ (4.3) and A (4.0).
        assert_eq!(nearest_band_label(4.15), "~A+");
        // 3.5 is equidistant from A- (3.7) and B+ (3.3).
        assert_eq!(nearest_band_label(3.5), "~A-");
    }

    #[test]
    fn nearest_band_label_does_not_clamp_out_of_range_values() {
        assert_eq!(nearest_band_label(5.2), "~A+");
        assert_eq!(nearest_band_label(0.4), "~C");
        assert_eq!(nearest_band_label(-1.0), "~C");
    }
}
