use std::collections::HashMap;

use crate::model::{CourseRecord, DedupLogEntry, ResultStatus};

pub const REASON_REPLACED: &str = "dedup_replaced_with_higher_priority_record";
pub const REASON_DROPPED: &str = "dedup_dropped_lower_priority_record";

// Primary key: graded beats non-final beats unknown. Secondary: a record that
// names its term beats one that does not. Ties keep the earlier-seen record.
fn priority(record: &CourseRecord) -> (u8, u8) {
    let status_rank = match record.status {
        ResultStatus::Included => 2,
        ResultStatus::Excluded => 1,
        ResultStatus::Unknown => 0,
    };
    let term_rank = u8::from(!record.year_sem.is_empty());
    (status_rank, term_rank)
}

/// Collapses retake and re-parsed rows to one record per course code with a
/// stable left-to-right fold. Every non-kept record lands in the audit log.
pub fn dedup_by_course_code(records: &[CourseRecord]) -> (Vec<CourseRecord>, Vec<DedupLogEntry>) {
    let mut kept: Vec<CourseRecord> = Vec::new();
    let mut slot_by_code: HashMap<String, usize> = HashMap::new();
    let mut logs = Vec::new();

    for record in records {
        let Some(&slot) = slot_by_code.get(&record.course_code) else {
            slot_by_code.insert(record.course_code.clone(), kept.len());
            kept.push(record.clone());
            continue;
        };

        let current = &kept[slot];
        if priority(record) > priority(current) {
            logs.push(DedupLogEntry {
                course_code: current.course_code.clone(),
                dropped_section: current.section.clone(),
                kept_section: record.section.clone(),
                reason: REASON_REPLACED.to_string(),
            });
            kept[slot] = record.clone();
        } else {
            logs.push(DedupLogEntry {
                course_code: record.course_code.clone(),
                dropped_section: record.section.clone(),
                kept_section: current.section.clone(),
                reason: REASON_DROPPED.to_string(),
            });
        }
    }

    (kept, logs)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(code: &str, section: &str, result: &str, year_sem: &str) -> CourseRecord {
        let (status, grade_point) = crate::transcript::classify_result(result);
        CourseRecord {
            course_code: code.to_string(),
            course_title: String::new(),
            credits: 3.0,
            result: result.to_string(),
            year_sem: year_sem.to_string(),
            duplicate: false,
            section: section.to_string(),
            status,
            grade_point,
        }
    }

    #[test]
    fn included_record_wins_regardless_of_order() {
        let unknown = record("APSS1BN04", "GUR", "", "");
        let graded = record("APSS1BN04", "Service Learning", "B", "2023/2");

        let (kept, logs) = dedup_by_course_code(&[unknown.clone(), graded.clone()]);
        assert_eq!(kept.len(), 1);
        assert_eq!(kept[0].status, ResultStatus::Included);
        assert_eq!(logs.len(), 1);
        assert_eq!(logs[0].reason, REASON_REPLACED);
        assert_eq!(logs[0].dropped_section, "GUR");
        assert_eq!(logs[0].kept_section, "Service Learning");

        let (kept, logs) = dedup_by_course_code(&[graded, unknown]);
        assert_eq!(kept.len(), 1);
        assert_eq!(kept[0].status, ResultStatus::Included);
        assert_eq!(logs.len(), 1);
        assert_eq!(logs[0].reason, REASON_DROPPED);
        assert_eq!(logs[0].dropped_section, "GUR");
        assert_eq!(logs[0].kept_section, "Service Learning");
    }

    #[test]
    fn term_presence_breaks_status_ties() {
        let without_term = record("AMA1100", "GUR", "R", "");
        let with_term = record("AMA1100", "GUR", "W", "2024/1");

        let (kept, _) = dedup_by_course_code(&[without_term, with_term]);
        assert_eq!(kept[0].result, "W");
        assert_eq!(kept[0].year_sem, "2024/1");
    }

    #[test]
    fn equal_priority_keeps_earlier_record() {
        let first = record("COMP1234", "GUR", "A-", "2023/1");
        let second = record("COMP1234", "Major/DSR - Compulsory", "B+", "2023/2");

        let (kept, logs) = dedup_by_course_code(&[first, second]);
        assert_eq!(kept[0].result, "A-");
        assert_eq!(kept[0].section, "GUR");
        assert_eq!(logs[0].reason, REASON_DROPPED);
    }

    #[test]
    fn kept_plus_logged_accounts_for_every_input_record() {
        let records = vec![
            record("COMP1234", "GUR", "A-", "2023/1"),
            record("AMA1100", "GUR", "R", ""),
            record("COMP1234", "GUR", "", ""),
            record("AMA1100", "LCR", "B", "2024/1"),
            record("ELC1011", "LCR-English", "B+", "2022/2"),
        ];

        let (kept, logs) = dedup_by_course_code(&records);
        assert_eq!(kept.len(), 3);
        assert_eq!(kept.len() + logs.len(), records.len());

        // Re-running over the same input is byte-for-byte deterministic.
        let (kept_again, logs_again) = dedup_by_course_code(&records);
        assert_eq!(kept, kept_again);
        assert_eq!(
            logs.iter().map(|entry| &entry.course_code).collect::<Vec<_>>(),
            logs_again.iter().map(|entry| &entry.course_code).collect::<Vec<_>>()
        );
    }

    #[test]
    fn kept_order_follows_first_appearance() {
        let records = vec![
            record("ZZZ1000", "GUR", "", ""),
            record("AAA1000", "GUR", "A", "2023/1"),
            record("ZZZ1000", "LCR", "B", "2023/2"),
        ];

        let (kept, _) = dedup_by_course_code(&records);
        let codes: Vec<&str> = kept.iter().map(|record| record.course_code.as_str()).collect();
        assert_eq!(codes, vec!["ZZZ1000", "AAA1000"]);
        // Replacement lands in the original slot, with the stronger record.
        assert_eq!(kept[0].result, "B");
    }
}
