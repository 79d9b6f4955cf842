//! Seat availability evaluation.

use crate::models::{ScheduleSnapshot, Section};

/// A section with seats open for subscribers of its course.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SeatOpening {
    pub section: Section,

    /// capacity - enrolled; negative means over-enrolled and is reported as-is
    pub available: i64,
}

impl SeatOpening {
    /// Render notification text using a placeholder template.
    ///
    /// Supported placeholders:
    /// - `{title}`, `{course_code}`, `{seats}`, `{crn}`
    /// - `{instructor}`, `{room}`, `{start}`, `{end}`, `{weekday}`
    pub fn format(&self, template: &str) -> String {
        template
            .replace("{title}", &self.section.title)
            .replace("{course_code}", &self.section.course_code)
            .replace("{seats}", &self.available.to_string())
            .replace("{crn}", &self.section.section_reference.to_string())
            .replace("{instructor}", &self.section.instructor)
            .replace("{room}", &self.section.room)
            .replace("{start}", &self.section.start_time)
            .replace("{end}", &self.section.end_time)
            .replace("{weekday}", &self.section.weekday)
    }
}

/// Find sections of `course_code` with seats open.
///
/// Reports current availability for this cycle, not a transition into
/// availability: a section qualifies iff its code matches exactly
/// (case-sensitive) and enrolled differs from capacity.
pub fn find_openings(snapshot: &ScheduleSnapshot, course_code: &str) -> Vec<SeatOpening> {
    snapshot
        .sections
        .iter()
        .filter(|section| {
            section.course_code == course_code && section.enrolled != section.capacity
        })
        .map(|section| SeatOpening {
            available: i64::from(section.capacity) - i64::from(section.enrolled),
            section: section.clone(),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn section(course_code: &str, capacity: u32, enrolled: u32) -> Section {
        Section {
            course_code: course_code.to_string(),
            branch_id: 26,
            section_reference: 21534,
            title: "Matematik I".to_string(),
            instructor: "A. Hoca".to_string(),
            room: "D-201".to_string(),
            weekday: "Pazartesi".to_string(),
            start_time: "08:30".to_string(),
            end_time: "10:30".to_string(),
            capacity,
            enrolled,
            ..Section::default()
        }
    }

    fn snapshot(sections: Vec<Section>) -> ScheduleSnapshot {
        ScheduleSnapshot::new(sections, "12:00")
    }

    #[test]
    fn full_section_does_not_qualify() {
        let snap = snapshot(vec![section("MAT 101", 30, 30)]);
        assert!(find_openings(&snap, "MAT 101").is_empty());
    }

    #[test]
    fn open_section_qualifies_with_seat_count() {
        let snap = snapshot(vec![section("MAT 101", 30, 29)]);
        let openings = find_openings(&snap, "MAT 101");
        assert_eq!(openings.len(), 1);
        assert_eq!(openings[0].available, 1);
    }

    #[test]
    fn over_enrolled_section_reports_negative_availability() {
        let snap = snapshot(vec![section("MAT 101", 30, 35)]);
        let openings = find_openings(&snap, "MAT 101");
        assert_eq!(openings.len(), 1);
        assert_eq!(openings[0].available, -5);
    }

    #[test]
    fn match_is_exact_and_case_sensitive() {
        let snap = snapshot(vec![section("MAT 101", 30, 10)]);
        assert!(find_openings(&snap, "mat 101").is_empty());
        assert!(find_openings(&snap, "MAT 101E").is_empty());
        assert!(find_openings(&snap, "MAT 10").is_empty());
    }

    #[test]
    fn other_courses_are_ignored() {
        let snap = snapshot(vec![
            section("MAT 101", 30, 10),
            section("FIZ 102", 40, 20),
        ]);
        let openings = find_openings(&snap, "MAT 101");
        assert_eq!(openings.len(), 1);
        assert_eq!(openings[0].section.course_code, "MAT 101");
    }

    #[test]
    fn format_substitutes_placeholders() {
        let snap = snapshot(vec![section("MAT 101", 30, 29)]);
        let opening = &find_openings(&snap, "MAT 101")[0];
        let text = opening.format("{course_code}: {seats} seats ({crn}, {start}-{end})");
        assert_eq!(text, "MAT 101: 1 seats (21534, 08:30-10:30)");
    }
}
