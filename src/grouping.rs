use std::collections::{BTreeMap, HashMap};

use serde::Serialize;

use crate::models::{DetailItem, OverallAssessment, Reason, ReportingPeriod, SchoolClass, Student};

pub const WATCHLIST_SIZE: usize = 5;

#[derive(Debug, Clone, Serialize)]
pub struct ClassGroup {
    pub class: SchoolClass,
    pub items: Vec<DetailItem>,
}

#[derive(Debug, Clone, Serialize)]
pub struct GradeGroup {
    pub grade: u32,
    pub classes: Vec<ClassGroup>,
}

impl GradeGroup {
    pub fn item_count(&self) -> usize {
        self.classes.iter().map(|c| c.items.len()).sum()
    }
}

/// Nests detail items as grade -> class -> items.
///
/// Grades come out in ascending order, classes in the order they were first
/// met. Items whose class id does not resolve are dropped.
pub fn group_by_grade_class(items: Vec<DetailItem>, classes: &[SchoolClass]) -> Vec<GradeGroup> {
    let lookup: HashMap<&str, &SchoolClass> = classes.iter().map(|c| (c.id.as_str(), c)).collect();
    let mut grades: BTreeMap<u32, Vec<ClassGroup>> = BTreeMap::new();
    let mut dropped = 0usize;

    for item in items {
        let Some(class) = lookup.get(item.student.class_id.as_str()) else {
            tracing::debug!(
                student = item.student.id,
                class_id = %item.student.class_id,
                "dropping detail item with unknown class"
            );
            dropped += 1;
            continue;
        };

        let groups = grades.entry(class.grade).or_default();
        match groups.iter_mut().find(|g| g.class.id == class.id) {
            Some(group) => group.items.push(item),
            None => groups.push(ClassGroup {
                class: (*class).clone(),
                items: vec![item],
            }),
        }
    }

    if dropped > 0 {
        tracing::debug!(dropped, "detail items without a resolvable class");
    }

    grades
        .into_iter()
        .map(|(grade, classes)| GradeGroup { grade, classes })
        .collect()
}

/// Students highlighted beside the class table.
#[derive(Debug, Clone, Serialize)]
pub struct Watchlist {
    /// Only filled at the end of a term.
    pub top_performers: Vec<Student>,
    pub needs_attention: Vec<DetailItem>,
}

pub fn watchlist(students: &[Student], period: ReportingPeriod) -> Watchlist {
    let top_performers = if period.is_end_term() {
        students
            .iter()
            .filter(|s| s.overall == OverallAssessment::Excellent)
            .take(WATCHLIST_SIZE)
            .cloned()
            .collect()
    } else {
        Vec::new()
    };

    let needs_attention = students
        .iter()
        .filter(|s| s.needs_support())
        .take(WATCHLIST_SIZE)
        .map(|s| DetailItem {
            student: s.clone(),
            reason: Reason::Summary(s.needs_support_subjects().join(", ")),
        })
        .collect();

    Watchlist {
        top_performers,
        needs_attention,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Assessment, AssessmentLevel};

    fn class(id: &str, grade: u32) -> SchoolClass {
        SchoolClass {
            id: id.to_string(),
            name: format!("Lớp {}", id.to_uppercase()),
            teacher_id: "gv01".to_string(),
            grade,
        }
    }

    fn student(id: u32, class_id: &str, weak: Option<&str>, overall: OverallAssessment) -> Student {
        let mut assessments = vec![Assessment {
            subject: "Tiếng Việt".to_string(),
            level: AssessmentLevel::Good,
            score: None,
        }];
        if let Some(subject) = weak {
            assessments.push(Assessment {
                subject: subject.to_string(),
                level: AssessmentLevel::NeedsSupport,
                score: None,
            });
        }
        Student {
            id,
            name: format!("Học sinh {id}"),
            class_id: class_id.to_string(),
            assessments,
            overall,
        }
    }

    fn item(id: u32, class_id: &str) -> DetailItem {
        DetailItem {
            student: student(id, class_id, Some("Toán"), OverallAssessment::NeedsSupport),
            reason: Reason::Subjects(vec!["Toán".to_string()]),
        }
    }

    #[test]
    fn groups_by_grade_then_class() {
        let classes = vec![class("7a1", 7), class("5a2", 5), class("5a1", 5)];
        let items = vec![item(1, "7a1"), item(2, "5a2"), item(3, "5a1"), item(4, "5a2")];

        let grouped = group_by_grade_class(items, &classes);
        let grades: Vec<u32> = grouped.iter().map(|g| g.grade).collect();
        assert_eq!(grades, vec![5, 7]);

        let fifth: Vec<&str> = grouped[0].classes.iter().map(|c| c.class.id.as_str()).collect();
        assert_eq!(fifth, vec!["5a2", "5a1"]);
        assert_eq!(grouped[0].classes[0].items.len(), 2);
        assert_eq!(grouped[0].item_count(), 3);
        assert_eq!(grouped[1].item_count(), 1);
    }

    #[test]
    fn unresolved_class_is_dropped() {
        let classes = vec![class("5a1", 5)];
        let items = vec![item(1, "5a1"), item(2, "9z9")];
        let grouped = group_by_grade_class(items, &classes);
        assert_eq!(grouped.len(), 1);
        assert_eq!(grouped[0].item_count(), 1);
        assert_eq!(grouped[0].classes[0].items[0].student.id, 1);
    }

    #[test]
    fn reasons_survive_grouping() {
        let classes = vec![class("5a1", 5)];
        let items = vec![DetailItem {
            student: student(1, "5a1", None, OverallAssessment::NeedsSupport),
            reason: Reason::Summary("Đánh giá cuối kỳ: Chưa hoàn thành".to_string()),
        }];
        let grouped = group_by_grade_class(items, &classes);
        assert_eq!(
            grouped[0].classes[0].items[0].reason,
            Reason::Summary("Đánh giá cuối kỳ: Chưa hoàn thành".to_string())
        );
    }

    #[test]
    fn empty_input_yields_no_groups() {
        assert!(group_by_grade_class(Vec::new(), &[class("5a1", 5)]).is_empty());
    }

    #[test]
    fn watchlist_caps_lists_and_skips_top_performers_mid_term() {
        let mut students: Vec<Student> = (1..=7)
            .map(|id| student(id, "5a1", None, OverallAssessment::Excellent))
            .collect();
        students.extend((8..=14).map(|id| student(id, "5a1", Some("Toán"), OverallAssessment::NeedsSupport)));

        let end = watchlist(&students, ReportingPeriod::EndYear);
        assert_eq!(end.top_performers.len(), 5);
        assert_eq!(end.top_performers[0].id, 1);
        assert_eq!(end.needs_attention.len(), 5);
        assert_eq!(end.needs_attention[0].student.id, 8);
        assert_eq!(end.needs_attention[0].reason, Reason::Summary("Toán".to_string()));

        let mid = watchlist(&students, ReportingPeriod::MidTerm1);
        assert!(mid.top_performers.is_empty());
        assert_eq!(mid.needs_attention.len(), 5);
    }
}
