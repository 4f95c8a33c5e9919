use std::cmp::Ordering;

use serde::Serialize;

use crate::metrics::completion_rate;
use crate::models::{
    ClassActivity, Criterion, MetricKind, StudentLmsStat, SubjectStat, TeacherLmsStat,
};

/// Two rates no further apart than this count as a tie.
pub const RATE_EPSILON: f64 = 0.001;

/// An entity that can sit on a material/test leaderboard.
pub trait Scored {
    fn display_name(&self) -> &str;
    fn created(&self, kind: MetricKind) -> u32;
    fn assigned(&self, kind: MetricKind) -> u32;
    fn completed(&self, kind: MetricKind) -> u32;

    fn chart_label(&self) -> String {
        self.display_name().to_string()
    }

    /// Rate compared when ranking: the completed fraction in `[0, 1]`.
    fn rate(&self, kind: MetricKind) -> f64 {
        let assigned = self.assigned(kind);
        if assigned == 0 {
            return 0.0;
        }
        f64::from(self.completed(kind)) / f64::from(assigned)
    }

    /// Rate as shown in tables and exports: integer percent.
    fn display_rate(&self, kind: MetricKind) -> u32 {
        completion_rate(self.completed(kind), self.assigned(kind))
    }
}

impl Scored for SubjectStat {
    fn display_name(&self) -> &str {
        &self.name
    }

    fn created(&self, kind: MetricKind) -> u32 {
        match kind {
            MetricKind::Material => self.lectures_created,
            MetricKind::Test => self.tests_created,
        }
    }

    fn assigned(&self, kind: MetricKind) -> u32 {
        match kind {
            MetricKind::Material => self.materials_assigned,
            MetricKind::Test => self.assigned_tests,
        }
    }

    fn completed(&self, kind: MetricKind) -> u32 {
        match kind {
            MetricKind::Material => self.completed_materials,
            MetricKind::Test => self.completed_tests,
        }
    }

    // Subjects rank on their stored integer percentages.
    fn rate(&self, kind: MetricKind) -> f64 {
        f64::from(self.display_rate(kind))
    }

    fn display_rate(&self, kind: MetricKind) -> u32 {
        match kind {
            MetricKind::Material => self.completion_rate,
            MetricKind::Test => self.test_completion_rate,
        }
    }
}

impl Scored for TeacherLmsStat {
    fn display_name(&self) -> &str {
        &self.name
    }

    fn chart_label(&self) -> String {
        format!("{} ({} - {})", self.name, self.subject, self.assigned_grade)
    }

    fn created(&self, kind: MetricKind) -> u32 {
        match kind {
            MetricKind::Material => self.lectures_created,
            MetricKind::Test => self.tests_created,
        }
    }

    fn assigned(&self, kind: MetricKind) -> u32 {
        match kind {
            MetricKind::Material => self.materials_assigned,
            MetricKind::Test => self.assigned_tests,
        }
    }

    fn completed(&self, kind: MetricKind) -> u32 {
        match kind {
            MetricKind::Material => self.completed_materials,
            MetricKind::Test => self.completed_tests,
        }
    }
}

fn by_created<T: Scored>(items: &mut [T], kind: MetricKind) {
    items.sort_by(|a, b| b.created(kind).cmp(&a.created(kind)));
}

/// Stable descending sort by the active criterion.
///
/// Under `Rate`, items are first ordered by exact rate. Each run of
/// neighbours whose rates differ by at most `RATE_EPSILON` is a tie and is
/// reordered by created count; remaining ties keep input order.
pub fn sort_by_criterion<T: Scored>(items: &mut [T], kind: MetricKind, criterion: Criterion) {
    match criterion {
        Criterion::Quantity => by_created(items, kind),
        Criterion::Rate => {
            items.sort_by(|a, b| {
                b.rate(kind)
                    .partial_cmp(&a.rate(kind))
                    .unwrap_or(Ordering::Equal)
            });
            let mut start = 0;
            while start < items.len() {
                let mut end = start + 1;
                while end < items.len()
                    && items[end - 1].rate(kind) - items[end].rate(kind) <= RATE_EPSILON
                {
                    end += 1;
                }
                by_created(&mut items[start..end], kind);
                start = end;
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Ranked<T> {
    /// 1-based.
    pub rank: usize,
    pub entry: T,
}

fn number<T>(items: Vec<T>) -> Vec<Ranked<T>> {
    items
        .into_iter()
        .enumerate()
        .map(|(index, entry)| Ranked {
            rank: index + 1,
            entry,
        })
        .collect()
}

pub fn rank_by_criterion<T: Scored + Clone>(
    items: &[T],
    kind: MetricKind,
    criterion: Criterion,
) -> Vec<Ranked<T>> {
    let mut sorted = items.to_vec();
    sort_by_criterion(&mut sorted, kind, criterion);
    number(sorted)
}

/// Top three of a ranked list, rendered apart from the rest.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Podium<T> {
    pub top: Vec<Ranked<T>>,
    pub others: Vec<Ranked<T>>,
}

impl<T> Podium<T> {
    pub fn from_ranked(mut ranked: Vec<Ranked<T>>) -> Self {
        let others = ranked.split_off(ranked.len().min(3));
        Self { top: ranked, others }
    }

    /// Podium left to right: second, first, third. Missing places are skipped.
    pub fn display_order(&self) -> Vec<&Ranked<T>> {
        [1, 0, 2]
            .iter()
            .filter_map(|index| self.top.get(*index))
            .collect()
    }
}

/// Classes by total score; ties keep input order.
pub fn class_leaderboard(classes: &[ClassActivity]) -> Vec<Ranked<ClassActivity>> {
    let mut sorted = classes.to_vec();
    sorted.sort_by(|a, b| b.total_score.cmp(&a.total_score));
    number(sorted)
}

/// Students by average test score, optionally limited to one grade.
pub fn student_leaderboard(
    students: &[StudentLmsStat],
    grade: Option<u32>,
) -> Vec<Ranked<StudentLmsStat>> {
    let mut sorted: Vec<StudentLmsStat> = students
        .iter()
        .filter(|s| grade.map_or(true, |g| s.grade == g))
        .cloned()
        .collect();
    sorted.sort_by(|a, b| {
        b.average_test_score
            .partial_cmp(&a.average_test_score)
            .unwrap_or(Ordering::Equal)
    });
    number(sorted)
}

/// Case-insensitive substring match over name, subject and grade label.
/// A blank query keeps everyone.
pub fn filter_teachers(teachers: &[TeacherLmsStat], query: Option<&str>) -> Vec<TeacherLmsStat> {
    let needle = query.map(str::trim).unwrap_or_default().to_lowercase();
    if needle.is_empty() {
        return teachers.to_vec();
    }
    teachers
        .iter()
        .filter(|t| {
            [&t.name, &t.subject, &t.assigned_grade]
                .iter()
                .any(|field| field.to_lowercase().contains(&needle))
        })
        .cloned()
        .collect()
}
