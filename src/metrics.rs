use std::collections::HashMap;

use serde::Serialize;

use crate::config::LmsConfig;
use crate::models::{
    ClassActivity, DetailItem, GradeEntryStatus, GradebookSnapshot, LmsSnapshot,
    OverallAssessment, Reason, Student,
};
use crate::prng::SeededRng;
use crate::risk;

/// Share of assigned tests assumed still open for submission.
pub const ONGOING_TEST_SHARE: f64 = 0.15;

/// Class performance warning: strictly more than this share needs support.
pub const CLASS_SUPPORT_WARNING: f64 = 0.1;

/// Integer completion percentage, `0` when nothing was assigned.
pub fn completion_rate(completed: u32, assigned: u32) -> u32 {
    if assigned == 0 {
        return 0;
    }
    (f64::from(completed) / f64::from(assigned) * 100.0).round() as u32
}

/// Rounds to one decimal place.
pub fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

/// `part / whole * 100` to one decimal, `0` for an empty whole.
pub fn percent_one_decimal(part: f64, whole: f64) -> f64 {
    if whole <= 0.0 {
        return 0.0;
    }
    round1(part / whole * 100.0)
}

/// Ratio of sums over `(completed, assigned)` pairs, one decimal.
pub fn global_completion_rate<I>(pairs: I) -> f64
where
    I: IntoIterator<Item = (u32, u32)>,
{
    let (completed, assigned) = pairs
        .into_iter()
        .fold((0u64, 0u64), |(c, a), (completed, assigned)| {
            (c + u64::from(completed), a + u64::from(assigned))
        });
    percent_one_decimal(completed as f64, assigned as f64)
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LmsOverview {
    pub total_lectures: u32,
    pub total_assigned_materials: u32,
    pub total_completed_materials: u32,
    pub global_completion_rate: f64,
    pub total_assigned_tests: u32,
    pub ongoing_tests: u32,
    pub finished_tests: u32,
}

pub fn lms_overview(snapshot: &LmsSnapshot) -> LmsOverview {
    let total_lectures = snapshot.subjects.iter().map(|s| s.lectures_created).sum();
    let total_assigned_materials = snapshot.classes.iter().map(|c| c.assigned_materials).sum();
    let total_completed_materials = snapshot.classes.iter().map(|c| c.completed_materials).sum();
    let total_assigned_tests: u32 = snapshot.classes.iter().map(|c| c.assigned_tests).sum();
    let ongoing_tests = (f64::from(total_assigned_tests) * ONGOING_TEST_SHARE).floor() as u32;

    LmsOverview {
        total_lectures,
        total_assigned_materials,
        total_completed_materials,
        global_completion_rate: global_completion_rate(
            snapshot
                .classes
                .iter()
                .map(|c| (c.completed_materials, c.assigned_materials)),
        ),
        total_assigned_tests,
        ongoing_tests,
        finished_tests: total_assigned_tests - ongoing_tests,
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ScoreBand {
    pub label: &'static str,
    pub midpoint: f64,
    pub passing: bool,
}

pub const SCORE_BANDS: [ScoreBand; 6] = [
    ScoreBand { label: "0-3", midpoint: 1.5, passing: false },
    ScoreBand { label: "3-5", midpoint: 4.0, passing: false },
    ScoreBand { label: "5-6.5", midpoint: 5.75, passing: true },
    ScoreBand { label: "6.5-8", midpoint: 7.25, passing: true },
    ScoreBand { label: "8-9", midpoint: 8.5, passing: true },
    ScoreBand { label: "9-10", midpoint: 9.5, passing: true },
];

/// Subjects whose spectrum leans towards lower bands.
pub const HARD_SUBJECTS: [&str; 1] = ["Tiếng Anh"];

const HARD_WEIGHTS: [f64; 5] = [0.05, 0.15, 0.30, 0.30, 0.15];
const REGULAR_WEIGHTS: [f64; 5] = [0.02, 0.08, 0.35, 0.35, 0.15];

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScoreSpectrum {
    pub grade: u32,
    pub subject: String,
    pub total_students: u32,
    pub bands: [u32; 6],
    pub average: f64,
    pub pass_rate: f64,
    pub fail_rate: f64,
}

/// Score distribution for a grade and subject. Reproducible: the population
/// size is drawn from a generator keyed on the pair.
pub fn score_spectrum(grade: u32, subject: &str) -> ScoreSpectrum {
    let mut rng = SeededRng::for_key(grade, subject);
    let total_students = 300 + (rng.next_f64() * 50.0).floor() as u32;

    let weights = if HARD_SUBJECTS.contains(&subject) {
        HARD_WEIGHTS
    } else {
        REGULAR_WEIGHTS
    };

    let mut bands = [0u32; 6];
    for (slot, weight) in bands.iter_mut().zip(weights) {
        *slot = (f64::from(total_students) * weight).floor() as u32;
    }
    // Last band takes the remainder so the counts always add up.
    bands[5] = total_students - bands[..5].iter().sum::<u32>();

    let weighted: f64 = bands
        .iter()
        .zip(SCORE_BANDS.iter())
        .map(|(count, band)| f64::from(*count) * band.midpoint)
        .sum();
    let passed: u32 = bands
        .iter()
        .zip(SCORE_BANDS.iter())
        .filter(|(_, band)| band.passing)
        .map(|(count, _)| *count)
        .sum();
    let failed = total_students - passed;
    let total = f64::from(total_students);

    ScoreSpectrum {
        grade,
        subject: subject.to_string(),
        total_students,
        bands,
        average: if total_students == 0 { 0.0 } else { round1(weighted / total) },
        pass_rate: percent_one_decimal(f64::from(passed), total),
        fail_rate: percent_one_decimal(f64::from(failed), total),
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ClassMaterialProgress {
    pub class_name: String,
    pub grade: u32,
    pub completed: u32,
    pub unfinished: u32,
    pub total: u32,
    pub percentage: u32,
}

pub fn material_progress(classes: &[ClassActivity]) -> Vec<ClassMaterialProgress> {
    classes
        .iter()
        .map(|c| ClassMaterialProgress {
            class_name: c.name.clone(),
            grade: c.grade,
            completed: c.completed_materials,
            unfinished: c.assigned_materials.saturating_sub(c.completed_materials),
            total: c.assigned_materials,
            percentage: completion_rate(c.completed_materials, c.assigned_materials),
        })
        .collect()
}

/// Per-class split of assigned tests into result tiers.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ClassTestQuality {
    pub class_name: String,
    pub grade: u32,
    pub assigned: u32,
    pub completed: u32,
    pub excellent: u32,
    pub average: u32,
    pub weak: u32,
    pub unfinished: u32,
    pub at_risk: bool,
}

impl ClassTestQuality {
    fn share_of_assigned(&self, part: u32) -> f64 {
        f64::from(part) / f64::from(self.assigned.max(1)) * 100.0
    }

    pub fn excellent_pct(&self) -> f64 {
        self.share_of_assigned(self.excellent)
    }

    pub fn average_pct(&self) -> f64 {
        self.share_of_assigned(self.average)
    }

    pub fn weak_pct(&self) -> f64 {
        self.share_of_assigned(self.weak)
    }

    pub fn completed_pct(&self) -> f64 {
        self.excellent_pct() + self.average_pct() + self.weak_pct()
    }
}

pub fn test_quality(classes: &[ClassActivity], config: &LmsConfig) -> Vec<ClassTestQuality> {
    classes
        .iter()
        .map(|c| {
            let assigned = c.assigned_tests;
            let completed = (f64::from(assigned) * config.test_completion_ratio).floor() as u32;
            let weak_target = (f64::from(assigned) * config.weak_ratio_of_assigned).floor() as u32;
            let weak = weak_target.min(completed);
            let remaining = completed - weak;
            let excellent = (f64::from(remaining) * 0.6).floor() as u32;

            ClassTestQuality {
                class_name: c.name.clone(),
                grade: c.grade,
                assigned,
                completed,
                excellent,
                average: remaining - excellent,
                weak,
                unfinished: assigned - completed,
                at_risk: risk::is_at_risk(weak, assigned),
            }
        })
        .collect()
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ShareCount {
    pub count: usize,
    pub percent: f64,
}

impl ShareCount {
    fn of(count: usize, total: usize) -> Self {
        Self {
            count,
            percent: percent_one_decimal(count as f64, total as f64),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ClassConcern {
    pub class_id: String,
    pub class_name: String,
    pub percent: f64,
    pub details: Vec<DetailItem>,
}

#[derive(Debug, Clone, Serialize)]
pub struct SubjectConcern {
    pub subject: String,
    pub count: usize,
    pub details: Vec<DetailItem>,
}

/// Headline cards of the gradebook dashboard.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum GradebookOverview {
    EndTerm {
        total_students: usize,
        excellent: ShareCount,
        good: ShareCount,
        needs_support: ShareCount,
        needs_support_details: Vec<DetailItem>,
    },
    MidTerm {
        total_students: usize,
        needs_support: ShareCount,
        needs_support_details: Vec<DetailItem>,
        worst_class: Option<ClassConcern>,
        worst_subject: Option<SubjectConcern>,
    },
}

fn subjects_reason(student: &Student) -> DetailItem {
    DetailItem {
        student: student.clone(),
        reason: Reason::Subjects(student.needs_support_subjects()),
    }
}

pub fn gradebook_overview(snapshot: &GradebookSnapshot) -> GradebookOverview {
    let students = &snapshot.students;
    let total_students = students.len();

    if snapshot.period.is_end_term() {
        let count = |level: OverallAssessment| students.iter().filter(|s| s.overall == level).count();
        let needs_support_details = students
            .iter()
            .filter(|s| s.overall == OverallAssessment::NeedsSupport)
            .map(|s| DetailItem {
                student: s.clone(),
                reason: Reason::Summary("Đánh giá cuối kỳ: Chưa hoàn thành".to_string()),
            })
            .collect();

        return GradebookOverview::EndTerm {
            total_students,
            excellent: ShareCount::of(count(OverallAssessment::Excellent), total_students),
            good: ShareCount::of(count(OverallAssessment::Good), total_students),
            needs_support: ShareCount::of(count(OverallAssessment::NeedsSupport), total_students),
            needs_support_details,
        };
    }

    let flagged: Vec<&Student> = students.iter().filter(|s| s.needs_support()).collect();

    GradebookOverview::MidTerm {
        total_students,
        needs_support: ShareCount::of(flagged.len(), total_students),
        needs_support_details: flagged.iter().map(|s| subjects_reason(s)).collect(),
        worst_class: worst_class(snapshot, &flagged),
        worst_subject: worst_subject(&flagged),
    }
}

/// Class with the highest share of flagged students; first seen wins ties.
fn worst_class(snapshot: &GradebookSnapshot, flagged: &[&Student]) -> Option<ClassConcern> {
    let mut totals: HashMap<&str, usize> = HashMap::new();
    for student in &snapshot.students {
        *totals.entry(student.class_id.as_str()).or_default() += 1;
    }

    let mut needs: Vec<(&str, usize)> = Vec::new();
    for student in flagged {
        match needs.iter_mut().find(|(id, _)| *id == student.class_id) {
            Some((_, count)) => *count += 1,
            None => needs.push((student.class_id.as_str(), 1)),
        }
    }

    let mut best: Option<(&str, f64)> = None;
    for (class_id, count) in needs {
        let total = totals.get(class_id).copied().unwrap_or(0).max(1);
        let ratio = count as f64 / total as f64;
        if best.map_or(true, |(_, top)| ratio > top) {
            best = Some((class_id, ratio));
        }
    }

    let (class_id, ratio) = best?;
    let class_name = snapshot
        .classes
        .iter()
        .find(|c| c.id == class_id)
        .map(|c| c.name.clone())
        .unwrap_or_else(|| "N/A".to_string());

    Some(ClassConcern {
        class_id: class_id.to_string(),
        class_name,
        percent: round1(ratio * 100.0),
        details: flagged
            .iter()
            .filter(|s| s.class_id == class_id)
            .map(|s| subjects_reason(s))
            .collect(),
    })
}

/// Subject with the most "needs support" results; first seen wins ties.
fn worst_subject(flagged: &[&Student]) -> Option<SubjectConcern> {
    let mut counts: Vec<(String, usize)> = Vec::new();
    for subject in flagged.iter().flat_map(|s| s.needs_support_subjects()) {
        match counts.iter_mut().find(|(name, _)| *name == subject) {
            Some((_, count)) => *count += 1,
            None => counts.push((subject, 1)),
        }
    }

    let mut best: Option<(String, usize)> = None;
    for (subject, count) in counts {
        if best.as_ref().map_or(true, |(_, top)| count > *top) {
            best = Some((subject, count));
        }
    }

    let (subject, count) = best?;
    let details = flagged
        .iter()
        .filter(|s| s.needs_support_subjects().contains(&subject))
        .map(|s| DetailItem {
            student: (*s).clone(),
            reason: Reason::Subjects(vec![subject.clone()]),
        })
        .collect();

    Some(SubjectConcern {
        subject,
        count,
        details,
    })
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ClassPerformance {
    pub class_id: String,
    pub class_name: String,
    pub teacher_name: String,
    pub total_students: usize,
    pub good: usize,
    pub ok: usize,
    pub bad: usize,
    pub warning: bool,
}

/// Per-class distribution of overall assessments. Empty classes are skipped.
pub fn class_performance(snapshot: &GradebookSnapshot) -> Vec<ClassPerformance> {
    snapshot
        .classes
        .iter()
        .filter_map(|class| {
            let members: Vec<&Student> = snapshot
                .students
                .iter()
                .filter(|s| s.class_id == class.id)
                .collect();
            let total = members.len();
            if total == 0 {
                return None;
            }

            let (mut good, mut ok, mut bad) = (0, 0, 0);
            for member in &members {
                match member.overall {
                    OverallAssessment::Excellent | OverallAssessment::Good => good += 1,
                    OverallAssessment::Satisfactory => ok += 1,
                    OverallAssessment::NeedsSupport => bad += 1,
                }
            }

            let teacher_name = snapshot
                .teachers
                .iter()
                .find(|t| t.id == class.teacher_id)
                .map(|t| t.name.clone())
                .unwrap_or_else(|| "N/A".to_string());

            Some(ClassPerformance {
                class_id: class.id.clone(),
                class_name: class.name.clone(),
                teacher_name,
                total_students: total,
                good,
                ok,
                bad,
                warning: bad as f64 / total as f64 > CLASS_SUPPORT_WARNING,
            })
        })
        .collect()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum EntryBand {
    Complete,
    InProgress,
    Lagging,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EntryProgress {
    pub subject: String,
    pub total: u32,
    pub entered: u32,
    pub percentage: f64,
    pub band: EntryBand,
}

pub fn grade_entry_progress(statuses: &[GradeEntryStatus]) -> Vec<EntryProgress> {
    statuses
        .iter()
        .map(|s| {
            let percentage = if s.total > 0 {
                f64::from(s.entered) / f64::from(s.total) * 100.0
            } else {
                0.0
            };
            let band = if percentage >= 90.0 {
                EntryBand::Complete
            } else if percentage >= 70.0 {
                EntryBand::InProgress
            } else {
                EntryBand::Lagging
            };
            EntryProgress {
                subject: s.subject.clone(),
                total: s.total,
                entered: s.entered,
                percentage,
                band,
            }
        })
        .collect()
}
