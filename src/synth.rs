use rand::Rng;

use crate::config::{LmsConfig, RosterConfig};
use crate::metrics::completion_rate;
use crate::models::{
    Assessment, AssessmentLevel, ClassActivity, GradeEntryStatus, GradebookSnapshot, LmsSnapshot,
    OverallAssessment, PeriodFactors, ReportingPeriod, SchoolClass, Student, StudentLmsStat,
    SubjectStat, Teacher, TeacherLmsStat,
};

pub const PRIMARY_SUBJECTS: [&str; 12] = [
    "Tiếng Việt",
    "Toán",
    "Ngoại ngữ 1",
    "Đạo đức",
    "Tự nhiên và Xã hội",
    "Lịch sử và Địa lí",
    "Khoa học",
    "Tin học",
    "Công nghệ",
    "Âm nhạc",
    "Mĩ thuật",
    "Giáo dục thể chất",
];

/// Subjects that carry a periodic test score at the end of a term.
pub const PERIODIC_TEST_SUBJECTS: [&str; 3] = ["Toán", "Tiếng Việt", "Ngoại ngữ 1"];

/// Subject forced to "needs support" for roughly one student in seven.
pub const DEMO_WEAK_SUBJECT: &str = "Toán";
/// Class where roughly one student in four gets a forced weak core subject.
pub const DEMO_FOCUS_CLASS: &str = "5a2";

pub const SURNAMES: [&str; 16] = [
    "Nguyễn", "Trần", "Lê", "Phạm", "Hoàng", "Huỳnh", "Phan", "Vũ", "Võ", "Đặng", "Bùi", "Đỗ",
    "Hồ", "Ngô", "Dương", "Lý",
];

pub const MIDDLE_NAMES: [&str; 11] = [
    "Văn", "Thị", "Minh", "Quốc", "Thành", "Đức", "Hữu", "Mạnh", "Tiến", "Ngọc", "Thanh",
];

pub const GIVEN_NAMES: [&str; 46] = [
    "Anh", "Bình", "Châu", "Dũng", "Em", "Giang", "Hà", "Hải", "Hiếu", "Hoà", "Hùng", "Huy",
    "Khánh", "Lan", "Linh", "Long", "Mai", "Minh", "Nam", "Nga", "Ngọc", "Nhân", "Phong", "Phúc",
    "Phượng", "Quân", "Quang", "Quốc", "Sơn", "Thảo", "Thắng", "Thanh", "Thảo", "Thịnh", "Thu",
    "Thuỷ", "Toàn", "Trang", "Trí", "Tuấn", "Tùng", "Vân", "Việt", "Vinh", "Uyên", "Yến",
];

const TEACHER_NAMES: [&str; 50] = [
    "Nguyễn Thị Mai",
    "Trần Văn Hùng",
    "Lê Thị Lan",
    "Phạm Văn Tuấn",
    "Hoàng Thị Cúc",
    "Đặng Văn Nam",
    "Bùi Thị Hoa",
    "Vũ Văn Minh",
    "Đỗ Thị Hương",
    "Ngô Văn Long",
    "Dương Thị Thúy",
    "Lý Văn Kiệt",
    "Trương Thị Ngọc",
    "Nguyễn Văn An",
    "Trần Thị Bích",
    "Lê Văn Cường",
    "Phạm Thị Dung",
    "Hoàng Văn Dũng",
    "Đặng Thị Hạnh",
    "Bùi Văn Hải",
    "Vũ Thị Huyền",
    "Đỗ Văn Khánh",
    "Ngô Thị Linh",
    "Dương Văn Lâm",
    "Lý Thị Nga",
    "Trương Văn Phúc",
    "Nguyễn Thị Phương",
    "Trần Văn Quân",
    "Lê Thị Quỳnh",
    "Phạm Văn Sang",
    "Hoàng Thị Tâm",
    "Đặng Văn Thành",
    "Bùi Thị Thảo",
    "Vũ Văn Thắng",
    "Đỗ Thị Trang",
    "Ngô Văn Trọng",
    "Dương Thị Tuyết",
    "Lý Văn Tùng",
    "Trương Thị Vân",
    "Nguyễn Văn Việt",
    "Trần Thị Yến",
    "Lê Văn Sơn",
    "Phạm Thị Thu",
    "Hoàng Văn Tám",
    "Đặng Thị Kim",
    "Bùi Văn Tài",
    "Vũ Thị Lệ",
    "Đỗ Văn Đức",
    "Ngô Thị Hà",
    "Dương Văn Hiếu",
];

/// LMS classes: (id, short name, numeric grade key).
pub const LMS_CLASSES: [(&str, &str, u32); 10] = [
    ("6a1", "6A1", 6),
    ("7a1", "7A1", 7),
    ("8a1", "8A1", 8),
    ("9a1", "9A1", 9),
    ("6a2", "6A2", 10),
    ("7a2", "7A2", 11),
    ("8a2", "8A2", 12),
    ("9a2", "9A2", 13),
    ("6a3", "6A3", 14),
    ("7a3", "7A3", 15),
];

/// Display label for an LMS grade key.
pub fn grade_label(grade: u32) -> String {
    LMS_CLASSES
        .iter()
        .find(|(_, _, g)| *g == grade)
        .map(|(_, name, _)| format!("Lớp {name}"))
        .unwrap_or_else(|| format!("Khối {grade}"))
}

/// Student identity drawn once and reused for every reporting period.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RosterEntry {
    pub id: u32,
    pub name: String,
    pub class_id: String,
}

#[derive(Debug, Clone)]
pub struct Roster {
    pub classes: Vec<SchoolClass>,
    pub teachers: Vec<Teacher>,
    pub students: Vec<RosterEntry>,
}

pub fn default_teachers() -> Vec<Teacher> {
    [
        ("gv01", "Cô Mai"),
        ("gv02", "Thầy Tuấn"),
        ("gv03", "Cô Lan"),
        ("gv04", "Thầy Hùng"),
        ("gv05", "Cô Trúc"),
    ]
    .into_iter()
    .map(|(id, name)| Teacher {
        id: id.to_string(),
        name: name.to_string(),
    })
    .collect()
}

/// Ten grade-5 classes, homeroom teachers assigned round-robin.
pub fn default_classes(teachers: &[Teacher]) -> Vec<SchoolClass> {
    (1..=10)
        .map(|n| SchoolClass {
            id: format!("5a{n}"),
            name: format!("Lớp 5A{n}"),
            teacher_id: teachers
                .get((n - 1) % teachers.len().max(1))
                .map(|t| t.id.clone())
                .unwrap_or_default(),
            grade: 5,
        })
        .collect()
}

pub fn synthesize_name<R: Rng + ?Sized>(rng: &mut R) -> String {
    let surname = SURNAMES[rng.gen_range(0..SURNAMES.len())];
    let middle = MIDDLE_NAMES[rng.gen_range(0..MIDDLE_NAMES.len())];
    let given = GIVEN_NAMES[rng.gen_range(0..GIVEN_NAMES.len())];
    format!("{surname} {middle} {given}")
}

pub fn build_roster<R: Rng + ?Sized>(
    rng: &mut R,
    classes: Vec<SchoolClass>,
    teachers: Vec<Teacher>,
    config: &RosterConfig,
) -> Roster {
    let mut students = Vec::new();
    let mut next_id = 1u32;

    for class in &classes {
        let size = rng.gen_range(config.min_size..=config.max_size);
        for _ in 0..size {
            students.push(RosterEntry {
                id: next_id,
                name: synthesize_name(rng),
                class_id: class.id.clone(),
            });
            next_id += 1;
        }
    }

    tracing::debug!(
        classes = classes.len(),
        students = students.len(),
        "roster synthesized"
    );

    Roster {
        classes,
        teachers,
        students,
    }
}

/// Weighted three-way draw of a subject level.
pub fn draw_level<R: Rng + ?Sized>(rng: &mut R, factors: &PeriodFactors) -> AssessmentLevel {
    let roll: f64 = rng.gen();
    if roll < factors.good {
        AssessmentLevel::Good
    } else if roll < factors.good + factors.ok {
        AssessmentLevel::Completed
    } else {
        AssessmentLevel::NeedsSupport
    }
}

/// Overall assessment for one student in one period.
///
/// Precedence: any "needs support" subject wins outright. At the end of a
/// term, all subjects good with no periodic score below 9 is excellent, and
/// at least one good subject with no periodic score below 7 is good.
/// Everything else is satisfactory. An empty end-term list counts as all good.
pub fn determine_overall(assessments: &[Assessment], period: ReportingPeriod) -> OverallAssessment {
    if assessments
        .iter()
        .any(|a| a.level == AssessmentLevel::NeedsSupport)
    {
        return OverallAssessment::NeedsSupport;
    }

    if period.is_end_term() {
        let good_count = assessments
            .iter()
            .filter(|a| a.level == AssessmentLevel::Good)
            .count();
        let any_score_below = |limit: u8| assessments.iter().any(|a| a.score.is_some_and(|s| s < limit));

        if good_count == assessments.len() && !any_score_below(9) {
            return OverallAssessment::Excellent;
        }
        if good_count > 0 && !any_score_below(7) {
            return OverallAssessment::Good;
        }
    }

    OverallAssessment::Satisfactory
}

fn draw_assessments<R: Rng + ?Sized>(
    rng: &mut R,
    period: ReportingPeriod,
) -> Vec<Assessment> {
    let factors = period.factors();
    PRIMARY_SUBJECTS
        .iter()
        .map(|subject| {
            let level = draw_level(rng, &factors);
            let score = if period.is_end_term() && PERIODIC_TEST_SUBJECTS.contains(subject) {
                Some(5 + rng.gen_range(0..6u8))
            } else {
                None
            };
            Assessment {
                subject: subject.to_string(),
                level,
                score,
            }
        })
        .collect()
}

fn apply_demo_bias<R: Rng + ?Sized>(
    rng: &mut R,
    entry: &RosterEntry,
    assessments: &mut [Assessment],
) {
    if entry.id % 7 < 1 {
        if let Some(weak) = assessments
            .iter_mut()
            .find(|a| a.subject == DEMO_WEAK_SUBJECT)
        {
            weak.level = AssessmentLevel::NeedsSupport;
        }
    }

    if entry.class_id == DEMO_FOCUS_CLASS && entry.id % 4 == 0 && !assessments.is_empty() {
        let index = rng.gen_range(0..assessments.len().min(3));
        assessments[index].level = AssessmentLevel::NeedsSupport;
    }
}

/// Regenerates every student's assessments for `period`.
pub fn gradebook_snapshot<R: Rng + ?Sized>(
    rng: &mut R,
    roster: &Roster,
    period: ReportingPeriod,
    demo_bias: bool,
) -> GradebookSnapshot {
    let students: Vec<Student> = roster
        .students
        .iter()
        .map(|entry| {
            let mut assessments = draw_assessments(rng, period);
            if demo_bias {
                apply_demo_bias(rng, entry, &mut assessments);
            }
            let overall = determine_overall(&assessments, period);
            Student {
                id: entry.id,
                name: entry.name.clone(),
                class_id: entry.class_id.clone(),
                assessments,
                overall,
            }
        })
        .collect();

    let entry_factor = period.factors().entry;
    let grade_entry = PRIMARY_SUBJECTS
        .iter()
        .map(|subject| {
            let total = students
                .iter()
                .filter(|s| s.assessments.iter().any(|a| a.subject == *subject))
                .count() as u32;
            let jitter: f64 = rng.gen::<f64>() * 0.1;
            GradeEntryStatus {
                subject: subject.to_string(),
                total,
                entered: scaled(total, entry_factor - jitter),
            }
        })
        .collect();

    tracing::info!(
        period = period.key(),
        students = students.len(),
        "gradebook snapshot synthesized"
    );

    GradebookSnapshot {
        period,
        students,
        classes: roster.classes.clone(),
        teachers: roster.teachers.clone(),
        grade_entry,
    }
}

/// `floor(count * ratio)`, never negative.
fn scaled(count: u32, ratio: f64) -> u32 {
    (f64::from(count) * ratio).floor().max(0.0) as u32
}

/// Samples a fraction uniformly from `[low, low + span)`.
fn band<R: Rng + ?Sized>(rng: &mut R, low: f64, span: f64) -> f64 {
    low + rng.gen::<f64>() * span
}

fn class_activity<R: Rng + ?Sized>(rng: &mut R) -> Vec<ClassActivity> {
    LMS_CLASSES
        .iter()
        .map(|(id, short, grade)| {
            let assigned_materials = 50 + rng.gen_range(0..50);
            let completed_materials = scaled(assigned_materials, band(rng, 0.6, 0.35));
            let assigned_tests = 10 + rng.gen_range(0..10);
            let completed_tests = scaled(assigned_tests, band(rng, 0.7, 0.25));
            ClassActivity::new(
                *id,
                format!("Lớp {short}"),
                *grade,
                (assigned_materials, completed_materials),
                (assigned_tests, completed_tests),
            )
        })
        .collect()
}

fn subject_stats<R: Rng + ?Sized>(rng: &mut R, subjects: &[String]) -> Vec<SubjectStat> {
    let mut stats: Vec<SubjectStat> = subjects
        .iter()
        .map(|name| {
            let lectures_created = 800 + rng.gen_range(0..500);
            let materials_assigned = scaled(lectures_created, band(rng, 0.4, 0.4));
            let completed_materials = scaled(materials_assigned, band(rng, 0.6, 0.3));

            let tests_created = 150 + rng.gen_range(0..100);
            let assigned_tests = scaled(tests_created, band(rng, 0.5, 0.4));
            let completed_tests = scaled(assigned_tests, band(rng, 0.7, 0.25));

            SubjectStat {
                name: name.clone(),
                lectures_created,
                materials_assigned,
                completed_materials,
                tests_created,
                assigned_tests,
                completed_tests,
                completion_rate: completion_rate(
                    completed_materials + completed_tests,
                    materials_assigned + assigned_tests,
                ),
                test_completion_rate: completion_rate(completed_tests, assigned_tests),
            }
        })
        .collect();

    stats.sort_by(|a, b| b.materials_assigned.cmp(&a.materials_assigned));
    stats
}

fn teacher_stats<R: Rng + ?Sized>(
    rng: &mut R,
    subjects: &[String],
    count: usize,
) -> Vec<TeacherLmsStat> {
    let mut teachers: Vec<TeacherLmsStat> = (0..count)
        .map(|i| {
            let lectures_created = 200 + rng.gen_range(0..200);
            let materials_assigned = scaled(lectures_created, band(rng, 0.6, 0.3));
            let completed_materials = scaled(materials_assigned, band(rng, 0.6, 0.3));

            let tests_created = 40 + rng.gen_range(0..40);
            let assigned_tests = scaled(tests_created, band(rng, 0.6, 0.3));
            let completed_tests = scaled(assigned_tests, band(rng, 0.7, 0.25));

            let (_, _, grade) = LMS_CLASSES[rng.gen_range(0..LMS_CLASSES.len())];
            let subject = if subjects.is_empty() {
                String::new()
            } else {
                subjects[i % subjects.len()].clone()
            };

            TeacherLmsStat {
                id: format!("GV{i}"),
                name: TEACHER_NAMES[i % TEACHER_NAMES.len()].to_string(),
                subject,
                assigned_grade: grade_label(grade),
                lectures_created,
                materials_assigned,
                completed_materials,
                tests_created,
                assigned_tests,
                completed_tests,
                completion_rate: completion_rate(
                    completed_materials + completed_tests,
                    materials_assigned + assigned_tests,
                ),
            }
        })
        .collect();

    teachers.sort_by(|a, b| {
        (b.lectures_created + b.tests_created).cmp(&(a.lectures_created + a.tests_created))
    });
    teachers
}

fn student_stats<R: Rng + ?Sized>(rng: &mut R, count: usize) -> Vec<StudentLmsStat> {
    (0..count)
        .map(|i| {
            let name = synthesize_name(rng);
            let (_, short, grade) = LMS_CLASSES[rng.gen_range(0..LMS_CLASSES.len())];
            let completed_materials = rng.gen_range(0..150) + 10;
            let completed_tests = rng.gen_range(0..30) + 5;
            let average = (6.0 + rng.gen::<f64>() * 3.5).min(10.0);

            StudentLmsStat {
                id: format!("HS{i}"),
                name,
                class_name: format!("Lớp {short}"),
                grade,
                completed_materials,
                completed_tests,
                average_test_score: (average * 10.0).round() / 10.0,
            }
        })
        .collect()
}

pub fn lms_snapshot<R: Rng + ?Sized>(rng: &mut R, config: &LmsConfig) -> LmsSnapshot {
    let snapshot = LmsSnapshot {
        classes: class_activity(rng),
        subjects: subject_stats(rng, &config.subjects),
        teachers: teacher_stats(rng, &config.subjects, config.teacher_count),
        students: student_stats(rng, config.student_count),
    };

    tracing::info!(
        classes = snapshot.classes.len(),
        subjects = snapshot.subjects.len(),
        teachers = snapshot.teachers.len(),
        students = snapshot.students.len(),
        "lms snapshot synthesized"
    );

    snapshot
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn assessment(subject: &str, level: AssessmentLevel, score: Option<u8>) -> Assessment {
        Assessment {
            subject: subject.to_string(),
            level,
            score,
        }
    }

    fn sample_roster(rng: &mut StdRng) -> Roster {
        let teachers = default_teachers();
        let classes = default_classes(&teachers);
        build_roster(rng, classes, teachers, &RosterConfig::default())
    }

    #[test]
    fn needs_support_short_circuits_everything() {
        let assessments = vec![
            assessment("Toán", AssessmentLevel::NeedsSupport, Some(10)),
            assessment("Tiếng Việt", AssessmentLevel::Good, Some(10)),
        ];
        assert_eq!(
            determine_overall(&assessments, ReportingPeriod::EndTerm1),
            OverallAssessment::NeedsSupport
        );
    }

    #[test]
    fn all_good_with_top_scores_is_excellent_at_year_end() {
        let assessments = vec![
            assessment("Toán", AssessmentLevel::Good, Some(10)),
            assessment("Tiếng Việt", AssessmentLevel::Good, Some(10)),
            assessment("Đạo đức", AssessmentLevel::Good, None),
        ];
        assert_eq!(
            determine_overall(&assessments, ReportingPeriod::EndYear),
            OverallAssessment::Excellent
        );
    }

    #[test]
    fn score_below_nine_downgrades_to_good() {
        let assessments = vec![
            assessment("Toán", AssessmentLevel::Good, Some(8)),
            assessment("Tiếng Việt", AssessmentLevel::Good, Some(10)),
        ];
        assert_eq!(
            determine_overall(&assessments, ReportingPeriod::EndYear),
            OverallAssessment::Good
        );
    }

    #[test]
    fn score_below_seven_is_satisfactory() {
        let assessments = vec![
            assessment("Toán", AssessmentLevel::Good, Some(6)),
            assessment("Tiếng Việt", AssessmentLevel::Completed, None),
        ];
        assert_eq!(
            determine_overall(&assessments, ReportingPeriod::EndTerm1),
            OverallAssessment::Satisfactory
        );
    }

    #[test]
    fn mid_term_is_never_above_satisfactory() {
        let assessments = vec![assessment("Toán", AssessmentLevel::Good, None)];
        assert_eq!(
            determine_overall(&assessments, ReportingPeriod::MidTerm2),
            OverallAssessment::Satisfactory
        );
    }

    #[test]
    fn empty_assessments_are_excellent_at_term_end_only() {
        assert_eq!(
            determine_overall(&[], ReportingPeriod::EndYear),
            OverallAssessment::Excellent
        );
        assert_eq!(
            determine_overall(&[], ReportingPeriod::EndTerm1),
            OverallAssessment::Excellent
        );
        assert_eq!(
            determine_overall(&[], ReportingPeriod::MidTerm1),
            OverallAssessment::Satisfactory
        );
    }

    #[test]
    fn roster_sizes_stay_in_band_and_ids_are_sequential() {
        let mut rng = StdRng::seed_from_u64(11);
        let roster = sample_roster(&mut rng);
        for class in &roster.classes {
            let size = roster
                .students
                .iter()
                .filter(|s| s.class_id == class.id)
                .count();
            assert!((28..=35).contains(&size), "{} has {size}", class.id);
        }
        for (index, student) in roster.students.iter().enumerate() {
            assert_eq!(student.id, index as u32 + 1);
            assert_eq!(student.name.split(' ').count(), 3);
        }
    }

    #[test]
    fn periodic_scores_only_at_end_of_term_for_core_subjects() {
        let mut rng = StdRng::seed_from_u64(3);
        let roster = sample_roster(&mut rng);

        let mid = gradebook_snapshot(&mut rng, &roster, ReportingPeriod::MidTerm1, true);
        assert!(mid
            .students
            .iter()
            .flat_map(|s| &s.assessments)
            .all(|a| a.score.is_none()));

        let end = gradebook_snapshot(&mut rng, &roster, ReportingPeriod::EndYear, true);
        for a in end.students.iter().flat_map(|s| &s.assessments) {
            if PERIODIC_TEST_SUBJECTS.contains(&a.subject.as_str()) {
                let score = a.score.expect("core subject score");
                assert!((5..=10).contains(&score));
            } else {
                assert!(a.score.is_none());
            }
        }
    }

    #[test]
    fn demo_bias_forces_weak_subject_for_every_seventh_student() {
        let mut rng = StdRng::seed_from_u64(5);
        let roster = sample_roster(&mut rng);
        let snapshot = gradebook_snapshot(&mut rng, &roster, ReportingPeriod::EndTerm1, true);

        for student in snapshot.students.iter().filter(|s| s.id % 7 == 0) {
            assert_eq!(student.overall, OverallAssessment::NeedsSupport);
            assert!(student
                .needs_support_subjects()
                .contains(&DEMO_WEAK_SUBJECT.to_string()));
        }
        for student in snapshot
            .students
            .iter()
            .filter(|s| s.class_id == DEMO_FOCUS_CLASS && s.id % 4 == 0)
        {
            assert!(student.needs_support());
        }
    }

    #[test]
    fn overall_is_consistent_with_assessments() {
        let mut rng = StdRng::seed_from_u64(8);
        let roster = sample_roster(&mut rng);
        for period in ReportingPeriod::ALL {
            let snapshot = gradebook_snapshot(&mut rng, &roster, period, false);
            assert_eq!(snapshot.students.len(), roster.students.len());
            for student in &snapshot.students {
                assert_eq!(student.overall, determine_overall(&student.assessments, period));
            }
        }
    }

    #[test]
    fn grade_entry_never_exceeds_total() {
        let mut rng = StdRng::seed_from_u64(21);
        let roster = sample_roster(&mut rng);
        let snapshot = gradebook_snapshot(&mut rng, &roster, ReportingPeriod::EndYear, true);
        assert_eq!(snapshot.grade_entry.len(), PRIMARY_SUBJECTS.len());
        for status in &snapshot.grade_entry {
            assert_eq!(status.total as usize, roster.students.len());
            assert!(status.entered <= status.total);
        }
    }

    #[test]
    fn assigned_is_strictly_below_created() {
        let mut rng = StdRng::seed_from_u64(99);
        for _ in 0..50 {
            let snapshot = lms_snapshot(&mut rng, &LmsConfig::default());
            for subject in &snapshot.subjects {
                assert!(subject.materials_assigned < subject.lectures_created);
                assert!(subject.assigned_tests < subject.tests_created);
                assert!(subject.completed_materials <= subject.materials_assigned);
                assert!(subject.completed_tests <= subject.assigned_tests);
            }
            for teacher in &snapshot.teachers {
                assert!(teacher.materials_assigned < teacher.lectures_created);
                assert!(teacher.assigned_tests < teacher.tests_created);
            }
        }
    }

    #[test]
    fn lms_defaults_are_sorted_and_sized() {
        let mut rng = StdRng::seed_from_u64(4);
        let config = LmsConfig::default();
        let snapshot = lms_snapshot(&mut rng, &config);

        assert_eq!(snapshot.classes.len(), LMS_CLASSES.len());
        assert_eq!(snapshot.teachers.len(), config.teacher_count);
        assert_eq!(snapshot.students.len(), config.student_count);
        assert!(snapshot
            .subjects
            .windows(2)
            .all(|w| w[0].materials_assigned >= w[1].materials_assigned));
        assert!(snapshot.teachers.windows(2).all(|w| {
            w[0].lectures_created + w[0].tests_created >= w[1].lectures_created + w[1].tests_created
        }));
        for student in &snapshot.students {
            assert!((6.0..=9.5).contains(&student.average_test_score));
        }
    }

    #[test]
    fn grade_labels_follow_class_map() {
        assert_eq!(grade_label(6), "Lớp 6A1");
        assert_eq!(grade_label(10), "Lớp 6A2");
        assert_eq!(grade_label(15), "Lớp 7A3");
        assert_eq!(grade_label(3), "Khối 3");
    }
}
