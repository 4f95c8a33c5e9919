use serde::{Deserialize, Serialize};

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "snake_case")]
pub enum ReportingPeriod {
    #[value(name = "mid_term_1")]
    #[serde(rename = "mid_term_1")]
    MidTerm1,
    #[value(name = "end_term_1")]
    #[serde(rename = "end_term_1")]
    EndTerm1,
    #[value(name = "mid_term_2")]
    #[serde(rename = "mid_term_2")]
    MidTerm2,
    #[value(name = "end_year")]
    EndYear,
}

/// Assessment weights for one reporting period. Whatever `good + ok` leaves
/// of 1 is the share that needs support.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PeriodFactors {
    pub good: f64,
    pub ok: f64,
    /// Expected share of grades already entered by teachers.
    pub entry: f64,
}

impl ReportingPeriod {
    #[cfg(test)]
    pub const ALL: [ReportingPeriod; 4] = [
        ReportingPeriod::MidTerm1,
        ReportingPeriod::EndTerm1,
        ReportingPeriod::MidTerm2,
        ReportingPeriod::EndYear,
    ];

    pub fn is_end_term(self) -> bool {
        matches!(self, ReportingPeriod::EndTerm1 | ReportingPeriod::EndYear)
    }

    pub fn key(self) -> &'static str {
        match self {
            ReportingPeriod::MidTerm1 => "mid_term_1",
            ReportingPeriod::EndTerm1 => "end_term_1",
            ReportingPeriod::MidTerm2 => "mid_term_2",
            ReportingPeriod::EndYear => "end_year",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            ReportingPeriod::MidTerm1 => "Giữa học kỳ I",
            ReportingPeriod::EndTerm1 => "Cuối học kỳ I",
            ReportingPeriod::MidTerm2 => "Giữa học kỳ II",
            ReportingPeriod::EndYear => "Cuối năm học",
        }
    }

    pub fn factors(self) -> PeriodFactors {
        match self {
            ReportingPeriod::MidTerm1 => PeriodFactors {
                good: 0.5,
                ok: 0.4,
                entry: 0.7,
            },
            ReportingPeriod::EndTerm1 => PeriodFactors {
                good: 0.55,
                ok: 0.38,
                entry: 0.95,
            },
            ReportingPeriod::MidTerm2 => PeriodFactors {
                good: 0.58,
                ok: 0.36,
                entry: 0.75,
            },
            ReportingPeriod::EndYear => PeriodFactors {
                good: 0.6,
                ok: 0.35,
                entry: 1.0,
            },
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AssessmentLevel {
    #[serde(rename = "Hoàn thành tốt")]
    Good,
    #[serde(rename = "Hoàn thành")]
    Completed,
    #[serde(rename = "Chưa hoàn thành")]
    NeedsSupport,
}

impl AssessmentLevel {
    pub fn label(self) -> &'static str {
        match self {
            AssessmentLevel::Good => "Hoàn thành tốt",
            AssessmentLevel::Completed => "Hoàn thành",
            AssessmentLevel::NeedsSupport => "Chưa hoàn thành",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum OverallAssessment {
    #[serde(rename = "Hoàn thành xuất sắc")]
    Excellent,
    #[serde(rename = "Hoàn thành tốt")]
    Good,
    #[serde(rename = "Hoàn thành")]
    Satisfactory,
    #[serde(rename = "Chưa hoàn thành")]
    NeedsSupport,
}

impl OverallAssessment {
    pub fn label(self) -> &'static str {
        match self {
            OverallAssessment::Excellent => "Hoàn thành xuất sắc",
            OverallAssessment::Good => "Hoàn thành tốt",
            OverallAssessment::Satisfactory => "Hoàn thành",
            OverallAssessment::NeedsSupport => "Chưa hoàn thành",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Assessment {
    pub subject: String,
    pub level: AssessmentLevel,
    /// Periodic test score, only present for core subjects at end of term.
    pub score: Option<u8>,
}

#[derive(Debug, Clone, Serialize)]
pub struct Student {
    pub id: u32,
    pub name: String,
    pub class_id: String,
    pub assessments: Vec<Assessment>,
    pub overall: OverallAssessment,
}

impl Student {
    pub fn needs_support_subjects(&self) -> Vec<String> {
        self.assessments
            .iter()
            .filter(|a| a.level == AssessmentLevel::NeedsSupport)
            .map(|a| a.subject.clone())
            .collect()
    }

    pub fn needs_support(&self) -> bool {
        self.assessments
            .iter()
            .any(|a| a.level == AssessmentLevel::NeedsSupport)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SchoolClass {
    pub id: String,
    pub name: String,
    pub teacher_id: String,
    pub grade: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Teacher {
    pub id: String,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GradeEntryStatus {
    pub subject: String,
    pub total: u32,
    pub entered: u32,
}

/// Gradebook dataset for one reporting period.
#[derive(Debug, Clone, Serialize)]
pub struct GradebookSnapshot {
    pub period: ReportingPeriod,
    pub students: Vec<Student>,
    pub classes: Vec<SchoolClass>,
    pub teachers: Vec<Teacher>,
    pub grade_entry: Vec<GradeEntryStatus>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ClassActivity {
    pub id: String,
    pub name: String,
    pub grade: u32,
    pub assigned_materials: u32,
    pub completed_materials: u32,
    pub assigned_tests: u32,
    pub completed_tests: u32,
    /// Leaderboard key: completed materials plus completed tests.
    pub total_score: u32,
}

impl ClassActivity {
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        grade: u32,
        (assigned_materials, completed_materials): (u32, u32),
        (assigned_tests, completed_tests): (u32, u32),
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            grade,
            assigned_materials,
            completed_materials,
            assigned_tests,
            completed_tests,
            total_score: completed_materials + completed_tests,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SubjectStat {
    pub name: String,
    pub lectures_created: u32,
    pub materials_assigned: u32,
    pub completed_materials: u32,
    pub tests_created: u32,
    pub assigned_tests: u32,
    pub completed_tests: u32,
    /// Materials and tests combined.
    pub completion_rate: u32,
    pub test_completion_rate: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TeacherLmsStat {
    pub id: String,
    pub name: String,
    pub subject: String,
    pub assigned_grade: String,
    pub lectures_created: u32,
    pub materials_assigned: u32,
    pub completed_materials: u32,
    pub tests_created: u32,
    pub assigned_tests: u32,
    pub completed_tests: u32,
    pub completion_rate: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StudentLmsStat {
    pub id: String,
    pub name: String,
    pub class_name: String,
    pub grade: u32,
    pub completed_materials: u32,
    pub completed_tests: u32,
    pub average_test_score: f64,
}

/// LMS usage dataset produced once per dashboard load.
#[derive(Debug, Clone, Serialize)]
pub struct LmsSnapshot {
    pub classes: Vec<ClassActivity>,
    pub subjects: Vec<SubjectStat>,
    pub teachers: Vec<TeacherLmsStat>,
    pub students: Vec<StudentLmsStat>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WeakTestInfo {
    pub subject: String,
    pub score: f64,
    pub test_name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StudentWithWeakTests {
    pub id: String,
    pub name: String,
    pub weak_tests: Vec<WeakTestInfo>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ClassWeakStats {
    pub class_name: String,
    /// Counts tests, not students.
    pub total_weak_tests: u32,
    pub students: Vec<StudentWithWeakTests>,
}

/// Input of the warning drill-down for one grade.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct WarningState {
    pub grade: u32,
    pub total_weak: u32,
    pub total_assigned: u32,
}

/// Why a student is listed in a detail view.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", content = "content", rename_all = "snake_case")]
pub enum Reason {
    Subjects(Vec<String>),
    Summary(String),
}

#[derive(Debug, Clone, Serialize)]
pub struct DetailItem {
    pub student: Student,
    pub reason: Reason,
}

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "snake_case")]
pub enum MetricKind {
    Material,
    Test,
}

/// Leaderboard sort key.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "snake_case")]
pub enum Criterion {
    Quantity,
    Rate,
}

/// The current dashboard selection, passed explicitly into the pipeline.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selection {
    pub period: ReportingPeriod,
    pub kind: MetricKind,
    pub criterion: Criterion,
    pub grade: Option<u32>,
    pub search: Option<String>,
}

impl Default for Selection {
    fn default() -> Self {
        Self {
            period: ReportingPeriod::MidTerm1,
            kind: MetricKind::Material,
            criterion: Criterion::Quantity,
            grade: None,
            search: None,
        }
    }
}
