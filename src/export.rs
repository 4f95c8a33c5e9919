use serde::Serialize;

use crate::models::{Criterion, MetricKind, StudentLmsStat, SubjectStat, TeacherLmsStat};
use crate::ranking::{rank_by_criterion, student_leaderboard, Ranked, Scored};
use crate::risk::WarningDrilldown;

/// Spreadsheet applications reject longer sheet names.
pub const MAX_SHEET_NAME_CHARS: usize = 31;

const RANK: &str = "Hạng";
const QUANTITY_SHEET: &str = "Thống kê theo Số lượng";

/// One tab of an exported workbook: a header row plus uniform string records.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Sheet {
    pub name: String,
    pub columns: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl Sheet {
    fn new(name: &str, columns: &[&str]) -> Self {
        Self {
            name: truncate_sheet_name(name),
            columns: columns.iter().map(|c| c.to_string()).collect(),
            rows: Vec::new(),
        }
    }

    fn push(&mut self, row: Vec<String>) {
        debug_assert_eq!(row.len(), self.columns.len());
        self.rows.push(row);
    }

    /// Row `index` as `(header, value)` pairs.
    #[cfg(test)]
    pub fn record(&self, index: usize) -> Option<Vec<(&str, &str)>> {
        let row = self.rows.get(index)?;
        Some(
            self.columns
                .iter()
                .map(String::as_str)
                .zip(row.iter().map(String::as_str))
                .collect(),
        )
    }

    #[cfg(test)]
    pub fn column(&self, header: &str) -> Option<Vec<&str>> {
        let index = self.columns.iter().position(|c| c == header)?;
        Some(self.rows.iter().map(|r| r[index].as_str()).collect())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Workbook {
    pub file_name: String,
    pub sheets: Vec<Sheet>,
}

pub fn truncate_sheet_name(name: &str) -> String {
    name.chars().take(MAX_SHEET_NAME_CHARS).collect()
}

fn percent(value: u32) -> String {
    format!("{value}%")
}

struct Labels {
    created: &'static str,
    assigned: &'static str,
    completed: &'static str,
    assigned_total: &'static str,
}

fn subject_labels(kind: MetricKind) -> Labels {
    match kind {
        MetricKind::Material => Labels {
            created: "Học liệu số đã tạo",
            assigned: "Học liệu đã giao",
            completed: "Học liệu hoàn thành",
            assigned_total: "Tổng số học liệu đã giao",
        },
        MetricKind::Test => Labels {
            created: "Bài kiểm tra đã tạo",
            assigned: "Bài kiểm tra đã giao",
            completed: "Bài kiểm tra hoàn thành",
            assigned_total: "Tổng số bài kiểm tra đã giao",
        },
    }
}

/// Subject leaderboard workbook: one sheet ranked by quantity and one ranked
/// by completion rate, each sorted on its own.
pub fn subject_workbook(subjects: &[SubjectStat], kind: MetricKind) -> Workbook {
    let labels = subject_labels(kind);
    let file_name = match kind {
        MetricKind::Material => "Thong_ke_Mon_hoc_theo_Hoc_lieu_so.xlsx",
        MetricKind::Test => "Thong_ke_Mon_hoc_theo_Bai_kiem_tra.xlsx",
    };

    let mut by_quantity = Sheet::new(
        QUANTITY_SHEET,
        &[RANK, "Tên môn học", labels.created, labels.assigned],
    );
    for Ranked { rank, entry } in rank_by_criterion(subjects, kind, Criterion::Quantity) {
        by_quantity.push(vec![
            rank.to_string(),
            entry.name.clone(),
            entry.created(kind).to_string(),
            entry.assigned(kind).to_string(),
        ]);
    }

    let mut by_rate = Sheet::new(
        "Thống kê theo Tỷ lệ hoàn thành",
        &[
            RANK,
            "Tên môn học",
            "Tỷ lệ hoàn thành (%)",
            labels.completed,
            labels.assigned_total,
        ],
    );
    for Ranked { rank, entry } in rank_by_criterion(subjects, kind, Criterion::Rate) {
        by_rate.push(vec![
            rank.to_string(),
            entry.name.clone(),
            percent(entry.display_rate(kind)),
            entry.completed(kind).to_string(),
            entry.assigned(kind).to_string(),
        ]);
    }

    Workbook {
        file_name: file_name.to_string(),
        sheets: vec![by_quantity, by_rate],
    }
}

/// Teacher leaderboard workbook. Callers pass the already search-filtered list.
pub fn teacher_workbook(teachers: &[TeacherLmsStat], kind: MetricKind) -> Workbook {
    let (file_name, created, assigned) = match kind {
        MetricKind::Material => (
            "Thong_ke_Giao_vien_theo_Hoc_lieu.xlsx",
            "Học liệu số đã tạo",
            "Học liệu đã giao học sinh",
        ),
        MetricKind::Test => (
            "Thong_ke_Giao_vien_theo_Kiem_tra.xlsx",
            "Bài kiểm tra đã tạo",
            "Bài kiểm tra đã giao học sinh",
        ),
    };
    let columns = [
        RANK,
        "Họ và tên",
        "Môn học",
        "Khối",
        created,
        assigned,
        "Tỷ lệ học sinh hoàn thành (%)",
    ];

    let sheet = |name: &str, criterion: Criterion| {
        let mut sheet = Sheet::new(name, &columns);
        for Ranked { rank, entry } in rank_by_criterion(teachers, kind, criterion) {
            sheet.push(vec![
                rank.to_string(),
                entry.name.clone(),
                entry.subject.clone(),
                entry.assigned_grade.clone(),
                entry.created(kind).to_string(),
                entry.assigned(kind).to_string(),
                percent(entry.display_rate(kind)),
            ]);
        }
        sheet
    };

    Workbook {
        file_name: file_name.to_string(),
        sheets: vec![
            sheet(QUANTITY_SHEET, Criterion::Quantity),
            sheet("Thống kê theo Tỷ lệ", Criterion::Rate),
        ],
    }
}

pub fn student_workbook(students: &[StudentLmsStat], grade: Option<u32>) -> Workbook {
    let mut sheet = Sheet::new(
        "Thống kê Học sinh",
        &[
            RANK,
            "Học sinh",
            "Khối - Lớp",
            "Học liệu số đã hoàn thành",
            "Bài kiểm tra hoàn thành",
            "Tổng điểm trung bình tất cả bài kiểm tra",
        ],
    );
    for Ranked { rank, entry } in student_leaderboard(students, grade) {
        sheet.push(vec![
            rank.to_string(),
            entry.name,
            format!("{} - {}", entry.grade, entry.class_name),
            entry.completed_materials.to_string(),
            entry.completed_tests.to_string(),
            entry.average_test_score.to_string(),
        ]);
    }

    Workbook {
        file_name: "Thong_ke_Hoc_sinh.xlsx".to_string(),
        sheets: vec![sheet],
    }
}

/// One sheet per class of the drill-down. `None` when there is nothing to list.
pub fn warning_workbook(drilldown: &WarningDrilldown) -> Option<Workbook> {
    if drilldown.classes.is_empty() {
        return None;
    }

    let sheets = drilldown
        .classes
        .iter()
        .map(|class| {
            let mut sheet = Sheet::new(
                &class.stats.class_name,
                &["STT", "Họ và tên", "Tổng số bài yếu", "Nội dung cần chú ý"],
            );
            for (index, student) in class.stats.students.iter().enumerate() {
                let notes: Vec<String> = student
                    .weak_tests
                    .iter()
                    .map(|t| format!("{} ({})", t.subject, t.score))
                    .collect();
                sheet.push(vec![
                    (index + 1).to_string(),
                    student.name.clone(),
                    student.weak_tests.len().to_string(),
                    notes.join(", "),
                ]);
            }
            sheet
        })
        .collect();

    Some(Workbook {
        file_name: format!("Canh_bao_hoc_tap_Khoi_{}.xlsx", drilldown.state.grade),
        sheets,
    })
}
