use serde::Serialize;

use crate::library::LabeledCount;
use crate::metrics::{ClassMaterialProgress, ClassTestQuality, ScoreSpectrum, SCORE_BANDS};
use crate::models::{Criterion, MetricKind};
use crate::ranking::{Ranked, Scored};

/// Ordered labels plus equally long named series.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartData {
    pub labels: Vec<String>,
    pub series: Vec<Series>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Series {
    pub name: String,
    pub values: Vec<f64>,
    pub hidden: bool,
}

impl Series {
    fn visible(name: &str, values: Vec<f64>) -> Self {
        Self {
            name: name.to_string(),
            values,
            hidden: false,
        }
    }
}

impl ChartData {
    #[cfg(test)]
    pub fn is_consistent(&self) -> bool {
        self.series.iter().all(|s| s.values.len() == self.labels.len())
    }

    #[cfg(test)]
    pub fn series(&self, name: &str) -> Option<&Series> {
        self.series.iter().find(|s| s.name == name)
    }
}

pub const RATE_SERIES: &str = "Tỷ lệ hoàn thành (%)";

pub fn quantity_series_name(kind: MetricKind) -> &'static str {
    match kind {
        MetricKind::Material => "Số học liệu",
        MetricKind::Test => "Số bài kiểm tra",
    }
}

/// Quantity and rate series over an already ranked list. Only the series for
/// the active criterion is visible.
pub fn leaderboard_chart<T: Scored>(
    ranked: &[Ranked<T>],
    kind: MetricKind,
    criterion: Criterion,
) -> ChartData {
    ChartData {
        labels: ranked.iter().map(|r| r.entry.chart_label()).collect(),
        series: vec![
            Series {
                name: quantity_series_name(kind).to_string(),
                values: ranked.iter().map(|r| f64::from(r.entry.created(kind))).collect(),
                hidden: criterion != Criterion::Quantity,
            },
            Series {
                name: RATE_SERIES.to_string(),
                values: ranked
                    .iter()
                    .map(|r| f64::from(r.entry.display_rate(kind)))
                    .collect(),
                hidden: criterion != Criterion::Rate,
            },
        ],
    }
}

pub fn material_chart(progress: &[ClassMaterialProgress]) -> ChartData {
    ChartData {
        labels: progress.iter().map(|p| p.class_name.clone()).collect(),
        series: vec![
            Series::visible(
                "Đã hoàn thành",
                progress.iter().map(|p| f64::from(p.completed)).collect(),
            ),
            Series::visible(
                "Chưa hoàn thành",
                progress.iter().map(|p| f64::from(p.unfinished)).collect(),
            ),
        ],
    }
}

/// Stacked shares of assigned tests per class.
pub fn test_quality_chart(quality: &[ClassTestQuality]) -> ChartData {
    let share = |f: fn(&ClassTestQuality) -> f64| quality.iter().map(f).collect::<Vec<f64>>();
    ChartData {
        labels: quality.iter().map(|q| q.class_name.clone()).collect(),
        series: vec![
            Series::visible("Giỏi", share(ClassTestQuality::excellent_pct)),
            Series::visible("Trung bình", share(ClassTestQuality::average_pct)),
            Series::visible("Yếu", share(ClassTestQuality::weak_pct)),
            Series::visible("Chưa làm", share(|q| 100.0 - q.completed_pct())),
        ],
    }
}

pub fn spectrum_chart(spectrum: &ScoreSpectrum) -> ChartData {
    ChartData {
        labels: SCORE_BANDS
            .iter()
            .map(|band| format!("{} điểm", band.label))
            .collect(),
        series: vec![Series::visible(
            "Số học sinh",
            spectrum.bands.iter().map(|count| f64::from(*count)).collect(),
        )],
    }
}

/// Single visible series over labelled counts, such as resource types or
/// monthly contributions.
pub fn count_chart(series: &str, counts: &[LabeledCount]) -> ChartData {
    ChartData {
        labels: counts.iter().map(|c| c.label.clone()).collect(),
        series: vec![Series::visible(
            series,
            counts.iter().map(|c| f64::from(c.count)).collect(),
        )],
    }
}
