use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{ArgGroup, Parser, Subcommand, ValueEnum};
use serde::Serialize;
use tracing_subscriber::{fmt, EnvFilter};

mod chart;
mod config;
mod error;
mod export;
mod grouping;
mod library;
mod metrics;
mod models;
mod prng;
mod ranking;
mod report;
mod risk;
mod synth;
mod workbook;

use config::Config;
use metrics::GradebookOverview;
use models::{Criterion, GradebookSnapshot, LmsSnapshot, MetricKind, ReportingPeriod, Selection};
use ranking::{Podium, Ranked, Scored};

#[derive(Parser)]
#[command(name = "school-insights")]
#[command(about = "Gradebook and LMS usage analytics for school leadership", long_about = None)]
struct Cli {
    /// Path to the TOML configuration file.
    #[arg(short, long, global = true, env = "SCHOOL_INSIGHTS_CONFIG")]
    config: Option<PathBuf>,

    /// Logging verbosity level (trace, debug, info, warn, error).
    #[arg(long, global = true, default_value = "warn")]
    log_level: String,

    /// Print results as JSON instead of text.
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Board {
    Subjects,
    Teachers,
    Classes,
    Students,
}

#[derive(Clone, Copy, PartialEq, Eq, ValueEnum)]
enum ExportTarget {
    Subjects,
    Teachers,
    Students,
    Warnings,
}

#[derive(Clone, Copy, PartialEq, Eq, ValueEnum)]
enum LibraryView {
    Overview,
    Units,
    Teachers,
    Types,
    Months,
}

#[derive(Clone, Copy, PartialEq, Eq, ValueEnum)]
enum ExportFormat {
    Xlsx,
    Csv,
}

#[derive(Subcommand)]
enum Commands {
    /// Gradebook cards, class performance and grade entry for a period
    Overview {
        #[arg(long, value_enum, default_value = "mid_term_1")]
        period: ReportingPeriod,
        /// List flagged students grouped by grade and class
        #[arg(long)]
        details: bool,
    },
    /// LMS usage cards and per-class material and test charts
    Lms,
    /// Ranked leaderboard with podium
    #[command(group(
        ArgGroup::new("filter")
            .args(["grade", "search"])
            .multiple(false)
    ))]
    Leaderboard {
        #[arg(long, value_enum, default_value = "subjects")]
        board: Board,
        #[arg(long, value_enum, default_value = "material")]
        kind: MetricKind,
        #[arg(long, value_enum, default_value = "quantity")]
        criterion: Criterion,
        /// Student grade filter
        #[arg(long)]
        grade: Option<u32>,
        /// Teacher search over name, subject and grade
        #[arg(long)]
        search: Option<String>,
    },
    /// Score spectrum for one grade and subject
    Spectrum {
        #[arg(long, default_value_t = 6)]
        grade: u32,
        #[arg(long, default_value = "Toán")]
        subject: String,
    },
    /// At-risk classes and their weak-test drill-down
    Warnings {
        #[arg(long)]
        grade: Option<u32>,
        /// Show every student with weak tests
        #[arg(long)]
        details: bool,
    },
    /// Write a leaderboard or warning workbook
    #[command(group(
        ArgGroup::new("filter")
            .args(["grade", "search"])
            .multiple(false)
    ))]
    Export {
        #[arg(long, value_enum)]
        target: ExportTarget,
        #[arg(long, value_enum, default_value = "material")]
        kind: MetricKind,
        /// Student grade filter, or the warning grade
        #[arg(long)]
        grade: Option<u32>,
        #[arg(long)]
        search: Option<String>,
        #[arg(long, value_enum, default_value = "xlsx")]
        format: ExportFormat,
        #[arg(long, default_value = ".")]
        out_dir: PathBuf,
    },
    /// Resource library contributions by department and teacher
    Library {
        #[arg(long, value_enum, default_value = "overview")]
        view: LibraryView,
        /// Department ranking: contributions or approved share
        #[arg(long, value_enum, default_value = "quantity")]
        criterion: Criterion,
        /// List the teachers of one department (units view)
        #[arg(long)]
        unit: Option<String>,
        /// Search departments or teachers by name
        #[arg(long)]
        search: Option<String>,
        #[arg(long, value_enum, default_value = "contributed")]
        sort: library::TeacherSortKey,
        #[arg(long)]
        ascending: bool,
    },
    /// Generate a markdown report
    Report {
        #[arg(long, value_enum, default_value = "end_year")]
        period: ReportingPeriod,
        #[arg(long, default_value = "report.md")]
        out: PathBuf,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = EnvFilter::try_new(&cli.log_level)
        .with_context(|| format!("invalid log level: {}", cli.log_level))?;
    fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let cfg = load_config(cli.config.as_deref())?;
    tracing::info!(seed = ?cfg.seed, demo_bias = cfg.demo_bias, "configuration loaded");

    match cli.command {
        Commands::Overview { period, details } => {
            let selection = Selection {
                period,
                ..Selection::default()
            };
            let gradebook = gradebook(&cfg, selection.period);
            overview(&gradebook, details, cli.json)?;
        }
        Commands::Lms => {
            let lms = lms(&cfg);
            lms_view(&lms, &cfg, cli.json)?;
        }
        Commands::Leaderboard {
            board,
            kind,
            criterion,
            grade,
            search,
        } => {
            let selection = Selection {
                kind,
                criterion,
                grade,
                search,
                ..Selection::default()
            };
            let lms = lms(&cfg);
            leaderboard(&lms, board, &selection, cli.json)?;
        }
        Commands::Spectrum { grade, subject } => {
            let spectrum = metrics::score_spectrum(grade, &subject);
            if cli.json {
                print_json(&SpectrumView {
                    chart: chart::spectrum_chart(&spectrum),
                    spectrum,
                })?;
            } else {
                println!(
                    "{} / {}: {} students, average {:.1}, pass {:.1}%, fail {:.1}%",
                    synth::grade_label(grade),
                    subject,
                    spectrum.total_students,
                    spectrum.average,
                    spectrum.pass_rate,
                    spectrum.fail_rate
                );
                for (band, count) in metrics::SCORE_BANDS.iter().zip(spectrum.bands) {
                    println!("  {:>6}: {count}", band.label);
                }
            }
        }
        Commands::Warnings { grade, details } => {
            let lms = lms(&cfg);
            warnings(&lms, &cfg, grade, details, cli.json)?;
        }
        Commands::Export {
            target,
            kind,
            grade,
            search,
            format,
            out_dir,
        } => {
            let lms = lms(&cfg);
            let selection = Selection {
                kind,
                grade,
                search,
                ..Selection::default()
            };
            let Some(book) = build_workbook(&lms, &cfg, target, &selection) else {
                println!("Nothing to export.");
                return Ok(());
            };
            let written = match format {
                ExportFormat::Xlsx => vec![workbook::save_xlsx(&book, &out_dir)
                    .with_context(|| format!("writing {}", book.file_name))?],
                ExportFormat::Csv => workbook::save_csv(&book, &out_dir)
                    .with_context(|| format!("writing CSV sheets for {}", book.file_name))?,
            };
            for path in written {
                println!("Wrote {}.", path.display());
            }
        }
        Commands::Library {
            view,
            criterion,
            unit,
            search,
            sort,
            ascending,
        } => {
            let mut rng = cfg.synthesis_rng();
            let snapshot = library::library_snapshot(&mut rng, &cfg.library);
            let query = LibraryQuery {
                criterion,
                unit,
                search,
                sort,
                ascending,
            };
            library_view(&snapshot, view, &query, cli.json)?;
        }
        Commands::Report { period, out } => {
            let gradebook = gradebook(&cfg, period);
            let lms = lms(&cfg);
            let today = chrono::Local::now().date_naive();
            let report = report::build_report(today, &gradebook, &lms, &cfg.lms);
            std::fs::write(&out, report)
                .with_context(|| format!("writing report to {}", out.display()))?;
            println!("Report written to {}.", out.display());
        }
    }

    Ok(())
}

fn load_config(path: Option<&Path>) -> Result<Config> {
    match path {
        Some(path) => Config::load(path)
            .with_context(|| format!("loading config from {}", path.display())),
        None => Ok(Config::default()),
    }
}

fn gradebook(cfg: &Config, period: ReportingPeriod) -> GradebookSnapshot {
    let mut rng = cfg.synthesis_rng();
    let teachers = synth::default_teachers();
    let classes = synth::default_classes(&teachers);
    let roster = synth::build_roster(&mut rng, classes, teachers, &cfg.roster);
    synth::gradebook_snapshot(&mut rng, &roster, period, cfg.demo_bias)
}

fn lms(cfg: &Config) -> LmsSnapshot {
    let mut rng = cfg.synthesis_rng();
    synth::lms_snapshot(&mut rng, &cfg.lms)
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    let text = serde_json::to_string_pretty(value).context("serializing output")?;
    println!("{text}");
    Ok(())
}

#[derive(Serialize)]
struct OverviewView {
    overview: GradebookOverview,
    classes: Vec<metrics::ClassPerformance>,
    grade_entry: Vec<metrics::EntryProgress>,
    watchlist: grouping::Watchlist,
    details: Option<Vec<grouping::GradeGroup>>,
}

fn overview(gradebook: &GradebookSnapshot, details: bool, json: bool) -> Result<()> {
    let overview = metrics::gradebook_overview(gradebook);
    let detail_items = match &overview {
        GradebookOverview::EndTerm {
            needs_support_details,
            ..
        }
        | GradebookOverview::MidTerm {
            needs_support_details,
            ..
        } => needs_support_details.clone(),
    };
    let view = OverviewView {
        classes: metrics::class_performance(gradebook),
        grade_entry: metrics::grade_entry_progress(&gradebook.grade_entry),
        watchlist: grouping::watchlist(&gradebook.students, gradebook.period),
        details: details.then(|| grouping::group_by_grade_class(detail_items, &gradebook.classes)),
        overview,
    };

    if json {
        return print_json(&view);
    }

    println!("Period: {}", gradebook.period.label());
    match &view.overview {
        GradebookOverview::EndTerm {
            total_students,
            excellent,
            good,
            needs_support,
            ..
        } => {
            println!("Students: {total_students}");
            println!("  Excellent: {} ({:.1}%)", excellent.count, excellent.percent);
            println!("  Good: {} ({:.1}%)", good.count, good.percent);
            println!("  Needs support: {} ({:.1}%)", needs_support.count, needs_support.percent);
        }
        GradebookOverview::MidTerm {
            total_students,
            needs_support,
            worst_class,
            worst_subject,
            ..
        } => {
            println!("Students: {total_students}");
            println!(
                "  Needs support in a subject: {} ({:.1}%)",
                needs_support.count, needs_support.percent
            );
            if let Some(class) = worst_class {
                println!("  Most affected class: {} ({:.1}%)", class.class_name, class.percent);
            }
            if let Some(subject) = worst_subject {
                println!("  Most affected subject: {} ({} students)", subject.subject, subject.count);
            }
        }
    }

    println!("Classes:");
    for class in &view.classes {
        println!(
            "  {} ({}): good {}, ok {}, needs support {}{}",
            class.class_name,
            class.teacher_name,
            class.good,
            class.ok,
            class.bad,
            if class.warning { "  [warning]" } else { "" }
        );
    }

    println!("Grade entry:");
    for progress in &view.grade_entry {
        println!(
            "  {}: {}/{} ({:.0}%)",
            progress.subject, progress.entered, progress.total, progress.percentage
        );
    }

    if !view.watchlist.top_performers.is_empty() {
        println!("Top performers:");
        for student in &view.watchlist.top_performers {
            println!("  {} ({})", student.name, student.class_id);
        }
    }
    println!("Needs attention:");
    for item in &view.watchlist.needs_attention {
        println!("  {} ({}): {}", item.student.name, item.student.class_id, reason_text(&item.reason));
    }

    if let Some(groups) = &view.details {
        for group in groups {
            println!("Khối {} ({} students)", group.grade, group.item_count());
            for class in &group.classes {
                println!("  {}", class.class.name);
                for item in &class.items {
                    println!("    {}: {}", item.student.name, reason_text(&item.reason));
                }
            }
        }
    }

    Ok(())
}

fn reason_text(reason: &models::Reason) -> String {
    match reason {
        models::Reason::Subjects(subjects) => subjects.join(", "),
        models::Reason::Summary(text) => text.clone(),
    }
}

#[derive(Serialize)]
struct LmsView {
    overview: metrics::LmsOverview,
    materials: chart::ChartData,
    test_quality: chart::ChartData,
    classes: Vec<metrics::ClassTestQuality>,
}

fn lms_view(lms: &LmsSnapshot, cfg: &Config, json: bool) -> Result<()> {
    let quality = metrics::test_quality(&lms.classes, &cfg.lms);
    let view = LmsView {
        overview: metrics::lms_overview(lms),
        materials: chart::material_chart(&metrics::material_progress(&lms.classes)),
        test_quality: chart::test_quality_chart(&quality),
        classes: quality,
    };

    if json {
        return print_json(&view);
    }

    let o = &view.overview;
    println!("Lectures created: {}", o.total_lectures);
    println!(
        "Materials completed: {}/{} ({:.1}%)",
        o.total_completed_materials, o.total_assigned_materials, o.global_completion_rate
    );
    println!(
        "Tests assigned: {} ({} ongoing, {} finished)",
        o.total_assigned_tests, o.ongoing_tests, o.finished_tests
    );
    for progress in metrics::material_progress(&lms.classes) {
        println!(
            "  {}: materials {}/{} ({}%)",
            progress.class_name, progress.completed, progress.total, progress.percentage
        );
    }
    for q in &view.classes {
        println!(
            "  {}: tests excellent {:.0}%, average {:.0}%, weak {:.0}%{}",
            q.class_name,
            q.excellent_pct(),
            q.average_pct(),
            q.weak_pct(),
            if q.at_risk { "  [at risk]" } else { "" }
        );
    }
    Ok(())
}

#[derive(Serialize)]
struct BoardView<T> {
    podium: Podium<T>,
    chart: Option<chart::ChartData>,
}

fn leaderboard(lms: &LmsSnapshot, board: Board, selection: &Selection, json: bool) -> Result<()> {
    match board {
        Board::Subjects => {
            let ranked = ranking::rank_by_criterion(&lms.subjects, selection.kind, selection.criterion);
            scored_board(ranked, selection, json)
        }
        Board::Teachers => {
            let teachers = ranking::filter_teachers(&lms.teachers, selection.search.as_deref());
            let ranked = ranking::rank_by_criterion(&teachers, selection.kind, selection.criterion);
            scored_board(ranked, selection, json)
        }
        Board::Classes => {
            let podium = Podium::from_ranked(ranking::class_leaderboard(&lms.classes));
            if json {
                return print_json(&BoardView { podium, chart: None });
            }
            print_podium(&podium, |c| format!("{} ({}) score {}", c.name, synth::grade_label(c.grade), c.total_score));
            Ok(())
        }
        Board::Students => {
            let podium = Podium::from_ranked(ranking::student_leaderboard(&lms.students, selection.grade));
            if json {
                return print_json(&BoardView { podium, chart: None });
            }
            print_podium(&podium, |s| {
                format!(
                    "{} ({}) average {}, {} materials, {} tests",
                    s.name, s.class_name, s.average_test_score, s.completed_materials, s.completed_tests
                )
            });
            Ok(())
        }
    }
}

fn scored_board<T: Scored + Serialize>(ranked: Vec<Ranked<T>>, selection: &Selection, json: bool) -> Result<()> {
    let kind = selection.kind;
    let chart = chart::leaderboard_chart(&ranked, kind, selection.criterion);
    let podium = Podium::from_ranked(ranked);
    if json {
        return print_json(&BoardView {
            podium,
            chart: Some(chart),
        });
    }
    print_podium(&podium, |entry| {
        format!(
            "{}: {} created, {} assigned, {}% completed",
            entry.chart_label(),
            entry.created(kind),
            entry.assigned(kind),
            entry.display_rate(kind)
        )
    });
    Ok(())
}

fn print_podium<T>(podium: &Podium<T>, describe: impl Fn(&T) -> String) {
    if podium.top.is_empty() {
        println!("No entries.");
        return;
    }
    println!("Podium:");
    for place in podium.display_order() {
        println!("  #{} {}", place.rank, describe(&place.entry));
    }
    for place in &podium.others {
        println!("  {}. {}", place.rank, describe(&place.entry));
    }
}

#[derive(Serialize)]
struct SpectrumView {
    spectrum: metrics::ScoreSpectrum,
    chart: chart::ChartData,
}

fn warnings(lms: &LmsSnapshot, cfg: &Config, grade: Option<u32>, details: bool, json: bool) -> Result<()> {
    let drilldowns: Vec<risk::WarningDrilldown> = risk::warning_states(&metrics::test_quality(&lms.classes, &cfg.lms))
        .into_iter()
        .filter(|state| grade.map_or(true, |g| state.grade == g))
        .map(|state| risk::drilldown(state, &cfg.lms.subjects))
        .collect();

    if json {
        return print_json(&drilldowns);
    }
    if drilldowns.is_empty() {
        println!("No class reached the weak-test threshold.");
        return Ok(());
    }

    for drill in &drilldowns {
        println!(
            "{}: {} weak of {} assigned ({:.1}%)",
            synth::grade_label(drill.state.grade),
            drill.state.total_weak,
            drill.state.total_assigned,
            drill.weak_rate
        );
        for class in &drill.classes {
            println!(
                "  {}: {} weak tests ({:.1}% of grade)",
                class.stats.class_name, class.stats.total_weak_tests, class.contribution_pct
            );
            if details {
                for student in &class.stats.students {
                    let tests: Vec<String> = student
                        .weak_tests
                        .iter()
                        .map(|t| format!("{} ({})", t.subject, t.score))
                        .collect();
                    println!("    {}: {}", student.name, tests.join(", "));
                }
            }
        }
    }
    Ok(())
}

struct LibraryQuery {
    criterion: Criterion,
    unit: Option<String>,
    search: Option<String>,
    sort: library::TeacherSortKey,
    ascending: bool,
}

#[derive(Serialize)]
struct LibraryOverviewView {
    overview: library::LibraryOverview,
    top_units: Vec<Ranked<library::UnitContribution>>,
    monthly: chart::ChartData,
}

fn library_view(
    snapshot: &library::LibrarySnapshot,
    view: LibraryView,
    query: &LibraryQuery,
    json: bool,
) -> Result<()> {
    match view {
        LibraryView::Overview => {
            let overview = LibraryOverviewView {
                overview: library::library_overview(snapshot),
                top_units: library::top_units(&snapshot.units),
                monthly: chart::count_chart("Học liệu đóng góp", &snapshot.monthly),
            };
            if json {
                return print_json(&overview);
            }
            let o = &overview.overview;
            println!(
                "Resources: {} ({} approved, {} pending, {} rejected; {:.1}% approved)",
                o.total_resources, o.approved, o.pending, o.rejected, o.approval_rate
            );
            println!("Contributing teachers: {}/{}", o.contributing_teachers, o.total_teachers);
            println!(
                "Contributing departments: {}/{} ({}% participation)",
                o.contributing_units, o.total_units, o.participation_rate
            );
            println!("Top departments:");
            for ranked in &overview.top_units {
                println!("  {}. {}: {} resources", ranked.rank, ranked.entry.name, ranked.entry.contributed);
            }
            println!("By month:");
            for month in &snapshot.monthly {
                println!("  {}: {}", month.label, month.count);
            }
        }
        LibraryView::Units => {
            if let Some(unit) = &query.unit {
                let roster = library::unit_roster(&snapshot.teachers, unit);
                if json {
                    return print_json(&roster);
                }
                if roster.is_empty() {
                    println!("No teachers in department {unit}.");
                }
                for (index, teacher) in roster.iter().enumerate() {
                    println!("  {}. {}: {} resources", index + 1, teacher.name, teacher.contributed);
                }
                return Ok(());
            }

            let units = library::filter_units(&snapshot.units, query.search.as_deref());
            let ranked = library::unit_leaderboard(&units, query.criterion);
            let chart = chart::leaderboard_chart(&ranked, MetricKind::Material, query.criterion);
            let podium = Podium::from_ranked(ranked);
            if json {
                return print_json(&BoardView {
                    podium,
                    chart: Some(chart),
                });
            }
            print_podium(&podium, |unit| {
                format!(
                    "{} ({}): {} resources, {}% approved{}",
                    unit.name,
                    unit.id,
                    unit.contributed,
                    unit.display_rate(MetricKind::Material),
                    if unit.has_contributed() { "" } else { "  [no contributions]" }
                )
            });
        }
        LibraryView::Teachers => {
            let teachers = library::sort_teachers(
                &snapshot.teachers,
                query.search.as_deref(),
                query.sort,
                query.ascending,
            );
            if json {
                return print_json(&teachers);
            }
            if teachers.is_empty() {
                println!("No teachers match.");
            }
            for (index, teacher) in teachers.iter().enumerate() {
                println!(
                    "  {}. {} ({}): {}",
                    index + 1,
                    teacher.name,
                    teacher.department_name,
                    teacher.contributed
                );
            }
        }
        LibraryView::Types | LibraryView::Months => {
            let (series, counts) = if view == LibraryView::Types {
                ("Số học liệu", &snapshot.resource_types)
            } else {
                ("Học liệu đóng góp", &snapshot.monthly)
            };
            if json {
                return print_json(&chart::count_chart(series, counts));
            }
            for count in counts {
                println!("  {}: {}", count.label, count.count);
            }
        }
    }
    Ok(())
}

fn build_workbook(
    lms: &LmsSnapshot,
    cfg: &Config,
    target: ExportTarget,
    selection: &Selection,
) -> Option<export::Workbook> {
    match target {
        ExportTarget::Subjects => Some(export::subject_workbook(&lms.subjects, selection.kind)),
        ExportTarget::Teachers => {
            let teachers = ranking::filter_teachers(&lms.teachers, selection.search.as_deref());
            Some(export::teacher_workbook(&teachers, selection.kind))
        }
        ExportTarget::Students => Some(export::student_workbook(&lms.students, selection.grade)),
        ExportTarget::Warnings => {
            let states = risk::warning_states(&metrics::test_quality(&lms.classes, &cfg.lms));
            let state = match selection.grade {
                Some(grade) => states.into_iter().find(|s| s.grade == grade),
                None => states.into_iter().next(),
            };
            state.and_then(|state| export::warning_workbook(&risk::drilldown(state, &cfg.lms.subjects)))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::error::ErrorKind;
    use clap::CommandFactory;

    #[test]
    fn command_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn report_defaults_to_end_of_year() {
        let cli = Cli::try_parse_from(["school-insights", "report"]).unwrap();
        assert_eq!(cli.log_level, "warn");
        assert!(!cli.json);
        match cli.command {
            Commands::Report { period, out } => {
                assert_eq!(period, ReportingPeriod::EndYear);
                assert_eq!(out, PathBuf::from("report.md"));
            }
            _ => panic!("expected the report command"),
        }
    }

    #[test]
    fn export_accepts_one_filter() {
        let cli = Cli::try_parse_from([
            "school-insights",
            "export",
            "--target",
            "students",
            "--grade",
            "7",
            "--format",
            "csv",
        ])
        .unwrap();
        match cli.command {
            Commands::Export {
                target,
                grade,
                search,
                format,
                ..
            } => {
                assert!(target == ExportTarget::Students);
                assert_eq!(grade, Some(7));
                assert!(search.is_none());
                assert!(format == ExportFormat::Csv);
            }
            _ => panic!("expected the export command"),
        }
    }

    #[test]
    fn export_rejects_grade_with_search() {
        let result = Cli::try_parse_from([
            "school-insights",
            "export",
            "--target",
            "teachers",
            "--grade",
            "7",
            "--search",
            "Lan",
        ]);
        match result {
            Err(err) => assert_eq!(err.kind(), ErrorKind::ArgumentConflict),
            Ok(_) => panic!("grade and search must conflict"),
        }
    }

    #[test]
    fn export_requires_a_target() {
        match Cli::try_parse_from(["school-insights", "export"]) {
            Err(err) => assert_eq!(err.kind(), ErrorKind::MissingRequiredArgument),
            Ok(_) => panic!("target is required"),
        }
    }

    #[test]
    fn library_parses_teacher_listing() {
        let cli = Cli::try_parse_from([
            "school-insights",
            "--json",
            "library",
            "--view",
            "teachers",
            "--sort",
            "name",
            "--ascending",
        ])
        .unwrap();
        assert!(cli.json);
        match cli.command {
            Commands::Library {
                view,
                sort,
                ascending,
                criterion,
                ..
            } => {
                assert!(view == LibraryView::Teachers);
                assert_eq!(sort, library::TeacherSortKey::Name);
                assert!(ascending);
                assert_eq!(criterion, Criterion::Quantity);
            }
            _ => panic!("expected the library command"),
        }
    }
}
