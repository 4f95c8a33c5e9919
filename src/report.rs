use std::fmt::Write;

use chrono::NaiveDate;

use crate::config::LmsConfig;
use crate::metrics::{self, EntryBand, GradebookOverview, ShareCount};
use crate::models::{Criterion, GradebookSnapshot, LmsSnapshot, MetricKind};
use crate::ranking::{self, Podium, Scored};
use crate::risk;
use crate::synth::grade_label;

fn share(label: &str, value: &ShareCount) -> String {
    format!("- {label}: {} ({:.1}%)", value.count, value.percent)
}

fn entry_marker(band: EntryBand) -> &'static str {
    match band {
        EntryBand::Complete => "done",
        EntryBand::InProgress => "in progress",
        EntryBand::Lagging => "lagging",
    }
}

pub fn build_report(
    generated_on: NaiveDate,
    gradebook: &GradebookSnapshot,
    lms: &LmsSnapshot,
    config: &LmsConfig,
) -> String {
    let mut output = String::new();

    let _ = writeln!(output, "# School Insights Report");
    let _ = writeln!(
        output,
        "Generated on {} for {}",
        generated_on,
        gradebook.period.label()
    );
    let _ = writeln!(output);

    write_gradebook(&mut output, gradebook);
    write_lms(&mut output, lms, config);

    output
}

fn write_gradebook(output: &mut String, gradebook: &GradebookSnapshot) {
    let _ = writeln!(output, "## Gradebook Overview");

    match metrics::gradebook_overview(gradebook) {
        GradebookOverview::EndTerm {
            total_students,
            excellent,
            good,
            needs_support,
            ..
        } => {
            let _ = writeln!(output, "- Students: {total_students}");
            let _ = writeln!(output, "{}", share("Excellent", &excellent));
            let _ = writeln!(output, "{}", share("Good", &good));
            let _ = writeln!(output, "{}", share("Needs support", &needs_support));
        }
        GradebookOverview::MidTerm {
            total_students,
            needs_support,
            worst_class,
            worst_subject,
            ..
        } => {
            let _ = writeln!(output, "- Students: {total_students}");
            let _ = writeln!(output, "{}", share("Needs support in a subject", &needs_support));
            match worst_class {
                Some(class) => {
                    let _ = writeln!(
                        output,
                        "- Most affected class: {} ({:.1}% of students)",
                        class.class_name, class.percent
                    );
                }
                None => {
                    let _ = writeln!(output, "- Most affected class: none");
                }
            }
            match worst_subject {
                Some(subject) => {
                    let _ = writeln!(
                        output,
                        "- Most affected subject: {} ({} students)",
                        subject.subject, subject.count
                    );
                }
                None => {
                    let _ = writeln!(output, "- Most affected subject: none");
                }
            }
        }
    }

    let _ = writeln!(output);
    let _ = writeln!(output, "## Classes Needing Attention");
    let flagged: Vec<_> = metrics::class_performance(gradebook)
        .into_iter()
        .filter(|c| c.warning)
        .collect();
    if flagged.is_empty() {
        let _ = writeln!(output, "No class above the support threshold.");
    } else {
        for class in &flagged {
            let _ = writeln!(
                output,
                "- {} ({}): {} of {} students need support",
                class.class_name, class.teacher_name, class.bad, class.total_students
            );
        }
    }

    let _ = writeln!(output);
    let _ = writeln!(output, "## Grade Entry Progress");
    for progress in metrics::grade_entry_progress(&gradebook.grade_entry) {
        let _ = writeln!(
            output,
            "- {}: {}/{} ({:.0}%, {})",
            progress.subject,
            progress.entered,
            progress.total,
            progress.percentage,
            entry_marker(progress.band)
        );
    }
    let _ = writeln!(output);
}

fn write_lms(output: &mut String, lms: &LmsSnapshot, config: &LmsConfig) {
    let overview = metrics::lms_overview(lms);
    let _ = writeln!(output, "## Digital Learning Activity");
    let _ = writeln!(output, "- Lectures created: {}", overview.total_lectures);
    let _ = writeln!(
        output,
        "- Materials completed: {}/{} ({:.1}%)",
        overview.total_completed_materials,
        overview.total_assigned_materials,
        overview.global_completion_rate
    );
    let _ = writeln!(
        output,
        "- Tests assigned: {} ({} ongoing, {} finished)",
        overview.total_assigned_tests, overview.ongoing_tests, overview.finished_tests
    );

    let _ = writeln!(output);
    let _ = writeln!(output, "## Subject Podium");
    let podium = Podium::from_ranked(ranking::rank_by_criterion(
        &lms.subjects,
        MetricKind::Material,
        Criterion::Quantity,
    ));
    if podium.top.is_empty() {
        let _ = writeln!(output, "No subjects recorded.");
    }
    for ranked in &podium.top {
        let _ = writeln!(
            output,
            "{}. {}: {} materials created, {}% completed",
            ranked.rank,
            ranked.entry.name,
            ranked.entry.created(MetricKind::Material),
            ranked.entry.display_rate(MetricKind::Material)
        );
    }

    let _ = writeln!(output);
    let _ = writeln!(output, "## Class Leaderboard");
    for ranked in ranking::class_leaderboard(&lms.classes).iter().take(3) {
        let _ = writeln!(
            output,
            "{}. {} ({}): score {}",
            ranked.rank,
            ranked.entry.name,
            grade_label(ranked.entry.grade),
            ranked.entry.total_score
        );
    }

    let _ = writeln!(output);
    let _ = writeln!(output, "## At-Risk Classes");
    let warnings = risk::warning_states(&metrics::test_quality(&lms.classes, config));
    if warnings.is_empty() {
        let _ = writeln!(output, "No class reached the weak-test threshold.");
    } else {
        for state in warnings {
            let drill = risk::drilldown(state, &config.subjects);
            let _ = writeln!(
                output,
                "- {}: {} weak of {} assigned tests ({:.1}%) across {} classes",
                grade_label(state.grade),
                drill.total_weak_tests(),
                state.total_assigned,
                drill.weak_rate,
                drill.classes.len()
            );
        }
    }
}
