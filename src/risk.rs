use rand::Rng;
use serde::Serialize;

use crate::metrics::{percent_one_decimal, round1, ClassTestQuality};
use crate::models::{ClassWeakStats, StudentWithWeakTests, WarningState, WeakTestInfo};
use crate::prng::{derive_seed, SeededRng};

/// Weak share of assigned tests, in percent, at which a class is at risk.
pub const WARNING_THRESHOLD_PCT: u32 = 20;

const CLASS_SUFFIXES: [&str; 5] = ["A1", "A2", "A3", "A4", "A5"];
const MAX_TESTS_PER_STUDENT: u32 = 3;
const DRILLDOWN_SEED_KEY: &str = "weak-tests";

/// `weak / assigned >= 20%`, compared on integers so the boundary is exact.
pub fn is_at_risk(weak: u32, assigned: u32) -> bool {
    assigned > 0 && u64::from(weak) * 100 >= u64::from(assigned) * u64::from(WARNING_THRESHOLD_PCT)
}

/// Warning entries for every at-risk class, in chart order.
pub fn warning_states(quality: &[ClassTestQuality]) -> Vec<WarningState> {
    quality
        .iter()
        .filter(|q| q.at_risk)
        .map(|q| WarningState {
            grade: q.grade,
            total_weak: q.weak,
            total_assigned: q.assigned,
        })
        .collect()
}

/// Spreads exactly `target` weak tests over the five classes of `grade`.
///
/// Every weak test picks a class uniformly, then each class's quota is cut
/// into per-student bundles of one to three tests. Classes that drew nothing
/// are omitted.
pub fn distribute_weak_tests<R: Rng + ?Sized>(
    rng: &mut R,
    grade: u32,
    target: u32,
    subjects: &[String],
) -> Vec<ClassWeakStats> {
    let mut quotas = [0u32; CLASS_SUFFIXES.len()];
    for _ in 0..target {
        quotas[rng.gen_range(0..CLASS_SUFFIXES.len())] += 1;
    }

    CLASS_SUFFIXES
        .iter()
        .zip(quotas)
        .filter(|(_, quota)| *quota > 0)
        .map(|(suffix, quota)| {
            let class_code = format!("{grade}{suffix}");
            let mut students = Vec::new();
            let mut remaining = quota;
            let mut counter = 1;

            while remaining > 0 {
                let bundle = rng.gen_range(1..=MAX_TESTS_PER_STUDENT).min(remaining);
                let mut weak_tests: Vec<WeakTestInfo> = (0..bundle)
                    .map(|_| weak_test(rng, subjects))
                    .collect();
                weak_tests.sort_by(|a, b| {
                    a.score
                        .partial_cmp(&b.score)
                        .unwrap_or(std::cmp::Ordering::Equal)
                });

                students.push(StudentWithWeakTests {
                    id: format!("hs-{class_code}-{counter}"),
                    name: format!("Nguyễn Văn Học Sinh {counter}"),
                    weak_tests,
                });
                remaining -= bundle;
                counter += 1;
            }

            students.sort_by(|a, b| b.weak_tests.len().cmp(&a.weak_tests.len()));

            ClassWeakStats {
                class_name: format!("Lớp {class_code}"),
                total_weak_tests: quota,
                students,
            }
        })
        .collect()
}

fn weak_test<R: Rng + ?Sized>(rng: &mut R, subjects: &[String]) -> WeakTestInfo {
    let subject = if subjects.is_empty() {
        String::from("Chung")
    } else {
        subjects[rng.gen_range(0..subjects.len())].clone()
    };
    let score = round1(rng.gen::<f64>() * 4.0 + 0.5);
    WeakTestInfo {
        test_name: format!("Kiểm tra 15p {subject}"),
        subject,
        score,
    }
}

/// A class's weak tests as a share of the whole grade's assigned tests.
pub fn contribution_percentage(class_weak: u32, grade_assigned: u32) -> f64 {
    percent_one_decimal(f64::from(class_weak), f64::from(grade_assigned))
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ClassContribution {
    pub stats: ClassWeakStats,
    pub contribution_pct: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WarningDrilldown {
    pub state: WarningState,
    pub weak_rate: f64,
    pub classes: Vec<ClassContribution>,
}

impl WarningDrilldown {
    pub fn total_weak_tests(&self) -> u32 {
        self.classes.iter().map(|c| c.stats.total_weak_tests).sum()
    }
}

/// Reproducible drill-down for a warning: the same state always yields the
/// same classes, students and scores.
pub fn drilldown(state: WarningState, subjects: &[String]) -> WarningDrilldown {
    let seed = derive_seed(state.grade, DRILLDOWN_SEED_KEY).wrapping_add(state.total_weak);
    let mut rng = SeededRng::new(seed);
    let classes = distribute_weak_tests(&mut rng, state.grade, state.total_weak, subjects)
        .into_iter()
        .map(|stats| ClassContribution {
            contribution_pct: contribution_percentage(stats.total_weak_tests, state.total_assigned),
            stats,
        })
        .collect();

    tracing::debug!(
        grade = state.grade,
        weak = state.total_weak,
        assigned = state.total_assigned,
        "built warning drill-down"
    );

    WarningDrilldown {
        state,
        weak_rate: contribution_percentage(state.total_weak, state.total_assigned),
        classes,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn subjects() -> Vec<String> {
        vec!["Toán".to_string(), "Tiếng Anh".to_string()]
    }

    fn student_test_total(classes: &[ClassWeakStats]) -> usize {
        classes
            .iter()
            .flat_map(|c| c.students.iter())
            .map(|s| s.weak_tests.len())
            .sum()
    }

    #[test]
    fn threshold_is_inclusive() {
        assert!(is_at_risk(20, 100));
        assert!(!is_at_risk(19, 100));
        assert!(is_at_risk(1, 5));
        assert!(!is_at_risk(0, 0));
        assert!(!is_at_risk(3, 0));
    }

    #[test]
    fn distribution_preserves_every_weak_test() {
        let mut rng = StdRng::seed_from_u64(11);
        for target in [0, 1, 2, 7, 40, 313] {
            let classes = distribute_weak_tests(&mut rng, 6, target, &subjects());
            let class_total: u32 = classes.iter().map(|c| c.total_weak_tests).sum();
            assert_eq!(class_total, target);
            assert_eq!(student_test_total(&classes), target as usize);
            for class in &classes {
                let per_class: usize = class.students.iter().map(|s| s.weak_tests.len()).sum();
                assert_eq!(per_class, class.total_weak_tests as usize);
            }
        }
    }

    #[test]
    fn bundles_hold_one_to_three_sorted_tests() {
        let mut rng = StdRng::seed_from_u64(3);
        let classes = distribute_weak_tests(&mut rng, 8, 120, &subjects());
        for class in &classes {
            assert!(class.class_name.starts_with("Lớp 8A"));
            assert!(class.total_weak_tests > 0);
            for pair in class.students.windows(2) {
                assert!(pair[0].weak_tests.len() >= pair[1].weak_tests.len());
            }
            for student in &class.students {
                assert!((1..=3).contains(&student.weak_tests.len()));
                assert!(student.id.starts_with("hs-8A"));
                for pair in student.weak_tests.windows(2) {
                    assert!(pair[0].score <= pair[1].score);
                }
                for test in &student.weak_tests {
                    assert!((0.5..=4.5).contains(&test.score));
                    assert_eq!(test.test_name, format!("Kiểm tra 15p {}", test.subject));
                }
            }
        }
    }

    #[test]
    fn zero_target_yields_no_classes() {
        let mut rng = StdRng::seed_from_u64(1);
        assert!(distribute_weak_tests(&mut rng, 9, 0, &subjects()).is_empty());
    }

    #[test]
    fn contributions_sum_to_grade_weak_rate() {
        let state = WarningState {
            grade: 7,
            total_weak: 37,
            total_assigned: 150,
        };
        let drill = drilldown(state, &subjects());
        assert_eq!(drill.total_weak_tests(), 37);
        assert_eq!(drill.weak_rate, 24.7);
        let summed: f64 = drill.classes.iter().map(|c| c.contribution_pct).sum();
        // Each share is rounded to one decimal on its own.
        assert!((summed - drill.weak_rate).abs() <= 0.05 * drill.classes.len() as f64);
    }

    #[test]
    fn drilldown_is_reproducible() {
        let state = WarningState {
            grade: 6,
            total_weak: 12,
            total_assigned: 40,
        };
        assert_eq!(drilldown(state, &subjects()), drilldown(state, &subjects()));
    }

    #[test]
    fn only_at_risk_classes_raise_warnings() {
        use crate::config::LmsConfig;
        use crate::metrics::test_quality;
        use crate::models::ClassActivity;

        let config = LmsConfig {
            weak_ratio_of_assigned: 0.25,
            ..LmsConfig::default()
        };
        let classes = vec![
            ClassActivity::new("6a1", "Lớp 6A1", 6, (0, 0), (20, 16)),
            ClassActivity::new("7a1", "Lớp 7A1", 7, (0, 0), (0, 0)),
        ];
        let states = warning_states(&test_quality(&classes, &config));
        assert_eq!(
            states,
            vec![WarningState {
                grade: 6,
                total_weak: 5,
                total_assigned: 20
            }]
        );
    }
}
