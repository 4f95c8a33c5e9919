use rand::distributions::{Distribution, WeightedIndex};
use rand::Rng;
use serde::Serialize;

use crate::config::LibraryConfig;
use crate::metrics::{completion_rate, percent_one_decimal};
use crate::models::{Criterion, MetricKind};
use crate::ranking::{self, Ranked, Scored};
use crate::synth::synthesize_name;

/// Subject departments (tổ chuyên môn) as `(id, name)`.
pub const DEPARTMENTS: [(&str, &str); 6] = [
    ("TO-TOAN", "Tổ Toán - Tin"),
    ("TO-VAN", "Tổ Ngữ Văn"),
    ("TO-KHTN", "Tổ Khoa học Tự nhiên"),
    ("TO-KHXH", "Tổ Khoa học Xã hội"),
    ("TO-NN", "Tổ Ngoại Ngữ"),
    ("TO-TC", "Tổ Thể chất - Nghệ thuật"),
];

/// Resource types and their relative frequency.
pub const RESOURCE_TYPES: [(&str, u32); 7] = [
    ("Hình ảnh", 500),
    ("Video", 300),
    ("Tài liệu", 400),
    ("Tương tác - AI", 150),
    ("Tương tác - H5P", 200),
    ("Âm thanh", 100),
    ("Thí nghiệm ảo", 79),
];

/// School-year months, August to March, and their relative activity.
pub const CONTRIBUTION_MONTHS: [(&str, u32); 8] = [
    ("T8", 120),
    ("T9", 250),
    ("T10", 300),
    ("T11", 450),
    ("T12", 200),
    ("T1", 150),
    ("T2", 180),
    ("T3", 250),
];

pub const TOP_UNITS: usize = 5;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LibraryTeacher {
    pub name: String,
    pub department_id: String,
    pub department_name: String,
    pub contributed: u32,
    pub approved: u32,
    pub rejected: u32,
}

impl LibraryTeacher {
    pub fn pending(&self) -> u32 {
        self.contributed
            .saturating_sub(self.approved)
            .saturating_sub(self.rejected)
    }
}

/// One department's contribution totals.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UnitContribution {
    pub id: String,
    pub name: String,
    pub contributed: u32,
    pub approved: u32,
    pub teachers: u32,
    pub contributing_teachers: u32,
}

impl UnitContribution {
    pub fn has_contributed(&self) -> bool {
        self.contributed > 0
    }
}

// Quantity is the contribution count, rate the approved share.
impl Scored for UnitContribution {
    fn display_name(&self) -> &str {
        &self.name
    }

    fn created(&self, _kind: MetricKind) -> u32 {
        self.contributed
    }

    fn assigned(&self, _kind: MetricKind) -> u32 {
        self.contributed
    }

    fn completed(&self, _kind: MetricKind) -> u32 {
        self.approved
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LabeledCount {
    pub label: String,
    pub count: u32,
}

#[derive(Debug, Clone, Serialize)]
pub struct LibrarySnapshot {
    /// Every department, largest contributor first. Idle ones included.
    pub units: Vec<UnitContribution>,
    /// Largest contributor first.
    pub teachers: Vec<LibraryTeacher>,
    pub resource_types: Vec<LabeledCount>,
    pub monthly: Vec<LabeledCount>,
}

impl LibrarySnapshot {
    pub fn total_resources(&self) -> u32 {
        self.teachers.iter().map(|t| t.contributed).sum()
    }
}

fn draw_teacher<R: Rng + ?Sized>(
    rng: &mut R,
    config: &LibraryConfig,
    (department_id, department_name): (&str, &str),
) -> LibraryTeacher {
    let idle = config.idle_departments.iter().any(|d| d == department_id);
    let contributed = if !idle && rng.gen_bool(config.contribution_ratio) {
        rng.gen_range(1..=config.max_contributions)
    } else {
        0
    };

    let mut approved = 0;
    let mut rejected = 0;
    for _ in 0..contributed {
        let roll: f64 = rng.gen();
        if roll < config.approved_ratio {
            approved += 1;
        } else if roll < config.approved_ratio + config.rejected_ratio {
            rejected += 1;
        }
    }

    LibraryTeacher {
        name: synthesize_name(rng),
        department_id: department_id.to_string(),
        department_name: department_name.to_string(),
        contributed,
        approved,
        rejected,
    }
}

/// Sums teacher contributions per department. Every department appears,
/// including those nobody contributed to.
pub fn aggregate_units(teachers: &[LibraryTeacher]) -> Vec<UnitContribution> {
    let mut units: Vec<UnitContribution> = DEPARTMENTS
        .iter()
        .map(|(id, name)| {
            let members = teachers.iter().filter(|t| t.department_id == *id);
            let mut unit = UnitContribution {
                id: id.to_string(),
                name: name.to_string(),
                contributed: 0,
                approved: 0,
                teachers: 0,
                contributing_teachers: 0,
            };
            for teacher in members {
                unit.teachers += 1;
                unit.contributed += teacher.contributed;
                unit.approved += teacher.approved;
                if teacher.contributed > 0 {
                    unit.contributing_teachers += 1;
                }
            }
            unit
        })
        .collect();
    units.sort_by(|a, b| b.contributed.cmp(&a.contributed));
    units
}

/// Splits `total` items over weighted labels; the counts always sum to `total`.
fn spread<R: Rng + ?Sized>(rng: &mut R, total: u32, weights: &[(&str, u32)]) -> Vec<LabeledCount> {
    let mut counts = vec![0u32; weights.len()];
    if let Ok(index) = WeightedIndex::new(weights.iter().map(|(_, weight)| *weight)) {
        for _ in 0..total {
            counts[index.sample(rng)] += 1;
        }
    }
    weights
        .iter()
        .zip(counts)
        .map(|((label, _), count)| LabeledCount {
            label: label.to_string(),
            count,
        })
        .collect()
}

pub fn library_snapshot<R: Rng + ?Sized>(rng: &mut R, config: &LibraryConfig) -> LibrarySnapshot {
    let mut teachers: Vec<LibraryTeacher> = (0..config.teacher_count)
        .map(|_| {
            let department = DEPARTMENTS[rng.gen_range(0..DEPARTMENTS.len())];
            draw_teacher(rng, config, department)
        })
        .collect();
    teachers.sort_by(|a, b| b.contributed.cmp(&a.contributed));

    let units = aggregate_units(&teachers);
    let total: u32 = teachers.iter().map(|t| t.contributed).sum();
    let resource_types = spread(rng, total, &RESOURCE_TYPES);
    let monthly = spread(rng, total, &CONTRIBUTION_MONTHS);

    tracing::info!(
        teachers = teachers.len(),
        resources = total,
        "library snapshot synthesized"
    );

    LibrarySnapshot {
        units,
        teachers,
        resource_types,
        monthly,
    }
}

/// Headline cards of the resource library.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LibraryOverview {
    pub total_resources: u32,
    pub approved: u32,
    pub pending: u32,
    pub rejected: u32,
    pub approval_rate: f64,
    pub contributing_teachers: usize,
    pub total_teachers: usize,
    pub contributing_units: usize,
    pub total_units: usize,
    pub participation_rate: u32,
}

/// Integer percentage of departments with at least one contribution.
pub fn participation_rate(units: &[UnitContribution]) -> u32 {
    let contributing = units.iter().filter(|u| u.has_contributed()).count();
    completion_rate(contributing as u32, units.len() as u32)
}

pub fn library_overview(snapshot: &LibrarySnapshot) -> LibraryOverview {
    let total_resources = snapshot.total_resources();
    let approved = snapshot.teachers.iter().map(|t| t.approved).sum();
    let rejected = snapshot.teachers.iter().map(|t| t.rejected).sum();
    let pending = snapshot.teachers.iter().map(LibraryTeacher::pending).sum();

    LibraryOverview {
        total_resources,
        approved,
        pending,
        rejected,
        approval_rate: percent_one_decimal(f64::from(approved), f64::from(total_resources)),
        contributing_teachers: snapshot.teachers.iter().filter(|t| t.contributed > 0).count(),
        total_teachers: snapshot.teachers.len(),
        contributing_units: snapshot.units.iter().filter(|u| u.has_contributed()).count(),
        total_units: snapshot.units.len(),
        participation_rate: participation_rate(&snapshot.units),
    }
}

pub fn unit_leaderboard(units: &[UnitContribution], criterion: Criterion) -> Vec<Ranked<UnitContribution>> {
    ranking::rank_by_criterion(units, MetricKind::Material, criterion)
}

/// Largest contributors for the overview card. Idle departments are left out.
pub fn top_units(units: &[UnitContribution]) -> Vec<Ranked<UnitContribution>> {
    let contributing: Vec<UnitContribution> = units
        .iter()
        .filter(|u| u.has_contributed())
        .cloned()
        .collect();
    let mut ranked = unit_leaderboard(&contributing, Criterion::Quantity);
    ranked.truncate(TOP_UNITS);
    ranked
}

/// Case-insensitive match on department name or id.
pub fn filter_units(units: &[UnitContribution], query: Option<&str>) -> Vec<UnitContribution> {
    let needle = query.map(str::trim).unwrap_or_default().to_lowercase();
    units
        .iter()
        .filter(|u| {
            needle.is_empty()
                || u.name.to_lowercase().contains(&needle)
                || u.id.to_lowercase().contains(&needle)
        })
        .cloned()
        .collect()
}

/// Teachers of one department, largest contributor first, including those
/// with nothing contributed.
pub fn unit_roster(teachers: &[LibraryTeacher], unit_id: &str) -> Vec<LibraryTeacher> {
    let mut members: Vec<LibraryTeacher> = teachers
        .iter()
        .filter(|t| t.department_id.eq_ignore_ascii_case(unit_id))
        .cloned()
        .collect();
    members.sort_by(|a, b| b.contributed.cmp(&a.contributed));
    members
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum TeacherSortKey {
    Name,
    Department,
    Contributed,
}

/// Filters by name or department, then sorts on `key`. Equal keys keep the
/// incoming order in either direction.
pub fn sort_teachers(
    teachers: &[LibraryTeacher],
    query: Option<&str>,
    key: TeacherSortKey,
    ascending: bool,
) -> Vec<LibraryTeacher> {
    let needle = query.map(str::trim).unwrap_or_default().to_lowercase();
    let mut listed: Vec<LibraryTeacher> = teachers
        .iter()
        .filter(|t| {
            needle.is_empty()
                || t.name.to_lowercase().contains(&needle)
                || t.department_name.to_lowercase().contains(&needle)
        })
        .cloned()
        .collect();
    listed.sort_by(|a, b| {
        let ordering = match key {
            TeacherSortKey::Name => a.name.cmp(&b.name),
            TeacherSortKey::Department => a.department_name.cmp(&b.department_name),
            TeacherSortKey::Contributed => a.contributed.cmp(&b.contributed),
        };
        if ascending {
            ordering
        } else {
            ordering.reverse()
        }
    });
    listed
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn teacher(name: &str, department: usize, contributed: u32, approved: u32) -> LibraryTeacher {
        let (id, dept) = DEPARTMENTS[department];
        LibraryTeacher {
            name: name.to_string(),
            department_id: id.to_string(),
            department_name: dept.to_string(),
            contributed,
            approved,
            rejected: 0,
        }
    }

    fn snapshot() -> LibrarySnapshot {
        let mut rng = StdRng::seed_from_u64(17);
        library_snapshot(&mut rng, &LibraryConfig::default())
    }

    #[test]
    fn idle_department_never_contributes() {
        let snap = snapshot();
        assert_eq!(snap.teachers.len(), 125);
        for teacher in snap.teachers.iter().filter(|t| t.department_id == "TO-TC") {
            assert_eq!(teacher.contributed, 0);
        }
        let idle = snap.units.iter().find(|u| u.id == "TO-TC").unwrap();
        assert!(!idle.has_contributed());
    }

    #[test]
    fn statuses_and_distributions_add_up() {
        let snap = snapshot();
        let total = snap.total_resources();
        assert!(total > 0);
        for teacher in &snap.teachers {
            assert!(teacher.approved + teacher.rejected <= teacher.contributed);
            assert!(teacher.contributed <= 60);
        }
        let overview = library_overview(&snap);
        assert_eq!(overview.approved + overview.pending + overview.rejected, total);
        assert_eq!(snap.resource_types.iter().map(|t| t.count).sum::<u32>(), total);
        assert_eq!(snap.monthly.iter().map(|m| m.count).sum::<u32>(), total);
        assert_eq!(snap.monthly[0].label, "T8");
        assert_eq!(snap.units.iter().map(|u| u.contributed).sum::<u32>(), total);
    }

    #[test]
    fn teachers_and_units_are_sorted_by_contribution() {
        let snap = snapshot();
        assert!(snap.teachers.windows(2).all(|w| w[0].contributed >= w[1].contributed));
        assert!(snap.units.windows(2).all(|w| w[0].contributed >= w[1].contributed));
        assert_eq!(snap.units.len(), DEPARTMENTS.len());
    }

    #[test]
    fn participation_rounds_to_whole_percent() {
        let teachers = vec![
            teacher("a", 0, 10, 10),
            teacher("b", 1, 5, 5),
            teacher("c", 2, 3, 3),
            teacher("d", 3, 1, 1),
        ];
        let units = aggregate_units(&teachers);
        // 4 of 6 departments.
        assert_eq!(participation_rate(&units), 67);
        assert_eq!(participation_rate(&[]), 0);
    }

    #[test]
    fn top_units_skip_idle_departments() {
        let teachers = vec![teacher("a", 0, 10, 9), teacher("b", 4, 30, 20), teacher("c", 5, 0, 0)];
        let top = top_units(&aggregate_units(&teachers));
        let names: Vec<&str> = top.iter().map(|r| r.entry.name.as_str()).collect();
        assert_eq!(names, vec!["Tổ Ngoại Ngữ", "Tổ Toán - Tin"]);
        assert_eq!(top[0].rank, 1);
    }

    #[test]
    fn unit_rate_board_ranks_on_approval_share() {
        let teachers = vec![teacher("a", 0, 10, 9), teacher("b", 4, 30, 20), teacher("c", 1, 40, 36)];
        let units = aggregate_units(&teachers);
        let ranked = unit_leaderboard(&units, Criterion::Rate);
        // 0.9 ties with 0.9 and the larger contributor goes first.
        assert_eq!(ranked[0].entry.id, "TO-VAN");
        assert_eq!(ranked[1].entry.id, "TO-TOAN");
        assert_eq!(ranked[2].entry.id, "TO-NN");
        assert_eq!(ranked[0].entry.display_rate(MetricKind::Material), 90);
    }

    #[test]
    fn roster_keeps_zero_contributors() {
        let teachers = vec![
            teacher("a", 0, 0, 0),
            teacher("b", 0, 12, 12),
            teacher("c", 1, 7, 7),
        ];
        let roster = unit_roster(&teachers, "to-toan");
        let names: Vec<&str> = roster.iter().map(|t| t.name.as_str()).collect();
        assert_eq!(names, vec!["b", "a"]);
    }

    #[test]
    fn unit_search_matches_name_or_id() {
        let units = aggregate_units(&[]);
        assert_eq!(filter_units(&units, Some("ngữ")).len(), 2);
        assert_eq!(filter_units(&units, Some("to-khtn")).len(), 1);
        assert_eq!(filter_units(&units, None).len(), 6);
    }

    #[test]
    fn teacher_listing_sorts_both_ways() {
        let teachers = vec![
            teacher("Bình", 0, 5, 5),
            teacher("An", 1, 9, 9),
            teacher("Cường", 0, 1, 1),
        ];
        let by_count = sort_teachers(&teachers, None, TeacherSortKey::Contributed, false);
        assert_eq!(by_count[0].name, "An");
        let by_name = sort_teachers(&teachers, None, TeacherSortKey::Name, true);
        assert_eq!(by_name[0].name, "An");
        assert_eq!(by_name[2].name, "Cường");
        let math = sort_teachers(&teachers, Some("toán"), TeacherSortKey::Contributed, true);
        assert_eq!(math.len(), 2);
        assert_eq!(math[0].name, "Cường");
    }
}
