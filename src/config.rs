use std::path::Path;

use anyhow::{bail, Context, Result};
use rand::rngs::StdRng;
use rand::{RngCore, SeedableRng};
use serde::Deserialize;

/// Top-level configuration. Every key is optional.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Seed for dataset synthesis. Absent means a fresh dataset on every run.
    #[serde(default)]
    pub seed: Option<u64>,

    /// Inject the demonstration correlations (weak "Toán", focus class 5A2).
    #[serde(default = "default_true")]
    pub demo_bias: bool,

    #[serde(default)]
    pub roster: RosterConfig,

    #[serde(default)]
    pub lms: LmsConfig,

    #[serde(default)]
    pub library: LibraryConfig,
}

/// Gradebook roster sizing.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RosterConfig {
    #[serde(default = "default_min_size")]
    pub min_size: u32,
    #[serde(default = "default_max_size")]
    pub max_size: u32,
}

/// LMS snapshot shape.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LmsConfig {
    #[serde(default = "default_subjects")]
    pub subjects: Vec<String>,

    #[serde(default = "default_teacher_count")]
    pub teacher_count: usize,

    #[serde(default = "default_student_count")]
    pub student_count: usize,

    /// Share of assigned tests counted as completed in the quality chart.
    #[serde(default = "default_test_completion_ratio")]
    pub test_completion_ratio: f64,

    /// Share of assigned tests counted as weak in the quality chart.
    #[serde(default = "default_weak_ratio")]
    pub weak_ratio_of_assigned: f64,
}

/// Resource library contributions.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LibraryConfig {
    #[serde(default = "default_library_teachers")]
    pub teacher_count: usize,

    /// Chance that a teacher outside an idle department contributed at all.
    #[serde(default = "default_contribution_ratio")]
    pub contribution_ratio: f64,

    /// Upper bound on one teacher's contributions.
    #[serde(default = "default_max_contributions")]
    pub max_contributions: u32,

    #[serde(default = "default_approved_ratio")]
    pub approved_ratio: f64,

    #[serde(default = "default_rejected_ratio")]
    pub rejected_ratio: f64,

    /// Department ids whose teachers never contribute.
    #[serde(default = "default_idle_departments")]
    pub idle_departments: Vec<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            seed: None,
            demo_bias: true,
            roster: RosterConfig::default(),
            lms: LmsConfig::default(),
            library: LibraryConfig::default(),
        }
    }
}

impl Default for RosterConfig {
    fn default() -> Self {
        Self {
            min_size: default_min_size(),
            max_size: default_max_size(),
        }
    }
}

impl Default for LmsConfig {
    fn default() -> Self {
        Self {
            subjects: default_subjects(),
            teacher_count: default_teacher_count(),
            student_count: default_student_count(),
            test_completion_ratio: default_test_completion_ratio(),
            weak_ratio_of_assigned: default_weak_ratio(),
        }
    }
}

impl Default for LibraryConfig {
    fn default() -> Self {
        Self {
            teacher_count: default_library_teachers(),
            contribution_ratio: default_contribution_ratio(),
            max_contributions: default_max_contributions(),
            approved_ratio: default_approved_ratio(),
            rejected_ratio: default_rejected_ratio(),
            idle_departments: default_idle_departments(),
        }
    }
}

impl Config {
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("reading config file {}", path.display()))?;
        Self::parse(&text)
    }

    pub fn parse(text: &str) -> Result<Self> {
        let cfg: Config = toml::from_str(text).context("parsing config TOML")?;
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn validate(&self) -> Result<()> {
        if self.roster.min_size > self.roster.max_size {
            bail!(
                "roster.min_size ({}) must not exceed roster.max_size ({})",
                self.roster.min_size,
                self.roster.max_size
            );
        }

        for (key, value) in [
            ("lms.test_completion_ratio", self.lms.test_completion_ratio),
            ("lms.weak_ratio_of_assigned", self.lms.weak_ratio_of_assigned),
            ("library.contribution_ratio", self.library.contribution_ratio),
            ("library.approved_ratio", self.library.approved_ratio),
            ("library.rejected_ratio", self.library.rejected_ratio),
        ] {
            if !(0.0..=1.0).contains(&value) {
                bail!("{key} must be within [0, 1], got {value}");
            }
        }

        if self.library.approved_ratio + self.library.rejected_ratio > 1.0 {
            bail!(
                "library.approved_ratio ({}) and library.rejected_ratio ({}) must not sum above 1",
                self.library.approved_ratio,
                self.library.rejected_ratio
            );
        }

        if self.library.max_contributions == 0 {
            bail!("library.max_contributions must be at least 1");
        }

        Ok(())
    }

    /// Generator for one-shot synthesis: seeded when configured, otherwise
    /// drawn from the thread-local entropy source.
    pub fn synthesis_rng(&self) -> Box<dyn RngCore> {
        match self.seed {
            Some(seed) => Box::new(StdRng::seed_from_u64(seed)),
            None => Box::new(rand::thread_rng()),
        }
    }
}

fn default_true() -> bool {
    true
}

fn default_min_size() -> u32 {
    28
}

fn default_max_size() -> u32 {
    35
}

fn default_subjects() -> Vec<String> {
    [
        "Toán",
        "Ngữ văn",
        "Tiếng Anh",
        "Khoa học tự nhiên",
        "Lịch sử và Địa lí",
        "Tin học",
    ]
    .into_iter()
    .map(String::from)
    .collect()
}

fn default_teacher_count() -> usize {
    50
}

fn default_student_count() -> usize {
    200
}

fn default_test_completion_ratio() -> f64 {
    0.8
}

fn default_weak_ratio() -> f64 {
    0.1
}

fn default_library_teachers() -> usize {
    125
}

fn default_contribution_ratio() -> f64 {
    0.7
}

fn default_max_contributions() -> u32 {
    60
}

fn default_approved_ratio() -> f64 {
    0.95
}

fn default_rejected_ratio() -> f64 {
    0.01
}

fn default_idle_departments() -> Vec<String> {
    vec!["TO-TC".to_string()]
}
