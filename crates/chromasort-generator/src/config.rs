//! Generator configuration.
//!
//! Every parameter the generator uses is carried by [`GeneratorConfig`] and
//! passed in explicitly. All structs deserialize with defaults, so a partial
//! JSON document overrides only the fields it names.

use chromasort_core::{Color, Difficulty};
use chromasort_solver::SearchLimits;
use serde::{Deserialize, Serialize};

/// Shape and search budget of the levels in one difficulty tier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TierParams {
    /// Number of distinct colors; each fills one container.
    pub colors: usize,
    /// Capacity of every container, and the count of each color.
    pub capacity: usize,
    /// Number of containers that start empty.
    pub empty_containers: usize,
    /// Bounds for the solvability search of each candidate.
    #[serde(default)]
    pub limits: SearchLimits,
}

impl TierParams {
    /// Creates tier parameters with default search bounds.
    #[must_use]
    pub fn new(colors: usize, capacity: usize, empty_containers: usize) -> Self {
        Self {
            colors,
            capacity,
            empty_containers,
            limits: SearchLimits::default(),
        }
    }

    /// Returns a copy with different search bounds.
    #[must_use]
    pub fn with_limits(mut self, limits: SearchLimits) -> Self {
        self.limits = limits;
        self
    }

    /// Returns the total number of containers in a level of this tier.
    #[must_use]
    pub fn container_count(&self) -> usize {
        self.colors + self.empty_containers
    }
}

/// Parameters for each difficulty tier.
///
/// # Examples
///
/// ```
/// use chromasort_core::Difficulty;
/// use chromasort_generator::TierTable;
///
/// let tiers = TierTable::default();
/// assert!(tiers.validate().is_ok());
/// assert!(tiers.get(Difficulty::Easy).colors < tiers.get(Difficulty::Expert).colors);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TierTable {
    /// Easy tier.
    pub easy: TierParams,
    /// Medium tier.
    pub medium: TierParams,
    /// Hard tier.
    pub hard: TierParams,
    /// Expert tier.
    pub expert: TierParams,
}

impl Default for TierTable {
    fn default() -> Self {
        Self {
            easy: TierParams::new(3, 3, 2),
            medium: TierParams::new(4, 4, 2).with_limits(SearchLimits {
                max_states: 20_000,
                max_depth: 60,
            }),
            hard: TierParams::new(5, 4, 2).with_limits(SearchLimits {
                max_states: 100_000,
                max_depth: 80,
            }),
            expert: TierParams::new(6, 4, 2).with_limits(SearchLimits {
                max_states: 300_000,
                max_depth: 100,
            }),
        }
    }
}

impl TierTable {
    /// Uses the same parameters for every tier.
    #[must_use]
    pub fn uniform(params: TierParams) -> Self {
        Self {
            easy: params,
            medium: params,
            hard: params,
            expert: params,
        }
    }

    /// Returns the parameters of `difficulty`.
    #[must_use]
    pub fn get(&self, difficulty: Difficulty) -> &TierParams {
        match difficulty {
            Difficulty::Easy => &self.easy,
            Difficulty::Medium => &self.medium,
            Difficulty::Hard => &self.hard,
            Difficulty::Expert => &self.expert,
        }
    }

    /// Returns a mutable reference to the parameters of `difficulty`.
    pub fn get_mut(&mut self, difficulty: Difficulty) -> &mut TierParams {
        match difficulty {
            Difficulty::Easy => &mut self.easy,
            Difficulty::Medium => &mut self.medium,
            Difficulty::Hard => &mut self.hard,
            Difficulty::Expert => &mut self.expert,
        }
    }

    /// Checks that every tier can be built and that tiers never shrink.
    ///
    /// # Errors
    ///
    /// Returns the first [`ConfigError`] found, checking tiers from easy to
    /// expert.
    pub fn validate(&self) -> Result<(), ConfigError> {
        for difficulty in Difficulty::ALL {
            let params = self.get(difficulty);
            if params.colors == 0 {
                return Err(ConfigError::NoColors { difficulty });
            }
            if params.colors > Color::COUNT {
                return Err(ConfigError::TooManyColors {
                    difficulty,
                    colors: params.colors,
                });
            }
            if params.capacity == 0 {
                return Err(ConfigError::ZeroCapacity { difficulty });
            }
            if params.empty_containers == 0 {
                return Err(ConfigError::NoEmptyContainer { difficulty });
            }
        }

        for pair in Difficulty::ALL.windows(2) {
            let (lower, higher) = (pair[0], pair[1]);
            let (a, b) = (self.get(lower), self.get(higher));
            if b.colors < a.colors
                || b.capacity < a.capacity
                || b.container_count() < a.container_count()
            {
                return Err(ConfigError::NotMonotone { lower, higher });
            }
        }
        Ok(())
    }
}

/// Complete generator configuration.
///
/// # Examples
///
/// ```
/// use chromasort_generator::GeneratorConfig;
///
/// let config: GeneratorConfig = serde_json::from_str(r#"{ "max_attempts": 20 }"#)?;
/// assert_eq!(config.max_attempts, 20);
/// assert_eq!(config.theme_attempts, 3);
/// assert!(!config.strict);
/// # Ok::<(), serde_json::Error>(())
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneratorConfig {
    /// Per-tier level shapes.
    pub tiers: TierTable,
    /// Candidates tried per level before giving up.
    pub max_attempts: u32,
    /// Whole-theme retries in pack generation.
    pub theme_attempts: u32,
    /// Reject candidates with any quality finding.
    pub strict: bool,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            tiers: TierTable::default(),
            max_attempts: 100,
            theme_attempts: 3,
            strict: false,
        }
    }
}

impl GeneratorConfig {
    /// Checks the tier table and attempt budgets.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] describing the first problem found.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_attempts == 0 {
            return Err(ConfigError::ZeroAttempts {
                field: "max_attempts",
            });
        }
        if self.theme_attempts == 0 {
            return Err(ConfigError::ZeroAttempts {
                field: "theme_attempts",
            });
        }
        self.tiers.validate()
    }
}

/// A configuration that cannot drive the generator.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum ConfigError {
    /// A tier asks for zero colors.
    #[display("{difficulty} tier has no colors")]
    NoColors {
        /// Offending tier.
        difficulty: Difficulty,
    },
    /// A tier asks for more colors than exist.
    #[display("{difficulty} tier asks for {colors} colors, but only 12 exist")]
    TooManyColors {
        /// Offending tier.
        difficulty: Difficulty,
        /// Requested colors.
        colors: usize,
    },
    /// A tier uses zero-capacity containers.
    #[display("{difficulty} tier has zero container capacity")]
    ZeroCapacity {
        /// Offending tier.
        difficulty: Difficulty,
    },
    /// A tier has no empty container, so no level could be solved.
    #[display("{difficulty} tier has no empty container")]
    NoEmptyContainer {
        /// Offending tier.
        difficulty: Difficulty,
    },
    /// A harder tier is smaller than an easier one.
    #[display("{higher} tier is smaller than {lower} tier")]
    NotMonotone {
        /// Easier tier.
        lower: Difficulty,
        /// Harder tier.
        higher: Difficulty,
    },
    /// An attempt budget is zero.
    #[display("{field} must be at least 1")]
    ZeroAttempts {
        /// Name of the offending field.
        field: &'static str,
    },
}
