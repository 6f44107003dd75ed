//! Batch generation of themed level packs.

use std::{
    collections::HashMap,
    sync::atomic::{AtomicUsize, Ordering},
};

use chromasort_core::Difficulty;
use rayon::prelude::*;

use crate::{
    GeneratedLevel, GenerationError, LevelGenerator, LevelSeed, PackError,
    level_generator::theme_slug,
};

/// What to do with a theme that fails every whole-theme retry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, derive_more::IsVariant)]
pub enum PackFailurePolicy {
    /// Stop and return [`PackError::ThemeFailed`].
    #[default]
    Abort,
    /// Record the theme in [`LevelPack::failed_themes`] and continue.
    Skip,
}

/// Parameters of a pack generation run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PackRequest {
    /// Themes in output order.
    pub themes: Vec<String>,
    /// Levels generated for each theme.
    pub levels_per_theme: u32,
    /// Base seed shared by every level in the pack.
    pub seed: u64,
    /// Handling of themes that cannot be completed.
    pub failure_policy: PackFailurePolicy,
}

impl PackRequest {
    /// Creates a request that aborts on the first failed theme.
    #[must_use]
    pub fn new<I, S>(themes: I, levels_per_theme: u32, seed: u64) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            themes: themes.into_iter().map(Into::into).collect(),
            levels_per_theme,
            seed,
            failure_policy: PackFailurePolicy::default(),
        }
    }

    /// Returns a copy with a different failure policy.
    #[must_use]
    pub fn with_failure_policy(mut self, failure_policy: PackFailurePolicy) -> Self {
        self.failure_policy = failure_policy;
        self
    }

    /// Returns the number of levels the pack would hold if every theme
    /// succeeded.
    #[must_use]
    pub fn total_levels(&self) -> usize {
        self.themes.len() * self.levels_per_theme as usize
    }
}

/// A theme that was skipped, with the error from its last attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ThemeFailure {
    /// Skipped theme.
    pub theme: String,
    /// Error from the final whole-theme attempt.
    pub error: GenerationError,
}

/// Result of a pack generation run.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct LevelPack {
    /// Generated levels, grouped by theme in request order, then by level
    /// number.
    pub levels: Vec<GeneratedLevel>,
    /// Themes skipped under [`PackFailurePolicy::Skip`].
    pub failed_themes: Vec<ThemeFailure>,
}

/// Returns the tier of level `level_number` (1-based) in a theme of
/// `levels_per_theme` levels.
///
/// The theme is split into quarters, easy to expert.
///
/// # Examples
///
/// ```
/// use chromasort_core::Difficulty;
/// use chromasort_generator::difficulty_for_position;
///
/// let tiers: Vec<_> = (1..=8).map(|n| difficulty_for_position(n, 8)).collect();
/// assert_eq!(tiers[0], Difficulty::Easy);
/// assert_eq!(tiers[2], Difficulty::Medium);
/// assert_eq!(tiers[7], Difficulty::Expert);
/// ```
#[must_use]
pub fn difficulty_for_position(level_number: u32, levels_per_theme: u32) -> Difficulty {
    let position = u64::from(level_number.saturating_sub(1));
    let quarter = position * 4 / u64::from(levels_per_theme.max(1));
    match quarter {
        0 => Difficulty::Easy,
        1 => Difficulty::Medium,
        2 => Difficulty::Hard,
        _ => Difficulty::Expert,
    }
}

/// Generates `levels_per_theme` levels for each theme in `request`.
///
/// Levels of one theme are generated in parallel. A theme in which any level
/// fails is regenerated as a whole with fresh seeds, up to the configured
/// `theme_attempts`. `progress(current, total)` is called as levels are
/// accepted. Calls come from worker threads and may arrive out of order, but
/// each `current` is reported at most once and the last call reports `total`
/// once every theme has finished or been skipped.
///
/// # Errors
///
/// Returns [`PackError::ThemeIdCollision`] before generating anything if two
/// themes map to the same level id prefix, and [`PackError::ThemeFailed`] if
/// a theme fails every attempt under [`PackFailurePolicy::Abort`].
pub fn generate_level_pack<F>(
    generator: &LevelGenerator,
    request: &PackRequest,
    progress: F,
) -> Result<LevelPack, PackError>
where
    F: Fn(usize, usize) + Sync,
{
    check_theme_ids(&request.themes)?;

    let total = request.total_levels();
    let per_theme = request.levels_per_theme as usize;
    let reported = AtomicUsize::new(0);
    let report = |current: usize| {
        if reported.fetch_max(current, Ordering::Relaxed) < current {
            progress(current, total);
        }
    };

    let mut pack = LevelPack::default();
    for (theme_index, theme) in request.themes.iter().enumerate() {
        let base = theme_index * per_theme;
        match generate_theme(generator, request, theme, base, &report) {
            Ok(levels) => {
                log::info!("theme {theme:?}: {} levels", levels.len());
                pack.levels.extend(levels);
            }
            Err((attempts, error)) => {
                log::warn!("theme {theme:?} failed after {attempts} attempt(s): {error}");
                if request.failure_policy.is_abort() {
                    return Err(PackError::ThemeFailed {
                        theme: theme.clone(),
                        attempts,
                        source: error,
                    });
                }
                pack.failed_themes.push(ThemeFailure {
                    theme: theme.clone(),
                    error,
                });
            }
        }
        report(base + per_theme);
    }
    Ok(pack)
}

fn check_theme_ids(themes: &[String]) -> Result<(), PackError> {
    let mut seen: HashMap<String, &str> = HashMap::new();
    for theme in themes {
        let slug = theme_slug(theme);
        if let Some(first) = seen.get(&slug) {
            return Err(PackError::ThemeIdCollision {
                first: (*first).to_owned(),
                second: theme.clone(),
                slug,
            });
        }
        seen.insert(slug, theme);
    }
    Ok(())
}

fn generate_theme(
    generator: &LevelGenerator,
    request: &PackRequest,
    theme: &str,
    base: usize,
    report: &(impl Fn(usize) + Sync),
) -> Result<Vec<GeneratedLevel>, (u32, GenerationError)> {
    let theme_attempts = generator.config().theme_attempts;
    let mut round = 0;
    loop {
        let done = AtomicUsize::new(0);
        let results: Vec<_> = (1..=request.levels_per_theme)
            .into_par_iter()
            .map(|level_number| {
                let difficulty = difficulty_for_position(level_number, request.levels_per_theme);
                let seed =
                    LevelSeed::derive_round(request.seed, difficulty, level_number, theme, round);
                let result = generator.generate_with_seed(difficulty, seed, level_number, theme);
                if result.is_ok() {
                    report(base + done.fetch_add(1, Ordering::Relaxed) + 1);
                }
                result
            })
            .collect();
        round += 1;

        match results.into_iter().collect::<Result<Vec<_>, _>>() {
            Ok(levels) => return Ok(levels),
            Err(error) if round >= theme_attempts => return Err((round, error)),
            Err(error) => {
                log::debug!("theme {theme:?}: round {round} failed, retrying: {error}");
            }
        }
    }
}
