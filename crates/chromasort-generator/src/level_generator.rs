use std::iter;

use chromasort_core::{Color, Difficulty, Level, PuzzleState, StarThresholds, rules};
use chromasort_solver::{BfsSolver, Validation, assess_quality};
use rand::seq::SliceRandom as _;
use rand_pcg::Pcg64;

use crate::{
    ConfigError, DifficultyEstimate, GenerationError, GeneratorConfig, LevelSeed, Rejection,
    TierParams, estimate_difficulty,
};

/// Generates solvable levels for the difficulty tiers of a [`GeneratorConfig`].
///
/// # Examples
///
/// ```
/// use chromasort_core::Difficulty;
/// use chromasort_generator::LevelGenerator;
///
/// let generator = LevelGenerator::default();
/// let generated = generator.generate_level(Difficulty::Easy, 42, 1, "Ocean")?;
/// assert_eq!(generated.level.id(), "ocean-001");
/// assert!(generated.validation.is_solvable());
///
/// // Same inputs, same level.
/// let again = generator.generate_level(Difficulty::Easy, 42, 1, "Ocean")?;
/// assert_eq!(again, generated);
/// # Ok::<(), chromasort_generator::GenerationError>(())
/// ```
#[derive(Debug, Clone, Default)]
pub struct LevelGenerator {
    config: GeneratorConfig,
}

/// A generated level along with the data used to produce and check it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedLevel {
    /// The accepted level.
    pub level: Level,
    /// Seed of the accepted candidate; it alone reproduces the layout.
    pub seed: LevelSeed,
    /// Solvability and quality of the initial state.
    pub validation: Validation,
    /// Heuristic difficulty of the initial state.
    pub estimate: DifficultyEstimate,
    /// Number of candidates tried, including the accepted one.
    pub attempts: u32,
}

impl LevelGenerator {
    /// Creates a generator from a checked configuration.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] if `config` cannot produce levels.
    pub fn new(config: GeneratorConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self { config })
    }

    /// Returns the configuration.
    #[must_use]
    pub fn config(&self) -> &GeneratorConfig {
        &self.config
    }

    /// Generates level `level_number` of `theme` at the given tier.
    ///
    /// The result depends only on the arguments and the configuration.
    ///
    /// # Errors
    ///
    /// Returns [`GenerationError::Exhausted`] if no candidate passed within
    /// the configured number of attempts.
    pub fn generate_level(
        &self,
        difficulty: Difficulty,
        seed: u64,
        level_number: u32,
        theme: &str,
    ) -> Result<GeneratedLevel, GenerationError> {
        let seed = LevelSeed::derive(seed, difficulty, level_number, theme);
        self.generate_with_seed(difficulty, seed, level_number, theme)
    }

    /// Generates a level starting from an explicit seed.
    ///
    /// # Errors
    ///
    /// Returns [`GenerationError::Exhausted`] if no candidate passed within
    /// the configured number of attempts.
    pub fn generate_with_seed(
        &self,
        difficulty: Difficulty,
        seed: LevelSeed,
        level_number: u32,
        theme: &str,
    ) -> Result<GeneratedLevel, GenerationError> {
        let params = self.config.tiers.get(difficulty);
        let solver = BfsSolver::new(params.limits);

        let mut attempt = 0;
        loop {
            let candidate_seed = seed.perturb(attempt);
            attempt += 1;

            let state = deal_candidate(params, &mut candidate_seed.rng())?;
            match self.screen(&solver, &state) {
                Ok(validation) => {
                    let generated = self.accept(
                        difficulty,
                        level_number,
                        theme,
                        params,
                        state,
                        candidate_seed,
                        validation,
                        attempt,
                    )?;
                    return Ok(generated);
                }
                Err(rejection) => {
                    log::debug!(
                        "{theme} {level_number} ({difficulty}): attempt {attempt} rejected: {rejection}"
                    );
                    if attempt >= self.config.max_attempts {
                        return Err(GenerationError::Exhausted {
                            difficulty,
                            level_number,
                            theme: theme.to_owned(),
                            attempts: attempt,
                            last_rejection: rejection,
                        });
                    }
                }
            }
        }
    }

    fn screen(&self, solver: &BfsSolver, state: &PuzzleState) -> Result<Validation, Rejection> {
        if rules::is_won(state) {
            return Err(Rejection::AlreadyWon);
        }
        if !rules::has_any_valid_move(state) {
            return Err(Rejection::NoValidMove);
        }

        let findings = assess_quality(state);
        if self.config.strict && !findings.is_empty() {
            return Err(Rejection::Quality {
                findings: findings.len(),
            });
        }

        let report = solver.solve(state);
        if !report.found() {
            return Err(Rejection::Unsolved {
                outcome: report.outcome(),
            });
        }
        Ok(Validation::new(report, findings))
    }

    #[expect(clippy::too_many_arguments)]
    fn accept(
        &self,
        difficulty: Difficulty,
        level_number: u32,
        theme: &str,
        params: &TierParams,
        state: PuzzleState,
        seed: LevelSeed,
        validation: Validation,
        attempts: u32,
    ) -> Result<GeneratedLevel, GenerationError> {
        let optimal = validation
            .optimal_move_count()
            .map_or(u32::MAX, |moves| u32::try_from(moves).unwrap_or(u32::MAX));
        let capacity = u32::try_from(params.capacity).unwrap_or(u32::MAX);

        let estimate = estimate_difficulty(&state);
        if estimate.tier() != difficulty {
            log::warn!(
                "{theme} {level_number}: declared {difficulty} but looks {} (score {})",
                estimate.tier(),
                estimate.score
            );
        }

        let description = format!(
            "{theme}, {difficulty} tier: sort {} colors across {} containers",
            params.colors,
            state.len()
        );
        let level = Level::new(
            level_id(theme, level_number),
            format!("{theme} {level_number}"),
            difficulty,
            state,
        )?
        .with_description(description)
        .with_star_thresholds(star_thresholds(optimal)?)
        .with_move_limit(optimal.saturating_mul(2).saturating_add(capacity))?;

        log::info!(
            "generated {} ({difficulty}): {optimal} moves, {} states, attempt {attempts}/{}",
            level.id(),
            validation.states_explored(),
            self.config.max_attempts
        );

        Ok(GeneratedLevel {
            level,
            seed,
            validation,
            estimate,
            attempts,
        })
    }
}

/// Deals a shuffled candidate: `capacity` units of each of `colors` colors
/// fill that many containers, followed by the empty containers.
fn deal_candidate(params: &TierParams, rng: &mut Pcg64) -> Result<PuzzleState, GenerationError> {
    let mut palette = Color::ALL;
    palette.shuffle(rng);

    let mut units: Vec<Color> = palette[..params.colors]
        .iter()
        .flat_map(|&color| iter::repeat_n(color, params.capacity))
        .collect();
    units.shuffle(rng);

    let filled = units.chunks(params.capacity).map(<[Color]>::to_vec);
    let empties = iter::repeat_with(Vec::new).take(params.empty_containers);
    PuzzleState::from_layout(params.capacity, filled.chain(empties))
        .map_err(GenerationError::from)
}

/// Star cutoffs for a level whose optimal solution takes `optimal` moves.
fn star_thresholds(optimal: u32) -> Result<StarThresholds, GenerationError> {
    let two_stars = optimal.saturating_add((optimal / 4).max(1));
    let one_star = optimal.saturating_add((optimal / 2).max(2));
    StarThresholds::new([optimal, two_stars, one_star]).map_err(GenerationError::from)
}

fn level_id(theme: &str, level_number: u32) -> String {
    format!("{}-{level_number:03}", theme_slug(theme))
}

/// Lowercases `theme` and joins its alphanumeric words with `-`.
pub(crate) fn theme_slug(theme: &str) -> String {
    let slug = theme
        .split(|c: char| !c.is_alphanumeric())
        .filter(|word| !word.is_empty())
        .map(str::to_lowercase)
        .collect::<Vec<_>>()
        .join("-");
    if slug.is_empty() {
        "level".to_owned()
    } else {
        slug
    }
}
