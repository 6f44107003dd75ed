//! Immutable level definitions.

use std::{
    fmt::{self, Display},
    str::FromStr,
};

use serde::{Deserialize, Serialize};

use crate::{ModelError, PuzzleState};

/// Difficulty tier of a level.
///
/// Tiers are ordered: `Easy < Medium < Hard < Expert`.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    /// Easy.
    Easy,
    /// Medium.
    Medium,
    /// Hard.
    Hard,
    /// Expert.
    Expert,
}

impl Difficulty {
    /// All tiers in ascending order.
    pub const ALL: [Self; 4] = [Self::Easy, Self::Medium, Self::Hard, Self::Expert];

    /// Returns the lowercase name of this tier.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Easy => "easy",
            Self::Medium => "medium",
            Self::Hard => "hard",
            Self::Expert => "expert",
        }
    }
}

impl Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Error returned when parsing an unknown difficulty name.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error)]
#[display("unknown difficulty {name:?}")]
pub struct ParseDifficultyError {
    name: String,
}

impl FromStr for Difficulty {
    type Err = ParseDifficultyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|difficulty| difficulty.name().eq_ignore_ascii_case(s))
            .ok_or_else(|| ParseDifficultyError { name: s.to_owned() })
    }
}

/// Three strictly ascending move-count cutoffs for 3/2/1-star ratings.
///
/// # Examples
///
/// ```
/// use chromasort_core::StarThresholds;
///
/// let stars = StarThresholds::new([10, 13, 16])?;
/// assert_eq!(stars.stars_for(9), 3);
/// assert_eq!(stars.stars_for(13), 2);
/// assert_eq!(stars.stars_for(16), 1);
/// assert_eq!(stars.stars_for(17), 0);
/// # Ok::<(), chromasort_core::ModelError>(())
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct StarThresholds([u32; 3]);

impl StarThresholds {
    /// Creates thresholds for 3, 2 and 1 stars.
    ///
    /// # Errors
    ///
    /// Returns [`ModelError::StarThresholdOrder`] unless the values are
    /// strictly ascending.
    pub fn new(thresholds: [u32; 3]) -> Result<Self, ModelError> {
        if thresholds[0] < thresholds[1] && thresholds[1] < thresholds[2] {
            Ok(Self(thresholds))
        } else {
            Err(ModelError::StarThresholdOrder { thresholds })
        }
    }

    /// Returns the cutoffs in 3-star, 2-star, 1-star order.
    #[must_use]
    pub fn values(&self) -> [u32; 3] {
        self.0
    }

    /// Returns the star rating (0-3) earned by finishing in `moves` moves.
    #[must_use]
    pub fn stars_for(&self, moves: u32) -> u8 {
        match self.0.iter().position(|&cutoff| moves <= cutoff) {
            Some(0) => 3,
            Some(1) => 2,
            Some(_) => 1,
            None => 0,
        }
    }
}

impl TryFrom<&[u32]> for StarThresholds {
    type Error = ModelError;

    fn try_from(values: &[u32]) -> Result<Self, Self::Error> {
        let thresholds: [u32; 3] = values
            .try_into()
            .map_err(|_| ModelError::StarThresholdCount { len: values.len() })?;
        Self::new(thresholds)
    }
}

/// An immutable puzzle definition.
///
/// # Examples
///
/// ```
/// use chromasort_core::{Difficulty, Level, PuzzleState, StarThresholds};
///
/// let state: PuzzleState = "3:RBR 3:BRB 3: 3:".parse()?;
/// let level = Level::new("ocean-001", "Ocean 1", Difficulty::Easy, state)?
///     .with_move_limit(12)?
///     .with_star_thresholds(StarThresholds::new([6, 8, 10])?)
///     .with_description("warm-up");
/// assert_eq!(level.move_limit(), Some(12));
/// assert_eq!(level.description(), Some("warm-up"));
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Level {
    id: String,
    name: String,
    difficulty: Difficulty,
    initial_state: PuzzleState,
    move_limit: Option<u32>,
    description: Option<String>,
    star_thresholds: Option<StarThresholds>,
}

impl Level {
    /// Creates a level without optional metadata.
    ///
    /// # Errors
    ///
    /// Returns [`ModelError::EmptyLevelId`] if `id` is empty.
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        difficulty: Difficulty,
        initial_state: PuzzleState,
    ) -> Result<Self, ModelError> {
        let id = id.into();
        if id.is_empty() {
            return Err(ModelError::EmptyLevelId);
        }
        Ok(Self {
            id,
            name: name.into(),
            difficulty,
            initial_state,
            move_limit: None,
            description: None,
            star_thresholds: None,
        })
    }

    /// Sets the move limit.
    ///
    /// # Errors
    ///
    /// Returns [`ModelError::ZeroMoveLimit`] if `limit` is zero.
    pub fn with_move_limit(mut self, limit: u32) -> Result<Self, ModelError> {
        if limit == 0 {
            return Err(ModelError::ZeroMoveLimit);
        }
        self.move_limit = Some(limit);
        Ok(self)
    }

    /// Sets the description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Sets the star thresholds.
    #[must_use]
    pub fn with_star_thresholds(mut self, thresholds: StarThresholds) -> Self {
        self.star_thresholds = Some(thresholds);
        self
    }

    /// Returns the level id.
    #[must_use]
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Returns the display name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the declared difficulty tier.
    #[must_use]
    pub fn difficulty(&self) -> Difficulty {
        self.difficulty
    }

    /// Returns the initial puzzle state.
    #[must_use]
    pub fn initial_state(&self) -> &PuzzleState {
        &self.initial_state
    }

    /// Returns the move limit, if any.
    #[must_use]
    pub fn move_limit(&self) -> Option<u32> {
        self.move_limit
    }

    /// Returns the description, if any.
    #[must_use]
    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    /// Returns the star thresholds, if any.
    #[must_use]
    pub fn star_thresholds(&self) -> Option<StarThresholds> {
        self.star_thresholds
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn state() -> PuzzleState {
        "2:RB 2:BR 2:".parse().unwrap()
    }

    #[test]
    fn test_difficulty_order_and_parse() {
        assert!(Difficulty::Easy < Difficulty::Medium);
        assert!(Difficulty::Hard < Difficulty::Expert);
        assert_eq!("Expert".parse::<Difficulty>(), Ok(Difficulty::Expert));
        assert!("legendary".parse::<Difficulty>().is_err());
        for difficulty in Difficulty::ALL {
            assert_eq!(difficulty.to_string().parse::<Difficulty>(), Ok(difficulty));
        }
    }

    #[test]
    fn test_star_thresholds_validation() {
        assert!(StarThresholds::new([3, 3, 4]).is_err());
        assert!(StarThresholds::new([5, 4, 6]).is_err());
        assert_eq!(
            StarThresholds::try_from(&[1, 2][..]),
            Err(ModelError::StarThresholdCount { len: 2 })
        );
        assert_eq!(
            StarThresholds::try_from(&[1, 2, 3, 4][..]),
            Err(ModelError::StarThresholdCount { len: 4 })
        );
        let stars = StarThresholds::try_from(&[1, 2, 3][..]).unwrap();
        assert_eq!(stars.values(), [1, 2, 3]);
    }

    #[test]
    fn test_stars_for_boundaries() {
        let stars = StarThresholds::new([4, 6, 9]).unwrap();
        assert_eq!(stars.stars_for(0), 3);
        assert_eq!(stars.stars_for(4), 3);
        assert_eq!(stars.stars_for(5), 2);
        assert_eq!(stars.stars_for(7), 1);
        assert_eq!(stars.stars_for(9), 1);
        assert_eq!(stars.stars_for(10), 0);
    }

    #[test]
    fn test_level_construction() {
        assert_eq!(
            Level::new("", "x", Difficulty::Easy, state()),
            Err(ModelError::EmptyLevelId)
        );
        let level = Level::new("a", "A", Difficulty::Hard, state()).unwrap();
        assert_eq!(level.move_limit(), None);
        assert_eq!(level.description(), None);
        assert_eq!(level.star_thresholds(), None);
        assert_eq!(level.with_move_limit(0), Err(ModelError::ZeroMoveLimit));
    }
}
