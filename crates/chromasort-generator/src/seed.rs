use std::{
    fmt::{self, Display},
    str::FromStr,
};

use chromasort_core::Difficulty;
use rand::SeedableRng as _;
use rand_pcg::Pcg64;
use sha2::{Digest as _, Sha256};

/// A 32-byte seed that fully determines a generated level.
///
/// Seeds are shown and parsed as 64 lowercase hex digits, so a level can be
/// regenerated from a logged seed alone.
///
/// # Examples
///
/// ```
/// use chromasort_core::Difficulty;
/// use chromasort_generator::LevelSeed;
///
/// let seed = LevelSeed::derive(42, Difficulty::Easy, 1, "Ocean");
/// assert_eq!(seed, LevelSeed::derive(42, Difficulty::Easy, 1, "Ocean"));
/// assert_ne!(seed, LevelSeed::derive(42, Difficulty::Easy, 2, "Ocean"));
///
/// let text = seed.to_string();
/// assert_eq!(text.len(), 64);
/// assert_eq!(text.parse::<LevelSeed>()?, seed);
/// # Ok::<(), chromasort_generator::ParseSeedError>(())
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct LevelSeed([u8; 32]);

impl LevelSeed {
    /// Wraps raw seed bytes.
    #[must_use]
    pub const fn from_bytes(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }

    /// Returns the raw seed bytes.
    #[must_use]
    pub const fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }

    /// Derives the seed of one level from its pack coordinates.
    #[must_use]
    pub fn derive(seed: u64, difficulty: Difficulty, level_number: u32, theme: &str) -> Self {
        Self::derive_round(seed, difficulty, level_number, theme, 0)
    }

    /// Derives the seed of one level for a given whole-theme retry round.
    ///
    /// Round 0 is the same seed [`derive`](Self::derive) returns.
    #[must_use]
    pub fn derive_round(
        seed: u64,
        difficulty: Difficulty,
        level_number: u32,
        theme: &str,
        round: u32,
    ) -> Self {
        let mut hasher = Sha256::new();
        hasher.update(b"chromasort/level");
        hasher.update(seed.to_le_bytes());
        hasher.update(difficulty.name().as_bytes());
        hasher.update([0]);
        hasher.update(level_number.to_le_bytes());
        hasher.update((theme.len() as u64).to_le_bytes());
        hasher.update(theme.as_bytes());
        hasher.update(round.to_le_bytes());
        Self(hasher.finalize().into())
    }

    /// Returns the seed for the given candidate attempt.
    ///
    /// Attempt 0 is the seed itself.
    #[must_use]
    pub fn perturb(&self, attempt: u32) -> Self {
        if attempt == 0 {
            return *self;
        }
        let mut hasher = Sha256::new();
        hasher.update(b"chromasort/attempt");
        hasher.update(self.0);
        hasher.update(attempt.to_le_bytes());
        Self(hasher.finalize().into())
    }

    /// Creates the random number generator this seed drives.
    #[must_use]
    pub fn rng(&self) -> Pcg64 {
        Pcg64::from_seed(self.0)
    }
}

impl Display for LevelSeed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for byte in self.0 {
            write!(f, "{byte:02x}")?;
        }
        Ok(())
    }
}

/// Error returned when a seed string is not 64 hex digits.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum ParseSeedError {
    /// The string did not have exactly 64 characters.
    #[display("seed must be 64 hex digits, got {len} characters")]
    InvalidLength {
        /// Length of the input in characters.
        len: usize,
    },
    /// A character was not a hex digit.
    #[display("invalid hex digit {found:?} at position {position}")]
    InvalidDigit {
        /// Offending character.
        found: char,
        /// Character position in the input.
        position: usize,
    },
}

impl FromStr for LevelSeed {
    type Err = ParseSeedError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let len = s.chars().count();
        if len != 64 {
            return Err(ParseSeedError::InvalidLength { len });
        }

        let mut bytes = [0_u8; 32];
        for (position, found) in s.chars().enumerate() {
            let digit = found
                .to_digit(16)
                .ok_or(ParseSeedError::InvalidDigit { found, position })?;
            let shift = if position % 2 == 0 { 4 } else { 0 };
            #[expect(clippy::cast_possible_truncation)]
            let digit = digit as u8;
            bytes[position / 2] |= digit << shift;
        }
        Ok(Self(bytes))
    }
}
