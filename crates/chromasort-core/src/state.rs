//! Immutable puzzle snapshots and their canonical encoding.

use std::{
    collections::HashSet,
    fmt::{self, Display},
    str::FromStr,
};

use serde::Serialize;

use crate::{Color, ColorSet, Container, ContainerId, ModelError, ParseStateError};

/// Separator written after every container in a [`Fingerprint`].
///
/// It is never a color code, so empty and non-empty containers cannot alias.
const FINGERPRINT_SEPARATOR: char = '|';

/// An ordered snapshot of all containers of a puzzle.
///
/// States are values: every move produces a new state, which makes them
/// hashable, comparable and safe to share between search frontiers.
///
/// # Text form
///
/// `FromStr` and `Display` use whitespace-separated `capacity:codes` tokens,
/// one per container, where codes are [`Color::code`] characters written
/// bottom first. Container ids are assigned from the token position.
///
/// ```
/// use chromasort_core::{Color, PuzzleState};
///
/// let state: PuzzleState = "4:RBR 4:BRB 4: 4:".parse()?;
/// assert_eq!(state.len(), 4);
/// assert_eq!(state.container(0).unwrap().top(), Some(Color::Red));
/// assert_eq!(state.empty_count(), 2);
/// assert_eq!(state.to_string(), "4:RBR 4:BRB 4: 4:");
/// # Ok::<(), chromasort_core::ParseStateError>(())
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PuzzleState {
    containers: Vec<Container>,
}

impl PuzzleState {
    /// Creates a state from its containers.
    ///
    /// # Errors
    ///
    /// Returns [`ModelError::EmptyPuzzle`] if `containers` is empty, or
    /// [`ModelError::DuplicateContainerId`] if two containers share an id.
    pub fn new(containers: Vec<Container>) -> Result<Self, ModelError> {
        if containers.is_empty() {
            return Err(ModelError::EmptyPuzzle);
        }
        let mut seen = HashSet::with_capacity(containers.len());
        for container in &containers {
            if !seen.insert(container.id()) {
                return Err(ModelError::DuplicateContainerId { id: container.id() });
            }
        }
        Ok(Self { containers })
    }

    /// Builds a state from per-container unit lists that share one capacity.
    ///
    /// Containers get ids `0..layout.len()`.
    ///
    /// # Errors
    ///
    /// Returns a [`ModelError`] if the capacity is zero, any list overflows
    /// it, or the layout is empty.
    pub fn from_layout<I, U>(capacity: usize, layout: I) -> Result<Self, ModelError>
    where
        I: IntoIterator<Item = U>,
        U: IntoIterator<Item = Color>,
    {
        let containers = layout
            .into_iter()
            .zip(0..)
            .map(|(units, id)| {
                Container::with_units(ContainerId::new(id), capacity, units.into_iter().collect())
            })
            .collect::<Result<Vec<_>, _>>()?;
        Self::new(containers)
    }

    /// Rebuilds a state after a move; ids and capacities are unchanged.
    pub(crate) fn from_moved(containers: Vec<Container>) -> Self {
        debug_assert!(!containers.is_empty());
        Self { containers }
    }

    /// Returns all containers in order.
    #[must_use]
    pub fn containers(&self) -> &[Container] {
        &self.containers
    }

    /// Returns the container at `index`.
    #[must_use]
    pub fn container(&self, index: usize) -> Option<&Container> {
        self.containers.get(index)
    }

    /// Returns the number of containers.
    #[must_use]
    pub fn len(&self) -> usize {
        self.containers.len()
    }

    /// Always `false`: construction rejects puzzles without containers.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.containers.is_empty()
    }

    /// Returns the number of empty containers.
    #[must_use]
    pub fn empty_count(&self) -> usize {
        self.containers.iter().filter(|c| c.is_empty()).count()
    }

    /// Returns the total number of units across all containers.
    #[must_use]
    pub fn total_units(&self) -> usize {
        self.containers.iter().map(Container::len).sum()
    }

    /// Returns how many units of each color the state holds, indexed by
    /// [`Color::index`].
    #[must_use]
    pub fn color_counts(&self) -> [usize; Color::COUNT] {
        let mut counts = [0; Color::COUNT];
        for color in self.containers.iter().flat_map(Container::units) {
            counts[color.index()] += 1;
        }
        counts
    }

    /// Returns the set of colors present in the state.
    #[must_use]
    pub fn distinct_colors(&self) -> ColorSet {
        self.containers
            .iter()
            .flat_map(Container::units)
            .copied()
            .collect()
    }

    /// Returns the canonical encoding of the color layout.
    #[must_use]
    pub fn fingerprint(&self) -> Fingerprint {
        let mut encoded = String::with_capacity(self.total_units() + self.containers.len());
        for container in &self.containers {
            encoded.extend(container.units().iter().map(|color| color.code()));
            encoded.push(FINGERPRINT_SEPARATOR);
        }
        Fingerprint(encoded)
    }
}

impl Display for PuzzleState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, container) in self.containers.iter().enumerate() {
            if i > 0 {
                f.write_str(" ")?;
            }
            write!(f, "{}:", container.capacity())?;
            for color in container.units() {
                write!(f, "{}", color.code())?;
            }
        }
        Ok(())
    }
}

impl FromStr for PuzzleState {
    type Err = ParseStateError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let containers = s
            .split_whitespace()
            .zip(0..)
            .map(|(token, id)| parse_container(token, ContainerId::new(id)))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self::new(containers)?)
    }
}

fn parse_container(token: &str, id: ContainerId) -> Result<Container, ParseStateError> {
    let Some((capacity, codes)) = token.split_once(':') else {
        return Err(ParseStateError::MalformedToken {
            token: token.to_owned(),
        });
    };
    let capacity = capacity
        .parse()
        .map_err(|_| ParseStateError::InvalidCapacity {
            token: token.to_owned(),
        })?;
    let units = codes
        .chars()
        .map(|code| Color::from_code(code).ok_or(ParseStateError::UnknownColor { code }))
        .collect::<Result<Vec<_>, _>>()?;
    Ok(Container::with_units(id, capacity, units)?)
}

/// Canonical encoding of a state's color layout.
///
/// Two states have equal fingerprints iff they have the same number of
/// containers and the same color sequence in each position. Capacities and
/// container ids do not take part.
#[derive(
    Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, derive_more::Display,
)]
#[serde(transparent)]
pub struct Fingerprint(String);

impl Fingerprint {
    /// Returns the encoding as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;

    #[test]
    fn test_new_rejects_empty_and_duplicate_ids() {
        assert_eq!(PuzzleState::new(Vec::new()), Err(ModelError::EmptyPuzzle));

        let a = Container::new(ContainerId::new(7), 2).unwrap();
        let b = Container::new(ContainerId::new(7), 2).unwrap();
        assert_eq!(
            PuzzleState::new(vec![a, b]),
            Err(ModelError::DuplicateContainerId {
                id: ContainerId::new(7)
            })
        );
    }

    #[test]
    fn test_parse_errors() {
        assert!(matches!(
            "4RB".parse::<PuzzleState>(),
            Err(ParseStateError::MalformedToken { .. })
        ));
        assert!(matches!(
            "x:RB".parse::<PuzzleState>(),
            Err(ParseStateError::InvalidCapacity { .. })
        ));
        assert_eq!(
            "4:RZ".parse::<PuzzleState>(),
            Err(ParseStateError::UnknownColor { code: 'Z' })
        );
        assert!(matches!(
            "0:".parse::<PuzzleState>(),
            Err(ParseStateError::Model(ModelError::ZeroCapacity { .. }))
        ));
        assert_eq!(
            "".parse::<PuzzleState>(),
            Err(ParseStateError::Model(ModelError::EmptyPuzzle))
        );
    }

    #[test]
    fn test_counts() {
        let state: PuzzleState = "3:RRB 3:B 3:".parse().unwrap();
        let counts = state.color_counts();
        assert_eq!(counts[Color::Red.index()], 2);
        assert_eq!(counts[Color::Blue.index()], 2);
        assert_eq!(state.total_units(), 4);
        assert_eq!(state.empty_count(), 1);
        assert_eq!(state.distinct_colors().len(), 2);
    }

    #[test]
    fn test_fingerprint_separates_containers() {
        let a: PuzzleState = "2:R 2: 2:".parse().unwrap();
        let b: PuzzleState = "2: 2:R 2:".parse().unwrap();
        assert_eq!(a.fingerprint().as_str(), "R|||");
        assert_eq!(b.fingerprint().as_str(), "|R||");
        assert_ne!(a.fingerprint(), b.fingerprint());
    }

    #[test]
    fn test_fingerprint_ignores_capacity() {
        let a: PuzzleState = "2:RB 2:".parse().unwrap();
        let b: PuzzleState = "5:RB 5:".parse().unwrap();
        assert_eq!(a.fingerprint(), b.fingerprint());
    }

    fn arb_state() -> impl Strategy<Value = PuzzleState> {
        prop::collection::vec(prop::collection::vec(0..4_usize, 0..=4), 1..6).prop_map(|layout| {
            PuzzleState::from_layout(
                4,
                layout
                    .into_iter()
                    .map(|units| units.into_iter().filter_map(Color::from_index)),
            )
            .unwrap()
        })
    }

    proptest! {
        #[test]
        fn prop_fingerprint_equal_iff_layout_equal(a in arb_state(), b in arb_state()) {
            let same_layout = a.len() == b.len()
                && a.containers().iter().zip(b.containers()).all(|(x, y)| x.units() == y.units());
            prop_assert_eq!(a.fingerprint() == b.fingerprint(), same_layout);
        }

        #[test]
        fn prop_text_form_round_trips(state in arb_state()) {
            let parsed: PuzzleState = state.to_string().parse().unwrap();
            prop_assert_eq!(parsed, state);
        }
    }
}
