//! Bounded stacks of color units.

use serde::{Deserialize, Serialize};

use crate::{Color, ModelError};

/// Stable identifier of a container, unique within one puzzle.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    derive_more::Display,
    derive_more::From,
)]
#[serde(transparent)]
pub struct ContainerId(u32);

impl ContainerId {
    /// Creates an id from its numeric value.
    #[must_use]
    pub const fn new(value: u32) -> Self {
        Self(value)
    }

    /// Returns the numeric value of this id.
    #[must_use]
    pub const fn value(self) -> u32 {
        self.0
    }
}

/// A bounded stack of color units.
///
/// Units are stored bottom-to-top: the last unit is the top, which is the
/// end that pours.
///
/// # Examples
///
/// ```
/// use chromasort_core::{Color, Container, ContainerId};
///
/// let container = Container::with_units(
///     ContainerId::new(0),
///     4,
///     vec![Color::Red, Color::Blue, Color::Blue],
/// )?;
/// assert_eq!(container.top(), Some(Color::Blue));
/// assert_eq!(container.top_run(), 2);
/// assert_eq!(container.free_space(), 1);
/// assert!(!container.is_uniform());
/// # Ok::<(), chromasort_core::ModelError>(())
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Container {
    id: ContainerId,
    capacity: usize,
    units: Vec<Color>,
}

impl Container {
    /// Creates an empty container.
    ///
    /// # Errors
    ///
    /// Returns [`ModelError::ZeroCapacity`] if `capacity` is zero.
    pub fn new(id: ContainerId, capacity: usize) -> Result<Self, ModelError> {
        Self::with_units(id, capacity, Vec::new())
    }

    /// Creates a container holding `units`, bottom first.
    ///
    /// # Errors
    ///
    /// Returns [`ModelError::ZeroCapacity`] if `capacity` is zero, or
    /// [`ModelError::Overflow`] if there are more units than `capacity`.
    pub fn with_units(
        id: ContainerId,
        capacity: usize,
        units: Vec<Color>,
    ) -> Result<Self, ModelError> {
        if capacity == 0 {
            return Err(ModelError::ZeroCapacity { id });
        }
        if units.len() > capacity {
            return Err(ModelError::Overflow {
                id,
                len: units.len(),
                capacity,
            });
        }
        Ok(Self {
            id,
            capacity,
            units,
        })
    }

    /// Returns the id of this container.
    #[must_use]
    pub fn id(&self) -> ContainerId {
        self.id
    }

    /// Returns the maximum number of units this container can hold.
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Returns the units, bottom first.
    #[must_use]
    pub fn units(&self) -> &[Color] {
        &self.units
    }

    /// Returns the number of units held.
    #[must_use]
    pub fn len(&self) -> usize {
        self.units.len()
    }

    /// Returns `true` if the container holds no units.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.units.is_empty()
    }

    /// Returns `true` if the container holds `capacity` units.
    #[must_use]
    pub fn is_full(&self) -> bool {
        self.units.len() == self.capacity
    }

    /// Returns `true` if all units share one color.
    ///
    /// Empty and single-unit containers are uniform.
    #[must_use]
    pub fn is_uniform(&self) -> bool {
        self.units.windows(2).all(|pair| pair[0] == pair[1])
    }

    /// Returns `true` if the container is full and uniform.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.is_full() && self.is_uniform()
    }

    /// Returns the top (pourable) unit.
    #[must_use]
    pub fn top(&self) -> Option<Color> {
        self.units.last().copied()
    }

    /// Returns the number of additional units the container can take.
    #[must_use]
    pub fn free_space(&self) -> usize {
        self.capacity - self.units.len()
    }

    /// Returns the length of the same-colored run at the top.
    #[must_use]
    pub fn top_run(&self) -> usize {
        let Some(top) = self.top() else {
            return 0;
        };
        self.units
            .iter()
            .rev()
            .take_while(|&&color| color == top)
            .count()
    }

    pub(crate) fn take_top(&mut self, count: usize) -> Vec<Color> {
        debug_assert!(count <= self.units.len());
        self.units.split_off(self.units.len() - count)
    }

    pub(crate) fn push_units(&mut self, units: Vec<Color>) {
        debug_assert!(units.len() <= self.free_space());
        self.units.extend(units);
    }
}
