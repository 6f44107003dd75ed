//! Color units and color sets.

use std::fmt::{self, Display};

use serde::{Deserialize, Serialize};

/// A color unit that can be stacked in a [`Container`](crate::Container).
///
/// Colors carry no behavior beyond identity. Each color has a single-character
/// [`code`](Self::code) used by the canonical state encoding and by the
/// text form of [`PuzzleState`](crate::PuzzleState).
///
/// # Examples
///
/// ```
/// use chromasort_core::Color;
///
/// assert_eq!(Color::ALL.len(), Color::COUNT);
/// assert_eq!(Color::from_code('R'), Some(Color::Red));
/// assert_eq!(Color::Red.code(), 'R');
/// assert_eq!(Color::Navy.to_string(), "navy");
/// ```
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
#[repr(u8)]
pub enum Color {
    /// Red.
    Red,
    /// Blue.
    Blue,
    /// Green.
    Green,
    /// Yellow.
    Yellow,
    /// Purple.
    Purple,
    /// Orange.
    Orange,
    /// Pink.
    Pink,
    /// Cyan.
    Cyan,
    /// Brown.
    Brown,
    /// Lime.
    Lime,
    /// Navy.
    Navy,
    /// Gray.
    Gray,
}

impl Color {
    /// Number of distinct colors.
    pub const COUNT: usize = 12;

    /// All colors in declaration order.
    pub const ALL: [Self; Self::COUNT] = [
        Self::Red,
        Self::Blue,
        Self::Green,
        Self::Yellow,
        Self::Purple,
        Self::Orange,
        Self::Pink,
        Self::Cyan,
        Self::Brown,
        Self::Lime,
        Self::Navy,
        Self::Gray,
    ];

    const CODES: [char; Self::COUNT] = ['R', 'B', 'G', 'Y', 'P', 'O', 'K', 'C', 'N', 'L', 'V', 'A'];

    const NAMES: [&'static str; Self::COUNT] = [
        "red", "blue", "green", "yellow", "purple", "orange", "pink", "cyan", "brown", "lime",
        "navy", "gray",
    ];

    /// Returns the zero-based index of this color within [`Color::ALL`].
    #[must_use]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Returns the color at `index` within [`Color::ALL`], if any.
    #[must_use]
    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    /// Returns the single-character code of this color.
    #[must_use]
    pub const fn code(self) -> char {
        Self::CODES[self.index()]
    }

    /// Parses a single-character color code.
    ///
    /// Lowercase codes are accepted.
    #[must_use]
    pub fn from_code(code: char) -> Option<Self> {
        let code = code.to_ascii_uppercase();
        Self::CODES
            .iter()
            .position(|&c| c == code)
            .and_then(Self::from_index)
    }

    /// Returns the lowercase name of this color.
    #[must_use]
    pub const fn name(self) -> &'static str {
        Self::NAMES[self.index()]
    }
}

impl Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

bitflags::bitflags! {
    /// A set of colors.
    ///
    /// # Examples
    ///
    /// ```
    /// use chromasort_core::{Color, ColorSet};
    ///
    /// let set: ColorSet = [Color::Red, Color::Blue, Color::Red].into_iter().collect();
    /// assert_eq!(set.len(), 2);
    /// assert!(set.contains_color(Color::Blue));
    /// assert!(!set.contains_color(Color::Gray));
    /// ```
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct ColorSet: u16 {
        /// Red.
        const RED = 1 << 0;
        /// Blue.
        const BLUE = 1 << 1;
        /// Green.
        const GREEN = 1 << 2;
        /// Yellow.
        const YELLOW = 1 << 3;
        /// Purple.
        const PURPLE = 1 << 4;
        /// Orange.
        const ORANGE = 1 << 5;
        /// Pink.
        const PINK = 1 << 6;
        /// Cyan.
        const CYAN = 1 << 7;
        /// Brown.
        const BROWN = 1 << 8;
        /// Lime.
        const LIME = 1 << 9;
        /// Navy.
        const NAVY = 1 << 10;
        /// Gray.
        const GRAY = 1 << 11;
    }
}

impl ColorSet {
    /// Returns the singleton set containing `color`.
    #[must_use]
    pub const fn from_color(color: Color) -> Self {
        Self::from_bits_retain(1 << color.index())
    }

    /// Adds a color to the set.
    pub fn insert_color(&mut self, color: Color) {
        self.insert(Self::from_color(color));
    }

    /// Returns `true` if the set contains `color`.
    #[must_use]
    pub const fn contains_color(self, color: Color) -> bool {
        self.contains(Self::from_color(color))
    }

    /// Returns the number of colors in the set.
    #[must_use]
    pub const fn len(self) -> usize {
        self.bits().count_ones() as usize
    }

    /// Iterates over the colors in the set in [`Color::ALL`] order.
    pub fn colors(self) -> impl Iterator<Item = Color> {
        Color::ALL
            .into_iter()
            .filter(move |&color| self.contains_color(color))
    }
}

impl FromIterator<Color> for ColorSet {
    fn from_iter<T: IntoIterator<Item = Color>>(iter: T) -> Self {
        let mut set = Self::empty();
        for color in iter {
            set.insert_color(color);
        }
        set
    }
}
