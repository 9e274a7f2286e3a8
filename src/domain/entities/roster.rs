//! Colours played locally by the automated player.

use std::collections::BTreeSet;

use crate::domain::value_objects::Colour;

/// Set of colours controlled by the automated player rather than a human.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Roster(BTreeSet<Colour>);

/// Colours of a game split by who controls them, each in the game's order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Partition {
    pub human: Vec<Colour>,
    pub automated: Vec<Colour>,
}

impl Roster {
    pub fn new(colours: impl IntoIterator<Item = Colour>) -> Self {
        Self(colours.into_iter().collect())
    }

    pub fn empty() -> Self {
        Self::default()
    }

    pub fn contains(&self, colour: Colour) -> bool {
        self.0.contains(&colour)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Split `colours` into human and automated, preserving order.
    pub fn partition(&self, colours: &[Colour]) -> Partition {
        let (automated, human): (Vec<Colour>, Vec<Colour>) =
            colours.iter().copied().partition(|c| self.contains(*c));
        Partition { human, automated }
    }
}

impl FromIterator<Colour> for Roster {
    fn from_iter<I: IntoIterator<Item = Colour>>(iter: I) -> Self {
        Self::new(iter)
    }
}
