//! Axis identifiers and per-axis containers

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Physical axis of the arm
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Axis {
    /// Base rotation about the vertical axis
    Base,
    /// Shoulder pitch
    Shoulder,
    /// Elbow pitch
    Elbow,
    /// Linear slider / end-effector extension
    Slider,
}

impl Axis {
    /// All axes in update order
    pub const ALL: [Axis; 4] = [Axis::Base, Axis::Shoulder, Axis::Elbow, Axis::Slider];

    /// Lowercase name, matches the `[axes.<name>]` config sections
    pub fn name(self) -> &'static str {
        match self {
            Axis::Base => "base",
            Axis::Shoulder => "shoulder",
            Axis::Elbow => "elbow",
            Axis::Slider => "slider",
        }
    }

    /// Look up an axis by its config name
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|axis| axis.name() == name)
    }
}

/// One value per axis
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(
    feature = "serde",
    serde(
        default,
        deny_unknown_fields,
        bound(deserialize = "T: Deserialize<'de> + Default")
    )
)]
pub struct AxisSet<T> {
    pub base: T,
    pub shoulder: T,
    pub elbow: T,
    pub slider: T,
}

impl<T> AxisSet<T> {
    /// Build a set from a per-axis constructor
    pub fn from_fn(mut f: impl FnMut(Axis) -> T) -> Self {
        Self {
            base: f(Axis::Base),
            shoulder: f(Axis::Shoulder),
            elbow: f(Axis::Elbow),
            slider: f(Axis::Slider),
        }
    }

    pub fn get(&self, axis: Axis) -> &T {
        match axis {
            Axis::Base => &self.base,
            Axis::Shoulder => &self.shoulder,
            Axis::Elbow => &self.elbow,
            Axis::Slider => &self.slider,
        }
    }

    pub fn get_mut(&mut self, axis: Axis) -> &mut T {
        match axis {
            Axis::Base => &mut self.base,
            Axis::Shoulder => &mut self.shoulder,
            Axis::Elbow => &mut self.elbow,
            Axis::Slider => &mut self.slider,
        }
    }

    /// Map each value, keeping the axis association
    pub fn map<U>(self, mut f: impl FnMut(Axis, T) -> U) -> AxisSet<U> {
        AxisSet {
            base: f(Axis::Base, self.base),
            shoulder: f(Axis::Shoulder, self.shoulder),
            elbow: f(Axis::Elbow, self.elbow),
            slider: f(Axis::Slider, self.slider),
        }
    }

    /// Iterate `(axis, value)` pairs in [`Axis::ALL`] order
    pub fn iter(&self) -> impl Iterator<Item = (Axis, &T)> {
        [
            (Axis::Base, &self.base),
            (Axis::Shoulder, &self.shoulder),
            (Axis::Elbow, &self.elbow),
            (Axis::Slider, &self.slider),
        ]
        .into_iter()
    }

    /// Run `f` on every value in [`Axis::ALL`] order
    pub fn for_each_mut(&mut self, mut f: impl FnMut(Axis, &mut T)) {
        f(Axis::Base, &mut self.base);
        f(Axis::Shoulder, &mut self.shoulder);
        f(Axis::Elbow, &mut self.elbow);
        f(Axis::Slider, &mut self.slider);
    }
}

impl AxisSet<bool> {
    /// True if any axis flag is set
    pub fn any(&self) -> bool {
        self.base || self.shoulder || self.elbow || self.slider
    }
}
