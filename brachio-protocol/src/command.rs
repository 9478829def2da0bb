//! Motion command records
//!
//! A [`Command`] is the structured form of one protocol line such as
//! `G1 X120 Y-40 Z80 F1500`: a letter, a numeric code and up to six
//! optional numeric fields.

/// Command family
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum CommandLetter {
    /// Motion and positioning (`G`)
    G,
    /// Machine functions (`M`)
    M,
}

impl CommandLetter {
    /// Map an ASCII letter (either case) to a command family
    pub fn from_ascii(c: u8) -> Option<Self> {
        match c.to_ascii_uppercase() {
            b'G' => Some(Self::G),
            b'M' => Some(Self::M),
            _ => None,
        }
    }

    /// Uppercase ASCII character for this family
    pub fn as_char(self) -> char {
        match self {
            Self::G => 'G',
            Self::M => 'M',
        }
    }
}

/// Named numeric field of a command
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Field {
    X,
    Y,
    Z,
    /// Auxiliary (slider) axis
    E,
    /// Feed rate in mm/min
    F,
    /// Tool / time parameter, meaning depends on the command
    T,
}

impl Field {
    /// Map an ASCII letter (either case) to a field
    pub fn from_ascii(c: u8) -> Option<Self> {
        match c.to_ascii_uppercase() {
            b'X' => Some(Self::X),
            b'Y' => Some(Self::Y),
            b'Z' => Some(Self::Z),
            b'E' => Some(Self::E),
            b'F' => Some(Self::F),
            b'T' => Some(Self::T),
            _ => None,
        }
    }
}

/// One parsed motion command
///
/// Absent fields are `None`.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Command {
    pub letter: CommandLetter,
    pub code: u16,
    pub x: Option<f32>,
    pub y: Option<f32>,
    pub z: Option<f32>,
    pub e: Option<f32>,
    pub f: Option<f32>,
    pub t: Option<f32>,
}

impl Command {
    /// Create a command with no fields set
    pub const fn new(letter: CommandLetter, code: u16) -> Self {
        Self {
            letter,
            code,
            x: None,
            y: None,
            z: None,
            e: None,
            f: None,
            t: None,
        }
    }

    /// Shorthand for a `G` command
    pub const fn g(code: u16) -> Self {
        Self::new(CommandLetter::G, code)
    }

    /// Shorthand for an `M` command
    pub const fn m(code: u16) -> Self {
        Self::new(CommandLetter::M, code)
    }

    /// Builder-style field setter
    pub fn with(mut self, field: Field, value: f32) -> Self {
        self.set(field, value);
        self
    }

    /// Set a field value
    pub fn set(&mut self, field: Field, value: f32) {
        *self.slot_mut(field) = Some(value);
    }

    /// Get a field value
    pub fn get(&self, field: Field) -> Option<f32> {
        match field {
            Field::X => self.x,
            Field::Y => self.y,
            Field::Z => self.z,
            Field::E => self.e,
            Field::F => self.f,
            Field::T => self.t,
        }
    }

    /// Check whether this is `letter` + `code`
    pub fn is(&self, letter: CommandLetter, code: u16) -> bool {
        self.letter == letter && self.code == code
    }

    fn slot_mut(&mut self, field: Field) -> &mut Option<f32> {
        match field {
            Field::X => &mut self.x,
            Field::Y => &mut self.y,
            Field::Z => &mut self.z,
            Field::E => &mut self.e,
            Field::F => &mut self.f,
            Field::T => &mut self.t,
        }
    }
}
