//! Text line parsing
//!
//! Line format:
//! - LETTER+CODE: `G` or `M` followed by an integer code (`G1`, `M106`)
//! - FIELDS: whitespace separated letter+number tokens (`X12.5`, `F1500`)
//! - COMMENT: everything after `;` is ignored
//!
//! Field letters other than X, Y, Z, E, F and T are skipped.

use crate::command::{Command, CommandLetter, Field};

/// Errors that can occur while parsing a line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ParseError {
    /// Line is blank or only a comment
    Empty,
    /// Line does not start with `G` or `M`
    NotMotionCommand,
    /// Code or field value is not a finite number
    InvalidNumber,
}

impl ParseError {
    /// Short, stable name used in protocol replies
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Empty => "empty",
            Self::NotMotionCommand => "unknown_command",
            Self::InvalidNumber => "invalid_number",
        }
    }
}

/// Parse one protocol line into a [`Command`]
pub fn parse_line(line: &str) -> Result<Command, ParseError> {
    let line = match line.find(';') {
        Some(idx) => &line[..idx],
        None => line,
    };

    let mut tokens = line.split_ascii_whitespace();
    let head = tokens.next().ok_or(ParseError::Empty)?;

    let (first, code) = split_token(head);
    let letter = CommandLetter::from_ascii(first).ok_or(ParseError::NotMotionCommand)?;
    let code: u16 = code.parse().map_err(|_| ParseError::InvalidNumber)?;

    let mut cmd = Command::new(letter, code);
    for token in tokens {
        let (name, value) = split_token(token);
        let Some(field) = Field::from_ascii(name) else {
            continue;
        };
        cmd.set(field, parse_value(value)?);
    }

    Ok(cmd)
}

/// Split a token into its leading ASCII letter and the remainder
fn split_token(token: &str) -> (u8, &str) {
    // Non-empty by construction (split_ascii_whitespace)
    let first = token.as_bytes()[0];
    if first.is_ascii() {
        (first, &token[1..])
    } else {
        (first, "")
    }
}

fn parse_value(text: &str) -> Result<f32, ParseError> {
    let value: f32 = text.parse().map_err(|_| ParseError::InvalidNumber)?;
    if value.is_finite() {
        Ok(value)
    } else {
        Err(ParseError::InvalidNumber)
    }
}

#[cfg(test)]
mod tests {
    extern crate std;

    use super::*;
    use proptest::prelude::*;
    use std::format;

    #[test]
    fn test_parse_linear_move() {
        let cmd = parse_line("G1 X10.0 Y20.0 Z5.0 F2000").unwrap();
        assert!(cmd.is(CommandLetter::G, 1));
        assert_eq!(cmd.x, Some(10.0));
        assert_eq!(cmd.y, Some(20.0));
        assert_eq!(cmd.z, Some(5.0));
        assert_eq!(cmd.f, Some(2000.0));
        assert_eq!(cmd.e, None);
        assert_eq!(cmd.t, None);
    }

    #[test]
    fn test_parse_machine_command_without_fields() {
        let cmd = parse_line("M106").unwrap();
        assert!(cmd.is(CommandLetter::M, 106));
        assert_eq!(cmd.x, None);
    }

    #[test]
    fn test_parse_negative_and_lowercase() {
        let cmd = parse_line("g0 x-12.5 e3").unwrap();
        assert!(cmd.is(CommandLetter::G, 0));
        assert_eq!(cmd.x, Some(-12.5));
        assert_eq!(cmd.e, Some(3.0));
    }

    #[test]
    fn test_leading_zero_code() {
        let cmd = parse_line("G01 Z1").unwrap();
        assert_eq!(cmd.code, 1);
    }

    #[test]
    fn test_comment_is_stripped() {
        let cmd = parse_line("G1 X1 ; Y2 is commented out").unwrap();
        assert_eq!(cmd.x, Some(1.0));
        assert_eq!(cmd.y, None);

        assert_eq!(parse_line("; only a comment"), Err(ParseError::Empty));
    }

    #[test]
    fn test_blank_line() {
        assert_eq!(parse_line(""), Err(ParseError::Empty));
        assert_eq!(parse_line("   \t"), Err(ParseError::Empty));
    }

    #[test]
    fn test_rejects_non_motion_lines() {
        assert_eq!(parse_line("P1"), Err(ParseError::NotMotionCommand));
        assert_eq!(parse_line("hello"), Err(ParseError::NotMotionCommand));
    }

    #[test]
    fn test_rejects_bad_numbers() {
        assert_eq!(parse_line("G"), Err(ParseError::InvalidNumber));
        assert_eq!(parse_line("G1.5"), Err(ParseError::InvalidNumber));
        assert_eq!(parse_line("G1 X"), Err(ParseError::InvalidNumber));
        assert_eq!(parse_line("G1 Xabc"), Err(ParseError::InvalidNumber));
        assert_eq!(parse_line("G1 Xinf"), Err(ParseError::InvalidNumber));
        assert_eq!(parse_line("G1 XNaN"), Err(ParseError::InvalidNumber));
    }

    #[test]
    fn test_unknown_fields_are_ignored() {
        let cmd = parse_line("G1 X1 S255 Y2").unwrap();
        assert_eq!(cmd.x, Some(1.0));
        assert_eq!(cmd.y, Some(2.0));
    }

    #[test]
    fn test_repeated_field_keeps_last() {
        let cmd = parse_line("G1 X1 X2").unwrap();
        assert_eq!(cmd.x, Some(2.0));
    }

    proptest! {
        #[test]
        fn prop_arbitrary_text_never_panics(line in "\\PC{0,96}") {
            let _ = parse_line(&line);
        }

        #[test]
        fn prop_printed_fields_parse_back(
            code in 0u16..1000,
            x in -1000f32..1000.0,
            f in 1f32..20_000.0,
        ) {
            let cmd = parse_line(&format!("g{} X{} F{} ; note", code, x, f)).unwrap();
            prop_assert!(cmd.is(CommandLetter::G, code));
            prop_assert_eq!(cmd.x, Some(x));
            prop_assert_eq!(cmd.f, Some(f));
        }
    }
}
