//! Pitch parsing for command-line input.
//!
//! Accepted forms:
//! - `3`: the harmonic `3/1`
//! - `5/4`: a ratio
//! - `701.955` or `.5`: cents (a decimal point marks the value as cents)
//! - `7\12`: seven steps of 12-EDO

use std::str::FromStr;

use crate::error::AppError;
use crate::math::interval::Interval;

/// A parsed pitch: either an exact ratio or a cents value.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Pitch {
    Ratio(Interval),
    Cents(f64),
}

impl Pitch {
    pub fn cents(&self) -> f64 {
        match self {
            Pitch::Ratio(r) => r.cents(),
            Pitch::Cents(c) => *c,
        }
    }

    /// The exact ratio, when the input was one.
    pub fn ratio(&self) -> Option<Interval> {
        match self {
            Pitch::Ratio(r) => Some(*r),
            Pitch::Cents(_) => None,
        }
    }
}

impl FromStr for Pitch {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_pitch(s)
    }
}

pub fn parse_pitch(s: &str) -> Result<Pitch, AppError> {
    let s = s.trim();
    let invalid = || AppError::input(format!("Could not parse pitch value: {s:?}"));

    if s.is_empty() {
        return Err(invalid());
    }

    if let Some((steps, edo)) = s.split_once('\\') {
        let steps: i64 = parse_digits(steps).ok_or_else(invalid)? as i64;
        let edo = parse_digits(edo).ok_or_else(invalid)?;
        if edo == 0 {
            return Err(AppError::input(format!("EDO size must be positive in {s:?}.")));
        }
        return Ok(Pitch::Cents(1200.0 * steps as f64 / edo as f64));
    }

    if let Some((num, den)) = s.split_once('/') {
        let num = parse_digits(num).ok_or_else(invalid)?;
        let den = parse_digits(den).ok_or_else(invalid)?;
        return Interval::new(num, den).map(Pitch::Ratio);
    }

    if s.contains('.') {
        let digits_ok = s.chars().all(|c| c.is_ascii_digit() || c == '.')
            && s.matches('.').count() == 1
            && s != ".";
        if !digits_ok {
            return Err(invalid());
        }
        return s.parse::<f64>().map(Pitch::Cents).map_err(|_| invalid());
    }

    let n = parse_digits(s).ok_or_else(invalid)?;
    Interval::new(n, 1).map(Pitch::Ratio)
}

fn parse_digits(s: &str) -> Option<u64> {
    if s.is_empty() || !s.chars().all(|c| c.is_ascii_digit()) {
        return None;
    }
    s.parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_ratios_and_harmonics() {
        let p = parse_pitch("6/4").unwrap();
        assert_eq!(p.ratio(), Some(Interval::new(3, 2).unwrap()));
        let h = parse_pitch(" 3 ").unwrap();
        assert_eq!(h.ratio(), Some(Interval::new(3, 1).unwrap()));
    }

    #[test]
    fn parses_cents_and_edo_steps() {
        assert_eq!(parse_pitch("701.955").unwrap(), Pitch::Cents(701.955));
        assert_eq!(parse_pitch(".5").unwrap(), Pitch::Cents(0.5));
        let fifth = parse_pitch("7\\12").unwrap();
        assert!((fifth.cents() - 700.0).abs() < 1e-9);
        assert!(fifth.ratio().is_none());
    }

    #[test]
    fn rejects_malformed_input() {
        for s in ["", "abc", "3/", "/2", "1.2.3", "-5/4", "0/1", "7\\0", "."] {
            let err = parse_pitch(s).unwrap_err();
            assert_eq!(err.exit_code(), 2, "input {s:?}");
        }
    }
}
