//! Interval universe: the just intervals a layout is scored against.
//!
//! The universe is the set of reduced fractions `n/d` with `1 <= n, d <= limit`,
//! minus the unison, optionally restricted to a prime subgroup and to the band
//! `[1/R, R]`. Each member carries its cents and inverse Tenney height so the
//! score function never recomputes them.

use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use crate::error::AppError;
use crate::math::interval::{is_prime, Interval};

/// A set of primes, e.g. `2.3.7`.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Subgroup {
    primes: Vec<u64>,
}

impl Subgroup {
    pub fn new(mut primes: Vec<u64>) -> Result<Self, AppError> {
        if let Some(bad) = primes.iter().find(|p| !is_prime(**p)) {
            return Err(AppError::input(format!("Subgroup member {bad} is not prime.")));
        }
        primes.sort_unstable();
        primes.dedup();
        Ok(Self { primes })
    }

    pub fn primes(&self) -> &[u64] {
        &self.primes
    }

    pub fn is_empty(&self) -> bool {
        self.primes.is_empty()
    }

    pub fn contains(&self, interval: &Interval) -> bool {
        self.is_empty() || interval.is_in_subgroup(&self.primes)
    }
}

impl FromStr for Subgroup {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let primes = s
            .split(['.', ','])
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .map(|t| {
                t.parse::<u64>()
                    .map_err(|_| AppError::input(format!("Invalid subgroup member {t:?} in {s:?}.")))
            })
            .collect::<Result<Vec<_>, _>>()?;
        Self::new(primes)
    }
}

impl fmt::Display for Subgroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts: Vec<String> = self.primes.iter().map(|p| p.to_string()).collect();
        write!(f, "{}", parts.join("."))
    }
}

/// Parameters that fully determine a universe.
#[derive(Debug, Clone, PartialEq)]
pub struct UniverseParams {
    pub integer_limit: u64,
    pub subgroup: Option<Subgroup>,
    /// Symmetric band `[1/R, R]`; `R` is expected to be `>= 1/1`.
    pub range: Option<Interval>,
}

impl UniverseParams {
    pub fn with_limit(integer_limit: u64) -> Self {
        Self {
            integer_limit,
            subgroup: None,
            range: None,
        }
    }

    /// A short human-readable description, used in titles.
    pub fn describe(&self) -> String {
        let mut out = format!("{}-integer-limit JI", self.integer_limit);
        if let Some(sg) = self.subgroup.as_ref().filter(|sg| !sg.is_empty()) {
            out.push_str(&format!(" ({sg} subgroup)"));
        }
        if let Some(r) = &self.range {
            out.push_str(&format!(" within ±{r}"));
        }
        out
    }
}

/// One universe member with its precomputed score inputs.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Member {
    pub interval: Interval,
    pub cents: f64,
    /// `1 / tenney_height`.
    pub weight: f64,
}

impl Member {
    pub fn new(interval: Interval) -> Self {
        Self {
            interval,
            cents: interval.cents(),
            weight: 1.0 / interval.tenney_height(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct IntervalUniverse {
    members: Vec<Member>,
}

impl IntervalUniverse {
    /// Build the universe. Never fails; degenerate parameters give an empty set.
    pub fn build(params: &UniverseParams) -> Self {
        let limit = params.integer_limit;
        let mut set = BTreeSet::new();
        for n in 1..=limit {
            for d in 1..=limit {
                // `n, d >= 1`, so construction cannot fail.
                let Ok(r) = Interval::new(n, d) else { continue };
                if r.is_unison() {
                    continue;
                }
                if let Some(sg) = &params.subgroup {
                    if !sg.contains(&r) {
                        continue;
                    }
                }
                if let Some(bound) = &params.range {
                    if !within_band(&r, bound) {
                        continue;
                    }
                }
                set.insert(r);
            }
        }

        let members = set
            .into_iter()
            .map(Member::new)
            .collect();
        Self { members }
    }

    /// Members sorted ascending by size.
    pub fn members(&self) -> &[Member] {
        &self.members
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    #[cfg(test)]
    fn contains(&self, interval: &Interval) -> bool {
        self.members
            .binary_search_by(|m| m.interval.cmp(interval))
            .is_ok()
    }

    pub fn intervals(&self) -> impl Iterator<Item = Interval> + '_ {
        self.members.iter().map(|m| m.interval)
    }
}

/// `1/bound <= r <= bound`, for `bound >= 1`.
fn within_band(r: &Interval, bound: &Interval) -> bool {
    let bound = if *bound < Interval::UNISON { bound.recip() } else { *bound };
    *r >= bound.recip() && *r <= bound
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::interval::gcd;

    fn iv(n: u64, d: u64) -> Interval {
        Interval::new(n, d).unwrap()
    }

    #[test]
    fn members_are_reduced_bounded_and_exclude_unison() {
        for limit in 1..=12 {
            let u = IntervalUniverse::build(&UniverseParams::with_limit(limit));
            for r in u.intervals() {
                assert!(!r.is_unison());
                assert!(r.num() <= limit && r.den() <= limit);
                assert_eq!(gcd(r.num(), r.den()), 1);
            }
        }
        assert!(IntervalUniverse::build(&UniverseParams::with_limit(1)).is_empty());
    }

    #[test]
    fn limit_five_within_octave() {
        let params = UniverseParams {
            integer_limit: 5,
            subgroup: None,
            range: Some(iv(2, 1)),
        };
        let u = IntervalUniverse::build(&params);

        let mut expected = BTreeSet::new();
        for n in 1..=5u64 {
            for d in 1..=5u64 {
                let r = iv(n, d);
                if !r.is_unison() && r >= iv(1, 2) && r <= iv(2, 1) {
                    expected.insert(r);
                }
            }
        }
        let actual: BTreeSet<Interval> = u.intervals().collect();
        assert_eq!(actual, expected);

        for r in [iv(5, 4), iv(4, 3), iv(3, 2), iv(5, 3), iv(2, 1), iv(4, 5), iv(1, 2)] {
            assert!(u.contains(&r), "missing {r}");
        }
        assert!(!u.contains(&iv(5, 1)));
        assert!(!u.contains(&iv(5, 2)));
        assert!(!u.contains(&Interval::UNISON));
    }

    #[test]
    fn subgroup_filters_primes() {
        let params = UniverseParams {
            integer_limit: 9,
            subgroup: Some("2.3".parse().unwrap()),
            range: None,
        };
        let u = IntervalUniverse::build(&params);
        assert!(u.contains(&iv(9, 8)));
        assert!(!u.contains(&iv(5, 4)));
        assert!(!u.contains(&iv(7, 4)));
    }

    #[test]
    fn empty_subgroup_is_unrestricted_and_disjoint_subgroup_is_empty() {
        let all = IntervalUniverse::build(&UniverseParams::with_limit(7));
        let empty_sg = IntervalUniverse::build(&UniverseParams {
            integer_limit: 7,
            subgroup: Some(Subgroup::default()),
            range: None,
        });
        assert_eq!(all, empty_sg);

        let none = IntervalUniverse::build(&UniverseParams {
            integer_limit: 7,
            subgroup: Some("11.13".parse().unwrap()),
            range: None,
        });
        assert!(none.is_empty());
    }

    #[test]
    fn subgroup_parsing() {
        let sg: Subgroup = "5.2.3.2".parse().unwrap();
        assert_eq!(sg.primes(), &[2, 3, 5]);
        assert_eq!(sg.to_string(), "2.3.5");
        assert!("2,3,7".parse::<Subgroup>().is_ok());
        assert_eq!("2.4".parse::<Subgroup>().unwrap_err().exit_code(), 2);
        assert!("2.x".parse::<Subgroup>().is_err());
    }

    #[test]
    fn members_carry_weights() {
        let u = IntervalUniverse::build(&UniverseParams::with_limit(3));
        let fifth = u.members().iter().find(|m| m.interval == iv(3, 2)).unwrap();
        assert!((fifth.weight - 1.0 / 6f64.log2()).abs() < 1e-12);
        assert!((fifth.cents - iv(3, 2).cents()).abs() < 1e-12);
    }
}
