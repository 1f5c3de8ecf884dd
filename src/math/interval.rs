//! Rational intervals and the number theory they need.
//!
//! Integer limits are small (tens, not thousands), so primality and
//! factorization use plain trial division.

use std::cmp::Ordering;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::AppError;

/// Greatest common divisor (Euclid). `gcd(0, 0) == 0`.
pub fn gcd(mut a: u64, mut b: u64) -> u64 {
    while b != 0 {
        let r = a % b;
        a = b;
        b = r;
    }
    a
}

pub fn is_prime(n: u64) -> bool {
    if n < 2 {
        return false;
    }
    let mut i = 2;
    while i * i <= n {
        if n % i == 0 {
            return false;
        }
        i += 1;
    }
    true
}

/// Prime factors of `n` with multiplicity, ascending. Empty for `n <= 1`.
pub fn prime_factors(mut n: u64) -> Vec<u64> {
    let mut factors = Vec::new();
    let mut p = 2;
    while n > 1 && p * p <= n {
        while n % p == 0 {
            factors.push(p);
            n /= p;
        }
        p += 1;
    }
    if n > 1 {
        factors.push(n);
    }
    factors
}

/// Convert a frequency ratio to cents.
pub fn ratio_to_cents(ratio: f64) -> f64 {
    1200.0 * ratio.log2()
}

/// A reduced fraction `num/den` of positive integers.
///
/// Equality and hashing are on the reduced pair; ordering is by size of the
/// ratio (cross-multiplication, exact).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Interval {
    num: u64,
    den: u64,
}

impl Interval {
    pub const UNISON: Interval = Interval { num: 1, den: 1 };

    /// Build `num/den` in lowest terms. Both parts must be positive.
    pub fn new(num: u64, den: u64) -> Result<Self, AppError> {
        if num == 0 || den == 0 {
            return Err(AppError::input(format!(
                "Invalid ratio {num}/{den}: numerator and denominator must be positive."
            )));
        }
        let g = gcd(num, den);
        Ok(Self {
            num: num / g,
            den: den / g,
        })
    }

    pub fn num(&self) -> u64 {
        self.num
    }

    pub fn den(&self) -> u64 {
        self.den
    }

    pub fn is_unison(&self) -> bool {
        self.num == self.den
    }

    pub fn recip(&self) -> Self {
        Self {
            num: self.den,
            den: self.num,
        }
    }

    pub fn as_f64(&self) -> f64 {
        self.num as f64 / self.den as f64
    }

    pub fn cents(&self) -> f64 {
        ratio_to_cents(self.as_f64())
    }

    /// `log2(num * den)`. Zero for the unison, where its inverse is undefined.
    pub fn tenney_height(&self) -> f64 {
        ((self.num as f64) * (self.den as f64)).log2()
    }

    /// True when every prime factor of numerator and denominator is in `primes`.
    pub fn is_in_subgroup(&self, primes: &[u64]) -> bool {
        prime_factors(self.num)
            .into_iter()
            .chain(prime_factors(self.den))
            .all(|p| primes.contains(&p))
    }
}

impl Ord for Interval {
    fn cmp(&self, other: &Self) -> Ordering {
        // Limits are small enough that u128 products cannot overflow.
        let lhs = self.num as u128 * other.den as u128;
        let rhs = other.num as u128 * self.den as u128;
        lhs.cmp(&rhs)
    }
}

impl PartialOrd for Interval {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for Interval {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.num, self.den)
    }
}
