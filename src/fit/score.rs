//! Layout score for one step pair.
//!
//! For every interval `r` in the universe we find the pad pitch closest to
//! `cents(r)` and award
//!
//! `point_value(r) = (1 / tenney(r)) * max(0, 1 - error² / limit²)`
//!
//! so simple intervals count more and credit falls off quadratically to zero
//! at the error limit. The layout score is the sum over the universe.

use std::collections::HashMap;

use crate::domain::{LatticeVector, StepPair};
use crate::error::AppError;
use crate::math::{IntervalUniverse, Member};

/// Quadratic falloff: `1` at zero error, `0` at and beyond `error_limit`.
pub fn falloff(error: f64, error_limit: f64) -> f64 {
    (1.0 - (error * error) / (error_limit * error_limit)).max(0.0)
}

/// Credit for approximating `member` by the pitch `best_approximation`.
pub fn point_value(member: &Member, best_approximation: f64, error_limit: f64) -> f64 {
    let error = (best_approximation - member.cents).abs();
    falloff(error, error_limit) * member.weight
}

/// How the memoization cache keys step pairs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum KeyMode {
    /// `(a, b)` and `(b, a)` are separate entries.
    #[default]
    Ordered,
    /// The sorted pair is the key, so `(b, a)` reuses the score of `(a, b)`.
    ///
    /// Exact only for layouts symmetric under swapping their axes.
    Sorted,
}

/// Run-scoped memo of step pair scores.
#[derive(Debug, Clone, Default)]
pub struct ScoreCache {
    mode: KeyMode,
    scores: HashMap<(u64, u64), f64>,
    hits: usize,
}

impl ScoreCache {
    pub fn new(mode: KeyMode) -> Self {
        Self {
            mode,
            scores: HashMap::new(),
            hits: 0,
        }
    }

    pub fn len(&self) -> usize {
        self.scores.len()
    }

    pub fn is_empty(&self) -> bool {
        self.scores.is_empty()
    }

    /// Lookups served from the memo.
    pub fn hits(&self) -> usize {
        self.hits
    }

    fn key(&self, steps: StepPair) -> (u64, u64) {
        let steps = match self.mode {
            KeyMode::Ordered => steps,
            KeyMode::Sorted => steps.sorted(),
        };
        // `-0.0` and `0.0` must share a key.
        let bits = |x: f64| if x == 0.0 { 0 } else { x.to_bits() };
        (bits(steps.first), bits(steps.second))
    }
}

/// Scores step pairs for one controller against one universe.
#[derive(Debug, Clone, Copy)]
pub struct Scorer<'a> {
    universe: &'a IntervalUniverse,
    vectors: &'a [LatticeVector],
    error_limit: f64,
}

impl<'a> Scorer<'a> {
    pub fn new(
        universe: &'a IntervalUniverse,
        vectors: &'a [LatticeVector],
        error_limit: f64,
    ) -> Result<Self, AppError> {
        if !(error_limit.is_finite() && error_limit > 0.0) {
            return Err(AppError::input(format!(
                "Invalid error limit {error_limit} (must be finite and > 0)."
            )));
        }
        Ok(Self {
            universe,
            vectors,
            error_limit,
        })
    }

    /// Score without memoization.
    pub fn score(&self, steps: StepPair) -> f64 {
        if self.universe.is_empty() || self.vectors.is_empty() {
            return 0.0;
        }

        let mut pitches: Vec<f64> = self.vectors.iter().map(|v| v.cents(steps)).collect();
        pitches.sort_by(f64::total_cmp);

        self.universe
            .members()
            .iter()
            .map(|m| point_value(m, nearest(&pitches, m.cents), self.error_limit))
            .sum()
    }

    /// Score through `cache`.
    pub fn score_cached(&self, steps: StepPair, cache: &mut ScoreCache) -> f64 {
        let key = cache.key(steps);
        if let Some(&v) = cache.scores.get(&key) {
            cache.hits += 1;
            return v;
        }
        let v = self.score(steps);
        cache.scores.insert(key, v);
        v
    }
}

/// Value in ascending, non-empty `sorted` closest to `target`; ties go low.
pub fn nearest(sorted: &[f64], target: f64) -> f64 {
    let idx = sorted.partition_point(|&p| p < target);
    match (idx.checked_sub(1).map(|i| sorted[i]), sorted.get(idx).copied()) {
        (Some(lo), Some(hi)) => {
            if target - lo <= hi - target {
                lo
            } else {
                hi
            }
        }
        (Some(lo), None) => lo,
        (None, Some(hi)) => hi,
        (None, None) => f64::NAN,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::Controller;
    use crate::math::{Interval, UniverseParams};
    use rand::{rngs::StdRng, Rng, SeedableRng};

    fn iv(n: u64, d: u64) -> Interval {
        Interval::new(n, d).unwrap()
    }

    fn linear_nearest(xs: &[f64], target: f64) -> f64 {
        xs.iter()
            .copied()
            .min_by(|a, b| (a - target).abs().total_cmp(&(b - target).abs()))
            .unwrap()
    }

    #[test]
    fn point_value_at_zero_error_is_inverse_tenney() {
        let r = iv(3, 2);
        let m = Member::new(r);
        assert!((point_value(&m, r.cents(), 15.0) - 1.0 / r.tenney_height()).abs() < 1e-12);
    }

    #[test]
    fn point_value_vanishes_at_error_limit() {
        let r = iv(5, 4);
        let m = Member::new(r);
        let c = m.cents;
        assert_eq!(point_value(&m, c + 15.0, 15.0), 0.0);
        assert_eq!(point_value(&m, c - 40.0, 15.0), 0.0);
        let half = point_value(&m, c + 7.5, 15.0);
        assert!((half - 0.75 / r.tenney_height()).abs() < 1e-12);
    }

    #[test]
    fn nearest_matches_linear_scan() {
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..200 {
            let mut xs: Vec<f64> = (0..rng.gen_range(1..20)).map(|_| rng.gen_range(-2000.0..2000.0)).collect();
            let target = rng.gen_range(-2500.0..2500.0);
            let expected = (linear_nearest(&xs, target) - target).abs();
            xs.sort_by(f64::total_cmp);
            assert!(((nearest(&xs, target) - target).abs() - expected).abs() < 1e-9);
        }
    }

    #[test]
    fn score_sums_point_values_of_nearest_pads() {
        let universe = IntervalUniverse::build(&UniverseParams::with_limit(8));
        let vectors = Controller::Exquis.vectors();
        let scorer = Scorer::new(&universe, &vectors, 15.0).unwrap();
        let steps = StepPair::new(203.0, 498.0);
        let pitches: Vec<f64> = vectors.iter().map(|v| v.cents(steps)).collect();

        let expected: f64 = universe
            .members()
            .iter()
            .map(|m| point_value(m, linear_nearest(&pitches, m.cents), 15.0))
            .sum();
        assert!(expected > 0.0);
        assert!((scorer.score(steps) - expected).abs() < 1e-9);
    }

    #[test]
    fn score_is_non_negative() {
        let universe = IntervalUniverse::build(&UniverseParams::with_limit(9));
        let vectors = Controller::Exquis39.vectors();
        let scorer = Scorer::new(&universe, &vectors, 15.0).unwrap();
        let mut rng = StdRng::seed_from_u64(42);
        for _ in 0..100 {
            let steps = StepPair::new(rng.gen_range(-800.0..800.0), rng.gen_range(-800.0..800.0));
            assert!(scorer.score(steps) >= 0.0);
        }
    }

    #[test]
    fn exact_tuning_scores_full_credit() {
        // Octave and fifth as the two steps: every member of {1/2, 2/3, 3/2, 2/1}
        // is one pad away.
        let params = UniverseParams {
            integer_limit: 3,
            subgroup: None,
            range: Some(iv(2, 1)),
        };
        let universe = IntervalUniverse::build(&params);
        let vectors = Controller::Launchpad.vectors();
        let scorer = Scorer::new(&universe, &vectors, 15.0).unwrap();
        let fifth = iv(3, 2).cents();
        let s = scorer.score(StepPair::new(1200.0, fifth));

        let expected: f64 = universe.members().iter().map(|m| m.weight).sum();
        assert!((s - expected).abs() < 1e-9, "score {s} expected {expected}");
    }

    #[test]
    fn empty_universe_scores_zero() {
        let params = UniverseParams {
            integer_limit: 8,
            subgroup: Some("11".parse().unwrap()),
            range: None,
        };
        let universe = IntervalUniverse::build(&params);
        let vectors = Controller::Exquis.vectors();
        let scorer = Scorer::new(&universe, &vectors, 15.0).unwrap();
        assert_eq!(scorer.score(StepPair::new(200.0, 500.0)), 0.0);
    }

    #[test]
    fn invalid_error_limit_is_rejected() {
        let universe = IntervalUniverse::build(&UniverseParams::with_limit(3));
        let vectors = Controller::Exquis.vectors();
        assert!(Scorer::new(&universe, &vectors, 0.0).is_err());
        assert!(Scorer::new(&universe, &vectors, f64::INFINITY).is_err());
    }

    #[test]
    fn sorted_keys_share_swapped_pairs() {
        let universe = IntervalUniverse::build(&UniverseParams::with_limit(7));
        let vectors = Controller::Exquis39.vectors();
        let scorer = Scorer::new(&universe, &vectors, 15.0).unwrap();
        let a = StepPair::new(111.0, 390.0);

        let mut sorted = ScoreCache::new(KeyMode::Sorted);
        let first = scorer.score_cached(a, &mut sorted);
        let swapped = scorer.score_cached(a.swapped(), &mut sorted);
        assert_eq!(first, swapped);
        assert_eq!(sorted.len(), 1);
        assert_eq!(sorted.hits(), 1);

        let mut ordered = ScoreCache::new(KeyMode::Ordered);
        assert_eq!(scorer.score_cached(a, &mut ordered), scorer.score(a));
        assert_eq!(scorer.score_cached(a.swapped(), &mut ordered), scorer.score(a.swapped()));
        assert_eq!(ordered.len(), 2);
        assert_eq!(ordered.hits(), 0);
    }
}
