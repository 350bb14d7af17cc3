//! Derive a 1–5 quality score from source-specific signals.

use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Lowest possible quality score.
pub const MIN_QUALITY: u8 = 1;
/// Highest possible quality score.
pub const MAX_QUALITY: u8 = 5;

/// Signals available to the scorer for one candidate.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct QualitySignals {
    /// Score implied by the facility type or venue category.
    pub base: f64,
    /// User rating on a 0–5 scale; venues only.
    pub rating: Option<f64>,
    /// Price tier where lower is cheaper; venues only.
    pub price_level: Option<u8>,
}

impl QualitySignals {
    /// Signals carrying only a base score.
    #[must_use]
    pub const fn base(base: f64) -> Self {
        Self {
            base,
            rating: None,
            price_level: None,
        }
    }
}

/// Scorer output: the clamped precise value and its rounded public form.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct QualityScore {
    /// Value in `1.0..=5.0` kept for display and diagnostics.
    pub precise: f64,
    /// Public score in `1..=5`.
    pub rounded: u8,
}

/// Descriptive label for a quality score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum QualityTier {
    /// Score of 3 or more.
    Premium,
    /// Score of 2.
    Standard,
    /// Score of 1.
    Basic,
}

impl QualityTier {
    /// Tier for a public quality score.
    ///
    /// # Examples
    /// ```
    /// use savemetoilet_core::QualityTier;
    ///
    /// assert_eq!(QualityTier::from_score(4), QualityTier::Premium);
    /// assert_eq!(QualityTier::from_score(2), QualityTier::Standard);
    /// assert_eq!(QualityTier::from_score(1), QualityTier::Basic);
    /// ```
    #[must_use]
    pub const fn from_score(score: u8) -> Self {
        match score {
            3.. => Self::Premium,
            2 => Self::Standard,
            _ => Self::Basic,
        }
    }

    /// Human-readable label.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Premium => "Premium",
            Self::Standard => "Standard",
            Self::Basic => "Basic",
        }
    }
}

impl fmt::Display for QualityTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Rating and price adjustments applied on top of the base score.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct QualityScorer {
    /// Bonus for ratings of at least 4.5.
    pub excellent_rating_bonus: f64,
    /// Bonus for ratings of at least 4.0.
    pub good_rating_bonus: f64,
    /// Penalty for ratings below 3.0.
    pub poor_rating_penalty: f64,
    /// Bonus for price tiers at or below [`QualityScorer::cheap_price_level`].
    pub cheap_price_bonus: f64,
    /// Highest price tier counted as cheap.
    pub cheap_price_level: u8,
}

impl Default for QualityScorer {
    fn default() -> Self {
        Self {
            excellent_rating_bonus: 0.5,
            good_rating_bonus: 0.3,
            poor_rating_penalty: 0.3,
            cheap_price_bonus: 0.2,
            cheap_price_level: 2,
        }
    }
}

impl QualityScorer {
    /// Score a set of signals.
    ///
    /// Missing or non-finite ratings and missing price tiers leave the base
    /// untouched. The precise result is clamped to `[1.0, 5.0]` and the
    /// public score is its nearest integer.
    ///
    /// # Examples
    /// ```
    /// use savemetoilet_core::{QualityScorer, QualitySignals};
    ///
    /// let scorer = QualityScorer::default();
    /// let score = scorer.score(&QualitySignals {
    ///     base: 3.0,
    ///     rating: Some(4.7),
    ///     price_level: Some(1),
    /// });
    /// assert!((score.precise - 3.7).abs() < 1e-9);
    /// assert_eq!(score.rounded, 4);
    /// ```
    #[must_use]
    #[expect(
        clippy::float_arithmetic,
        reason = "quality adjustments are fractional"
    )]
    pub fn score(&self, signals: &QualitySignals) -> QualityScore {
        let mut adjusted = if signals.base.is_finite() {
            signals.base
        } else {
            f64::from(MIN_QUALITY)
        };
        if let Some(rating) = signals.rating.filter(|value| value.is_finite()) {
            adjusted += self.rating_adjustment(rating);
        }
        if signals
            .price_level
            .is_some_and(|level| level <= self.cheap_price_level)
        {
            adjusted += self.cheap_price_bonus;
        }
        let precise = adjusted.clamp(f64::from(MIN_QUALITY), f64::from(MAX_QUALITY));
        QualityScore {
            precise,
            rounded: round_score(precise),
        }
    }

    #[expect(clippy::float_arithmetic, reason = "penalty is a negated bonus")]
    fn rating_adjustment(&self, rating: f64) -> f64 {
        if rating >= 4.5 {
            self.excellent_rating_bonus
        } else if rating >= 4.0 {
            self.good_rating_bonus
        } else if rating < 3.0 {
            -self.poor_rating_penalty
        } else {
            0.0
        }
    }
}

#[expect(
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    reason = "input is clamped to 1.0..=5.0 before the cast"
)]
fn round_score(precise: f64) -> u8 {
    (precise.round() as u8).clamp(MIN_QUALITY, MAX_QUALITY)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rstest::{fixture, rstest};

    #[fixture]
    fn scorer() -> QualityScorer {
        QualityScorer::default()
    }

    #[rstest]
    #[case(3.0, Some(4.5), None, 3.5, 4)]
    #[case(3.0, Some(4.2), None, 3.3, 3)]
    #[case(3.0, Some(3.5), None, 3.0, 3)]
    #[case(2.0, Some(2.9), None, 1.7, 2)]
    #[case(2.0, None, Some(2), 2.2, 2)]
    #[case(2.0, None, Some(3), 2.0, 2)]
    #[case(1.0, Some(1.0), None, 1.0, 1)]
    #[case(5.0, Some(5.0), Some(0), 5.0, 5)]
    #[case(2.0, Some(f64::NAN), None, 2.0, 2)]
    #[expect(clippy::float_arithmetic, reason = "tolerance check")]
    fn adjustments_follow_rating_and_price(
        scorer: QualityScorer,
        #[case] base: f64,
        #[case] rating: Option<f64>,
        #[case] price_level: Option<u8>,
        #[case] precise: f64,
        #[case] rounded: u8,
    ) {
        let score = scorer.score(&QualitySignals {
            base,
            rating,
            price_level,
        });
        assert!(
            (score.precise - precise).abs() < 1e-9,
            "expected {precise}, got {}",
            score.precise
        );
        assert_eq!(score.rounded, rounded);
    }

    #[rstest]
    fn public_facility_without_signals_keeps_base(scorer: QualityScorer) {
        let score = scorer.score(&QualitySignals::base(1.0));
        assert_eq!(score.rounded, 1);
        assert_eq!(QualityTier::from_score(score.rounded), QualityTier::Basic);
    }

    proptest! {
        #[test]
        fn score_is_always_clamped(
            base in -10.0_f64..20.0,
            rating in proptest::option::of(-100.0_f64..100.0),
            price_level in proptest::option::of(any::<u8>()),
        ) {
            let score = QualityScorer::default().score(&QualitySignals { base, rating, price_level });
            prop_assert!((1.0..=5.0).contains(&score.precise));
            prop_assert!((MIN_QUALITY..=MAX_QUALITY).contains(&score.rounded));
        }
    }
}
