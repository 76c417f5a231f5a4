//! Option specifications and market parameters.
//!
//! [`OptionSpec`] describes a plain vanilla option (payoff plus exercise
//! style); [`PathDependentOptionSpec`] describes an exotic whose payoff
//! needs the whole simulated path. Both are priced against the flat
//! Black-Scholes market in [`OptionParams`].

use crate::exercise::ExerciseStyle;
use crate::payoff::{OptionType, Payoff, PlainVanillaPayoff};
use ol_core::{Rate, Real, Time, Volatility};
use std::fmt;

// ────────────────────────────────────────────────────────────────────────────
// Market parameters
// ────────────────────────────────────────────────────────────────────────────

/// Flat Black-Scholes market and contract parameters for one pricing call.
///
/// Non-positive `maturity` or `volatility` is a valid, degenerate input:
/// engines answer it with the intrinsic value rather than an error.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct OptionParams {
    /// Spot price S.
    pub spot: Real,
    /// Strike price K (duplicated on the payoff for convenience).
    pub strike: Real,
    /// Continuously-compounded risk-free rate r.
    pub rate: Rate,
    /// Continuous dividend yield q.
    pub dividend_yield: Rate,
    /// Volatility σ.
    pub volatility: Volatility,
    /// Time to maturity T in years.
    pub maturity: Time,
}

impl OptionParams {
    /// Create market parameters.
    pub fn new(
        spot: Real,
        strike: Real,
        rate: Rate,
        dividend_yield: Rate,
        volatility: Volatility,
        maturity: Time,
    ) -> Self {
        Self {
            spot,
            strike,
            rate,
            dividend_yield,
            volatility,
            maturity,
        }
    }

    /// `T ≤ 0` or `σ ≤ 0`: the option collapses to its intrinsic value.
    #[inline]
    pub fn is_degenerate(&self) -> bool {
        self.maturity <= 0.0 || self.volatility <= 0.0
    }

    /// Copy with a replaced spot.
    #[inline]
    pub fn with_spot(&self, spot: Real) -> Self {
        Self { spot, ..*self }
    }

    /// Discount factor `exp(−r·T)` to maturity; 1 once expired.
    #[inline]
    pub fn discount(&self) -> Real {
        (-self.rate * self.maturity.max(0.0)).exp()
    }
}

impl fmt::Display for OptionParams {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "S={}, K={}, r={}, q={}, sigma={}, T={}",
            self.spot, self.strike, self.rate, self.dividend_yield, self.volatility, self.maturity
        )
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Vanilla specification
// ────────────────────────────────────────────────────────────────────────────

/// A plain vanilla option: payoff plus exercise style.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct OptionSpec {
    /// The payoff.
    pub payoff: PlainVanillaPayoff,
    /// The exercise style.
    pub exercise: ExerciseStyle,
}

impl OptionSpec {
    /// Create a specification from its parts.
    pub fn new(payoff: PlainVanillaPayoff, exercise: ExerciseStyle) -> Self {
        Self { payoff, exercise }
    }

    /// European call/put.
    pub fn european(option_type: OptionType, strike: Real) -> Self {
        Self::new(
            PlainVanillaPayoff::new(option_type, strike),
            ExerciseStyle::European,
        )
    }

    /// American call/put.
    pub fn american(option_type: OptionType, strike: Real) -> Self {
        Self::new(
            PlainVanillaPayoff::new(option_type, strike),
            ExerciseStyle::American,
        )
    }

    /// Same payoff, different exercise style.
    pub fn with_exercise(&self, exercise: ExerciseStyle) -> Self {
        Self { exercise, ..*self }
    }

    /// Payoff evaluated at `spot`.
    #[inline]
    pub fn intrinsic(&self, spot: Real) -> Real {
        self.payoff.value(spot)
    }

    /// The option type.
    pub fn option_type(&self) -> OptionType {
        self.payoff.option_type
    }

    /// Whether early exercise is allowed.
    pub fn is_american(&self) -> bool {
        self.exercise == ExerciseStyle::American
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Path-dependent specification
// ────────────────────────────────────────────────────────────────────────────

/// Barrier type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "kebab-case"))]
pub enum BarrierType {
    /// Up-and-in: becomes active once the price reaches the barrier from below.
    UpIn,
    /// Up-and-out: expires once the price reaches the barrier from below.
    UpOut,
    /// Down-and-in: becomes active once the price reaches the barrier from above.
    DownIn,
    /// Down-and-out: expires once the price reaches the barrier from above.
    DownOut,
}

impl BarrierType {
    /// Up barriers are hit by spots at or above the level.
    #[inline]
    pub fn is_up(self) -> bool {
        matches!(self, BarrierType::UpIn | BarrierType::UpOut)
    }

    /// Knock-in barriers pay only if hit.
    #[inline]
    pub fn is_knock_in(self) -> bool {
        matches!(self, BarrierType::UpIn | BarrierType::DownIn)
    }

    /// Whether any sampled spot touches `level`.
    pub fn is_hit(self, path: &[Real], level: Real) -> bool {
        if self.is_up() {
            path.iter().any(|&s| s >= level)
        } else {
            path.iter().any(|&s| s <= level)
        }
    }
}

/// Which exotic payoff a [`PathDependentOptionSpec`] carries.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(tag = "type", rename_all = "kebab-case"))]
pub enum ExoticKind {
    /// Arithmetic average of every sampled spot, initial spot included.
    ArithmeticAsian,
    /// Vanilla payoff at maturity, activated or cancelled by a barrier.
    Barrier {
        /// Barrier level.
        level: Real,
        /// Direction and knock behaviour.
        barrier_type: BarrierType,
    },
    /// Fixed-strike lookback on the path maximum (calls) or minimum (puts).
    Lookback,
}

/// An exotic option whose payoff depends on the whole price path.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PathDependentOptionSpec {
    /// Exotic payoff kind.
    pub kind: ExoticKind,
    /// Call or put.
    pub option_type: OptionType,
    /// Strike price.
    pub strike: Real,
}

impl PathDependentOptionSpec {
    /// Arithmetic-average Asian option.
    pub fn asian(option_type: OptionType, strike: Real) -> Self {
        Self {
            kind: ExoticKind::ArithmeticAsian,
            option_type,
            strike,
        }
    }

    /// Barrier option.
    pub fn barrier(
        option_type: OptionType,
        strike: Real,
        level: Real,
        barrier_type: BarrierType,
    ) -> Self {
        Self {
            kind: ExoticKind::Barrier {
                level,
                barrier_type,
            },
            option_type,
            strike,
        }
    }

    /// Fixed-strike lookback option.
    pub fn lookback(option_type: OptionType, strike: Real) -> Self {
        Self {
            kind: ExoticKind::Lookback,
            option_type,
            strike,
        }
    }

    /// Undiscounted payoff of a full sampled path.
    ///
    /// `path[0]` is the initial spot and `path.last()` the spot at maturity.
    /// An empty path pays nothing.
    pub fn payoff(&self, path: &[Real]) -> Real {
        let Some(&terminal) = path.last() else {
            return 0.0;
        };
        match self.kind {
            ExoticKind::ArithmeticAsian => {
                let avg = path.iter().sum::<Real>() / path.len() as Real;
                self.option_type.intrinsic(avg, self.strike)
            }
            ExoticKind::Barrier {
                level,
                barrier_type,
            } => {
                let hit = barrier_type.is_hit(path, level);
                if hit != barrier_type.is_knock_in() {
                    return 0.0;
                }
                self.option_type.intrinsic(terminal, self.strike)
            }
            ExoticKind::Lookback => match self.option_type {
                OptionType::Call => {
                    let max = path.iter().copied().fold(Real::NEG_INFINITY, Real::max);
                    (max - self.strike).max(0.0)
                }
                OptionType::Put => {
                    let min = path.iter().copied().fold(Real::INFINITY, Real::min);
                    (self.strike - min).max(0.0)
                }
            },
        }
    }
}
