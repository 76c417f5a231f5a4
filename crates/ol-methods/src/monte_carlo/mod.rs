//! Monte Carlo path generation.
//!
//! # Overview
//!
//! * [`PathGenerator`] - simulates geometric Brownian motion paths of the spot
//! * [`SimulatedPaths`] - the simulated paths, one contiguous row per path
//! * [`VarianceReduction`] - how draws are shaped before simulation and how
//!   the resulting discounted-payoff sample is reduced afterwards
//!
//! The generator never looks at payoffs; engines evaluate their own payoff on
//! each path and hand the discounted sample back to
//! [`VarianceReduction::reduce`].

use ol_core::{Real, Size};
use ol_instruments::OptionParams;
use ol_math::random_numbers::MersenneTwisterNormalRng;
use std::fmt;
use std::str::FromStr;

// ─── VarianceReduction ────────────────────────────────────────────────────────

/// Variance-reduction mode for Monte Carlo engines.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "kebab-case"))]
pub enum VarianceReduction {
    /// Plain pseudo-random sampling.
    #[default]
    None,
    /// Mirrored path pairs driven by `z` and `−z`.
    Antithetic,
    /// The whole block of normal draws is rescaled to mean 0, variance 1.
    MomentMatching,
    /// Moment-matched draws consumed in antithetic pairs.
    AntitheticMomentMatching,
}

impl VarianceReduction {
    /// Every mode, in declaration order.
    pub const ALL: [VarianceReduction; 4] = [
        VarianceReduction::None,
        VarianceReduction::Antithetic,
        VarianceReduction::MomentMatching,
        VarianceReduction::AntitheticMomentMatching,
    ];

    /// Whether paths are generated in mirrored pairs.
    pub fn uses_antithetic(self) -> bool {
        matches!(
            self,
            VarianceReduction::Antithetic | VarianceReduction::AntitheticMomentMatching
        )
    }

    /// Whether the normal draws are moment-matched.
    pub fn uses_moment_matching(self) -> bool {
        matches!(
            self,
            VarianceReduction::MomentMatching | VarianceReduction::AntitheticMomentMatching
        )
    }

    /// Name used in diagnostics and on the command line.
    pub fn as_str(self) -> &'static str {
        match self {
            VarianceReduction::None => "none",
            VarianceReduction::Antithetic => "antithetic",
            VarianceReduction::MomentMatching => "moment-matching",
            VarianceReduction::AntitheticMomentMatching => "antithetic-moment-matching",
        }
    }

    /// Post-process a discounted-payoff sample.
    ///
    /// Antithetic modes average each consecutive pair `(2k, 2k+1)`; an odd
    /// trailing element is kept on its own. Other modes, and samples with
    /// fewer than two elements, are returned unchanged.
    pub fn reduce(self, sample: &[Real]) -> Vec<Real> {
        if !self.uses_antithetic() || sample.len() < 2 {
            return sample.to_vec();
        }
        sample
            .chunks(2)
            .map(|pair| pair.iter().sum::<Real>() / pair.len() as Real)
            .collect()
    }
}

impl fmt::Display for VarianceReduction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for VarianceReduction {
    type Err = ol_core::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key = s.trim().to_ascii_lowercase().replace('_', "-");
        match key.as_str() {
            "none" | "plain" => Ok(VarianceReduction::None),
            "antithetic" | "av" => Ok(VarianceReduction::Antithetic),
            "moment-matching" | "mm" => Ok(VarianceReduction::MomentMatching),
            "antithetic-moment-matching" | "av-mm" => {
                Ok(VarianceReduction::AntitheticMomentMatching)
            }
            _ => ol_core::fail!("unknown variance reduction '{s}'"),
        }
    }
}

// ─── SimulatedPaths ───────────────────────────────────────────────────────────

/// A set of simulated spot paths on a uniform time grid.
///
/// Stored row-major: path `i` occupies `time_steps + 1` consecutive values,
/// the first being the initial spot.
#[derive(Debug, Clone, PartialEq)]
pub struct SimulatedPaths {
    values: Vec<Real>,
    paths: Size,
    columns: Size,
}

impl SimulatedPaths {
    fn constant(paths: Size, time_steps: Size, spot: Real) -> Self {
        let columns = time_steps + 1;
        Self {
            values: vec![spot; paths * columns],
            paths,
            columns,
        }
    }

    /// Number of paths.
    pub fn paths(&self) -> Size {
        self.paths
    }

    /// Number of time steps (= points per path − 1).
    pub fn time_steps(&self) -> Size {
        self.columns - 1
    }

    /// Whether no path was simulated.
    pub fn is_empty(&self) -> bool {
        self.paths == 0
    }

    /// Path `i`, initial spot included.
    pub fn path(&self, i: Size) -> &[Real] {
        &self.values[i * self.columns..(i + 1) * self.columns]
    }

    /// Spot of path `i` at time step `step`.
    #[inline]
    pub fn spot(&self, i: Size, step: Size) -> Real {
        self.values[i * self.columns + step]
    }

    /// Spot of path `i` at maturity.
    pub fn terminal(&self, i: Size) -> Real {
        self.spot(i, self.columns - 1)
    }

    /// Iterate over all paths.
    pub fn iter(&self) -> impl Iterator<Item = &[Real]> + '_ {
        self.values.chunks_exact(self.columns)
    }

    fn path_mut(&mut self, i: Size) -> &mut [Real] {
        &mut self.values[i * self.columns..(i + 1) * self.columns]
    }
}

// ─── PathGenerator ────────────────────────────────────────────────────────────

/// Geometric Brownian motion path generator.
///
/// Each step advances the spot by `exp((r − q − σ²/2)Δt + σ√Δt·z)` with
/// `z` standard normal. A fresh MT19937-64 stream is seeded on every call to
/// [`generate`](Self::generate), so the generator holds no mutable state and
/// equal settings always give identical paths.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PathGenerator {
    paths: Size,
    time_steps: Size,
    seed: u64,
    variance_reduction: VarianceReduction,
}

impl PathGenerator {
    /// Create a generator. A `time_steps` of 0 is treated as 1.
    pub fn new(
        paths: Size,
        time_steps: Size,
        seed: u64,
        variance_reduction: VarianceReduction,
    ) -> Self {
        Self {
            paths,
            time_steps: time_steps.max(1),
            seed,
            variance_reduction,
        }
    }

    /// Number of paths generated per call.
    pub fn paths(&self) -> Size {
        self.paths
    }

    /// Number of time steps per path.
    pub fn time_steps(&self) -> Size {
        self.time_steps
    }

    /// Variance-reduction mode.
    pub fn variance_reduction(&self) -> VarianceReduction {
        self.variance_reduction
    }

    /// Simulate paths under `params`.
    ///
    /// Degenerate parameters (`T ≤ 0` or `σ ≤ 0`) give paths that stay at
    /// spot without consuming randomness. Draws are consumed path-major:
    /// each path (or antithetic pair) takes `time_steps` consecutive normals.
    pub fn generate(&self, params: &OptionParams) -> SimulatedPaths {
        let steps = self.time_steps;
        let mut out = SimulatedPaths::constant(self.paths, steps, params.spot);
        if self.paths == 0 || params.is_degenerate() {
            return out;
        }

        let dt = params.maturity / steps as Real;
        let sigma = params.volatility;
        let drift = (params.rate - params.dividend_yield - 0.5 * sigma * sigma) * dt;
        let diffusion = sigma * dt.sqrt();

        let antithetic = self.variance_reduction.uses_antithetic();
        let base_paths = if antithetic {
            self.paths.div_ceil(2)
        } else {
            self.paths
        };

        let mut rng = MersenneTwisterNormalRng::new(self.seed);
        let mut normals = if self.variance_reduction.uses_moment_matching() {
            let mut block = vec![0.0; base_paths * steps];
            rng.fill(&mut block);
            moment_match(&mut block);
            Normals::Block {
                draws: block,
                cursor: 0,
            }
        } else {
            Normals::Stream(rng)
        };

        let mut z = vec![0.0; steps];
        for k in 0..base_paths {
            normals.fill(&mut z);
            if antithetic {
                let i = 2 * k;
                evolve(out.path_mut(i), &z, drift, diffusion);
                if i + 1 < self.paths {
                    evolve(out.path_mut(i + 1), &z, drift, -diffusion);
                }
            } else {
                evolve(out.path_mut(k), &z, drift, diffusion);
            }
        }
        out
    }
}

/// Source of standard normals for one `generate` call.
enum Normals {
    Stream(MersenneTwisterNormalRng),
    Block { draws: Vec<Real>, cursor: usize },
}

impl Normals {
    fn fill(&mut self, out: &mut [Real]) {
        match self {
            Normals::Stream(rng) => rng.fill(out),
            Normals::Block { draws, cursor } => {
                let end = *cursor + out.len();
                out.copy_from_slice(&draws[*cursor..end]);
                *cursor = end;
            }
        }
    }
}

/// Advance `path[0]` through the draws `z`, writing `path[1..]`.
fn evolve(path: &mut [Real], z: &[Real], drift: Real, diffusion: Real) {
    let mut spot = path[0];
    for (slot, &dz) in path[1..].iter_mut().zip(z) {
        spot *= (drift + diffusion * dz).exp();
        *slot = spot;
    }
}

/// Demean `draws` and scale them to unit population variance.
///
/// Afterwards the block has mean exactly 0 and `Σz²/n` exactly 1. A block
/// with zero dispersion is only centred.
pub fn moment_match(draws: &mut [Real]) {
    if draws.is_empty() {
        return;
    }
    let n = draws.len() as Real;
    let mean = draws.iter().sum::<Real>() / n;
    let var = draws.iter().map(|z| (z - mean) * (z - mean)).sum::<Real>() / n;
    let std = var.sqrt();
    let inv = if std > 0.0 { 1.0 / std } else { 1.0 };
    for z in draws.iter_mut() {
        *z = (*z - mean) * inv;
    }
}

// ─── Tests ────────────────────────────────────────────────────────────────────
