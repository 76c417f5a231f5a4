//! Engine configuration.
//!
//! Every engine is built from an immutable configuration value. Builders
//! validate at [`build`](MonteCarloConfigBuilder::build) time:
//!
//! - path counts and time-step counts must be at least 1;
//! - the finite-difference bump must be finite and non-negative;
//! - the LSMC polynomial degree must not exceed [`MAX_POLYNOMIAL_DEGREE`].
//!
//! A lattice step count of 0 is accepted here and reported by the engine
//! when it is asked for a price.
//!
//! ```
//! use ol_pricingengines::config::MonteCarloConfig;
//! use ol_methods::VarianceReduction;
//!
//! let config = MonteCarloConfig::builder()
//!     .paths(50_000)
//!     .seed(42)
//!     .variance_reduction(VarianceReduction::Antithetic)
//!     .build()
//!     .unwrap();
//! assert_eq!(config.paths(), 50_000);
//! assert_eq!(config.time_steps(), 1);
//! ```

use ol_core::{errors::Error, errors::Result, Real, Size};
use ol_methods::{PathGenerator, VarianceReduction};

/// Default lattice step count for the binomial engine.
pub const DEFAULT_BINOMIAL_STEPS: Size = 4000;
/// Default lattice step count for the trinomial engine.
pub const DEFAULT_TRINOMIAL_STEPS: Size = 2000;
/// Default log-spot bump for finite-difference Greeks.
pub const DEFAULT_BUMP: Real = 0.0005;
/// Default Mersenne-Twister seed.
pub const DEFAULT_SEED: u64 = 5489;
/// Highest Laguerre degree accepted by the LSMC engine.
pub const MAX_POLYNOMIAL_DEGREE: usize = 10;

fn check_paths(paths: Size) -> Result<()> {
    if paths == 0 {
        return Err(Error::InvalidConfiguration("at least one path is required".into()));
    }
    Ok(())
}

fn check_time_steps(time_steps: Size) -> Result<()> {
    if time_steps == 0 {
        return Err(Error::InvalidConfiguration("at least one time step is required".into()));
    }
    Ok(())
}

// ─── Lattice ──────────────────────────────────────────────────────────────────

/// Configuration of the binomial and trinomial lattice engines.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LatticeConfig {
    steps: Size,
    bump: Real,
}

impl LatticeConfig {
    /// `steps` with the default bump.
    pub fn new(steps: Size) -> Self {
        Self {
            steps,
            bump: DEFAULT_BUMP,
        }
    }

    /// Builder seeded with the binomial defaults (4000 steps).
    pub fn binomial() -> LatticeConfigBuilder {
        LatticeConfigBuilder::new(DEFAULT_BINOMIAL_STEPS)
    }

    /// Builder seeded with the trinomial defaults (2000 steps).
    pub fn trinomial() -> LatticeConfigBuilder {
        LatticeConfigBuilder::new(DEFAULT_TRINOMIAL_STEPS)
    }

    /// Number of time steps in the tree.
    #[inline]
    pub fn steps(&self) -> Size {
        self.steps
    }

    /// Log-spot bump used for delta and gamma; 0 disables them.
    #[inline]
    pub fn bump(&self) -> Real {
        self.bump
    }
}

/// Builder for [`LatticeConfig`].
#[derive(Debug, Clone, Copy)]
pub struct LatticeConfigBuilder {
    config: LatticeConfig,
}

impl LatticeConfigBuilder {
    fn new(steps: Size) -> Self {
        Self {
            config: LatticeConfig::new(steps),
        }
    }

    /// Sets the number of time steps.
    pub fn steps(mut self, steps: Size) -> Self {
        self.config.steps = steps;
        self
    }

    /// Sets the log-spot bump.
    pub fn bump(mut self, bump: Real) -> Self {
        self.config.bump = bump;
        self
    }

    /// Validate and build.
    pub fn build(self) -> Result<LatticeConfig> {
        let bump = self.config.bump;
        if !bump.is_finite() || bump < 0.0 {
            return Err(Error::InvalidConfiguration(format!(
                "bump must be finite and non-negative, got {bump}"
            )));
        }
        Ok(self.config)
    }
}

// ─── Monte Carlo ──────────────────────────────────────────────────────────────

/// Configuration of the European and path-dependent Monte Carlo engines.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MonteCarloConfig {
    paths: Size,
    time_steps: Size,
    seed: u64,
    variance_reduction: VarianceReduction,
}

/// The path-dependent engine shares the Monte Carlo configuration; only the
/// defaults differ (see [`MonteCarloConfig::path_dependent`]).
pub type PathDependentConfig = MonteCarloConfig;

impl MonteCarloConfig {
    /// Builder with the European defaults: 20 000 paths, 1 time step.
    pub fn builder() -> MonteCarloConfigBuilder {
        MonteCarloConfigBuilder {
            config: Self::default(),
        }
    }

    /// Builder with the path-dependent defaults: 50 000 paths, 75 time steps.
    pub fn path_dependent() -> MonteCarloConfigBuilder {
        MonteCarloConfigBuilder {
            config: Self::path_dependent_default(),
        }
    }

    /// The path-dependent defaults, already valid.
    pub fn path_dependent_default() -> Self {
        Self {
            paths: 50_000,
            time_steps: 75,
            ..Self::default()
        }
    }

    /// Number of simulated paths.
    #[inline]
    pub fn paths(&self) -> Size {
        self.paths
    }

    /// Number of time steps per path.
    #[inline]
    pub fn time_steps(&self) -> Size {
        self.time_steps
    }

    /// Mersenne-Twister seed.
    #[inline]
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Variance-reduction mode.
    #[inline]
    pub fn variance_reduction(&self) -> VarianceReduction {
        self.variance_reduction
    }

    /// Path generator for these settings.
    pub fn generator(&self) -> PathGenerator {
        PathGenerator::new(
            self.paths,
            self.time_steps,
            self.seed,
            self.variance_reduction,
        )
    }
}

impl Default for MonteCarloConfig {
    fn default() -> Self {
        Self {
            paths: 20_000,
            time_steps: 1,
            seed: DEFAULT_SEED,
            variance_reduction: VarianceReduction::None,
        }
    }
}

/// Builder for [`MonteCarloConfig`].
#[derive(Debug, Clone, Copy)]
pub struct MonteCarloConfigBuilder {
    config: MonteCarloConfig,
}

impl MonteCarloConfigBuilder {
    /// Sets the number of paths.
    pub fn paths(mut self, paths: Size) -> Self {
        self.config.paths = paths;
        self
    }

    /// Sets the number of time steps per path.
    pub fn time_steps(mut self, time_steps: Size) -> Self {
        self.config.time_steps = time_steps;
        self
    }

    /// Sets the seed.
    pub fn seed(mut self, seed: u64) -> Self {
        self.config.seed = seed;
        self
    }

    /// Sets the variance-reduction mode.
    pub fn variance_reduction(mut self, variance_reduction: VarianceReduction) -> Self {
        self.config.variance_reduction = variance_reduction;
        self
    }

    /// Validate and build.
    pub fn build(self) -> Result<MonteCarloConfig> {
        check_paths(self.config.paths)?;
        check_time_steps(self.config.time_steps)?;
        Ok(self.config)
    }
}

// ─── Longstaff-Schwartz ───────────────────────────────────────────────────────

/// Configuration of the Longstaff-Schwartz American engine.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LsmcConfig {
    paths: Size,
    time_steps: Size,
    seed: u64,
    polynomial_degree: usize,
    variance_reduction: VarianceReduction,
}

impl LsmcConfig {
    /// Builder with the defaults: 10 000 paths, 50 exercise dates, degree 2.
    pub fn builder() -> LsmcConfigBuilder {
        LsmcConfigBuilder::default()
    }

    /// Number of simulated paths.
    #[inline]
    pub fn paths(&self) -> Size {
        self.paths
    }

    /// Number of exercise dates (time steps).
    #[inline]
    pub fn time_steps(&self) -> Size {
        self.time_steps
    }

    /// Mersenne-Twister seed.
    #[inline]
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Highest Laguerre polynomial degree in the regression basis.
    #[inline]
    pub fn polynomial_degree(&self) -> usize {
        self.polynomial_degree
    }

    /// Variance-reduction mode.
    #[inline]
    pub fn variance_reduction(&self) -> VarianceReduction {
        self.variance_reduction
    }

    /// Path generator for these settings.
    pub fn generator(&self) -> PathGenerator {
        PathGenerator::new(
            self.paths,
            self.time_steps,
            self.seed,
            self.variance_reduction,
        )
    }
}

impl Default for LsmcConfig {
    fn default() -> Self {
        Self {
            paths: 10_000,
            time_steps: 50,
            seed: DEFAULT_SEED,
            polynomial_degree: 2,
            variance_reduction: VarianceReduction::None,
        }
    }
}

/// Builder for [`LsmcConfig`].
#[derive(Debug, Clone, Copy)]
pub struct LsmcConfigBuilder {
    config: LsmcConfig,
}

impl Default for LsmcConfigBuilder {
    fn default() -> Self {
        Self {
            config: LsmcConfig::default(),
        }
    }
}

impl LsmcConfigBuilder {
    /// Sets the number of paths.
    pub fn paths(mut self, paths: Size) -> Self {
        self.config.paths = paths;
        self
    }

    /// Sets the number of exercise dates.
    pub fn time_steps(mut self, time_steps: Size) -> Self {
        self.config.time_steps = time_steps;
        self
    }

    /// Sets the seed.
    pub fn seed(mut self, seed: u64) -> Self {
        self.config.seed = seed;
        self
    }

    /// Sets the regression degree.
    pub fn polynomial_degree(mut self, degree: usize) -> Self {
        self.config.polynomial_degree = degree;
        self
    }

    /// Sets the variance-reduction mode.
    pub fn variance_reduction(mut self, variance_reduction: VarianceReduction) -> Self {
        self.config.variance_reduction = variance_reduction;
        self
    }

    /// Validate and build.
    pub fn build(self) -> Result<LsmcConfig> {
        check_paths(self.config.paths)?;
        check_time_steps(self.config.time_steps)?;
        if self.config.polynomial_degree > MAX_POLYNOMIAL_DEGREE {
            return Err(Error::InvalidConfiguration(format!(
                "polynomial degree must be at most {MAX_POLYNOMIAL_DEGREE}, got {}",
                self.config.polynomial_degree
            )));
        }
        Ok(self.config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let bin = LatticeConfig::binomial().build().unwrap();
        assert_eq!(bin.steps(), 4000);
        assert_eq!(bin.bump(), 0.0005);
        assert_eq!(LatticeConfig::trinomial().build().unwrap().steps(), 2000);

        let mc = MonteCarloConfig::builder().build().unwrap();
        assert_eq!(mc, MonteCarloConfig::default());
        assert_eq!((mc.paths(), mc.time_steps()), (20_000, 1));
        assert_eq!(mc.seed(), 5489);

        let pd = MonteCarloConfig::path_dependent().build().unwrap();
        assert_eq!((pd.paths(), pd.time_steps()), (50_000, 75));

        let lsmc = LsmcConfig::builder().build().unwrap();
        assert_eq!(lsmc, LsmcConfig::default());
        assert_eq!(lsmc.polynomial_degree(), 2);
        assert_eq!(lsmc.variance_reduction(), VarianceReduction::None);
    }

    #[test]
    fn zero_lattice_steps_are_accepted() {
        let config = LatticeConfig::binomial().steps(0).build().unwrap();
        assert_eq!(config.steps(), 0);
    }

    #[test]
    fn invalid_settings_are_rejected() {
        assert!(LatticeConfig::binomial().bump(-0.1).build().is_err());
        assert!(LatticeConfig::binomial().bump(Real::NAN).build().is_err());
        assert!(MonteCarloConfig::builder().paths(0).build().is_err());
        assert!(MonteCarloConfig::builder().time_steps(0).build().is_err());
        assert!(LsmcConfig::builder().paths(0).build().is_err());
        let err = LsmcConfig::builder()
            .polynomial_degree(11)
            .build()
            .unwrap_err();
        assert!(matches!(err, Error::InvalidConfiguration(_)));
        assert!(err.is_invalid_argument());
    }

    #[test]
    fn generator_carries_settings() {
        let config = LsmcConfig::builder()
            .paths(128)
            .time_steps(16)
            .variance_reduction(VarianceReduction::Antithetic)
            .build()
            .unwrap();
        let gen = config.generator();
        assert_eq!(gen.paths(), 128);
        assert_eq!(gen.time_steps(), 16);
        assert_eq!(gen.variance_reduction(), VarianceReduction::Antithetic);
    }
}
