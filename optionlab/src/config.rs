//! TOML configuration file.
//!
//! Every table and every key is optional; missing values keep the engine
//! defaults, and command-line flags override whatever the file says.
//!
//! ```toml
//! [lattice]
//! binomial_steps = 2000
//! trinomial_steps = 1000
//! bump = 0.0005
//!
//! [monte_carlo]
//! paths = 100000
//! seed = 42
//! variance_reduction = "antithetic"
//!
//! [lsmc]
//! paths = 20000
//! time_steps = 50
//! polynomial_degree = 3
//!
//! [path_dependent]
//! paths = 50000
//! time_steps = 75
//! ```

use crate::error::{CliError, Result};
use ol_core::Size;
use ol_methods::VarianceReduction;
use ol_pricingengines::config::{
    LatticeConfigBuilder, DEFAULT_BINOMIAL_STEPS, DEFAULT_TRINOMIAL_STEPS,
};
use ol_pricingengines::{LatticeConfig, LsmcConfig, MonteCarloConfig, PathDependentConfig};
use serde::Deserialize;
use std::path::Path;

/// Contents of an `optionlab.toml` file.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FileConfig {
    pub lattice: LatticeSection,
    pub monte_carlo: SimulationSection,
    pub lsmc: LsmcSection,
    pub path_dependent: SimulationSection,
}

/// `[lattice]`
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LatticeSection {
    pub binomial_steps: Option<Size>,
    pub trinomial_steps: Option<Size>,
    pub bump: Option<f64>,
}

/// `[monte_carlo]` and `[path_dependent]`
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SimulationSection {
    pub paths: Option<Size>,
    pub time_steps: Option<Size>,
    pub seed: Option<u64>,
    pub variance_reduction: Option<VarianceReduction>,
}

/// `[lsmc]`
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LsmcSection {
    pub paths: Option<Size>,
    pub time_steps: Option<Size>,
    pub seed: Option<u64>,
    pub polynomial_degree: Option<usize>,
    pub variance_reduction: Option<VarianceReduction>,
}

/// Simulation overrides taken from the command line.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct SimulationOverrides {
    pub paths: Option<Size>,
    pub time_steps: Option<Size>,
    pub seed: Option<u64>,
    pub variance_reduction: Option<VarianceReduction>,
}

impl SimulationSection {
    fn merged(&self, cli: &SimulationOverrides) -> SimulationOverrides {
        SimulationOverrides {
            paths: cli.paths.or(self.paths),
            time_steps: cli.time_steps.or(self.time_steps),
            seed: cli.seed.or(self.seed),
            variance_reduction: cli.variance_reduction.or(self.variance_reduction),
        }
    }
}

impl FileConfig {
    /// Parse a configuration from TOML text.
    pub fn from_toml(text: &str) -> std::result::Result<Self, toml::de::Error> {
        toml::from_str(text)
    }

    /// Load `path`, or the defaults when no path is given.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let Some(path) = path else {
            return Ok(Self::default());
        };
        let file_error = |message: String| CliError::ConfigFile {
            path: path.display().to_string(),
            message,
        };
        let text = std::fs::read_to_string(path)
            .map_err(|e| file_error(e.to_string()))?;
        let config = Self::from_toml(&text).map_err(|e| file_error(e.to_string()))?;
        tracing::debug!(path = %path.display(), ?config, "loaded configuration file");
        Ok(config)
    }

    /// Binomial lattice configuration.
    pub fn binomial(&self, steps: Option<Size>) -> Result<LatticeConfig> {
        let steps = steps
            .or(self.lattice.binomial_steps)
            .unwrap_or(DEFAULT_BINOMIAL_STEPS);
        self.lattice_config(LatticeConfig::binomial().steps(steps))
    }

    /// Trinomial lattice configuration.
    pub fn trinomial(&self, steps: Option<Size>) -> Result<LatticeConfig> {
        let steps = steps
            .or(self.lattice.trinomial_steps)
            .unwrap_or(DEFAULT_TRINOMIAL_STEPS);
        self.lattice_config(LatticeConfig::trinomial().steps(steps))
    }

    fn lattice_config(&self, builder: LatticeConfigBuilder) -> Result<LatticeConfig> {
        let builder = match self.lattice.bump {
            Some(bump) => builder.bump(bump),
            None => builder,
        };
        Ok(builder.build()?)
    }

    /// European Monte Carlo configuration.
    pub fn monte_carlo(&self, cli: &SimulationOverrides) -> Result<MonteCarloConfig> {
        let o = self.monte_carlo.merged(cli);
        let defaults = MonteCarloConfig::default();
        let vr = o.variance_reduction.unwrap_or(defaults.variance_reduction());
        Ok(MonteCarloConfig::builder()
            .paths(o.paths.unwrap_or(defaults.paths()))
            .time_steps(o.time_steps.unwrap_or(defaults.time_steps()))
            .seed(o.seed.unwrap_or(defaults.seed()))
            .variance_reduction(vr)
            .build()?)
    }

    /// Path-dependent Monte Carlo configuration.
    pub fn path_dependent(&self, cli: &SimulationOverrides) -> Result<PathDependentConfig> {
        let o = self.path_dependent.merged(cli);
        let defaults = MonteCarloConfig::path_dependent_default();
        let vr = o.variance_reduction.unwrap_or(defaults.variance_reduction());
        Ok(MonteCarloConfig::path_dependent()
            .paths(o.paths.unwrap_or(defaults.paths()))
            .time_steps(o.time_steps.unwrap_or(defaults.time_steps()))
            .seed(o.seed.unwrap_or(defaults.seed()))
            .variance_reduction(vr)
            .build()?)
    }

    /// Longstaff-Schwartz configuration.
    pub fn lsmc(&self, cli: &SimulationOverrides, degree: Option<usize>) -> Result<LsmcConfig> {
        let s = &self.lsmc;
        let defaults = LsmcConfig::default();
        Ok(LsmcConfig::builder()
            .paths(cli.paths.or(s.paths).unwrap_or(defaults.paths()))
            .time_steps(
                cli.time_steps
                    .or(s.time_steps)
                    .unwrap_or(defaults.time_steps()),
            )
            .seed(cli.seed.or(s.seed).unwrap_or(defaults.seed()))
            .polynomial_degree(
                degree
                    .or(s.polynomial_degree)
                    .unwrap_or(defaults.polynomial_degree()),
            )
            .variance_reduction(
                cli.variance_reduction
                    .or(s.variance_reduction)
                    .unwrap_or(defaults.variance_reduction()),
            )
            .build()?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_file_keeps_defaults() {
        let config = FileConfig::from_toml("").unwrap();
        assert_eq!(config, FileConfig::default());
        let mc = config.monte_carlo(&SimulationOverrides::default()).unwrap();
        assert_eq!(mc, MonteCarloConfig::default());
        assert_eq!(config.binomial(None).unwrap().steps(), 4000);
        assert_eq!(config.trinomial(None).unwrap().steps(), 2000);
        let pd = config.path_dependent(&SimulationOverrides::default()).unwrap();
        assert_eq!((pd.paths(), pd.time_steps()), (50_000, 75));
    }

    #[test]
    fn tables_override_defaults() {
        let config = FileConfig::from_toml(
            r#"
            [lattice]
            binomial_steps = 500
            bump = 0.001

            [monte_carlo]
            paths = 1000
            variance_reduction = "antithetic-moment-matching"

            [lsmc]
            polynomial_degree = 4
            "#,
        )
        .unwrap();
        let lattice = config.binomial(None).unwrap();
        assert_eq!((lattice.steps(), lattice.bump()), (500, 0.001));
        let mc = config.monte_carlo(&SimulationOverrides::default()).unwrap();
        assert_eq!(mc.paths(), 1000);
        assert_eq!(
            mc.variance_reduction(),
            VarianceReduction::AntitheticMomentMatching
        );
        let lsmc = config.lsmc(&SimulationOverrides::default(), None).unwrap();
        assert_eq!(lsmc.polynomial_degree(), 4);
    }

    #[test]
    fn command_line_wins() {
        let config = FileConfig::from_toml("[monte_carlo]\npaths = 1000\nseed = 7\n").unwrap();
        let cli = SimulationOverrides {
            paths: Some(64),
            ..Default::default()
        };
        let mc = config.monte_carlo(&cli).unwrap();
        assert_eq!((mc.paths(), mc.seed()), (64, 7));
        assert_eq!(config.binomial(Some(10)).unwrap().steps(), 10);
    }

    #[test]
    fn invalid_values_are_reported() {
        assert!(FileConfig::from_toml("[lattice]\nsteps = 10\n").is_err());
        let config = FileConfig::from_toml("[lsmc]\npolynomial_degree = 12\n").unwrap();
        assert!(matches!(
            config.lsmc(&SimulationOverrides::default(), None),
            Err(CliError::Pricing(_))
        ));
    }
}
