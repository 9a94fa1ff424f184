//! Application configuration loaded from environment variables.
//!
//! The app needs to know where the simulation service lives and what run
//! to request. Range enforcement stays with the service; only parse
//! failures are rejected here.

use anyhow::{Context, Result};
use sweepsim_types::SimulationConfig;

/// Complete application configuration loaded from the environment.
///
/// Variables (all optional):
/// - `SWEEPSIM_SERVICE_URL` -- service base URL including the API prefix
///   (default `http://localhost:8000/api`)
/// - `SWEEPSIM_ROBOTS` -- number of robots (default 4)
/// - `SWEEPSIM_TRASH` -- number of trash items (default 20)
/// - `SWEEPSIM_BASE_X` -- base row coordinate (default 0)
/// - `SWEEPSIM_BASE_Y` -- base column coordinate (default 0)
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Base URL of the simulation service.
    pub service_url: String,
    /// The run to request at startup.
    pub simulation: SimulationConfig,
}

impl AppConfig {
    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self> {
        let service_url = std::env::var("SWEEPSIM_SERVICE_URL")
            .unwrap_or_else(|_| "http://localhost:8000/api".to_owned());

        let defaults = SimulationConfig::default();
        let simulation = SimulationConfig {
            num_robots: env_or("SWEEPSIM_ROBOTS", defaults.num_robots)?,
            num_trash: env_or("SWEEPSIM_TRASH", defaults.num_trash)?,
            base_x: env_or("SWEEPSIM_BASE_X", defaults.base_x)?,
            base_y: env_or("SWEEPSIM_BASE_Y", defaults.base_y)?,
        };

        Ok(Self {
            service_url,
            simulation,
        })
    }
}

/// Read an optional numeric environment variable.
fn env_or(name: &str, default: u32) -> Result<u32> {
    match std::env::var(name) {
        Ok(value) => value
            .parse::<u32>()
            .with_context(|| format!("invalid {name}: {value}")),
        Err(_) => Ok(default),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn absent_variable_falls_back_to_default() {
        let value = env_or("SWEEPSIM_TEST_NEVER_SET", 42).unwrap_or(0);
        assert_eq!(value, 42);
    }

    #[test]
    fn simulation_defaults_match_the_form_defaults() {
        let defaults = SimulationConfig::default();
        assert_eq!(defaults.num_robots, 4);
        assert_eq!(defaults.num_trash, 20);
        assert_eq!(defaults.base_x, 0);
        assert_eq!(defaults.base_y, 0);
    }
}
