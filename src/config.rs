//! Render and server settings.

use std::env;
use std::net::SocketAddr;
use std::path::PathBuf;

use crate::error::{OrbitalError, Result};
use crate::physics::Model;

pub const DEFAULT_RMAX: f64 = 8.0;
pub const DEFAULT_POINTS: usize = 60;
pub const MIN_POINTS: usize = 2;
pub const MAX_POINTS: usize = 80;
pub const MIN_RMAX: f64 = 1.0;
pub const MAX_RMAX: f64 = 30.0;
/// Upper bound of the n slider
pub const MAX_N: u32 = 5;

pub const DEFAULT_ADDR: &str = "127.0.0.1:3000";
pub const DEFAULT_OUTPUT: &str = "orbital_visualization.html";

/// Grid size, wavefunction model and volume-plot styling.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderSettings {
    pub rmax: f64,
    pub points: usize,
    pub model: Model,
    pub opacity: f64,
    pub surface_count: u32,
    pub colorscale: String,
}

impl Default for RenderSettings {
    fn default() -> Self {
        RenderSettings {
            rmax: DEFAULT_RMAX,
            points: DEFAULT_POINTS,
            model: Model::Tabulated,
            opacity: 0.25,
            surface_count: 25,
            colorscale: "Viridis".to_string(),
        }
    }
}

impl RenderSettings {
    /// Sets the grid, clamped to the limits the UI allows.
    pub fn with_grid(mut self, rmax: f64, points: usize) -> Self {
        self.rmax = if rmax.is_finite() {
            rmax.clamp(MIN_RMAX, MAX_RMAX)
        } else {
            DEFAULT_RMAX
        };
        self.points = points.clamp(MIN_POINTS, MAX_POINTS);
        self
    }

    pub fn with_model(mut self, model: Model) -> Self {
        self.model = model;
        self
    }
}

#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub addr: SocketAddr,
}

impl ServerConfig {
    /// Reads `ORBITALS_ADDR`, falling back to 127.0.0.1:3000.
    pub fn from_env() -> Result<Self> {
        let raw = env::var("ORBITALS_ADDR").unwrap_or_else(|_| DEFAULT_ADDR.to_string());
        Self::parse(&raw)
    }

    pub fn parse(raw: &str) -> Result<Self> {
        let addr = raw
            .trim()
            .parse::<SocketAddr>()
            .map_err(|e| OrbitalError::InvalidAddress(format!("{raw}: {e}")))?;
        Ok(ServerConfig { addr })
    }
}

/// Where the console binary writes its HTML (`ORBITALS_OUTPUT`).
pub fn output_path() -> PathBuf {
    env::var_os("ORBITALS_OUTPUT")
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_OUTPUT))
}
