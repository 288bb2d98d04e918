//! Hydrogen orbital probability-density volumes.
//!
//! - **grid**: Cartesian lattice over [-rmax, rmax]³ with spherical coordinates
//! - **physics**: Ψ(n,l,m) from a small table of closed forms, or a general approximation
//! - **density**: |Ψ|², normalization, contrast and isosurface thresholds
//! - **figure**: plotly.js volume figure and standalone HTML export

pub mod config;
pub mod console;
pub mod density;
pub mod error;
pub mod figure;
pub mod grid;
pub mod physics;

pub use config::{RenderSettings, ServerConfig};
pub use density::DensityVolume;
pub use error::{OrbitalError, Result};
pub use figure::VolumeFigure;
pub use grid::SphericalGrid;
pub use physics::{evaluate, Model, QuantumNumbers};
