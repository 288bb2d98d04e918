//! Volumetric plot description (plotly.js `volume` trace) and HTML export.

use log::info;
use serde_json::{json, Value};
use std::fs;
use std::path::Path;

use crate::config::RenderSettings;
use crate::density::DensityVolume;
use crate::error::Result;

pub const PLOTLY_CDN: &str = "https://cdn.plot.ly/plotly-2.35.2.min.js";

/// Flattened volume samples plus plot styling.
#[derive(Debug, Clone)]
pub struct VolumeFigure {
    pub title: String,
    pub x: Vec<f64>,
    pub y: Vec<f64>,
    pub z: Vec<f64>,
    pub value: Vec<f64>,
    pub isomin: f64,
    pub isomax: f64,
    pub opacity: f64,
    pub surface_count: u32,
    pub colorscale: String,
}

impl VolumeFigure {
    pub fn from_volume(volume: &DensityVolume, settings: &RenderSettings, title: impl Into<String>) -> Self {
        let grid = &volume.grid;
        VolumeFigure {
            title: title.into(),
            x: grid.x.iter().copied().collect(),
            y: grid.y.iter().copied().collect(),
            z: grid.z.iter().copied().collect(),
            value: volume.density.iter().copied().collect(),
            isomin: volume.iso.min,
            isomax: volume.iso.max,
            opacity: settings.opacity,
            surface_count: settings.surface_count,
            colorscale: settings.colorscale.clone(),
        }
    }

    pub fn to_plotly_json(&self) -> Value {
        json!({
            "data": [{
                "type": "volume",
                "x": self.x,
                "y": self.y,
                "z": self.z,
                "value": self.value,
                "isomin": self.isomin,
                "isomax": self.isomax,
                "opacity": self.opacity,
                "surface": { "count": self.surface_count },
                "colorscale": self.colorscale,
            }],
            "layout": {
                "title": { "text": self.title },
                "scene": {
                    "xaxis": { "title": { "text": "X" } },
                    "yaxis": { "title": { "text": "Y" } },
                    "zaxis": { "title": { "text": "Z" } },
                    "aspectmode": "cube",
                },
                "margin": { "l": 0, "r": 0, "t": 40, "b": 0 },
            },
        })
    }

    /// A self-contained page that draws the figure with plotly.js.
    pub fn to_html(&self) -> Result<String> {
        let figure = serde_json::to_string(&self.to_plotly_json())?;
        // Keep the payload from closing the <script> element early
        let figure = figure.replace("</", "<\\/");
        Ok(format!(
            r#"<!doctype html>
<html lang="en">
  <head>
    <meta charset="utf-8" />
    <title>{title}</title>
    <script src="{cdn}"></script>
    <style>html, body {{ margin: 0; height: 100%; background: #ffffff; }} #plot {{ width: 100%; height: 100%; }}</style>
  </head>
  <body>
    <div id="plot"></div>
    <script>
      const figure = {figure};
      Plotly.newPlot("plot", figure.data, figure.layout, {{ responsive: true }});
    </script>
  </body>
</html>
"#,
            title = escape_html(&self.title),
            cdn = PLOTLY_CDN,
            figure = figure,
        ))
    }

    pub fn write_html(&self, path: &Path) -> Result<()> {
        let html = self.to_html()?;
        fs::write(path, html)?;
        info!("wrote {} ({} samples) to {}", self.title, self.value.len(), path.display());
        Ok(())
    }
}

pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

/// Plot title used by the web page: "Hydrogen Orbital 2p (n=2, l=1, m=0)".
pub fn labelled_title(volume: &DensityVolume) -> String {
    let qn = volume.quantum_numbers;
    format!("Hydrogen Orbital {} ({qn})", qn.label())
}

/// Plot title used by the console tool.
pub fn plain_title(volume: &DensityVolume) -> String {
    format!("Hydrogen Orbital ({})", volume.quantum_numbers)
}
