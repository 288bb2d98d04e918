use axum::{
    extract::Query,
    http::{header, StatusCode},
    response::{Html, IntoResponse, Response},
    routing::get,
    Json, Router,
};
use hydrogen_orbitals::config::{RenderSettings, ServerConfig, DEFAULT_POINTS, DEFAULT_RMAX, MAX_N};
use hydrogen_orbitals::figure::{labelled_title, VolumeFigure};
use hydrogen_orbitals::physics::{AngularCase, RadialCase};
use hydrogen_orbitals::{DensityVolume, Model, OrbitalError, QuantumNumbers};
use log::{error, info};
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

#[derive(Deserialize, Default)]
struct OrbitalQuery {
    n: Option<u32>,
    l: Option<u32>,
    m: Option<i32>,
    points: Option<usize>,
    rmax: Option<f64>,
    model: Option<String>,
}

impl OrbitalQuery {
    /// Re-applies the slider limits server-side.
    fn resolve(&self) -> (QuantumNumbers, RenderSettings) {
        let qn = QuantumNumbers::clamped(
            self.n.unwrap_or(2),
            self.l.unwrap_or(1),
            self.m.unwrap_or(0),
            MAX_N,
        );
        let settings = RenderSettings::default()
            .with_grid(
                self.rmax.unwrap_or(DEFAULT_RMAX),
                self.points.unwrap_or(DEFAULT_POINTS),
            )
            .with_model(Model::from_query(self.model.as_deref()));
        (qn, settings)
    }
}

#[derive(Serialize)]
struct OrbitalResponse {
    n: u32,
    l: u32,
    m: i32,
    label: String,
    model: &'static str,
    radial_tabulated: bool,
    angular_tabulated: bool,
    empty_field: bool,
    figure: serde_json::Value,
}

static INDEX_PAGE: Lazy<String> = Lazy::new(|| INDEX_HTML.replace("{{MAX_N}}", &MAX_N.to_string()));

const INDEX_HTML: &str = r##"<!doctype html>
<html lang="en">
  <head>
    <meta charset="utf-8" />
    <meta name="viewport" content="width=device-width, initial-scale=1" />
    <title>Hydrogen Orbitals 3D</title>
    <script src="https://cdn.plot.ly/plotly-2.35.2.min.js"></script>
    <style>
      html, body { margin: 0; padding: 0; height: 100%; background: #0b0c10; color: #e6e6e6; font-family: "Segoe UI", sans-serif; }
      #panel { position: absolute; top: 12px; left: 12px; width: 300px; background: rgba(10,12,16,0.9); padding: 12px; border: 1px solid #2a2f36; border-radius: 10px; z-index: 2; }
      #plot { position: absolute; inset: 0; }
      .brand { font-size: 16px; font-weight: 600; }
      .row { display: flex; align-items: center; gap: 8px; margin-top: 8px; font-size: 12px; }
      .row label { min-width: 110px; color: #a7b0ba; }
      .row input[type="range"] { flex: 1; }
      select { background: #0f141b; color: #e6e6e6; border: 1px solid #2a2f36; border-radius: 6px; padding: 4px 6px; font-size: 12px; }
      a.button { display: inline-block; margin-top: 10px; color: #e6e6e6; border: 1px solid #3c6a9e; border-radius: 6px; padding: 5px 10px; font-size: 12px; text-decoration: none; }
      #status { margin-top: 10px; font-size: 12px; color: #9be39b; }
      .hint { font-size: 11px; color: #7f8895; margin-top: 6px; }
    </style>
  </head>
  <body>
    <div id="plot"></div>
    <div id="panel">
      <div class="brand">Hydrogen Orbitals</div>
      <div class="hint">Pick the quantum numbers with the sliders.</div>
      <div class="row"><label>Principal (n) = <span id="nVal"></span></label><input id="n" type="range" min="1" max="{{MAX_N}}" step="1" value="2" /></div>
      <div class="row"><label>Azimuthal (l) = <span id="lVal"></span></label><input id="l" type="range" min="0" max="1" step="1" value="1" /></div>
      <div class="row" id="mRow"><label>Magnetic (m) = <span id="mVal"></span></label><input id="m" type="range" min="-1" max="1" step="1" value="0" /></div>
      <div class="row" id="mFixed" style="display: none;">Magnetic (m): 0 (because l = 0)</div>
      <div class="row">
        <label>Model</label>
        <select id="model">
          <option value="tabulated" selected>Tabulated</option>
          <option value="general">General</option>
        </select>
      </div>
      <a id="export" class="button" href="#">Download HTML</a>
      <div id="status">Ready.</div>
    </div>
    <script>
      const nInput = document.getElementById("n");
      const lInput = document.getElementById("l");
      const mInput = document.getElementById("m");
      const modelSelect = document.getElementById("model");
      const statusEl = document.getElementById("status");
      const exportLink = document.getElementById("export");
      let pending = null;

      function enforceChain() {
        const n = Number(nInput.value);
        lInput.max = Math.max(n - 1, 0);
        if (Number(lInput.value) > n - 1) lInput.value = n - 1;
        const l = Number(lInput.value);
        mInput.min = -l;
        mInput.max = l;
        if (Math.abs(Number(mInput.value)) > l) mInput.value = 0;
        document.getElementById("mRow").style.display = l === 0 ? "none" : "flex";
        document.getElementById("mFixed").style.display = l === 0 ? "flex" : "none";
        document.getElementById("nVal").textContent = n;
        document.getElementById("lVal").textContent = l;
        document.getElementById("mVal").textContent = l === 0 ? 0 : mInput.value;
      }

      function params() {
        const l = Number(lInput.value);
        return new URLSearchParams({
          n: nInput.value,
          l: lInput.value,
          m: l === 0 ? 0 : mInput.value,
          model: modelSelect.value,
        });
      }

      async function refresh() {
        enforceChain();
        const query = params().toString();
        exportLink.href = `/export?${query}`;
        pending = query;
        statusEl.textContent = "Computing...";
        const res = await fetch(`/orbital?${query}`);
        if (pending !== query) return;
        if (!res.ok) {
          statusEl.textContent = "Error: " + (await res.text());
          return;
        }
        const data = await res.json();
        Plotly.react("plot", data.figure.data, data.figure.layout, { responsive: true });
        const notes = [];
        if (!data.radial_tabulated) notes.push("approximate radial part");
        if (data.empty_field) notes.push("no tabulated angular part, density is zero");
        statusEl.textContent = `Rendered ${data.label} (n=${data.n}, l=${data.l}, m=${data.m})` +
          (notes.length ? ` | ${notes.join(", ")}` : "");
      }

      for (const el of [nInput, lInput, mInput, modelSelect]) {
        el.addEventListener("change", refresh);
      }
      for (const el of [nInput, lInput, mInput]) {
        el.addEventListener("input", enforceChain);
      }
      refresh();
    </script>
  </body>
</html>
"##;

async fn index() -> impl IntoResponse {
    Html(INDEX_PAGE.as_str())
}

/// Builds the figure off the async runtime.
async fn render(q: OrbitalQuery) -> Result<(DensityVolume, VolumeFigure, Model), OrbitalError> {
    let (qn, settings) = q.resolve();
    let model = settings.model;
    tokio::task::spawn_blocking(move || -> Result<_, OrbitalError> {
        let volume = DensityVolume::compute(qn, &settings)?;
        let figure = VolumeFigure::from_volume(&volume, &settings, labelled_title(&volume));
        Ok((volume, figure, model))
    })
    .await
    .map_err(|e| OrbitalError::Io(std::io::Error::new(std::io::ErrorKind::Other, e)))?
}

fn error_response(e: OrbitalError) -> Response {
    error!("request failed: {e}");
    let status = match &e {
        OrbitalError::InvalidGrid(_) | OrbitalError::InvalidQuantumNumbers { .. } => {
            StatusCode::BAD_REQUEST
        }
        _ => StatusCode::INTERNAL_SERVER_ERROR,
    };
    (status, e.to_string()).into_response()
}

async fn orbital(Query(q): Query<OrbitalQuery>) -> Response {
    match render(q).await {
        Ok((volume, figure, model)) => {
            let qn = volume.quantum_numbers;
            info!("rendered {} ({qn}) with the {} model", qn.label(), model.as_str());
            let out = OrbitalResponse {
                n: qn.n,
                l: qn.l,
                m: qn.m,
                label: qn.label(),
                model: model.as_str(),
                radial_tabulated: RadialCase::for_pair(qn.n, qn.l).is_tabulated(),
                angular_tabulated: AngularCase::for_pair(qn.l, qn.m).is_tabulated(),
                empty_field: volume.is_empty_field(),
                figure: figure.to_plotly_json(),
            };
            Json(out).into_response()
        }
        Err(e) => error_response(e),
    }
}

async fn export(Query(q): Query<OrbitalQuery>) -> Response {
    let html = match render(q).await.and_then(|(_, figure, _)| figure.to_html()) {
        Ok(html) => html,
        Err(e) => return error_response(e),
    };
    (
        [
            (header::CONTENT_TYPE, "text/html; charset=utf-8"),
            (
                header::CONTENT_DISPOSITION,
                "attachment; filename=\"orbital_visualization.html\"",
            ),
        ],
        html,
    )
        .into_response()
}

#[tokio::main]
async fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = match ServerConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            error!("{e}");
            std::process::exit(1);
        }
    };

    let app = Router::new()
        .route("/", get(index))
        .route("/orbital", get(orbital))
        .route("/export", get(export));

    info!("Serving on http://{}", config.addr);
    let listener = match tokio::net::TcpListener::bind(config.addr).await {
        Ok(listener) => listener,
        Err(e) => {
            error!("bind {}: {e}", config.addr);
            std::process::exit(1);
        }
    };
    if let Err(e) = axum::serve(listener, app).await {
        error!("server error: {e}");
        std::process::exit(1);
    }
}
