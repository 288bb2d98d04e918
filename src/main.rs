use hydrogen_orbitals::config::{self, RenderSettings};
use hydrogen_orbitals::console::{print_banner, prompt_triple};
use hydrogen_orbitals::figure::{plain_title, VolumeFigure};
use hydrogen_orbitals::{DensityVolume, Result};
use log::{error, info, warn};
use std::io;
use std::path::Path;
use std::process::{self, Command};

fn run() -> Result<()> {
    let stdin = io::stdin();
    let mut stdout = io::stdout();
    print_banner(&mut stdout)?;
    let qn = prompt_triple(&mut stdin.lock(), &mut stdout)?;
    if !qn.is_valid() {
        warn!("({qn}) is not an allowed orbital; the plot uses fallback terms");
    }

    info!("Computing wavefunction for {} ({qn})...", qn.label());
    let settings = RenderSettings::default();
    let volume = DensityVolume::compute(qn, &settings)?;
    if volume.is_empty_field() {
        warn!("({qn}) has no tabulated angular part; the density is zero everywhere");
    }

    let figure = VolumeFigure::from_volume(&volume, &settings, plain_title(&volume));
    let path = config::output_path();
    figure.write_html(&path)?;

    open_in_browser(&path);
    Ok(())
}

/// Hands the file to the platform's default opener without waiting on it.
fn open_in_browser(path: &Path) {
    let path = path.canonicalize().unwrap_or_else(|_| path.to_path_buf());
    let mut cmd = if cfg!(target_os = "windows") {
        let mut c = Command::new("cmd");
        c.args(["/C", "start", ""]);
        c
    } else if cfg!(target_os = "macos") {
        Command::new("open")
    } else {
        Command::new("xdg-open")
    };

    match cmd.arg(&path).spawn() {
        Ok(_) => info!("Opened {} in the default browser", path.display()),
        Err(e) => warn!("could not open browser for {}: {e}", path.display()),
    }
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    if let Err(e) = run() {
        error!("{e}");
        process::exit(1);
    }
}
