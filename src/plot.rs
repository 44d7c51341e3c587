//! gnuplot scripts of a simulated cycle.
//!
//! The scripts render PNG files when run through `gnuplot`; nothing here feeds back into
//! the simulation.

use crate::cycle::result::SimulationResult;
use crate::cycle::state::ThermoState;
use crate::error::SimResult;
use gnuplot::{AxesCommon, Caption, Color, Figure};
use std::path::{Path, PathBuf};

fn pv_columns<S: ThermoState>(states: &[S]) -> (Vec<f64>, Vec<f64>) {
    states
        .iter()
        .map(|s| (s.volume() * 1e6, s.pressure() / 1e5))
        .unzip()
}

fn temperatures<S: ThermoState>(states: &[S]) -> Vec<f64> {
    states.iter().map(|s| s.temperature()).collect()
}

/// Writes `pv_diagram.gp` and `temperature.gp` into `folder` and returns their paths.
pub fn write_gnuplot_scripts(result: &SimulationResult, folder: &Path) -> SimResult<Vec<PathBuf>> {
    std::fs::create_dir_all(folder)?;
    let (vol_a, press_a) = pv_columns(result.constant_gamma());
    let (vol_b, press_b) = pv_columns(result.variable_gamma());
    let angles: Vec<f64> = result.samples().iter().map(|s| s.angle.to_degrees()).collect();

    let pv_script = folder.join("pv_diagram.gp");
    let pv_png = folder.join("pv_diagram.png");
    let mut fg = Figure::new();
    fg.set_terminal("pngcairo", &pv_png.to_string_lossy());
    fg.axes2d()
        .set_title("p-V diagram", &[])
        .set_x_label("volume [cm³]", &[])
        .set_y_label("pressure [bar]", &[])
        .lines(vol_a.iter(), press_a.iter(), &[Caption("constant gamma"), Color("black")])
        .lines(vol_b.iter(), press_b.iter(), &[Caption("variable gamma"), Color("red")]);
    fg.echo_to_file(&pv_script);

    let temp_script = folder.join("temperature.gp");
    let temp_png = folder.join("temperature.png");
    let mut fg = Figure::new();
    fg.set_terminal("pngcairo", &temp_png.to_string_lossy());
    fg.axes2d()
        .set_title("In-cylinder temperature", &[])
        .set_x_label("crank angle [deg]", &[])
        .set_y_label("temperature [K]", &[])
        .lines(
            angles.iter(),
            temperatures(result.constant_gamma()).iter(),
            &[Caption("constant gamma"), Color("black")],
        )
        .lines(
            angles.iter(),
            temperatures(result.variable_gamma()).iter(),
            &[Caption("variable gamma"), Color("red")],
        );
    fg.echo_to_file(&temp_script);

    Ok(vec![pv_script, temp_script])
}
