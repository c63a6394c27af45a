mod options;

use anyhow::Error as AnyError;
use clap::Parser;
use flightpath::FlightPath;
use options::{Cli, Command as CliCmd};
use raster::{Grid, Sampler};
use serde::Serialize;
use std::io::Write;
use textplots::{Chart, Plot, Shape};

fn main() -> Result<(), AnyError> {
    let Cli {
        raster,
        waypoints,
        spacing,
        clearance,
        sampling,
        max_slopes,
        cmd,
    } = Cli::parse();

    env_logger::init();

    let grid = Grid::from_ascii_grid(raster)?;
    let sampler = Sampler::new(&grid, sampling.into());

    let mut path = FlightPath::builder()
        .waypoints(waypoints.iter().map(|wp| wp.0))
        .spacing(spacing)
        .clearance(clearance)
        .build(&sampler)?;

    for max_slope in max_slopes {
        path.smooth(max_slope);
    }

    match cmd {
        CliCmd::Csv => print_csv(&path)?,
        CliCmd::Json => print_json(&path)?,
        CliCmd::Plot => plot_ascii(&path),
    };
    Ok(())
}

fn print_csv(path: &FlightPath) -> Result<(), AnyError> {
    let mut stdout = std::io::stdout().lock();
    writeln!(stdout, "Distance,X,Y,Altitude")?;
    for (distance, point) in path.distances().iter().zip(path.iter()) {
        let x = point.position.x;
        let y = point.position.y;
        let altitude = point.altitude;
        writeln!(stdout, "{distance},{x},{y},{altitude}")?;
    }
    Ok(())
}

fn print_json(path: &FlightPath) -> Result<(), AnyError> {
    #[derive(Serialize)]
    struct JsonEntry {
        position: [f64; 2],
        altitude: f64,
    }

    let reshaped: Vec<JsonEntry> = path
        .iter()
        .map(|point| JsonEntry {
            position: [point.position.x, point.position.y],
            altitude: point.altitude,
        })
        .collect();
    let json = serde_json::to_string(&reshaped)?;
    println!("{json}");
    Ok(())
}

#[allow(clippy::cast_possible_truncation)]
fn plot_ascii(path: &FlightPath) {
    if path.is_empty() {
        return;
    }
    let plot_data: Vec<(f32, f32)> = path
        .distances()
        .iter()
        .zip(path.iter())
        .map(|(distance, point)| (*distance as f32, point.altitude as f32))
        .collect();
    Chart::new(300, 150, 0.0, path.total_distance() as f32)
        .lineplot(&Shape::Lines(&plot_data))
        .display();
}
