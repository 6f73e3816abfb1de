//! Visualización de la orientación estimada del MPU6050 en Linux
//!
//! Grafica roll, pitch y yaw del filtro complementario en `orientation_plot.png`
//! y muestra una línea de estado en la terminal.
//!
//! Para ejecutar: cargo run --example linux_realtime_plot --features plotting

mod common;

use common::{init_logging, load_calibration, open_device};
use crossterm::{
    cursor, execute,
    terminal::{Clear, ClearType},
};
use mpu6050_rs::{
    CalibrationStore, CancelFlag, ComplementaryFilter, Navigator, NavigatorConfig, SamplingLoop,
    SensorConfig, SystemTimeSource,
};
use plotters::prelude::*;
use std::error::Error;
use std::io::{stdout, Write};

const PLOT_WIDTH: u32 = 800;
const PLOT_HEIGHT: u32 = 600;
const PLOT_POINTS: usize = 100;
/// Ciclos de 5 ms entre refrescos del gráfico
const REDRAW_EVERY: u64 = 20;

fn main() -> Result<(), Box<dyn Error>> {
    init_logging();
    println!("MPU6050 - Gráfico de orientación");

    let cancel = CancelFlag::new();
    let c = cancel.clone();
    ctrlc::set_handler(move || c.cancel())?;

    let mut device = open_device(&SensorConfig::default())?;
    if !load_calibration(&mut device, &CalibrationStore::default())? {
        log::warn!("Sin calibración guardada; ejecuta antes linux_calibrate");
    }

    let mut navigator = Navigator::new(ComplementaryFilter::default(), NavigatorConfig::default());
    let mut sampling = SamplingLoop::new(SystemTimeSource::new(), cancel);

    let mut history: Vec<[f64; 3]> = vec![[0.0; 3]; PLOT_POINTS];
    let root = BitMapBackend::new("orientation_plot.png", (PLOT_WIDTH, PLOT_HEIGHT))
        .into_drawing_area();
    let mut out = stdout();
    let mut tick: u64 = 0;
    let mut draw_error: Option<Box<dyn Error>> = None;

    println!("Graficando. Presiona Ctrl+C para detener...");

    sampling.run(&mut device, &mut navigator, |sample| {
        tick += 1;
        if tick % REDRAW_EVERY != 0 || draw_error.is_some() {
            return;
        }

        let angles = sample.orientation.to_euler().to_degrees();
        history.remove(0);
        history.push([angles.roll, angles.pitch, angles.yaw]);

        if let Err(e) = draw(&root, &history) {
            draw_error = Some(e);
            return;
        }

        let _ = execute!(out, cursor::MoveToColumn(0), Clear(ClearType::CurrentLine));
        print!(
            "roll {:7.2}°  pitch {:7.2}°  yaw {:7.2}°  dt {:.4} s",
            angles.roll, angles.pitch, angles.yaw, sample.dt
        );
        let _ = out.flush();
    })?;

    println!();
    if let Some(e) = draw_error {
        return Err(e);
    }
    println!("Gráfico guardado como 'orientation_plot.png'");
    Ok(())
}

fn draw(
    root: &DrawingArea<BitMapBackend, plotters::coord::Shift>,
    history: &[[f64; 3]],
) -> Result<(), Box<dyn Error>> {
    root.fill(&WHITE)?;

    let mut chart = ChartBuilder::on(root)
        .caption("Orientación", ("sans-serif", 30))
        .margin(10)
        .x_label_area_size(30)
        .y_label_area_size(40)
        .build_cartesian_2d(0..history.len(), -180.0..180.0)?;

    chart
        .configure_mesh()
        .x_labels(5)
        .y_labels(7)
        .x_desc("Muestras")
        .y_desc("Ángulo (°)")
        .draw()?;

    for (axis, (label, color)) in [("Roll", &RED), ("Pitch", &GREEN), ("Yaw", &BLUE)]
        .into_iter()
        .enumerate()
    {
        chart
            .draw_series(LineSeries::new(
                history.iter().enumerate().map(|(i, v)| (i, v[axis])),
                color,
            ))?
            .label(label)
            .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], color));
    }

    chart
        .configure_series_labels()
        .background_style(&WHITE.mix(0.8))
        .border_style(&BLACK)
        .draw()?;

    root.present()?;
    Ok(())
}
