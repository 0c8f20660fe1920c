// main.rs - Desktop front end for Conway's Game of Life
// The simulation lives in the `conway` crate; this window only draws it
// and forwards clicks and control changes.

use eframe::egui;
use egui::Color32;
use tracing::info;
use tracing_subscriber::EnvFilter;

use conway::{Dimensions, Driver, Session, SimulationConfig};

mod ui;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    // Timer tasks run here; the UI thread stays with eframe.
    let runtime = tokio::runtime::Builder::new_multi_thread()
        .worker_threads(1)
        .thread_name("life-driver")
        .enable_time()
        .build()?;

    let config = SimulationConfig::default();
    info!(dimensions = %config.dimensions, speed = %config.speed, "starting");

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1100.0, 800.0]),
        ..Default::default()
    };

    eframe::run_native(
        "Conway's Game of Life",
        options,
        Box::new(move |cc| Box::new(GameOfLife::new(cc, runtime, config))),
    )?;
    Ok(())
}

/// Window state. Everything about the simulation itself sits in `driver`.
pub struct GameOfLife {
    // Declared before the runtime so the timer is torn down first.
    pub driver: Driver,
    _runtime: tokio::runtime::Runtime,

    pub live_color: Color32,
    pub dead_color: Color32,

    /// Raw form values; validated only when applied.
    pub speed_input: i64,
    pub rows_input: i64,
    pub cols_input: i64,
    pub last_error: Option<String>,
}

impl GameOfLife {
    fn new(cc: &eframe::CreationContext<'_>, runtime: tokio::runtime::Runtime, config: SimulationConfig) -> Self {
        let driver = Driver::new(Session::new(config), runtime.handle().clone());

        let ctx = cc.egui_ctx.clone();
        driver.subscribe(move |_, _| ctx.request_repaint());

        Self {
            driver,
            _runtime: runtime,
            live_color: Color32::from_rgb(15, 23, 42),
            dead_color: Color32::WHITE,
            speed_input: config.speed.millis() as i64,
            rows_input: config.dimensions.rows() as i64,
            cols_input: config.dimensions.cols() as i64,
            last_error: None,
        }
    }

    pub fn apply_dimensions(&mut self) {
        let result = Dimensions::new(self.rows_input, self.cols_input)
            .map_err(conway::SessionError::from)
            .and_then(|dimensions| self.driver.resize(dimensions));
        self.last_error = result.err().map(|err| err.to_string());
    }
}
