use std::convert::TryFrom;

use clap::Parser;
use kiss3d::light::Light;
use kiss3d::window::Window;
use log::{error, info};
use orrery::config::{Args, Config};
use orrery::gui::Simulation;

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = match Config::try_from(Args::parse()) {
        Ok(config) => config,
        Err(e) => {
            error!("Invalid configuration: {}", e);
            std::process::exit(2);
        }
    };
    info!(
        "Starting at {:.2}x with {} asteroids",
        config.speed, config.asteroid_count
    );

    let mut window = Window::new("Orrery");
    window.set_light(Light::StickToCamera);
    window.set_framerate_limit(Some(60));
    window.set_background_color(0.0, 0.0, 0.02);

    let simulation = Simulation::new(&config, &mut window);
    window.render_loop(simulation);
}
