//! Zen Garden headless demo
//!
//! Plays a short scripted session (tilt, grab, flick) against a 400x400
//! surface and prints the final frame as JSON. Pass a settings JSON file as
//! the first argument to try other tunings.

use std::process::ExitCode;

use glam::Vec2;

use zen_garden::{Bounds, Scene, Settings};

/// Frame time of a 60 Hz host
const FRAME_MS: u64 = 16;
/// Hosts cap long stalls before handing them to the simulation
const MAX_FRAME_MS: u64 = 33;

fn load_settings() -> zen_garden::Result<Settings> {
    match std::env::args().nth(1) {
        Some(path) => match std::fs::read_to_string(&path) {
            Ok(json) => Settings::from_json(&json),
            Err(e) => {
                log::warn!("Could not read {path}: {e}, using defaults");
                Ok(Settings::default())
            }
        },
        None => Ok(Settings::default()),
    }
}

fn run() -> zen_garden::Result<()> {
    let settings = load_settings()?;
    let mut scene = Scene::new(settings, Bounds::from_size(400.0, 400.0))?;

    // Tip the surface right and slightly toward the viewer
    scene.tilt(Vec2::new(3.0, -1.0));
    for _ in 0..120 {
        scene.advance(FRAME_MS);
    }

    // Grab the ball, hold it for half a second, flick it up and left
    let grab = scene.simulation().position();
    scene.pointer(grab, true);
    for _ in 0..30 {
        scene.advance(FRAME_MS);
    }
    scene.pointer(grab + Vec2::new(-40.0, -60.0), false);

    // Level the surface and let the ball roll out, including one stalled frame
    scene.tilt(Vec2::ZERO);
    let stall: u64 = 250;
    scene.advance(stall.min(MAX_FRAME_MS));
    for _ in 0..180 {
        scene.advance(FRAME_MS);
    }

    let frame = scene.frame();
    log::info!(
        "t={}ms ball at ({:.1}, {:.1}), {} tracks, {} trail segments",
        frame.time,
        frame.ball.position.x,
        frame.ball.position.y,
        frame.tracks.len(),
        frame.trail.len()
    );

    println!("{}", serde_json::to_string_pretty(&frame)?);
    Ok(())
}

fn main() -> ExitCode {
    #[cfg(not(target_arch = "wasm32"))]
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("{e}");
            ExitCode::FAILURE
        }
    }
}
