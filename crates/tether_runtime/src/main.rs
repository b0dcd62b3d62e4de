//! Tether Runtime
//!
//! Builds a small scene, boots the script engine and runs a fixed number of
//! frames with canned input.

use std::path::Path;
use std::rc::Rc;

use anyhow::{Context, Result};
use glam::Vec3;
use tether_core::time::SimulationTime;
use tether_runtime::scripts::{self, Camera, Player};
use tether_runtime::{Scene, ScriptComponentData, ScriptEngine, Transform};
use tether_script::{FieldValue, ScriptClass};
use tether_services::{KeyCode, Settings};

fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::fmt::init();

    tracing::info!("Tether Runtime v{}", tether_core::VERSION);

    let settings = match std::env::args().nth(1) {
        Some(path) => Settings::load(Path::new(&path))
            .with_context(|| format!("loading settings from {path}"))?,
        None => Settings::default(),
    };

    let scene = Rc::new(Scene::new());

    let player = scene.create_entity("Player");
    scene.add_transform(player, Transform::IDENTITY);
    let mut player_script = ScriptComponentData::new(Player::NAME);
    player_script.fields.insert("Speed".into(), FieldValue::Float(2.0));
    scene.add_script(player, player_script);

    let camera = scene.create_entity("Camera");
    scene.add_transform(camera, Transform::from_translation(Vec3::new(0.0, 0.0, 5.0)));
    scene.add_script(camera, ScriptComponentData::new(Camera::NAME));

    let mut engine = ScriptEngine::new(scene.clone(), settings.scripting.clone());
    scripts::register_all(&mut engine);
    engine.on_runtime_start()?;

    let frames = settings.simulation.frames;
    let mut time = SimulationTime::new(settings.simulation.tick_rate_hz);
    for frame in 0..frames {
        drive_input(&scene, frame, frames);
        engine.on_update(time.advance_tick())?;
    }

    if let Some(transform) = scene.transform(player) {
        tracing::info!(translation = ?transform.translation, "player final position");
    }
    if let Some(distance) = engine.field_value(camera, "DistanceFromPlayer") {
        tracing::info!(?distance, "camera final distance");
    }
    tracing::info!(
        ticks = time.tick_count(),
        seconds = time.total_time().as_secs_f32(),
        "simulation finished"
    );

    engine.on_runtime_stop();
    Ok(())
}

/// Canned input: walk up for the first half, right for the second, and pull
/// the camera in during the last quarter.
fn drive_input(scene: &Scene, frame: u32, frames: u32) {
    scene.release_all_keys();
    if frame < frames / 2 {
        scene.press_key(KeyCode::W);
    } else {
        scene.press_key(KeyCode::D);
    }
    if frame >= frames - frames / 4 {
        scene.press_key(KeyCode::E);
    }
}
