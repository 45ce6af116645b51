//! Locomotion Sim - Headless Controller Run
//!
//! Run with: `cargo run --bin locomotion_sim -- [config.json] [ticks]`
//!
//! Drives one character through a scripted course at 60 Hz:
//! - walk, then sprint down a straight lane
//! - jump while sprinting
//! - crouch and walk into a low tunnel
//! - try to stand inside the tunnel (blocked), then stand after leaving it
//! - turn in place
//!
//! Set `RUST_LOG=debug` to see stance and sprint transitions.
//! The final pose is printed to stdout as JSON.

use std::path::Path;
use std::process::ExitCode;

use glam::{Vec2, Vec3};
use stridecore_engine::config::{ConfigError, ControllerConfig};
use stridecore_engine::input::IntentSnapshot;
use stridecore_engine::physics::{StaticBox, StaticWorld};
use stridecore_engine::player::{LocomotionController, Pose};

const TICK_RATE: f32 = 60.0;
const DEFAULT_TICKS: u32 = 600;
/// Log a pose line every this many ticks
const REPORT_INTERVAL: u32 = 60;

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("{}", e);
            ExitCode::FAILURE
        }
    }
}

fn run() -> Result<(), Box<dyn std::error::Error>> {
    let mut args = std::env::args().skip(1);
    let config = match args.next() {
        Some(path) => load_config(Path::new(&path))?,
        None => {
            log::info!("No config given, using defaults");
            ControllerConfig::default()
        }
    };
    let ticks = match args.next() {
        Some(raw) => raw.parse::<u32>()?,
        None => DEFAULT_TICKS,
    };

    let mut world = build_course();
    let mut controller = LocomotionController::new(config, Vec3::ZERO);
    let dt = 1.0 / TICK_RATE;

    log::info!("Running {} ticks at {} Hz ({} boxes)", ticks, TICK_RATE, world.len());

    let mut previous = controller.pose();
    for tick in 0..ticks {
        let intent = scripted_intent(tick);
        let pose = controller.update(&mut world, &intent, dt);

        report_changes(tick, &previous, &pose);
        if tick % REPORT_INTERVAL == 0 {
            log::info!(
                "[{:4}] pos=({:.2}, {:.2}, {:.2}) yaw={:.1} pitch={:.1} cam={:.2}",
                tick,
                pose.position.x,
                pose.position.y,
                pose.position.z,
                pose.yaw,
                pose.pitch,
                pose.camera_height,
            );
        }
        previous = pose;
    }

    println!("{}", serde_json::to_string_pretty(&controller.pose())?);
    Ok(())
}

fn load_config(path: &Path) -> Result<ControllerConfig, ConfigError> {
    let config = ControllerConfig::load(path)?;
    log::info!("Loaded config from {}", path.display());
    Ok(config)
}

/// Flat ground, a low tunnel over the lane and side walls.
fn build_course() -> StaticWorld {
    let mut world = StaticWorld::with_ground(0.0);

    // Tunnel roof: 1.5m clearance
    world.add_box(StaticBox::new(Vec3::new(-3.0, 1.5, 34.0), Vec3::new(3.0, 3.0, 44.0)));
    // Lane walls
    world.add_box(StaticBox::new(Vec3::new(-4.0, 0.0, -5.0), Vec3::new(-3.0, 3.0, 60.0)));
    world.add_box(StaticBox::new(Vec3::new(3.0, 0.0, -5.0), Vec3::new(4.0, 3.0, 60.0)));

    world
}

fn scripted_intent(tick: u32) -> IntentSnapshot {
    let forward = IntentSnapshot::moving(0.0, 1.0);
    match tick {
        0..120 => forward,
        120 => forward.with_sprint(),
        240 => forward.with_jump(),
        // Drop sprint and crouch before the tunnel
        300 => forward.with_sprint().with_crouch(),
        420 => forward.with_crouch(),
        540 => IntentSnapshot::default().with_crouch(),
        121..540 => forward,
        _ => IntentSnapshot::new(Vec2::ZERO, Vec2::new(2.0, 0.5)),
    }
}

fn report_changes(tick: u32, before: &Pose, after: &Pose) {
    if before.stance != after.stance {
        log::info!("[{:4}] stance {:?} -> {:?}", tick, before.stance, after.stance);
    }
    if before.sprinting != after.sprinting {
        log::info!("[{:4}] sprinting: {}", tick, after.sprinting);
    }
    if before.grounded != after.grounded {
        log::info!(
            "[{:4}] {} at y={:.2}",
            tick,
            if after.grounded { "landed" } else { "airborne" },
            after.position.y
        );
    }
}
