//! Strafe - Headless Movement Demo
//!
//! Drops a character onto a flat floor and bunny-hops it across the level
//! while air-strafing, printing horizontal speed once per second.
//!
//! Usage: `strafe [bunnyhop|tactical|<tuning.toml>]`

use anyhow::{Context, Result};
use glam::Vec3;
use strafe_physics::{
    CollisionWorld, GroundSampler, GroundTrace, MovementIntegrator, MovementMode, MovementState,
    MovementTuning, TickInput,
};

const TICK_RATE: u32 = 60;
const DURATION_SECONDS: u32 = 10;
const GRAVITY: f32 = -1143.0;
const SNAP_DISTANCE: f32 = 2.0;

fn load_tuning() -> Result<MovementTuning> {
    match std::env::args().nth(1).as_deref() {
        None => Ok(MovementTuning::default()),
        Some("bunnyhop") => Ok(MovementTuning::bunnyhop()),
        Some("tactical") => Ok(MovementTuning::tactical()),
        Some(path) => MovementTuning::from_path(path)
            .with_context(|| format!("failed to load tuning from {path}")),
    }
}

/// Host-side contact classification: a short downward trace decides
/// between walking and falling and snaps the capsule onto the floor.
fn classify_contact(world: &CollisionWorld, tuning: &MovementTuning, state: &mut MovementState) {
    let half_height = tuning.capsule_half_height(state.crouched);
    let trace = world.trace(state.position, SNAP_DISTANCE, half_height);

    if trace.hit && state.velocity.z <= 0.0 && trace.normal.z >= tuning.walkable_floor_z {
        if !state.mode.is_moving_on_ground() {
            log::debug!("landed at {:?}", state.position);
        }
        state.mode = MovementMode::Walking;
        state.position.z = trace.location.z + half_height;
        state.velocity.z = 0.0;
        state.current_floor = trace;
    } else {
        state.mode = MovementMode::Falling;
        state.current_floor = GroundTrace::default();
    }
}

fn main() -> Result<()> {
    env_logger::init();

    let tuning = load_tuning()?;
    let integrator = MovementIntegrator::new(tuning).context("invalid movement tuning")?;
    let tuning = integrator.tuning().clone();

    let mut world = CollisionWorld::new();
    world.add_box(Vec3::new(0.0, 0.0, -50.0), Vec3::new(1.0e6, 1.0e6, 50.0));

    let mut state = MovementState::new(Vec3::new(0.0, 0.0, 300.0), MovementMode::Falling);
    state.velocity = Vec3::new(tuning.max_walk_speed, 0.0, 0.0);

    log::info!(
        "starting demo: grace={}s max_air_wish_speed={} max_walk_speed={}",
        tuning.grace_period_seconds,
        tuning.max_air_wish_speed,
        tuning.max_walk_speed
    );

    let dt = 1.0 / TICK_RATE as f32;
    let mut sim_time = 0.0_f64;
    let mut strafe_sign = 1.0_f32;

    for frame in 0..u64::from(TICK_RATE * DURATION_SECONDS) {
        sim_time += f64::from(dt);

        classify_contact(&world, &tuning, &mut state);

        // Hop on every landing and switch strafe direction in the air
        if state.mode.is_moving_on_ground() && integrator.do_jump(&mut state, true) {
            strafe_sign = -strafe_sign;
        }

        let horizontal = Vec3::new(state.velocity.x, state.velocity.y, 0.0);
        let sideways = Vec3::new(-horizontal.y, horizontal.x, 0.0).normalize_or_zero();
        let request = sideways * strafe_sign * tuning.max_acceleration;

        let report = integrator.tick(&mut state, &TickInput::new(dt, sim_time, request));

        if state.mode.is_falling() {
            state.velocity.z += GRAVITY * dt;
        }
        state.position += state.velocity * dt;

        if frame % u64::from(TICK_RATE) == 0 {
            let ground = integrator.ground_info(&mut state, frame, &world);
            println!(
                "t={:5.2}s speed={:7.1} height={:6.1} mode={:?} stage={:?}",
                sim_time,
                state.horizontal_speed(),
                ground.ground_distance,
                state.mode,
                report.stage
            );
        }
    }

    println!("final horizontal speed: {:.1}", state.horizontal_speed());
    Ok(())
}
