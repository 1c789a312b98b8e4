//! Per-frame update
//!
//! Order within a frame: phase timers, then (only if the frame began in
//! `Running`) jump, animation, physics, spawn, scroll, cull and collision,
//! then particles, which run in every phase.

use super::clock::FrameDelta;
use super::collision;
use super::phase::PhaseSignal;
use super::state::{GameEvent, Session};
use crate::audio::AudioCue;
use crate::tuning::FloorCheck;

/// Advance the session to host timestamp `now_ms`
pub fn tick(session: &mut Session, now_ms: f64) -> FrameDelta {
    let delta = session.clock.step(now_ms);
    step(session, delta);
    delta
}

/// Advance the session by an already-normalized delta
pub fn step(session: &mut Session, delta: FrameDelta) {
    let before = session.machine.phase();
    let simulate = session.machine.is_simulating();

    for signal in session.machine.advance(delta.raw_ms) {
        match signal {
            PhaseSignal::CountdownTick(n) => session.push_event(GameEvent::CountdownTick(n)),
            PhaseSignal::Resumed => log::info!("Resumed"),
            PhaseSignal::GameOver => log::info!("Game over, score {}", session.score),
        }
    }
    session.note_phase(before);

    if simulate {
        simulate_step(session, delta);
    }

    session.particles.advance(delta.dt);
}

fn simulate_step(session: &mut Session, delta: FrameDelta) {
    let (Some(viewport), Some(physics)) = (session.viewport, session.physics) else {
        // Nothing to lay out against until a valid resize arrives
        return;
    };

    if session.jump_requested {
        session.jump_requested = false;
        session.player.apply_jump(&physics);
        session.push_event(GameEvent::Jumped);
        session.cue(AudioCue::Jump);
    }

    session.player.animate(delta.raw_ms);

    let clamp_floor = physics.floor_check == FloorCheck::Integrate;
    let contact = session
        .player
        .integrate(delta.dt, &physics, viewport.height, clamp_floor);

    let spawned = session
        .obstacles
        .try_spawn(delta.raw_ms, &physics, viewport, &mut session.rng)
        .map(|o| o.id);
    if let Some(id) = spawned {
        session.push_event(GameEvent::ObstacleSpawned { id });
    }

    session.obstacles.advance(delta.dt, physics.obstacle_speed);
    session.obstacles.cull();

    let evaluation = collision::evaluate(
        &session.player,
        &mut session.obstacles,
        &physics,
        viewport.height,
        contact,
    );

    for id in evaluation.scored {
        session.award_point(id);
    }

    if let Some(hit) = evaluation.collision {
        if hit == collision::Collision::Floor && !clamp_floor {
            session.player.pos.y = viewport.height - session.player.height;
        }
        session.collide(hit);
    }
}
