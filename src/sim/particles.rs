//! Cosmetic particles
//!
//! Particles are plain data. `advance_particle` and `is_expired` are the only
//! behaviour, and the system just maps them over its collection. Nothing
//! here feeds back into gameplay.

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

/// Burst colour for the death explosion (0xRRGGBB)
pub const EXPLOSION_COLOR: u32 = 0xff_8c_1a;
/// Particles in a death explosion
pub const EXPLOSION_PARTICLES: usize = 30;

/// Default cap on live particles
pub const MAX_PARTICLES: usize = 256;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Particle {
    pub pos: Vec2,
    /// Units per nominal frame
    pub vel: Vec2,
    pub color: u32,
    pub size: f32,
    /// 1.0 when spawned, gone at 0.0
    pub opacity: f32,
    /// Opacity lost per nominal frame
    pub decay: f32,
}

/// Particle after `dt` nominal frames
pub fn advance_particle(particle: Particle, dt: f32) -> Particle {
    Particle {
        pos: particle.pos + particle.vel * dt,
        opacity: particle.opacity - particle.decay * dt,
        ..particle
    }
}

pub fn is_expired(particle: &Particle) -> bool {
    particle.opacity <= 0.0
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ParticleSystem {
    pub particles: Vec<Particle>,
    pub max_particles: usize,
}

impl Default for ParticleSystem {
    fn default() -> Self {
        Self::with_capacity(MAX_PARTICLES)
    }
}

impl ParticleSystem {
    pub fn with_capacity(max_particles: usize) -> Self {
        Self {
            particles: Vec::new(),
            max_particles,
        }
    }

    /// Spawn up to `count` particles flying out of `origin`; returns how many fit
    pub fn spawn_burst<R: Rng>(
        &mut self,
        origin: Vec2,
        color: u32,
        count: usize,
        rng: &mut R,
    ) -> usize {
        let room = self.max_particles.saturating_sub(self.particles.len());
        let count = count.min(room);
        for _ in 0..count {
            let angle = rng.random_range(0.0..std::f32::consts::TAU);
            let speed: f32 = rng.random_range(1.0..5.0);
            self.particles.push(Particle {
                pos: origin,
                vel: Vec2::from_angle(angle) * speed,
                color,
                size: rng.random_range(2.0..6.0),
                opacity: 1.0,
                decay: rng.random_range(0.01..0.03),
            });
        }
        count
    }

    /// Move and fade every particle, dropping the faded ones
    pub fn advance(&mut self, dt: f32) {
        for particle in &mut self.particles {
            *particle = advance_particle(*particle, dt);
        }
        self.particles.retain(|p| !is_expired(p));
    }

    pub fn len(&self) -> usize {
        self.particles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    fn particle() -> Particle {
        Particle {
            pos: Vec2::new(10.0, 10.0),
            vel: Vec2::new(2.0, -1.0),
            color: EXPLOSION_COLOR,
            size: 3.0,
            opacity: 1.0,
            decay: 0.25,
        }
    }

    #[test]
    fn test_advance_particle() {
        let next = advance_particle(particle(), 2.0);
        assert_eq!(next.pos, Vec2::new(14.0, 8.0));
        assert_eq!(next.opacity, 0.5);
        assert_eq!(next.size, 3.0);
        assert!(!is_expired(&next));
        assert!(is_expired(&advance_particle(next, 2.0)));
    }

    #[test]
    fn test_burst_properties() {
        let mut system = ParticleSystem::default();
        let mut rng = Pcg32::seed_from_u64(9);
        let origin = Vec2::new(50.0, 60.0);
        assert_eq!(system.spawn_burst(origin, 0x123456, 20, &mut rng), 20);
        for p in &system.particles {
            assert_eq!(p.pos, origin);
            assert_eq!(p.opacity, 1.0);
            assert_eq!(p.color, 0x123456);
            assert!(p.size >= 2.0 && p.size < 6.0);
            assert!(p.decay >= 0.01 && p.decay < 0.03);
            let speed = p.vel.length();
            assert!(speed > 0.99 && speed < 5.01);
        }
    }

    #[test]
    fn test_burst_respects_cap() {
        let mut system = ParticleSystem::with_capacity(10);
        let mut rng = Pcg32::seed_from_u64(1);
        assert_eq!(system.spawn_burst(Vec2::ZERO, 0, 8, &mut rng), 8);
        assert_eq!(system.spawn_burst(Vec2::ZERO, 0, 8, &mut rng), 2);
        assert_eq!(system.len(), 10);
    }

    #[test]
    fn test_system_drops_expired() {
        let mut system = ParticleSystem::default();
        system.particles.push(particle());
        system.particles.push(Particle {
            decay: 0.01,
            ..particle()
        });
        system.advance(4.0);
        assert_eq!(system.len(), 1);
        assert!((system.particles[0].opacity - 0.96).abs() < 1e-6);
    }

    #[test]
    fn test_burst_fades_out() {
        let mut system = ParticleSystem::default();
        let mut rng = Pcg32::seed_from_u64(2);
        system.spawn_burst(Vec2::ZERO, 0, 30, &mut rng);
        // Slowest decay is 0.01 per frame
        for _ in 0..101 {
            system.advance(1.0);
        }
        assert!(system.is_empty());
    }
}
