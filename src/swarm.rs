//! Particle swarm choreography.
//!
//! The controller owns a fixed set of particles and retargets them whenever
//! the hand switches formation. Each tick every particle eases toward its own
//! target at its own rate, so the swarm never moves as one rigid body.

mod follow;
mod formation;
mod particle;

use glam::{EulerRot, Quat, Vec3};
use log::{debug, info, trace};
use rand::{Rng, SeedableRng, rngs::StdRng};

use crate::config::SwarmConfig;
use crate::trail::TrailPoint;
use crate::tween::{Easing, Tween};

pub use follow::ArcPath;
pub use formation::{contracted_target, sample_sphere, scattered_target};
pub use particle::{FORWARD_AXIS, Particle, ParticlePose, TrailSlot, aim};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SwarmState {
    /// Tight rotating ball around the fist.
    Contracted,
    /// Wide shell around the open hand.
    Scattered,
    /// Gathered on the fingertip or strung along its trail.
    Tracking,
}

impl SwarmState {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Contracted => "contracted",
            Self::Scattered => "scattered",
            Self::Tracking => "tracking",
        }
    }
}

/// Cool-down status of trail following after the hand opens.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ReleaseFollowInfo {
    pub remaining_secs: f32,
    pub can_follow: bool,
}

pub struct SwarmController {
    cfg: SwarmConfig,
    state: SwarmState,
    particles: Vec<Particle>,
    poses: Vec<ParticlePose>,
    anchor: Vec3,
    forward_point: Vec3,
    transition: Tween,
    animation_progress: f32,
    sphere_angle: f32,
    following: bool,
    path: Option<ArcPath>,
    scattered_since_ms: u64,
    release_unlocked: bool,
    rng: StdRng,
}

impl SwarmController {
    /// Seeds from `cfg.seed` when set, otherwise from OS entropy.
    pub fn new(cfg: SwarmConfig) -> Self {
        let rng = match cfg.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self::with_rng(cfg, rng)
    }

    pub fn with_rng(cfg: SwarmConfig, mut rng: StdRng) -> Self {
        let mut particles = Vec::with_capacity(cfg.count);
        for _ in 0..cfg.count {
            let mut p = Particle::spawn(&mut rng);
            p.target_position = scattered_target(&mut rng, cfg.scatter_radius);
            p.position = p.target_position;
            p.start_position = p.position;
            particles.push(p);
        }
        let poses = particles
            .iter()
            .map(|p| ParticlePose {
                position: p.position,
                orientation: p.orientation,
                scale: p.scale,
            })
            .collect();
        let transition = Tween::settled(secs_to_ms(cfg.transition_secs), Easing::InOutQuad);
        info!("swarm ready with {} particles", particles.len());

        Self {
            cfg,
            state: SwarmState::Scattered,
            particles,
            poses,
            anchor: Vec3::ZERO,
            forward_point: Vec3::ZERO,
            transition,
            animation_progress: 1.0,
            sphere_angle: 0.0,
            following: false,
            path: None,
            scattered_since_ms: 0,
            release_unlocked: false,
            rng,
        }
    }

    pub fn state(&self) -> SwarmState {
        self.state
    }

    pub fn is_following_trail(&self) -> bool {
        self.following
    }

    pub fn animation_progress(&self) -> f32 {
        self.animation_progress
    }

    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    pub fn poses(&self) -> &[ParticlePose] {
        &self.poses
    }

    pub fn len(&self) -> usize {
        self.particles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }

    pub fn anchor(&self) -> Vec3 {
        self.anchor
    }

    pub fn forward_point(&self) -> Vec3 {
        self.forward_point
    }

    /// Switch formation. Returns `false` when already in `state`.
    pub fn set_state(&mut self, state: SwarmState, now_ms: u64) -> bool {
        if self.state == state {
            return false;
        }
        info!("swarm state {} -> {}", self.state.as_str(), state.as_str());
        self.state = state;

        if state == SwarmState::Scattered {
            self.scattered_since_ms = now_ms;
            self.release_unlocked = false;
            debug!(
                "trail following locked for {:.1}s",
                self.cfg.release_follow_delay_secs
            );
        }

        for p in &mut self.particles {
            p.start_position = p.position;
        }
        self.transition.restart(now_ms);
        self.animation_progress = 0.0;

        self.retarget();
        true
    }

    /// Live hand anchor in scene units.
    pub fn set_anchor(&mut self, anchor: Vec3) {
        self.anchor = anchor;
    }

    /// Re-aim the shared forward point at `(x, y)`, keeping the depth of the
    /// particle currently nearest the camera.
    pub fn update_tracking_point(&mut self, x: f32, y: f32) {
        let z = self
            .particles
            .iter()
            .map(|p| p.position.z)
            .reduce(f32::max)
            .unwrap_or(0.0);
        self.forward_point = Vec3::new(x, y, z);
    }

    /// Feed the latest trail copy and start or stop following it.
    pub fn update_trail(&mut self, trail: &[TrailPoint], now_ms: u64) {
        if self.state == SwarmState::Scattered && !self.release_unlocked {
            let elapsed = now_ms.saturating_sub(self.scattered_since_ms);
            if elapsed >= secs_to_ms(self.cfg.release_follow_delay_secs) {
                self.release_unlocked = true;
                debug!("release cool-down over, trail following unlocked");
            }
        }

        let long_enough = trail.len() >= self.cfg.min_follow_points;
        let should_follow = match self.state {
            SwarmState::Tracking => long_enough,
            SwarmState::Scattered => self.release_unlocked && long_enough,
            SwarmState::Contracted => false,
        };

        self.path = ArcPath::new(trail);

        if should_follow && !self.following {
            self.following = true;
            for p in &mut self.particles {
                p.trail_progress = 0.0;
            }
            self.assign_slots();
            info!(
                "following trail ({} points, state {})",
                trail.len(),
                self.state.as_str()
            );
        } else if !should_follow && self.following {
            self.following = false;
            for p in &mut self.particles {
                p.trail_progress = 0.0;
                p.trail_slot = None;
            }
            self.retarget();
            info!("stopped following trail");
        } else if self.following {
            self.assign_slots();
        }
    }

    pub fn release_follow_info(&self, now_ms: u64) -> ReleaseFollowInfo {
        if self.state != SwarmState::Scattered {
            return ReleaseFollowInfo {
                remaining_secs: 0.0,
                can_follow: false,
            };
        }
        let elapsed = now_ms.saturating_sub(self.scattered_since_ms) as f32 / 1000.0;
        ReleaseFollowInfo {
            remaining_secs: (self.cfg.release_follow_delay_secs - elapsed).max(0.0),
            can_follow: self.release_unlocked,
        }
    }

    fn assign_slots(&mut self) {
        let Some(path) = &self.path else {
            return;
        };
        let n = self.particles.len();
        for (i, p) in self.particles.iter_mut().enumerate() {
            p.trail_slot = Some(path.slot_for(i, n));
        }
    }

    /// Draw fresh static targets for the current formation.
    fn retarget(&mut self) {
        match self.state {
            SwarmState::Contracted => {
                for p in &mut self.particles {
                    p.target_position = contracted_target(&mut self.rng, self.cfg.contracted_radius);
                }
            }
            SwarmState::Scattered => {
                for p in &mut self.particles {
                    p.target_position = scattered_target(&mut self.rng, self.cfg.scatter_radius);
                }
            }
            // targets come from the forward point or the trail every tick
            SwarmState::Tracking => {}
        }
    }

    /// Move every particle one tick and return the resulting poses.
    pub fn advance(&mut self, now_ms: u64, dt: f32) -> &[ParticlePose] {
        self.animation_progress = self.transition.value(now_ms);
        let time = now_ms as f32 / 1000.0;

        if self.state == SwarmState::Contracted {
            self.sphere_angle += self.cfg.rotation_speed * dt;
        }
        let sphere_rotation = Quat::from_rotation_z(-self.sphere_angle);
        let following = self.following && self.path.is_some();
        let cfg = &self.cfg;

        for (i, (p, pose)) in self
            .particles
            .iter_mut()
            .zip(self.poses.iter_mut())
            .enumerate()
        {
            let slot = p.trail_slot.filter(|_| following);
            let (target, factor) = match (slot, &self.path) {
                (Some(slot), Some(path)) => {
                    p.trail_progress = (p.trail_progress + p.trail_follow_speed * dt * cfg.follow_rate).min(1.0);
                    let eased = p.eased_progress();
                    let jitter = (1.0 - eased) * cfg.jitter_range + cfg.jitter_floor;
                    let shake = Vec3::new(
                        self.rng.gen_range(-0.5..0.5),
                        self.rng.gen_range(-0.5..0.5),
                        self.rng.gen_range(-0.5..0.5),
                    ) * jitter;
                    let factor = if self.state == SwarmState::Tracking {
                        p.track_random_speed
                    } else {
                        p.trail_follow_speed * (0.5 + eased * 1.5)
                    };
                    (path.point_at(slot) + shake, factor)
                }
                _ => match self.state {
                    SwarmState::Tracking => (self.forward_point, p.track_random_speed),
                    SwarmState::Contracted => (
                        sphere_rotation * p.target_position + self.anchor,
                        cfg.settle_factor,
                    ),
                    SwarmState::Scattered => (p.target_position + self.anchor, cfg.settle_factor),
                },
            };

            let blended = p.start_position.lerp(target, self.animation_progress);
            p.position = p.position.lerp(blended, factor.min(1.0));

            let fi = i as f32;
            let float = Vec3::new(
                (time * 2.0 + fi * 0.1).sin(),
                (time * 1.5 + fi * 0.15).cos(),
                (time * 1.8 + fi * 0.2).sin(),
            ) * cfg.float_amplitude;
            let shown = p.position + float;

            let orientation = match (slot, &self.path) {
                (Some(slot), Some(path)) => aim(path.tangent(slot)),
                _ => match self.state {
                    SwarmState::Contracted => {
                        let to_center = (self.anchor - shown).normalize_or_zero();
                        let tangent = Vec3::new(to_center.y, -to_center.x, 0.0).normalize_or_zero();
                        let look = (shown + tangent).lerp(self.anchor, cfg.contracted_lean);
                        aim(look - shown)
                    }
                    SwarmState::Scattered => Some(Quat::from_euler(
                        EulerRot::XYZ,
                        time * 0.5,
                        time * 2.0 + fi,
                        0.0,
                    )),
                    SwarmState::Tracking => aim(p.position - self.anchor),
                },
            };
            if let Some(q) = orientation {
                p.orientation = q;
            }

            *pose = ParticlePose {
                position: shown,
                orientation: p.orientation,
                scale: p.scale,
            };
        }

        trace!(
            "advance t={time:.3} progress={:.2} following={following}",
            self.animation_progress
        );
        &self.poses
    }
}

fn secs_to_ms(secs: f32) -> u64 {
    (secs.max(0.0) * 1000.0).round() as u64
}
