//! Game session state and core entity types
//!
//! Everything the simulation mutates lives in one owned `GameState`
//! aggregate. The session phase is a single enum, so the contradictory
//! victory/defeat/paused flag combinations of a boolean-flag design cannot
//! be represented at all.

use glam::Vec3;
use rand::SeedableRng;
use rand_pcg::Pcg32;

use crate::consts::*;
use crate::sim::level::{level_params, spawn_spheres};
use crate::sim::particles::{self, Particle};
use crate::{wrap_degrees, wrap_phase};

/// Current phase of the session
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GamePhase {
    /// Active gameplay
    Playing,
    /// Frozen scene, still rendered
    Paused,
    /// All prime spheres eliminated; waiting for level-advance confirmation
    Victory,
    /// One of the loss conditions fired; waiting for restart
    Defeat,
}

/// Why the session was lost
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DefeatReason {
    /// Score fell to the loss floor
    ScoreFloor,
    /// Too many non-prime spheres destroyed
    NonPrimeLimit,
    /// Countdown timer reached zero
    TimeOut,
}

/// Discrete things that happened during a tick, drained by the shell to
/// drive audio and logging. The only channel by which collaborators learn
/// of phase transitions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GameEvent {
    LevelStarted {
        level: u32,
        prime_count: u32,
        non_prime_count: u32,
    },
    PrimeDestroyed {
        label: u32,
    },
    NonPrimeDestroyed {
        label: u32,
    },
    Victory,
    Defeat(DefeatReason),
}

/// A single drifting clickable target
#[derive(Debug, Clone)]
pub struct Sphere {
    /// Displayed number; primality of the label matches `is_prime`
    pub label: u32,
    pub radius: f32,
    pub position: Vec3,
    pub velocity: Vec3,
    /// Immutable for the sphere's lifetime; decides palette and scoring
    pub is_prime: bool,
    /// Cyclic color animation parameter in [0, 1)
    pub color_phase: f32,
    /// Cosmetic spin in degrees, [0, 360)
    pub rotation_angle: f32,
    pub rotation_speed: f32,
    pub alive: bool,
}

impl Sphere {
    /// Advance one tick: integrate position, spin, color cycle, then bounce
    /// off the walls of the play volume.
    pub fn update(&mut self, bounds: Vec3) {
        self.position += self.velocity;

        self.rotation_angle = wrap_degrees(self.rotation_angle + self.rotation_speed);
        self.color_phase = wrap_phase(self.color_phase + COLOR_PHASE_STEP);

        // Per-axis elastic wall bounce: clamp the face to the bound and
        // negate that axis's velocity. No energy loss, no rotation coupling.
        for axis in 0..3 {
            let b = bounds[axis];
            if self.position[axis] - self.radius < -b {
                self.position[axis] = -b + self.radius;
                self.velocity[axis] = -self.velocity[axis];
            } else if self.position[axis] + self.radius > b {
                self.position[axis] = b - self.radius;
                self.velocity[axis] = -self.velocity[axis];
            }
        }
    }

    /// Current body color for the color-cycle phase.
    ///
    /// Primes run a two-segment blend (green to orange, then orange to
    /// yellow, each segment re-normalized); non-primes lerp red to blue.
    pub fn color(&self) -> Vec3 {
        if self.is_prime {
            if self.color_phase < 0.5 {
                PRIME_GREEN.lerp(PRIME_ORANGE, self.color_phase * 2.0)
            } else {
                PRIME_ORANGE.lerp(PRIME_YELLOW, (self.color_phase - 0.5) * 2.0)
            }
        } else {
            NON_PRIME_RED.lerp(NON_PRIME_BLUE, self.color_phase)
        }
    }
}

/// The complete owned session state
#[derive(Debug, Clone)]
pub struct GameState {
    /// Run seed, kept for reproducibility
    pub seed: u64,
    pub level: u32,
    /// Signed; can go negative
    pub score: i64,
    /// Countdown in whole seconds, wall-clock driven
    pub remaining_time: u32,
    pub phase: GamePhase,
    /// Half-extents of the play volume, constant for the session
    pub bounds: Vec3,
    pub spheres: Vec<Sphere>,
    pub particles: Vec<Particle>,
    /// Labels of prime spheres hit this level
    pub hit_primes: Vec<u32>,
    /// Spheres destroyed this level, prime or not
    pub eliminated_spheres: u32,
    /// Non-prime spheres destroyed this level; a loss trigger
    pub non_prime_destroyed: u32,
    /// Cumulative stats, surviving resets and level advances
    pub lifetime_primes_destroyed: u64,
    pub lifetime_spheres_destroyed: u64,
    events: Vec<GameEvent>,
    pub(crate) rng: Pcg32,
    last_timer_update_ms: u64,
}

impl GameState {
    /// Create a new session at level 1 and spawn its sphere population.
    pub fn new(seed: u64, now_ms: u64) -> Self {
        let mut state = Self {
            seed,
            level: 1,
            score: 0,
            remaining_time: BASE_TIME_SECS,
            phase: GamePhase::Playing,
            bounds: BOUNDS,
            spheres: Vec::new(),
            particles: Vec::new(),
            hit_primes: Vec::new(),
            eliminated_spheres: 0,
            non_prime_destroyed: 0,
            lifetime_primes_destroyed: 0,
            lifetime_spheres_destroyed: 0,
            events: Vec::new(),
            rng: Pcg32::seed_from_u64(seed),
            last_timer_update_ms: now_ms,
        };
        state.spawn_level();
        state
    }

    /// Time limit for a level in seconds.
    pub fn time_limit(level: u32) -> u32 {
        BASE_TIME_SECS
            .saturating_sub(level.saturating_sub(1).saturating_mul(TIME_DECREMENT_PER_LEVEL))
            .max(MIN_TIME_SECS)
    }

    /// Replace the entire sphere population per the generator formulas for
    /// the current level.
    fn spawn_level(&mut self) {
        let params = level_params(self.level, TOTAL_SPHERES);
        self.spheres = spawn_spheres(&mut self.rng, &params, self.bounds);
        log::info!(
            "level {} started: {} prime, {} non-prime spheres, {}s on the clock",
            params.level,
            params.prime_count,
            params.non_prime_count,
            self.remaining_time,
        );
        self.events.push(GameEvent::LevelStarted {
            level: params.level,
            prime_count: params.prime_count,
            non_prime_count: params.non_prime_count,
        });
    }

    /// Reset the session at the *current* level: score, per-level counters,
    /// timer, and the whole sphere population. Cumulative stats survive.
    pub fn reset(&mut self, now_ms: u64) {
        self.score = 0;
        self.hit_primes.clear();
        self.eliminated_spheres = 0;
        self.non_prime_destroyed = 0;
        self.particles.clear();
        self.remaining_time = Self::time_limit(self.level);
        self.last_timer_update_ms = now_ms;
        self.phase = GamePhase::Playing;
        self.spawn_level();
    }

    /// Restart after defeat (or mid-game via the restart key). Stays on the
    /// current level.
    pub fn restart(&mut self, now_ms: u64) {
        match self.phase {
            GamePhase::Playing | GamePhase::Defeat => self.reset(now_ms),
            _ => {}
        }
    }

    /// Advance to the next level. Only valid from Victory, on explicit
    /// player confirmation. A full respawn recomputes radii and speeds from
    /// the level formulas; nothing is scaled incrementally.
    pub fn advance_level(&mut self, now_ms: u64) {
        if self.phase != GamePhase::Victory {
            return;
        }
        self.level += 1;
        self.reset(now_ms);
    }

    /// Toggle Playing <-> Paused. No-op in any other phase.
    pub fn toggle_pause(&mut self, now_ms: u64) {
        match self.phase {
            GamePhase::Playing => self.phase = GamePhase::Paused,
            GamePhase::Paused => {
                self.phase = GamePhase::Playing;
                // don't bill the pause duration against the countdown
                self.last_timer_update_ms = now_ms;
            }
            _ => {}
        }
    }

    /// Remove a sphere the player hit: score it, count it, and spawn its
    /// explosion. `index` comes from the pick test against this collection.
    pub fn destroy_sphere(&mut self, index: usize) {
        if self.phase != GamePhase::Playing {
            return;
        }
        if index >= self.spheres.len() {
            log::warn!("pick produced stale sphere index {index}, ignoring");
            return;
        }
        let sphere = self.spheres.remove(index);

        if sphere.is_prime {
            self.score += PRIME_SCORE;
            self.hit_primes.push(sphere.label);
            self.lifetime_primes_destroyed += 1;
            self.events.push(GameEvent::PrimeDestroyed {
                label: sphere.label,
            });
        } else {
            self.score -= NON_PRIME_PENALTY;
            self.non_prime_destroyed += 1;
            log::debug!(
                "popped composite {}: factors {:?}",
                sphere.label,
                crate::primes::factorize(sphere.label)
            );
            self.events.push(GameEvent::NonPrimeDestroyed {
                label: sphere.label,
            });
        }
        self.eliminated_spheres += 1;
        self.lifetime_spheres_destroyed += 1;

        particles::spawn_explosion(
            &mut self.rng,
            sphere.position,
            sphere.is_prime,
            &mut self.particles,
        );
    }

    /// Win/lose evaluation, run once per tick after physics.
    ///
    /// Victory when no prime sphere remains (vacuously true for an empty
    /// collection). Two independent loss conditions share identical defeat
    /// handling; the timeout path lives in `update_timer`.
    pub fn evaluate(&mut self) {
        if self.phase != GamePhase::Playing {
            return;
        }
        if self.spheres.iter().all(|s| !s.is_prime) {
            self.enter_victory();
            return;
        }
        if self.score <= LOSE_SCORE {
            self.enter_defeat(DefeatReason::ScoreFloor);
        } else if self.non_prime_destroyed >= MAX_NON_PRIME_DESTROYED {
            self.enter_defeat(DefeatReason::NonPrimeLimit);
        }
    }

    /// Decrement the countdown once per elapsed wall-clock second. Reaching
    /// zero is an unconditional defeat, independent of score or mistakes.
    pub fn update_timer(&mut self, now_ms: u64) {
        if self.phase != GamePhase::Playing {
            return;
        }
        if now_ms.saturating_sub(self.last_timer_update_ms) >= 1000 {
            self.last_timer_update_ms = now_ms;
            self.remaining_time = self.remaining_time.saturating_sub(1);
            if self.remaining_time == 0 {
                self.enter_defeat(DefeatReason::TimeOut);
            }
        }
    }

    fn enter_victory(&mut self) {
        self.phase = GamePhase::Victory;
        particles::spawn_confetti(&mut self.rng, self.bounds, &mut self.particles);
        self.events.push(GameEvent::Victory);
        log::info!(
            "level {} cleared, score {}, waiting for confirmation",
            self.level,
            self.score
        );
    }

    fn enter_defeat(&mut self, reason: DefeatReason) {
        if self.phase != GamePhase::Playing {
            return;
        }
        self.phase = GamePhase::Defeat;
        self.events.push(GameEvent::Defeat(reason));
        log::info!("defeat at level {}: {:?}", self.level, reason);
    }

    /// Drain the events recorded since the last call.
    pub fn take_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    /// Live prime spheres remaining.
    pub fn primes_remaining(&self) -> usize {
        self.spheres.iter().filter(|s| s.is_prime).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_sphere(radius: f32, position: Vec3, velocity: Vec3) -> Sphere {
        Sphere {
            label: 7,
            radius,
            position,
            velocity,
            is_prime: true,
            color_phase: 0.0,
            rotation_angle: 0.0,
            rotation_speed: 1.5,
            alive: true,
        }
    }

    #[test]
    fn test_color_phase_advances_and_wraps() {
        let mut s = test_sphere(0.5, Vec3::ZERO, Vec3::ZERO);
        for _ in 0..250 {
            s.update(BOUNDS);
        }
        // 250 * 0.01 = 2.5 -> 0.5 after wrapping
        assert!((s.color_phase - 0.5).abs() < 1e-3);
    }

    #[test]
    fn test_rotation_angle_wraps_at_360() {
        let mut s = test_sphere(0.5, Vec3::ZERO, Vec3::ZERO);
        s.rotation_speed = 90.0;
        for _ in 0..5 {
            s.update(BOUNDS);
        }
        assert!((s.rotation_angle - 90.0).abs() < 1e-3);
    }

    #[test]
    fn test_wall_bounce_reverses_normal_component_only() {
        // Launched straight at the +x wall
        let mut s = test_sphere(1.0, Vec3::new(8.5, 0.0, 0.0), Vec3::new(1.0, 0.25, 0.0));
        s.update(BOUNDS);
        // clamped to bound minus radius, x velocity negated, y untouched
        assert!((s.position.x - (BOUNDS.x - 1.0)).abs() < 1e-5);
        assert_eq!(s.velocity.x, -1.0);
        assert_eq!(s.velocity.y, 0.25);
    }

    #[test]
    fn test_wall_bounce_low_side() {
        let mut s = test_sphere(0.5, Vec3::new(0.0, -5.9, 0.0), Vec3::new(0.0, -0.3, 0.0));
        s.update(BOUNDS);
        assert!((s.position.y - (-BOUNDS.y + 0.5)).abs() < 1e-5);
        assert_eq!(s.velocity.y, 0.3);
    }

    #[test]
    fn test_prime_color_segments() {
        let mut s = test_sphere(0.5, Vec3::ZERO, Vec3::ZERO);
        s.color_phase = 0.0;
        assert_eq!(s.color(), PRIME_GREEN);
        s.color_phase = 0.25;
        // halfway through the first segment: green-orange midpoint
        let mid = PRIME_GREEN.lerp(PRIME_ORANGE, 0.5);
        assert!((s.color() - mid).length() < 1e-5);
        s.color_phase = 0.5;
        assert_eq!(s.color(), PRIME_ORANGE);
        s.color_phase = 0.75;
        let mid = PRIME_ORANGE.lerp(PRIME_YELLOW, 0.5);
        assert!((s.color() - mid).length() < 1e-5);
    }

    #[test]
    fn test_non_prime_color_lerp() {
        let mut s = test_sphere(0.5, Vec3::ZERO, Vec3::ZERO);
        s.is_prime = false;
        s.color_phase = 0.5;
        let mid = NON_PRIME_RED.lerp(NON_PRIME_BLUE, 0.5);
        assert!((s.color() - mid).length() < 1e-5);
    }

    #[test]
    fn test_new_session_starts_playing_at_level_one() {
        let mut state = GameState::new(42, 0);
        assert_eq!(state.phase, GamePhase::Playing);
        assert_eq!(state.level, 1);
        assert_eq!(state.remaining_time, 90);
        assert_eq!(state.spheres.len(), TOTAL_SPHERES as usize);
        assert_eq!(state.primes_remaining(), 20);
        let events = state.take_events();
        assert!(matches!(events[0], GameEvent::LevelStarted { level: 1, .. }));
    }

    #[test]
    fn test_time_limit_formula() {
        assert_eq!(GameState::time_limit(1), 90);
        assert_eq!(GameState::time_limit(4), 45);
        assert_eq!(GameState::time_limit(6), 15);
        // floors at 15 rather than going negative
        assert_eq!(GameState::time_limit(60), 15);
    }

    #[test]
    fn test_destroy_prime_scores_and_counts() {
        let mut state = GameState::new(7, 0);
        state.take_events();
        let idx = state.spheres.iter().position(|s| s.is_prime).unwrap();
        let before = state.spheres.len();
        state.destroy_sphere(idx);
        assert_eq!(state.score, 10);
        assert_eq!(state.hit_primes.len(), 1);
        assert_eq!(state.eliminated_spheres, 1);
        assert_eq!(state.non_prime_destroyed, 0);
        assert_eq!(state.spheres.len(), before - 1);
        assert_eq!(state.particles.len(), PRIME_EXPLOSION_COUNT);
        let events = state.take_events();
        assert!(matches!(events[0], GameEvent::PrimeDestroyed { .. }));
    }

    #[test]
    fn test_destroy_non_prime_penalizes() {
        let mut state = GameState::new(7, 0);
        state.take_events();
        let idx = state.spheres.iter().position(|s| !s.is_prime).unwrap();
        state.destroy_sphere(idx);
        assert_eq!(state.score, -15);
        assert!(state.hit_primes.is_empty());
        assert_eq!(state.eliminated_spheres, 1);
        assert_eq!(state.non_prime_destroyed, 1);
        assert_eq!(state.particles.len(), NON_PRIME_EXPLOSION_COUNT);
    }

    #[test]
    fn test_score_floor_defeat() {
        let mut state = GameState::new(7, 0);
        state.score = LOSE_SCORE;
        state.evaluate();
        assert_eq!(state.phase, GamePhase::Defeat);
    }

    #[test]
    fn test_non_prime_limit_defeat_independent_of_score() {
        let mut state = GameState::new(7, 0);
        state.non_prime_destroyed = MAX_NON_PRIME_DESTROYED;
        assert_eq!(state.score, 0);
        state.evaluate();
        assert_eq!(state.phase, GamePhase::Defeat);
        assert!(
            state
                .take_events()
                .iter()
                .any(|e| *e == GameEvent::Defeat(DefeatReason::NonPrimeLimit))
        );
    }

    #[test]
    fn test_timeout_defeat_is_unconditional() {
        let mut state = GameState::new(7, 0);
        state.remaining_time = 1;
        state.score = 100; // healthy score does not save you
        state.update_timer(1000);
        assert_eq!(state.remaining_time, 0);
        assert_eq!(state.phase, GamePhase::Defeat);
    }

    #[test]
    fn test_timer_ticks_once_per_second() {
        let mut state = GameState::new(7, 0);
        state.update_timer(500);
        assert_eq!(state.remaining_time, 90);
        state.update_timer(1000);
        assert_eq!(state.remaining_time, 89);
        state.update_timer(1500);
        assert_eq!(state.remaining_time, 89);
    }

    #[test]
    fn test_victory_when_no_primes_remain() {
        let mut state = GameState::new(7, 0);
        state.spheres.retain(|s| !s.is_prime);
        state.take_events();
        state.evaluate();
        assert_eq!(state.phase, GamePhase::Victory);
        assert_eq!(state.particles.len(), CONFETTI_COUNT);
        assert!(state.take_events().contains(&GameEvent::Victory));
    }

    #[test]
    fn test_victory_on_empty_collection() {
        let mut state = GameState::new(7, 0);
        state.spheres.clear();
        state.evaluate();
        assert_eq!(state.phase, GamePhase::Victory);
    }

    #[test]
    fn test_pause_toggle_only_between_playing_and_paused() {
        let mut state = GameState::new(7, 0);
        state.toggle_pause(0);
        assert_eq!(state.phase, GamePhase::Paused);
        state.toggle_pause(0);
        assert_eq!(state.phase, GamePhase::Playing);

        state.spheres.clear();
        state.evaluate();
        assert_eq!(state.phase, GamePhase::Victory);
        state.toggle_pause(0);
        assert_eq!(state.phase, GamePhase::Victory);
    }

    #[test]
    fn test_advance_level_requires_victory() {
        let mut state = GameState::new(7, 0);
        state.advance_level(0);
        assert_eq!(state.level, 1);

        state.spheres.clear();
        state.evaluate();
        state.advance_level(0);
        assert_eq!(state.level, 2);
        assert_eq!(state.phase, GamePhase::Playing);
        assert_eq!(state.spheres.len(), TOTAL_SPHERES as usize);
    }

    #[test]
    fn test_level_four_resets_timer_to_45() {
        let mut state = GameState::new(7, 0);
        state.level = 3;
        state.spheres.clear();
        state.evaluate();
        state.advance_level(0);
        assert_eq!(state.level, 4);
        assert_eq!(state.remaining_time, 45);
    }

    #[test]
    fn test_restart_after_defeat_keeps_level() {
        let mut state = GameState::new(7, 0);
        state.level = 3;
        state.score = LOSE_SCORE;
        state.lifetime_spheres_destroyed = 12;
        state.evaluate();
        assert_eq!(state.phase, GamePhase::Defeat);
        state.restart(0);
        assert_eq!(state.phase, GamePhase::Playing);
        assert_eq!(state.level, 3);
        assert_eq!(state.score, 0);
        assert_eq!(state.remaining_time, 60);
        // cumulative stats survive
        assert_eq!(state.lifetime_spheres_destroyed, 12);
    }

    #[test]
    fn test_restart_ignored_from_victory() {
        let mut state = GameState::new(7, 0);
        state.spheres.clear();
        state.evaluate();
        state.restart(0);
        assert_eq!(state.phase, GamePhase::Victory);
    }

    #[test]
    fn test_destroy_sphere_ignored_while_paused() {
        let mut state = GameState::new(7, 0);
        state.toggle_pause(0);
        state.destroy_sphere(0);
        assert_eq!(state.spheres.len(), TOTAL_SPHERES as usize);
        assert_eq!(state.score, 0);
    }
}
