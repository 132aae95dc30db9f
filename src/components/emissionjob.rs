//! Emission job component: a fixed-duration periodic item emitter.
//!
//! An [`EmissionJob`] is spawned as its own entity when an activation passes
//! the cooldown gate. It points at the owning actor and emits one dropped
//! item every `tick_interval` ticks until its budget runs out or the actor
//! goes away.
//!
//! # How It Works
//!
//! 1. The job starts `Running` with `remaining = duration_seconds * ticks_per_second`
//!    and fires on the first tick it is processed
//! 2. The `emission_system` calls [`EmissionJob::advance`] once per tick:
//!    - Between firings it only counts down `wait`
//!    - On a firing tick it checks the budget and the actor, then either fires
//!      (budget drops by `decrement`) or terminates
//! 3. On termination the entity is despawned and an
//!    [`EmissionFinished`](crate::events::emission::EmissionFinished) event fires
//!
//! The facing is re-sampled on every firing, so the emission follows the
//! actor's live orientation.
//!
//! # Related
//!
//! - [`crate::systems::emission::emission_system`] – system driving the jobs
//! - [`crate::components::ttl::Ttl`] – lifetime of the emitted items

use bevy_ecs::prelude::*;
use serde::Serialize;

use crate::components::actor::ActorId;
use crate::kind::ReliefKind;
use crate::math::Vec3;
use crate::resources::materials::Material;

/// Initial velocity of an emitted item.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum VelocityRule {
    /// Facing direction scaled by `speed`.
    AlongFacing { speed: f32 },
    /// Same vector regardless of facing.
    Fixed(Vec3),
}

/// Per-kind timing and spawn geometry.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct EmissionProfile {
    /// Ticks between two firings.
    pub tick_interval: u32,
    /// Budget consumed per firing.
    pub decrement: i64,
    /// Height above the actor's position.
    pub vertical_offset: f32,
    /// Distance along the facing direction; negative is behind the actor.
    pub facing_offset: f32,
    pub velocity: VelocityRule,
}

impl EmissionProfile {
    /// A stream in front of the actor, thrown along the facing.
    pub fn pee(speed: f32) -> Self {
        EmissionProfile {
            tick_interval: 2,
            decrement: 2,
            vertical_offset: 0.6,
            facing_offset: 0.5,
            velocity: VelocityRule::AlongFacing { speed },
        }
    }

    /// Drops behind the actor, falling straight down.
    pub fn poo() -> Self {
        EmissionProfile {
            tick_interval: 4,
            decrement: 4,
            vertical_offset: 0.5,
            facing_offset: -0.8,
            velocity: VelocityRule::Fixed(Vec3::new(0.0, -0.2, 0.0)),
        }
    }

    /// Spawn position and initial velocity for an actor at `position` facing `facing`.
    ///
    /// `facing` is normalized here; a zero facing spawns straight above the actor.
    pub fn spawn_geometry(&self, position: Vec3, facing: Vec3) -> (Vec3, Vec3) {
        let dir = facing.normalize_or_zero();
        let spawn = position + Vec3::UP * self.vertical_offset + dir * self.facing_offset;
        let velocity = match self.velocity {
            VelocityRule::AlongFacing { speed } => dir * speed,
            VelocityRule::Fixed(v) => v,
        };
        (spawn, velocity)
    }
}

/// Lifecycle of a job. `Terminated` is final.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub enum JobState {
    Running,
    Terminated,
}

/// Why a job stopped.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FinishReason {
    BudgetExhausted,
    ActorUnavailable,
}

/// Outcome of one tick of a job.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum JobTick {
    /// Not a firing tick.
    Idle,
    /// Emit one item now.
    Fire,
    /// The job just stopped.
    Terminate(FinishReason),
    /// Already terminated earlier.
    Done,
}

/// Running emission for one activation.
#[derive(Component, Clone, Debug)]
pub struct EmissionJob {
    /// Actor entity the items are emitted for.
    pub owner: Entity,
    pub actor: ActorId,
    pub kind: ReliefKind,
    pub material: Material,
    pub profile: EmissionProfile,
    /// Remaining tick budget. The job stops once this is `<= 0`.
    pub remaining: i64,
    /// Ticks left before the next firing.
    pub wait: u32,
    /// Items emitted so far.
    pub fired: u32,
    pub state: JobState,
}

impl EmissionJob {
    pub fn new(
        owner: Entity,
        actor: ActorId,
        kind: ReliefKind,
        material: Material,
        profile: EmissionProfile,
        duration_seconds: i64,
        ticks_per_second: u32,
    ) -> Self {
        EmissionJob {
            owner,
            actor,
            kind,
            material,
            profile,
            remaining: duration_seconds.saturating_mul(i64::from(ticks_per_second)),
            wait: 0,
            fired: 0,
            state: JobState::Running,
        }
    }

    pub fn is_running(&self) -> bool {
        self.state == JobState::Running
    }

    /// Advance the job by one tick.
    ///
    /// `actor_available` is only looked at on firing ticks. A budget that is
    /// already exhausted wins over an unavailable actor.
    pub fn advance(&mut self, actor_available: bool) -> JobTick {
        if self.state == JobState::Terminated {
            return JobTick::Done;
        }
        if self.wait > 0 {
            self.wait -= 1;
            return JobTick::Idle;
        }
        self.wait = self.profile.tick_interval.saturating_sub(1);

        if self.remaining <= 0 {
            self.state = JobState::Terminated;
            return JobTick::Terminate(FinishReason::BudgetExhausted);
        }
        if !actor_available {
            self.state = JobState::Terminated;
            return JobTick::Terminate(FinishReason::ActorUnavailable);
        }

        self.remaining -= self.profile.decrement;
        self.fired += 1;
        JobTick::Fire
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPSILON: f32 = 1e-6;

    fn vec_approx_eq(a: Vec3, b: Vec3) -> bool {
        (a.x - b.x).abs() < EPSILON && (a.y - b.y).abs() < EPSILON && (a.z - b.z).abs() < EPSILON
    }

    fn job(kind: ReliefKind, profile: EmissionProfile, duration: i64) -> EmissionJob {
        EmissionJob::new(
            Entity::PLACEHOLDER,
            ActorId(uuid::Uuid::nil()),
            kind,
            Material::new("STONE"),
            profile,
            duration,
            20,
        )
    }

    /// Run a job to completion, returning (fires, ticks until termination, reason).
    fn run_to_end(job: &mut EmissionJob) -> (u32, u32, FinishReason) {
        let mut fires = 0;
        for tick in 0..10_000 {
            match job.advance(true) {
                JobTick::Fire => fires += 1,
                JobTick::Idle => {}
                JobTick::Terminate(reason) => return (fires, tick, reason),
                JobTick::Done => panic!("advanced past termination"),
            }
        }
        panic!("job never terminated");
    }

    #[test]
    fn test_pee_fires_fifty_times_in_five_seconds() {
        let mut j = job(ReliefKind::Pee, EmissionProfile::pee(0.5), 5);
        let (fires, ticks, reason) = run_to_end(&mut j);
        assert_eq!(fires, 50);
        assert_eq!(ticks, 100);
        assert_eq!(reason, FinishReason::BudgetExhausted);
        assert_eq!(j.fired, 50);
    }

    #[test]
    fn test_poo_fires_twenty_five_times_in_five_seconds() {
        let mut j = job(ReliefKind::Poo, EmissionProfile::poo(), 5);
        let (fires, ticks, _) = run_to_end(&mut j);
        assert_eq!(fires, 25);
        assert_eq!(ticks, 100);
    }

    #[test]
    fn test_zero_duration_never_fires() {
        let mut j = job(ReliefKind::Pee, EmissionProfile::pee(0.5), 0);
        assert_eq!(
            j.advance(true),
            JobTick::Terminate(FinishReason::BudgetExhausted)
        );
        assert_eq!(j.fired, 0);
    }

    #[test]
    fn test_huge_duration_saturates_budget() {
        let mut j = job(ReliefKind::Pee, EmissionProfile::pee(0.5), i64::MAX);
        assert_eq!(j.remaining, i64::MAX);
        assert_eq!(j.advance(true), JobTick::Fire);

        let j = job(ReliefKind::Poo, EmissionProfile::poo(), i64::from(i32::MAX));
        assert_eq!(j.remaining, i64::from(i32::MAX) * 20);
    }

    #[test]
    fn test_first_tick_fires_then_waits_interval() {
        let mut j = job(ReliefKind::Poo, EmissionProfile::poo(), 5);
        assert_eq!(j.advance(true), JobTick::Fire);
        assert_eq!(j.advance(true), JobTick::Idle);
        assert_eq!(j.advance(true), JobTick::Idle);
        assert_eq!(j.advance(true), JobTick::Idle);
        assert_eq!(j.advance(true), JobTick::Fire);
    }

    #[test]
    fn test_unavailable_actor_checked_only_on_firing_ticks() {
        let mut j = job(ReliefKind::Pee, EmissionProfile::pee(0.5), 5);
        assert_eq!(j.advance(true), JobTick::Fire);
        // Actor leaves on an idle tick: nothing happens yet.
        assert_eq!(j.advance(false), JobTick::Idle);
        assert_eq!(
            j.advance(false),
            JobTick::Terminate(FinishReason::ActorUnavailable)
        );
        assert_eq!(j.state, JobState::Terminated);
        assert_eq!(j.advance(true), JobTick::Done);
        assert_eq!(j.fired, 1);
    }

    #[test]
    fn test_pee_geometry_in_front() {
        let p = EmissionProfile::pee(0.5);
        let (spawn, vel) = p.spawn_geometry(Vec3::new(10.0, 64.0, -3.0), Vec3::new(0.0, 0.0, 2.0));
        assert!(vec_approx_eq(spawn, Vec3::new(10.0, 64.6, -2.5)));
        assert!(vec_approx_eq(vel, Vec3::new(0.0, 0.0, 0.5)));
    }

    #[test]
    fn test_poo_geometry_behind_and_falling() {
        let p = EmissionProfile::poo();
        let (spawn, vel) = p.spawn_geometry(Vec3::new(0.0, 70.0, 0.0), Vec3::new(1.0, 0.0, 0.0));
        assert!(vec_approx_eq(spawn, Vec3::new(-0.8, 70.5, 0.0)));
        assert!(vec_approx_eq(vel, Vec3::new(0.0, -0.2, 0.0)));
    }

    #[test]
    fn test_geometry_with_zero_facing() {
        let p = EmissionProfile::pee(0.5);
        let (spawn, vel) = p.spawn_geometry(Vec3::ZERO, Vec3::ZERO);
        assert!(vec_approx_eq(spawn, Vec3::new(0.0, 0.6, 0.0)));
        assert_eq!(vel, Vec3::ZERO);
    }
}
