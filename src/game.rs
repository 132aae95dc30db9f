//! World and schedule wiring.
//!
//! A host embeds the feature set by:
//!
//! 1. Loading a [`ReliefConfig`] and calling [`enable`] with its material table
//!    and version string. An error leaves the feature set disabled.
//! 2. Calling [`setup_world`] once, which inserts every resource and observer
//!    and returns a [`CommandSubmitter`] for its command threads.
//! 3. Calling [`run_tick`] once per host tick with the schedule from
//!    [`build_schedule`], then draining [`drain_chat`] and
//!    [`drain_interaction_verdicts`].

use bevy_ecs::observer::Observer;
use bevy_ecs::prelude::*;
use log::{error, info};

use crate::components::actor::Actor;
use crate::components::facing::Facing;
use crate::components::worldposition::WorldPosition;
use crate::error::ConfigError;
use crate::events::command::ChatMessage;
use crate::events::emission::observe_emission_finished;
use crate::events::interaction::{InteractionCancelled, observe_item_merge, observe_item_pickup};
use crate::math::Vec3;
use crate::resources::chatformat::detect_color_support;
use crate::resources::clock::GameClock;
use crate::resources::commandbridge::{CommandSubmitter, setup_command_bridge};
use crate::resources::cooldowns::CooldownGate;
use crate::resources::materials::MaterialRegistry;
use crate::resources::reliefconfig::{ReliefConfig, ReliefSettings};
use crate::resources::stats::ReliefStats;
use crate::resources::tickclock::{TickClock, TickRate};
use crate::systems::command::relief_command_system;
use crate::systems::cooldowns::prune_cooldowns_system;
use crate::systems::emission::emission_system;
use crate::systems::time::advance_tick;
use crate::systems::ttl::ttl_system;

/// Validate `config` for the host and log every problem the way operators expect.
pub fn enable(
    config: &ReliefConfig,
    registry: &MaterialRegistry,
    host_version: &str,
) -> Result<ReliefSettings, ConfigError> {
    let support = detect_color_support(host_version);
    let result = config.validate(registry, support, host_version);
    match &result {
        Ok(_) => info!(
            "Poo and Pee enabled on host {} ({:?} colors)",
            host_version, support
        ),
        Err(e) => {
            error!("{}", e);
            match e {
                ConfigError::HexColorsUnsupported(_) => {
                    error!("Please use standard color codes (&e, &c, etc.) for your server version.");
                    error!("Hex colors are only supported on Minecraft 1.16+");
                }
                ConfigError::MissingMaterial { .. } | ConfigError::UnknownMaterial { .. } => {
                    error!("Please check your config file and set valid materials for your server version.");
                }
                _ => {}
            }
            error!("Failed to initialize. All commands will stay disabled.");
        }
    }
    result
}

/// Insert resources and observers. `settings == None` runs the world disabled.
pub fn setup_world(
    world: &mut World,
    registry: MaterialRegistry,
    settings: Option<ReliefSettings>,
    clock: GameClock,
    tick_rate: TickRate,
) -> CommandSubmitter {
    world.insert_resource(TickClock::default());
    world.insert_resource(tick_rate);
    world.insert_resource(clock);
    world.insert_resource(CooldownGate::new());
    world.insert_resource(registry);
    world.insert_resource(ReliefStats::default());
    world.insert_resource(Messages::<InteractionCancelled>::default());
    if let Some(settings) = settings {
        world.insert_resource(settings);
    }
    let submitter = setup_command_bridge(world);

    world.spawn(Observer::new(observe_emission_finished));
    world.spawn(Observer::new(observe_item_pickup));
    world.spawn(Observer::new(observe_item_merge));
    // Ensure the observers are registered before any system may trigger events.
    world.flush();

    submitter
}

/// The per-tick schedule. Order matters: lifetimes expire before new items spawn.
pub fn build_schedule() -> Schedule {
    let mut update = Schedule::default();
    update.add_systems(
        (
            ttl_system,
            relief_command_system,
            emission_system,
            prune_cooldowns_system,
        )
            .chain(),
    );
    update
}

/// Advance the tick counter and run one tick. Returns the tick just processed.
pub fn run_tick(world: &mut World, schedule: &mut Schedule) -> u64 {
    let tick = advance_tick(world);
    schedule.run(world);
    world.clear_trackers();
    tick
}

/// Spawn an online actor.
pub fn spawn_actor(world: &mut World, actor: Actor, position: Vec3, facing: Facing) -> Entity {
    world
        .spawn((actor, WorldPosition { pos: position }, facing))
        .id()
}

/// Take all replies written since the last drain.
pub fn drain_chat(world: &mut World) -> Vec<ChatMessage> {
    world
        .resource_mut::<Messages<ChatMessage>>()
        .drain()
        .collect()
}

/// Take all pickup/merge cancellations written since the last drain.
pub fn drain_interaction_verdicts(world: &mut World) -> Vec<InteractionCancelled> {
    world
        .resource_mut::<Messages<InteractionCancelled>>()
        .drain()
        .collect()
}
