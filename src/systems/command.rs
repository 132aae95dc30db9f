//! Command handling.
//!
//! [`relief_command_system`] drains the
//! [`CommandBridge`](crate::resources::commandbridge::CommandBridge) each tick
//! and answers every request with exactly one [`ChatMessage`].
//!
//! # Checks, in order
//!
//! 1. Feature set disabled (no [`ReliefSettings`]) → fixed "not configured" reply
//! 2. Sender is not an actor → `only-players`
//! 3. With `overlap = reject` and a job of that kind still running → `cooldown`
//!    if the actor is also cooling down, otherwise `busy`
//! 4. Cooldown gate denies → `cooldown` with `%time%` filled in
//! 5. Otherwise the activation message is sent and an
//!    [`EmissionJob`] entity is spawned

use bevy_ecs::prelude::*;
use log::{debug, info};
use rustc_hash::FxHashSet;

use crate::components::actor::{Actor, ActorId};
use crate::components::emissionjob::EmissionJob;
use crate::events::command::{ChatMessage, CommandSender};
use crate::kind::ReliefKind;
use crate::resources::chatformat::fill_time;
use crate::resources::clock::GameClock;
use crate::resources::commandbridge::CommandBridge;
use crate::resources::cooldowns::{CooldownGate, CooldownOutcome};
use crate::resources::reliefconfig::{OverlapPolicy, ReliefSettings};
use crate::resources::stats::ReliefStats;
use crate::resources::tickclock::TickRate;

/// Reply when the configuration failed to load or validate.
pub const NOT_CONFIGURED_MESSAGE: &str =
    "\u{00A7}cThis plugin is not properly configured. Please check the server logs.";

/// Processes all pending command requests.
#[allow(clippy::too_many_arguments)]
pub fn relief_command_system(
    bridge: Res<CommandBridge>,
    settings: Option<Res<ReliefSettings>>,
    gate: Res<CooldownGate>,
    clock: Res<GameClock>,
    tick_rate: Res<TickRate>,
    actors: Query<&Actor>,
    jobs: Query<&EmissionJob>,
    mut stats: ResMut<ReliefStats>,
    mut chat: MessageWriter<ChatMessage>,
    mut commands: Commands,
) {
    // Jobs spawned earlier in this tick are not queryable yet.
    let mut started: FxHashSet<(ActorId, ReliefKind)> = FxHashSet::default();

    for request in bridge.rx_cmd.try_iter() {
        let reply_to = request.sender;
        let mut reply = |text: String| {
            chat.write(ChatMessage {
                recipient: reply_to,
                text,
            });
        };

        let Some(settings) = settings.as_deref() else {
            stats.disabled_rejections += 1;
            reply(NOT_CONFIGURED_MESSAGE.to_string());
            continue;
        };
        let formatter = settings.formatter;

        let actor_entity = match request.sender {
            CommandSender::Entity(entity) => Some(entity),
            CommandSender::Console => None,
        };
        let Some((actor_entity, actor)) =
            actor_entity.and_then(|entity| actors.get(entity).ok().map(|actor| (entity, actor)))
        else {
            stats.non_actor_rejections += 1;
            reply(formatter.format(&settings.only_players_message));
            continue;
        };

        let kind = request.kind;
        let kind_settings = settings.kind(kind);
        let now = clock.now_millis();

        if settings.overlap == OverlapPolicy::Reject {
            let busy = started.contains(&(actor.id, kind))
                || jobs
                    .iter()
                    .any(|job| job.is_running() && job.actor == actor.id && job.kind == kind);
            if busy {
                match gate.remaining(actor.id, kind, now, kind_settings.cooldown_seconds) {
                    Some(left) => {
                        stats.cooldown_denials += 1;
                        reply(formatter.format(&fill_time(&settings.cooldown_message, left)));
                    }
                    None => {
                        stats.busy_rejections += 1;
                        reply(formatter.format(&settings.busy_message));
                    }
                }
                debug!("{} rejected for {}: job still running", kind, actor.name);
                continue;
            }
        }

        match gate.try_activate(actor.id, kind, now, kind_settings.cooldown_seconds) {
            CooldownOutcome::Denied { seconds_left } => {
                stats.cooldown_denials += 1;
                debug!(
                    "{} denied for {}: {}s of cooldown left",
                    kind, actor.name, seconds_left
                );
                reply(formatter.format(&fill_time(&settings.cooldown_message, seconds_left)));
            }
            CooldownOutcome::Allowed => {
                stats.activations += 1;
                started.insert((actor.id, kind));
                info!(
                    "{} activated by {} for {}s",
                    kind, actor.name, kind_settings.duration_seconds
                );
                reply(formatter.format(&kind_settings.activation_message));
                commands.spawn(EmissionJob::new(
                    actor_entity,
                    actor.id,
                    kind,
                    kind_settings.material.clone(),
                    kind_settings.profile,
                    kind_settings.duration_seconds,
                    tick_rate.ticks_per_second,
                ));
            }
        }
    }
}
