//! Poo and Pee headless host simulator.
//!
//! Drives the library the way a game server would:
//! - **bevy_ecs** world holding actors, emission jobs and dropped items
//! - a fixed-rate tick loop (20 ticks per second by default)
//! - commands submitted from a separate thread through the command bridge
//!
//! # Main Loop
//!
//! 1. Load (or create) `config.ini` and validate it for the host version
//! 2. Set up the world and spawn a few actors facing random directions
//! 3. Each tick:
//!    - Submit scheduled commands, turn the actors a little
//!    - Run the schedule (TTL, commands, emission, cooldown pruning)
//!    - Deliver chat replies to the log
//! 4. Print statistics
//!
//! # Running
//!
//! ```sh
//! RUST_LOG=debug cargo run -- --actors 3 --ticks 400 --repeat-every 100 --report
//! ```

use bevy_ecs::prelude::*;
use clap::Parser;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Instant;

use pooandpee::components::actor::{Actor, ActorId};
use pooandpee::components::facing::Facing;
use pooandpee::events::command::{CommandRequest, CommandSender};
use pooandpee::game;
use pooandpee::kind::ReliefKind;
use pooandpee::math::Vec3;
use pooandpee::resources::clock::{GameClock, ManualClock};
use pooandpee::resources::commandbridge::CommandSubmitter;
use pooandpee::resources::materials::MaterialRegistry;
use pooandpee::resources::reliefconfig::{DEFAULT_CONFIG_PATH, ReliefConfig};
use pooandpee::resources::stats::ReliefStats;
use pooandpee::resources::tickclock::TickRate;

/// Poo and Pee host simulator
#[derive(Parser)]
#[command(version, about = "Runs the pee/poo commands against a simulated game server.")]
struct Cli {
    /// Path to the INI configuration. A default one is written if it does not exist.
    #[arg(long, default_value = DEFAULT_CONFIG_PATH)]
    config: PathBuf,

    /// Write the default configuration and exit.
    /// Optionally provide a path (default: ./config.ini).
    #[arg(long, value_name = "PATH")]
    create_config: Option<Option<PathBuf>>,

    /// Version string reported by the simulated host.
    #[arg(long, default_value = "1.20.4-R0.1-SNAPSHOT")]
    host_version: String,

    /// Number of actors to spawn.
    #[arg(long, default_value_t = 2)]
    actors: usize,

    /// Number of ticks to simulate.
    #[arg(long, default_value_t = 200)]
    ticks: u64,

    /// Host tick rate.
    #[arg(long, default_value_t = 20)]
    tps: u32,

    /// Pace ticks against the wall clock and use real time for cooldowns.
    #[arg(long)]
    realtime: bool,

    /// Commands every actor issues, comma separated.
    #[arg(long, value_delimiter = ',', default_value = "pee,poo")]
    commands: Vec<ReliefKind>,

    /// Issue the commands again every N ticks (0 = only at the start).
    #[arg(long, default_value_t = 0)]
    repeat_every: u64,

    /// Also issue the commands from the console.
    #[arg(long)]
    console: bool,

    /// Take the first actor offline at this tick.
    #[arg(long, value_name = "TICK")]
    disconnect_at: Option<u64>,

    /// Print final statistics as JSON.
    #[arg(long)]
    report: bool,
}

/// Submit requests from a separate thread, as a host command executor would.
fn dispatch(submitter: &CommandSubmitter, requests: Vec<CommandRequest>) {
    let submitter = submitter.clone();
    let worker = std::thread::spawn(move || {
        for request in requests {
            if !submitter.submit(request) {
                log::warn!("Command bridge closed, dropping {:?}", request);
            }
        }
    });
    if worker.join().is_err() {
        log::error!("Command dispatcher thread panicked");
    }
}

fn sender_name(world: &World, sender: CommandSender) -> String {
    match sender {
        CommandSender::Console => "console".to_string(),
        CommandSender::Entity(entity) => world
            .get::<Actor>(entity)
            .map(|actor| actor.name.clone())
            .unwrap_or_else(|| format!("{:?}", entity)),
    }
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();

    // Early-exit: write the default config and quit
    if let Some(maybe_path) = cli.create_config {
        let path = maybe_path.unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_PATH));
        if let Err(e) = ReliefConfig::write_default(&path) {
            eprintln!("Error: {e}");
            std::process::exit(1);
        }
        println!("Default config written to {}", path.display());
        return;
    }

    log::info!(
        "Simulating host {} with {} actors for {} ticks at {} tps",
        cli.host_version,
        cli.actors,
        cli.ticks,
        cli.tps
    );

    // --------------- Configuration ---------------
    if !cli.config.exists() {
        if let Err(e) = ReliefConfig::write_default(&cli.config) {
            log::error!("{}", e);
        }
    }
    let registry = MaterialRegistry::with_defaults();
    let mut config = ReliefConfig::with_path(&cli.config);
    let settings = match config.load_from_file() {
        Ok(()) => game::enable(&config, &registry, &cli.host_version).ok(),
        Err(e) => {
            log::error!("{}", e);
            None
        }
    };

    // --------------- ECS world + resources ---------------
    let tick_rate = TickRate::new(cli.tps);
    let tick_millis = tick_rate.tick_duration().as_millis() as i64;
    let manual_clock = Arc::new(ManualClock::new(chrono::Utc::now().timestamp_millis()));
    let clock = if cli.realtime {
        GameClock::default()
    } else {
        GameClock::new(manual_clock.clone())
    };

    let mut world = World::new();
    let submitter = game::setup_world(&mut world, registry, settings, clock, tick_rate);

    let mut rng = fastrand::Rng::new();
    let mut yaws: Vec<f32> = (0..cli.actors).map(|_| rng.f32() * 360.0).collect();
    let actors: Vec<Entity> = yaws
        .iter()
        .enumerate()
        .map(|(i, &yaw)| {
            game::spawn_actor(
                &mut world,
                Actor::new(ActorId::new_random(), format!("actor{}", i)),
                Vec3::new(i as f32 * 4.0, 64.0, 0.0),
                Facing::from_yaw_pitch(yaw, 0.0),
            )
        })
        .collect();

    let mut schedule = game::build_schedule();

    // --------------- Main loop ---------------
    for step in 0..cli.ticks {
        let started = Instant::now();

        if step == 0 || (cli.repeat_every > 0 && step % cli.repeat_every == 0) {
            let mut requests = Vec::new();
            for &kind in &cli.commands {
                for &actor in &actors {
                    requests.push(CommandRequest::new(CommandSender::Entity(actor), kind));
                }
                if cli.console {
                    requests.push(CommandRequest::new(CommandSender::Console, kind));
                }
            }
            dispatch(&submitter, requests);
        }

        if cli.disconnect_at == Some(step) {
            if let Some(&first) = actors.first() {
                if let Some(mut actor) = world.get_mut::<Actor>(first) {
                    actor.online = false;
                    log::info!("{} went offline", actor.name);
                }
            }
        }

        // Actors look around while they are busy.
        for (entity, yaw) in actors.iter().zip(yaws.iter_mut()) {
            *yaw += rng.f32() * 20.0 - 10.0;
            if let Some(mut facing) = world.get_mut::<Facing>(*entity) {
                *facing = Facing::from_yaw_pitch(*yaw, 0.0);
            }
        }

        let tick = game::run_tick(&mut world, &mut schedule);

        for message in game::drain_chat(&mut world) {
            log::info!(
                "[tick {}] to {}: {}",
                tick,
                sender_name(&world, message.recipient),
                message.text
            );
        }
        for verdict in game::drain_interaction_verdicts(&mut world) {
            log::debug!("[tick {}] cancelled {:?}", tick, verdict);
        }

        if cli.realtime {
            if let Some(rest) = tick_rate.tick_duration().checked_sub(started.elapsed()) {
                std::thread::sleep(rest);
            }
        } else {
            manual_clock.advance(tick_millis);
        }
    }

    let stats = world.resource::<ReliefStats>();
    log::info!(
        "Done: {} activations, {} items spawned, {} removed, {} jobs finished",
        stats.activations,
        stats.items_spawned,
        stats.items_removed,
        stats.jobs_finished
    );
    if cli.report {
        match serde_json::to_string_pretty(stats) {
            Ok(json) => println!("{}", json),
            Err(e) => {
                eprintln!("Error serializing report: {e}");
                std::process::exit(1);
            }
        }
    }
}
