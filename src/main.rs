//! Headless runner: load a snapshot, decode the world and simulate a
//! configured number of ticks, logging the avatar's whereabouts once a
//! simulated second.

use anyhow::{Context, Result};
use dynamite::config::RunConfig;
use net_core::{Message, MonsterDeath};
use rom_core::Snapshot;
use sim_core::Sim;

fn main() {
    let default = "info,dynamite=info";
    let _ = env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default))
        .format_timestamp_secs()
        .try_init();

    if let Err(e) = run() {
        eprintln!("error: {e:#}");
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let config_path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "run.json".to_string());
    let cfg = RunConfig::load(&config_path)?;

    let snap = Snapshot::load(&cfg.snapshot)
        .with_context(|| format!("loading snapshot {}", cfg.snapshot.display()))?;
    let mut sim = Sim::new(&snap)?;
    if let Some(room) = cfg.start_room {
        sim.world.move_to_index(room);
    }
    if let Some([x, y]) = cfg.start_pos {
        sim.avatar.pos = glam::IVec2::new(x, y);
    }
    log::info!(
        "world up: starting in room {} at {:?}",
        sim.world.room_index(),
        sim.avatar.pos
    );

    let mut outbound = Vec::new();
    for tick in 0..cfg.ticks {
        sim.input = cfg.input_at(tick);
        for event in sim.step() {
            Message::Death(MonsterDeath {
                room: event.room,
                monster_id: event.monster_id,
                died_at: event.died_at,
            })
            .encode(&mut outbound);
            log::info!(
                "monster {} in room {} died at t={}",
                event.monster_id,
                event.room,
                event.died_at
            );
        }
        if tick % 25 == 24 {
            log::info!(
                "t={}ms room={} pos={:?}",
                sim.time_ms(),
                sim.world.room_index(),
                sim.avatar.pos
            );
        }
    }

    log::info!(
        "run complete: {} ticks, {} outbound bytes queued",
        cfg.ticks,
        outbound.len()
    );
    Ok(())
}
