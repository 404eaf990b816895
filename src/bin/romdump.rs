//! Snapshot inspector: hex-dump address ranges and pretty-print decoded
//! tiles and rooms straight from a .sna image.

use anyhow::Result;
use clap::{Parser, Subcommand};
use rom_core::{Snapshot, TileTable};
use std::path::PathBuf;
use world_core::rooms::decode_room;

#[derive(Parser)]
#[command(name = "romdump", about = "Inspect a memory snapshot")]
struct Cli {
    /// Path to the .sna snapshot.
    snapshot: PathBuf,
    #[command(subcommand)]
    cmd: Cmd,
}

#[derive(Subcommand)]
enum Cmd {
    /// Hex-dump a range of game memory.
    Dump {
        /// Start address (decimal or 0x-prefixed hex).
        #[arg(value_parser = parse_addr)]
        addr: u16,
        /// Bytes to dump.
        #[arg(default_value_t = 64)]
        len: usize,
    },
    /// Decode a tile and print its bitmap.
    Tile { id: u8 },
    /// Decode a room and print its block map.
    Room { index: u8 },
}

fn parse_addr(s: &str) -> Result<u16, String> {
    let parsed = match s.strip_prefix("0x").or_else(|| s.strip_prefix("0X")) {
        Some(hex) => u16::from_str_radix(hex, 16),
        None => s.parse(),
    };
    parsed.map_err(|e| format!("bad address {s:?}: {e}"))
}

fn main() {
    let _ = env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn"))
        .format_timestamp(None)
        .try_init();
    let cli = Cli::parse();
    if let Err(e) = run(cli) {
        eprintln!("error: {e:#}");
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<()> {
    let snap = Snapshot::load(&cli.snapshot)?;
    match cli.cmd {
        Cmd::Dump { addr, len } => dump(&snap, addr, len),
        Cmd::Tile { id } => tile(&snap, id),
        Cmd::Room { index } => room(&snap, index),
    }
}

fn dump(snap: &Snapshot, addr: u16, len: usize) -> Result<()> {
    let bytes = snap.copy(addr, len)?;
    for (i, chunk) in bytes.chunks(16).enumerate() {
        let hex: Vec<String> = chunk.iter().map(|b| format!("{b:02x}")).collect();
        println!("{:04x}  {}", addr as usize + i * 16, hex.join(" "));
    }
    Ok(())
}

fn tile(snap: &Snapshot, id: u8) -> Result<()> {
    let mut tiles = TileTable::default();
    let def = tiles.resolve(snap, id)?;
    println!("tile {id}: {}x{} blocks", def.width, def.height);
    // rows stack upward; print top row of blocks first
    for row in (0..def.height).rev() {
        for line in 0..8u8 {
            let mut text = String::new();
            for bx in 0..def.width {
                let byte = def.row_byte(bx, row, line);
                for bit in 0..8 {
                    text.push(if byte & (0x80 >> bit) != 0 { '#' } else { '.' });
                }
            }
            println!("{text}");
        }
    }
    for row in 0..def.height {
        for bx in 0..def.width {
            let c = def.color_at(bx, row);
            println!("block ({bx},{row}): ink {} paper {} bright {}", c.ink, c.paper, c.bright);
        }
    }
    Ok(())
}

fn room(snap: &Snapshot, index: u8) -> Result<()> {
    let mut tiles = TileTable::default();
    let (room, monsters) = decode_room(snap, &mut tiles, index)?;
    println!("room {index}: {} monsters", monsters.len());
    println!(
        "{} lasers, {} floaters",
        room.lasers.len(),
        room.floaters.len()
    );
    // one character per block: solid, ink-only, or empty
    for by in 0..24 {
        let mut text = String::new();
        for bx in 0..32 {
            let (x, y) = (bx * 8, by * 8);
            let solid = (0..8).any(|dy| (0..8).any(|dx| room.base.solid_at(x + dx, y + dy)));
            let ink = (0..8).any(|dy| (0..8).any(|dx| room.base.is_ink(x + dx, y + dy)));
            text.push(if solid {
                '#'
            } else if ink {
                ':'
            } else {
                '.'
            });
        }
        println!("{text}");
    }
    Ok(())
}
