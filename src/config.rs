//! Headless run configuration, loaded from a JSON file.

use anyhow::{Context, Result};
use serde::Deserialize;
use sim_core::InputState;
use std::fs;
use std::path::{Path, PathBuf};

fn default_ticks() -> u64 {
    250
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RunConfig {
    /// Path to the memory snapshot (.sna).
    pub snapshot: PathBuf,
    /// Ticks to simulate.
    #[serde(default = "default_ticks")]
    pub ticks: u64,
    /// Room to start in (0..48); defaults to the spawn room.
    #[serde(default)]
    pub start_room: Option<u8>,
    /// Start pixel `[x, y]`; defaults to the spawn position.
    #[serde(default)]
    pub start_pos: Option<[i32; 2]>,
    /// Scripted input, one entry per tick from the letters `lrjd`
    /// (left/right/jump/down). The last entry repeats; empty means idle.
    #[serde(default)]
    pub script: Vec<String>,
}

impl RunConfig {
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = fs::read_to_string(path)
            .with_context(|| format!("reading config {}", path.display()))?;
        let cfg: Self = serde_json::from_str(&text)
            .with_context(|| format!("parsing config {}", path.display()))?;
        for entry in &cfg.script {
            parse_input(entry).with_context(|| format!("script entry {entry:?}"))?;
        }
        if let Some(room) = cfg.start_room {
            if room >= 48 {
                anyhow::bail!("start_room {room} out of range");
            }
        }
        Ok(cfg)
    }

    /// Input for tick `n`; holds the last scripted entry once the script
    /// runs out.
    pub fn input_at(&self, tick: u64) -> InputState {
        let Some(entry) = self
            .script
            .get((tick as usize).min(self.script.len().saturating_sub(1)))
        else {
            return InputState::IDLE;
        };
        // validated at load time
        parse_input(entry).unwrap_or(InputState::IDLE)
    }
}

fn parse_input(entry: &str) -> Result<InputState> {
    let mut input = InputState::IDLE;
    for c in entry.chars() {
        match c {
            'l' => input.left = true,
            'r' => input.right = true,
            'j' => input.jump = true,
            'd' => input.down = true,
            other => anyhow::bail!("unknown input letter {other:?}"),
        }
    }
    Ok(input)
}
