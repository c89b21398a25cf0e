use std::fs;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::game::Grid;

const CONFIG_FILE: &str = "snake_config.json";

/// Optional tuning knobs, read once at startup from `snake_config.json` in
/// the working directory. Anything missing, malformed or out of range falls
/// back to the defaults; the game never writes the file.
#[derive(Clone, Copy, PartialEq, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub play_width: u32,
    pub play_height: u32,
    pub cell_size: u32,
    pub tick_ms: u64,
    pub volume: f32,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            play_width: 600,
            play_height: 400,
            cell_size: 20,
            tick_ms: 150,
            volume: 0.7,
        }
    }
}

impl Config {
    pub fn load() -> Self {
        match fs::read_to_string(CONFIG_FILE) {
            Ok(contents) => Self::from_json(&contents),
            Err(_) => Config::default(),
        }
    }

    fn from_json(contents: &str) -> Self {
        let config: Config = match serde_json::from_str(contents) {
            Ok(config) => config,
            Err(e) => {
                eprintln!("Ignoring malformed {}: {}", CONFIG_FILE, e);
                return Config::default();
            }
        };
        config.sanitized()
    }

    fn sanitized(self) -> Self {
        let usable_grid = self.cell_size >= 4
            && self.play_width / self.cell_size >= 8
            && self.play_height / self.cell_size >= 8;
        if usable_grid && self.tick_ms >= 30 && (0.0..=1.0).contains(&self.volume) {
            self
        } else {
            eprintln!("Ignoring out-of-range values in {}", CONFIG_FILE);
            Config::default()
        }
    }

    pub fn grid(&self) -> Grid {
        Grid {
            cols: (self.play_width / self.cell_size) as i32,
            rows: (self.play_height / self.cell_size) as i32,
        }
    }

    pub fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.tick_ms)
    }
}
