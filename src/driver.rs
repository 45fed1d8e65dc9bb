//! Frame cadence and environment configuration for the binary.

use std::path::PathBuf;
use std::time::{SystemTime, UNIX_EPOCH};

use tracing::warn;

use crate::core::TopRowPolicy;
use crate::engine::{EngineConfig, RotationMode};
use crate::types::GRAVITY_FRAMES;

pub const ENV_SEED: &str = "TETRIS_SEED";
pub const ENV_GRAVITY_FRAMES: &str = "TETRIS_GRAVITY_FRAMES";
pub const ENV_TOP_ROW: &str = "TETRIS_TOP_ROW";
pub const ENV_ROTATION: &str = "TETRIS_ROTATION";
pub const ENV_LOG_FILE: &str = "TETRIS_LOG_FILE";
/// `EnvFilter` directives for the log file.
pub const ENV_LOG: &str = "TETRIS_LOG";

/// Counts frames and fires once every `period` frames.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GravityClock {
    period: u32,
    frames: u32,
}

impl GravityClock {
    /// `period` is clamped to at least one frame.
    pub fn new(period: u32) -> Self {
        Self {
            period: period.max(1),
            frames: 0,
        }
    }

    pub fn period(&self) -> u32 {
        self.period
    }

    /// Count one frame. Returns true when a gravity step is due.
    pub fn advance(&mut self) -> bool {
        self.frames += 1;
        if self.frames >= self.period {
            self.frames = 0;
            true
        } else {
            false
        }
    }

    pub fn reset(&mut self) {
        self.frames = 0;
    }
}

impl Default for GravityClock {
    fn default() -> Self {
        Self::new(GRAVITY_FRAMES)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DriverConfig {
    pub seed: u32,
    pub gravity_frames: u32,
    pub engine: EngineConfig,
    pub log_file: Option<PathBuf>,
}

impl DriverConfig {
    /// Read the `TETRIS_*` environment variables.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build a config from any key lookup. Invalid values are logged and
    /// replaced by defaults.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let seed = match lookup(ENV_SEED) {
            Some(raw) => raw.trim().parse().unwrap_or_else(|_| {
                warn!(key = ENV_SEED, value = %raw, "invalid seed, using clock");
                clock_seed()
            }),
            None => clock_seed(),
        };

        let gravity_frames = match lookup(ENV_GRAVITY_FRAMES) {
            Some(raw) => match raw.trim().parse::<u32>() {
                Ok(n) if n >= 1 => n,
                _ => {
                    warn!(key = ENV_GRAVITY_FRAMES, value = %raw, "invalid gravity cadence");
                    GRAVITY_FRAMES
                }
            },
            None => GRAVITY_FRAMES,
        };

        let mut engine = EngineConfig::default();
        if let Some(raw) = lookup(ENV_TOP_ROW) {
            match TopRowPolicy::from_str(&raw) {
                Some(policy) => engine = engine.with_top_row(policy),
                None => warn!(key = ENV_TOP_ROW, value = %raw, "unknown top row policy"),
            }
        }
        if let Some(raw) = lookup(ENV_ROTATION) {
            match RotationMode::from_str(&raw) {
                Some(mode) => engine = engine.with_rotation(mode),
                None => warn!(key = ENV_ROTATION, value = %raw, "unknown rotation mode"),
            }
        }

        let log_file = parse_log_file(lookup(ENV_LOG_FILE));

        Self {
            seed,
            gravity_frames,
            engine,
            log_file,
        }
    }

    pub fn gravity_clock(&self) -> GravityClock {
        GravityClock::new(self.gravity_frames)
    }
}

/// `TETRIS_LOG_FILE`, ignoring blank values.
pub fn log_file_from_env() -> Option<PathBuf> {
    parse_log_file(std::env::var(ENV_LOG_FILE).ok())
}

fn parse_log_file(raw: Option<String>) -> Option<PathBuf> {
    raw.filter(|path| !path.trim().is_empty()).map(PathBuf::from)
}

fn clock_seed() -> u32 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos() as u32)
        .unwrap_or(1)
}
