/// External configuration loader.
///
/// Reads `config.toml` from the executable's directory (or CWD).
/// Falls back to sensible defaults if the file is missing or incomplete.

use serde::Deserialize;
use std::path::PathBuf;

use crate::domain::entity::AvatarStyle;

// ── Public Config Struct ──

#[derive(Clone, Debug)]
pub struct GameConfig {
    pub grid: GridConfig,
    pub pace: PaceConfig,
    pub lamp: LampConfig,
    pub avatar: AvatarStyle,
}

#[derive(Clone, Debug)]
pub struct GridConfig {
    pub width: i32,
    pub height: i32,
}

#[derive(Clone, Debug)]
pub struct PaceConfig {
    /// Milliseconds between warden advances.
    pub warden_interval_ms: u64,
    /// Idle sleep between input polls.
    pub frame_sleep_ms: u64,
}

#[derive(Clone, Debug)]
pub struct LampConfig {
    pub enabled: bool,
    pub radius: i32,
}

// ── TOML Schema (with serde defaults) ──

#[derive(Deserialize, Debug, Default)]
struct TomlConfig {
    #[serde(default)]
    grid: TomlGrid,
    #[serde(default)]
    pace: TomlPace,
    #[serde(default)]
    lamp: TomlLamp,
    #[serde(default)]
    session: TomlSession,
}

#[derive(Deserialize, Debug)]
struct TomlGrid {
    #[serde(default = "default_width")]
    width: i32,
    #[serde(default = "default_height")]
    height: i32,
}

#[derive(Deserialize, Debug)]
struct TomlPace {
    #[serde(default = "default_warden_interval")]
    warden_interval_ms: u64,
    #[serde(default = "default_frame_sleep")]
    frame_sleep_ms: u64,
}

#[derive(Deserialize, Debug)]
struct TomlLamp {
    #[serde(default = "default_lamp_enabled")]
    enabled: bool,
    #[serde(default = "default_lamp_radius")]
    radius: i32,
}

#[derive(Deserialize, Debug)]
struct TomlSession {
    #[serde(default = "default_avatar")]
    avatar: String,
}

// ── Defaults ──

fn default_width() -> i32 { 80 }
fn default_height() -> i32 { 40 }
fn default_warden_interval() -> u64 { 300 }
fn default_frame_sleep() -> u64 { 10 }
fn default_lamp_enabled() -> bool { true }
fn default_lamp_radius() -> i32 { 6 }
fn default_avatar() -> String { "classic".into() }

/// Smallest grid the generator can meaningfully populate. Anything under
/// this can fail to seat a warden and an exit.
const MIN_GRID_WIDTH: i32 = 24;
const MIN_GRID_HEIGHT: i32 = 16;

impl Default for TomlGrid {
    fn default() -> Self {
        TomlGrid { width: default_width(), height: default_height() }
    }
}

impl Default for TomlPace {
    fn default() -> Self {
        TomlPace {
            warden_interval_ms: default_warden_interval(),
            frame_sleep_ms: default_frame_sleep(),
        }
    }
}

impl Default for TomlLamp {
    fn default() -> Self {
        TomlLamp { enabled: default_lamp_enabled(), radius: default_lamp_radius() }
    }
}

impl Default for TomlSession {
    fn default() -> Self {
        TomlSession { avatar: default_avatar() }
    }
}

// ── Loading ──

impl GameConfig {
    /// Load config from `config.toml`.
    /// Search order: (1) exe directory, (2) current working directory.
    /// Missing file or missing keys gracefully fall back to defaults.
    pub fn load() -> Self {
        let toml_cfg = load_toml(&candidate_dirs());
        GameConfig::from_toml(toml_cfg)
    }

    fn from_toml(toml_cfg: TomlConfig) -> Self {
        let mut width = toml_cfg.grid.width;
        let mut height = toml_cfg.grid.height;
        if width < MIN_GRID_WIDTH || height < MIN_GRID_HEIGHT {
            eprintln!(
                "Warning: grid {}x{} is below the playable minimum, using {}x{}",
                width, height, MIN_GRID_WIDTH, MIN_GRID_HEIGHT
            );
            width = width.max(MIN_GRID_WIDTH);
            height = height.max(MIN_GRID_HEIGHT);
        }

        let avatar = match toml_cfg.session.avatar.as_str() {
            "alt" => AvatarStyle::Alt,
            "classic" => AvatarStyle::Classic,
            other => {
                eprintln!("Warning: unknown avatar {:?}, using \"classic\"", other);
                AvatarStyle::Classic
            }
        };

        GameConfig {
            grid: GridConfig { width, height },
            pace: PaceConfig {
                warden_interval_ms: toml_cfg.pace.warden_interval_ms.max(1),
                frame_sleep_ms: toml_cfg.pace.frame_sleep_ms,
            },
            lamp: LampConfig {
                enabled: toml_cfg.lamp.enabled,
                radius: toml_cfg.lamp.radius.max(1),
            },
            avatar,
        }
    }
}

/// Candidate directories to search: exe dir + CWD (deduplicated).
fn candidate_dirs() -> Vec<PathBuf> {
    let mut dirs = vec![];

    if let Ok(exe) = std::env::current_exe() {
        let resolved = exe.canonicalize().unwrap_or(exe);
        if let Some(parent) = resolved.parent() {
            dirs.push(parent.to_path_buf());
        }
    }

    if let Ok(cwd) = std::env::current_dir() {
        if !dirs.iter().any(|d| d == &cwd) {
            dirs.push(cwd);
        }
    }

    if dirs.is_empty() {
        dirs.push(PathBuf::from("."));
    }

    dirs
}

/// Search for config.toml in candidate directories.
fn load_toml(search_dirs: &[PathBuf]) -> TomlConfig {
    for dir in search_dirs {
        let path = dir.join("config.toml");
        if path.exists() {
            match std::fs::read_to_string(&path) {
                Ok(text) => match toml::from_str::<TomlConfig>(&text) {
                    Ok(cfg) => return cfg,
                    Err(e) => {
                        eprintln!("Warning: config.toml parse error: {e}");
                        eprintln!("Using default settings.");
                        return TomlConfig::default();
                    }
                },
                Err(e) => {
                    eprintln!("Warning: could not read {}: {e}", path.display());
                }
            }
        }
    }
    TomlConfig::default()
}
