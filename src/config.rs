use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;
use color_eyre::eyre::{eyre, Result, WrapErr};
use ratatui::style::Color;
use serde::{Deserialize, Deserializer};
use tracing::{debug, info};

// ─── Embedded Default ────────────────────────────────────────────────────
/// Baked into the binary; the base layer under any user file.
const DEFAULT_CONFIG_TOML: &str = include_str!("../default_config.toml");

// ─── CLI Arguments ──────────────────────────────────────────────────────
/// airlink: a keyboard-driven Wi-Fi manager for NetworkManager
///
/// Set AIRLINK_DEBUG=1 to write a debug log to the data directory.
#[derive(Parser, Debug, Clone)]
#[command(name = "airlink", version, about, long_about = None)]
pub struct CliArgs {
    /// Path to a custom config file
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Print the default config to stdout and exit
    #[arg(long)]
    pub print_default_config: bool,
}

// ─── TOML Structs ───────────────────────────────────────────────────────

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub general: GeneralConfig,
    #[serde(default)]
    pub appearance: AppearanceConfig,
    #[serde(default)]
    pub theme: ThemeConfig,
    #[serde(default)]
    pub keys: KeysConfig,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct GeneralConfig {
    pub connect_timeout_secs: u64,
    pub status_clear_secs: u64,
    pub show_hidden: bool,
    pub nmcli_path: String,
    pub cache_enabled: bool,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AppearanceConfig {
    pub nerd_fonts: bool,
    pub fps: u16,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ThemeConfig {
    #[serde(deserialize_with = "deserialize_color")]
    pub fg: Color,
    #[serde(deserialize_with = "deserialize_color")]
    pub fg_dim: Color,
    #[serde(deserialize_with = "deserialize_color")]
    pub accent: Color,
    #[serde(deserialize_with = "deserialize_color")]
    pub border: Color,
    #[serde(deserialize_with = "deserialize_color")]
    pub connected: Color,
    #[serde(deserialize_with = "deserialize_color")]
    pub warning: Color,
    #[serde(deserialize_with = "deserialize_color")]
    pub error: Color,
    #[serde(deserialize_with = "deserialize_color")]
    pub selected_bg: Color,
}

/// Single-character bindings for the rebindable actions
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct KeysConfig {
    #[serde(deserialize_with = "deserialize_key")]
    pub refresh: char,
    #[serde(deserialize_with = "deserialize_key")]
    pub filter: char,
    #[serde(deserialize_with = "deserialize_key")]
    pub toggle_wifi: char,
    #[serde(deserialize_with = "deserialize_key")]
    pub disconnect: char,
    #[serde(deserialize_with = "deserialize_key")]
    pub info: char,
    #[serde(deserialize_with = "deserialize_key")]
    pub toggle_hidden: char,
    #[serde(deserialize_with = "deserialize_key")]
    pub forget: char,
    #[serde(deserialize_with = "deserialize_key")]
    pub profiles: char,
    #[serde(deserialize_with = "deserialize_key")]
    pub hidden_connect: char,
    #[serde(deserialize_with = "deserialize_key")]
    pub help: char,
    #[serde(deserialize_with = "deserialize_key")]
    pub quit: char,
}

// ─── Defaults ───────────────────────────────────────────────────────────

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            connect_timeout_secs: 30,
            status_clear_secs: 3,
            show_hidden: false,
            nmcli_path: "nmcli".into(),
            cache_enabled: true,
        }
    }
}

impl Default for AppearanceConfig {
    fn default() -> Self {
        Self {
            nerd_fonts: true,
            fps: 10,
        }
    }
}

impl Default for ThemeConfig {
    fn default() -> Self {
        Self {
            fg: Color::White,
            fg_dim: Color::DarkGray,
            accent: Color::Cyan,
            border: Color::DarkGray,
            connected: Color::Green,
            warning: Color::Yellow,
            error: Color::Red,
            selected_bg: Color::Rgb(0x2a, 0x2e, 0x3a),
        }
    }
}

impl Default for KeysConfig {
    fn default() -> Self {
        Self {
            refresh: 'r',
            filter: '/',
            toggle_wifi: 't',
            disconnect: 'd',
            info: 'i',
            toggle_hidden: 'u',
            forget: 'f',
            profiles: 'p',
            hidden_connect: 'h',
            help: '?',
            quit: 'q',
        }
    }
}

impl KeysConfig {
    fn all(&self) -> [(&'static str, char); 11] {
        [
            ("refresh", self.refresh),
            ("filter", self.filter),
            ("toggle_wifi", self.toggle_wifi),
            ("disconnect", self.disconnect),
            ("info", self.info),
            ("toggle_hidden", self.toggle_hidden),
            ("forget", self.forget),
            ("profiles", self.profiles),
            ("hidden_connect", self.hidden_connect),
            ("help", self.help),
            ("quit", self.quit),
        ]
    }

    /// Bindings must be distinct and must not shadow list navigation (j k g G).
    fn validate(&self) -> Result<()> {
        let all = self.all();
        for (i, (name, key)) in all.iter().enumerate() {
            if matches!(key, 'j' | 'k' | 'g' | 'G') {
                return Err(eyre!("key '{key}' for '{name}' is reserved for navigation"));
            }
            if let Some((other, _)) = all[i + 1..].iter().find(|(_, k)| k == key) {
                return Err(eyre!("key '{key}' is bound to both '{name}' and '{other}'"));
            }
        }
        Ok(())
    }
}

// ─── Deserializers ──────────────────────────────────────────────────────

fn deserialize_color<'de, D>(deserializer: D) -> std::result::Result<Color, D::Error>
where
    D: Deserializer<'de>,
{
    let s = String::deserialize(deserializer)?;
    parse_color(&s).ok_or_else(|| serde::de::Error::custom(format!("invalid color: \"{s}\"")))
}

fn deserialize_key<'de, D>(deserializer: D) -> std::result::Result<char, D::Error>
where
    D: Deserializer<'de>,
{
    let s = String::deserialize(deserializer)?;
    let mut chars = s.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) if !c.is_whitespace() && !c.is_control() => Ok(c),
        _ => Err(serde::de::Error::custom(format!(
            "key binding must be a single character, got \"{s}\""
        ))),
    }
}

/// Parse a color string into a ratatui Color.
/// Supports: named colors, "reset", "#RRGGBB" hex.
pub fn parse_color(s: &str) -> Option<Color> {
    let s = s.trim().to_lowercase();
    match s.as_str() {
        "reset" | "default" | "transparent" => Some(Color::Reset),
        "black" => Some(Color::Black),
        "red" => Some(Color::Red),
        "green" => Some(Color::Green),
        "yellow" => Some(Color::Yellow),
        "blue" => Some(Color::Blue),
        "magenta" => Some(Color::Magenta),
        "cyan" => Some(Color::Cyan),
        "white" => Some(Color::White),
        "gray" | "grey" => Some(Color::Gray),
        "darkgray" | "darkgrey" | "dark_gray" | "dark_grey" => Some(Color::DarkGray),
        "lightred" | "light_red" => Some(Color::LightRed),
        "lightgreen" | "light_green" => Some(Color::LightGreen),
        "lightyellow" | "light_yellow" => Some(Color::LightYellow),
        "lightblue" | "light_blue" => Some(Color::LightBlue),
        "lightmagenta" | "light_magenta" => Some(Color::LightMagenta),
        "lightcyan" | "light_cyan" => Some(Color::LightCyan),
        hex if hex.starts_with('#') && hex.len() == 7 => {
            let r = u8::from_str_radix(&hex[1..3], 16).ok()?;
            let g = u8::from_str_radix(&hex[3..5], 16).ok()?;
            let b = u8::from_str_radix(&hex[5..7], 16).ok()?;
            Some(Color::Rgb(r, g, b))
        }
        _ => None,
    }
}

// ─── Path Resolution ────────────────────────────────────────────────────

impl Config {
    /// ~/.config/airlink/config.toml
    pub fn config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("airlink")
            .join("config.toml")
    }

    /// ~/.local/share/airlink/
    pub fn log_dir() -> PathBuf {
        dirs::data_local_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("airlink")
    }

    pub fn tick_rate(&self) -> Duration {
        let fps = self.appearance.fps.max(1);
        Duration::from_millis(1000 / fps as u64)
    }

    pub fn connect_timeout(&self) -> Duration {
        Duration::from_secs(self.general.connect_timeout_secs.max(1))
    }

    pub fn status_clear(&self) -> Duration {
        Duration::from_secs(self.general.status_clear_secs.max(1))
    }

    pub fn from_toml(raw: &str) -> Result<Self> {
        let config: Config = toml::from_str(raw)?;
        config.keys.validate()?;
        Ok(config)
    }
}

// ─── Loader ─────────────────────────────────────────────────────────────

/// Read the config file if one exists; otherwise use the embedded defaults.
/// The file is never created on the user's behalf.
pub fn load(cli: &CliArgs) -> Result<Config> {
    let config_path = cli.config.clone().unwrap_or_else(Config::config_path);

    if !config_path.exists() {
        if cli.config.is_some() {
            return Err(eyre!("config file {} does not exist", config_path.display()));
        }
        debug!("No config at {}; using defaults", config_path.display());
        return Config::from_toml(DEFAULT_CONFIG_TOML)
            .wrap_err("embedded default_config.toml is invalid");
    }

    let toml_str = std::fs::read_to_string(&config_path)
        .wrap_err_with(|| format!("Failed to read config from {}", config_path.display()))?;

    let config = Config::from_toml(&toml_str).wrap_err_with(|| {
        format!(
            "Failed to parse config at {}.\n\
             Run `airlink --print-default-config` to see every valid key.",
            config_path.display()
        )
    })?;
    info!("Loaded config from {}", config_path.display());
    Ok(config)
}

pub fn default_config_toml() -> &'static str {
    DEFAULT_CONFIG_TOML
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn embedded_defaults_match_struct_defaults() {
        let parsed = Config::from_toml(DEFAULT_CONFIG_TOML).unwrap();
        let built = Config::default();
        assert_eq!(parsed.general.connect_timeout_secs, built.general.connect_timeout_secs);
        assert_eq!(parsed.general.nmcli_path, built.general.nmcli_path);
        assert_eq!(parsed.keys, built.keys);
        assert_eq!(parsed.theme.selected_bg, built.theme.selected_bg);
        assert_eq!(parsed.tick_rate(), Duration::from_millis(100));
    }

    #[test]
    fn partial_file_keeps_defaults() {
        let config = Config::from_toml("[general]\nshow_hidden = true\n").unwrap();
        assert!(config.general.show_hidden);
        assert_eq!(config.connect_timeout(), Duration::from_secs(30));
        assert_eq!(config.keys.quit, 'q');
    }

    #[test]
    fn colors() {
        assert_eq!(parse_color("Cyan"), Some(Color::Cyan));
        assert_eq!(parse_color("#ff0080"), Some(Color::Rgb(255, 0, 128)));
        assert_eq!(parse_color("#ff00"), None);
        assert!(Config::from_toml("[theme]\nfg = \"chartreuse\"\n").is_err());
    }

    #[test]
    fn key_bindings_must_be_single_distinct_characters() {
        assert!(Config::from_toml("[keys]\nrefresh = \"rr\"\n").is_err());
        assert!(Config::from_toml("[keys]\nrefresh = \"\"\n").is_err());
        assert!(Config::from_toml("[keys]\nrefresh = \"q\"\n").is_err());
        assert!(Config::from_toml("[keys]\nhelp = \"j\"\n").is_err());
        let config = Config::from_toml("[keys]\nrefresh = \"R\"\n").unwrap();
        assert_eq!(config.keys.refresh, 'R');
    }
}
