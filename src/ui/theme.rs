use ratatui::style::{Color, Modifier, Style};
use ratatui::widgets::BorderType;

use crate::config::Config;
use crate::gateway::Security;

// ─── Nerd Font Icons ──────────────────────────────────────────────────────
// Signal strength icons (Nerd Font: nf-md-wifi_strength)
pub const SIGNAL_ICONS_NERD: &[&str] = &["󰤯 ", "󰤟 ", "󰤢 ", "󰤥 ", "󰤨 "];
// Fallback plain Unicode signal bars
pub const SIGNAL_ICONS_PLAIN: &[&str] = &["    ", "▂   ", "▂▄  ", "▂▄▆ ", "▂▄▆█"];

pub const ICON_WIFI: &str = "󰤨 ";
pub const ICON_WIFI_OFF: &str = "󰤭 ";
pub const ICON_LOCK: &str = "󰌾 ";
pub const ICON_LOCK_OPEN: &str = "󰴲 ";
pub const ICON_CONNECTED: &str = " ";
pub const ICON_SAVED: &str = "★";
pub const ICON_ARROW_RIGHT: &str = " ";
pub const ICON_HIDDEN: &str = "󰈈 ";
pub const ICON_SCAN: &str = "󰑐 ";
pub const ICON_ERROR: &str = " ";
pub const ICON_INFO: &str = " ";

// Plain fallbacks
pub const PLAIN_WIFI: &str = "[W]";
pub const PLAIN_WIFI_OFF: &str = "[X]";
pub const PLAIN_LOCK: &str = "[L]";
pub const PLAIN_LOCK_OPEN: &str = "[O]";
pub const PLAIN_CONNECTED: &str = "*";
pub const PLAIN_SAVED: &str = "*";
pub const PLAIN_ARROW: &str = ">";
pub const PLAIN_HIDDEN: &str = "[H]";

/// Background: always Reset (transparent)
const BG: Color = Color::Reset;

/// Resolved palette plus icon mode, built once from the config
#[derive(Debug, Clone)]
pub struct Theme {
    pub fg: Color,
    pub fg_dim: Color,
    pub accent: Color,
    pub border: Color,
    pub connected: Color,
    pub warning: Color,
    pub error: Color,
    pub selected_bg: Color,
    pub border_type: BorderType,
    pub nerd_fonts: bool,
}

impl Default for Theme {
    fn default() -> Self {
        Self::from_config(&Config::default())
    }
}

impl Theme {
    pub fn from_config(config: &Config) -> Self {
        let t = &config.theme;
        Self {
            fg: t.fg,
            fg_dim: t.fg_dim,
            accent: t.accent,
            border: t.border,
            connected: t.connected,
            warning: t.warning,
            error: t.error,
            selected_bg: t.selected_bg,
            border_type: BorderType::Rounded,
            nerd_fonts: config.appearance.nerd_fonts,
        }
    }

    // ─── Style Constructors ──────────────────────────────────────────────

    pub fn style_default(&self) -> Style {
        Style::default().fg(self.fg).bg(BG)
    }

    pub fn style_dim(&self) -> Style {
        Style::default().fg(self.fg_dim).bg(BG)
    }

    pub fn style_accent(&self) -> Style {
        Style::default().fg(self.accent).bg(BG)
    }

    pub fn style_accent_bold(&self) -> Style {
        self.style_accent().add_modifier(Modifier::BOLD)
    }

    pub fn style_selected(&self) -> Style {
        Style::default()
            .fg(self.fg)
            .bg(self.selected_bg)
            .add_modifier(Modifier::BOLD)
    }

    pub fn style_connected(&self) -> Style {
        Style::default()
            .fg(self.connected)
            .bg(BG)
            .add_modifier(Modifier::BOLD)
    }

    pub fn style_error(&self) -> Style {
        Style::default().fg(self.error).bg(BG)
    }

    pub fn style_warning(&self) -> Style {
        Style::default().fg(self.warning).bg(BG)
    }

    pub fn style_border(&self) -> Style {
        Style::default().fg(self.border).bg(BG)
    }

    pub fn style_key_hint(&self) -> Style {
        self.style_accent_bold()
    }

    pub fn style_key_desc(&self) -> Style {
        self.style_dim()
    }

    /// Signal strength color; 0 means remembered but out of range
    pub fn signal_color(&self, strength: u8) -> Color {
        match strength {
            0..=19 => self.fg_dim,
            20..=39 => self.error,
            40..=59 => self.warning,
            _ => self.connected,
        }
    }

    pub fn signal_icon(&self, strength: u8) -> &'static str {
        signal_icon(strength, self.nerd_fonts)
    }

    pub fn lock_icon(&self, security: Security) -> &'static str {
        match (self.nerd_fonts, security.is_open()) {
            (true, false) => ICON_LOCK,
            (true, true) => ICON_LOCK_OPEN,
            (false, false) => PLAIN_LOCK,
            (false, true) => PLAIN_LOCK_OPEN,
        }
    }

    /// Pick the Nerd Font glyph or its plain fallback
    pub fn icon(&self, nerd: &'static str, plain: &'static str) -> &'static str {
        if self.nerd_fonts {
            nerd
        } else {
            plain
        }
    }
}

/// Get signal icon based on strength percentage
pub fn signal_icon(strength: u8, nerd_fonts: bool) -> &'static str {
    let icons = if nerd_fonts {
        SIGNAL_ICONS_NERD
    } else {
        SIGNAL_ICONS_PLAIN
    };
    match strength {
        0..=19 => icons[0],
        20..=39 => icons[1],
        40..=59 => icons[2],
        60..=79 => icons[3],
        _ => icons[4],
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn signal_buckets() {
        assert_eq!(signal_icon(0, false), "    ");
        assert_eq!(signal_icon(45, false), "▂▄  ");
        assert_eq!(signal_icon(100, false), "▂▄▆█");
        let theme = Theme::default();
        assert_eq!(theme.signal_color(10), theme.fg_dim);
        assert_eq!(theme.signal_color(85), theme.connected);
    }

    #[test]
    fn plain_icons_without_nerd_fonts() {
        let mut theme = Theme::default();
        theme.nerd_fonts = false;
        assert_eq!(theme.lock_icon(Security::WpaPsk), PLAIN_LOCK);
        assert_eq!(theme.lock_icon(Security::Open), PLAIN_LOCK_OPEN);
        assert_eq!(theme.icon(ICON_WIFI, PLAIN_WIFI), PLAIN_WIFI);
    }
}
