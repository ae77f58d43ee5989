// Theme support for the TUI
//
// Named color palettes selected via config. "default" uses the terminal's
// ANSI palette, the named themes use true color (RGB).

use ratatui::style::Color;
use ratatui::widgets::BorderType;

/// Color palette for the TUI
#[derive(Debug, Clone)]
pub struct Theme {
    pub name: String,

    // Base colors
    pub foreground: Color,
    pub background: Color,
    pub muted: Color,

    // UI element colors
    pub border: Color,
    pub border_type: BorderType,
    pub title: Color,
    pub highlight: Color,
    pub selection: Color,
    pub selection_fg: Color,
    pub status_bar: Color,

    // Book detail colors
    pub liker: Color,
    pub button: Color,

    // Log level colors
    pub error: Color,
    pub warn: Color,
    pub info: Color,

    // Panel identity colors (used when focused)
    pub panel_list: Color,
    pub panel_detail: Color,
    pub panel_logs: Color,
}

impl Theme {
    /// Load theme by name, unknown names fall back to the default palette
    pub fn by_name(name: &str) -> Self {
        match name.to_lowercase().as_str() {
            "dracula" => Self::dracula(),
            "nord" => Self::nord(),
            _ => Self::terminal(),
        }
    }

    /// Default theme - uses terminal's ANSI palette
    pub fn terminal() -> Self {
        Self {
            name: "default".to_string(),
            foreground: Color::Reset,
            background: Color::Reset,
            muted: Color::DarkGray,
            border: Color::Gray,
            border_type: BorderType::Rounded,
            title: Color::Cyan,
            highlight: Color::Yellow,
            selection: Color::Blue,
            selection_fg: Color::White,
            status_bar: Color::Green,
            liker: Color::Magenta,
            button: Color::Green,
            error: Color::Red,
            warn: Color::Yellow,
            info: Color::LightBlue,
            panel_list: Color::Cyan,
            panel_detail: Color::Yellow,
            panel_logs: Color::DarkGray,
        }
    }

    /// Dracula theme - https://draculatheme.com
    pub fn dracula() -> Self {
        Self {
            name: "dracula".to_string(),
            foreground: Color::Rgb(0xf8, 0xf8, 0xf2),
            background: Color::Rgb(0x28, 0x2a, 0x36),
            muted: Color::Rgb(0x62, 0x72, 0xa4),    // comment
            border: Color::Rgb(0x62, 0x72, 0xa4),   // comment
            border_type: BorderType::Rounded,
            title: Color::Rgb(0x8b, 0xe9, 0xfd),    // cyan
            highlight: Color::Rgb(0xf1, 0xfa, 0x8c), // yellow
            selection: Color::Rgb(0x44, 0x47, 0x5a),
            selection_fg: Color::Rgb(0xf8, 0xf8, 0xf2),
            status_bar: Color::Rgb(0x50, 0xfa, 0x7b), // green
            liker: Color::Rgb(0xff, 0x79, 0xc6),     // pink
            button: Color::Rgb(0x50, 0xfa, 0x7b),    // green
            error: Color::Rgb(0xff, 0x55, 0x55),
            warn: Color::Rgb(0xff, 0xb8, 0x6c),      // orange
            info: Color::Rgb(0x8b, 0xe9, 0xfd),
            panel_list: Color::Rgb(0x8b, 0xe9, 0xfd),
            panel_detail: Color::Rgb(0xf1, 0xfa, 0x8c),
            panel_logs: Color::Rgb(0x62, 0x72, 0xa4),
        }
    }

    /// Nord theme - https://nordtheme.com
    pub fn nord() -> Self {
        Self {
            name: "nord".to_string(),
            foreground: Color::Rgb(0xd8, 0xde, 0xe9),
            background: Color::Rgb(0x2e, 0x34, 0x40),
            muted: Color::Rgb(0x4c, 0x56, 0x6a),     // polar night
            border: Color::Rgb(0x4c, 0x56, 0x6a),
            border_type: BorderType::Plain,
            title: Color::Rgb(0x88, 0xc0, 0xd0),     // frost cyan
            highlight: Color::Rgb(0xeb, 0xcb, 0x8b), // aurora yellow
            selection: Color::Rgb(0x43, 0x4c, 0x5e),
            selection_fg: Color::Rgb(0xec, 0xef, 0xf4),
            status_bar: Color::Rgb(0xa3, 0xbe, 0x8c), // aurora green
            liker: Color::Rgb(0xb4, 0x8e, 0xad),     // aurora purple
            button: Color::Rgb(0xa3, 0xbe, 0x8c),
            error: Color::Rgb(0xbf, 0x61, 0x6a),
            warn: Color::Rgb(0xd0, 0x87, 0x70),      // aurora orange
            info: Color::Rgb(0x81, 0xa1, 0xc1),      // frost blue
            panel_list: Color::Rgb(0x88, 0xc0, 0xd0),
            panel_detail: Color::Rgb(0xeb, 0xcb, 0x8b),
            panel_logs: Color::Rgb(0x4c, 0x56, 0x6a),
        }
    }

    /// Border color for a panel based on focus state
    ///
    /// Focused panels use their identity color, unfocused use the general border color.
    pub fn panel_border(&self, panel: crate::tui::traits::ComponentId, focused: bool) -> Color {
        use crate::tui::traits::ComponentId;

        if !focused {
            return self.border;
        }
        match panel {
            ComponentId::List => self.panel_list,
            ComponentId::Detail => self.panel_detail,
            ComponentId::Logs => self.panel_logs,
        }
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::terminal()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tui::traits::ComponentId;

    #[test]
    fn by_name_is_case_insensitive() {
        assert_eq!(Theme::by_name("Dracula").name, "dracula");
        assert_eq!(Theme::by_name("NORD").name, "nord");
    }

    #[test]
    fn unknown_theme_falls_back_to_default() {
        assert_eq!(Theme::by_name("solarized").name, "default");
    }

    #[test]
    fn unfocused_panels_share_border_color() {
        let theme = Theme::dracula();
        assert_eq!(theme.panel_border(ComponentId::List, false), theme.border);
        assert_eq!(
            theme.panel_border(ComponentId::Detail, true),
            theme.panel_detail
        );
    }
}
