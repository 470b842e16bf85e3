use crate::ui::builtin_themes::ThemeSpec;
use crate::ui::fragment::StyleTag;
use crate::utils::cursor;
use ratatui::style::{Color, Modifier, Style};

/// Resolved visual attributes for every style tag the pipeline produces,
/// plus the deterministic username palette. Hosts construct one per
/// session; the renderer treats it as immutable for the duration of a
/// call.
#[derive(Debug, Clone)]
pub struct Theme {
    pub text_style: Style,
    pub emphasis_style: Style,
    pub strong_style: Style,
    pub code_style: Style,
    pub link_style: Style,
    pub emoji_style: Style,
    pub heading_style: Style,
    pub quote_style: Style,
    pub list_marker_style: Style,
    pub code_gutter_style: Style,
    pub code_block_style: Style,
    pub rule_style: Style,
    pub reply_style: Style,
    pub user_palette: Vec<Color>,
}

impl Theme {
    pub fn dark_default() -> Self {
        if let Some(spec) = crate::ui::builtin_themes::find_builtin_theme("dark") {
            return Self::from_spec(&spec);
        }
        // Fallback palette-based theme
        Theme {
            text_style: Style::default().fg(Color::White),
            emphasis_style: Style::default().fg(Color::White).add_modifier(Modifier::ITALIC),
            strong_style: Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
            code_style: Style::default().fg(Color::Yellow),
            link_style: Style::default()
                .fg(Color::Blue)
                .add_modifier(Modifier::UNDERLINED),
            emoji_style: Style::default().fg(Color::Yellow),
            heading_style: Style::default()
                .fg(Color::Magenta)
                .add_modifier(Modifier::BOLD),
            quote_style: Style::default().fg(Color::DarkGray),
            list_marker_style: Style::default().fg(Color::Cyan),
            code_gutter_style: Style::default().fg(Color::DarkGray),
            code_block_style: Style::default().fg(Color::Green),
            rule_style: Style::default().fg(Color::DarkGray),
            reply_style: Style::default()
                .fg(Color::DarkGray)
                .add_modifier(Modifier::ITALIC),
            user_palette: vec![
                Color::Red,
                Color::Green,
                Color::Yellow,
                Color::Blue,
                Color::Magenta,
                Color::Cyan,
            ],
        }
    }

    pub fn light() -> Self {
        if let Some(spec) = crate::ui::builtin_themes::find_builtin_theme("light") {
            return Self::from_spec(&spec);
        }
        let mut theme = Self::dark_default();
        theme.text_style = Style::default().fg(Color::Black);
        theme.emphasis_style = Style::default().fg(Color::Black).add_modifier(Modifier::ITALIC);
        theme.strong_style = Style::default().fg(Color::Black).add_modifier(Modifier::BOLD);
        theme
    }

    pub fn from_name(name: &str) -> Self {
        match crate::ui::builtin_themes::find_builtin_theme(name) {
            Some(spec) => Self::from_spec(&spec),
            None => Self::dark_default(),
        }
    }

    pub fn from_spec(spec: &ThemeSpec) -> Self {
        let fallback = |field: &Option<String>, default: Style| match field {
            Some(tokens) => parse_style(tokens),
            None => default,
        };
        let text_style = fallback(&spec.text, Style::default());

        Theme {
            text_style,
            emphasis_style: fallback(&spec.emphasis, text_style.add_modifier(Modifier::ITALIC)),
            strong_style: fallback(&spec.strong, text_style.add_modifier(Modifier::BOLD)),
            code_style: fallback(&spec.code, text_style),
            link_style: fallback(&spec.link, text_style.add_modifier(Modifier::UNDERLINED)),
            emoji_style: fallback(&spec.emoji, text_style),
            heading_style: fallback(&spec.heading, text_style.add_modifier(Modifier::BOLD)),
            quote_style: fallback(&spec.quote, text_style),
            list_marker_style: fallback(&spec.list_marker, text_style),
            code_gutter_style: fallback(&spec.code_gutter, text_style),
            code_block_style: fallback(&spec.code_block, text_style),
            rule_style: fallback(&spec.rule, text_style),
            reply_style: fallback(&spec.reply, text_style.add_modifier(Modifier::DIM)),
            user_palette: spec
                .user_palette
                .as_deref()
                .unwrap_or_default()
                .iter()
                .filter_map(|s| parse_color(s))
                .collect(),
        }
    }

    /// Resolve a style tag to its visual attribute. Username runs pass
    /// their text so the color tracks the mentioned user.
    pub fn style_for(&self, tag: StyleTag, text: &str) -> Style {
        match tag {
            StyleTag::Normal => self.text_style,
            StyleTag::Emphasis => self.emphasis_style,
            StyleTag::Strong => self.strong_style,
            StyleTag::Code => self.code_style,
            StyleTag::Link => self.link_style,
            StyleTag::Emoji => self.emoji_style,
            StyleTag::Username => self.text_style.fg(self.username_color(text)),
        }
    }

    /// Deterministic username color: the same name maps to the same
    /// palette entry for the lifetime of a session. The leading `@` and
    /// the cursor sentinel are ignored so `@alice` and `alice` agree.
    pub fn username_color(&self, name: &str) -> Color {
        if self.user_palette.is_empty() {
            return self.text_style.fg.unwrap_or(Color::Reset);
        }
        let stripped = cursor::strip(name);
        let key = stripped.strip_prefix('@').unwrap_or(&stripped);
        let hash = crc32fast::hash(key.as_bytes());
        self.user_palette[hash as usize % self.user_palette.len()]
    }
}

fn parse_style(tokens: &str) -> Style {
    let mut style = Style::default();
    for tok in tokens.split(',').map(str::trim).filter(|t| !t.is_empty()) {
        if let Some(color) = parse_color(tok) {
            style = style.fg(color);
        } else {
            match tok {
                "bold" => style = style.add_modifier(Modifier::BOLD),
                "italic" => style = style.add_modifier(Modifier::ITALIC),
                "underlined" => style = style.add_modifier(Modifier::UNDERLINED),
                "dim" => style = style.add_modifier(Modifier::DIM),
                "reversed" => style = style.add_modifier(Modifier::REVERSED),
                _ => {}
            }
        }
    }
    style
}

fn parse_color(token: &str) -> Option<Color> {
    let lower = token.trim().to_ascii_lowercase();
    if let Some(c) = parse_hex_color(&lower) {
        return Some(c);
    }
    if let Some(c) = parse_rgb_func(&lower) {
        return Some(c);
    }
    match lower.as_str() {
        "black" => Some(Color::Black),
        "white" => Some(Color::White),
        "gray" | "grey" => Some(Color::Gray),
        "dark_gray" | "dark-gray" | "darkgray" => Some(Color::DarkGray),
        "red" => Some(Color::Red),
        "light_red" | "light-red" => Some(Color::LightRed),
        "green" => Some(Color::Green),
        "light_green" | "light-green" => Some(Color::LightGreen),
        "blue" => Some(Color::Blue),
        "light_blue" | "light-blue" => Some(Color::LightBlue),
        "cyan" => Some(Color::Cyan),
        "light_cyan" | "light-cyan" => Some(Color::LightCyan),
        "magenta" => Some(Color::Magenta),
        "light_magenta" | "light-magenta" => Some(Color::LightMagenta),
        "yellow" => Some(Color::Yellow),
        "light_yellow" | "light-yellow" => Some(Color::LightYellow),
        "reset" => Some(Color::Reset),
        _ => None,
    }
}

fn parse_hex_color(s: &str) -> Option<Color> {
    let hex = s.strip_prefix('#')?;
    if hex.len() == 3 {
        let r = u8::from_str_radix(&hex[0..1].repeat(2), 16).ok()?;
        let g = u8::from_str_radix(&hex[1..2].repeat(2), 16).ok()?;
        let b = u8::from_str_radix(&hex[2..3].repeat(2), 16).ok()?;
        Some(Color::Rgb(r, g, b))
    } else if hex.len() == 6 {
        let r = u8::from_str_radix(&hex[0..2], 16).ok()?;
        let g = u8::from_str_radix(&hex[2..4], 16).ok()?;
        let b = u8::from_str_radix(&hex[4..6], 16).ok()?;
        Some(Color::Rgb(r, g, b))
    } else {
        None
    }
}

fn parse_rgb_func(s: &str) -> Option<Color> {
    let content = s.strip_prefix("rgb(")?.strip_suffix(')')?;
    let parts: Vec<_> = content
        .split([',', ' '])
        .filter(|t| !t.is_empty())
        .collect();
    if parts.len() != 3 {
        return None;
    }
    let r = parts[0].parse::<u16>().ok()?;
    let g = parts[1].parse::<u16>().ok()?;
    let b = parts[2].parse::<u16>().ok()?;
    Some(Color::Rgb(
        r.min(255) as u8,
        g.min(255) as u8,
        b.min(255) as u8,
    ))
}
