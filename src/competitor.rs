use std::fmt;

/// RGB color used to tint a competitor's name in display messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Color {
    /// Red channel.
    pub r: u8,
    /// Green channel.
    pub g: u8,
    /// Blue channel.
    pub b: u8,
}

impl Color {
    /// Red, the usual first player color.
    pub const RED: Color = Color::rgb(0xE5, 0x2E, 0x28);
    /// Blue, the usual second player color.
    pub const BLUE: Color = Color::rgb(0x2A, 0x64, 0xB2);
    /// Green.
    pub const GREEN: Color = Color::rgb(0x3C, 0xA0, 0x3C);
    /// Yellow.
    pub const YELLOW: Color = Color::rgb(0xE6, 0xC8, 0x1E);

    /// Build a color from its channels.
    pub const fn rgb(r: u8, g: u8, b: u8) -> Color {
        Color { r, g, b }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02X}{:02X}{:02X}", self.r, self.g, self.b)
    }
}

/// A participant of the match and its per-match state.
///
/// Only the [`CompetitorRegistry`](crate::registry::CompetitorRegistry) hands out mutable
/// access, so `wins` can only grow through the controller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Competitor {
    number: u32,
    label: String,
    color: Color,
    pub(crate) alive: bool,
    pub(crate) wins: u32,
}

impl Competitor {
    /// A competitor labelled `PLAYER {number}`.
    pub fn new(number: u32, color: Color) -> Competitor {
        Competitor::with_label(number, format!("PLAYER {number}"), color)
    }

    /// A competitor with a custom display label.
    pub fn with_label(number: u32, label: impl Into<String>, color: Color) -> Competitor {
        Competitor {
            number,
            label: label.into(),
            color,
            alive: true,
            wins: 0,
        }
    }

    /// 1-based player number.
    pub fn number(&self) -> u32 {
        self.number
    }

    /// Plain display label.
    pub fn label(&self) -> &str {
        &self.label
    }

    /// Tint used by [`Competitor::colored_label`].
    pub fn color(&self) -> Color {
        self.color
    }

    /// Label wrapped in rich-text color markup, as embedded in every display message.
    pub fn colored_label(&self) -> String {
        format!("<color={}>{}</color>", self.color, self.label)
    }

    /// False once eliminated from the current round.
    pub fn is_alive(&self) -> bool {
        self.alive
    }

    /// Rounds won so far in this match.
    pub fn wins(&self) -> u32 {
        self.wins
    }
}

impl fmt::Display for Competitor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label)
    }
}
