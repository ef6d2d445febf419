//! Color theme and glyphs for the Horae clock face.
//!
//! Uses the Kanagawa Wave palette by default with an optional high-contrast override.

use ratatui::style::{Color, Modifier, Style};

use horae_types::UiOptions;

/// Kanagawa Wave color palette constants.
mod colors {
    use super::Color;

    // === Backgrounds (Sumi Ink) ===
    pub const BG_DARK: Color = Color::Rgb(22, 22, 29); // sumiInk0
    pub const BG_BORDER: Color = Color::Rgb(84, 84, 109); // sumiInk6

    // === Foregrounds (Fuji) ===
    pub const TEXT_PRIMARY: Color = Color::Rgb(220, 215, 186); // fujiWhite
    pub const TEXT_SECONDARY: Color = Color::Rgb(200, 192, 147); // oldWhite
    pub const TEXT_MUTED: Color = Color::Rgb(114, 113, 105); // fujiGray

    // === Accent Colors ===
    pub const BLUE: Color = Color::Rgb(126, 156, 216); // crystalBlue
    pub const GREEN: Color = Color::Rgb(152, 187, 108); // springGreen
    pub const PINK: Color = Color::Rgb(210, 126, 153); // sakuraPink
    pub const YELLOW: Color = Color::Rgb(230, 195, 132); // carpYellow
    pub const MOON: Color = Color::Rgb(201, 203, 209); // silver

    // === Semantic Aliases ===
    pub const ACCENT: Color = BLUE;
    pub const WARNING: Color = YELLOW;
}

/// Resolved theme palette used by the UI.
#[derive(Debug, Clone, Copy)]
pub struct Palette {
    pub bg_dark: Color,
    pub bg_border: Color,
    pub text_primary: Color,
    pub text_secondary: Color,
    pub text_muted: Color,
    pub accent: Color,
    pub warning: Color,
    pub hour_hand: Color,
    pub minute_hand: Color,
    pub second_hand: Color,
    pub sun: Color,
    pub moon: Color,
    /// Stars at full brightness; dimmer stars blend toward `bg_dark`.
    pub star: Color,
}

impl Palette {
    #[must_use]
    pub fn standard() -> Self {
        Self {
            bg_dark: colors::BG_DARK,
            bg_border: colors::BG_BORDER,
            text_primary: colors::TEXT_PRIMARY,
            text_secondary: colors::TEXT_SECONDARY,
            text_muted: colors::TEXT_MUTED,
            accent: colors::ACCENT,
            warning: colors::WARNING,
            hour_hand: colors::BLUE,
            minute_hand: colors::GREEN,
            second_hand: colors::PINK,
            sun: colors::YELLOW,
            moon: colors::MOON,
            star: colors::TEXT_PRIMARY,
        }
    }

    #[must_use]
    pub fn high_contrast() -> Self {
        Self {
            bg_dark: Color::Black,
            bg_border: Color::Gray,
            text_primary: Color::White,
            text_secondary: Color::Gray,
            text_muted: Color::Gray,
            accent: Color::Cyan,
            warning: Color::Yellow,
            hour_hand: Color::Cyan,
            minute_hand: Color::Green,
            second_hand: Color::Magenta,
            sun: Color::Yellow,
            moon: Color::White,
            star: Color::White,
        }
    }

    /// Star color at `brightness` in `[0, 1]`.
    ///
    /// High contrast has no RGB ramp, so it snaps between two named colors.
    #[must_use]
    pub fn star_at(&self, brightness: f64) -> Color {
        match (self.star, self.bg_dark) {
            (Color::Rgb(sr, sg, sb), Color::Rgb(br, bg, bb)) => {
                let t = brightness.clamp(0.0, 1.0);
                Color::Rgb(blend(br, sr, t), blend(bg, sg, t), blend(bb, sb, t))
            }
            _ if brightness >= 0.6 => self.star,
            _ => Color::DarkGray,
        }
    }
}

fn blend(from: u8, to: u8, t: f64) -> u8 {
    let value = f64::from(from) + (f64::from(to) - f64::from(from)) * t;
    // Clamped to the u8 range above.
    value.round().clamp(0.0, 255.0) as u8
}

#[must_use]
pub fn palette(options: UiOptions) -> Palette {
    if options.high_contrast {
        Palette::high_contrast()
    } else {
        Palette::standard()
    }
}

/// ASCII/Unicode glyphs for icons and spinners.
#[derive(Debug, Clone, Copy)]
pub struct Glyphs {
    pub sun: &'static str,
    pub moon: &'static str,
    pub location: &'static str,
    pub warning: &'static str,
    pub separator: &'static str,
    /// Indexed by star size, smallest first.
    pub stars: &'static [&'static str],
    pub spinner_frames: &'static [&'static str],
}

const SPINNER_FRAMES: &[&str] = &["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"];
const SPINNER_FRAMES_ASCII: &[&str] = &["|", "/", "-", "\\"];

const STARS: &[&str] = &["·", "∙", "•", "✦"];
const STARS_ASCII: &[&str] = &[".", ".", "+", "*"];

#[must_use]
pub fn glyphs(options: UiOptions) -> Glyphs {
    if options.ascii_only {
        Glyphs {
            sun: "O",
            moon: "C",
            location: "@",
            warning: "!",
            separator: "|",
            stars: STARS_ASCII,
            spinner_frames: SPINNER_FRAMES_ASCII,
        }
    } else {
        Glyphs {
            sun: "☀",
            moon: "☾",
            location: "⌖",
            warning: "⚠",
            separator: "│",
            stars: STARS,
            spinner_frames: SPINNER_FRAMES,
        }
    }
}

impl Glyphs {
    /// Glyph for a star of `size` (clamped to the largest available).
    #[must_use]
    pub fn star(&self, size: u8) -> &'static str {
        let index = usize::from(size).min(self.stars.len().saturating_sub(1));
        self.stars.get(index).copied().unwrap_or(".")
    }
}

/// When `reduced_motion` is enabled, returns a static glyph instead of cycling.
#[must_use]
pub fn spinner_frame(tick: usize, options: UiOptions) -> &'static str {
    let frames = glyphs(options).spinner_frames;
    if options.reduced_motion {
        frames[0]
    } else {
        frames[tick % frames.len()]
    }
}

/// Pre-defined styles for common UI elements.
pub mod styles {
    use super::{Modifier, Palette, Style};

    #[must_use]
    pub fn time_readout(palette: &Palette) -> Style {
        Style::default()
            .fg(palette.accent)
            .add_modifier(Modifier::BOLD)
    }

    #[must_use]
    pub fn detail(palette: &Palette) -> Style {
        Style::default().fg(palette.text_secondary)
    }

    #[must_use]
    pub fn advisory(palette: &Palette) -> Style {
        Style::default()
            .fg(palette.warning)
            .add_modifier(Modifier::BOLD)
    }

    #[must_use]
    pub fn key_hint(palette: &Palette) -> Style {
        Style::default().fg(palette.text_muted)
    }
}
