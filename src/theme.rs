use clap::ValueEnum;
use raylib::prelude::Color;

#[derive(Debug, PartialEq, Eq, Clone, Copy, Default, ValueEnum)]
pub enum Theme {
    Light,
    Dark,
    #[default]
    System,
}

impl Theme {
    /// Without a desktop preference to query, `system` renders dark.
    pub fn is_dark(self) -> bool {
        !matches!(self, Theme::Light)
    }

    /// Runtime toggle order: light, dark, system.
    pub fn next(self) -> Theme {
        match self {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::System,
            Theme::System => Theme::Light,
        }
    }

    pub fn palette(self) -> Palette {
        if self.is_dark() { Palette::DARK } else { Palette::LIGHT }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct Palette {
    pub background: Color,
    pub surface: Color,
    pub foreground: Color,
    pub muted: Color,
    pub blue: Color,
    pub purple: Color,
    pub pink: Color,
    pub green: Color,
    pub orange: Color,
}

impl Palette {
    pub const DARK: Palette = Palette {
        background: Color { r: 10, g: 10, b: 18, a: 255 },
        surface: Color { r: 22, g: 22, b: 36, a: 255 },
        foreground: Color { r: 236, g: 238, b: 245, a: 255 },
        muted: Color { r: 148, g: 152, b: 170, a: 255 },
        blue: Color { r: 0, g: 212, b: 255, a: 255 },
        purple: Color { r: 168, g: 85, b: 247, a: 255 },
        pink: Color { r: 236, g: 72, b: 153, a: 255 },
        green: Color { r: 16, g: 185, b: 129, a: 255 },
        orange: Color { r: 249, g: 115, b: 22, a: 255 },
    };

    pub const LIGHT: Palette = Palette {
        background: Color { r: 248, g: 250, b: 252, a: 255 },
        surface: Color { r: 233, g: 236, b: 243, a: 255 },
        foreground: Color { r: 15, g: 23, b: 42, a: 255 },
        muted: Color { r: 100, g: 110, b: 130, a: 255 },
        blue: Color { r: 2, g: 132, b: 199, a: 255 },
        purple: Color { r: 126, g: 34, b: 206, a: 255 },
        pink: Color { r: 190, g: 24, b: 93, a: 255 },
        green: Color { r: 4, g: 120, b: 87, a: 255 },
        orange: Color { r: 194, g: 65, b: 12, a: 255 },
    };

    /// Accent colours cycled through by cards and skill badges.
    pub fn accents(&self) -> [Color; 5] {
        [self.blue, self.purple, self.pink, self.green, self.orange]
    }
}

/// Same colour with its alpha scaled by `opacity` in [0, 1].
pub fn faded(color: Color, opacity: f32) -> Color {
    let alpha = (color.a as f32 * opacity.clamp(0.0, 1.0)).round() as u8;
    Color { a: alpha, ..color }
}
