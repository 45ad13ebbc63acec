//! Theme descriptors.
//!
//! A theme is a flat bag of colours and text styles serialised for the host:
//! chrome colours, the two line-number styles, and one text style per
//! syntax-span style (text, comments, keywords, operators, types, literals,
//! strings, function names, in that order, matching span style indices).

use serde::ser::SerializeSeq;
use serde::{Serialize, Serializer};

/// Linear RGBA, components in 0..=1. Serialises as a 0–255 quadruple.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Color {
    pub red: f32,
    pub green: f32,
    pub blue: f32,
    pub alpha: f32,
}

impl Color {
    pub const fn rgba(red: f32, green: f32, blue: f32, alpha: f32) -> Self {
        Color {
            red,
            green,
            blue,
            alpha,
        }
    }

    /// Pure hue on the RGB wheel, `h` in 0..6.
    fn hue(h: f32) -> Self {
        let (r, g, b) = if h <= 1.0 {
            (1.0, h, 0.0)
        } else if h <= 2.0 {
            (2.0 - h, 1.0, 0.0)
        } else if h <= 3.0 {
            (0.0, 1.0, h - 2.0)
        } else if h <= 4.0 {
            (0.0, 4.0 - h, 1.0)
        } else if h <= 5.0 {
            (h - 4.0, 0.0, 1.0)
        } else {
            (1.0, 0.0, 6.0 - h)
        };
        Color::rgba(r, g, b, 1.0)
    }

    /// Hue 0–360, saturation and value 0–100.
    pub fn hsv(h: f32, s: f32, v: f32) -> Self {
        let hue = Self::hue(h / 60.0);
        let s = s / 100.0;
        let v = v / 100.0;
        Color::rgba(
            (hue.red * s + 1.0 - s) * v,
            (hue.green * s + 1.0 - s) * v,
            (hue.blue * s + 1.0 - s) * v,
            1.0,
        )
    }

    /// Hue 0–360, saturation and lightness 0–100.
    pub fn hsl(h: f32, s: f32, l: f32) -> Self {
        let hue = Self::hue(h / 60.0);
        let s = s / 100.0;
        let l = l / 100.0;
        let c = (1.0 - (2.0 * l - 1.0).abs()) * s;
        let m = l - c / 2.0;
        Color::rgba(
            hue.red * c + m,
            hue.green * c + m,
            hue.blue * c + m,
            1.0,
        )
    }

    pub fn with_alpha(mut self, alpha: f32) -> Self {
        self.alpha = alpha;
        self
    }

    /// Composite `top` over this colour.
    pub fn over(self, top: Color) -> Self {
        let a = top.alpha;
        Color::rgba(
            self.red * (1.0 - a) + top.red * a,
            self.green * (1.0 - a) + top.green * a,
            self.blue * (1.0 - a) + top.blue * a,
            (self.alpha + top.alpha * (1.0 - self.alpha)).min(1.0),
        )
    }

    /// The 0–255 quadruple the host receives.
    pub fn quad(self) -> [u8; 4] {
        let channel = |c: f32| (c * 255.0 + 0.5).clamp(0.0, 255.0) as u8;
        [
            channel(self.red),
            channel(self.green),
            channel(self.blue),
            channel(self.alpha),
        ]
    }
}

impl Serialize for Color {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let quad = self.quad();
        let mut seq = serializer.serialize_seq(Some(4))?;
        for c in quad {
            seq.serialize_element(&c)?;
        }
        seq.end()
    }
}

/// A text style: colour plus weight and slant flags.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TextStyle {
    pub color: Color,
    pub bold: bool,
    pub italic: bool,
}

impl TextStyle {
    pub const fn plain(color: Color) -> Self {
        TextStyle {
            color,
            bold: false,
            italic: false,
        }
    }

    pub const fn bold(color: Color) -> Self {
        TextStyle {
            color,
            bold: true,
            italic: false,
        }
    }

    pub const fn italic(color: Color) -> Self {
        TextStyle {
            color,
            bold: false,
            italic: true,
        }
    }
}

/// Per-style entries in `styles`: text, comments, keywords, operators,
/// types, literals, strings, function names.
pub const STYLE_COUNT: usize = 8;

#[derive(Debug, Clone, Serialize)]
pub struct Theme {
    pub background: Color,
    pub background_active: Color,
    pub selection: Color,
    pub cursor: Color,
    pub number_background: Color,
    pub number_background_active: Color,
    pub number: TextStyle,
    pub number_active: TextStyle,
    pub styles: [TextStyle; STYLE_COUNT],
}

impl Theme {
    /// Look a theme up by name; unknown names get the default theme.
    pub fn from_name(name: &str) -> Theme {
        match name {
            "one-dark" => Self::one_dark(),
            "monokai" => Self::monokai(),
            _ => Self::default_theme(),
        }
    }

    pub fn default_theme() -> Theme {
        Theme {
            background: Color::hsv(0.0, 0.0, 100.0),
            background_active: Color::hsv(0.0, 0.0, 100.0),
            selection: Color::hsv(60.0, 40.0, 100.0),
            cursor: Color::hsv(0.0, 0.0, 20.0),
            number_background: Color::hsv(0.0, 0.0, 100.0),
            number_background_active: Color::hsv(0.0, 0.0, 100.0),
            number: TextStyle::plain(Color::hsv(0.0, 0.0, 60.0)),
            number_active: TextStyle::plain(Color::hsv(0.0, 0.0, 20.0)),
            styles: [
                TextStyle::plain(Color::hsv(0.0, 0.0, 20.0)),   // text
                TextStyle::italic(Color::hsv(0.0, 0.0, 60.0)),  // comments
                TextStyle::bold(Color::hsv(270.0, 80.0, 80.0)), // keywords
                TextStyle::plain(Color::hsv(270.0, 80.0, 80.0)), // operators
                TextStyle::bold(Color::hsv(210.0, 80.0, 80.0)), // types
                TextStyle::plain(Color::hsv(150.0, 80.0, 80.0)), // literals
                TextStyle::plain(Color::hsv(150.0, 80.0, 80.0)), // strings
                TextStyle::plain(Color::hsv(210.0, 80.0, 80.0)), // function names
            ],
        }
    }

    pub fn one_dark() -> Theme {
        let background = Color::hsl(220.0, 13.0, 18.0);
        Theme {
            background,
            background_active: Color::hsl(220.0, 100.0, 80.0).with_alpha(0.04),
            selection: Color::hsl(220.0, 13.0, 28.0),
            cursor: Color::hsl(220.0, 100.0, 66.0),
            number_background: background,
            number_background_active: background,
            number: TextStyle::plain(
                background.over(Color::hsl(220.0, 14.0, 45.0).with_alpha(0.6)),
            ),
            number_active: TextStyle::plain(
                background.over(Color::hsl(220.0, 14.0, 71.0).with_alpha(0.6)),
            ),
            styles: [
                TextStyle::plain(Color::hsl(220.0, 14.0, 71.0)), // text
                TextStyle::italic(Color::hsl(220.0, 10.0, 40.0)), // comments
                TextStyle::plain(Color::hsl(286.0, 60.0, 67.0)), // keywords
                TextStyle::plain(Color::hsl(286.0, 60.0, 67.0)), // operators
                TextStyle::plain(Color::hsl(187.0, 47.0, 55.0)), // types
                TextStyle::plain(Color::hsl(29.0, 54.0, 61.0)),  // literals
                TextStyle::plain(Color::hsl(95.0, 38.0, 62.0)),  // strings
                TextStyle::plain(Color::hsl(207.0, 82.0, 66.0)), // function names
            ],
        }
    }

    pub fn monokai() -> Theme {
        let background = Color::hsl(70.0, 8.0, 15.0);
        Theme {
            background,
            background_active: background,
            selection: Color::hsl(55.0, 8.0, 31.0).with_alpha(0.7),
            cursor: Color::hsl(60.0, 36.0, 96.0).with_alpha(0.9),
            number_background: background,
            number_background_active: Color::hsl(55.0, 11.0, 22.0),
            number: TextStyle::plain(Color::hsl(60.0, 30.0, 96.0).with_alpha(0.5)),
            number_active: TextStyle::plain(Color::hsl(60.0, 30.0, 96.0).with_alpha(0.8)),
            styles: [
                TextStyle::plain(Color::hsl(60.0, 30.0, 96.0)),  // text
                TextStyle::plain(Color::hsl(50.0, 11.0, 41.0)),  // comments
                TextStyle::plain(Color::hsl(338.0, 95.0, 56.0)), // keywords
                TextStyle::plain(Color::hsl(338.0, 95.0, 56.0)), // operators
                TextStyle::italic(Color::hsl(190.0, 81.0, 67.0)), // types
                TextStyle::plain(Color::hsl(261.0, 100.0, 75.0)), // literals
                TextStyle::plain(Color::hsl(54.0, 70.0, 68.0)),  // strings
                TextStyle::plain(Color::hsl(80.0, 76.0, 53.0)),  // function names
            ],
        }
    }
}
