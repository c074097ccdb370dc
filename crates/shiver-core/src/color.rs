//! Color parsing and interpolation.

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors produced while parsing colors.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ColorError {
    #[error("invalid color format: {0:?}")]
    InvalidFormat(String),
    #[error("invalid color component {component:?} in {input:?}")]
    InvalidComponent { input: String, component: String },
}

/// An RGBA color with channels in `0..=255` and alpha in `0..=1`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rgba {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Rgba {
    pub const fn new(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    /// Opaque color.
    pub const fn rgb(r: f32, g: f32, b: f32) -> Self {
        Self::new(r, g, b, 1.0)
    }

    /// Parse a hex, `rgb()` or `rgba()` color.
    pub fn parse(input: &str) -> Result<Self, ColorError> {
        let trimmed = input.trim();
        let lower = trimmed.to_ascii_lowercase();

        let call = |name: &str| lower.strip_prefix(name)?.strip_suffix(')');

        if let Some(hex) = lower.strip_prefix('#') {
            return parse_hex(input, hex);
        }
        if let Some(body) = call("rgba(") {
            return parse_functional(input, body, 4);
        }
        if let Some(body) = call("rgb(") {
            return parse_functional(input, body, 3);
        }
        Err(ColorError::InvalidFormat(input.to_string()))
    }

    /// Build a color from a decomposed triple or quad. Alpha defaults to 1.
    pub fn from_components(components: &[f32]) -> Result<Self, ColorError> {
        match *components {
            [r, g, b] => Ok(Self::rgb(r, g, b)),
            [r, g, b, a] => Ok(Self::new(r, g, b, a)),
            _ => Err(ColorError::InvalidFormat(format!("{components:?}"))),
        }
    }

    /// Channels rounded and clamped to bytes, alpha included.
    pub fn to_bytes(self) -> [u8; 4] {
        let byte = |v: f32| v.round().clamp(0.0, 255.0) as u8;
        [
            byte(self.r),
            byte(self.g),
            byte(self.b),
            byte(self.a.clamp(0.0, 1.0) * 255.0),
        ]
    }
}

impl fmt::Display for Rgba {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "rgba({}, {}, {}, {})", self.r, self.g, self.b, self.a)
    }
}

fn parse_hex(input: &str, hex: &str) -> Result<Rgba, ColorError> {
    let digits: Vec<u8> = hex
        .chars()
        .map(|c| c.to_digit(16).map(|d| d as u8))
        .collect::<Option<_>>()
        .ok_or_else(|| ColorError::InvalidComponent {
            input: input.to_string(),
            component: hex.to_string(),
        })?;

    let bytes: Vec<u8> = match digits.len() {
        3 | 4 => digits.iter().map(|d| d * 17).collect(),
        6 | 8 => digits.chunks(2).map(|p| p[0] * 16 + p[1]).collect(),
        _ => return Err(ColorError::InvalidFormat(input.to_string())),
    };

    let alpha = bytes.get(3).map_or(1.0, |a| *a as f32 / 255.0);
    let [r, g, b] = [bytes[0], bytes[1], bytes[2]].map(f32::from);
    Ok(Rgba::new(r, g, b, alpha))
}

fn parse_functional(input: &str, body: &str, expected: usize) -> Result<Rgba, ColorError> {
    let components = body
        .split(',')
        .map(|part| {
            let part = part.trim();
            match part.parse::<f32>() {
                Ok(value) if value.is_finite() => Ok(value),
                _ => Err(ColorError::InvalidComponent {
                    input: input.to_string(),
                    component: part.to_string(),
                }),
            }
        })
        .collect::<Result<Vec<_>, _>>()?;

    if components.len() != expected {
        return Err(ColorError::InvalidFormat(input.to_string()));
    }
    Rgba::from_components(&components)
}

/// Linearly interpolate each channel of `from` towards `to`.
pub fn interpolate(t: f32, from: &Rgba, to: &Rgba) -> Rgba {
    let t = t.clamp(0.0, 1.0);
    let lerp = |a: f32, b: f32| a + (b - a) * t;
    Rgba::new(
        lerp(from.r, to.r),
        lerp(from.g, to.g),
        lerp(from.b, to.b),
        lerp(from.a, to.a),
    )
}

/// A color as written in configuration: a string or a component list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ColorValue {
    Text(String),
    Components(Vec<f32>),
}

impl ColorValue {
    pub fn parse(&self) -> Result<Rgba, ColorError> {
        match self {
            ColorValue::Text(text) => Rgba::parse(text),
            ColorValue::Components(components) => Rgba::from_components(components),
        }
    }
}

impl From<&str> for ColorValue {
    fn from(text: &str) -> Self {
        ColorValue::Text(text.to_string())
    }
}
