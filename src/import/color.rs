//! Color resolution: named colors and color-model conversions
//!
//! Named colors live in a [`ColorRegistry`] that the importer threads
//! through every scope. Definitions are global to the run: unlike the
//! drawing context they are not undone when a scope closes.

use std::collections::HashMap;

use crate::errors::ResolveError;
use crate::model::Color;

/// Lookup and definition of named colors
pub trait ColorRegistry {
    fn lookup(&self, name: &str) -> Option<Color>;
    fn define(&mut self, name: &str, color: Color);
}

/// The predefined color names plus everything defined while importing
#[derive(Debug, Clone)]
pub struct NamedColors {
    colors: HashMap<String, Color>,
}

impl NamedColors {
    pub fn new() -> Self {
        let colors = [
            ("black", Color::BLACK),
            ("white", Color::WHITE),
            ("red", Color::RED),
            ("green", Color::GREEN),
            ("blue", Color::BLUE),
            ("cyan", Color::CYAN),
            ("magenta", Color::MAGENTA),
            ("yellow", Color::YELLOW),
            ("gray", Color::GRAY),
            ("lightgray", Color::LIGHT_GRAY),
            ("darkgray", Color::DARK_GRAY),
        ]
        .into_iter()
        .map(|(name, color)| (name.to_string(), color))
        .collect();
        Self { colors }
    }
}

impl Default for NamedColors {
    fn default() -> Self {
        Self::new()
    }
}

impl ColorRegistry for NamedColors {
    fn lookup(&self, name: &str) -> Option<Color> {
        self.colors.get(name).copied()
    }

    fn define(&mut self, name: &str, color: Color) {
        self.colors.insert(name.to_string(), color);
    }
}

/// Resolve a color name, including the `name!pct` and `name!pct!other` mixes
pub fn resolve_name(registry: &dyn ColorRegistry, name: &str) -> Result<Color, ResolveError> {
    let name = name.trim();
    let mut parts = name.split('!');
    let base = parts.next().unwrap_or_default();
    let mut color = lookup(registry, base)?;

    // Each `!pct!other` pair mixes the running result with the next color;
    // a trailing `!pct` mixes with white.
    while let Some(pct) = parts.next() {
        let pct: f64 = pct
            .trim()
            .parse()
            .map_err(|_| ResolveError::UnknownColor { name: name.to_string() })?;
        let other = match parts.next() {
            Some(other) => lookup(registry, other)?,
            None => Color::WHITE,
        };
        color = color.mix(other, pct / 100.0);
    }
    Ok(color)
}

fn lookup(registry: &dyn ColorRegistry, name: &str) -> Result<Color, ResolveError> {
    registry
        .lookup(name.trim())
        .ok_or_else(|| ResolveError::UnknownColor { name: name.trim().to_string() })
}

/// Convert `values` given in color `model` to RGB.
///
/// Values are separated by commas or spaces.
pub fn convert(model: &str, values: &str) -> Result<Color, ResolveError> {
    let invalid = || ResolveError::InvalidColorValues {
        model: model.to_string(),
        values: values.to_string(),
    };

    if model == "HTML" {
        return html(values.trim()).ok_or_else(invalid);
    }

    let numbers: Vec<f64> = values
        .split([',', ' '])
        .filter(|s| !s.trim().is_empty())
        .map(|s| s.trim().parse::<f64>())
        .collect::<Result<_, _>>()
        .map_err(|_| invalid())?;

    let color = match (model, numbers.as_slice()) {
        ("rgb", &[r, g, b]) => Color::try_rgb(r, g, b),
        ("RGB", &[r, g, b]) => Color::try_rgb(r / 255.0, g / 255.0, b / 255.0),
        ("gray", &[v]) => Color::try_rgb(v, v, v),
        ("cmyk", &[c, m, y, k]) => Color::try_rgb(
            1.0 - (c + k).min(1.0),
            1.0 - (m + k).min(1.0),
            1.0 - (y + k).min(1.0),
        ),
        ("cmy", &[c, m, y]) => Color::try_rgb(1.0 - c, 1.0 - m, 1.0 - y),
        ("hsb", &[h, s, b]) => {
            let (r, g, b) = hsb_to_rgb(h, s, b);
            Color::try_rgb(r, g, b)
        }
        ("rgb" | "RGB" | "gray" | "cmyk" | "cmy" | "hsb", _) => return Err(invalid()),
        _ => {
            return Err(ResolveError::UnknownColorModel {
                model: model.to_string(),
            });
        }
    };
    color.map_err(|_| invalid())
}

fn html(hex: &str) -> Option<Color> {
    if hex.len() != 6 || !hex.is_ascii() {
        return None;
    }
    let channel = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).ok().map(|v| f64::from(v) / 255.0);
    Color::try_rgb(channel(0)?, channel(2)?, channel(4)?).ok()
}

fn hsb_to_rgb(h: f64, s: f64, v: f64) -> (f64, f64, f64) {
    let h = (h.rem_euclid(1.0)) * 6.0;
    let sector = h.floor();
    let f = h - sector;
    let p = v * (1.0 - s);
    let q = v * (1.0 - s * f);
    let t = v * (1.0 - s * (1.0 - f));
    match sector as u8 {
        0 => (v, t, p),
        1 => (q, v, p),
        2 => (p, v, t),
        3 => (p, q, v),
        4 => (t, p, v),
        _ => (v, p, q),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    fn assert_same(a: Color, b: Color) {
        assert_abs_diff_eq!(a.r(), b.r(), epsilon = 1e-9);
        assert_abs_diff_eq!(a.g(), b.g(), epsilon = 1e-9);
        assert_abs_diff_eq!(a.b(), b.b(), epsilon = 1e-9);
    }

    #[test]
    fn equivalent_models() {
        assert_same(convert("rgb", "0.5,0.5,0.5").unwrap(), convert("gray", "0.5").unwrap());
        assert_same(convert("RGB", "255 255 255").unwrap(), convert("rgb", "1 1 1").unwrap());
        assert_same(convert("cmy", "0,0,0").unwrap(), Color::WHITE);
        assert_same(convert("cmyk", "0,0,0,1").unwrap(), Color::BLACK);
        assert_same(convert("HTML", "FF8000").unwrap(), Color::try_rgb(1.0, 128.0 / 255.0, 0.0).unwrap());
    }

    #[test]
    fn hsb_primaries() {
        assert_same(convert("hsb", "0 1 1").unwrap(), Color::RED);
        assert_same(convert("hsb", "0.5 1 1").unwrap(), Color::CYAN);
        assert_same(convert("hsb", "0.3 0 0.5").unwrap(), Color::GRAY);
    }

    #[test]
    fn bad_values_are_rejected() {
        assert!(matches!(convert("rgb", "1 2 0"), Err(ResolveError::InvalidColorValues { .. })));
        assert!(matches!(convert("rgb", "1 0"), Err(ResolveError::InvalidColorValues { .. })));
        assert!(matches!(convert("HTML", "12345"), Err(ResolveError::InvalidColorValues { .. })));
        assert!(matches!(convert("lab", "1 0 0"), Err(ResolveError::UnknownColorModel { .. })));
    }

    #[test]
    fn names_and_mixes() {
        let mut registry = NamedColors::new();
        assert_same(resolve_name(&registry, "red").unwrap(), Color::RED);
        assert_same(resolve_name(&registry, "red!50").unwrap(), Color::try_rgb(1.0, 0.5, 0.5).unwrap());
        assert_same(resolve_name(&registry, "red!25!blue").unwrap(), Color::try_rgb(0.25, 0.0, 0.75).unwrap());
        assert!(matches!(resolve_name(&registry, "mauve"), Err(ResolveError::UnknownColor { .. })));

        registry.define("mauve", Color::try_rgb(0.8, 0.6, 0.8).unwrap());
        assert!(resolve_name(&registry, "mauve").is_ok());
    }
}
