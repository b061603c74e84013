use eframe::egui::Color32;
use palette::{IntoColor, LinSrgb, Mix, Srgb};

// ---------------------------------------------------------------------------
// Viridis colour scale
// ---------------------------------------------------------------------------

/// Viridis anchor colours at evenly spaced positions (Plotly's stops).
const VIRIDIS: [(u8, u8, u8); 10] = [
    (0x44, 0x01, 0x54),
    (0x48, 0x28, 0x78),
    (0x3e, 0x49, 0x89),
    (0x31, 0x68, 0x8e),
    (0x26, 0x82, 0x8e),
    (0x1f, 0x9e, 0x89),
    (0x35, 0xb7, 0x79),
    (0x6e, 0xce, 0x58),
    (0xb5, 0xde, 0x2b),
    (0xfd, 0xe7, 0x25),
];

/// Plotly name of the same scale.
pub const VIRIDIS_NAME: &str = "Viridis";

/// Fixed marker colour of the basic chart.
pub const BASIC_MARKER_HEX: &str = "#2ca02c";

/// Sample Viridis at `t` in `[0, 1]` (clamped), interpolating in linear RGB.
pub fn viridis(t: f64) -> Srgb<u8> {
    let t = (if t.is_nan() { 0.0 } else { t.clamp(0.0, 1.0) }) as f32;
    let last = VIRIDIS.len() - 1;
    let pos = t * last as f32;
    let lo = (pos.floor() as usize).min(last);
    let hi = (lo + 1).min(last);
    let frac = pos - lo as f32;

    let a = anchor(lo);
    let b = anchor(hi);
    let mixed: Srgb = a.mix(b, frac).into_color();
    mixed.into_format()
}

fn anchor(i: usize) -> LinSrgb {
    let (r, g, b) = VIRIDIS[i];
    Srgb::new(r, g, b).into_format::<f32>().into_linear()
}

/// Colour for `value` relative to the `[min, max]` range of the plotted data.
/// A degenerate range maps to the middle of the scale.
pub fn viridis_in_range(value: f64, min: f64, max: f64) -> Color32 {
    let range = max - min;
    let t = if range.abs() < f64::EPSILON {
        0.5
    } else {
        (value - min) / range
    };
    to_color32(viridis(t))
}

pub fn to_color32(c: Srgb<u8>) -> Color32 {
    Color32::from_rgb(c.red, c.green, c.blue)
}

/// Parse `#rrggbb`.
pub fn hex_to_color32(hex: &str) -> Option<Color32> {
    let digits = hex.strip_prefix('#')?;
    if digits.len() != 6 {
        return None;
    }
    let channel = |i: usize| u8::from_str_radix(digits.get(i..i + 2)?, 16).ok();
    Some(Color32::from_rgb(channel(0)?, channel(2)?, channel(4)?))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn endpoints_match_anchor_colours() {
        assert_eq!(viridis(0.0), Srgb::new(0x44, 0x01, 0x54));
        assert_eq!(viridis(1.0), Srgb::new(0xfd, 0xe7, 0x25));
    }

    #[test]
    fn out_of_range_is_clamped() {
        assert_eq!(viridis(-3.0), viridis(0.0));
        assert_eq!(viridis(7.0), viridis(1.0));
        assert_eq!(viridis(f64::NAN), viridis(0.0));
    }

    #[test]
    fn scale_brightens_towards_the_top() {
        let lum = |c: Srgb<u8>| c.red as u32 + c.green as u32 + c.blue as u32;
        assert!(lum(viridis(0.25)) < lum(viridis(0.75)));
    }

    #[test]
    fn flat_range_uses_midpoint() {
        assert_eq!(viridis_in_range(2.0, 2.0, 2.0), to_color32(viridis(0.5)));
        assert_eq!(viridis_in_range(1.0, 1.0, 3.0), to_color32(viridis(0.0)));
    }

    #[test]
    fn parses_hex_colours() {
        assert_eq!(
            hex_to_color32(BASIC_MARKER_HEX),
            Some(Color32::from_rgb(0x2c, 0xa0, 0x2c))
        );
        assert_eq!(hex_to_color32("2ca02c"), None);
        assert_eq!(hex_to_color32("#zzzzzz"), None);
    }
}
