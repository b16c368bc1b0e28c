//! Color string parsing with a graceful fallback chain.
//!
//! Options records carry colors as free-form strings. [`parse_color`] tries
//! hex, `rgb()`/`rgba()`, `hsl()`/`hsla()`, then CSS keywords, and falls back
//! to black when nothing matches. It never fails: a bad color string renders
//! a black halftone, not an error page.

use super::named;

/// A normalized RGB color, channels in `[0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rgb {
    pub r: f32,
    pub g: f32,
    pub b: f32,
}

impl Rgb {
    pub const BLACK: Rgb = Rgb {
        r: 0.0,
        g: 0.0,
        b: 0.0,
    };

    #[inline]
    pub fn new(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b }
    }

    /// Create from 8-bit channel values.
    #[inline]
    pub fn from_u8(r: u8, g: u8, b: u8) -> Self {
        Self {
            r: r as f32 / 255.0,
            g: g as f32 / 255.0,
            b: b as f32 / 255.0,
        }
    }

    /// Convert to 8-bit channel values, rounding to nearest.
    #[inline]
    pub fn to_bytes(self) -> [u8; 3] {
        [
            (self.r.clamp(0.0, 1.0) * 255.0).round() as u8,
            (self.g.clamp(0.0, 1.0) * 255.0).round() as u8,
            (self.b.clamp(0.0, 1.0) * 255.0).round() as u8,
        ]
    }
}

/// Parse a color string into normalized RGB.
///
/// Accepted forms, tried in order:
/// 1. Hex: `#rrggbb`, `rrggbb`, `#rgb`, `rgb` (3-digit channels expand `x`
///    to `xx`).
/// 2. `rgb(r, g, b)` / `rgba(r, g, b, a)`: integer channels, values above
///    255 clamp to 255, alpha ignored.
/// 3. `hsl(h, s%, l%)` / `hsla(...)`: hue in degrees, saturation and
///    lightness in percent.
/// 4. CSS color keywords (`tomato`, `cornflowerblue`, ...).
///
/// Anything else resolves to black.
pub fn parse_color(input: &str) -> Rgb {
    let s = input.trim();
    parse_hex(s)
        .or_else(|| parse_rgb_fn(s))
        .or_else(|| parse_hsl_fn(s))
        .or_else(|| named::resolve(s))
        .unwrap_or(Rgb::BLACK)
}

fn parse_hex(s: &str) -> Option<Rgb> {
    let hex = s.strip_prefix('#').unwrap_or(s);
    if hex.is_empty() || !hex.bytes().all(|b| b.is_ascii_hexdigit()) {
        return None;
    }
    match hex.len() {
        3 => {
            let r = u8::from_str_radix(&hex[0..1], 16).ok()?;
            let g = u8::from_str_radix(&hex[1..2], 16).ok()?;
            let b = u8::from_str_radix(&hex[2..3], 16).ok()?;
            Some(Rgb::from_u8(r * 17, g * 17, b * 17))
        }
        6 => {
            let r = u8::from_str_radix(&hex[0..2], 16).ok()?;
            let g = u8::from_str_radix(&hex[2..4], 16).ok()?;
            let b = u8::from_str_radix(&hex[4..6], 16).ok()?;
            Some(Rgb::from_u8(r, g, b))
        }
        _ => None,
    }
}

fn parse_rgb_fn(s: &str) -> Option<Rgb> {
    let body = fn_body(s, "rgb", "rgba")?;
    let mut parts = body.split(',');
    let r = parse_byte_channel(parts.next()?)?;
    let g = parse_byte_channel(parts.next()?)?;
    let b = parse_byte_channel(parts.next()?)?;
    Some(Rgb::from_u8(r, g, b))
}

fn parse_hsl_fn(s: &str) -> Option<Rgb> {
    let body = fn_body(s, "hsl", "hsla")?;
    let mut parts = body.split(',');
    let h = parse_unsigned_number(parts.next()?.trim())?;
    let sat = parse_percent(parts.next()?)?;
    let light = parse_percent(parts.next()?)?;
    Some(hsl_to_rgb(h, sat / 100.0, light / 100.0))
}

/// Extract the argument list of `name(...)` / `namea(...)` notation.
/// The closing parenthesis is optional; anything after it is ignored.
fn fn_body<'a>(s: &'a str, name: &str, alpha_name: &str) -> Option<&'a str> {
    let open = s.find('(')?;
    let head = s[..open].trim();
    if !(head.eq_ignore_ascii_case(name) || head.eq_ignore_ascii_case(alpha_name)) {
        return None;
    }
    let body = &s[open + 1..];
    Some(match body.find(')') {
        Some(end) => &body[..end],
        None => body,
    })
}

/// Integer channel 0-255; larger values clamp to 255, non-integers reject.
fn parse_byte_channel(part: &str) -> Option<u8> {
    let value: u32 = part.trim().parse().ok()?;
    Some(value.min(255) as u8)
}

/// Percentage like `42%` or `37.5%`.
fn parse_percent(part: &str) -> Option<f32> {
    parse_unsigned_number(part.trim().strip_suffix('%')?)
}

/// Unsigned decimal number: digits and at most a decimal point, no sign or
/// exponent.
fn parse_unsigned_number(s: &str) -> Option<f32> {
    if s.is_empty() || !s.bytes().all(|b| b.is_ascii_digit() || b == b'.') {
        return None;
    }
    s.parse().ok()
}

/// Standard HSL to RGB conversion. Hue in degrees, s/l in `[0, 1]`.
fn hsl_to_rgb(h: f32, s: f32, l: f32) -> Rgb {
    if s == 0.0 {
        return Rgb::new(l, l, l);
    }
    let h = (h / 360.0).rem_euclid(1.0);
    let q = if l < 0.5 { l * (1.0 + s) } else { l + s - l * s };
    let p = 2.0 * l - q;
    Rgb::new(
        hue_to_channel(p, q, h + 1.0 / 3.0),
        hue_to_channel(p, q, h),
        hue_to_channel(p, q, h - 1.0 / 3.0),
    )
}

fn hue_to_channel(p: f32, q: f32, t: f32) -> f32 {
    let mut t = t;
    if t < 0.0 {
        t += 1.0;
    }
    if t > 1.0 {
        t -= 1.0;
    }
    if t < 1.0 / 6.0 {
        p + (q - p) * 6.0 * t
    } else if t < 1.0 / 2.0 {
        q
    } else if t < 2.0 / 3.0 {
        p + (q - p) * (2.0 / 3.0 - t) * 6.0
    } else {
        p
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f32 = 1e-4;

    fn assert_rgb(color: Rgb, r: f32, g: f32, b: f32) {
        assert!(
            (color.r - r).abs() < EPS && (color.g - g).abs() < EPS && (color.b - b).abs() < EPS,
            "expected ({r}, {g}, {b}), got ({}, {}, {})",
            color.r,
            color.g,
            color.b
        );
    }

    #[test]
    fn test_six_digit_hex() {
        assert_rgb(parse_color("#ff0000"), 1.0, 0.0, 0.0);
        assert_rgb(parse_color("00ff00"), 0.0, 1.0, 0.0);
        assert_rgb(parse_color("#7C45D6"), 124.0 / 255.0, 69.0 / 255.0, 214.0 / 255.0);
    }

    #[test]
    fn test_three_digit_hex_expands() {
        assert_rgb(parse_color("#f00"), 1.0, 0.0, 0.0);
        assert_rgb(parse_color("abc"), 170.0 / 255.0, 187.0 / 255.0, 204.0 / 255.0);
    }

    #[test]
    fn test_hex_case_insensitive() {
        assert_eq!(parse_color("#FF00FF"), parse_color("#ff00ff"));
    }

    #[test]
    fn test_rgb_notation() {
        assert_rgb(parse_color("rgb(255, 0, 128)"), 1.0, 0.0, 128.0 / 255.0);
        assert_rgb(parse_color("rgb(0,0,0)"), 0.0, 0.0, 0.0);
        assert_rgb(parse_color("RGB( 12 , 34 , 56 )"), 12.0 / 255.0, 34.0 / 255.0, 56.0 / 255.0);
    }

    #[test]
    fn test_rgba_alpha_ignored() {
        assert_rgb(parse_color("rgba(255, 0, 0, 0.25)"), 1.0, 0.0, 0.0);
    }

    #[test]
    fn test_rgb_clamps_overflow() {
        assert_rgb(parse_color("rgb(300, 999, 255)"), 1.0, 1.0, 1.0);
    }

    #[test]
    fn test_rgb_rejects_non_integers() {
        // falls through the whole chain to black
        assert_eq!(parse_color("rgb(1.5, 0, 0)"), Rgb::BLACK);
        assert_eq!(parse_color("rgb(-1, 0, 0)"), Rgb::BLACK);
        assert_eq!(parse_color("rgb(255, 0)"), Rgb::BLACK);
    }

    #[test]
    fn test_hsl_primary_colors() {
        assert_rgb(parse_color("hsl(0, 100%, 50%)"), 1.0, 0.0, 0.0);
        assert_rgb(parse_color("hsl(120, 100%, 50%)"), 0.0, 1.0, 0.0);
        assert_rgb(parse_color("hsl(240, 100%, 50%)"), 0.0, 0.0, 1.0);
    }

    #[test]
    fn test_hsl_zero_saturation_is_grey() {
        assert_rgb(parse_color("hsl(200, 0%, 40%)"), 0.4, 0.4, 0.4);
    }

    #[test]
    fn test_hsla_accepted() {
        assert_rgb(parse_color("hsla(0, 100%, 50%, 0.5)"), 1.0, 0.0, 0.0);
    }

    #[test]
    fn test_hsl_requires_percent_signs() {
        assert_eq!(parse_color("hsl(0, 100, 50)"), Rgb::BLACK);
    }

    #[test]
    fn test_named_colors_resolve() {
        assert_rgb(parse_color("red"), 1.0, 0.0, 0.0);
        assert_rgb(parse_color("  Tomato  "), 1.0, 99.0 / 255.0, 71.0 / 255.0);
    }

    #[test]
    fn test_unparseable_falls_back_to_black() {
        assert_eq!(parse_color(""), Rgb::BLACK);
        assert_eq!(parse_color("#12"), Rgb::BLACK);
        assert_eq!(parse_color("#12345"), Rgb::BLACK);
        assert_eq!(parse_color("not-a-color"), Rgb::BLACK);
        assert_eq!(parse_color("url(foo)"), Rgb::BLACK);
    }

    #[test]
    fn test_to_bytes_round_trips() {
        assert_eq!(parse_color("#7C45D6").to_bytes(), [0x7C, 0x45, 0xD6]);
        assert_eq!(Rgb::from_u8(12, 200, 255).to_bytes(), [12, 200, 255]);
    }
}
