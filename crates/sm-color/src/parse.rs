// SPDX-License-Identifier: MIT
//
// CSS color string parsing.
//
// Accepts the forms a design-token stylesheet actually uses:
//
//   #rgb  #rgba  #rrggbb  #rrggbbaa   (leading '#' optional)
//   named colors, `transparent`
//   rgb(59, 130, 246)   rgba(0, 0, 0, 0.1)   rgb(59 130 246 / 50%)
//   hsl(217, 91%, 60%)  hsla(217 91% 60% / 0.5)
//
// `currentColor`, `var()` references and the wide-gamut functions
// (lab(), oklch(), color()) are not colors in this sense and fail.

use std::sync::LazyLock;

use regex::Regex;

use crate::color::Color;
use crate::named;

/// `name(args)` with a color function name, case-insensitive.
static FUNCTIONAL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^(rgba?|hsla?)\(\s*([^()]*?)\s*\)$").expect("color function pattern is valid")
});

/// Parse a CSS color string. Surrounding whitespace is ignored.
pub fn parse_color(input: &str) -> Option<Color> {
    let s = input.trim();
    if s.is_empty() {
        return None;
    }

    if s.eq_ignore_ascii_case("transparent") {
        return Some(Color::TRANSPARENT);
    }

    if let Some(caps) = FUNCTIONAL.captures(s) {
        let func = caps[1].to_ascii_lowercase();
        let args = split_args(&caps[2])?;
        return if func.starts_with("rgb") {
            parse_rgb_args(&args)
        } else {
            parse_hsl_args(&args)
        };
    }

    if let Some((r, g, b)) = named::lookup(s) {
        return Some(Color::rgb8(r, g, b));
    }

    parse_hex(s)
}

// ─── Hex ─────────────────────────────────────────────────────────────────────

fn parse_hex(s: &str) -> Option<Color> {
    let s = s.strip_prefix('#').unwrap_or(s);
    let bytes = s.as_bytes();

    match bytes {
        // #RGB
        [r, g, b] => {
            let (r, g, b) = (parse_hex_digit(*r)?, parse_hex_digit(*g)?, parse_hex_digit(*b)?);
            Some(Color::rgb8(r << 4 | r, g << 4 | g, b << 4 | b))
        }
        // #RGBA
        [r, g, b, a] => {
            let (r, g, b) = (parse_hex_digit(*r)?, parse_hex_digit(*g)?, parse_hex_digit(*b)?);
            let a = parse_hex_digit(*a)?;
            Some(Color::rgba8(r << 4 | r, g << 4 | g, b << 4 | b, f64::from(a << 4 | a) / 255.0))
        }
        // #RRGGBB
        [r1, r0, g1, g0, b1, b0] => Some(Color::rgb8(
            parse_hex_byte(*r1, *r0)?,
            parse_hex_byte(*g1, *g0)?,
            parse_hex_byte(*b1, *b0)?,
        )),
        // #RRGGBBAA
        [r1, r0, g1, g0, b1, b0, a1, a0] => Some(Color::rgba8(
            parse_hex_byte(*r1, *r0)?,
            parse_hex_byte(*g1, *g0)?,
            parse_hex_byte(*b1, *b0)?,
            f64::from(parse_hex_byte(*a1, *a0)?) / 255.0,
        )),
        _ => None,
    }
}

#[inline]
const fn parse_hex_digit(c: u8) -> Option<u8> {
    match c {
        b'0'..=b'9' => Some(c - b'0'),
        b'a'..=b'f' => Some(c - b'a' + 10),
        b'A'..=b'F' => Some(c - b'A' + 10),
        _ => None,
    }
}

#[inline]
const fn parse_hex_byte(hi: u8, lo: u8) -> Option<u8> {
    match (parse_hex_digit(hi), parse_hex_digit(lo)) {
        (Some(hi), Some(lo)) => Some(hi << 4 | lo),
        _ => None,
    }
}

// ─── Functional notation ────────────────────────────────────────────────────

/// Split `a, b, c` / `a b c / d` into 3 or 4 components.
fn split_args(args: &str) -> Option<Vec<&str>> {
    let (main, slash_alpha) = match args.split_once('/') {
        Some((main, alpha)) => (main, Some(alpha.trim())),
        None => (args, None),
    };

    let mut parts: Vec<&str> = if main.contains(',') {
        main.split(',').map(str::trim).collect()
    } else {
        main.split_whitespace().collect()
    };

    if let Some(alpha) = slash_alpha {
        if parts.len() != 3 || alpha.is_empty() {
            return None;
        }
        parts.push(alpha);
    }

    if (3..=4).contains(&parts.len()) && parts.iter().all(|p| !p.is_empty()) {
        Some(parts)
    } else {
        None
    }
}

/// A number, or a percentage scaled so that 100% equals `full`.
fn parse_number_or_percent(s: &str, full: f64) -> Option<f64> {
    let value = match s.strip_suffix('%') {
        Some(pct) => pct.trim().parse::<f64>().ok()? / 100.0 * full,
        None => s.parse::<f64>().ok()?,
    };
    value.is_finite().then_some(value)
}

fn parse_alpha(parts: &[&str]) -> Option<f64> {
    parts
        .get(3)
        .map_or(Some(1.0), |a| parse_number_or_percent(a, 1.0))
}

fn parse_rgb_args(parts: &[&str]) -> Option<Color> {
    let r = parse_number_or_percent(parts[0], 255.0)?;
    let g = parse_number_or_percent(parts[1], 255.0)?;
    let b = parse_number_or_percent(parts[2], 255.0)?;
    let alpha = parse_alpha(parts)?;
    Some(Color::clipped(r, g, b, alpha))
}

fn parse_hsl_args(parts: &[&str]) -> Option<Color> {
    let h = parts[0].strip_suffix("deg").unwrap_or(parts[0]).trim().parse::<f64>().ok()?;
    let s = parse_number_or_percent(parts[1], 1.0)?;
    let l = parse_number_or_percent(parts[2], 1.0)?;
    let alpha = parse_alpha(parts)?;
    if !h.is_finite() {
        return None;
    }

    let (r, g, b) = hsl_to_rgb(h, s.clamp(0.0, 1.0), l.clamp(0.0, 1.0));
    Some(Color::clipped(r * 255.0, g * 255.0, b * 255.0, alpha))
}

/// HSL (hue in degrees, s/l in 0–1) to sRGB in 0–1.
fn hsl_to_rgb(h: f64, s: f64, l: f64) -> (f64, f64, f64) {
    let h = h.rem_euclid(360.0);
    let chroma = (1.0 - 2.0f64.mul_add(l, -1.0).abs()) * s;
    let hp = h / 60.0;
    let x = chroma * (1.0 - (hp % 2.0 - 1.0).abs());
    let (r1, g1, b1) = match hp {
        hp if hp < 1.0 => (chroma, x, 0.0),
        hp if hp < 2.0 => (x, chroma, 0.0),
        hp if hp < 3.0 => (0.0, chroma, x),
        hp if hp < 4.0 => (0.0, x, chroma),
        hp if hp < 5.0 => (x, 0.0, chroma),
        _ => (chroma, 0.0, x),
    };
    let m = l - chroma / 2.0;
    (r1 + m, g1 + m, b1 + m)
}

// ─── Tests ───────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn hex_of(s: &str) -> Option<String> {
        parse_color(s).map(Color::hex)
    }

    #[test]
    fn hex_forms() {
        assert_eq!(hex_of("#3b82f6").as_deref(), Some("#3b82f6"));
        assert_eq!(hex_of("3B82F6").as_deref(), Some("#3b82f6"));
        assert_eq!(hex_of("#fff").as_deref(), Some("#ffffff"));
        assert_eq!(hex_of("#f008").as_deref(), Some("#ff000088"));
        assert_eq!(hex_of("#ff000080").as_deref(), Some("#ff000080"));
    }

    #[test]
    fn hex_rejects_bad_lengths_and_digits() {
        assert!(parse_color("#12345").is_none());
        assert!(parse_color("#ggg").is_none());
        assert!(parse_color("#").is_none());
        assert!(parse_color("#3b82f6ff00").is_none());
    }

    #[test]
    fn whitespace_is_trimmed() {
        assert_eq!(hex_of("  #3b82f6 \n").as_deref(), Some("#3b82f6"));
    }

    #[test]
    fn named_and_transparent() {
        assert_eq!(hex_of("CornflowerBlue").as_deref(), Some("#6495ed"));
        assert_eq!(hex_of("transparent").as_deref(), Some("#00000000"));
    }

    #[test]
    fn rgb_comma_and_space_syntax() {
        assert_eq!(hex_of("rgb(59, 130, 246)").as_deref(), Some("#3b82f6"));
        assert_eq!(hex_of("rgb(59 130 246)").as_deref(), Some("#3b82f6"));
        assert_eq!(hex_of("RGB(100%, 0%, 0%)").as_deref(), Some("#ff0000"));
    }

    #[test]
    fn rgb_with_alpha() {
        assert_eq!(hex_of("rgba(0, 0, 0, 0.5)").as_deref(), Some("#00000080"));
        assert_eq!(hex_of("rgb(0 0 0 / 50%)").as_deref(), Some("#00000080"));
    }

    #[test]
    fn rgb_rejects_wrong_arity() {
        assert!(parse_color("rgb(1, 2)").is_none());
        assert!(parse_color("rgb(1, 2, 3, 4, 5)").is_none());
        assert!(parse_color("rgb(1, , 3)").is_none());
        assert!(parse_color("rgb(a, b, c)").is_none());
    }

    #[test]
    fn hsl_primaries() {
        assert_eq!(hex_of("hsl(0, 100%, 50%)").as_deref(), Some("#ff0000"));
        assert_eq!(hex_of("hsl(120deg 100% 50%)").as_deref(), Some("#00ff00"));
        assert_eq!(hex_of("hsl(240, 100%, 50%)").as_deref(), Some("#0000ff"));
        assert_eq!(hex_of("hsl(0, 0%, 100%)").as_deref(), Some("#ffffff"));
        assert_eq!(hex_of("hsla(0, 0%, 0%, 0.5)").as_deref(), Some("#00000080"));
    }

    #[test]
    fn non_colors_fail() {
        for s in ["", "   ", "not-a-color", "var(--color-primary-500)", "currentColor", "12px"] {
            assert!(parse_color(s).is_none(), "{s:?} should not parse");
        }
    }
}
