//! Chat color markup and host version detection.
//!
//! Messages in the config use `&`-codes (`&c`, `&l`, ...) and, on hosts that
//! support them, `#RRGGBB` hex colors. [`ChatFormatter::format`] turns both
//! into the host's `§` wire form:
//!
//! - `&c` → `§c` (the code character is lower-cased)
//! - `#FFAA00` → `§x§f§f§a§a§0§0`
//!
//! Which forms are allowed depends on the host's [`ColorSupport`], derived
//! from its version string by [`HostVersion::parse`].

use bevy_ecs::prelude::Resource;
use log::warn;
use regex::{Captures, Regex};
use std::sync::LazyLock;

/// Section sign that starts every formatting code on the wire.
pub const SECTION: char = '\u{00A7}';

/// Characters accepted after `&`.
const COLOR_CODES: &str = "0123456789AaBbCcDdEeFfKkLlMmNnOoRrXx";

static HEX_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"#([A-Fa-f0-9]{6})").expect("hex color pattern is valid"));

static VERSION_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(\d+)\.(\d+)(?:\.(\d+))?").expect("version pattern is valid"));

/// What color markup the host understands.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ColorSupport {
    /// 1.12 and older.
    Legacy,
    /// `&`-codes only.
    Standard,
    /// `&`-codes and `#RRGGBB` (1.16+).
    Hex,
}

impl ColorSupport {
    pub fn supports_hex(self) -> bool {
        self == ColorSupport::Hex
    }
}

/// Parsed `major.minor[.patch]` of the host.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HostVersion {
    pub raw: String,
    pub major: u32,
    pub minor: u32,
    pub patch: u32,
}

impl HostVersion {
    /// Parse the first `x.y[.z]` found in `raw`, e.g. `1.20.4-R0.1-SNAPSHOT`.
    pub fn parse(raw: &str) -> Option<Self> {
        let caps = VERSION_PATTERN.captures(raw)?;
        let major = caps.get(1)?.as_str().parse().ok()?;
        let minor = caps.get(2)?.as_str().parse().ok()?;
        let patch = caps
            .get(3)
            .and_then(|m| m.as_str().parse().ok())
            .unwrap_or(0);
        Some(HostVersion {
            raw: raw.to_string(),
            major,
            minor,
            patch,
        })
    }

    pub fn color_support(&self) -> ColorSupport {
        match (self.major, self.minor) {
            (0, _) | (1, 0..=12) => ColorSupport::Legacy,
            (1, 13..=15) => ColorSupport::Standard,
            _ => ColorSupport::Hex,
        }
    }
}

/// Color support for a raw version string; unknown formats get `&`-codes only.
pub fn detect_color_support(raw: &str) -> ColorSupport {
    match HostVersion::parse(raw) {
        Some(version) => version.color_support(),
        None => {
            warn!(
                "Could not parse host version '{}', assuming no hex color support",
                raw
            );
            ColorSupport::Standard
        }
    }
}

/// True if `text` contains a `#RRGGBB` color.
pub fn contains_hex(text: &str) -> bool {
    HEX_PATTERN.is_match(text)
}

/// Replace every `%time%` with the decimal value of `seconds`.
pub fn fill_time(template: &str, seconds: i64) -> String {
    template.replace("%time%", &seconds.to_string())
}

/// Translate `alt`-prefixed color codes into `§` codes.
pub fn translate_alternate_codes(alt: char, text: &str) -> String {
    let mut chars: Vec<char> = text.chars().collect();
    for i in 0..chars.len().saturating_sub(1) {
        if chars[i] == alt && COLOR_CODES.contains(chars[i + 1]) {
            chars[i] = SECTION;
            chars[i + 1] = chars[i + 1].to_ascii_lowercase();
        }
    }
    chars.into_iter().collect()
}

fn hex_to_sections(hex: &str) -> String {
    let mut out = String::with_capacity(2 + hex.len() * 2);
    out.push(SECTION);
    out.push('x');
    for c in hex.chars() {
        out.push(SECTION);
        out.push(c.to_ascii_lowercase());
    }
    out
}

/// Formats config messages for the running host.
#[derive(Resource, Clone, Copy, Debug)]
pub struct ChatFormatter {
    pub support: ColorSupport,
}

impl ChatFormatter {
    pub fn new(support: ColorSupport) -> Self {
        ChatFormatter { support }
    }

    pub fn format(&self, text: &str) -> String {
        if self.support.supports_hex() {
            let expanded = HEX_PATTERN.replace_all(text, |caps: &Captures| hex_to_sections(&caps[1]));
            return translate_alternate_codes('&', &expanded);
        }
        if contains_hex(text) {
            warn!("Attempted to use hex colors on a server that doesn't support them!");
            warn!("Message containing hex colors: {}", text);
            return format!("{}cError: Hex colors not supported on this server version!", SECTION);
        }
        translate_alternate_codes('&', text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version_parsing() {
        let v = HostVersion::parse("1.20.4-R0.1-SNAPSHOT").unwrap();
        assert_eq!((v.major, v.minor, v.patch), (1, 20, 4));
        let v = HostVersion::parse("1.8-R0.1-SNAPSHOT").unwrap();
        assert_eq!((v.major, v.minor, v.patch), (1, 8, 0));
        assert!(HostVersion::parse("snapshot").is_none());
    }

    #[test]
    fn test_color_support_by_version() {
        assert_eq!(detect_color_support("1.8.8-R0.1-SNAPSHOT"), ColorSupport::Legacy);
        assert_eq!(detect_color_support("1.12.2-R0.1-SNAPSHOT"), ColorSupport::Legacy);
        assert_eq!(detect_color_support("1.13.2-R0.1-SNAPSHOT"), ColorSupport::Standard);
        assert_eq!(detect_color_support("1.16.5-R0.1-SNAPSHOT"), ColorSupport::Hex);
        assert_eq!(detect_color_support("1.21.1-R0.1-SNAPSHOT"), ColorSupport::Hex);
        assert_eq!(detect_color_support("unknown"), ColorSupport::Standard);
    }

    #[test]
    fn test_translate_codes() {
        assert_eq!(translate_alternate_codes('&', "&cHi &LBold"), "§cHi §lBold");
        // Not a color code: left alone.
        assert_eq!(translate_alternate_codes('&', "Tom & Jerry &z"), "Tom & Jerry &z");
        // Trailing ampersand.
        assert_eq!(translate_alternate_codes('&', "end&"), "end&");
    }

    #[test]
    fn test_hex_expansion_on_hex_host() {
        let f = ChatFormatter::new(ColorSupport::Hex);
        assert_eq!(f.format("#FFAA00hot &lstuff"), "§x§f§f§a§a§0§0hot §lstuff");
    }

    #[test]
    fn test_hex_rejected_on_old_host() {
        let f = ChatFormatter::new(ColorSupport::Standard);
        assert_eq!(
            f.format("#FFAA00hot"),
            "§cError: Hex colors not supported on this server version!"
        );
        assert_eq!(f.format("&eplain"), "§eplain");
    }

    #[test]
    fn test_fill_time() {
        assert_eq!(
            fill_time("&cWait %time% seconds (%time%)", 42),
            "&cWait 42 seconds (42)"
        );
        assert_eq!(fill_time("no placeholder", 7), "no placeholder");
    }

    #[test]
    fn test_contains_hex() {
        assert!(contains_hex("a #12abEF b"));
        assert!(!contains_hex("#12ab"));
        assert!(!contains_hex("&c plain"));
    }
}
