//! Visual theming for the particle field.
//!
//! Provides the RGBA color model, the light and dark palettes, and parsing of
//! CSS color overrides supplied through configuration.

use std::str::FromStr;

use serde::Deserialize;

/// RGBA color representation.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Color {
	pub r: u8,
	pub g: u8,
	pub b: u8,
	pub a: f64,
}

impl Color {
	pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
		Self { r, g, b, a: 1.0 }
	}

	pub const fn rgba(r: u8, g: u8, b: u8, a: f64) -> Self {
		Self { r, g, b, a }
	}

	pub fn with_alpha(self, a: f64) -> Self {
		Self { a, ..self }
	}

	pub fn to_css(self) -> String {
		if (self.a - 1.0).abs() < 0.001 {
			format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
		} else {
			format!("rgba({}, {}, {}, {})", self.r, self.g, self.b, self.a)
		}
	}
}

/// Which palette is active. Mirrors the page's `data-theme` attribute.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ThemeMode {
	#[default]
	Light,
	Dark,
}

impl ThemeMode {
	/// Resolve the mode from an optional attribute value. Anything that is
	/// not `"dark"` falls back to light.
	pub fn from_attribute(value: Option<&str>) -> Self {
		value.and_then(|v| v.parse().ok()).unwrap_or_default()
	}
}

impl FromStr for ThemeMode {
	type Err = ();

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		match s.trim().to_ascii_lowercase().as_str() {
			"light" => Ok(Self::Light),
			"dark" => Ok(Self::Dark),
			_ => Err(()),
		}
	}
}

/// Colors used for one frame of drawing.
///
/// The alpha of `line` and `wave` is the base opacity that distance and
/// age fading multiply into.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Palette {
	pub particle: Color,
	pub line: Color,
	pub wave: Color,
	pub special: Color,
}

impl Palette {
	/// Muted slate on a pale page
	pub fn light() -> Self {
		Self {
			particle: Color::rgba(71, 85, 105, 0.7),
			line: Color::rgba(100, 116, 139, 0.35),
			wave: Color::rgba(100, 116, 139, 0.5),
			special: Color::rgba(217, 119, 6, 0.9),
		}
	}

	/// Soft steel blue on a dark page
	pub fn dark() -> Self {
		Self {
			particle: Color::rgba(148, 163, 184, 0.7),
			line: Color::rgba(140, 160, 180, 0.3),
			wave: Color::rgba(140, 160, 180, 0.45),
			special: Color::rgba(251, 191, 36, 0.9),
		}
	}

	/// Apply CSS overrides on top of this palette. Channels missing from an
	/// override keep this palette's value.
	pub fn with_overrides(self, overrides: &PaletteOverrides) -> Self {
		let pick = |css: &Option<String>, base: Color| {
			css.as_deref().map_or(base, |s| parse_color(s, base))
		};
		Self {
			particle: pick(&overrides.particle, self.particle),
			line: pick(&overrides.line, self.line),
			wave: pick(&overrides.wave, self.wave),
			special: pick(&overrides.special, self.special),
		}
	}
}

/// Optional CSS color strings replacing palette entries.
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(default)]
pub struct PaletteOverrides {
	pub particle: Option<String>,
	pub line: Option<String>,
	pub wave: Option<String>,
	pub special: Option<String>,
}

/// Both palettes, resolved once per session.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Palettes {
	pub light: Palette,
	pub dark: Palette,
}

impl Palettes {
	pub fn resolve(light: &PaletteOverrides, dark: &PaletteOverrides) -> Self {
		Self {
			light: Palette::light().with_overrides(light),
			dark: Palette::dark().with_overrides(dark),
		}
	}

	pub fn get(&self, mode: ThemeMode) -> &Palette {
		match mode {
			ThemeMode::Light => &self.light,
			ThemeMode::Dark => &self.dark,
		}
	}
}

/// Parses a CSS color string into a [`Color`].
/// Supports hex (`#RRGGBB`, `#RGB`) and `rgb()`/`rgba()` functional notation.
/// Any channel that is missing or unreadable is taken from `fallback`.
pub fn parse_color(color_str: &str, fallback: Color) -> Color {
	let color_str = color_str.trim();
	if let Some(hex) = color_str.strip_prefix('#') {
		let channel = |range: std::ops::Range<usize>, default: u8| {
			hex.get(range)
				.and_then(|s| u8::from_str_radix(s, 16).ok())
				.unwrap_or(default)
		};
		match hex.len() {
			6 => Color::rgba(
				channel(0..2, fallback.r),
				channel(2..4, fallback.g),
				channel(4..6, fallback.b),
				fallback.a,
			),
			3 => {
				let short = |i: usize, default: u8| {
					channel(i..i + 1, default / 17).saturating_mul(17)
				};
				Color::rgba(
					short(0, fallback.r),
					short(1, fallback.g),
					short(2, fallback.b),
					fallback.a,
				)
			}
			_ => fallback,
		}
	} else if color_str.starts_with("rgb") {
		let nums: Vec<&str> = color_str
			.trim_start_matches("rgba(")
			.trim_start_matches("rgb(")
			.trim_end_matches(')')
			.split(',')
			.collect();
		let r = nums
			.first()
			.and_then(|s| s.trim().parse().ok())
			.unwrap_or(fallback.r);
		let g = nums
			.get(1)
			.and_then(|s| s.trim().parse().ok())
			.unwrap_or(fallback.g);
		let b = nums
			.get(2)
			.and_then(|s| s.trim().parse().ok())
			.unwrap_or(fallback.b);
		let a = nums
			.get(3)
			.and_then(|s| s.trim().parse::<f64>().ok())
			.filter(|a| a.is_finite())
			.map(|a| a.clamp(0.0, 1.0))
			.unwrap_or(fallback.a);
		Color::rgba(r, g, b, a)
	} else {
		fallback
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	const BASE: Color = Color::rgba(10, 20, 30, 0.4);

	#[test]
	fn parses_full_hex_and_keeps_fallback_alpha() {
		assert_eq!(parse_color("#ff8000", BASE), Color::rgba(255, 128, 0, 0.4));
	}

	#[test]
	fn parses_short_hex() {
		assert_eq!(parse_color("#f80", BASE), Color::rgba(255, 136, 0, 0.4));
	}

	#[test]
	fn rgba_with_all_channels() {
		assert_eq!(
			parse_color("rgba(1, 2, 3, 0.25)", BASE),
			Color::rgba(1, 2, 3, 0.25)
		);
	}

	#[test]
	fn missing_channels_fall_back() {
		assert_eq!(parse_color("rgb(200)", BASE), Color::rgba(200, 20, 30, 0.4));
		assert_eq!(
			parse_color("rgba(1, oops, 3)", BASE),
			Color::rgba(1, 20, 3, 0.4)
		);
	}

	#[test]
	fn garbage_is_the_fallback() {
		assert_eq!(parse_color("cornflowerblue", BASE), BASE);
		assert_eq!(parse_color("#12", BASE), BASE);
	}

	#[test]
	fn theme_mode_from_attribute() {
		assert_eq!(ThemeMode::from_attribute(Some("dark")), ThemeMode::Dark);
		assert_eq!(ThemeMode::from_attribute(Some(" DARK ")), ThemeMode::Dark);
		assert_eq!(ThemeMode::from_attribute(Some("sepia")), ThemeMode::Light);
		assert_eq!(ThemeMode::from_attribute(None), ThemeMode::Light);
	}

	#[test]
	fn overrides_replace_only_named_entries() {
		let overrides = PaletteOverrides {
			special: Some("#00ff00".into()),
			..Default::default()
		};
		let palettes = Palettes::resolve(&overrides, &PaletteOverrides::default());
		assert_eq!(palettes.light.special.g, 255);
		assert_eq!(palettes.light.particle, Palette::light().particle);
		assert_eq!(*palettes.get(ThemeMode::Dark), Palette::dark());
	}

	#[test]
	fn css_output() {
		assert_eq!(Color::rgb(255, 0, 16).to_css(), "#ff0010");
		assert_eq!(
			Color::rgb(1, 2, 3).with_alpha(0.5).to_css(),
			"rgba(1, 2, 3, 0.5)"
		);
	}
}
