//! Visual theming for the seasonal scenes.
//!
//! One [`SceneTheme`] bundles everything a season needs: the static backdrop
//! illustration, the pulsing accent, and the particle emitter configuration.
//! The four seasons are a single table keyed by [`SeasonMode`] — picking a
//! mode picks a row, nothing else differs between them.

use std::f64::consts::PI;

use super::config::{AnimationDescriptor, BlendMode, EmitterConfig, TimingCurve};

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

	/// Lighten the color by a factor (0.0 = unchanged, 1.0 = white)
	pub fn lighten(self, factor: f64) -> Self {
		let f = factor.clamp(0.0, 1.0);
		Self {
			r: (self.r as f64 + (255.0 - self.r as f64) * f) as u8,
			g: (self.g as f64 + (255.0 - self.g as f64) * f) as u8,
			b: (self.b as f64 + (255.0 - self.b as f64) * f) as u8,
			a: self.a,
		}
	}

	/// Darken the color by a factor (0.0 = unchanged, 1.0 = black)
	pub fn darken(self, factor: f64) -> Self {
		let f = 1.0 - factor.clamp(0.0, 1.0);
		Self {
			r: (self.r as f64 * f) as u8,
			g: (self.g as f64 * f) as u8,
			b: (self.b as f64 * f) as u8,
			a: self.a,
		}
	}

	pub fn to_css(self) -> String {
		if (self.a - 1.0).abs() < 0.001 {
			format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
		} else {
			format!("rgba({}, {}, {}, {})", self.r, self.g, self.b, self.a)
		}
	}
}

/// Static backdrop illustration: a vertical sky gradient plus vignette.
#[derive(Clone, Debug)]
pub struct BackgroundStyle {
	/// Gradient color at the top of the viewport.
	pub top: Color,
	/// Gradient color at the bottom of the viewport.
	pub bottom: Color,
	/// Vignette intensity (0.0 = none, 1.0 = strong)
	pub vignette: f64,
}

/// The scene's accent: a glowing disc whose scale pulses on a loop.
///
/// This is decoration around the particle field (a moon, a low sun, a fire
/// glow), not part of the emitter.
#[derive(Clone, Debug)]
pub struct AccentStyle {
	/// Disc center in normalized unit space.
	pub position: (f64, f64),
	/// Disc radius in canvas pixels at pulse midpoint.
	pub radius: f64,
	/// Accent color.
	pub color: Color,
	/// Pulsing scale amplitude (0.0 = static).
	pub pulse_intensity: f64,
	/// Pulsing speed in radians per second.
	pub pulse_speed: f64,
}

/// Complete description of one seasonal scene.
#[derive(Clone, Debug)]
pub struct SceneTheme {
	pub name: &'static str,
	pub background: BackgroundStyle,
	pub accent: AccentStyle,
	pub emitter: EmitterConfig,
}

impl SceneTheme {
	/// Night snowfall under a pale moon.
	pub fn snowfall() -> Self {
		Self {
			name: "snowfall",
			background: BackgroundStyle {
				top: Color::rgb(38, 52, 74),
				bottom: Color::rgb(96, 118, 146),
				vignette: 0.18,
			},
			accent: AccentStyle {
				position: (0.78, 0.18),
				radius: 34.0,
				color: Color::rgba(232, 238, 250, 0.9),
				pulse_intensity: 0.05,
				pulse_speed: 0.7,
			},
			emitter: EmitterConfig {
				assets: vec!["flake", "mote"],
				particle_count: 110,
				creation_point: (0.5, -0.08),
				creation_range: (1.1, 0.05),
				colors: vec![
					Color::rgb(255, 255, 255),
					Color::rgb(225, 235, 248),
					Color::rgb(205, 220, 240),
				],
				alpha: 0.85,
				alpha_range: 0.5,
				alpha_speed: -0.25,
				angle: PI,
				angle_range: 30.0_f64.to_radians(),
				rotation: 0.0,
				rotation_range: 2.0 * PI,
				rotation_speed: PI,
				scale: 0.9,
				scale_range: 0.7,
				scale_speed: 0.15,
				speed: 950.0,
				speed_range: 450.0,
				animation: AnimationDescriptor {
					duration: 8.0,
					curve: TimingCurve::Linear,
					repeats: true,
				},
				delay_threshold: 8.0,
				blend_mode: BlendMode::SourceOver,
			},
		}
	}

	/// Tumbling leaves against an afternoon sky.
	pub fn leaf_drift() -> Self {
		Self {
			name: "leaf_drift",
			background: BackgroundStyle {
				top: Color::rgb(112, 76, 48),
				bottom: Color::rgb(168, 120, 70),
				vignette: 0.14,
			},
			accent: AccentStyle {
				position: (0.22, 0.28),
				radius: 42.0,
				color: Color::rgba(250, 214, 150, 0.85),
				pulse_intensity: 0.06,
				pulse_speed: 0.5,
			},
			emitter: EmitterConfig {
				assets: vec!["leaf"],
				particle_count: 34,
				creation_point: (0.5, -0.1),
				creation_range: (1.1, 0.1),
				colors: vec![
					Color::rgb(178, 94, 44),
					Color::rgb(196, 128, 52),
					Color::rgb(150, 110, 48),
					Color::rgb(130, 72, 38),
				],
				alpha: 0.95,
				alpha_range: 0.2,
				alpha_speed: -0.1,
				angle: PI,
				angle_range: 70.0_f64.to_radians(),
				rotation: 0.0,
				rotation_range: 2.0 * PI,
				rotation_speed: 3.0 * PI,
				scale: 1.0,
				scale_range: 0.5,
				scale_speed: 0.05,
				speed: 820.0,
				speed_range: 380.0,
				animation: AnimationDescriptor {
					duration: 10.0,
					curve: TimingCurve::EaseInOut,
					repeats: true,
				},
				delay_threshold: 10.0,
				blend_mode: BlendMode::SourceOver,
			},
		}
	}

	/// Confetti streamers for the turn of the year.
	pub fn streamers() -> Self {
		Self {
			name: "streamers",
			background: BackgroundStyle {
				top: Color::rgb(26, 18, 46),
				bottom: Color::rgb(62, 38, 88),
				vignette: 0.2,
			},
			accent: AccentStyle {
				position: (0.5, 0.16),
				radius: 28.0,
				color: Color::rgba(255, 226, 140, 0.9),
				pulse_intensity: 0.1,
				pulse_speed: 1.6,
			},
			emitter: EmitterConfig {
				assets: vec!["ribbon", "square"],
				particle_count: 140,
				creation_point: (0.5, -0.06),
				creation_range: (1.15, 0.04),
				colors: vec![
					Color::rgb(236, 94, 104),
					Color::rgb(250, 200, 80),
					Color::rgb(96, 190, 160),
					Color::rgb(110, 150, 240),
					Color::rgb(210, 120, 220),
					Color::rgb(244, 244, 244),
				],
				alpha: 1.0,
				alpha_range: 0.2,
				alpha_speed: -0.15,
				angle: PI,
				angle_range: 40.0_f64.to_radians(),
				rotation: 0.0,
				rotation_range: 2.0 * PI,
				rotation_speed: 4.0 * PI,
				scale: 0.8,
				scale_range: 0.6,
				scale_speed: 0.0,
				speed: 1000.0,
				speed_range: 500.0,
				animation: AnimationDescriptor {
					duration: 6.0,
					curve: TimingCurve::Linear,
					repeats: true,
				},
				delay_threshold: 6.0,
				blend_mode: BlendMode::SourceOver,
			},
		}
	}

	/// Sparks rising from a midsummer bonfire.
	pub fn bonfire() -> Self {
		Self {
			name: "bonfire",
			background: BackgroundStyle {
				top: Color::rgb(18, 14, 24),
				bottom: Color::rgb(70, 38, 28),
				vignette: 0.22,
			},
			accent: AccentStyle {
				position: (0.5, 0.88),
				radius: 58.0,
				color: Color::rgba(255, 168, 72, 0.8),
				pulse_intensity: 0.14,
				pulse_speed: 2.8,
			},
			emitter: EmitterConfig {
				assets: vec!["spark", "mote"],
				particle_count: 70,
				creation_point: (0.5, 0.86),
				creation_range: (0.25, 0.08),
				colors: vec![
					Color::rgb(255, 196, 110),
					Color::rgb(255, 160, 70),
					Color::rgb(250, 220, 160),
				],
				alpha: 0.9,
				alpha_range: 0.4,
				alpha_speed: -0.9,
				angle: 0.0,
				angle_range: 50.0_f64.to_radians(),
				rotation: 0.0,
				rotation_range: 0.0,
				rotation_speed: 0.0,
				scale: 0.8,
				scale_range: 0.5,
				scale_speed: -0.4,
				speed: 420.0,
				speed_range: 320.0,
				animation: AnimationDescriptor {
					duration: 4.0,
					curve: TimingCurve::EaseOut,
					repeats: true,
				},
				delay_threshold: 4.0,
				blend_mode: BlendMode::Lighter,
			},
		}
	}
}

/// The four selectable seasonal modes.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SeasonMode {
	Winter,
	Autumn,
	NewYear,
	Midsummer,
}

impl SeasonMode {
	/// All modes, in picker order.
	pub fn all() -> [SeasonMode; 4] {
		[
			SeasonMode::Winter,
			SeasonMode::Autumn,
			SeasonMode::NewYear,
			SeasonMode::Midsummer,
		]
	}

	/// Picker label for this mode.
	pub fn label(self) -> &'static str {
		match self {
			SeasonMode::Winter => "Winter",
			SeasonMode::Autumn => "Autumn",
			SeasonMode::NewYear => "New Year",
			SeasonMode::Midsummer => "Midsummer",
		}
	}

	/// Parse a mode from its option-string name (as used in host-page
	/// options), case-insensitively.
	pub fn from_name(name: &str) -> Option<SeasonMode> {
		match name.to_ascii_lowercase().as_str() {
			"winter" => Some(SeasonMode::Winter),
			"autumn" => Some(SeasonMode::Autumn),
			"new-year" | "newyear" => Some(SeasonMode::NewYear),
			"midsummer" => Some(SeasonMode::Midsummer),
			_ => None,
		}
	}

	/// The scene table row for this mode.
	pub fn theme(self) -> SceneTheme {
		match self {
			SeasonMode::Winter => SceneTheme::snowfall(),
			SeasonMode::Autumn => SceneTheme::leaf_drift(),
			SeasonMode::NewYear => SceneTheme::streamers(),
			SeasonMode::Midsummer => SceneTheme::bonfire(),
		}
	}
}

impl Default for SeasonMode {
	fn default() -> Self {
		SeasonMode::Winter
	}
}

#[cfg(test)]
mod tests {
	use rand::SeedableRng;
	use rand::rngs::SmallRng;

	use super::super::assets::Sprite;
	use super::super::emitter::ParticleEmitter;
	use super::*;

	#[test]
	fn every_scene_preset_builds_a_population() {
		let mut rng = SmallRng::seed_from_u64(42);
		for mode in SeasonMode::all() {
			let theme = mode.theme();
			let emitter = ParticleEmitter::build(theme.emitter, (1280.0, 720.0), &mut rng)
				.unwrap_or_else(|e| panic!("{}: {e}", theme.name));
			assert!(!emitter.particles().is_empty(), "{}", theme.name);
		}
	}

	#[test]
	fn every_configured_asset_resolves_to_a_sprite() {
		for mode in SeasonMode::all() {
			let theme = mode.theme();
			for asset in &theme.emitter.assets {
				assert!(
					Sprite::resolve(asset).is_some(),
					"{}: unresolvable asset {asset}",
					theme.name
				);
			}
		}
	}

	#[test]
	fn scene_pools_are_never_empty() {
		for mode in SeasonMode::all() {
			let theme = mode.theme();
			assert!(!theme.emitter.assets.is_empty(), "{}", theme.name);
			assert!(!theme.emitter.colors.is_empty(), "{}", theme.name);
			assert!(theme.emitter.delay_threshold >= 0.0, "{}", theme.name);
		}
	}

	#[test]
	fn mode_names_round_trip_through_from_name() {
		assert_eq!(SeasonMode::from_name("winter"), Some(SeasonMode::Winter));
		assert_eq!(SeasonMode::from_name("AUTUMN"), Some(SeasonMode::Autumn));
		assert_eq!(SeasonMode::from_name("new-year"), Some(SeasonMode::NewYear));
		assert_eq!(
			SeasonMode::from_name("midsummer"),
			Some(SeasonMode::Midsummer)
		);
		assert_eq!(SeasonMode::from_name("monsoon"), None);
	}

	#[test]
	fn color_css_formats_opaque_and_translucent() {
		assert_eq!(Color::rgb(255, 0, 128).to_css(), "#ff0080");
		assert_eq!(
			Color::rgba(10, 20, 30, 0.5).to_css(),
			"rgba(10, 20, 30, 0.5)"
		);
	}
}
