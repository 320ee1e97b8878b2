//! Per-particle randomized sampling.
//!
//! Pure functions from an [`EmitterConfig`] plus an injected random source to
//! one [`Particle`]. Nothing here touches the clock or the DOM, so sampling
//! is reproducible under a seeded RNG and the statistical distribution of any
//! one particle does not depend on how many were sampled before it.

use std::f64::consts::FRAC_PI_2;

use rand::Rng;
use rand::seq::SliceRandom;

use super::config::{EmitterConfig, Particle, ParticleState};
use super::theme::Color;

/// Uniform draw from the interval spanned by `a` and `b`.
///
/// Inverted bounds are swapped rather than rejected, so a negative jitter
/// range inverts the interval instead of panicking. A degenerate interval
/// collapses to its single value without consuming a draw.
fn uniform<R: Rng + ?Sized>(rng: &mut R, a: f64, b: f64) -> f64 {
	let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
	if lo == hi { lo } else { rng.gen_range(lo..hi) }
}

/// Full-width jitter band draw: `U(-range/2, range/2)`.
fn jitter<R: Rng + ?Sized>(rng: &mut R, range: f64) -> f64 {
	uniform(rng, -range / 2.0, range / 2.0)
}

/// Start/end pair for a scalar attribute with a shared jitter draw.
///
/// One draw perturbs the baseline of both keyframes, so the start-to-end
/// delta is always exactly `delta` no matter what the jitter produced.
fn spanned<R: Rng + ?Sized>(
	rng: &mut R,
	base: f64,
	range: f64,
	delta: f64,
) -> ParticleState<f64> {
	let start = base + jitter(rng, range);
	ParticleState::new(start, start + delta)
}

/// Draw one particle's full parameter set from `config`.
///
/// The spawn anchor and jitter band are given in normalized unit space and
/// resolved against `viewport` (width, height in canvas pixels) here; travel
/// distance is already in pixels. The travel direction convention puts angle
/// 0 pointing up the screen and π pointing down, matching how the scene
/// presets aim their particles.
///
/// Pool picks assume non-empty `assets` and `colors`; the emitter validates
/// that before sampling. Called directly with empty pools, the pick degrades
/// to a blank asset and a neutral white tint instead of panicking.
pub fn sample<R: Rng + ?Sized>(
	config: &EmitterConfig,
	viewport: (f64, f64),
	rng: &mut R,
) -> Particle {
	let (vw, vh) = viewport;

	// Position jitter is independent per axis and only moves the spawn
	// point; the end point is purely start + trajectory.
	let (ox, oy) = (
		jitter(rng, config.creation_range.0),
		jitter(rng, config.creation_range.1),
	);
	let start = (
		vw * (config.creation_point.0 + ox),
		vh * (config.creation_point.1 + oy),
	);

	// Rotating the trig convention by -π/2 makes angle 0 travel up and π
	// travel down in canvas coordinates (+y is down).
	let theta = config.angle + jitter(rng, config.angle_range);
	let distance = config.speed + jitter(rng, config.speed_range);
	let end = (
		start.0 + (theta - FRAC_PI_2).cos() * distance,
		start.1 + (theta - FRAC_PI_2).sin() * distance,
	);

	let opacity = spanned(rng, config.alpha, config.alpha_range, config.alpha_speed);
	let scale = spanned(rng, config.scale, config.scale_range, config.scale_speed);
	let rotation = spanned(
		rng,
		config.rotation,
		config.rotation_range,
		config.rotation_speed,
	);

	let asset = config.assets.choose(rng).copied().unwrap_or("");
	let color = config
		.colors
		.choose(rng)
		.copied()
		.unwrap_or(Color::rgb(255, 255, 255));
	let delay = uniform(rng, 0.0, config.delay_threshold);

	Particle {
		asset,
		color,
		position: ParticleState::new(start, end),
		opacity,
		scale,
		rotation,
		delay,
		animation: config.animation,
		blend_mode: config.blend_mode,
	}
}

#[cfg(test)]
mod tests {
	use std::f64::consts::PI;

	use rand::SeedableRng;
	use rand::rngs::SmallRng;

	use super::*;

	fn snow_like_config() -> EmitterConfig {
		EmitterConfig {
			assets: vec!["flake", "mote"],
			particle_count: 10,
			creation_point: (0.5, -0.1),
			creation_range: (1.0, 0.2),
			colors: vec![Color::rgb(230, 238, 245), Color::rgb(255, 255, 255)],
			alpha: 0.8,
			alpha_range: 0.4,
			alpha_speed: -0.2,
			angle: PI,
			angle_range: 0.4,
			rotation: 0.0,
			rotation_range: PI,
			rotation_speed: 2.0,
			scale: 1.0,
			scale_range: 0.6,
			scale_speed: 0.2,
			speed: 900.0,
			speed_range: 300.0,
			delay_threshold: 5.0,
			..EmitterConfig::default()
		}
	}

	#[test]
	fn sampling_is_reproducible_for_a_fixed_seed() {
		let config = snow_like_config();
		let mut a = SmallRng::seed_from_u64(7);
		let mut b = SmallRng::seed_from_u64(7);
		for _ in 0..32 {
			let pa = sample(&config, (400.0, 800.0), &mut a);
			let pb = sample(&config, (400.0, 800.0), &mut b);
			assert_eq!(pa, pb);
		}
	}

	#[test]
	fn start_opacity_stays_inside_the_jitter_band() {
		let config = EmitterConfig {
			assets: vec!["flake"],
			alpha: 0.5,
			alpha_range: 0.4,
			alpha_speed: 0.2,
			..EmitterConfig::default()
		};
		let mut rng = SmallRng::seed_from_u64(11);
		for _ in 0..200 {
			let p = sample(&config, (100.0, 100.0), &mut rng);
			assert!(p.opacity.start >= 0.3 && p.opacity.start <= 0.7);
		}
	}

	#[test]
	fn opacity_delta_is_exactly_the_configured_speed() {
		let config = EmitterConfig {
			assets: vec!["flake"],
			alpha: 0.5,
			alpha_range: 1.0,
			alpha_speed: 0.2,
			..EmitterConfig::default()
		};
		let mut rng = SmallRng::seed_from_u64(13);
		for _ in 0..200 {
			let p = sample(&config, (100.0, 100.0), &mut rng);
			assert!((p.opacity.end - p.opacity.start - 0.2).abs() < 1e-12);
		}
	}

	#[test]
	fn angle_pi_travels_straight_down() {
		let config = EmitterConfig {
			assets: vec!["flake"],
			angle: PI,
			speed: 100.0,
			..EmitterConfig::default()
		};
		let mut rng = SmallRng::seed_from_u64(17);
		let p = sample(&config, (400.0, 800.0), &mut rng);
		assert!((p.position.end.0 - p.position.start.0).abs() < 1e-9);
		assert!((p.position.end.1 - p.position.start.1 - 100.0).abs() < 1e-9);
	}

	#[test]
	fn angle_zero_travels_straight_up() {
		let config = EmitterConfig {
			assets: vec!["flake"],
			angle: 0.0,
			speed: 50.0,
			..EmitterConfig::default()
		};
		let mut rng = SmallRng::seed_from_u64(19);
		let p = sample(&config, (400.0, 800.0), &mut rng);
		assert!((p.position.end.0 - p.position.start.0).abs() < 1e-9);
		assert!((p.position.start.1 - p.position.end.1 - 50.0).abs() < 1e-9);
	}

	#[test]
	fn zero_ranges_collapse_to_the_base_values() {
		let config = EmitterConfig {
			assets: vec!["flake"],
			creation_point: (0.25, 0.75),
			alpha: 0.6,
			scale: 1.5,
			rotation: 0.3,
			..EmitterConfig::default()
		};
		let mut rng = SmallRng::seed_from_u64(23);
		let p = sample(&config, (200.0, 400.0), &mut rng);
		assert_eq!(p.position.start, (50.0, 300.0));
		assert_eq!(p.opacity.start, 0.6);
		assert_eq!(p.scale.start, 1.5);
		assert_eq!(p.rotation.start, 0.3);
	}

	#[test]
	fn negative_ranges_invert_the_interval_instead_of_panicking() {
		let config = EmitterConfig {
			assets: vec!["flake"],
			creation_range: (-1.0, -0.5),
			alpha: 0.5,
			alpha_range: -0.4,
			speed: 100.0,
			speed_range: -50.0,
			..EmitterConfig::default()
		};
		let mut rng = SmallRng::seed_from_u64(29);
		for _ in 0..100 {
			let p = sample(&config, (100.0, 100.0), &mut rng);
			assert!(p.opacity.start >= 0.3 && p.opacity.start <= 0.7);
		}
	}

	#[test]
	fn empty_pools_degrade_to_neutral_defaults() {
		let config = EmitterConfig {
			assets: Vec::new(),
			colors: Vec::new(),
			..EmitterConfig::default()
		};
		let mut rng = SmallRng::seed_from_u64(31);
		let p = sample(&config, (100.0, 100.0), &mut rng);
		assert_eq!(p.asset, "");
		assert_eq!(p.color, Color::rgb(255, 255, 255));
	}
}
