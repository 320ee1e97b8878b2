//! Particle emitter: builds and owns one scene's particle population.
//!
//! `build` validates the configuration, then invokes the sampler once per
//! particle to produce an immutable population. The emitter does not drive
//! time itself: the render loop asks each particle for its phase at the
//! current scene time and interpolates from there. Dropping the emitter is
//! the bulk-cancel — it destroys every particle and with them all of their
//! scheduled transitions, which is exactly what a scene switch does.

use rand::Rng;

use super::assets::Sprite;
use super::config::{EmitterConfig, Particle, SceneError};
use super::sampler;

/// A built particle population plus the config it was sampled from.
#[derive(Debug)]
pub struct ParticleEmitter {
	config: EmitterConfig,
	particles: Vec<Particle>,
}

impl ParticleEmitter {
	/// Sample a population of `config.particle_count` particles.
	///
	/// A zero count is not an error and yields an empty population. A
	/// non-zero count with an empty asset or color pool, or with an asset
	/// name no sprite answers to, is rejected here so that sampling and
	/// rendering never have to cope with it.
	pub fn build<R: Rng + ?Sized>(
		config: EmitterConfig,
		viewport: (f64, f64),
		rng: &mut R,
	) -> Result<Self, SceneError> {
		if config.particle_count > 0 {
			if config.assets.is_empty() {
				return Err(SceneError::EmptyAssetPool);
			}
			if config.colors.is_empty() {
				return Err(SceneError::EmptyColorPool);
			}
			if let Some(unknown) = config
				.assets
				.iter()
				.find(|name| Sprite::resolve(name).is_none())
			{
				return Err(SceneError::UnknownAsset((*unknown).to_string()));
			}
		}

		let particles = (0..config.particle_count)
			.map(|_| sampler::sample(&config, viewport, rng))
			.collect();

		Ok(Self { config, particles })
	}

	/// The immutable particle population.
	pub fn particles(&self) -> &[Particle] {
		&self.particles
	}

	/// The configuration this population was sampled from.
	pub fn config(&self) -> &EmitterConfig {
		&self.config
	}
}

#[cfg(test)]
mod tests {
	use std::f64::consts::PI;

	use rand::SeedableRng;
	use rand::rngs::SmallRng;

	use super::super::theme::Color;
	use super::*;

	#[test]
	fn build_produces_exactly_the_requested_count() {
		let config = EmitterConfig {
			assets: vec!["flake"],
			particle_count: 50,
			..EmitterConfig::default()
		};
		let mut rng = SmallRng::seed_from_u64(1);
		let emitter = ParticleEmitter::build(config, (400.0, 800.0), &mut rng).unwrap();
		assert_eq!(emitter.particles().len(), 50);
	}

	#[test]
	fn zero_count_builds_an_empty_population() {
		let mut rng = SmallRng::seed_from_u64(2);
		let emitter =
			ParticleEmitter::build(EmitterConfig::default(), (400.0, 800.0), &mut rng).unwrap();
		assert!(emitter.particles().is_empty());
	}

	#[test]
	fn zero_count_tolerates_empty_pools() {
		let config = EmitterConfig {
			assets: Vec::new(),
			colors: Vec::new(),
			particle_count: 0,
			..EmitterConfig::default()
		};
		let mut rng = SmallRng::seed_from_u64(3);
		assert!(ParticleEmitter::build(config, (400.0, 800.0), &mut rng).is_ok());
	}

	#[test]
	fn empty_asset_pool_is_rejected() {
		let config = EmitterConfig {
			assets: Vec::new(),
			particle_count: 1,
			..EmitterConfig::default()
		};
		let mut rng = SmallRng::seed_from_u64(4);
		let err = ParticleEmitter::build(config, (400.0, 800.0), &mut rng).unwrap_err();
		assert!(matches!(err, SceneError::EmptyAssetPool));
	}

	#[test]
	fn empty_color_pool_is_rejected() {
		let config = EmitterConfig {
			assets: vec!["flake"],
			colors: Vec::new(),
			particle_count: 1,
			..EmitterConfig::default()
		};
		let mut rng = SmallRng::seed_from_u64(5);
		let err = ParticleEmitter::build(config, (400.0, 800.0), &mut rng).unwrap_err();
		assert!(matches!(err, SceneError::EmptyColorPool));
	}

	#[test]
	fn unknown_asset_names_are_rejected() {
		let config = EmitterConfig {
			assets: vec!["flake", "no-such-sprite"],
			particle_count: 1,
			..EmitterConfig::default()
		};
		let mut rng = SmallRng::seed_from_u64(6);
		let err = ParticleEmitter::build(config, (400.0, 800.0), &mut rng).unwrap_err();
		assert!(matches!(err, SceneError::UnknownAsset(name) if name == "no-such-sprite"));
	}

	#[test]
	fn delays_stay_within_the_threshold() {
		let config = EmitterConfig {
			assets: vec!["flake"],
			particle_count: 200,
			delay_threshold: 5.0,
			..EmitterConfig::default()
		};
		let mut rng = SmallRng::seed_from_u64(7);
		let emitter = ParticleEmitter::build(config, (400.0, 800.0), &mut rng).unwrap();
		for p in emitter.particles() {
			assert!(p.delay >= 0.0 && p.delay <= 5.0);
		}
	}

	#[test]
	fn snowfall_scenario_spawns_above_and_falls_down() {
		let config = EmitterConfig {
			assets: vec!["flake"],
			particle_count: 3,
			creation_point: (0.5, -0.1),
			creation_range: (1.0, 0.0),
			colors: vec![Color::rgb(128, 128, 128)],
			alpha_range: 1.0,
			angle: PI,
			angle_range: 10.0_f64.to_radians(),
			speed: 1200.0,
			speed_range: 1200.0,
			..EmitterConfig::default()
		};
		let mut rng = SmallRng::seed_from_u64(8);
		let emitter = ParticleEmitter::build(config, (400.0, 800.0), &mut rng).unwrap();

		assert_eq!(emitter.particles().len(), 3);
		for p in emitter.particles() {
			assert!((p.position.start.1 + 80.0).abs() < 1e-9);
			assert!(p.position.end.1 > p.position.start.1);
			assert!(p.position.start.0 >= 0.0 && p.position.start.0 <= 400.0);
		}
	}
}
