//! Emitter configuration and the particle data model.
//!
//! An [`EmitterConfig`] declares one emission style: which sprites to draw,
//! how many particles to spawn, where they appear, and how opacity, scale,
//! rotation and position evolve between the two keyframes of each particle's
//! animation. The config is an immutable value; building an emitter from it
//! never mutates it, and switching scenes simply builds a new emitter from a
//! different config.

use thiserror::Error;

use super::theme::Color;

/// Name of a drawable sprite asset, resolved by [`super::assets::Sprite`].
pub type ImageRef = &'static str;

/// Errors surfaced when building a scene from a configuration.
#[derive(Debug, Error)]
pub enum SceneError {
	/// The config requests particles but provides no sprite assets to draw.
	#[error("emitter config has an empty asset pool but particle_count > 0")]
	EmptyAssetPool,

	/// The config requests particles but provides no tint colors.
	#[error("emitter config has an empty color pool but particle_count > 0")]
	EmptyColorPool,

	/// An asset name does not resolve to any known sprite.
	#[error("unknown sprite asset: {0}")]
	UnknownAsset(String),
}

/// Canvas composite operation applied while drawing a particle.
///
/// Passed through to the renderer untouched; the emitter attaches it to every
/// particle it builds.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum BlendMode {
	/// Normal alpha compositing.
	#[default]
	SourceOver,
	/// Additive blending, for glowing effects like sparks.
	Lighter,
	/// Screen blending, brightens without clipping to white as fast.
	Screen,
}

impl BlendMode {
	/// The `globalCompositeOperation` value for this blend mode.
	pub fn composite_op(self) -> &'static str {
		match self {
			BlendMode::SourceOver => "source-over",
			BlendMode::Lighter => "lighter",
			BlendMode::Screen => "screen",
		}
	}
}

/// Easing applied by the renderer when interpolating between keyframes.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum TimingCurve {
	/// Constant-rate interpolation.
	#[default]
	Linear,
	/// Starts slow, accelerates.
	EaseIn,
	/// Starts fast, decelerates.
	EaseOut,
	/// Smoothstep: slow at both ends.
	EaseInOut,
}

impl TimingCurve {
	/// Map linear progress `t` in [0, 1] to eased progress.
	pub fn evaluate(self, t: f64) -> f64 {
		let t = t.clamp(0.0, 1.0);
		match self {
			TimingCurve::Linear => t,
			TimingCurve::EaseIn => t * t,
			TimingCurve::EaseOut => 1.0 - (1.0 - t) * (1.0 - t),
			TimingCurve::EaseInOut => t * t * (3.0 - 2.0 * t),
		}
	}
}

/// Shape of the timed animation shared by every particle of one emitter.
///
/// Each particle plays the same descriptor, offset by its own sampled start
/// delay. The descriptor is data only: the renderer evaluates the curve and
/// performs the interpolation.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AnimationDescriptor {
	/// Length of one start-to-end transition in seconds.
	pub duration: f64,
	/// Easing curve applied to the transition.
	pub curve: TimingCurve,
	/// Whether the transition restarts from the start keyframe when it
	/// completes. Non-repeating particles settle at their end keyframe.
	pub repeats: bool,
}

impl Default for AnimationDescriptor {
	fn default() -> Self {
		Self {
			duration: 3.0,
			curve: TimingCurve::Linear,
			repeats: true,
		}
	}
}

/// Declarative description of one particle emission style.
///
/// All `*_range` values are full-width jitter bands: a range of `r` perturbs
/// the base value by a uniform draw from `[-r/2, r/2]`. A range of zero
/// collapses the draw to the base value exactly.
#[derive(Clone, Debug)]
pub struct EmitterConfig {
	/// Sprite pool; each particle picks one uniformly at random.
	pub assets: Vec<ImageRef>,
	/// Number of particles in the population.
	pub particle_count: usize,
	/// Spawn anchor in normalized unit space ([0, 1] maps to the viewport;
	/// values outside place the anchor off-screen).
	pub creation_point: (f64, f64),
	/// Full-width spawn jitter band around the anchor, per axis, in the same
	/// normalized space.
	pub creation_range: (f64, f64),
	/// Tint pool; each particle picks one uniformly at random.
	pub colors: Vec<Color>,
	/// Base start opacity.
	pub alpha: f64,
	/// Full-width jitter band on the start opacity.
	pub alpha_range: f64,
	/// Opacity delta from start to end keyframe.
	pub alpha_speed: f64,
	/// Travel direction in radians. 0 travels up the screen, π travels down.
	pub angle: f64,
	/// Full-width jitter band on the travel direction.
	pub angle_range: f64,
	/// Base start rotation of the sprite, radians.
	pub rotation: f64,
	/// Full-width jitter band on the start rotation.
	pub rotation_range: f64,
	/// Rotation delta from start to end keyframe.
	pub rotation_speed: f64,
	/// Base start scale multiplier.
	pub scale: f64,
	/// Full-width jitter band on the start scale.
	pub scale_range: f64,
	/// Scale delta from start to end keyframe.
	pub scale_speed: f64,
	/// Travel distance in canvas pixels over one animation cycle.
	pub speed: f64,
	/// Full-width jitter band on the travel distance.
	pub speed_range: f64,
	/// Animation shape shared by all particles of this emitter.
	pub animation: AnimationDescriptor,
	/// Upper bound for the per-particle start delay; each particle delays by
	/// a uniform draw from `[0, delay_threshold]` seconds.
	pub delay_threshold: f64,
	/// Composite operation used when drawing the particles.
	pub blend_mode: BlendMode,
}

impl Default for EmitterConfig {
	fn default() -> Self {
		Self {
			assets: Vec::new(),
			particle_count: 0,
			creation_point: (0.5, 0.5),
			creation_range: (0.0, 0.0),
			colors: vec![Color::rgb(255, 255, 255)],
			alpha: 1.0,
			alpha_range: 0.0,
			alpha_speed: 0.0,
			angle: 0.0,
			angle_range: 0.0,
			rotation: 0.0,
			rotation_range: 0.0,
			rotation_speed: 0.0,
			scale: 1.0,
			scale_range: 0.0,
			scale_speed: 0.0,
			speed: 0.0,
			speed_range: 0.0,
			animation: AnimationDescriptor::default(),
			delay_threshold: 0.0,
			blend_mode: BlendMode::SourceOver,
		}
	}
}

/// A start/end keyframe pair for one animatable attribute.
///
/// Sampled once when the particle is built and never mutated; a repeating
/// animation replays the same pair every cycle.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ParticleState<T> {
	/// Value at the start keyframe.
	pub start: T,
	/// Value at the end keyframe.
	pub end: T,
}

impl<T> ParticleState<T> {
	pub fn new(start: T, end: T) -> Self {
		Self { start, end }
	}
}

/// Where a particle is on its timeline at a given scene time.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ParticlePhase {
	/// The start delay has not elapsed; the particle holds its start keyframe.
	Pending,
	/// Mid-transition; carries linear progress in [0, 1). The renderer applies
	/// the descriptor's timing curve on top.
	Animating(f64),
	/// A non-repeating transition has completed; the particle holds its end
	/// keyframe.
	Settled,
}

/// One emitted particle: a sampled set of keyframe pairs plus its timing.
///
/// Immutable after creation. The population `Vec` in the emitter is the sole
/// owner; dropping the emitter destroys all particles and with them every
/// scheduled transition.
#[derive(Clone, Debug, PartialEq)]
pub struct Particle {
	/// Sprite asset drawn for this particle.
	pub asset: ImageRef,
	/// Tint applied to the sprite.
	pub color: Color,
	/// Canvas position keyframes, pixels.
	pub position: ParticleState<(f64, f64)>,
	/// Opacity keyframes.
	pub opacity: ParticleState<f64>,
	/// Scale multiplier keyframes.
	pub scale: ParticleState<f64>,
	/// Sprite rotation keyframes, radians.
	pub rotation: ParticleState<f64>,
	/// Individually sampled start delay, seconds.
	pub delay: f64,
	/// Animation shape shared with the rest of the population.
	pub animation: AnimationDescriptor,
	/// Composite operation used when drawing.
	pub blend_mode: BlendMode,
}

impl Particle {
	/// Timeline phase at `elapsed` seconds of scene time.
	///
	/// Repeating descriptors loop forever via modulo arithmetic over the same
	/// keyframe pair; non-repeating descriptors settle at the end keyframe. A
	/// non-positive duration settles immediately once the delay has elapsed.
	pub fn phase(&self, elapsed: f64) -> ParticlePhase {
		let local = elapsed - self.delay;
		if local < 0.0 {
			return ParticlePhase::Pending;
		}
		let duration = self.animation.duration;
		if duration <= 0.0 {
			return ParticlePhase::Settled;
		}
		if self.animation.repeats {
			ParticlePhase::Animating((local % duration) / duration)
		} else if local >= duration {
			ParticlePhase::Settled
		} else {
			ParticlePhase::Animating(local / duration)
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	fn particle_with(delay: f64, duration: f64, repeats: bool) -> Particle {
		Particle {
			asset: "flake",
			color: Color::rgb(255, 255, 255),
			position: ParticleState::new((0.0, 0.0), (0.0, 100.0)),
			opacity: ParticleState::new(1.0, 0.0),
			scale: ParticleState::new(1.0, 1.0),
			rotation: ParticleState::new(0.0, 0.0),
			delay,
			animation: AnimationDescriptor {
				duration,
				curve: TimingCurve::Linear,
				repeats,
			},
			blend_mode: BlendMode::SourceOver,
		}
	}

	#[test]
	fn curves_hit_their_endpoints() {
		for curve in [
			TimingCurve::Linear,
			TimingCurve::EaseIn,
			TimingCurve::EaseOut,
			TimingCurve::EaseInOut,
		] {
			assert_eq!(curve.evaluate(0.0), 0.0, "{curve:?} at 0");
			assert_eq!(curve.evaluate(1.0), 1.0, "{curve:?} at 1");
		}
	}

	#[test]
	fn curves_clamp_out_of_range_progress() {
		assert_eq!(TimingCurve::EaseInOut.evaluate(-0.5), 0.0);
		assert_eq!(TimingCurve::EaseInOut.evaluate(1.5), 1.0);
	}

	#[test]
	fn phase_is_pending_before_the_delay_elapses() {
		let p = particle_with(2.0, 4.0, true);
		assert_eq!(p.phase(0.0), ParticlePhase::Pending);
		assert_eq!(p.phase(1.999), ParticlePhase::Pending);
	}

	#[test]
	fn phase_animates_after_the_delay() {
		let p = particle_with(2.0, 4.0, false);
		match p.phase(3.0) {
			ParticlePhase::Animating(t) => assert!((t - 0.25).abs() < 1e-12),
			other => panic!("expected Animating, got {other:?}"),
		}
	}

	#[test]
	fn non_repeating_particles_settle_at_the_end() {
		let p = particle_with(0.0, 4.0, false);
		assert_eq!(p.phase(4.0), ParticlePhase::Settled);
		assert_eq!(p.phase(100.0), ParticlePhase::Settled);
	}

	#[test]
	fn repeating_particles_replay_the_same_cycle() {
		let p = particle_with(1.0, 4.0, true);
		let first = p.phase(1.0 + 1.0);
		let second = p.phase(1.0 + 1.0 + 4.0);
		let tenth = p.phase(1.0 + 1.0 + 36.0);
		assert_eq!(first, second);
		assert_eq!(first, tenth);
	}

	#[test]
	fn zero_duration_settles_once_the_delay_has_elapsed() {
		let p = particle_with(0.5, 0.0, true);
		assert_eq!(p.phase(0.0), ParticlePhase::Pending);
		assert_eq!(p.phase(0.5), ParticlePhase::Settled);
	}

	#[test]
	fn blend_modes_map_to_composite_operations() {
		assert_eq!(BlendMode::SourceOver.composite_op(), "source-over");
		assert_eq!(BlendMode::Lighter.composite_op(), "lighter");
		assert_eq!(BlendMode::Screen.composite_op(), "screen");
	}

	#[test]
	fn default_config_carries_a_neutral_color() {
		let config = EmitterConfig::default();
		assert_eq!(config.colors.len(), 1);
		assert_eq!(config.particle_count, 0);
	}
}
