//! Seasonal background scene component.
//!
//! Renders an animated seasonal backdrop on an HTML canvas:
//! - A static illustration (sky gradient, vignette, pulsing accent)
//! - A looping particle field (snow, leaves, confetti, or fire sparks)
//! - Four preset scenes selected through a reactive mode signal
//!
//! The particle field is driven by a declarative [`EmitterConfig`]: a
//! population of particles is sampled once per scene, each with randomized
//! start/end keyframes, and replayed on an individually delayed loop.
//!
//! # Example
//!
//! ```ignore
//! use seasonscape::{SeasonMode, SeasonalSceneCanvas};
//!
//! let mode = RwSignal::new(SeasonMode::Winter);
//!
//! view! { <SeasonalSceneCanvas mode=mode fullscreen=true /> }
//! ```

mod assets;
mod component;
mod config;
mod emitter;
mod render;
pub mod sampler;
pub mod theme;

pub use assets::Sprite;
pub use component::SeasonalSceneCanvas;
pub use config::{
	AnimationDescriptor, BlendMode, EmitterConfig, ImageRef, Particle, ParticlePhase,
	ParticleState, SceneError, TimingCurve,
};
pub use emitter::ParticleEmitter;
pub use theme::{SceneTheme, SeasonMode};
