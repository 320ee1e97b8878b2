//! Canvas rendering for the seasonal scenes.
//!
//! Drawing happens in passes: the static backdrop illustration (sky gradient
//! plus pulsing accent), then the particle field, then the vignette. The
//! particle pass is the animation host: it evaluates each particle's timing
//! curve against the scene clock and interpolates between the two sampled
//! keyframes. The emitter only ever hands it keyframe pairs — interpolation
//! lives entirely here.

use std::f64::consts::PI;

use web_sys::CanvasRenderingContext2d;

use super::assets::Sprite;
use super::config::ParticlePhase;
use super::emitter::ParticleEmitter;
use super::theme::{Color, SceneTheme};

fn lerp(a: f64, b: f64, t: f64) -> f64 {
	a + (b - a) * t
}

/// Renders one frame of the scene at `time` seconds since the scene started.
pub fn render(
	ctx: &CanvasRenderingContext2d,
	theme: &SceneTheme,
	emitter: Option<&ParticleEmitter>,
	width: f64,
	height: f64,
	time: f64,
) {
	draw_background(ctx, theme, width, height);
	draw_accent(ctx, theme, width, height, time);

	if let Some(emitter) = emitter {
		draw_particles(ctx, emitter, time);
	}

	if theme.background.vignette > 0.0 {
		draw_vignette(ctx, theme, width, height);
	}
}

fn draw_background(ctx: &CanvasRenderingContext2d, theme: &SceneTheme, width: f64, height: f64) {
	let gradient = ctx.create_linear_gradient(0.0, 0.0, 0.0, height);
	gradient
		.add_color_stop(0.0, &theme.background.top.to_css())
		.unwrap();
	gradient
		.add_color_stop(1.0, &theme.background.bottom.to_css())
		.unwrap();

	#[allow(deprecated)]
	ctx.set_fill_style(&gradient);
	ctx.fill_rect(0.0, 0.0, width, height);
}

fn draw_accent(
	ctx: &CanvasRenderingContext2d,
	theme: &SceneTheme,
	width: f64,
	height: f64,
	time: f64,
) {
	let accent = &theme.accent;
	let pulse = (time * accent.pulse_speed).sin() * accent.pulse_intensity;
	let radius = accent.radius * (1.0 + pulse);
	let (x, y) = (width * accent.position.0, height * accent.position.1);
	let glow_radius = radius * 2.6;

	let gradient = ctx
		.create_radial_gradient(x, y, radius * 0.25, x, y, glow_radius)
		.unwrap();
	gradient
		.add_color_stop(0.0, &accent.color.to_css())
		.unwrap();
	gradient
		.add_color_stop(
			0.45,
			&accent.color.with_alpha(accent.color.a * 0.35).to_css(),
		)
		.unwrap();
	gradient.add_color_stop(1.0, "rgba(0, 0, 0, 0)").unwrap();

	ctx.begin_path();
	let _ = ctx.arc(x, y, glow_radius, 0.0, 2.0 * PI);
	#[allow(deprecated)]
	ctx.set_fill_style(&gradient);
	ctx.fill();
}

fn draw_vignette(ctx: &CanvasRenderingContext2d, theme: &SceneTheme, width: f64, height: f64) {
	let gradient = ctx
		.create_radial_gradient(
			width / 2.0,
			height / 2.0,
			width.min(height) * 0.3,
			width / 2.0,
			height / 2.0,
			width.max(height) * 0.7,
		)
		.unwrap();

	gradient.add_color_stop(0.0, "rgba(0, 0, 0, 0)").unwrap();
	gradient
		.add_color_stop(
			1.0,
			&format!("rgba(0, 0, 0, {})", theme.background.vignette),
		)
		.unwrap();

	#[allow(deprecated)]
	ctx.set_fill_style(&gradient);
	ctx.fill_rect(0.0, 0.0, width, height);
}

fn draw_particles(ctx: &CanvasRenderingContext2d, emitter: &ParticleEmitter, time: f64) {
	for p in emitter.particles() {
		// Pending holds the start keyframe, Settled holds the end one; the
		// curve maps linear cycle progress to eased progress in between.
		let t = match p.phase(time) {
			ParticlePhase::Pending => 0.0,
			ParticlePhase::Animating(linear) => p.animation.curve.evaluate(linear),
			ParticlePhase::Settled => 1.0,
		};

		let alpha = lerp(p.opacity.start, p.opacity.end, t).clamp(0.0, 1.0);
		let scale = lerp(p.scale.start, p.scale.end, t);
		if alpha < 0.005 || scale <= 0.0 {
			continue;
		}

		let Some(sprite) = Sprite::resolve(p.asset) else {
			continue;
		};
		let x = lerp(p.position.start.0, p.position.end.0, t);
		let y = lerp(p.position.start.1, p.position.end.1, t);
		let rotation = lerp(p.rotation.start, p.rotation.end, t);

		ctx.save();
		ctx.set_global_alpha(alpha);
		let _ = ctx.set_global_composite_operation(p.blend_mode.composite_op());
		let _ = ctx.translate(x, y);
		let _ = ctx.rotate(rotation);
		draw_sprite(ctx, sprite, p.color, sprite.base_size() * scale);
		ctx.restore();
	}
}

fn draw_sprite(ctx: &CanvasRenderingContext2d, sprite: Sprite, color: Color, size: f64) {
	match sprite {
		Sprite::Flake => {
			ctx.set_stroke_style_str(&color.to_css());
			ctx.set_line_width((size * 0.16).max(0.6));
			ctx.begin_path();
			for arm in 0..6 {
				let angle = arm as f64 * PI / 3.0;
				ctx.move_to(0.0, 0.0);
				ctx.line_to(angle.cos() * size, angle.sin() * size);
			}
			ctx.stroke();
		}
		Sprite::Mote => {
			ctx.set_fill_style_str(&color.to_css());
			ctx.begin_path();
			let _ = ctx.arc(0.0, 0.0, size * 0.5, 0.0, 2.0 * PI);
			ctx.fill();
		}
		Sprite::Spark => {
			ctx.set_fill_style_str(&color.to_css());
			ctx.fill_rect(-size * 0.12, -size, size * 0.24, size * 2.0);
			ctx.set_fill_style_str(&color.lighten(0.4).to_css());
			ctx.begin_path();
			let _ = ctx.arc(0.0, 0.0, size * 0.35, 0.0, 2.0 * PI);
			ctx.fill();
		}
		Sprite::Ribbon => {
			ctx.set_fill_style_str(&color.to_css());
			ctx.fill_rect(-size * 0.18, -size * 0.5, size * 0.36, size);
		}
		Sprite::Square => {
			ctx.set_fill_style_str(&color.to_css());
			ctx.fill_rect(-size * 0.5, -size * 0.5, size, size);
		}
		Sprite::Leaf => {
			ctx.set_fill_style_str(&color.to_css());
			ctx.begin_path();
			ctx.move_to(0.0, -size * 0.5);
			let _ = ctx.quadratic_curve_to(size * 0.45, 0.0, 0.0, size * 0.5);
			let _ = ctx.quadratic_curve_to(-size * 0.45, 0.0, 0.0, -size * 0.5);
			ctx.fill();
			ctx.set_stroke_style_str(&color.darken(0.3).to_css());
			ctx.set_line_width((size * 0.07).max(0.5));
			ctx.begin_path();
			ctx.move_to(0.0, -size * 0.45);
			ctx.line_to(0.0, size * 0.45);
			ctx.stroke();
		}
	}
}
