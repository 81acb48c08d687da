//! Canvas drawing for the particle fields.
//!
//! Three passes in z-order: background gradient (when the style has one),
//! pairwise links, then the dots themselves.

use std::f64::consts::PI;

use web_sys::CanvasRenderingContext2d;

use super::field::ParticleField;

/// Renders the complete field to the canvas.
pub fn render(field: &ParticleField, ctx: &CanvasRenderingContext2d) {
	draw_background(field, ctx);
	draw_links(field, ctx);
	draw_dots(field, ctx);
}

fn draw_background(field: &ParticleField, ctx: &CanvasRenderingContext2d) {
	let (width, height) = field.size();
	let Some((center, edge)) = field.style().background else {
		ctx.clear_rect(0.0, 0.0, width, height);
		return;
	};

	let Ok(gradient) = ctx.create_radial_gradient(
		width / 2.0,
		height / 2.0,
		0.0,
		width / 2.0,
		height / 2.0,
		width.max(height),
	) else {
		return;
	};
	let _ = gradient.add_color_stop(0.0, &center.to_css());
	let _ = gradient.add_color_stop(1.0, &edge.to_css());

	#[allow(deprecated)]
	ctx.set_fill_style(&gradient);
	ctx.fill_rect(0.0, 0.0, width, height);
}

fn draw_links(field: &ParticleField, ctx: &CanvasRenderingContext2d) {
	let style = field.style();
	if style.link_distance.is_none() {
		return;
	}
	let particles = field.particles();
	let color = style.link_color;

	ctx.set_line_width(1.0);
	for (i, j, strength) in field.links() {
		let (a, b) = (&particles[i], &particles[j]);
		ctx.set_stroke_style_str(&color.with_alpha(color.a * strength).to_css());
		ctx.begin_path();
		ctx.move_to(a.x, a.y);
		ctx.line_to(b.x, b.y);
		ctx.stroke();
	}
}

fn draw_dots(field: &ParticleField, ctx: &CanvasRenderingContext2d) {
	let style = field.style();
	let color = style.color;

	if style.glow > 0.0 {
		ctx.set_shadow_blur(style.glow);
		ctx.set_shadow_color(&color.with_alpha(0.8).to_css());
	}

	for p in field.particles() {
		ctx.set_fill_style_str(&format!(
			"rgba({}, {}, {}, {})",
			color.r, color.g, color.b, p.alpha
		));
		ctx.begin_path();
		let _ = ctx.arc(p.x, p.y, p.size, 0.0, PI * 2.0);
		ctx.fill();
	}

	if style.glow > 0.0 {
		ctx.set_shadow_blur(0.0);
	}
}
