//! Canvas blit for the current frame.

use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, HtmlImageElement};

/// Destination rectangle `(x, y, w, h)` for an image contained and
/// centered inside a canvas, preserving aspect ratio.
///
/// `None` when either box is degenerate.
pub fn contain_rect(
	canvas_w: f64,
	canvas_h: f64,
	image_w: f64,
	image_h: f64,
) -> Option<(f64, f64, f64, f64)> {
	if canvas_w <= 0.0 || canvas_h <= 0.0 || image_w <= 0.0 || image_h <= 0.0 {
		return None;
	}
	let scale = (canvas_w / image_w).min(canvas_h / image_h);
	let w = image_w * scale;
	let h = image_h * scale;
	Some(((canvas_w - w) / 2.0, (canvas_h - h) / 2.0, w, h))
}

/// Sizes the canvas buffer to the viewport and draws `image` contain-fitted
/// and centered. Degenerate dimensions abort silently.
pub fn draw_frame(
	canvas: &HtmlCanvasElement,
	ctx: &CanvasRenderingContext2d,
	image: &HtmlImageElement,
	viewport_w: f64,
	viewport_h: f64,
) {
	canvas.set_width(viewport_w.max(0.0) as u32);
	canvas.set_height(viewport_h.max(0.0) as u32);

	let Some((x, y, w, h)) = contain_rect(
		viewport_w,
		viewport_h,
		image.natural_width() as f64,
		image.natural_height() as f64,
	) else {
		return;
	};

	ctx.clear_rect(0.0, 0.0, viewport_w, viewport_h);
	let _ = ctx.draw_image_with_html_image_element_and_dw_and_dh(image, x, y, w, h);
}
