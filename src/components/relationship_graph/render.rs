//! Canvas rendering for the relationship graph.
//!
//! Executes a scene built by [`super::scene::build_scene`] on a 2d context.
//! Paint order is the order of the commands:
//! 1. Background and grid (screen space)
//! 2. Edge lines, then edge labels (world space)
//! 3. Nodes with avatar, name and label dots

use std::f64::consts::PI;

use wasm_bindgen::JsValue;
use web_sys::{CanvasRenderingContext2d, HtmlImageElement, Path2d};

use super::avatar::AvatarCache;
use super::scene::{DrawCommand, Stroke};

/// Person outline on a 24x24 grid, shown when a character has no usable photo.
const PERSON_GLYPH: &str = "M16 7a4 4 0 11-8 0 4 4 0 018 0zM12 14a7 7 0 00-7 7h14a7 7 0 00-7-7z";
const GLYPH_SIZE: f64 = 32.0;

/// Renders a complete frame.
pub fn render(scene: &[DrawCommand], ctx: &CanvasRenderingContext2d, avatars: &mut AvatarCache) {
	let glyph = Path2d::new_with_path_string(PERSON_GLYPH).ok();

	for command in scene {
		match command {
			DrawCommand::Clear {
				width,
				height,
				color,
			} => {
				ctx.set_fill_style_str(color);
				ctx.fill_rect(0.0, 0.0, *width, *height);
			}
			DrawCommand::Grid {
				width,
				height,
				spacing,
				color,
			} => draw_grid(ctx, *width, *height, *spacing, color),
			DrawCommand::PushTransform(t) => {
				ctx.save();
				let _ = ctx.translate(t.x, t.y);
				let _ = ctx.scale(t.k, t.k);
			}
			DrawCommand::PopTransform => ctx.restore(),
			DrawCommand::Line {
				from,
				to,
				color,
				width,
				dash,
			} => {
				ctx.set_stroke_style_str(color);
				ctx.set_line_width(*width);
				set_dash(ctx, dash);
				ctx.begin_path();
				ctx.move_to(from.0, from.1);
				ctx.line_to(to.0, to.1);
				ctx.stroke();
				set_dash(ctx, &[]);
			}
			DrawCommand::EdgeLabel {
				center,
				text,
				font,
				text_color,
				background,
				border,
				corner_radius,
				padding,
			} => {
				ctx.set_font(font);
				let Ok(metrics) = ctx.measure_text(text) else {
					continue;
				};
				let ascent = metrics.actual_bounding_box_ascent();
				let descent = metrics.actual_bounding_box_descent();
				let (w, h) = (metrics.width(), ascent + descent);
				let (bw, bh) = (w + padding.0 * 2.0, h + padding.1 * 2.0);

				rounded_rect(ctx, center.0 - bw / 2.0, center.1 - bh / 2.0, bw, bh, *corner_radius);
				ctx.set_fill_style_str(background);
				ctx.fill();
				ctx.set_stroke_style_str(border);
				ctx.set_line_width(1.0);
				ctx.stroke();

				// Baseline chosen so the glyph box is centred on the midpoint.
				ctx.set_fill_style_str(text_color);
				ctx.set_text_align("center");
				ctx.set_text_baseline("alphabetic");
				let _ = ctx.fill_text(text, center.0, center.1 + (ascent - descent) / 2.0);
			}
			DrawCommand::Circle {
				center,
				radius,
				fill,
				stroke,
			} => {
				ctx.begin_path();
				let _ = ctx.arc(center.0, center.1, *radius, 0.0, 2.0 * PI);
				if let Some(fill) = fill {
					ctx.set_fill_style_str(fill);
					ctx.fill();
				}
				if let Some(Stroke { color, width }) = stroke {
					ctx.set_stroke_style_str(color);
					ctx.set_line_width(*width);
					ctx.stroke();
				}
			}
			DrawCommand::Avatar {
				center,
				size,
				url,
				placeholder_color,
			} => match url.as_deref().and_then(|url| avatars.image(url)) {
				Some(image) => draw_avatar(ctx, image, *center, *size),
				None => {
					if let Some(glyph) = &glyph {
						draw_placeholder(ctx, glyph, *center, placeholder_color);
					}
				}
			},
			DrawCommand::Text {
				at,
				text,
				font,
				color,
			} => {
				ctx.set_font(font);
				ctx.set_fill_style_str(color);
				ctx.set_text_align("center");
				ctx.set_text_baseline("alphabetic");
				let _ = ctx.fill_text(text, at.0, at.1);
			}
		}
	}
}

fn set_dash(ctx: &CanvasRenderingContext2d, dash: &[f64]) {
	let segments: js_sys::Array = dash.iter().map(|d| JsValue::from_f64(*d)).collect();
	let _ = ctx.set_line_dash(&segments);
}

fn draw_grid(ctx: &CanvasRenderingContext2d, width: f64, height: f64, spacing: f64, color: &str) {
	if spacing <= 0.0 {
		return;
	}
	ctx.set_stroke_style_str(color);
	ctx.set_line_width(1.0);
	ctx.begin_path();
	let mut x = 0.0;
	while x <= width {
		ctx.move_to(x + 0.5, 0.0);
		ctx.line_to(x + 0.5, height);
		x += spacing;
	}
	let mut y = 0.0;
	while y <= height {
		ctx.move_to(0.0, y + 0.5);
		ctx.line_to(width, y + 0.5);
		y += spacing;
	}
	ctx.stroke();
}

fn rounded_rect(ctx: &CanvasRenderingContext2d, x: f64, y: f64, w: f64, h: f64, r: f64) {
	let r = r.min(w / 2.0).min(h / 2.0);
	ctx.begin_path();
	ctx.move_to(x + r, y);
	let _ = ctx.arc_to(x + w, y, x + w, y + h, r);
	let _ = ctx.arc_to(x + w, y + h, x, y + h, r);
	let _ = ctx.arc_to(x, y + h, x, y, r);
	let _ = ctx.arc_to(x, y, x + w, y, r);
	ctx.close_path();
}

/// Draws the image centre-cropped to a square and clipped to a circle.
fn draw_avatar(ctx: &CanvasRenderingContext2d, image: &HtmlImageElement, center: (f64, f64), size: f64) {
	let (iw, ih) = (image.natural_width() as f64, image.natural_height() as f64);
	let side = iw.min(ih);
	if side <= 0.0 {
		return;
	}
	ctx.save();
	ctx.begin_path();
	let _ = ctx.arc(center.0, center.1, size / 2.0, 0.0, 2.0 * PI);
	ctx.clip();
	let _ = ctx.draw_image_with_html_image_element_and_sw_and_sh_and_dx_and_dy_and_dw_and_dh(
		image,
		(iw - side) / 2.0,
		(ih - side) / 2.0,
		side,
		side,
		center.0 - size / 2.0,
		center.1 - size / 2.0,
		size,
		size,
	);
	ctx.restore();
}

fn draw_placeholder(ctx: &CanvasRenderingContext2d, glyph: &Path2d, center: (f64, f64), color: &str) {
	ctx.save();
	let _ = ctx.translate(center.0 - GLYPH_SIZE / 2.0, center.1 - GLYPH_SIZE / 2.0);
	let _ = ctx.scale(GLYPH_SIZE / 24.0, GLYPH_SIZE / 24.0);
	ctx.set_stroke_style_str(color);
	ctx.set_line_width(2.0);
	ctx.set_line_cap("round");
	ctx.set_line_join("round");
	ctx.stroke_with_path(glyph);
	ctx.restore();
}
