//! Frame description built from [`GraphState`] and [`Theme`].
//!
//! The scene is a flat list of [`DrawCommand`]s in paint order: background
//! in screen space, then edges, edge labels and nodes inside the view
//! transform. Keeping it free of canvas calls lets geometry and hover
//! styling be tested natively.

use std::f64::consts::{FRAC_PI_2, TAU};

use super::interaction::Hover;
use super::state::{GraphState, ViewTransform};
use super::theme::{Color, Theme};

/// Outline of a shape.
#[derive(Clone, Debug, PartialEq)]
pub struct Stroke {
	/// CSS color.
	pub color: String,
	/// Line width.
	pub width: f64,
}

/// One canvas drawing step. Colors are CSS strings; coordinates inside a
/// [`DrawCommand::PushTransform`] block are world units.
#[derive(Clone, Debug, PartialEq)]
pub enum DrawCommand {
	/// Fill the whole canvas.
	Clear {
		/// Canvas width.
		width: f64,
		/// Canvas height.
		height: f64,
		/// Background fill.
		color: String,
	},
	/// Decorative screen-space grid.
	Grid {
		/// Canvas width.
		width: f64,
		/// Canvas height.
		height: f64,
		/// Cell size.
		spacing: f64,
		/// Line color.
		color: String,
	},
	/// Enter world space.
	PushTransform(ViewTransform),
	/// Back to screen space.
	PopTransform,
	/// Straight relationship line.
	Line {
		/// Source node center.
		from: (f64, f64),
		/// Target node center.
		to: (f64, f64),
		/// Stroke color including opacity.
		color: String,
		/// Stroke width.
		width: f64,
		/// Dash segments; empty is solid.
		dash: &'static [f64],
	},
	/// Text on a rounded, bordered box centred at `center`.
	EdgeLabel {
		/// Edge midpoint.
		center: (f64, f64),
		/// Relationship type.
		text: String,
		/// CSS font shorthand.
		font: &'static str,
		/// Text fill.
		text_color: String,
		/// Box fill.
		background: String,
		/// Box outline.
		border: String,
		/// Box corner radius.
		corner_radius: f64,
		/// Horizontal and vertical padding around the text bounds.
		padding: (f64, f64),
	},
	/// Filled and/or outlined circle.
	Circle {
		/// Circle center.
		center: (f64, f64),
		/// Circle radius.
		radius: f64,
		/// Fill color, if filled.
		fill: Option<String>,
		/// Outline, if outlined.
		stroke: Option<Stroke>,
	},
	/// Circular avatar, or the person glyph when `url` is absent or the
	/// image has not loaded.
	Avatar {
		/// Node center.
		center: (f64, f64),
		/// Side of the square the image is cropped to.
		size: f64,
		/// Image URL.
		url: Option<String>,
		/// Glyph stroke color.
		placeholder_color: String,
	},
	/// Horizontally centred text with its baseline at `at`.
	Text {
		/// Baseline anchor.
		at: (f64, f64),
		/// Text to draw.
		text: String,
		/// CSS font shorthand.
		font: &'static str,
		/// Text fill.
		color: String,
	},
}

fn edge_color(color: Color, opacity: f64) -> String {
	color.with_alpha(color.a * opacity).to_css()
}

/// Offsets of `count` label dots spread evenly on a circle, starting at the
/// top and going clockwise.
pub fn marker_offsets(count: usize, orbit: f64) -> Vec<(f64, f64)> {
	(0..count)
		.map(|i| {
			let angle = i as f64 * TAU / count as f64 - FRAC_PI_2;
			(orbit * angle.cos(), orbit * angle.sin())
		})
		.collect()
}

/// Describes one frame of the graph in paint order.
pub fn build_scene(state: &GraphState, theme: &Theme) -> Vec<DrawCommand> {
	let hover = state.hover();
	let mut scene = Vec::with_capacity(3 + state.edges.len() * 2 + state.nodes.len() * 8);

	scene.push(DrawCommand::Clear {
		width: state.width,
		height: state.height,
		color: theme.background.color.to_css(),
	});
	scene.push(DrawCommand::Grid {
		width: state.width,
		height: state.height,
		spacing: theme.background.grid_spacing,
		color: theme.background.grid_color.to_css(),
	});
	scene.push(DrawCommand::PushTransform(state.transform));

	let es = &theme.edge;
	for (idx, edge) in state.edges.iter().enumerate() {
		let Some((from, to)) = state.edge_endpoints(idx) else {
			continue;
		};
		let (color, width) = if hover == Hover::Edge(idx) {
			(edge_color(es.hover_color, es.hover_opacity), es.hover_width)
		} else {
			(edge_color(es.color, es.opacity), es.width)
		};
		scene.push(DrawCommand::Line {
			from,
			to,
			color,
			width,
			dash: edge.line_style.dash_pattern(),
		});
	}

	let ls = &theme.edge_label;
	for (idx, edge) in state.edges.iter().enumerate() {
		let Some((a, b)) = state.edge_endpoints(idx) else {
			continue;
		};
		scene.push(DrawCommand::EdgeLabel {
			center: ((a.0 + b.0) / 2.0, (a.1 + b.1) / 2.0),
			text: edge.label.clone(),
			font: ls.font,
			text_color: ls.text_color.to_css(),
			background: ls.background.to_css(),
			border: ls.border_color.to_css(),
			corner_radius: ls.corner_radius,
			padding: ls.padding,
		});
	}

	let ns = &theme.node;
	for (idx, node) in state.nodes.iter().enumerate() {
		let Some((x, y)) = state.node_position(idx) else {
			continue;
		};
		let stroke = if hover == Hover::Node(idx) {
			Stroke {
				color: ns.hover_border_color.to_css(),
				width: ns.hover_border_width,
			}
		} else {
			Stroke {
				color: ns.border_color.to_css(),
				width: ns.border_width,
			}
		};
		scene.push(DrawCommand::Circle {
			center: (x, y),
			radius: ns.radius,
			fill: Some(ns.fill.to_css()),
			stroke: Some(stroke),
		});
		scene.push(DrawCommand::Avatar {
			center: (x, y),
			size: ns.avatar_size,
			url: node.avatar_url.clone(),
			placeholder_color: ns.placeholder_color.to_css(),
		});
		scene.push(DrawCommand::Text {
			at: (x, y + ns.name_offset),
			text: node.display_name.clone(),
			font: ns.name_font,
			color: ns.name_color.to_css(),
		});
		let offsets = marker_offsets(node.label_markers.len(), ns.marker_orbit);
		for (marker, (dx, dy)) in node.label_markers.iter().zip(offsets) {
			scene.push(DrawCommand::Circle {
				center: (x + dx, y + dy),
				radius: ns.marker_radius,
				fill: Some(marker.color.clone()),
				stroke: Some(Stroke {
					color: ns.marker_border.to_css(),
					width: 1.0,
				}),
			});
		}
	}

	scene.push(DrawCommand::PopTransform);
	scene
}
