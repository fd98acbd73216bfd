//! Visual theme configuration for the relationship graph.
//!
//! Geometry (node radius, avatar size, marker orbit) lives here alongside
//! colors so that hit testing and drawing agree on the same numbers.

/// RGBA color with components in 0-255 range (alpha 0.0-1.0)
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Color {
	/// Red channel.
	pub r: u8,
	/// Green channel.
	pub g: u8,
	/// Blue channel.
	pub b: u8,
	/// Opacity, 0.0 transparent to 1.0 opaque.
	pub a: f64,
}

impl Color {
	/// Opaque color.
	pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
		Self { r, g, b, a: 1.0 }
	}

	/// Color with explicit opacity.
	pub const fn rgba(r: u8, g: u8, b: u8, a: f64) -> Self {
		Self { r, g, b, a }
	}

	/// Same color with opacity replaced.
	pub fn with_alpha(self, a: f64) -> Self {
		Self { a, ..self }
	}

	/// `#rrggbb` when opaque, `rgba(...)` otherwise.
	pub fn to_css(self) -> String {
		if (self.a - 1.0).abs() < 0.001 {
			format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
		} else {
			format!("rgba({}, {}, {}, {})", self.r, self.g, self.b, self.a)
		}
	}
}

/// Canvas background and decorative grid.
#[derive(Clone, Debug)]
pub struct BackgroundStyle {
	/// Fill behind everything.
	pub color: Color,
	/// Grid line color.
	pub grid_color: Color,
	/// Grid cell size in screen pixels.
	pub grid_spacing: f64,
}

/// Relationship line style.
#[derive(Clone, Debug)]
pub struct EdgeStyle {
	/// Line color at rest.
	pub color: Color,
	/// Line width at rest, in world units.
	pub width: f64,
	/// Opacity multiplier at rest.
	pub opacity: f64,
	/// Line color while hovered.
	pub hover_color: Color,
	/// Line width while hovered.
	pub hover_width: f64,
	/// Opacity multiplier while hovered.
	pub hover_opacity: f64,
}

/// Floating relationship label drawn at edge midpoints.
#[derive(Clone, Debug)]
pub struct EdgeLabelStyle {
	/// CSS font shorthand.
	pub font: &'static str,
	/// Label text color.
	pub text_color: Color,
	/// Box fill.
	pub background: Color,
	/// Box outline.
	pub border_color: Color,
	/// Box corner radius.
	pub corner_radius: f64,
	/// Horizontal and vertical padding around the text bounds.
	pub padding: (f64, f64),
}

/// Character node style.
#[derive(Clone, Debug)]
pub struct NodeStyle {
	/// Circle radius, also the hit-test radius.
	pub radius: f64,
	/// Circle fill.
	pub fill: Color,
	/// Circle outline at rest.
	pub border_color: Color,
	/// Outline width at rest.
	pub border_width: f64,
	/// Circle outline while hovered or dragged.
	pub hover_border_color: Color,
	/// Outline width while hovered or dragged.
	pub hover_border_width: f64,
	/// Side of the square avatar region, cropped to a circle.
	pub avatar_size: f64,
	/// Stroke color of the placeholder person glyph.
	pub placeholder_color: Color,
	/// CSS font shorthand for the name.
	pub name_font: &'static str,
	/// Name text color.
	pub name_color: Color,
	/// Baseline offset of the name below the node center.
	pub name_offset: f64,
	/// Radius of one label dot.
	pub marker_radius: f64,
	/// Distance of label dots from the node center.
	pub marker_orbit: f64,
	/// Ring around each label dot.
	pub marker_border: Color,
}

/// Complete visual theme.
#[derive(Clone, Debug)]
pub struct Theme {
	/// Preset name, as accepted by [`Theme::by_name`].
	pub name: &'static str,
	/// Background and grid.
	pub background: BackgroundStyle,
	/// Relationship lines.
	pub edge: EdgeStyle,
	/// Relationship labels.
	pub edge_label: EdgeLabelStyle,
	/// Character nodes.
	pub node: NodeStyle,
}

impl Theme {
	/// Light theme on a white grid (default)
	pub fn light() -> Self {
		Self {
			name: "light",
			background: BackgroundStyle {
				color: Color::rgb(255, 255, 255),
				grid_color: Color::rgb(243, 244, 246),
				grid_spacing: 20.0,
			},
			edge: EdgeStyle {
				color: Color::rgb(107, 114, 128),
				width: 3.0,
				opacity: 0.7,
				hover_color: Color::rgb(59, 130, 246),
				hover_width: 4.0,
				hover_opacity: 0.9,
			},
			edge_label: EdgeLabelStyle {
				font: "500 11px sans-serif",
				text_color: Color::rgb(55, 65, 81),
				background: Color::rgba(255, 255, 255, 0.9),
				border_color: Color::rgb(229, 231, 235),
				corner_radius: 4.0,
				padding: (4.0, 2.0),
			},
			node: NodeStyle {
				radius: 32.0,
				fill: Color::rgb(243, 244, 246),
				border_color: Color::rgb(229, 231, 235),
				border_width: 2.0,
				hover_border_color: Color::rgb(59, 130, 246),
				hover_border_width: 3.0,
				avatar_size: 60.0,
				placeholder_color: Color::rgb(156, 163, 175),
				name_font: "bold 12px sans-serif",
				name_color: Color::rgb(55, 65, 81),
				name_offset: 45.0,
				marker_radius: 4.0,
				marker_orbit: 40.0,
				marker_border: Color::rgb(255, 255, 255),
			},
		}
	}

	/// Dark slate variant with the same geometry
	pub fn slate() -> Self {
		let light = Self::light();
		Self {
			name: "slate",
			background: BackgroundStyle {
				color: Color::rgb(22, 27, 34),
				grid_color: Color::rgb(33, 39, 48),
				..light.background
			},
			edge: EdgeStyle {
				color: Color::rgb(140, 160, 180),
				hover_color: Color::rgb(96, 165, 250),
				..light.edge
			},
			edge_label: EdgeLabelStyle {
				text_color: Color::rgb(226, 232, 240),
				background: Color::rgba(30, 35, 42, 0.9),
				border_color: Color::rgb(51, 65, 85),
				..light.edge_label
			},
			node: NodeStyle {
				fill: Color::rgb(51, 65, 85),
				border_color: Color::rgb(71, 85, 105),
				hover_border_color: Color::rgb(96, 165, 250),
				placeholder_color: Color::rgb(148, 163, 184),
				name_color: Color::rgb(226, 232, 240),
				marker_border: Color::rgb(22, 27, 34),
				..light.node
			},
		}
	}

	/// Looks up a preset by name, falling back to [`Theme::light`].
	pub fn by_name(name: &str) -> Self {
		match name {
			"slate" => Self::slate(),
			_ => Self::light(),
		}
	}
}

impl Default for Theme {
	fn default() -> Self {
		Self::light()
	}
}
