//! Graph state: node and edge arenas, simulation and view transform.
//!
//! Built from scratch from [`GraphData`] whenever the host's characters or
//! relationships change. Nodes, simulation bodies and hit testing all share
//! the same arena index.

use std::collections::HashMap;

use log::{debug, info};

use super::config::{GraphConfig, InteractionConfig};
use super::interaction::{GraphEvent, Hover, PointerMode};
use super::simulation::Simulation;
use super::types::{GraphData, GraphEdge, GraphNode, LineStyle};

/// Pan and zoom transform applied to the entire graph view.
/// `screen = graph * k + (x, y)`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ViewTransform {
	/// Horizontal pan in screen pixels.
	pub x: f64,
	/// Vertical pan in screen pixels.
	pub y: f64,
	/// Zoom factor (1.0 = 100%).
	pub k: f64,
}

impl Default for ViewTransform {
	fn default() -> Self {
		Self {
			x: 0.0,
			y: 0.0,
			k: 1.0,
		}
	}
}

impl ViewTransform {
	/// Screen point to world coordinates.
	pub fn screen_to_graph(&self, sx: f64, sy: f64) -> (f64, f64) {
		((sx - self.x) / self.k, (sy - self.y) / self.k)
	}

	/// World point to screen coordinates.
	pub fn graph_to_screen(&self, gx: f64, gy: f64) -> (f64, f64) {
		(gx * self.k + self.x, gy * self.k + self.y)
	}
}

/// Core graph state combining the layout simulation with view and pointer
/// tracking.
///
/// Created when the component mounts and recreated on every data change,
/// then mutated each frame by the animation loop and by pointer handlers.
pub struct GraphState {
	/// Node snapshots, indexed like the simulation bodies.
	pub nodes: Vec<GraphNode>,
	/// Edges whose endpoints both exist.
	pub edges: Vec<GraphEdge>,
	/// Layout engine owning node positions.
	pub simulation: Simulation,
	/// Current pan and zoom.
	pub transform: ViewTransform,
	/// Pointer gesture in progress.
	pub pointer: PointerMode,
	/// Click, hit and zoom parameters.
	pub interaction: InteractionConfig,
	/// Viewport width in screen pixels.
	pub width: f64,
	/// Viewport height in screen pixels.
	pub height: f64,
	/// World-space radius used for node hit testing.
	pub node_radius: f64,
	/// Last pointer position over the canvas, in screen coordinates.
	pub(super) pointer_at: Option<(f64, f64)>,
	/// Events raised outside a pointer handler, e.g. by a tick.
	pub(super) pending: Vec<GraphEvent>,
	id_to_idx: HashMap<String, usize>,
	needs_redraw: bool,
}

impl GraphState {
	/// Builds nodes and edges from host records and seeds the layout.
	pub fn new(
		data: &GraphData,
		width: f64,
		height: f64,
		config: &GraphConfig,
		node_radius: f64,
	) -> Self {
		let mut nodes: Vec<GraphNode> = Vec::with_capacity(data.characters.len());
		let mut id_to_idx = HashMap::new();

		for character in &data.characters {
			let node = GraphNode::from_character(character);
			// Duplicate ids: last write wins, keeping the first slot.
			match id_to_idx.get(&character.id) {
				Some(&idx) => nodes[idx] = node,
				None => {
					id_to_idx.insert(character.id.clone(), nodes.len());
					nodes.push(node);
				}
			}
		}

		let mut edges = Vec::with_capacity(data.relationships.len());
		let mut dropped = 0usize;
		for rel in &data.relationships {
			match (
				id_to_idx.get(&rel.character1_id),
				id_to_idx.get(&rel.character2_id),
			) {
				(Some(&source), Some(&target)) if source != target => edges.push(GraphEdge {
					id: rel.id.clone(),
					source,
					target,
					label: rel.relationship_type.clone(),
					description: rel.description.clone(),
					line_style: LineStyle::from_label(&rel.relationship_type),
				}),
				_ => {
					debug!(
						"relationship-graph: dropping relationship {} ({} -> {})",
						rel.id, rel.character1_id, rel.character2_id
					);
					dropped += 1;
				}
			}
		}

		let links: Vec<(usize, usize)> = edges.iter().map(|e| (e.source, e.target)).collect();
		let simulation = Simulation::new(
			nodes.len(),
			&links,
			(width / 2.0, height / 2.0),
			config.simulation.clone(),
		);

		info!(
			"relationship-graph: built {} nodes, {} edges ({} dropped)",
			nodes.len(),
			edges.len(),
			dropped
		);

		Self {
			nodes,
			edges,
			simulation,
			transform: ViewTransform::default(),
			pointer: PointerMode::Idle,
			interaction: config.interaction.clone(),
			width,
			height,
			node_radius,
			pointer_at: None,
			pending: Vec::new(),
			id_to_idx,
			needs_redraw: true,
		}
	}

	/// Arena index of a character id.
	pub fn node_index(&self, id: &str) -> Option<usize> {
		self.id_to_idx.get(id).copied()
	}

	/// Live world position of a node.
	pub fn node_position(&self, idx: usize) -> Option<(f64, f64)> {
		self.simulation.position(idx)
	}

	/// Live positions of both endpoints of an edge.
	pub fn edge_endpoints(&self, idx: usize) -> Option<((f64, f64), (f64, f64))> {
		let edge = self.edges.get(idx)?;
		Some((
			self.node_position(edge.source)?,
			self.node_position(edge.target)?,
		))
	}

	/// Screen point to world coordinates under the current transform.
	pub fn screen_to_graph(&self, sx: f64, sy: f64) -> (f64, f64) {
		self.transform.screen_to_graph(sx, sy)
	}

	/// Topmost node under a screen point. Later nodes are drawn on top.
	pub fn node_at_position(&self, sx: f64, sy: f64) -> Option<usize> {
		let (gx, gy) = self.screen_to_graph(sx, sy);
		let r2 = self.node_radius * self.node_radius;
		self.simulation
			.bodies()
			.iter()
			.enumerate()
			.rev()
			.find(|(_, b)| (b.x - gx).powi(2) + (b.y - gy).powi(2) <= r2)
			.map(|(idx, _)| idx)
	}

	/// Topmost edge whose line passes within the hit tolerance of a screen point.
	pub fn edge_at_position(&self, sx: f64, sy: f64) -> Option<usize> {
		let (gx, gy) = self.screen_to_graph(sx, sy);
		let tolerance = self.interaction.edge_hit_tolerance;
		(0..self.edges.len()).rev().find(|&idx| {
			self.edge_endpoints(idx)
				.is_some_and(|(a, b)| distance_to_segment((gx, gy), a, b) <= tolerance)
		})
	}

	/// What the pointer is over.
	pub fn hover(&self) -> Hover {
		self.pointer.hover()
	}

	/// Advances the layout one tick if it still has energy. Moving nodes can
	/// slide under or away from a resting pointer, so hover is re-checked.
	pub fn tick(&mut self) -> bool {
		let moved = self.simulation.step();
		if moved {
			self.needs_redraw = true;
			self.refresh_hover();
		}
		moved
	}

	/// Drains events raised since the last pointer handler ran.
	pub fn take_events(&mut self) -> Vec<GraphEvent> {
		std::mem::take(&mut self.pending)
	}

	/// Updates the viewport; the layout re-centres without a data rebuild.
	pub fn resize(&mut self, width: f64, height: f64) {
		debug!("relationship-graph: resize to {width}x{height}");
		self.width = width;
		self.height = height;
		self.simulation.set_center((width / 2.0, height / 2.0));
		self.needs_redraw = true;
	}

	/// Marks the scene dirty.
	pub fn request_redraw(&mut self) {
		self.needs_redraw = true;
	}

	/// Returns and clears the pending redraw flag.
	pub fn take_redraw(&mut self) -> bool {
		std::mem::take(&mut self.needs_redraw)
	}
}

/// Euclidean distance from `p` to the segment `a`-`b`.
pub fn distance_to_segment(p: (f64, f64), a: (f64, f64), b: (f64, f64)) -> f64 {
	let (dx, dy) = (b.0 - a.0, b.1 - a.1);
	let len2 = dx * dx + dy * dy;
	let t = if len2 > 0.0 {
		(((p.0 - a.0) * dx + (p.1 - a.1) * dy) / len2).clamp(0.0, 1.0)
	} else {
		0.0
	};
	let (cx, cy) = (a.0 + t * dx, a.1 + t * dy);
	((p.0 - cx).powi(2) + (p.1 - cy).powi(2)).sqrt()
}
