//! Pointer state machine: hover, node drag, background pan and wheel zoom.
//!
//! Handlers take canvas-local screen coordinates and return the
//! [`GraphEvent`]s the host component has to act on. Nothing in here touches
//! the DOM.

use log::debug;

use super::state::GraphState;
use super::tooltip::TooltipContent;
use super::types::{Character, Relationship, find_character, find_relationship};

/// Node drag in progress.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DragState {
	/// Index of the dragged node.
	pub node: usize,
	/// Screen position of the initial press.
	pub start_x: f64,
	/// Screen position of the initial press.
	pub start_y: f64,
	/// World offset from the pointer to the node center at press time.
	pub grab_dx: f64,
	/// World offset from the pointer to the node center at press time.
	pub grab_dy: f64,
	/// Set once the pointer travels past the click tolerance.
	pub moved: bool,
}

/// Background pan in progress.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PanState {
	/// Screen position of the initial press.
	pub start_x: f64,
	/// Screen position of the initial press.
	pub start_y: f64,
	/// Pan offset when the press started.
	pub transform_start_x: f64,
	/// Pan offset when the press started.
	pub transform_start_y: f64,
	/// Edge under the pointer at press time; released in place it is a click.
	pub pressed_edge: Option<usize>,
	/// Set once the pointer travels past the click tolerance.
	pub moved: bool,
}

/// Pointer gesture state of one graph.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub enum PointerMode {
	/// Over empty canvas, or outside it.
	#[default]
	Idle,
	/// Resting over a node.
	HoveringNode(usize),
	/// Resting over an edge; its tooltip is shown.
	HoveringEdge(usize),
	/// Button held on a node.
	DraggingNode(DragState),
	/// Button held on the background or an edge.
	Panning(PanState),
}

/// What the pointer is currently over, for highlighting.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Hover {
	/// Nothing highlighted.
	#[default]
	None,
	/// Node index.
	Node(usize),
	/// Edge index.
	Edge(usize),
}

impl PointerMode {
	/// Highlight implied by the gesture.
	pub fn hover(&self) -> Hover {
		match *self {
			Self::Idle => Hover::None,
			Self::HoveringNode(idx) => Hover::Node(idx),
			Self::HoveringEdge(idx) => Hover::Edge(idx),
			Self::DraggingNode(drag) => Hover::Node(drag.node),
			Self::Panning(pan) => pan.pressed_edge.map_or(Hover::None, Hover::Edge),
		}
	}

	/// Edge whose tooltip should be visible.
	pub fn hovered_edge(&self) -> Option<usize> {
		match self.hover() {
			Hover::Edge(idx) => Some(idx),
			_ => None,
		}
	}

	/// CSS cursor for the canvas.
	pub fn cursor(&self) -> &'static str {
		match self {
			Self::Idle => "grab",
			Self::HoveringNode(_) | Self::HoveringEdge(_) => "pointer",
			Self::DraggingNode(_) | Self::Panning(_) => "grabbing",
		}
	}
}

/// Outcome of a pointer handler, keyed by stable ids so it stays valid
/// after the state borrow ends.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum GraphEvent {
	/// The pointer entered an edge; show its tooltip.
	EdgeEntered(String),
	/// The pointer left the hovered edge.
	EdgeLeft,
	/// A node was pressed and released in place.
	NodeClicked(String),
	/// An edge was pressed and released in place.
	EdgeClicked(String),
}

/// Host-side reaction to a [`GraphEvent`], resolved against the current
/// characters and relationships.
#[derive(Clone, Debug, PartialEq)]
pub enum GraphAction {
	/// Show the relationship tooltip.
	ShowTooltip(TooltipContent),
	/// Hide the relationship tooltip.
	HideTooltip,
	/// Open the detail modal and notify the host.
	OpenCharacter(Character),
	/// Notify the host of an edge click.
	SelectRelationship(Relationship),
}

impl GraphEvent {
	/// Looks the event's id up in the host records. Clicks on ids that are no
	/// longer present resolve to `None`; an edge whose relationship or
	/// endpoints are gone hides the tooltip instead of showing it.
	pub fn resolve(
		&self,
		characters: &[Character],
		relationships: &[Relationship],
	) -> Option<GraphAction> {
		match self {
			GraphEvent::EdgeEntered(id) => Some(
				find_relationship(relationships, id)
					.and_then(|rel| TooltipContent::resolve(rel, characters))
					.map_or(GraphAction::HideTooltip, GraphAction::ShowTooltip),
			),
			GraphEvent::EdgeLeft => Some(GraphAction::HideTooltip),
			GraphEvent::NodeClicked(id) => {
				find_character(characters, id).cloned().map(GraphAction::OpenCharacter)
			}
			GraphEvent::EdgeClicked(id) => find_relationship(relationships, id)
				.cloned()
				.map(GraphAction::SelectRelationship),
		}
	}
}

impl GraphState {
	/// Hover mode for a pointer at rest. Nodes take precedence over edges.
	fn hover_mode_at(&self, sx: f64, sy: f64) -> PointerMode {
		if let Some(idx) = self.node_at_position(sx, sy) {
			PointerMode::HoveringNode(idx)
		} else if let Some(idx) = self.edge_at_position(sx, sy) {
			PointerMode::HoveringEdge(idx)
		} else {
			PointerMode::Idle
		}
	}

	/// Switches pointer mode, emitting tooltip events when the hovered edge
	/// changes.
	fn transition(&mut self, next: PointerMode, events: &mut Vec<GraphEvent>) {
		let before = self.pointer.hover();
		let edge_before = self.pointer.hovered_edge();
		self.pointer = next;
		let edge_after = self.pointer.hovered_edge();

		if edge_before != edge_after {
			match edge_after.and_then(|idx| self.edges.get(idx)) {
				Some(edge) => events.push(GraphEvent::EdgeEntered(edge.id.clone())),
				None => events.push(GraphEvent::EdgeLeft),
			}
		}
		if before != self.pointer.hover() {
			self.request_redraw();
		}
	}

	/// Re-evaluates hover at the last pointer position after nodes moved
	/// under a resting pointer. Events queue until [`GraphState::take_events`].
	pub(super) fn refresh_hover(&mut self) {
		let Some((sx, sy)) = self.pointer_at else {
			return;
		};
		if !matches!(
			self.pointer,
			PointerMode::Idle | PointerMode::HoveringNode(_) | PointerMode::HoveringEdge(_)
		) {
			return;
		}
		let next = self.hover_mode_at(sx, sy);
		if next != self.pointer {
			let mut events = std::mem::take(&mut self.pending);
			self.transition(next, &mut events);
			self.pending = events;
		}
	}

	/// CSS cursor for the current gesture.
	pub fn cursor(&self) -> &'static str {
		self.pointer.cursor()
	}

	/// Button press: starts a node drag or a pan.
	pub fn pointer_down(&mut self, sx: f64, sy: f64) -> Vec<GraphEvent> {
		let mut events = std::mem::take(&mut self.pending);
		self.pointer_at = Some((sx, sy));
		let next = if let Some(idx) = self.node_at_position(sx, sy) {
			let (gx, gy) = self.screen_to_graph(sx, sy);
			let (nx, ny) = self.node_position(idx).unwrap_or((gx, gy));
			self.simulation.pin(idx, nx, ny);
			debug!("relationship-graph: drag start on node {}", self.nodes[idx].id);
			PointerMode::DraggingNode(DragState {
				node: idx,
				start_x: sx,
				start_y: sy,
				grab_dx: nx - gx,
				grab_dy: ny - gy,
				moved: false,
			})
		} else {
			PointerMode::Panning(PanState {
				start_x: sx,
				start_y: sy,
				transform_start_x: self.transform.x,
				transform_start_y: self.transform.y,
				pressed_edge: self.edge_at_position(sx, sy),
				moved: false,
			})
		};
		self.transition(next, &mut events);
		events
	}

	/// Pointer motion: drags, pans or updates hover.
	pub fn pointer_move(&mut self, sx: f64, sy: f64) -> Vec<GraphEvent> {
		let mut events = std::mem::take(&mut self.pending);
		self.pointer_at = Some((sx, sy));
		let tolerance = self.interaction.click_tolerance;
		let beyond = |x0: f64, y0: f64| (sx - x0).hypot(sy - y0) > tolerance;

		match self.pointer {
			PointerMode::DraggingNode(mut drag) => {
				drag.moved |= beyond(drag.start_x, drag.start_y);
				let (gx, gy) = self.screen_to_graph(sx, sy);
				self.simulation
					.pin(drag.node, gx + drag.grab_dx, gy + drag.grab_dy);
				self.pointer = PointerMode::DraggingNode(drag);
				self.request_redraw();
			}
			PointerMode::Panning(mut pan) => {
				pan.moved |= beyond(pan.start_x, pan.start_y);
				self.transform.x = pan.transform_start_x + (sx - pan.start_x);
				self.transform.y = pan.transform_start_y + (sy - pan.start_y);
				self.pointer = PointerMode::Panning(pan);
				self.request_redraw();
			}
			PointerMode::Idle | PointerMode::HoveringNode(_) | PointerMode::HoveringEdge(_) => {
				let next = self.hover_mode_at(sx, sy);
				self.transition(next, &mut events);
			}
		}
		events
	}

	/// Button release: ends the gesture, reporting a click if the pointer
	/// stayed within the click tolerance.
	pub fn pointer_up(&mut self, sx: f64, sy: f64) -> Vec<GraphEvent> {
		let mut events = std::mem::take(&mut self.pending);
		self.pointer_at = Some((sx, sy));
		match self.pointer {
			PointerMode::DraggingNode(drag) => {
				self.simulation.release(drag.node);
				if !drag.moved {
					if let Some(node) = self.nodes.get(drag.node) {
						events.push(GraphEvent::NodeClicked(node.id.clone()));
					}
				}
			}
			PointerMode::Panning(pan) => {
				if let (false, Some(idx)) = (pan.moved, pan.pressed_edge) {
					if let Some(edge) = self.edges.get(idx) {
						events.push(GraphEvent::EdgeClicked(edge.id.clone()));
					}
				}
			}
			_ => return events,
		}
		let next = self.hover_mode_at(sx, sy);
		self.transition(next, &mut events);
		events
	}

	/// Pointer left the canvas: any drag or pan ends without a click.
	pub fn pointer_leave(&mut self) -> Vec<GraphEvent> {
		let mut events = std::mem::take(&mut self.pending);
		self.pointer_at = None;
		if let PointerMode::DraggingNode(drag) = self.pointer {
			self.simulation.release(drag.node);
		}
		self.transition(PointerMode::Idle, &mut events);
		events
	}

	/// Zooms around the pointer. Negative `delta_y` zooms in.
	pub fn wheel(&mut self, sx: f64, sy: f64, delta_y: f64) {
		if delta_y == 0.0 {
			return;
		}
		let cfg = &self.interaction;
		let factor = if delta_y < 0.0 {
			cfg.zoom_step
		} else {
			1.0 / cfg.zoom_step
		};
		let new_k = (self.transform.k * factor).clamp(cfg.zoom_min, cfg.zoom_max);
		if new_k == self.transform.k {
			return;
		}
		// Keep the world point under the pointer fixed.
		let (gx, gy) = self.screen_to_graph(sx, sy);
		self.transform.k = new_k;
		self.transform.x = sx - gx * new_k;
		self.transform.y = sy - gy * new_k;
		self.request_redraw();
		self.pointer_at = Some((sx, sy));
		self.refresh_hover();
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::components::relationship_graph::state::tests::{build, character, relationship};
	use crate::components::relationship_graph::types::GraphData;

	fn pair() -> GraphState {
		build(&GraphData {
			characters: vec![character("a", "Alice"), character("b", "Bob")],
			relationships: vec![relationship("r1", "a", "b", "friend")],
		})
	}

	fn settle(state: &mut GraphState) {
		while state.tick() {}
	}

	fn edge_midpoint(state: &GraphState) -> (f64, f64) {
		let (a, b) = state.edge_endpoints(0).unwrap();
		state
			.transform
			.graph_to_screen((a.0 + b.0) / 2.0, (a.1 + b.1) / 2.0)
	}

	#[test]
	fn test_click_without_movement_selects_node() {
		let mut state = pair();
		settle(&mut state);
		let (x, y) = state.node_position(0).unwrap();

		assert!(state.pointer_down(x, y).is_empty());
		assert_eq!(state.cursor(), "grabbing");
		assert!(state.pointer_move(x + 2.0, y + 1.0).is_empty());
		let events = state.pointer_up(x + 2.0, y + 1.0);
		assert_eq!(events, vec![GraphEvent::NodeClicked("a".into())]);
		assert_eq!(state.pointer, PointerMode::HoveringNode(0));
		assert!(state.simulation.body(0).unwrap().pinned.is_none());
	}

	#[test]
	fn test_drag_moves_node_and_suppresses_click() {
		let mut state = pair();
		settle(&mut state);
		let (x, y) = state.node_position(0).unwrap();

		// Grab slightly off-center; the offset is preserved while dragging.
		state.pointer_down(x + 10.0, y);
		state.pointer_move(x + 110.0, y + 50.0);
		let (nx, ny) = state.node_position(0).unwrap();
		assert!((nx - (x + 100.0)).abs() < 1e-9);
		assert!((ny - (y + 50.0)).abs() < 1e-9);
		assert!(state.simulation.alpha_target() > 0.0);

		let events = state.pointer_up(x + 110.0, y + 50.0);
		assert!(!events.contains(&GraphEvent::NodeClicked("a".into())));
		assert_eq!(state.simulation.alpha_target(), 0.0);
	}

	#[test]
	fn test_drag_tracks_pointer_under_zoom() {
		let mut state = pair();
		settle(&mut state);
		state.transform.k = 2.0;
		let (x, y) = state.node_position(0).unwrap();
		let (sx, sy) = state.transform.graph_to_screen(x, y);

		state.pointer_down(sx, sy);
		state.pointer_move(sx + 40.0, sy);
		let (nx, _) = state.node_position(0).unwrap();
		assert!((nx - (x + 20.0)).abs() < 1e-9);
	}

	#[test]
	fn test_hover_edge_emits_enter_and_leave() {
		let mut state = pair();
		settle(&mut state);
		let (mx, my) = edge_midpoint(&state);

		let events = state.pointer_move(mx, my);
		assert_eq!(events, vec![GraphEvent::EdgeEntered("r1".into())]);
		assert_eq!(state.hover(), Hover::Edge(0));
		assert_eq!(state.cursor(), "pointer");

		// Staying on the edge emits nothing new.
		assert!(state.pointer_move(mx + 1.0, my).is_empty());

		let events = state.pointer_move(mx + 400.0, my + 400.0);
		assert_eq!(events, vec![GraphEvent::EdgeLeft]);
		assert_eq!(state.hover(), Hover::None);
		assert_eq!(state.cursor(), "grab");
	}

	#[test]
	fn test_node_wins_over_edge() {
		let mut state = pair();
		settle(&mut state);
		let (x, y) = state.node_position(1).unwrap();
		state.pointer_move(x, y);
		assert_eq!(state.hover(), Hover::Node(1));
	}

	#[test]
	fn test_edge_click_and_edge_pan() {
		let mut state = pair();
		settle(&mut state);
		let (mx, my) = edge_midpoint(&state);

		state.pointer_down(mx, my);
		let events = state.pointer_up(mx, my);
		assert!(events.contains(&GraphEvent::EdgeClicked("r1".into())));

		// Dragging from an edge pans instead of clicking.
		state.pointer_down(mx, my);
		state.pointer_move(mx + 30.0, my);
		let events = state.pointer_up(mx + 30.0, my);
		assert!(!events.iter().any(|e| matches!(e, GraphEvent::EdgeClicked(_))));
		assert_eq!(state.transform.x, 30.0);
	}

	#[test]
	fn test_background_pan_moves_transform_only() {
		let mut state = pair();
		settle(&mut state);
		let before = state.node_position(0).unwrap();

		state.pointer_down(5.0, 5.0);
		state.pointer_move(55.0, -15.0);
		assert_eq!((state.transform.x, state.transform.y), (50.0, -20.0));
		let events = state.pointer_up(55.0, -15.0);
		assert!(events.is_empty());
		assert_eq!(state.node_position(0).unwrap(), before);
	}

	#[test]
	fn test_wheel_zooms_around_pointer_and_clamps() {
		let mut state = pair();
		let anchor = state.screen_to_graph(200.0, 150.0);

		state.wheel(200.0, 150.0, -100.0);
		assert!((state.transform.k - 1.1).abs() < 1e-9);
		let after = state.screen_to_graph(200.0, 150.0);
		assert!((after.0 - anchor.0).abs() < 1e-9);
		assert!((after.1 - anchor.1).abs() < 1e-9);

		for _ in 0..100 {
			state.wheel(200.0, 150.0, -100.0);
		}
		assert_eq!(state.transform.k, 4.0);
		for _ in 0..200 {
			state.wheel(200.0, 150.0, 100.0);
		}
		assert!((state.transform.k - 0.1).abs() < 1e-9);
	}

	#[test]
	fn test_leave_during_drag_releases_pin() {
		let mut state = pair();
		settle(&mut state);
		let (x, y) = state.node_position(0).unwrap();
		state.pointer_down(x, y);
		assert!(state.pointer_leave().is_empty());
		assert_eq!(state.pointer, PointerMode::Idle);
		assert!(state.simulation.body(0).unwrap().pinned.is_none());
	}

	#[test]
	fn test_tick_moving_edge_away_ends_hover() {
		let mut state = pair();
		settle(&mut state);
		let (mx, my) = edge_midpoint(&state);
		assert_eq!(state.pointer_move(mx, my), vec![GraphEvent::EdgeEntered("r1".into())]);

		// Both endpoints jump to the left edge of the canvas; the pointer stays put.
		state.simulation.pin(0, 100.0, 100.0);
		state.simulation.pin(1, 100.0, 200.0);
		assert!(state.tick());
		assert_eq!(state.hover(), Hover::None);
		assert_eq!(state.take_events(), vec![GraphEvent::EdgeLeft]);
		assert!(state.take_events().is_empty());
	}

	#[test]
	fn test_queued_events_come_before_handler_events() {
		let mut state = pair();
		settle(&mut state);
		let (mx, my) = edge_midpoint(&state);
		state.pointer_move(mx, my);

		state.simulation.pin(0, 100.0, 100.0);
		state.simulation.pin(1, 100.0, 200.0);
		state.tick();
		let events = state.pointer_move(100.0, 150.0);
		assert_eq!(
			events,
			vec![GraphEvent::EdgeLeft, GraphEvent::EdgeEntered("r1".into())]
		);
	}

	#[test]
	fn test_resolve_against_current_records() {
		let characters = vec![character("a", "Alice"), character("b", "Bob")];
		let relationships = vec![relationship("r1", "a", "b", "friend")];

		let opened = GraphEvent::NodeClicked("a".into()).resolve(&characters, &relationships);
		assert_eq!(opened, Some(GraphAction::OpenCharacter(characters[0].clone())));

		let Some(GraphAction::ShowTooltip(content)) =
			GraphEvent::EdgeEntered("r1".into()).resolve(&characters, &relationships)
		else {
			panic!("expected a tooltip");
		};
		assert_eq!(content.title, "Alice ↔ Bob");

		assert_eq!(
			GraphEvent::EdgeClicked("r1".into()).resolve(&characters, &relationships),
			Some(GraphAction::SelectRelationship(relationships[0].clone()))
		);
		assert_eq!(
			GraphEvent::EdgeLeft.resolve(&characters, &relationships),
			Some(GraphAction::HideTooltip)
		);
	}

	#[test]
	fn test_stale_ids_resolve_to_no_action() {
		// The host refreshed and Bob and the relationship are gone.
		let characters = vec![character("a", "Alice")];
		let relationships = vec![relationship("r2", "a", "ghost", "friend")];

		assert_eq!(
			GraphEvent::NodeClicked("b".into()).resolve(&characters, &relationships),
			None
		);
		assert_eq!(
			GraphEvent::EdgeClicked("r1".into()).resolve(&characters, &relationships),
			None
		);
		// Hovering a relationship with a missing endpoint never shows a tooltip.
		assert_eq!(
			GraphEvent::EdgeEntered("r2".into()).resolve(&characters, &relationships),
			Some(GraphAction::HideTooltip)
		);
	}
}
