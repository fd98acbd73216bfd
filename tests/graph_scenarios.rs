//! End-to-end behaviour of the graph without a browser: build from host
//! records, drive pointer input, tick the layout and inspect the scene.

#![allow(unused_crate_dependencies)]

use character_graph::components::relationship_graph::interaction::{GraphEvent, Hover};
use character_graph::components::relationship_graph::scene::{DrawCommand, build_scene};
use character_graph::components::relationship_graph::state::GraphState;
use character_graph::components::relationship_graph::tooltip::TooltipContent;
use character_graph::components::relationship_graph::types::find_character;
use character_graph::{Character, GraphConfig, GraphData, Label, Relationship, Theme};

fn character(id: &str, name: &str) -> Character {
	Character {
		id: id.into(),
		group_id: "g1".into(),
		name: name.into(),
		photo: None,
		information: format!("{name} のプロフィール"),
		related_links: vec![],
		labels: vec![Label {
			id: "l1".into(),
			name: "主要人物".into(),
			color: "#3b82f6".into(),
		}],
		created_at: None,
		updated_at: None,
	}
}

fn relationship(id: &str, a: &str, b: &str, kind: &str) -> Relationship {
	Relationship {
		id: id.into(),
		group_id: "g1".into(),
		character1_id: a.into(),
		character2_id: b.into(),
		relationship_type: kind.into(),
		description: None,
		created_at: None,
	}
}

fn build(data: &GraphData) -> GraphState {
	let theme = Theme::default();
	GraphState::new(data, 800.0, 600.0, &GraphConfig::default(), theme.node.radius)
}

fn settle(state: &mut GraphState) -> usize {
	let mut ticks = 0;
	while state.tick() {
		ticks += 1;
		assert!(ticks < 5000, "layout never settled");
	}
	ticks
}

fn distance(a: (f64, f64), b: (f64, f64)) -> f64 {
	(a.0 - b.0).hypot(a.1 - b.1)
}

#[test]
fn scenario_a_friend_pair_and_node_click() {
	let data = GraphData {
		characters: vec![character("alice", "Alice"), character("bob", "Bob")],
		relationships: vec![relationship("r1", "alice", "bob", "friend")],
	};
	let mut state = build(&data);
	settle(&mut state);

	let scene = build_scene(&state, &Theme::default());
	let names: Vec<&str> = scene
		.iter()
		.filter_map(|c| match c {
			DrawCommand::Text { text, .. } => Some(text.as_str()),
			_ => None,
		})
		.collect();
	assert_eq!(names, vec!["Alice", "Bob"]);

	let lines: Vec<&[f64]> = scene
		.iter()
		.filter_map(|c| match c {
			DrawCommand::Line { dash, .. } => Some(*dash),
			_ => None,
		})
		.collect();
	assert_eq!(lines, vec![&[5.0, 5.0][..]]);

	let labels: Vec<&str> = scene
		.iter()
		.filter_map(|c| match c {
			DrawCommand::EdgeLabel { text, .. } => Some(text.as_str()),
			_ => None,
		})
		.collect();
	assert_eq!(labels, vec!["friend"]);

	// Click Alice: press and release without moving.
	let alice = state.node_index("alice").unwrap();
	let (x, y) = state.node_position(alice).unwrap();
	state.pointer_down(x, y);
	let events = state.pointer_up(x, y);
	assert_eq!(events, vec![GraphEvent::NodeClicked("alice".into())]);

	let GraphEvent::NodeClicked(id) = &events[0] else {
		unreachable!()
	};
	let opened = find_character(&data.characters, id).unwrap();
	assert_eq!(opened.name, "Alice");
	assert_eq!(opened.information, "Alice のプロフィール");

	// Hovering the edge resolves both names for the tooltip.
	let (a, b) = state.edge_endpoints(0).unwrap();
	let events = state.pointer_move((a.0 + b.0) / 2.0, (a.1 + b.1) / 2.0);
	assert_eq!(events, vec![GraphEvent::EdgeEntered("r1".into())]);
	let tooltip = TooltipContent::resolve(&data.relationships[0], &data.characters).unwrap();
	assert_eq!(tooltip.title, "Alice ↔ Bob");
	assert_eq!(tooltip.relationship_type, "friend");
}

#[test]
fn scenario_b_unlinked_characters_repel_and_never_show_tooltips() {
	let data = GraphData {
		characters: vec![
			character("a", "Alice"),
			character("b", "Bob"),
			character("c", "Carol"),
		],
		relationships: vec![],
	};
	let mut state = build(&data);
	settle(&mut state);

	let positions: Vec<(f64, f64)> = (0..3).map(|i| state.node_position(i).unwrap()).collect();
	for i in 0..3 {
		for j in (i + 1)..3 {
			assert!(distance(positions[i], positions[j]) > 2.0 * 32.0);
		}
	}

	let scene = build_scene(&state, &Theme::default());
	assert!(!scene.iter().any(|c| matches!(c, DrawCommand::Line { .. })));
	assert!(!scene.iter().any(|c| matches!(c, DrawCommand::EdgeLabel { .. })));

	// Sweep the pointer over the whole canvas.
	for gx in (0..=800).step_by(10) {
		for gy in (0..=600).step_by(10) {
			let events = state.pointer_move(gx as f64, gy as f64);
			assert!(
				!events.iter().any(|e| matches!(e, GraphEvent::EdgeEntered(_))),
				"tooltip at ({gx}, {gy})"
			);
			assert!(!matches!(state.hover(), Hover::Edge(_)));
		}
	}
}

#[test]
fn scenario_c_dragged_node_pulls_neighbours_then_settles() {
	let data = GraphData {
		characters: vec![
			character("a", "Alice"),
			character("b", "Bob"),
			character("c", "Carol"),
		],
		relationships: vec![
			relationship("r1", "a", "b", "同僚"),
			relationship("r2", "b", "c", "同僚"),
		],
	};
	let mut state = build(&data);
	settle(&mut state);

	let a_start = state.node_position(0).unwrap();
	let b_start = state.node_position(1).unwrap();

	// Drag Alice 350px to the right over 30 frames, then hold for 30 more.
	state.pointer_down(a_start.0, a_start.1);
	for i in 1..=30 {
		state.pointer_move(a_start.0 + 350.0 * i as f64 / 30.0, a_start.1);
		state.tick();
	}
	for _ in 0..30 {
		state.tick();
	}
	let drop = (a_start.0 + 350.0, a_start.1);
	assert_eq!(state.node_position(0).unwrap(), drop);

	let b_dragged = state.node_position(1).unwrap();
	assert!(b_dragged.0 - b_start.0 > 100.0, "neighbour did not follow");

	let events = state.pointer_up(drop.0, drop.1);
	assert!(events.is_empty(), "a drag is not a click");
	let at_release = distance(state.node_position(0).unwrap(), state.node_position(1).unwrap());

	// After release Alice moves on from the drop point without jumping.
	let mut prev = drop;
	let mut ticks = 0;
	while state.tick() {
		let now = state.node_position(0).unwrap();
		assert!(distance(now, prev) < 60.0);
		prev = now;
		ticks += 1;
		assert!(ticks < 5000);
	}

	let settled = distance(state.node_position(0).unwrap(), state.node_position(1).unwrap());
	assert!(settled < at_release - 100.0);
	assert!(settled < 150.0);
	assert!(state.simulation.is_idle());
}
