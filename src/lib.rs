//! character-graph: Interactive relationship graph for groups of characters.
//!
//! This crate provides a WASM-based visualization component that renders
//! characters and their relationships with a force-directed layout, pan/zoom,
//! node dragging, edge tooltips and a character detail modal.

use leptos::prelude::*;
use leptos_meta::*;
use log::{Level, info, warn};
use wasm_bindgen::JsCast;
use web_sys::HtmlScriptElement;

pub mod components;
mod error;
mod sample;

pub use components::relationship_graph::{
	Character, CharacterDetailModal, GraphConfig, GraphData, Label, Relationship,
	RelationshipGraph, RelationshipTooltip, RelationshipType, Theme,
};
pub use error::GraphError;

/// Initialize logging and panic hooks for the WASM target.
pub fn init_logging() {
	let _ = console_log::init_with_level(Level::Debug);
	console_error_panic_hook::set_once();
	info!("character-graph: logging initialized");
}

/// Text of the `<script>` element with the given id.
fn script_text(id: &str) -> Result<String, GraphError> {
	let window = web_sys::window().ok_or(GraphError::NoWindow)?;
	let document = window.document().ok_or(GraphError::NoWindow)?;
	let element = document
		.get_element_by_id(id)
		.ok_or_else(|| GraphError::MissingElement(id.to_string()))?;
	let script: HtmlScriptElement = element
		.dyn_into()
		.map_err(|_| GraphError::MissingElement(id.to_string()))?;
	Ok(script.text()?)
}

/// Load graph data from a script element with id="graph-data".
/// Expected format: JSON with { characters: [...], relationships: [...] }
pub fn load_graph_data() -> Result<GraphData, GraphError> {
	let data: GraphData = serde_json::from_str(&script_text("graph-data")?)?;
	info!(
		"character-graph: loaded {} characters, {} relationships",
		data.characters.len(),
		data.relationships.len()
	);
	Ok(data)
}

/// Optional overrides from a script element with id="graph-config".
pub fn load_graph_config() -> GraphConfig {
	let json = match script_text("graph-config") {
		Ok(json) => json,
		Err(GraphError::MissingElement(_)) => return GraphConfig::default(),
		Err(e) => {
			warn!("character-graph: cannot read graph config: {e}");
			return GraphConfig::default();
		}
	};
	GraphConfig::from_json(&json).unwrap_or_else(|e| {
		warn!("character-graph: invalid graph config, using defaults: {e}");
		GraphConfig::default()
	})
}

/// Main application component.
/// Loads graph data from the DOM and renders the relationship graph.
#[component]
pub fn App() -> impl IntoView {
	provide_meta_context();

	let data = match load_graph_data() {
		Ok(data) => data,
		Err(GraphError::MissingElement(_)) => {
			info!("character-graph: no embedded data, showing the demo group");
			sample::sample_data()
		}
		Err(e) => {
			warn!("character-graph: failed to load graph data: {e}");
			GraphData::default()
		}
	};
	let config = load_graph_config();

	let characters = RwSignal::new(data.characters);
	let relationships = RwSignal::new(data.relationships);

	let on_node_click = Callback::new(|c: Character| {
		info!("character-graph: opened {} ({})", c.name, c.id);
	});
	let on_link_click = Callback::new(|r: Relationship| {
		info!(
			"character-graph: relationship {} between {} and {}",
			r.relationship_type, r.character1_id, r.character2_id
		);
	});

	view! {
		<Html attr:lang="ja" attr:dir="ltr" />
		<Title text="人物相関図" />
		<Meta charset="UTF-8" />
		<Meta name="viewport" content="width=device-width, initial-scale=1.0" />

		<div class="fullscreen-graph">
			<RelationshipGraph
				characters=characters
				relationships=relationships
				on_node_click=on_node_click
				on_link_click=on_link_click
				config=config
				fullscreen=true
			/>
		</div>
	}
}
