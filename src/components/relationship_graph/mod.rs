//! Character relationship graph component.
//!
//! Renders characters and their relationships as an interactive
//! force-directed graph on an HTML canvas with:
//! - A d3-style force layout (links, charge, centering, collision)
//! - Pan, zoom and node dragging
//! - Edge hover tooltips and a character detail modal on click
//! - Dash patterns per relationship type and colored label dots per node
//!
//! Layout, hit testing and scene construction are plain Rust and can be
//! driven without a browser; only `component`, `render`, `avatar`, `detail`
//! and `tooltip` touch the DOM.
//!
//! # Example
//!
//! ```ignore
//! use character_graph::RelationshipGraph;
//!
//! let characters = RwSignal::new(data.characters);
//! let relationships = RwSignal::new(data.relationships);
//!
//! view! {
//!     <RelationshipGraph
//!         characters=characters
//!         relationships=relationships
//!         on_node_click=|c: Character| log::info!("{}", c.name)
//!     />
//! }
//! ```

mod avatar;
mod component;
pub mod config;
mod detail;
pub mod interaction;
mod render;
pub mod scene;
pub mod simulation;
pub mod state;
pub mod theme;
pub mod tooltip;
pub mod types;

pub use component::RelationshipGraph;
pub use config::GraphConfig;
pub use detail::CharacterDetailModal;
pub use theme::Theme;
pub use tooltip::RelationshipTooltip;
pub use types::{Character, GraphData, Label, Relationship, RelationshipType};
