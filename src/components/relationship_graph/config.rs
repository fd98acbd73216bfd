//! Tunable constants for layout and interaction.
//!
//! Every field has a default, so hosts can override any subset through JSON
//! (see [`GraphConfig::from_json`]).

use serde::Deserialize;

/// Force simulation parameters. Distances are in world units.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
	/// Target separation of linked nodes.
	pub link_distance: f64,
	/// Many-body strength. Negative values repel.
	pub charge_strength: f64,
	/// Pull of the free-node centroid towards the viewport center, per tick (0..=1).
	pub center_strength: f64,
	/// Radius of the circle each node occupies for collision avoidance.
	pub collision_radius: f64,
	/// Collision correction strength (0..=1).
	pub collision_strength: f64,
	/// Energy the simulation starts with.
	pub alpha_start: f64,
	/// Below this energy the simulation goes idle.
	pub alpha_min: f64,
	/// Fraction of the distance to the alpha target covered per tick.
	pub alpha_decay: f64,
	/// Fraction of velocity lost per tick.
	pub velocity_decay: f64,
	/// Alpha target held while a node is dragged.
	pub drag_alpha_target: f64,
	/// Alpha applied after the viewport is resized.
	pub resize_alpha: f64,
}

impl Default for SimulationConfig {
	fn default() -> Self {
		let alpha_min: f64 = 0.001;
		Self {
			link_distance: 100.0,
			charge_strength: -300.0,
			center_strength: 0.1,
			collision_radius: 40.0,
			collision_strength: 1.0,
			alpha_start: 1.0,
			alpha_min,
			// Reaches alpha_min from 1.0 in ~300 ticks.
			alpha_decay: 1.0 - alpha_min.powf(1.0 / 300.0),
			velocity_decay: 0.4,
			drag_alpha_target: 0.3,
			resize_alpha: 0.3,
		}
	}
}

/// Pointer handling parameters.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct InteractionConfig {
	/// Smallest view scale.
	pub zoom_min: f64,
	/// Largest view scale.
	pub zoom_max: f64,
	/// Scale multiplier per wheel notch.
	pub zoom_step: f64,
	/// Max pointer travel (screen px) for a press/release to count as a click.
	pub click_tolerance: f64,
	/// Half-width of the clickable band around an edge, in world units.
	pub edge_hit_tolerance: f64,
}

impl Default for InteractionConfig {
	fn default() -> Self {
		Self {
			zoom_min: 0.1,
			zoom_max: 4.0,
			zoom_step: 1.1,
			click_tolerance: 3.0,
			edge_hit_tolerance: 6.0,
		}
	}
}

/// Complete graph configuration.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct GraphConfig {
	/// Layout forces.
	pub simulation: SimulationConfig,
	/// Pointer handling.
	pub interaction: InteractionConfig,
	/// Theme preset name, see [`super::Theme::by_name`].
	pub theme: String,
}

impl Default for GraphConfig {
	fn default() -> Self {
		Self {
			simulation: SimulationConfig::default(),
			interaction: InteractionConfig::default(),
			theme: "light".into(),
		}
	}
}

impl GraphConfig {
	/// Parses a partial config; missing fields keep their defaults.
	pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
		serde_json::from_str(json)
	}
}
