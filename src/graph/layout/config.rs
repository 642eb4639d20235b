use serde::Deserialize;

use crate::error::LayoutError;

/// Options for one force-directed layout run.
///
/// Field names deserialize from the camelCase option object the graph
/// viewer has always used, so an existing options blob can be pasted in
/// verbatim. Unknown options are ignored.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct LayoutConfig {
	/// Rest length of an edge spring.
	pub ideal_edge_length: f64,
	/// Minimum gap between node boundaries before overlap pushback kicks in.
	pub node_overlap: f64,
	/// Log progress every `refresh` steps (0 disables).
	///
	/// In the viewer's original options this was the redraw interval of an
	/// animated layout. Layouts here are drawn once finished, so the option
	/// only paces trace logging.
	pub refresh: u32,
	/// Fit the viewport to the finished layout.
	pub fit: bool,
	/// Padding (screen pixels) kept around the layout when fitting.
	pub padding: f64,
	/// Scatter initial positions pseudo-randomly instead of on a grid.
	pub randomize: bool,
	/// Gap between the bounding boxes of disconnected components.
	pub component_spacing: f64,
	/// Pairwise repulsion magnitude.
	pub node_repulsion: f64,
	/// Spring constant of an edge, relative to `ideal_edge_length`.
	pub edge_elasticity: f64,
	/// Multiplier for edges crossing compound nodes. Flat graphs ignore it.
	pub nesting_factor: f64,
	/// Pull toward the layout centroid, in thousandths of a unit per unit distance.
	pub gravity: f64,
	/// Exact number of simulation steps.
	pub num_iter: u32,
	/// Starting bound on how far a node may move in one step.
	pub initial_temp: f64,
	/// Temperature multiplier applied after each step.
	pub cooling_factor: f64,
	/// Floor the temperature never cools below.
	pub min_temp: f64,
	/// Node radius used for boundary gaps, bounds and drawing.
	pub node_radius: f64,
	/// Seed for `randomize`; the same seed gives the same scatter.
	pub seed: u64,
}

impl Default for LayoutConfig {
	fn default() -> Self {
		Self {
			ideal_edge_length: 100.0,
			node_overlap: 20.0,
			refresh: 20,
			fit: true,
			padding: 30.0,
			randomize: false,
			component_spacing: 100.0,
			node_repulsion: 400_000.0,
			edge_elasticity: 100.0,
			nesting_factor: 5.0,
			gravity: 80.0,
			num_iter: 1000,
			initial_temp: 200.0,
			cooling_factor: 0.95,
			min_temp: 1.0,
			node_radius: 5.0,
			seed: 0x5eed_0f_c0_5e,
		}
	}
}

impl LayoutConfig {
	/// Check every numeric option before a run starts.
	pub fn validate(&self) -> Result<(), LayoutError> {
		let non_negative = [
			("idealEdgeLength", self.ideal_edge_length),
			("nodeOverlap", self.node_overlap),
			("padding", self.padding),
			("componentSpacing", self.component_spacing),
			("nodeRepulsion", self.node_repulsion),
			("edgeElasticity", self.edge_elasticity),
			("nestingFactor", self.nesting_factor),
			("gravity", self.gravity),
			("initialTemp", self.initial_temp),
			("minTemp", self.min_temp),
			("nodeRadius", self.node_radius),
		];
		for (option, value) in non_negative {
			if !value.is_finite() {
				return Err(LayoutError::InvalidConfig {
					option,
					reason: "must be a finite number",
				});
			}
			if value < 0.0 {
				return Err(LayoutError::InvalidConfig {
					option,
					reason: "must not be negative",
				});
			}
		}
		if self.ideal_edge_length == 0.0 {
			return Err(LayoutError::InvalidConfig {
				option: "idealEdgeLength",
				reason: "must be positive",
			});
		}
		if !(self.cooling_factor > 0.0 && self.cooling_factor <= 1.0) {
			return Err(LayoutError::InvalidConfig {
				option: "coolingFactor",
				reason: "must lie in (0, 1]",
			});
		}
		if self.min_temp > self.initial_temp {
			return Err(LayoutError::InvalidConfig {
				option: "minTemp",
				reason: "must not exceed initialTemp",
			});
		}
		Ok(())
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn defaults_are_valid() {
		assert!(LayoutConfig::default().validate().is_ok());
	}

	#[test]
	fn reads_viewer_option_blob() {
		let config: LayoutConfig = serde_json::from_str(
			r#"{
				"name": "cose-bilkent",
				"idealEdgeLength": 100, "nodeOverlap": 20, "refresh": 20,
				"fit": true, "padding": 30, "randomize": false,
				"componentSpacing": 100, "nodeRepulsion": 400000,
				"edgeElasticity": 100, "nestingFactor": 5, "gravity": 80,
				"numIter": 1000, "initialTemp": 200, "coolingFactor": 0.95,
				"minTemp": 1.0
			}"#,
		)
		.unwrap();
		assert_eq!(config, LayoutConfig::default());
	}

	#[test]
	fn partial_blob_keeps_defaults() {
		let config: LayoutConfig = serde_json::from_str(r#"{"numIter": 10}"#).unwrap();
		assert_eq!(config.num_iter, 10);
		assert_eq!(config.gravity, 80.0);
	}

	#[test]
	fn rejects_bad_cooling_and_temperatures() {
		let config = LayoutConfig {
			cooling_factor: 1.5,
			..LayoutConfig::default()
		};
		assert!(matches!(
			config.validate(),
			Err(LayoutError::InvalidConfig {
				option: "coolingFactor",
				..
			})
		));

		let config = LayoutConfig {
			min_temp: 500.0,
			..LayoutConfig::default()
		};
		assert!(matches!(
			config.validate(),
			Err(LayoutError::InvalidConfig { option: "minTemp", .. })
		));

		let config = LayoutConfig {
			gravity: f64::NAN,
			..LayoutConfig::default()
		};
		assert!(config.validate().is_err());
	}
}
