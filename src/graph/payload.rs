use std::collections::HashSet;

use serde::Deserialize;

use crate::error::{DataIntegrityError, DataShapeError};

/// A graph node as served by `/graph`.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(from = "RawNode")]
pub struct Node {
	/// Unique within a payload.
	pub id: String,
	/// Display text; falls back to the id when the snapshot has none.
	pub label: String,
}

/// A directed edge between two node ids.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(from = "RawEdge")]
pub struct Edge {
	/// Id of the node the edge leaves.
	pub source: String,
	/// Id of the node the edge points at.
	pub target: String,
}

/// The nodes and edges of one graph snapshot.
///
/// Accepts the flat `{nodes, edges}` shape, Cytoscape's `{data: {..}}`
/// element wrappers, and the crawler's networkx `node_link_data` output
/// (`links`/`description`).
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
pub struct GraphPayload {
	/// Nodes in snapshot order; layout output keeps this order.
	pub nodes: Vec<Node>,
	/// Missing means no edges.
	#[serde(default, alias = "links")]
	pub edges: Vec<Edge>,
}

#[derive(Deserialize)]
struct NodeFields {
	id: String,
	#[serde(default, alias = "description")]
	label: Option<String>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawNode {
	Wrapped { data: NodeFields },
	Bare(NodeFields),
}

impl From<RawNode> for Node {
	fn from(raw: RawNode) -> Self {
		let (RawNode::Wrapped { data: fields } | RawNode::Bare(fields)) = raw;
		let label = fields.label.unwrap_or_else(|| fields.id.clone());
		Node {
			id: fields.id,
			label,
		}
	}
}

#[derive(Deserialize)]
struct EdgeFields {
	source: String,
	target: String,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawEdge {
	Wrapped { data: EdgeFields },
	Bare(EdgeFields),
}

impl From<RawEdge> for Edge {
	fn from(raw: RawEdge) -> Self {
		let (RawEdge::Wrapped { data: fields } | RawEdge::Bare(fields)) = raw;
		Edge {
			source: fields.source,
			target: fields.target,
		}
	}
}

impl GraphPayload {
	/// Decode a `/graph` response body. Shape only; see [`Self::validate`].
	pub fn from_json(body: &str) -> Result<Self, DataShapeError> {
		serde_json::from_str(body).map_err(|e| DataShapeError::Json(e.to_string()))
	}

	/// Reject duplicate node ids and edges with unknown endpoints.
	///
	/// Errors are reported in payload order, so the first offender wins.
	pub fn validate(&self) -> Result<(), DataIntegrityError> {
		let mut ids: HashSet<&str> = HashSet::with_capacity(self.nodes.len());
		for node in &self.nodes {
			if !ids.insert(node.id.as_str()) {
				return Err(DataIntegrityError::DuplicateNode(node.id.clone()));
			}
		}
		for edge in &self.edges {
			if !ids.contains(edge.source.as_str()) || !ids.contains(edge.target.as_str()) {
				return Err(DataIntegrityError::DanglingEdge {
					from: edge.source.clone(),
					to: edge.target.clone(),
				});
			}
		}
		Ok(())
	}
}
