use crawlview::error::{DataIntegrityError, LayoutError};
use crawlview::graph::{Bounds, Edge, GraphPayload, LayoutConfig, LayoutEngine, Node, ViewTransform};

fn payload(ids: &[&str], edges: &[(&str, &str)]) -> GraphPayload {
	GraphPayload {
		nodes: ids
			.iter()
			.map(|id| Node {
				id: id.to_string(),
				label: id.to_string(),
			})
			.collect(),
		edges: edges
			.iter()
			.map(|(s, t)| Edge {
				source: s.to_string(),
				target: t.to_string(),
			})
			.collect(),
	}
}

/// Deterministic pseudo-random tree, same shape on every run.
fn tree(n: usize) -> GraphPayload {
	let ids: Vec<String> = (0..n).map(|i| format!("n{i}")).collect();
	let edges: Vec<(String, String)> = (1..n)
		.map(|i| {
			let x = ((i + 1) * 9301 + 49297) % 233280;
			let parent = (x as f64 / 233280.0 * i as f64) as usize;
			(ids[i].clone(), ids[parent].clone())
		})
		.collect();
	let id_refs: Vec<&str> = ids.iter().map(String::as_str).collect();
	let edge_refs: Vec<(&str, &str)> = edges.iter().map(|(s, t)| (s.as_str(), t.as_str())).collect();
	payload(&id_refs, &edge_refs)
}

#[test]
fn identical_inputs_give_bit_identical_positions() {
	let graph = tree(25);
	let config = LayoutConfig {
		num_iter: 300,
		..LayoutConfig::default()
	};
	assert!(!config.randomize);

	let first = LayoutEngine::new(config.clone()).run(&graph).unwrap();
	let second = LayoutEngine::new(config).run(&graph).unwrap();
	for (a, b) in first.nodes.iter().zip(&second.nodes) {
		assert_eq!(a.id, b.id);
		assert_eq!(a.position.x.to_bits(), b.position.x.to_bits());
		assert_eq!(a.position.y.to_bits(), b.position.y.to_bits());
	}
}

#[test]
fn dangling_edge_is_rejected_before_layout() {
	let graph = payload(&["a"], &[("a", "missing")]);
	let err = LayoutEngine::new(LayoutConfig::default()).run(&graph).unwrap_err();
	assert_eq!(
		err,
		LayoutError::Integrity(DataIntegrityError::DanglingEdge {
			from: "a".into(),
			to: "missing".into(),
		})
	);
}

#[test]
fn laid_out_tree_has_no_overlapping_nodes() {
	let graph = tree(30);
	let layout = LayoutEngine::new(LayoutConfig::default()).run(&graph).unwrap();
	assert_eq!(layout.iterations, 1000);
	for (i, a) in layout.nodes.iter().enumerate() {
		assert!(a.position.x.is_finite() && a.position.y.is_finite());
		for b in &layout.nodes[i + 1..] {
			let d = a.position.distance(b.position);
			assert!(d > 2.0 * layout.node_radius, "{} and {} overlap ({d})", a.id, b.id);
		}
	}
}

#[test]
fn disconnected_components_are_kept_apart() {
	let graph = payload(&["a", "b", "c", "d", "e"], &[("a", "b"), ("c", "d")]);
	let config = LayoutConfig {
		num_iter: 300,
		..LayoutConfig::default()
	};
	let layout = LayoutEngine::new(config.clone()).run(&graph).unwrap();
	let r = layout.node_radius;
	let boxes: Vec<Bounds> = [vec!["a", "b"], vec!["c", "d"], vec!["e"]]
		.iter()
		.map(|ids| Bounds::around(ids.iter().map(|id| layout.position(id).unwrap()), r).unwrap())
		.collect();

	for (i, a) in boxes.iter().enumerate() {
		for b in &boxes[i + 1..] {
			let grown = Bounds {
				min_x: a.min_x - config.component_spacing + 1e-6,
				min_y: a.min_y - config.component_spacing + 1e-6,
				max_x: a.max_x + config.component_spacing - 1e-6,
				max_y: a.max_y + config.component_spacing - 1e-6,
			};
			assert!(!grown.intersects(b), "{a:?} too close to {b:?}");
		}
	}
}

#[test]
fn fit_shows_the_whole_layout() {
	let graph = tree(20);
	let config = LayoutConfig::default();
	let layout = LayoutEngine::new(config.clone()).run(&graph).unwrap();
	let (w, h) = (1024.0, 768.0);
	let view = ViewTransform::fit(layout.bounds(), w, h, config.padding);
	for node in &layout.nodes {
		let (sx, sy) = view.to_screen(node.position);
		assert!(sx >= config.padding - 1e-6 && sx <= w - config.padding + 1e-6, "x {sx}");
		assert!(sy >= config.padding - 1e-6 && sy <= h - config.padding + 1e-6, "y {sy}");
	}
}

#[test]
fn nesting_factor_is_accepted_on_flat_graphs() {
	let graph = payload(&["a", "b"], &[("a", "b")]);
	let base = LayoutConfig {
		num_iter: 50,
		..LayoutConfig::default()
	};
	let nested = LayoutConfig {
		nesting_factor: 0.5,
		..base.clone()
	};
	assert_eq!(
		LayoutEngine::new(base).run(&graph).unwrap(),
		LayoutEngine::new(nested).run(&graph).unwrap()
	);
}
