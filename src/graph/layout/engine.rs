use std::collections::HashMap;
use std::f64::consts::TAU;

use log::{debug, trace};

use super::{Bounds, Layout, LayoutConfig, PlacedNode, Point};
use crate::error::LayoutError;
use crate::graph::GraphPayload;

/// Fraction of the net force applied as displacement each step, before the
/// temperature clamp. Keeps a unit-stiffness spring from overshooting.
const STEP_SIZE: f64 = 0.1;

/// Steps between rebuilds of the cached repulsion neighbourhoods.
const NEIGHBOURHOOD_REFRESH: u32 = 10;

/// Spring-and-repulsion layout with a simulated-annealing step bound.
///
/// Runs exactly `num_iter` steps. With `randomize` off the result depends
/// only on the payload and the config: iteration follows payload order and
/// nothing is hashed, so repeated runs are bit-identical.
#[derive(Clone, Debug)]
pub struct LayoutEngine {
	config: LayoutConfig,
}

impl LayoutEngine {
	/// Engine running with `config`. Options are checked on each run.
	pub fn new(config: LayoutConfig) -> Self {
		Self { config }
	}

	/// Options this engine runs with.
	pub fn config(&self) -> &LayoutConfig {
		&self.config
	}

	/// Validate `payload`, simulate, then pack disconnected components.
	///
	/// Integrity and config errors are raised before any step runs.
	pub fn run(&self, payload: &GraphPayload) -> Result<Layout, LayoutError> {
		self.config.validate()?;
		payload.validate()?;

		let index: HashMap<&str, usize> = payload
			.nodes
			.iter()
			.enumerate()
			.map(|(i, n)| (n.id.as_str(), i))
			.collect();
		// validate() guarantees both endpoints resolve
		let edges: Vec<(usize, usize)> = payload
			.edges
			.iter()
			.filter_map(|e| Some((*index.get(e.source.as_str())?, *index.get(e.target.as_str())?)))
			.collect();

		let mut sim = Simulation::new(payload.nodes.len(), &edges, &self.config);
		sim.run();
		sim.pack_components();
		let iterations = sim.iterations;
		debug!(
			"layout finished: {} nodes, {} edges, {} steps",
			payload.nodes.len(),
			edges.len(),
			iterations
		);

		let nodes = payload
			.nodes
			.iter()
			.zip(sim.positions)
			.map(|(node, position)| PlacedNode {
				id: node.id.clone(),
				label: node.label.clone(),
				position,
			})
			.collect();

		Ok(Layout {
			nodes,
			edges,
			node_radius: self.config.node_radius,
			iterations,
		})
	}
}

struct Simulation<'a> {
	config: &'a LayoutConfig,
	positions: Vec<Point>,
	forces: Vec<(f64, f64)>,
	edges: &'a [(usize, usize)],
	/// Sorted neighbour lists, loops excluded.
	adjacency: Vec<Vec<usize>>,
	/// For each `i`, the sorted `j > i` close enough to repel it.
	neighbourhoods: Vec<Vec<usize>>,
	temperature: f64,
	iterations: u32,
}

impl<'a> Simulation<'a> {
	fn new(node_count: usize, edges: &'a [(usize, usize)], config: &'a LayoutConfig) -> Self {
		let positions = if config.randomize {
			scattered_positions(node_count, config)
		} else {
			grid_positions(node_count, config)
		};
		Self {
			config,
			positions,
			forces: vec![(0.0, 0.0); node_count],
			edges,
			adjacency: adjacency(node_count, edges),
			neighbourhoods: vec![Vec::new(); node_count],
			temperature: config.initial_temp,
			iterations: 0,
		}
	}

	fn run(&mut self) {
		if self.positions.is_empty() {
			return;
		}
		for step in 0..self.config.num_iter {
			if step % NEIGHBOURHOOD_REFRESH == 0 {
				self.refresh_neighbourhoods();
			}
			self.step();
			self.iterations += 1;
			if self.config.refresh > 0 && (step + 1) % self.config.refresh == 0 {
				trace!(
					"layout step {}/{}: temperature {:.3}",
					step + 1,
					self.config.num_iter,
					self.temperature
				);
			}
		}
	}

	fn step(&mut self) {
		self.forces.fill((0.0, 0.0));
		self.apply_repulsion();
		self.apply_springs();
		self.apply_gravity();

		let max_d = self.temperature;
		for (p, &(fx, fy)) in self.positions.iter_mut().zip(&self.forces) {
			let (mut dx, mut dy) = (fx * STEP_SIZE, fy * STEP_SIZE);
			let len = dx.hypot(dy);
			if len > max_d {
				dx *= max_d / len;
				dy *= max_d / len;
			}
			p.x += dx;
			p.y += dy;
		}

		self.temperature = (self.temperature * self.config.cooling_factor).max(self.config.min_temp);
	}

	/// Boundary gap beyond which two nodes do not repel.
	fn repulsion_range(&self) -> f64 {
		2.0 * self.config.ideal_edge_length
	}

	/// Bucket nodes into square cells one reach wide and collect, for each
	/// node, the later nodes in the surrounding 3x3 cells whose centres are
	/// within reach on both axes.
	fn refresh_neighbourhoods(&mut self) {
		let reach = self.repulsion_range() + 2.0 * self.config.node_radius;
		let cell_of = |p: Point| ((p.x / reach).floor() as i64, (p.y / reach).floor() as i64);

		let mut grid: HashMap<(i64, i64), Vec<usize>> = HashMap::new();
		for (i, &p) in self.positions.iter().enumerate() {
			grid.entry(cell_of(p)).or_default().push(i);
		}

		for (i, &p) in self.positions.iter().enumerate() {
			let (cx, cy) = cell_of(p);
			let near = &mut self.neighbourhoods[i];
			near.clear();
			for gx in cx.saturating_sub(1)..=cx.saturating_add(1) {
				for gy in cy.saturating_sub(1)..=cy.saturating_add(1) {
					let Some(cell) = grid.get(&(gx, gy)) else {
						continue;
					};
					near.extend(cell.iter().copied().filter(|&j| {
						let q = self.positions[j];
						j > i && (q.x - p.x).abs() <= reach && (q.y - p.y).abs() <= reach
					}));
				}
			}
			near.sort_unstable();
		}
	}

	fn apply_repulsion(&mut self) {
		let min_gap = 2.0 * self.config.node_radius;
		for i in 0..self.positions.len() {
			for &j in &self.neighbourhoods[i] {
				let (a, b) = (self.positions[i], self.positions[j]);
				let (dx, dy) = (b.x - a.x, b.y - a.y);
				let dist = dx.hypot(dy);
				let (ux, uy) = if dist > 1e-9 {
					(dx / dist, dy / dist)
				} else {
					// coincident: pick a fixed direction per pair
					let angle = ((i as f64) * 0.618_034 + (j as f64) * 0.414_214) * TAU;
					(angle.cos(), angle.sin())
				};

				let gap = dist - min_gap;
				let effective = gap.max(1.0);
				let mut force = self.config.node_repulsion / (effective * effective);
				// springs already hold adjacent pairs at their own distance
				if gap < self.config.node_overlap && self.adjacency[i].binary_search(&j).is_err() {
					force += (self.config.node_overlap - gap) * 2.0;
				}

				self.forces[i].0 -= ux * force;
				self.forces[i].1 -= uy * force;
				self.forces[j].0 += ux * force;
				self.forces[j].1 += uy * force;
			}
		}
	}

	fn apply_springs(&mut self) {
		let ideal = self.config.ideal_edge_length;
		let stiffness = self.config.edge_elasticity / ideal;
		for &(a, b) in self.edges {
			if a == b {
				continue;
			}
			let (pa, pb) = (self.positions[a], self.positions[b]);
			let (dx, dy) = (pb.x - pa.x, pb.y - pa.y);
			let dist = dx.hypot(dy);
			if dist <= 1e-9 {
				continue;
			}
			let force = stiffness * (dist - ideal);
			let (fx, fy) = (dx / dist * force, dy / dist * force);
			self.forces[a].0 += fx;
			self.forces[a].1 += fy;
			self.forces[b].0 -= fx;
			self.forces[b].1 -= fy;
		}
	}

	fn apply_gravity(&mut self) {
		let strength = self.config.gravity / 1000.0;
		if strength == 0.0 {
			return;
		}
		let n = self.positions.len() as f64;
		let (sx, sy) = self
			.positions
			.iter()
			.fold((0.0, 0.0), |(sx, sy), p| (sx + p.x, sy + p.y));
		let (cx, cy) = (sx / n, sy / n);
		for (p, f) in self.positions.iter().zip(self.forces.iter_mut()) {
			f.0 += (cx - p.x) * strength;
			f.1 += (cy - p.y) * strength;
		}
	}

	/// Shelf-pack connected components in discovery order, `component_spacing`
	/// apart, so unrelated clusters never overlap.
	fn pack_components(&mut self) {
		let components = connected_components(&self.adjacency);
		let spacing = self.config.component_spacing;
		let radius = self.config.node_radius;

		let boxes: Vec<Bounds> = components
			.iter()
			.filter_map(|members| Bounds::around(members.iter().map(|&i| self.positions[i]), radius))
			.collect();
		let widest = boxes.iter().map(Bounds::width).fold(0.0, f64::max);
		let area: f64 = boxes
			.iter()
			.map(|b| (b.width() + spacing) * (b.height() + spacing))
			.sum();
		let row_limit = widest.max(area.sqrt());

		let (mut cursor_x, mut cursor_y, mut row_height) = (0.0f64, 0.0f64, 0.0f64);
		for (members, bounds) in components.iter().zip(&boxes) {
			if cursor_x > 0.0 && cursor_x + bounds.width() > row_limit {
				cursor_x = 0.0;
				cursor_y += row_height + spacing;
				row_height = 0.0;
			}
			let (dx, dy) = (cursor_x - bounds.min_x, cursor_y - bounds.min_y);
			for &i in members {
				self.positions[i].x += dx;
				self.positions[i].y += dy;
			}
			cursor_x += bounds.width() + spacing;
			row_height = row_height.max(bounds.height());
		}
	}
}

/// Row-major grid, `ideal_edge_length` apart.
fn grid_positions(n: usize, config: &LayoutConfig) -> Vec<Point> {
	let cols = (n as f64).sqrt().ceil().max(1.0) as usize;
	let step = config.ideal_edge_length;
	(0..n)
		.map(|i| Point::new((i % cols) as f64 * step, (i / cols) as f64 * step))
		.collect()
}

/// Uniform scatter over a square of side `ideal_edge_length * ceil(sqrt(n))`.
fn scattered_positions(n: usize, config: &LayoutConfig) -> Vec<Point> {
	let side = (n as f64).sqrt().ceil().max(1.0) * config.ideal_edge_length;
	let mut rng = XorShift64Star::new(config.seed);
	(0..n)
		.map(|_| Point::new(rng.next_f64() * side, rng.next_f64() * side))
		.collect()
}

/// Sorted, deduplicated undirected neighbour lists; self-loops dropped.
fn adjacency(n: usize, edges: &[(usize, usize)]) -> Vec<Vec<usize>> {
	let mut adjacency = vec![Vec::new(); n];
	for &(a, b) in edges {
		if a != b {
			adjacency[a].push(b);
			adjacency[b].push(a);
		}
	}
	for neighbours in &mut adjacency {
		neighbours.sort_unstable();
		neighbours.dedup();
	}
	adjacency
}

/// Undirected components, each listed in ascending node order and ordered by
/// their lowest node index.
fn connected_components(adjacency: &[Vec<usize>]) -> Vec<Vec<usize>> {
	let n = adjacency.len();
	let mut seen = vec![false; n];
	let mut components = Vec::new();
	for start in 0..n {
		if seen[start] {
			continue;
		}
		seen[start] = true;
		let mut members = vec![start];
		let mut stack = vec![start];
		while let Some(v) = stack.pop() {
			for &w in &adjacency[v] {
				if !seen[w] {
					seen[w] = true;
					members.push(w);
					stack.push(w);
				}
			}
		}
		members.sort_unstable();
		components.push(members);
	}
	components
}

struct XorShift64Star {
	state: u64,
}

impl XorShift64Star {
	fn new(seed: u64) -> Self {
		Self { state: seed.max(1) }
	}

	fn next_u64(&mut self) -> u64 {
		let mut x = self.state;
		x ^= x >> 12;
		x ^= x << 25;
		x ^= x >> 27;
		self.state = x;
		x.wrapping_mul(0x2545F4914F6CDD1D_u64)
	}

	/// Uniform in `[0, 1)`.
	fn next_f64(&mut self) -> f64 {
		(self.next_u64() >> 11) as f64 / (1u64 << 53) as f64
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::error::DataIntegrityError;
	use crate::graph::{Edge, Node};

	fn node(id: &str) -> Node {
		Node {
			id: id.into(),
			label: id.to_uppercase(),
		}
	}

	fn edge(source: &str, target: &str) -> Edge {
		Edge {
			source: source.into(),
			target: target.into(),
		}
	}

	fn quick() -> LayoutConfig {
		LayoutConfig {
			num_iter: 200,
			..LayoutConfig::default()
		}
	}

	#[test]
	fn dangling_edge_fails_before_any_step() {
		let payload = GraphPayload {
			nodes: vec![node("a")],
			edges: vec![edge("a", "missing")],
		};
		let err = LayoutEngine::new(quick()).run(&payload).unwrap_err();
		assert_eq!(
			err,
			LayoutError::Integrity(DataIntegrityError::DanglingEdge {
				from: "a".into(),
				to: "missing".into()
			})
		);
	}

	#[test]
	fn invalid_config_fails_before_any_step() {
		let config = LayoutConfig {
			ideal_edge_length: 0.0,
			..quick()
		};
		let payload = GraphPayload {
			nodes: vec![node("a")],
			edges: vec![],
		};
		assert!(matches!(
			LayoutEngine::new(config).run(&payload),
			Err(LayoutError::InvalidConfig { .. })
		));
	}

	#[test]
	fn runs_exactly_num_iter_steps() {
		let payload = GraphPayload {
			nodes: vec![node("a"), node("b")],
			edges: vec![edge("a", "b")],
		};
		let config = LayoutConfig {
			num_iter: 37,
			..quick()
		};
		assert_eq!(LayoutEngine::new(config).run(&payload).unwrap().iterations, 37);
	}

	#[test]
	fn empty_graph_lays_out_to_nothing() {
		let layout = LayoutEngine::new(quick()).run(&GraphPayload::default()).unwrap();
		assert!(layout.is_empty());
		assert!(layout.bounds().is_none());
		assert_eq!(layout.iterations, 0);
	}

	#[test]
	fn zero_iterations_keeps_the_grid() {
		let payload = GraphPayload {
			nodes: vec![node("a"), node("b"), node("c"), node("d")],
			edges: vec![edge("a", "b"), edge("b", "c"), edge("c", "d")],
		};
		let config = LayoutConfig {
			num_iter: 0,
			..quick()
		};
		let layout = LayoutEngine::new(config).run(&payload).unwrap();
		let r = layout.node_radius;
		assert_eq!(layout.position("a"), Some(Point::new(r, r)));
		assert_eq!(layout.position("b"), Some(Point::new(100.0 + r, r)));
		assert_eq!(layout.position("c"), Some(Point::new(r, 100.0 + r)));
		assert_eq!(layout.position("d"), Some(Point::new(100.0 + r, 100.0 + r)));
	}

	#[test]
	fn connected_pair_settles_near_ideal_length() {
		let payload = GraphPayload {
			nodes: vec![node("a"), node("b")],
			edges: vec![edge("a", "b")],
		};
		let layout = LayoutEngine::new(quick()).run(&payload).unwrap();
		let d = layout
			.position("a")
			.unwrap()
			.distance(layout.position("b").unwrap());
		assert!(d > 2.0 * layout.node_radius, "nodes overlap: {d}");
		assert!(d > 50.0 && d < 200.0, "pair distance {d}");
	}

	#[test]
	fn randomized_runs_are_seeded() {
		let payload = GraphPayload {
			nodes: vec![node("a"), node("b"), node("c")],
			edges: vec![edge("a", "b")],
		};
		let config = LayoutConfig {
			randomize: true,
			num_iter: 50,
			..quick()
		};
		let first = LayoutEngine::new(config.clone()).run(&payload).unwrap();
		let second = LayoutEngine::new(config.clone()).run(&payload).unwrap();
		assert_eq!(first, second);

		let reseeded = LayoutEngine::new(LayoutConfig { seed: 7, ..config })
			.run(&payload)
			.unwrap();
		assert_ne!(first, reseeded);
	}

	#[test]
	fn self_loops_are_tolerated() {
		let payload = GraphPayload {
			nodes: vec![node("a"), node("b")],
			edges: vec![edge("a", "a"), edge("a", "b")],
		};
		let layout = LayoutEngine::new(quick()).run(&payload).unwrap();
		assert_eq!(layout.edges, vec![(0, 0), (0, 1)]);
		assert!(layout.nodes.iter().all(|n| n.position.x.is_finite() && n.position.y.is_finite()));
	}

	#[test]
	fn steps_are_bounded_by_a_cooling_temperature() {
		let config = LayoutConfig {
			initial_temp: 1.0,
			cooling_factor: 0.5,
			min_temp: 0.25,
			..quick()
		};
		let edges = [(0, 1), (1, 2), (2, 3)];
		let mut sim = Simulation::new(4, &edges, &config);
		sim.refresh_neighbourhoods();

		for expected_next in [0.5, 0.25, 0.25, 0.25] {
			let limit = sim.temperature;
			let before = sim.positions.clone();
			sim.step();
			let moved: Vec<f64> = before
				.iter()
				.zip(&sim.positions)
				.map(|(a, b)| a.distance(*b))
				.collect();
			assert!(moved.iter().all(|&d| d <= limit + 1e-9), "{moved:?} exceeds {limit}");
			assert!(moved.iter().any(|&d| (d - limit).abs() < 1e-6), "{moved:?} never hit {limit}");
			assert_eq!(sim.temperature, expected_next);
		}
	}

	#[test]
	fn single_step_moves_at_most_the_initial_temperature() {
		let payload = GraphPayload {
			nodes: vec![node("a"), node("b"), node("c"), node("d")],
			edges: vec![edge("a", "b"), edge("b", "c"), edge("c", "d")],
		};
		let config = LayoutConfig {
			num_iter: 1,
			initial_temp: 1.0,
			min_temp: 1.0,
			..quick()
		};
		let grid = LayoutEngine::new(LayoutConfig { num_iter: 0, ..config.clone() })
			.run(&payload)
			.unwrap();
		let stepped = LayoutEngine::new(config).run(&payload).unwrap();

		// one component, so packing only translates; compare offsets from `a`
		let origin = |l: &Layout| l.nodes[0].position;
		for (g, s) in grid.nodes.iter().zip(&stepped.nodes) {
			let (go, so) = (origin(&grid), origin(&stepped));
			let (gx, gy) = (g.position.x - go.x, g.position.y - go.y);
			let (sx, sy) = (s.position.x - so.x, s.position.y - so.y);
			// each node moved at most 1, so relative offsets change by at most 2
			assert!((sx - gx).hypot(sy - gy) <= 2.0 + 1e-9, "{} drifted", g.id);
		}
	}

	#[test]
	fn repulsion_is_limited_to_nearby_nodes() {
		let config = quick();
		let mut sim = Simulation::new(100, &[], &config);
		sim.refresh_neighbourhoods();

		// 10x10 grid, 100 apart: range 200 plus two radii reaches two cells
		assert_eq!(sim.neighbourhoods[0], vec![1, 2, 10, 11, 12, 20, 21, 22]);
		assert_eq!(
			sim.neighbourhoods[55],
			vec![56, 57, 63, 64, 65, 66, 67, 73, 74, 75, 76, 77]
		);
		assert!(sim.neighbourhoods[99].is_empty());
	}

	#[test]
	fn distant_nodes_do_not_repel() {
		let config = LayoutConfig {
			gravity: 0.0,
			..quick()
		};
		let mut sim = Simulation::new(2, &[], &config);
		sim.positions = vec![Point::new(0.0, 0.0), Point::new(1000.0, 0.0)];
		sim.refresh_neighbourhoods();
		sim.step();
		assert_eq!(sim.positions, vec![Point::new(0.0, 0.0), Point::new(1000.0, 0.0)]);
	}

	#[test]
	fn overlap_push_skips_adjacent_pairs() {
		let config = quick();
		let force_on_first = |edges: &[(usize, usize)]| {
			let mut sim = Simulation::new(2, edges, &config);
			// centres 20 apart: boundary gap 10, inside `node_overlap`
			sim.positions = vec![Point::new(0.0, 0.0), Point::new(20.0, 0.0)];
			sim.refresh_neighbourhoods();
			sim.apply_repulsion();
			sim.forces[0].0
		};
		assert_eq!(force_on_first(&[]), -(400_000.0 / 100.0 + 20.0));
		assert_eq!(force_on_first(&[(0, 1)]), -(400_000.0 / 100.0));
	}

	#[test]
	fn components_follow_discovery_order() {
		let components = connected_components(&adjacency(5, &[(3, 1), (0, 4)]));
		assert_eq!(components, vec![vec![0, 4], vec![1, 3], vec![2]]);
	}

	#[test]
	fn xorshift_stays_in_unit_interval() {
		let mut rng = XorShift64Star::new(0);
		for _ in 0..1000 {
			let v = rng.next_f64();
			assert!((0.0..1.0).contains(&v));
		}
	}
}
