use std::f64::consts::PI;

use web_sys::CanvasRenderingContext2d;

use super::state::GraphViewState;

const BACKGROUND: &str = "#ffffff";
const NODE_COLOR: &str = "#666666";
const EDGE_RGB: &str = "204, 204, 204";
const HIGHLIGHT_RGB: &str = "100, 140, 220";

fn ease_out_cubic(t: f64) -> f64 {
	1.0 - (1.0 - t).powi(3)
}

pub fn render(state: &GraphViewState, ctx: &CanvasRenderingContext2d) {
	ctx.set_fill_style_str(BACKGROUND);
	ctx.fill_rect(0.0, 0.0, state.width, state.height);
	ctx.save();
	let _ = ctx.translate(state.transform.x, state.transform.y);
	let _ = ctx.scale(state.transform.k, state.transform.k);
	draw_edges(state, ctx);
	draw_nodes(state, ctx);
	ctx.restore();
}

fn draw_edges(state: &GraphViewState, ctx: &CanvasRenderingContext2d) {
	let radius = state.layout.node_radius;
	let k = state.transform.k;
	let (line_width, arrow_size) = (3.0 / k.max(1.0), 9.0 / k.max(1.0));
	let t = ease_out_cubic(state.hover.highlight_t);
	let nodes = &state.layout.nodes;

	for &(src, tgt) in &state.layout.edges {
		let (Some(n1), Some(n2)) = (nodes.get(src), nodes.get(tgt)) else {
			continue;
		};
		let is_highlighted = state.is_highlighted(src) && state.is_highlighted(tgt);
		let (rgb, alpha) = if is_highlighted {
			(HIGHLIGHT_RGB, 0.8 + 0.2 * t)
		} else {
			(EDGE_RGB, 1.0 - 0.6 * t)
		};
		ctx.set_stroke_style_str(&format!("rgba({rgb}, {alpha})"));
		ctx.set_fill_style_str(&format!("rgba({rgb}, {alpha})"));
		ctx.set_line_width(line_width);

		let (x1, y1, x2, y2) = (
			n1.position.x,
			n1.position.y,
			n2.position.x,
			n2.position.y,
		);
		if src == tgt {
			// self-loop above the node
			ctx.begin_path();
			let _ = ctx.arc(x1, y1 - radius * 2.0, radius * 1.5, 0.0, 2.0 * PI);
			ctx.stroke();
			continue;
		}

		let (dx, dy) = (x2 - x1, y2 - y1);
		let dist = (dx * dx + dy * dy).sqrt();
		if dist < 0.001 {
			continue;
		}
		let (ux, uy) = (dx / dist, dy / dist);
		ctx.begin_path();
		ctx.move_to(x1 + ux * radius, y1 + uy * radius);
		ctx.line_to(x2 - ux * (radius + arrow_size), y2 - uy * (radius + arrow_size));
		ctx.stroke();

		let (tip_x, tip_y) = (x2 - ux * radius, y2 - uy * radius);
		let (back_x, back_y) = (tip_x - ux * arrow_size, tip_y - uy * arrow_size);
		let (px, py) = (-uy * arrow_size * 0.5, ux * arrow_size * 0.5);
		ctx.begin_path();
		ctx.move_to(tip_x, tip_y);
		ctx.line_to(back_x + px, back_y + py);
		ctx.line_to(back_x - px, back_y - py);
		ctx.close_path();
		ctx.fill();
	}
}

fn draw_nodes(state: &GraphViewState, ctx: &CanvasRenderingContext2d) {
	let (has_highlight, t, k) = (
		state.has_active_highlight(),
		ease_out_cubic(state.hover.highlight_t),
		state.transform.k,
	);
	let base_radius = state.layout.node_radius;
	ctx.set_font(&format!("{}px sans-serif", 12.0 / k.max(0.5)));

	// dimmed nodes first, highlighted ones on top
	for pass_highlighted in [false, true] {
		for (idx, node) in state.layout.nodes.iter().enumerate() {
			let highlighted = has_highlight && state.is_highlighted(idx);
			if highlighted != pass_highlighted {
				continue;
			}
			let (x, y) = (node.position.x, node.position.y);
			let (alpha, radius) = match (highlighted, state.is_hovered(idx)) {
				(false, _) => (1.0 - 0.6 * t, base_radius),
				(true, true) => (1.0, base_radius * (1.0 + 0.4 * t)),
				(true, false) => (1.0, base_radius * (1.0 + 0.2 * t)),
			};

			ctx.set_global_alpha(alpha);
			ctx.begin_path();
			let _ = ctx.arc(x, y, radius, 0.0, 2.0 * PI);
			ctx.set_fill_style_str(NODE_COLOR);
			ctx.fill();

			if highlighted && state.is_hovered(idx) && t > 0.01 {
				ctx.begin_path();
				let _ = ctx.arc(x, y, radius + 2.0 / k, 0.0, 2.0 * PI);
				ctx.set_stroke_style_str(&format!("rgba({HIGHLIGHT_RGB}, {})", 0.9 * t));
				ctx.set_line_width(1.5 / k);
				ctx.stroke();
			}

			ctx.set_fill_style_str("#222222");
			let _ = ctx.fill_text(&node.label, x + radius + 3.0, y + 4.0);
			ctx.set_global_alpha(1.0);
		}
	}
}
