//! Leptos component wrapping the relationship graph canvas.
//!
//! The component creates an HTML canvas element and wires up mouse/wheel event
//! handlers for node dragging, panning, zooming, edge hover and clicks. An
//! animation loop runs via `requestAnimationFrame`, ticking the layout and
//! redrawing only when something changed. The tooltip and the detail modal are
//! ordinary Leptos views driven by signals.

use std::cell::{Cell, RefCell};
use std::rc::Rc;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicI32, Ordering};

use leptos::ev;
use leptos::prelude::*;
use log::{debug, info, warn};
use wasm_bindgen::prelude::*;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, MouseEvent, WheelEvent};

use super::avatar::AvatarCache;
use super::config::GraphConfig;
use super::detail::CharacterDetailModal;
use super::interaction::{GraphAction, GraphEvent};
use super::render;
use super::scene;
use super::state::GraphState;
use super::theme::Theme;
use super::tooltip::{RelationshipTooltip, Tooltip};
use super::types::{Character, GraphData, Relationship};
use crate::error::GraphError;

/// Bundles graph state with everything needed to draw it.
struct GraphContext {
	state: GraphState,
	theme: Theme,
	avatars: AvatarCache,
	ctx: CanvasRenderingContext2d,
}

impl GraphContext {
	/// One animation frame: tick, then redraw if anything changed. Returns
	/// hover changes caused by nodes moving under a resting pointer.
	fn frame(&mut self) -> Vec<GraphEvent> {
		self.state.tick();
		let loaded = self.avatars.poll();
		if self.state.take_redraw() || loaded {
			let scene = scene::build_scene(&self.state, &self.theme);
			render::render(&scene, &self.ctx, &mut self.avatars);
		}
		self.state.take_events()
	}
}

type FrameCallback = Rc<RefCell<Option<Closure<dyn FnMut()>>>>;
type EventSink = Rc<dyn Fn(Vec<GraphEvent>)>;

/// How the canvas picks its size.
#[derive(Clone, Copy, Debug)]
struct Sizing {
	fullscreen: bool,
	width: Option<f64>,
	height: Option<f64>,
}

impl Sizing {
	fn measure(&self, canvas: &HtmlCanvasElement) -> Result<(f64, f64), GraphError> {
		if self.fullscreen {
			let window = web_sys::window().ok_or(GraphError::NoWindow)?;
			return Ok((
				window.inner_width()?.as_f64().unwrap_or(800.0),
				window.inner_height()?.as_f64().unwrap_or(600.0),
			));
		}
		let parent = canvas.parent_element();
		let measured = |dim: fn(&web_sys::Element) -> i32, fallback: f64| {
			parent
				.as_ref()
				.map(|p| dim(p) as f64)
				.filter(|v| *v > 0.0)
				.unwrap_or(fallback)
		};
		Ok((
			self.width
				.unwrap_or_else(|| measured(web_sys::Element::client_width, 800.0)),
			self.height
				.unwrap_or_else(|| measured(web_sys::Element::client_height, 600.0)),
		))
	}
}

fn mount_graph(
	canvas: &HtmlCanvasElement,
	data: &GraphData,
	config: &GraphConfig,
	sizing: Sizing,
) -> Result<GraphContext, GraphError> {
	let (w, h) = sizing.measure(canvas)?;
	canvas.set_width(w as u32);
	canvas.set_height(h as u32);

	let ctx: CanvasRenderingContext2d = canvas
		.get_context("2d")?
		.ok_or(GraphError::NoContext)?
		.dyn_into()
		.map_err(|_| GraphError::NoContext)?;

	let theme = Theme::by_name(&config.theme);
	info!(
		"relationship-graph: mounted {w}x{h} canvas with {} theme",
		theme.name
	);
	Ok(GraphContext {
		state: GraphState::new(data, w, h, config, theme.node.radius),
		theme,
		avatars: AvatarCache::new(),
		ctx,
	})
}

fn start_animation(
	context: Rc<RefCell<Option<GraphContext>>>,
	animate: &FrameCallback,
	frame_id: Arc<AtomicI32>,
	alive: Arc<AtomicBool>,
	on_events: EventSink,
) -> Result<(), GraphError> {
	let window = web_sys::window().ok_or(GraphError::NoWindow)?;
	let animate_weak = Rc::downgrade(animate);
	let frame_inner = frame_id.clone();

	*animate.borrow_mut() = Some(Closure::new(move || {
		if !alive.load(Ordering::Relaxed) {
			return;
		}
		let events = context
			.borrow_mut()
			.as_mut()
			.map(GraphContext::frame)
			.unwrap_or_default();
		if !events.is_empty() {
			on_events(events);
		}
		let Some(animate) = animate_weak.upgrade() else {
			return;
		};
		if let (Some(window), Some(cb)) = (web_sys::window(), animate.borrow().as_ref()) {
			if let Ok(id) = window.request_animation_frame(cb.as_ref().unchecked_ref()) {
				frame_inner.store(id, Ordering::Relaxed);
			}
		}
	}));

	if let Some(cb) = animate.borrow().as_ref() {
		let id = window.request_animation_frame(cb.as_ref().unchecked_ref())?;
		frame_id.store(id, Ordering::Relaxed);
	}
	Ok(())
}

/// Gesture help shown in the corner of the graph.
#[component]
fn UsageHint() -> impl IntoView {
	view! {
		<div
			class="relationship-graph-hint bg-white bg-opacity-90 rounded-lg shadow p-3 text-xs text-gray-600"
			style="position: absolute; left: 16px; bottom: 16px; pointer-events: none;"
		>
			<div class="font-medium text-gray-900 mb-1">"操作方法"</div>
			<div>"• ノードをクリック: 人物詳細表示"</div>
			<div>"• 線にマウスオーバー: 関係詳細表示"</div>
			<div>"• ドラッグ: ノード移動"</div>
			<div>"• マウスホイール: ズーム"</div>
		</div>
	}
}

/// Renders an interactive relationship graph on a canvas element.
///
/// Characters and relationships are reactive; any change rebuilds the layout
/// from scratch. The component sizes itself to its parent container by default;
/// set `fullscreen = true` to fill the viewport. Explicit `width`/`height`
/// override automatic sizing. Clicking a node opens the detail modal and calls
/// `on_node_click`; clicking an edge calls `on_link_click`.
#[component]
pub fn RelationshipGraph(
	/// Characters drawn as nodes.
	#[prop(into)]
	characters: Signal<Vec<Character>>,
	/// Relationships drawn as edges.
	#[prop(into)]
	relationships: Signal<Vec<Relationship>>,
	/// Called after the detail modal opens for a clicked node.
	#[prop(optional, into)]
	on_node_click: Option<Callback<Character>>,
	/// Called when an edge is clicked.
	#[prop(optional, into)]
	on_link_click: Option<Callback<Relationship>>,
	/// Layout, interaction and theme overrides.
	#[prop(optional)]
	config: GraphConfig,
	/// Fill the window instead of the parent element.
	#[prop(default = false)]
	fullscreen: bool,
	/// Fixed canvas width in pixels.
	#[prop(default = None)]
	width: Option<f64>,
	/// Fixed canvas height in pixels.
	#[prop(default = None)]
	height: Option<f64>,
) -> impl IntoView {
	let sizing = Sizing {
		fullscreen,
		width,
		height,
	};
	let canvas_ref = NodeRef::<leptos::html::Canvas>::new();
	let context: Rc<RefCell<Option<GraphContext>>> = Rc::new(RefCell::new(None));
	let animate: FrameCallback = Rc::new(RefCell::new(None));
	let frame_id = Arc::new(AtomicI32::new(0));
	let alive = Arc::new(AtomicBool::new(true));

	let selected = RwSignal::new(None::<Character>);
	let tooltip = RwSignal::new(None::<Tooltip>);

	// Events carry ids; look them up in the current props, not the layout.
	let handle_events = move |events: Vec<GraphEvent>, client: (f64, f64)| {
		for event in events {
			let action = characters.with_untracked(|chars| {
				relationships.with_untracked(|rels| event.resolve(chars, rels))
			});
			match action {
				Some(GraphAction::ShowTooltip(content)) => tooltip.set(Some(Tooltip {
					content,
					x: client.0,
					y: client.1,
				})),
				Some(GraphAction::HideTooltip) => tooltip.set(None),
				Some(GraphAction::OpenCharacter(character)) => {
					debug!("relationship-graph: node {} clicked", character.id);
					tooltip.set(None);
					selected.set(Some(character.clone()));
					if let Some(cb) = on_node_click.as_ref() {
						cb.run(character);
					}
				}
				Some(GraphAction::SelectRelationship(rel)) => {
					debug!("relationship-graph: edge {} clicked", rel.id);
					if let Some(cb) = on_link_click.as_ref() {
						cb.run(rel);
					}
				}
				None => debug!("relationship-graph: {event:?} refers to removed data"),
			}
		}
	};

	// Viewport position of the last pointer event, for tooltips raised by a tick.
	let last_client = Rc::new(Cell::new((0.0, 0.0)));
	let last_client_tick = last_client.clone();
	let context_tick = context.clone();
	let on_tick_events: EventSink = Rc::new(move |events: Vec<GraphEvent>| {
		let cursor = context_tick.borrow().as_ref().map(|c| c.state.cursor());
		if let (Some(canvas), Some(cursor)) = (canvas_ref.get_untracked(), cursor) {
			let canvas: HtmlCanvasElement = canvas.into();
			let _ = web_sys::HtmlElement::style(&canvas).set_property("cursor", cursor);
		}
		handle_events(events, last_client_tick.get());
	});

	let (context_init, frame_init, alive_init) = (context.clone(), frame_id.clone(), alive.clone());
	Effect::new(move |_| {
		let data = GraphData {
			characters: characters.get(),
			relationships: relationships.get(),
		};
		let Some(canvas) = canvas_ref.get() else {
			return;
		};
		let canvas: HtmlCanvasElement = canvas.into();

		if let Some(c) = context_init.borrow_mut().as_mut() {
			debug!("relationship-graph: data changed, rebuilding layout");
			let transform = c.state.transform;
			c.state = GraphState::new(&data, c.state.width, c.state.height, &config, c.theme.node.radius);
			c.state.transform = transform;
			tooltip.set(None);
			return;
		}

		match mount_graph(&canvas, &data, &config, sizing) {
			Ok(c) => *context_init.borrow_mut() = Some(c),
			Err(err) => {
				warn!("relationship-graph: {err}");
				return;
			}
		}
		if let Err(err) = start_animation(
			context_init.clone(),
			&animate,
			frame_init.clone(),
			alive_init.clone(),
			on_tick_events.clone(),
		) {
			warn!("relationship-graph: animation loop not started: {err}");
		}
	});

	let context_rs = context.clone();
	let resize_handle = window_event_listener(ev::resize, move |_| {
		let resized = canvas_ref
			.get_untracked()
			.map(HtmlCanvasElement::from)
			.ok_or(GraphError::CanvasMissing)
			.and_then(|canvas| {
				let (w, h) = sizing.measure(&canvas)?;
				canvas.set_width(w as u32);
				canvas.set_height(h as u32);
				Ok((w, h))
			});
		match resized {
			Ok((w, h)) => {
				if let Some(c) = context_rs.borrow_mut().as_mut() {
					c.state.resize(w, h);
				}
			}
			Err(err) => debug!("relationship-graph: resize skipped: {err}"),
		}
	});

	on_cleanup(move || {
		alive.store(false, Ordering::Relaxed);
		if let Some(window) = web_sys::window() {
			let _ = window.cancel_animation_frame(frame_id.load(Ordering::Relaxed));
		}
		resize_handle.remove();
		debug!("relationship-graph: unmounted");
	});

	let local_point = move |ev: &MouseEvent| -> Option<(HtmlCanvasElement, f64, f64)> {
		let canvas: HtmlCanvasElement = canvas_ref.get_untracked()?.into();
		let rect = canvas.get_bounding_client_rect();
		let (x, y) = (
			ev.client_x() as f64 - rect.left(),
			ev.client_y() as f64 - rect.top(),
		);
		Some((canvas, x, y))
	};

	// Runs a pointer handler against the state, then applies its events with
	// the state borrow released.
	let context_ptr = context.clone();
	let last_client_ptr = last_client.clone();
	let dispatch = Rc::new(
		move |ev: &MouseEvent, handler: &dyn Fn(&mut GraphState, f64, f64) -> Vec<GraphEvent>| {
			let Some((canvas, x, y)) = local_point(ev) else {
				return;
			};
			let (events, cursor) = {
				let mut slot = context_ptr.borrow_mut();
				let Some(c) = slot.as_mut() else {
					return;
				};
				(handler(&mut c.state, x, y), c.state.cursor())
			};
			let _ = web_sys::HtmlElement::style(&canvas).set_property("cursor", cursor);
			let client = (ev.client_x() as f64, ev.client_y() as f64);
			last_client_ptr.set(client);
			handle_events(events, client);
		},
	);

	let dispatch_md = dispatch.clone();
	let on_mousedown = move |ev: MouseEvent| {
		dispatch_md(&ev, &|s: &mut GraphState, x: f64, y: f64| s.pointer_down(x, y));
	};

	let dispatch_mm = dispatch.clone();
	let on_mousemove = move |ev: MouseEvent| {
		dispatch_mm(&ev, &|s: &mut GraphState, x: f64, y: f64| s.pointer_move(x, y));
		// Follow the pointer while an edge tooltip is visible.
		if tooltip.with_untracked(Option::is_some) {
			tooltip.update(|t| {
				if let Some(t) = t {
					t.x = ev.client_x() as f64;
					t.y = ev.client_y() as f64;
				}
			});
		}
	};

	let dispatch_mu = dispatch.clone();
	let on_mouseup = move |ev: MouseEvent| {
		dispatch_mu(&ev, &|s: &mut GraphState, x: f64, y: f64| s.pointer_up(x, y));
	};

	let dispatch_ml = dispatch;
	let on_mouseleave = move |ev: MouseEvent| {
		dispatch_ml(&ev, &|s: &mut GraphState, _: f64, _: f64| s.pointer_leave());
	};

	let context_wh = context.clone();
	let last_client_wh = last_client;
	let on_wheel = move |ev: WheelEvent| {
		ev.prevent_default();
		last_client_wh.set((ev.client_x() as f64, ev.client_y() as f64));
		let Some((_, x, y)) = local_point(ev.as_ref()) else {
			return;
		};
		if let Some(c) = context_wh.borrow_mut().as_mut() {
			c.state.wheel(x, y, ev.delta_y());
		}
	};

	let close_detail = Callback::new(move |_: ()| selected.set(None));

	view! {
		<div class="relationship-graph" style="position: relative; width: 100%; height: 100%;">
			<canvas
				node_ref=canvas_ref
				class="relationship-graph-canvas"
				on:mousedown=on_mousedown
				on:mousemove=on_mousemove
				on:mouseup=on_mouseup
				on:mouseleave=on_mouseleave
				on:wheel=on_wheel
				style="display: block; cursor: grab;"
			/>
			<UsageHint />
		</div>
		<RelationshipTooltip tooltip=tooltip />
		<CharacterDetailModal character=selected on_close=close_detail />
	}
}
