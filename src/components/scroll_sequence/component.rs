//! Leptos component wrapping the scroll-scrubbed sequence canvas.
//!
//! The component renders a tall stage with a sticky full-viewport canvas.
//! At mount it fires all frame requests, then runs a `requestAnimationFrame`
//! loop that samples the container's scroll offset, advances the progress
//! spring, and repaints the canvas whenever the smoothed value moves or the
//! viewport resizes. Teardown cancels the pending frame callback, detaches
//! the resize listener, and disarms in-flight image loads so nothing writes
//! into component state after unmount.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use leptos::prelude::*;
use leptos::__reexports::send_wrapper::SendWrapper;
use log::error;
use wasm_bindgen::prelude::*;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, HtmlImageElement, Window};

use super::frames::{FRAME_COUNT, FrameSet, LoadingState, frame_url};
use super::overlay::{TextOverlay, hint_opacity};
use super::progress::{Spring, frame_index, track_progress};
use super::render;
use crate::components::NARROW_BREAKPOINT;

/// Stage height in viewport-height units below the narrow breakpoint.
const NARROW_STAGE_VH: u32 = 200;
/// Stage height in viewport-height units at or above the breakpoint.
const WIDE_STAGE_VH: u32 = 400;
/// Nominal timestep fed to the spring each animation frame.
const FRAME_DT: f64 = 0.016;

/// Mutable player state owned by the animation loop.
struct PlayerState {
	frames: FrameSet<HtmlImageElement>,
	loading: LoadingState,
	spring: Spring,
	raw_progress: f64,
	needs_redraw: bool,
}

/// Keeps pending image elements and their callbacks alive until teardown.
struct SequenceLoader {
	images: Vec<HtmlImageElement>,
	callbacks: Vec<Closure<dyn FnMut()>>,
}

impl SequenceLoader {
	/// Clears load/error handlers so late settles cannot re-enter.
	fn detach(&mut self) {
		for image in &self.images {
			image.set_onload(None);
			image.set_onerror(None);
		}
		self.callbacks.clear();
	}
}

fn stage_height_vh(viewport_width: f64) -> u32 {
	if viewport_width < NARROW_BREAKPOINT {
		NARROW_STAGE_VH
	} else {
		WIDE_STAGE_VH
	}
}

fn inner_width(window: &Window) -> f64 {
	window.inner_width().ok().and_then(|v| v.as_f64()).unwrap_or(0.0)
}

fn inner_height(window: &Window) -> f64 {
	window.inner_height().ok().and_then(|v| v.as_f64()).unwrap_or(0.0)
}

/// Renders the scroll-scrubbed image-sequence hero.
///
/// Mount inside a normally flowing page; the component provides its own
/// tall scroll container and pins a full-viewport canvas inside it. Frame
/// assets are fetched from `{base_path}/sequence/frame_{i}.jpg`.
#[component]
pub fn ScrollSequence(#[prop(into, default = String::new())] base_path: String) -> impl IntoView {
	let container_ref = NodeRef::<leptos::html::Div>::new();
	let canvas_ref = NodeRef::<leptos::html::Canvas>::new();

	let loading_percent = RwSignal::new(0u32);
	let is_loaded = RwSignal::new(false);
	let progress = RwSignal::new(0.0f64);
	let stage_vh = RwSignal::new(WIDE_STAGE_VH);

	let state: Rc<RefCell<Option<PlayerState>>> = Rc::new(RefCell::new(None));
	let loader: Rc<RefCell<Option<SequenceLoader>>> = Rc::new(RefCell::new(None));
	let animate: Rc<RefCell<Option<Closure<dyn FnMut()>>>> = Rc::new(RefCell::new(None));
	let resize_cb: Rc<RefCell<Option<Closure<dyn FnMut()>>>> = Rc::new(RefCell::new(None));
	let raf_id: Rc<Cell<Option<i32>>> = Rc::new(Cell::new(None));
	let alive: Rc<Cell<bool>> = Rc::new(Cell::new(true));

	let (state_init, loader_init, animate_init, resize_init) = (
		state.clone(),
		loader.clone(),
		animate.clone(),
		resize_cb.clone(),
	);
	let (raf_init, alive_init) = (raf_id.clone(), alive.clone());

	Effect::new(move |_| {
		let Some(canvas) = canvas_ref.get() else {
			return;
		};
		let canvas: HtmlCanvasElement = canvas.into();
		let Some(window) = web_sys::window() else {
			return;
		};
		let Some(ctx) = canvas
			.get_context("2d")
			.ok()
			.flatten()
			.and_then(|c| c.dyn_into::<CanvasRenderingContext2d>().ok())
		else {
			return;
		};

		stage_vh.set(stage_height_vh(inner_width(&window)));

		*state_init.borrow_mut() = Some(PlayerState {
			frames: FrameSet::new(FRAME_COUNT),
			loading: LoadingState::new(FRAME_COUNT),
			spring: Spring::new(0.0),
			raw_progress: 0.0,
			needs_redraw: true,
		});

		// Fire every frame request up front; each settles exactly once.
		let mut pending = SequenceLoader {
			images: Vec::with_capacity(FRAME_COUNT),
			callbacks: Vec::with_capacity(FRAME_COUNT * 2),
		};
		for index in 0..FRAME_COUNT {
			let image = HtmlImageElement::new().unwrap();

			let onload = {
				let (state, alive, image) = (state_init.clone(), alive_init.clone(), image.clone());
				Closure::<dyn FnMut()>::new(move || {
					if !alive.get() {
						return;
					}
					if let Some(ref mut s) = *state.borrow_mut() {
						s.frames.insert(index, image.clone());
						s.loading.record_loaded();
						loading_percent.set(s.loading.percent());
						if s.loading.is_complete() {
							s.needs_redraw = true;
							is_loaded.set(true);
						}
					}
				})
			};
			image.set_onload(Some(onload.as_ref().unchecked_ref()));

			let onerror = {
				let (state, alive) = (state_init.clone(), alive_init.clone());
				Closure::<dyn FnMut()>::new(move || {
					if !alive.get() {
						return;
					}
					error!("failed to load frame {index}");
					if let Some(ref mut s) = *state.borrow_mut() {
						s.loading.record_failed();
						loading_percent.set(s.loading.percent());
						if s.loading.is_complete() {
							s.needs_redraw = true;
							is_loaded.set(true);
						}
					}
				})
			};
			image.set_onerror(Some(onerror.as_ref().unchecked_ref()));

			image.set_src(&frame_url(&base_path, index));
			pending.images.push(image);
			pending.callbacks.push(onload);
			pending.callbacks.push(onerror);
		}
		*loader_init.borrow_mut() = Some(pending);

		let state_resize = state_init.clone();
		*resize_init.borrow_mut() = Some(Closure::new(move || {
			let Some(win) = web_sys::window() else {
				return;
			};
			stage_vh.set(stage_height_vh(inner_width(&win)));
			if let Some(ref mut s) = *state_resize.borrow_mut() {
				s.needs_redraw = true;
			}
		}));
		if let Some(ref cb) = *resize_init.borrow() {
			let _ = window.add_event_listener_with_callback("resize", cb.as_ref().unchecked_ref());
		}

		let (state_anim, animate_inner, raf) =
			(state_init.clone(), animate_init.clone(), raf_init.clone());
		let canvas_anim = canvas.clone();
		*animate_init.borrow_mut() = Some(Closure::new(move || {
			let Some(win) = web_sys::window() else {
				return;
			};
			let (vw, vh) = (inner_width(&win), inner_height(&win));

			if let Some(div) = container_ref.get_untracked() {
				let rect = div.get_bounding_client_rect();
				if let Some(ref mut s) = *state_anim.borrow_mut() {
					let raw = track_progress(rect.top(), rect.height(), vh);
					if raw != s.raw_progress {
						s.raw_progress = raw;
						progress.set(raw);
					}
					let before = s.spring.value();
					let smoothed = s.spring.tick(raw, FRAME_DT);
					let moved = smoothed != before;
					if is_loaded.get_untracked() && (moved || s.needs_redraw) {
						s.needs_redraw = false;
						if let Some(image) = s.frames.get(frame_index(smoothed, FRAME_COUNT)) {
							render::draw_frame(&canvas_anim, &ctx, image, vw, vh);
						}
					}
				}
			}

			if let Some(ref cb) = *animate_inner.borrow() {
				raf.set(win.request_animation_frame(cb.as_ref().unchecked_ref()).ok());
			}
		}));
		if let Some(ref cb) = *animate_init.borrow() {
			raf_init.set(window.request_animation_frame(cb.as_ref().unchecked_ref()).ok());
		}
	});

	let cleanup = SendWrapper::new(move || {
		alive.set(false);
		if let Some(win) = web_sys::window() {
			if let Some(id) = raf_id.take() {
				let _ = win.cancel_animation_frame(id);
			}
			if let Some(ref cb) = *resize_cb.borrow() {
				let _ = win.remove_event_listener_with_callback("resize", cb.as_ref().unchecked_ref());
			}
		}
		if let Some(mut pending) = loader.borrow_mut().take() {
			pending.detach();
		}
		animate.borrow_mut().take();
		resize_cb.borrow_mut().take();
		state.borrow_mut().take();
	});
	on_cleanup(move || cleanup.take()());

	view! {
		<div
			node_ref=container_ref
			class="sequence-stage"
			style=move || format!("position: relative; width: 100%; height: {}vh;", stage_vh.get())
		>
			<Show when=move || !is_loaded.get()>
				<div
					class="sequence-loading"
					style="position: fixed; inset: 0; display: flex; flex-direction: column; align-items: center; justify-content: center; background: #050505; z-index: 50;"
				>
					<div class="sequence-loading-track">
						<div
							class="sequence-loading-bar"
							style=move || format!("width: {}%;", loading_percent.get())
						/>
					</div>
					<p>{move || format!("LOADING SEQUENCE {}%", loading_percent.get())}</p>
				</div>
			</Show>
			<div
				class="sequence-pin"
				style="position: sticky; top: 0; height: 100vh; width: 100%; overflow: hidden; background: #050505;"
			>
				<canvas node_ref=canvas_ref class="sequence-canvas" style="display: block;" />
				<Show when=move || is_loaded.get()>
					<TextOverlay progress=progress />
					<div
						class="sequence-hint"
						style=move || {
							format!(
								"position: absolute; bottom: 2.5rem; left: 50%; transform: translateX(-50%); opacity: {:.3};",
								hint_opacity(progress.get()),
							)
						}
					>
						"SCROLL TO EXPLORE"
					</div>
				</Show>
			</div>
		</div>
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn stage_height_follows_breakpoint() {
		assert_eq!(stage_height_vh(375.0), NARROW_STAGE_VH);
		assert_eq!(stage_height_vh(767.9), NARROW_STAGE_VH);
		assert_eq!(stage_height_vh(768.0), WIDE_STAGE_VH);
		assert_eq!(stage_height_vh(1920.0), WIDE_STAGE_VH);
	}
}
