//! Leptos component wrapping an ambient particle canvas.
//!
//! The component creates a canvas sized to its parent's box and runs the
//! simulation from a `requestAnimationFrame` loop. A window resize resizes
//! the canvas buffer and reseeds the whole particle set with the count
//! recomputed for the new width. Unmounting cancels the pending frame
//! callback and detaches the resize listener.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use leptos::prelude::*;
use leptos::__reexports::send_wrapper::SendWrapper;
use wasm_bindgen::prelude::*;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

use super::field::ParticleField;
use super::render;
use super::style::FieldStyle;

/// Nominal timestep fed to the simulation each animation frame.
const FRAME_DT: f64 = 0.016;

fn parent_box(canvas: &HtmlCanvasElement) -> (f64, f64) {
	let parent = canvas.parent_element();
	(
		parent
			.as_ref()
			.map(|p| p.client_width() as f64)
			.unwrap_or(800.0),
		parent.map(|p| p.client_height() as f64).unwrap_or(600.0),
	)
}

/// Renders an ambient particle field filling its parent's box.
///
/// The canvas is painted behind foreground content and ignores pointer
/// events. Pick a look with [`FieldStyle`]; the starfield preset is the
/// default.
#[component]
pub fn ParticleFieldCanvas(#[prop(default = FieldStyle::starfield())] style: FieldStyle) -> impl IntoView {
	let canvas_ref = NodeRef::<leptos::html::Canvas>::new();

	let field: Rc<RefCell<Option<ParticleField>>> = Rc::new(RefCell::new(None));
	let animate: Rc<RefCell<Option<Closure<dyn FnMut()>>>> = Rc::new(RefCell::new(None));
	let resize_cb: Rc<RefCell<Option<Closure<dyn FnMut()>>>> = Rc::new(RefCell::new(None));
	let raf_id: Rc<Cell<Option<i32>>> = Rc::new(Cell::new(None));

	let (field_init, animate_init, resize_init, raf_init) = (
		field.clone(),
		animate.clone(),
		resize_cb.clone(),
		raf_id.clone(),
	);

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

		let (w, h) = parent_box(&canvas);
		canvas.set_width(w as u32);
		canvas.set_height(h as u32);
		*field_init.borrow_mut() =
			Some(ParticleField::new(style.clone(), w, h, js_sys::Math::random()));

		let (field_resize, canvas_resize) = (field_init.clone(), canvas.clone());
		*resize_init.borrow_mut() = Some(Closure::new(move || {
			let (nw, nh) = parent_box(&canvas_resize);
			canvas_resize.set_width(nw as u32);
			canvas_resize.set_height(nh as u32);
			if let Some(ref mut f) = *field_resize.borrow_mut() {
				f.reseed(nw, nh, js_sys::Math::random());
			}
		}));
		if let Some(ref cb) = *resize_init.borrow() {
			let _ = window.add_event_listener_with_callback("resize", cb.as_ref().unchecked_ref());
		}

		let (field_anim, animate_inner, raf) =
			(field_init.clone(), animate_init.clone(), raf_init.clone());
		*animate_init.borrow_mut() = Some(Closure::new(move || {
			if let Some(ref mut f) = *field_anim.borrow_mut() {
				f.tick(FRAME_DT);
				render::render(f, &ctx);
			}
			if let Some(win) = web_sys::window() {
				if let Some(ref cb) = *animate_inner.borrow() {
					raf.set(win.request_animation_frame(cb.as_ref().unchecked_ref()).ok());
				}
			}
		}));
		if let Some(ref cb) = *animate_init.borrow() {
			raf_init.set(window.request_animation_frame(cb.as_ref().unchecked_ref()).ok());
		}
	});

	let cleanup = SendWrapper::new(move || {
		if let Some(win) = web_sys::window() {
			if let Some(id) = raf_id.take() {
				let _ = win.cancel_animation_frame(id);
			}
			if let Some(ref cb) = *resize_cb.borrow() {
				let _ = win.remove_event_listener_with_callback("resize", cb.as_ref().unchecked_ref());
			}
		}
		animate.borrow_mut().take();
		resize_cb.borrow_mut().take();
		field.borrow_mut().take();
	});
	on_cleanup(move || cleanup.take()());

	view! {
		<canvas
			node_ref=canvas_ref
			class="particle-field"
			style="position: absolute; inset: 0; width: 100%; height: 100%; pointer-events: none;"
		/>
	}
}
