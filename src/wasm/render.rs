//! Canvas 2D drawing and the animation-frame loop.
//!
//! This is the only place that touches [`CanvasRenderingContext2d`]. A frame
//! is a pure function of the current [`Progress`] and [`FrameLayout`]: the
//! whole trail is redrawn from `theta = 0` every time.

use std::cell::{Cell, RefCell};
use std::f64::consts::TAU;
use std::rc::Rc;

use kurbo::Point;
use wasm_bindgen::{closure::Closure, JsCast, JsValue};
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, Window};

use super::dom;
use crate::consts::{
    ARM_WIDTH, BOUNDARY_WIDTH, GLYPH_FONT_FRACTION, HUB_RADIUS, JOINT_RADIUS, PEN_GLOW_BLUR,
    PEN_RADIUS, TRAIL_ALPHA, TRAIL_WIDTH,
};
use crate::curve::{self, Arm};
use crate::error::DomError;
use crate::layout::FrameLayout;
use crate::progress::Progress;

pub struct Renderer {
    canvas: HtmlCanvasElement,
    ctx: CanvasRenderingContext2d,
    /// CSS edge last written to the canvas style.
    styled: Cell<Option<f64>>,
}

impl Renderer {
    pub fn new(canvas: HtmlCanvasElement) -> Result<Self, JsValue> {
        let ctx: CanvasRenderingContext2d = canvas
            .get_context("2d")?
            .ok_or(DomError::NoContext)?
            .dyn_into()?;
        Ok(Self {
            canvas,
            ctx,
            styled: Cell::new(None),
        })
    }

    pub fn canvas(&self) -> &HtmlCanvasElement {
        &self.canvas
    }

    /// Draw one frame.
    pub fn draw(&self, progress: Progress, layout: &FrameLayout) -> Result<(), JsValue> {
        self.fit(layout)?;

        let ctx = &self.ctx;
        // Absolute transform: resizing never compounds the device scale.
        ctx.set_transform(layout.dpr, 0.0, 0.0, layout.dpr, 0.0, 0.0)?;
        ctx.clear_rect(0.0, 0.0, layout.size, layout.size);

        draw_glyph(ctx, progress, layout)?;
        draw_boundary(ctx, layout)?;

        let theta = progress.theta();
        draw_trail(ctx, theta, layout)?;
        draw_arm(ctx, curve::arm_at(theta), layout)
    }

    /// Resize the backing store only when its pixel count changed, since
    /// writing `width`/`height` resets the context. The CSS box is tracked
    /// separately.
    fn fit(&self, layout: &FrameLayout) -> Result<(), JsValue> {
        if layout.needs_resize(self.canvas.width(), self.canvas.height()) {
            self.canvas.set_width(layout.backing);
            self.canvas.set_height(layout.backing);
        }
        if layout.needs_restyle(self.styled.get()) {
            let css = format!("{}px", layout.size);
            let style = self.canvas.style();
            style.set_property("width", &css)?;
            style.set_property("height", &css)?;
            self.styled.set(Some(layout.size));
        }
        Ok(())
    }
}

fn draw_glyph(
    ctx: &CanvasRenderingContext2d,
    progress: Progress,
    layout: &FrameLayout,
) -> Result<(), JsValue> {
    if !curve::glyph_visible(progress) {
        return Ok(());
    }
    ctx.save();
    ctx.set_global_alpha(curve::glyph_opacity(progress));
    ctx.set_fill_style_str("#ffffff");
    let px = layout.size * GLYPH_FONT_FRACTION;
    ctx.set_font(&format!("italic {px}px \"Times New Roman\", serif"));
    ctx.set_text_align("center");
    ctx.set_text_baseline("middle");
    ctx.fill_text("π", layout.center.x, layout.center.y)?;
    ctx.restore();
    Ok(())
}

fn draw_boundary(ctx: &CanvasRenderingContext2d, layout: &FrameLayout) -> Result<(), JsValue> {
    ctx.save();
    ctx.set_stroke_style_str("rgba(255, 255, 255, 0.1)");
    ctx.set_line_width(BOUNDARY_WIDTH);
    ctx.begin_path();
    ctx.arc(layout.center.x, layout.center.y, layout.reach_radius(), 0.0, TAU)?;
    ctx.stroke();
    ctx.restore();
    Ok(())
}

/// The trail, stroked once with additive blending so overlapping passes
/// brighten toward white.
fn draw_trail(
    ctx: &CanvasRenderingContext2d,
    theta: f64,
    layout: &FrameLayout,
) -> Result<(), JsValue> {
    let to_canvas = layout.curve_to_canvas();
    let mut points = curve::trace(theta).map(|p| to_canvas * p);
    let Some(start) = points.next() else {
        return Ok(());
    };

    ctx.save();
    ctx.set_global_composite_operation("lighter")?;
    ctx.set_stroke_style_str(&format!("rgba(255, 255, 255, {TRAIL_ALPHA})"));
    ctx.set_line_width(TRAIL_WIDTH);
    ctx.begin_path();
    ctx.move_to(start.x, start.y);
    for p in points {
        ctx.line_to(p.x, p.y);
    }
    ctx.stroke();
    ctx.restore();
    Ok(())
}

fn draw_arm(ctx: &CanvasRenderingContext2d, arm: Arm, layout: &FrameLayout) -> Result<(), JsValue> {
    let to_canvas = layout.curve_to_canvas();
    let origin = to_canvas * arm.origin;
    let joint = to_canvas * arm.joint;
    let pen = to_canvas * arm.pen;

    ctx.save();
    ctx.set_line_cap("round");
    ctx.set_line_join("round");
    ctx.set_stroke_style_str("rgba(255, 255, 255, 0.9)");
    ctx.set_line_width(ARM_WIDTH);
    segment(ctx, origin, joint);
    segment(ctx, joint, pen);

    // Hub
    ctx.set_fill_style_str("#fff");
    disc(ctx, origin, HUB_RADIUS)?;
    ctx.fill();

    // Elbow: hollow ring
    ctx.set_stroke_style_str("#fff");
    ctx.set_fill_style_str("#000");
    disc(ctx, joint, JOINT_RADIUS)?;
    ctx.fill();
    ctx.stroke();

    // Pen tip with glow
    ctx.set_fill_style_str("#fff");
    ctx.set_shadow_color("rgba(255, 255, 255, 1)");
    ctx.set_shadow_blur(PEN_GLOW_BLUR);
    disc(ctx, pen, PEN_RADIUS)?;
    ctx.fill();

    ctx.restore();
    Ok(())
}

fn segment(ctx: &CanvasRenderingContext2d, from: Point, to: Point) {
    ctx.begin_path();
    ctx.move_to(from.x, from.y);
    ctx.line_to(to.x, to.y);
    ctx.stroke();
}

fn disc(ctx: &CanvasRenderingContext2d, center: Point, radius: f64) -> Result<(), JsValue> {
    ctx.begin_path();
    ctx.arc(center.x, center.y, radius, 0.0, TAU)
}

/// Frame geometry for the window as it is right now.
pub fn current_layout(window: &Window) -> FrameLayout {
    FrameLayout::new(
        dom::number(window.inner_width()),
        dom::number(window.inner_height()),
        window.device_pixel_ratio(),
    )
}

/// Redraws every animation frame until dropped.
///
/// The scheduled closure only holds a weak reference to itself, so dropping
/// the loop frees it; the pending frame is cancelled as well.
pub struct FrameLoop {
    window: Window,
    callback: Rc<RefCell<Option<Closure<dyn FnMut()>>>>,
    pending: Rc<Cell<Option<i32>>>,
}

impl FrameLoop {
    pub fn start(renderer: Renderer, progress: Rc<Cell<Progress>>) -> Result<Self, JsValue> {
        let window = dom::window()?;
        let callback: Rc<RefCell<Option<Closure<dyn FnMut()>>>> = Rc::new(RefCell::new(None));
        let pending = Rc::new(Cell::new(None));

        let tick = {
            let window = window.clone();
            let this = Rc::downgrade(&callback);
            let pending = Rc::clone(&pending);
            move || {
                pending.set(None);
                if let Err(err) = renderer.draw(progress.get(), &current_layout(&window)) {
                    log::error!("frame failed: {err:?}");
                }

                // schedule next
                let Some(this) = this.upgrade() else { return };
                let scheduled = this.borrow();
                if let Some(cb) = scheduled.as_ref() {
                    match window.request_animation_frame(cb.as_ref().unchecked_ref()) {
                        Ok(id) => pending.set(Some(id)),
                        Err(err) => log::error!("could not schedule frame: {err:?}"),
                    }
                }
            }
        };
        *callback.borrow_mut() = Some(Closure::wrap(Box::new(tick) as Box<dyn FnMut()>));

        let id = {
            let scheduled = callback.borrow();
            let cb = scheduled.as_ref().ok_or("frame callback missing")?;
            window.request_animation_frame(cb.as_ref().unchecked_ref())?
        };
        pending.set(Some(id));

        Ok(Self {
            window,
            callback,
            pending,
        })
    }
}

impl Drop for FrameLoop {
    fn drop(&mut self) {
        if let Some(id) = self.pending.take() {
            if let Err(err) = self.window.cancel_animation_frame(id) {
                log::warn!("could not cancel frame {id}: {err:?}");
            }
        }
        self.callback.borrow_mut().take();
    }
}
