//! DOM shell: the only module that touches `web_sys`.
//!
//! Geometry, kinematics, animation stepping, trigger decisions, and text
//! scheduling all come from the pure modules; this module owns element
//! creation, style application, event listeners, timers, and the
//! `requestAnimationFrame` loop. It holds no effect logic of its own beyond
//! translating between DOM state and the pure core.
//!
//! The text effects only toggle classes, custom properties, and the armed
//! attribute; the host page's stylesheet supplies the `typewriter-word` /
//! `fadein-element` animations keyed on `[data-anim="1"]`.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use rand::SeedableRng;
use rand::rngs::SmallRng;
use tracing::{debug, warn};
use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{CssStyleDeclaration, Document, Element, HtmlElement, HtmlImageElement, Window};

use crate::anim::{Animator, Phase};
use crate::config::{EventMode, ShatterOptions, TextOptions};
use crate::consts::{ARMED_ATTR, TARGET_KEY_ATTR};
use crate::error::Error;
use crate::geom::{self, Polygon, Size, Vec2};
use crate::kinetics::{self, Shard};
use crate::session::{Completion, CompletionSlot, Outcome, Registry, StartStatus, TargetKey};
use crate::text::{self, Piece};
use crate::trigger::{self, Decision, ViewBox};

thread_local! {
    static REGISTRY: RefCell<Registry> = RefCell::new(Registry::new());
    static NEXT_TARGET_KEY: Cell<TargetKey> = const { Cell::new(1) };
}

// ── JS plumbing ─────────────────────────────────────────────────

fn js_err(context: &str, value: &JsValue) -> Error {
    Error::Dom(format!("{context}: {value:?}"))
}

fn window() -> Result<Window, Error> {
    web_sys::window().ok_or_else(|| Error::Dom("no window".into()))
}

fn document() -> Result<Document, Error> {
    window()?.document().ok_or_else(|| Error::Dom("no document".into()))
}

fn viewport_height() -> Result<f64, Error> {
    window()?
        .inner_height()
        .map_err(|e| js_err("innerHeight", &e))?
        .as_f64()
        .ok_or_else(|| Error::Dom("innerHeight is not a number".into()))
}

fn set_style(style: &CssStyleDeclaration, name: &str, value: &str) -> Result<(), Error> {
    style.set_property(name, value).map_err(|e| js_err(name, &e))
}

fn remove_style(style: &CssStyleDeclaration, name: &str) {
    if let Err(e) = style.remove_property(name) {
        warn!(name, error = ?e, "removeProperty failed");
    }
}

/// Session-registry key for a target element, assigned on first use and
/// persisted in an attribute so every trigger resolves the same key.
fn target_key(elm: &Element) -> Result<TargetKey, Error> {
    if let Some(existing) = elm.get_attribute(TARGET_KEY_ATTR) {
        if let Ok(key) = existing.parse::<TargetKey>() {
            return Ok(key);
        }
    }
    let key = NEXT_TARGET_KEY.with(|next| {
        let key = next.get();
        next.set(key + 1);
        key
    });
    elm.set_attribute(TARGET_KEY_ATTR, &key.to_string())
        .map_err(|e| js_err("setAttribute", &e))?;
    Ok(key)
}

/// Seed for a fresh session when the caller did not pin one.
fn entropy_seed() -> u64 {
    js_sys::Math::random().to_bits() ^ js_sys::Date::now().to_bits()
}

// ── Shatter ─────────────────────────────────────────────────────

/// The broken-mirror effect bound to one `<img>` target.
pub struct Shatter {
    target: HtmlImageElement,
    options: ShatterOptions,
    completions: CompletionSlot,
}

impl Shatter {
    /// Validate the options and bind the effect to its target. No DOM is
    /// touched until a trigger fires.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidArgument`] when the options fail validation.
    pub fn new(target: HtmlImageElement, options: ShatterOptions) -> Result<Self, Error> {
        options.validate()?;
        Ok(Self { target, options, completions: CompletionSlot::new() })
    }

    /// The completion handle for the session in flight, or for the next one
    /// to start. Each session settles its own handle exactly once; with
    /// `repeat`, grab a fresh handle after every settlement.
    #[must_use]
    pub fn completion(&self) -> Completion {
        self.completions.current()
    }

    /// Bind the configured trigger: click starts on pointer click, scroll
    /// starts once the target enters the visibility band (after the
    /// configured delay).
    ///
    /// # Errors
    ///
    /// Returns [`Error::Dom`] when listener installation fails.
    pub fn arm(&self) -> Result<(), Error> {
        match self.options.event_mode {
            EventMode::Click => self.arm_click(),
            EventMode::Scroll => self.arm_scroll(),
        }
    }

    /// Start a session immediately, bypassing the trigger.
    ///
    /// Returns [`StartStatus::AlreadyRunning`] without side effects when the
    /// target is mid-animation.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidArgument`] or [`Error::Dom`] for failures
    /// before the animation is scheduled; asynchronous failures surface
    /// through the completion handle instead.
    pub fn start(&self) -> Result<StartStatus, Error> {
        start_session(&self.target, &self.options, &self.completions)
    }

    fn arm_click(&self) -> Result<(), Error> {
        let target = self.target.clone();
        let options = self.options.clone();
        let completions = self.completions.clone();
        let cb = Closure::<dyn FnMut()>::new(move || {
            if let Err(e) = start_session(&target, &options, &completions) {
                warn!(error = %e, "shatter start failed");
            }
        });
        self.target
            .add_event_listener_with_callback("click", cb.as_ref().unchecked_ref())
            .map_err(|e| js_err("addEventListener", &e))?;
        cb.forget();
        Ok(())
    }

    fn arm_scroll(&self) -> Result<(), Error> {
        let target = self.target.clone();
        let options = self.options.clone();
        let completions = self.completions.clone();
        let cb = Closure::<dyn FnMut()>::new(move || {
            if let Err(e) = shatter_scroll_check(&target, &options, &completions) {
                warn!(error = %e, "shatter scroll check failed");
            }
        });
        window()?
            .add_event_listener_with_callback("scroll", cb.as_ref().unchecked_ref())
            .map_err(|e| js_err("addEventListener", &e))?;
        cb.forget();
        // The target may already be inside the band on page load.
        shatter_scroll_check(&self.target, &self.options, &self.completions)
    }
}

fn shatter_scroll_check(
    target: &HtmlImageElement,
    options: &ShatterOptions,
    completions: &CompletionSlot,
) -> Result<(), Error> {
    let rect = target.get_bounding_client_rect();
    let armed = target.get_attribute(ARMED_ATTR).as_deref() == Some("1");
    let view = ViewBox { top: rect.top(), height: rect.height() };

    match trigger::decide(armed, view, viewport_height()?, options.repeat) {
        Decision::Start => {
            target.set_attribute(ARMED_ATTR, "1").map_err(|e| js_err("setAttribute", &e))?;
            schedule_start(target, options, completions)
        }
        Decision::Rearm => {
            target.set_attribute(ARMED_ATTR, "0").map_err(|e| js_err("setAttribute", &e))
        }
        Decision::Hold => Ok(()),
    }
}

/// Start the session after the configured trigger delay.
fn schedule_start(
    target: &HtmlImageElement,
    options: &ShatterOptions,
    completions: &CompletionSlot,
) -> Result<(), Error> {
    let delay = i32::try_from(options.delay_ms).unwrap_or(i32::MAX);
    let target = target.clone();
    let options = options.clone();
    let completions = completions.clone();
    let cb = Closure::<dyn FnMut()>::new(move || {
        if let Err(e) = start_session(&target, &options, &completions) {
            warn!(error = %e, "shatter start failed");
        }
    });
    window()?
        .set_timeout_with_callback_and_timeout_and_arguments_0(cb.as_ref().unchecked_ref(), delay)
        .map_err(|e| js_err("setTimeout", &e))?;
    cb.forget();
    Ok(())
}

/// Claim the target and kick off a session: build the shard overlay, preload
/// the replacement image, then run the animation loop.
fn start_session(
    target: &HtmlImageElement,
    options: &ShatterOptions,
    completions: &CompletionSlot,
) -> Result<StartStatus, Error> {
    options.validate()?;
    let key = target_key(target)?;

    let status = REGISTRY.with(|r| r.borrow_mut().begin(key));
    let StartStatus::Started(_) = status else {
        return Ok(StartStatus::AlreadyRunning);
    };

    match build_session(target, options, completions, key) {
        Ok(session) => {
            if let Err(e) = preload_and_run(Rc::clone(&session)) {
                session.fail(e);
            }
            Ok(status)
        }
        Err(e) => {
            REGISTRY.with(|r| {
                r.borrow_mut().finish(key);
            });
            restore_target(target);
            completions.settle(Outcome::Failed(e.clone()));
            Err(e)
        }
    }
}

fn restore_target(target: &HtmlImageElement) {
    let style = target.style();
    remove_style(&style, "opacity");
    remove_style(&style, "pointer-events");
}

/// One live shatter run: the transient frame, the shard states, and their
/// rendered `<img>` fragments, torn down exactly once.
struct Session {
    key: TargetKey,
    target: HtmlImageElement,
    options: ShatterOptions,
    size: Size,
    frame_elm: HtmlElement,
    shards: RefCell<Vec<Vec<Shard>>>,
    views: Vec<Vec<HtmlImageElement>>,
    animator: RefCell<Animator>,
    completions: CompletionSlot,
    torn_down: Cell<bool>,
}

impl Session {
    /// Apply the current motion state to every shard fragment.
    fn render(&self) -> Result<(), Error> {
        let shards = self.shards.borrow();
        for (shard, view) in shards.iter().flatten().zip(self.views.iter().flatten()) {
            let style = view.style();
            set_style(&style, "left", &format!("{}px", shard.motion.offset.x))?;
            set_style(&style, "top", &format!("{}px", shard.motion.offset.y))?;
            set_style(&style, "transform", &shard.motion.transform_css())?;
        }
        Ok(())
    }

    fn finish(&self) {
        self.teardown();
        debug!(key = self.key, "shatter finished");
        self.completions.settle(Outcome::Finished);
    }

    fn fail(&self, error: Error) {
        self.teardown();
        warn!(key = self.key, error = %error, "shatter failed");
        self.completions.settle(Outcome::Failed(error));
    }

    fn teardown(&self) {
        if self.torn_down.replace(true) {
            return;
        }
        for view in self.views.iter().flatten() {
            view.remove();
        }
        self.frame_elm.remove();
        restore_target(&self.target);
        REGISTRY.with(|r| {
            r.borrow_mut().finish(self.key);
        });
    }
}

fn build_session(
    target: &HtmlImageElement,
    options: &ShatterOptions,
    completions: &CompletionSlot,
    key: TargetKey,
) -> Result<Rc<Session>, Error> {
    let rect = target.get_bounding_client_rect();
    let size = Size::new(rect.width(), rect.height());

    let style = target.style();
    set_style(&style, "opacity", "0.0")?;
    set_style(&style, "pointer-events", "none")?;

    let doc = document()?;
    let frame_elm: HtmlElement = doc
        .create_element("div")
        .map_err(|e| js_err("createElement", &e))?
        .dyn_into()
        .map_err(|_| Error::Dom("created div is not an HtmlElement".into()))?;
    frame_elm.set_class_name(&target.class_name());

    let full_outline = Polygon::new(vec![
        Vec2::new(0.0, 0.0),
        Vec2::new(size.width, 0.0),
        Vec2::new(size.width, size.height),
        Vec2::new(0.0, size.height),
    ]);
    let left = options.style.left.unwrap_or_else(|| rect.left());
    let top = options.style.top.unwrap_or_else(|| rect.top());
    let frame_style = frame_elm.style();
    set_style(&frame_style, "position", "absolute")?;
    set_style(&frame_style, "left", &format!("{left}px"))?;
    set_style(&frame_style, "top", &format!("{top}px"))?;
    set_style(&frame_style, "width", &format!("{}px", size.width))?;
    set_style(&frame_style, "height", &format!("{}px", size.height))?;
    set_style(&frame_style, "clip-path", &full_outline.clip_path())?;
    set_style(&frame_style, "overflow", "hidden")?;
    set_style(&frame_style, "z-index", &options.z_index.to_string())?;

    let parent = target
        .parent_node()
        .ok_or_else(|| Error::Dom("target has no parent node".into()))?;
    parent.append_child(&frame_elm).map_err(|e| js_err("appendChild", &e))?;

    let seed = options.seed.unwrap_or_else(entropy_seed);
    let mut rng = SmallRng::seed_from_u64(seed);
    let groups = geom::polygon_groups(size, options.vectors_count as usize, &mut rng);
    let shards = kinetics::build_shards(
        size,
        groups,
        options.velocity_rate,
        options.legacy_center_skew,
        &mut rng,
    );

    // Shard copies show the outgoing image; the target itself gets the
    // replacement src once the preload lands.
    let original_src = target.src();
    let mut views = Vec::with_capacity(shards.len());
    for ring in &shards {
        let mut ring_views = Vec::with_capacity(ring.len());
        for shard in ring {
            let img: HtmlImageElement = doc
                .create_element("img")
                .map_err(|e| js_err("createElement", &e))?
                .dyn_into()
                .map_err(|_| Error::Dom("created img is not an HtmlImageElement".into()))?;
            img.set_src(&original_src);
            img.set_class_name(&target.class_name());

            let img_style = img.style();
            set_style(&img_style, "position", "absolute")?;
            set_style(&img_style, "width", &format!("{}px", size.width))?;
            set_style(&img_style, "height", &format!("{}px", size.height))?;
            set_style(&img_style, "clip-path", &shard.polygon.clip_path())?;
            set_style(&img_style, "transform-origin", &shard.motion.transform_origin_css())?;

            frame_elm.append_child(&img).map_err(|e| js_err("appendChild", &e))?;
            ring_views.push(img);
        }
        views.push(ring_views);
    }

    debug!(key, seed, rings = shards.len(), "shatter session built");

    Ok(Rc::new(Session {
        key,
        target: target.clone(),
        options: options.clone(),
        size,
        frame_elm,
        shards: RefCell::new(shards),
        views,
        animator: RefCell::new(Animator::new()),
        completions: completions.clone(),
        torn_down: Cell::new(false),
    }))
}

fn clear_timeout(handle: &Rc<Cell<Option<i32>>>) {
    if let Some(id) = handle.take() {
        match window() {
            Ok(win) => win.clear_timeout_with_handle(id),
            Err(e) => warn!(error = %e, "clearTimeout skipped"),
        }
    }
}

/// Preload the replacement image under the configured bound, then swap the
/// target's src and start the animation loop. Load failure or timeout fails
/// the session through the completion handle; nothing is retried.
fn preload_and_run(session: Rc<Session>) -> Result<(), Error> {
    let preload = HtmlImageElement::new().map_err(|e| js_err("new Image", &e))?;
    let done = Rc::new(Cell::new(false));
    let timeout_id: Rc<Cell<Option<i32>>> = Rc::new(Cell::new(None));

    {
        let session = Rc::clone(&session);
        let done = Rc::clone(&done);
        let delay = i32::try_from(session.options.load_timeout_ms).unwrap_or(i32::MAX);
        let cb = Closure::<dyn FnMut()>::new(move || {
            if done.replace(true) {
                return;
            }
            session.fail(Error::ResourceTimeout {
                src: session.options.src.clone(),
                timeout_ms: session.options.load_timeout_ms,
            });
        });
        let id = window()?
            .set_timeout_with_callback_and_timeout_and_arguments_0(
                cb.as_ref().unchecked_ref(),
                delay,
            )
            .map_err(|e| js_err("setTimeout", &e))?;
        timeout_id.set(Some(id));
        cb.forget();
    }

    {
        let session = Rc::clone(&session);
        let done = Rc::clone(&done);
        let timeout_id = Rc::clone(&timeout_id);
        let cb = Closure::<dyn FnMut()>::new(move || {
            if done.replace(true) {
                return;
            }
            clear_timeout(&timeout_id);
            session.target.set_src(&session.options.src);
            if let Err(e) = run_animation(Rc::clone(&session)) {
                session.fail(e);
            }
        });
        preload.set_onload(Some(cb.as_ref().unchecked_ref()));
        cb.forget();
    }

    {
        let session = Rc::clone(&session);
        let done = Rc::clone(&done);
        let timeout_id = Rc::clone(&timeout_id);
        let cb = Closure::<dyn FnMut()>::new(move || {
            if done.replace(true) {
                return;
            }
            clear_timeout(&timeout_id);
            session.fail(Error::ResourceLoad { src: session.options.src.clone() });
        });
        preload.set_onerror(Some(cb.as_ref().unchecked_ref()));
        cb.forget();
    }

    preload.set_src(&session.options.src);
    Ok(())
}

type FrameHolder = Rc<RefCell<Option<Closure<dyn FnMut()>>>>;

fn request_frame(holder: &FrameHolder) -> Result<(), Error> {
    let borrow = holder.borrow();
    let Some(cb) = borrow.as_ref() else {
        return Ok(());
    };
    window()?
        .request_animation_frame(cb.as_ref().unchecked_ref())
        .map_err(|e| js_err("requestAnimationFrame", &e))?;
    Ok(())
}

/// Drive the animation: tick the shards, render, and schedule the next frame
/// until the run completes. The tick/render/schedule order guarantees all
/// updates for a frame are applied before the next frame can start.
fn run_animation(session: Rc<Session>) -> Result<(), Error> {
    let holder: FrameHolder = Rc::new(RefCell::new(None));
    let inner_holder = Rc::clone(&holder);

    let cb = Closure::<dyn FnMut()>::new(move || {
        let phase = {
            let mut animator = session.animator.borrow_mut();
            let mut shards = session.shards.borrow_mut();
            animator.tick(&mut shards, session.size, session.options.acceleration_rate)
        };
        if let Err(e) = session.render() {
            session.fail(e);
            drop(inner_holder.borrow_mut().take());
            return;
        }
        if phase == Phase::Complete {
            session.finish();
            drop(inner_holder.borrow_mut().take());
            return;
        }
        if let Err(e) = request_frame(&inner_holder) {
            session.fail(e);
            drop(inner_holder.borrow_mut().take());
        }
    });

    *holder.borrow_mut() = Some(cb);
    request_frame(&holder)
}

// ── Text effects ────────────────────────────────────────────────

/// Typewriter reveal bound to one element.
pub struct Typewriter {
    target: HtmlElement,
    options: TextOptions,
}

impl Typewriter {
    #[must_use]
    pub fn new(target: HtmlElement, options: TextOptions) -> Self {
        Self { target, options }
    }

    /// Split the target's text into per-character elements with staggered
    /// reveal delays and bind the configured trigger. Attribute overrides
    /// (`data-speed`, `data-duration`, `data-delay`, `data-repeat`) on the
    /// element take precedence over the options.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Dom`] when element creation or listener
    /// installation fails.
    pub fn arm(&self) -> Result<(), Error> {
        let options = options_from_attributes(&self.target, &self.options);
        rebuild_typewriter(&self.target, &options, 0)?;
        bind_text_trigger(&self.target, &options)
    }
}

/// Arm a group of typewriter elements, chaining delays so each element
/// starts typing after the previous one finishes. Per-element attribute
/// overrides apply on top of the shared options.
///
/// # Errors
///
/// Returns [`Error::Dom`] when element creation or listener installation
/// fails; already-armed elements keep their listeners.
pub fn arm_typewriter_group(targets: &[HtmlElement], options: &TextOptions) -> Result<(), Error> {
    let mut start = 0;
    for target in targets {
        let opts = options_from_attributes(target, options);
        start = rebuild_typewriter(target, &opts, start)?;
        bind_text_trigger(target, &opts)?;
    }
    Ok(())
}

/// Fade-in reveal bound to one element.
pub struct FadeIn {
    target: HtmlElement,
    options: TextOptions,
}

impl FadeIn {
    #[must_use]
    pub fn new(target: HtmlElement, options: TextOptions) -> Self {
        Self { target, options }
    }

    /// Publish the timing custom properties and bind the configured trigger.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Dom`] when style application or listener
    /// installation fails.
    pub fn arm(&self) -> Result<(), Error> {
        let options = options_from_attributes(&self.target, &self.options);
        self.target
            .class_list()
            .add_1("fadein-element")
            .map_err(|e| js_err("classList.add", &e))?;
        let style = self.target.style();
        set_style(&style, "--anim-speed", &format!("{}ms", options.speed_ms))?;
        set_style(&style, "--anim-delay", &format!("{}ms", options.delay_ms))?;
        bind_text_trigger(&self.target, &options)
    }
}

/// Replace the element's text with per-character spans carrying the cue
/// delays. Returns the accumulated end delay for group chaining.
fn rebuild_typewriter(
    target: &HtmlElement,
    options: &TextOptions,
    start_delay_ms: u64,
) -> Result<u64, Error> {
    target
        .class_list()
        .add_1("typewriter")
        .map_err(|e| js_err("classList.add", &e))?;

    let source = target.text_content().unwrap_or_default();
    let schedule = text::schedule(&source, options, start_delay_ms);

    target.set_text_content(None);
    let doc = document()?;
    for piece in &schedule.pieces {
        match piece {
            Piece::Break => {
                let br = doc.create_element("br").map_err(|e| js_err("createElement", &e))?;
                target.append_child(&br).map_err(|e| js_err("appendChild", &e))?;
            }
            Piece::Glyph { ch, delay_ms } => {
                let span: HtmlElement = doc
                    .create_element("span")
                    .map_err(|e| js_err("createElement", &e))?
                    .dyn_into()
                    .map_err(|_| Error::Dom("created span is not an HtmlElement".into()))?;
                span.class_list()
                    .add_1("typewriter-word")
                    .map_err(|e| js_err("classList.add", &e))?;
                set_style(&span.style(), "animation-delay", &format!("{delay_ms}ms"))?;
                span.set_text_content(Some(&ch.to_string()));
                target.append_child(&span).map_err(|e| js_err("appendChild", &e))?;
            }
        }
    }

    Ok(schedule.end_delay_ms)
}

fn bind_text_trigger(target: &HtmlElement, options: &TextOptions) -> Result<(), Error> {
    match options.event_mode {
        EventMode::Click => {
            let elm = target.clone();
            let cb = Closure::<dyn FnMut()>::new(move || {
                if let Err(e) = elm.set_attribute(ARMED_ATTR, "1") {
                    warn!(error = ?e, "arming text effect failed");
                }
            });
            target
                .add_event_listener_with_callback("click", cb.as_ref().unchecked_ref())
                .map_err(|e| js_err("addEventListener", &e))?;
            cb.forget();
            Ok(())
        }
        EventMode::Scroll => {
            let elm = target.clone();
            let repeat = options.repeat;
            let cb = Closure::<dyn FnMut()>::new(move || {
                if let Err(e) = text_scroll_check(&elm, repeat) {
                    warn!(error = %e, "text scroll check failed");
                }
            });
            window()?
                .add_event_listener_with_callback("scroll", cb.as_ref().unchecked_ref())
                .map_err(|e| js_err("addEventListener", &e))?;
            cb.forget();
            // The element may already be inside the band on page load.
            text_scroll_check(target, options.repeat)
        }
    }
}

fn text_scroll_check(target: &HtmlElement, repeat: bool) -> Result<(), Error> {
    let rect = target.get_bounding_client_rect();
    let armed = target.get_attribute(ARMED_ATTR).as_deref() == Some("1");
    let view = ViewBox { top: rect.top(), height: rect.height() };

    match trigger::decide(armed, view, viewport_height()?, repeat) {
        Decision::Start => {
            target.set_attribute(ARMED_ATTR, "1").map_err(|e| js_err("setAttribute", &e))
        }
        Decision::Rearm => {
            target.set_attribute(ARMED_ATTR, "0").map_err(|e| js_err("setAttribute", &e))
        }
        Decision::Hold => Ok(()),
    }
}

/// Per-element overrides carried as data attributes, as the original effects
/// supported. Unparsable values are logged and ignored.
fn options_from_attributes(target: &HtmlElement, base: &TextOptions) -> TextOptions {
    let mut options = base.clone();
    if let Some(v) = attr_u64(target, "data-speed") {
        options.speed_ms = v;
    }
    if let Some(v) = attr_u64(target, "data-duration") {
        options.duration_ms = Some(v);
    }
    if let Some(v) = attr_u64(target, "data-delay") {
        options.delay_ms = v;
    }
    if let Some(raw) = target.get_attribute("data-repeat") {
        options.repeat = raw == "true" || raw == "1";
    }
    options
}

fn attr_u64(target: &Element, name: &str) -> Option<u64> {
    let raw = target.get_attribute(name)?;
    match raw.parse() {
        Ok(v) => Some(v),
        Err(_) => {
            warn!(name, raw = %raw, "ignoring unparsable attribute override");
            None
        }
    }
}
