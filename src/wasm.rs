use std::cell::Cell;
use std::cell::RefCell;
use std::f64::consts::TAU;
use std::rc::Rc;
use std::rc::Weak;

use glam::dvec2;
use glam::DVec2;
use rand::rngs::OsRng;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::spawn_local;
use web_sys::CanvasRenderingContext2d;
use web_sys::Document;
use web_sys::Element;
use web_sys::Event;
use web_sys::EventTarget;
use web_sys::FormData;
use web_sys::HtmlButtonElement;
use web_sys::HtmlCanvasElement;
use web_sys::HtmlElement;
use web_sys::HtmlFormElement;
use web_sys::HtmlInputElement;
use web_sys::KeyboardEvent;
use web_sys::MouseEvent;
use web_sys::ScrollBehavior;
use web_sys::ScrollIntoViewOptions;
use web_sys::Window;

use crate::command::Action;
use crate::command::CommandPalette;
use crate::command::KeyChord;
use crate::config::BackendConfig;
use crate::contact::ContactForm;
use crate::contact::Field;
use crate::contact::Level;
use crate::contact::Notice;
use crate::contact::Outcome;
use crate::contact::RestStore;
use crate::draw::render;
use crate::draw::Rgba;
use crate::draw::Surface;
use crate::nav::header_compact;
use crate::nav::Section;
use crate::settings::Settings;
use crate::sim::Sim;
use crate::theme::LocalStore;
use crate::theme::Theme;
use crate::theme::ThemeState;
use crate::theme::LIGHT_CLASS;

fn init() {
    console_error_panic_hook::set_once();
    // Errors if a logger is already installed by an earlier mount.
    let _ = console_log::init_with_level(log::Level::Debug);
}

fn js_error(message: impl std::fmt::Display) -> JsValue {
    js_sys::Error::new(&message.to_string()).into()
}

fn window() -> Result<Window, JsValue> {
    web_sys::window().ok_or_else(|| js_error("no window"))
}

fn document() -> Result<Document, JsValue> {
    window()?.document().ok_or_else(|| js_error("no document"))
}

fn element_by_id<T: JsCast>(document: &Document, id: &str) -> Result<T, JsValue> {
    document
        .get_element_by_id(id)
        .ok_or_else(|| js_error(format!("no element with id {:?}", id)))?
        .dyn_into()
        .map_err(|_| js_error(format!("#{} is the wrong kind of element", id)))
}

fn viewport(window: &Window) -> (f64, f64) {
    let width = window.inner_width().ok().and_then(|w| w.as_f64()).unwrap_or(0.0);
    let height = window.inner_height().ok().and_then(|h| h.as_f64()).unwrap_or(0.0);
    (width, height)
}

/// An event listener which is removed again when dropped.
struct Listener {
    target: EventTarget,
    event: &'static str,
    callback: Closure<dyn FnMut(Event)>,
}

impl Listener {
    fn new(
        target: &EventTarget,
        event: &'static str,
        f: impl FnMut(Event) + 'static,
    ) -> Result<Self, JsValue> {
        let callback = Closure::wrap(Box::new(f) as Box<dyn FnMut(Event)>);
        target.add_event_listener_with_callback(event, callback.as_ref().unchecked_ref())?;

        Ok(Self {
            target: target.clone(),
            event,
            callback,
        })
    }
}

impl Drop for Listener {
    fn drop(&mut self) {
        let _ = self
            .target
            .remove_event_listener_with_callback(self.event, self.callback.as_ref().unchecked_ref());
    }
}

type FrameCallback = Rc<RefCell<Option<Closure<dyn FnMut()>>>>;

/// Calls `tick` once per display refresh until dropped.
struct Animation {
    window: Window,
    frame: Rc<Cell<Option<i32>>>,
    // Only held so the closure outlives any frame it's been scheduled for.
    _callback: FrameCallback,
}

impl Animation {
    fn start(window: &Window, mut tick: impl FnMut() + 'static) -> Result<Self, JsValue> {
        let frame = Rc::new(Cell::new(None));
        let callback: FrameCallback = Rc::new(RefCell::new(None));

        // The closure reschedules itself, so it only holds a weak reference to avoid a cycle.
        let weak = Rc::downgrade(&callback);
        let next_window = window.clone();
        let next_frame = frame.clone();
        *callback.borrow_mut() = Some(Closure::wrap(Box::new(move || {
            tick();

            if let Some(callback) = weak.upgrade() {
                if let Some(callback) = callback.borrow().as_ref() {
                    next_frame.set(
                        next_window
                            .request_animation_frame(callback.as_ref().unchecked_ref())
                            .ok(),
                    );
                }
            }
        }) as Box<dyn FnMut()>));

        if let Some(first) = callback.borrow().as_ref() {
            frame.set(Some(
                window.request_animation_frame(first.as_ref().unchecked_ref())?,
            ));
        }

        Ok(Self {
            window: window.clone(),
            frame,
            _callback: callback,
        })
    }
}

impl Drop for Animation {
    fn drop(&mut self) {
        if let Some(id) = self.frame.take() {
            let _ = self.window.cancel_animation_frame(id);
        }
    }
}

impl Surface for CanvasRenderingContext2d {
    fn clear(&mut self, width: f64, height: f64) {
        self.clear_rect(0.0, 0.0, width, height);
    }

    fn fill_circle(&mut self, center: DVec2, radius: f64, color: Rgba) {
        self.begin_path();
        if self.arc(center.x, center.y, radius, 0.0, TAU).is_ok() {
            self.set_fill_style_str(&color.to_string());
            self.fill();
        }
    }

    fn stroke_line(&mut self, from: DVec2, to: DVec2, color: Rgba) {
        self.begin_path();
        self.move_to(from.x, from.y);
        self.line_to(to.x, to.y);
        self.set_stroke_style_str(&color.to_string());
        self.stroke();
    }
}

struct Backdrop {
    sim: Sim,
    canvas: HtmlCanvasElement,
    ctx: CanvasRenderingContext2d,
    frames: u64,
}

impl Backdrop {
    fn fit(&mut self, window: &Window) {
        let (width, height) = viewport(window);
        self.canvas.set_width(width as u32);
        self.canvas.set_height(height as u32);
        self.sim.resize(width, height, &mut OsRng);

        log::debug!(
            "particle field resized to {}x{} with {} particles",
            width,
            height,
            self.sim.particles.len()
        );
    }

    fn frame(&mut self) {
        self.sim.step();
        render(&self.sim, &mut self.ctx);
        self.frames += 1;
    }
}

struct MountedField {
    backdrop: Rc<RefCell<Backdrop>>,
    _animation: Animation,
    _listeners: Vec<Listener>,
}

/// Keeps the particle field running. Unmounting (or freeing) it stops the animation and removes its listeners.
#[wasm_bindgen]
pub struct FieldHandle {
    mounted: Option<MountedField>,
}

#[wasm_bindgen]
impl FieldHandle {
    pub fn is_running(&self) -> bool {
        self.mounted.is_some()
    }

    /// The number of particles on screen, 0 once unmounted.
    pub fn particle_count(&self) -> usize {
        self.mounted
            .as_ref()
            .map_or(0, |mounted| mounted.backdrop.borrow().sim.particles.len())
    }

    pub fn unmount(&mut self) {
        if self.mounted.take().is_some() {
            log::debug!("particle field unmounted");
        }
    }
}

/// Starts the particle field on the canvas with id `canvas_id`.
///
/// `settings` is optional JSON overriding any of the field's settings.
#[wasm_bindgen]
pub fn run(canvas_id: &str, settings: Option<String>) -> Result<FieldHandle, JsValue> {
    init();

    let settings = match settings {
        Some(json) => Settings::from_json(&json).map_err(js_error)?,
        None => Settings::ambient(),
    };

    let window = window()?;
    let canvas: HtmlCanvasElement = match document()?.get_element_by_id(canvas_id) {
        Some(canvas) => canvas
            .dyn_into()
            .map_err(|_| js_error(format!("#{} isn't a canvas", canvas_id)))?,
        None => {
            log::debug!("no #{} on the page, skipping particle field", canvas_id);
            return Ok(FieldHandle { mounted: None });
        }
    };

    // It's only decoration, so without a 2D context there's just nothing to draw.
    let ctx = match canvas.get_context("2d") {
        Ok(Some(ctx)) => ctx.dyn_into::<CanvasRenderingContext2d>()?,
        _ => {
            log::debug!("no 2d context for #{}, skipping particle field", canvas_id);
            return Ok(FieldHandle { mounted: None });
        }
    };

    let backdrop = Rc::new(RefCell::new(Backdrop {
        sim: Sim::new(settings, 0.0, 0.0, &mut OsRng),
        canvas,
        ctx,
        frames: 0,
    }));
    backdrop.borrow_mut().fit(&window);

    let on_resize = {
        let backdrop = backdrop.clone();
        let window = window.clone();
        Listener::new(&window.clone(), "resize", move |_| {
            backdrop.borrow_mut().fit(&window)
        })?
    };

    let on_move = {
        let backdrop = backdrop.clone();
        Listener::new(&window, "mousemove", move |event| {
            if let Some(event) = event.dyn_ref::<MouseEvent>() {
                let pos = dvec2(event.client_x() as f64, event.client_y() as f64);
                backdrop.borrow_mut().sim.set_cursor(pos);
            }
        })?
    };

    let animation = {
        let backdrop = backdrop.clone();
        Animation::start(&window, move || backdrop.borrow_mut().frame())?
    };

    Ok(FieldHandle {
        mounted: Some(MountedField {
            backdrop,
            _animation: animation,
            _listeners: vec![on_resize, on_move],
        }),
    })
}

fn show_notice(element: &Element, notice: &Notice) {
    element.set_text_content(Some(&notice.text));
    element.set_class_name(match notice.level {
        Level::Success => "notice notice-success",
        Level::Error => "notice notice-error",
    });
}

#[wasm_bindgen]
pub struct ContactHandle {
    _listener: Listener,
}

/// Sends the form with id `form_id` to the backend on submit, reporting back in `notice_id`.
///
/// The backend comes from `config` (JSON) if given, otherwise from the environment the crate was built with.
#[wasm_bindgen]
pub fn mount_contact(
    form_id: &str,
    notice_id: &str,
    config: Option<String>,
) -> Result<ContactHandle, JsValue> {
    init();

    let config = match config {
        Some(json) => BackendConfig::from_json(&json),
        None => BackendConfig::from_build_env(),
    }
    .map_err(js_error)?;

    let document = document()?;
    let form: HtmlFormElement = element_by_id(&document, form_id)?;
    let notice: Element = element_by_id(&document, notice_id)?;

    let contact = Rc::new(ContactForm::new());
    let store = Rc::new(RestStore::new(config));

    let target = form.clone();
    let listener = Listener::new(&target, "submit", move |event| {
        event.prevent_default();

        if contact.is_submitting() {
            return;
        }

        let data = match FormData::new_with_form(&form) {
            Ok(data) => data,
            Err(_) => return,
        };
        for field in Field::ALL {
            contact.set(field, data.get(field.name()).as_string().unwrap_or_default());
        }

        let button = form
            .query_selector("button:not([type]), button[type=submit]")
            .ok()
            .flatten()
            .and_then(|button| button.dyn_into::<HtmlButtonElement>().ok());
        if let Some(button) = &button {
            button.set_disabled(true);
        }

        let contact = contact.clone();
        let store = store.clone();
        let form = form.clone();
        let notice = notice.clone();
        spawn_local(async move {
            let outcome = contact.submit(&*store).await;

            if let Some(button) = &button {
                button.set_disabled(false);
            }
            if outcome == Outcome::Sent {
                form.reset();
            }
            if let Some(text) = outcome.notice() {
                show_notice(&notice, &text);
            }
        });
    })?;

    Ok(ContactHandle {
        _listener: listener,
    })
}

fn apply_theme(theme: Theme) {
    let root = web_sys::window()
        .and_then(|window| window.document())
        .and_then(|document| document.document_element());

    if let Some(root) = root {
        let _ = root
            .class_list()
            .toggle_with_force(LIGHT_CLASS, !theme.is_dark());
    }
}

type ThemeObserver = Rc<dyn Fn(Theme)>;

/// The page's theme, shared by everything that can change or show it.
struct SharedTheme {
    state: RefCell<ThemeState<LocalStore>>,
    observers: RefCell<Vec<Weak<dyn Fn(Theme)>>>,
}

impl SharedTheme {
    fn theme(&self) -> Theme {
        self.state.borrow().theme()
    }

    fn toggle(&self) -> Theme {
        let theme = self.state.borrow_mut().toggle();
        apply_theme(theme);

        // Observers belonging to unmounted handles are gone by now.
        let observers: Vec<ThemeObserver> = {
            let mut observers = self.observers.borrow_mut();
            observers.retain(|observer| observer.strong_count() > 0);
            observers.iter().filter_map(Weak::upgrade).collect()
        };
        for observer in observers {
            observer(theme);
        }

        theme
    }

    /// Calls `observer` after every toggle for as long as it's kept alive elsewhere.
    fn subscribe(&self, observer: &ThemeObserver) {
        self.observers.borrow_mut().push(Rc::downgrade(observer));
    }
}

#[wasm_bindgen]
pub struct ThemeHandle {
    shared: Rc<SharedTheme>,
    _listener: Option<Listener>,
}

#[wasm_bindgen]
impl ThemeHandle {
    pub fn theme(&self) -> String {
        self.shared.theme().as_str().to_owned()
    }

    pub fn toggle(&self) -> String {
        self.shared.toggle().as_str().to_owned()
    }
}

/// Restores the saved theme and, if `toggle_id` is given, flips it whenever that element is clicked.
#[wasm_bindgen]
pub fn mount_theme(toggle_id: Option<String>) -> Result<ThemeHandle, JsValue> {
    init();

    let shared = Rc::new(SharedTheme {
        state: RefCell::new(ThemeState::load(LocalStore)),
        observers: RefCell::new(Vec::new()),
    });
    apply_theme(shared.theme());

    let listener = match toggle_id {
        Some(id) => {
            let button: Element = element_by_id(&document()?, &id)?;
            let shared = shared.clone();
            Some(Listener::new(&button, "click", move |_| {
                shared.toggle();
            })?)
        }
        None => None,
    };

    Ok(ThemeHandle {
        shared,
        _listener: listener,
    })
}

fn navigate(document: &Document, section: Section) {
    // Sections missing from the page are skipped.
    if let Some(element) = document.get_element_by_id(section.id()) {
        let options = ScrollIntoViewOptions::new();
        options.set_behavior(ScrollBehavior::Smooth);
        element.scroll_into_view_with_scroll_into_view_options(&options);
    }
}

/// Smoothly scrolls to the section behind `anchor` (`#about` or `about`). Unknown anchors do nothing.
#[wasm_bindgen]
pub fn navigate_to(anchor: &str) {
    if let (Some(section), Ok(document)) = (Section::from_anchor(anchor), document()) {
        navigate(&document, section);
    }
}

struct PaletteView {
    overlay: HtmlElement,
    input: HtmlInputElement,
    list: Element,
}

impl PaletteView {
    fn sync(&self, document: &Document, palette: &CommandPalette, theme: Theme) {
        self.overlay.set_hidden(!palette.is_open());
        if !palette.is_open() {
            self.input.set_value("");
            return;
        }

        self.list.set_inner_html("");
        let entries = palette.entries(theme);
        if entries.is_empty() {
            if let Ok(item) = document.create_element("li") {
                item.set_text_content(Some("No results found."));
                let _ = self.list.append_child(&item);
            }
        }
        for (i, entry) in entries.iter().enumerate() {
            if let Ok(item) = document.create_element("li") {
                let _ = item.set_attribute("data-index", &i.to_string());
                item.set_text_content(Some(&entry.label));
                let _ = self.list.append_child(&item);
            }
        }
    }
}

#[wasm_bindgen]
pub struct PaletteHandle {
    _listeners: Vec<Listener>,
    _on_theme: ThemeObserver,
}

/// Wires up the command palette in the element with id `overlay_id`, which must contain an `input` and a `ul`.
///
/// Clicking the element with id `trigger_id`, if given, opens it too.
#[wasm_bindgen]
pub fn mount_palette(
    overlay_id: &str,
    theme: &ThemeHandle,
    trigger_id: Option<String>,
) -> Result<PaletteHandle, JsValue> {
    init();

    let document = document()?;
    let overlay: HtmlElement = element_by_id(&document, overlay_id)?;
    let input: HtmlInputElement = overlay
        .query_selector("input")?
        .ok_or_else(|| js_error("palette has no input"))?
        .dyn_into()?;
    let list = overlay
        .query_selector("ul")?
        .ok_or_else(|| js_error("palette has no list"))?;

    let view = Rc::new(PaletteView {
        overlay,
        input,
        list,
    });
    let palette = Rc::new(RefCell::new(CommandPalette::new()));
    let theme = theme.shared.clone();

    view.sync(&document, &palette.borrow(), theme.theme());

    // The theme entry's label names the other theme, so it changes whichever way the theme was toggled.
    let on_theme: ThemeObserver = {
        let (view, palette, doc) = (view.clone(), palette.clone(), document.clone());
        Rc::new(move |current: Theme| view.sync(&doc, &palette.borrow(), current))
    };
    theme.subscribe(&on_theme);

    let mut listeners = Vec::new();

    if let Some(id) = trigger_id {
        let trigger: Element = element_by_id(&document, &id)?;
        let (view, palette, theme, doc) = (view.clone(), palette.clone(), theme.clone(), document.clone());
        listeners.push(Listener::new(&trigger, "click", move |_| {
            palette.borrow_mut().open();
            view.sync(&doc, &palette.borrow(), theme.theme());
            let _ = view.input.focus();
        })?);
    }

    let on_key = {
        let (view, palette, theme, doc) = (view.clone(), palette.clone(), theme.clone(), document.clone());
        Listener::new(&document, "keydown", move |event| {
            let event = match event.dyn_into::<KeyboardEvent>() {
                Ok(event) => event,
                Err(_) => return,
            };
            let key = event.key();
            let chord = KeyChord {
                key: &key,
                ctrl: event.ctrl_key(),
                meta: event.meta_key(),
            };

            let handled = {
                let mut palette = palette.borrow_mut();
                if palette.handle_key(chord) {
                    true
                } else if key == "Escape" && palette.is_open() {
                    palette.close();
                    true
                } else {
                    false
                }
            };

            if handled {
                event.prevent_default();
                view.sync(&doc, &palette.borrow(), theme.theme());
                if palette.borrow().is_open() {
                    let _ = view.input.focus();
                }
            }
        })?
    };

    let on_input = {
        let (view, palette, theme, doc) = (view.clone(), palette.clone(), theme.clone(), document.clone());
        Listener::new(&view.input.clone(), "input", move |_| {
            palette.borrow_mut().set_query(view.input.value());
            view.sync(&doc, &palette.borrow(), theme.theme());
        })?
    };

    let on_click = {
        let (view, doc) = (view.clone(), document.clone());
        Listener::new(&view.list.clone(), "click", move |event| {
            let index = event
                .target()
                .and_then(|target| target.dyn_into::<Element>().ok())
                .and_then(|element| element.closest("[data-index]").ok().flatten())
                .and_then(|element| element.get_attribute("data-index"))
                .and_then(|index| index.parse::<usize>().ok());
            let index = match index {
                Some(index) => index,
                None => return,
            };

            let current = theme.theme();
            let action = {
                let mut palette = palette.borrow_mut();
                let entry = match palette.entries(current).into_iter().nth(index) {
                    Some(entry) => entry,
                    None => return,
                };
                palette.select(&entry)
            };

            match action {
                Action::Navigate(section) => navigate(&doc, section),
                Action::ToggleTheme => {
                    theme.toggle();
                }
            }

            view.sync(&doc, &palette.borrow(), theme.theme());
        })?
    };

    listeners.extend([on_key, on_input, on_click]);

    Ok(PaletteHandle {
        _listeners: listeners,
        _on_theme: on_theme,
    })
}

#[wasm_bindgen]
pub struct HeaderHandle {
    _listener: Listener,
}

/// Adds the `scrolled` class to the header once the page has scrolled past the top.
#[wasm_bindgen]
pub fn mount_header(header_id: &str) -> Result<HeaderHandle, JsValue> {
    init();

    let window = window()?;
    let header: Element = element_by_id(&document()?, header_id)?;

    let update = {
        let window = window.clone();
        move |_: Event| {
            let compact = header_compact(window.scroll_y().unwrap_or(0.0));
            let _ = header.class_list().toggle_with_force("scrolled", compact);
        }
    };

    Ok(HeaderHandle {
        _listener: Listener::new(&window, "scroll", update)?,
    })
}

#[cfg(test)]
mod tests {
    use gloo_storage::LocalStorage;
    use gloo_storage::Storage;
    use js_sys::Promise;
    use wasm_bindgen_futures::JsFuture;
    use wasm_bindgen_test::wasm_bindgen_test;

    use super::*;
    use crate::contact::FAILED_TEXT;
    use crate::theme::THEME_KEY;

    wasm_bindgen_test::wasm_bindgen_test_configure!(run_in_browser);

    async fn next_frames(count: usize) {
        for _ in 0..count {
            let frame = Promise::new(&mut |resolve, _| {
                window().unwrap().request_animation_frame(&resolve).unwrap();
            });
            JsFuture::from(frame).await.unwrap();
        }
    }

    async fn sleep(ms: i32) {
        let timeout = Promise::new(&mut |resolve, _| {
            window()
                .unwrap()
                .set_timeout_with_callback_and_timeout_and_arguments_0(&resolve, ms)
                .unwrap();
        });
        JsFuture::from(timeout).await.unwrap();
    }

    /// Appends `html` to the page inside a fresh element with the given tag and id.
    fn insert(tag: &str, id: &str, html: &str) -> HtmlElement {
        let document = document().unwrap();
        let element: HtmlElement = document.create_element(tag).unwrap().dyn_into().unwrap();
        element.set_id(id);
        element.set_inner_html(html);
        document.body().unwrap().append_child(&element).unwrap();
        element
    }

    #[wasm_bindgen_test]
    fn missing_canvas_is_skipped() {
        let handle = run("no-such-canvas", None).unwrap();
        assert!(!handle.is_running());
        assert_eq!(handle.particle_count(), 0);
    }

    #[wasm_bindgen_test]
    async fn unmount_stops_frames_and_listeners() {
        let canvas = insert("canvas", "field-teardown", "");
        let mut handle = run("field-teardown", Some(r#"{"area_per_particle": 1000}"#.into())).unwrap();
        assert!(handle.is_running());
        assert!(handle.particle_count() > 0);

        let backdrop = handle.mounted.as_ref().unwrap().backdrop.clone();
        next_frames(3).await;
        assert!(backdrop.borrow().frames > 0);

        handle.unmount();
        assert!(!handle.is_running());

        let frames = backdrop.borrow().frames;
        let particles = backdrop.borrow().sim.particles.clone();

        let window = window().unwrap();
        window.dispatch_event(&Event::new("resize").unwrap()).unwrap();
        window
            .dispatch_event(&MouseEvent::new("mousemove").unwrap())
            .unwrap();
        next_frames(3).await;

        let backdrop = backdrop.borrow();
        assert_eq!(backdrop.frames, frames);
        assert_eq!(backdrop.sim.particles, particles);
        assert_eq!(backdrop.sim.cursor(), None);

        canvas.remove();
    }

    #[wasm_bindgen_test]
    async fn failed_submission_reenables_the_button() {
        // Nothing listens on the discard port, so the insert fails.
        let config = r#"{"url": "http://127.0.0.1:9", "anon_key": "test-key"}"#;
        let form = insert(
            "form",
            "contact-failure",
            r#"<input name="name"><input name="email"><input name="subject"><input name="message"><button>Send</button>"#,
        );
        let notice = insert("div", "contact-failure-notice", "");
        let _handle = mount_contact("contact-failure", "contact-failure-notice", Some(config.into())).unwrap();

        for (field, value) in [
            ("name", "Ada"),
            ("email", "ada@example.com"),
            ("subject", "Hello"),
            ("message", "Nice particles."),
        ] {
            let input: HtmlInputElement = form
                .query_selector(&format!("input[name={}]", field))
                .unwrap()
                .unwrap()
                .dyn_into()
                .unwrap();
            input.set_value(value);
        }

        let button: HtmlButtonElement = form
            .query_selector("button")
            .unwrap()
            .unwrap()
            .dyn_into()
            .unwrap();

        form.dispatch_event(&Event::new("submit").unwrap()).unwrap();
        assert!(button.disabled());

        for _ in 0..200 {
            if !button.disabled() {
                break;
            }
            sleep(25).await;
        }

        assert!(!button.disabled());
        assert_eq!(notice.text_content().as_deref(), Some(FAILED_TEXT));

        // Only a successful send resets the form.
        let name: HtmlInputElement = form
            .query_selector("input[name=name]")
            .unwrap()
            .unwrap()
            .dyn_into()
            .unwrap();
        assert_eq!(name.value(), "Ada");

        form.remove();
        notice.remove();
    }

    #[wasm_bindgen_test]
    fn palette_follows_theme_toggles() {
        LocalStorage::delete(THEME_KEY);

        let overlay = insert("div", "palette-sync", "<input><ul></ul>");
        let trigger = insert("button", "palette-sync-trigger", "Navigate");

        let theme = mount_theme(None).unwrap();
        assert_eq!(theme.theme(), "dark");

        let _palette = mount_palette("palette-sync", &theme, Some("palette-sync-trigger".into())).unwrap();
        assert!(overlay.hidden());

        trigger.click();
        assert!(!overlay.hidden());
        let list = overlay.query_selector("ul").unwrap().unwrap();
        assert!(list.text_content().unwrap().contains("Toggle Light Mode"));

        assert_eq!(theme.toggle(), "light");
        let text = list.text_content().unwrap();
        assert!(text.contains("Toggle Dark Mode"));
        assert!(!text.contains("Toggle Light Mode"));

        theme.toggle();
        LocalStorage::delete(THEME_KEY);
        overlay.remove();
        trigger.remove();
    }
}
