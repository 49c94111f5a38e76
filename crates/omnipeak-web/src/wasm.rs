#![forbid(unsafe_code)]

//! `wasm-bindgen` exports: [`SiteController`] and the autostart entry point.
//!
//! Only compiled on `wasm32` targets.

use core::fmt::Display;
use std::cell::{Cell, RefCell};
use std::rc::Rc;

use js_sys::{Array, Reflect};
use omnipeak_ui::SiteConfig;
use omnipeak_ui::active_link::ActiveLinkMarker;
use omnipeak_ui::anchor::{AnchorAction, AnchorScroller, ScrollGeometry};
use omnipeak_ui::footer::stamp_year;
use omnipeak_ui::form::FormEnhancer;
use omnipeak_ui::header::{FrameThrottle, HeaderWatcher};
use omnipeak_ui::nav::NavMenu;
use omnipeak_ui::reveal::{RevealOutcome, RevealTracker};
use tracing::{debug, warn};
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{
    Document, Element, Event, HtmlButtonElement, HtmlElement, IntersectionObserver,
    IntersectionObserverEntry, IntersectionObserverInit, Node, ScrollBehavior, ScrollToOptions,
    Window,
};

use crate::MountError;
use crate::component;
use crate::dom::{DomButton, DomElement, field_value, query, query_all};
use crate::error::console_line;
use crate::listeners::Listeners;

thread_local! {
    /// Set while a [`SiteController`] exists on this page.
    static PAGE_MOUNTED: Cell<bool> = const { Cell::new(false) };
}

/// Surface a failure on the browser console whether or not the host
/// installed a `tracing` subscriber.
fn report(context: &str, detail: &dyn Display) {
    web_sys::console::error_1(&JsValue::from_str(&console_line(context, detail)));
}

fn install_panic_hook() {
    use std::sync::Once;

    static ONCE: Once = Once::new();
    ONCE.call_once(|| {
        std::panic::set_hook(Box::new(|info| report("panic", info)));
    });
}

fn supports_intersection_observer(window: &Window) -> bool {
    Reflect::has(window, &JsValue::from_str("IntersectionObserver")).unwrap_or(false)
}

/// Globals resolved once per mount.
struct Page {
    window: Window,
    document: Document,
    root: Element,
}

struct HeaderState {
    watcher: HeaderWatcher<DomElement>,
    throttle: FrameThrottle,
    frame_request: Option<i32>,
}

struct RevealObserver {
    observer: IntersectionObserver,
    tracker: Rc<RefCell<RevealTracker<DomElement>>>,
    _callback: Closure<dyn FnMut(Array, IntersectionObserver)>,
}

impl Drop for RevealObserver {
    fn drop(&mut self) {
        self.observer.disconnect();
    }
}

type InstallStep = fn(&mut SiteController, &Page) -> Result<bool, MountError>;

/// Page-lifetime owner of every installed behavior.
///
/// At most one controller exists per page. Dropping it (`free()` from JS)
/// detaches its listeners and observers and allows a fresh mount.
#[wasm_bindgen]
pub struct SiteController {
    config: SiteConfig,
    nav: Option<Rc<NavMenu<DomElement>>>,
    header: Option<Rc<RefCell<HeaderState>>>,
    _frame_callback: Option<Closure<dyn FnMut()>>,
    reveal: Option<RevealObserver>,
    components: Vec<&'static str>,
    listeners: Listeners,
}

#[wasm_bindgen]
impl SiteController {
    /// Mount every behavior with the default configuration.
    pub fn mount() -> Result<SiteController, JsValue> {
        install_panic_hook();
        Ok(Self::mount_with(SiteConfig::default())?)
    }

    /// Mount with a JSON override of the default configuration.
    #[wasm_bindgen(js_name = mountWithConfig)]
    pub fn mount_with_config(json: &str) -> Result<SiteController, JsValue> {
        install_panic_hook();
        let config = SiteConfig::from_json(json).map_err(MountError::from)?;
        Ok(Self::mount_with(config)?)
    }

    #[wasm_bindgen(js_name = isMenuOpen)]
    pub fn is_menu_open(&self) -> bool {
        self.nav.as_ref().is_some_and(|nav| nav.is_open())
    }

    /// Names of the components that found their elements and installed.
    #[wasm_bindgen(js_name = mountedComponents)]
    pub fn mounted_components(&self) -> Array {
        self.components
            .iter()
            .map(|name| JsValue::from_str(name))
            .collect()
    }

    #[wasm_bindgen(js_name = listenerCount)]
    pub fn listener_count(&self) -> usize {
        self.listeners.len()
    }

    /// Observed elements that have not animated yet.
    #[wasm_bindgen(js_name = revealPending)]
    pub fn reveal_pending(&self) -> usize {
        self.reveal
            .as_ref()
            .map_or(0, |reveal| reveal.tracker.borrow().pending())
    }
}

impl SiteController {
    /// Rust-side mount. Missing elements skip components; a missing window
    /// or document fails, and so does a second mount while a controller is
    /// alive.
    pub fn mount_with(config: SiteConfig) -> Result<Self, MountError> {
        if PAGE_MOUNTED.with(Cell::get) {
            return Err(MountError::AlreadyMounted);
        }
        let window = web_sys::window().ok_or(MountError::NoWindow)?;
        let document = window.document().ok_or(MountError::NoDocument)?;
        let root = document.document_element().ok_or(MountError::NoDocument)?;
        let page = Page {
            window,
            document,
            root,
        };

        let mut controller = Self {
            config,
            nav: None,
            header: None,
            _frame_callback: None,
            reveal: None,
            components: Vec::new(),
            listeners: Listeners::new(),
        };
        PAGE_MOUNTED.with(|mounted| mounted.set(true));

        let steps: [(&'static str, InstallStep); 7] = [
            (component::NAV_TOGGLE, Self::install_nav),
            (component::HEADER_SCROLL, Self::install_header),
            (component::ANCHOR_SCROLL, Self::install_anchors),
            (component::CONTACT_FORM, Self::install_form),
            (component::ACTIVE_LINK, Self::install_active_link),
            (component::SCROLL_REVEAL, Self::installreveal),
            (component::FOOTER_YEAR, Self::install_footer_year),
        ];
        for (name, step) in steps {
            match step(&mut controller, &page) {
                Ok(true) => controller.components.push(name),
                Ok(false) => debug!(component = name, "elements absent; component skipped"),
                Err(err) => {
                    warn!(component = name, %err, "component failed to install");
                    report(name, &err);
                }
            }
        }

        debug!(
            components = ?controller.components,
            listeners = controller.listeners.len(),
            "site mounted"
        );
        Ok(controller)
    }

    pub fn components(&self) -> &[&'static str] {
        &self.components
    }

    /// The scroll-reveal observer, when that component installed.
    pub fn reveal_observer(&self) -> Option<&IntersectionObserver> {
        self.reveal.as_ref().map(|reveal| &reveal.observer)
    }

    fn install_nav(&mut self, page: &Page) -> Result<bool, MountError> {
        let selectors = &self.config.selectors;
        let toggle = query(&page.root, &selectors.nav_toggle).map(DomElement);
        let list = query(&page.root, &selectors.nav_list).map(DomElement);
        let Some(menu) = NavMenu::from_parts(toggle, list, &self.config.classes) else {
            return Ok(false);
        };
        let menu = Rc::new(menu);
        let toggle_el = menu.toggle_element().element().clone();
        let list_el = menu.list_element().element().clone();
        let mut staged = Listeners::new();

        {
            let menu = Rc::clone(&menu);
            staged.listen(&toggle_el, "click", move |_| {
                menu.toggle();
            })?;
        }

        for link in query_all(&list_el, &selectors.nav_link) {
            let menu = Rc::clone(&menu);
            staged.listen(&link, "click", move |_| menu.on_link_click())?;
        }

        {
            let menu = Rc::clone(&menu);
            staged
                .listen(&page.document, "click", move |event: Event| {
                    let inside = event
                        .target()
                        .and_then(|target| target.dyn_into::<Node>().ok())
                        .is_some_and(|node| {
                            toggle_el.contains(Some(&node)) || list_el.contains(Some(&node))
                        });
                    menu.on_document_click(inside);
                })?;
        }

        self.listeners.absorb(staged);
        self.nav = Some(menu);
        Ok(true)
    }

    fn install_header(&mut self, page: &Page) -> Result<bool, MountError> {
        let Some(header) = query(&page.root, &self.config.selectors.header) else {
            return Ok(false);
        };
        let initial_scroll_y = page.window.scroll_y().unwrap_or(0.0);
        let state = Rc::new(RefCell::new(HeaderState {
            watcher: HeaderWatcher::new(
                DomElement(header),
                &self.config.classes,
                &self.config.scroll,
                initial_scroll_y,
            ),
            throttle: FrameThrottle::new(),
            frame_request: None,
        }));

        let frame = {
            let state = Rc::clone(&state);
            let window = page.window.clone();
            Closure::wrap(Box::new(move || {
                let scroll_y = window.scroll_y().unwrap_or(0.0);
                let mut state = state.borrow_mut();
                state.frame_request = None;
                state.watcher.update(scroll_y);
                state.throttle.on_frame();
            }) as Box<dyn FnMut()>)
        };
        let frame_fn = frame.as_ref().unchecked_ref::<js_sys::Function>().clone();

        let mut staged = Listeners::new();
        {
            let state = Rc::clone(&state);
            let window = page.window.clone();
            staged.listen(&page.window, "scroll", move |_| {
                let mut state = state.borrow_mut();
                if !state.throttle.on_scroll() {
                    return;
                }
                match window.request_animation_frame(&frame_fn) {
                    Ok(id) => state.frame_request = Some(id),
                    Err(err) => {
                        state.throttle.on_frame();
                        warn!(?err, "requestAnimationFrame failed");
                    }
                }
            })?;
        }

        self.listeners.absorb(staged);
        self.header = Some(state);
        self._frame_callback = Some(frame);
        Ok(true)
    }

    fn install_anchors(&mut self, page: &Page) -> Result<bool, MountError> {
        let links = query_all(&page.root, &self.config.selectors.anchor_link);
        if links.is_empty() {
            return Ok(false);
        }
        let scroller = AnchorScroller::new(&self.config.anchor);
        let header: Option<HtmlElement> = query(&page.root, &self.config.selectors.header)
            .and_then(|el| el.dyn_into::<HtmlElement>().ok());

        let mut staged = Listeners::new();
        for link in links {
            let source = link.clone();
            let window = page.window.clone();
            let document = page.document.clone();
            let header = header.clone();
            staged.listen(&link, "click", move |event: Event| {
                let href = source.get_attribute("href").unwrap_or_default();
                let action = scroller.resolve(&href, |id| {
                    let target = document.get_element_by_id(id)?;
                    Some(ScrollGeometry {
                        target_rect_top: target.get_bounding_client_rect().top(),
                        scroll_y: window.scroll_y().unwrap_or(0.0),
                        header_height: header.as_ref().map(|h| f64::from(h.offset_height())),
                    })
                });
                if let AnchorAction::ScrollTo(top) = action {
                    event.prevent_default();
                    let options = ScrollToOptions::new();
                    options.set_top(top);
                    options.set_behavior(ScrollBehavior::Smooth);
                    window.scroll_to_with_scroll_to_options(&options);
                }
            })?;
        }
        self.listeners.absorb(staged);
        Ok(true)
    }

    fn install_form(&mut self, page: &Page) -> Result<bool, MountError> {
        let selectors = &self.config.selectors;
        let Some(form) = query(&page.root, &selectors.contact_form) else {
            return Ok(false);
        };
        let enhancer = Rc::new(FormEnhancer::new(&self.config.classes, &self.config.form));
        let mut staged = Listeners::new();

        for field in query_all(&form, &selectors.form_field) {
            let Some(group) = field.parent_element().map(DomElement) else {
                continue;
            };
            {
                let enhancer = Rc::clone(&enhancer);
                let group = group.clone();
                staged.listen(&field, "focus", move |_| enhancer.on_focus(&group))?;
            }
            {
                let enhancer = Rc::clone(&enhancer);
                let source = field.clone();
                staged.listen(&field, "blur", move |_| {
                    enhancer.on_blur(&group, &field_value(&source));
                })?;
            }
        }

        let submit_selector = selectors.submit_button.clone();
        let source = form.clone();
        staged.listen(&form, "submit", move |_| {
            let control = query(&source, &submit_selector)
                .and_then(|el| el.dyn_into::<HtmlButtonElement>().ok())
                .map(DomButton);
            enhancer.on_submit(control.as_ref());
        })?;
        self.listeners.absorb(staged);
        Ok(true)
    }

    fn install_active_link(&mut self, page: &Page) -> Result<bool, MountError> {
        let links: Vec<(DomElement, Option<String>)> =
            query_all(&page.root, &self.config.selectors.nav_link)
                .into_iter()
                .map(|el| {
                    let href = el.get_attribute("href");
                    (DomElement(el), href)
                })
                .collect();
        if links.is_empty() {
            return Ok(false);
        }
        let path = page.window.location().pathname().map_err(MountError::js)?;
        let marker = ActiveLinkMarker::new(&self.config.classes, &self.config.active_link);
        let marked = marker.mark(&path, links.iter().map(|(el, href)| (el, href.as_deref())));
        debug!(path = %path, marked, "active nav links marked");
        Ok(true)
    }

    fn installreveal(&mut self, page: &Page) -> Result<bool, MountError> {
        if !supports_intersection_observer(&page.window) {
            debug!("IntersectionObserver unavailable");
            return Ok(false);
        }
        let elements = query_all(&page.root, &self.config.selectors.animate_on_scroll)
            .into_iter()
            .map(DomElement)
            .collect();
        let Some(tracker) = RevealTracker::new(elements, &self.config.classes) else {
            return Ok(false);
        };
        let targets: Vec<Element> = tracker.elements().map(|el| el.element().clone()).collect();
        let tracker = Rc::new(RefCell::new(tracker));

        let callback = {
            let tracker = Rc::clone(&tracker);
            Closure::wrap(Box::new(move |entries: Array, observer: IntersectionObserver| {
                for entry in entries.iter() {
                    let entry: IntersectionObserverEntry = entry.unchecked_into();
                    let target = entry.target();
                    let outcome = tracker
                        .borrow_mut()
                        .on_entry(&DomElement(target.clone()), entry.is_intersecting());
                    if outcome == RevealOutcome::Animated {
                        observer.unobserve(&target);
                    }
                }
            }) as Box<dyn FnMut(Array, IntersectionObserver)>)
        };

        let options = IntersectionObserverInit::new();
        options.set_threshold(&JsValue::from_f64(self.config.reveal.threshold));
        options.set_root_margin(&self.config.reveal.root_margin());
        let observer =
            IntersectionObserver::new_with_options(callback.as_ref().unchecked_ref(), &options)
                .map_err(MountError::js)?;
        for target in &targets {
            observer.observe(target);
        }

        self.reveal = Some(RevealObserver {
            observer,
            tracker,
            _callback: callback,
        });
        Ok(true)
    }

    fn install_footer_year(&mut self, page: &Page) -> Result<bool, MountError> {
        let Some(span) = query(&page.root, &self.config.selectors.current_year) else {
            return Ok(false);
        };
        stamp_year(&DomElement(span), js_sys::Date::new_0().get_full_year());
        Ok(true)
    }
}

impl Drop for SiteController {
    fn drop(&mut self) {
        PAGE_MOUNTED.with(|mounted| mounted.set(false));
        let (Some(state), Some(window)) = (&self.header, web_sys::window()) else {
            return;
        };
        if let Some(id) = state.borrow_mut().frame_request.take() {
            let _ = window.cancel_animation_frame(id);
        }
    }
}

// ---------------------------------------------------------------------------
// Autostart
// ---------------------------------------------------------------------------

#[cfg(feature = "autostart")]
thread_local! {
    static MOUNTED: RefCell<Option<SiteController>> = const { RefCell::new(None) };
}

#[cfg(feature = "autostart")]
fn mount_page() {
    match SiteController::mount_with(SiteConfig::default()) {
        Ok(controller) => MOUNTED.with(|slot| *slot.borrow_mut() = Some(controller)),
        Err(err) => report("mount failed", &err),
    }
}

/// Drop the autostarted controller so the host can mount its own.
///
/// Returns `false` when autostart had not mounted anything.
#[cfg(feature = "autostart")]
#[wasm_bindgen(js_name = unmountSite)]
pub fn unmount_site() -> bool {
    let controller = MOUNTED.with(|slot| slot.borrow_mut().take());
    controller.is_some()
}

/// Mount once the document is parsed.
#[cfg(feature = "autostart")]
#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    install_panic_hook();
    let window = web_sys::window().ok_or(MountError::NoWindow)?;
    let document = window.document().ok_or(MountError::NoDocument)?;
    if document.ready_state() != "loading" {
        mount_page();
        return Ok(());
    }
    let boot = Closure::once_into_js(mount_page);
    let options = web_sys::AddEventListenerOptions::new();
    options.set_once(true);
    document.add_event_listener_with_callback_and_add_event_listener_options(
        "DOMContentLoaded",
        boot.unchecked_ref(),
        &options,
    )?;
    Ok(())
}
