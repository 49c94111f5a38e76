#![forbid(unsafe_code)]

//! `setTimeout`-backed wrapper around [`omnipeak_ui::debounce::Debouncer`].
//!
//! Not wired into any site behavior; available to hosts that need to
//! rate-limit a handler (resize, input) to the end of a quiet period.

use core::time::Duration;
use std::cell::{OnceCell, RefCell};
use std::rc::Rc;

use omnipeak_ui::debounce::Debouncer;
use tracing::{trace, warn};
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::Window;

use crate::MountError;

/// Timer callbacks may run marginally before the clock reaches the deadline.
const TIMER_SLACK: Duration = Duration::from_millis(1);

struct Timer {
    debouncer: Debouncer,
    timeout: Option<i32>,
}

struct Shared {
    window: Window,
    timer: RefCell<Timer>,
    action: RefCell<Box<dyn FnMut()>>,
    timer_fn: OnceCell<js_sys::Function>,
}

/// Runs its action once, `wait` after the most recent [`Debounced::call`].
///
/// The action runs with no internal borrow held, so it may call
/// [`Debounced::call`] or [`Debounced::cancel`] on the same value.
pub struct Debounced {
    shared: Rc<Shared>,
    _timer_callback: Closure<dyn FnMut()>,
}

fn now(window: &Window) -> Duration {
    let ms = window.performance().map_or(0.0, |p| p.now());
    Duration::from_secs_f64((ms / 1000.0).max(0.0))
}

fn timeout_ms(delay: Duration) -> i32 {
    i32::try_from(delay.as_micros().div_ceil(1000)).unwrap_or(i32::MAX)
}

impl Shared {
    fn schedule(&self, timer: &mut Timer, delay: Duration) {
        let Some(timer_fn) = self.timer_fn.get() else {
            return;
        };
        match self
            .window
            .set_timeout_with_callback_and_timeout_and_arguments_0(timer_fn, timeout_ms(delay))
        {
            Ok(handle) => timer.timeout = Some(handle),
            Err(err) => warn!(?err, "setTimeout failed; debounced call dropped"),
        }
    }

    fn on_timer(&self) {
        let due = {
            let mut timer = self.timer.borrow_mut();
            timer.timeout = None;
            let now = now(&self.window).saturating_add(TIMER_SLACK);
            if timer.debouncer.poll(now) {
                true
            } else {
                // Fired early or the deadline moved; wait out the rest.
                if let Some(left) = timer.debouncer.remaining(now) {
                    trace!(left_ms = left.as_millis(), "debounce timer re-armed");
                    self.schedule(&mut timer, left);
                }
                false
            }
        };
        if !due {
            return;
        }
        match self.action.try_borrow_mut() {
            Ok(mut action) => action(),
            Err(_) => warn!("debounced action still running; invocation skipped"),
        }
    }
}

impl Debounced {
    pub fn new<F>(wait: Duration, action: F) -> Result<Self, MountError>
    where
        F: FnMut() + 'static,
    {
        let window = web_sys::window().ok_or(MountError::NoWindow)?;
        let shared = Rc::new(Shared {
            window,
            timer: RefCell::new(Timer {
                debouncer: Debouncer::new(wait),
                timeout: None,
            }),
            action: RefCell::new(Box::new(action)),
            timer_fn: OnceCell::new(),
        });

        let callback = {
            let shared = Rc::clone(&shared);
            Closure::wrap(Box::new(move || shared.on_timer()) as Box<dyn FnMut()>)
        };
        let _ = shared
            .timer_fn
            .set(callback.as_ref().unchecked_ref::<js_sys::Function>().clone());

        Ok(Self {
            shared,
            _timer_callback: callback,
        })
    }

    /// Restart the quiet period.
    pub fn call(&self) {
        let shared = &self.shared;
        let mut timer = shared.timer.borrow_mut();
        if let Some(handle) = timer.timeout.take() {
            shared.window.clear_timeout_with_handle(handle);
        }
        timer.debouncer.call(now(&shared.window));
        let wait = timer.debouncer.wait();
        shared.schedule(&mut timer, wait);
    }

    /// Whether an invocation is waiting for its quiet period to end.
    #[must_use]
    pub fn is_pending(&self) -> bool {
        self.shared.timer.borrow().debouncer.is_armed()
    }

    /// Drop a pending invocation.
    pub fn cancel(&self) {
        let shared = &self.shared;
        let mut timer = shared.timer.borrow_mut();
        if let Some(handle) = timer.timeout.take() {
            shared.window.clear_timeout_with_handle(handle);
        }
        timer.debouncer.cancel();
    }
}

impl Drop for Debounced {
    fn drop(&mut self) {
        self.cancel();
    }
}
