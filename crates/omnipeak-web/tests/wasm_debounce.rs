#![cfg(target_arch = "wasm32")]
#![forbid(unsafe_code)]

use core::time::Duration;
use std::cell::{Cell, RefCell};
use std::rc::Rc;

use omnipeak_web::Debounced;
use wasm_bindgen_futures::JsFuture;
use wasm_bindgen_test::{wasm_bindgen_test, wasm_bindgen_test_configure};

wasm_bindgen_test_configure!(run_in_browser);

async fn sleep(ms: i32) {
    let timer = js_sys::Promise::new(&mut |resolve, _reject| {
        web_sys::window()
            .expect("window")
            .set_timeout_with_callback_and_timeout_and_arguments_0(&resolve, ms)
            .expect("setTimeout");
    });
    JsFuture::from(timer).await.expect("timer");
}

fn counter() -> (Rc<Cell<u32>>, impl FnMut() + 'static) {
    let hits = Rc::new(Cell::new(0));
    let tally = Rc::clone(&hits);
    (hits, move || tally.set(tally.get() + 1))
}

#[wasm_bindgen_test]
async fn burst_of_calls_runs_action_once() {
    let (hits, action) = counter();
    let debounced = Debounced::new(Duration::from_millis(50), action).expect("debounced");

    for _ in 0..3 {
        debounced.call();
        sleep(5).await;
    }
    assert!(debounced.is_pending());

    sleep(200).await;
    assert_eq!(hits.get(), 1);
    assert!(!debounced.is_pending());
}

#[wasm_bindgen_test]
async fn cancel_drops_pending_invocation() {
    let (hits, action) = counter();
    let debounced = Debounced::new(Duration::from_millis(20), action).expect("debounced");
    debounced.call();
    debounced.cancel();
    sleep(80).await;
    assert_eq!(hits.get(), 0);
}

#[wasm_bindgen_test]
async fn action_may_restart_its_own_debouncer() {
    let hits = Rc::new(Cell::new(0_u32));
    let slot: Rc<RefCell<Option<Debounced>>> = Rc::default();
    let debounced = {
        let hits = Rc::clone(&hits);
        let slot = Rc::clone(&slot);
        Debounced::new(Duration::from_millis(10), move || {
            hits.set(hits.get() + 1);
            if hits.get() == 1 {
                if let Some(again) = slot.borrow().as_ref() {
                    again.call();
                }
            }
        })
        .expect("debounced")
    };
    debounced.call();
    *slot.borrow_mut() = Some(debounced);

    sleep(150).await;
    assert_eq!(hits.get(), 2);
    assert!(slot.borrow().as_ref().is_some_and(|d| !d.is_pending()));

    slot.borrow_mut().take();
}
