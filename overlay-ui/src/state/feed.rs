//! Event-Stream Client
//!
//! `EventSource` wrapper that hands each `message` payload to a callback.
//! The browser retries transient drops itself; once it gives up (the source
//! is CLOSED) a fresh source is opened with exponential backoff.

use leptos::*;
use std::cell::{Cell, RefCell};
use std::rc::Rc;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{EventSource, MessageEvent};

use jamfeed::feed::backoff_delay;

type OnMessage = Rc<dyn Fn(String)>;

/// Event-stream client for one feed
#[derive(Clone)]
pub struct FeedSource {
    source: Rc<RefCell<Option<EventSource>>>,
    url: String,
    reconnect_attempts: Rc<Cell<u32>>,
    closed: Rc<Cell<bool>>,
}

impl FeedSource {
    pub fn new(url: &str) -> Self {
        Self {
            source: Rc::new(RefCell::new(None)),
            url: url.to_string(),
            reconnect_attempts: Rc::new(Cell::new(0)),
            closed: Rc::new(Cell::new(false)),
        }
    }

    /// Open the stream. `connected` tracks the open state.
    pub fn connect(&self, connected: RwSignal<bool>, on_message: OnMessage) {
        if self.closed.get() {
            return;
        }

        match EventSource::new(&self.url) {
            Ok(source) => {
                self.setup_handlers(&source, connected, on_message);
                *self.source.borrow_mut() = Some(source);
            }
            Err(e) => {
                web_sys::console::error_1(
                    &format!("EventSource creation failed: {:?}", e).into(),
                );
                self.schedule_reconnect(connected, on_message);
            }
        }
    }

    fn setup_handlers(&self, source: &EventSource, connected: RwSignal<bool>, on_message: OnMessage) {
        // On open
        let reconnect_attempts = Rc::clone(&self.reconnect_attempts);
        let url = self.url.clone();
        let on_open = Closure::wrap(Box::new(move |_: JsValue| {
            web_sys::console::log_1(&format!("Feed connected: {}", url).into());
            connected.set(true);
            reconnect_attempts.set(0);
        }) as Box<dyn FnMut(JsValue)>);
        source.set_onopen(Some(on_open.as_ref().unchecked_ref()));
        on_open.forget();

        // On message
        let handler = Rc::clone(&on_message);
        let on_msg = Closure::wrap(Box::new(move |event: MessageEvent| {
            if let Some(text) = event.data().as_string() {
                handler(text);
            }
        }) as Box<dyn FnMut(MessageEvent)>);
        source.set_onmessage(Some(on_msg.as_ref().unchecked_ref()));
        on_msg.forget();

        // On error: only a CLOSED source needs us to step in
        let client = self.clone();
        let on_error = Closure::wrap(Box::new(move |_: JsValue| {
            connected.set(false);

            let gave_up = client
                .source
                .borrow()
                .as_ref()
                .map(|s| s.ready_state() == EventSource::CLOSED)
                .unwrap_or(true);

            if gave_up {
                web_sys::console::warn_1(&"Feed closed by browser, reconnecting".into());
                client.schedule_reconnect(connected, Rc::clone(&on_message));
            }
        }) as Box<dyn FnMut(JsValue)>);
        source.set_onerror(Some(on_error.as_ref().unchecked_ref()));
        on_error.forget();
    }

    fn schedule_reconnect(&self, connected: RwSignal<bool>, on_message: OnMessage) {
        if self.closed.get() {
            return;
        }

        let attempts = self.reconnect_attempts.get();
        let delay = backoff_delay(attempts, None).as_millis() as u32;
        self.reconnect_attempts.set(attempts + 1);

        let client = self.clone();
        gloo_timers::callback::Timeout::new(delay, move || {
            web_sys::console::log_1(
                &format!("Attempting reconnect (attempt {})", attempts + 1).into(),
            );
            client.connect(connected, on_message);
        })
        .forget();
    }

    /// Close the stream and stop reconnecting
    pub fn close(&self) {
        self.closed.set(true);
        if let Some(source) = self.source.borrow_mut().take() {
            source.close();
        }
    }
}
