//! Handler panics, turned into error pages.
//!
//! The process-wide hook stores what it knows about a panic in a thread local
//! slot. [`CatchPanicLayer`] catches the unwind during the same poll on the
//! same worker thread, so [`PanicPage`] always reads the record of its own
//! panic, never one from a concurrent request.

use std::{any::Any, backtrace::Backtrace, cell::RefCell, sync::Once};

use axum::{body::BoxBody, response::Response};
use tower_http::catch_panic::{CatchPanicLayer, ResponseForPanic};
use tracing::error;
use tracing_error::SpanTrace;

use crate::pages;

thread_local! {
    static LAST_PANIC: RefCell<Option<HookRecord>> = RefCell::new(None);
}

static INSTALL_HOOK: Once = Once::new();

/// What the panic hook sees that the unwind payload does not carry
#[derive(Debug)]
struct HookRecord {
    location: Option<String>,
    backtrace: Backtrace,
    span_trace: SpanTrace,
}

#[derive(Debug)]
pub struct CaughtPanic {
    pub message: String,
    /// `file:line:column`, when the hook saw this panic
    pub location: Option<String>,
    pub backtrace: Backtrace,
    pub span_trace: SpanTrace,
}

impl CaughtPanic {
    fn from_payload(payload: Box<dyn Any + Send + 'static>) -> CaughtPanic {
        let message = match payload.downcast::<String>() {
            Ok(message) => *message,
            Err(payload) => payload
                .downcast_ref::<&str>()
                .map_or("panic payload was not a string", |message| *message)
                .to_string(),
        };

        let record = LAST_PANIC
            .try_with(|slot| slot.borrow_mut().take())
            .ok()
            .flatten();

        match record {
            Some(HookRecord {
                location,
                backtrace,
                span_trace,
            }) => CaughtPanic {
                message,
                location,
                backtrace,
                span_trace,
            },
            None => CaughtPanic {
                message,
                location: None,
                backtrace: Backtrace::disabled(),
                span_trace: SpanTrace::capture(),
            },
        }
    }
}

/// Renders the 500 page for a caught panic
#[derive(Debug, Clone, Copy, Default)]
pub struct PanicPage;

impl ResponseForPanic for PanicPage {
    type ResponseBody = BoxBody;

    fn response_for_panic(&mut self, payload: Box<dyn Any + Send + 'static>) -> Response<BoxBody> {
        let panic = CaughtPanic::from_payload(payload);

        error!(
            message = %panic.message,
            location = panic.location.as_deref().unwrap_or("unknown"),
            "handler panicked"
        );

        pages::panic_error(&panic)
    }
}

pub fn catch_panic_layer() -> CatchPanicLayer<PanicPage> {
    INSTALL_HOOK.call_once(|| {
        let previous_hook = std::panic::take_hook();

        std::panic::set_hook(Box::new(move |info| {
            let record = HookRecord {
                location: info.location().map(ToString::to_string),
                backtrace: Backtrace::capture(),
                span_trace: SpanTrace::capture(),
            };

            // Fails only while the thread is being torn down
            let _ = LAST_PANIC.try_with(|slot| *slot.borrow_mut() = Some(record));

            previous_hook(info)
        }));
    });

    CatchPanicLayer::custom(PanicPage)
}
