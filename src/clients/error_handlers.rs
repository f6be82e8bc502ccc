//! Error handler registry.
//!
//! Handlers registered on a [`ResourceClient`](crate::ResourceClient) see every
//! failed request before the error is returned to the caller. They are meant
//! for cross-cutting reactions (logging out on 401, reporting, metrics) and
//! cannot change the error.

use std::fmt;
use std::sync::Arc;

use crate::clients::errors::TransportError;
use crate::clients::http_response::HttpResponse;

/// What an error handler receives.
#[derive(Debug, Clone, Copy)]
pub struct ErrorContext<'a> {
    /// The transport error.
    pub response: &'a TransportError,
    /// The HTTP response, when the server answered.
    pub parsed_body: Option<&'a HttpResponse>,
}

impl<'a> ErrorContext<'a> {
    pub(crate) const fn new(error: &'a TransportError) -> Self {
        Self {
            response: error,
            parsed_body: error.response(),
        }
    }
}

/// A registered error handler.
pub type ErrorHandler = Arc<dyn Fn(&ErrorContext<'_>) + Send + Sync>;

/// Identifies a registered handler so it can be removed later.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ErrorHandlerId(u64);

#[derive(Default)]
pub(crate) struct ErrorHandlers {
    next_id: u64,
    handlers: Vec<(ErrorHandlerId, ErrorHandler)>,
}

impl ErrorHandlers {
    pub fn add(&mut self, handler: ErrorHandler) -> ErrorHandlerId {
        let id = ErrorHandlerId(self.next_id);
        self.next_id += 1;
        self.handlers.push((id, handler));
        id
    }

    pub fn remove(&mut self, id: ErrorHandlerId) -> bool {
        let before = self.handlers.len();
        self.handlers.retain(|(existing, _)| *existing != id);
        self.handlers.len() != before
    }

    pub fn clear(&mut self) {
        self.handlers.clear();
    }

    pub fn len(&self) -> usize {
        self.handlers.len()
    }

    /// Invokes every handler in registration order.
    pub fn notify(&self, error: &TransportError) {
        let context = ErrorContext::new(error);
        for (_, handler) in &self.handlers {
            handler(&context);
        }
    }
}

impl fmt::Debug for ErrorHandlers {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ErrorHandlers")
            .field("count", &self.handlers.len())
            .finish()
    }
}
