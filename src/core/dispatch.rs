//! Routes typed commands and queries to their single registered handler.
//!
//! Each request type is its own routing key (`TypeId`), so the transport layer
//! only needs a `Dispatcher` and never names a concrete handler.

use std::any::{type_name, Any, TypeId};
use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;

use crate::core::error::{AppError, Result};

/// A command or query that resolves to exactly one `Response`
pub trait Request: Send + 'static {
    type Response: Send + 'static;
}

/// Use-case handler for request `R`
#[async_trait]
pub trait RequestHandler<R: Request>: Send + Sync {
    async fn handle(&self, request: R) -> Result<R::Response>;
}

#[derive(Default)]
pub struct Dispatcher {
    handlers: HashMap<TypeId, Box<dyn Any + Send + Sync>>,
}

impl std::fmt::Debug for Dispatcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Dispatcher")
            .field("handlers", &self.handlers.len())
            .finish()
    }
}

impl Dispatcher {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register the handler for `R`, replacing any previous one
    pub fn register<R, H>(&mut self, handler: H) -> &mut Self
    where
        R: Request,
        H: RequestHandler<R> + 'static,
    {
        let handler: Arc<dyn RequestHandler<R>> = Arc::new(handler);
        if self
            .handlers
            .insert(TypeId::of::<R>(), Box::new(handler))
            .is_some()
        {
            tracing::warn!(request = type_name::<R>(), "Replaced existing request handler");
        }
        self
    }

    pub fn handler_count(&self) -> usize {
        self.handlers.len()
    }

    /// Send a request to its handler
    pub async fn send<R: Request>(&self, request: R) -> Result<R::Response> {
        let handler = self
            .handlers
            .get(&TypeId::of::<R>())
            .and_then(|h| h.downcast_ref::<Arc<dyn RequestHandler<R>>>())
            .cloned()
            .ok_or_else(|| {
                AppError::Internal(format!("No handler registered for {}", type_name::<R>()))
            })?;

        tracing::debug!(request = type_name::<R>(), "Dispatching request");
        handler.handle(request).await
    }
}
