//! Per-invocation execution context.
//!
//! The context is the bag of bindings the hosting runtime hands to every
//! invocation: connection pools, service handles, static configuration.
//! Compose it once at startup, seal it with [`ContextBuilder::build`], and it
//! rides along with each request from there. The gate moves it through to the
//! router untouched; only handlers look inside.
//!
//! Bindings are keyed by type, one value per type:
//!
//! ```rust
//! use seki::Context;
//!
//! #[derive(Clone)]
//! struct ApiKeys(Vec<String>);
//!
//! let ctx = Context::builder()
//!     .bind(ApiKeys(vec!["k1".into()]))
//!     .build();
//!
//! assert!(ctx.get::<ApiKeys>().is_some());
//! ```

use std::sync::Arc;

use http::Extensions;

/// An opaque, immutable bag of startup-time bindings.
///
/// Cloning is one atomic increment; every invocation gets its own handle to
/// the same underlying map. There is no way to mutate a built context, so
/// nothing a handler does can leak into another request.
#[derive(Clone, Debug, Default)]
pub struct Context {
    bindings: Arc<Extensions>,
}

impl Context {
    /// The empty context. What [`Server`](crate::Server) uses unless told
    /// otherwise.
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts composing a context.
    pub fn builder() -> ContextBuilder {
        ContextBuilder { bindings: Extensions::new() }
    }

    /// Returns the binding of type `T`, if one was installed.
    pub fn get<T: Send + Sync + 'static>(&self) -> Option<&T> {
        self.bindings.get::<T>()
    }
}

/// Builder for [`Context`]. Obtain via [`Context::builder`].
#[derive(Debug, Default)]
pub struct ContextBuilder {
    bindings: Extensions,
}

impl ContextBuilder {
    /// Installs a binding, replacing any earlier binding of the same type.
    pub fn bind<T: Clone + Send + Sync + 'static>(mut self, binding: T) -> Self {
        self.bindings.insert(binding);
        self
    }

    /// Seals the context. No further bindings can be added.
    pub fn build(self) -> Context {
        Context { bindings: Arc::new(self.bindings) }
    }
}
