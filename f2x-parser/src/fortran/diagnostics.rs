//! Diagnostics handle
//!
//!     Every pipeline component that reports progress or anomalies receives a [`Diagnostics`]
//!     value through its constructor. The handle wraps a `tracing` span that names the source
//!     being processed, so events emitted while it is entered carry that context. Subscriber
//!     setup (filters, writers) happens once in the binary; library code never configures it.
//!
//!     A disabled handle wraps `Span::none()`, which is what tests and library callers that do
//!     not care about logging get from `Diagnostics::default()`.

use tracing::span::Entered;
use tracing::Span;

#[derive(Debug, Clone)]
pub struct Diagnostics {
    span: Span,
}

impl Diagnostics {
    /// Create a handle whose events are scoped to `source` (usually the input path).
    pub fn for_source(source: &str) -> Self {
        Self {
            span: tracing::info_span!("f2x", source = %source),
        }
    }

    /// A handle that attaches no context.
    pub fn disabled() -> Self {
        Self { span: Span::none() }
    }

    /// Enter the handle's span for the lifetime of the returned guard.
    pub fn enter(&self) -> Entered<'_> {
        self.span.enter()
    }

    pub fn span(&self) -> &Span {
        &self.span
    }
}

impl Default for Diagnostics {
    fn default() -> Self {
        Self::disabled()
    }
}
