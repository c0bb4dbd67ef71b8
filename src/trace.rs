//! Tracing shims that cost nothing when the `tracing` feature is off.
//!
//! Pipeline stages call these macros unconditionally; with the feature
//! enabled they forward to `tracing` spans and events, and without it they
//! expand to no-ops, keeping call sites free of `cfg` clutter.

/// Open an info-level span around a pipeline stage.
#[cfg(feature = "tracing")]
macro_rules! trace_span {
    ($name:expr $(, $($field:tt)*)?) => {
        tracing::info_span!($name $(, $($field)*)?)
    };
}

#[cfg(not(feature = "tracing"))]
macro_rules! trace_span {
    ($name:expr $(, $($field:tt)*)?) => {
        $crate::trace::DisabledSpan
    };
}

/// Record an info-level event carrying counts for a finished stage.
#[cfg(feature = "tracing")]
macro_rules! trace_event {
    ($name:expr, $($key:ident = $value:expr),+ $(,)?) => {
        tracing::info!(name: $name, $($key = $value),+)
    };
    ($name:expr) => {
        tracing::info!(name: $name)
    };
}

#[cfg(not(feature = "tracing"))]
macro_rules! trace_event {
    ($name:expr, $($key:ident = $value:expr),+ $(,)?) => {
        // Field expressions still evaluate so unused-variable lints stay quiet.
        let _ = ($($value,)+);
    };
    ($name:expr) => {};
}

pub(crate) use trace_event;
pub(crate) use trace_span;

/// Stand-in span guard for builds without the `tracing` feature.
///
/// Mirrors just enough of `tracing::Span` that
/// `let _guard = trace_span!(...).entered();` compiles either way.
#[cfg(not(feature = "tracing"))]
pub struct DisabledSpan;

#[cfg(not(feature = "tracing"))]
impl DisabledSpan {
    /// Returns self, standing in for `Span::entered()`.
    #[inline]
    pub fn entered(self) -> Self {
        self
    }
}
