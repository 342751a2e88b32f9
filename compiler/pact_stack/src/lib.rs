//! Stack growth guard.
//!
//! Contract sources are untrusted: a deeply parenthesized expression or a
//! long chain of nested contract calls must not overflow the host thread's
//! stack. The parser's expression entry point and the interpreter's
//! expression/call evaluation are wrapped in [`ensure_sufficient_stack`].
//!
//! On native targets the stack is grown on demand with `stacker`; on WASM
//! the closure is called directly.

/// Remaining stack below which a new segment is allocated (128KB).
const RED_ZONE: usize = 128 * 1024;

/// Size of each newly allocated stack segment (2MB).
const SEGMENT_SIZE: usize = 2 * 1024 * 1024;

/// Run `f`, first growing the stack if less than the red zone remains.
#[inline]
#[cfg(not(target_arch = "wasm32"))]
pub fn ensure_sufficient_stack<R>(f: impl FnOnce() -> R) -> R {
    stacker::maybe_grow(RED_ZONE, SEGMENT_SIZE, f)
}

#[inline]
#[cfg(target_arch = "wasm32")]
pub fn ensure_sufficient_stack<R>(f: impl FnOnce() -> R) -> R {
    f()
}

#[cfg(test)]
mod tests;
