//! The explicit GL context handle and the per-call error check.
//!
//! Every resource in this crate holds a clone of a [`Context`] and issues its
//! GL calls through [`gl_call!`], which clears stale error flags, runs the call,
//! and then inspects `glGetError`. What happens on a raised flag is decided by
//! the context's [`CheckMode`].

use std::rc::Rc;

use crate::api::GlApi;
use crate::error::GlError;

/// Upper bound on `glGetError` reads per drain. A lost context can report
/// `CONTEXT_LOST` indefinitely.
const MAX_DRAIN: usize = 32;

/// Issue one [`GlApi`] call through [`Context::checked`], recording the call
/// text and source location for the error report.
///
/// ```ignore
/// gl_call!(self.ctx, bind_buffer(glow::ARRAY_BUFFER, Some(self.handle)));
/// ```
macro_rules! gl_call {
    ($ctx:expr, $method:ident($($arg:expr),* $(,)?)) => {
        $ctx.checked(
            stringify!($method($($arg),*)),
            file!(),
            line!(),
            // SAFETY: a `Context` is only constructed over a context that the
            // caller guarantees is current for the handle's whole lifetime.
            |gl| unsafe { $crate::api::GlApi::$method(gl, $($arg),*) },
        )
    };
}
pub(crate) use gl_call;

/// What a checked call does when the driver raises an error flag.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CheckMode {
    /// Panic with the formatted [`GlError`]. Default in debug builds.
    Abort,
    /// Log the [`GlError`] at `error` level and carry on. Default in release
    /// builds.
    Log,
    /// Skip `glGetError` entirely.
    Off,
}

impl Default for CheckMode {
    fn default() -> Self {
        if cfg!(debug_assertions) {
            Self::Abort
        } else {
            Self::Log
        }
    }
}

struct Inner<G> {
    gl: G,
    checks: CheckMode,
}

/// A handle to the current GL context.
///
/// Cloning is cheap (reference counted). The handle is deliberately `!Send`:
/// GL binding state belongs to the thread the context is current on, so every
/// resource created from it stays on that thread too.
pub struct Context<G: GlApi = glow::Context> {
    inner: Rc<Inner<G>>,
}

impl<G: GlApi> Clone for Context<G> {
    fn clone(&self) -> Self {
        Self {
            inner: Rc::clone(&self.inner),
        }
    }
}

impl<G: GlApi> Context<G> {
    /// Wrap `gl` using the build's default [`CheckMode`].
    ///
    /// # Safety
    ///
    /// `gl` must be current on this thread, and must stay current for as long
    /// as this handle, any clone of it, or any resource created from it is
    /// alive.
    pub unsafe fn new(gl: G) -> Self {
        unsafe { Self::with_checks(gl, CheckMode::default()) }
    }

    /// Wrap `gl` with an explicit [`CheckMode`].
    ///
    /// # Safety
    ///
    /// Same contract as [`new`](Self::new).
    pub unsafe fn with_checks(gl: G, checks: CheckMode) -> Self {
        Self {
            inner: Rc::new(Inner { gl, checks }),
        }
    }

    /// The wrapped API object.
    #[must_use]
    pub fn gl(&self) -> &G {
        &self.inner.gl
    }

    /// How raised error flags are handled.
    #[must_use]
    pub fn checks(&self) -> CheckMode {
        self.inner.checks
    }

    /// The driver's `GL_VERSION` string.
    #[must_use]
    pub fn version(&self) -> String {
        gl_call!(self, get_parameter_string(glow::VERSION))
    }

    /// Read the error flag left by the most recent call.
    ///
    /// Returns the first pending error and discards any further flags, so the
    /// next call starts from a clean state.
    ///
    /// # Errors
    ///
    /// Returns a [`GlError`] tagged with `call`, `file` and `line` if any flag
    /// was set.
    pub fn check(&self, call: &str, file: &'static str, line: u32) -> Result<(), GlError> {
        // SAFETY: see `Context::new`.
        let code = unsafe { self.inner.gl.get_error() };
        if code == glow::NO_ERROR {
            return Ok(());
        }
        self.drain_errors();
        Err(GlError {
            code,
            call: call.to_owned(),
            file,
            line,
        })
    }

    /// Run `f` between an error drain and an error check.
    ///
    /// Prefer [`gl_call!`], which fills in `call`, `file` and `line`.
    ///
    /// # Panics
    ///
    /// Panics if `f` raises a GL error flag and the mode is
    /// [`CheckMode::Abort`].
    pub fn checked<T>(
        &self,
        call: &str,
        file: &'static str,
        line: u32,
        f: impl FnOnce(&G) -> T,
    ) -> T {
        let checks = self.inner.checks;
        if checks == CheckMode::Off {
            return f(&self.inner.gl);
        }

        self.drain_errors();
        let out = f(&self.inner.gl);

        if let Err(err) = self.check(call, file, line) {
            match checks {
                CheckMode::Abort => panic!("{err}"),
                CheckMode::Log => log::error!("{err}"),
                CheckMode::Off => {}
            }
        }
        out
    }

    /// Discard pending error flags so they are not blamed on the next call.
    fn drain_errors(&self) {
        for _ in 0..MAX_DRAIN {
            // SAFETY: see `Context::new`.
            let code = unsafe { self.inner.gl.get_error() };
            if code == glow::NO_ERROR {
                return;
            }
            log::trace!("discarding stale GL error {code:#06x}");
        }
    }
}
