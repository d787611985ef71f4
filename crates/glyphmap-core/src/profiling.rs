//! Profiling utilities based on the `puffin` crate.
//!
//! Scopes are always compiled in; they cost a single atomic load while
//! `puffin::set_scopes_on(false)` (the default).

pub use puffin::{GlobalProfiler, profile_function, profile_scope};

/// Turn scope recording on or off.
pub fn set_enabled(enabled: bool) {
    puffin::set_scopes_on(enabled);
}

/// Mark the start of a new frame for profiling.
///
/// Call this once per rendered frame so scopes are grouped by frame.
#[inline]
pub fn new_frame() {
    puffin::GlobalProfiler::lock().new_frame();
}

#[cfg(feature = "profiling")]
mod server {
    use std::sync::OnceLock;

    static PROFILING_SERVER: OnceLock<puffin_http::Server> = OnceLock::new();

    /// Default address for the puffin viewer to connect to.
    pub const DEFAULT_ADDR: &str = "0.0.0.0:8585";

    /// Enable scopes and start a `puffin_http` server on `addr`.
    ///
    /// # Example
    /// ```no_run
    /// glyphmap_core::profiling::init_profiling(glyphmap_core::profiling::DEFAULT_ADDR);
    /// ```
    pub fn init_profiling(addr: &str) {
        puffin::set_scopes_on(true);

        match puffin_http::Server::new(addr) {
            Ok(server) => {
                tracing::info!("Puffin profiler server started on http://{}", addr);
                let _ = PROFILING_SERVER.set(server);
            }
            Err(e) => {
                tracing::error!("Failed to start puffin server: {}", e);
            }
        }
    }
}

#[cfg(feature = "profiling")]
pub use server::{DEFAULT_ADDR, init_profiling};
