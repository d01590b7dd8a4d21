//! Thread and runtime plumbing shared across resink crates.
//!
//! The crate hosts one lazily-initialized tokio runtime. It only drives
//! response timeouts for [`run_loop`] calls; loop tasks themselves always
//! execute on their own dedicated OS threads.

use std::future::Future;
use std::sync::OnceLock;

use tokio::runtime::{Builder, Runtime};

pub mod run_loop;

fn runtime() -> &'static Runtime {
    static RUNTIME: OnceLock<Runtime> = OnceLock::new();
    RUNTIME.get_or_init(|| {
        Builder::new_multi_thread()
            .enable_all()
            .thread_name("resink-runtime")
            .build()
            .expect("failed to build shared tokio runtime")
    })
}

/// Blocks the calling thread on a future using the shared runtime.
///
/// Must not be called from inside the shared runtime itself.
pub fn block_on<F: Future>(future: F) -> F::Output {
    runtime().block_on(future)
}
