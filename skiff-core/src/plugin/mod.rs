pub mod builtin;
pub mod errors;
pub mod pipeline;
pub mod registry;
pub mod result;

use self::errors::PluginError;
pub use self::result::PluginResult;
use crate::ctx::{RequestCtx, ResponseCtx};

/// A processing hook in the dev-server request pipeline.
///
/// Plugins can inspect and modify requests before a file is resolved, and
/// responses before they are sent. Each plugin must be both Send and Sync to
/// ensure thread-safety in the async runtime.
///
/// All methods provide default implementations that simply continue the
/// pipeline, allowing implementations to override only the hooks they care
/// about.
pub trait Plugin: Send + Sync {
    /// Called when a request is received, before path resolution.
    fn on_request(&self, _ctx: &mut RequestCtx) -> PluginResult {
        PluginResult::Continue
    }

    /// Called after a response has been produced and before any of it is
    /// written to the client; header and status edits take effect.
    fn on_response(&self, _ctx: &mut ResponseCtx) -> PluginResult {
        PluginResult::Continue
    }

    /// Called when an error occurs during request processing.
    fn on_error(&self, _err: &PluginError) {}
}
