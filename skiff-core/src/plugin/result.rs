use crate::ctx::ResponseCtx;
use crate::plugin::errors::PluginError;

#[derive(Debug)]
pub enum PluginResult {
    /// Continue to the next plugin / next phase
    Continue,

    /// Stop the pipeline and immediately return this response to the client
    Respond(ResponseCtx),

    /// Error that should invoke on_error handlers
    Error(PluginError),
}
