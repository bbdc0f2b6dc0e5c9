use super::{Plugin, PluginResult};
use crate::ctx::{RequestCtx, ResponseCtx};
use std::sync::Arc;

pub struct PluginPipeline;

impl PluginPipeline {
    pub fn run_on_request(plugins: &[Arc<dyn Plugin>], ctx: &mut RequestCtx) -> PluginResult {
        for plugin in plugins {
            match plugin.on_request(ctx) {
                PluginResult::Continue => continue,
                r @ PluginResult::Respond(_) => return r,
                PluginResult::Error(err) => {
                    plugin.on_error(&err);
                    return PluginResult::Error(err);
                }
            }
        }
        PluginResult::Continue
    }

    pub fn run_on_response(plugins: &[Arc<dyn Plugin>], ctx: &mut ResponseCtx) -> PluginResult {
        for plugin in plugins {
            match plugin.on_response(ctx) {
                PluginResult::Continue => continue,
                r @ PluginResult::Respond(_) => return r,
                PluginResult::Error(err) => {
                    plugin.on_error(&err);
                    return PluginResult::Error(err);
                }
            }
        }
        PluginResult::Continue
    }
}
