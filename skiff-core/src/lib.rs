pub mod conf;
pub mod ctx;
pub mod files;
pub mod logging;
pub mod plugin;
pub mod server;
