mod listing;
mod resolve;
mod revalidate;
mod serve;

pub use revalidate::Validators;
pub use serve::{ServedFile, serve_path};
