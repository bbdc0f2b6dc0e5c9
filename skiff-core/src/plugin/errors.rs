use std::fmt::{Display, Formatter};

/// Represents an error that occurred inside a plugin hook.
#[derive(Debug)]
pub struct PluginError {
    /// A descriptive message explaining the error that occurred
    pub message: String,
    /// Whether the error is considered fatal and should be reported to the client
    pub fatal: bool,
}

impl Display for PluginError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let fatal = if self.fatal { "(fatal) " } else { "" };
        write!(f, "{}{}", fatal, self.message)
    }
}
