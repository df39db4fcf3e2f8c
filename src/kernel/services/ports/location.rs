use thiserror::Error;

/// Query parameter carrying the id of a shared workspace.
pub const SHARE_ID_PARAM: &str = "id";

/// The current page address, as far as the shell needs it.
pub trait PageLocation {
    fn query_param(&self, name: &str) -> Option<String>;

    fn set_query_param(&mut self, name: &str, value: &str);

    fn href(&self) -> String;
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ClipboardError {
    #[error("failed to write clipboard: {0}")]
    SetFailed(String),
}

pub trait ClipboardPort {
    fn set_text(&mut self, text: &str) -> Result<(), ClipboardError>;
}
