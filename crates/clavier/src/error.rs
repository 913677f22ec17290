//! Error types for parsing control names and binding tables.

/// Failed to parse a key, mouse button, combo, or control id from text.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseControlError {
    /// The text is not the name of any known key.
    #[error("unknown key: {0}")]
    UnknownKey(String),

    /// The text is not the name of any known mouse button.
    #[error("unknown mouse button: {0}")]
    UnknownButton(String),

    /// A combo contained an empty segment, e.g. `"KeyA++KeyB"` or `""`.
    #[error("empty key in combo: {0:?}")]
    EmptySegment(String),

    /// The text is neither `ordered` nor `canonical`.
    #[error("unknown combo order: {0} (expected \"ordered\" or \"canonical\")")]
    UnknownComboOrder(String),
}

/// A named binding could not be resolved.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid binding {name:?}: {source}")]
pub struct BindingError {
    /// The binding name as written in the configuration.
    pub name: String,
    /// Why its control could not be parsed.
    #[source]
    pub source: ParseControlError,
}
