//! Certificate entity.

use serde::Serialize;

/// A certificate and its key file.
///
/// The two paths may come from separate source blocks and are merged
/// by name.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Certificate {
    pub name: String,
    pub cert_file: Option<String>,
    pub key_file: Option<String>,
}

impl Certificate {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Whether both the certificate and the key are known.
    pub fn is_complete(&self) -> bool {
        self.cert_file.is_some() && self.key_file.is_some()
    }
}
