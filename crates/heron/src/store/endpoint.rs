use anyhow::Result;

use crate::store::local::LocalStore;

pub const BASE_URL_KEY: &str = "api_base_url";

/// Process-wide endpoint configuration: the single base URL the protocol
/// client targets, read back on every call.
///
/// `set` only normalizes. Scheme validation happens in the client at call
/// time, so an invalid value can be stored and will surface as a
/// configuration error on the next send.
#[derive(Debug, Clone)]
pub struct EndpointStore {
    store: LocalStore,
}

impl EndpointStore {
    pub fn new(store: LocalStore) -> Self {
        EndpointStore { store }
    }

    pub fn get(&self) -> Option<String> {
        match self.store.read(BASE_URL_KEY) {
            Ok(value) => value.filter(|v| !v.trim().is_empty()),
            Err(e) => {
                tracing::warn!("failed to read endpoint configuration: {}", e);
                None
            }
        }
    }

    /// Trim whitespace, strip exactly one trailing `/`, persist, and return
    /// the normalized value.
    pub fn set(&self, raw: &str) -> Result<String> {
        let mut cleaned = raw.trim().to_string();
        if cleaned.ends_with('/') {
            cleaned.pop();
        }
        self.store.write(BASE_URL_KEY, &cleaned)?;
        Ok(cleaned)
    }
}
