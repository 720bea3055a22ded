use anyhow::Result;
use console::style;

use heron::store::endpoint::EndpointStore;
use heron::store::local::LocalStore;

/// Save the agent API base URL. The value is normalized here and validated
/// on the next send, not at save time.
pub fn handle_configure(url: Option<String>) -> Result<()> {
    cliclack::intro(style(" configure-heron ").on_cyan().black())?;

    let raw: String = match url {
        Some(url) => url,
        None => cliclack::input("Base URL of the agent API:")
            .placeholder("https://your-api-url.com")
            .interact()?,
    };

    let store = EndpointStore::new(LocalStore::open_default()?);
    let saved = store.set(&raw)?;

    cliclack::outro(format!("API base URL set to {}", saved))?;
    Ok(())
}
