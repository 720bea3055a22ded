use anyhow::Result;

use heron::client::AgentClient;
use heron::controller::Conversation;
use heron::store::endpoint::EndpointStore;
use heron::store::local::LocalStore;
use heron::store::session::SessionStore;

use crate::session::Session;
use crate::view::page::PageView;
use crate::view::widget::WidgetView;
use crate::view::ChatView;

/// Wire a session together: one conversation, one protocol client, and the
/// chosen presentation over the shared stores.
pub fn build_session(page: bool) -> Result<Session<'static>> {
    let store = LocalStore::open_default()?;
    let conversation = Conversation::new(SessionStore::new(store.clone()));
    let client = AgentClient::new(
        EndpointStore::new(store.clone()),
        SessionStore::new(store),
    );

    let view: Box<dyn ChatView> = if page {
        Box::new(PageView::new())
    } else {
        Box::new(WidgetView::new())
    };

    Ok(Session::new(conversation, client, view))
}
