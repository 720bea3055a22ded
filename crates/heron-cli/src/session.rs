use anyhow::Result;

use heron::client::AgentClient;
use heron::controller::Conversation;

use crate::inputs::get_confirm;
use crate::view::{ChatView, InputType};

/// Interactive session loop: read input, drive one turn at a time through
/// the controller, and let the view repaint after every log mutation.
pub struct Session<'a> {
    conversation: Conversation,
    client: AgentClient,
    view: Box<dyn ChatView + 'a>,
}

impl<'a> Session<'a> {
    pub fn new(
        conversation: Conversation,
        client: AgentClient,
        view: Box<dyn ChatView + 'a>,
    ) -> Self {
        Session {
            conversation,
            client,
            view,
        }
    }

    pub async fn start(&mut self) -> Result<()> {
        self.view.render(self.conversation.messages());

        loop {
            let input = self.view.get_input()?;
            match input.input_type {
                InputType::Message => {
                    let Some(content) = input.content else { continue };
                    self.view.show_busy();
                    let _ = self.conversation.run_turn(&self.client, &content).await;
                    self.view.hide_busy();
                    self.view.render(self.conversation.messages());
                }
                InputType::ClearHistory => {
                    if get_confirm("Are you sure you want to clear the chat history?") {
                        self.conversation.clear_history();
                        self.view.render(self.conversation.messages());
                    }
                }
                InputType::AskAgain => continue,
                InputType::Exit => break,
            }
        }

        self.view.close();
        Ok(())
    }
}
