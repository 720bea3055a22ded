use anyhow::Result;
use cliclack::{input, spinner};

use heron::models::message::Message;

use super::{classify, print_message, ChatView, Input};

/// Compact presentation: messages print incrementally as turns settle, the
/// way the floating widget tails the conversation.
pub struct WidgetView {
    spinner: cliclack::ProgressBar,
    rendered: usize,
}

impl WidgetView {
    pub fn new() -> Self {
        WidgetView {
            spinner: spinner(),
            rendered: 0,
        }
    }
}

impl ChatView for WidgetView {
    fn render(&mut self, messages: &[Message]) {
        if self.rendered > messages.len() {
            // The log shrank, so history was cleared; restart the tail.
            self.rendered = 0;
        }
        for message in &messages[self.rendered..] {
            print_message(message);
        }
        self.rendered = messages.len();
    }

    fn get_input(&mut self) -> Result<Input> {
        let text: String = input("Message: [Help: /?]").placeholder("").interact()?;
        Ok(classify(&text))
    }

    fn show_busy(&mut self) {
        self.spinner = spinner();
        self.spinner.start("awaiting reply");
    }

    fn hide_busy(&self) {
        self.spinner.stop("");
    }

    fn close(&self) {
        // No cleanup required
    }
}
