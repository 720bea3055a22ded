use anyhow::Result;
use console::style;

use heron::models::message::Message;
use heron::render::render;

pub mod page;
pub mod widget;

/// A presentation of the conversation. The widget and page views differ only
/// in layout; turn-taking, persistence, and the protocol all live behind the
/// shared controller.
pub trait ChatView {
    /// Draw the log after a mutation. Views receive the full log every time
    /// and decide how much of it to repaint.
    fn render(&mut self, messages: &[Message]);
    fn get_input(&mut self) -> Result<Input>;
    fn show_busy(&mut self);
    fn hide_busy(&self);
    fn close(&self);
}

pub struct Input {
    pub input_type: InputType,
    pub content: Option<String>,
}

pub enum InputType {
    AskAgain,     // Ask the user for input again. Control flow command.
    Message,      // User sent a message
    ClearHistory, // User wants to reset the conversation
    Exit,         // User wants to exit the session
}

/// Map one line of input to a session action, shared by both views.
pub fn classify(text: &str) -> Input {
    let trimmed = text.trim();

    if trimmed.eq_ignore_ascii_case("/exit") || trimmed.eq_ignore_ascii_case("/quit") {
        Input {
            input_type: InputType::Exit,
            content: None,
        }
    } else if trimmed.eq_ignore_ascii_case("/clear") {
        Input {
            input_type: InputType::ClearHistory,
            content: None,
        }
    } else if trimmed.eq_ignore_ascii_case("/?") || trimmed.eq_ignore_ascii_case("/help") {
        print_help();
        Input {
            input_type: InputType::AskAgain,
            content: None,
        }
    } else {
        Input {
            input_type: InputType::Message,
            content: Some(trimmed.to_string()),
        }
    }
}

fn print_help() {
    println!("Commands:");
    println!("/clear - Reset the conversation history");
    println!("/exit - Exit the session");
    println!("/? | /help - Display this help message");
}

/// Print one finalized message: speaker and time, the formatted body, and
/// any chart or image attachment.
pub fn print_message(message: &Message) {
    if message.is_loading {
        return;
    }

    let content = render(message);
    let speaker = if message.is_user {
        style("you").cyan().bold()
    } else {
        style("assistant").magenta().bold()
    };

    println!("{} {}", speaker, style(format!("({})", content.time)).dim());
    println!("{}", content.body);
    if let Some(chart) = content.chart {
        println!("{}", chart);
    }
    if let Some(image) = content.image {
        println!("{}", style(image).dim());
    }
    println!();
}
