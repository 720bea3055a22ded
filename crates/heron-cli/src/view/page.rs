use anyhow::Result;
use cliclack::spinner;
use console::{style, Term};

use heron::models::message::Message;

use super::{classify, print_message, ChatView, Input, InputType};

const PROMPT: &str = "\x1b[1m\x1b[38;5;61mheron> \x1b[0m";

/// Full-page presentation: the whole transcript is repainted on every log
/// mutation under a header bar, with rustyline handling the input line.
pub struct PageView {
    spinner: cliclack::ProgressBar,
    term: Term,
}

impl PageView {
    pub fn new() -> Self {
        PageView {
            spinner: spinner(),
            term: Term::stdout(),
        }
    }
}

impl ChatView for PageView {
    fn render(&mut self, messages: &[Message]) {
        let _ = self.term.clear_screen();
        println!("{}", style(" Chat Assistant ").on_magenta().black());
        println!();
        for message in messages {
            print_message(message);
        }
    }

    fn get_input(&mut self) -> Result<Input> {
        let mut editor = rustyline::DefaultEditor::new()?;
        let text = match editor.readline(PROMPT) {
            Ok(text) => text,
            Err(e) => {
                match e {
                    rustyline::error::ReadlineError::Interrupted => (),
                    _ => eprintln!("Input error: {}", e),
                }
                return Ok(Input {
                    input_type: InputType::Exit,
                    content: None,
                });
            }
        };
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
