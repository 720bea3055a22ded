pub mod chart;
pub mod markup;

use base64::engine::general_purpose::STANDARD;
use base64::Engine;

use crate::models::message::Message;

/// Inert, display-only rendition of one message. Views decide layout; none
/// of these parts carry behavior.
#[derive(Debug, Clone, PartialEq)]
pub struct DisplayContent {
    pub body: String,
    pub chart: Option<String>,
    pub image: Option<String>,
    pub time: String,
}

/// Turn one message into display content. Pure; no I/O, no mutation.
pub fn render(message: &Message) -> DisplayContent {
    DisplayContent {
        body: markup::format_text(&message.text),
        chart: message.plots.as_ref().and_then(chart::render_chart),
        image: message.encoded_image.as_deref().map(describe_image),
        time: message.timestamp.format("%H:%M").to_string(),
    }
}

/// Summarize an inline-encoded image as an attachment line. The payload is
/// never fetched or post-processed; a payload that does not decode still
/// renders, just without a size.
fn describe_image(encoded: &str) -> String {
    let media_type = encoded
        .strip_prefix("data:")
        .and_then(|rest| rest.split(';').next())
        .filter(|m| !m.is_empty())
        .unwrap_or("image");

    match encoded
        .rsplit_once("base64,")
        .and_then(|(_, data)| STANDARD.decode(data.trim()).ok())
    {
        Some(raw) => format!("[{} attachment, {} bytes]", media_type, raw.len()),
        None => format!("[{} attachment]", media_type),
    }
}
