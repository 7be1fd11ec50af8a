//! Message text to HTML.
//!
//! Assistant answers are markdown from a trusted backend. User text is shown
//! literally.

use crate::message::{Message, Sender};
use pulldown_cmark::{Options, Parser, html};

/// Renders markdown to HTML with tables and strikethrough enabled.
#[must_use]
pub fn render_markdown(text: &str) -> String {
    let mut options = Options::empty();
    options.insert(Options::ENABLE_TABLES);
    options.insert(Options::ENABLE_STRIKETHROUGH);

    let parser = Parser::new_ext(text, options);
    let mut out = String::with_capacity(text.len() * 3 / 2);
    html::push_html(&mut out, parser);
    out
}

/// A message body ready for display.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MessageBody {
    /// Rendered HTML, to be inserted as markup.
    Html(String),
    /// Literal text, to be inserted as a text node.
    Text(String),
}

/// Renders a message body according to who sent it.
///
/// Only assistant answers go through markdown. User text is returned
/// untouched for the view to insert as text.
#[must_use]
pub fn render_message(message: &Message) -> MessageBody {
    match message.sender() {
        Sender::Assistant => MessageBody::Html(render_markdown(message.text())),
        Sender::User => MessageBody::Text(message.text().to_string()),
    }
}
