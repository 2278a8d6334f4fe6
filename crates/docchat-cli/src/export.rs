//! Transcript export as a standalone HTML document.

use std::fs;
use std::path::Path;

use docchat_core::error::Result;
use docchat_core::format::{escape_html, format_answer};
use docchat_core::session::{ChatMessage, MessageRole};

use crate::prefs::Theme;

/// Writes the transcript to `path` as a self-contained HTML page.
///
/// Formatted assistant messages go through the answer formatter; everything
/// else is escaped as plain text. Escaping happens exactly once per message,
/// at render time.
pub fn write_html(path: &Path, messages: &[ChatMessage], theme: Theme) -> Result<()> {
    fs::write(path, render_html(messages, theme))?;
    Ok(())
}

fn render_html(messages: &[ChatMessage], theme: Theme) -> String {
    let (background, foreground) = match theme {
        Theme::Light => ("#ffffff", "#212529"),
        Theme::Dark => ("#1e1e2e", "#e9ecef"),
    };

    let mut body = String::new();
    for message in messages {
        let class = match message.role {
            MessageRole::User => "user-message",
            MessageRole::Assistant => "assistant-message",
        };
        let content = if message.formatted {
            format_answer(&message.text)
        } else {
            format!("<p>{}</p>", escape_html(&message.text))
        };
        body.push_str(&format!("<div class=\"message {class}\">{content}</div>\n"));
    }

    format!(
        "<!DOCTYPE html>\n<html>\n<head>\n<meta charset=\"utf-8\">\n<title>docchat transcript</title>\n<style>\n\
         body {{ font-family: sans-serif; max-width: 48rem; margin: 2rem auto; background: {background}; color: {foreground}; }}\n\
         .message {{ padding: 0.5rem 1rem; margin: 0.5rem 0; border-radius: 0.5rem; }}\n\
         .user-message {{ background: rgba(67, 97, 238, 0.15); }}\n\
         .assistant-message {{ background: rgba(128, 128, 128, 0.15); }}\n\
         pre {{ overflow-x: auto; padding: 0.5rem; background: rgba(0, 0, 0, 0.25); }}\n\
         </style>\n</head>\n<body>\n{body}</body>\n</html>\n"
    )
}
