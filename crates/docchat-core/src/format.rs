//! Answer formatting: a small markdown subset rendered to escaped HTML.
//!
//! Supported constructs: fenced code blocks with an optional language tag,
//! inline code spans, bold, italic, and paragraph breaks on blank lines.
//! Every character that is significant to HTML is escaped exactly once
//! before any markup is inserted, so backend answers can never smuggle raw
//! markup into the rendered transcript.

use once_cell::sync::Lazy;
use regex::Regex;

static INLINE_CODE: Lazy<Regex> = Lazy::new(|| Regex::new(r"`([^`]+)`").unwrap());
static BOLD: Lazy<Regex> = Lazy::new(|| Regex::new(r"\*\*([^*]+)\*\*").unwrap());
static ITALIC: Lazy<Regex> = Lazy::new(|| Regex::new(r"\*([^*]+)\*").unwrap());

/// Escapes the five HTML-significant characters.
pub fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(ch),
        }
    }
    escaped
}

/// Renders a raw backend answer to safe HTML markup.
///
/// Fenced code blocks become `<pre><code>` regions, with the language tag
/// (when present) carried as a `language-*` class. Text outside fences is
/// split into paragraphs on blank lines, with inline code, bold, and italic
/// spans applied within each paragraph.
pub fn format_answer(raw: &str) -> String {
    let mut out = String::new();
    let mut text_lines: Vec<&str> = Vec::new();
    let mut code_lines: Vec<&str> = Vec::new();
    let mut in_code = false;
    let mut language = String::new();

    for line in raw.lines() {
        if let Some(rest) = line.trim_end().strip_prefix("```") {
            if in_code {
                render_code_block(&mut out, &language, &code_lines);
                code_lines.clear();
                in_code = false;
            } else {
                render_paragraphs(&mut out, &text_lines);
                text_lines.clear();
                language = rest.trim().to_string();
                in_code = true;
            }
        } else if in_code {
            code_lines.push(line);
        } else {
            text_lines.push(line);
        }
    }

    if in_code {
        // Unterminated fence: render what we have as a code block
        render_code_block(&mut out, &language, &code_lines);
    } else {
        render_paragraphs(&mut out, &text_lines);
    }

    out
}

fn render_code_block(out: &mut String, language: &str, lines: &[&str]) {
    if language.is_empty() {
        out.push_str("<pre><code>");
    } else {
        out.push_str(&format!(
            "<pre><code class=\"language-{}\">",
            escape_html(language)
        ));
    }
    out.push_str(&escape_html(&lines.join("\n")));
    out.push_str("</code></pre>");
}

fn render_paragraphs(out: &mut String, lines: &[&str]) {
    let mut paragraph: Vec<&str> = Vec::new();
    for line in lines {
        if line.trim().is_empty() {
            flush_paragraph(out, &paragraph);
            paragraph.clear();
        } else {
            paragraph.push(line);
        }
    }
    flush_paragraph(out, &paragraph);
}

fn flush_paragraph(out: &mut String, lines: &[&str]) {
    if lines.is_empty() {
        return;
    }
    let escaped = escape_html(&lines.join("\n"));
    let with_code = INLINE_CODE.replace_all(&escaped, "<code>$1</code>");
    let with_bold = BOLD.replace_all(&with_code, "<strong>$1</strong>");
    let with_italic = ITALIC.replace_all(&with_bold, "<em>$1</em>");
    out.push_str("<p>");
    out.push_str(&with_italic);
    out.push_str("</p>");
}
