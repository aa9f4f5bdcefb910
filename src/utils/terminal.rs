//! Make stored text safe to print on one terminal line
//!
//! Session summaries are free text written by people and tools; escape
//! sequences in them must not reach the terminal.

use std::sync::LazyLock;

use regex::Regex;

/// CSI sequences (`ESC [ ... letter`) and OSC sequences (`ESC ] ... BEL`)
static ESCAPE_SEQUENCE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\x1b\[[0-9;?]*[A-Za-z]|\x1b\][^\x07]*\x07").expect("valid escape sequence regex")
});

/// Strip escape sequences and control characters, fold whitespace onto one
/// line and cut to `max_chars` characters
pub fn sanitize_for_display(text: &str, max_chars: usize) -> String {
    let stripped = ESCAPE_SEQUENCE.replace_all(text, "");
    let single_line: String = stripped
        .split_whitespace()
        .map(|word| word.chars().filter(|c| !c.is_control()).collect::<String>())
        .filter(|word| !word.is_empty())
        .collect::<Vec<_>>()
        .join(" ");
    truncate_chars(&single_line, max_chars)
}

/// First `max_chars` characters of `text`, with `...` appended when cut
pub fn truncate_chars(text: &str, max_chars: usize) -> String {
    match text.char_indices().nth(max_chars) {
        Some((byte_index, _)) => format!("{}...", &text[..byte_index]),
        None => text.to_string(),
    }
}
