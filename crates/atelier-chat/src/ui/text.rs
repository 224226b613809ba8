//! Text utilities for terminal rendering.

use unicode_width::UnicodeWidthChar;

/// Wrap text with an indent prefix on every line, breaking at spaces where
/// possible. Widths are measured in terminal columns.
pub fn wrap_indented(text: &str, width: usize, indent: &str) -> Vec<String> {
    let indent_width: usize = indent.chars().map(char_width).sum();
    let effective_width = width.saturating_sub(indent_width);

    if effective_width == 0 {
        return vec![format!("{indent}{text}")];
    }

    let mut lines = Vec::new();

    for line in text.lines() {
        let mut current = String::new();
        let mut current_width = 0;
        let mut last_space: Option<usize> = None;

        for ch in line.chars() {
            let w = char_width(ch);

            if current_width + w > effective_width && !current.is_empty() {
                // Break at the last space if there is one, else mid-word
                let rest = match last_space {
                    Some(at) => {
                        let rest = current[at + 1..].to_string();
                        current.truncate(at);
                        rest
                    }
                    None => String::new(),
                };
                lines.push(format!("{indent}{}", current.trim_end()));
                current = rest;
                current_width = current.chars().map(char_width).sum();
                last_space = None;
            }

            if ch == ' ' && current.is_empty() {
                continue;
            }
            if ch == ' ' {
                last_space = Some(current.len());
            }
            current.push(ch);
            current_width += w;
        }

        lines.push(format!("{indent}{}", current.trim_end()));
    }

    if lines.is_empty() {
        lines.push(indent.to_string());
    }

    lines
}

/// Truncate a string to fit within a given width, adding ellipsis if needed.
pub fn truncate(text: &str, max_width: usize) -> String {
    if max_width < 3 {
        return text.chars().take(max_width).collect();
    }

    let total: usize = text.chars().map(char_width).sum();
    if total <= max_width {
        return text.to_string();
    }

    let mut width = 0;
    let mut result = String::new();

    for ch in text.chars() {
        let w = char_width(ch);
        if width + w > max_width - 3 {
            break;
        }
        result.push(ch);
        width += w;
    }
    result.push_str("...");
    result
}

fn char_width(ch: char) -> usize {
    UnicodeWidthChar::width(ch).unwrap_or(1)
}
