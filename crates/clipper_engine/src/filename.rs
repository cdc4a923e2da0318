/// Note filename for an item title: `{sanitized_title}.md`.
pub fn note_filename(title: &str) -> String {
    format!("{}.md", sanitize_title(title))
}

/// Makes a title safe for filenames and note links.
///
/// Line breaks, backslashes and slashes become spaces, colons become
/// hyphens, and `^ [ ] # |` are stripped. Whitespace runs collapse to one
/// space, the result is trimmed and cut at 100 characters. The function is
/// idempotent: sanitizing an already-sanitized title changes nothing.
pub fn sanitize_title(title: &str) -> String {
    let mut cleaned = String::with_capacity(title.len());
    for c in title.chars() {
        match c {
            '\r' | '\n' => cleaned.push(' '),
            ':' => cleaned.push('-'),
            '\\' | '/' => cleaned.push(' '),
            '^' | '[' | ']' | '#' | '|' => {}
            other => cleaned.push(other),
        }
    }

    // Collapse whitespace runs into single spaces.
    let mut compacted = String::with_capacity(cleaned.len());
    let mut prev_space = false;
    for c in cleaned.chars() {
        if c.is_whitespace() {
            if !prev_space {
                compacted.push(' ');
            }
            prev_space = true;
        } else {
            compacted.push(c);
            prev_space = false;
        }
    }

    let truncated: String = compacted.trim().chars().take(100).collect();
    // Trim again in case the cut landed just after a space; without this a
    // second pass would produce a different result.
    let final_name = truncated.trim_end();
    if final_name.is_empty() {
        "untitled".to_string()
    } else {
        final_name.to_string()
    }
}
