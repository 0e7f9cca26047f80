//! Line-oriented requirements files.

/// Requirement lines of a `requirements.txt`, in order.
///
/// Blank lines, full-line comments and option lines (`-r other.txt`,
/// `-e .`, `--index-url ...`) are skipped, and per-requirement options
/// such as `--hash=...` are cut from the line. A trailing backslash joins
/// the next line.
pub fn read_requirement_lines(text: &str) -> Vec<String> {
    let mut lines = Vec::new();
    let mut pending = String::new();

    for raw in text.lines() {
        let line = raw.trim_end();
        if let Some(head) = line.strip_suffix('\\') {
            pending.push_str(head);
            pending.push(' ');
            continue;
        }
        pending.push_str(line);
        let joined = std::mem::take(&mut pending);
        if let Some(requirement) = requirement_line(&joined) {
            lines.push(requirement);
        }
    }
    if let Some(requirement) = requirement_line(&pending) {
        lines.push(requirement);
    }

    lines
}

fn requirement_line(line: &str) -> Option<String> {
    let trimmed = line.trim();
    if trimmed.is_empty() || trimmed.starts_with('#') || trimmed.starts_with('-') {
        return None;
    }
    let requirement = trimmed
        .match_indices("--")
        .find(|(at, _)| trimmed[..*at].ends_with(char::is_whitespace))
        .map_or(trimmed, |(at, _)| trimmed[..at].trim_end());
    Some(requirement.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn skips_blanks_comments_and_options() {
        let text = "\
# runtime
flask>=1.0

-r dev.txt
--index-url https://example.invalid/simple
-e .
requests  # http client
";
        assert_eq!(
            read_requirement_lines(text),
            vec!["flask>=1.0", "requests  # http client"]
        );
    }

    #[test]
    fn joins_continuation_lines() {
        let text = "django>=3.2,\\\n    <5.0\nattrs";
        assert_eq!(
            read_requirement_lines(text),
            vec!["django>=3.2,     <5.0", "attrs"]
        );
    }

    #[test]
    fn per_requirement_options_are_cut() {
        let text = "flask==2.0.0 \\
    --hash=sha256:abc \\
    --hash=sha256:def
attrs --no-binary attrs";
        let lines = read_requirement_lines(text);
        assert_eq!(lines, vec!["flask==2.0.0", "attrs"]);

        let pinned = crate::requirements::Requirement::parse(&lines[0]).unwrap();
        assert_eq!(pinned.constraints().len(), 1);
    }

    #[test]
    fn trailing_continuation_is_kept() {
        assert_eq!(read_requirement_lines("six\\"), vec!["six"]);
    }

    #[test]
    fn empty_file_has_no_requirements() {
        assert!(read_requirement_lines("").is_empty());
    }
}
