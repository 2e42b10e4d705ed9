//! Text wrapping for message bubbles.

use unicode_width::UnicodeWidthStr;

/// Wrap a plain text string to the specified width.
/// Returns a vector of wrapped lines; never empty.
pub fn wrap_text(text: &str, width: usize) -> Vec<String> {
    if width == 0 {
        return vec![text.to_string()];
    }
    let lines: Vec<String> = textwrap::wrap(text, width)
        .into_iter()
        .map(std::borrow::Cow::into_owned)
        .collect();
    if lines.is_empty() {
        vec![String::new()]
    } else {
        lines
    }
}

/// Widest line in columns.
pub fn max_width(lines: &[String]) -> usize {
    lines.iter().map(|l| l.width()).max().unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wrap_text_short() {
        let lines = wrap_text("Hello", 10);
        assert_eq!(lines, vec!["Hello"]);
    }

    #[test]
    fn test_wrap_text_long() {
        let lines = wrap_text("Hello world this is a long line", 10);
        assert!(lines.len() > 1);
        for line in &lines {
            assert!(line.chars().count() <= 10);
        }
    }

    #[test]
    fn test_wrap_text_empty() {
        assert_eq!(wrap_text("", 10), vec![String::new()]);
    }

    #[test]
    fn test_wrap_text_unicode() {
        let text = "Great question about taxes! 📊 Our tax experts recommend staying updated";
        let lines = wrap_text(text, 15);
        assert!(lines.len() > 1);
        let rejoined: String = lines.join(" ");
        assert!(rejoined.contains("📊"));
        assert!(max_width(&lines) <= 15);
    }

    #[test]
    fn test_max_width_counts_columns() {
        let lines = vec!["ab".to_string(), "📈x".to_string()];
        assert_eq!(max_width(&lines), 3);
        assert_eq!(max_width(&[]), 0);
    }
}
