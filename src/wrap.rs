//! Word wrapping for doc comments.

use textwrap::{Options, WordSeparator, WordSplitter, WrapAlgorithm};

/// Lays out comment text in lines of at most `width` characters.
///
/// Empty lines in `text` separate paragraphs and are kept as empty lines.
/// The lines of a paragraph are joined and re-wrapped at word boundaries. A
/// word longer than `width` gets a line of its own.
///
/// # Examples
///
/// ```rust
/// use sconf::wrap::comment_lines;
///
/// let lines = comment_lines("First comment.\n\n\nSecond section.\nWrapped line.", 78);
/// assert_eq!(lines, vec!["First comment.", "", "", "Second section. Wrapped line."]);
///
/// assert_eq!(comment_lines("one two three", 7), vec!["one two", "three"]);
/// ```
#[must_use]
pub fn comment_lines(text: &str, width: usize) -> Vec<String> {
    let mut lines = Vec::new();
    let mut paragraph: Vec<&str> = Vec::new();
    for line in text.lines() {
        if line.trim().is_empty() {
            flush(&mut paragraph, width, &mut lines);
            lines.push(String::new());
        } else {
            paragraph.extend(line.split_whitespace());
        }
    }
    flush(&mut paragraph, width, &mut lines);
    lines
}

fn flush(words: &mut Vec<&str>, width: usize, lines: &mut Vec<String>) {
    if words.is_empty() {
        return;
    }
    let paragraph = words.join(" ");
    words.clear();
    let options = Options::new(width)
        .break_words(false)
        .word_separator(WordSeparator::AsciiSpace)
        .word_splitter(WordSplitter::NoHyphenation)
        .wrap_algorithm(WrapAlgorithm::FirstFit);
    lines.extend(
        textwrap::wrap(&paragraph, options)
            .into_iter()
            .map(|line| line.into_owned()),
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn long_words_stand_alone() {
        let lines = comment_lines("a verylongword b", 5);
        assert_eq!(lines, vec!["a", "verylongword", "b"]);
    }

    #[test]
    fn lines_never_exceed_width() {
        let text = "The quick brown fox jumps over the lazy dog. ".repeat(10);
        for line in comment_lines(&text, 30) {
            assert!(line.chars().count() <= 30, "{:?}", line);
        }
    }

    #[test]
    fn hyphenated_words_are_not_split() {
        let lines = comment_lines("this is the A-field of a record", 14);
        assert_eq!(lines, vec!["this is the", "A-field of a", "record"]);
    }

    #[test]
    fn empty_text_has_no_lines() {
        assert!(comment_lines("", 80).is_empty());
    }

    #[test]
    fn trailing_break_keeps_paragraph() {
        assert_eq!(comment_lines("one\n", 80), vec!["one"]);
    }
}
