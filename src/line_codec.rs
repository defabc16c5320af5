/*!
 * Line codec for the side-car text file.
 *
 * Every label occupies exactly one line of the text file, so embedded line
 * feeds in a label's text are written as the two characters `\` and `n`.
 * The transform is one-way: translated lines are injected verbatim and a
 * literal `\n` in a translation is never turned back into a line feed.
 */

/// Replace each line feed in `text` with a literal backslash-n.
pub fn escape(text: &str) -> String {
    text.replace('\n', "\\n")
}

/// Join lines into file content, each entry followed by one line feed.
pub fn join_lines<I, S>(lines: I) -> String
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut content = String::new();
    for line in lines {
        content.push_str(line.as_ref());
        content.push('\n');
    }
    content
}

/// Split decoded file content into lines.
///
/// Lines end at `\n`, with one trailing `\r` stripped so CRLF files from
/// other editors line up. That includes a last line ending in a bare `\r`.
/// The final terminator does not produce an extra empty line, but empty
/// lines in the middle are kept as empty entries.
pub fn split_lines(content: &str) -> Vec<String> {
    content
        .lines()
        .map(|line| line.strip_suffix('\r').unwrap_or(line).to_string())
        .collect()
}
