//! Isolates the frontmatter block at the top of a note.

/// The fence line opening and closing a frontmatter block.
pub const FENCE: &str = "---";

const BOM: char = '\u{feff}';

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HeaderStatus {
    /// The text does not begin with the fence. Nothing downstream is validated.
    Missing,
    /// A complete `---` ... `---` block was found.
    Closed,
    /// The opening fence has no matching closing fence. The rest of the note is treated as
    /// header text so parsing can continue.
    Unclosed,
}

/// Result of splitting a note into its frontmatter block and body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeaderExtract<'a> {
    pub status: HeaderStatus,
    /// Text between the fences, without the fence lines themselves.
    pub header: &'a str,
    /// Everything after the closing fence line.
    pub body: &'a str,
    /// 1-based line number of the first header line.
    pub header_line: usize,
    /// 1-based line number of the first body line.
    pub body_line: usize,
}

impl<'a> HeaderExtract<'a> {
    /// Whether a header block was found at all, closed or not.
    pub fn found(&self) -> bool {
        self.status != HeaderStatus::Missing
    }
}

/// Split `text` into `(header, body)`.
///
/// A header exists only when the first line is exactly the fence (a leading byte-order mark and
/// trailing whitespace are tolerated). The block ends at the next line consisting solely of the
/// fence.
pub fn extract_header(text: &str) -> HeaderExtract<'_> {
    let missing = HeaderExtract {
        status: HeaderStatus::Missing,
        header: "",
        body: text,
        header_line: 1,
        body_line: 1,
    };

    let stripped = text.strip_prefix(BOM).unwrap_or(text);
    let offset = text.len() - stripped.len();

    let (first_line, first_len) = next_line(stripped);
    if first_line.trim_end() != FENCE {
        return missing;
    }

    let header_start = offset + first_len;
    let mut cursor = header_start;
    let mut line_no = 2;
    while cursor < text.len() {
        let (line, len) = next_line(&text[cursor..]);
        if line.trim_end() == FENCE {
            return HeaderExtract {
                status: HeaderStatus::Closed,
                header: trim_trailing_newline(&text[header_start..cursor]),
                body: &text[cursor + len..],
                header_line: 2,
                body_line: line_no + 1,
            };
        }
        cursor += len;
        line_no += 1;
    }

    tracing::debug!("frontmatter opened but never closed");
    HeaderExtract {
        status: HeaderStatus::Unclosed,
        header: &text[header_start..],
        body: "",
        header_line: 2,
        body_line: line_no,
    }
}

/// Returns the next line without its terminator, and the number of bytes consumed including
/// the terminator.
fn next_line(text: &str) -> (&str, usize) {
    match text.find('\n') {
        Some(idx) => (text[..idx].trim_end_matches('\r'), idx + 1),
        None => (text, text.len()),
    }
}

fn trim_trailing_newline(text: &str) -> &str {
    let text = text.strip_suffix('\n').unwrap_or(text);
    text.strip_suffix('\r').unwrap_or(text)
}
