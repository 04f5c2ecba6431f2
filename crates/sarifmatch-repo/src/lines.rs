use camino::Utf8Path;
use std::io;

/// Split text into lines the way a universal-newline text reader does.
///
/// `\r\n` and lone `\r` become `\n`; every line keeps its terminator except a
/// final line without one.
pub fn split_lines(text: &str) -> Vec<String> {
    let mut lines = Vec::new();
    let mut current = String::new();
    let mut chars = text.chars().peekable();

    while let Some(c) = chars.next() {
        match c {
            '\r' | '\n' => {
                if c == '\r' && chars.peek() == Some(&'\n') {
                    chars.next();
                }
                current.push('\n');
                lines.push(std::mem::take(&mut current));
            }
            _ => current.push(c),
        }
    }
    if !current.is_empty() {
        lines.push(current);
    }

    lines
}

/// Read a UTF-8 file as lines. Invalid UTF-8 is an `InvalidData` error.
pub fn read_lines_from_file(path: &Utf8Path) -> io::Result<Vec<String>> {
    let bytes = std::fs::read(path)?;
    let text =
        String::from_utf8(bytes).map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;
    Ok(split_lines(&text))
}
