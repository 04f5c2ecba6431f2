/// Render one resolved span as a single descriptive line.
///
/// Format: `<path>::<start_line>::<end_line> <start_column-1>-><end_column> = <text>`.
/// Downstream tooling greps for this shape, so it must not change.
pub fn format_snippet_line(
    path: &str,
    start_line: u32,
    end_line: u32,
    start_column: u32,
    end_column: u32,
    text: &str,
) -> String {
    format!(
        "{}::{}::{} {}->{} = {}",
        path,
        start_line,
        end_line,
        start_column.saturating_sub(1),
        end_column,
        text
    )
}
