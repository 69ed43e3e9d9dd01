use crashline_types::{RawFrame, StackFrameEntry};
use std::fs::File;
use std::io::{BufRead, BufReader};

/// Convert one raw stack entry into a normalized frame.
///
/// The source line is looked up best-effort from the frame's file unless the
/// raw frame already carries one; any failure (unreadable file, line out of
/// range) degrades to an empty source line. Same input, same output.
pub fn normalize(raw: &RawFrame) -> StackFrameEntry {
    let source_line = match &raw.source_line {
        Some(text) => text.trim().to_string(),
        None => read_source_line(&raw.file, raw.line_number).unwrap_or_default(),
    };
    StackFrameEntry {
        location: raw.file.clone(),
        call_site: raw.call_site.clone(),
        line_number: raw.line_number,
        source_line,
    }
}

fn read_source_line(path: &str, line_number: u32) -> Option<String> {
    if line_number == 0 {
        return None;
    }
    let file = File::open(path).ok()?;
    let reader = BufReader::new(file);
    let line = reader.lines().nth(line_number as usize - 1)?.ok()?;
    Some(line.trim().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_normalize_reads_source_line_from_disk() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "fn main() {{").unwrap();
        writeln!(file, "    let x = 1 / 0;").unwrap();
        writeln!(file, "}}").unwrap();
        file.flush().unwrap();

        let raw = RawFrame::new(file.path().to_string_lossy(), "main", 2);
        let entry = normalize(&raw);
        assert_eq!(entry.source_line, "let x = 1 / 0;");
        assert_eq!(entry.call_site, "main");
        assert_eq!(entry.line_number, 2);
    }

    #[test]
    fn test_normalize_missing_file_yields_empty_source() {
        let raw = RawFrame::new("/does/not/exist.rs", "run", 10);
        let entry = normalize(&raw);
        assert_eq!(entry.source_line, "");
        assert_eq!(entry.location, "/does/not/exist.rs");
    }

    #[test]
    fn test_normalize_line_out_of_range() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "only line").unwrap();
        file.flush().unwrap();

        let raw = RawFrame::new(file.path().to_string_lossy(), "run", 99);
        assert_eq!(normalize(&raw).source_line, "");
    }

    #[test]
    fn test_normalize_prefers_supplied_source_line() {
        let raw = RawFrame::new("/does/not/exist.rs", "run", 1)
            .with_source_line("  result = compute()  ");
        assert_eq!(normalize(&raw).source_line, "result = compute()");
    }
}
