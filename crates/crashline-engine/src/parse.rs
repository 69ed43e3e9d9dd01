use crate::alias::AliasRegistry;
use crate::error::{Error, Result};
use crate::render::{ALIASES_HEAD, CAUSE_HEAD, CONTEXT_HEAD, TRACEBACK_HEAD};
use crashline_types::{Chain, ExceptionRecord, Relationship, StackFrameEntry};

/// Reconstruct a chain from previously rendered text.
///
/// The fixed header sentences are the chain-boundary markers; frame rows are
/// parsed positionally (the `path:line` field anchors the row, whatever the
/// rendered column widths were), and each section is closed by its
/// `Name: message` line. Alias tokens are reverse-mapped through `registry`
/// to rebuild absolute locations. Parsing is best-effort: preamble lines,
/// blank lines, unparseable rows and trailing text are ignored. This exists
/// to validate render/parse round trips, not to parse arbitrary third-party
/// traceback text.
pub fn parse(text: &str, registry: &AliasRegistry) -> Result<Chain> {
    let mut records: Vec<ExceptionRecord> = Vec::new();
    let mut section: Option<(Relationship, Vec<StackFrameEntry>)> = None;

    for line in text.lines() {
        let trimmed = line.trim();

        let head = match trimmed {
            t if t == TRACEBACK_HEAD => Some(Relationship::Root),
            t if t == CAUSE_HEAD => Some(Relationship::CausedBy),
            t if t == CONTEXT_HEAD => Some(Relationship::Context),
            _ => None,
        };
        if let Some(relationship) = head {
            // an unclosed section has no summary line; drop it
            section = Some((relationship, Vec::new()));
            continue;
        }

        if trimmed.is_empty() || trimmed == ALIASES_HEAD {
            continue;
        }

        if section.is_none() {
            // outside any section: preamble entries, thread headers, junk
            continue;
        }

        if line.starts_with(char::is_whitespace) {
            if let Some(frame) = parse_frame_row(line, registry) {
                if let Some((_, frames)) = section.as_mut() {
                    frames.push(frame);
                }
            }
        } else if let Some((relationship, frames)) = section.take() {
            let (type_name, message) = split_summary(trimmed);
            records.push(ExceptionRecord {
                type_name,
                message,
                frames,
                relationship,
            });
        }
    }

    if records.is_empty() {
        return Err(Error::NoTraceback);
    }
    Ok(Chain { records })
}

/// `Name: message` with the message optional; a message may itself contain
/// colons, so only the first separator splits.
fn split_summary(line: &str) -> (String, String) {
    match line.split_once(": ") {
        Some((name, message)) => (name.to_string(), message.to_string()),
        None => (line.trim_end_matches(':').to_string(), String::new()),
    }
}

fn parse_frame_row(line: &str, registry: &AliasRegistry) -> Option<StackFrameEntry> {
    let tokens = tokenize(line);
    let loc_idx = tokens
        .iter()
        .position(|t| split_location(t.text).is_some())?;
    // the location field is either the first column or preceded by an alias
    if loc_idx > 1 {
        return None;
    }
    let (relative, line_number) = split_location(tokens[loc_idx].text)?;
    let alias = if loc_idx == 1 { tokens[0].text } else { "" };
    let call = tokens.get(loc_idx + 1)?;
    let source_line = line[call.end..].trim().to_string();

    Some(StackFrameEntry {
        location: rebuild_location(alias, relative, registry),
        call_site: call.text.to_string(),
        line_number,
        source_line,
    })
}

struct Token<'a> {
    text: &'a str,
    end: usize,
}

fn tokenize(line: &str) -> Vec<Token<'_>> {
    let mut tokens = Vec::new();
    let mut start: Option<usize> = None;
    for (idx, ch) in line.char_indices() {
        if ch.is_whitespace() {
            if let Some(s) = start.take() {
                tokens.push(Token {
                    text: &line[s..idx],
                    end: idx,
                });
            }
        } else if start.is_none() {
            start = Some(idx);
        }
    }
    if let Some(s) = start {
        tokens.push(Token {
            text: &line[s..],
            end: line.len(),
        });
    }
    tokens
}

/// Split a `path:line` field. The last colon separates the line number, so
/// paths containing colons survive.
fn split_location(token: &str) -> Option<(&str, u32)> {
    let (path, digits) = token.rsplit_once(':')?;
    if path.is_empty() || digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    digits.parse().ok().map(|line| (path, line))
}

fn rebuild_location(alias: &str, relative: &str, registry: &AliasRegistry) -> String {
    if alias.is_empty() {
        return relative.to_string();
    }
    match registry.prefix_for(alias) {
        Some(prefix) => prefix.join(relative).to_string_lossy().into_owned(),
        None => relative.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::alias::LOCAL_TOKEN;

    fn registry() -> AliasRegistry {
        let mut registry = AliasRegistry::empty();
        registry.register("/project", LOCAL_TOKEN);
        registry
    }

    #[test]
    fn test_parse_basic_traceback() {
        let text = "\
Traceback (most recent call last):
    <pwd>  app.py:10  run  result = 42 / 0
ValueError: x";
        let chain = parse(text, &registry()).unwrap();
        assert_eq!(chain.len(), 1);
        let record = chain.leaf();
        assert_eq!(record.type_name, "ValueError");
        assert_eq!(record.message, "x");
        assert_eq!(record.relationship, Relationship::Root);

        let frame = &record.frames[0];
        assert_eq!(frame.location, "/project/app.py");
        assert_eq!(frame.call_site, "run");
        assert_eq!(frame.line_number, 10);
        assert_eq!(frame.source_line, "result = 42 / 0");
    }

    #[test]
    fn test_parse_chained_sections() {
        let text = "\
Traceback (most recent call last):
    <pwd>  app.py:20  handler  raise ValueError(\"wrap\") from err
ValueError: wrap

The above exception was caused by the following exception:
    <pwd>  store.py:7  lookup  return table[key]
KeyError: k";
        let chain = parse(text, &registry()).unwrap();
        assert_eq!(chain.len(), 2);
        assert_eq!(chain.records[0].relationship, Relationship::Root);
        assert_eq!(chain.records[1].relationship, Relationship::CausedBy);
        assert_eq!(chain.records[1].type_name, "KeyError");
        assert_eq!(chain.records[1].frames[0].location, "/project/store.py");
    }

    #[test]
    fn test_parse_context_section() {
        let text = "\
Traceback (most recent call last):
ValueError: new error

The above exception occurred during handling of the following exception:
KeyError: context_key";
        let chain = parse(text, &registry()).unwrap();
        assert_eq!(chain.records[1].relationship, Relationship::Context);
        assert!(chain.records[0].frames.is_empty());
    }

    #[test]
    fn test_parse_message_with_colon() {
        let text = "\
Traceback (most recent call last):
ValueError: invalid literal: 'x'";
        let chain = parse(text, &registry()).unwrap();
        assert_eq!(chain.leaf().type_name, "ValueError");
        assert_eq!(chain.leaf().message, "invalid literal: 'x'");
    }

    #[test]
    fn test_parse_bare_type_name() {
        let text = "\
Traceback (most recent call last):
StopIteration";
        let chain = parse(text, &registry()).unwrap();
        assert_eq!(chain.leaf().type_name, "StopIteration");
        assert_eq!(chain.leaf().message, "");
    }

    #[test]
    fn test_parse_ignores_preamble_and_blank_lines() {
        let text = "\

Exception in thread worker-1 (daemon):
Aliases for path prefixes:
    <pwd>: /project

Traceback (most recent call last):
    <pwd>  app.py:10  run  boom()
ValueError: x

leftover trailing text that matches no grammar
";
        let chain = parse(text, &registry()).unwrap();
        assert_eq!(chain.len(), 1);
        assert_eq!(chain.leaf().frames.len(), 1);
    }

    #[test]
    fn test_parse_unaliased_row() {
        let text = "\
Traceback (most recent call last):
      /usr/lib/runpy.py:87  _run_code  exec(code)
ValueError: x";
        let chain = parse(text, &registry()).unwrap();
        let frame = &chain.leaf().frames[0];
        assert_eq!(frame.location, "/usr/lib/runpy.py");
        assert_eq!(frame.call_site, "_run_code");
    }

    #[test]
    fn test_parse_unknown_alias_keeps_relative_path() {
        let text = "\
Traceback (most recent call last):
    <mystery>  lib.py:3  f  g()
ValueError: x";
        let chain = parse(text, &registry()).unwrap();
        assert_eq!(chain.leaf().frames[0].location, "lib.py");
    }

    #[test]
    fn test_parse_without_headers_is_an_error() {
        assert!(matches!(
            parse("no traceback here at all", &registry()),
            Err(Error::NoTraceback)
        ));
    }
}
