use crate::alias::AliasRegistry;
use crashline_types::ExceptionRecord;

/// Per-frame presentation record: a frame's location resolved against the
/// alias registry, with the matched prefix stripped. Both the text renderer
/// and the structured serializer are built from these, which is what keeps
/// aliasing identical across the two output paths.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderRow {
    pub alias: String,
    pub relative_location: String,
    pub call_site: String,
    pub line_number: u32,
    pub source_line: String,
}

pub fn rows_for(record: &ExceptionRecord, registry: &AliasRegistry) -> Vec<RenderRow> {
    record
        .frames
        .iter()
        .map(|frame| {
            let resolved = registry.resolve(&frame.location);
            RenderRow {
                alias: resolved.token,
                relative_location: resolved.suffix,
                call_site: frame.call_site.clone(),
                line_number: frame.line_number,
                source_line: frame.source_line.clone(),
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::alias::LOCAL_TOKEN;
    use crashline_types::{Relationship, StackFrameEntry};

    #[test]
    fn test_rows_strip_matched_prefix() {
        let mut registry = AliasRegistry::empty();
        registry.register("/project", LOCAL_TOKEN);

        let record = ExceptionRecord {
            type_name: "ValueError".to_string(),
            message: "x".to_string(),
            frames: vec![StackFrameEntry {
                location: "/project/app.py".to_string(),
                call_site: "run".to_string(),
                line_number: 10,
                source_line: "result = 42 / 0".to_string(),
            }],
            relationship: Relationship::Root,
        };

        let rows = rows_for(&record, &registry);
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].alias, LOCAL_TOKEN);
        assert_eq!(rows[0].relative_location, "app.py");
        assert_eq!(rows[0].line_number, 10);
    }
}
