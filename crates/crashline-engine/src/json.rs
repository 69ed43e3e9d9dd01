use crate::alias::AliasRegistry;
use crate::rows::rows_for;
use crashline_types::{Chain, ExceptionRecord, Relationship, ThreadInfo};
use serde::{Deserialize, Serialize};

/// One frame in structured output. `module` is the alias-relative path.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JsonFrame {
    pub module: String,
    pub alias: String,
    pub function: String,
    pub lineno: u32,
}

/// One predecessor record in the `chain` list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JsonChainEntry {
    pub exception: String,
    pub message: String,
    pub relationship: Relationship,
    pub frames: Vec<JsonFrame>,
}

/// The structured form of a chain, for log ingestion. Serializes to the
/// same nested shape regardless of terminal concerns; `chain` is present
/// only when the walk found predecessors, `thread` only when the caller
/// supplied one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JsonReport {
    pub exception: String,
    pub message: String,
    pub frames: Vec<JsonFrame>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub chain: Option<Vec<JsonChainEntry>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub thread: Option<ThreadInfo>,
}

/// Convert a (pre-filtered) chain into its structured form. Callers that
/// need identical filtering to the text renderer pass the chain through the
/// same [`crate::filter::FrameFilter`] first.
pub fn serialize(chain: &Chain, registry: &AliasRegistry, thread: Option<ThreadInfo>) -> JsonReport {
    let leaf = chain.leaf();
    let predecessors = &chain.records[1..];

    let chain_entries = if predecessors.is_empty() {
        None
    } else {
        Some(
            predecessors
                .iter()
                .map(|record| JsonChainEntry {
                    exception: record.type_name.clone(),
                    message: record.message.clone(),
                    relationship: record.relationship,
                    frames: frames_for(record, registry),
                })
                .collect(),
        )
    };

    JsonReport {
        exception: leaf.type_name.clone(),
        message: leaf.message.clone(),
        frames: frames_for(leaf, registry),
        chain: chain_entries,
        thread,
    }
}

/// Convenience for logging integrations that embed the report as a field in
/// their own record.
pub fn to_value(
    chain: &Chain,
    registry: &AliasRegistry,
    thread: Option<ThreadInfo>,
) -> serde_json::Value {
    serde_json::to_value(serialize(chain, registry, thread))
        .unwrap_or(serde_json::Value::Null)
}

fn frames_for(record: &ExceptionRecord, registry: &AliasRegistry) -> Vec<JsonFrame> {
    rows_for(record, registry)
        .into_iter()
        .map(|row| JsonFrame {
            module: row.relative_location,
            alias: row.alias,
            function: row.call_site,
            lineno: row.line_number,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::alias::LOCAL_TOKEN;
    use crashline_types::StackFrameEntry;

    fn registry() -> AliasRegistry {
        let mut registry = AliasRegistry::empty();
        registry.register("/project", LOCAL_TOKEN);
        registry
    }

    fn entry(location: &str, call: &str, line: u32) -> StackFrameEntry {
        StackFrameEntry {
            location: location.to_string(),
            call_site: call.to_string(),
            line_number: line,
            source_line: String::new(),
        }
    }

    fn record(
        type_name: &str,
        message: &str,
        frames: Vec<StackFrameEntry>,
        relationship: Relationship,
    ) -> ExceptionRecord {
        ExceptionRecord {
            type_name: type_name.to_string(),
            message: message.to_string(),
            frames,
            relationship,
        }
    }

    #[test]
    fn test_single_record_omits_chain() {
        let chain = Chain {
            records: vec![record(
                "ValueError",
                "test error message",
                vec![entry("/project/app.py", "run", 10)],
                Relationship::Root,
            )],
        };
        let report = serialize(&chain, &registry(), None);
        assert_eq!(report.exception, "ValueError");
        assert_eq!(report.message, "test error message");
        assert!(report.chain.is_none());

        let frame = &report.frames[0];
        assert_eq!(frame.module, "app.py");
        assert_eq!(frame.alias, LOCAL_TOKEN);
        assert_eq!(frame.function, "run");
        assert_eq!(frame.lineno, 10);

        let value = to_value(&chain, &registry(), None);
        assert!(value.get("chain").is_none());
        assert!(value.get("thread").is_none());
    }

    #[test]
    fn test_caused_by_chain_entry() {
        let chain = Chain {
            records: vec![
                record("ValueError", "wrap", Vec::new(), Relationship::Root),
                record("KeyError", "k", Vec::new(), Relationship::CausedBy),
            ],
        };
        let value = to_value(&chain, &registry(), None);
        assert_eq!(value["exception"], "ValueError");
        assert_eq!(value["chain"][0]["exception"], "KeyError");
        assert_eq!(value["chain"][0]["relationship"], "caused_by");
    }

    #[test]
    fn test_context_chain_entry() {
        let chain = Chain {
            records: vec![
                record("ValueError", "new error", Vec::new(), Relationship::Root),
                record("KeyError", "context_key", Vec::new(), Relationship::Context),
            ],
        };
        let value = to_value(&chain, &registry(), None);
        assert_eq!(value["chain"][0]["relationship"], "context");
    }

    #[test]
    fn test_empty_frames_serialize_as_empty_list() {
        let chain = Chain {
            records: vec![record("ConnectError", "down", Vec::new(), Relationship::Root)],
        };
        let value = to_value(&chain, &registry(), None);
        assert_eq!(value["frames"].as_array().unwrap().len(), 0);
    }

    #[test]
    fn test_thread_metadata_attached_when_supplied() {
        let chain = Chain {
            records: vec![record("ValueError", "x", Vec::new(), Relationship::Root)],
        };
        let thread = ThreadInfo {
            name: "worker-1".to_string(),
            daemon: false,
        };
        let value = to_value(&chain, &registry(), Some(thread));
        assert_eq!(value["thread"]["name"], "worker-1");
        assert_eq!(value["thread"]["daemon"], false);
    }
}
