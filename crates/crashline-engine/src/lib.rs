// Engine module - the core pipeline between captured exceptions and output
// This layer turns a live exception graph into an IR chain and renders it

pub mod alias;
pub mod error;
pub mod filter;
pub mod json;
pub mod normalize;
pub mod parse;
pub mod render;
pub mod rows;
pub mod walk;

pub use alias::{AliasEntry, AliasRegistry, CARGO_TOKEN, LOCAL_TOKEN, Resolved, STD_TOKEN};
pub use error::{Error, Result};
pub use filter::FrameFilter;
pub use json::{JsonChainEntry, JsonFrame, JsonReport, serialize, to_value};
pub use normalize::normalize;
pub use parse::parse;
pub use render::{
    ALIASES_HEAD, CAUSE_HEAD, CONTEXT_HEAD, DEFAULT_COLUMNS, RenderOptions, TRACEBACK_HEAD, render,
};
pub use rows::{RenderRow, rows_for};
pub use walk::{MAX_CHAIN_DEPTH, walk};

use crashline_types::{Chain, ErrorLike};

// Façade API - walk, filter and render in one call, both output paths
// guaranteed to see the same filtering decisions

/// Walk `leaf` and render the filtered chain as text.
pub fn report_text(
    leaf: &dyn ErrorLike,
    registry: &AliasRegistry,
    filter: &FrameFilter,
    opts: &RenderOptions,
) -> String {
    render(&filtered_chain(leaf, registry, filter), registry, opts)
}

/// Walk `leaf` and serialize the filtered chain for log ingestion.
pub fn report_json(
    leaf: &dyn ErrorLike,
    registry: &AliasRegistry,
    filter: &FrameFilter,
    thread: Option<crashline_types::ThreadInfo>,
) -> JsonReport {
    serialize(&filtered_chain(leaf, registry, filter), registry, thread)
}

fn filtered_chain(leaf: &dyn ErrorLike, registry: &AliasRegistry, filter: &FrameFilter) -> Chain {
    filter.apply_chain(&walk(leaf), registry)
}
