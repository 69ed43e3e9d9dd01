use crate::alias::AliasRegistry;
use crate::rows::rows_for;
use crashline_types::{Chain, ExceptionRecord, Relationship, ThreadInfo};
use owo_colors::OwoColorize;

/// Header line opening the leaf record's section.
pub const TRACEBACK_HEAD: &str = "Traceback (most recent call last):";
/// Header line opening a section reached through an explicit cause link.
pub const CAUSE_HEAD: &str = "The above exception was caused by the following exception:";
/// Header line opening a section reached through an implicit context link.
pub const CONTEXT_HEAD: &str =
    "The above exception occurred during handling of the following exception:";
/// Header line opening the alias preamble.
pub const ALIASES_HEAD: &str = "Aliases for path prefixes:";

/// Fallback terminal width when the caller has none to offer.
pub const DEFAULT_COLUMNS: usize = 100;

const INDENT: usize = 4;
const GUTTER: usize = 2;

/// Options for the text renderer. Filtering happens before rendering, see
/// [`crate::filter::FrameFilter`].
#[derive(Debug, Clone)]
pub struct RenderOptions {
    pub color: bool,
    pub terminal_width: usize,
    /// Emit the alias preamble listing every registered token and prefix.
    pub show_aliases: bool,
    /// Replaces the leaf record's message in the final line, for callers
    /// that computed a richer message than the exception itself carries.
    pub message_override: Option<String>,
    /// Prepend an `Exception in thread ...` header.
    pub thread: Option<ThreadInfo>,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            color: false,
            terminal_width: DEFAULT_COLUMNS,
            show_aliases: true,
            message_override: None,
            thread: None,
        }
    }
}

/// Lay out a chain as column-aligned, optionally colorized text.
///
/// Sections appear in walk order: the leaf's own trace first under the
/// generic traceback header, then one header-delimited section per
/// predecessor. Only header lines and the final type/message line of each
/// section receive emphasis; escape codes never influence layout.
pub fn render(chain: &Chain, registry: &AliasRegistry, opts: &RenderOptions) -> String {
    let mut lines: Vec<String> = Vec::new();

    if let Some(thread) = &opts.thread {
        let daemon_suffix = if thread.daemon { " (daemon)" } else { "" };
        let head = format!("Exception in thread {}{}:", thread.name, daemon_suffix);
        lines.push(style_head(&head, opts.color));
    }

    if opts.show_aliases && !registry.entries().is_empty() {
        lines.push(style_head(ALIASES_HEAD, opts.color));
        for entry in registry.entries() {
            lines.push(format!(
                "    {}: {}",
                entry.token,
                entry.prefix.display()
            ));
        }
        lines.push(String::new());
    }

    for (idx, record) in chain.records.iter().enumerate() {
        if idx == 0 {
            lines.push(style_head(TRACEBACK_HEAD, opts.color));
        } else {
            lines.push(String::new());
            let head = match record.relationship {
                Relationship::CausedBy => CAUSE_HEAD,
                Relationship::Context => CONTEXT_HEAD,
                Relationship::Root => TRACEBACK_HEAD,
            };
            lines.push(style_head(head, opts.color));
        }

        lines.extend(frame_lines(record, registry, opts.terminal_width));

        let message_override = if idx == 0 {
            opts.message_override.as_deref()
        } else {
            None
        };
        lines.push(style_summary(
            summary_line(record, message_override),
            opts.color,
        ));
    }

    lines.join("\n")
}

/// The final `Type: message` line of a section; the bare type name when the
/// message is empty.
fn summary_line(record: &ExceptionRecord, message_override: Option<&str>) -> String {
    let message = message_override.unwrap_or(&record.message);
    if message.is_empty() {
        record.type_name.clone()
    } else {
        format!("{}: {}", record.type_name, message)
    }
}

fn frame_lines(record: &ExceptionRecord, registry: &AliasRegistry, width: usize) -> Vec<String> {
    let rows = rows_for(record, registry);
    if rows.is_empty() {
        return Vec::new();
    }

    let locations: Vec<String> = rows
        .iter()
        .map(|row| format!("{}:{}", row.relative_location, row.line_number))
        .collect();

    let alias_w = rows.iter().map(|r| r.alias.chars().count()).max().unwrap_or(0);
    let loc_w = locations.iter().map(|l| l.chars().count()).max().unwrap_or(0);
    let call_w = rows
        .iter()
        .map(|r| r.call_site.chars().count())
        .max()
        .unwrap_or(0);

    // The source column gives way first; the location column only when the
    // line is over budget even with the source column gone.
    let fixed = INDENT + alias_w + GUTTER + loc_w + GUTTER + call_w + GUTTER;
    let (loc_w, src_w) = if fixed >= width {
        let without_loc = INDENT + alias_w + GUTTER + GUTTER + call_w + GUTTER;
        (width.saturating_sub(without_loc).min(loc_w), 0)
    } else {
        (loc_w, width - fixed)
    };

    rows.iter()
        .zip(&locations)
        .map(|(row, location)| {
            let line = format!(
                "    {:<alias_w$}  {:<loc_w$}  {:<call_w$}  {}",
                row.alias,
                truncate(location, loc_w),
                row.call_site,
                truncate(&row.source_line, src_w),
            );
            line.trim_end().to_string()
        })
        .collect()
}

pub(crate) fn truncate(text: &str, max_len: usize) -> String {
    let char_count = text.chars().count();

    if char_count <= max_len {
        text.to_string()
    } else if max_len <= 3 {
        // For very small max_len, just take first chars without "..."
        text.chars().take(max_len).collect()
    } else {
        let truncated: String = text.chars().take(max_len - 3).collect();
        format!("{}...", truncated)
    }
}

fn style_head(text: &str, color: bool) -> String {
    if color {
        format!("{}", text.bold())
    } else {
        text.to_string()
    }
}

fn style_summary(text: String, color: bool) -> String {
    if color {
        format!("{}", text.red().bold())
    } else {
        text
    }
}
