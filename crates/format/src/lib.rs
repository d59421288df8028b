//! Peek Format - render families for buffered telemetry
//!
//! Four formatter families share one contract: given a classified item and
//! its envelope header, produce zero or more text lines.
//!
//! - `human` - compact terminal lines (default)
//! - `logfmt` - key=value pairs
//! - `json` - one JSON object per line
//! - `markdown` - narrative bullet lines
//!
//! Dispatch is an explicit match over the closed `EventKind` set; an
//! `Unrecognized` item renders to nothing, never an error. A log item with
//! multiple entries renders one line per entry. Rendering is pure: no I/O,
//! no mutation of the event.

mod human;
mod json;
mod logfmt;
mod markdown;
#[cfg(test)]
pub(crate) mod test_util;
mod view;

pub use human::HumanFormatter;
pub use json::JsonFormatter;
pub use logfmt::LogfmtFormatter;
pub use markdown::MarkdownFormatter;
pub use view::{ErrorView, FrameView, LogEntryView, LogView, TraceView};

use std::str::FromStr;

use peek_protocol::{EnvelopeHeader, EventContainer, EventKind, Item};

/// The named formatter families
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FormatFamily {
    /// Human-readable terminal lines (default)
    Human,
    /// key=value pairs
    Logfmt,
    /// One JSON object per line
    Json,
    /// Narrative markdown bullets
    Markdown,
}

impl FormatFamily {
    /// Stable lowercase name
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Human => "human",
            Self::Logfmt => "logfmt",
            Self::Json => "json",
            Self::Markdown => "markdown",
        }
    }

    /// All families, for help text and validation messages
    pub const ALL: [FormatFamily; 4] = [
        Self::Human,
        Self::Logfmt,
        Self::Json,
        Self::Markdown,
    ];
}

impl FromStr for FormatFamily {
    type Err = UnknownFormat;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "human" | "text" => Ok(Self::Human),
            "logfmt" | "kv" => Ok(Self::Logfmt),
            "json" => Ok(Self::Json),
            "markdown" | "md" => Ok(Self::Markdown),
            other => Err(UnknownFormat(other.to_owned())),
        }
    }
}

impl std::fmt::Display for FormatFamily {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error for unrecognized family names
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownFormat(pub String);

impl std::fmt::Display for UnknownFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "unknown format '{}' (expected one of: human, logfmt, json, markdown)",
            self.0
        )
    }
}

impl std::error::Error for UnknownFormat {}

/// One render strategy: a method per event kind
///
/// Implementations are pure string builders; absent fields are omitted from
/// the output, never rendered as placeholders.
pub trait Formatter: Send + Sync {
    /// Family this formatter belongs to
    fn family(&self) -> FormatFamily;

    /// Render an error event (one summary line)
    fn render_error(&self, view: &ErrorView, header: &EnvelopeHeader) -> Vec<String>;

    /// Render a trace / transaction (one summary line)
    fn render_trace(&self, view: &TraceView, header: &EnvelopeHeader) -> Vec<String>;

    /// Render a log item (one line per entry)
    fn render_log(&self, view: &LogView, header: &EnvelopeHeader) -> Vec<String>;
}

/// Render one item through a formatter
///
/// Dispatches on the item's classified kind; unrecognized kinds and raw
/// (undecodable) payloads yield no lines.
pub fn render_item(
    formatter: &dyn Formatter,
    item: &Item,
    header: &EnvelopeHeader,
) -> Vec<String> {
    match item.kind() {
        EventKind::Error => ErrorView::from_item(item, header)
            .map(|view| formatter.render_error(&view, header))
            .unwrap_or_default(),
        EventKind::Trace => TraceView::from_item(item)
            .map(|view| formatter.render_trace(&view, header))
            .unwrap_or_default(),
        EventKind::Log => LogView::from_item(item)
            .map(|view| formatter.render_log(&view, header))
            .unwrap_or_default(),
        EventKind::Unrecognized => Vec::new(),
    }
}

/// Render every item of a container, in item order
pub fn render_container(formatter: &dyn Formatter, container: &EventContainer) -> Vec<String> {
    let envelope = container.envelope();
    envelope
        .items
        .iter()
        .flat_map(|item| render_item(formatter, item, &envelope.header))
        .collect()
}

/// Registry of the built-in formatter families
#[derive(Debug)]
pub struct FormatterRegistry {
    human: HumanFormatter,
    logfmt: LogfmtFormatter,
    json: JsonFormatter,
    markdown: MarkdownFormatter,
}

impl FormatterRegistry {
    /// Registry with all four families
    pub fn new() -> Self {
        Self {
            human: HumanFormatter,
            logfmt: LogfmtFormatter,
            json: JsonFormatter,
            markdown: MarkdownFormatter,
        }
    }

    /// The formatter for a family
    pub fn get(&self, family: FormatFamily) -> &dyn Formatter {
        match family {
            FormatFamily::Human => &self.human,
            FormatFamily::Logfmt => &self.logfmt,
            FormatFamily::Json => &self.json,
            FormatFamily::Markdown => &self.markdown,
        }
    }

    /// Look up a formatter by family name
    pub fn by_name(&self, name: &str) -> Result<&dyn Formatter, UnknownFormat> {
        Ok(self.get(name.parse()?))
    }
}

impl Default for FormatterRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
#[path = "registry_test.rs"]
mod tests;
