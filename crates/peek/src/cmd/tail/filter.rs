//! Kind filter for streamed events (client-side)

use std::collections::HashSet;

/// Which event kinds to print
///
/// No kinds (or an explicit `all`) means everything passes.
#[derive(Debug, Default)]
pub struct KindFilter {
    kinds: Option<HashSet<&'static str>>,
}

impl KindFilter {
    /// Build a filter from CLI kind arguments
    ///
    /// Unknown kinds are warned about and ignored.
    pub fn parse(kinds: &[String]) -> Self {
        let mut set = HashSet::new();
        let mut all = false;

        for kind in kinds {
            match kind.to_lowercase().as_str() {
                "all" | "*" => all = true,
                "error" | "errors" | "e" => {
                    set.insert("error");
                }
                "trace" | "traces" | "t" => {
                    set.insert("trace");
                }
                "log" | "logs" | "l" => {
                    set.insert("log");
                }
                other => {
                    tracing::warn!(kind = %other, "unknown kind, ignoring");
                }
            }
        }

        if all || set.is_empty() {
            Self { kinds: None }
        } else {
            Self { kinds: Some(set) }
        }
    }

    /// Check whether an event with this name passes the filter
    pub fn matches(&self, event: &str) -> bool {
        match &self.kinds {
            None => true,
            Some(set) => set.contains(event),
        }
    }
}

#[cfg(test)]
#[path = "filter_test.rs"]
mod tests;
