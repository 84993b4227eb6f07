//! Error localization.
//!
//! The engine reports failures inside a bulk request as a path into the
//! request document, e.g. `$.args[3].args.table`. On its own that string is
//! meaningless to a reader, so the bytes that were actually sent are decoded
//! back into a generic tree, the path is evaluated against it, and the
//! addressed sub-object is pretty-printed.
//!
//! Localization is best-effort. A path that does not resolve yields nothing;
//! a failure while rebuilding the tree yields a note. Neither ever replaces
//! the remote error it annotates.

use crate::config::Invocation;
use metasync_protocol::{JsonPath, Value};
use tracing::warn;

/// Label preceding the excerpt in rendered errors.
pub const EXCERPT_LABEL: &str = "offending object:";

/// Diagnostic attached to a remote error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Localization {
    /// Pretty-printed sub-object of the request located by the error path.
    Excerpt(String),
    /// Localization was attempted but could not be completed.
    Note(String),
}

impl Localization {
    /// Renders the diagnostic for display under the error line.
    pub fn render(&self, invocation: Invocation) -> String {
        match self {
            Localization::Excerpt(text) => {
                let sep = invocation.line_separator();
                format!("{EXCERPT_LABEL}{sep}{sep}{text}")
            }
            Localization::Note(reason) => {
                format!("note: could not locate offending object: {reason}")
            }
        }
    }
}

/// Locates the object at `path` within the request bytes `sent`.
///
/// Returns `None` when `path` is empty or does not resolve.
pub fn localize(sent: &[u8], path: &str) -> Option<Localization> {
    if path.is_empty() {
        return None;
    }

    let tree: Value = match serde_json::from_slice(sent) {
        Ok(tree) => tree,
        Err(e) => {
            warn!(error = %e, "could not decode sent request for localization");
            return Some(Localization::Note(format!("request did not decode: {e}")));
        }
    };

    // An unparseable path is treated like one that does not resolve.
    let found = JsonPath::parse(path).ok()?.lookup(&tree)?;

    match serde_json::to_string_pretty(found) {
        Ok(text) => Some(Localization::Excerpt(text)),
        Err(e) => {
            warn!(error = %e, "could not render offending object");
            Some(Localization::Note(format!("object did not render: {e}")))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use metasync_protocol::{BulkQuery, Query};
    use serde_json::json;

    fn sent_apply(data: Value) -> Vec<u8> {
        let bulk = BulkQuery::new(vec![Query::clear_metadata(), Query::replace_metadata(data)]);
        serde_json::to_vec(&bulk).unwrap()
    }

    #[test]
    fn empty_path_yields_nothing() {
        assert_eq!(localize(&sent_apply(json!({})), ""), None);
    }

    #[test]
    fn excerpt_of_empty_tables() {
        let sent = sent_apply(json!({"tables": []}));
        assert_eq!(
            localize(&sent, "args[1].args.tables"),
            Some(Localization::Excerpt("[]".to_string()))
        );
    }

    #[test]
    fn excerpt_is_pretty_printed() {
        let data = json!({"tables": [{"table": "users", "schema": "public"}]});
        let sent = sent_apply(data.clone());
        let expected = serde_json::to_string_pretty(&data["tables"][0]).unwrap();

        let found = localize(&sent, "$.args[1].args.tables[0]");
        assert_eq!(found, Some(Localization::Excerpt(expected.clone())));
        assert!(expected.contains('\n'));
    }

    #[test]
    fn unresolved_path_yields_nothing() {
        let sent = sent_apply(json!({"tables": []}));
        assert_eq!(localize(&sent, "$.args[5]"), None);
        assert_eq!(localize(&sent, "$.args[oops]"), None);
    }

    #[test]
    fn undecodable_request_yields_note() {
        match localize(b"not json", "$.args[0]") {
            Some(Localization::Note(reason)) => assert!(reason.contains("did not decode")),
            other => panic!("unexpected localization: {:?}", other),
        }
    }

    #[test]
    fn render_excerpt_and_note() {
        let excerpt = Localization::Excerpt("[]".into());
        assert_eq!(excerpt.render(Invocation::Embedded), "offending object:\n\n[]");
        assert_eq!(excerpt.render(Invocation::Cli), "offending object:\r\n\r\n[]");

        let note = Localization::Note("request did not decode".into());
        assert!(note.render(Invocation::Cli).starts_with("note:"));
    }
}
