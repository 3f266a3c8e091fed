//! Query admission gate
//!
//! Every incoming GraphQL request passes through `admit` before it touches
//! the executor: the raw query text is parsed (malformed text is reported
//! verbatim as a syntax error) and the document is checked against a fixed
//! nesting bound. A rejected query short-circuits the request entirely; no
//! resolver and no loader runs. Schema validation itself is left to
//! async-graphql, which likewise skips execution when it fails.

use std::collections::HashSet;

use async_graphql::parser::types::{
    DocumentOperations, ExecutableDocument, Selection, SelectionSet,
};
use async_graphql::{parser, ServerError};

/// Maximum allowed depth of nested field selections.
pub const MAX_QUERY_DEPTH: usize = 5;

/// Parse and depth-validate raw query text.
///
/// Returns the parsed document when the query is admissible, or the error
/// list the caller should hand back in the response envelope. Depth is the
/// longest chain of nested field selections; fragment spreads and inline
/// fragments count at their point of use.
pub fn admit(query: &str, max_depth: usize) -> Result<ExecutableDocument, Vec<ServerError>> {
    let doc = parser::parse_query(query).map_err(|err| vec![ServerError::from(err)])?;

    let mut errors = Vec::new();
    let operations: Vec<&SelectionSet> = match &doc.operations {
        DocumentOperations::Single(op) => vec![&op.node.selection_set.node],
        DocumentOperations::Multiple(ops) => {
            ops.values().map(|op| &op.node.selection_set.node).collect()
        }
    };

    for selection_set in operations {
        let mut visiting = HashSet::new();
        match selection_depth(&doc, selection_set, &mut visiting) {
            Ok(depth) if depth > max_depth => {
                errors.push(ServerError::new(
                    format!(
                        "query exceeds maximum depth of {max_depth} (found {depth} levels of \
                         nested selections)"
                    ),
                    None,
                ));
            }
            Ok(_) => {}
            Err(err) => errors.push(err),
        }
    }

    if errors.is_empty() {
        Ok(doc)
    } else {
        Err(errors)
    }
}

/// Longest chain of nested field selections below `selection_set`.
///
/// `visiting` tracks fragment names on the current path so a spread cycle is
/// reported instead of recursing forever.
fn selection_depth(
    doc: &ExecutableDocument,
    selection_set: &SelectionSet,
    visiting: &mut HashSet<String>,
) -> Result<usize, ServerError> {
    let mut depth = 0;
    for selection in &selection_set.items {
        let branch = match &selection.node {
            Selection::Field(field) => {
                1 + selection_depth(doc, &field.node.selection_set.node, visiting)?
            }
            Selection::InlineFragment(fragment) => {
                selection_depth(doc, &fragment.node.selection_set.node, visiting)?
            }
            Selection::FragmentSpread(spread) => {
                let name = spread.node.fragment_name.node.as_str();
                let fragment = doc.fragments.get(&spread.node.fragment_name.node).ok_or_else(
                    || {
                        ServerError::new(
                            format!("unknown fragment \"{name}\""),
                            Some(spread.pos),
                        )
                    },
                )?;
                if !visiting.insert(name.to_string()) {
                    return Err(ServerError::new(
                        format!("fragment \"{name}\" spreads itself"),
                        Some(spread.pos),
                    ));
                }
                let inner = selection_depth(doc, &fragment.node.selection_set.node, visiting)?;
                visiting.remove(name);
                inner
            }
        };
        depth = depth.max(branch);
    }
    Ok(depth)
}
