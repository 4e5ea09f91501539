//! Text dumps of controller state for snapshot assertions.
//!
//! Each helper prints one line per element, labelled by the element's `id`
//! (or its tag when it has none). Lines are joined with `'\n'` and carry no
//! trailing whitespace.

use crate::dom::{Dom, NodeId};

fn label(dom: &Dom, id: NodeId) -> String {
    match dom.get(id) {
        Some(data) => data.id.clone().unwrap_or_else(|| data.tag.clone()),
        None => "<missing>".to_owned(),
    }
}

/// Tab index of each element, flagging focus and disabled state.
///
/// ```text
/// apple: 0 focused
/// banana: -1 disabled
/// ```
pub fn tab_indices_to_string(dom: &Dom, ids: &[NodeId]) -> String {
    ids.iter()
        .map(|&id| {
            let mut line = label(dom, id);
            let Some(data) = dom.get(id) else {
                return line;
            };
            line.push_str(&format!(": {}", data.tab_index));
            if dom.focused() == Some(id) {
                line.push_str(" focused");
            }
            if data.disabled {
                line.push_str(" disabled");
            }
            line
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Radio-style view of a selection group: `(x)` checked, `( )` unchecked,
/// `(-)` disabled, followed by the tab index.
///
/// ```text
/// (x) small 0
/// ( ) medium -1
/// ```
pub fn selection_to_string(dom: &Dom, ids: &[NodeId]) -> String {
    ids.iter()
        .map(|&id| {
            let name = label(dom, id);
            let Some(data) = dom.get(id) else {
                return name;
            };
            let mark = if data.checked {
                "(x)"
            } else if data.disabled {
                "(-)"
            } else {
                "( )"
            };
            format!("{mark} {name} {}", data.tab_index)
        })
        .collect::<Vec<_>>()
        .join("\n")
}
