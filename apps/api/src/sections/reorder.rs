//! Reorder operations on a document's section order.
//!
//! Both operations compute a region-local sequence, edit it, and commit the
//! result through `regions::merge` in one assignment. A request that cannot be
//! applied (key outside the region, already at the edge) leaves the document
//! untouched.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::models::resume::ResumeDocument;
use crate::sections::key::SectionKey;
use crate::sections::regions::{merge, region_of, Scope};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    Up,
    Down,
}

/// Swaps `section` with its neighbour in `direction` inside its region.
///
/// Returns `true` when the document changed.
pub fn move_adjacent(
    doc: &mut ResumeDocument,
    section: SectionKey,
    direction: Direction,
    scope: Scope,
    sidebar_keys: &[SectionKey],
) -> bool {
    let order = doc.section_order();
    let mut region = region_of(&order, sidebar_keys, scope);

    let Some(index) = region.iter().position(|k| *k == section) else {
        debug!("move_adjacent: '{section}' is not in the {scope:?} region");
        return false;
    };
    let neighbour = match direction {
        Direction::Up if index > 0 => index - 1,
        Direction::Down if index + 1 < region.len() => index + 1,
        _ => return false,
    };

    region.swap(index, neighbour);
    doc.set_section_order(merge(&order, sidebar_keys, scope, &region));
    true
}

/// Moves `source` to the region-local position `target` occupied.
///
/// Returns `true` when the document changed.
pub fn drop_on_target(
    doc: &mut ResumeDocument,
    source: SectionKey,
    target: SectionKey,
    scope: Scope,
    sidebar_keys: &[SectionKey],
) -> bool {
    if source == target {
        return false;
    }
    let order = doc.section_order();
    let mut region = region_of(&order, sidebar_keys, scope);

    let (Some(from), Some(to)) = (
        region.iter().position(|k| *k == source),
        region.iter().position(|k| *k == target),
    ) else {
        debug!("drop_on_target: '{source}' -> '{target}' outside the {scope:?} region");
        return false;
    };

    let moved = region.remove(from);
    region.insert(to, moved);
    doc.set_section_order(merge(&order, sidebar_keys, scope, &region));
    true
}
