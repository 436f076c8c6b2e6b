//! Region splitting — derives the "main" and "sidebar" sequences a template
//! renders from the single global `SectionOrder`, and writes region-local
//! edits back into it.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::sections::key::SectionKey;
use crate::sections::order::SectionOrder;

/// Which part of the order an edit applies to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Scope {
    /// The whole order; used by single-region templates.
    All,
    Main,
    Sidebar,
}

/// Region-local sequences, each preserving the relative order of the global order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Regions {
    pub main: Vec<SectionKey>,
    pub sidebar: Vec<SectionKey>,
}

fn in_scope(key: SectionKey, sidebar_keys: &[SectionKey], scope: Scope) -> bool {
    match scope {
        Scope::All => true,
        Scope::Main => !sidebar_keys.contains(&key),
        Scope::Sidebar => sidebar_keys.contains(&key),
    }
}

/// Partitions `order` by sidebar membership.
pub fn split(order: &SectionOrder, sidebar_keys: &[SectionKey]) -> Regions {
    let (sidebar, main): (Vec<SectionKey>, Vec<SectionKey>) =
        order.iter().partition(|k| sidebar_keys.contains(k));
    Regions { main, sidebar }
}

/// The sequence `scope` operates on: the full order for `Scope::All`,
/// otherwise the matching region of `split`.
pub fn region_of(order: &SectionOrder, sidebar_keys: &[SectionKey], scope: Scope) -> Vec<SectionKey> {
    order
        .iter()
        .filter(|k| in_scope(*k, sidebar_keys, scope))
        .collect()
}

/// Writes a region-local sequence back into the slots that region occupies in
/// `original`, leaving the other region untouched.
///
/// `Scope::All` replaces the whole order (normalized). For a region scope,
/// slot `i` takes `new_region_order[i]` when that key belongs to the region and
/// has not been placed yet; otherwise the slot keeps its prior occupant, or,
/// if that occupant was already moved elsewhere, the first region key not yet
/// placed. The result always holds every key exactly once.
pub fn merge(
    original: &SectionOrder,
    sidebar_keys: &[SectionKey],
    scope: Scope,
    new_region_order: &[SectionKey],
) -> SectionOrder {
    if scope == Scope::All {
        return SectionOrder::from_keys(new_region_order.iter().copied());
    }

    let slots: Vec<usize> = original
        .iter()
        .enumerate()
        .filter(|(_, k)| in_scope(*k, sidebar_keys, scope))
        .map(|(i, _)| i)
        .collect();
    let members: Vec<SectionKey> = slots.iter().map(|&i| original.as_slice()[i]).collect();

    let mut placed: Vec<Option<SectionKey>> = vec![None; slots.len()];
    let mut used: Vec<SectionKey> = Vec::with_capacity(slots.len());

    for (slot, candidate) in placed.iter_mut().zip(new_region_order.iter()) {
        if members.contains(candidate) && !used.contains(candidate) {
            *slot = Some(*candidate);
            used.push(*candidate);
        } else {
            debug!("Ignoring section '{candidate}' outside the {scope:?} region");
        }
    }

    // Unresolved slots: prior occupant first, else the first unplaced member.
    for (i, slot) in placed.iter_mut().enumerate() {
        if slot.is_some() {
            continue;
        }
        let fallback = if used.contains(&members[i]) {
            members.iter().copied().find(|m| !used.contains(m))
        } else {
            Some(members[i])
        };
        if let Some(key) = fallback {
            *slot = Some(key);
            used.push(key);
        }
    }

    let mut keys = original.as_slice().to_vec();
    for (&index, key) in slots.iter().zip(placed) {
        if let Some(key) = key {
            keys[index] = key;
        }
    }
    SectionOrder::from_keys(keys)
}

#[cfg(test)]
mod tests {
    use super::*;
    use SectionKey::*;

    const SIDEBAR: &[SectionKey] = &[Skills, Certifications, Education];

    fn interleaved() -> SectionOrder {
        SectionOrder::from_keys([Summary, Skills, Experience, Education, Projects, Certifications])
    }

    #[test]
    fn test_split_preserves_relative_order() {
        let regions = split(&interleaved(), SIDEBAR);
        assert_eq!(regions.main, vec![Summary, Experience, Projects]);
        assert_eq!(regions.sidebar, vec![Skills, Education, Certifications]);
    }

    #[test]
    fn test_split_with_empty_sidebar_puts_everything_in_main() {
        let order = interleaved();
        let regions = split(&order, &[]);
        assert_eq!(regions.main, order.as_slice());
        assert!(regions.sidebar.is_empty());
    }

    #[test]
    fn test_split_then_merge_round_trips() {
        let sidebars: [&[SectionKey]; 4] = [&[], SIDEBAR, &[Summary], &SectionKey::ALL];
        let mut orders = vec![interleaved()];
        for shift in 0..SectionKey::ALL.len() {
            let mut keys = SectionKey::ALL.to_vec();
            keys.rotate_left(shift);
            orders.push(SectionOrder::from_keys(keys.iter().copied()));
            keys.reverse();
            orders.push(SectionOrder::from_keys(keys));
        }

        for order in &orders {
            for sidebar in sidebars {
                let regions = split(order, sidebar);
                let context = format!("{order:?} with sidebar {sidebar:?}");
                assert_eq!(&merge(order, sidebar, Scope::Main, &regions.main), order, "{context}");
                assert_eq!(
                    &merge(order, sidebar, Scope::Sidebar, &regions.sidebar),
                    order,
                    "{context}"
                );
                assert_eq!(&merge(order, sidebar, Scope::All, order.as_slice()), order, "{context}");
            }
        }
    }

    #[test]
    fn test_merge_reinserts_into_region_slots_only() {
        let order = interleaved();
        let merged = merge(&order, SIDEBAR, Scope::Sidebar, &[Certifications, Skills, Education]);
        assert_eq!(
            merged.as_slice(),
            &[Summary, Certifications, Experience, Skills, Projects, Education]
        );
    }

    #[test]
    fn test_merge_ignores_foreign_key_and_keeps_prior_occupant() {
        let order = interleaved();
        // Summary belongs to main; its slot in the sidebar keeps Skills.
        let merged = merge(&order, SIDEBAR, Scope::Sidebar, &[Summary, Certifications, Education]);
        assert_eq!(
            merged.as_slice(),
            &[Summary, Skills, Experience, Certifications, Projects, Education]
        );
    }

    #[test]
    fn test_merge_never_loses_or_duplicates_keys_on_corrupt_payload() {
        let order = interleaved();
        let payloads: [&[SectionKey]; 4] = [
            &[Skills, Skills, Skills],
            &[Education],
            &[],
            &[Projects, Summary, Skills, Education, Certifications, Experience],
        ];
        for payload in payloads {
            for scope in [Scope::Main, Scope::Sidebar, Scope::All] {
                let merged = merge(&order, SIDEBAR, scope, payload);
                assert_eq!(merged.as_slice().len(), SectionKey::ALL.len());
                for key in SectionKey::ALL {
                    assert!(merged.position(key).is_some(), "{key} lost for {payload:?}");
                }
                if scope != Scope::All {
                    let untouched = if scope == Scope::Main { Scope::Sidebar } else { Scope::Main };
                    assert_eq!(
                        region_of(&merged, SIDEBAR, untouched),
                        region_of(&order, SIDEBAR, untouched)
                    );
                }
            }
        }
    }

    #[test]
    fn test_merge_repeated_candidate_keeps_prior_occupant() {
        let order = interleaved();
        let merged = merge(&order, SIDEBAR, Scope::Sidebar, &[Education, Skills, Skills]);
        assert_eq!(
            split(&merged, SIDEBAR).sidebar,
            vec![Education, Skills, Certifications]
        );
    }

    #[test]
    fn test_merge_fills_slot_with_unplaced_member_when_occupant_moved() {
        let order = interleaved();
        // Education moved to slot 0, so slot 1 cannot keep it.
        let merged = merge(&order, SIDEBAR, Scope::Sidebar, &[Education, Summary, Summary]);
        assert_eq!(
            split(&merged, SIDEBAR).sidebar,
            vec![Education, Skills, Certifications]
        );
        assert_eq!(split(&merged, SIDEBAR).main, split(&order, SIDEBAR).main);
    }
}
