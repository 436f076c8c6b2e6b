//! Drag session state machine for section reordering.
//!
//! `Idle -> Dragging -> Hovering -> {Dropped | Cancelled}`. The session holds
//! only the keys involved; the document is touched once, on a drop over a
//! valid target, through `reorder::drop_on_target`.

use crate::models::resume::ResumeDocument;
use crate::sections::key::SectionKey;
use crate::sections::regions::Scope;
use crate::sections::reorder::drop_on_target;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DragState {
    Idle,
    Dragging { source: SectionKey },
    Hovering { source: SectionKey, target: SectionKey },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DragOutcome {
    /// Dropped on a target; `changed` is false when the drop was a no-op.
    Dropped { changed: bool },
    Cancelled,
}

/// One drag gesture inside a single region.
#[derive(Debug, Clone)]
pub struct DragSession {
    scope: Scope,
    state: DragState,
}

impl DragSession {
    pub fn new(scope: Scope) -> Self {
        DragSession {
            scope,
            state: DragState::Idle,
        }
    }

    pub fn state(&self) -> DragState {
        self.state
    }

    /// Drag start is disabled while a drag is active.
    pub fn can_start(&self) -> bool {
        self.state == DragState::Idle
    }

    /// Starts dragging `source`. Returns `false` (and changes nothing) if a drag is active.
    pub fn start(&mut self, source: SectionKey) -> bool {
        if !self.can_start() {
            return false;
        }
        self.state = DragState::Dragging { source };
        true
    }

    /// Pointer entered a drop target.
    pub fn hover(&mut self, target: SectionKey) {
        self.state = match self.state {
            DragState::Dragging { source } | DragState::Hovering { source, .. } => {
                DragState::Hovering { source, target }
            }
            DragState::Idle => DragState::Idle,
        };
    }

    /// Pointer left the current drop target.
    pub fn leave(&mut self) {
        if let DragState::Hovering { source, .. } = self.state {
            self.state = DragState::Dragging { source };
        }
    }

    /// Pointer released. Commits only when hovering a target; a release
    /// anywhere else cancels. The session is `Idle` afterwards either way.
    pub fn release(
        &mut self,
        doc: &mut ResumeDocument,
        sidebar_keys: &[SectionKey],
    ) -> DragOutcome {
        let state = std::mem::replace(&mut self.state, DragState::Idle);
        match state {
            DragState::Hovering { source, target } => DragOutcome::Dropped {
                changed: drop_on_target(doc, source, target, self.scope, sidebar_keys),
            },
            DragState::Dragging { .. } | DragState::Idle => DragOutcome::Cancelled,
        }
    }

    /// Abandons the gesture without touching any document.
    pub fn cancel(&mut self) -> DragOutcome {
        self.state = DragState::Idle;
        DragOutcome::Cancelled
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use SectionKey::*;

    #[test]
    fn test_drop_on_hovered_target_commits() {
        let mut doc = ResumeDocument::default();
        let mut session = DragSession::new(Scope::All);
        assert!(session.start(Certifications));
        session.hover(Summary);

        let outcome = session.release(&mut doc, &[]);
        assert_eq!(outcome, DragOutcome::Dropped { changed: true });
        assert_eq!(doc.section_order().as_slice()[0], Certifications);
        assert_eq!(session.state(), DragState::Idle);
    }

    #[test]
    fn test_cancel_leaves_document_byte_identical() {
        let mut doc = ResumeDocument::default();
        doc.personal_info.full_name = "Grace Hopper".to_string();
        let before = serde_json::to_vec(&doc).unwrap();

        let mut session = DragSession::new(Scope::All);
        session.start(Skills);
        session.hover(Summary);
        assert_eq!(session.cancel(), DragOutcome::Cancelled);
        assert_eq!(serde_json::to_vec(&doc).unwrap(), before);
        assert!(session.can_start());
    }

    #[test]
    fn test_release_outside_target_cancels() {
        let mut doc = ResumeDocument::default();
        let before = doc.clone();
        let mut session = DragSession::new(Scope::All);
        session.start(Skills);
        session.hover(Summary);
        session.leave();

        assert_eq!(session.release(&mut doc, &[]), DragOutcome::Cancelled);
        assert_eq!(doc, before);
    }

    #[test]
    fn test_second_drag_cannot_start_while_active() {
        let mut session = DragSession::new(Scope::Main);
        assert!(session.start(Experience));
        assert!(!session.can_start());
        assert!(!session.start(Projects));
        session.hover(Summary);
        assert!(!session.start(Projects));
        assert_eq!(
            session.state(),
            DragState::Hovering {
                source: Experience,
                target: Summary
            }
        );
    }

    #[test]
    fn test_hover_without_drag_is_ignored() {
        let mut session = DragSession::new(Scope::All);
        session.hover(Summary);
        assert_eq!(session.state(), DragState::Idle);
    }

    #[test]
    fn test_drop_on_target_outside_region_reports_unchanged() {
        let mut doc = ResumeDocument::default();
        let before = doc.clone();
        let mut session = DragSession::new(Scope::Sidebar);
        session.start(Skills);
        session.hover(Summary);
        let outcome = session.release(&mut doc, &[Skills, Certifications]);
        assert_eq!(outcome, DragOutcome::Dropped { changed: false });
        assert_eq!(doc, before);
    }
}
