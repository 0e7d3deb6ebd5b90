//! In-memory recording surface for tests.
//!
//! # Why a recording surface?
//!
//! A real host synthesizes events inside a page, which a Rust test cannot
//! observe.  `RecordingSurface` implements [`ActionsHost`] with plain data
//! instead: a fixed viewport, a map of element ids to client rects, and a
//! `Mutex<Vec<...>>` that every dispatched event is pushed into together with
//! the engine clock time it arrived at.  Tests assert on that list.
//!
//! # Usage in tests
//!
//! ```ignore
//! let surface = RecordingSurface::new(Viewport::new(800.0, 600.0))
//!     .with_element("button", vec![Rect::new(10.0, 10.0, 20.0, 20.0)]);
//! let state = ActionState::new();
//!
//! state.perform_actions(&surface, &payload).await?;
//!
//! assert_eq!(surface.operations(), vec!["synthesizeMouseAtPoint"]);
//! ```
//!
//! # `should_fail` flag
//!
//! Set `should_fail = true` to make every `dispatch_event` call fail with
//! [`ActionError::Dispatch`].

use std::collections::HashMap;
use std::sync::{Mutex, PoisonError};

use async_trait::async_trait;
use tokio::time::Instant;

use actions_core::{
    assert_target_in_viewport, ActionError, ElementRef, Point, Rect, SyntheticEvent, Viewport,
};

use crate::application::host::ActionsHost;

/// One event as seen by the surface.
#[derive(Debug, Clone, PartialEq)]
pub struct RecordedEvent {
    /// Engine clock time at which the event was dispatched.
    pub at: Instant,
    pub event: SyntheticEvent,
}

/// A host that records every synthesized event in memory.
#[derive(Debug)]
pub struct RecordingSurface {
    pub viewport: Viewport,
    elements: HashMap<String, Vec<Rect>>,
    events: Mutex<Vec<RecordedEvent>>,
    /// When `true`, every dispatch returns an `ActionError::Dispatch`.
    pub should_fail: bool,
    pub ctrl_click_is_secondary: bool,
}

impl RecordingSurface {
    pub fn new(viewport: Viewport) -> Self {
        Self {
            viewport,
            elements: HashMap::new(),
            events: Mutex::new(Vec::new()),
            should_fail: false,
            ctrl_click_is_secondary: false,
        }
    }

    /// Registers an element with the given client rects.
    pub fn with_element(mut self, id: &str, rects: Vec<Rect>) -> Self {
        self.elements.insert(id.to_string(), rects);
        self
    }

    /// Everything dispatched so far, oldest first.
    pub fn events(&self) -> Vec<RecordedEvent> {
        self.events
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Operation names of everything dispatched so far.
    pub fn operations(&self) -> Vec<&'static str> {
        self.events().iter().map(|r| r.event.operation()).collect()
    }

    /// Forgets the recorded events.
    pub fn clear(&self) {
        self.events
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clear();
    }
}

#[async_trait]
impl ActionsHost for RecordingSurface {
    async fn get_element_origin(&self, element: ElementRef) -> Result<ElementRef, ActionError> {
        if self.elements.contains_key(&element.0) {
            Ok(element)
        } else {
            Err(ActionError::NoSuchElement(format!(
                "The element reference of {} is stale or unknown",
                element.0
            )))
        }
    }

    async fn assert_in_viewport(&self, target: Point) -> Result<(), ActionError> {
        assert_target_in_viewport(target, self.viewport)
    }

    async fn dispatch_event(&self, event: SyntheticEvent) -> Result<(), ActionError> {
        if self.should_fail {
            return Err(ActionError::Dispatch("mock failure".into()));
        }
        self.events
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(RecordedEvent {
                at: Instant::now(),
                event,
            });
        Ok(())
    }

    async fn get_client_rects(&self, element: &ElementRef) -> Result<Vec<Rect>, ActionError> {
        self.elements
            .get(&element.0)
            .cloned()
            .ok_or_else(|| ActionError::NoSuchElement(element.0.clone()))
    }

    async fn get_in_view_centre_point(&self, rect: &Rect) -> Result<Point, ActionError> {
        Ok(rect.in_view_centre(self.viewport))
    }

    fn ctrl_click_is_secondary(&self) -> bool {
        self.ctrl_click_is_secondary
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
