//! Headless surface that writes synthesized events as JSON lines.
//!
//! There is no page behind this surface.  Element geometry and the viewport
//! come from [`EngineConfig`]; every synthesized event is serialized with
//! `serde_json` and written as one line to the configured sink (stdout or a
//! file).  The output is a faithful transcript of what a browser host would
//! have been asked to synthesize, which makes it useful for replaying
//! captured payloads and diffing the results.

use std::collections::HashMap;
use std::io::Write;
use std::sync::{Mutex, PoisonError};

use async_trait::async_trait;
use tracing::debug;

use actions_core::{
    assert_target_in_viewport, ActionError, ElementRef, Point, Rect, SyntheticEvent, Viewport,
};

use crate::application::host::ActionsHost;
use crate::infrastructure::storage::config::EngineConfig;

/// A host that serializes every event to a line-oriented sink.
pub struct HeadlessSurface {
    viewport: Viewport,
    elements: HashMap<String, Vec<Rect>>,
    ctrl_click_is_secondary: bool,
    sink: Mutex<Box<dyn Write + Send>>,
}

impl HeadlessSurface {
    /// Builds a surface from the configured viewport, platform and elements.
    pub fn new(config: &EngineConfig, sink: Box<dyn Write + Send>) -> Self {
        Self {
            viewport: config.viewport.to_viewport(),
            elements: config
                .elements
                .iter()
                .map(|entry| (entry.id.clone(), entry.rects.clone()))
                .collect(),
            ctrl_click_is_secondary: config.platform.ctrl_click_is_secondary,
            sink: Mutex::new(sink),
        }
    }

    /// Flushes buffered output.
    ///
    /// # Errors
    ///
    /// Returns the underlying I/O error.
    pub fn flush(&self) -> std::io::Result<()> {
        self.sink
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .flush()
    }
}

#[async_trait]
impl ActionsHost for HeadlessSurface {
    async fn get_element_origin(&self, element: ElementRef) -> Result<ElementRef, ActionError> {
        if self.elements.contains_key(&element.0) {
            Ok(element)
        } else {
            Err(ActionError::NoSuchElement(format!(
                "The element reference of {} is not known to the headless surface",
                element.0
            )))
        }
    }

    async fn assert_in_viewport(&self, target: Point) -> Result<(), ActionError> {
        assert_target_in_viewport(target, self.viewport)
    }

    async fn dispatch_event(&self, event: SyntheticEvent) -> Result<(), ActionError> {
        debug!("{}", event.operation());

        let line = serde_json::to_string(&event)
            .map_err(|e| ActionError::Internal(format!("failed to serialize event: {e}")))?;
        let mut sink = self.sink.lock().unwrap_or_else(PoisonError::into_inner);
        writeln!(sink, "{line}")
            .map_err(|e| ActionError::Dispatch(format!("failed to write event: {e}")))
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
