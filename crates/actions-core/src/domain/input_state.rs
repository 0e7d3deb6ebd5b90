//! Per-session input state: the device registry and everything that must
//! survive from one action request to the next.
//!
//! # What lives here (for beginners)
//!
//! WebDriver keeps input devices alive across requests.  If one request
//! presses Shift and never releases it, the next request still sees Shift
//! held.  `InputState` is the place that remembers:
//!
//! - every device registered so far, in registration order,
//! - the numeric pointer id handed to each pointer device,
//! - the shared click tracker,
//! - the *input cancel list*: one release action for every key or button
//!   pressed so far, so a later "release actions" can undo them.
//!
//! The async serialization queue that guards this state lives in the engine
//! crate; this type is plain data.

use std::collections::HashMap;

use tracing::trace;

use crate::domain::action::Action;
use crate::domain::click_tracker::ClickTracker;
use crate::domain::event::Modifiers;
use crate::domain::input_source::{
    InputSource, KeyInputSource, PointerInputSource, PointerType, SourceType,
};
use crate::error::ActionError;

/// Registry of virtual devices for one session scope.
#[derive(Debug, Default)]
pub struct InputState {
    /// Device ids in registration order.
    order: Vec<String>,
    sources: HashMap<String, InputSource>,
    pointer_ids: HashMap<String, u32>,
    cancel_list: Vec<Action>,
    pub click_tracker: ClickTracker,
}

impl InputState {
    pub fn new() -> Self {
        Self::default()
    }

    // ── Device registry ───────────────────────────────────────────────────────

    /// Returns the device registered under `id`, creating it if needed.
    ///
    /// `pointer_type` is only consulted for pointer devices.
    ///
    /// # Errors
    ///
    /// [`ActionError::InvalidArgument`] when `id` is already registered with
    /// a different device type or pointer type.
    pub fn get_or_add(
        &mut self,
        id: &str,
        source_type: SourceType,
        pointer_type: PointerType,
    ) -> Result<&mut InputSource, ActionError> {
        if let Some(existing) = self.sources.get(id) {
            if existing.source_type() != source_type {
                return Err(ActionError::invalid(format!(
                    "Expected input source {id} to be type {}, got {source_type}",
                    existing.source_type()
                )));
            }
            if let InputSource::Pointer(pointer) = existing {
                if pointer.pointer_type != pointer_type {
                    return Err(ActionError::invalid(format!(
                        "Expected input source {id} to be pointer type {}, got {pointer_type}",
                        pointer.pointer_type
                    )));
                }
            }
        } else {
            let source = match source_type {
                SourceType::None => InputSource::Null,
                SourceType::Key => InputSource::Key(KeyInputSource::new()),
                SourceType::Pointer => {
                    let pointer_id = self.pointer_id(id, pointer_type);
                    InputSource::Pointer(PointerInputSource::new(pointer_type, pointer_id))
                }
                SourceType::Wheel => InputSource::Wheel,
            };
            trace!("Registering {source_type} input source {id}");
            self.order.push(id.to_string());
            self.sources.insert(id.to_string(), source);
        }

        self.sources
            .get_mut(id)
            .ok_or_else(|| ActionError::Internal(format!("input source {id} vanished")))
    }

    pub fn source(&self, id: &str) -> Option<&InputSource> {
        self.sources.get(id)
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// `(id, device)` pairs of the given type, in registration order.
    pub fn sources_by_type(
        &self,
        source_type: SourceType,
    ) -> impl Iterator<Item = (&str, &InputSource)> + '_ {
        self.order.iter().filter_map(move |id| {
            self.sources
                .get(id)
                .filter(|source| source.source_type() == source_type)
                .map(|source| (id.as_str(), source))
        })
    }

    /// The key device `id`.
    ///
    /// # Errors
    ///
    /// [`ActionError::Internal`] when `id` is unknown or not a key device.
    pub fn key_source_mut(&mut self, id: &str) -> Result<&mut KeyInputSource, ActionError> {
        match self.sources.get_mut(id) {
            Some(InputSource::Key(key)) => Ok(key),
            _ => Err(ActionError::Internal(format!(
                "Expected {id} to be a registered key input source"
            ))),
        }
    }

    /// The pointer device `id`.
    ///
    /// # Errors
    ///
    /// [`ActionError::Internal`] when `id` is unknown or not a pointer.
    pub fn pointer_source(&self, id: &str) -> Result<&PointerInputSource, ActionError> {
        match self.sources.get(id) {
            Some(InputSource::Pointer(pointer)) => Ok(pointer),
            _ => Err(ActionError::Internal(format!(
                "Expected {id} to be a registered pointer input source"
            ))),
        }
    }

    /// Mutable variant of [`Self::pointer_source`].
    pub fn pointer_source_mut(&mut self, id: &str) -> Result<&mut PointerInputSource, ActionError> {
        match self.sources.get_mut(id) {
            Some(InputSource::Pointer(pointer)) => Ok(pointer),
            _ => Err(ActionError::Internal(format!(
                "Expected {id} to be a registered pointer input source"
            ))),
        }
    }

    // ── Pointer ids ───────────────────────────────────────────────────────────

    /// Numeric pointer id for device `id`, allocated on first request.
    ///
    /// Mice take the lowest free id of 0 and 1.  Every other pointer (and a
    /// third mouse) gets one more than the largest id handed out so far, and
    /// never less than 2.
    pub fn pointer_id(&mut self, id: &str, pointer_type: PointerType) -> u32 {
        if let Some(&allocated) = self.pointer_ids.get(id) {
            return allocated;
        }

        let taken = |candidate: u32| self.pointer_ids.values().any(|&v| v == candidate);
        let mouse_id = match pointer_type {
            PointerType::Mouse => [0, 1].into_iter().find(|&candidate| !taken(candidate)),
            _ => None,
        };
        let allocated = mouse_id.unwrap_or_else(|| {
            self.pointer_ids.values().copied().fold(1, u32::max) + 1
        });

        self.pointer_ids.insert(id.to_string(), allocated);
        allocated
    }

    // ── Cancel list ───────────────────────────────────────────────────────────

    /// Records the action that undoes a press.
    pub fn push_cancel(&mut self, action: Action) {
        self.cancel_list.push(action);
    }

    /// Pending release actions, oldest first.
    pub fn cancel_list(&self) -> &[Action] {
        &self.cancel_list
    }

    /// Drains the pending release actions, oldest first.
    pub fn take_cancel_list(&mut self) -> Vec<Action> {
        std::mem::take(&mut self.cancel_list)
    }

    // ── Modifiers ─────────────────────────────────────────────────────────────

    /// Modifier flags held by any key device.
    pub fn global_modifiers(&self) -> Modifiers {
        self.sources_by_type(SourceType::Key)
            .filter_map(|(_, source)| source.as_key())
            .fold(Modifiers::default(), |acc, key| acc.union(key.modifiers))
    }

    /// Forgets every device, pointer id, pending release and click run.
    pub fn reset(&mut self) {
        self.order.clear();
        self.sources.clear();
        self.pointer_ids.clear();
        self.cancel_list.clear();
        self.click_tracker.reset();
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::action::KeyAction;
    use crate::keymap::ModifierKey;

    #[test]
    fn test_first_two_mice_get_zero_and_one() {
        // Arrange
        let mut state = InputState::new();

        // Act
        let first = state.pointer_id("m1", PointerType::Mouse);
        let second = state.pointer_id("m2", PointerType::Mouse);
        let touch = state.pointer_id("t1", PointerType::Touch);

        // Assert
        assert_eq!((first, second, touch), (0, 1, 2));
    }

    #[test]
    fn test_lone_touch_pointer_gets_two() {
        let mut state = InputState::new();
        assert_eq!(state.pointer_id("t1", PointerType::Touch), 2);
        assert_eq!(state.pointer_id("t2", PointerType::Touch), 3);
    }

    #[test]
    fn test_mouse_after_touch_still_gets_zero() {
        let mut state = InputState::new();
        state.pointer_id("t1", PointerType::Touch);
        assert_eq!(state.pointer_id("m1", PointerType::Mouse), 0);
    }

    #[test]
    fn test_third_mouse_gets_next_free_id() {
        let mut state = InputState::new();
        state.pointer_id("m1", PointerType::Mouse);
        state.pointer_id("m2", PointerType::Mouse);
        assert_eq!(state.pointer_id("m3", PointerType::Mouse), 2);
    }

    #[test]
    fn test_pointer_id_is_stable() {
        let mut state = InputState::new();
        let first = state.pointer_id("p", PointerType::Pen);
        assert_eq!(state.pointer_id("p", PointerType::Pen), first);
    }

    #[test]
    fn test_get_or_add_rejects_type_mismatch() {
        // Arrange
        let mut state = InputState::new();
        state
            .get_or_add("dev", SourceType::Key, PointerType::Mouse)
            .unwrap();

        // Act
        let err = state
            .get_or_add("dev", SourceType::Pointer, PointerType::Mouse)
            .unwrap_err();

        // Assert
        assert!(matches!(err, ActionError::InvalidArgument(_)));
    }

    #[test]
    fn test_get_or_add_rejects_pointer_type_mismatch() {
        let mut state = InputState::new();
        state
            .get_or_add("p", SourceType::Pointer, PointerType::Mouse)
            .unwrap();
        let err = state
            .get_or_add("p", SourceType::Pointer, PointerType::Touch)
            .unwrap_err();
        assert!(matches!(err, ActionError::InvalidArgument(_)));
    }

    #[test]
    fn test_sources_by_type_keeps_registration_order() {
        let mut state = InputState::new();
        for id in ["t2", "k", "t1", "t3"] {
            let source_type = if id == "k" {
                SourceType::Key
            } else {
                SourceType::Pointer
            };
            state.get_or_add(id, source_type, PointerType::Touch).unwrap();
        }

        let ids: Vec<&str> = state
            .sources_by_type(SourceType::Pointer)
            .map(|(id, _)| id)
            .collect();

        assert_eq!(ids, vec!["t2", "t1", "t3"]);
    }

    #[test]
    fn test_global_modifiers_union_over_key_devices() {
        let mut state = InputState::new();
        state.get_or_add("k1", SourceType::Key, PointerType::Mouse).unwrap();
        state.get_or_add("k2", SourceType::Key, PointerType::Mouse).unwrap();
        state
            .key_source_mut("k1")
            .unwrap()
            .set_modifier(ModifierKey::Shift, true);
        state
            .key_source_mut("k2")
            .unwrap()
            .set_modifier(ModifierKey::Control, true);

        let modifiers = state.global_modifiers();

        assert!(modifiers.shift && modifiers.ctrl);
        assert!(!modifiers.alt && !modifiers.meta);
    }

    #[test]
    fn test_take_cancel_list_drains() {
        let mut state = InputState::new();
        state.push_cancel(Action::KeyUp(KeyAction {
            id: "k".into(),
            value: "a".into(),
        }));

        assert_eq!(state.take_cancel_list().len(), 1);
        assert!(state.cancel_list().is_empty());
    }

    #[test]
    fn test_reset_is_idempotent_and_frees_pointer_ids() {
        let mut state = InputState::new();
        state
            .get_or_add("m1", SourceType::Pointer, PointerType::Mouse)
            .unwrap();
        state.get_or_add("m2", SourceType::Pointer, PointerType::Mouse).unwrap();

        state.reset();
        state.reset();

        assert!(state.is_empty());
        assert_eq!(state.pointer_id("m2", PointerType::Mouse), 0);
    }

    #[test]
    fn test_typed_lookup_of_wrong_kind_is_internal_error() {
        let mut state = InputState::new();
        state.get_or_add("w", SourceType::Wheel, PointerType::Mouse).unwrap();
        assert!(matches!(
            state.pointer_source("w"),
            Err(ActionError::Internal(_))
        ));
        assert!(matches!(
            state.key_source_mut("missing"),
            Err(ActionError::Internal(_))
        ));
    }
}
