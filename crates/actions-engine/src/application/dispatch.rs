//! Dispatch of a single action against the session state.
//!
//! # The shape of every dispatch (for beginners)
//!
//! Each action follows the same three steps:
//!
//! 1. Lock the device registry, update the device (press a key, release a
//!    button), build the event payload, unlock.
//! 2. Hand the payload to the host and `.await` the synthesis.
//! 3. If the press succeeded, remember how to undo it in the cancel list.
//!
//! The registry lock is never held across an `.await`, so while one action
//! sleeps between move frames the other actions of the same tick keep
//! running.
//!
//! Touch pointer actions normally arrive here already grouped by
//! [`super::tick`]; a lone touch action is routed to [`super::touch`] as a
//! group of one.

use std::time::Duration;

use tokio::time::{sleep, Instant};
use tracing::trace;

use actions_core::domain::event::{MouseEventKind, SECONDARY_BUTTON};
use actions_core::keymap;
use actions_core::{
    Action, ActionError, KeyAction, KeyEventData, MouseEventData, PauseAction, Point,
    PointerButtonAction, PointerMoveAction, PointerType, SyntheticEvent, WheelEventData,
    WheelScrollAction,
};

use super::host::ActionsHost;
use super::motion::MoveOverTime;
use super::origin::target_coordinates;
use super::state::ActionState;
use super::touch;

/// Current time on the engine clock, as used by the click tracker.
fn now() -> std::time::Instant {
    Instant::now().into_std()
}

/// Dispatches one action.
///
/// `tick_duration` is the default duration for pauses, moves and scrolls
/// that did not specify their own.
pub async fn dispatch_action(
    state: &ActionState,
    host: &dyn ActionsHost,
    action: &Action,
    tick_duration: u64,
) -> Result<(), ActionError> {
    trace!(
        "Dispatch {} {} for {}",
        action.source_type(),
        action.subtype(),
        action.id()
    );

    match action {
        Action::Pause(pause) => dispatch_pause(pause, tick_duration).await,
        Action::KeyDown(key) => dispatch_key_down(state, host, key).await,
        Action::KeyUp(key) => dispatch_key_up(state, host, key).await,
        Action::PointerDown(button) => {
            if is_touch(state, &button.id)? {
                return touch::dispatch_touch_down(state, host, &[button]).await;
            }
            dispatch_pointer_down(state, host, button).await
        }
        Action::PointerUp(button) => {
            if is_touch(state, &button.id)? {
                return touch::dispatch_touch_up(state, host, &[button]).await;
            }
            dispatch_pointer_up(state, host, button).await
        }
        Action::PointerMove(movement) => {
            if is_touch(state, &movement.id)? {
                return touch::dispatch_touch_move(state, host, &[movement], tick_duration).await;
            }
            dispatch_pointer_move(state, host, movement, tick_duration).await
        }
        Action::Scroll(scroll) => dispatch_scroll(state, host, scroll, tick_duration).await,
    }
}

fn is_touch(state: &ActionState, id: &str) -> Result<bool, ActionError> {
    state.with_input(|input| {
        input
            .pointer_source(id)
            .map(|pointer| pointer.pointer_type == PointerType::Touch)
    })
}

// ── Null ──────────────────────────────────────────────────────────────────────

async fn dispatch_pause(pause: &PauseAction, tick_duration: u64) -> Result<(), ActionError> {
    sleep(Duration::from_millis(pause.duration.unwrap_or(tick_duration))).await;
    Ok(())
}

// ── Keys ──────────────────────────────────────────────────────────────────────

async fn dispatch_key_down(
    state: &ActionState,
    host: &dyn ActionsHost,
    action: &KeyAction,
) -> Result<(), ActionError> {
    let event_data = state.with_input(|input| -> Result<KeyEventData, ActionError> {
        let source = input.key_source_mut(&action.id)?;
        let mut data = KeyEventData::new(&action.value, source);
        data.repeat = !source.press(&data.key);

        if let Some(modifier) = keymap::modifier_key(&data.key) {
            source.set_modifier(modifier, true);
            data.modifiers = source.modifiers;
        }
        Ok(data)
    })?;

    host.dispatch_event(SyntheticEvent::SynthesizeKeyDown { event_data })
        .await?;

    state.with_input(|input| input.push_cancel(Action::KeyUp(action.clone())));
    Ok(())
}

async fn dispatch_key_up(
    state: &ActionState,
    host: &dyn ActionsHost,
    action: &KeyAction,
) -> Result<(), ActionError> {
    let event_data = state.with_input(|input| -> Result<Option<KeyEventData>, ActionError> {
        let source = input.key_source_mut(&action.id)?;
        let mut data = KeyEventData::new(&action.value, source);
        if !source.is_pressed(&data.key) {
            return Ok(None);
        }

        if let Some(modifier) = keymap::modifier_key(&data.key) {
            source.set_modifier(modifier, false);
        }
        source.release(&data.key);
        data.modifiers = source.modifiers;
        Ok(Some(data))
    })?;

    let Some(event_data) = event_data else {
        trace!("Key {} of {} is not pressed", action.value, action.id);
        return Ok(());
    };
    host.dispatch_event(SyntheticEvent::SynthesizeKeyUp { event_data })
        .await
}

// ── Mouse and pen ─────────────────────────────────────────────────────────────

async fn dispatch_pointer_down(
    state: &ActionState,
    host: &dyn ActionsHost,
    action: &PointerButtonAction,
) -> Result<(), ActionError> {
    let ctrl_is_secondary = host.ctrl_click_is_secondary();

    let prepared = state.with_input(|input| -> Result<Option<(Point, Vec<MouseEventData>)>, ActionError> {
        let modifiers = input.global_modifiers();
        let pointer = input.pointer_source_mut(&action.id)?;
        if pointer.is_pressed(action.button) {
            return Ok(None);
        }
        pointer.press(action.button);
        let pointer = pointer.clone();

        let mut data =
            MouseEventData::new(MouseEventKind::MouseDown, action.button, &pointer, modifiers);
        if pointer.pointer_type != PointerType::Mouse {
            return Ok(Some((pointer.position(), vec![data])));
        }

        if modifiers.ctrl {
            if ctrl_is_secondary {
                data.button = SECONDARY_BUTTON;
                input.click_tracker.reset();
            }
        } else {
            data.click_count = Some(input.click_tracker.count(now()) + 1);
        }

        let mut events = vec![data.clone()];
        if data.button == SECONDARY_BUTTON || (modifiers.ctrl && ctrl_is_secondary) {
            events.push(MouseEventData {
                kind: MouseEventKind::ContextMenu,
                ..data
            });
        }
        Ok(Some((pointer.position(), events)))
    })?;

    let Some((at, events)) = prepared else {
        trace!("Button {} of {} is already pressed", action.button, action.id);
        return Ok(());
    };
    for event_data in events {
        host.dispatch_event(SyntheticEvent::SynthesizeMouseAtPoint {
            x: at.x,
            y: at.y,
            event_data,
        })
        .await?;
    }

    state.with_input(|input| input.push_cancel(Action::PointerUp(action.clone())));
    Ok(())
}

async fn dispatch_pointer_up(
    state: &ActionState,
    host: &dyn ActionsHost,
    action: &PointerButtonAction,
) -> Result<(), ActionError> {
    let prepared = state.with_input(|input| -> Result<Option<(Point, MouseEventData)>, ActionError> {
        let modifiers = input.global_modifiers();
        let pointer = input.pointer_source_mut(&action.id)?;
        if !pointer.release(action.button) {
            return Ok(None);
        }
        let pointer = pointer.clone();

        let mut data =
            MouseEventData::new(MouseEventKind::MouseUp, action.button, &pointer, modifiers);
        if pointer.pointer_type == PointerType::Mouse {
            let at = now();
            input.click_tracker.register_click(action.button, at);
            data.click_count = Some(input.click_tracker.count(at));
        }
        Ok(Some((pointer.position(), data)))
    })?;

    let Some((at, event_data)) = prepared else {
        trace!("Button {} of {} is not pressed", action.button, action.id);
        return Ok(());
    };
    host.dispatch_event(SyntheticEvent::SynthesizeMouseAtPoint {
        x: at.x,
        y: at.y,
        event_data,
    })
    .await
}

async fn dispatch_pointer_move(
    state: &ActionState,
    host: &dyn ActionsHost,
    action: &PointerMoveAction,
    tick_duration: u64,
) -> Result<(), ActionError> {
    let start = state.with_input(|input| input.pointer_source(&action.id).map(|p| p.position()))?;
    let target =
        target_coordinates(host, &action.origin, start, Point::new(action.x, action.y)).await?;
    host.assert_in_viewport(target).await?;

    let duration = action.duration.unwrap_or(tick_duration);
    let mut motion = MoveOverTime::new(vec![start], vec![target], duration)?;

    while let Some(step) = motion.next_step().await {
        let Some(&to) = step.first() else { break };

        let event_data = state.with_input(|input| -> Result<Option<MouseEventData>, ActionError> {
            let modifiers = input.global_modifiers();
            let pointer = input.pointer_source(&action.id)?;
            if pointer.position() == to {
                return Ok(None);
            }
            Ok(Some(MouseEventData::new(
                MouseEventKind::MouseMove,
                0,
                pointer,
                modifiers,
            )))
        })?;
        let Some(event_data) = event_data else {
            continue;
        };

        host.dispatch_event(SyntheticEvent::SynthesizeMouseAtPoint {
            x: to.x,
            y: to.y,
            event_data,
        })
        .await?;

        state.with_input(|input| -> Result<(), ActionError> {
            let pointer = input.pointer_source_mut(&action.id)?;
            pointer.set_position(to);
            if pointer.pointer_type == PointerType::Mouse {
                input.click_tracker.reset();
            }
            Ok(())
        })?;
    }

    Ok(())
}

// ── Wheel ─────────────────────────────────────────────────────────────────────

async fn dispatch_scroll(
    state: &ActionState,
    host: &dyn ActionsHost,
    action: &WheelScrollAction,
    tick_duration: u64,
) -> Result<(), ActionError> {
    let at = target_coordinates(
        host,
        &action.origin,
        Point::ORIGIN,
        Point::new(action.x as f64, action.y as f64),
    )
    .await?;
    host.assert_in_viewport(at).await?;

    let delta = Point::new(action.delta_x as f64, action.delta_y as f64);
    let duration = action.duration.unwrap_or(tick_duration);
    let mut motion = MoveOverTime::new(vec![Point::ORIGIN], vec![delta], duration)?;

    // Amount scrolled so far; each event carries only the increment.
    let mut scrolled = Point::ORIGIN;
    while let Some(step) = motion.next_step().await {
        let Some(&to) = step.first() else { break };
        if scrolled == delta {
            continue;
        }

        let modifiers = state.with_input(|input| input.global_modifiers());
        let event_data = WheelEventData {
            delta_x: to.x - scrolled.x,
            delta_y: to.y - scrolled.y,
            delta_z: 0.0,
            delta_mode: 0,
            modifiers,
        };
        host.dispatch_event(SyntheticEvent::SynthesizeWheelAtPoint {
            x: at.x,
            y: at.y,
            event_data,
        })
        .await?;

        scrolled = to;
    }

    Ok(())
}
