//! Composite dispatch of touch pointer actions.
//!
//! # Why touch is different (for beginners)
//!
//! A mouse event describes one pointer.  A touch event describes *every*
//! finger on the screen at that moment.  When two fingers go down in the same
//! tick the page must see one `touchstart` with two contacts, not two
//! separate events.  The tick scheduler therefore groups all touch actions
//! of one subtype and hands each group to the functions below.
//!
//! Fingers that are already down and not acting in this tick still appear
//! in `touchstart` and `touchmove` as passive contacts.

use tracing::trace;

use actions_core::domain::event::TouchEventKind;
use actions_core::{
    Action, ActionError, InputState, MultiTouchEventData, Point, PointerButtonAction,
    PointerInputSource, PointerMoveAction, PointerType, SourceType, SyntheticEvent,
};

use super::host::ActionsHost;
use super::motion::MoveOverTime;
use super::origin::target_coordinates;
use super::state::ActionState;

/// Touch devices holding the primary contact that are not in `acting`.
fn passive_contacts(input: &InputState, acting: &[&str]) -> Vec<PointerInputSource> {
    input
        .sources_by_type(SourceType::Pointer)
        .filter(|(id, _)| !acting.contains(id))
        .filter_map(|(_, source)| source.as_pointer())
        .filter(|pointer| pointer.pointer_type == PointerType::Touch)
        .filter(|pointer| pointer.is_pressed(0))
        .cloned()
        .collect()
}

/// Presses every touch pointer in `actions` with one `touchstart`.
///
/// Pointers whose button is already held are skipped; if none remain,
/// nothing is dispatched.
pub async fn dispatch_touch_down(
    state: &ActionState,
    host: &dyn ActionsHost,
    actions: &[&PointerButtonAction],
) -> Result<(), ActionError> {
    trace!(
        "Dispatch touch pointerDown group with {:?}",
        actions.iter().map(|a| a.id.as_str()).collect::<Vec<_>>()
    );

    let prepared = state.with_input(
        |input| -> Result<Option<(MultiTouchEventData, Vec<Action>)>, ActionError> {
            let mut data =
                MultiTouchEventData::new(TouchEventKind::TouchStart, input.global_modifiers());
            let mut cancels = Vec::new();

            for action in actions {
                let pointer = input.pointer_source_mut(&action.id)?;
                if pointer.is_pressed(action.button) {
                    continue;
                }
                data.add_contact(pointer, Some(&action.properties));
                pointer.press(action.button);
                data.merge_buttons(pointer);
                cancels.push(Action::PointerUp((*action).clone()));
            }
            if cancels.is_empty() {
                return Ok(None);
            }

            let acting: Vec<&str> = actions.iter().map(|a| a.id.as_str()).collect();
            for pointer in passive_contacts(input, &acting) {
                data.add_contact(&pointer, None);
                data.merge_buttons(&pointer);
            }
            Ok(Some((data, cancels)))
        },
    )?;

    let Some((event_data, cancels)) = prepared else {
        return Ok(());
    };
    host.dispatch_event(SyntheticEvent::SynthesizeMultiTouch { event_data })
        .await?;

    state.with_input(|input| {
        for cancel in cancels {
            input.push_cancel(cancel);
        }
    });
    Ok(())
}

/// Lifts every held touch pointer in `actions` with one `touchend`.
pub async fn dispatch_touch_up(
    state: &ActionState,
    host: &dyn ActionsHost,
    actions: &[&PointerButtonAction],
) -> Result<(), ActionError> {
    trace!(
        "Dispatch touch pointerUp group with {:?}",
        actions.iter().map(|a| a.id.as_str()).collect::<Vec<_>>()
    );

    let event_data = state.with_input(|input| -> Result<Option<MultiTouchEventData>, ActionError> {
        let mut data = MultiTouchEventData::new(TouchEventKind::TouchEnd, input.global_modifiers());

        for action in actions {
            let pointer = input.pointer_source_mut(&action.id)?;
            if !pointer.is_pressed(action.button) {
                continue;
            }
            data.add_contact(pointer, Some(&action.properties));
            pointer.release(action.button);
            data.merge_buttons(pointer);
        }
        Ok((!data.touches.is_empty()).then_some(data))
    })?;

    let Some(event_data) = event_data else {
        return Ok(());
    };
    host.dispatch_event(SyntheticEvent::SynthesizeMultiTouch { event_data })
        .await
}

/// Moves every touch pointer in `actions` together, one `touchmove` per
/// frame.
///
/// The group runs for the longest explicit duration among its actions, or
/// `tick_duration` when none gave one.
pub async fn dispatch_touch_move(
    state: &ActionState,
    host: &dyn ActionsHost,
    actions: &[&PointerMoveAction],
    tick_duration: u64,
) -> Result<(), ActionError> {
    trace!(
        "Dispatch touch pointerMove group with {:?}",
        actions.iter().map(|a| a.id.as_str()).collect::<Vec<_>>()
    );

    let mut starts = Vec::with_capacity(actions.len());
    let mut targets = Vec::with_capacity(actions.len());
    for action in actions {
        let start =
            state.with_input(|input| input.pointer_source(&action.id).map(|p| p.position()))?;
        let target =
            target_coordinates(host, &action.origin, start, Point::new(action.x, action.y))
                .await?;
        host.assert_in_viewport(target).await?;

        starts.push(start);
        targets.push(target);
    }

    let acting: Vec<&str> = actions.iter().map(|a| a.id.as_str()).collect();
    let static_ids: Vec<u32> = state.with_input(|input| {
        passive_contacts(input, &acting)
            .iter()
            .map(|p| p.pointer_id)
            .collect()
    });

    let duration = actions
        .iter()
        .filter_map(|a| a.duration)
        .max()
        .unwrap_or(tick_duration);
    let mut motion = MoveOverTime::new(starts, targets, duration)?;

    while let Some(step) = motion.next_step().await {
        let event_data = state.with_input(|input| -> Result<Option<MultiTouchEventData>, ActionError> {
            let mut reached = true;
            for (action, &to) in actions.iter().zip(&step) {
                reached &= input.pointer_source(&action.id)?.position() == to;
            }
            if reached {
                return Ok(None);
            }

            let mut data =
                MultiTouchEventData::new(TouchEventKind::TouchMove, input.global_modifiers());
            for (action, &to) in actions.iter().zip(&step) {
                let pointer = input.pointer_source_mut(&action.id)?;
                pointer.set_position(to);
                data.add_contact(pointer, Some(&action.properties));
                data.merge_buttons(pointer);
            }
            for pointer in passive_contacts(input, &acting)
                .iter()
                .filter(|p| static_ids.contains(&p.pointer_id))
            {
                data.add_contact(pointer, None);
                data.merge_buttons(pointer);
            }
            Ok(Some(data))
        })?;

        if let Some(event_data) = event_data {
            host.dispatch_event(SyntheticEvent::SynthesizeMultiTouch { event_data })
                .await?;
        }
    }

    Ok(())
}
