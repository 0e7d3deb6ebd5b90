//! Chain and tick dispatch.
//!
//! # Ticks are the unit of time (for beginners)
//!
//! A chain is a list of ticks.  The scheduler runs them strictly in order:
//! tick N+1 does not start until every action of tick N has finished.
//! Inside one tick, every device acts at the same time.  The tick lasts as
//! long as its slowest action, because [`try_join_all`] resolves only when
//! every action future has resolved.
//!
//! Before a tick runs, its touch pointer actions are pulled out and grouped
//! by subtype (all touch `pointerDown`s together, all touch `pointerMove`s
//! together, ...).  Each group becomes a single future that synthesizes one
//! composite multi-touch event per step.  The group takes the position of the
//! first action that created it.

use futures_util::future::{try_join_all, BoxFuture, FutureExt};
use tracing::{debug, trace, warn};

use actions_core::{Action, ActionError, Chain, PointerButtonAction, PointerMoveAction, Tick};

use super::dispatch::dispatch_action;
use super::host::ActionsHost;
use super::state::ActionState;
use super::touch;

/// One schedulable unit of a tick.
#[derive(Debug)]
enum TickItem<'a> {
    Single(&'a Action),
    TouchDown(Vec<&'a PointerButtonAction>),
    TouchUp(Vec<&'a PointerButtonAction>),
    TouchMove(Vec<&'a PointerMoveAction>),
}

/// Dispatches every tick of `chain` in order.
///
/// The click tracker is reset first, so clicks from an earlier chain never
/// count towards a double click in this one.
///
/// # Errors
///
/// The first error of any tick.  Later ticks are not run.
pub async fn dispatch_chain(
    state: &ActionState,
    host: &dyn ActionsHost,
    chain: &Chain,
) -> Result<(), ActionError> {
    state.with_input(|input| input.click_tracker.reset());

    let total = chain.len();
    for (index, tick) in chain.ticks().iter().enumerate() {
        trace!("Dispatching tick {}/{}", index + 1, total);
        if let Err(e) = dispatch_tick(state, host, tick).await {
            warn!("Tick {}/{} failed: {e}", index + 1, total);
            return Err(e);
        }
    }

    Ok(())
}

/// Dispatches all actions of one tick concurrently.
pub async fn dispatch_tick(
    state: &ActionState,
    host: &dyn ActionsHost,
    tick: &Tick,
) -> Result<(), ActionError> {
    let tick_duration = tick.duration();
    let items = group_tick_actions(state, tick);

    let pending: Vec<BoxFuture<'_, Result<(), ActionError>>> = items
        .iter()
        .map(|item| match item {
            TickItem::Single(action) => dispatch_action(state, host, action, tick_duration).boxed(),
            TickItem::TouchDown(actions) => touch::dispatch_touch_down(state, host, actions).boxed(),
            TickItem::TouchUp(actions) => touch::dispatch_touch_up(state, host, actions).boxed(),
            TickItem::TouchMove(actions) => {
                touch::dispatch_touch_move(state, host, actions, tick_duration).boxed()
            }
        })
        .collect();

    try_join_all(pending).await?;
    Ok(())
}

/// Splits a tick into single actions and per-subtype touch groups.
fn group_tick_actions<'a>(state: &ActionState, tick: &'a Tick) -> Vec<TickItem<'a>> {
    let touch_flags: Vec<bool> = state.with_input(|input| {
        tick.actions()
            .iter()
            .map(|action| {
                input
                    .source(action.id())
                    .map(|source| source.is_touch())
                    .unwrap_or(false)
            })
            .collect()
    });

    let mut items: Vec<TickItem<'a>> = Vec::with_capacity(tick.len());
    let mut down_group: Option<usize> = None;
    let mut up_group: Option<usize> = None;
    let mut move_group: Option<usize> = None;

    for (action, is_touch) in tick.actions().iter().zip(touch_flags) {
        if !is_touch {
            items.push(TickItem::Single(action));
            continue;
        }

        match action {
            Action::PointerDown(button) => {
                let slot = *down_group.get_or_insert_with(|| {
                    items.push(TickItem::TouchDown(Vec::new()));
                    items.len() - 1
                });
                if let TickItem::TouchDown(group) = &mut items[slot] {
                    group.push(button);
                }
            }
            Action::PointerUp(button) => {
                let slot = *up_group.get_or_insert_with(|| {
                    items.push(TickItem::TouchUp(Vec::new()));
                    items.len() - 1
                });
                if let TickItem::TouchUp(group) = &mut items[slot] {
                    group.push(button);
                }
            }
            Action::PointerMove(movement) => {
                let slot = *move_group.get_or_insert_with(|| {
                    items.push(TickItem::TouchMove(Vec::new()));
                    items.len() - 1
                });
                if let TickItem::TouchMove(group) = &mut items[slot] {
                    group.push(movement);
                }
            }
            // Pauses on a touch device run on their own.
            _ => {
                items.push(TickItem::Single(action));
                continue;
            }
        }

        debug!(
            "Grouping action {} {} {}",
            action.source_type(),
            action.id(),
            action.subtype()
        );
    }

    items
}

// ── Tests ─────────────────────────────────────────────────────────────────────
