//! The closed set of actions a device can perform, and the tick/chain
//! containers that order them.
//!
//! Each [`Action`] variant corresponds to one (device type, subtype) pair of
//! the protocol.  Actions are immutable once parsed except for
//! [`Action::origin_mut`], which lets the engine swap an element origin for
//! the host's resolved reference before dispatch.

use crate::domain::input_source::SourceType;
use crate::domain::origin::Origin;

// ── Action payloads ───────────────────────────────────────────────────────────

/// Optional contact geometry and pen/touch properties of a pointer action.
///
/// Every field is validated at parse time; `None` means "not supplied".
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PointerProperties {
    pub width: Option<u64>,
    pub height: Option<u64>,
    pub pressure: Option<f64>,
    pub tangential_pressure: Option<f64>,
    pub tilt_x: Option<i64>,
    pub tilt_y: Option<i64>,
    pub twist: Option<u64>,
    pub altitude_angle: Option<f64>,
    pub azimuth_angle: Option<f64>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PauseAction {
    pub id: String,
    /// Milliseconds; `None` falls back to the tick duration.
    pub duration: Option<u64>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct KeyAction {
    pub id: String,
    /// Raw key value: exactly one grapheme cluster.
    pub value: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PointerButtonAction {
    pub id: String,
    pub button: u64,
    pub properties: PointerProperties,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PointerMoveAction {
    pub id: String,
    pub duration: Option<u64>,
    pub origin: Origin,
    pub x: f64,
    pub y: f64,
    pub properties: PointerProperties,
}

#[derive(Debug, Clone, PartialEq)]
pub struct WheelScrollAction {
    pub id: String,
    pub duration: Option<u64>,
    pub origin: Origin,
    pub x: i64,
    pub y: i64,
    pub delta_x: i64,
    pub delta_y: i64,
}

// ── Action ────────────────────────────────────────────────────────────────────

/// One step performed by one device.
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    Pause(PauseAction),
    KeyDown(KeyAction),
    KeyUp(KeyAction),
    PointerDown(PointerButtonAction),
    PointerUp(PointerButtonAction),
    PointerMove(PointerMoveAction),
    Scroll(WheelScrollAction),
}

impl Action {
    /// Id of the device performing the action.
    pub fn id(&self) -> &str {
        match self {
            Action::Pause(a) => &a.id,
            Action::KeyDown(a) | Action::KeyUp(a) => &a.id,
            Action::PointerDown(a) | Action::PointerUp(a) => &a.id,
            Action::PointerMove(a) => &a.id,
            Action::Scroll(a) => &a.id,
        }
    }

    /// Device type the action belongs to.  Pauses belong to "none" even when
    /// they appear in another device's sequence.
    pub fn source_type(&self) -> SourceType {
        match self {
            Action::Pause(_) => SourceType::None,
            Action::KeyDown(_) | Action::KeyUp(_) => SourceType::Key,
            Action::PointerDown(_) | Action::PointerUp(_) | Action::PointerMove(_) => {
                SourceType::Pointer
            }
            Action::Scroll(_) => SourceType::Wheel,
        }
    }

    /// Protocol subtype name.
    pub fn subtype(&self) -> &'static str {
        match self {
            Action::Pause(_) => "pause",
            Action::KeyDown(_) => "keyDown",
            Action::KeyUp(_) => "keyUp",
            Action::PointerDown(_) => "pointerDown",
            Action::PointerUp(_) => "pointerUp",
            Action::PointerMove(_) => "pointerMove",
            Action::Scroll(_) => "scroll",
        }
    }

    /// Declared duration in milliseconds, for actions that have one.
    pub fn duration(&self) -> Option<u64> {
        match self {
            Action::Pause(a) => a.duration,
            Action::PointerMove(a) => a.duration,
            Action::Scroll(a) => a.duration,
            _ => None,
        }
    }

    /// `true` for actions whose duration paces the tick.
    pub fn affects_wall_clock_time(&self) -> bool {
        matches!(
            self,
            Action::Pause(_) | Action::PointerMove(_) | Action::Scroll(_)
        )
    }

    pub fn origin(&self) -> Option<&Origin> {
        match self {
            Action::PointerMove(a) => Some(&a.origin),
            Action::Scroll(a) => Some(&a.origin),
            _ => None,
        }
    }

    pub fn origin_mut(&mut self) -> Option<&mut Origin> {
        match self {
            Action::PointerMove(a) => Some(&mut a.origin),
            Action::Scroll(a) => Some(&mut a.origin),
            _ => None,
        }
    }
}

// ── Tick / Chain ──────────────────────────────────────────────────────────────

/// All actions that run in the same time slot, at most one per device.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Tick(pub Vec<Action>);

impl Tick {
    /// Longest declared duration among actions that pace the tick, or 0.
    pub fn duration(&self) -> u64 {
        self.0
            .iter()
            .filter(|a| a.affects_wall_clock_time())
            .filter_map(Action::duration)
            .max()
            .unwrap_or(0)
    }

    pub fn actions(&self) -> &[Action] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// The ordered ticks parsed from one request.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Chain(pub Vec<Tick>);

impl Chain {
    pub fn ticks(&self) -> &[Tick] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Every action of every tick, in dispatch order.
    pub fn actions_mut(&mut self) -> impl Iterator<Item = &mut Action> {
        self.0.iter_mut().flat_map(|tick| tick.0.iter_mut())
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
