//! JSON protocol parsing.
//!
//! A perform-actions request carries an array of per-device sequences.
//! Parsing happens in three layers:
//!
//! 1. [`validate`] – typed assertions on individual JSON fields.
//! 2. [`action_table`] + [`sequence`] – one sequence object becomes a device
//!    registration plus a list of typed actions.
//! 3. [`chain`] – the per-device lists are transposed into ticks.
//!
//! Parsing is synchronous and never touches the host except through the
//! element-origin predicate, which decides whether a JSON value is an element
//! reference.

use serde_json::Value;

use crate::domain::origin::ElementRef;

pub mod action_table;
pub mod chain;
pub mod sequence;
pub mod validate;

/// Predicate and extractor for element origins: returns the element reference
/// when `value` denotes one.
pub type ElementOrigin<'a> = dyn Fn(&Value) -> Option<ElementRef> + 'a;
