//! Infrastructure layer for the actions engine.
//!
//! Contains the adapters the engine talks to through
//! [`ActionsHost`](crate::application::host::ActionsHost), plus configuration
//! storage for the replay binary.
//!
//! **Dependency rule**: this layer may depend on `application` and
//! `actions_core`, but MUST NOT be imported by the `application` layer.
//!
//! # Sub-modules
//!
//! - **`surface`** – Host implementations.  `HeadlessSurface` writes every
//!   synthesized event as one JSON line; `RecordingSurface` keeps them in
//!   memory for tests.
//!
//! - **`storage`** – TOML configuration: viewport size, platform behaviour,
//!   log level and the element geometry known to the headless surface.

pub mod storage;
pub mod surface;
