//! Component trait system for TUI architecture
//!
//! Panels declare their own capabilities through traits instead of App
//! knowing how to render and scroll every panel.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                         App                                 │
//! │     (orchestrator: owns the page, routes input, applies     │
//! │      background results)                                    │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!              ┌───────────────┼───────────────┐
//!              ▼               ▼               ▼
//!        ┌──────────┐   ┌──────────┐   ┌──────────┐
//!        │   Book   │   │  Detail  │   │   Logs   │
//!        │   List   │   │  Panel   │   │  Panel   │
//!        └──────────┘   └──────────┘   └──────────┘
//! ```
//!
//! - [`Component`] - render + identity
//! - [`Scrollable`] - components with scrollable content
//! - [`Selectable`] - scrollable content with a cursor
//! - [`Interactive`] - components that handle keyboard input

mod component;
mod interactive;
mod scrollable;

pub use component::{Component, ComponentId, RenderContext};
pub use interactive::{Handled, Interactive};
pub use scrollable::{Scrollable, Selectable};
