//! UI components.
//!
//! DESIGN
//! ======
//! Components take their collaborators (auth state, token provider,
//! notifier) as constructor arguments and render through
//! [`crate::view::Component`].

pub mod action_panel;
pub mod nav;
