//! # aas-example
//!
//! Example client for a Keycloak-protected person service, built around two
//! small UI components:
//!
//! - [`components::nav::NavigationBar`] renders Login/Logout navigation from
//!   an injected [`auth::AuthContext`].
//! - [`components::action_panel::ActionPanel`] issues bearer-authenticated
//!   POST/PUT/PATCH requests after a deferred delay and reports a binary
//!   outcome through a [`components::action_panel::Notifier`].
//!
//! The [`backend`] module ships a runnable stand-in for the protected
//! `/person` service so the panel can be exercised end to end.

pub mod auth;
pub mod backend;
pub mod components;
pub mod config;
pub mod net;
pub mod view;

#[cfg(test)]
pub(crate) mod test_support;
