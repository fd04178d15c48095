use std::sync::Arc;
use std::time::Duration;

use super::*;
use crate::auth::{BearerToken, StaticTokenProvider};
use crate::components::action_panel::{ActionPanel, Outcome, PanelAction};
use crate::config::ClientConfig;
use crate::test_support::{RecordingNotifier, spawn_backend};

// =============================================================================
// Tokens
// =============================================================================

#[test]
fn demo_token_is_64_hex_chars() {
    let token = demo_token();
    assert_eq!(token.len(), 64);
    assert!(token.chars().all(|c| c.is_ascii_hexdigit()));
}

#[test]
fn demo_tokens_differ() {
    assert_ne!(demo_token(), demo_token());
}

#[test]
fn demo_grants_are_distinct() {
    let grants = demo_grants();
    assert_eq!(grants.len(), 2);
    assert_ne!(grants[0].token, grants[1].token);
    assert!(grants[0].roles.iter().any(|r| r == ROLE_ADMIN));
    assert!(!grants[1].roles.iter().any(|r| r == ROLE_ADMIN));
}

// =============================================================================
// State
// =============================================================================

#[test]
fn state_maps_tokens_to_roles() {
    let state = BackendState::new(&[TokenGrant { token: "t".into(), roles: vec![ROLE_USER.into()] }]);
    assert!(state.roles_for("t").is_some_and(|roles| roles.contains(ROLE_USER)));
    assert!(state.roles_for("other").is_none());
    assert_eq!(state.request_count(), 0);
}

// =============================================================================
// Panel against the demo service
// =============================================================================

#[tokio::test]
async fn panel_outcomes_follow_roles() {
    let grants = demo_grants();
    let admin = grants[0].token.clone();
    let (base_url, state) = spawn_backend(&grants).await;

    let notifier = Arc::new(RecordingNotifier::default());
    let tokens = Arc::new(StaticTokenProvider::new(BearerToken::new(admin).unwrap()));
    let config = ClientConfig::new(base_url).with_action_delay(Duration::ZERO);
    let mut panel = ActionPanel::new(&config, tokens, notifier.clone()).unwrap();

    for action in PanelAction::ALL {
        panel.trigger(action);
        panel.wait_idle().await;
    }

    assert_eq!(notifier.outcomes(), vec![Outcome::Succeeded, Outcome::Succeeded, Outcome::Failed]);
    assert_eq!(state.request_count(), 3);
}
