//! Integration tests for the session ports and forced-logout policy
//!
//! Exercises the policy and the store contract through the public core
//! API. The clear-then-navigate sequence itself belongs to the HTTP client
//! and is covered in `courseportal-infra`.

mod support;

use courseportal_core::{
    ForcedLogoutPolicy, NavigationReason, NavigationRequest, Navigator, ResponseShape,
    RouteTable, SessionState, SessionStore,
};
use courseportal_domain::{Session, TokenPair, UserInfo};
use support::{MockSessionStore, RecordingNavigator};

fn policy() -> ForcedLogoutPolicy {
    ForcedLogoutPolicy::new(["/auth/login"])
}

fn signed_in_store() -> MockSessionStore {
    MockSessionStore::with_session(Session::new(TokenPair::new("A", "R"), None))
}

#[test]
fn auth_failures_outside_login_force_logout() {
    let policy = policy();
    assert!(policy.forces_logout("/courses/my", 401, Some(401)));
    assert!(policy.forces_logout("/courses/enrolled", 200, Some(403)));
    assert!(policy.forces_logout("/staff/topics", 403, None));
}

#[test]
fn rejected_login_is_not_a_forced_logout() {
    assert!(!policy().forces_logout("/auth/login", 401, Some(401)));
}

#[test]
fn custom_exempt_paths_use_route_patterns() {
    let policy = ForcedLogoutPolicy::new(["/auth/login", "/public/course/{id}"]);
    assert!(!policy.forces_logout("/public/course/9", 403, None));
    assert!(policy.forces_logout("/public/course/9/cert/1", 403, None));
}

#[tokio::test]
async fn clearing_the_store_makes_the_session_anonymous() {
    let store = signed_in_store();
    assert_eq!(SessionState::from(store.load().await.unwrap().as_ref()), SessionState::Authenticated);

    store.clear().await.unwrap();
    store.clear().await.unwrap();

    assert_eq!(SessionState::from(store.load().await.unwrap().as_ref()), SessionState::Anonymous);
    assert_eq!(store.clear_count(), 2);
}

#[tokio::test]
async fn access_token_and_user_update_follow_the_stored_session() {
    let store = MockSessionStore::default();
    let user = UserInfo {
        id: 1,
        username: "alice".into(),
        full_name: None,
        role: None,
        avatar: None,
        email: None,
        phone: None,
        gender: None,
        address: None,
    };

    assert_eq!(store.access_token().await.unwrap(), None);
    assert!(!store.update_user(user.clone()).await.unwrap());

    store.save(Session::new(TokenPair::new("A", "R"), None)).await.unwrap();
    assert_eq!(store.access_token().await.unwrap().as_deref(), Some("A"));
    assert!(store.update_user(user).await.unwrap());
    assert_eq!(store.load().await.unwrap().unwrap().user.unwrap().username, "alice");
}

#[test]
fn navigation_requests_carry_path_and_reason() {
    let navigator = RecordingNavigator::default();
    navigator.navigate(NavigationRequest::session_expired("/login"));
    navigator.navigate(NavigationRequest::logged_out("/login"));

    let reasons: Vec<_> = navigator.requests().into_iter().map(|r| r.reason).collect();
    assert_eq!(reasons, vec![NavigationReason::SessionExpired, NavigationReason::LoggedOut]);
}

#[test]
fn course_shop_table_keeps_login_enveloped() {
    let table = RouteTable::course_shop();
    assert_eq!(table.resolve("POST", "/auth/login"), ResponseShape::Enveloped);
    assert_eq!(table.resolve("POST", "/auth/me"), ResponseShape::Raw);
    assert_eq!(table.resolve("GET", "/topics"), ResponseShape::Raw);
}
