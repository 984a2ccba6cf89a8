//! Tests for the members module

use super::*;
use crate::config::ModuleConfig;
use crate::error::Error;
use crate::http::scripted::ScriptedGateway;
use crate::http::HttpGateway;
use crate::types::Verb;
use pretty_assertions::assert_eq;
use serde_json::json;
use test_case::test_case;
use wiremock::{Mock, MockServer, ResponseTemplate};

const GROUP: &str = "team@example.com";

fn client(gateway: ScriptedGateway) -> MembersClient<ScriptedGateway> {
    MembersClient::new(gateway)
}

// ============================================================================
// Types
// ============================================================================

#[test_case("OWNER", MemberRole::Owner)]
#[test_case("manager", MemberRole::Manager)]
#[test_case("Member", MemberRole::Member)]
fn test_role_from_str(input: &str, expected: MemberRole) {
    assert_eq!(input.parse::<MemberRole>().unwrap(), expected);
}

#[test]
fn test_role_from_str_unknown() {
    let err = "admin".parse::<MemberRole>().unwrap_err();
    assert!(matches!(err, Error::InvalidArgument { ref name, .. } if name == "role"));
}

#[test_case("ALL_MAIL", DeliverySettings::AllMail)]
#[test_case("all-mail", DeliverySettings::AllMail)]
#[test_case("digest", DeliverySettings::Digest)]
#[test_case("NONE", DeliverySettings::None)]
fn test_delivery_settings_from_str(input: &str, expected: DeliverySettings) {
    assert_eq!(input.parse::<DeliverySettings>().unwrap(), expected);
}

#[test]
fn test_attributes_serialize_only_present_fields() {
    let attributes = MemberAttributes::new()
        .email("new@example.com")
        .role(MemberRole::Manager)
        .delivery_settings(DeliverySettings::AllMail);

    assert_eq!(
        serde_json::to_value(&attributes).unwrap(),
        json!({"email": "new@example.com", "role": "MANAGER", "delivery_settings": "ALL_MAIL"})
    );
    assert_eq!(
        serde_json::to_value(MemberAttributes::new()).unwrap(),
        json!({})
    );
    assert!(MemberAttributes::new().is_empty());
    assert!(!attributes.is_empty());
}

#[test]
fn test_list_options_apply() {
    let call = ListMembersOptions::new()
        .max_results(50)
        .role(MemberRole::Owner)
        .role(MemberRole::Manager)
        .role(MemberRole::Owner)
        .include_derived_membership(true)
        .apply(crate::http::ApiCall::get(["groups", GROUP, "members"]));

    assert_eq!(
        call.query,
        vec![
            ("maxResults".to_string(), "50".to_string()),
            ("roles".to_string(), "OWNER,MANAGER".to_string()),
            ("includeDerivedMembership".to_string(), "true".to_string()),
        ]
    );
}

#[test]
fn test_list_options_default_sends_nothing() {
    let call = ListMembersOptions::new().apply(crate::http::ApiCall::get(["groups"]));
    assert!(call.query.is_empty());
}

#[test_case(ListMembersOptions::new().max_results(0), "max_results" ; "zero page size")]
#[test_case(ListMembersOptions::new().max_results(201), "max_results" ; "page size too large")]
#[test_case(ListMembersOptions::new().page_token(""), "page_token" ; "empty page token")]
fn test_list_options_validate(options: ListMembersOptions, field: &str) {
    match options.validate().unwrap_err() {
        Error::InvalidArgument { name, .. } => assert_eq!(name, field),
        other => panic!("Expected InvalidArgument, got {other:?}"),
    }
}

// ============================================================================
// list_members
// ============================================================================

#[tokio::test]
async fn test_list_members_walks_all_pages() {
    let gateway = ScriptedGateway::pages([
        json!({"members": [{"email": "a@example.com", "role": "OWNER"}], "nextPageToken": "p2"}),
        json!({"members": [{"email": "b@example.com", "role": "MEMBER", "status": "ACTIVE"}]}),
    ]);
    let client = client(gateway);

    let options = ListMembersOptions::new()
        .max_results(1)
        .role(MemberRole::Owner)
        .role(MemberRole::Member);
    let members = client.list_members(GROUP, &options).await.unwrap();

    assert_eq!(members.len(), 2);
    assert_eq!(members.records()[1].get_str("status"), Some("ACTIVE"));

    let calls = client.gateway().calls();
    assert_eq!(calls.len(), 2);
    assert_eq!(calls[0].path(), "groups/team@example.com/members");
    assert_eq!(calls[1].query_value("pageToken"), Some("p2"));
    assert_eq!(calls[1].query_value("roles"), Some("OWNER,MEMBER"));
    assert_eq!(calls[1].query_value("maxResults"), Some("1"));
}

#[tokio::test]
async fn test_list_members_starts_at_given_token() {
    let client = client(ScriptedGateway::pages([json!({"members": []})]));

    let options = ListMembersOptions::new().page_token("resume");
    client.list_members(GROUP, &options).await.unwrap();

    assert_eq!(
        client.gateway().calls()[0].query_value("pageToken"),
        Some("resume")
    );
}

#[tokio::test]
async fn test_list_members_empty_group() {
    let client = client(ScriptedGateway::pages([json!({"kind": "admin#directory#members"})]));
    let members = client
        .list_members(GROUP, &ListMembersOptions::new())
        .await
        .unwrap();
    assert!(members.is_empty());
}

#[tokio::test]
async fn test_list_members_failure_on_later_page() {
    let client = client(ScriptedGateway::new([
        Ok(json!({"members": [{"email": "a@example.com"}], "nextPageToken": "p2"})),
        Err(Error::http_status(503, "backend unavailable")),
    ]));

    let err = client
        .list_members(GROUP, &ListMembersOptions::new())
        .await
        .unwrap_err();
    assert!(err.is_transport());
}

// ============================================================================
// Argument checks happen before any call
// ============================================================================

#[tokio::test]
async fn test_empty_keys_rejected_before_calling() {
    let client = client(ScriptedGateway::default());
    let attributes = MemberAttributes::new().email("a@example.com");

    let errors = vec![
        client
            .list_members("", &ListMembersOptions::new())
            .await
            .unwrap_err(),
        client.get_member(GROUP, "").await.unwrap_err(),
        client.has_member("  ", "a@example.com").await.unwrap_err(),
        client.insert_member("", &attributes).await.unwrap_err(),
        client.update_member(GROUP, "", &attributes).await.unwrap_err(),
        client.delete_member("", "a@example.com").await.unwrap_err(),
    ];

    for err in errors {
        assert!(
            matches!(err, Error::InvalidArgument { .. }),
            "unexpected {err:?}"
        );
    }
    assert_eq!(client.gateway().call_count(), 0);
}

#[tokio::test]
async fn test_insert_requires_email() {
    let client = client(ScriptedGateway::default());
    let err = client
        .insert_member(GROUP, &MemberAttributes::new().role(MemberRole::Member))
        .await
        .unwrap_err();
    assert!(matches!(err, Error::InvalidArgument { ref name, .. } if name == "email"));
    assert_eq!(client.gateway().call_count(), 0);
}

#[tokio::test]
async fn test_invalid_page_size_rejected_before_calling() {
    let client = client(ScriptedGateway::default());
    let err = client
        .list_members(GROUP, &ListMembersOptions::new().max_results(500))
        .await
        .unwrap_err();
    assert!(matches!(err, Error::InvalidArgument { .. }));
    assert_eq!(client.gateway().call_count(), 0);
}

// ============================================================================
// Single-record operations
// ============================================================================

#[tokio::test]
async fn test_get_member() {
    let client = client(ScriptedGateway::pages([json!({
        "kind": "admin#directory#member",
        "email": "a@example.com",
        "role": "OWNER",
        "type": "USER"
    })]));

    let member = client.get_member(GROUP, "a@example.com").await.unwrap();

    assert_eq!(member.get_str("role"), Some("OWNER"));
    let call = &client.gateway().calls()[0];
    assert_eq!(call.verb, Verb::GET);
    assert_eq!(call.path(), "groups/team@example.com/members/a@example.com");
}

#[tokio::test]
async fn test_get_member_non_object_is_malformed() {
    let client = client(ScriptedGateway::pages([json!(null)]));
    let err = client.get_member(GROUP, "a@example.com").await.unwrap_err();
    assert!(matches!(err, Error::MalformedResponse { .. }));
}

#[test_case(json!({"isMember": true}), true ; "member")]
#[test_case(json!({"isMember": false}), false ; "not member")]
#[tokio::test]
async fn test_has_member(body: serde_json::Value, expected: bool) {
    let client = client(ScriptedGateway::pages([body]));

    let is_member = client.has_member(GROUP, "a@example.com").await.unwrap();

    assert_eq!(is_member, expected);
    assert_eq!(
        client.gateway().calls()[0].path(),
        "groups/team@example.com/hasMember/a@example.com"
    );
}

#[test_case(json!({}) ; "field missing")]
#[test_case(json!({"isMember": "true"}) ; "field not boolean")]
#[test_case(json!(null) ; "empty body")]
#[tokio::test]
async fn test_has_member_malformed(body: serde_json::Value) {
    let client = client(ScriptedGateway::pages([body]));
    let err = client.has_member(GROUP, "a@example.com").await.unwrap_err();
    match err {
        Error::MalformedResponse { field, .. } => assert_eq!(field, "isMember"),
        other => panic!("Expected MalformedResponse, got {other:?}"),
    }
}

#[tokio::test]
async fn test_has_member_propagates_not_found() {
    let client = client(ScriptedGateway::new([Err(Error::from_status(404, "Resource Not Found: groupKey"))]));
    let err = client.has_member(GROUP, "a@example.com").await.unwrap_err();
    assert!(matches!(err, Error::NotFound { .. }));
}

#[tokio::test]
async fn test_insert_member_posts_supplied_attributes() {
    let client = client(ScriptedGateway::pages([json!({
        "kind": "admin#directory#member",
        "email": "new@example.com",
        "role": "MEMBER",
        "id": "1234"
    })]));

    let attributes = MemberAttributes::new()
        .email("new@example.com")
        .role(MemberRole::Member);
    let member = client.insert_member(GROUP, &attributes).await.unwrap();

    assert_eq!(member.get_str("id"), Some("1234"));
    let call = &client.gateway().calls()[0];
    assert_eq!(call.verb, Verb::POST);
    assert_eq!(call.path(), "groups/team@example.com/members");
    assert_eq!(
        call.body,
        Some(json!({"email": "new@example.com", "role": "MEMBER"}))
    );
}

#[tokio::test]
async fn test_update_member_sends_only_changed_field() {
    let client = client(ScriptedGateway::pages([json!({
        "email": "a@example.com",
        "role": "MANAGER"
    })]));

    let attributes = MemberAttributes::new().role(MemberRole::Manager);
    let member = client
        .update_member(GROUP, "a@example.com", &attributes)
        .await
        .unwrap();

    assert_eq!(member.get_str("role"), Some("MANAGER"));
    let call = &client.gateway().calls()[0];
    assert_eq!(call.verb, Verb::PATCH);
    assert_eq!(call.path(), "groups/team@example.com/members/a@example.com");
    assert_eq!(call.body, Some(json!({"role": "MANAGER"})));
}

#[tokio::test]
async fn test_delete_member_confirmation() {
    let client = client(ScriptedGateway::pages([json!(null)]));

    let message = client.delete_member(GROUP, "a@example.com").await.unwrap();

    assert_eq!(message, "a@example.com successfully removed from team@example.com");
    assert_eq!(client.gateway().calls()[0].verb, Verb::DELETE);
}

#[tokio::test]
async fn test_delete_member_twice_surfaces_not_found() {
    let client = client(ScriptedGateway::new([
        Ok(json!(null)),
        Err(Error::from_status(404, "Resource Not Found: memberKey")),
    ]));

    client.delete_member(GROUP, "a@example.com").await.unwrap();
    let err = client.delete_member(GROUP, "a@example.com").await.unwrap_err();

    assert!(matches!(err, Error::NotFound { .. }));
    assert_eq!(client.gateway().call_count(), 2);
}

// ============================================================================
// Configuration failures never reach the network
// ============================================================================

#[tokio::test]
async fn test_missing_configuration_makes_no_request() {
    let server = MockServer::start().await;
    Mock::given(wiremock::matchers::any())
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let uri = server.uri();
    let err = ModuleConfig::from_lookup("admin_directory", |name| match name {
        "admin_directory_service_account_file_path" => Some("/keys/sa.json".to_string()),
        "admin_directory_api_base_url" => Some(uri.clone()),
        _ => None,
    })
    .and_then(MembersClient::<HttpGateway>::from_config)
    .err()
    .unwrap();

    assert!(err.is_configuration());
    assert!(err.to_string().contains("admin_directory_google_user"));
}

#[tokio::test]
async fn test_unreadable_key_file_makes_no_request() {
    let server = MockServer::start().await;
    Mock::given(wiremock::matchers::any())
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let dir = tempfile::tempdir().unwrap();
    let config = ModuleConfig {
        module: "admin_directory".to_string(),
        service_account_file_path: dir.path().join("missing.json"),
        google_user: "admin@example.com".to_string(),
        api_base_url: server.uri(),
        token_url: None,
    };

    let err = MembersClient::<HttpGateway>::from_config(config).err().unwrap();
    assert!(err.is_configuration());
}
