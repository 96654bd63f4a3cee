//! Scenario tests for webhook handling.
//!
//! Tests for:
//! - signature rejection before any repository call
//! - malformed payloads and repository failures mapping to 502
//! - first release, draft append and patch bump flows
//! - no-action deliveries never touching the repository

use std::time::Duration;

use super::*;
use crate::{
    error::ReleaseNotesError,
    forge::{
        traits::MockReleaseRepository,
        types::{CreateReleaseRequest, ReleaseRecord},
    },
    test_helpers::*,
    webhook::request::SIGNATURE_HEADER,
};

fn manager(mock: MockReleaseRepository) -> ForgeManager {
    ForgeManager::new(Box::new(mock), Duration::from_secs(5), false)
}

fn mock_forge() -> MockReleaseRepository {
    let mut mock = MockReleaseRepository::new();
    mock.expect_repo_name().returning(|| "test/repo".into());
    mock
}

fn untouched_forge() -> MockReleaseRepository {
    let mut mock = mock_forge();
    mock.expect_list_releases().times(0);
    mock.expect_create_release().times(0);
    mock.expect_update_release().times(0);
    mock
}

fn merged_into_master(title: &str, url: &str) -> Vec<u8> {
    pull_request_payload("closed", true, "master", title, url)
}

fn echo_created(req: CreateReleaseRequest) -> Result<ReleaseRecord> {
    Ok(ReleaseRecord {
        id: 99,
        tag: req.tag,
        title: req.title,
        body: req.body,
        is_draft: req.draft,
    })
}

#[test_log::test(tokio::test)]
async fn first_release_is_created_as_draft() {
    let mut mock = mock_forge();
    mock.expect_list_releases()
        .times(1)
        .returning(|| Ok(vec![]));
    mock.expect_create_release()
        .times(1)
        .withf(|req| {
            req.tag == "v0.0.1"
                && req.title == "v0.0.1"
                && req.body == "* Fix bug. (http://x/1)"
                && req.draft
        })
        .returning(echo_created);
    mock.expect_update_release().times(0);

    let request = signed_request(merged_into_master("Fix bug", "http://x/1"));
    let code =
        handle(&request, &create_test_config(), &manager(mock)).await;

    assert_eq!(code, ResponseCode::Accepted);
    assert_eq!(code.as_u16(), 200);
}

#[test_log::test(tokio::test)]
async fn draft_release_gets_note_appended() {
    let mut mock = mock_forge();
    mock.expect_list_releases().times(1).returning(|| {
        Ok(vec![
            release_record(5, "v0.0.3", "* First. (http://x/0)", true),
            release_record(4, "v0.0.2", "* Older. (http://x/-1)", false),
        ])
    });
    mock.expect_create_release().times(0);
    mock.expect_update_release()
        .times(1)
        .withf(|req| {
            req.id == 5
                && req.title == "v0.0.3"
                && req.body == "* First. (http://x/0)\n* Second. (http://x/2)"
                && req.draft
        })
        .returning(|req| Ok(release_record(req.id, &req.tag, &req.body, true)));

    let request =
        signed_request(merged_into_master("Second", "http://x/2"));
    let outcome =
        handle_with_outcome(&request, &create_test_config(), &manager(mock))
            .await;

    assert_eq!(outcome.code, ResponseCode::Accepted);
    assert!(matches!(
        outcome.action,
        Some(Action::AppendToRelease { ref record, .. }) if record.id == 5
    ));
}

#[test_log::test(tokio::test)]
async fn published_release_starts_next_patch_draft() {
    let mut mock = mock_forge();
    mock.expect_list_releases()
        .times(1)
        .returning(|| Ok(vec![release_record(1, "v1.2.3", "* Old. (u)", false)]));
    mock.expect_create_release()
        .times(1)
        .withf(|req| {
            req.tag == "v1.2.4"
                && req.title == "v1.2.4"
                && req.body == "* Next. (http://x/3)"
                && req.draft
        })
        .returning(echo_created);
    mock.expect_update_release().times(0);

    let request = signed_request(merged_into_master("Next", "http://x/3"));
    let code =
        handle(&request, &create_test_config(), &manager(mock)).await;

    assert_eq!(code, ResponseCode::Accepted);
}

#[tokio::test]
async fn bad_signature_is_rejected_without_repository_calls() {
    let body = merged_into_master("Fix bug", "http://x/1");
    let request = WebhookRequest::new(
        "POST",
        [(SIGNATURE_HEADER, "sha1=0000000000000000000000000000000000000000")],
        body,
    );

    let code = handle(
        &request,
        &create_test_config(),
        &manager(untouched_forge()),
    )
    .await;

    assert_eq!(code, ResponseCode::Rejected);
    assert_eq!(code.as_u16(), 302);
}

#[tokio::test]
async fn missing_signature_is_rejected() {
    let request = WebhookRequest::new(
        "POST",
        Vec::<(&str, &str)>::new(),
        merged_into_master("Fix bug", "http://x/1"),
    );

    let code = handle(
        &request,
        &create_test_config(),
        &manager(untouched_forge()),
    )
    .await;

    assert_eq!(code, ResponseCode::Rejected);
}

#[tokio::test]
async fn non_post_is_rejected_even_with_valid_signature() {
    let body = merged_into_master("Fix bug", "http://x/1");
    let signature = sign(&body);
    let request =
        WebhookRequest::new("GET", [(SIGNATURE_HEADER, signature)], body);

    let code = handle(
        &request,
        &create_test_config(),
        &manager(untouched_forge()),
    )
    .await;

    assert_eq!(code, ResponseCode::Rejected);
}

#[tokio::test]
async fn malformed_payload_is_bad_gateway() {
    let request = signed_request(br#"{"action":"closed"}"#.to_vec());

    let code = handle(
        &request,
        &create_test_config(),
        &manager(untouched_forge()),
    )
    .await;

    assert_eq!(code, ResponseCode::BadGateway);
    assert_eq!(code.as_u16(), 502);
}

#[tokio::test]
async fn missing_merge_commit_sha_is_bad_gateway_when_required() {
    let body = serde_json::to_vec(&serde_json::json!({
        "action": "closed",
        "pull_request": {
            "merged": true,
            "html_url": "http://x/1",
            "title": "Fix bug",
            "base": { "ref": "master" }
        }
    }))
    .unwrap();

    let mut config = create_test_config();
    config.require_merge_commit_sha = true;

    let code =
        handle(&signed_request(body), &config, &manager(untouched_forge()))
            .await;

    assert_eq!(code, ResponseCode::BadGateway);
}

#[tokio::test]
async fn non_merge_events_are_accepted_without_repository_calls() {
    let payloads = [
        pull_request_payload("opened", false, "master", "t", "u"),
        pull_request_payload("closed", false, "master", "t", "u"),
        pull_request_payload("closed", true, "develop", "t", "u"),
    ];

    for body in payloads {
        let outcome = handle_with_outcome(
            &signed_request(body),
            &create_test_config(),
            &manager(untouched_forge()),
        )
        .await;

        assert_eq!(outcome.code, ResponseCode::Accepted);
        assert_eq!(outcome.action, Some(Action::NoAction));
    }
}

#[tokio::test]
async fn list_failure_is_bad_gateway() {
    let mut mock = mock_forge();
    mock.expect_list_releases()
        .times(1)
        .returning(|| Err(ReleaseNotesError::forge("GitHub API error: 500")));
    mock.expect_create_release().times(0);
    mock.expect_update_release().times(0);

    let request = signed_request(merged_into_master("Fix bug", "http://x/1"));
    let code =
        handle(&request, &create_test_config(), &manager(mock)).await;

    assert_eq!(code, ResponseCode::BadGateway);
}

#[tokio::test]
async fn create_failure_is_bad_gateway() {
    let mut mock = mock_forge();
    mock.expect_list_releases()
        .times(1)
        .returning(|| Ok(vec![]));
    mock.expect_create_release()
        .times(1)
        .returning(|_| Err(ReleaseNotesError::RateLimitExceeded));

    let request = signed_request(merged_into_master("Fix bug", "http://x/1"));
    let outcome =
        handle_with_outcome(&request, &create_test_config(), &manager(mock))
            .await;

    assert_eq!(outcome.code, ResponseCode::BadGateway);
    assert_eq!(outcome.action, None);
}

#[tokio::test]
async fn invalid_latest_tag_is_bad_gateway() {
    let mut mock = mock_forge();
    mock.expect_list_releases()
        .times(1)
        .returning(|| Ok(vec![release_record(1, "latest", "", false)]));
    mock.expect_create_release().times(0);
    mock.expect_update_release().times(0);

    let request = signed_request(merged_into_master("Fix bug", "http://x/1"));
    let code =
        handle(&request, &create_test_config(), &manager(mock)).await;

    assert_eq!(code, ResponseCode::BadGateway);
}

#[tokio::test]
async fn unbumpable_latest_tag_is_bad_gateway() {
    let mut mock = mock_forge();
    mock.expect_list_releases().times(1).returning(|| {
        Ok(vec![release_record(1, "v1.2.18446744073709551615", "", false)])
    });
    mock.expect_create_release().times(0);
    mock.expect_update_release().times(0);

    let request = signed_request(merged_into_master("Fix bug", "http://x/1"));
    let code =
        handle(&request, &create_test_config(), &manager(mock)).await;

    assert_eq!(code, ResponseCode::BadGateway);
}

#[tokio::test(start_paused = true)]
async fn slow_repository_is_bad_gateway() {
    let forge = ForgeManager::new(
        Box::new(SlowRepository {
            delay: Duration::from_secs(120),
        }),
        Duration::from_secs(2),
        false,
    );

    let request = signed_request(merged_into_master("Fix bug", "http://x/1"));
    let code = handle(&request, &create_test_config(), &forge).await;

    assert_eq!(code, ResponseCode::BadGateway);
}

#[tokio::test]
async fn dry_run_reports_action_without_mutating() {
    let mut mock = mock_forge();
    mock.expect_list_releases()
        .times(1)
        .returning(|| Ok(vec![]));
    mock.expect_create_release().times(0);

    let forge = ForgeManager::new(Box::new(mock), Duration::from_secs(5), true);
    let request = signed_request(merged_into_master("Fix bug", "http://x/1"));
    let outcome =
        handle_with_outcome(&request, &create_test_config(), &forge).await;

    assert_eq!(outcome.code, ResponseCode::Accepted);
    assert!(matches!(
        outcome.action,
        Some(Action::CreateRelease(ref req)) if req.tag == "v0.0.1"
    ));
}
