//! Tests for endpoint clients

use super::*;
use crate::http::HttpConnectionConfig;
use crate::models::{
    CommitState, IssueRequest, IssueUpdate, LockReason, NewCommitStatus, NewIssue, NewRelease,
    NewRepository, RepositoryIssueRequest,
};
use crate::pagination::ApiOptions;
use crate::types::ItemStateFilter;
use futures::{StreamExt, TryStreamExt};
use pretty_assertions::assert_eq;
use serde_json::{json, Value};
use wiremock::matchers::{body_json, method, path, query_param, query_param_is_missing};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn client_for(server: &MockServer) -> GitHubClient {
    let config = HttpConnectionConfig::builder()
        .base_url(server.uri())
        .token("ghp_test")
        .build();
    let connection = HttpConnection::with_config(config).unwrap();
    GitHubClient::new(Arc::new(connection))
}

fn user(id: u64, login: &str) -> Value {
    json!({"id": id, "login": login, "type": "User"})
}

fn repo(id: u64, name: &str) -> Value {
    json!({
        "id": id,
        "name": name,
        "full_name": format!("octocat/{name}"),
        "owner": user(1, "octocat")
    })
}

fn issue(number: u64, title: &str) -> Value {
    json!({"id": number * 100, "number": number, "title": title, "state": "open"})
}

fn link_next(url: &str) -> String {
    format!("<{url}>; rel=\"next\"")
}

// ============================================================================
// Validation
// ============================================================================

#[tokio::test]
async fn test_invalid_arguments_fail_before_sending() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_string("[]"))
        .expect(0)
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);
    let options = ApiOptions::new();

    assert!(client
        .repositories()
        .get("", "Hello-World")
        .await
        .unwrap_err()
        .is_invalid_argument());
    assert!(client
        .repositories()
        .get_all_for_user("  ", &options)
        .unwrap_err()
        .is_invalid_argument());
    assert!(client
        .issues()
        .get("octocat", "Hello-World", 0)
        .await
        .unwrap_err()
        .is_invalid_argument());
    assert!(client
        .issue_comments()
        .get_all_for_issue("octocat", "", 1, &options)
        .unwrap_err()
        .is_invalid_argument());
    assert!(client
        .statuses()
        .get_all_for_reference("octocat", "Hello-World", "", &options)
        .unwrap_err()
        .is_invalid_argument());
    assert!(client
        .users()
        .get_all_followers("", &options)
        .unwrap_err()
        .is_invalid_argument());
}

#[tokio::test]
async fn test_zero_page_options_rejected() {
    let mock_server = MockServer::start().await;
    let client = client_for(&mock_server);

    let err = client
        .repositories()
        .get_all_for_current(None, &ApiOptions::new().with_page_size(0))
        .unwrap_err();
    assert!(err.is_invalid_argument());

    let err = client
        .releases()
        .get_all("octocat", "Hello-World", &ApiOptions::new().with_page_count(0))
        .unwrap_err();
    assert!(err.is_invalid_argument());
}

#[tokio::test]
async fn test_empty_issue_title_rejected() {
    let mock_server = MockServer::start().await;
    let client = client_for(&mock_server);

    let err = client
        .issues()
        .create("octocat", "Hello-World", &NewIssue::new(""))
        .await
        .unwrap_err();
    assert!(err.is_invalid_argument());
}

// ============================================================================
// Repositories
// ============================================================================

#[tokio::test]
async fn test_get_repository() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/repos/octocat/Hello-World"))
        .respond_with(ResponseTemplate::new(200).set_body_json(repo(1296269, "Hello-World")))
        .expect(1)
        .mount(&mock_server)
        .await;

    let repository = client_for(&mock_server)
        .repositories()
        .get("octocat", "Hello-World")
        .await
        .unwrap();

    assert_eq!(repository.id, 1296269);
    assert_eq!(repository.full_name, "octocat/Hello-World");
}

#[tokio::test]
async fn test_get_all_for_current_follows_pages() {
    let mock_server = MockServer::start().await;
    let page_two = format!("{}/user/repos?per_page=2&page=2", mock_server.uri());

    Mock::given(method("GET"))
        .and(path("/user/repos"))
        .and(query_param("page", "2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([repo(3, "c")])))
        .expect(1)
        .mount(&mock_server)
        .await;
    Mock::given(method("GET"))
        .and(path("/user/repos"))
        .and(query_param("per_page", "2"))
        .and(query_param("sort", "updated"))
        .and(query_param_is_missing("page"))
        .respond_with(
            ResponseTemplate::new(200)
                .insert_header("Link", link_next(&page_two).as_str())
                .set_body_json(json!([repo(1, "a"), repo(2, "b")])),
        )
        .expect(1)
        .mount(&mock_server)
        .await;

    let request = crate::models::RepositoryRequest {
        sort: Some(crate::models::RepositorySort::Updated),
        ..Default::default()
    };
    let names: Vec<String> = client_for(&mock_server)
        .repositories()
        .get_all_for_current(Some(&request), &ApiOptions::new().with_page_size(2))
        .unwrap()
        .map_ok(|r| r.name)
        .try_collect()
        .await
        .unwrap();

    assert_eq!(names, vec!["a", "b", "c"]);
}

#[tokio::test]
async fn test_get_all_for_org_start_page() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/orgs/github/repos"))
        .and(query_param("page", "3"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([repo(9, "late")])))
        .expect(1)
        .mount(&mock_server)
        .await;

    let repos: Vec<_> = client_for(&mock_server)
        .repositories()
        .get_all_for_org("github", &ApiOptions::new().with_start_page(3))
        .unwrap()
        .try_collect()
        .await
        .unwrap();

    assert_eq!(repos.len(), 1);
    assert_eq!(repos[0].name, "late");
}

#[tokio::test]
async fn test_get_all_public_page_count() {
    let mock_server = MockServer::start().await;
    let next = format!("{}/repositories?since=2", mock_server.uri());

    Mock::given(method("GET"))
        .and(path("/repositories"))
        .and(query_param_is_missing("since"))
        .respond_with(
            ResponseTemplate::new(200)
                .insert_header("Link", link_next(&next).as_str())
                .set_body_json(json!([repo(1, "a"), repo(2, "b")])),
        )
        .expect(1)
        .mount(&mock_server)
        .await;
    Mock::given(method("GET"))
        .and(path("/repositories"))
        .and(query_param("since", "2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([repo(3, "c")])))
        .expect(0)
        .mount(&mock_server)
        .await;

    let repos: Vec<_> = client_for(&mock_server)
        .repositories()
        .get_all_public(&ApiOptions::new().with_page_count(1))
        .unwrap()
        .try_collect()
        .await
        .unwrap();

    assert_eq!(repos.len(), 2);
}

#[tokio::test]
async fn test_create_and_delete_repository() {
    let mock_server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/orgs/acme/repos"))
        .and(body_json(json!({"name": "widgets", "private": true, "auto_init": false})))
        .respond_with(ResponseTemplate::new(201).set_body_json(repo(5, "widgets")))
        .expect(1)
        .mount(&mock_server)
        .await;
    Mock::given(method("DELETE"))
        .and(path("/repos/acme/widgets"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);
    let mut new_repo = NewRepository::new("widgets");
    new_repo.private = true;

    let created = client
        .repositories()
        .create_in_org("acme", &new_repo)
        .await
        .unwrap();
    assert_eq!(created.name, "widgets");

    client.repositories().delete("acme", "widgets").await.unwrap();
}

#[tokio::test]
async fn test_branches_and_tags() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/repos/octocat/Hello-World/branches"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {"name": "main", "commit": {"sha": "abc"}, "protected": true}
        ])))
        .mount(&mock_server)
        .await;
    Mock::given(method("GET"))
        .and(path("/repos/octocat/Hello-World/branches/main"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({"name": "main", "commit": {"sha": "abc"}})),
        )
        .mount(&mock_server)
        .await;
    Mock::given(method("GET"))
        .and(path("/repos/octocat/Hello-World/tags"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {"name": "v1.0.0", "commit": {"sha": "def"}}
        ])))
        .mount(&mock_server)
        .await;

    let repos = client_for(&mock_server).repositories();
    let options = ApiOptions::new();

    let branches: Vec<_> = repos
        .get_all_branches("octocat", "Hello-World", &options)
        .unwrap()
        .try_collect()
        .await
        .unwrap();
    assert_eq!(branches[0].name, "main");

    let branch = repos.get_branch("octocat", "Hello-World", "main").await.unwrap();
    assert_eq!(branch.commit.sha, "abc");

    let tags: Vec<_> = repos
        .get_all_tags("octocat", "Hello-World", &options)
        .unwrap()
        .try_collect()
        .await
        .unwrap();
    assert_eq!(tags[0].name, "v1.0.0");
}

#[tokio::test]
async fn test_contributors_include_anonymous() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/repos/octocat/Hello-World/contributors"))
        .and(query_param("anon", "1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {"login": "octocat", "id": 1, "type": "User", "contributions": 32},
            {"name": "Someone", "email": "s@example.com", "type": "Anonymous", "contributions": 1}
        ])))
        .expect(1)
        .mount(&mock_server)
        .await;

    let contributors: Vec<_> = client_for(&mock_server)
        .repositories()
        .get_all_contributors("octocat", "Hello-World", true, &ApiOptions::new())
        .unwrap()
        .try_collect()
        .await
        .unwrap();

    assert_eq!(contributors.len(), 2);
    assert!(!contributors[0].is_anonymous());
    assert!(contributors[1].is_anonymous());
}

// ============================================================================
// Issues
// ============================================================================

#[tokio::test]
async fn test_get_all_issues_for_current_with_filter() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/issues"))
        .and(query_param("state", "closed"))
        .and(query_param("labels", "bug,ui"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([issue(1, "Crash")])))
        .expect(1)
        .mount(&mock_server)
        .await;

    let request = IssueRequest {
        state: Some(ItemStateFilter::Closed),
        labels: vec!["bug".to_string(), "ui".to_string()],
        ..Default::default()
    };
    let issues: Vec<_> = client_for(&mock_server)
        .issues()
        .get_all_for_current(Some(&request), &ApiOptions::new())
        .unwrap()
        .try_collect()
        .await
        .unwrap();

    assert_eq!(issues[0].title, "Crash");
}

#[tokio::test]
async fn test_repository_issues_stop_early() {
    let mock_server = MockServer::start().await;
    let next = format!("{}/repos/o/r/issues?page=2", mock_server.uri());

    Mock::given(method("GET"))
        .and(path("/repos/o/r/issues"))
        .and(query_param("page", "2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([issue(3, "c")])))
        .expect(0)
        .mount(&mock_server)
        .await;
    Mock::given(method("GET"))
        .and(path("/repos/o/r/issues"))
        .and(query_param("assignee", "octocat"))
        .respond_with(
            ResponseTemplate::new(200)
                .insert_header("Link", link_next(&next).as_str())
                .set_body_json(json!([issue(1, "a"), issue(2, "b")])),
        )
        .expect(1)
        .mount(&mock_server)
        .await;

    let request = RepositoryIssueRequest {
        assignee: Some("octocat".to_string()),
        ..Default::default()
    };
    let first: Vec<_> = client_for(&mock_server)
        .issues()
        .get_all_for_repository("o", "r", Some(&request), &ApiOptions::new())
        .unwrap()
        .take(2)
        .try_collect()
        .await
        .unwrap();

    assert_eq!(first.len(), 2);
}

#[tokio::test]
async fn test_update_lock_and_unlock_issue() {
    let mock_server = MockServer::start().await;
    Mock::given(method("PATCH"))
        .and(path("/repos/o/r/issues/7"))
        .and(body_json(json!({"state": "closed"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": 700, "number": 7, "title": "Done", "state": "closed"
        })))
        .expect(1)
        .mount(&mock_server)
        .await;
    Mock::given(method("PUT"))
        .and(path("/repos/o/r/issues/7/lock"))
        .and(body_json(json!({"lock_reason": "resolved"})))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&mock_server)
        .await;
    Mock::given(method("DELETE"))
        .and(path("/repos/o/r/issues/7/lock"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&mock_server)
        .await;

    let issues = client_for(&mock_server).issues();
    let update = IssueUpdate {
        state: Some(crate::models::IssueState::Closed),
        ..Default::default()
    };

    let updated = issues.update("o", "r", 7, &update).await.unwrap();
    assert_eq!(updated.state, crate::models::IssueState::Closed);

    issues
        .lock("o", "r", 7, Some(LockReason::Resolved))
        .await
        .unwrap();
    issues.unlock("o", "r", 7).await.unwrap();
}

#[tokio::test]
async fn test_missing_issue_is_not_found() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/repos/o/r/issues/99"))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({"message": "Not Found"})))
        .mount(&mock_server)
        .await;

    let err = client_for(&mock_server)
        .issues()
        .get("o", "r", 99)
        .await
        .unwrap_err();

    assert!(err.is_not_found());
}

// ============================================================================
// Issue Comments
// ============================================================================

#[tokio::test]
async fn test_issue_comment_lifecycle() {
    let mock_server = MockServer::start().await;
    let comment = json!({"id": 11, "body": "Thanks!", "user": user(1, "octocat")});

    Mock::given(method("POST"))
        .and(path("/repos/o/r/issues/3/comments"))
        .and(body_json(json!({"body": "Thanks!"})))
        .respond_with(ResponseTemplate::new(201).set_body_json(comment.clone()))
        .expect(1)
        .mount(&mock_server)
        .await;
    Mock::given(method("GET"))
        .and(path("/repos/o/r/issues/3/comments"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([comment])))
        .expect(1)
        .mount(&mock_server)
        .await;
    Mock::given(method("PATCH"))
        .and(path("/repos/o/r/issues/comments/11"))
        .and(body_json(json!({"body": "Thanks a lot!"})))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({"id": 11, "body": "Thanks a lot!"})),
        )
        .expect(1)
        .mount(&mock_server)
        .await;
    Mock::given(method("DELETE"))
        .and(path("/repos/o/r/issues/comments/11"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&mock_server)
        .await;

    let comments = client_for(&mock_server).issue_comments();

    let created = comments.create("o", "r", 3, "Thanks!").await.unwrap();
    assert_eq!(created.id, 11);

    let all: Vec<_> = comments
        .get_all_for_issue("o", "r", 3, &ApiOptions::new())
        .unwrap()
        .try_collect()
        .await
        .unwrap();
    assert_eq!(all.len(), 1);

    let updated = comments.update("o", "r", 11, "Thanks a lot!").await.unwrap();
    assert_eq!(updated.body, "Thanks a lot!");

    comments.delete("o", "r", 11).await.unwrap();
}

// ============================================================================
// Users
// ============================================================================

#[tokio::test]
async fn test_users_and_followers() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/user"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": 1, "login": "octocat", "name": "The Octocat", "followers": 2
        })))
        .mount(&mock_server)
        .await;
    Mock::given(method("GET"))
        .and(path("/user/followers"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!([user(2, "hubot"), user(3, "monalisa")])),
        )
        .mount(&mock_server)
        .await;
    Mock::given(method("GET"))
        .and(path("/users/hubot/following"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .mount(&mock_server)
        .await;

    let users = client_for(&mock_server).users();

    let me = users.current().await.unwrap();
    assert_eq!(me.user.login, "octocat");

    let followers: Vec<String> = users
        .get_all_followers_for_current(&ApiOptions::new())
        .unwrap()
        .map_ok(|u| u.login)
        .try_collect()
        .await
        .unwrap();
    assert_eq!(followers, vec!["hubot", "monalisa"]);

    let following: Vec<_> = users
        .get_all_following("hubot", &ApiOptions::new())
        .unwrap()
        .try_collect()
        .await
        .unwrap();
    assert!(following.is_empty());
}

#[tokio::test]
async fn test_unauthorized_user_request() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/user/followers"))
        .respond_with(
            ResponseTemplate::new(401).set_body_json(json!({"message": "Bad credentials"})),
        )
        .mount(&mock_server)
        .await;

    let mut stream = client_for(&mock_server)
        .users()
        .get_all_followers_for_current(&ApiOptions::new())
        .unwrap();

    let err = stream.next().await.unwrap().unwrap_err();
    assert!(err.is_authorization());
    assert!(stream.next().await.is_none());
}

// ============================================================================
// Releases
// ============================================================================

#[tokio::test]
async fn test_releases() {
    let mock_server = MockServer::start().await;
    let release = json!({"id": 1, "tag_name": "v1.0.0", "name": "One"});

    Mock::given(method("GET"))
        .and(path("/repos/o/r/releases/latest"))
        .respond_with(ResponseTemplate::new(200).set_body_json(release.clone()))
        .mount(&mock_server)
        .await;
    Mock::given(method("GET"))
        .and(path("/repos/o/r/releases"))
        .and(query_param("per_page", "1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([release])))
        .mount(&mock_server)
        .await;
    Mock::given(method("POST"))
        .and(path("/repos/o/r/releases"))
        .respond_with(
            ResponseTemplate::new(201).set_body_json(json!({"id": 2, "tag_name": "v2.0.0"})),
        )
        .expect(1)
        .mount(&mock_server)
        .await;

    let releases = client_for(&mock_server).releases();

    let latest = releases.get_latest("o", "r").await.unwrap();
    assert_eq!(latest.tag_name, "v1.0.0");

    let all: Vec<_> = releases
        .get_all("o", "r", &ApiOptions::new().with_page_size(1))
        .unwrap()
        .try_collect()
        .await
        .unwrap();
    assert_eq!(all.len(), 1);

    let created = releases
        .create("o", "r", &NewRelease::new("v2.0.0"))
        .await
        .unwrap();
    assert_eq!(created.id, 2);
}

// ============================================================================
// Commit Statuses
// ============================================================================

#[tokio::test]
async fn test_statuses_for_branch_reference() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/repos/o/r/commits/main/statuses"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {"id": 2, "state": "success", "context": "ci/build"},
            {"id": 1, "state": "pending", "context": "ci/build"}
        ])))
        .expect(1)
        .mount(&mock_server)
        .await;
    Mock::given(method("GET"))
        .and(path("/repos/o/r/commits/main/status"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "state": "success", "sha": "abc", "total_count": 1,
            "statuses": [{"id": 2, "state": "success"}]
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let statuses = client_for(&mock_server).statuses();

    let all: Vec<_> = statuses
        .get_all_for_reference("o", "r", "main", &ApiOptions::new())
        .unwrap()
        .try_collect()
        .await
        .unwrap();
    assert_eq!(all[0].state, CommitState::Success);
    assert_eq!(all[1].state, CommitState::Pending);

    let combined = statuses.get_combined("o", "r", "main").await.unwrap();
    assert_eq!(combined.total_count, 1);
}

#[tokio::test]
async fn test_create_status() {
    let mock_server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/repos/o/r/statuses/abc123"))
        .and(body_json(json!({"state": "failure", "context": "ci/test"})))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({
            "id": 5, "state": "failure", "context": "ci/test"
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let mut status = NewCommitStatus::new(CommitState::Failure);
    status.context = Some("ci/test".to_string());

    let created = client_for(&mock_server)
        .statuses()
        .create("o", "r", "abc123", &status)
        .await
        .unwrap();

    assert_eq!(created.id, 5);
}
