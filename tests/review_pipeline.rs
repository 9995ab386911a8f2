//! End-to-end tests of the merge request pipeline against a mock GitLab
//! server, and of the review agent driving the tool through a mock LLM.

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use mockito::Matcher;
use pretty_assertions::assert_eq;
use rig::tool::Tool;
use serde_json::json;
use tokio_util::sync::CancellationToken;

use mrpilot::agents::{AgentSession, ReviewAgent};
use mrpilot::config::GitLabSettings;
use mrpilot::gitlab::{GitLabClient, GitLabError, ReviewContextFetcher};
use mrpilot::models::DiffEntry;
use mrpilot::providers::{AgentProvider, AgentRequest, ProviderError};
use mrpilot::tools::merge_request::MergeRequestArgs;

const TOKEN: &str = "glpat-e2e";

fn mr_url(server: &mockito::ServerGuard) -> String {
    format!("{}/acme/widgets/-/merge_requests/7", server.url())
}

fn fetcher_for(server: &mockito::ServerGuard) -> ReviewContextFetcher {
    let client = GitLabClient::new(&GitLabSettings::new(server.url(), TOKEN)).unwrap();
    ReviewContextFetcher::new(Arc::new(client))
}

/// Mount the project lookup, MR info and changes endpoints.
async fn mount_merge_request(server: &mut mockito::ServerGuard) -> Vec<mockito::Mock> {
    let project = server
        .mock("GET", "/api/v4/projects/acme%2Fwidgets")
        .match_header("authorization", "Bearer glpat-e2e")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(json!({"id": 101}).to_string())
        .create_async()
        .await;
    let info = server
        .mock("GET", "/api/v4/projects/101/merge_requests/7")
        .match_header("authorization", "Bearer glpat-e2e")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(
            json!({
                "id": 9001,
                "iid": 7,
                "title": "Fix bug",
                "description": "Replaces foo with bar.",
                "author": {"name": "Ada Lovelace"},
                "source_branch": "fix-bug",
                "target_branch": "main",
                "state": "opened",
                "web_url": "https://gitlab.example.com/acme/widgets/-/merge_requests/7"
            })
            .to_string(),
        )
        .create_async()
        .await;
    let changes = server
        .mock("GET", "/api/v4/projects/101/merge_requests/7/changes")
        .match_header("authorization", "Bearer glpat-e2e")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(
            json!({
                "changes": [{
                    "old_path": "src/lib.rs",
                    "new_path": "src/lib.rs",
                    "new_file": false,
                    "deleted_file": false,
                    "renamed_file": false,
                    "diff": "@@ -1 +1 @@\n-foo\n+bar"
                }]
            })
            .to_string(),
        )
        .create_async()
        .await;
    vec![project, info, changes]
}

#[tokio::test]
async fn fetch_builds_context_when_editor_config_is_missing() {
    let mut server = mockito::Server::new_async().await;
    let mocks = mount_merge_request(&mut server).await;
    let config = server
        .mock("GET", "/api/v4/projects/101/repository/files/.editorconfig/raw")
        .match_query(Matcher::UrlEncoded("ref".into(), "main".into()))
        .with_status(404)
        .expect(1)
        .create_async()
        .await;

    let ctx = fetcher_for(&server)
        .fetch(&mr_url(&server), &CancellationToken::new())
        .await
        .unwrap();

    assert_eq!(ctx.info.id, 9001);
    assert_eq!(ctx.info.title, "Fix bug");
    assert_eq!(ctx.info.author, "Ada Lovelace");
    assert_eq!(
        ctx.diffs,
        vec![DiffEntry {
            old_path: "src/lib.rs".into(),
            new_path: "src/lib.rs".into(),
            new_file: false,
            deleted_file: false,
            renamed_file: false,
            diff: "@@ -1 +1 @@\n-foo\n+bar".into(),
        }]
    );
    assert_eq!(ctx.editor_config, None);

    for m in mocks {
        m.assert_async().await;
    }
    config.assert_async().await;
}

#[tokio::test]
async fn fetch_includes_editor_config_and_is_repeatable() {
    let mut server = mockito::Server::new_async().await;
    let _mocks = mount_merge_request(&mut server).await;
    let _config = server
        .mock("GET", "/api/v4/projects/101/repository/files/.editorconfig/raw")
        .match_query(Matcher::UrlEncoded("ref".into(), "main".into()))
        .with_status(200)
        .with_body("root = true\n\n[*.rs]\nindent_size = 4\n")
        .create_async()
        .await;

    let fetcher = fetcher_for(&server);
    let first = fetcher
        .fetch(&mr_url(&server), &CancellationToken::new())
        .await
        .unwrap();
    let second = fetcher
        .fetch(&mr_url(&server), &CancellationToken::new())
        .await
        .unwrap();

    assert_eq!(first.editor_config.as_deref(), Some("root = true\n\n[*.rs]\nindent_size = 4\n"));
    assert_eq!(first, second);
}

#[tokio::test]
async fn missing_target_branch_never_requests_editor_config() {
    let mut server = mockito::Server::new_async().await;
    let _project = server
        .mock("GET", "/api/v4/projects/acme%2Fwidgets")
        .with_status(200)
        .with_body(json!({"id": 101}).to_string())
        .create_async()
        .await;
    let _info = server
        .mock("GET", "/api/v4/projects/101/merge_requests/7")
        .with_status(200)
        .with_body(
            json!({
                "id": 9001, "iid": 7, "title": "Fix bug", "author": {"name": "Ada"},
                "source_branch": "fix-bug", "state": "opened", "web_url": "x"
            })
            .to_string(),
        )
        .create_async()
        .await;
    let _changes = server
        .mock("GET", "/api/v4/projects/101/merge_requests/7/changes")
        .with_status(200)
        .with_body(json!({"changes": []}).to_string())
        .create_async()
        .await;
    let config = server
        .mock("GET", Matcher::Regex(r"/repository/files/".to_string()))
        .expect(0)
        .create_async()
        .await;

    let err = fetcher_for(&server)
        .fetch(&mr_url(&server), &CancellationToken::new())
        .await
        .unwrap_err();

    assert!(matches!(err, GitLabError::UpstreamProtocol { .. }), "{err:?}");
    config.assert_async().await;
}

#[tokio::test]
async fn unknown_project_is_reported() {
    let mut server = mockito::Server::new_async().await;
    let _project = server
        .mock("GET", "/api/v4/projects/acme%2Fwidgets")
        .with_status(404)
        .create_async()
        .await;
    let others = server
        .mock("GET", Matcher::Regex(r"/api/v4/projects/\d+".to_string()))
        .expect(0)
        .create_async()
        .await;

    let err = fetcher_for(&server)
        .fetch(&mr_url(&server), &CancellationToken::new())
        .await
        .unwrap_err();

    assert!(matches!(err, GitLabError::ProjectNotFound { .. }), "{err:?}");
    others.assert_async().await;
}

/// LLM stand-in that calls the merge request tool once and summarises what it saw.
#[derive(Default)]
struct ToolCallingProvider {
    tool_outputs: Mutex<Vec<String>>,
}

#[async_trait]
impl AgentProvider for ToolCallingProvider {
    async fn prompt(&self, request: AgentRequest) -> Result<String, ProviderError> {
        let tool = request
            .tool
            .ok_or_else(|| ProviderError::ApiError("no tool registered".into()))?;
        let url = request
            .prompt
            .lines()
            .last()
            .unwrap_or_default()
            .to_string();

        let output = match tool.call(MergeRequestArgs { url }).await {
            Ok(output) => output,
            Err(e) => e.to_string(),
        };
        self.tool_outputs.lock().unwrap().push(output.clone());

        if output.contains("```diff") {
            Ok("File: src/lib.rs\n\n- 🟢 [GREEN]\n  Location: lines 1-1".to_string())
        } else {
            Ok(format!("could not review: {output}"))
        }
    }
}

#[tokio::test]
async fn review_agent_fetches_through_tool() {
    let mut server = mockito::Server::new_async().await;
    let _mocks = mount_merge_request(&mut server).await;
    let _config = server
        .mock("GET", "/api/v4/projects/101/repository/files/.editorconfig/raw")
        .match_query(Matcher::Any)
        .with_status(404)
        .create_async()
        .await;

    let provider = Arc::new(ToolCallingProvider::default());
    let mut session = AgentSession::from_provider(provider.clone());
    session.start().unwrap();

    let agent = ReviewAgent::new(fetcher_for(&server), 4);
    let report = agent
        .review(&session, &mr_url(&server), &CancellationToken::new())
        .await
        .unwrap();

    assert!(report.starts_with("File: src/lib.rs"));
    let outputs = provider.tool_outputs.lock().unwrap();
    assert_eq!(outputs.len(), 1);
    assert!(outputs[0].contains("# Merge Request !7: Fix bug"));
    assert!(outputs[0].contains("ABSENT: the repository has no .editorconfig"));
    assert!(outputs[0].contains("+bar"));
}

#[tokio::test]
async fn tool_errors_are_returned_to_the_model() {
    let mut server = mockito::Server::new_async().await;
    let _project = server
        .mock("GET", "/api/v4/projects/acme%2Fwidgets")
        .with_status(404)
        .create_async()
        .await;

    let provider = Arc::new(ToolCallingProvider::default());
    let mut session = AgentSession::from_provider(provider.clone());
    session.start().unwrap();

    let report = ReviewAgent::new(fetcher_for(&server), 4)
        .review(&session, &mr_url(&server), &CancellationToken::new())
        .await
        .unwrap();

    assert!(report.starts_with("could not review: get_merge_request_data error: project acme/widgets not found"));
}
