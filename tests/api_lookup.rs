//! Integration tests for the REST lookup backend using wiremock
//!
//! These tests run the api backend against mocked Resource Manager
//! endpoints, covering successful describes and the error paths the
//! resolver turns into placeholders.

use iam_reporter::gcp::auth::GcpCredentials;
use iam_reporter::gcp::client::GcpClient;
use iam_reporter::hierarchy::{FOLDER_NOT_FOUND, PROJECT_NOT_FOUND};
use iam_reporter::lookup::api::ApiLookup;
use iam_reporter::lookup::NameLookup;
use iam_reporter::policy::parse_documents;
use iam_reporter::ReportBuilder;
use serde_json::json;
use wiremock::matchers::{bearer_token, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn lookup_for(server: &MockServer) -> ApiLookup {
    let credentials = GcpCredentials::from_access_token("test-token");
    let client = GcpClient::with_credentials(credentials, &server.uri()).expect("client");
    ApiLookup::new(client)
}

mod describe_tests {
    use super::*;

    /// Project describe reads name and parent from the v1 response
    #[tokio::test]
    async fn test_describe_project_success() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/v1/projects/p1"))
            .and(bearer_token("test-token"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "projectId": "p1",
                "name": "Payments",
                "parent": {"type": "folder", "id": "42"}
            })))
            .mount(&server)
            .await;

        let details = lookup_for(&server)
            .describe_project("p1")
            .await
            .expect("project should resolve");

        assert_eq!(details.display_name, "Payments");
        assert_eq!(details.parent_type, "folder");
        assert_eq!(details.parent_id, "42");
    }

    /// Folder describe reads displayName and parent from the v3 response
    #[tokio::test]
    async fn test_describe_folder_and_parent() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/v3/folders/42"))
            .and(bearer_token("test-token"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "name": "folders/42",
                "parent": "organizations/7",
                "displayName": "Finance"
            })))
            .mount(&server)
            .await;

        let lookup = lookup_for(&server);
        assert_eq!(lookup.describe_folder("42").await.unwrap(), "Finance");
        assert_eq!(lookup.folder_parent("42").await.unwrap(), "organizations/7");
    }

    /// 403 responses are errors carrying a readable message
    #[tokio::test]
    async fn test_403_is_an_error() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/v3/folders/secret"))
            .respond_with(ResponseTemplate::new(403).set_body_json(json!({
                "error": {"code": 403, "message": "Permission denied"}
            })))
            .mount(&server)
            .await;

        let err = lookup_for(&server)
            .describe_folder("secret")
            .await
            .unwrap_err();
        assert_eq!(
            err.to_string(),
            "Permission denied. Check your GCP IAM permissions."
        );
        assert!(format!("{:#}", err).contains("403"));
    }

    /// A 200 without the expected fields counts as malformed
    #[tokio::test]
    async fn test_malformed_project_response() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/v1/projects/odd"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"name": "Odd"})))
            .mount(&server)
            .await;

        assert!(lookup_for(&server).describe_project("odd").await.is_err());
    }
}

mod report_tests {
    use super::*;

    /// Full report over the REST backend, with a failing folder hit twice
    #[tokio::test]
    async fn test_report_over_api_caches_failed_folder() {
        let server = MockServer::start().await;

        for id in ["p1", "p2"] {
            Mock::given(method("GET"))
                .and(path(format!("/v1/projects/{}", id)))
                .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                    "name": format!("Project {}", id),
                    "parent": {"type": "folder", "id": "99"}
                })))
                .mount(&server)
                .await;
        }

        Mock::given(method("GET"))
            .and(path("/v3/folders/99"))
            .respond_with(ResponseTemplate::new(404))
            .expect(1)
            .mount(&server)
            .await;

        Mock::given(method("GET"))
            .and(path("/v1/projects/gone"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&server)
            .await;

        let docs = parse_documents(
            &json!([
                {
                    "resource": "//cloudresourcemanager.googleapis.com/projects/p1",
                    "organization": "organizations/1",
                    "policy": {"bindings": [{"role": "roles/viewer", "members": ["user:a@x.com"]}]}
                },
                {
                    "resource": "//cloudresourcemanager.googleapis.com/projects/p2",
                    "organization": "organizations/1",
                    "policy": {"bindings": [{"role": "roles/viewer", "members": ["user:b@x.com"]}]}
                },
                {
                    "resource": "//cloudresourcemanager.googleapis.com/projects/gone",
                    "organization": "organizations/1",
                    "policy": {"bindings": [{"role": "roles/owner", "members": ["user:c@x.com"]}]}
                }
            ])
            .to_string(),
        )
        .unwrap();

        let report = ReportBuilder::new(lookup_for(&server))
            .quiet(true)
            .build(&docs)
            .await;

        assert_eq!(report.rows.len(), 3);
        assert_eq!(report.rows[0].resource_name, "Project p1");
        assert_eq!(report.rows[0].parent_name, FOLDER_NOT_FOUND);
        assert_eq!(report.rows[1].parent_name, FOLDER_NOT_FOUND);
        assert_eq!(report.rows[2].resource_name, PROJECT_NOT_FOUND);
        // MockServer verifies the `expect(1)` on drop
    }
}
