use serde_json::json;

use crate::common::{ScriptedEngine, TestApp, routes};

#[tokio::test]
async fn health_check_reports_ok() {
    let app = TestApp::spawn().await;

    let res = app.get_without_token(routes::HEALTH).await;

    assert_eq!(res.status, 200);
    assert_eq!(res.body["status"], "OK");
}

mod run_endpoint {
    use super::*;

    #[tokio::test]
    async fn hello_world_run_succeeds_with_share_id() {
        let app = TestApp::spawn().await;

        let res = app.run_code("print('Hello, World!')", "python").await;

        assert_eq!(res.status, 200);
        assert_eq!(res.body["success"], true);
        assert_eq!(res.body["status"], "success");
        assert!(
            res.body["output"]
                .as_str()
                .unwrap()
                .contains("Hello, World!")
        );
        assert!(res.body["executionTime"].as_i64().is_some());
        assert!(res.body["memory"].as_i64().unwrap() > 0);
        assert_eq!(res.share_id().len(), 8);
        assert!(res.body["submissionId"].as_i64().is_some());
        assert_eq!(app.engine.call_count(), 1);
    }

    #[tokio::test]
    async fn failed_program_run_is_still_http_200() {
        let engine = ScriptedEngine::failing(
            "Traceback (most recent call last):\nSyntaxError: invalid syntax",
        );
        let app = TestApp::spawn_with_engine(engine).await;

        let res = app.run_code("invalid syntax !!!", "python").await;

        assert_eq!(res.status, 200);
        assert_eq!(res.body["success"], false);
        assert_eq!(res.body["status"], "runtime_error");
        assert!(res.body["output"].as_str().unwrap().contains("SyntaxError"));
        // Failed runs are persisted and shareable like any other.
        assert_eq!(res.share_id().len(), 8);
    }

    #[tokio::test]
    async fn upstream_failure_is_folded_into_the_response() {
        let engine = ScriptedEngine::upstream_error("model provider returned HTTP 429");
        let app = TestApp::spawn_with_engine(engine).await;

        let res = app.run_code("print(1)", "python").await;

        assert_eq!(res.status, 200);
        assert_eq!(res.body["success"], false);
        assert_eq!(res.body["status"], "error");
        assert!(
            res.body["output"]
                .as_str()
                .unwrap()
                .starts_with("AI execution error:")
        );
    }

    #[tokio::test]
    async fn missing_code_never_reaches_the_engine() {
        let app = TestApp::spawn().await;

        let res = app
            .post_without_token(routes::RUN, &json!({ "language": "python" }))
            .await;

        assert_eq!(res.status, 400);
        assert_eq!(res.body["code"], "VALIDATION_ERROR");
        assert_eq!(app.engine.call_count(), 0);
    }

    #[tokio::test]
    async fn blank_code_never_reaches_the_engine() {
        let app = TestApp::spawn().await;

        let res = app.run_code("   \n", "python").await;

        assert_eq!(res.status, 400);
        assert_eq!(res.body["code"], "VALIDATION_ERROR");
        assert_eq!(app.engine.call_count(), 0);
    }

    #[tokio::test]
    async fn missing_language_never_reaches_the_engine() {
        let app = TestApp::spawn().await;

        let res = app
            .post_without_token(routes::RUN, &json!({ "code": "print(1)" }))
            .await;

        assert_eq!(res.status, 400);
        assert_eq!(res.body["code"], "VALIDATION_ERROR");
        assert_eq!(app.engine.call_count(), 0);
    }

    #[tokio::test]
    async fn unknown_language_is_rejected_like_the_template_endpoint() {
        let app = TestApp::spawn().await;

        let run = app.run_code("puts 1", "ruby").await;
        let template = app.get_without_token(&routes::template("ruby")).await;

        assert_eq!(run.status, 400);
        assert_eq!(template.status, 400);
        assert_eq!(run.body["code"], "VALIDATION_ERROR");
        assert_eq!(template.body["code"], "VALIDATION_ERROR");
        // Both reject through the same registry, with the same message.
        assert_eq!(run.body["message"], template.body["message"]);
        assert_eq!(app.engine.call_count(), 0);
    }

    #[tokio::test]
    async fn anonymous_run_is_persisted_without_an_owner() {
        let app = TestApp::spawn().await;

        let res = app.run_code("print(1)", "python").await;
        assert_eq!(res.status, 200);

        let lookup = app
            .get_without_token(&routes::submission(res.submission_id()))
            .await;
        assert_eq!(lookup.status, 200);
        assert_eq!(
            lookup.body["submission"]["userId"],
            serde_json::Value::Null
        );
    }

    #[tokio::test]
    async fn authenticated_run_is_attached_to_the_caller() {
        let app = TestApp::spawn().await;
        let token = app.create_authenticated_user("alice", "pass1234").await;

        let res = app.run_code_as("print(1)", "python", &token).await;
        assert_eq!(res.status, 200);

        let lookup = app
            .get_without_token(&routes::submission(res.submission_id()))
            .await;
        assert!(lookup.body["submission"]["userId"].as_i64().is_some());
    }

    #[tokio::test]
    async fn run_with_garbage_token_is_rejected() {
        let app = TestApp::spawn().await;

        let res = app
            .post_with_token(
                routes::RUN,
                &json!({ "code": "print(1)", "language": "python" }),
                "not-a-real-token",
            )
            .await;

        assert_eq!(res.status, 401);
        assert_eq!(res.body["code"], "TOKEN_INVALID");
    }

    #[tokio::test]
    async fn run_without_persistence_still_returns_the_result() {
        let app = TestApp::spawn_without_db().await;

        let res = app.run_code("print('Hello, World!')", "python").await;

        assert_eq!(res.status, 200);
        assert_eq!(res.body["status"], "success");
        assert!(
            res.body["output"]
                .as_str()
                .unwrap()
                .contains("Hello, World!")
        );
        assert_eq!(res.body["submissionId"], serde_json::Value::Null);
        assert_eq!(res.body["shareId"], serde_json::Value::Null);
        assert_eq!(app.engine.call_count(), 1);
    }
}

mod templates {
    use super::*;

    #[tokio::test]
    async fn every_supported_language_has_a_template() {
        let app = TestApp::spawn().await;

        for language in ["c", "cpp", "python", "java", "javascript"] {
            let res = app.get_without_token(&routes::template(language)).await;
            assert_eq!(res.status, 200, "template for {language}: {}", res.text);
            assert!(!res.body["template"].as_str().unwrap().is_empty());
        }
    }

    #[tokio::test]
    async fn python_template_is_the_hello_world_snippet() {
        let app = TestApp::spawn().await;

        let res = app.get_without_token(&routes::template("python")).await;

        assert_eq!(res.status, 200);
        assert_eq!(res.body["template"], "print(\"Hello, World!\")");
    }
}

mod mode {
    use super::*;

    #[tokio::test]
    async fn reports_ai_when_a_key_is_configured() {
        let app = TestApp::spawn().await;

        let res = app.get_without_token(routes::MODE).await;

        assert_eq!(res.status, 200);
        assert_eq!(res.body["mode"], "ai");
        assert!(!res.body["message"].as_str().unwrap().is_empty());
    }

    #[tokio::test]
    async fn reports_demo_without_a_key() {
        let app = TestApp::spawn_with_engine(ScriptedEngine::demo()).await;

        let res = app.get_without_token(routes::MODE).await;

        assert_eq!(res.status, 200);
        assert_eq!(res.body["mode"], "demo");
        assert!(res.body["message"].as_str().unwrap().contains("demo"));
    }
}

mod sharing {
    use super::*;

    #[tokio::test]
    async fn share_round_trip_returns_the_recorded_fields() {
        let app = TestApp::spawn_with_engine(ScriptedEngine::success("15")).await;

        let run = app
            .post_without_token(
                routes::RUN,
                &json!({
                    "code": "a = input()\nb = input()\nprint(int(a) + int(b))",
                    "language": "python",
                    "input": "7\n8",
                }),
            )
            .await;
        assert_eq!(run.status, 200);
        let share_id = run.share_id();

        let shared = app.get_without_token(&routes::share(&share_id)).await;

        assert_eq!(shared.status, 200);
        assert_eq!(
            shared.body["code"],
            "a = input()\nb = input()\nprint(int(a) + int(b))"
        );
        assert_eq!(shared.body["language"], "python");
        assert_eq!(shared.body["input"], "7\n8");
        assert_eq!(shared.body["output"], "15");
        assert_eq!(shared.body["status"], "success");
        // The share view reads the record; it never re-executes.
        assert_eq!(app.engine.call_count(), 1);
    }

    #[tokio::test]
    async fn share_view_exposes_only_display_safe_fields() {
        let app = TestApp::spawn().await;
        let token = app.create_authenticated_user("alice", "pass1234").await;

        let run = app.run_code_as("print(1)", "python", &token).await;
        let shared = app.get_without_token(&routes::share(&run.share_id())).await;

        assert_eq!(shared.status, 200);
        let keys: Vec<&str> = shared
            .body
            .as_object()
            .unwrap()
            .keys()
            .map(String::as_str)
            .collect();
        for key in ["code", "language", "input", "output", "status"] {
            assert!(keys.contains(&key), "missing key {key}");
        }
        // Never the owner or an enumerable id.
        assert!(!keys.contains(&"id"));
        assert!(!keys.contains(&"userId"));
        assert!(!keys.contains(&"shareId"));
    }

    #[tokio::test]
    async fn unknown_share_token_is_not_found() {
        let app = TestApp::spawn().await;

        let res = app.get_without_token(&routes::share("zzzzzzzz")).await;

        assert_eq!(res.status, 404);
        assert_eq!(res.body["code"], "NOT_FOUND");
    }

    #[tokio::test]
    async fn share_without_persistence_is_unavailable() {
        let app = TestApp::spawn_without_db().await;

        let res = app.get_without_token(&routes::share("zzzzzzzz")).await;

        assert_eq!(res.status, 503);
        assert_eq!(res.body["code"], "SERVICE_UNAVAILABLE");
    }
}
