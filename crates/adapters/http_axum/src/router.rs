//! Axum router assembly.

use axum::Router;
use axum::routing::{get, post};
use tower_http::trace::TraceLayer;

use restswitch_app::ports::{HttpClient, TemplateRenderer};

use crate::api;
use crate::state::AppState;

/// Build the top-level axum [`Router`].
///
/// Serves the switch API under `/api` and a health probe at `/health`.
/// Includes a [`TraceLayer`] that logs each HTTP request/response at the
/// `DEBUG` level using the `tracing` ecosystem.
pub fn build<H, T>(state: AppState<H, T>) -> Router
where
    H: HttpClient + Send + Sync + 'static,
    T: TemplateRenderer + Send + Sync + 'static,
{
    Router::new()
        .route("/health", get(health_check))
        .route("/api/switch", get(api::get::<H, T>))
        .route("/api/switch/{service}", post(api::call_service::<H, T>))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn health_check() -> &'static str {
    "OK"
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};
    use std::time::Duration;

    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use http_body_util::BodyExt;
    use restswitch_app::ports::{HttpResponse, TemplateError, TransportError};
    use restswitch_app::switch::RestSwitch;
    use restswitch_domain::config::SwitchConfig;
    use tower::ServiceExt;

    /// Serves a fixed body and answers posts with a fixed status.
    struct StubHttp {
        body: &'static str,
        post_status: Mutex<u16>,
    }

    impl HttpClient for StubHttp {
        async fn get(
            &self,
            _url: &str,
            _timeout: Duration,
        ) -> Result<HttpResponse, TransportError> {
            Ok(HttpResponse::new(200, self.body))
        }

        async fn post(
            &self,
            _url: &str,
            _body: String,
            _timeout: Duration,
        ) -> Result<HttpResponse, TransportError> {
            let status = *self.post_status.lock().unwrap();
            Ok(HttpResponse::new(status, ""))
        }
    }

    struct StubTemplates;

    impl TemplateRenderer for StubTemplates {
        fn validate(&self, _template: &str) -> Result<(), TemplateError> {
            Ok(())
        }

        fn render(&self, template: &str) -> Result<String, TemplateError> {
            Ok(template.to_string())
        }

        fn render_with_possible_json(&self, _: &str, _: &str, error_value: &str) -> String {
            error_value.to_string()
        }
    }

    fn test_state(body: &'static str, post_status: u16) -> AppState<StubHttp, StubTemplates> {
        let mut config = SwitchConfig::new("http://host/switch");
        config.name = "Garden Pump".to_string();
        let http = StubHttp {
            body,
            post_status: Mutex::new(post_status),
        };
        AppState::new(Arc::new(RestSwitch::new(config, http, StubTemplates)))
    }

    async fn send(app: Router, method: &str, uri: &str) -> (StatusCode, serde_json::Value) {
        let response = app
            .oneshot(
                Request::builder()
                    .method(method)
                    .uri(uri)
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn should_return_ok_when_health_check_called() {
        let app = build(test_state("ON", 200));

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/health")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn should_return_switch_snapshot() {
        let (status, json) = send(build(test_state("ON", 200)), "GET", "/api/switch").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["entity_id"], "switch.garden_pump");
        assert_eq!(json["name"], "Garden Pump");
        assert_eq!(json["state"], "unknown");
    }

    #[tokio::test]
    async fn should_turn_on_through_service_call() {
        let state = test_state("OFF", 200);
        let (status, json) = send(build(state.clone()), "POST", "/api/switch/turn_on").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["state"], "on");
        assert!(state.switch.is_on());
    }

    #[tokio::test]
    async fn should_refresh_through_update_service() {
        let app = build(test_state("OFF", 200));
        let (status, json) = send(app, "POST", "/api/switch/update").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["state"], "off");
    }

    #[tokio::test]
    async fn should_return_bad_request_for_unknown_service() {
        let (status, json) = send(build(test_state("ON", 200)), "POST", "/api/switch/reboot").await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(json["error"], "unknown service \"reboot\"");
    }

    #[tokio::test]
    async fn should_return_bad_gateway_when_endpoint_rejects_command() {
        let state = test_state("ON", 500);
        let (status, json) = send(build(state.clone()), "POST", "/api/switch/turn_off").await;

        assert_eq!(status, StatusCode::BAD_GATEWAY);
        assert_eq!(
            json["error"],
            "cannot turn off http://host/switch: endpoint rejected the command with status 500"
        );
        assert_eq!(
            state.switch.state(),
            restswitch_domain::entity::SwitchState::Unknown
        );
    }
}
