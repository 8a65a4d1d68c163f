#[cfg(test)]
mod tests {
    use crate::routes::routes;
    use axum::{
        body::{to_bytes, Body},
        http::{Request, StatusCode},
        Router,
    };
    use citabot_appointments::{AppointmentPlanner, AppointmentProcessor};
    use citabot_common::services::mock::{RecordingCalendarService, RecordingMessageSender};
    use citabot_common::webhook::compute_signature;
    use citabot_common::{into_dyn_calendar, into_dyn_sender, Channel};
    use citabot_config::{AppointmentsConfig, MessengerConfig};
    use serde_json::json;
    use std::sync::Arc;
    use tower::ServiceExt;

    struct Harness {
        app: Router,
        calendar: Arc<RecordingCalendarService>,
        sender: Arc<RecordingMessageSender>,
    }

    fn harness(app_secret: Option<&str>) -> Harness {
        harness_with_token(app_secret, "my-verify-token")
    }

    fn harness_with_token(app_secret: Option<&str>, verify_token: &str) -> Harness {
        let calendar = Arc::new(RecordingCalendarService::new());
        let sender = Arc::new(RecordingMessageSender::new(Channel::Messenger));
        let planner = AppointmentPlanner::from_config(&AppointmentsConfig::default()).unwrap();
        let processor = Arc::new(AppointmentProcessor::new(
            planner,
            into_dyn_calendar(calendar.clone()),
        ));
        let config = MessengerConfig {
            verify_token: verify_token.to_string(),
            access_token: None,
            app_secret: app_secret.map(String::from),
            graph_api_base: "https://graph.facebook.com".to_string(),
            graph_api_version: "v20.0".to_string(),
            chunk_delay_ms: 0,
        };
        Harness {
            app: routes(config, processor, Some(into_dyn_sender(sender.clone()))),
            calendar,
            sender,
        }
    }

    fn page_payload(text: &str) -> String {
        json!({
            "object": "page",
            "entry": [{
                "id": "PAGE_ID",
                "time": 1458692752478i64,
                "messaging": [{
                    "sender": {"id": "USER_ID"},
                    "recipient": {"id": "PAGE_ID"},
                    "timestamp": 1458692752478i64,
                    "message": {"mid": "mid.1", "text": text}
                }]
            }]
        })
        .to_string()
    }

    fn post(body: String) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri("/messenger/webhook")
            .header("content-type", "application/json")
            .body(Body::from(body))
            .unwrap()
    }

    async fn body_text(response: axum::response::Response) -> String {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        String::from_utf8(bytes.to_vec()).unwrap()
    }

    #[tokio::test]
    async fn test_verify_echoes_challenge() {
        let h = harness(None);
        let response = h
            .app
            .oneshot(
                Request::builder()
                    .uri("/messenger/webhook?hub.mode=subscribe&hub.verify_token=my-verify-token&hub.challenge=1158201444")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_text(response).await, "1158201444");
    }

    #[tokio::test]
    async fn test_verify_rejects_wrong_or_missing_token() {
        for uri in [
            "/messenger/webhook?hub.mode=subscribe&hub.verify_token=nope&hub.challenge=1",
            "/messenger/webhook?hub.challenge=1",
        ] {
            let response = harness(None)
                .app
                .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
                .await
                .unwrap();
            assert_eq!(response.status(), StatusCode::FORBIDDEN, "{uri}");
        }
    }

    #[tokio::test]
    async fn test_verify_rejects_unconfigured_token() {
        for token in ["secret_from_env", ""] {
            let uri = format!(
                "/messenger/webhook?hub.mode=subscribe&hub.verify_token={token}&hub.challenge=1"
            );
            let response = harness_with_token(None, token)
                .app
                .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
                .await
                .unwrap();
            assert_eq!(response.status(), StatusCode::FORBIDDEN, "{token:?}");
        }
    }

    #[tokio::test]
    async fn test_text_message_is_processed_and_answered() {
        let h = harness(None);
        let response = h
            .app
            .oneshot(post(page_payload(
                "Hola, quiero agendar una cita para mañana a las 10am.",
            )))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_text(response).await, "EVENT_RECEIVED");
        assert_eq!(h.calendar.insert_calls().len(), 1);
        assert_eq!(h.calendar.calls().len(), 1);
        assert_eq!(
            h.sender.sent(),
            vec![(
                "USER_ID".to_string(),
                "¡Listo! Tu cita quedó agendada.".to_string()
            )]
        );
    }

    #[tokio::test]
    async fn test_non_page_object_is_not_found() {
        let h = harness(None);
        let body = json!({"object": "user", "entry": []}).to_string();
        let response = h.app.oneshot(post(body)).await.unwrap();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert!(h.calendar.calls().is_empty());
    }

    #[tokio::test]
    async fn test_malformed_json_is_bad_request() {
        let h = harness(None);
        let response = h.app.oneshot(post("{\"object\": ".to_string())).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_signature_is_enforced_when_secret_set() {
        let body = page_payload("Hola, quiero cancelar mi cita.");

        let h = harness(Some("app-secret"));
        let mut request = post(body.clone());
        request
            .headers_mut()
            .insert("x-hub-signature-256", "sha256=deadbeef".parse().unwrap());
        let response = h.app.oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::FORBIDDEN);
        assert!(h.calendar.calls().is_empty());

        let h = harness(Some("app-secret"));
        let signature = compute_signature("app-secret", body.as_bytes()).unwrap();
        let mut request = post(body);
        request.headers_mut().insert(
            "x-hub-signature-256",
            format!("sha256={signature}").parse().unwrap(),
        );
        let response = h.app.oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(h.calendar.delete_calls(), vec!["evento_a_cancelar_id".to_string()]);
    }
}
