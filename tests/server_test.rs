//! Integration tests for the occupancy agent HTTP server

#[cfg(feature = "server")]
mod server_tests {
    use chrono::{Duration, Utc};
    use occusense::server::{run, ServerConfig};
    use std::net::SocketAddr;

    async fn start_server() -> (SocketAddr, tokio::sync::oneshot::Sender<()>) {
        let config = ServerConfig::new(0, chrono_tz::UTC, 10);
        let (addr, shutdown_tx) = run(config).await.expect("Failed to start server");

        // Give server time to start
        tokio::time::sleep(std::time::Duration::from_millis(100)).await;

        (addr, shutdown_tx)
    }

    async fn post_sample(
        client: &reqwest::Client,
        addr: &SocketAddr,
        body: serde_json::Value,
    ) -> reqwest::Response {
        client
            .post(format!("http://{}/api/occupancy/update", addr))
            .header("Content-Type", "application/json")
            .json(&body)
            .send()
            .await
            .expect("Failed to send request")
    }

    #[tokio::test]
    async fn test_health_endpoint() {
        let (addr, shutdown_tx) = start_server().await;

        let client = reqwest::Client::new();
        let response = client
            .get(format!("http://{}/health", addr))
            .send()
            .await
            .expect("Failed to send request");

        assert!(response.status().is_success());

        let body: serde_json::Value = response.json().await.expect("Failed to parse JSON");
        assert_eq!(body["status"], "ok");
        assert!(body["version"].as_str().is_some());

        let _ = shutdown_tx.send(());
    }

    #[tokio::test]
    async fn test_ingest_and_today_summary() {
        let (addr, shutdown_tx) = start_server().await;
        let client = reqwest::Client::new();

        let now = Utc::now();
        let samples = [
            (now - Duration::seconds(2), 5, Some("IN")),
            (now - Duration::seconds(1), 4, Some("OUT")),
            (now, 6, Some("IN")),
        ];

        for (timestamp, count, direction) in samples {
            let mut body = serde_json::json!({
                "timestamp": timestamp.to_rfc3339(),
                "current_count": count,
            });
            if let Some(direction) = direction {
                body["direction"] = serde_json::json!(direction);
            }

            let response = post_sample(&client, &addr, body).await;
            assert_eq!(response.status(), reqwest::StatusCode::CREATED);
        }

        let response = client
            .get(format!("http://{}/api/occupancy/today", addr))
            .send()
            .await
            .expect("Failed to send request");
        assert!(response.status().is_success());

        let body: serde_json::Value = response.json().await.expect("Failed to parse JSON");
        assert_eq!(body["success"], true);
        assert_eq!(body["data"]["total_in"], 2);
        assert_eq!(body["data"]["total_out"], 1);
        assert_eq!(body["data"]["current_inside"], 6);
        assert_eq!(body["data"]["peak_count"], 6);
        assert_eq!(body["data"]["records_today"], 3);

        let _ = shutdown_tx.send(());
    }

    #[tokio::test]
    async fn test_negative_count_is_rejected() {
        let (addr, shutdown_tx) = start_server().await;
        let client = reqwest::Client::new();

        let body = serde_json::json!({
            "timestamp": Utc::now().to_rfc3339(),
            "current_count": -1,
        });
        let response = post_sample(&client, &addr, body).await;

        assert_eq!(response.status(), reqwest::StatusCode::BAD_REQUEST);
        let body: serde_json::Value = response.json().await.expect("Failed to parse JSON");
        assert_eq!(body["code"], "NEGATIVE_COUNT");

        let _ = shutdown_tx.send(());
    }

    #[tokio::test]
    async fn test_negative_limit_is_rejected() {
        let (addr, shutdown_tx) = start_server().await;

        let client = reqwest::Client::new();
        let response = client
            .get(format!("http://{}/api/occupancy/recent?limit=-5", addr))
            .send()
            .await
            .expect("Failed to send request");

        assert_eq!(response.status(), reqwest::StatusCode::BAD_REQUEST);
        let body: serde_json::Value = response.json().await.expect("Failed to parse JSON");
        assert_eq!(body["code"], "INVALID_LIMIT");

        let _ = shutdown_tx.send(());
    }

    #[tokio::test]
    async fn test_recent_activity_excludes_polls() {
        let (addr, shutdown_tx) = start_server().await;
        let client = reqwest::Client::new();

        let now = Utc::now();
        let entry = serde_json::json!({
            "timestamp": (now - Duration::seconds(1)).to_rfc3339(),
            "current_count": 3,
            "direction": "IN",
        });
        let poll = serde_json::json!({
            "timestamp": now.to_rfc3339(),
            "current_count": 3,
        });
        post_sample(&client, &addr, entry).await;
        post_sample(&client, &addr, poll).await;

        let response = client
            .get(format!("http://{}/api/occupancy/recent", addr))
            .send()
            .await
            .expect("Failed to send request");
        assert!(response.status().is_success());

        let body: serde_json::Value = response.json().await.expect("Failed to parse JSON");
        let feed = body["data"].as_array().expect("data should be an array");
        assert_eq!(feed.len(), 1);
        assert_eq!(feed[0]["type"], "entry");
        assert_eq!(feed[0]["count_change"], "+1");
        assert_eq!(feed[0]["current_count"], 3);

        let _ = shutdown_tx.send(());
    }

    #[tokio::test]
    async fn test_weekly_always_lists_seven_days() {
        let (addr, shutdown_tx) = start_server().await;

        let client = reqwest::Client::new();
        let response = client
            .get(format!("http://{}/api/occupancy/weekly", addr))
            .send()
            .await
            .expect("Failed to send request");
        assert!(response.status().is_success());

        let body: serde_json::Value = response.json().await.expect("Failed to parse JSON");
        let days = body["data"]["days"].as_array().expect("days array");
        assert_eq!(days.len(), 7);
        for day in days {
            assert!(day["busiest_hour"].is_null());
            assert_eq!(day["peak_count"], 0);
        }

        let _ = shutdown_tx.send(());
    }

    #[tokio::test]
    async fn test_latest_and_listing() {
        let (addr, shutdown_tx) = start_server().await;
        let client = reqwest::Client::new();

        let response = client
            .get(format!("http://{}/api/occupancy/latest", addr))
            .send()
            .await
            .expect("Failed to send request");
        let body: serde_json::Value = response.json().await.expect("Failed to parse JSON");
        assert!(body["data"].is_null());

        let sample = serde_json::json!({
            "timestamp": Utc::now().to_rfc3339(),
            "current_count": 9,
            "direction": "IN",
        });
        post_sample(&client, &addr, sample).await;

        let response = client
            .get(format!("http://{}/api/occupancy/latest", addr))
            .send()
            .await
            .expect("Failed to send request");
        let body: serde_json::Value = response.json().await.expect("Failed to parse JSON");
        assert_eq!(body["data"]["count"], 9);

        let response = client
            .get(format!("http://{}/api/occupancy", addr))
            .send()
            .await
            .expect("Failed to send request");
        let body: serde_json::Value = response.json().await.expect("Failed to parse JSON");
        assert_eq!(body["count"], 1);

        let _ = shutdown_tx.send(());
    }
}
