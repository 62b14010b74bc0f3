#[cfg(test)]
mod tests {
    use crate::helpers::{bearer, body_json, make_test_app, seed_period, seed_user};
    use axum::{
        body::Body as AxumBody,
        http::{Request, StatusCode},
    };
    use chrono::{DateTime, Duration, Utc};
    use db::models::scan_token::Model as ScanToken;
    use db::models::user::Role;
    use serde_json::json;
    use tower::ServiceExt;

    fn generate(auth: &str, body: serde_json::Value) -> Request<AxumBody> {
        Request::builder()
            .method("POST")
            .uri("/api/qr/generate")
            .header("Authorization", auth)
            .header("Content-Type", "application/json")
            .body(AxumBody::from(body.to_string()))
            .unwrap()
    }

    #[tokio::test]
    async fn teacher_generates_code_with_defaults() {
        let (app, state) = make_test_app().await;
        let teacher = seed_user(state.db(), "qr_teacher", Role::Teacher).await;
        let period = seed_period(state.db(), Some(teacher.id), "07:00", "08:00", 15).await;

        let before = Utc::now();
        let response = app
            .oneshot(generate(&bearer(&teacher), json!({ "periodId": period.id })))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::CREATED);

        let json = body_json(response).await;
        assert_eq!(json["success"], true);
        assert_eq!(json["data"]["period_id"], period.id);
        assert_eq!(json["data"]["created_by"], teacher.id);
        assert_eq!(json["data"]["expired"], false);
        assert_eq!(json["data"]["period"]["id"], period.id);
        assert_eq!(
            json["data"]["date"],
            state.clock().date_at(before).to_string()
        );

        let code = json["data"]["code"].as_str().unwrap();
        assert_eq!(code.len(), 32);

        let expires_at: DateTime<Utc> = json["data"]["expires_at"].as_str().unwrap().parse().unwrap();
        let ttl = expires_at - before;
        assert!(ttl >= Duration::minutes(59) && ttl <= Duration::minutes(61));

        let stored = ScanToken::find_by_code(state.db(), code).await.unwrap().unwrap();
        assert_eq!(stored.period_id, period.id);
    }

    #[tokio::test]
    async fn explicit_date_and_ttl_are_respected() {
        let (app, state) = make_test_app().await;
        let teacher = seed_user(state.db(), "qr_ttl_teacher", Role::Secretary).await;
        let period = seed_period(state.db(), None, "07:00", "08:00", 15).await;

        let body = json!({ "period_id": period.id, "date": "2025-10-06", "expires_in_minutes": 5 });
        let before = Utc::now();
        let response = app.oneshot(generate(&bearer(&teacher), body)).await.unwrap();
        assert_eq!(response.status(), StatusCode::CREATED);

        let json = body_json(response).await;
        assert_eq!(json["data"]["date"], "2025-10-06");
        let expires_at: DateTime<Utc> = json["data"]["expires_at"].as_str().unwrap().parse().unwrap();
        assert!(expires_at - before <= Duration::minutes(6));
    }

    #[tokio::test]
    async fn out_of_range_ttl_is_rejected() {
        let (app, state) = make_test_app().await;
        let teacher = seed_user(state.db(), "qr_range_teacher", Role::Teacher).await;
        let period = seed_period(state.db(), None, "07:00", "08:00", 15).await;

        for ttl in [0, 1441] {
            let body = json!({ "period_id": period.id, "expires_in_minutes": ttl });
            let response = app.clone().oneshot(generate(&bearer(&teacher), body)).await.unwrap();
            assert_eq!(response.status(), StatusCode::BAD_REQUEST, "ttl {ttl}");
        }
    }

    #[tokio::test]
    async fn unknown_period_is_not_found() {
        let (app, state) = make_test_app().await;
        let teacher = seed_user(state.db(), "qr_missing_teacher", Role::Teacher).await;

        let response = app
            .oneshot(generate(&bearer(&teacher), json!({ "period_id": 4242 })))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert_eq!(body_json(response).await["message"], "Period not found");
    }

    #[tokio::test]
    async fn get_returns_expired_flag() {
        let (app, state) = make_test_app().await;
        let teacher = seed_user(state.db(), "qr_get_teacher", Role::Teacher).await;
        let period = seed_period(state.db(), None, "07:00", "08:00", 15).await;
        let now = Utc::now();
        let token = ScanToken::create(
            state.db(),
            period.id,
            now.date_naive(),
            now - Duration::minutes(1),
            Some(teacher.id),
        )
        .await
        .unwrap();

        let req = Request::builder()
            .method("GET")
            .uri(format!("/api/qr/{}", token.code))
            .header("Authorization", bearer(&teacher))
            .body(AxumBody::empty())
            .unwrap();
        let response = app.clone().oneshot(req).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let json = body_json(response).await;
        assert_eq!(json["data"]["code"], token.code);
        assert_eq!(json["data"]["expired"], true);

        let req = Request::builder()
            .method("GET")
            .uri("/api/qr/doesnotexist")
            .header("Authorization", bearer(&teacher))
            .body(AxumBody::empty())
            .unwrap();
        let response = app.oneshot(req).await.unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }
}
