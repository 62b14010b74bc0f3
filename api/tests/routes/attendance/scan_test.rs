#[cfg(test)]
mod tests {
    use crate::helpers::app::campus_geofence;
    use crate::helpers::{bearer, body_json, make_test_app, make_test_app_with_geofence, seed_period, seed_user};
    use axum::{
        body::Body as AxumBody,
        http::{Request, StatusCode},
    };
    use chrono::{Duration, Utc};
    use db::models::attendance_record::{self, Column as RecordCol, Entity as RecordEntity};
    use db::models::period::Model as Period;
    use db::models::scan_token::Model as ScanToken;
    use db::models::user::{Model as UserModel, Role};
    use sea_orm::{ColumnTrait, EntityTrait, PaginatorTrait, QueryFilter};
    use serde_json::{Value, json};
    use tower::ServiceExt;

    const INSIDE: (f64, f64) = (14.5731, 121.1323);
    const OUTSIDE: (f64, f64) = (14.5800, 121.1400);

    struct TestCtx {
        student: UserModel,
        period: Period,
        token: ScanToken,
    }

    /// A period spanning the whole day so the outcome never lands outside the window.
    async fn setup(state: &api::state::AppState) -> TestCtx {
        let teacher = seed_user(state.db(), "scan_teacher", Role::Teacher).await;
        let student = seed_user(state.db(), "scan_student", Role::Student).await;
        let period = seed_period(state.db(), Some(teacher.id), "00:00", "23:59", 240).await;
        let now = Utc::now();
        let token = ScanToken::create(
            state.db(),
            period.id,
            state.clock().date_at(now),
            now + Duration::minutes(60),
            Some(teacher.id),
        )
        .await
        .unwrap();

        TestCtx { student, period, token }
    }

    fn scan(user: &UserModel, body: Value) -> Request<AxumBody> {
        Request::builder()
            .method("POST")
            .uri("/api/attendance/scan")
            .header("Authorization", bearer(user))
            .header("Content-Type", "application/json")
            .body(AxumBody::from(body.to_string()))
            .unwrap()
    }

    async fn record_count(state: &api::state::AppState, student_id: i64) -> u64 {
        RecordEntity::find()
            .filter(RecordCol::StudentId.eq(student_id))
            .count(state.db())
            .await
            .unwrap()
    }

    #[tokio::test]
    async fn precise_scan_inside_fence_is_verified() {
        let (app, state) = make_test_app_with_geofence(campus_geofence()).await;
        let ctx = setup(&state).await;

        let body = json!({
            "code": ctx.token.code,
            "latitude": INSIDE.0,
            "longitude": INSIDE.1,
            "accuracy": 12.4
        });
        let response = app.oneshot(scan(&ctx.student, body)).await.unwrap();
        assert_eq!(response.status(), StatusCode::CREATED);

        let json = body_json(response).await;
        assert_eq!(json["success"], true);
        assert_eq!(json["message"], "Attendance recorded");
        assert_eq!(json["data"]["location_status"], "verified");
        let status = json["data"]["status"].as_str().unwrap();
        assert!(status == "on_time" || status == "late", "unexpected status {status}");
        assert_eq!(json["data"]["record"]["status"], status);
        assert_eq!(json["data"]["record"]["accuracy"], 12);
        assert_eq!(json["data"]["record"]["scan_token_id"], ctx.token.id);
        assert_eq!(json["data"]["period"]["id"], ctx.period.id);

        let stored = RecordEntity::find()
            .filter(RecordCol::StudentId.eq(ctx.student.id))
            .one(state.db())
            .await
            .unwrap()
            .unwrap();
        assert_eq!(stored.latitude, Some(14_573_100));
        assert_eq!(stored.longitude, Some(121_132_300));
        assert_eq!(stored.date, state.clock().date_at(stored.scanned_at));
    }

    #[tokio::test]
    async fn scan_outside_fence_needs_review() {
        let (app, state) = make_test_app_with_geofence(campus_geofence()).await;
        let ctx = setup(&state).await;

        let body = json!({
            "code": ctx.token.code,
            "latitude": OUTSIDE.0,
            "longitude": OUTSIDE.1,
            "accuracy": 5
        });
        let response = app.oneshot(scan(&ctx.student, body)).await.unwrap();
        assert_eq!(response.status(), StatusCode::CREATED);

        let json = body_json(response).await;
        assert_eq!(json["data"]["status"], "pending_review");
        assert_eq!(json["data"]["location_status"], "pending_review");
    }

    #[tokio::test]
    async fn imprecise_or_missing_location_needs_review() {
        let (app, state) = make_test_app().await;
        let ctx = setup(&state).await;

        let body = json!({
            "code": ctx.token.code,
            "latitude": INSIDE.0,
            "longitude": INSIDE.1,
            "accuracy": 150
        });
        let response = app.oneshot(scan(&ctx.student, body)).await.unwrap();
        assert_eq!(response.status(), StatusCode::CREATED);
        let json = body_json(response).await;
        assert_eq!(json["data"]["status"], "pending_review");
        assert_eq!(json["data"]["record"]["latitude"], INSIDE.0);

        let (app, state) = make_test_app().await;
        let ctx = setup(&state).await;
        let response = app
            .oneshot(scan(&ctx.student, json!({ "qrCode": ctx.token.code })))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::CREATED);
        let json = body_json(response).await;
        assert_eq!(json["data"]["status"], "pending_review");
        assert_eq!(json["data"]["record"]["latitude"], Value::Null);
    }

    #[tokio::test]
    async fn second_scan_conflicts_and_returns_existing_record() {
        let (app, state) = make_test_app().await;
        let ctx = setup(&state).await;
        let body = json!({ "code": ctx.token.code });

        let response = app.clone().oneshot(scan(&ctx.student, body.clone())).await.unwrap();
        assert_eq!(response.status(), StatusCode::CREATED);
        let first_id = body_json(response).await["data"]["record"]["id"].clone();

        let response = app.oneshot(scan(&ctx.student, body)).await.unwrap();
        assert_eq!(response.status(), StatusCode::CONFLICT);
        let json = body_json(response).await;
        assert_eq!(json["success"], false);
        assert_eq!(json["message"], "Already scanned for this period today");
        assert_eq!(json["data"]["id"], first_id);

        assert_eq!(record_count(&state, ctx.student.id).await, 1);
    }

    #[tokio::test]
    async fn blank_unknown_and_expired_codes_are_rejected() {
        let (app, state) = make_test_app().await;
        let ctx = setup(&state).await;

        let response = app.clone().oneshot(scan(&ctx.student, json!({ "code": "" }))).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(body_json(response).await["message"], "QR code is required");

        let response = app.clone().oneshot(scan(&ctx.student, json!({}))).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let response = app
            .clone()
            .oneshot(scan(&ctx.student, json!({ "code": "feedfacefeedface" })))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert_eq!(body_json(response).await["message"], "Invalid QR code");

        let now = Utc::now();
        let expired = ScanToken::create(
            state.db(),
            ctx.period.id,
            state.clock().date_at(now),
            now - Duration::seconds(1),
            None,
        )
        .await
        .unwrap();
        let response = app
            .oneshot(scan(&ctx.student, json!({ "code": expired.code })))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let json = body_json(response).await;
        assert!(json["message"].as_str().unwrap().contains("expired"));

        assert_eq!(record_count(&state, ctx.student.id).await, 0);
    }

    #[tokio::test]
    async fn out_of_range_coordinates_are_rejected() {
        let (app, state) = make_test_app().await;
        let ctx = setup(&state).await;

        let body = json!({ "code": ctx.token.code, "latitude": 91.0, "longitude": 0.0, "accuracy": 5 });
        let response = app.oneshot(scan(&ctx.student, body)).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(record_count(&state, ctx.student.id).await, 0);
    }

    #[tokio::test]
    async fn staff_cannot_scan() {
        let (app, state) = make_test_app().await;
        let ctx = setup(&state).await;
        let teacher = seed_user(state.db(), "scan_staff", Role::Teacher).await;

        let response = app
            .oneshot(scan(&teacher, json!({ "code": ctx.token.code })))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::FORBIDDEN);

        let count = attendance_record::Entity::find().count(state.db()).await.unwrap();
        assert_eq!(count, 0);
    }
}
