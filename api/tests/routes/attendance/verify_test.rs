#[cfg(test)]
mod tests {
    use crate::helpers::{bearer, body_json, make_test_app, seed_period, seed_user};
    use axum::{
        body::Body as AxumBody,
        http::{Request, StatusCode},
    };
    use chrono::Utc;
    use db::models::attendance_record::{
        AttendanceStatus, LocationStatus, Model as AttendanceRecord, NewAttendanceRecord,
    };
    use db::models::user::{Model as UserModel, Role};
    use serde_json::{Value, json};
    use tower::ServiceExt;

    fn verify(user: &UserModel, body: Value) -> Request<AxumBody> {
        Request::builder()
            .method("PATCH")
            .uri("/api/attendance/verify")
            .header("Authorization", bearer(user))
            .header("Content-Type", "application/json")
            .body(AxumBody::from(body.to_string()))
            .unwrap()
    }

    async fn pending_record(state: &api::state::AppState, student: &UserModel) -> AttendanceRecord {
        let period = seed_period(state.db(), None, "07:00", "08:00", 15).await;
        let now = Utc::now();
        AttendanceRecord::try_create(
            state.db(),
            NewAttendanceRecord {
                student_id: student.id,
                period_id: period.id,
                scan_token_id: None,
                date: now.date_naive(),
                scanned_at: now,
                status: AttendanceStatus::PendingReview,
                latitude: Some(14_580_000),
                longitude: Some(121_140_000),
                accuracy: Some(8),
                location_status: LocationStatus::PendingReview,
            },
        )
        .await
        .unwrap()
    }

    #[tokio::test]
    async fn teacher_resolves_pending_record() {
        let (app, state) = make_test_app().await;
        let teacher = seed_user(state.db(), "verify_teacher", Role::Teacher).await;
        let student = seed_user(state.db(), "verify_student", Role::Student).await;
        let record = pending_record(&state, &student).await;

        let response = app
            .clone()
            .oneshot(verify(&teacher, json!({ "attendanceId": record.id, "status": "late" })))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let json = body_json(response).await;
        assert_eq!(json["data"]["status"], "late");
        assert_eq!(json["data"]["location_status"], "verified");

        // Review can move a record back to pending.
        let response = app
            .oneshot(verify(&teacher, json!({ "record_id": record.id, "status": "pending_review" })))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let stored = AttendanceRecord::find_by_id(state.db(), record.id).await.unwrap().unwrap();
        assert_eq!(stored.status, AttendanceStatus::PendingReview);
        assert_eq!(stored.location_status, Some(LocationStatus::PendingReview));
    }

    #[tokio::test]
    async fn missing_fields_and_bad_status_are_rejected() {
        let (app, state) = make_test_app().await;
        let teacher = seed_user(state.db(), "verify_bad_teacher", Role::Secretary).await;
        let student = seed_user(state.db(), "verify_bad_student", Role::Student).await;
        let record = pending_record(&state, &student).await;

        let response = app
            .clone()
            .oneshot(verify(&teacher, json!({ "status": "late" })))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(body_json(response).await["message"], "Record ID and status are required");

        let response = app
            .clone()
            .oneshot(verify(&teacher, json!({ "record_id": record.id, "status": "present" })))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(body_json(response).await["message"], "Invalid status");

        let response = app
            .oneshot(verify(&teacher, json!({ "record_id": 9999, "status": "absent" })))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn student_cannot_review() {
        let (app, state) = make_test_app().await;
        let student = seed_user(state.db(), "verify_self_student", Role::Student).await;
        let record = pending_record(&state, &student).await;

        let response = app
            .oneshot(verify(&student, json!({ "record_id": record.id, "status": "on_time" })))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::FORBIDDEN);

        let stored = AttendanceRecord::find_by_id(state.db(), record.id).await.unwrap().unwrap();
        assert_eq!(stored.status, AttendanceStatus::PendingReview);
    }
}
