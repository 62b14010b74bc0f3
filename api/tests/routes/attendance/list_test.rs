#[cfg(test)]
mod tests {
    use crate::helpers::{bearer, body_json, make_test_app, seed_period, seed_user};
    use axum::{
        body::Body as AxumBody,
        http::{Request, StatusCode},
    };
    use chrono::{Duration, NaiveDate, Utc};
    use db::models::attendance_record::{
        AttendanceStatus, LocationStatus, Model as AttendanceRecord, NewAttendanceRecord,
    };
    use db::models::user::{Model as UserModel, Role};
    use tower::ServiceExt;

    fn list(user: &UserModel, query: &str) -> Request<AxumBody> {
        Request::builder()
            .method("GET")
            .uri(format!("/api/attendance{query}"))
            .header("Authorization", bearer(user))
            .body(AxumBody::empty())
            .unwrap()
    }

    async fn record(
        state: &api::state::AppState,
        student: &UserModel,
        period_id: i64,
        date: NaiveDate,
        status: AttendanceStatus,
        minutes_ago: i64,
    ) -> AttendanceRecord {
        AttendanceRecord::try_create(
            state.db(),
            NewAttendanceRecord {
                student_id: student.id,
                period_id,
                scan_token_id: None,
                date,
                scanned_at: Utc::now() - Duration::minutes(minutes_ago),
                status,
                latitude: None,
                longitude: None,
                accuracy: None,
                location_status: status.implied_location_status(),
            },
        )
        .await
        .unwrap()
    }

    #[tokio::test]
    async fn teacher_lists_and_filters_records() {
        let (app, state) = make_test_app().await;
        let teacher = seed_user(state.db(), "list_teacher", Role::Teacher).await;
        let ana = seed_user(state.db(), "ana", Role::Student).await;
        let ben = seed_user(state.db(), "ben", Role::Student).await;
        let first = seed_period(state.db(), None, "07:00", "08:00", 15).await;
        let second = seed_period(state.db(), None, "08:00", "09:00", 15).await;
        let monday = NaiveDate::from_ymd_opt(2025, 10, 6).unwrap();
        let tuesday = NaiveDate::from_ymd_opt(2025, 10, 7).unwrap();

        record(&state, &ana, first.id, monday, AttendanceStatus::OnTime, 30).await;
        let pending = record(&state, &ben, first.id, monday, AttendanceStatus::PendingReview, 20).await;
        record(&state, &ana, second.id, tuesday, AttendanceStatus::Late, 10).await;

        let response = app.clone().oneshot(list(&teacher, "")).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let json = body_json(response).await;
        assert_eq!(json["data"]["count"], 3);
        assert_eq!(json["data"]["records"][0]["status"], "late");
        assert_eq!(json["data"]["records"][0]["student"]["username"], "ana");

        let query = format!("?date=2025-10-06&periodId={}&status=pending_review", first.id);
        let response = app.clone().oneshot(list(&teacher, &query)).await.unwrap();
        let json = body_json(response).await;
        assert_eq!(json["data"]["count"], 1);
        assert_eq!(json["data"]["records"][0]["id"], pending.id);
        assert_eq!(json["data"]["records"][0]["location_status"], "pending_review");

        let response = app.oneshot(list(&teacher, "?status=present")).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn student_cannot_list() {
        let (app, state) = make_test_app().await;
        let student = seed_user(state.db(), "list_student", Role::Student).await;

        let response = app.oneshot(list(&student, "")).await.unwrap();
        assert_eq!(response.status(), StatusCode::FORBIDDEN);
    }
}
