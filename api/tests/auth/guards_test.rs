#[cfg(test)]
mod tests {
    use crate::helpers::{bearer, body_json, make_test_app, seed_user};
    use api::auth::{Claims, generate_jwt};
    use axum::{
        body::Body as AxumBody,
        http::{Request, StatusCode},
    };
    use chrono::{DateTime, Duration, Utc};
    use db::models::user::Role;
    use jsonwebtoken::{EncodingKey, Header, encode};
    use serial_test::serial;
    use tower::ServiceExt;
    use util::config::AppConfig;

    fn get(uri: &str, auth: Option<&str>) -> Request<AxumBody> {
        let mut builder = Request::builder().method("GET").uri(uri);
        if let Some(auth) = auth {
            builder = builder.header("Authorization", auth);
        }
        builder.body(AxumBody::empty()).unwrap()
    }

    #[tokio::test]
    async fn missing_token_is_unauthorized() {
        let (app, _state) = make_test_app().await;

        let response = app.oneshot(get("/api/periods", None)).await.unwrap();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

        let json = body_json(response).await;
        assert_eq!(json["success"], false);
        assert_eq!(json["message"], "Authentication required");
    }

    #[tokio::test]
    async fn garbage_token_is_unauthorized() {
        let (app, _state) = make_test_app().await;

        let response = app
            .oneshot(get("/api/periods", Some("Bearer not.a.jwt")))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn expired_token_is_unauthorized() {
        let (app, state) = make_test_app().await;
        let teacher = seed_user(state.db(), "expired_teacher", Role::Teacher).await;

        let claims = Claims {
            sub: teacher.id,
            role: teacher.role,
            exp: (Utc::now() - Duration::hours(2)).timestamp() as usize,
        };
        let secret = AppConfig::global().jwt_secret.clone();
        let token = encode(&Header::default(), &claims, &EncodingKey::from_secret(secret.as_bytes())).unwrap();

        let response = app
            .oneshot(get("/api/periods", Some(&format!("Bearer {token}"))))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn token_signed_with_other_secret_is_unauthorized() {
        let (app, state) = make_test_app().await;
        let teacher = seed_user(state.db(), "forged_teacher", Role::SuperAdmin).await;

        let claims = Claims {
            sub: teacher.id,
            role: Role::SuperAdmin,
            exp: (Utc::now() + Duration::hours(1)).timestamp() as usize,
        };
        let token = encode(&Header::default(), &claims, &EncodingKey::from_secret(b"someone-else")).unwrap();

        let response = app
            .oneshot(get("/api/periods", Some(&format!("Bearer {token}"))))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn student_cannot_issue_qr_codes() {
        let (app, state) = make_test_app().await;
        let student = seed_user(state.db(), "guard_student", Role::Student).await;

        let response = app
            .oneshot(get("/api/qr/abc", Some(&bearer(&student))))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::FORBIDDEN);

        let json = body_json(response).await;
        assert_eq!(json["success"], false);
        assert_eq!(json["message"], "Not allowed to issue QR codes");
    }

    #[tokio::test]
    #[serial]
    async fn token_lifetime_follows_config() {
        AppConfig::set_jwt_duration_minutes(5u64);
        let (_, expiry) = generate_jwt(1, Role::Teacher).unwrap();
        AppConfig::reset();

        let expiry: DateTime<Utc> = expiry.parse().unwrap();
        let ttl = expiry - Utc::now();
        assert!(ttl > Duration::minutes(4) && ttl <= Duration::minutes(5));
    }
}
