
#[cfg(test)]
mod tests {
    use crate::test_helpers::make_app;
    use axum::{
        body::Body,
        http::{Request, StatusCode, header::CONTENT_TYPE},
        response::Response,
    };
    use db::{
        models::user::{Department, Model as UserModel, Role},
        test_utils::setup_test_db,
    };
    use sea_orm::DatabaseConnection;
    use serde_json::{Value, json};
    use serial_test::serial;
    use tower::ServiceExt;

    async fn get_json_body(response: Response) -> Value {
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&body).unwrap()
    }

    async fn login_as(db: &DatabaseConnection, username: &str, role: Role) -> (UserModel, String) {
        UserModel::create(db, username, "Password1", username, Department::Planning, role)
            .await
            .expect("Failed to create user");
        let user = UserModel::authenticate(db, username, "Password1")
            .await
            .expect("Failed to authenticate");
        let token = user.session_token.clone().unwrap();
        (user, token)
    }

    fn put_maintenance(token: &str, enabled: bool, message: &str) -> Request<Body> {
        let payload = json!({"enabled": enabled, "message": message});
        Request::builder()
            .method("PUT")
            .uri("/api/settings/maintenance")
            .header("Authorization", format!("Bearer {}", token))
            .header(CONTENT_TYPE, "application/json")
            .body(Body::from(serde_json::to_vec(&payload).unwrap()))
            .unwrap()
    }

    fn get_bare(uri: &str) -> Request<Body> {
        Request::builder()
            .method("GET")
            .uri(uri)
            .body(Body::empty())
            .unwrap()
    }

    fn get_with_token(uri: &str, token: &str) -> Request<Body> {
        Request::builder()
            .method("GET")
            .uri(uri)
            .header("Authorization", format!("Bearer {}", token))
            .body(Body::empty())
            .unwrap()
    }

    /// Test Case: Health Check Is Public
    #[tokio::test]
    #[serial]
    async fn test_health_check_is_public() {
        let db = setup_test_db().await;
        let app = make_app(db);

        let response = app.oneshot(get_bare("/api/health")).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let json = get_json_body(response).await;
        assert_eq!(json["message"], "Health check passed");
        assert_eq!(json["data"]["status"], "ok");
        assert_eq!(json["data"]["database"], "ok");
    }

    /// Test Case: Maintenance Mode Defaults to Off
    #[tokio::test]
    #[serial]
    async fn test_maintenance_defaults_to_off() {
        let db = setup_test_db().await;
        let app = make_app(db);

        let response = app.oneshot(get_bare("/api/settings/maintenance")).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let json = get_json_body(response).await;
        assert_eq!(json["message"], "Maintenance settings retrieved");
        assert_eq!(json["data"]["enabled"], false);
        assert_eq!(json["data"]["message"], "");
    }

    /// Test Case: Flipping the Flag Is Admin-Only
    #[tokio::test]
    #[serial]
    async fn test_updating_maintenance_is_admin_only() {
        let db = setup_test_db().await;
        let (_, committee_token) = login_as(&db, "committee1", Role::Committee).await;

        let app = make_app(db);
        let payload = json!({"enabled": true, "message": "Back soon"});
        let req = Request::builder()
            .method("PUT")
            .uri("/api/settings/maintenance")
            .header(CONTENT_TYPE, "application/json")
            .body(Body::from(serde_json::to_vec(&payload).unwrap()))
            .unwrap();
        let response = app.clone().oneshot(req).await.unwrap();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

        let response = app
            .oneshot(put_maintenance(&committee_token, true, "Back soon"))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::FORBIDDEN);
    }

    /// Test Case: Maintenance Mode Gates Everyone but Admins
    #[tokio::test]
    #[serial]
    async fn test_maintenance_gates_everyone_but_admins() {
        let db = setup_test_db().await;
        let (admin, admin_token) = login_as(&db, "admin1", Role::Admin).await;
        let (_, committee_token) = login_as(&db, "committee1", Role::Committee).await;

        let app = make_app(db);
        let json = get_json_body(
            app.clone()
                .oneshot(put_maintenance(&admin_token, true, "Back soon"))
                .await
                .unwrap(),
        )
        .await;
        assert_eq!(json["message"], "Maintenance settings updated");
        assert_eq!(json["data"]["enabled"], true);

        // Non-admin sessions and anonymous callers get the maintenance answer.
        let response = app
            .clone()
            .oneshot(get_with_token("/api/attendance/records", &committee_token))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
        let json = get_json_body(response).await;
        assert_eq!(json["success"], false);
        assert_eq!(json["message"], "Back soon");

        let response = app.clone().oneshot(get_bare("/api/teams")).await.unwrap();
        assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);

        // The exempt surface stays reachable.
        let payload = json!({"username": "committee1", "password": "Password1"});
        let req = Request::builder()
            .method("POST")
            .uri("/api/auth/login")
            .header(CONTENT_TYPE, "application/json")
            .body(Body::from(serde_json::to_vec(&payload).unwrap()))
            .unwrap();
        let response = app.clone().oneshot(req).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let committee_token = get_json_body(response).await["data"]["token"]
            .as_str()
            .unwrap()
            .to_string();

        let response = app
            .clone()
            .oneshot(get_bare(&format!(
                "/api/auth/session?user_id={}&token={}",
                admin.id, admin_token
            )))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let response = app
            .clone()
            .oneshot(get_bare("/api/settings/maintenance"))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let json = get_json_body(response).await;
        assert_eq!(json["data"]["enabled"], true);
        assert_eq!(json["data"]["message"], "Back soon");

        let response = app.clone().oneshot(get_bare("/api/health")).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        // Admins keep working.
        let response = app
            .clone()
            .oneshot(get_with_token("/api/attendance/records", &admin_token))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        // Lifting the flag restores normal service.
        let response = app
            .clone()
            .oneshot(put_maintenance(&admin_token, false, ""))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let response = app
            .oneshot(get_with_token("/api/attendance/records", &committee_token))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    /// Test Case: An Empty Message Falls Back to the Stock One
    #[tokio::test]
    #[serial]
    async fn test_empty_message_falls_back_to_the_stock_one() {
        let db = setup_test_db().await;
        let (_, admin_token) = login_as(&db, "admin1", Role::Admin).await;
        let (_, committee_token) = login_as(&db, "committee1", Role::Committee).await;

        let app = make_app(db);
        let response = app
            .clone()
            .oneshot(put_maintenance(&admin_token, true, ""))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let response = app
            .oneshot(get_with_token("/api/attendance/records", &committee_token))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
        let json = get_json_body(response).await;
        assert_eq!(json["message"], "The system is under maintenance");
    }
}
