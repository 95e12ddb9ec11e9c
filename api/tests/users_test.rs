
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

    /// Test Case: User Management Is Admin-Only
    #[tokio::test]
    #[serial]
    async fn test_user_management_requires_admin() {
        let db = setup_test_db().await;
        let (_, committee_token) = login_as(&db, "committee1", Role::Committee).await;

        let app = make_app(db.clone());
        let bare = Request::builder()
            .method("GET")
            .uri("/api/users")
            .body(Body::empty())
            .unwrap();
        let response = app.clone().oneshot(bare).await.unwrap();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

        let req = Request::builder()
            .method("GET")
            .uri("/api/users")
            .header("Authorization", format!("Bearer {}", committee_token))
            .body(Body::empty())
            .unwrap();
        let response = app.oneshot(req).await.unwrap();
        assert_eq!(response.status(), StatusCode::FORBIDDEN);

        let json = get_json_body(response).await;
        assert_eq!(json["success"], false);
        assert_eq!(json["message"], "Admin access required");
    }

    /// Test Case: Create a User, Then Reject the Duplicate Username
    #[tokio::test]
    #[serial]
    async fn test_create_user_and_duplicate_conflict() {
        let db = setup_test_db().await;
        let (_, admin_token) = login_as(&db, "admin1", Role::Admin).await;

        let app = make_app(db.clone());
        let payload = json!({
            "username": "nomsa",
            "password": "Password1",
            "display_name": "Nomsa Dlamini",
            "department": "protocol",
            "role": "chairperson"
        });
        let req = Request::builder()
            .method("POST")
            .uri("/api/users")
            .header("Authorization", format!("Bearer {}", admin_token))
            .header(CONTENT_TYPE, "application/json")
            .body(Body::from(serde_json::to_vec(&payload).unwrap()))
            .unwrap();
        let response = app.clone().oneshot(req).await.unwrap();
        assert_eq!(response.status(), StatusCode::CREATED);

        let json = get_json_body(response).await;
        assert_eq!(json["message"], "User created successfully");
        assert_eq!(json["data"]["username"], "nomsa");
        assert_eq!(json["data"]["department"], "protocol");
        assert_eq!(json["data"]["role"], "chairperson");
        assert_eq!(json["data"]["active"], true);

        let req = Request::builder()
            .method("POST")
            .uri("/api/users")
            .header("Authorization", format!("Bearer {}", admin_token))
            .header(CONTENT_TYPE, "application/json")
            .body(Body::from(serde_json::to_vec(&payload).unwrap()))
            .unwrap();
        let response = app.oneshot(req).await.unwrap();
        assert_eq!(response.status(), StatusCode::CONFLICT);

        let json = get_json_body(response).await;
        assert_eq!(json["message"], "Username 'nomsa' is already taken");
    }

    /// Test Case: Weak Passwords Are Rejected on Create
    #[tokio::test]
    #[serial]
    async fn test_create_user_enforces_the_password_policy() {
        let db = setup_test_db().await;
        let (_, admin_token) = login_as(&db, "admin1", Role::Admin).await;

        let app = make_app(db.clone());
        let payload = json!({
            "username": "weakling",
            "password": "nodigitsorupper",
            "display_name": "Weak Password",
            "department": "planning",
            "role": "committee"
        });
        let req = Request::builder()
            .method("POST")
            .uri("/api/users")
            .header("Authorization", format!("Bearer {}", admin_token))
            .header(CONTENT_TYPE, "application/json")
            .body(Body::from(serde_json::to_vec(&payload).unwrap()))
            .unwrap();
        let response = app.oneshot(req).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    /// Test Case: List Filtering, Sorting, and Pagination
    #[tokio::test]
    #[serial]
    async fn test_list_users_filters_and_pages() {
        let db = setup_test_db().await;
        let (_, admin_token) = login_as(&db, "admin1", Role::Admin).await;

        for (username, display, department, role) in [
            ("nomsa", "Nomsa Dlamini", Department::Protocol, Role::Chairperson),
            ("pieter", "Pieter Botha", Department::Registration, Role::Protocol),
            ("lerato", "Lerato Mokoena", Department::Protocol, Role::Committee),
        ] {
            UserModel::create(&db, username, "Password1", display, department, role)
                .await
                .unwrap();
        }

        let app = make_app(db.clone());
        let list = |uri: String, token: String| {
            let app = app.clone();
            async move {
                let req = Request::builder()
                    .method("GET")
                    .uri(uri)
                    .header("Authorization", format!("Bearer {}", token))
                    .body(Body::empty())
                    .unwrap();
                let response = app.oneshot(req).await.unwrap();
                assert_eq!(response.status(), StatusCode::OK);
                get_json_body(response).await
            }
        };

        let all = list("/api/users".into(), admin_token.clone()).await;
        assert_eq!(all["data"]["total"], 4);

        let protocol = list(
            "/api/users?department=protocol".into(),
            admin_token.clone(),
        )
        .await;
        assert_eq!(protocol["data"]["total"], 2);

        let by_name = list("/api/users?query=dlamini".into(), admin_token.clone()).await;
        assert_eq!(by_name["data"]["total"], 1);
        assert_eq!(by_name["data"]["users"][0]["username"], "nomsa");

        let chairs = list("/api/users?role=chairperson".into(), admin_token.clone()).await;
        assert_eq!(chairs["data"]["total"], 1);

        let sorted = list("/api/users?sort=-username".into(), admin_token.clone()).await;
        assert_eq!(sorted["data"]["users"][0]["username"], "pieter");

        let paged = list("/api/users?per_page=3&page=2".into(), admin_token.clone()).await;
        assert_eq!(paged["data"]["total"], 4);
        assert_eq!(paged["data"]["users"].as_array().unwrap().len(), 1);
        assert_eq!(paged["data"]["page"], 2);

        // The page size is capped.
        let req = Request::builder()
            .method("GET")
            .uri("/api/users?per_page=101")
            .header("Authorization", format!("Bearer {}", admin_token))
            .body(Body::empty())
            .unwrap();
        let response = app.clone().oneshot(req).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    /// Test Case: Deactivating a User Ends Their Session Immediately
    #[tokio::test]
    #[serial]
    async fn test_deactivating_a_user_ends_their_session() {
        let db = setup_test_db().await;
        let (_, admin_token) = login_as(&db, "admin1", Role::Admin).await;
        let (target, target_token) = login_as(&db, "nomsa", Role::Committee).await;

        let app = make_app(db.clone());
        let payload = json!({"active": false});
        let req = Request::builder()
            .method("PUT")
            .uri(format!("/api/users/{}", target.id))
            .header("Authorization", format!("Bearer {}", admin_token))
            .header(CONTENT_TYPE, "application/json")
            .body(Body::from(serde_json::to_vec(&payload).unwrap()))
            .unwrap();
        let response = app.clone().oneshot(req).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let json = get_json_body(response).await;
        assert_eq!(json["message"], "User updated successfully");
        assert_eq!(json["data"]["active"], false);

        let uri = format!(
            "/api/auth/session?user_id={}&token={}",
            target.id, target_token
        );
        let poll = Request::builder()
            .method("GET")
            .uri(uri)
            .body(Body::empty())
            .unwrap();
        let json = get_json_body(app.oneshot(poll).await.unwrap()).await;
        assert_eq!(json["data"]["valid"], false);
    }

    /// Test Case: Admins Cannot Delete Themselves, Can Delete Others
    #[tokio::test]
    #[serial]
    async fn test_delete_rules() {
        let db = setup_test_db().await;
        let (admin, admin_token) = login_as(&db, "admin1", Role::Admin).await;
        let (target, _) = login_as(&db, "nomsa", Role::Committee).await;

        let app = make_app(db.clone());
        let req = Request::builder()
            .method("DELETE")
            .uri(format!("/api/users/{}", admin.id))
            .header("Authorization", format!("Bearer {}", admin_token))
            .body(Body::empty())
            .unwrap();
        let response = app.clone().oneshot(req).await.unwrap();
        assert_eq!(response.status(), StatusCode::FORBIDDEN);

        let json = get_json_body(response).await;
        assert_eq!(json["message"], "You cannot delete your own account");

        let req = Request::builder()
            .method("DELETE")
            .uri(format!("/api/users/{}", target.id))
            .header("Authorization", format!("Bearer {}", admin_token))
            .body(Body::empty())
            .unwrap();
        let response = app.clone().oneshot(req).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let req = Request::builder()
            .method("GET")
            .uri(format!("/api/users/{}", target.id))
            .header("Authorization", format!("Bearer {}", admin_token))
            .body(Body::empty())
            .unwrap();
        let response = app.oneshot(req).await.unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }
}
