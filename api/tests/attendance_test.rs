
#[cfg(test)]
mod tests {
    use crate::test_helpers::make_app;
    use axum::{
        body::Body,
        http::{
            Request, StatusCode,
            header::{CONTENT_DISPOSITION, CONTENT_TYPE},
        },
        response::Response,
    };
    use base64::{Engine as _, engine::general_purpose::STANDARD};
    use chrono::NaiveDate;
    use db::{
        models::committee_member::Model as MemberModel,
        models::user::{Department, Model as UserModel, Role},
        test_utils::setup_test_db,
    };
    use sea_orm::DatabaseConnection;
    use serde_json::{Value, json};
    use serial_test::serial;
    use tower::ServiceExt;

    const PHOTO_BYTES: &[u8] = b"fake-jpeg-bytes";

    async fn get_json_body(response: Response) -> Value {
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&body).unwrap()
    }

    async fn login_as(db: &DatabaseConnection, username: &str, role: Role) -> String {
        UserModel::create(db, username, "Password1", username, Department::Planning, role)
            .await
            .expect("Failed to create user");
        UserModel::authenticate(db, username, "Password1")
            .await
            .expect("Failed to authenticate")
            .session_token
            .clone()
            .unwrap()
    }

    fn mark_request(token: &str, payload: &Value) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri("/api/attendance/records")
            .header("Authorization", format!("Bearer {}", token))
            .header(CONTENT_TYPE, "application/json")
            .body(Body::from(serde_json::to_vec(payload).unwrap()))
            .unwrap()
    }

    fn photo_payload(member_id: i64, date: &str) -> Value {
        json!({
            "committee_member_id": member_id,
            "date": date,
            "status": "attend",
            "photo_data": format!("data:image/jpeg;base64,{}", STANDARD.encode(PHOTO_BYTES)),
            "latitude": -25.7479,
            "longitude": 28.2293,
            "accuracy": 12.5,
            "address": "Pretoria Showgrounds, Hall B"
        })
    }

    fn photo_dir(storage: &tempfile::TempDir, date: &str) -> std::path::PathBuf {
        storage
            .path()
            .canonicalize()
            .unwrap()
            .join("attendance")
            .join(date)
    }

    /// Test Case: Marking With a Photo Stores It and Serves It Back
    #[tokio::test]
    #[serial]
    async fn test_mark_with_photo_stores_and_serves_it() {
        let _storage = util::test_helpers::setup_test_storage_root();
        let db = setup_test_db().await;
        let token = login_as(&db, "desk1", Role::Committee).await;
        let member = MemberModel::create(&db, "Sipho Ndlovu", Department::Publicity)
            .await
            .unwrap();

        let app = make_app(db.clone());
        let payload = photo_payload(member.id, "2026-03-02");
        let response = app.clone().oneshot(mark_request(&token, &payload)).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let json = get_json_body(response).await;
        assert_eq!(json["message"], "Attendance recorded");
        assert_eq!(json["data"]["status"], "attend");
        assert!(json["data"]["check_in_time"].is_string());
        assert_eq!(json["data"]["address"], "Pretoria Showgrounds, Hall B");

        let photo_url = json["data"]["photo_url"].as_str().unwrap().to_string();
        assert!(photo_url.starts_with("/api/attendance/photos/"));

        let req = Request::builder()
            .method("GET")
            .uri(&photo_url)
            .header("Authorization", format!("Bearer {}", token))
            .body(Body::empty())
            .unwrap();
        let response = app.oneshot(req).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            response.headers().get(CONTENT_TYPE).unwrap(),
            "image/jpeg"
        );
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        assert_eq!(&body[..], PHOTO_BYTES);
    }

    /// Test Case: Re-Marking Replaces the First Mark Wholesale
    #[tokio::test]
    #[serial]
    async fn test_remarking_replaces_the_first_mark() {
        let _storage = util::test_helpers::setup_test_storage_root();
        let db = setup_test_db().await;
        let token = login_as(&db, "desk1", Role::Committee).await;
        let member = MemberModel::create(&db, "Sipho Ndlovu", Department::Publicity)
            .await
            .unwrap();

        let app = make_app(db.clone());
        let date = "2026-03-02";
        let payload = photo_payload(member.id, date);
        let response = app.clone().oneshot(mark_request(&token, &payload)).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let payload = json!({
            "committee_member_id": member.id,
            "date": date,
            "status": "absent"
        });
        let response = app.clone().oneshot(mark_request(&token, &payload)).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let req = Request::builder()
            .method("GET")
            .uri(format!("/api/attendance/records?date={}", date))
            .header("Authorization", format!("Bearer {}", token))
            .body(Body::empty())
            .unwrap();
        let json = get_json_body(app.oneshot(req).await.unwrap()).await;
        let entries = json["data"]["entries"].as_array().unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0]["record"]["status"], "absent");
        assert!(entries[0]["record"]["check_in_time"].is_null());
        assert!(entries[0]["record"]["photo_url"].is_null());

        // The photo from the first mark no longer exists on disk.
        let files: Vec<_> = std::fs::read_dir(photo_dir(&_storage, date))
            .unwrap()
            .collect();
        assert_eq!(files.len(), 0);
    }

    /// Test Case: A Replaced Photo Is Removed From Disk
    #[tokio::test]
    #[serial]
    async fn test_replaced_photo_is_removed_from_disk() {
        let _storage = util::test_helpers::setup_test_storage_root();
        let db = setup_test_db().await;
        let token = login_as(&db, "desk1", Role::Committee).await;
        let member = MemberModel::create(&db, "Sipho Ndlovu", Department::Publicity)
            .await
            .unwrap();

        let app = make_app(db.clone());
        let date = "2026-03-02";
        for _ in 0..2 {
            let payload = photo_payload(member.id, date);
            let response = app.clone().oneshot(mark_request(&token, &payload)).await.unwrap();
            assert_eq!(response.status(), StatusCode::OK);
        }

        let files: Vec<_> = std::fs::read_dir(photo_dir(&_storage, date))
            .unwrap()
            .collect();
        assert_eq!(files.len(), 1);
    }

    /// Test Case: Roster Join and Daily Stats Count Unmarked Members as Absent
    #[tokio::test]
    #[serial]
    async fn test_roster_and_stats() {
        let db = setup_test_db().await;
        let token = login_as(&db, "desk1", Role::Committee).await;
        let date: NaiveDate = "2026-03-02".parse().unwrap();

        let mut member_ids = Vec::new();
        for name in ["Anele Khumalo", "Lerato Mokoena", "Sipho Ndlovu"] {
            let member = MemberModel::create(&db, name, Department::Planning)
                .await
                .unwrap();
            member_ids.push(member.id);
        }

        let app = make_app(db.clone());
        for member_id in &member_ids[..2] {
            let payload = json!({
                "committee_member_id": member_id,
                "date": date,
                "status": "attend"
            });
            let response = app.clone().oneshot(mark_request(&token, &payload)).await.unwrap();
            assert_eq!(response.status(), StatusCode::OK);
        }

        let req = Request::builder()
            .method("GET")
            .uri(format!("/api/attendance/records?date={}", date))
            .header("Authorization", format!("Bearer {}", token))
            .body(Body::empty())
            .unwrap();
        let json = get_json_body(app.clone().oneshot(req).await.unwrap()).await;
        assert_eq!(json["message"], "Attendance records retrieved");
        let entries = json["data"]["entries"].as_array().unwrap();
        assert_eq!(entries.len(), 3);
        let unmarked: Vec<_> = entries
            .iter()
            .filter(|e| e["record"].is_null())
            .collect();
        assert_eq!(unmarked.len(), 1);
        assert_eq!(unmarked[0]["member"]["name"], "Sipho Ndlovu");

        let req = Request::builder()
            .method("GET")
            .uri(format!("/api/attendance/stats?date={}", date))
            .header("Authorization", format!("Bearer {}", token))
            .body(Body::empty())
            .unwrap();
        let json = get_json_body(app.oneshot(req).await.unwrap()).await;
        assert_eq!(json["message"], "Attendance stats retrieved");
        assert_eq!(json["data"]["total"], 3);
        assert_eq!(json["data"]["attend"], 2);
        assert_eq!(json["data"]["absent"], 1);
        assert_eq!(json["data"]["rate"], 67);
    }

    /// Test Case: Bad Marks Are Rejected
    #[tokio::test]
    #[serial]
    async fn test_bad_marks_are_rejected() {
        let _storage = util::test_helpers::setup_test_storage_root();
        let db = setup_test_db().await;
        let token = login_as(&db, "desk1", Role::Committee).await;
        let member = MemberModel::create(&db, "Sipho Ndlovu", Department::Publicity)
            .await
            .unwrap();

        let app = make_app(db.clone());
        let payload = json!({
            "committee_member_id": 9999,
            "date": "2026-03-02",
            "status": "attend"
        });
        let response = app.clone().oneshot(mark_request(&token, &payload)).await.unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        let json = get_json_body(response).await;
        assert_eq!(json["message"], "Committee member not found");

        let payload = json!({
            "committee_member_id": member.id,
            "date": "2026-03-02",
            "status": "attend",
            "photo_data": "not-base64!!!"
        });
        let response = app.oneshot(mark_request(&token, &payload)).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    /// Test Case: CSV Export Quotes Names and Labels Unmarked Members
    #[tokio::test]
    #[serial]
    async fn test_csv_export() {
        let db = setup_test_db().await;
        let token = login_as(&db, "desk1", Role::Committee).await;
        let date = "2026-03-02";

        let marked = MemberModel::create(&db, "Mokoena, Lerato", Department::Planning)
            .await
            .unwrap();
        MemberModel::create(&db, "Jan Smit", Department::Protocol)
            .await
            .unwrap();

        let app = make_app(db.clone());
        let payload = json!({
            "committee_member_id": marked.id,
            "date": date,
            "status": "attend"
        });
        let response = app.clone().oneshot(mark_request(&token, &payload)).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let req = Request::builder()
            .method("GET")
            .uri(format!("/api/attendance/export?date={}", date))
            .header("Authorization", format!("Bearer {}", token))
            .body(Body::empty())
            .unwrap();
        let response = app.oneshot(req).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            response.headers().get(CONTENT_TYPE).unwrap(),
            "text/csv; charset=utf-8"
        );
        let disposition = response
            .headers()
            .get(CONTENT_DISPOSITION)
            .unwrap()
            .to_str()
            .unwrap();
        assert!(disposition.contains(&format!("attendance_{}.csv", date)));

        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let csv = String::from_utf8(body.to_vec()).unwrap();
        let mut lines = csv.lines();
        assert_eq!(
            lines.next().unwrap(),
            "member_id,name,department,date,status,check_in_time,address"
        );
        assert!(csv.contains("\"Mokoena, Lerato\""));
        assert!(csv.contains("unmarked"));
        assert_eq!(csv.lines().count(), 3);
    }

    /// Test Case: Photo Paths Cannot Walk Out of the Storage Root
    #[tokio::test]
    #[serial]
    async fn test_photo_path_traversal_is_rejected() {
        let _storage = util::test_helpers::setup_test_storage_root();
        let db = setup_test_db().await;
        let token = login_as(&db, "desk1", Role::Committee).await;

        let app = make_app(db);
        let req = Request::builder()
            .method("GET")
            .uri("/api/attendance/photos/../../secrets.txt")
            .header("Authorization", format!("Bearer {}", token))
            .body(Body::empty())
            .unwrap();
        let response = app.oneshot(req).await.unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }
}
