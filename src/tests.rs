#[cfg(test)]
mod integration_tests {
    use crate::auth::verify_password;
    use crate::error::AppError;
    use crate::router::create_router;
    use crate::schemas::HealthResponse;
    use crate::test_utils::test_utils::{
        create_user, csrf_token, location, login, maybe_session_header, seed_fixtures,
        session_header, setup_empty_app_state, setup_test_app, setup_test_app_with, test_server,
        Fixtures, TEST_PASSWORD, TEST_USER,
    };
    use axum::http::{header, StatusCode};
    use axum::routing::get;
    use axum::Router;
    use chrono::Utc;
    use model::entities::{asset, location as place, user};
    use sea_orm::{
        ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait,
        QueryFilter, Set,
    };

    async fn insert_asset(
        db: &DatabaseConnection,
        owner_id: i32,
        fixtures: &Fixtures,
        comments: &str,
    ) -> asset::Model {
        asset::ActiveModel {
            inventory_id: Set(fixtures.inventory.id),
            location: Set(fixtures.location.id),
            managed_by: Set(owner_id),
            assigned_to: Set(Some(owner_id)),
            assigned_at: Set(Utc::now().naive_utc()),
            certified_by: Set(Some(owner_id)),
            comments: Set(Some(comments.to_string())),
            ..Default::default()
        }
        .insert(db)
        .await
        .expect("Failed to create asset")
    }

    async fn asset_count(db: &DatabaseConnection) -> u64 {
        asset::Entity::find().count(db).await.unwrap()
    }

    async fn user_count(db: &DatabaseConnection) -> u64 {
        user::Entity::find().count(db).await.unwrap()
    }

    #[tokio::test]
    async fn test_health_check() {
        let (server, _, _) = setup_test_app().await;

        let response = server.get("/health").await;

        response.assert_status(StatusCode::OK);
        let body: HealthResponse = response.json();
        assert_eq!(body.status, "healthy");
        assert_eq!(body.database, "connected");
    }

    #[tokio::test]
    async fn test_anonymous_requests_get_no_session() {
        let (server, _, _) = setup_test_app().await;

        for path in ["/health", "/", "/nothinghere"] {
            let response = server.get(path).await;
            assert!(
                maybe_session_header(&response).is_none(),
                "{path} started a session"
            );
        }
    }

    #[tokio::test]
    async fn test_homepage_view() {
        let (server, _, _) = setup_test_app().await;

        let response = server.get("/").await;

        response.assert_status(StatusCode::OK);
        assert!(response.text().contains("Asset Tracker"));
    }

    #[tokio::test]
    async fn test_login_view() {
        let (server, _, _) = setup_test_app().await;

        let response = server.get("/auth/login").await;

        response.assert_status(StatusCode::OK);
        assert!(response.text().contains("Login to your account"));
        assert!(response.text().contains(r#"name="csrf_token""#));
    }

    #[tokio::test]
    async fn test_logout_view_requires_login() {
        let (server, _, _) = setup_test_app().await;

        let response = server.get("/auth/logout").await;

        response.assert_status(StatusCode::SEE_OTHER);
        assert_eq!(location(&response), "/auth/login?next=%2Fauth%2Flogout");
    }

    #[tokio::test]
    async fn test_dashboard_view_requires_login() {
        let (server, _, _) = setup_test_app().await;

        let response = server.get("/dashboard").await;

        response.assert_status(StatusCode::SEE_OTHER);
        assert_eq!(location(&response), "/auth/login?next=%2Fdashboard");
    }

    #[tokio::test]
    async fn test_assets_view_requires_login() {
        let (server, _, _) = setup_test_app().await;

        let response = server.get("/assets/assets").await;

        response.assert_status(StatusCode::SEE_OTHER);
        assert_eq!(location(&response), "/auth/login?next=%2Fassets%2Fassets");
        assert!(!response.text().contains("<table>"));
    }

    #[tokio::test]
    async fn test_guard_preserves_query_string() {
        let (server, _, _) = setup_test_app().await;

        let response = server.get("/assets/assets/edit/1?from=list").await;

        response.assert_status(StatusCode::SEE_OTHER);
        assert_eq!(
            location(&response),
            "/auth/login?next=%2Fassets%2Fassets%2Fedit%2F1%3Ffrom%3Dlist"
        );
    }

    #[tokio::test]
    async fn test_guard_flashes_login_message() {
        let (server, _, _) = setup_test_app().await;

        let redirected = server.get("/assets/assets/add").await;
        redirected.assert_status(StatusCode::SEE_OTHER);
        let cookie = session_header(&redirected);

        let response = server
            .get(&location(&redirected))
            .add_header(header::COOKIE, cookie)
            .await;

        response.assert_status(StatusCode::OK);
        assert!(response.text().contains("You must be logged in to access this page."));
    }

    #[tokio::test]
    async fn test_register_stores_hashed_password() {
        let state = setup_empty_app_state().await;
        let server = test_server(create_router(state.clone()));
        let (cookie, token) = csrf_token(&server, "/auth/register", None).await;

        let response = server
            .post("/auth/register")
            .add_header(header::COOKIE, cookie.clone())
            .form(&[
                ("name", "Rohit"),
                ("department", "controls"),
                ("position", "Stuccan"),
                ("password", "admin2020"),
                ("confirm_password", "admin2020"),
                ("csrf_token", token.as_str()),
            ])
            .await;

        response.assert_status(StatusCode::SEE_OTHER);
        assert_eq!(location(&response), "/auth/login");
        assert_eq!(user_count(&state.db).await, 1);

        let stored = user::Entity::find()
            .filter(user::Column::Name.eq("Rohit"))
            .one(&state.db)
            .await
            .unwrap()
            .expect("registered user not found");
        assert_ne!(stored.password_hash, "admin2020");
        assert!(verify_password("admin2020".to_string(), stored.password_hash).await);
        assert_eq!(stored.department, "controls");
        assert!(stored.active);

        // The flash survives the redirect
        let login_page = server
            .get("/auth/login")
            .add_header(header::COOKIE, cookie)
            .await;
        assert!(login_page.text().contains("You have successfully registered!"));
    }

    #[tokio::test]
    async fn test_register_rejects_missing_csrf_token() {
        let state = setup_empty_app_state().await;
        let server = test_server(create_router(state.clone()));

        let response = server
            .post("/auth/register")
            .form(&[
                ("name", "Rohit"),
                ("department", "controls"),
                ("position", "Stuccan"),
                ("password", "admin2020"),
                ("confirm_password", "admin2020"),
            ])
            .await;

        response.assert_status(StatusCode::FORBIDDEN);
        assert!(response.text().contains("403 Error"));
        assert_eq!(user_count(&state.db).await, 0);
    }

    #[tokio::test]
    async fn test_register_rejects_mismatched_passwords() {
        let state = setup_empty_app_state().await;
        let server = test_server(create_router(state.clone()));
        let (cookie, token) = csrf_token(&server, "/auth/register", None).await;

        let response = server
            .post("/auth/register")
            .add_header(header::COOKIE, cookie)
            .form(&[
                ("name", "Rohit"),
                ("department", "controls"),
                ("position", "Stuccan"),
                ("password", "admin2020"),
                ("confirm_password", "admin2021"),
                ("csrf_token", token.as_str()),
            ])
            .await;

        response.assert_status(StatusCode::OK);
        assert!(response.text().contains("Passwords must match."));
        assert_eq!(user_count(&state.db).await, 0);
    }

    #[tokio::test]
    async fn test_register_rejects_duplicate_name() {
        let (server, state, _) = setup_test_app().await;
        let (cookie, token) = csrf_token(&server, "/auth/register", None).await;

        let response = server
            .post("/auth/register")
            .add_header(header::COOKIE, cookie)
            .form(&[
                ("name", TEST_USER),
                ("department", "sales"),
                ("position", "Clerk"),
                ("password", "another"),
                ("confirm_password", "another"),
                ("csrf_token", token.as_str()),
            ])
            .await;

        response.assert_status(StatusCode::OK);
        assert!(response.text().contains("Username is already in use."));
        assert_eq!(user_count(&state.db).await, 1);
    }

    #[tokio::test]
    async fn test_register_requires_every_field() {
        let state = setup_empty_app_state().await;
        let server = test_server(create_router(state.clone()));
        let (cookie, token) = csrf_token(&server, "/auth/register", None).await;

        let response = server
            .post("/auth/register")
            .add_header(header::COOKIE, cookie)
            .form(&[("name", "Rohit"), ("csrf_token", token.as_str())])
            .await;

        response.assert_status(StatusCode::OK);
        assert!(response.text().contains("This field is required."));
        assert_eq!(user_count(&state.db).await, 0);
    }

    #[tokio::test]
    async fn test_login_redirects_to_dashboard() {
        let (server, _, _) = setup_test_app().await;
        let (cookie, token) = csrf_token(&server, "/auth/login", None).await;

        let response = server
            .post("/auth/login")
            .add_header(header::COOKIE, cookie.clone())
            .form(&[
                ("name", TEST_USER),
                ("password", TEST_PASSWORD),
                ("csrf_token", token.as_str()),
            ])
            .await;

        response.assert_status(StatusCode::SEE_OTHER);
        assert_eq!(location(&response), "/dashboard");
        let logged_in = session_header(&response);
        assert_ne!(logged_in, cookie);

        let dashboard = server
            .get("/dashboard")
            .add_header(header::COOKIE, logged_in)
            .await;
        dashboard.assert_status(StatusCode::OK);
        assert!(dashboard.text().contains(TEST_USER));
    }

    #[tokio::test]
    async fn test_login_rejects_missing_csrf_token() {
        let (server, _, _) = setup_test_app().await;

        let response = server
            .post("/auth/login")
            .form(&[("name", TEST_USER), ("password", TEST_PASSWORD)])
            .await;

        response.assert_status(StatusCode::FORBIDDEN);
    }

    #[tokio::test]
    async fn test_login_with_wrong_password_stays_anonymous() {
        let (server, _, _) = setup_test_app().await;
        let (cookie, token) = csrf_token(&server, "/auth/login", None).await;

        let response = server
            .post("/auth/login")
            .add_header(header::COOKIE, cookie.clone())
            .form(&[
                ("name", TEST_USER),
                ("password", "not-the-password"),
                ("csrf_token", token.as_str()),
            ])
            .await;

        response.assert_status(StatusCode::OK);
        assert!(response.text().contains("Invalid name or password."));
        assert!(response.text().contains("Login to your account"));

        let dashboard = server
            .get("/dashboard")
            .add_header(header::COOKIE, cookie)
            .await;
        dashboard.assert_status(StatusCode::SEE_OTHER);
    }

    #[tokio::test]
    async fn test_login_with_unknown_user_gives_same_message() {
        let (server, _, _) = setup_test_app().await;
        let (cookie, token) = csrf_token(&server, "/auth/login", None).await;

        let response = server
            .post("/auth/login")
            .add_header(header::COOKIE, cookie)
            .form(&[
                ("name", "nobody"),
                ("password", TEST_PASSWORD),
                ("csrf_token", token.as_str()),
            ])
            .await;

        response.assert_status(StatusCode::OK);
        assert!(response.text().contains("Invalid name or password."));
    }

    #[tokio::test]
    async fn test_login_follows_local_next() {
        let (server, _, _) = setup_test_app().await;
        let (cookie, token) = csrf_token(&server, "/auth/login", None).await;

        let response = server
            .post("/auth/login?next=%2Fassets%2Fassets")
            .add_header(header::COOKIE, cookie)
            .form(&[
                ("name", TEST_USER),
                ("password", TEST_PASSWORD),
                ("csrf_token", token.as_str()),
            ])
            .await;

        response.assert_status(StatusCode::SEE_OTHER);
        assert_eq!(location(&response), "/assets/assets");
    }

    #[tokio::test]
    async fn test_login_ignores_external_next() {
        let (server, _, _) = setup_test_app().await;
        let (cookie, token) = csrf_token(&server, "/auth/login", None).await;

        let response = server
            .post("/auth/login?next=%2F%2Fevil.example")
            .add_header(header::COOKIE, cookie)
            .form(&[
                ("name", TEST_USER),
                ("password", TEST_PASSWORD),
                ("csrf_token", token.as_str()),
            ])
            .await;

        response.assert_status(StatusCode::SEE_OTHER);
        assert_eq!(location(&response), "/dashboard");
    }

    #[tokio::test]
    async fn test_logout_ends_session() {
        let (server, _, _) = setup_test_app().await;
        let (cookie, token) = login(&server, TEST_USER, TEST_PASSWORD).await;

        let response = server
            .get(&format!("/auth/logout?csrf_token={}", token))
            .add_header(header::COOKIE, cookie.clone())
            .await;
        response.assert_status(StatusCode::SEE_OTHER);
        assert_eq!(location(&response), "/auth/login");

        let dashboard = server
            .get("/dashboard")
            .add_header(header::COOKIE, cookie)
            .await;
        dashboard.assert_status(StatusCode::SEE_OTHER);
    }

    #[tokio::test]
    async fn test_logout_without_token_keeps_session() {
        let (server, _, _) = setup_test_app().await;
        let (cookie, _) = login(&server, TEST_USER, TEST_PASSWORD).await;

        let response = server
            .get("/auth/logout")
            .add_header(header::COOKIE, cookie.clone())
            .await;
        response.assert_status(StatusCode::FORBIDDEN);

        let dashboard = server
            .get("/dashboard")
            .add_header(header::COOKIE, cookie)
            .await;
        dashboard.assert_status(StatusCode::OK);
    }

    #[tokio::test]
    async fn test_add_asset_persists_one_record() {
        let (server, state, fixtures) = setup_test_app().await;
        let (cookie, token) = login(&server, TEST_USER, TEST_PASSWORD).await;
        let before = asset_count(&state.db).await;

        let form = server
            .get("/assets/assets/add")
            .add_header(header::COOKIE, cookie.clone())
            .await;
        form.assert_status(StatusCode::OK);
        assert!(form.text().contains("ABQ-First"));

        let response = server
            .post("/assets/assets/add")
            .add_header(header::COOKIE, cookie.clone())
            .form(&[
                ("comments", "Laptop for the controls team"),
                ("csrf_token", token.as_str()),
            ])
            .await;

        response.assert_status(StatusCode::SEE_OTHER);
        assert_eq!(location(&response), "/assets/assets");
        assert_eq!(asset_count(&state.db).await, before + 1);

        let created = asset::Entity::find()
            .one(&state.db)
            .await
            .unwrap()
            .expect("asset not created");
        assert_eq!(created.comments.as_deref(), Some("Laptop for the controls team"));
        assert_eq!(created.inventory_id, fixtures.inventory.id);
        assert_eq!(created.location, fixtures.location.id);
        assert_eq!(created.managed_by, fixtures.user.id);
        assert_eq!(created.assigned_to, Some(fixtures.user.id));
        assert_eq!(created.certified_by, Some(fixtures.user.id));

        let list = server
            .get("/assets/assets")
            .add_header(header::COOKIE, cookie)
            .await;
        list.assert_status(StatusCode::OK);
        let html = list.text();
        assert!(html.contains("You have successfully added a new Asset."));
        assert!(html.contains("Laptop for the controls team"));
    }

    #[tokio::test]
    async fn test_add_asset_rejects_missing_csrf_token() {
        let (server, state, _) = setup_test_app().await;
        let (cookie, _) = login(&server, TEST_USER, TEST_PASSWORD).await;

        let response = server
            .post("/assets/assets/add")
            .add_header(header::COOKIE, cookie)
            .form(&[("comments", "Forged"), ("csrf_token", "not-the-token")])
            .await;

        response.assert_status(StatusCode::FORBIDDEN);
        assert_eq!(asset_count(&state.db).await, 0);
    }

    #[tokio::test]
    async fn test_add_asset_uses_selected_location() {
        let (server, state, fixtures) = setup_test_app().await;
        let (cookie, token) = login(&server, TEST_USER, TEST_PASSWORD).await;

        let warehouse = place::ActiveModel {
            description: Set(Some("Warehouse".to_string())),
            ..Default::default()
        }
        .insert(&state.db)
        .await
        .unwrap();

        let warehouse_id = warehouse.id.to_string();
        let inventory_id = fixtures.inventory.id.to_string();
        let response = server
            .post("/assets/assets/add")
            .add_header(header::COOKIE, cookie)
            .form(&[
                ("comments", "Spare monitor"),
                ("inventory_id", inventory_id.as_str()),
                ("location_id", warehouse_id.as_str()),
                ("csrf_token", token.as_str()),
            ])
            .await;

        response.assert_status(StatusCode::SEE_OTHER);
        let created = asset::Entity::find()
            .one(&state.db)
            .await
            .unwrap()
            .expect("asset not created");
        assert_eq!(created.location, warehouse.id);
    }

    #[tokio::test]
    async fn test_add_asset_without_inventory_reports_error() {
        let state = setup_empty_app_state().await;
        create_user(&state.db, TEST_USER, TEST_PASSWORD).await;
        let server = test_server(create_router(state.clone()));
        let (cookie, token) = login(&server, TEST_USER, TEST_PASSWORD).await;

        let response = server
            .post("/assets/assets/add")
            .add_header(header::COOKIE, cookie.clone())
            .form(&[("comments", "Nowhere to put this"), ("csrf_token", token.as_str())])
            .await;

        response.assert_status(StatusCode::SEE_OTHER);
        assert_eq!(location(&response), "/assets/assets");
        assert_eq!(asset_count(&state.db).await, 0);

        let list = server
            .get("/assets/assets")
            .add_header(header::COOKIE, cookie)
            .await;
        assert!(list.text().contains("Error: Asset cannot be created."));
    }

    #[tokio::test]
    async fn test_add_asset_with_missing_references_reports_error() {
        let (server, state, _) = setup_test_app().await;
        let (cookie, token) = login(&server, TEST_USER, TEST_PASSWORD).await;

        for field in ["inventory_id", "location_id"] {
            let response = server
                .post("/assets/assets/add")
                .add_header(header::COOKIE, cookie.clone())
                .form(&[
                    ("comments", "Points at nothing"),
                    (field, "999"),
                    ("csrf_token", token.as_str()),
                ])
                .await;

            response.assert_status(StatusCode::SEE_OTHER);
            assert_eq!(location(&response), "/assets/assets");
            assert_eq!(asset_count(&state.db).await, 0, "{field}=999 created a row");

            let list = server
                .get("/assets/assets")
                .add_header(header::COOKIE, cookie.clone())
                .await;
            assert!(list.text().contains("Error: Asset cannot be created."));
        }
    }

    #[tokio::test]
    async fn test_add_asset_with_garbage_selection_rerenders_form() {
        let (server, state, _) = setup_test_app().await;
        let (cookie, token) = login(&server, TEST_USER, TEST_PASSWORD).await;

        let response = server
            .post("/assets/assets/add")
            .add_header(header::COOKIE, cookie)
            .form(&[
                ("comments", "Laptop"),
                ("inventory_id", "abc"),
                ("csrf_token", token.as_str()),
            ])
            .await;

        response.assert_status(StatusCode::OK);
        let html = response.text();
        assert!(html.contains("Not a valid choice."));
        assert!(html.contains("Laptop"));
        assert_eq!(asset_count(&state.db).await, 0);
    }

    #[tokio::test]
    async fn test_add_asset_requires_comments() {
        let (server, state, _) = setup_test_app().await;
        let (cookie, token) = login(&server, TEST_USER, TEST_PASSWORD).await;

        let response = server
            .post("/assets/assets/add")
            .add_header(header::COOKIE, cookie)
            .form(&[("comments", "   "), ("csrf_token", token.as_str())])
            .await;

        response.assert_status(StatusCode::OK);
        assert!(response.text().contains("This field is required."));
        assert_eq!(asset_count(&state.db).await, 0);
    }

    #[tokio::test]
    async fn test_list_shows_only_own_assets() {
        let (server, state, fixtures) = setup_test_app().await;
        let other = create_user(&state.db, "someone-else", "secret").await;
        insert_asset(&state.db, fixtures.user.id, &fixtures, "mine").await;
        insert_asset(&state.db, other.id, &fixtures, "belongs to someone else").await;
        let (cookie, _) = login(&server, TEST_USER, TEST_PASSWORD).await;

        let response = server
            .get("/assets/assets")
            .add_header(header::COOKIE, cookie)
            .await;

        response.assert_status(StatusCode::OK);
        let html = response.text();
        assert!(html.contains("mine"));
        assert!(!html.contains("belongs to someone else"));
    }

    #[tokio::test]
    async fn test_edit_asset_updates_only_comments() {
        let (server, state, fixtures) = setup_test_app().await;
        let original = insert_asset(&state.db, fixtures.user.id, &fixtures, "before").await;
        let (cookie, token) = login(&server, TEST_USER, TEST_PASSWORD).await;

        let form = server
            .get(&format!("/assets/assets/edit/{}", original.id))
            .add_header(header::COOKIE, cookie.clone())
            .await;
        form.assert_status(StatusCode::OK);
        assert!(form.text().contains("before"));

        let response = server
            .post(&format!("/assets/assets/edit/{}", original.id))
            .add_header(header::COOKIE, cookie)
            .form(&[
                ("comments", "after"),
                ("location_id", "999"),
                ("inventory_id", "abc"),
                ("csrf_token", token.as_str()),
            ])
            .await;

        response.assert_status(StatusCode::SEE_OTHER);
        assert_eq!(location(&response), "/assets/assets");

        let updated = asset::Entity::find_by_id(original.id)
            .one(&state.db)
            .await
            .unwrap()
            .expect("asset vanished");
        assert_eq!(updated.comments.as_deref(), Some("after"));
        assert_eq!(updated.location, original.location);
        assert_eq!(updated.inventory_id, original.inventory_id);
        assert_eq!(updated.managed_by, original.managed_by);
        assert_eq!(updated.assigned_at, original.assigned_at);
    }

    #[tokio::test]
    async fn test_edit_unknown_asset_is_not_found() {
        let (server, _, _) = setup_test_app().await;
        let (cookie, _) = login(&server, TEST_USER, TEST_PASSWORD).await;

        let response = server
            .get("/assets/assets/edit/99999")
            .add_header(header::COOKIE, cookie)
            .await;

        response.assert_status(StatusCode::NOT_FOUND);
        assert!(response.text().contains("404 Error"));
    }

    #[tokio::test]
    async fn test_delete_asset_removes_record() {
        let (server, state, fixtures) = setup_test_app().await;
        let doomed = insert_asset(&state.db, fixtures.user.id, &fixtures, "to delete").await;
        let (cookie, token) = login(&server, TEST_USER, TEST_PASSWORD).await;
        let before = asset_count(&state.db).await;

        let response = server
            .post(&format!("/assets/assets/delete/{}", doomed.id))
            .add_header(header::COOKIE, cookie.clone())
            .form(&[("csrf_token", token.as_str())])
            .await;

        response.assert_status(StatusCode::SEE_OTHER);
        assert_eq!(location(&response), "/assets/assets");
        assert_eq!(asset_count(&state.db).await, before - 1);
        assert!(asset::Entity::find_by_id(doomed.id)
            .one(&state.db)
            .await
            .unwrap()
            .is_none());

        let again = server
            .get(&format!("/assets/assets/delete/{}?csrf_token={}", doomed.id, token))
            .add_header(header::COOKIE, cookie)
            .await;
        again.assert_status(StatusCode::NOT_FOUND);
        assert!(again.text().contains("404 Error"));
    }

    #[tokio::test]
    async fn test_delete_link_without_token_is_forbidden() {
        let (server, state, fixtures) = setup_test_app().await;
        let kept = insert_asset(&state.db, fixtures.user.id, &fixtures, "keep me").await;
        let (cookie, _) = login(&server, TEST_USER, TEST_PASSWORD).await;

        let response = server
            .get(&format!("/assets/assets/delete/{}", kept.id))
            .add_header(header::COOKIE, cookie)
            .await;

        response.assert_status(StatusCode::FORBIDDEN);
        assert!(response.text().contains("403 Error"));
        assert_eq!(asset_count(&state.db).await, 1);
    }

    #[tokio::test]
    async fn test_delete_has_no_ownership_check() {
        let (server, state, fixtures) = setup_test_app().await;
        let other = create_user(&state.db, "someone-else", "secret").await;
        let theirs = insert_asset(&state.db, other.id, &fixtures, "not mine").await;
        let (cookie, token) = login(&server, TEST_USER, TEST_PASSWORD).await;

        let response = server
            .get(&format!("/assets/assets/delete/{}?csrf_token={}", theirs.id, token))
            .add_header(header::COOKIE, cookie)
            .await;

        response.assert_status(StatusCode::SEE_OTHER);
        assert_eq!(asset_count(&state.db).await, 0);
    }

    #[tokio::test]
    async fn test_403_forbidden() {
        let extra = Router::new().route("/403", get(|| async { AppError::Forbidden }));
        let (server, _) = setup_test_app_with(extra).await;

        let response = server.get("/403").await;

        response.assert_status(StatusCode::FORBIDDEN);
        assert!(response.text().contains("403 Error"));
    }

    #[tokio::test]
    async fn test_404_not_found() {
        let (server, _, _) = setup_test_app().await;

        let response = server.get("/nothinghere").await;

        response.assert_status(StatusCode::NOT_FOUND);
        assert!(response.text().contains("404 Error"));
    }

    #[tokio::test]
    async fn test_500_internal_server_error() {
        let (server, _, _) = setup_test_app().await;

        let response = server.get("/500").await;

        response.assert_status(StatusCode::INTERNAL_SERVER_ERROR);
        assert!(response.text().contains("500 Error"));
    }

    #[tokio::test]
    async fn test_fixtures_match_expected_counts() {
        let state = setup_empty_app_state().await;
        seed_fixtures(&state.db).await;

        assert_eq!(user_count(&state.db).await, 1);
        assert_eq!(place::Entity::find().count(&state.db).await.unwrap(), 1);
        assert_eq!(asset_count(&state.db).await, 0);
    }
}
