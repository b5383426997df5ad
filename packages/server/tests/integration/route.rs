use sea_orm::{ColumnTrait, EntityTrait, PaginatorTrait, QueryFilter};
use serde_json::json;
use server::entity::view;

use crate::common::{TestApp, routes};

mod create {
    use super::*;

    #[tokio::test]
    async fn owner_is_the_caller() {
        let app = TestApp::spawn().await;
        let alice = app.create_user("alice").await;

        let id = app.create_route(&alice.token, "Lakeside loop").await;
        let res = app.get_without_token(&routes::route(id)).await;

        assert_eq!(res.status, 200);
        assert_eq!(res.body["name"], "Lakeside loop");
        assert_eq!(res.body["user_id"], alice.id);
    }

    #[tokio::test]
    async fn requires_a_token() {
        let app = TestApp::spawn().await;

        let res = app
            .post_without_token(
                routes::ROUTES,
                &json!({"name": "Loop", "description": "Long enough text", "location": "Alps"}),
            )
            .await;

        assert_eq!(res.status, 401);
    }

    #[tokio::test]
    async fn rejects_short_description() {
        let app = TestApp::spawn().await;
        let alice = app.create_user("alice").await;

        let res = app
            .post_with_token(
                routes::ROUTES,
                &json!({"name": "Loop", "description": "short", "location": "Alps"}),
                &alice.token,
            )
            .await;

        assert_eq!(res.status, 400);
        assert_eq!(res.body["code"], "VALIDATION_ERROR");
    }
}

mod list {
    use super::*;

    #[tokio::test]
    async fn paginates_newest_first() {
        let app = TestApp::spawn().await;
        let alice = app.create_user("alice").await;
        let mut ids = Vec::new();
        for i in 0..3 {
            ids.push(app.create_route(&alice.token, &format!("Route {i}")).await);
        }

        let res = app
            .get_without_token(&format!("{}?page=1&per_page=2", routes::ROUTES))
            .await;

        assert_eq!(res.status, 200);
        let data = res.body["data"].as_array().unwrap();
        assert_eq!(data.len(), 2);
        assert_eq!(data[0]["id"], ids[2]);
        assert_eq!(data[1]["id"], ids[1]);
        assert_eq!(res.body["pagination"]["total"], 3);
        assert_eq!(res.body["pagination"]["total_pages"], 2);

        let page2 = app
            .get_without_token(&format!("{}?page=2&per_page=2", routes::ROUTES))
            .await;
        assert_eq!(page2.body["data"][0]["id"], ids[0]);
    }

    #[tokio::test]
    async fn keyword_matches_name_description_or_location_case_insensitively() {
        let app = TestApp::spawn().await;
        let alice = app.create_user("alice").await;
        let ridge = app.create_route(&alice.token, "Ridge Walk").await;
        app.create_route(&alice.token, "Forest loop").await;

        let res = app
            .get_without_token(&format!("{}?keyword=ridge", routes::ROUTES))
            .await;
        let data = res.body["data"].as_array().unwrap();
        assert_eq!(data.len(), 1);
        assert_eq!(data[0]["id"], ridge);

        // Location is shared by both routes.
        let res = app
            .get_without_token(&format!("{}?keyword=JULIAN", routes::ROUTES))
            .await;
        assert_eq!(res.body["pagination"]["total"], 2);
    }

    #[tokio::test]
    async fn rejects_invalid_keyword_and_page_size() {
        let app = TestApp::spawn().await;

        let res = app
            .get_without_token(&format!("{}?keyword=a%25b", routes::ROUTES))
            .await;
        assert_eq!(res.status, 400);

        let res = app
            .get_without_token(&format!("{}?per_page=21", routes::ROUTES))
            .await;
        assert_eq!(res.status, 400);

        let res = app
            .get_without_token(&format!("{}?page={}&per_page=20", routes::ROUTES, u64::MAX))
            .await;
        assert_eq!(res.status, 400);
        assert_eq!(res.body["code"], "VALIDATION_ERROR");
    }

    #[tokio::test]
    async fn user_routes_lists_only_that_users_routes() {
        let app = TestApp::spawn().await;
        let alice = app.create_user("alice").await;
        let bob = app.create_user("bob").await;
        let mine = app.create_route(&alice.token, "Alice route").await;
        app.create_route(&bob.token, "Bob route").await;

        let res = app.get_without_token(&routes::user_routes(alice.id)).await;

        assert_eq!(res.status, 200);
        let data = res.body.as_array().unwrap();
        assert_eq!(data.len(), 1);
        assert_eq!(data[0]["id"], mine);
    }
}

mod delete {
    use super::*;

    #[tokio::test]
    async fn missing_route_is_not_found() {
        let app = TestApp::spawn().await;

        let res = app.get_without_token(&routes::route(999)).await;

        assert_eq!(res.status, 404);
        assert_eq!(res.body["code"], "NOT_FOUND");
    }

    #[tokio::test]
    async fn only_the_owner_can_delete() {
        let app = TestApp::spawn().await;
        let alice = app.create_user("alice").await;
        let bob = app.create_user("bob").await;
        let id = app.create_route(&alice.token, "Lakeside loop").await;

        let res = app.delete_with_token(&routes::route(id), &bob.token).await;
        assert_eq!(res.status, 403);
        assert_eq!(res.body["code"], "PERMISSION_DENIED");

        let res = app.delete_with_token(&routes::route(id), &alice.token).await;
        assert_eq!(res.status, 204);

        let res = app.get_without_token(&routes::route(id)).await;
        assert_eq!(res.status, 404);
    }

    #[tokio::test]
    async fn deleting_a_route_removes_its_media_comments_and_views() {
        let app = TestApp::spawn().await;
        let alice = app.create_user("alice").await;
        let id = app.create_route(&alice.token, "Lakeside loop").await;

        assert_eq!(app.put_track(id, "t.gpx", b"<gpx/>", &alice.token).await.status, 204);
        assert_eq!(
            app.post_images(id, &[("a.png", b"png")], &alice.token).await.status,
            201
        );
        app.create_comment(id, &alice.token, "Nice").await;
        app.post_without_token(&routes::views(id), &json!({})).await;

        let res = app.delete_with_token(&routes::route(id), &alice.token).await;
        assert_eq!(res.status, 204);

        assert!(!app.media_root.join("tracks").join(id.to_string()).join("track.gpx").exists());
        assert!(!app.media_root.join("images").join(id.to_string()).exists());
        let comments = app.get_without_token(&routes::user_comments(alice.id)).await;
        assert_eq!(comments.body.as_array().unwrap().len(), 0);
        let views = view::Entity::find()
            .filter(view::Column::RouteId.eq(id))
            .count(&app.db)
            .await
            .unwrap();
        assert_eq!(views, 0);
    }
}
