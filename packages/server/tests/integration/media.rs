use crate::common::{TestApp, routes};

const GPX_A: &[u8] = b"<gpx version=\"1.1\"><trk><name>A</name></trk></gpx>";
const GPX_B: &[u8] = b"<gpx version=\"1.1\"><trk><name>B</name></trk></gpx>";

mod track {
    use super::*;

    #[tokio::test]
    async fn owner_uploads_and_anyone_downloads() {
        let app = TestApp::spawn().await;
        let alice = app.create_user("alice").await;
        let route = app.create_route(&alice.token, "Lakeside loop").await;

        let res = app.put_track(route, "trail.gpx", GPX_A, &alice.token).await;
        assert_eq!(res.status, 204, "{}", res.text);

        let res = app.get_without_token(&routes::track(route)).await;
        assert_eq!(res.status, 200);
        assert_eq!(res.content_type.as_deref(), Some("application/gpx+xml"));
        assert_eq!(res.bytes, GPX_A);
    }

    #[tokio::test]
    async fn upload_replaces_previous_track() {
        let app = TestApp::spawn().await;
        let alice = app.create_user("alice").await;
        let route = app.create_route(&alice.token, "Lakeside loop").await;

        app.put_track(route, "a.gpx", GPX_A, &alice.token).await;
        app.put_track(route, "b.GPX", GPX_B, &alice.token).await;

        let res = app.get_without_token(&routes::track(route)).await;
        assert_eq!(res.bytes, GPX_B);
    }

    #[tokio::test]
    async fn rejects_non_gpx_and_empty_files() {
        let app = TestApp::spawn().await;
        let alice = app.create_user("alice").await;
        let route = app.create_route(&alice.token, "Lakeside loop").await;

        let res = app.put_track(route, "trail.kml", GPX_A, &alice.token).await;
        assert_eq!(res.status, 400);
        assert_eq!(res.body["code"], "VALIDATION_ERROR");

        let res = app.put_track(route, "trail.gpx", b"", &alice.token).await;
        assert_eq!(res.status, 400);

        assert_eq!(app.get_without_token(&routes::track(route)).await.status, 404);
    }

    #[tokio::test]
    async fn non_owner_cannot_upload_or_delete() {
        let app = TestApp::spawn().await;
        let alice = app.create_user("alice").await;
        let bob = app.create_user("bob").await;
        let route = app.create_route(&alice.token, "Lakeside loop").await;
        app.put_track(route, "trail.gpx", GPX_A, &alice.token).await;

        let res = app.put_track(route, "evil.gpx", GPX_B, &bob.token).await;
        assert_eq!(res.status, 403);
        assert_eq!(res.body["code"], "PERMISSION_DENIED");

        let res = app.delete_with_token(&routes::track(route), &bob.token).await;
        assert_eq!(res.status, 403);

        assert_eq!(app.get_without_token(&routes::track(route)).await.bytes, GPX_A);
    }

    #[tokio::test]
    async fn unknown_route_is_not_found() {
        let app = TestApp::spawn().await;
        let alice = app.create_user("alice").await;

        let res = app.put_track(999, "trail.gpx", GPX_A, &alice.token).await;
        assert_eq!(res.status, 404);
        assert!(!app.media_root.join("tracks").join("999").exists());
    }

    #[tokio::test]
    async fn delete_then_delete_again() {
        let app = TestApp::spawn().await;
        let alice = app.create_user("alice").await;
        let route = app.create_route(&alice.token, "Lakeside loop").await;
        app.put_track(route, "trail.gpx", GPX_A, &alice.token).await;

        let res = app.delete_with_token(&routes::track(route), &alice.token).await;
        assert_eq!(res.status, 204);
        assert_eq!(app.get_without_token(&routes::track(route)).await.status, 404);

        let res = app.delete_with_token(&routes::track(route), &alice.token).await;
        assert_eq!(res.status, 404);
    }
}

mod images {
    use super::*;

    #[tokio::test]
    async fn upload_list_fetch_delete() {
        let app = TestApp::spawn().await;
        let alice = app.create_user("alice").await;
        let route = app.create_route(&alice.token, "Lakeside loop").await;

        let res = app
            .post_images(route, &[("a.png", b"image-a"), ("b.jpg", b"image-b")], &alice.token)
            .await;
        assert_eq!(res.status, 201, "{}", res.text);
        let names: Vec<String> = res.body["names"]
            .as_array()
            .unwrap()
            .iter()
            .map(|n| n.as_str().unwrap().to_string())
            .collect();
        assert_eq!(names.len(), 2);
        assert!(names[0].ends_with(".png"));
        assert!(names[1].ends_with(".jpg"));

        let res = app.get_without_token(&routes::images(route)).await;
        let mut listed: Vec<String> = res.body["image_names"]
            .as_array()
            .unwrap()
            .iter()
            .map(|n| n.as_str().unwrap().to_string())
            .collect();
        listed.sort();
        let mut expected = names.clone();
        expected.sort();
        assert_eq!(listed, expected);

        let res = app.get_without_token(&routes::image(route, &names[0])).await;
        assert_eq!(res.status, 200);
        assert_eq!(res.content_type.as_deref(), Some("image/png"));
        assert_eq!(res.bytes, b"image-a");

        let res = app
            .delete_with_token(&routes::image(route, &names[0]), &alice.token)
            .await;
        assert_eq!(res.status, 204);
        assert_eq!(
            app.get_without_token(&routes::image(route, &names[0])).await.status,
            404
        );
        assert_eq!(
            app.get_without_token(&routes::image(route, &names[1])).await.bytes,
            b"image-b"
        );
    }

    #[tokio::test]
    async fn list_without_images_is_not_found() {
        let app = TestApp::spawn().await;
        let alice = app.create_user("alice").await;
        let route = app.create_route(&alice.token, "Lakeside loop").await;

        let res = app.get_without_token(&routes::images(route)).await;
        assert_eq!(res.status, 404);
    }

    #[tokio::test]
    async fn empty_file_fails_but_earlier_files_stay() {
        let app = TestApp::spawn().await;
        let alice = app.create_user("alice").await;
        let route = app.create_route(&alice.token, "Lakeside loop").await;

        let res = app
            .post_images(route, &[("a.png", b"first"), ("b.png", b"")], &alice.token)
            .await;
        assert_eq!(res.status, 400);

        let res = app.get_without_token(&routes::images(route)).await;
        assert_eq!(res.body["image_names"].as_array().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn non_owner_cannot_mutate_images() {
        let app = TestApp::spawn().await;
        let alice = app.create_user("alice").await;
        let bob = app.create_user("bob").await;
        let route = app.create_route(&alice.token, "Lakeside loop").await;
        let res = app.post_images(route, &[("a.png", b"a")], &alice.token).await;
        let name = res.body["names"][0].as_str().unwrap().to_string();

        assert_eq!(
            app.post_images(route, &[("x.png", b"x")], &bob.token).await.status,
            403
        );
        assert_eq!(
            app.delete_with_token(&routes::image(route, &name), &bob.token).await.status,
            403
        );
        assert_eq!(
            app.delete_with_token(&routes::images(route), &bob.token).await.status,
            403
        );

        let res = app.get_without_token(&routes::images(route)).await;
        assert_eq!(res.body["image_names"].as_array().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn traversal_names_are_rejected() {
        let app = TestApp::spawn().await;
        let alice = app.create_user("alice").await;
        let route = app.create_route(&alice.token, "Lakeside loop").await;
        app.post_images(route, &[("a.png", b"a")], &alice.token).await;

        let res = app
            .get_without_token(&routes::image(route, "..%2F..%2Ftracks"))
            .await;
        assert_eq!(res.status, 400);
        assert_eq!(res.body["code"], "VALIDATION_ERROR");
    }

    #[tokio::test]
    async fn delete_all_removes_every_image() {
        let app = TestApp::spawn().await;
        let alice = app.create_user("alice").await;
        let route = app.create_route(&alice.token, "Lakeside loop").await;
        app.post_images(route, &[("a.png", b"a"), ("b.png", b"b")], &alice.token)
            .await;

        let res = app.delete_with_token(&routes::images(route), &alice.token).await;
        assert_eq!(res.status, 204);
        assert_eq!(app.get_without_token(&routes::images(route)).await.status, 404);
        assert!(!app.media_root.join("images").join(route.to_string()).exists());
    }

    #[tokio::test]
    async fn upload_without_files_checks_ownership_first() {
        let app = TestApp::spawn().await;
        let alice = app.create_user("alice").await;
        let bob = app.create_user("bob").await;
        let route = app.create_route(&alice.token, "Lakeside loop").await;

        let res = app.post_images(route, &[], &bob.token).await;
        assert_eq!(res.status, 403);

        let res = app.post_images(999, &[], &alice.token).await;
        assert_eq!(res.status, 404);

        let res = app.post_images(route, &[], &alice.token).await;
        assert_eq!(res.status, 400);
        assert_eq!(res.body["code"], "VALIDATION_ERROR");
        assert!(!app.media_root.join("images").join(route.to_string()).exists());
    }
}
