use serde_json::json;

use crate::common::{TestApp, routes};

#[tokio::test]
async fn anyone_can_read_comments_on_a_route() {
    let app = TestApp::spawn().await;
    let alice = app.create_user("alice").await;
    let bob = app.create_user("bob").await;
    let route = app.create_route(&alice.token, "Lakeside loop").await;

    let first = app.create_comment(route, &bob.token, "Muddy after rain").await;
    let second = app.create_comment(route, &alice.token, "Thanks, noted").await;

    let res = app.get_without_token(&routes::route_comments(route)).await;
    assert_eq!(res.status, 200);
    let data = res.body.as_array().unwrap();
    assert_eq!(data.len(), 2);
    assert_eq!(data[0]["id"], first);
    assert_eq!(data[0]["user_id"], bob.id);
    assert_eq!(data[1]["id"], second);
}

#[tokio::test]
async fn commenting_on_a_missing_route_is_not_found() {
    let app = TestApp::spawn().await;
    let alice = app.create_user("alice").await;

    let res = app
        .post_with_token(&routes::route_comments(404), &json!({"content": "hi"}), &alice.token)
        .await;

    assert_eq!(res.status, 404);
}

#[tokio::test]
async fn empty_and_oversized_comments_are_rejected() {
    let app = TestApp::spawn().await;
    let alice = app.create_user("alice").await;
    let route = app.create_route(&alice.token, "Lakeside loop").await;

    for content in ["   ".to_string(), "x".repeat(1001)] {
        let res = app
            .post_with_token(
                &routes::route_comments(route),
                &json!({"content": content}),
                &alice.token,
            )
            .await;
        assert_eq!(res.status, 400);
    }
}

#[tokio::test]
async fn only_the_author_can_delete_a_comment() {
    let app = TestApp::spawn().await;
    let alice = app.create_user("alice").await;
    let bob = app.create_user("bob").await;
    let route = app.create_route(&alice.token, "Lakeside loop").await;
    let comment = app.create_comment(route, &bob.token, "Great spot").await;

    // Owning the route is not enough.
    let res = app.delete_with_token(&routes::comment(comment), &alice.token).await;
    assert_eq!(res.status, 403);

    let res = app.delete_with_token(&routes::comment(comment), &bob.token).await;
    assert_eq!(res.status, 204);

    let res = app.delete_with_token(&routes::comment(comment), &bob.token).await;
    assert_eq!(res.status, 404);
}

#[tokio::test]
async fn route_owner_can_clear_all_comments() {
    let app = TestApp::spawn().await;
    let alice = app.create_user("alice").await;
    let bob = app.create_user("bob").await;
    let route = app.create_route(&alice.token, "Lakeside loop").await;
    app.create_comment(route, &bob.token, "One").await;
    app.create_comment(route, &bob.token, "Two").await;

    let res = app.delete_with_token(&routes::route_comments(route), &bob.token).await;
    assert_eq!(res.status, 403);

    let res = app.delete_with_token(&routes::route_comments(route), &alice.token).await;
    assert_eq!(res.status, 204);

    let res = app.get_without_token(&routes::route_comments(route)).await;
    assert_eq!(res.body.as_array().unwrap().len(), 0);
}
