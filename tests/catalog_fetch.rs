use castnotes::config::Config;
use castnotes::fetcher::{ApiClient, FetchError, fetch_catalog};
use serde_json::json;
use wiremock::{
    Mock, MockServer, ResponseTemplate,
    matchers::{header, method, path, query_param},
};

const SHOW_NOTES: &str = "\
### Guest: Jane Doe\n\n\
- Company: [Acme Inc](https://acme.com)\n\n\
### Resources\n\n\
- [React docs](https://reactjs.org)\n\n\
### Homework\n\n\
- Read chapter 1\n\n\
A great chat about testing.\n\n\
---\n";

fn client_for(server: &MockServer) -> ApiClient {
    let config = Config::new("test-token", "cast-1", server.uri());
    ApiClient::new(&config).unwrap()
}

async fn mount_seasons(server: &MockServer, hrefs: Vec<(String, u32)>) {
    let collection: Vec<_> = hrefs
        .into_iter()
        .map(|(href, number)| json!({"href": href, "number": number}))
        .collect();
    Mock::given(method("GET"))
        .and(path("/podcasts/cast-1/seasons"))
        .and(header("authorization", "Bearer test-token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"collection": collection})))
        .mount(server)
        .await;
}

fn episode_detail(id: &str) -> serde_json::Value {
    json!({
        "slug": format!("episode-{id}"),
        "transcription": "**Kent:** Welcome to the show!",
        "long_description": SHOW_NOTES,
        "description": "Jane talks testing.",
        "image_url": "https://img.test/cover.jpg",
        "number": 7,
        "duration": 1845,
        "title": "Testing without implementation details",
        "season": {"number": 1},
        "keywords": {"collection": [{"value": "react"}, {"value": "testing"}]}
    })
}

#[tokio::test]
async fn assembles_published_visible_episodes() {
    let server = MockServer::start().await;
    mount_seasons(&server, vec![(format!("{}/seasons/s1", server.uri()), 1)]).await;

    Mock::given(method("GET"))
        .and(path("/seasons/s1/episodes"))
        .and(query_param("limit", "300"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "collection": [
                {"id": "e1", "status": "published", "is_hidden": false},
                {"id": "e2", "status": "draft", "is_hidden": false},
                {"id": "e3", "status": "published", "is_hidden": true},
            ]
        })))
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/episodes/e1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(episode_detail("e1")))
        .mount(&server)
        .await;

    let catalog = fetch_catalog(&client_for(&server)).await.unwrap();

    assert_eq!(catalog.len(), 1);
    assert_eq!(catalog[0].season_number, 1);
    // the draft and the hidden episode never even get fetched
    assert_eq!(catalog[0].episodes.len(), 1);

    let episode = &catalog[0].episodes[0];
    assert_eq!(episode.simplecast_id, "e1");
    assert_eq!(episode.slug, "episode-e1");
    assert_eq!(episode.episode_number, 7);
    assert_eq!(episode.season_number, 1);
    assert_eq!(episode.duration, 1845);
    assert_eq!(episode.keywords, vec!["react", "testing"]);
    assert!(episode.transcript_html.contains("<strong>Kent:</strong>"));
    assert!(episode.description_html.contains("Jane talks testing."));

    // show notes went through the full pipeline
    assert_eq!(episode.resources.len(), 1);
    assert_eq!(episode.resources[0].name, "React docs");
    assert_eq!(episode.guests.len(), 1);
    assert_eq!(episode.guests[0].name, "Jane Doe");
    assert_eq!(episode.homework, vec!["<p>Read chapter 1</p>"]);
    assert_eq!(episode.summary_html, "<p>A great chat about testing.</p>");
}

#[tokio::test]
async fn season_without_resolvable_id_fails_the_catalog() {
    let server = MockServer::start().await;
    // trailing slash: no final path segment to use as the season id
    mount_seasons(&server, vec![(format!("{}/seasons/", server.uri()), 4)]).await;

    let err = fetch_catalog(&client_for(&server)).await.unwrap_err();
    match err {
        FetchError::SeasonRef { number, href } => {
            assert_eq!(number, 4);
            assert!(href.ends_with("/seasons/"));
        }
        other => panic!("expected SeasonRef error, got {other:?}"),
    }
}

#[tokio::test]
async fn one_failing_episode_fails_the_whole_join() {
    let server = MockServer::start().await;
    mount_seasons(&server, vec![(format!("{}/seasons/s1", server.uri()), 1)]).await;

    Mock::given(method("GET"))
        .and(path("/seasons/s1/episodes"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "collection": [
                {"id": "good", "status": "published", "is_hidden": false},
                {"id": "bad", "status": "published", "is_hidden": false},
            ]
        })))
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/episodes/good"))
        .respond_with(ResponseTemplate::new(200).set_body_json(episode_detail("good")))
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/episodes/bad"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    // all-or-nothing: no partial season comes back
    let err = fetch_catalog(&client_for(&server)).await.unwrap_err();
    match err {
        FetchError::Http { status, .. } => assert_eq!(status.as_u16(), 500),
        other => panic!("expected HTTP error, got {other:?}"),
    }
}

#[tokio::test]
async fn malformed_show_notes_fail_the_episode_and_the_catalog() {
    let server = MockServer::start().await;
    mount_seasons(&server, vec![(format!("{}/seasons/s1", server.uri()), 1)]).await;

    Mock::given(method("GET"))
        .and(path("/seasons/s1/episodes"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "collection": [{"id": "e1", "status": "published", "is_hidden": false}]
        })))
        .mount(&server)
        .await;

    let mut detail = episode_detail("e1");
    detail["long_description"] =
        json!("### Guest: Jane Doe\n\n- Company: Acme, plain text without a link\n");
    Mock::given(method("GET"))
        .and(path("/episodes/e1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(detail))
        .mount(&server)
        .await;

    let err = fetch_catalog(&client_for(&server)).await.unwrap_err();
    assert!(matches!(err, FetchError::Notes(_)));
}

#[tokio::test]
async fn seasons_fan_out_covers_every_season() {
    let server = MockServer::start().await;
    mount_seasons(
        &server,
        vec![
            (format!("{}/seasons/s1", server.uri()), 1),
            (format!("{}/seasons/s2", server.uri()), 2),
        ],
    )
    .await;

    for season in ["s1", "s2"] {
        Mock::given(method("GET"))
            .and(path(format!("/seasons/{season}/episodes")))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(json!({"collection": []})),
            )
            .mount(&server)
            .await;
    }

    let catalog = fetch_catalog(&client_for(&server)).await.unwrap();
    assert_eq!(catalog.len(), 2);
    assert_eq!(catalog[0].season_number, 1);
    assert_eq!(catalog[1].season_number, 2);
    assert!(catalog.iter().all(|s| s.episodes.is_empty()));
}
