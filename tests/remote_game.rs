//! End-to-end remote play against a live scoring endpoint

use axum::{Json, Router, http::StatusCode, routing::post};
use serde_json::json;
use std::sync::Arc;
use tokio::net::TcpListener;
use word_guess::{
    core::{LetterStatus, Word},
    game::{
        Game, GameError, GameState, LocalScorer, RemoteScorer, ScoringBackend, ScoringError,
        ScoringMode,
    },
    history::{HistoryStore, MemoryHistory},
    server,
};

async fn spawn_endpoint(target: &str) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
    let addr = listener.local_addr().expect("addr");
    let app = server::router(Word::new(target).expect("target"));
    tokio::spawn(async move {
        let _ = axum::serve(listener, app).await;
    });
    format!("http://{addr}/score")
}

/// Endpoint that answers every route with a fixed, broken response
async fn spawn_broken_endpoint() -> String {
    fn absent(letter: &str) -> serde_json::Value {
        json!({ "letter": letter, "status": "absent" })
    }

    let app = Router::new()
        .route("/not-json", post(|| async { (StatusCode::OK, "not json") }))
        .route(
            "/four-results",
            post(|| async {
                Json(json!({
                    "result": [absent("C"), absent("L"), absent("O"), absent("U")],
                    "isCorrect": false,
                    "message": "Keep going",
                }))
            }),
        )
        .route(
            "/wrong-letters",
            post(|| async {
                Json(json!({
                    "result": [absent("A"), absent("B"), absent("C"), absent("D"), absent("E")],
                    "isCorrect": false,
                    "message": "Keep going",
                }))
            }),
        )
        .route(
            "/unknown-status",
            post(|| async {
                Json(json!({
                    "result": [
                        absent("C"),
                        absent("L"),
                        absent("O"),
                        absent("U"),
                        { "letter": "D", "status": "unknown" },
                    ],
                    "isCorrect": false,
                    "message": "Keep going",
                }))
            }),
        )
        .route(
            "/server-error",
            post(|| async { (StatusCode::INTERNAL_SERVER_ERROR, "boom") }),
        );

    let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
    let addr = listener.local_addr().expect("addr");
    tokio::spawn(async move {
        let _ = axum::serve(listener, app).await;
    });
    format!("http://{addr}")
}

fn remote(endpoint: &str) -> Arc<dyn ScoringBackend> {
    // Loopback only; keep any proxy settings in the environment out of the way
    let client = reqwest::Client::builder()
        .no_proxy()
        .build()
        .expect("client");
    Arc::new(RemoteScorer::with_client(client, endpoint))
}

#[tokio::test]
async fn remote_game_is_won_through_the_endpoint() {
    let endpoint = spawn_endpoint("allow").await;
    let history = Arc::new(MemoryHistory::new());
    let mut game = Game::new(remote(&endpoint), Some(history.clone()));
    assert_eq!(game.mode(), ScoringMode::Remote);

    let first = game.submit_guess("llama").await.expect("llama");
    let statuses: Vec<_> = first.outcome.results().iter().map(|r| r.status).collect();
    assert_eq!(
        statuses,
        [
            LetterStatus::Present,
            LetterStatus::Correct,
            LetterStatus::Present,
            LetterStatus::Absent,
            LetterStatus::Absent,
        ]
    );
    assert_eq!(first.state, GameState::Active);

    let second = game.submit_guess("allow").await.expect("allow");
    assert_eq!(second.state, GameState::Won);
    assert_eq!(second.attempt, 2);
    assert!(game.target().is_none());

    let saved = history.recent(10).await.expect("history");
    assert_eq!(saved.len(), 2);
    assert_eq!(saved[0].guess, "ALLOW");
}

#[tokio::test]
async fn remote_and_local_scoring_agree() {
    let endpoint = spawn_endpoint("erase").await;
    let local = LocalScorer::new(Word::new("erase").expect("target"));
    let remote = remote(&endpoint);

    for guess in ["speed", "eerie", "erase", "sassy"] {
        let guess = Word::new(guess).expect("guess");
        assert_eq!(
            remote.score(&guess).await.expect("remote"),
            local.score(&guess).await.expect("local"),
            "{guess}"
        );
    }
}

#[tokio::test]
async fn endpoint_going_away_does_not_consume_attempts() {
    // Bind then drop to get a port nothing listens on
    let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
    let addr = listener.local_addr().expect("addr");
    drop(listener);

    let mut game = Game::new(remote(&format!("http://{addr}/score")), None);
    let err = game.submit_guess("cloud").await.unwrap_err();

    assert!(matches!(
        err,
        GameError::Scoring(ScoringError::RemoteUnavailable(_))
    ));
    assert_eq!(game.session().attempt_count(), 0);
    assert_eq!(game.session().state(), GameState::Active);
    assert!(!game.is_pending());
}

#[tokio::test]
async fn raw_endpoint_rejects_bad_words_with_cors() {
    let endpoint = spawn_endpoint("cloud").await;
    let client = reqwest::Client::builder()
        .no_proxy()
        .build()
        .expect("client");

    let response = client
        .post(&endpoint)
        .json(&serde_json::json!({ "word": "clo" }))
        .send()
        .await
        .expect("response");

    assert_eq!(response.status(), reqwest::StatusCode::BAD_REQUEST);
    assert_eq!(
        response.headers()["access-control-allow-origin"],
        "*"
    );
    let body: serde_json::Value = response.json().await.expect("json");
    assert_eq!(body["error"], "Enter a 5-letter word");
}

#[tokio::test]
async fn broken_responses_leave_the_game_untouched() {
    let base = spawn_broken_endpoint().await;

    for route in [
        "not-json",
        "four-results",
        "wrong-letters",
        "unknown-status",
        "server-error",
    ] {
        let history = Arc::new(MemoryHistory::new());
        let mut game = Game::new(remote(&format!("{base}/{route}")), Some(history.clone()));

        let err = game.submit_guess("cloud").await.unwrap_err();

        assert!(
            matches!(err, GameError::Scoring(ScoringError::RemoteUnavailable(_))),
            "{route}: {err:?}"
        );
        assert_eq!(game.session().attempt_count(), 0, "{route}");
        assert_eq!(game.session().state(), GameState::Active, "{route}");
        assert!(!game.is_pending(), "{route}");
        assert!(history.recent(10).await.expect("history").is_empty(), "{route}");
    }
}
