use axum::{
    body::Body,
    http::{Request, StatusCode},
    Router,
};
use equation_solver::{config::Config, server};
use http_body_util::BodyExt;
use serde_json::{json, Value};
use std::time::Duration;
use tower::ServiceExt;

fn app() -> Router { server::router(Config::default()) }

async fn send(app: Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();

    (status, serde_json::from_slice(&bytes).unwrap())
}

async fn post(app: Router, body: impl Into<Body>) -> (StatusCode, Value) {
    let request = Request::builder()
        .method("POST")
        .uri("/solve")
        .header("content-type", "application/json")
        .body(body.into())
        .unwrap();

    send(app, request).await
}

async fn solve(equation: &str) -> (StatusCode, Value) {
    post(app(), json!({ "equation": equation }).to_string()).await
}

async fn health(app: Router) -> (StatusCode, Value) {
    let request = Request::builder()
        .method("GET")
        .uri("/health")
        .body(Body::empty())
        .unwrap();

    send(app, request).await
}

#[tokio::test]
async fn solve_a_linear_equation() {
    let (status, body) = solve("2*x + 4 = 0").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "solution": "[-2]" }));
}

#[tokio::test]
async fn solve_a_quadratic() {
    let (status, body) = solve("x^2 - 5*x + 6 = 0").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "solution": "[2, 3]" }));
}

#[tokio::test]
async fn complex_roots() {
    let (status, body) = solve("x^2 + 1 = 0").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "solution": "[-I, I]" }));
}

#[tokio::test]
async fn higher_degree_polynomials() {
    let inputs = vec![
        ("x^4 - 5*x^2 + 6 = 0", "[-sqrt(2), sqrt(2), -sqrt(3), sqrt(3)]"),
        ("x^4 = 4", "[-sqrt(2), sqrt(2), -sqrt(2)*I, sqrt(2)*I]"),
        (
            "x^6 - 1 = 0",
            "[-1, 1, 1/2 - sqrt(3)*I/2, 1/2 + sqrt(3)*I/2, \
             -1/2 - sqrt(3)*I/2, -1/2 + sqrt(3)*I/2]",
        ),
    ];

    for (equation, solution) in inputs {
        let (status, body) = solve(equation).await;

        assert_eq!(status, StatusCode::OK, "{}", equation);
        assert_eq!(body, json!({ "solution": solution }));
    }
}

#[tokio::test]
async fn cubics_are_solved_in_radicals() {
    let (status, body) = solve("x^3 - 3*x + 1 = 0").await;

    assert_eq!(status, StatusCode::OK);
    let solution = body["solution"].as_str().unwrap();
    assert!(solution.contains("^(1/3)"), "{}", solution);
    assert_eq!(solution.matches(", ").count(), 2, "{}", solution);
}

#[tokio::test]
async fn missing_equals_sign_means_equal_to_zero() {
    let (status, body) = solve("x - 5").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "solution": "[5]" }));
}

#[tokio::test]
async fn identities_hold_for_every_value() {
    let (status, body) = solve("x = x").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "solution": "Complexes" }));
}

#[tokio::test]
async fn contradictions_have_no_solutions() {
    let (status, body) = solve("x + 1 = x + 2").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "solution": "[]" }));
}

#[tokio::test]
async fn disallowed_names_are_rejected() {
    for equation in &["__import__('os') = 0", "y = 2", "exp(x) = 1"] {
        let (status, body) = solve(equation).await;

        assert_eq!(status, StatusCode::BAD_REQUEST, "{}", equation);
        let message = body["error"].as_str().unwrap();
        assert!(
            message.starts_with("Disallowed name in equation"),
            "{}",
            message
        );
    }
}

#[tokio::test]
async fn syntax_errors_are_rejected() {
    let (status, body) = solve("x + = 2").await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    let message = body["error"].as_str().unwrap();
    assert!(message.starts_with("Syntax error in equation"), "{}", message);
}

#[tokio::test]
async fn unsolvable_equations_are_rejected() {
    let (status, body) = solve("x^5 - x - 1 = 0").await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    let message = body["error"].as_str().unwrap();
    assert!(
        message.starts_with("Unable to solve the equation"),
        "{}",
        message
    );
}

#[tokio::test]
async fn missing_equations() {
    let inputs = vec![
        (Body::empty(), "No equation provided"),
        (Body::from("{}"), "No equation provided"),
        (Body::from("not json"), "No equation provided"),
        (Body::from(r#"{"equation": 7}"#), "No equation provided"),
        (Body::from(r#"{"equation": ""}"#), "Empty equation provided"),
        (Body::from(r#"{"equation": "   "}"#), "Empty equation provided"),
    ];

    for (body, message) in inputs {
        let (status, got) = post(app(), body).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(got, json!({ "error": message }));
    }
}

#[tokio::test]
async fn running_out_of_time_doesnt_block_other_requests() {
    let app = server::router(Config {
        solve_timeout: Some(Duration::from_millis(0)),
        ..Config::default()
    });

    let (status, body) = post(
        app.clone(),
        json!({ "equation": "(x + 1)^256 * (x - 1)^256 = 0" }).to_string(),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, json!({ "error": "Computation timed out" }));

    let (status, body) = health(app).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "status": "ok" }));
}

#[tokio::test]
async fn oversized_equations_are_rejected_without_crashing() {
    let app = app();
    let deep = format!("{}x{} = 1", "(".repeat(10_000), ")".repeat(10_000));
    let long = format!("{} = 1", vec!["x"; 20_000].join(" + "));
    let nested = format!("{}x{} = 1", "(".repeat(300), ")".repeat(300));

    for equation in [deep, long, nested] {
        let (status, body) =
            post(app.clone(), json!({ "equation": equation }).to_string())
                .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        let message = body["error"].as_str().unwrap();
        assert!(message.starts_with("Syntax error in equation"), "{}", message);
    }

    let (status, _) = health(app.clone()).await;
    assert_eq!(status, StatusCode::OK);

    let (status, body) =
        post(app, json!({ "equation": "x = 1" }).to_string()).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "solution": "[1]" }));
}

#[tokio::test]
async fn concurrent_requests_are_independent() {
    let app = app();

    let (first, second) = tokio::join!(
        post(app.clone(), json!({ "equation": "x = 1" }).to_string()),
        post(app.clone(), json!({ "equation": "x = 2" }).to_string()),
    );

    assert_eq!(first.1, json!({ "solution": "[1]" }));
    assert_eq!(second.1, json!({ "solution": "[2]" }));
}
