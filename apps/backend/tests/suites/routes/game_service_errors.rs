use actix_web::http::StatusCode;
use actix_web::test;
use backend_test_support::problem_details::assert_problem_details_from_service_response;
use backend_test_support::FakeGameService;
use games_backend::game_process::GameProcessConfig;
use games_backend::state::builder::build_state;

use crate::common::request_id;
use crate::support::app_builder::create_test_app;
use crate::support::auth;
use crate::support::game_process::build_with_fake;

#[actix_web::test]
async fn non_zero_exit_is_rejected_without_leaking_output() {
    let fake = FakeGameService::new();
    fake.respond(2, "", "Traceback: secret internals");
    let app = create_test_app(build_with_fake(&fake))
        .with_prod_routes()
        .build()
        .await;

    let req = test::TestRequest::get()
        .uri("/games/getGamePoints?gameId=g-1")
        .to_request();
    let resp = test::call_service(&app, req).await;

    let problem = assert_problem_details_from_service_response(
        resp,
        "GAME_SERVICE_REJECTED",
        StatusCode::BAD_REQUEST,
        Some("exit 2"),
    )
    .await;
    assert!(!problem.detail.contains("Traceback"));
}

#[actix_web::test]
async fn non_json_output_is_bad_gateway() {
    let fake = FakeGameService::new();
    fake.respond_ok("game saved\n");
    let app = create_test_app(build_with_fake(&fake))
        .with_prod_routes()
        .build()
        .await;

    let req = test::TestRequest::get()
        .uri("/games/getGames?researcherId=r1")
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_problem_details_from_service_response(
        resp,
        "GAME_SERVICE_MALFORMED",
        StatusCode::BAD_GATEWAY,
        None,
    )
    .await;
}

#[actix_web::test]
async fn csv_of_scalar_document_is_bad_gateway() {
    let fake = FakeGameService::new();
    fake.respond_ok("42");
    let app = create_test_app(build_with_fake(&fake))
        .with_prod_routes()
        .build()
        .await;

    let req = test::TestRequest::get()
        .uri("/games/getGamesCsv?researcherId=r1")
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_problem_details_from_service_response(
        resp,
        "GAME_SERVICE_MALFORMED",
        StatusCode::BAD_GATEWAY,
        None,
    )
    .await;
}

#[actix_web::test]
async fn missing_interpreter_is_unavailable() {
    let state = build_state()
        .with_security(auth::security())
        .with_game_process(GameProcessConfig::new(
            "definitely-not-an-interpreter-7f3a",
            "game_service.py",
        ))
        .build()
        .unwrap();
    let app = create_test_app(state).with_prod_routes().build().await;

    let req = test::TestRequest::get()
        .uri("/games/getGameAnalytics")
        .to_request();
    let resp = test::call_service(&app, req).await;
    let request_id = request_id(&resp);

    let problem = assert_problem_details_from_service_response(
        resp,
        "GAME_SERVICE_UNAVAILABLE",
        StatusCode::SERVICE_UNAVAILABLE,
        None,
    )
    .await;
    assert_eq!(problem.trace_id, request_id);
    assert!(!problem.detail.contains("definitely-not-an-interpreter"));
}
