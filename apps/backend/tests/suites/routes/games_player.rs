use std::sync::Arc;

use actix_web::http::StatusCode;
use actix_web::test;
use backend_test_support::problem_details::assert_problem_details_from_service_response;
use backend_test_support::unique::unique_str;
use backend_test_support::FakeGameService;
use games_backend::middleware::structured_logger::LoggedGame;
use games_backend::repos::users::{InMemoryUserStore, UserStore};

use crate::common::json_body;
use crate::support::app_builder::create_test_app;
use crate::support::auth::bearer;
use crate::support::game_process::{build_with_fake, state_with_fake};

const STARTED: &str = r#"{"game_id":"from-process","game_type":"PD","status":"in_progress","player1_points":0,"player2_points":0,"round":1}"#;

#[actix_web::test]
async fn start_game_runs_process_and_sets_current_game() {
    let fake = FakeGameService::new();
    fake.respond_ok(STARTED);
    let state = build_with_fake(&fake);
    let users = state.users.clone();
    let app = create_test_app(state).with_prod_routes().build().await;

    let sub = unique_str("player");
    let req = test::TestRequest::post()
        .uri("/games/start?gameType=PD&player1_type=human&player2_type=bot&researcherId=r1")
        .insert_header(bearer(&sub))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let body = json_body(&test::read_body(resp).await);
    assert_eq!(body["status"], "in_progress");
    assert_eq!(body["round"], 1, "unknown fields pass through");

    let args = fake.recorded_args();
    assert_eq!(args[0], fake.script_path().display().to_string());
    assert_eq!(args[1], "-game_id");
    let game_id = args[2].clone();
    assert_eq!(
        &args[3..],
        &[
            "-game_type",
            "PD",
            "-player1_type",
            "human",
            "-player2_type",
            "bot",
            "-researcher_id",
            "r1"
        ]
    );

    let user = users.find_by_sub(&sub).expect("user provisioned");
    assert_eq!(user.current_game_id.as_deref(), Some(game_id.as_str()));
}

#[actix_web::test]
async fn start_game_passes_optional_settings() {
    let fake = FakeGameService::new();
    fake.respond_ok(STARTED);
    let app = create_test_app(build_with_fake(&fake))
        .with_prod_routes()
        .build()
        .await;

    let req = test::TestRequest::post()
        .uri("/games/start?gameType=UG&player1_type=human&player2_type=bot&researcherId=r2&num_rounds=5&endowment=10")
        .insert_header(bearer(&unique_str("player")))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let args = fake.recorded_args();
    let tail = &args[args.len() - 4..];
    assert_eq!(tail, &["-num_rounds", "5", "-endowment", "10"]);
}

#[actix_web::test]
async fn move_targets_current_game_as_player_one() {
    let fake = FakeGameService::new();
    fake.respond_ok(STARTED);
    let app = create_test_app(build_with_fake(&fake))
        .with_prod_routes()
        .build()
        .await;
    let sub = unique_str("player");

    let start = test::TestRequest::post()
        .uri("/games/start?gameType=PD&player1_type=human&player2_type=bot&researcherId=r1")
        .insert_header(bearer(&sub))
        .to_request();
    assert_eq!(test::call_service(&app, start).await.status(), StatusCode::OK);
    let game_id = fake.recorded_args()[2].clone();

    fake.respond_ok(r#"{"status":"in_progress","gameState":{"winner":null,"payoff1":3,"payoff2":3}}"#);
    let mv = test::TestRequest::post()
        .uri("/games/move?move=cooperate")
        .insert_header(bearer(&sub))
        .to_request();
    let resp = test::call_service(&app, mv).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let body = json_body(&test::read_body(resp).await);
    assert_eq!(body["gameState"]["payoff1"], 3);

    let args = fake.recorded_args();
    assert_eq!(
        &args[1..],
        &[
            "-game_id",
            game_id.as_str(),
            "-make_move",
            "cooperate",
            "-player_move",
            "player1"
        ]
    );
}

#[actix_web::test]
async fn move_without_current_game_is_conflict() {
    let fake = FakeGameService::new();
    let app = create_test_app(build_with_fake(&fake))
        .with_prod_routes()
        .build()
        .await;

    let req = test::TestRequest::post()
        .uri("/games/move?move=defect")
        .insert_header(bearer(&unique_str("player")))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_problem_details_from_service_response(
        resp,
        "NO_ACTIVE_GAME",
        StatusCode::CONFLICT,
        Some("start a game"),
    )
    .await;
    assert!(!fake.was_invoked());
}

#[actix_web::test]
async fn quit_deletes_game_and_clears_current_game() {
    let fake = FakeGameService::new();
    fake.respond_ok(STARTED);
    let state = build_with_fake(&fake);
    let users = state.users.clone();
    let app = create_test_app(state).with_prod_routes().build().await;
    let sub = unique_str("player");

    let start = test::TestRequest::post()
        .uri("/games/start?gameType=PD&player1_type=human&player2_type=bot&researcherId=r1")
        .insert_header(bearer(&sub))
        .to_request();
    assert_eq!(test::call_service(&app, start).await.status(), StatusCode::OK);
    let game_id = fake.recorded_args()[2].clone();

    fake.respond_ok(r#"{"status":"deleted"}"#);
    let quit = test::TestRequest::post()
        .uri("/games/quit")
        .insert_header(bearer(&sub))
        .to_request();
    let resp = test::call_service(&app, quit).await;
    assert_eq!(resp.status(), StatusCode::OK);

    assert_eq!(
        &fake.recorded_args()[1..],
        &["-game_id", game_id.as_str(), "-delete_game"]
    );
    assert!(users.find_by_sub(&sub).unwrap().current_game_id.is_none());
}

#[actix_web::test]
async fn invalid_start_parameters_never_reach_process() {
    let fake = FakeGameService::new();
    let app = create_test_app(build_with_fake(&fake))
        .with_prod_routes()
        .build()
        .await;

    let req = test::TestRequest::post()
        .uri("/games/start?gameType=PD&player1_type=-delete_game&player2_type=bot&researcherId=r1")
        .insert_header(bearer(&unique_str("player")))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_problem_details_from_service_response(
        resp,
        "VALIDATION_ERROR",
        StatusCode::BAD_REQUEST,
        Some("player1_type"),
    )
    .await;
    assert!(!fake.was_invoked());
}

#[actix_web::test]
async fn missing_researcher_id_is_validation_error() {
    let fake = FakeGameService::new();
    let app = create_test_app(build_with_fake(&fake))
        .with_prod_routes()
        .build()
        .await;

    let req = test::TestRequest::post()
        .uri("/games/start?gameType=PD&player1_type=human&player2_type=bot")
        .insert_header(bearer(&unique_str("player")))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_problem_details_from_service_response(
        resp,
        "VALIDATION_ERROR",
        StatusCode::BAD_REQUEST,
        Some("researcher_id"),
    )
    .await;
}

#[actix_web::test]
async fn unknown_user_without_provisioning_is_not_found() {
    let fake = FakeGameService::new();
    let state = state_with_fake(&fake)
        .with_auto_provision_users(false)
        .build()
        .unwrap();
    let app = create_test_app(state).with_prod_routes().build().await;

    let req = test::TestRequest::post()
        .uri("/games/quit")
        .insert_header(bearer(&unique_str("stranger")))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_problem_details_from_service_response(
        resp,
        "USER_NOT_FOUND",
        StatusCode::NOT_FOUND,
        None,
    )
    .await;
}

#[actix_web::test]
async fn seeded_user_moves_in_existing_game_without_provisioning() {
    let fake = FakeGameService::new();
    let sub = unique_str("seeded");
    let store = Arc::new(InMemoryUserStore::new());
    store.ensure_user(&sub, None);
    store.set_current_game(&sub, Some("g-seeded"));

    let state = state_with_fake(&fake)
        .with_users(store.clone())
        .with_auto_provision_users(false)
        .build()
        .unwrap();
    let app = create_test_app(state).with_prod_routes().build().await;

    fake.respond_ok(r#"{"status":"in_progress"}"#);
    let req = test::TestRequest::post()
        .uri("/games/move?move=defect")
        .insert_header(bearer(&sub))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(
        resp.response().extensions().get::<LoggedGame>(),
        Some(&LoggedGame("g-seeded".to_string()))
    );

    assert_eq!(&fake.recorded_args()[1..3], &["-game_id", "g-seeded"]);
    assert_eq!(store.len(), 1);
}
