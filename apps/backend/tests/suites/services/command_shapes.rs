use games_backend::errors::GameServiceError;
use games_backend::services::games::{GameService, NewGame};

use crate::support::game_process::scripted_config;

fn service() -> GameService {
    GameService::new(scripted_config())
}

fn new_game() -> NewGame {
    NewGame {
        game_type: "PD".to_string(),
        player1_type: "human".to_string(),
        player2_type: "bot".to_string(),
        researcher_id: "r1".to_string(),
        num_rounds: None,
        endowment: None,
    }
}

#[test]
fn start_without_optionals_ends_with_researcher() {
    let command = service().start_game_command("g-1", &new_game()).unwrap();
    assert_eq!(
        command.tokens(),
        &[
            "python",
            "/srv/games/game_service.py",
            "-game_id",
            "g-1",
            "-game_type",
            "PD",
            "-player1_type",
            "human",
            "-player2_type",
            "bot",
            "-researcher_id",
            "r1",
        ]
    );
}

#[test]
fn start_optionals_follow_required_flags() {
    let mut game = new_game();
    game.num_rounds = Some("10".to_string());
    game.endowment = Some("2.5".to_string());

    let command = service().start_game_command("g-1", &game).unwrap();
    let tokens = command.tokens();
    assert_eq!(
        &tokens[tokens.len() - 6..],
        &["-researcher_id", "r1", "-num_rounds", "10", "-endowment", "2.5"]
    );
}

#[test]
fn endowment_alone_is_passed() {
    let mut game = new_game();
    game.endowment = Some("100".to_string());

    let command = service().start_game_command("g-1", &game).unwrap();
    let tokens = command.tokens();
    assert!(!tokens.iter().any(|t| t == "-num_rounds"));
    assert_eq!(&tokens[tokens.len() - 2..], &["-endowment", "100"]);
}

#[test]
fn empty_optionals_are_omitted() {
    let mut game = new_game();
    game.num_rounds = Some(String::new());
    game.endowment = Some(String::new());

    let command = service().start_game_command("g-1", &game).unwrap();
    assert_eq!(command.tokens().last().map(String::as_str), Some("r1"));
}

#[test]
fn rejects_bad_round_count() {
    for bad in ["0", "-3", "ten", "1.5"] {
        let mut game = new_game();
        game.num_rounds = Some(bad.to_string());
        let err = service().start_game_command("g-1", &game).unwrap_err();
        assert!(
            matches!(
                err,
                GameServiceError::InvalidArgument {
                    field: "num_rounds",
                    ..
                }
            ),
            "{bad}: {err}"
        );
    }
}

#[test]
fn move_command_plays_as_player_one() {
    let command = service().make_move_command("g-7", "-2.5").unwrap();
    assert_eq!(
        command.args(),
        &[
            "/srv/games/game_service.py",
            "-game_id",
            "g-7",
            "-make_move",
            "-2.5",
            "-player_move",
            "player1",
        ]
    );
}

#[test]
fn move_rejects_flag_like_values() {
    let err = service().make_move_command("g-7", "-delete_game").unwrap_err();
    assert!(matches!(
        err,
        GameServiceError::InvalidArgument { field: "move", .. }
    ));
}

#[test]
fn quit_command_deletes_game() {
    let command = service().quit_game_command("g-7").unwrap();
    assert_eq!(
        command.args(),
        &["/srv/games/game_service.py", "-game_id", "g-7", "-delete_game"]
    );
}

#[test]
fn analytics_command_with_and_without_type() {
    let all = service().game_analytics_command(None).unwrap();
    assert_eq!(all.args(), &["/srv/games/game_service.py", "-retrieve_game_data"]);

    let empty = service().game_analytics_command(Some("")).unwrap();
    assert_eq!(empty, all);

    let typed = service().game_analytics_command(Some("UG")).unwrap();
    assert_eq!(
        typed.args(),
        &[
            "/srv/games/game_service.py",
            "-retrieve_game_data",
            "-game_data_type",
            "UG",
        ]
    );
}

#[test]
fn games_command_filters_by_researcher() {
    let command = service().games_command("lab-4").unwrap();
    assert_eq!(
        command.to_string(),
        "python /srv/games/game_service.py -retrieve_game_data -researcher_id lab-4"
    );
}

#[test]
fn points_command_wraps_id_in_quotes() {
    let command = service().game_points_command("g-9").unwrap();
    assert_eq!(
        command.args(),
        &[
            "/srv/games/game_service.py",
            "-retrieve_game_points",
            "-game_id",
            "\"g-9\"",
        ]
    );
}

#[test]
fn identifiers_with_whitespace_are_rejected() {
    assert!(service().games_command("r1 -delete_game").is_err());
    assert!(service().game_points_command("").is_err());
    assert!(service().quit_game_command("g\n1").is_err());
}
