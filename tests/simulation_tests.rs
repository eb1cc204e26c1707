//! End-to-end runs: script text in, report text out.

use wizard_league::core::{GameError, Limits, TeamId};
use wizard_league::script::{parse_script, Verdict};
use wizard_league::sim::{report_script, run_script, Simulation};

const HEADER: &str = "\
2
Gandalf
Saruman
4
Frodo
0
120
True
Sam
0
80
False
Orc
1
300
True
Troll
1
100
True
";

fn with_actions(actions: &[&str]) -> String {
    let mut text = HEADER.to_string();
    for action in actions {
        text.push_str(action);
        text.push('\n');
    }
    text
}

fn report(text: &str) -> String {
    report_script(text, &Limits::default()).to_text()
}

#[test]
fn test_full_game_report() {
    let text = with_actions(&[
        "attack Sam Orc",
        "attack Frodo Orc",
        "heal Frodo Sam",
        "flip_visibility Sam",
        "heal Sam Orc",
        "heal Sam Sam",
        "super Orc Troll",
        "super S_0 S_0",
    ]);

    assert_eq!(
        report(&text),
        "This player can't play\n\
         This player is frozen\n\
         Both players should be from the same team\n\
         The player cannot heal itself\n\
         The player cannot do super action with itself\n\
         The chosen wizard is Saruman\n"
    );

    let outcome = run_script(&text, &Limits::default()).unwrap();
    let standings = outcome.standings.as_ref().unwrap();
    assert_eq!(standings.power_of(TeamId::new(0)), Some(80));
    assert_eq!(standings.power_of(TeamId::new(1)), Some(580));
    let names: Vec<_> = outcome.roster.iter().map(|p| p.name()).collect();
    assert_eq!(names, vec!["Frodo", "S_0", "Sam"]);
}

#[test]
fn test_no_actions_verdict() {
    assert_eq!(report(HEADER), "The chosen wizard is Saruman\n");
}

#[test]
fn test_tie() {
    let text = "2\nMerlin\nMorgana\n2\nArt\n0\n100\nTrue\nMord\n1\n100\nFalse\n";
    assert_eq!(report(text), "It's a tie\n");

    let outcome = run_script(text, &Limits::default()).unwrap();
    assert_eq!(outcome.verdict(), Verdict::Tie);
    assert_eq!(outcome.winner_name(), None);
}

#[test]
fn test_single_team_leader_wins() {
    let text = "1\nMerlin\n2\nArt\n0\n0\nTrue\nBors\n0\n0\nFalse\nattack Art Bors\n";
    assert_eq!(report(text), "This player is frozen\nThe chosen wizard is Merlin\n");

    let outcome = run_script(text, &Limits::default()).unwrap();
    assert!(outcome.standings.is_none());

    let json = report_script(text, &Limits::default()).to_json().unwrap();
    let value: serde_json::Value = serde_json::from_str(&json).unwrap();
    assert_eq!(value["verdict"]["leader"], "Merlin");
    assert_eq!(value["standings"].as_array().map(Vec::len), Some(0));
}

#[test]
fn test_unknown_player_discards_diagnostics() {
    let text = with_actions(&["attack Sam Orc", "attack Frodo Gollum", "heal Sam Sam"]);
    assert_eq!(report(&text), "Invalid inputs\n");

    assert!(matches!(
        run_script(&text, &Limits::default()),
        Err(GameError::ActionRejected { line: 22 })
    ));
}

#[test]
fn test_removed_players_are_unknown() {
    let text = with_actions(&["super Orc Troll", "attack Orc Frodo"]);
    assert_eq!(report(&text), "Invalid inputs\n");
}

#[test]
fn test_structural_errors() {
    let duplicate = "1\nMerlin\n2\nArt\n0\n1\nTrue\nArt\n0\n2\nTrue\n";
    assert!(matches!(
        run_script(duplicate, &Limits::default()),
        Err(GameError::DuplicatePlayer(name)) if name == "Art"
    ));

    let cases = [
        duplicate.to_string(),
        with_actions(&["attack Sam  Orc"]),
        with_actions(&["cast Sam Orc"]),
        with_actions(&["flip_visibility"]),
        format!("{}\n", HEADER),
        HEADER.replace("Saruman", "saruman"),
        HEADER.replace("120", "1200"),
        HEADER.replace("False", "false"),
        String::new(),
    ];
    for text in &cases {
        assert_eq!(report(text), "Invalid inputs\n", "{:?}", text);
    }
}

/// Numeric lines with surrounding spaces are not numbers.
#[test]
fn test_padded_numbers_are_invalid() {
    let text = "2\nMerlin\nMorgana\n 2 \nArt\n0 \n500\nTrue\nMord\n1\n 300\nTrue\n";
    assert_eq!(report(text), "Invalid inputs\n");

    let clean = text.replace(" 2 ", "2").replace("0 ", "0").replace(" 300", "300");
    assert_eq!(report(&clean), "The chosen wizard is Merlin\n");
}

#[test]
fn test_action_ceiling() {
    let flips = vec!["flip_visibility Sam"; 1000];
    let text = with_actions(&flips);
    assert_eq!(report(&text), "The chosen wizard is Saruman\n");

    let text = format!("{}flip_visibility Sam\n", text);
    assert_eq!(report(&text), "Invalid inputs\n");

    let small = Limits::default().with_max_actions(10);
    assert!(matches!(
        run_script(&text, &small),
        Err(GameError::TooManyActions { max: 10 })
    ));
}

#[test]
fn test_missing_final_newline() {
    let mut text = with_actions(&["heal Sam Sam"]);
    text.pop();
    assert_eq!(report(&text), "This player can't play\nThe chosen wizard is Saruman\n");
}

#[test]
fn test_step_by_step_matches_batch() {
    let text = with_actions(&["attack Frodo Troll", "heal Frodo Sam", "super Orc Troll"]);
    let script = parse_script(&text, &Limits::default()).unwrap();

    let mut sim = Simulation::from_script(&script, Limits::default()).unwrap();
    for entry in &script.actions {
        sim.step(entry.line, &entry.action).unwrap();
    }
    let stepped = sim.finish();

    let batch = run_script(&text, &Limits::default()).unwrap();
    assert_eq!(stepped, batch);
}

#[test]
fn test_json_report() {
    let text = with_actions(&["attack Frodo Orc"]);
    let json = report_script(&text, &Limits::default()).to_json().unwrap();
    let value: serde_json::Value = serde_json::from_str(&json).unwrap();

    assert_eq!(value["verdict"]["leader"], "Saruman");
    assert_eq!(value["standings"][0]["team"], 1);
    assert_eq!(value["standings"][0]["power"], 580);
    assert_eq!(value["roster"].as_array().map(Vec::len), Some(4));

    let invalid = report_script("0\n", &Limits::default()).to_json().unwrap();
    let value: serde_json::Value = serde_json::from_str(&invalid).unwrap();
    assert!(value["verdict"].is_null());
    assert!(value["error"].as_str().unwrap().contains("team count"));
}
