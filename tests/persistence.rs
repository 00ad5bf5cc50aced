//! Integration tests for snapshots: stores, export/import and the CSV standings export.

use rand::rngs::StdRng;
use rand::SeedableRng;
use tournament_manager::{
    export_json, import_into, import_json, record_score, standings_csv, start_tournament,
    JsonFileStore, MemoryStore, MatchKind, NextMatch, Slot, StateStore, Team, Tournament,
    TournamentConfig, TournamentError, TournamentType,
};

fn played_tournament(tournament_type: TournamentType) -> Tournament {
    let mut rng = StdRng::seed_from_u64(11);
    let teams = (0..5).map(|i| Team::new(format!("Team {i}"))).collect();
    let config = TournamentConfig {
        name: "Club night".to_string(),
        tournament_type,
        create_final: true,
        ..Default::default()
    };
    let mut t = Tournament::with_teams(teams, config);
    start_tournament(&mut t, &mut rng).unwrap();
    let ids: Vec<_> = t
        .ledger
        .matches()
        .iter()
        .filter(|m| !m.completed && m.team_a.team_id().is_some() && m.team_b.team_id().is_some())
        .map(|m| m.id.clone())
        .collect();
    for (i, id) in ids.iter().take(3).enumerate() {
        record_score(&mut t, id, Some(11), Some(i as i32), &mut rng);
    }
    t
}

#[test]
fn export_import_round_trip() {
    for kind in [TournamentType::RoundRobin, TournamentType::Elimination] {
        let t = played_tournament(kind);
        let json = export_json(&t).unwrap();
        assert_eq!(import_json(&json).unwrap(), t);
    }
}

#[test]
fn imported_ledger_still_resolves_ids() {
    let t = played_tournament(TournamentType::Elimination);
    let imported = import_json(&export_json(&t).unwrap()).unwrap();
    let first = &t.ledger.matches()[0];
    assert_eq!(imported.ledger.get(&first.id), Some(first));
    assert!(imported.ledger.terminal_match().is_some());
}

#[test]
fn malformed_import_leaves_state_untouched() {
    let mut t = played_tournament(TournamentType::RoundRobin);
    let before = t.clone();

    let err = import_into(&mut t, "{ not json").unwrap_err();
    assert!(matches!(err, TournamentError::MalformedImport(_)));
    assert_eq!(t, before);

    // Well-formed JSON that references a team nobody registered.
    let mut other = played_tournament(TournamentType::RoundRobin);
    other.teams.remove(0);
    let json = export_json(&other).unwrap();
    assert!(matches!(import_into(&mut t, &json), Err(TournamentError::MalformedImport(_))));
    assert_eq!(t, before);
}

/// Export `source` with the bracket link of `from` pointed at `to`.
fn export_with_link(source: &Tournament, from: &str, to: &str) -> String {
    let mut edited = source.clone();
    edited.ledger.get_mut(from).unwrap().kind = MatchKind::Elimination {
        next: Some(NextMatch {
            match_id: to.to_string(),
            slot: Slot::B,
        }),
    };
    export_json(&edited).unwrap()
}

#[test]
fn bracket_links_must_lead_to_the_next_round() {
    let mut t = played_tournament(TournamentType::Elimination);
    let before = t.clone();

    // Self link, a cycle within the first round, a backwards link from the final,
    // and a jump that skips a round.
    let bad_links = [
        ("r1_m0", "r1_m0"),
        ("r1_m0", "r1_m1"),
        ("r3_m0", "r1_m0"),
        ("r1_m0", "r3_m0"),
    ];
    for (from, to) in bad_links {
        let json = export_with_link(&before, from, to);
        let err = import_into(&mut t, &json).unwrap_err();
        assert!(matches!(err, TournamentError::MalformedImport(_)), "{from} -> {to}");
        assert_eq!(t, before);
    }

    // Re-pointing at another match of the following round is still a valid bracket shape.
    let json = export_with_link(&before, "r1_m0", "r2_m1");
    assert!(import_json(&json).is_ok());
}

#[test]
fn links_into_round_robin_matches_are_rejected() {
    let mut rr = played_tournament(TournamentType::RoundRobin);
    let before = rr.clone();
    let first = rr.ledger.matches()[0].id.clone();
    let json = export_with_link(&before, &first, &first);
    assert!(matches!(import_into(&mut rr, &json), Err(TournamentError::MalformedImport(_))));
    assert_eq!(rr, before);
}

#[test]
fn import_replaces_whole_state() {
    let mut t = Tournament::default();
    let source = played_tournament(TournamentType::Elimination);
    import_into(&mut t, &export_json(&source).unwrap()).unwrap();
    assert_eq!(t, source);
}

#[test]
fn memory_store_round_trip() {
    let mut store = MemoryStore::new();
    assert_eq!(store.load().unwrap(), None);

    let t = played_tournament(TournamentType::RoundRobin);
    store.save(&t).unwrap();
    assert_eq!(store.load().unwrap(), Some(t));

    store.clear().unwrap();
    assert_eq!(store.load().unwrap(), None);
}

#[test]
fn file_store_round_trip() {
    let path = std::env::temp_dir().join(format!("tournament-{}.json", uuid::Uuid::new_v4()));
    let mut store = JsonFileStore::new(&path);
    assert_eq!(store.load().unwrap(), None);

    let t = played_tournament(TournamentType::Elimination);
    store.save(&t).unwrap();
    assert_eq!(store.load().unwrap(), Some(t));

    store.clear().unwrap();
    assert!(!path.exists());
    assert_eq!(store.load().unwrap(), None);
}

#[test]
fn standings_csv_has_header_and_one_row_per_team() {
    let t = played_tournament(TournamentType::RoundRobin);
    let csv = standings_csv(&t).unwrap();
    let mut lines = csv.lines();
    assert_eq!(
        lines.next(),
        Some("rank,team,played,wins,losses,ties,points_for,points_against,point_diff")
    );
    assert_eq!(lines.count(), 5);
}
