//! Integration tests for round-robin: schedule generation, scoring and standings.

use rand::rngs::StdRng;
use rand::SeedableRng;
use std::collections::{HashMap, HashSet};
use tournament_manager::logic::{generate_round_robin_matches, LOSER_PHRASES, WINNER_PHRASES};
use tournament_manager::{
    calculate_standings, champion, clear_score, record_score, start_tournament,
    tournament_standings, Champion, OrderingPolicy, RoundLabel, Team, TeamId, TeamSlot,
    Tournament, TournamentConfig, TournamentError, TournamentState,
};

fn rng() -> StdRng {
    StdRng::seed_from_u64(7)
}

fn teams(n: usize) -> Vec<Team> {
    (0..n).map(|i| Team::new(format!("T{i}"))).collect()
}

fn started(n: usize, config: TournamentConfig) -> Tournament {
    let mut t = Tournament::with_teams(teams(n), config);
    start_tournament(&mut t, &mut rng()).unwrap();
    t
}

fn match_between(t: &Tournament, a: TeamId, b: TeamId) -> String {
    t.ledger
        .matches()
        .iter()
        .find(|m| {
            let pair = (m.team_a, m.team_b);
            pair == (TeamSlot::Team(a), TeamSlot::Team(b))
                || pair == (TeamSlot::Team(b), TeamSlot::Team(a))
        })
        .map(|m| m.id.clone())
        .unwrap()
}

/// Record a result as "a scored `sa`, b scored `sb`" regardless of slot order.
fn play(t: &mut Tournament, a: TeamId, b: TeamId, sa: i32, sb: i32) {
    let id = match_between(t, a, b);
    let m = t.ledger.get(&id).unwrap();
    let (x, y) = if m.team_a == TeamSlot::Team(a) { (sa, sb) } else { (sb, sa) };
    assert!(record_score(t, &id, Some(x), Some(y), &mut rng()));
}

#[test]
fn start_requires_at_least_2_teams() {
    let mut t = Tournament::with_teams(teams(1), TournamentConfig::default());
    assert_eq!(
        start_tournament(&mut t, &mut rng()),
        Err(TournamentError::NotEnoughTeams { required: 2 })
    );
    assert_eq!(t.state, TournamentState::Setup);
    assert!(t.ledger.is_empty());
}

#[test]
fn schedule_size_and_pair_uniqueness_per_cycle() {
    for n in 2..=7 {
        for cycles in 1..=3 {
            let list = teams(n);
            let matches = generate_round_robin_matches(&list, cycles, true, &mut rng()).unwrap();
            assert_eq!(matches.len(), cycles as usize * n * (n - 1) / 2);

            for c in 1..=cycles {
                let pairs: Vec<_> = matches
                    .iter()
                    .filter(|m| m.round == RoundLabel::Cycle(c))
                    .map(|m| {
                        let (a, b) = (m.team_a.team_id().unwrap(), m.team_b.team_id().unwrap());
                        if a < b { (a, b) } else { (b, a) }
                    })
                    .collect();
                let unique: HashSet<_> = pairs.iter().copied().collect();
                assert_eq!(pairs.len(), n * (n - 1) / 2);
                assert_eq!(unique.len(), pairs.len());
            }
        }
    }
}

#[test]
fn match_ids_encode_cycle_and_index() {
    let list = teams(3);
    let matches = generate_round_robin_matches(&list, 2, false, &mut rng()).unwrap();
    let ids: Vec<_> = matches.iter().map(|m| m.id.as_str()).collect();
    assert_eq!(ids, ["m_1_0", "m_1_1", "m_1_2", "m_2_0", "m_2_1", "m_2_2"]);
}

#[test]
fn unshuffled_pairs_follow_registry_order() {
    let list = teams(3);
    let matches = generate_round_robin_matches(&list, 1, false, &mut rng()).unwrap();
    let pairs: Vec<_> = matches.iter().map(|m| (m.team_a, m.team_b)).collect();
    assert_eq!(
        pairs,
        [
            (TeamSlot::Team(list[0].id), TeamSlot::Team(list[1].id)),
            (TeamSlot::Team(list[0].id), TeamSlot::Team(list[2].id)),
            (TeamSlot::Team(list[1].id), TeamSlot::Team(list[2].id)),
        ]
    );
}

#[test]
fn three_teams_one_cycle_gives_all_pairs() {
    let t = started(3, TournamentConfig::default());
    assert_eq!(t.state, TournamentState::Active);
    assert_eq!(t.ledger.len(), 3);
    let ids: Vec<_> = t.teams.iter().map(|x| x.id).collect();
    for i in 0..3 {
        for j in i + 1..3 {
            match_between(&t, ids[i], ids[j]);
        }
    }
}

#[test]
fn scoring_updates_standings_and_commentary() {
    let mut t = started(2, TournamentConfig::default());
    let (x, y) = (t.teams[0].id, t.teams[1].id);
    play(&mut t, x, y, 11, 5);

    let id = match_between(&t, x, y);
    let m = t.ledger.get(&id).unwrap().clone();
    assert!(m.completed);
    let (x_line, y_line) = if m.team_a == TeamSlot::Team(x) {
        (m.commentary_a.clone().unwrap(), m.commentary_b.clone().unwrap())
    } else {
        (m.commentary_b.clone().unwrap(), m.commentary_a.clone().unwrap())
    };
    assert!(WINNER_PHRASES.contains(&x_line.as_str()));
    assert!(LOSER_PHRASES.contains(&y_line.as_str()));

    let standings: HashMap<_, _> = tournament_standings(&t)
        .into_iter()
        .map(|s| (s.team_id, s))
        .collect();
    let sx = &standings[&x];
    assert_eq!((sx.wins, sx.losses, sx.point_diff), (1, 0, 6));
    assert_eq!((sx.points_for, sx.points_against), (11, 5));
    let sy = &standings[&y];
    assert_eq!((sy.wins, sy.losses, sy.point_diff), (0, 1, -6));
    assert_eq!((sy.points_for, sy.points_against), (5, 11));
}

#[test]
fn commentary_is_stable_until_cleared() {
    let mut t = started(2, TournamentConfig::default());
    let id = t.ledger.matches()[0].id.clone();
    record_score(&mut t, &id, Some(11), Some(5), &mut rng());
    let first = t.ledger.get(&id).unwrap().commentary_a.clone();

    let mut other = StdRng::seed_from_u64(99);
    record_score(&mut t, &id, Some(11), Some(7), &mut other);
    assert_eq!(t.ledger.get(&id).unwrap().commentary_a, first);

    assert!(clear_score(&mut t, &id));
    let m = t.ledger.get(&id).unwrap();
    assert!(!m.completed);
    assert_eq!((m.score_a, m.score_b), (None, None));
    assert_eq!((m.commentary_a.as_ref(), m.commentary_b.as_ref()), (None, None));
}

#[test]
fn partial_score_is_incomplete() {
    let mut t = started(2, TournamentConfig::default());
    let id = t.ledger.matches()[0].id.clone();
    record_score(&mut t, &id, Some(11), None, &mut rng());
    let m = t.ledger.get(&id).unwrap();
    assert!(!m.completed);
    assert!(m.commentary_a.is_none());
    assert!(tournament_standings(&t).iter().all(|s| s.played == 0));
}

#[test]
fn unknown_match_is_ignored() {
    let mut t = started(3, TournamentConfig::default());
    let before = t.clone();
    assert!(!record_score(&mut t, "m_9_9", Some(1), Some(0), &mut rng()));
    assert_eq!(t, before);
}

#[test]
fn ordering_policies_rank_differently() {
    let list = teams(3);
    let (a, b, c) = (list[0].id, list[1].id, list[2].id);
    let config = TournamentConfig {
        shuffle_pairs: false,
        ..Default::default()
    };
    let mut t = Tournament::with_teams(list, config);
    start_tournament(&mut t, &mut rng()).unwrap();
    // A: one big win, one loss -> wins 1, pd +8. B: two narrow wins -> wins 2, pd +2.
    play(&mut t, a, b, 0, 1);
    play(&mut t, a, c, 10, 1);
    play(&mut t, b, c, 2, 1);

    let order = |policy| {
        calculate_standings(&t.teams, &t.ledger, policy)
            .into_iter()
            .map(|s| s.team_id)
            .collect::<Vec<_>>()
    };
    assert_eq!(order(OrderingPolicy::PdWins), [a, b, c]);
    assert_eq!(order(OrderingPolicy::PdOnly), [a, b, c]);
    assert_eq!(order(OrderingPolicy::WinsPd), [b, a, c]);
}

#[test]
fn points_for_breaks_ties_and_registry_order_is_kept_after_that() {
    let list = teams(4);
    let ids: Vec<_> = list.iter().map(|x| x.id).collect();
    let mut t = Tournament::with_teams(list, TournamentConfig::default());
    start_tournament(&mut t, &mut rng()).unwrap();
    // Every match ends level: pd and wins all 0.
    play(&mut t, ids[0], ids[1], 3, 3);
    play(&mut t, ids[2], ids[3], 5, 5);

    let order: Vec<_> = tournament_standings(&t).into_iter().map(|s| s.team_id).collect();
    assert_eq!(order, [ids[2], ids[3], ids[0], ids[1]]);
    assert!(tournament_standings(&t).iter().filter(|s| s.played == 1).all(|s| s.ties == 1));
}

#[test]
fn standings_are_idempotent() {
    let mut t = started(4, TournamentConfig::default());
    let ids: Vec<_> = t.ledger.matches().iter().map(|m| m.id.clone()).collect();
    for (i, id) in ids.iter().enumerate() {
        record_score(&mut t, id, Some(i as i32), Some(3), &mut rng());
    }
    assert_eq!(tournament_standings(&t), tournament_standings(&t));
}

#[test]
fn champion_is_top_of_standings_when_done() {
    let mut t = started(3, TournamentConfig::default());
    let ids: Vec<_> = t.teams.iter().map(|x| x.id).collect();
    play(&mut t, ids[0], ids[1], 11, 2);
    assert_eq!(champion(&t), None);
    play(&mut t, ids[0], ids[2], 11, 4);
    play(&mut t, ids[1], ids[2], 11, 9);
    assert_eq!(champion(&t), Some(Champion::Team(ids[0])));
    assert_eq!(t.progress().percent, 100);
}

#[test]
fn regenerate_replaces_results() {
    let mut t = started(3, TournamentConfig::default());
    let id = t.ledger.matches()[0].id.clone();
    record_score(&mut t, &id, Some(11), Some(0), &mut rng());
    tournament_manager::regenerate_schedule(&mut t, &mut rng()).unwrap();
    assert_eq!(t.ledger.len(), 3);
    assert_eq!(t.ledger.completed_count(), 0);
    assert!(t.ledger.decider().is_none());
}
