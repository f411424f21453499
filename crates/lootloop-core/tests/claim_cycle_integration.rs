//! Integration tests for the full claim cycle.
//!
//! These tests drive RewardManager end-to-end against real SQLite storage:
//! claim, cooldown, grace window, forfeiture, and surviving a process
//! restart.

use chrono::{DateTime, TimeZone, Utc};
use lootloop_core::{
    Cadence, CadenceConfig, Catalog, Database, RewardDefinition, RewardKind, RewardManager,
};

fn t(secs: i64) -> DateTime<Utc> {
    Utc.timestamp_opt(1_700_000_000 + secs, 0).unwrap()
}

fn catalog() -> Catalog {
    let mut catalog = Catalog::default();
    catalog.daily = CadenceConfig {
        cooldown_secs: 86_400,
        deadline_secs: 172_800,
        rewards: vec![
            RewardDefinition {
                kind: RewardKind::Wood,
                amount: 10,
            },
            RewardDefinition {
                kind: RewardKind::Diamond,
                amount: 1,
            },
            RewardDefinition {
                kind: RewardKind::Wood,
                amount: 20,
            },
        ],
    };
    catalog
}

fn open_manager() -> RewardManager<Database, Database> {
    RewardManager::open(
        &catalog(),
        Database::open_memory().unwrap(),
        Database::open_memory().unwrap(),
    )
    .unwrap()
}

#[test]
fn daily_claim_lifecycle() {
    let mut manager = open_manager();

    // Fresh state: claimable at slot 0.
    let snapshots = manager.tick(t(0));
    assert!(snapshots[0].claimable);
    assert_eq!(snapshots[0].active_slot, 0);
    assert_eq!(snapshots[0].remaining_secs, 0);

    // Claim at t0 credits wood and starts the cooldown.
    manager.claim(Cadence::Daily, t(0)).unwrap();
    assert_eq!(manager.balances(), vec![(RewardKind::Wood, 10), (RewardKind::Diamond, 0)]);
    assert_eq!(manager.track(Cadence::Daily).active_slot(), 1);

    // Twelve hours in: halfway through the cooldown.
    let snapshots = manager.tick(t(43_200));
    assert!(!snapshots[0].claimable);
    assert_eq!(snapshots[0].remaining_secs, 43_200);
    assert!((snapshots[0].progress - 0.5).abs() < 1e-9);

    // Twenty-five hours in: cooldown passed, deadline not.
    let snapshots = manager.tick(t(90_000));
    assert!(snapshots[0].claimable);
    assert_eq!(snapshots[0].remaining_secs, 0);
    assert_eq!(snapshots[0].active_slot, 1);

    // Past the deadline: progress forfeited, back to slot 0, claimable.
    let snapshots = manager.tick(t(200_000));
    assert!(snapshots[0].claimable);
    assert_eq!(snapshots[0].active_slot, 0);

    // The forfeited reward was never credited.
    assert_eq!(manager.balances(), vec![(RewardKind::Wood, 10), (RewardKind::Diamond, 0)]);
}

#[test]
fn slots_cycle_through_the_catalog() {
    let mut manager = open_manager();
    let day = 86_400i64;

    let mut kinds = Vec::new();
    for i in 0..4 {
        let event = manager.claim(Cadence::Daily, t(i * day)).unwrap();
        if let lootloop_core::Event::RewardClaimed { slot, kind, .. } = event {
            kinds.push((slot, kind));
        }
    }

    assert_eq!(
        kinds,
        vec![
            (0, RewardKind::Wood),
            (1, RewardKind::Diamond),
            (2, RewardKind::Wood),
            (0, RewardKind::Wood),
        ]
    );
    assert_eq!(manager.balances(), vec![(RewardKind::Wood, 40), (RewardKind::Diamond, 1)]);
}

#[test]
fn state_survives_restart() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("lootloop.db");

    {
        let mut manager = RewardManager::open(
            &catalog(),
            Database::open_at(&path).unwrap(),
            Database::open_at(&path).unwrap(),
        )
        .unwrap();
        manager.claim(Cadence::Daily, t(0)).unwrap();
        manager.claim(Cadence::Weekly, t(0)).unwrap();
    }

    // "Restart": fresh manager over the same database file.
    let mut manager = RewardManager::open(
        &catalog(),
        Database::open_at(&path).unwrap(),
        Database::open_at(&path).unwrap(),
    )
    .unwrap();

    let snapshots = manager.tick(t(10));
    assert!(!snapshots[0].claimable);
    assert_eq!(snapshots[0].active_slot, 1);
    assert!(!snapshots[1].claimable);
    assert_eq!(snapshots[1].active_slot, 1);

    // Cooldown still measured from the pre-restart claim.
    let snapshots = manager.tick(t(86_400));
    assert!(snapshots[0].claimable);

    assert_eq!(manager.balances()[0], (RewardKind::Wood, 10));
}

#[test]
fn weekly_track_uses_its_own_windows() {
    let mut manager = open_manager();
    manager.claim(Cadence::Weekly, t(0)).unwrap();

    // A day later the weekly track is still cooling down.
    let snapshots = manager.tick(t(86_400));
    assert!(!snapshots[1].claimable);
    assert_eq!(snapshots[1].remaining_secs, 604_800 - 86_400);

    // A full week later it is claimable again.
    let snapshots = manager.tick(t(604_800));
    assert!(snapshots[1].claimable);
    assert_eq!(snapshots[1].active_slot, 1);
}
