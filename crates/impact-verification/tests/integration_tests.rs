//! End-to-end reviewer flows against the SQLite store

use chrono::{NaiveDate, TimeZone, Utc};
use impact_domain::traits::EntryStore;
use impact_domain::{
    valuation, EntryId, ImpactEntry, VerificationError, VerificationStatus, VerificationTier,
};
use impact_store::SqliteStore;
use impact_verification::{ReviewerSession, VerificationService, VerificationServiceError};

fn seed(store: &mut SqliteStore, org: &str, hours: f64) -> EntryId {
    let entry = ImpactEntry::new(
        "vol-grace",
        hours,
        NaiveDate::from_ymd_opt(2024, 10, 5).unwrap(),
        Utc.with_ymd_and_hms(2024, 10, 5, 18, 0, 0).unwrap(),
    )
    .unwrap()
    .with_org(org);
    store.insert_entry(entry).unwrap()
}

fn admin() -> ReviewerSession {
    ReviewerSession::org_admin("admin-lin", ["org-shelter"])
}

#[test]
fn test_approve_then_summarize() {
    let mut store = SqliteStore::new(":memory:").unwrap();
    let first = seed(&mut store, "org-shelter", 2.0);
    let second = seed(&mut store, "org-shelter", 3.0);
    let service = VerificationService::default_config();

    service.approve(&mut store, &admin(), first, VerificationTier::Platinum).unwrap();

    let entries = vec![
        store.get_entry(first).unwrap().unwrap(),
        store.get_entry(second).unwrap().unwrap(),
    ];
    let summary = valuation::impact_summary(&entries);
    assert_eq!(summary.total_hours, 5.0);
    assert_eq!(summary.verified_hours, 2.0);
    assert_eq!(summary.pending_hours, 3.0);
    assert_eq!(valuation::verification_score(&entries), 5);
}

#[test]
fn test_approve_all_with_disputed_entry_changes_nothing() {
    let mut store = SqliteStore::new(":memory:").unwrap();
    let a = seed(&mut store, "org-shelter", 1.0);
    let b = seed(&mut store, "org-shelter", 2.0);
    let c = seed(&mut store, "org-shelter", 3.0);
    let service = VerificationService::default_config();

    service.dispute(&mut store, &admin(), b, "not on the sign-in sheet").unwrap();

    let err = service
        .approve_all(&mut store, &admin(), &[a, b, c], VerificationTier::Gold)
        .unwrap_err();
    match err {
        VerificationServiceError::Workflow(VerificationError::BatchRejected { offending }) => {
            assert_eq!(offending, vec![b]);
        }
        other => panic!("expected batch rejection, got {:?}", other),
    }

    assert!(store.get_entry(a).unwrap().unwrap().verification.is_pending());
    assert!(store.get_entry(c).unwrap().unwrap().verification.is_pending());
    assert_eq!(
        store.get_entry(b).unwrap().unwrap().verification,
        VerificationStatus::Disputed { reason: "not on the sign-in sheet".to_string() }
    );
}

#[test]
fn test_approve_all_commits_every_entry() {
    let mut store = SqliteStore::new(":memory:").unwrap();
    let ids: Vec<_> = (1..=4).map(|h| seed(&mut store, "org-shelter", h as f64)).collect();
    let service = VerificationService::default_config();

    let approved = service
        .approve_all(&mut store, &admin(), &ids, VerificationTier::Silver)
        .unwrap();
    assert_eq!(approved.len(), 4);

    for id in ids {
        let stored = store.get_entry(id).unwrap().unwrap();
        assert_eq!(stored.verification.tier(), Some(VerificationTier::Silver));
    }
}

#[test]
fn test_batch_with_foreign_entry_is_rejected() {
    let mut store = SqliteStore::new(":memory:").unwrap();
    let mine = seed(&mut store, "org-shelter", 1.0);
    let theirs = seed(&mut store, "org-garden", 1.0);
    let service = VerificationService::default_config();

    let err = service
        .approve_all(&mut store, &admin(), &[mine, theirs], VerificationTier::Gold)
        .unwrap_err();
    match err {
        VerificationServiceError::BatchRejected { missing, unauthorized, not_pending } => {
            assert!(missing.is_empty());
            assert_eq!(unauthorized, vec![theirs]);
            assert!(not_pending.is_empty());
        }
        other => panic!("expected batch rejection, got {:?}", other),
    }
    assert!(store.get_entry(mine).unwrap().unwrap().verification.is_pending());
}

#[test]
fn test_stale_approval_does_not_overwrite_dispute() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("impact.db");
    let mut first = SqliteStore::new(&path).unwrap();
    let mut second = SqliteStore::new(&path).unwrap();
    let id = seed(&mut first, "org-shelter", 2.0);
    let service = VerificationService::default_config();

    let snapshot = first.get_entry(id).unwrap().unwrap();
    service.dispute(&mut second, &admin(), id, "signed in for someone else").unwrap();

    let stale = impact_domain::workflow::approve(&snapshot, VerificationTier::Gold).unwrap();
    assert!(first.update_statuses(&[stale]).is_err());

    let stored = second.get_entry(id).unwrap().unwrap();
    assert_eq!(stored.verification.dispute_reason(), Some("signed in for someone else"));
}

#[test]
fn test_double_approve_is_invalid_state() {
    let mut store = SqliteStore::new(":memory:").unwrap();
    let id = seed(&mut store, "org-shelter", 1.0);
    let service = VerificationService::default_config();

    service.approve(&mut store, &admin(), id, VerificationTier::Gold).unwrap();
    let err = service
        .approve(&mut store, &admin(), id, VerificationTier::Platinum)
        .unwrap_err();
    assert!(matches!(
        err,
        VerificationServiceError::Workflow(VerificationError::InvalidState { .. })
    ));
    assert_eq!(
        store.get_entry(id).unwrap().unwrap().verification.tier(),
        Some(VerificationTier::Gold)
    );
}
