mod common;

use std::time::Duration;

use common::*;
use storage::error::{Conflict, StorageError};
use storage::models::{NotificationKind, SwipeAction};
use storage::repository::{MatchRepository, SwipeRepository, TeamRepository};
use storage::services::{MembershipService, Notifier, SwipeService};

#[tokio::test]
async fn duplicate_concurrent_swipes_record_once() {
    let Some(pool) = test_pool().await else {
        return;
    };
    let (notifier, _rx) = Notifier::channel();
    let hackathon_id = seed_hackathon(&pool, 4).await;
    let alice = registered_user(&pool, hackathon_id, "alice", 1000).await;
    let bob = registered_user(&pool, hackathon_id, "bob", 1000).await;

    let service = SwipeService::new(&pool, &notifier);
    let (a, b) = tokio::join!(
        service.record_swipe(alice, bob, SwipeAction::Like),
        service.record_swipe(alice, bob, SwipeAction::Like),
    );

    let results = [a, b];
    assert_eq!(results.iter().filter(|r| r.is_ok()).count(), 1);
    assert!(results.iter().any(|r| matches!(
        r,
        Err(StorageError::Conflict(Conflict::DuplicateSwipe))
    )));
    assert_eq!(SwipeRepository::new(&pool).count_by_swiper(alice).await.unwrap(), 1);
}

#[tokio::test]
async fn mutual_likes_create_a_single_match() {
    let Some(pool) = test_pool().await else {
        return;
    };
    let (notifier, mut rx) = Notifier::channel();
    let hackathon_id = seed_hackathon(&pool, 4).await;
    let alice = registered_user(&pool, hackathon_id, "alice", 1000).await;
    let bob = registered_user(&pool, hackathon_id, "bob", 1000).await;

    let service = SwipeService::new(&pool, &notifier);
    let first = service.record_swipe(alice, bob, SwipeAction::Like).await.unwrap();
    assert!(first.matched.is_none());

    let second = service.record_swipe(bob, alice, SwipeAction::Like).await.unwrap();
    let (matched, counterpart) = second.matched.unwrap();
    assert_eq!(counterpart.user_id, alice);
    assert_eq!(matched.counterpart_of(bob), alice);

    assert_eq!(MatchRepository::new(&pool).count_between(alice, bob).await.unwrap(), 1);

    let mut notified = Vec::new();
    while let Ok(event) = rx.try_recv() {
        assert_eq!(event.kind, NotificationKind::Match);
        notified.push(event.user_id);
    }
    notified.sort();
    let mut expected = vec![alice, bob];
    expected.sort();
    assert_eq!(notified, expected);
}

#[tokio::test]
async fn simultaneous_mutual_likes_match_once() {
    let Some(pool) = test_pool().await else {
        return;
    };
    let (notifier, _rx) = Notifier::channel();
    let hackathon_id = seed_hackathon(&pool, 4).await;
    let alice = registered_user(&pool, hackathon_id, "alice", 1000).await;
    let bob = registered_user(&pool, hackathon_id, "bob", 1000).await;

    let service = SwipeService::new(&pool, &notifier);
    let (a, b) = tokio::join!(
        service.record_swipe(alice, bob, SwipeAction::Like),
        service.record_swipe(bob, alice, SwipeAction::Like),
    );

    let created = [a.unwrap(), b.unwrap()]
        .iter()
        .filter(|o| o.matched.is_some())
        .count();
    assert_eq!(created, 1);
    assert_eq!(MatchRepository::new(&pool).count_between(alice, bob).await.unwrap(), 1);
}

#[tokio::test]
async fn pass_never_matches() {
    let Some(pool) = test_pool().await else {
        return;
    };
    let (notifier, _rx) = Notifier::channel();
    let hackathon_id = seed_hackathon(&pool, 4).await;
    let alice = registered_user(&pool, hackathon_id, "alice", 1000).await;
    let bob = registered_user(&pool, hackathon_id, "bob", 1000).await;

    let service = SwipeService::new(&pool, &notifier);
    service.record_swipe(alice, bob, SwipeAction::Like).await.unwrap();
    let outcome = service.record_swipe(bob, alice, SwipeAction::Pass).await.unwrap();

    assert!(outcome.matched.is_none());
    assert_eq!(MatchRepository::new(&pool).count_between(alice, bob).await.unwrap(), 0);
}

#[tokio::test]
async fn captain_like_invites_target_to_team() {
    let Some(pool) = test_pool().await else {
        return;
    };
    let (notifier, _rx) = Notifier::channel();
    let hackathon_id = seed_hackathon(&pool, 4).await;
    let captain = registered_user(&pool, hackathon_id, "cap", 1000).await;
    let solo = registered_user(&pool, hackathon_id, "solo", 1000).await;
    let team = create_team(&pool, &notifier, captain, hackathon_id).await;

    let outcome = SwipeService::new(&pool, &notifier)
        .record_swipe(captain, solo, SwipeAction::Like)
        .await
        .unwrap();
    assert_eq!(outcome.swipe.swiper_id, team.team_id);
    let invite = outcome.invite.unwrap();

    let joined = MembershipService::new(&pool, &notifier)
        .accept_invite(solo, invite.invite_id)
        .await
        .unwrap();
    assert_eq!(joined.team_id, team.team_id);

    let found = TeamRepository::new(&pool)
        .find_for_user(solo, hackathon_id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(found.team_id, team.team_id);
}

#[tokio::test]
async fn captain_like_waits_for_an_inflight_join() {
    let Some(pool) = test_pool().await else {
        return;
    };
    let (notifier, _rx) = Notifier::channel();
    let hackathon_id = seed_hackathon(&pool, 4).await;
    let captain = registered_user(&pool, hackathon_id, "cap", 1000).await;
    let other_captain = registered_user(&pool, hackathon_id, "other-cap", 1000).await;
    let solo = registered_user(&pool, hackathon_id, "solo", 1000).await;
    create_team(&pool, &notifier, captain, hackathon_id).await;
    let other_team = create_team(&pool, &notifier, other_captain, hackathon_id).await;

    // A join into the other team, holding its locks and not yet committed
    let mut join = pool.begin().await.unwrap();
    sqlx::query("SELECT 1 FROM teams WHERE team_id = $1 FOR UPDATE")
        .bind(other_team.team_id)
        .execute(&mut *join)
        .await
        .unwrap();
    sqlx::query("SELECT 1 FROM users WHERE user_id = $1 FOR UPDATE")
        .bind(solo)
        .execute(&mut *join)
        .await
        .unwrap();
    sqlx::query("UPDATE users SET team_id = $2 WHERE user_id = $1")
        .bind(solo)
        .bind(other_team.team_id)
        .execute(&mut *join)
        .await
        .unwrap();
    sqlx::query("UPDATE hackathon_participants SET status = 'in_team' WHERE user_id = $1 AND hackathon_id = $2")
        .bind(solo)
        .bind(hackathon_id)
        .execute(&mut *join)
        .await
        .unwrap();

    let swipe = {
        let pool = pool.clone();
        let notifier = notifier.clone();
        tokio::spawn(async move {
            SwipeService::new(&pool, &notifier)
                .record_swipe(captain, solo, SwipeAction::Like)
                .await
        })
    };

    tokio::time::sleep(Duration::from_millis(200)).await;
    assert!(!swipe.is_finished());

    join.commit().await.unwrap();

    let outcome = swipe.await.unwrap().unwrap();
    assert!(outcome.invite.is_none());
    assert_eq!(pending_invites_for(&pool, solo).await, 0);
}

#[tokio::test]
async fn unregistered_caller_cannot_swipe() {
    let Some(pool) = test_pool().await else {
        return;
    };
    let (notifier, _rx) = Notifier::channel();
    let hackathon_id = seed_hackathon(&pool, 4).await;
    let drifter = seed_user(&pool, "drifter", 1000).await;
    let target = registered_user(&pool, hackathon_id, "target", 1000).await;

    let err = SwipeService::new(&pool, &notifier)
        .record_swipe(drifter, target, SwipeAction::Like)
        .await
        .unwrap_err();
    assert!(matches!(err, StorageError::Conflict(Conflict::NotRegistered)));
}
