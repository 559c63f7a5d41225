use std::time::Duration;

use nucleon_runtime::{
    ChallengeKind, ChallengeState, FixedChallengeFactory, GameEvent, LevelId, LevelOutcome,
    NumberAtom, SessionController, SubmittedAnswer,
};

fn neutral(p: u32, n: u32) -> NumberAtom {
    NumberAtom::new(p, n, p)
}

/// Controller backed by scripted pools, one script per `start_level` call.
fn scripted(scripts: Vec<Vec<(ChallengeKind, NumberAtom)>>) -> SessionController {
    SessionController::builder()
        .factory(FixedChallengeFactory::new(scripts))
        .build()
}

fn solve_active(controller: &mut SessionController) {
    let (kind, answer) = {
        let challenge = controller.session().unwrap().active_challenge().unwrap();
        (challenge.kind(), *challenge.answer())
    };
    let outcome = controller
        .submit_answer(&SubmittedAnswer::matching(kind, &answer))
        .unwrap();
    assert!(outcome.check.is_correct);
}

#[test]
fn perfect_level_awards_max_score_and_records_best_time() {
    let script = vec![
        (ChallengeKind::CountsToElement, neutral(6, 6)),
        (ChallengeKind::SchematicToElement, neutral(3, 4)),
        (ChallengeKind::CountsToElement, NumberAtom::new(8, 8, 10)),
    ];
    let mut controller = scripted(vec![script]);

    controller.start_level(LevelId::PeriodicTable).unwrap();
    for step in 0..3 {
        controller.tick(Duration::from_secs(5));
        solve_active(&mut controller);
        let outcome = controller.advance_to_next_challenge().unwrap();
        if step < 2 {
            assert_eq!(outcome, None);
        } else {
            assert_eq!(outcome, Some(LevelOutcome::Perfect));
        }
    }

    let session = controller.session().unwrap();
    assert!(session.is_complete());
    assert_eq!(session.score, 6);
    assert_eq!(session.elapsed, Duration::from_secs(15));
    assert_eq!(
        controller.best_time(LevelId::PeriodicTable),
        Some(Duration::from_secs(15))
    );
}

#[test]
fn retry_completion_is_normal_and_records_no_best_time() {
    let answer = neutral(7, 7);
    let script = vec![
        (ChallengeKind::CountsToMass, answer),
        (ChallengeKind::CountsToCharge, neutral(2, 2)),
    ];
    let mut controller = scripted(vec![script]);
    controller.start_level(LevelId::MassAndCharge).unwrap();

    // Miss once, then recover on the retry.
    let miss = controller
        .submit_answer(&SubmittedAnswer::Counts(neutral(7, 8)))
        .unwrap();
    assert!(!miss.check.is_correct);
    assert_eq!(miss.state, ChallengeState::PresentingTryAgain);
    let hit = controller
        .submit_answer(&SubmittedAnswer::Counts(answer))
        .unwrap();
    assert_eq!(hit.points_awarded, 1);
    assert_eq!(controller.advance_to_next_challenge().unwrap(), None);

    solve_active(&mut controller);
    let outcome = controller.advance_to_next_challenge().unwrap();
    assert_eq!(outcome, Some(LevelOutcome::Normal));
    assert_eq!(controller.session().unwrap().score, 3);
    assert_eq!(controller.best_time(LevelId::MassAndCharge), None);
}

#[test]
fn best_time_improves_only_on_strictly_faster_perfect_runs() {
    let script = || vec![(ChallengeKind::CountsToMass, neutral(4, 5))];
    let mut controller = scripted(vec![script(), script(), script()]);

    for (run_time, expected_best) in [(10u64, 10u64), (20, 10), (4, 4)] {
        controller.start_level(LevelId::MassAndCharge).unwrap();
        controller.tick(Duration::from_secs(run_time));
        solve_active(&mut controller);
        let outcome = controller.advance_to_next_challenge().unwrap();
        assert_eq!(outcome, Some(LevelOutcome::Perfect));
        assert_eq!(
            controller.best_time(LevelId::MassAndCharge),
            Some(Duration::from_secs(expected_best))
        );
    }
}

#[test]
fn exhausted_challenge_scores_nothing_and_needs_acknowledgement() {
    let script = vec![(ChallengeKind::CountsToCharge, neutral(5, 6))];
    let mut controller = scripted(vec![script]);
    controller.start_level(LevelId::MassAndCharge).unwrap();

    let wrong = SubmittedAnswer::Counts(neutral(5, 5));
    let first = controller.submit_answer(&wrong).unwrap();
    assert_eq!(first.state, ChallengeState::PresentingTryAgain);
    let second = controller.submit_answer(&wrong).unwrap();
    assert_eq!(second.state, ChallengeState::AttemptsExhausted);
    assert_eq!(second.attempts_made, 2);
    assert_eq!(second.points_awarded, 0);

    controller.acknowledge_exhausted().unwrap();
    let outcome = controller.advance_to_next_challenge().unwrap();
    assert_eq!(outcome, Some(LevelOutcome::Normal));
    assert_eq!(controller.session().unwrap().score, 0);
}

#[test]
fn event_stream_reports_the_whole_level_in_order() {
    let answer = neutral(6, 6);
    let script = vec![(ChallengeKind::CountsToMass, answer)];
    let mut controller = scripted(vec![script]);
    let mut rx = controller.subscribe_events();

    controller.start_level(LevelId::MassAndCharge).unwrap();
    controller
        .submit_answer(&SubmittedAnswer::Counts(answer))
        .unwrap();
    controller.advance_to_next_challenge().unwrap();

    assert!(matches!(
        rx.try_recv().unwrap(),
        GameEvent::LevelStarted {
            level: LevelId::MassAndCharge,
            challenge_count: 1,
        }
    ));
    assert!(matches!(
        rx.try_recv().unwrap(),
        GameEvent::ChallengePresented { index: 0, .. }
    ));
    match rx.try_recv().unwrap() {
        GameEvent::AnswerEvaluated {
            check,
            state,
            points_awarded,
            score,
            ..
        } => {
            assert!(check.is_correct);
            assert_eq!(state, ChallengeState::ChallengeSolvedCorrectly);
            assert_eq!(points_awarded, 2);
            assert_eq!(score, 2);
        }
        other => panic!("expected AnswerEvaluated, got {other:?}"),
    }
    assert!(matches!(
        rx.try_recv().unwrap(),
        GameEvent::ChallengeRetired { .. }
    ));
    assert!(matches!(
        rx.try_recv().unwrap(),
        GameEvent::LevelCompleted {
            outcome: LevelOutcome::Perfect,
            score: 2,
            ..
        }
    ));
    assert!(rx.try_recv().is_err());
}

#[test]
fn timer_only_runs_while_a_challenge_is_active() {
    let script = vec![(ChallengeKind::CountsToMass, neutral(6, 6))];
    let mut controller = SessionController::builder()
        .factory(FixedChallengeFactory::new(vec![script]))
        .timer_enabled(false)
        .build();

    // No session yet: ignored.
    controller.tick(Duration::from_secs(5));

    controller.start_level(LevelId::MassAndCharge).unwrap();
    controller.tick(Duration::from_secs(5));
    assert_eq!(controller.session().unwrap().elapsed, Duration::ZERO);

    solve_active(&mut controller);
    controller.advance_to_next_challenge().unwrap();

    // Level complete: ignored even with the timer enabled.
    controller.set_timer_enabled(true);
    controller.tick(Duration::from_secs(5));
    assert_eq!(controller.session().unwrap().elapsed, Duration::ZERO);
}

#[test]
fn new_game_retires_remaining_challenges_and_resets() {
    let script = vec![
        (ChallengeKind::CountsToMass, neutral(6, 6)),
        (ChallengeKind::CountsToCharge, neutral(8, 8)),
    ];
    let mut controller = scripted(vec![script]);
    controller.start_level(LevelId::MassAndCharge).unwrap();
    let mut rx = controller.subscribe_events();

    controller.new_game();
    assert!(controller.session().is_none());

    let mut retired = 0;
    loop {
        match rx.try_recv().unwrap() {
            GameEvent::ChallengeRetired { .. } => retired += 1,
            GameEvent::SessionReset => break,
            other => panic!("unexpected event {other:?}"),
        }
    }
    assert_eq!(retired, 2);
    assert!(rx.try_recv().is_err());
}
