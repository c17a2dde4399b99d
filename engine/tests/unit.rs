//! Orchestrator tests using mockall-generated collaborator mocks
//!
//! These verify the orchestrator's local short-circuits and persistence
//! rules at the trait boundary, with call-count expectations.

mod common;

use engine::{
    EngineError, GameOrchestrator, GuessOutcome, IgnoredReason, Language, MockHistoryStore,
    MockSemanticJudge,
};

use common::accepted_verdict;

#[tokio::test]
async fn test_empty_category_is_rejected() {
    let result = GameOrchestrator::new(
        "   ",
        Language::En,
        MockSemanticJudge::new(),
        MockHistoryStore::new(),
    );

    assert!(matches!(result, Err(EngineError::InvalidCategory { .. })));
}

#[tokio::test]
async fn test_empty_input_never_reaches_the_judge() {
    let mut judge = MockSemanticJudge::new();
    judge.expect_judge_guess().times(0);

    let (orchestrator, _end_rx) =
        GameOrchestrator::new("Fruits", Language::En, judge, MockHistoryStore::new()).unwrap();

    assert_eq!(
        orchestrator.submit_guess("").await,
        GuessOutcome::Ignored(IgnoredReason::EmptyInput)
    );
    assert_eq!(
        orchestrator.submit_guess("  \t ").await,
        GuessOutcome::Ignored(IgnoredReason::EmptyInput)
    );
}

#[tokio::test]
async fn test_raw_duplicate_short_circuits_the_judge() {
    let mut judge = MockSemanticJudge::new();
    judge
        .expect_judge_guess()
        .times(1)
        .returning(|_, _, _| accepted_verdict("Apple"));

    let (orchestrator, _end_rx) =
        GameOrchestrator::new("Fruits", Language::En, judge, MockHistoryStore::new()).unwrap();

    orchestrator.submit_guess("Apple").await;

    // Judged once; these resolve locally regardless of judge availability
    for raw in ["APPLE", " apple "] {
        assert_eq!(
            orchestrator.submit_guess(raw).await,
            GuessOutcome::Duplicate { canonical: "Apple".to_string() }
        );
    }
}

#[tokio::test]
async fn test_give_up_with_score_appends_to_history_once() {
    let mut judge = MockSemanticJudge::new();
    judge
        .expect_judge_guess()
        .times(1)
        .returning(|_, _, _| accepted_verdict("Apple"));

    let mut history = MockHistoryStore::new();
    history.expect_append().times(1).returning(|_| Ok(()));

    let (orchestrator, _end_rx) =
        GameOrchestrator::new("Fruits", Language::En, judge, history).unwrap();

    orchestrator.submit_guess("apple").await;
    let record = orchestrator.give_up().await.unwrap();
    assert_eq!(record.score, 1);
}

#[tokio::test]
async fn test_zero_score_session_is_never_appended() {
    let mut history = MockHistoryStore::new();
    history.expect_append().times(0);

    let (orchestrator, _end_rx) =
        GameOrchestrator::new("Fruits", Language::En, MockSemanticJudge::new(), history).unwrap();

    let record = orchestrator.give_up().await.unwrap();
    assert_eq!(record.score, 0);
}

#[tokio::test]
async fn test_persistence_failure_does_not_block_the_ending() {
    let mut judge = MockSemanticJudge::new();
    judge
        .expect_judge_guess()
        .times(1)
        .returning(|_, _, _| accepted_verdict("Apple"));

    let mut history = MockHistoryStore::new();
    history.expect_append().times(1).returning(|_| {
        Err(EngineError::IoError(std::io::Error::new(
            std::io::ErrorKind::Other,
            "disk full",
        )))
    });

    let (orchestrator, _end_rx) =
        GameOrchestrator::new("Fruits", Language::En, judge, history).unwrap();

    orchestrator.submit_guess("apple").await;

    // The record is still produced and emitted
    let record = orchestrator.give_up().await.unwrap();
    assert_eq!(record.score, 1);
}
