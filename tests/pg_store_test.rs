use std::env;

use math_problem_backend::{
    config::Config,
    database::pool::{create_pool, run_migrations},
    error::Error,
    models::{problem::Problem, submission::NewSubmission},
    services::{
        session_store::{PgSessionStore, SessionStore},
        submission_service::{PgSubmissionRecorder, SubmissionRecorder},
    },
};
use sqlx::PgPool;
use uuid::Uuid;

/// Connects to `DATABASE_URL` and migrates. Returns `None` when no database is configured.
async fn setup_pool() -> Option<PgPool> {
    dotenvy::dotenv().ok();
    let Ok(database_url) = env::var("DATABASE_URL") else {
        eprintln!("DATABASE_URL not set; skipping Postgres store test");
        return None;
    };

    let config = Config::from_lookup(|name| match name {
        "DATABASE_URL" => Some(database_url.clone()),
        "DATABASE_MAX_CONNECTIONS" => Some("2".to_string()),
        _ => None,
    })
    .expect("config");
    let pool = create_pool(&config).await.expect("pool");
    run_migrations(&pool).await.expect("migrations");
    Some(pool)
}

async fn seed_session(store: &PgSessionStore) -> Uuid {
    store
        .create(&Problem {
            problem_text: "Tom has 5 apples and picks 7 more. How many apples now?".to_string(),
            final_answer: 12,
        })
        .await
        .expect("create session")
        .id
}

#[tokio::test]
async fn created_session_reads_back_from_postgres() {
    let Some(pool) = setup_pool().await else {
        return;
    };
    let store = PgSessionStore::new(pool);

    let created = store
        .create(&Problem {
            problem_text: "Tom has 5 apples and picks 7 more. How many apples now?".to_string(),
            final_answer: 12,
        })
        .await
        .expect("create session");

    let fetched = store
        .get(created.id)
        .await
        .expect("get session")
        .expect("session exists");
    assert_eq!(fetched.id, created.id);
    assert_eq!(
        fetched.problem_text,
        "Tom has 5 apples and picks 7 more. How many apples now?"
    );
    assert_eq!(fetched.correct_answer, 12);
    // Postgres stores microseconds, so compare at that precision.
    assert_eq!(
        fetched.created_at.timestamp_micros(),
        created.created_at.timestamp_micros()
    );
}

#[tokio::test]
async fn unknown_session_id_is_none_in_postgres() {
    let Some(pool) = setup_pool().await else {
        return;
    };
    let store = PgSessionStore::new(pool);

    let missing = store.get(Uuid::new_v4()).await.expect("lookup succeeds");
    assert!(missing.is_none());
}

#[tokio::test]
async fn submission_is_recorded_against_a_stored_session() {
    let Some(pool) = setup_pool().await else {
        return;
    };
    let sessions = PgSessionStore::new(pool.clone());
    let recorder = PgSubmissionRecorder::new(pool.clone());
    let session_id = seed_session(&sessions).await;

    let saved = recorder
        .record(NewSubmission {
            session_id,
            user_answer: 10,
            is_correct: false,
            feedback_text: "Close! Try adding the picked apples again.".to_string(),
        })
        .await
        .expect("record submission");
    assert_eq!(saved.session_id, session_id);
    assert_eq!(saved.user_answer, 10);
    assert!(!saved.is_correct);
    assert_eq!(saved.feedback_text, "Close! Try adding the picked apples again.");

    let count: i64 = sqlx::query_scalar(
        "SELECT COUNT(*) FROM math_problem_submissions WHERE session_id = $1",
    )
    .bind(session_id)
    .fetch_one(&pool)
    .await
    .expect("count submissions");
    assert_eq!(count, 1);
}

#[tokio::test]
async fn submission_for_missing_session_is_a_database_error() {
    let Some(pool) = setup_pool().await else {
        return;
    };
    let recorder = PgSubmissionRecorder::new(pool);

    let err = recorder
        .record(NewSubmission {
            session_id: Uuid::new_v4(),
            user_answer: 12,
            is_correct: true,
            feedback_text: "Well done!".to_string(),
        })
        .await
        .unwrap_err();
    assert!(matches!(err, Error::Database(_)));
}
