//! Integration tests for `TitleRepo` against a real database.
//!
//! Covers upsert semantics, deletion and every filter criterion.

use std::collections::BTreeSet;

use mangalib_core::filter::TitleFilter;
use mangalib_core::labels::{Genre, MediaType, ProgressState, PublicationStatus};
use mangalib_core::title::{Author, Progress, Title};
use mangalib_db::repositories::TitleRepo;
use sqlx::PgPool;

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn title(mal_id: i64, name: &str, author: &str, genres: &[Genre]) -> Title {
    Title {
        mal_id,
        name: name.to_string(),
        media_type: MediaType::Manga,
        chapters: 100,
        volumes: 10,
        status: PublicationStatus::Finished,
        synopsis: format!("Synopsis of {name}"),
        authors: vec![Author {
            name: author.to_string(),
            url: format!("https://myanimelist.net/people/{mal_id}"),
        }],
        genres: genres.iter().copied().collect(),
        url: format!("https://myanimelist.net/manga/{mal_id}"),
        progress: Progress::default(),
    }
}

async fn seed_library(pool: &PgPool) {
    let mut berserk = title(2, "Berserk", "Miura, Kentarou", &[Genre::Action, Genre::Drama]);
    berserk.status = PublicationStatus::Publishing;
    berserk.progress.state = ProgressState::Reading;

    let mut vagabond = title(656, "Vagabond", "Inoue, Takehiko", &[Genre::Action]);
    vagabond.status = PublicationStatus::OnHiatus;

    let mut monster = title(1, "Monster", "Urasawa, Naoki", &[Genre::Drama, Genre::Mystery]);
    monster.progress.state = ProgressState::Finished;

    let mut spice = title(9115, "Ookami to Koushinryou", "Hasekura, Isuna", &[Genre::Romance]);
    spice.media_type = MediaType::LightNovel;

    for t in [berserk, vagabond, monster, spice] {
        TitleRepo::save(pool, &t).await.unwrap();
    }
}

fn ids(records: &[mangalib_db::models::title::TitleRecord]) -> Vec<i64> {
    records.iter().map(|r| r.title.mal_id).collect()
}

// ---------------------------------------------------------------------------
// CRUD
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn save_then_find_by_id_round_trips_every_field(pool: PgPool) {
    let mut t = title(2, "Berserk", "Miura, Kentarou", &[Genre::Action, Genre::SliceOfLife]);
    t.media_type = MediaType::OneShot;
    t.status = PublicationStatus::OnHiatus;
    t.progress = Progress {
        state: ProgressState::Paused,
        chapters_read: 50,
        volumes_read: 5,
        rating: 9,
    };

    TitleRepo::save(&pool, &t).await.unwrap();
    let found = TitleRepo::find_by_id(&pool, 2).await.unwrap().unwrap();

    assert_eq!(found.title, t);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn find_by_id_missing_returns_none(pool: PgPool) {
    assert!(TitleRepo::find_by_id(&pool, 424242).await.unwrap().is_none());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn save_existing_id_overwrites_row(pool: PgPool) {
    let original = title(2, "Berserk", "Miura, Kentarou", &[Genre::Action]);
    let first = TitleRepo::save(&pool, &original).await.unwrap();

    let mut updated = original.clone();
    updated.name = "Berserk (Deluxe)".to_string();
    updated.genres = BTreeSet::from([Genre::Horror]);
    let second = TitleRepo::save(&pool, &updated).await.unwrap();

    assert_eq!(second.title, updated);
    assert_eq!(second.created_at, first.created_at);
    assert_eq!(TitleRepo::find_all(&pool).await.unwrap().len(), 1);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn save_over_existing_row_keeps_committed_progress(pool: PgPool) {
    let stale = title(2, "Berserk", "Miura, Kentarou", &[Genre::Action]);
    TitleRepo::save(&pool, &stale).await.unwrap();

    let reading = Progress {
        state: ProgressState::Reading,
        chapters_read: 99,
        volumes_read: 10,
        rating: 9,
    };
    TitleRepo::update_progress(&pool, 2, &reading).await.unwrap();

    // A catalog write built from a read taken before the progress update.
    let mut refreshed = stale.clone();
    refreshed.chapters = 364;
    let saved = TitleRepo::save(&pool, &refreshed).await.unwrap();

    assert_eq!(saved.title.chapters, 364);
    assert_eq!(saved.title.progress, reading);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn update_progress_leaves_catalog_columns_alone(pool: PgPool) {
    let t = title(2, "Berserk", "Miura, Kentarou", &[Genre::Action]);
    TitleRepo::save(&pool, &t).await.unwrap();

    let paused = Progress {
        state: ProgressState::Paused,
        chapters_read: 12,
        volumes_read: 1,
        rating: 6,
    };
    let updated = TitleRepo::update_progress(&pool, 2, &paused)
        .await
        .unwrap()
        .unwrap();

    assert_eq!(updated.title.progress, paused);
    assert_eq!(updated.title.catalog_fields(), t.catalog_fields());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn update_progress_of_missing_title_returns_none(pool: PgPool) {
    let result = TitleRepo::update_progress(&pool, 424242, &Progress::default())
        .await
        .unwrap();
    assert!(result.is_none());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn delete_returns_removed_row(pool: PgPool) {
    let t = title(2, "Berserk", "Miura, Kentarou", &[]);
    TitleRepo::save(&pool, &t).await.unwrap();

    let deleted = TitleRepo::delete(&pool, 2).await.unwrap().unwrap();
    assert_eq!(deleted.title, t);

    assert!(TitleRepo::find_by_id(&pool, 2).await.unwrap().is_none());
    assert!(TitleRepo::delete(&pool, 2).await.unwrap().is_none());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn find_all_orders_by_name(pool: PgPool) {
    seed_library(&pool).await;

    let all = TitleRepo::find_all(&pool).await.unwrap();
    assert_eq!(ids(&all), vec![2, 1, 9115, 656]);
}

// ---------------------------------------------------------------------------
// Filtering
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn empty_filter_returns_everything(pool: PgPool) {
    seed_library(&pool).await;

    let blank = TitleFilter {
        name: Some("  ".to_string()),
        author: Some(String::new()),
        genres: Some(BTreeSet::new()),
        ..Default::default()
    };

    let all = TitleRepo::find_by_filter(&pool, &blank).await.unwrap();
    assert_eq!(all.len(), 4);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn name_filter_is_case_insensitive_substring(pool: PgPool) {
    seed_library(&pool).await;

    let filter = TitleFilter {
        name: Some("SERK".to_string()),
        ..Default::default()
    };

    let found = TitleRepo::find_by_filter(&pool, &filter).await.unwrap();
    assert_eq!(ids(&found), vec![2]);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn name_filter_treats_wildcards_literally(pool: PgPool) {
    seed_library(&pool).await;

    let filter = TitleFilter {
        name: Some("%".to_string()),
        ..Default::default()
    };

    assert!(TitleRepo::find_by_filter(&pool, &filter).await.unwrap().is_empty());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn author_filter_matches_any_author_name(pool: PgPool) {
    seed_library(&pool).await;

    let filter = TitleFilter {
        author: Some("urasawa".to_string()),
        ..Default::default()
    };

    let found = TitleRepo::find_by_filter(&pool, &filter).await.unwrap();
    assert_eq!(ids(&found), vec![1]);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn genre_filter_requires_all_genres(pool: PgPool) {
    seed_library(&pool).await;

    let action = TitleFilter {
        genres: Some(BTreeSet::from([Genre::Action])),
        ..Default::default()
    };
    assert_eq!(ids(&TitleRepo::find_by_filter(&pool, &action).await.unwrap()), vec![2, 656]);

    let action_drama = TitleFilter {
        genres: Some(BTreeSet::from([Genre::Action, Genre::Drama])),
        ..Default::default()
    };
    assert_eq!(
        ids(&TitleRepo::find_by_filter(&pool, &action_drama).await.unwrap()),
        vec![2]
    );
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn exact_criteria_combine_with_and(pool: PgPool) {
    seed_library(&pool).await;

    let by_type = TitleFilter {
        media_type: Some(MediaType::LightNovel),
        ..Default::default()
    };
    assert_eq!(ids(&TitleRepo::find_by_filter(&pool, &by_type).await.unwrap()), vec![9115]);

    let by_status = TitleFilter {
        status: Some(PublicationStatus::OnHiatus),
        ..Default::default()
    };
    assert_eq!(ids(&TitleRepo::find_by_filter(&pool, &by_status).await.unwrap()), vec![656]);

    let finished_drama = TitleFilter {
        progress: Some(ProgressState::Finished),
        genres: Some(BTreeSet::from([Genre::Drama])),
        ..Default::default()
    };
    assert_eq!(
        ids(&TitleRepo::find_by_filter(&pool, &finished_drama).await.unwrap()),
        vec![1]
    );

    let contradictory = TitleFilter {
        progress: Some(ProgressState::Finished),
        status: Some(PublicationStatus::Publishing),
        ..Default::default()
    };
    assert!(TitleRepo::find_by_filter(&pool, &contradictory).await.unwrap().is_empty());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn unknown_stored_label_is_a_decode_error(pool: PgPool) {
    TitleRepo::save(&pool, &title(2, "Berserk", "Miura, Kentarou", &[])).await.unwrap();
    sqlx::query("UPDATE titles SET status = 'Cancelled' WHERE mal_id = 2")
        .execute(&pool)
        .await
        .unwrap();

    let err = TitleRepo::find_by_id(&pool, 2).await.unwrap_err();
    assert!(matches!(err, sqlx::Error::Decode(_)));
    assert!(err.to_string().contains("Unknown status label: 'Cancelled'"));
}
