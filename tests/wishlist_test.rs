use bookswap::db;
use bookswap::domain::{DomainError, NewListing};
use bookswap::infrastructure::AppState;
use bookswap::models::wishlist;
use sea_orm::{ColumnTrait, EntityTrait, PaginatorTrait, QueryFilter};

async fn setup_test_state() -> AppState {
    let db = db::init_db("sqlite::memory:")
        .await
        .expect("Failed to init DB");
    AppState::new(db)
}

// Returns (owner id, reader id, book id)
async fn seed_owner_reader_and_book(state: &AppState) -> (i32, i32, i32) {
    let owner = state
        .user_repo
        .register("Alice".into(), "a@x.com".into(), "hash-a".into())
        .await
        .unwrap();
    let reader = state
        .user_repo
        .register("Bob".into(), "b@x.com".into(), "hash-b".into())
        .await
        .unwrap();
    let book = state
        .book_repo
        .create(
            owner.id,
            NewListing {
                title: "Dune".into(),
                author: "Frank Herbert".into(),
                year: 1965,
                summary: "Spice.".into(),
                photo: None,
            },
        )
        .await
        .unwrap();

    (owner.id, reader.id, book.id)
}

async fn count_entries(state: &AppState, user_id: i32) -> u64 {
    wishlist::Entity::find()
        .filter(wishlist::Column::UserId.eq(user_id))
        .count(state.db())
        .await
        .unwrap()
}

#[tokio::test]
async fn test_add_twice_keeps_single_entry() {
    let state = setup_test_state().await;
    let (_, reader, book) = seed_owner_reader_and_book(&state).await;

    state.wishlist_repo.add(reader, book).await.unwrap();
    state.wishlist_repo.add(reader, book).await.unwrap();

    assert_eq!(count_entries(&state, reader).await, 1);
    assert!(state.wishlist_repo.contains(reader, book).await.unwrap());
}

#[tokio::test]
async fn test_add_missing_book() {
    let state = setup_test_state().await;
    let (_, reader, _) = seed_owner_reader_and_book(&state).await;

    let result = state.wishlist_repo.add(reader, 999).await;
    assert_eq!(result.unwrap_err(), DomainError::NotFound);
    assert_eq!(count_entries(&state, reader).await, 0);
}

#[tokio::test]
async fn test_remove_missing_entry_is_not_found() {
    let state = setup_test_state().await;
    let (owner, reader, book) = seed_owner_reader_and_book(&state).await;

    state.wishlist_repo.add(owner, book).await.unwrap();

    let result = state.wishlist_repo.remove(reader, book).await;
    assert_eq!(result.unwrap_err(), DomainError::NotFound);

    // Other users' entries are untouched
    assert_eq!(count_entries(&state, owner).await, 1);
    assert_eq!(count_entries(&state, reader).await, 0);
}

#[tokio::test]
async fn test_remove_then_remove_again() {
    let state = setup_test_state().await;
    let (_, reader, book) = seed_owner_reader_and_book(&state).await;

    state.wishlist_repo.add(reader, book).await.unwrap();
    state.wishlist_repo.remove(reader, book).await.unwrap();
    assert!(!state.wishlist_repo.contains(reader, book).await.unwrap());

    let again = state.wishlist_repo.remove(reader, book).await;
    assert_eq!(again.unwrap_err(), DomainError::NotFound);
}

#[tokio::test]
async fn test_list_for_user() {
    let state = setup_test_state().await;
    let (owner, reader, dune) = seed_owner_reader_and_book(&state).await;

    let hobbit = state
        .book_repo
        .create(
            owner,
            NewListing {
                title: "The Hobbit".into(),
                author: "J.R.R. Tolkien".into(),
                year: 1937,
                summary: "There and back again.".into(),
                photo: Some("hobbit.png".into()),
            },
        )
        .await
        .unwrap();

    assert!(state.wishlist_repo.find_books_for_user(reader).await.unwrap().is_empty());

    state.wishlist_repo.add(reader, dune).await.unwrap();
    state.wishlist_repo.add(reader, hobbit.id).await.unwrap();

    let mut titles: Vec<String> = state
        .wishlist_repo
        .find_books_for_user(reader)
        .await
        .unwrap()
        .into_iter()
        .map(|b| b.title)
        .collect();
    titles.sort();
    assert_eq!(titles, vec!["Dune", "The Hobbit"]);

    // Owner's wishlist stays empty
    assert!(state.wishlist_repo.find_books_for_user(owner).await.unwrap().is_empty());
}

#[tokio::test]
async fn test_add_for_unknown_user() {
    let state = setup_test_state().await;
    let (_, _, book) = seed_owner_reader_and_book(&state).await;

    let result = state.wishlist_repo.add(999, book).await;
    assert_eq!(result.unwrap_err(), DomainError::NotFound);
    assert_eq!(count_entries(&state, 999).await, 0);
}
