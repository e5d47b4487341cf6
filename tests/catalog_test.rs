use bookswap::{db, seed};
use bookswap::domain::{DomainError, ListingUpdate, NewListing};
use bookswap::infrastructure::AppState;
use bookswap::models::{User, book, reservation_request, wishlist};
use sea_orm::{ColumnTrait, EntityTrait, PaginatorTrait, QueryFilter};

// Helper to create a test app state
async fn setup_test_state() -> AppState {
    let db = db::init_db("sqlite::memory:")
        .await
        .expect("Failed to init DB");
    AppState::new(db)
}

// Helper to register a user with an opaque credential hash
async fn create_test_user(state: &AppState, name: &str) -> User {
    state
        .user_repo
        .register(
            name.to_string(),
            format!("{}@x.com", name.to_lowercase()),
            "$argon2id$dummy_hash".to_string(),
        )
        .await
        .expect("Failed to register user")
}

fn listing(title: &str) -> NewListing {
    NewListing {
        title: title.to_string(),
        author: "Frank Herbert".to_string(),
        year: 1965,
        summary: "A desert planet.".to_string(),
        photo: None,
    }
}

#[tokio::test]
async fn test_register_and_lookup() {
    let state = setup_test_state().await;

    let alice = state
        .user_repo
        .register(
            "Alice".to_string(),
            "a@x.com".to_string(),
            "hash".to_string(),
        )
        .await
        .expect("Register failed");
    assert_eq!(alice.name, "Alice");

    let by_email = state
        .user_repo
        .find_by_email("a@x.com")
        .await
        .unwrap()
        .expect("User should exist");
    assert_eq!(by_email.id, alice.id);
    assert_eq!(by_email.password_hash, "hash");

    let by_id = state.user_repo.find_by_id(alice.id).await.unwrap();
    assert_eq!(by_id.map(|u| u.email), Some("a@x.com".to_string()));

    assert!(state.user_repo.find_by_email("b@x.com").await.unwrap().is_none());
    assert!(state.user_repo.find_by_id(999).await.unwrap().is_none());
}

#[tokio::test]
async fn test_register_duplicate_email() {
    let state = setup_test_state().await;

    state
        .user_repo
        .register("First".into(), "dup@x.com".into(), "h1".into())
        .await
        .expect("First registration failed");

    let second = state
        .user_repo
        .register("Second".into(), "dup@x.com".into(), "h2".into())
        .await;
    assert_eq!(second.unwrap_err(), DomainError::DuplicateEmail);

    // The failed registration left nothing behind
    assert!(state.user_repo.find_by_id(2).await.unwrap().is_none());
}

#[tokio::test]
async fn test_register_duplicate_name() {
    let state = setup_test_state().await;

    state
        .user_repo
        .register("Alice".into(), "a@x.com".into(), "h1".into())
        .await
        .unwrap();

    let second = state
        .user_repo
        .register("Alice".into(), "other@x.com".into(), "h2".into())
        .await;
    assert_eq!(second.unwrap_err(), DomainError::DuplicateName);
}

#[tokio::test]
async fn test_create_listing_defaults() {
    let state = setup_test_state().await;
    let alice = create_test_user(&state, "Alice").await;

    let dune = state
        .book_repo
        .create(alice.id, listing("Dune"))
        .await
        .expect("Create failed");

    assert_eq!(dune.user_id, alice.id);
    assert_eq!(dune.photo, book::DEFAULT_PHOTO);
    assert_eq!(dune.assigned_to, None);

    let mut with_photo = listing("Children of Dune");
    with_photo.photo = Some("/static/images/ab12cd34.jpg".to_string());
    let sequel = state.book_repo.create(alice.id, with_photo).await.unwrap();
    assert_eq!(sequel.photo, "/static/images/ab12cd34.jpg");

    // Unknown owners cannot list books
    let orphan = state.book_repo.create(999, listing("Orphan")).await;
    assert_eq!(orphan.unwrap_err(), DomainError::NotFound);
}

#[tokio::test]
async fn test_list_all_and_by_owner() {
    let state = setup_test_state().await;
    let alice = create_test_user(&state, "Alice").await;
    let bob = create_test_user(&state, "Bob").await;

    state.book_repo.create(alice.id, listing("Dune")).await.unwrap();
    state.book_repo.create(alice.id, listing("Foundation")).await.unwrap();
    state.book_repo.create(bob.id, listing("The Hobbit")).await.unwrap();

    let all = state.book_repo.find_all().await.unwrap();
    assert_eq!(all.len(), 3);

    let alices: Vec<String> = state
        .book_repo
        .find_by_owner(alice.id)
        .await
        .unwrap()
        .into_iter()
        .map(|b| b.title)
        .collect();
    assert_eq!(alices, vec!["Dune", "Foundation"]);

    assert!(state.book_repo.find_by_owner(999).await.unwrap().is_empty());
}

#[tokio::test]
async fn test_update_listing_requires_owner() {
    let state = setup_test_state().await;
    let alice = create_test_user(&state, "Alice").await;
    let bob = create_test_user(&state, "Bob").await;
    let dune = state.book_repo.create(alice.id, listing("Dune")).await.unwrap();

    let edit = ListingUpdate {
        title: Some("Dune Messiah".to_string()),
        year: Some(1969),
        ..Default::default()
    };

    // Non-owner
    let denied = state.book_repo.update(dune.id, bob.id, edit.clone()).await;
    assert_eq!(denied.unwrap_err(), DomainError::NotOwner);
    let unchanged = state.book_repo.find_by_id(dune.id).await.unwrap().unwrap();
    assert_eq!(unchanged.title, "Dune");

    // Missing book
    let missing = state.book_repo.update(999, alice.id, edit.clone()).await;
    assert_eq!(missing.unwrap_err(), DomainError::NotFound);

    // Owner
    let updated = state.book_repo.update(dune.id, alice.id, edit).await.unwrap();
    assert_eq!(updated.title, "Dune Messiah");
    assert_eq!(updated.year, 1969);
    assert_eq!(updated.author, "Frank Herbert");
    assert_eq!(updated.summary, "A desert planet.");
}

#[tokio::test]
async fn test_delete_listing_cascades_relations() {
    let state = setup_test_state().await;
    let alice = create_test_user(&state, "Alice").await;
    let bob = create_test_user(&state, "Bob").await;
    let carol = create_test_user(&state, "Carol").await;
    let dune = state.book_repo.create(alice.id, listing("Dune")).await.unwrap();
    let hobbit = state.book_repo.create(alice.id, listing("The Hobbit")).await.unwrap();

    state.wishlist_repo.add(bob.id, dune.id).await.unwrap();
    state.wishlist_repo.add(carol.id, dune.id).await.unwrap();
    state.wishlist_repo.add(bob.id, hobbit.id).await.unwrap();
    state.reservations.request(bob.id, dune.id).await.unwrap();
    state.reservations.request(carol.id, dune.id).await.unwrap();
    state.reservations.request(carol.id, hobbit.id).await.unwrap();

    // Only the owner may delete
    let denied = state.book_repo.delete(dune.id, bob.id).await;
    assert_eq!(denied.unwrap_err(), DomainError::NotOwner);
    assert!(state.book_repo.find_by_id(dune.id).await.unwrap().is_some());
    assert!(state.wishlist_repo.contains(bob.id, dune.id).await.unwrap());

    state
        .book_repo
        .delete(dune.id, alice.id)
        .await
        .expect("Delete failed");

    assert!(state.book_repo.find_by_id(dune.id).await.unwrap().is_none());

    let wished = wishlist::Entity::find()
        .filter(wishlist::Column::BookId.eq(dune.id))
        .count(state.db())
        .await
        .unwrap();
    assert_eq!(wished, 0);

    let requested = reservation_request::Entity::find()
        .filter(reservation_request::Column::BookId.eq(dune.id))
        .count(state.db())
        .await
        .unwrap();
    assert_eq!(requested, 0);

    // Rows for other books survive
    assert!(state.wishlist_repo.contains(bob.id, hobbit.id).await.unwrap());
    assert!(state.reservations.has_requested(carol.id, hobbit.id).await.unwrap());

    // Deleting again reports NotFound
    let again = state.book_repo.delete(dune.id, alice.id).await;
    assert_eq!(again.unwrap_err(), DomainError::NotFound);
}

#[tokio::test]
async fn test_seed_demo_data_runs_once() {
    let state = setup_test_state().await;

    seed::seed_demo_data(&state).await.expect("Seed failed");
    seed::seed_demo_data(&state).await.expect("Second seed failed");

    assert_eq!(state.book_repo.find_all().await.unwrap().len(), 3);
    let alice = state
        .user_repo
        .find_by_email("alice@example.com")
        .await
        .unwrap()
        .expect("Demo user missing");
    assert_eq!(state.book_repo.find_by_owner(alice.id).await.unwrap().len(), 2);
}
