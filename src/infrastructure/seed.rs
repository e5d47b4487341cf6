use crate::auth::hash_password;
use crate::domain::{DomainError, NewListing};
use crate::infrastructure::AppState;

pub async fn seed_demo_data(state: &AppState) -> Result<(), DomainError> {
    if state
        .user_repo
        .find_by_email("alice@example.com")
        .await?
        .is_some()
    {
        tracing::info!("Demo data already present, skipping");
        return Ok(());
    }

    // 1. Create Users
    let alice = state
        .user_repo
        .register(
            "Alice".to_owned(),
            "alice@example.com".to_owned(),
            hash_password("alice")?,
        )
        .await?;

    let bob = state
        .user_repo
        .register(
            "Bob".to_owned(),
            "bob@example.com".to_owned(),
            hash_password("bob")?,
        )
        .await?;

    // 2. Create Listings
    let listings = vec![
        (alice.id, "Dune", "Frank Herbert", 1965, "Spice, sandworms and politics."),
        (alice.id, "Foundation", "Isaac Asimov", 1951, "Psychohistory meets the fall of an empire."),
        (bob.id, "The Hobbit", "J.R.R. Tolkien", 1937, "There and back again."),
    ];

    for (owner_id, title, author, year, summary) in listings {
        state
            .book_repo
            .create(
                owner_id,
                NewListing {
                    title: title.to_owned(),
                    author: author.to_owned(),
                    year,
                    summary: summary.to_owned(),
                    photo: None,
                },
            )
            .await?;
    }

    Ok(())
}
