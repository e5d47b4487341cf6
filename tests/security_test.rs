use bookswap::auth::{create_jwt, decode_jwt, hash_password, verify_password};
use bookswap::domain::DomainError;

#[tokio::test]
async fn test_password_hashing() {
    let password = "super_secret_password";
    let hash = hash_password(password).expect("Failed to hash password");

    assert_ne!(password, hash);
    assert!(verify_password(password, &hash).unwrap());
    assert!(!verify_password("wrong_password", &hash).unwrap());

    // Salted: hashing twice gives different strings
    let again = hash_password(password).unwrap();
    assert_ne!(hash, again);
}

#[tokio::test]
async fn test_verify_against_malformed_hash() {
    let result = verify_password("anything", "not-a-phc-string");
    assert!(matches!(result, Err(DomainError::Internal(_))));
}

#[tokio::test]
async fn test_jwt_creation_and_verification() {
    let token = create_jwt(42, "Alice").expect("Failed to create JWT");
    assert!(!token.is_empty());

    let claims = decode_jwt(&token).expect("Failed to verify JWT");
    assert_eq!(claims.sub, "42");
    assert_eq!(claims.name, "Alice");
    assert_eq!(claims.user_id().unwrap(), 42);
}

#[tokio::test]
async fn test_tampered_token_is_unauthorized() {
    let token = create_jwt(7, "Bob").unwrap();
    let mut tampered = token.clone();
    tampered.push('x');

    assert_eq!(decode_jwt(&tampered).unwrap_err(), DomainError::Unauthorized);
    assert_eq!(decode_jwt("").unwrap_err(), DomainError::Unauthorized);
}
