//! API integration tests.
//!
//! These expect a running server (http://localhost:8080) with a reachable
//! database. Tests that exercise the management surface additionally expect
//! a seeded superadmin account (admin@libris.dev / admin).
//!
//! Run with: cargo test -- --ignored

use reqwest::Client;
use serde_json::{json, Value};
use uuid::Uuid;

const BASE_URL: &str = "http://localhost:8080/api/v1";

/// Register a throwaway account and return (email, password)
async fn signup_user(client: &Client) -> (String, String) {
    let email = format!("user-{}@example.com", Uuid::new_v4());
    let password = "secret-pass".to_string();

    let response = client
        .post(format!("{}/auth/signup", BASE_URL))
        .json(&json!({ "email": email, "password": password }))
        .send()
        .await
        .expect("Failed to send signup request");

    assert!(response.status().is_success());
    (email, password)
}

/// Sign in and return the session token
async fn signin(client: &Client, email: &str, password: &str) -> String {
    let response = client
        .post(format!("{}/auth/signin", BASE_URL))
        .json(&json!({ "email": email, "password": password }))
        .send()
        .await
        .expect("Failed to send signin request");

    assert!(response.status().is_success());

    let body: Value = response.json().await.expect("Failed to parse signin response");
    assert_eq!(body["success"], true);
    body["data"]["token"]
        .as_str()
        .expect("No token in response")
        .to_string()
}

/// Register a fresh plain user and return their token
async fn fresh_user_token(client: &Client) -> String {
    let (email, password) = signup_user(client).await;
    signin(client, &email, &password).await
}

/// Token for the seeded superadmin account
async fn superadmin_token(client: &Client) -> String {
    signin(client, "admin@libris.dev", "admin").await
}

/// Add a book on the self-service surface; returns its id
async fn add_book(client: &Client, token: &str, title: &str) -> String {
    let response = client
        .post(format!("{}/user/userandbook/addbook", BASE_URL))
        .header("Authorization", format!("Bearer {}", token))
        .json(&json!({
            "title": title,
            "author": "Frank Herbert",
            "publishedYear": 1965,
            "genre": "Science Fiction"
        }))
        .send()
        .await
        .expect("Failed to send addbook request");

    assert!(response.status().is_success());

    let body: Value = response.json().await.expect("Failed to parse addbook response");
    assert_eq!(body["success"], true);
    body["data"]["id"].as_str().expect("No book id").to_string()
}

#[tokio::test]
#[ignore] // Run with: cargo test -- --ignored
async fn test_health_check() {
    let client = Client::new();

    let response = client
        .get(format!("{}/health", BASE_URL))
        .send()
        .await
        .expect("Failed to send request");

    assert!(response.status().is_success());

    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["status"], "healthy");
}

#[tokio::test]
#[ignore]
async fn test_signup_signin_roundtrip() {
    let client = Client::new();
    let (email, password) = signup_user(&client).await;

    let token = signin(&client, &email, &password).await;
    assert!(!token.is_empty());
}

#[tokio::test]
#[ignore]
async fn test_signup_duplicate_email_conflicts() {
    let client = Client::new();
    let (email, password) = signup_user(&client).await;

    let response = client
        .post(format!("{}/auth/signup", BASE_URL))
        .json(&json!({ "email": email, "password": password }))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), 409);

    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["success"], false);
    assert_eq!(body["message"], "Email already registered");
}

#[tokio::test]
#[ignore]
async fn test_signin_failures_are_indistinguishable() {
    let client = Client::new();
    let (email, _) = signup_user(&client).await;

    // Wrong password for a real account.
    let wrong_password = client
        .post(format!("{}/auth/signin", BASE_URL))
        .json(&json!({ "email": email, "password": "wrong" }))
        .send()
        .await
        .expect("Failed to send request");

    // Unknown account entirely.
    let unknown_email = client
        .post(format!("{}/auth/signin", BASE_URL))
        .json(&json!({ "email": format!("ghost-{}@example.com", Uuid::new_v4()), "password": "wrong" }))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(wrong_password.status(), 401);
    assert_eq!(unknown_email.status(), 401);

    let first: Value = wrong_password.json().await.expect("Failed to parse response");
    let second: Value = unknown_email.json().await.expect("Failed to parse response");
    assert_eq!(first["message"], "Invalid email or password");
    assert_eq!(first["message"], second["message"]);
}

#[tokio::test]
#[ignore]
async fn test_getme_returns_profile_without_password() {
    let client = Client::new();
    let (email, password) = signup_user(&client).await;
    let token = signin(&client, &email, &password).await;

    let response = client
        .get(format!("{}/user/userandbook/getme", BASE_URL))
        .header("Authorization", format!("Bearer {}", token))
        .send()
        .await
        .expect("Failed to send request");

    assert!(response.status().is_success());

    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["data"]["email"], email.as_str());
    assert_eq!(body["data"]["role"], "user");
    assert!(body["data"].get("passwordHash").is_none());
}

#[tokio::test]
#[ignore]
async fn test_owner_scoped_book_lifecycle() {
    let client = Client::new();
    let token = fresh_user_token(&client).await;

    let title = format!("Dune {}", Uuid::new_v4());
    let book_id = add_book(&client, &token, &title).await;

    // The owner's list contains exactly the one book.
    let response = client
        .get(format!("{}/user/userandbook/getbooks", BASE_URL))
        .header("Authorization", format!("Bearer {}", token))
        .send()
        .await
        .expect("Failed to send request");

    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["data"]["pagination"]["total"], 1);
    assert_eq!(body["data"]["books"][0]["title"], title.as_str());
    assert_eq!(body["data"]["books"][0]["createdBy"]["role"], "user");

    // Delete it; the list is empty again.
    let response = client
        .delete(format!("{}/user/userandbook/deletebook/{}", BASE_URL, book_id))
        .header("Authorization", format!("Bearer {}", token))
        .send()
        .await
        .expect("Failed to send request");

    assert!(response.status().is_success());

    let response = client
        .get(format!("{}/user/userandbook/getbooks", BASE_URL))
        .header("Authorization", format!("Bearer {}", token))
        .send()
        .await
        .expect("Failed to send request");

    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["data"]["pagination"]["total"], 0);
    assert_eq!(body["data"]["books"].as_array().map(Vec::len), Some(0));
}

#[tokio::test]
#[ignore]
async fn test_duplicate_title_is_rejected_across_owners() {
    let client = Client::new();
    let first_owner = fresh_user_token(&client).await;
    let second_owner = fresh_user_token(&client).await;

    let title = format!("Solaris {}", Uuid::new_v4());
    add_book(&client, &first_owner, &title).await;

    let response = client
        .post(format!("{}/user/userandbook/addbook", BASE_URL))
        .header("Authorization", format!("Bearer {}", second_owner))
        .json(&json!({
            "title": title,
            "author": "Stanislaw Lem",
            "publishedYear": 1961,
            "genre": "Science Fiction"
        }))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), 409);

    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["success"], false);
    assert_eq!(body["message"], "Book with this title already exists");
}

#[tokio::test]
#[ignore]
async fn test_foreign_books_are_hidden_from_scoped_operations() {
    let client = Client::new();
    let owner = fresh_user_token(&client).await;
    let other = fresh_user_token(&client).await;

    let title = format!("Hyperion {}", Uuid::new_v4());
    let book_id = add_book(&client, &owner, &title).await;

    // Another user cannot update it through the scoped surface.
    let response = client
        .put(format!("{}/user/userandbook/updatebook/{}", BASE_URL, book_id))
        .header("Authorization", format!("Bearer {}", other))
        .json(&json!({ "genre": "Space Opera" }))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), 404);

    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["message"], "Book not found or not authorized");

    // Nor delete it.
    let response = client
        .delete(format!("{}/user/userandbook/deletebook/{}", BASE_URL, book_id))
        .header("Authorization", format!("Bearer {}", other))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), 404);

    // The owner still sees it in the shared catalog view.
    let response = client
        .get(format!("{}/user/userandbook/getallbooks", BASE_URL))
        .header("Authorization", format!("Bearer {}", other))
        .send()
        .await
        .expect("Failed to send request");

    assert!(response.status().is_success());
}

#[tokio::test]
#[ignore]
async fn test_update_applies_only_supplied_fields() {
    let client = Client::new();
    let token = fresh_user_token(&client).await;

    let title = format!("Foundation {}", Uuid::new_v4());
    let book_id = add_book(&client, &token, &title).await;

    let response = client
        .put(format!("{}/user/userandbook/updatebook/{}", BASE_URL, book_id))
        .header("Authorization", format!("Bearer {}", token))
        .json(&json!({ "genre": "Classic SF" }))
        .send()
        .await
        .expect("Failed to send request");

    assert!(response.status().is_success());

    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["data"]["genre"], "Classic SF");
    assert_eq!(body["data"]["title"], title.as_str());
    assert_eq!(body["data"]["author"], "Frank Herbert");
}

#[tokio::test]
#[ignore]
async fn test_update_to_an_existing_title_conflicts() {
    let client = Client::new();
    let token = fresh_user_token(&client).await;

    let taken = format!("Ubik {}", Uuid::new_v4());
    add_book(&client, &token, &taken).await;
    let other_id = add_book(&client, &token, &format!("Valis {}", Uuid::new_v4())).await;

    let response = client
        .put(format!("{}/user/userandbook/updatebook/{}", BASE_URL, other_id))
        .header("Authorization", format!("Bearer {}", token))
        .json(&json!({ "title": taken }))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), 409);

    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["success"], false);
    assert_eq!(body["message"], "Another book with this title already exists");
}

#[tokio::test]
#[ignore]
async fn test_single_book_reads_by_id() {
    let client = Client::new();
    let owner = fresh_user_token(&client).await;
    let other = fresh_user_token(&client).await;
    let admin = superadmin_token(&client).await;

    let title = format!("Roadside Picnic {}", Uuid::new_v4());
    let book_id = add_book(&client, &owner, &title).await;

    // The admin surface fetches any book by id, owner profile embedded.
    let response = client
        .get(format!("{}/management/book/getbook?id={}", BASE_URL, book_id))
        .header("Authorization", format!("Bearer {}", admin))
        .send()
        .await
        .expect("Failed to send request");

    assert!(response.status().is_success());

    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["message"], "Book retrieved successfully");
    assert_eq!(body["data"]["title"], title.as_str());
    assert_eq!(body["data"]["createdBy"]["role"], "user");

    // The owner fetches it through the scoped read.
    let response = client
        .get(format!("{}/user/userandbook/getbooks?id={}", BASE_URL, book_id))
        .header("Authorization", format!("Bearer {}", owner))
        .send()
        .await
        .expect("Failed to send request");

    assert!(response.status().is_success());

    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["data"]["title"], title.as_str());

    // A different user gets the non-revealing not-found.
    let response = client
        .get(format!("{}/user/userandbook/getbooks?id={}", BASE_URL, book_id))
        .header("Authorization", format!("Bearer {}", other))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), 404);

    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["message"], "Book not found or not authorized");
}

#[tokio::test]
#[ignore]
async fn test_malformed_ids_stay_inside_the_envelope() {
    let client = Client::new();
    let admin = superadmin_token(&client).await;

    let response = client
        .get(format!("{}/management/book/getbook?id=not-a-uuid", BASE_URL))
        .header("Authorization", format!("Bearer {}", admin))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), 400);

    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["success"], false);
    assert_eq!(body["data"], Value::Null);
}

#[tokio::test]
#[ignore]
async fn test_pagination_window_is_newest_first() {
    let client = Client::new();
    let token = fresh_user_token(&client).await;

    let run = Uuid::new_v4();
    for i in 1..=12 {
        add_book(&client, &token, &format!("Book {:02} {}", i, run)).await;
    }

    let response = client
        .get(format!(
            "{}/user/userandbook/getbooks?page=2&limit=5",
            BASE_URL
        ))
        .header("Authorization", format!("Bearer {}", token))
        .send()
        .await
        .expect("Failed to send request");

    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["data"]["pagination"]["total"], 12);
    assert_eq!(body["data"]["pagination"]["page"], 2);
    assert_eq!(body["data"]["pagination"]["limit"], 5);

    // Newest first: page 2 of 5 holds creations 07..03.
    let books = body["data"]["books"].as_array().expect("books array");
    assert_eq!(books.len(), 5);
    assert_eq!(books[0]["title"], format!("Book 07 {}", run));
    assert_eq!(books[4]["title"], format!("Book 03 {}", run));
}

#[tokio::test]
#[ignore]
async fn test_search_is_case_insensitive_substring() {
    let client = Client::new();
    let user = fresh_user_token(&client).await;
    let admin = superadmin_token(&client).await;

    let marker = Uuid::new_v4().simple().to_string();
    add_book(&client, &user, &format!("The Dispossessed {}", marker)).await;

    let response = client
        .get(format!(
            "{}/management/book/searchbook?search=dispossessed {}",
            BASE_URL, marker
        ))
        .header("Authorization", format!("Bearer {}", admin))
        .send()
        .await
        .expect("Failed to send request");

    assert!(response.status().is_success());

    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["message"], "Books search results");
    assert_eq!(body["data"]["pagination"]["total"], 1);

    // An empty search term matches the whole catalog.
    let response = client
        .get(format!("{}/management/book/searchbook", BASE_URL))
        .header("Authorization", format!("Bearer {}", admin))
        .send()
        .await
        .expect("Failed to send request");

    let body: Value = response.json().await.expect("Failed to parse response");
    assert!(body["data"]["pagination"]["total"].as_i64().unwrap() >= 1);
}

#[tokio::test]
#[ignore]
async fn test_management_surface_rejects_plain_users() {
    let client = Client::new();
    let token = fresh_user_token(&client).await;

    let response = client
        .get(format!("{}/management/book/getbook", BASE_URL))
        .header("Authorization", format!("Bearer {}", token))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), 403);

    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["message"], "Forbidden: Access denied");
}

#[tokio::test]
#[ignore]
async fn test_superadmin_assigns_roles_and_administers_users() {
    let client = Client::new();
    let admin = superadmin_token(&client).await;

    // Superadmin creates a subadmin through the management surface.
    let email = format!("sub-{}@example.com", Uuid::new_v4());
    let response = client
        .post(format!("{}/management/signup", BASE_URL))
        .header("Authorization", format!("Bearer {}", admin))
        .json(&json!({ "email": email, "password": "secret-pass", "role": "subadmin" }))
        .send()
        .await
        .expect("Failed to send request");

    assert!(response.status().is_success());

    // The new account can reach the management surface but not user admin.
    let sub_token = signin(&client, &email, "secret-pass").await;
    let response = client
        .get(format!("{}/management/book/getbook", BASE_URL))
        .header("Authorization", format!("Bearer {}", sub_token))
        .send()
        .await
        .expect("Failed to send request");
    assert!(response.status().is_success());

    let response = client
        .get(format!("{}/management/user/getuser", BASE_URL))
        .header("Authorization", format!("Bearer {}", sub_token))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), 403);

    // Superadmin lists users and deletes the subadmin.
    let response = client
        .get(format!("{}/management/user/getuser", BASE_URL))
        .header("Authorization", format!("Bearer {}", admin))
        .send()
        .await
        .expect("Failed to send request");

    let body: Value = response.json().await.expect("Failed to parse response");
    let users = body["data"]["users"].as_array().expect("users array");
    let created = users
        .iter()
        .find(|u| u["email"] == email.as_str())
        .expect("created user listed");
    assert_eq!(created["role"], "subadmin");

    let id = created["id"].as_str().expect("user id");
    let response = client
        .delete(format!("{}/management/user/deleteuser/{}", BASE_URL, id))
        .header("Authorization", format!("Bearer {}", admin))
        .send()
        .await
        .expect("Failed to send request");

    assert!(response.status().is_success());

    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["message"], "User deleted successfully");
}

#[tokio::test]
#[ignore]
async fn test_subadmin_created_accounts_are_plain_users() {
    let client = Client::new();
    let admin = superadmin_token(&client).await;

    // Superadmin mints a subadmin.
    let sub_email = format!("sub-{}@example.com", Uuid::new_v4());
    client
        .post(format!("{}/management/signup", BASE_URL))
        .header("Authorization", format!("Bearer {}", admin))
        .json(&json!({ "email": sub_email, "password": "secret-pass", "role": "subadmin" }))
        .send()
        .await
        .expect("Failed to send request");

    let sub_token = signin(&client, &sub_email, "secret-pass").await;

    // The subadmin asks for a superadmin; the role request is ignored.
    let email = format!("user-{}@example.com", Uuid::new_v4());
    let response = client
        .post(format!("{}/management/signup", BASE_URL))
        .header("Authorization", format!("Bearer {}", sub_token))
        .json(&json!({ "email": email, "password": "secret-pass", "role": "superadmin" }))
        .send()
        .await
        .expect("Failed to send request");

    assert!(response.status().is_success());

    let token = signin(&client, &email, "secret-pass").await;
    let response = client
        .get(format!("{}/user/userandbook/getme", BASE_URL))
        .header("Authorization", format!("Bearer {}", token))
        .send()
        .await
        .expect("Failed to send request");

    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["data"]["role"], "user");
}
