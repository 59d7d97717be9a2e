//! Tests against a real Seafile server.
//!
//! Set `SEAFILE_BASE_URI`, `SEAFILE_USERNAME` and `SEAFILE_PASSWORD` in the
//! environment (an `.env` file works too) and run `cargo test -- --ignored`.
//! The tests create and delete their own libraries, prefixed `sc-test-`.
use seafile_client::{auth, resource::CreateShareLink, AuthToken, Client};
use uuid::Uuid;

pub fn env(key: &str) -> String {
    dotenv::var(key).unwrap_or_else(|_| panic!("`{key}` is not defined"))
}

async fn test_client() -> Client {
    let base_uri = env("SEAFILE_BASE_URI");

    let token = AuthToken::obtain(&base_uri, &env("SEAFILE_USERNAME"), &env("SEAFILE_PASSWORD"))
        .await
        .unwrap();

    Client::new(base_uri, token)
}

/// Delete leftovers from previous runs and create a fresh test library.
async fn test_library(client: &Client, name: &str) -> Uuid {
    let libraries = client.libraries();

    for library in libraries.list().await.unwrap() {
        if library.name == name {
            println!("removing leftover `{name}`");
            libraries.delete(&library.id).await.unwrap();
        }
    }

    let created = libraries
        .create(name, "integration test library", None)
        .await
        .unwrap();

    assert_eq!(created.repo_name, name);

    created.repo_id
}

#[tokio::test]
#[ignore = "needs a live Seafile server"]
async fn ping() {
    let client = test_client().await;

    auth::ping(&client).await.unwrap();
}

#[tokio::test]
#[ignore = "needs a live Seafile server"]
async fn library_lifecycle() {
    let client = test_client().await;
    let libraries = client.libraries();

    let id = test_library(&client, "sc-test-library").await;

    assert!(libraries.exists("sc-test-library").await.unwrap());

    let library = libraries.get(&id).await.unwrap();
    assert_eq!(library.name, "sc-test-library");

    libraries.rename(&id, "sc-test-renamed").await.unwrap();
    assert!(libraries.exists("sc-test-renamed").await.unwrap());

    libraries.delete(&id).await.unwrap();
    assert!(!libraries.exists("sc-test-renamed").await.unwrap());
}

#[tokio::test]
#[ignore = "needs a live Seafile server"]
async fn file_roundtrip() {
    let client = test_client().await;
    let id = test_library(&client, "sc-test-files").await;

    let directories = client.directories();
    let files = client.files();

    directories.create_all(&id, "/a/b").await.unwrap();
    assert!(directories.exists(&id, "/a", "b").await.unwrap());

    let uploaded = files
        .upload(&id, "/a/b", "hello.txt", "hello world")
        .await
        .unwrap();
    assert_eq!(uploaded.name, "hello.txt");

    assert!(files.exists(&id, "/a/b/hello.txt").await.unwrap());

    let bytes = files.download_bytes(&id, "/a/b/hello.txt").await.unwrap();
    assert_eq!(&bytes[..], b"hello world");

    let revision = files
        .update(&id, "/a/b/hello.txt", "hello again")
        .await
        .unwrap();
    assert!(!revision.is_empty());

    let text = files.download_string(&id, "/a/b/hello.txt").await.unwrap();
    assert_eq!(text, "hello again");

    let history = files.history(&id, "/a/b/hello.txt").await.unwrap();
    assert!(history.len() >= 2);

    files
        .rename(&id, "/a/b/hello.txt", "renamed.txt")
        .await
        .unwrap();
    files.delete(&id, "/a/b/renamed.txt").await.unwrap();
    assert!(!files.exists(&id, "/a/b/renamed.txt").await.unwrap());

    client.libraries().delete(&id).await.unwrap();
}

#[tokio::test]
#[ignore = "needs a live Seafile server"]
async fn share_link_roundtrip() {
    let client = test_client().await;
    let id = test_library(&client, "sc-test-links").await;

    let files = client.files();
    files
        .upload(&id, "/", "shared.txt", "share me")
        .await
        .unwrap();

    let links = client.share_links();

    let link = links
        .create(&CreateShareLink {
            repo_id: id,
            path: "/shared.txt",
            password: None,
            expire_days: None,
        })
        .await
        .unwrap();

    assert!(links
        .list()
        .await
        .unwrap()
        .iter()
        .any(|l| l.token == link.token));

    links.delete(&link.token).await.unwrap();

    client.libraries().delete(&id).await.unwrap();
}
