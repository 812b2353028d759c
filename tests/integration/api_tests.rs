//! HTTP integration tests over the in-memory store

use axum::{
    body::{to_bytes, Body},
    http::{header, Request, StatusCode},
    Router,
};
use serde_json::Value;
use tower::ServiceExt;

use catalog_server::{api, config::AppConfig, repository::Repository, AppState};

fn app() -> Router {
    api::create_router(AppState::new(AppConfig::default(), Repository::in_memory()))
}

struct Reply {
    status: StatusCode,
    location: Option<String>,
    body: Value,
}

async fn send(app: &Router, request: Request<Body>) -> Reply {
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let location = response
        .headers()
        .get(header::LOCATION)
        .map(|value| value.to_str().unwrap().to_string());
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let body = serde_json::from_slice(&bytes)
        .unwrap_or_else(|_| Value::String(String::from_utf8_lossy(&bytes).into_owned()));
    Reply {
        status,
        location,
        body,
    }
}

async fn get(app: &Router, uri: &str) -> Reply {
    send(app, Request::get(uri).body(Body::empty()).unwrap()).await
}

async fn post(app: &Router, uri: &str, form: &str) -> Reply {
    let request = Request::post(uri)
        .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
        .body(Body::from(form.to_string()))
        .unwrap();
    send(app, request).await
}

/// Create a document and return its url
async fn created(app: &Router, uri: &str, form: &str) -> String {
    let reply = post(app, uri, form).await;
    assert_eq!(reply.status, StatusCode::SEE_OTHER, "body: {}", reply.body);
    reply.location.unwrap()
}

fn id_of(url: &str) -> &str {
    url.rsplit('/').next().unwrap()
}

#[tokio::test]
async fn test_health_check() {
    let app = app();

    let reply = get(&app, "/health").await;
    assert_eq!(reply.status, StatusCode::OK);
    assert_eq!(reply.body["status"], "healthy");

    let reply = get(&app, "/ready").await;
    assert_eq!(reply.status, StatusCode::OK);
    assert_eq!(reply.body["status"], "ready");
}

#[tokio::test]
async fn test_root_redirects_to_catalog() {
    let reply = get(&app(), "/").await;
    assert_eq!(reply.status, StatusCode::SEE_OTHER);
    assert_eq!(reply.location.as_deref(), Some("/catalog"));
}

#[tokio::test]
async fn test_author_create_then_detail() {
    let app = app();
    let url = created(
        &app,
        "/catalog/author/create",
        "first_name=Ursula&family_name=LeGuin&date_of_birth=1929-10-21",
    )
    .await;
    assert!(url.starts_with("/catalog/author/"));

    let reply = get(&app, &url).await;
    assert_eq!(reply.status, StatusCode::OK);
    assert_eq!(reply.body["view"], "author_detail");
    let author = &reply.body["author"];
    assert_eq!(author["first_name"], "Ursula");
    assert_eq!(author["family_name"], "LeGuin");
    assert_eq!(author["name"], "LeGuin Ursula");
    assert_eq!(author["date_of_birth_formatted"], "21 October, 1929");
    assert_eq!(author["url"], url.as_str());
}

#[tokio::test]
async fn test_author_list_sorted_by_family_name() {
    let app = app();
    for form in [
        "first_name=Roger&family_name=Zelazny",
        "first_name=Isaac&family_name=Asimov",
        "first_name=Iain&family_name=Banks",
    ] {
        created(&app, "/catalog/author/create", form).await;
    }

    let reply = get(&app, "/catalog/authors").await;
    assert_eq!(reply.status, StatusCode::OK);
    assert_eq!(reply.body["view"], "author_list");
    assert_eq!(reply.body["title"], "Author List");
    let family_names: Vec<&str> = reply.body["author_list"]
        .as_array()
        .unwrap()
        .iter()
        .map(|author| author["family_name"].as_str().unwrap())
        .collect();
    assert_eq!(family_names, ["Asimov", "Banks", "Zelazny"]);
}

#[tokio::test]
async fn test_author_create_rejected() {
    let app = app();
    let reply = post(&app, "/catalog/author/create", "first_name=&family_name=O%27Brien").await;

    assert_eq!(reply.status, StatusCode::OK);
    assert_eq!(reply.body["view"], "author_form");
    assert_eq!(reply.body["title"], "Create Author");
    let messages: Vec<&str> = reply.body["errors"]
        .as_array()
        .unwrap()
        .iter()
        .map(|e| e["message"].as_str().unwrap())
        .collect();
    assert_eq!(
        messages,
        [
            "First name must be specified.",
            "First name has non-alphanumeric characters.",
            "Family name has non-alphanumeric characters.",
        ]
    );
    assert_eq!(reply.body["author"]["family_name"], "O&#x27;Brien");

    let home = get(&app, "/catalog").await;
    assert_eq!(home.body["data"]["author_count"], 0);
}

#[tokio::test]
async fn test_book_with_empty_isbn_is_not_saved() {
    let app = app();
    let author = created(&app, "/catalog/author/create", "first_name=Frank&family_name=Herbert").await;
    let genre = created(&app, "/catalog/genre/create", "name=Science+Fiction").await;

    let form = format!(
        "title=Dune&author={}&summary=Spice&isbn=&genre={}",
        id_of(&author),
        id_of(&genre)
    );
    let reply = post(&app, "/catalog/book/create", &form).await;

    assert_eq!(reply.status, StatusCode::OK);
    assert!(reply.location.is_none());
    assert_eq!(reply.body["view"], "book_form");
    assert_eq!(reply.body["errors"][0]["message"], "ISBN must not be empty");
    assert_eq!(reply.body["book"]["title"], "Dune");
    assert_eq!(reply.body["genres"][0]["checked"], true);
    assert_eq!(reply.body["authors"].as_array().unwrap().len(), 1);

    let home = get(&app, "/catalog").await;
    assert_eq!(home.body["view"], "index");
    assert_eq!(home.body["data"]["book_count"], 0);
}

#[tokio::test]
async fn test_genre_create_reuses_existing_name() {
    let app = app();
    let first = created(&app, "/catalog/genre/create", "name=Fantasy").await;
    let second = created(&app, "/catalog/genre/create", "name=++Fantasy++").await;
    assert_eq!(first, second);

    let list = get(&app, "/catalog/genres").await;
    assert_eq!(list.body["genre_list"].as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn test_genre_update_trims_name() {
    let app = app();
    let url = created(&app, "/catalog/genre/create", "name=SF").await;

    let reply = post(&app, &format!("{}/update", url), "name=++Sci-Fi++").await;
    assert_eq!(reply.status, StatusCode::SEE_OTHER);
    assert_eq!(reply.location.as_deref(), Some(url.as_str()));

    let detail = get(&app, &url).await;
    assert_eq!(detail.body["genre"]["name"], "Sci-Fi");
}

#[tokio::test]
async fn test_author_delete_blocked_by_books() {
    let app = app();
    let author = created(&app, "/catalog/author/create", "first_name=Iain&family_name=Banks").await;
    let book = format!(
        "title=Excession&author={}&summary=Ships&isbn=9781857234572",
        id_of(&author)
    );
    created(&app, "/catalog/book/create", &book).await;

    let reply = post(&app, &format!("{}/delete", author), "").await;
    assert_eq!(reply.status, StatusCode::OK);
    assert_eq!(reply.body["view"], "author_delete");
    assert_eq!(reply.body["author_books"][0]["title"], "Excession");

    assert_eq!(get(&app, &author).await.status, StatusCode::OK);
}

#[tokio::test]
async fn test_book_delete_then_not_found() {
    let app = app();
    let author = created(&app, "/catalog/author/create", "first_name=Ann&family_name=Leckie").await;
    let book = created(
        &app,
        "/catalog/book/create",
        &format!("title=Ancillary&author={}&summary=Ships&isbn=1", id_of(&author)),
    )
    .await;

    let confirm = get(&app, &format!("{}/delete", book)).await;
    assert_eq!(confirm.body["view"], "book_delete");
    assert_eq!(confirm.body["book"]["author"]["name"], "Leckie Ann");

    let reply = post(&app, &format!("{}/delete", book), "").await;
    assert_eq!(reply.status, StatusCode::SEE_OTHER);
    assert_eq!(reply.location.as_deref(), Some("/catalog/books"));

    for _ in 0..2 {
        let reply = get(&app, &book).await;
        assert_eq!(reply.status, StatusCode::NOT_FOUND);
        assert_eq!(reply.body, "Book Not Found");
    }
}

#[tokio::test]
async fn test_book_delete_blocked_by_copies() {
    let app = app();
    let book = created(
        &app,
        "/catalog/book/create",
        &format!("title=Solaris&author={}&summary=Ocean&isbn=1", uuid::Uuid::new_v4()),
    )
    .await;
    let copy = created(
        &app,
        "/catalog/bookinstance/create",
        &format!("book={}&imprint=Faber&status=Available", id_of(&book)),
    )
    .await;

    let reply = post(&app, &format!("{}/delete", book), "").await;
    assert_eq!(reply.status, StatusCode::OK);
    assert_eq!(reply.body["book_instances"][0]["url"], copy.as_str());

    let reply = post(&app, &format!("{}/delete", copy), "").await;
    assert_eq!(reply.location.as_deref(), Some("/catalog/bookinstances"));
    let reply = post(&app, &format!("{}/delete", book), "").await;
    assert_eq!(reply.location.as_deref(), Some("/catalog/books"));
}

#[tokio::test]
async fn test_book_update_rejection_keeps_selected_genres() {
    let app = app();
    let author = created(&app, "/catalog/author/create", "first_name=Susanna&family_name=Clarke").await;
    let fantasy = created(&app, "/catalog/genre/create", "name=Fantasy").await;
    let history = created(&app, "/catalog/genre/create", "name=History").await;
    created(&app, "/catalog/genre/create", "name=Poetry").await;
    let book = created(
        &app,
        "/catalog/book/create",
        &format!(
            "title=Strange&author={}&summary=Magic&isbn=1&genre={}",
            id_of(&author),
            id_of(&fantasy)
        ),
    )
    .await;

    let form = format!(
        "title=&author={}&summary=Magic&isbn=1&genre={}&genre={}",
        id_of(&author),
        id_of(&fantasy),
        id_of(&history)
    );
    let reply = post(&app, &format!("{}/update", book), &form).await;
    assert_eq!(reply.status, StatusCode::OK);
    assert_eq!(reply.body["title"], "Update Book");
    assert_eq!(reply.body["errors"][0]["message"], "Title must not be empty.");

    let checked: Vec<&str> = reply.body["genres"]
        .as_array()
        .unwrap()
        .iter()
        .filter(|g| g["checked"] == true)
        .map(|g| g["name"].as_str().unwrap())
        .collect();
    assert_eq!(checked, ["Fantasy", "History"]);
}

#[tokio::test]
async fn test_bookinstance_form_preselects_book() {
    let app = app();
    let book = created(
        &app,
        "/catalog/book/create",
        &format!("title=Neuromancer&author={}&summary=Cyber&isbn=1", uuid::Uuid::new_v4()),
    )
    .await;

    let form = format!("book={}&imprint=&due_back=someday", id_of(&book));
    let reply = post(&app, "/catalog/bookinstance/create", &form).await;
    assert_eq!(reply.status, StatusCode::OK);
    assert_eq!(reply.body["view"], "bookinstance_form");
    assert_eq!(reply.body["selected_book"], id_of(&book));
    assert_eq!(reply.body["book_list"][0]["title"], "Neuromancer");
    assert_eq!(reply.body["errors"].as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn test_missing_documents() {
    let app = app();
    let id = uuid::Uuid::new_v4();

    for entity in ["author", "book", "genre", "bookinstance"] {
        let reply = get(&app, &format!("/catalog/{}/{}", entity, id)).await;
        assert_eq!(reply.status, StatusCode::NOT_FOUND);

        let reply = get(&app, &format!("/catalog/{}/{}/update", entity, id)).await;
        assert_eq!(reply.status, StatusCode::NOT_FOUND);

        let list = format!("/catalog/{}s", entity);
        let reply = get(&app, &format!("/catalog/{}/{}/delete", entity, id)).await;
        assert_eq!(reply.status, StatusCode::SEE_OTHER);
        assert_eq!(reply.location.as_deref(), Some(list.as_str()));

        let reply = post(&app, &format!("/catalog/{}/{}/delete", entity, id), "").await;
        assert_eq!(reply.status, StatusCode::SEE_OTHER);
        assert_eq!(reply.location.as_deref(), Some(list.as_str()));
    }

    let reply = get(&app, "/catalog/author/not-an-id").await;
    assert_eq!(reply.status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_home_counts() {
    let app = app();
    let book = created(
        &app,
        "/catalog/book/create",
        &format!("title=Ubik&author={}&summary=Time&isbn=1", uuid::Uuid::new_v4()),
    )
    .await;
    for status in ["Available", "Loaned", ""] {
        created(
            &app,
            "/catalog/bookinstance/create",
            &format!("book={}&imprint=Gollancz&status={}", id_of(&book), status),
        )
        .await;
    }

    let home = get(&app, "/catalog").await;
    assert_eq!(home.status, StatusCode::OK);
    assert_eq!(home.body["title"], "Local Library Home");
    assert!(home.body["error"].is_null());
    assert_eq!(home.body["data"]["book_count"], 1);
    assert_eq!(home.body["data"]["book_instance_count"], 3);
    assert_eq!(home.body["data"]["book_instance_available_count"], 1);
}
