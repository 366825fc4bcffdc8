use forkify::{command_channel, Command, Controller, MemoryBookmarkStore, RecipeDraft, StoreBuilder};
use mockito::{Matcher, Server, ServerGuard};

const RECIPE: &str = r#"{
    "status": "success",
    "data": {
        "recipe": {
            "id": "r1",
            "title": "Tomato Soup",
            "publisher": "Soup Co",
            "source_url": "https://example.com/soup",
            "image_url": "https://example.com/soup.jpg",
            "servings": 4,
            "cooking_time": 30,
            "ingredients": [
                {"quantity": 1, "unit": "kg", "description": "tomatoes"},
                {"quantity": 0.25, "unit": "cup", "description": "cream"}
            ]
        }
    }
}"#;

fn search_body(count: usize) -> String {
    let recipes: Vec<String> = (0..count)
        .map(|i| {
            format!(
                r#"{{"id": "s{i}", "title": "Soup {i}", "publisher": "Pub", "image_url": "{i}.jpg"}}"#,
                i = i
            )
        })
        .collect();
    format!(r#"{{"data": {{"recipes": [{}]}}}}"#, recipes.join(","))
}

async fn controller(server: &ServerGuard) -> Controller {
    let store = StoreBuilder::new()
        .api_url(format!("{}/recipes", server.url()))
        .bookmark_store(MemoryBookmarkStore::new())
        .build()
        .unwrap();
    Controller::new(store)
}

#[tokio::test]
async fn test_fresh_start_shows_empty_bookmarks_message() {
    let server = Server::new_async().await;
    let controller = controller(&server).await;
    assert!(controller
        .views()
        .bookmarks
        .container()
        .text_content()
        .contains("No bookmarks yet"));
}

#[tokio::test]
async fn test_search_then_paginate() {
    let mut server = Server::new_async().await;
    let _mock = server
        .mock("GET", "/recipes/")
        .match_query(Matcher::UrlEncoded("search".into(), "soup".into()))
        .with_status(200)
        .with_body(search_body(23))
        .create_async()
        .await;
    let mut controller = controller(&server).await;

    controller.dispatch(Command::Search("soup".to_string())).await;
    let results = controller.views().results.container().inner_html();
    assert_eq!(results.matches(r#"class="preview""#).count(), 10);
    let pagination = controller.views().pagination.container().text_content();
    assert!(pagination.contains("Page 2"));
    assert!(!pagination.contains("Page 0"));

    controller.dispatch(Command::GoToPage(3)).await;
    let results = controller.views().results.container().inner_html();
    assert_eq!(results.matches(r#"class="preview""#).count(), 3);
    assert!(results.contains("Soup 22"));
    let pagination = controller.views().pagination.container().text_content();
    assert!(pagination.contains("Page 2"));
    assert!(!pagination.contains("Page 4"));
}

#[tokio::test]
async fn test_failed_search_renders_error() {
    let mut server = Server::new_async().await;
    let _mock = server
        .mock("GET", "/recipes/")
        .match_query(Matcher::Any)
        .with_status(500)
        .with_body(r#"{"status": "error", "message": "Server exploded"}"#)
        .create_async()
        .await;
    let mut controller = controller(&server).await;

    controller.dispatch(Command::Search("soup".to_string())).await;
    let text = controller.views().results.container().text_content();
    assert!(text.contains("Server exploded (500)"));
    assert!(controller.store().search().results.is_empty());
}

#[tokio::test]
async fn test_servings_and_bookmark_patch_recipe_view() {
    let mut server = Server::new_async().await;
    let _mock = server
        .mock("GET", "/recipes/r1")
        .with_status(200)
        .with_body(RECIPE)
        .create_async()
        .await;
    let mut controller = controller(&server).await;

    controller.dispatch(Command::Navigate("#r1".to_string())).await;
    assert_eq!(controller.location(), Some("r1"));
    let before = controller.views().recipe.container().root().descendant_elements();

    controller.dispatch(Command::UpdateServings(8)).await;
    let html = controller.views().recipe.container().inner_html();
    assert!(html.contains(r#"<div class="recipe__quantity">2</div>"#));
    assert!(html.contains(r#"<div class="recipe__quantity">1/2</div>"#));
    let after = controller.views().recipe.container().root().descendant_elements();
    assert!(before.iter().zip(&after).all(|(a, b)| a.ptr_eq(b)));

    controller.dispatch(Command::ToggleBookmark).await;
    assert!(controller.store().is_bookmarked("r1"));
    assert!(controller
        .views()
        .recipe
        .container()
        .inner_html()
        .contains("#icon-bookmark-fill"));
    assert!(controller
        .views()
        .bookmarks
        .container()
        .text_content()
        .contains("Tomato Soup"));

    controller.dispatch(Command::ToggleBookmark).await;
    assert!(!controller.store().is_bookmarked("r1"));
    assert!(controller
        .views()
        .bookmarks
        .container()
        .text_content()
        .contains("No bookmarks yet"));
}

#[tokio::test]
async fn test_missing_recipe_renders_error() {
    let mut server = Server::new_async().await;
    let _mock = server
        .mock("GET", "/recipes/gone")
        .with_status(404)
        .with_body(r#"{"status": "fail", "message": "Not here"}"#)
        .create_async()
        .await;
    let mut controller = controller(&server).await;

    controller.dispatch(Command::Navigate("gone".to_string())).await;
    assert!(controller
        .views()
        .recipe
        .container()
        .text_content()
        .contains("We could not find that recipe"));
    assert!(controller.store().recipe().is_none());
}

#[tokio::test]
async fn test_upload_moves_location_to_new_recipe() {
    let mut server = Server::new_async().await;
    let _mock = server
        .mock("POST", "/recipes/")
        .with_status(201)
        .with_body(RECIPE.replace(r#""id": "r1""#, r#""id": "mine", "key": "k""#))
        .create_async()
        .await;
    let mut controller = controller(&server).await;

    let draft = RecipeDraft::new()
        .field("title", "Tomato Soup")
        .field("cookingTime", "30")
        .field("servings", "4")
        .field("ingredient-1", "1,kg,tomatoes");
    controller.dispatch(Command::Upload(draft)).await;

    assert_eq!(controller.location(), Some("mine"));
    assert!(controller
        .views()
        .add_recipe
        .container()
        .text_content()
        .contains("Recipe was successfully uploaded :)"));
    assert!(controller.store().is_bookmarked("mine"));
}

#[tokio::test]
async fn test_run_stops_at_quit() {
    let server = Server::new_async().await;
    let mut controller = controller(&server).await;
    let (tx, rx) = command_channel();
    tx.send(Command::Show).unwrap();
    tx.send(Command::Quit).unwrap();
    tx.send(Command::Show).unwrap();

    let mut handled = 0;
    controller.run(rx, |_| handled += 1).await;
    assert_eq!(handled, 2);
}

#[tokio::test]
async fn test_rejected_search_keeps_its_error_when_opening_a_recipe() {
    let mut server = Server::new_async().await;
    let _search = server
        .mock("GET", "/recipes/")
        .match_query(Matcher::UrlEncoded("search".into(), "soup".into()))
        .with_status(200)
        .with_body(search_body(3))
        .create_async()
        .await;
    let _recipe = server
        .mock("GET", "/recipes/s1")
        .with_status(200)
        .with_body(RECIPE.replace(r#""id": "r1""#, r#""id": "s1""#))
        .create_async()
        .await;
    let mut controller = controller(&server).await;

    controller.dispatch(Command::Search("soup".to_string())).await;
    controller.dispatch(Command::Search("   ".to_string())).await;
    controller.dispatch(Command::Navigate("s1".to_string())).await;

    let results = controller.views().results.container();
    assert!(results.text_content().contains("Please enter a search query"));
    assert!(!results.inner_html().contains("preview"));
    assert!(results
        .inner_html()
        .starts_with(r#"<div class="error"><div><svg><use href="img/icons.svg#icon-alert-triangle">"#));
    assert!(controller
        .views()
        .recipe
        .container()
        .text_content()
        .contains("Tomato Soup"));
}

#[tokio::test]
async fn test_opening_a_result_highlights_it_in_place() {
    let mut server = Server::new_async().await;
    let _search = server
        .mock("GET", "/recipes/")
        .match_query(Matcher::Any)
        .with_status(200)
        .with_body(search_body(3))
        .create_async()
        .await;
    let _recipe = server
        .mock("GET", "/recipes/s1")
        .with_status(200)
        .with_body(RECIPE.replace(r#""id": "r1""#, r#""id": "s1""#))
        .create_async()
        .await;
    let mut controller = controller(&server).await;

    controller.dispatch(Command::Search("soup".to_string())).await;
    let before = controller.views().results.container().root().descendant_elements();
    controller.dispatch(Command::Navigate("s1".to_string())).await;

    let after = controller.views().results.container().root().descendant_elements();
    assert_eq!(before.len(), after.len());
    assert!(before.iter().zip(&after).all(|(a, b)| a.ptr_eq(b)));
    let html = controller.views().results.container().inner_html();
    assert_eq!(html.matches("preview__link--active").count(), 1);
    assert!(html.contains(r##"<a class="preview__link preview__link--active" href="#s1">"##));
}

#[tokio::test]
async fn test_zero_servings_shows_error_then_recovers() {
    let mut server = Server::new_async().await;
    let _mock = server
        .mock("GET", "/recipes/r1")
        .with_status(200)
        .with_body(RECIPE)
        .create_async()
        .await;
    let mut controller = controller(&server).await;

    controller.dispatch(Command::Navigate("r1".to_string())).await;
    controller.dispatch(Command::UpdateServings(0)).await;
    assert!(controller
        .views()
        .recipe
        .container()
        .text_content()
        .contains("A recipe must have at least one serving"));
    assert_eq!(controller.store().recipe().unwrap().servings, 4);

    controller.dispatch(Command::UpdateServings(2)).await;
    let html = controller.views().recipe.container().inner_html();
    assert!(!html.contains(r#"class="error""#));
    assert!(html.contains(r#"<span class="recipe__info-data recipe__info-data--people">2</span>"#));
}

#[tokio::test]
async fn test_upload_form_is_shown_on_start() {
    let server = Server::new_async().await;
    let controller = controller(&server).await;
    let form = controller.views().add_recipe.container();
    let inputs = form
        .root()
        .descendant_elements()
        .into_iter()
        .filter(|n| n.tag().as_deref() == Some("input"))
        .count();
    assert_eq!(inputs, 12);
    assert!(form.text_content().contains("Recipe data"));
}
