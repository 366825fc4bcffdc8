use super::preview::{list_markup, PreviewList};
use super::View;

#[derive(Debug, Default)]
pub struct BookmarksView;

impl View for BookmarksView {
    type Data = PreviewList;

    fn container_class(&self) -> &'static str {
        "bookmarks__list"
    }

    fn generate_markup(&self, data: &PreviewList) -> String {
        list_markup(data)
    }

    fn error_message(&self) -> &str {
        "No bookmarks yet. Find a nice recipe and bookmark it :)"
    }
}
