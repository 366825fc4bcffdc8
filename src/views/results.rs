use super::preview::{list_markup, PreviewList};
use super::View;

/// One page of search results
#[derive(Debug, Default)]
pub struct ResultsView;

impl View for ResultsView {
    type Data = PreviewList;

    fn container_class(&self) -> &'static str {
        "results"
    }

    fn generate_markup(&self, data: &PreviewList) -> String {
        list_markup(data)
    }

    fn error_message(&self) -> &str {
        "No recipes found for your query! Please try again ;)"
    }
}
