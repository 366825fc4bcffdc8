//! Per-screen markup generators and the renderer that composes them with a
//! live [`Container`].

mod add_recipe;
mod bookmarks;
mod format;
mod pagination;
mod preview;
mod recipe;
mod results;

pub use add_recipe::AddRecipeView;
pub use bookmarks::BookmarksView;
pub use format::format_quantity;
pub use pagination::PaginationView;
pub use preview::PreviewList;
pub use recipe::RecipeView;
pub use results::ResultsView;

use html_escape::encode_text;
use log::debug;
use std::cell::Cell;

use crate::model::{Recipe, SearchState};
use crate::render::{Container, PatchStats};

/// Path of the icon sprite referenced by every view
pub const ICONS: &str = "img/icons.svg";

/// Data with nothing worth rendering gets the error placeholder instead
pub trait Blank {
    fn is_blank(&self) -> bool;
}

impl Blank for Recipe {
    fn is_blank(&self) -> bool {
        false
    }
}

impl Blank for SearchState {
    fn is_blank(&self) -> bool {
        false
    }
}

impl<T> Blank for [T] {
    fn is_blank(&self) -> bool {
        self.is_empty()
    }
}

impl<T> Blank for Vec<T> {
    fn is_blank(&self) -> bool {
        self.is_empty()
    }
}

impl<T: Blank> Blank for Option<T> {
    fn is_blank(&self) -> bool {
        self.as_ref().map_or(true, Blank::is_blank)
    }
}

/// A screen region that turns data into markup
pub trait View {
    type Data: Blank + ?Sized;

    /// CSS class of the container the view renders into
    fn container_class(&self) -> &'static str;

    fn generate_markup(&self, data: &Self::Data) -> String;

    fn error_message(&self) -> &str {
        "Something went wrong. Please try again!"
    }

    fn message(&self) -> &str {
        ""
    }
}

/// What a container currently holds
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Shown {
    Nothing,
    /// The view's own markup for some data
    Data,
    Spinner,
    Error,
    Message,
}

/// Composes a [`View`] with the live container it owns
#[derive(Debug)]
pub struct ViewRenderer<V: View> {
    view: V,
    container: Container,
    shown: Cell<Shown>,
}

impl<V: View> ViewRenderer<V> {
    pub fn new(view: V) -> Self {
        let container = Container::new("div", view.container_class());
        ViewRenderer {
            view,
            container,
            shown: Cell::new(Shown::Nothing),
        }
    }

    pub fn view(&self) -> &V {
        &self.view
    }

    pub fn view_mut(&mut self) -> &mut V {
        &mut self.view
    }

    pub fn container(&self) -> &Container {
        &self.container
    }

    pub fn shown(&self) -> Shown {
        self.shown.get()
    }

    pub fn shows_data(&self) -> bool {
        self.shown.get() == Shown::Data
    }

    /// Full render; blank data shows the error placeholder instead
    pub fn render(&self, data: &V::Data) {
        if data.is_blank() {
            self.render_error(None);
            return;
        }
        self.container.render(&self.view.generate_markup(data));
        self.shown.set(Shown::Data);
    }

    /// Markup `render` would insert, without touching the live tree
    pub fn markup(&self, data: &V::Data) -> String {
        self.view.generate_markup(data)
    }

    /// Patch the live tree in place towards the markup for `data`.
    ///
    /// A container holding anything but this view's markup has a different
    /// shape, so it gets a full render instead and no patch is reported.
    pub fn update(&self, data: &V::Data) -> PatchStats {
        if !self.shows_data() || data.is_blank() {
            debug!(
                "Container .{} holds {:?}, rendering instead of patching",
                self.view.container_class(),
                self.shown.get()
            );
            self.render(data);
            return PatchStats::default();
        }
        self.container.update(&self.view.generate_markup(data))
    }

    pub fn clear(&self) {
        self.container.clear();
        self.shown.set(Shown::Nothing);
    }

    pub fn render_spinner(&self) {
        self.container.render(&format!(
            r#"<div class="spinner"><svg><use href="{}#icon-loader"></use></svg></div>"#,
            ICONS
        ));
        self.shown.set(Shown::Spinner);
    }

    pub fn render_error(&self, message: Option<&str>) {
        let message = message.unwrap_or_else(|| self.view.error_message());
        self.container
            .render(&placeholder("error", "icon-alert-triangle", message));
        self.shown.set(Shown::Error);
    }

    pub fn render_message(&self, message: Option<&str>) {
        let message = message.unwrap_or_else(|| self.view.message());
        self.container
            .render(&placeholder("message", "icon-smile", message));
        self.shown.set(Shown::Message);
    }
}

fn placeholder(class: &str, icon: &str, message: &str) -> String {
    format!(
        r#"<div class="{}"><div><svg><use href="{}#{}"></use></svg></div><p>{}</p></div>"#,
        class,
        ICONS,
        icon,
        encode_text(message)
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    struct EchoView;

    impl View for EchoView {
        type Data = [String];

        fn container_class(&self) -> &'static str {
            "echo"
        }

        fn generate_markup(&self, data: &[String]) -> String {
            data.iter().map(|s| format!("<p>{}</p>", encode_text(s))).collect()
        }

        fn error_message(&self) -> &str {
            "Nothing to echo"
        }
    }

    #[test]
    fn test_blank_data_renders_error_placeholder() {
        let renderer = ViewRenderer::new(EchoView);
        renderer.render(&[]);
        let html = renderer.container().inner_html();
        assert!(html.starts_with(r#"<div class="error">"#));
        assert!(html.contains("<p>Nothing to echo</p>"));
    }

    #[test]
    fn test_render_then_update() {
        let renderer = ViewRenderer::new(EchoView);
        renderer.render(&["a".to_string(), "b".to_string()]);
        let first = renderer.container().root().descendant_elements();
        let stats = renderer.update(&["a".to_string(), "c".to_string()]);
        assert_eq!(stats.text_updates, 1);
        assert!(renderer.container().root().descendant_elements()[0].ptr_eq(&first[0]));
        assert_eq!(renderer.container().inner_html(), "<p>a</p><p>c</p>");
    }

    #[test]
    fn test_update_over_placeholder_renders_in_full() {
        let renderer = ViewRenderer::new(EchoView);
        renderer.render_error(Some("Please enter a search query"));
        assert_eq!(renderer.shown(), Shown::Error);

        let stats = renderer.update(&["a".to_string()]);
        assert_eq!(stats, PatchStats::default());
        assert_eq!(renderer.container().inner_html(), "<p>a</p>");
        assert!(renderer.shows_data());

        renderer.render_spinner();
        renderer.update(&["b".to_string()]);
        assert_eq!(renderer.container().inner_html(), "<p>b</p>");

        renderer.clear();
        assert_eq!(renderer.shown(), Shown::Nothing);
    }

    #[test]
    fn test_message_is_escaped() {
        let renderer = ViewRenderer::new(EchoView);
        renderer.render_message(Some("<b>done</b>"));
        assert_eq!(renderer.container().text_content(), "<b>done</b>");
        assert!(renderer.container().root().descendant_elements().len() == 5);
    }
}
