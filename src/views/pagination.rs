use super::{View, ICONS};
use crate::model::SearchState;

#[derive(Debug, Default)]
pub struct PaginationView;

impl View for PaginationView {
    type Data = SearchState;

    fn container_class(&self) -> &'static str {
        "pagination"
    }

    /// First page shows only "next", last page only "prev", pages in between
    /// both, and a single page nothing.
    fn generate_markup(&self, search: &SearchState) -> String {
        let current = search.page;
        let pages = search.num_pages();

        if current == 1 && pages > 1 {
            return next_button(current + 1);
        }
        if current == pages && pages > 1 {
            return prev_button(current.saturating_sub(1));
        }
        if current < pages {
            return format!(
                "{}{}",
                prev_button(current.saturating_sub(1)),
                next_button(current + 1)
            );
        }
        String::new()
    }
}

fn prev_button(page: usize) -> String {
    format!(
        r#"<button data-goto="{page}" class="btn--inline pagination__btn--prev"><svg class="search__icon"><use href="{icons}#icon-arrow-left"></use></svg><span>Page {page}</span></button>"#,
        page = page,
        icons = ICONS
    )
}

fn next_button(page: usize) -> String {
    format!(
        r#"<button data-goto="{page}" class="btn--inline pagination__btn--next"><span>Page {page}</span><svg class="search__icon"><use href="{icons}#icon-arrow-right"></use></svg></button>"#,
        page = page,
        icons = ICONS
    )
}
