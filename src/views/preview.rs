use html_escape::{encode_double_quoted_attribute, encode_text};

use super::{Blank, ICONS};
use crate::model::{Recipe, SearchResult};

/// Recipe previews plus the id of the recipe currently open
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PreviewList {
    pub items: Vec<SearchResult>,
    pub active_id: Option<String>,
}

impl PreviewList {
    pub fn new(items: Vec<SearchResult>, active_id: Option<&str>) -> Self {
        PreviewList {
            items,
            active_id: active_id.map(str::to_string),
        }
    }

    pub fn from_recipes(recipes: &[Recipe], active_id: Option<&str>) -> Self {
        Self::new(recipes.iter().map(SearchResult::from).collect(), active_id)
    }
}

impl Blank for PreviewList {
    fn is_blank(&self) -> bool {
        self.items.is_empty()
    }
}

pub(super) fn list_markup(list: &PreviewList) -> String {
    list.items
        .iter()
        .map(|item| preview_markup(item, list.active_id.as_deref() == Some(item.id.as_str())))
        .collect()
}

fn preview_markup(item: &SearchResult, active: bool) -> String {
    let link_class = if active {
        "preview__link preview__link--active"
    } else {
        "preview__link"
    };
    let user_class = if item.key.is_some() { "" } else { "hidden" };

    format!(
        concat!(
            r##"<li class="preview"><a class="{link_class}" href="#{id}">"##,
            r#"<figure class="preview__fig"><img src="{image}" alt="{alt}"></figure>"#,
            r#"<div class="preview__data"><h4 class="preview__title">{title}</h4>"#,
            r#"<p class="preview__publisher">{publisher}</p>"#,
            r#"<div class="preview__user-generated {user_class}"><svg><use href="{icons}#icon-user"></use></svg></div>"#,
            r#"</div></a></li>"#
        ),
        link_class = link_class,
        id = encode_double_quoted_attribute(&item.id),
        image = encode_double_quoted_attribute(&item.image),
        alt = encode_double_quoted_attribute(&item.title),
        title = encode_text(&item.title),
        publisher = encode_text(&item.publisher),
        user_class = user_class,
        icons = ICONS,
    )
}
