use html_escape::encode_double_quoted_attribute;

use super::{Blank, View};
use crate::draft::RecipeDraft;

const INGREDIENT_SLOTS: usize = 6;

const DATA_FIELDS: &[(&str, &str, &str)] = &[
    ("title", "Title", "text"),
    ("sourceUrl", "URL", "text"),
    ("image", "Image URL", "text"),
    ("publisher", "Publisher", "text"),
    ("cookingTime", "Prep time", "number"),
    ("servings", "Servings", "number"),
];

/// The upload form, pre-filled from a draft
#[derive(Debug, Default)]
pub struct AddRecipeView;

impl Blank for RecipeDraft {
    fn is_blank(&self) -> bool {
        false
    }
}

impl View for AddRecipeView {
    type Data = RecipeDraft;

    fn container_class(&self) -> &'static str {
        "upload"
    }

    fn generate_markup(&self, draft: &RecipeDraft) -> String {
        let mut markup = String::from(
            r#"<div class="upload__column"><h3 class="upload__heading">Recipe data</h3>"#,
        );
        for (name, label, kind) in DATA_FIELDS {
            markup.push_str(&input(name, label, kind, draft.get(name).unwrap_or_default(), ""));
        }
        markup.push_str(
            r#"</div><div class="upload__column"><h3 class="upload__heading">Ingredients</h3>"#,
        );
        for slot in 1..=INGREDIENT_SLOTS {
            let name = format!("ingredient-{}", slot);
            markup.push_str(&input(
                &name,
                &format!("Ingredient {}", slot),
                "text",
                draft.get(&name).unwrap_or_default(),
                "Format: 'Quantity,Unit,Description'",
            ));
        }
        markup.push_str(r#"</div><button class="btn upload__btn"><span>Upload</span></button>"#);
        markup
    }

    fn error_message(&self) -> &str {
        "Wrong ingredient format! Please use the correct format :)"
    }

    fn message(&self) -> &str {
        "Recipe was successfully uploaded :)"
    }
}

fn input(name: &str, label: &str, kind: &str, value: &str, placeholder: &str) -> String {
    format!(
        r#"<label>{label}</label><input value="{value}" name="{name}" type="{kind}" placeholder="{placeholder}">"#,
        label = label,
        value = encode_double_quoted_attribute(value),
        name = name,
        kind = kind,
        placeholder = encode_double_quoted_attribute(placeholder),
    )
}
