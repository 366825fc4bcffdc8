use html_escape::{encode_double_quoted_attribute, encode_text};

use super::{format_quantity, View, ICONS};
use crate::model::{Ingredient, Recipe};

/// The open recipe: details, servings controls, bookmark toggle, ingredients
#[derive(Debug, Default)]
pub struct RecipeView;

impl View for RecipeView {
    type Data = Recipe;

    fn container_class(&self) -> &'static str {
        "recipe"
    }

    fn generate_markup(&self, recipe: &Recipe) -> String {
        let mut markup = String::new();
        markup.push_str(&format!(
            r#"<figure class="recipe__fig"><img src="{image}" alt="{alt}" class="recipe__img"><h1 class="recipe__title"><span>{title}</span></h1></figure>"#,
            image = encode_double_quoted_attribute(&recipe.image),
            alt = encode_double_quoted_attribute(&recipe.title),
            title = encode_text(&recipe.title),
        ));

        markup.push_str(r#"<div class="recipe__details">"#);
        markup.push_str(&format!(
            r#"<div class="recipe__info"><svg class="recipe__info-icon"><use href="{icons}#icon-clock"></use></svg><span class="recipe__info-data recipe__info-data--minutes">{minutes}</span><span class="recipe__info-text">minutes</span></div>"#,
            icons = ICONS,
            minutes = format_quantity(recipe.cooking_time),
        ));
        // The "-" button never offers fewer than one serving
        markup.push_str(&format!(
            r#"<div class="recipe__info"><svg class="recipe__info-icon"><use href="{icons}#icon-users"></use></svg><span class="recipe__info-data recipe__info-data--people">{servings}</span><span class="recipe__info-text">servings</span><div class="recipe__info-buttons"><button class="btn--tiny btn--update-servings" data-update-to="{less}"><svg><use href="{icons}#icon-minus-circle"></use></svg></button><button class="btn--tiny btn--update-servings" data-update-to="{more}"><svg><use href="{icons}#icon-plus-circle"></use></svg></button></div></div>"#,
            icons = ICONS,
            servings = recipe.servings,
            less = recipe.servings.saturating_sub(1).max(1),
            more = recipe.servings.saturating_add(1),
        ));
        markup.push_str(&format!(
            r#"<div class="recipe__user-generated {hidden}"><svg><use href="{icons}#icon-user"></use></svg></div><button class="btn--round btn--bookmark"><svg><use href="{icons}#icon-bookmark{fill}"></use></svg></button></div>"#,
            hidden = if recipe.is_user_recipe() { "" } else { "hidden" },
            icons = ICONS,
            fill = if recipe.bookmarked { "-fill" } else { "" },
        ));

        markup.push_str(r#"<div class="recipe__ingredients"><h2 class="heading--2">Recipe ingredients</h2><ul class="recipe__ingredient-list">"#);
        for ingredient in &recipe.ingredients {
            markup.push_str(&ingredient_markup(ingredient));
        }
        markup.push_str("</ul></div>");

        markup.push_str(&format!(
            r#"<div class="recipe__directions"><h2 class="heading--2">How to cook it</h2><p class="recipe__directions-text">This recipe was carefully designed and tested by <span class="recipe__publisher">{publisher}</span>. Please check out directions at their website.</p><a class="btn--small recipe__btn" href="{source}" target="_blank"><span>Directions</span><svg class="search__icon"><use href="{icons}#icon-arrow-right"></use></svg></a></div>"#,
            publisher = encode_text(&recipe.publisher),
            source = encode_double_quoted_attribute(&recipe.source_url),
            icons = ICONS,
        ));
        markup
    }

    fn error_message(&self) -> &str {
        "We could not find that recipe. Please try another one!"
    }
}

fn ingredient_markup(ingredient: &Ingredient) -> String {
    let quantity = ingredient.quantity.map(format_quantity).unwrap_or_default();
    format!(
        r#"<li class="recipe__ingredient"><svg class="recipe__icon"><use href="{icons}#icon-check"></use></svg><div class="recipe__quantity">{quantity}</div><div class="recipe__description"><span class="recipe__unit">{unit}</span> {description}</div></li>"#,
        icons = ICONS,
        quantity = quantity,
        unit = encode_text(&ingredient.unit),
        description = encode_text(&ingredient.description),
    )
}
