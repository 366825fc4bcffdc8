//! Parsing of the flat key-value upload form into a [`NewRecipe`].

use crate::error::ForkifyError;
use crate::model::{Ingredient, NewRecipe};

const INGREDIENT_PREFIX: &str = "ingredient";
const WRONG_FORMAT: &str = "Wrong ingredient format! Please use the correct format :)";

/// Form fields of a recipe upload, in form order
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RecipeDraft {
    fields: Vec<(String, String)>,
}

impl RecipeDraft {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a field, replacing an earlier value for the same key
    pub fn field(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.set(key, value);
        self
    }

    pub fn set(&mut self, key: impl Into<String>, value: impl Into<String>) {
        let key = key.into();
        let value = value.into();
        match self.fields.iter_mut().find(|(k, _)| *k == key) {
            Some(entry) => entry.1 = value,
            None => self.fields.push((key, value)),
        }
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    pub fn fields(&self) -> impl Iterator<Item = (&str, &str)> {
        self.fields.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Ingredients from every non-empty `ingredient*` field, in form order
    pub fn ingredients(&self) -> Result<Vec<Ingredient>, ForkifyError> {
        self.fields()
            .filter(|(key, value)| key.starts_with(INGREDIENT_PREFIX) && !value.is_empty())
            .map(|(_, value)| parse_ingredient(value))
            .collect()
    }

    /// Assemble the upload body. Nothing is sent or installed on failure.
    pub fn to_new_recipe(&self) -> Result<NewRecipe, ForkifyError> {
        let ingredients = self.ingredients()?;
        let servings = self.text("servings");
        let servings = servings
            .parse::<u32>()
            .ok()
            .filter(|s| *s >= 1)
            .ok_or_else(|| {
                ForkifyError::ValidationError(format!(
                    "Servings must be a whole number of at least 1, got '{}'",
                    servings
                ))
            })?;
        let cooking_time = self.text("cookingTime");
        let cooking_time = cooking_time
            .parse::<f64>()
            .ok()
            .filter(|t| t.is_finite() && *t >= 0.0)
            .ok_or_else(|| {
                ForkifyError::ValidationError(format!(
                    "Cooking time must be a non-negative number, got '{}'",
                    cooking_time
                ))
            })?;

        Ok(NewRecipe {
            title: self.text("title").to_string(),
            source_url: self.text("sourceUrl").to_string(),
            image_url: self.text("image").to_string(),
            publisher: self.text("publisher").to_string(),
            cooking_time,
            servings,
            ingredients,
        })
    }

    fn text(&self, key: &str) -> &str {
        self.get(key).map(str::trim).unwrap_or_default()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for RecipeDraft {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut draft = RecipeDraft::new();
        for (key, value) in iter {
            draft.set(key, value);
        }
        draft
    }
}

/// `"quantity,unit,description"`; the quantity may be blank
fn parse_ingredient(line: &str) -> Result<Ingredient, ForkifyError> {
    let parts: Vec<&str> = line.split(',').map(str::trim).collect();
    let [quantity, unit, description] = parts.as_slice() else {
        return Err(ForkifyError::ValidationError(WRONG_FORMAT.to_string()));
    };
    if description.is_empty() {
        return Err(ForkifyError::ValidationError(WRONG_FORMAT.to_string()));
    }
    let quantity = if quantity.is_empty() {
        None
    } else {
        let value = quantity
            .parse::<f64>()
            .ok()
            .filter(|q| q.is_finite())
            .ok_or_else(|| {
                ForkifyError::ValidationError(format!(
                    "Invalid ingredient quantity '{}'",
                    quantity
                ))
            })?;
        Some(value)
    };

    Ok(Ingredient {
        quantity,
        unit: unit.to_string(),
        description: description.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base_draft() -> RecipeDraft {
        RecipeDraft::new()
            .field("title", "Bread")
            .field("sourceUrl", "https://example.com/bread")
            .field("image", "https://example.com/bread.jpg")
            .field("publisher", "Home")
            .field("cookingTime", "60")
            .field("servings", "4")
    }

    #[test]
    fn test_blank_ingredient_fields_are_skipped() {
        let draft = base_draft()
            .field("ingredient-1", "2,kg,flour")
            .field("ingredient-2", "");
        let recipe = draft.to_new_recipe().unwrap();
        assert_eq!(
            recipe.ingredients,
            vec![Ingredient {
                quantity: Some(2.0),
                unit: "kg".to_string(),
                description: "flour".to_string(),
            }]
        );
        assert_eq!(recipe.servings, 4);
        assert_eq!(recipe.cooking_time, 60.0);
        assert_eq!(recipe.image_url, "https://example.com/bread.jpg");
    }

    #[test]
    fn test_two_field_ingredient_is_rejected() {
        let draft = base_draft().field("ingredient-1", "2,kg");
        let err = draft.to_new_recipe().unwrap_err();
        assert!(err.is_validation());
        assert!(err.to_string().contains("Wrong ingredient format"));
    }

    #[test]
    fn test_four_field_ingredient_is_rejected() {
        let err = parse_ingredient("1,kg,flour,extra").unwrap_err();
        assert!(err.is_validation());
    }

    #[test]
    fn test_blank_quantity_and_unit() {
        let ingredient = parse_ingredient(" , , salt ").unwrap();
        assert_eq!(ingredient.quantity, None);
        assert_eq!(ingredient.unit, "");
        assert_eq!(ingredient.description, "salt");
    }

    #[test]
    fn test_fractional_quantity() {
        let ingredient = parse_ingredient("0.5, cup, milk").unwrap();
        assert_eq!(ingredient.quantity, Some(0.5));
        assert_eq!(ingredient.unit, "cup");
    }

    #[test]
    fn test_non_numeric_quantity_is_rejected() {
        assert!(parse_ingredient("two,kg,flour").unwrap_err().is_validation());
    }

    #[test]
    fn test_zero_servings_is_rejected() {
        let draft = base_draft().field("servings", "0");
        assert!(draft.to_new_recipe().unwrap_err().is_validation());
    }

    #[test]
    fn test_ingredients_keep_form_order() {
        let draft: RecipeDraft = vec![
            ("ingredient-3", "3,,c"),
            ("title", "x"),
            ("ingredient-1", "1,,a"),
        ]
        .into_iter()
        .collect();
        let names: Vec<String> = draft
            .ingredients()
            .unwrap()
            .into_iter()
            .map(|i| i.description)
            .collect();
        assert_eq!(names, vec!["c", "a"]);
    }
}
