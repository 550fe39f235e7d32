// ABOUTME: Prompt templates sent to the vision/reasoning service
// ABOUTME: Both prompts pin the response contract to a JSON array the parser can extract
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Fridge Chef Contributors

/// Prompt for the image-analysis call. The JSON-array contract here is what
/// the strict parse tier expects.
#[must_use]
pub const fn image_analysis_prompt() -> &'static str {
    "Please identify all food items visible in this image. For each item, \
     provide its name and category (vegetable, meat, grain, etc.). Format \
     your response as a JSON array with objects containing 'name' and \
     'category' properties."
}

/// Prompt for the recipe-suggestion call
#[must_use]
pub fn recipe_suggestion_prompt(ingredient_names: &[String], allergies: &[String]) -> String {
    let ingredients_list = ingredient_names.join(", ");
    let allergies_list = if allergies.is_empty() {
        "none".to_owned()
    } else {
        allergies.join(", ")
    };

    format!(
        "Based on these ingredients: {ingredients_list}, suggest 3-5 recipes \
         that could be made with them. The user has the following allergies: \
         {allergies_list}. Format your response as a JSON array with objects \
         containing 'name', 'ingredients', 'instructions' (as an array of \
         steps), 'allergens', 'prepTime', 'cookTime', 'servings', and \
         'difficulty' properties."
    )
}
