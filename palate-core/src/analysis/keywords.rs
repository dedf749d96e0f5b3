//! Keyword and food-entity extraction
//!
//! Runs locally with no external call. Keywords are non-stopword tokens
//! longer than three characters, ranked by frequency and then by first
//! occurrence. Entities come from small food-domain gazetteers; a plural
//! token ("mushrooms") matches its singular entry.

use crate::analysis::lexicon::tokenize;
use crate::analysis::types::FoodEntities;
use crate::config::constants::thresholds;
use indexmap::{IndexMap, IndexSet};

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Extraction {
    pub keywords: Vec<String>,
    pub entities: FoodEntities,
}

const STOPWORDS: &[&str] = &[
    "about", "above", "after", "again", "also", "always", "been", "before", "being", "both",
    "came", "come", "could", "didn't", "does", "doesn't", "doing", "done", "each", "even",
    "ever", "every", "food", "from", "further", "have", "having", "here", "into", "just",
    "like", "made", "make", "many", "more", "most", "much", "must", "next", "once", "only",
    "other", "ours", "over", "place", "quite", "really", "same", "should", "some", "still",
    "such", "than", "that", "that's", "their", "them", "then", "there", "these", "they",
    "this", "those", "through", "time", "very", "wasn't", "well", "were", "what", "when",
    "where", "which", "while", "will", "with", "would", "your",
];

const FOODS: &[&str] = &[
    "pizza", "burger", "pasta", "salad", "soup", "steak", "chicken", "fish", "rice", "noodle",
    "sushi", "curry", "sandwich", "dessert", "cake", "fries", "bread", "taco", "burrito",
    "ramen", "lasagna", "risotto", "dumpling", "wrap", "omelette", "pancake", "waffle",
    "falafel", "kebab", "salmon", "shrimp", "lamb", "pork", "beef", "tofu", "stew", "pie",
    "coffee", "tea", "juice", "smoothie", "wings", "injera",
];

const INGREDIENTS: &[&str] = &[
    "garlic", "onion", "cheese", "tomato", "pepper", "salt", "butter", "cream", "basil",
    "mushroom", "chili", "ginger", "lemon", "lime", "sugar", "honey", "olive", "cilantro",
    "coriander", "cumin", "paprika", "parsley", "mint", "sauce", "dressing", "mayo",
    "avocado", "egg", "bacon", "spinach", "potato", "carrot", "sesame", "peanut", "soy",
    "vinegar", "yogurt", "berbere",
];

const COOKING_METHODS: &[&str] = &[
    "grilled", "fried", "deep-fried", "baked", "roasted", "steamed", "boiled", "sauteed",
    "sautéed", "smoked", "braised", "poached", "seared", "barbecued", "toasted", "stewed",
    "broiled", "charred",
];

const QUALITIES: &[&str] = &[
    "fresh", "crispy", "crunchy", "tender", "juicy", "flavorful", "flavourful", "spicy",
    "salty", "sweet", "sour", "bitter", "creamy", "soggy", "greasy", "bland", "hot", "cold",
    "warm", "dry", "moist", "chewy", "rich", "light", "authentic", "homemade", "portion",
    "generous", "undercooked", "overcooked",
];

pub fn extract(text: &str) -> Extraction {
    let tokens = tokenize(text);
    Extraction {
        keywords: keywords(&tokens),
        entities: entities(&tokens),
    }
}

fn keywords(tokens: &[String]) -> Vec<String> {
    let mut counts: IndexMap<&str, usize> = IndexMap::new();
    for token in tokens {
        if token.chars().count() > thresholds::MIN_KEYWORD_CHARS
            && !STOPWORDS.contains(&token.as_str())
        {
            *counts.entry(token.as_str()).or_insert(0) += 1;
        }
    }

    let mut ranked: Vec<(&str, usize)> = counts.into_iter().collect();
    // stable sort keeps first-occurrence order among equal counts
    ranked.sort_by(|a, b| b.1.cmp(&a.1));
    ranked
        .into_iter()
        .take(thresholds::MAX_KEYWORDS)
        .map(|(word, _)| word.to_string())
        .collect()
}

fn entities(tokens: &[String]) -> FoodEntities {
    let mut foods = IndexSet::new();
    let mut ingredients = IndexSet::new();
    let mut cooking_methods = IndexSet::new();
    let mut qualities = IndexSet::new();

    for token in tokens {
        if let Some(term) = lookup(FOODS, token) {
            foods.insert(term);
        }
        if let Some(term) = lookup(INGREDIENTS, token) {
            ingredients.insert(term);
        }
        if let Some(term) = lookup(COOKING_METHODS, token) {
            cooking_methods.insert(term);
        }
        if let Some(term) = lookup(QUALITIES, token) {
            qualities.insert(term);
        }
    }

    FoodEntities {
        foods: foods.into_iter().map(str::to_string).collect(),
        ingredients: ingredients.into_iter().map(str::to_string).collect(),
        cooking_methods: cooking_methods.into_iter().map(str::to_string).collect(),
        qualities: qualities.into_iter().map(str::to_string).collect(),
    }
}

fn lookup(gazetteer: &'static [&'static str], token: &str) -> Option<&'static str> {
    let singular = token
        .strip_suffix("es")
        .filter(|stem| stem.ends_with("to") || stem.ends_with("ch"))
        .or_else(|| token.strip_suffix('s'));

    gazetteer
        .iter()
        .copied()
        .find(|term| *term == token || Some(*term) == singular)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_keywords_rank_by_frequency_then_order() {
        let extraction = extract("Spicy noodles, spicy broth and crispy spring rolls. Broth was spicy.");
        assert_eq!(extraction.keywords[0], "spicy");
        assert_eq!(extraction.keywords[1], "broth");
        assert_eq!(extraction.keywords[2], "noodles");
        assert!(!extraction.keywords.contains(&"and".to_string()));
        assert!(!extraction.keywords.contains(&"was".to_string()));
    }

    #[test]
    fn test_keywords_are_capped() {
        let text = "alpha bravo charlie delta echoes foxtrot golfing hotel india juliet kilo lima";
        let extraction = extract(text);
        assert_eq!(extraction.keywords.len(), 10);
        assert_eq!(extraction.keywords[0], "alpha");
    }

    #[test]
    fn test_entities_match_gazetteers_and_plurals() {
        let extraction = extract(
            "The grilled chicken with mushrooms and garlic was tender, but the tomatoes were cold. Fresh fresh fresh!",
        );
        assert_eq!(extraction.entities.foods, vec!["chicken"]);
        assert_eq!(extraction.entities.ingredients, vec!["mushroom", "garlic", "tomato"]);
        assert_eq!(extraction.entities.cooking_methods, vec!["grilled"]);
        assert_eq!(extraction.entities.qualities, vec!["tender", "cold", "fresh"]);
    }

    #[test]
    fn test_empty_text_has_no_entities() {
        let extraction = extract("");
        assert!(extraction.keywords.is_empty());
        assert!(extraction.entities.is_empty());
    }
}
