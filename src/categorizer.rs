/// Category vocabulary in the order a typical store is walked. Used whenever
/// no supermarket layout is selected.
pub const DEFAULT_CATEGORY_ORDER: &[&str] = &[
    "Produce",
    "Bakery",
    "Dairy & Eggs",
    "Meat & Seafood",
    "Frozen",
    "Pantry",
    "Canned Goods",
    "Grains & Pasta",
    "Condiments & Sauces",
    "Spices & Seasonings",
    "Snacks",
    "Beverages",
    "Household",
];

/// Label for items no keyword matched.
pub const UNCATEGORIZED: &str = "Other";

// Checked top to bottom, so more specific words sit in earlier rows
// ("eggplant" must hit Produce before "egg" hits Dairy & Eggs, "frozen peas"
// must hit Frozen before "peas" hits Produce, "foil" must hit Household
// before "oil" hits Pantry).
const CATEGORY_KEYWORDS: &[(&str, &[&str])] = &[
    ("Frozen", &["frozen", "ice cream", "popsicle", "fish fingers"]),
    (
        "Household",
        &["soap", "detergent", "paper towel", "toilet paper", "foil", "trash bag", "sponge"],
    ),
    ("Canned Goods", &["canned", "tinned", "can of", "chickpeas", "kidney beans", "tuna"]),
    (
        "Produce",
        &[
            "eggplant", "apple", "banana", "lemon", "lime", "orange", "berries", "grape",
            "avocado", "tomato", "potato", "onion", "garlic", "carrot", "celery", "lettuce",
            "spinach", "kale", "cucumber", "pepper", "zucchini", "broccoli", "cauliflower",
            "mushroom", "ginger", "herb", "basil", "cilantro", "parsley", "peas", "cabbage",
            "melon", "fruit", "vegetable",
        ],
    ),
    (
        "Dairy & Eggs",
        &[
            "milk", "cheese", "yogurt", "yoghurt", "butter", "cream", "egg", "feta", "parmesan",
            "mozzarella",
        ],
    ),
    (
        "Meat & Seafood",
        &[
            "chicken", "beef", "pork", "lamb", "turkey", "bacon", "sausage", "ham", "mince",
            "steak", "salmon", "shrimp", "prawn", "fish", "cod",
        ],
    ),
    ("Bakery", &["bread", "bagel", "baguette", "tortilla", "bun", "croissant", "pita"]),
    (
        "Grains & Pasta",
        &["rice", "pasta", "spaghetti", "noodle", "quinoa", "couscous", "oats", "barley", "lentil"],
    ),
    (
        "Condiments & Sauces",
        &[
            "ketchup", "mustard", "mayo", "soy sauce", "vinegar", "sauce", "salsa", "dressing",
            "pesto",
        ],
    ),
    (
        "Spices & Seasonings",
        &[
            "salt", "cumin", "paprika", "cinnamon", "oregano", "thyme", "chili", "spice", "curry",
            "vanilla",
        ],
    ),
    (
        "Pantry",
        &[
            "flour", "sugar", "oil", "honey", "baking", "yeast", "stock", "broth", "peanut butter",
            "jam",
        ],
    ),
    (
        "Snacks",
        &["chips", "crisps", "cracker", "cookie", "biscuit", "chocolate", "nuts", "popcorn"],
    ),
    ("Beverages", &["coffee", "tea", "juice", "water", "soda", "wine", "beer"]),
];

/// Guesses a category from item or ingredient text by keyword containment.
pub fn suggest_category(text: &str) -> Option<&'static str> {
    let lowered = text.to_lowercase();
    CATEGORY_KEYWORDS
        .iter()
        .find(|(_, keywords)| keywords.iter().any(|k| lowered.contains(k)))
        .map(|(category, _)| *category)
}

/// Position of `category` in `order`; anything not listed ranks after every
/// listed category.
pub fn category_rank<S: AsRef<str>>(category: Option<&str>, order: &[S]) -> usize {
    category
        .and_then(|c| order.iter().position(|o| o.as_ref().eq_ignore_ascii_case(c)))
        .unwrap_or(order.len())
}
