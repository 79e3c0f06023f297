use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::Path;

use crate::error::{PlannerError, Result};

/// Category reported for ingredients that match no keyword and have no override.
pub const OTHER_CATEGORY: &str = "Other";

// Iteration order here is the tie-break order: the first category whose
// keyword list matches wins, so "sugar" lands in Spices & Condiments and
// never reaches Baking.
const BUILTIN_CATEGORIES: &[(&str, &[&str])] = &[
    (
        "Meat & Protein",
        &[
            "beef", "ground beef", "steak", "chicken", "chicken breast", "chicken thigh",
            "pork", "pork chop", "turkey", "fish", "salmon", "tuna", "tilapia", "cod",
            "shrimp", "lobster", "crab", "scallops", "clams", "mussels", "lamb", "veal",
            "sausage", "bacon", "ham", "pepperoni", "salami", "prosciutto", "hot dog",
            "ground turkey", "ground pork", "ribeye", "sirloin", "brisket", "ribs",
            "chicken wings", "chicken legs", "chicken drumstick", "eggs", "egg",
            "tofu", "tempeh", "edamame", "protein powder", "deli meat", "rotisserie chicken",
        ],
    ),
    (
        "Produce",
        &[
            "lettuce", "romaine", "spinach", "kale", "arugula", "cabbage", "bok choy",
            "tomato", "tomatoes", "cherry tomato", "roma tomato", "onion", "onions",
            "red onion", "green onion", "shallot", "scallion", "garlic", "ginger",
            "pepper", "peppers", "bell pepper", "jalapeno", "serrano", "habanero",
            "carrot", "carrots", "broccoli", "cauliflower", "brussels sprouts",
            "mushroom", "mushrooms", "portobello", "shiitake", "potato", "potatoes",
            "sweet potato", "yam", "cucumber", "celery", "corn", "zucchini", "squash",
            "eggplant", "asparagus", "artichoke", "beet", "beets", "radish", "turnip",
            "avocado", "lemon", "lime", "apple", "apples", "banana", "bananas",
            "orange", "oranges", "strawberry", "strawberries", "blueberry", "blueberries",
            "raspberry", "raspberries", "blackberry", "blackberries", "grape", "grapes",
            "mango", "pineapple", "watermelon", "cantaloupe", "peach", "peaches",
            "pear", "pears", "plum", "plums", "cherry", "cherries", "kiwi", "papaya",
            "coconut", "pomegranate", "cranberry", "cranberries", "fig", "figs",
            "leek", "fennel", "parsley", "cilantro", "basil", "mint", "rosemary",
            "thyme", "sage", "dill", "chives", "green beans", "snap peas", "peas",
        ],
    ),
    (
        "Dairy",
        &[
            "cheese", "milk", "whole milk", "skim milk", "almond milk", "oat milk",
            "soy milk", "coconut milk beverage", "butter", "cream", "heavy cream",
            "half and half", "yogurt", "greek yogurt", "sour cream", "cream cheese",
            "parmesan", "mozzarella", "cheddar", "gouda", "brie", "feta", "ricotta",
            "cottage cheese", "provolone", "swiss cheese", "american cheese",
            "whipped cream", "ice cream", "gelato", "ghee", "condensed milk",
            "evaporated milk", "powdered milk", "kefir", "buttermilk",
        ],
    ),
    (
        "Grains & Pasta",
        &[
            "pasta", "spaghetti", "penne", "fettuccine", "linguine", "rigatoni",
            "farfalle", "orzo", "lasagna", "noodles", "ramen", "udon", "rice noodles",
            "rice", "white rice", "brown rice", "jasmine rice", "basmati rice",
            "wild rice", "quinoa", "couscous", "barley", "farro", "bulgur",
            "bread", "white bread", "whole wheat bread", "sourdough", "baguette",
            "pita", "naan", "tortilla", "tortillas", "wrap", "flour tortilla",
            "corn tortilla", "oats", "oatmeal", "granola", "flour", "all purpose flour",
            "whole wheat flour", "almond flour", "cornmeal", "breadcrumbs", "panko",
            "cereal", "crackers", "bagel", "english muffin", "croissant", "roll",
            "bun", "hamburger bun", "hot dog bun", "cornbread", "waffle", "pancake mix",
        ],
    ),
    (
        "Spices & Condiments",
        &[
            "salt", "pepper", "black pepper", "white pepper", "cumin", "paprika",
            "smoked paprika", "oregano", "basil", "thyme", "rosemary", "sage",
            "bay leaf", "bay leaves", "cinnamon", "nutmeg", "cloves", "allspice",
            "cardamom", "turmeric", "curry powder", "chili powder", "cayenne",
            "red pepper flakes", "garlic powder", "onion powder", "italian seasoning",
            "everything bagel", "seasoning", "taco seasoning", "old bay", "cajun",
            "oil", "olive oil", "vegetable oil", "canola oil", "coconut oil",
            "sesame oil", "avocado oil", "vinegar", "apple cider vinegar",
            "white vinegar", "balsamic vinegar", "red wine vinegar", "rice vinegar",
            "ketchup", "mustard", "dijon mustard", "mayo", "mayonnaise", "relish",
            "soy sauce", "tamari", "hot sauce", "sriracha", "tabasco", "worcestershire",
            "fish sauce", "oyster sauce", "hoisin sauce", "teriyaki sauce",
            "bbq sauce", "tomato paste", "tomato sauce", "marinara", "alfredo sauce",
            "ranch", "caesar dressing", "italian dressing", "honey mustard",
            "salsa", "guacamole", "hummus", "tahini", "pesto", "chimichurri",
            "honey", "maple syrup", "agave", "molasses", "jam", "jelly", "peanut butter",
            "almond butter", "nutella", "vanilla extract", "baking powder", "baking soda",
            "yeast", "sugar", "brown sugar", "powdered sugar", "cocoa powder",
        ],
    ),
    (
        "Canned & Dry Goods",
        &[
            "beans", "black beans", "kidney beans", "pinto beans", "navy beans",
            "chickpeas", "garbanzo beans", "lentils", "split peas", "edamame",
            "broth", "chicken broth", "beef broth", "vegetable broth", "stock",
            "chicken stock", "beef stock", "soup", "tomato soup", "cream of mushroom",
            "canned tomatoes", "diced tomatoes", "crushed tomatoes", "canned corn",
            "canned tuna", "canned salmon", "canned chicken", "canned beans",
            "coconut milk", "evaporated milk", "sweetened condensed milk",
            "pumpkin puree", "apple sauce", "dried fruit", "raisins", "cranberries",
            "nuts", "almonds", "walnuts", "pecans", "cashews", "peanuts", "pine nuts",
            "sunflower seeds", "pumpkin seeds", "chia seeds", "flax seeds",
            "chocolate chips", "cocoa", "protein bar", "granola bar",
        ],
    ),
    (
        "Frozen Foods",
        &[
            "frozen", "frozen vegetables", "frozen fruit", "frozen pizza",
            "frozen chicken", "frozen beef", "frozen fish", "frozen shrimp",
            "frozen corn", "frozen peas", "frozen broccoli", "frozen spinach",
            "frozen berries", "frozen mango", "ice cream", "frozen yogurt",
            "frozen waffles", "frozen burritos", "frozen meals",
        ],
    ),
    (
        "Beverages",
        &[
            "water", "sparkling water", "juice", "orange juice", "apple juice",
            "coffee", "tea", "green tea", "black tea", "herbal tea", "espresso",
            "soda", "diet soda", "sports drink", "energy drink", "beer", "wine",
            "red wine", "white wine", "champagne", "liquor", "vodka", "whiskey",
            "rum", "tequila", "gin", "kombucha", "lemonade", "smoothie",
        ],
    ),
    (
        "Baking",
        &[
            "flour", "sugar", "brown sugar", "powdered sugar", "baking powder",
            "baking soda", "yeast", "vanilla", "vanilla extract", "cocoa powder",
            "chocolate chips", "sprinkles", "food coloring", "pie crust",
            "puff pastry", "phyllo dough", "cake mix", "brownie mix", "cookie mix",
        ],
    ),
    (
        "Deli & Bakery",
        &[
            "deli", "sliced turkey", "sliced ham", "sliced chicken", "roast beef",
            "pastrami", "corned beef", "salami", "pepperoni", "bologna",
            "fresh bread", "sourdough loaf", "french bread", "ciabatta",
            "focaccia", "fresh pasta", "fresh tortillas",
        ],
    ),
];

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct Category {
    pub name: String,
    pub keywords: Vec<String>,
}

/// Ordered category → keywords table used by the classifier.
///
/// Keywords are stored lowercase. Lists may overlap between categories; the
/// category that comes first in the table wins.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeywordTable {
    categories: Vec<Category>,
}

impl KeywordTable {
    pub fn new<I, N, K, S>(categories: I) -> Result<Self>
    where
        I: IntoIterator<Item = (N, K)>,
        N: Into<String>,
        K: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut seen = HashSet::new();
        let mut table = Vec::new();

        for (name, keywords) in categories {
            // Category names must be non-blank, unique and not the fallback name.
            let name = name.into().trim().to_string();
            if name.is_empty() {
                return Err(PlannerError::BlankName("Category name"));
            }
            if name == OTHER_CATEGORY {
                return Err(PlannerError::ReservedCategory(name));
            }
            if !seen.insert(name.clone()) {
                return Err(PlannerError::DuplicateCategory(name));
            }

            // Matching runs against lowercased ingredients, so keywords are stored lowercase.
            let keywords = keywords
                .into_iter()
                .map(|k| k.as_ref().trim().to_lowercase())
                .filter(|k| !k.is_empty())
                .collect();
            table.push(Category { name, keywords });
        }

        Ok(Self { categories: table })
    }

    /// Loads a table from a JSON object of `{"Category": ["keyword", ...]}`.
    /// Key order in the document becomes the matching order.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let raw: IndexMap<String, Vec<String>> = serde_json::from_str(json)?;
        Self::new(raw)
    }

    pub fn from_json_file(path: &Path) -> Result<Self> {
        let json = std::fs::read_to_string(path).map_err(|e| PlannerError::io(path, e))?;
        Self::from_json_str(&json)
    }

    pub fn categories(&self) -> &[Category] {
        &self.categories
    }

    pub fn category_names(&self) -> impl Iterator<Item = &str> {
        self.categories.iter().map(|c| c.name.as_str())
    }

    pub fn contains_category(&self, name: &str) -> bool {
        name == OTHER_CATEGORY || self.categories.iter().any(|c| c.name == name)
    }

    /// Returns the first `(category, keyword)` whose keyword is a substring of
    /// the lowercased ingredient.
    pub fn match_keyword(&self, ingredient: &str) -> Option<(&str, &str)> {
        let lowered = ingredient.to_lowercase();
        // Categories in table order; the first one with any matching keyword wins.
        self.categories.iter().find_map(|category| {
            category
                .keywords
                .iter()
                .find(|keyword| lowered.contains(keyword.as_str()))
                .map(|keyword| (category.name.as_str(), keyword.as_str()))
        })
    }

    pub fn len(&self) -> usize {
        self.categories.len()
    }

    pub fn is_empty(&self) -> bool {
        self.categories.is_empty()
    }
}

impl Default for KeywordTable {
    fn default() -> Self {
        Self {
            categories: BUILTIN_CATEGORIES
                .iter()
                .map(|(name, keywords)| Category {
                    name: (*name).to_string(),
                    keywords: keywords.iter().map(|k| (*k).to_string()).collect(),
                })
                .collect(),
        }
    }
}
