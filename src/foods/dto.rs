use serde::Deserialize;

use super::repo::{FoodFilter, NewFood};
use crate::error::AppError;

pub const MAX_FOOD_LIMIT: i64 = 100;
pub const MAX_TOP_LIMIT: i64 = 50;

#[derive(Debug, Deserialize)]
pub struct ListFoodsQuery {
    pub search: Option<String>,
    pub category: Option<String>,
    #[serde(default)]
    pub vegan_only: bool,
    #[serde(default = "default_list_limit")]
    pub limit: i64,
}
fn default_list_limit() -> i64 {
    50
}

#[derive(Debug, Deserialize)]
pub struct TopProteinQuery {
    #[serde(default = "default_top_limit")]
    pub limit: i64,
    #[serde(default = "default_true")]
    pub vegan_only: bool,
}
fn default_top_limit() -> i64 {
    10
}
fn default_true() -> bool {
    true
}

fn check_limit(limit: i64, max: i64) -> Result<(), AppError> {
    if (1..=max).contains(&limit) {
        Ok(())
    } else {
        Err(AppError::InvalidInput(format!(
            "limit must be between 1 and {max}"
        )))
    }
}

impl ListFoodsQuery {
    pub fn validate(&self) -> Result<FoodFilter<'_>, AppError> {
        check_limit(self.limit, MAX_FOOD_LIMIT)?;
        Ok(FoodFilter {
            search: self.search.as_deref().filter(|s| !s.trim().is_empty()),
            category: self.category.as_deref(),
            vegan_only: self.vegan_only,
            limit: self.limit,
        })
    }
}

impl TopProteinQuery {
    pub fn validate(&self) -> Result<FoodFilter<'static>, AppError> {
        check_limit(self.limit, MAX_TOP_LIMIT)?;
        Ok(FoodFilter {
            vegan_only: self.vegan_only,
            limit: self.limit,
            ..FoodFilter::default()
        })
    }
}

pub const SEED_FOODS: &[NewFood] = &[
    NewFood {
        name: "Tofu (Firm)",
        protein_per_100g: 17.3,
        category: "Soy Products",
        is_vegan: true,
    },
    NewFood {
        name: "Tempeh",
        protein_per_100g: 20.3,
        category: "Soy Products",
        is_vegan: true,
    },
    NewFood {
        name: "Edamame",
        protein_per_100g: 11.9,
        category: "Soy Products",
        is_vegan: true,
    },
    NewFood {
        name: "Red Lentils",
        protein_per_100g: 24.6,
        category: "Legumes",
        is_vegan: true,
    },
    NewFood {
        name: "Black Beans",
        protein_per_100g: 21.6,
        category: "Legumes",
        is_vegan: true,
    },
    NewFood {
        name: "Chickpeas",
        protein_per_100g: 19.3,
        category: "Legumes",
        is_vegan: true,
    },
    NewFood {
        name: "Peanuts",
        protein_per_100g: 25.8,
        category: "Nuts & Seeds",
        is_vegan: true,
    },
    NewFood {
        name: "Almonds",
        protein_per_100g: 21.2,
        category: "Nuts & Seeds",
        is_vegan: true,
    },
    NewFood {
        name: "Hemp Seeds",
        protein_per_100g: 31.6,
        category: "Nuts & Seeds",
        is_vegan: true,
    },
    NewFood {
        name: "Chia Seeds",
        protein_per_100g: 16.5,
        category: "Nuts & Seeds",
        is_vegan: true,
    },
    NewFood {
        name: "Quinoa",
        protein_per_100g: 14.1,
        category: "Grains",
        is_vegan: true,
    },
    NewFood {
        name: "Oats",
        protein_per_100g: 16.9,
        category: "Grains",
        is_vegan: true,
    },
    NewFood {
        name: "Seitan",
        protein_per_100g: 75.0,
        category: "Wheat Protein",
        is_vegan: true,
    },
    NewFood {
        name: "Spirulina",
        protein_per_100g: 57.5,
        category: "Supplements",
        is_vegan: true,
    },
    NewFood {
        name: "Nutritional Yeast",
        protein_per_100g: 50.0,
        category: "Supplements",
        is_vegan: true,
    },
    NewFood {
        name: "Pea Protein Powder",
        protein_per_100g: 80.0,
        category: "Supplements",
        is_vegan: true,
    },
    NewFood {
        name: "Greek Yogurt",
        protein_per_100g: 10.0,
        category: "Dairy",
        is_vegan: false,
    },
    NewFood {
        name: "Cottage Cheese",
        protein_per_100g: 11.1,
        category: "Dairy",
        is_vegan: false,
    },
];
