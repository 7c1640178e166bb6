//! OpenFoodFacts response types and normalization.
//!
//! The transport lives in the CLI; this module only knows the wire shape
//! and how to turn it into a [`Product`] the staging layer can consume.

use std::future::Future;

use serde::Deserialize;

use crate::error::RemoteError;

#[derive(Debug, Deserialize)]
pub struct SearchResponse {
    #[serde(default)]
    pub products: Vec<ProductData>,
}

#[derive(Debug, Deserialize)]
pub struct ProductData {
    pub product_name: Option<String>,
    pub brands: Option<String>,
    pub id: Option<String>,
    pub nutriments: Option<Nutriments>,
}

#[derive(Debug, Deserialize, Default)]
#[allow(clippy::struct_field_names)]
pub struct Nutriments {
    #[serde(rename = "energy-kcal_100g")]
    pub energy_kcal_100g: Option<f64>,
    pub proteins_100g: Option<f64>,
    pub carbohydrates_100g: Option<f64>,
    pub fat_100g: Option<f64>,
}

/// A normalized search candidate: per-100g macros with absent fields
/// defaulted to zero, plus a display name/brand and a stable id used as a
/// selection key.
#[derive(Debug, Clone, PartialEq)]
pub struct Product {
    pub name: String,
    pub brand: String,
    pub id: String,
    pub calories_per_100g: f64,
    pub protein_per_100g: f64,
    pub carbs_per_100g: f64,
    pub fat_per_100g: f64,
}

#[must_use]
pub fn normalize(p: ProductData) -> Product {
    let name = p
        .product_name
        .filter(|n| !n.is_empty())
        .unwrap_or_else(|| "Unknown Product".to_string());
    let brand = p
        .brands
        .filter(|b| !b.is_empty())
        .unwrap_or_else(|| "Generic".to_string());
    let id = p.id.filter(|i| !i.is_empty()).unwrap_or_else(|| name.clone());
    let nut = p.nutriments.unwrap_or_default();
    Product {
        name,
        brand,
        id,
        calories_per_100g: nut.energy_kcal_100g.unwrap_or(0.0),
        protein_per_100g: nut.proteins_100g.unwrap_or(0.0),
        carbs_per_100g: nut.carbohydrates_100g.unwrap_or(0.0),
        fat_per_100g: nut.fat_100g.unwrap_or(0.0),
    }
}

/// Remote food lookup seam. The CLI implements this with reqwest; command
/// tests implement it with canned data.
pub trait FoodLookup {
    /// Free-text search returning up to five candidates.
    fn search(
        &self,
        query: &str,
    ) -> impl Future<Output = Result<Vec<Product>, RemoteError>> + Send;
}

#[cfg(test)]
mod tests {
    use super::*;

    fn full_product() -> ProductData {
        ProductData {
            product_name: Some("Nutella".to_string()),
            brands: Some("Ferrero".to_string()),
            id: Some("3017620422003".to_string()),
            nutriments: Some(Nutriments {
                energy_kcal_100g: Some(539.0),
                proteins_100g: Some(6.3),
                carbohydrates_100g: Some(57.5),
                fat_100g: Some(30.9),
            }),
        }
    }

    #[test]
    fn test_normalize_complete() {
        let p = normalize(full_product());
        assert_eq!(p.name, "Nutella");
        assert_eq!(p.brand, "Ferrero");
        assert_eq!(p.id, "3017620422003");
        assert_eq!(p.calories_per_100g, 539.0);
        assert_eq!(p.protein_per_100g, 6.3);
        assert_eq!(p.carbs_per_100g, 57.5);
        assert_eq!(p.fat_per_100g, 30.9);
    }

    #[test]
    fn test_normalize_missing_name_and_brand() {
        let mut raw = full_product();
        raw.product_name = None;
        raw.brands = Some(String::new());
        let p = normalize(raw);
        assert_eq!(p.name, "Unknown Product");
        assert_eq!(p.brand, "Generic");
    }

    #[test]
    fn test_normalize_missing_nutriments_default_to_zero() {
        let mut raw = full_product();
        raw.nutriments = None;
        let p = normalize(raw);
        assert_eq!(p.calories_per_100g, 0.0);
        assert_eq!(p.protein_per_100g, 0.0);
        assert_eq!(p.carbs_per_100g, 0.0);
        assert_eq!(p.fat_per_100g, 0.0);
    }

    #[test]
    fn test_normalize_partial_nutriments() {
        let mut raw = full_product();
        raw.nutriments = Some(Nutriments {
            energy_kcal_100g: Some(100.0),
            proteins_100g: None,
            carbohydrates_100g: None,
            fat_100g: None,
        });
        let p = normalize(raw);
        assert_eq!(p.calories_per_100g, 100.0);
        assert_eq!(p.protein_per_100g, 0.0);
    }

    #[test]
    fn test_normalize_falls_back_to_name_as_id() {
        let mut raw = full_product();
        raw.id = None;
        let p = normalize(raw);
        assert_eq!(p.id, "Nutella");
    }

    #[test]
    fn test_search_response_tolerates_missing_products() {
        let resp: SearchResponse = serde_json::from_str("{}").unwrap();
        assert!(resp.products.is_empty());
    }
}
