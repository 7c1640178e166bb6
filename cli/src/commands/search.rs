use anyhow::{Result, bail};
use serde::Serialize;
use std::path::Path;
use std::process;
use tabled::{
    Table, Tabled,
    settings::{Alignment, Modify, Style, object::Columns},
};

use diario_core::openfoodfacts::{FoodLookup, Product};
use diario_core::presets::{self, COMMON_FOODS, Preset};
use diario_core::StagedImport;

use crate::staging;

use super::helpers::{json_error, truncate};

/// Search the remote food database; optionally stage one of the results.
pub(crate) async fn cmd_search(
    off: &impl FoodLookup,
    staged_path: &Path,
    query: &str,
    import: Option<usize>,
    portion: f64,
    json: bool,
) -> Result<()> {
    let products = match off.search(query).await {
        Ok(p) => p,
        Err(e) => {
            if json {
                println!("{}", json_error(&e.to_string()));
                process::exit(1);
            }
            return Err(e.into());
        }
    };

    if products.is_empty() {
        if json {
            println!("[]");
        } else {
            eprintln!("No results. Try a more specific name (e.g. 'Quaker Oats').");
        }
        process::exit(2);
    }

    if let Some(n) = import {
        if n < 1 || n > products.len() {
            let count = products.len();
            bail!("--import {n} is out of range (search returned {count} results)");
        }
        let staged = StagedImport::from_product(&products[n - 1], portion);
        stage(staged_path, staged, json)?;
        return Ok(());
    }

    if json {
        #[derive(Serialize)]
        struct ProductJson<'a> {
            name: &'a str,
            brand: &'a str,
            id: &'a str,
            calories_per_100g: f64,
            protein_per_100g: f64,
            carbs_per_100g: f64,
            fat_per_100g: f64,
        }
        let out: Vec<ProductJson> = products
            .iter()
            .map(|p| ProductJson {
                name: &p.name,
                brand: &p.brand,
                id: &p.id,
                calories_per_100g: p.calories_per_100g,
                protein_per_100g: p.protein_per_100g,
                carbs_per_100g: p.carbs_per_100g,
                fat_per_100g: p.fat_per_100g,
            })
            .collect();
        println!("{}", serde_json::to_string_pretty(&out)?);
    } else {
        print_product_table(&products);
        println!("\nStage one with: diario search '{query}' --import <#> [--portion 1.5]");
    }

    Ok(())
}

/// Stage a preset multiplied by a quantity.
pub(crate) fn cmd_quick(staged_path: &Path, name: &str, qty: f64, json: bool) -> Result<()> {
    let Some(preset) = presets::find(name) else {
        let available: Vec<&str> = COMMON_FOODS.iter().map(|p| p.name).collect();
        bail!(
            "Unknown staple '{name}'. Available: {}",
            available.join(", ")
        );
    };
    let staged = StagedImport::from_preset(preset, qty);
    stage(staged_path, staged, json)
}

/// Show the pending staged import, if any.
pub(crate) fn cmd_staged(staged_path: &Path, json: bool) -> Result<()> {
    let slot = staging::load_slot(staged_path)?;
    match slot.peek() {
        Some(staged) => {
            if json {
                println!("{}", serde_json::to_string_pretty(staged)?);
            } else {
                print_staged(staged);
                println!("Run 'diario save' to log it.");
            }
        }
        None => {
            if json {
                println!("null");
            } else {
                eprintln!("Nothing staged.");
            }
            process::exit(2);
        }
    }
    Ok(())
}

/// List the built-in staples.
pub(crate) fn cmd_presets(json: bool) -> Result<()> {
    if json {
        #[derive(Serialize)]
        struct PresetJson {
            name: &'static str,
            calories: f64,
            protein_g: f64,
            carbs_g: f64,
            fat_g: f64,
        }
        let out: Vec<PresetJson> = COMMON_FOODS
            .iter()
            .map(|p| PresetJson {
                name: p.name,
                calories: p.calories,
                protein_g: p.protein_g,
                carbs_g: p.carbs_g,
                fat_g: p.fat_g,
            })
            .collect();
        println!("{}", serde_json::to_string_pretty(&out)?);
        return Ok(());
    }

    #[derive(Tabled)]
    struct PresetRow {
        #[tabled(rename = "Staple")]
        name: &'static str,
        #[tabled(rename = "Calories")]
        calories: String,
        #[tabled(rename = "Protein")]
        protein: String,
        #[tabled(rename = "Carbs")]
        carbs: String,
        #[tabled(rename = "Fat")]
        fat: String,
    }

    let rows: Vec<PresetRow> = COMMON_FOODS
        .iter()
        .map(|p: &Preset| PresetRow {
            name: p.name,
            calories: format!("{:.0}", p.calories),
            protein: format!("{}g", p.protein_g),
            carbs: format!("{}g", p.carbs_g),
            fat: format!("{}g", p.fat_g),
        })
        .collect();

    let table = Table::new(&rows)
        .with(Style::rounded())
        .with(Modify::new(Columns::new(1..)).with(Alignment::right()))
        .to_string();
    println!("{table}");

    Ok(())
}

/// Replace the slot (last writer wins) and mirror it to disk.
fn stage(staged_path: &Path, staged: StagedImport, json: bool) -> Result<()> {
    let mut slot = staging::load_slot(staged_path)?;
    slot.stage(staged);
    staging::store_slot(staged_path, &slot)?;

    let staged = slot.peek().expect("slot was just staged");
    if json {
        println!("{}", serde_json::to_string_pretty(staged)?);
    } else {
        print_staged(staged);
        println!("Run 'diario save' to log it, or stage something else to replace it.");
    }
    Ok(())
}

fn print_staged(staged: &StagedImport) {
    let name = &staged.name;
    let cal = staged.calories;
    let p = staged.protein_g;
    let c = staged.carbs_g;
    let f = staged.fat_g;
    println!("Staged: {name} — {cal:.0} kcal | P:{p:.1}g C:{c:.1}g F:{f:.1}g");
}

fn print_product_table(products: &[Product]) {
    #[derive(Tabled)]
    struct ProductRow {
        #[tabled(rename = "#")]
        idx: usize,
        #[tabled(rename = "Name")]
        name: String,
        #[tabled(rename = "Brand")]
        brand: String,
        #[tabled(rename = "Cal/100g")]
        calories: String,
        #[tabled(rename = "P/100g")]
        protein: String,
        #[tabled(rename = "C/100g")]
        carbs: String,
        #[tabled(rename = "F/100g")]
        fat: String,
    }

    let rows: Vec<ProductRow> = products
        .iter()
        .enumerate()
        .map(|(i, p)| ProductRow {
            idx: i + 1,
            name: truncate(&p.name, 35),
            brand: truncate(&p.brand, 20),
            calories: format!("{:.0}", p.calories_per_100g),
            protein: format!("{:.1}", p.protein_per_100g),
            carbs: format!("{:.1}", p.carbs_per_100g),
            fat: format!("{:.1}", p.fat_per_100g),
        })
        .collect();

    let table = Table::new(&rows)
        .with(Style::rounded())
        .with(Modify::new(Columns::new(3..7)).with(Alignment::right()))
        .to_string();
    println!("{table}");
}

#[cfg(test)]
mod tests {
    use super::*;
    use diario_core::RemoteError;

    struct CannedLookup {
        products: Vec<Product>,
    }

    impl FoodLookup for CannedLookup {
        async fn search(&self, _query: &str) -> Result<Vec<Product>, RemoteError> {
            Ok(self.products.clone())
        }
    }

    struct FailingLookup;

    impl FoodLookup for FailingLookup {
        async fn search(&self, _query: &str) -> Result<Vec<Product>, RemoteError> {
            Err(RemoteError::Timeout)
        }
    }

    fn oats() -> Product {
        Product {
            name: "Quaker Oats".to_string(),
            brand: "Quaker".to_string(),
            id: "123".to_string(),
            calories_per_100g: 389.0,
            protein_per_100g: 16.2,
            carbs_per_100g: 66.4,
            fat_per_100g: 6.8,
        }
    }

    #[tokio::test]
    async fn test_search_import_stages_selected_product() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("staged.json");
        let lookup = CannedLookup {
            products: vec![oats()],
        };

        cmd_search(&lookup, &path, "oats", Some(1), 0.5, false)
            .await
            .unwrap();

        let slot = staging::load_slot(&path).unwrap();
        let staged = slot.peek().unwrap();
        assert_eq!(staged.name, "Quaker Oats (Quaker)");
        assert_eq!(staged.calories, 194.5);
        assert_eq!(staged.protein_g, 8.1);
    }

    #[tokio::test]
    async fn test_search_import_out_of_range_stages_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("staged.json");
        let lookup = CannedLookup {
            products: vec![oats()],
        };

        let err = cmd_search(&lookup, &path, "oats", Some(4), 1.0, false)
            .await
            .unwrap_err();
        assert!(err.to_string().contains("out of range"));
        assert!(staging::load_slot(&path).unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_search_failure_leaves_staged_untouched() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("staged.json");

        let lookup = CannedLookup {
            products: vec![oats()],
        };
        cmd_search(&lookup, &path, "oats", Some(1), 1.0, false)
            .await
            .unwrap();

        let err = cmd_search(&FailingLookup, &path, "oats", Some(1), 1.0, false)
            .await
            .unwrap_err();
        assert!(err.to_string().contains("timed out"));
        let slot = staging::load_slot(&path).unwrap();
        assert_eq!(slot.peek().unwrap().name, "Quaker Oats (Quaker)");
    }
}
