use serde::{Deserialize, Serialize};

use crate::openfoodfacts::Product;
use crate::presets::Preset;

/// A pending candidate entry awaiting user confirmation.
///
/// Produced by the quick-add preset path or the remote search path; it only
/// becomes a durable entry once explicitly saved.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StagedImport {
    pub name: String,
    pub calories: f64,
    pub protein_g: f64,
    pub carbs_g: f64,
    pub fat_g: f64,
}

/// Values are rounded to one decimal place, matching what users see.
fn round1(v: f64) -> f64 {
    (v * 10.0).round() / 10.0
}

impl StagedImport {
    /// Preset macros multiplied by quantity.
    #[must_use]
    pub fn from_preset(preset: &Preset, quantity: f64) -> Self {
        Self {
            name: format!("{} (x{quantity})", preset.name),
            calories: round1(preset.calories * quantity),
            protein_g: round1(preset.protein_g * quantity),
            carbs_g: round1(preset.carbs_g * quantity),
            fat_g: round1(preset.fat_g * quantity),
        }
    }

    /// Remote per-100g macros multiplied by a portion multiplier.
    #[must_use]
    pub fn from_product(product: &Product, portion: f64) -> Self {
        Self {
            name: format!("{} ({})", product.name, product.brand),
            calories: round1(product.calories_per_100g * portion),
            protein_g: round1(product.protein_per_100g * portion),
            carbs_g: round1(product.carbs_per_100g * portion),
            fat_g: round1(product.fat_per_100g * portion),
        }
    }
}

/// Single-slot, last-write-wins rendezvous for the pending import.
///
/// Not a queue and never merged: staging replaces whatever was there, and
/// only consumption (save) clears it. An abandoned import just sits until
/// replaced or saved.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StagingSlot {
    current: Option<StagedImport>,
}

impl StagingSlot {
    #[must_use]
    pub fn new(current: Option<StagedImport>) -> Self {
        Self { current }
    }

    /// Replaces the slot unconditionally; whichever producer fires last wins.
    pub fn stage(&mut self, import: StagedImport) {
        self.current = Some(import);
    }

    /// Consumes and clears the slot.
    pub fn take(&mut self) -> Option<StagedImport> {
        self.current.take()
    }

    #[must_use]
    pub fn peek(&self) -> Option<&StagedImport> {
        self.current.as_ref()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.current.is_none()
    }
}
