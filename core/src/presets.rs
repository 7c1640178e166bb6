//! Built-in staple foods for quick logging, with fixed per-item macros.

/// A quick-add staple: macros are per listed portion, not per 100g.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Preset {
    pub name: &'static str,
    pub calories: f64,
    pub protein_g: f64,
    pub carbs_g: f64,
    pub fat_g: f64,
}

pub const COMMON_FOODS: &[Preset] = &[
    Preset {
        name: "Egg (Large)",
        calories: 70.0,
        protein_g: 6.0,
        carbs_g: 0.0,
        fat_g: 5.0,
    },
    Preset {
        name: "Chicken Breast (100g)",
        calories: 165.0,
        protein_g: 31.0,
        carbs_g: 0.0,
        fat_g: 3.6,
    },
    Preset {
        name: "White Rice (1 cup cooked)",
        calories: 205.0,
        protein_g: 4.3,
        carbs_g: 45.0,
        fat_g: 0.4,
    },
    Preset {
        name: "Greek Yogurt (100g)",
        calories: 59.0,
        protein_g: 10.0,
        carbs_g: 3.6,
        fat_g: 0.4,
    },
    Preset {
        name: "Apple (Medium)",
        calories: 95.0,
        protein_g: 0.5,
        carbs_g: 25.0,
        fat_g: 0.3,
    },
    Preset {
        name: "Banana (Medium)",
        calories: 105.0,
        protein_g: 1.3,
        carbs_g: 27.0,
        fat_g: 0.4,
    },
    Preset {
        name: "Oatmeal (1 cup cooked)",
        calories: 150.0,
        protein_g: 6.0,
        carbs_g: 27.0,
        fat_g: 3.0,
    },
    Preset {
        name: "Avocado (Half)",
        calories: 160.0,
        protein_g: 2.0,
        carbs_g: 8.5,
        fat_g: 15.0,
    },
];

/// Look up a preset by name, case-insensitively. A unique prefix also
/// matches, so `diario quick egg` works without the full label.
#[must_use]
pub fn find(name: &str) -> Option<&'static Preset> {
    let query = name.trim();
    if let Some(exact) = COMMON_FOODS
        .iter()
        .find(|p| p.name.eq_ignore_ascii_case(query))
    {
        return Some(exact);
    }
    let lower = query.to_lowercase();
    let mut matches = COMMON_FOODS
        .iter()
        .filter(|p| p.name.to_lowercase().starts_with(&lower));
    match (matches.next(), matches.next()) {
        (Some(p), None) => Some(p),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_find_exact_case_insensitive() {
        let p = find("egg (large)").unwrap();
        assert_eq!(p.name, "Egg (Large)");
        assert_eq!(p.calories, 70.0);
    }

    #[test]
    fn test_find_unique_prefix() {
        assert_eq!(find("banana").unwrap().name, "Banana (Medium)");
        assert_eq!(find("Oat").unwrap().name, "Oatmeal (1 cup cooked)");
    }

    #[test]
    fn test_find_unknown() {
        assert!(find("pizza").is_none());
        assert!(find("").is_none());
    }

    #[test]
    fn test_catalog_has_eight_staples() {
        assert_eq!(COMMON_FOODS.len(), 8);
    }
}
