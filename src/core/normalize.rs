use crate::domain::model::{NormalizedEstimate, RabResult};
use regex::Regex;
use std::sync::OnceLock;

/// Rank assigned to categories whose name carries no recognized Roman
/// numeral prefix; they sort after every numbered category.
pub const UNRANKED: u32 = 999;

/// Roman numerals the upstream convention uses for category prefixes.
const ROMAN_ORDINALS: [(&str, u32); 15] = [
    ("I", 1),
    ("II", 2),
    ("III", 3),
    ("IV", 4),
    ("V", 5),
    ("VI", 6),
    ("VII", 7),
    ("VIII", 8),
    ("IX", 9),
    ("X", 10),
    ("XI", 11),
    ("XII", 12),
    ("XIII", 13),
    ("XIV", 14),
    ("XV", 15),
];

fn numeral_prefix_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^([IVX]+)\.").expect("numeral prefix pattern is valid"))
}

/// Display rank of a category name. "II. Pekerjaan Tanah" → 2;
/// anything without a leading `[IVX]+.` token → [`UNRANKED`].
pub fn category_rank(category_name: &str) -> u32 {
    let Some(caps) = numeral_prefix_regex().captures(category_name.trim()) else {
        return UNRANKED;
    };
    let token = &caps[1];
    ROMAN_ORDINALS
        .iter()
        .find(|(numeral, _)| *numeral == token)
        .map(|(_, rank)| *rank)
        .unwrap_or(UNRANKED)
}

/// Produces the display-ready view: categories in canonical Roman
/// numeral order (stable for ties), derived totals computed fresh.
/// Item order within each category is untouched. Total over any input.
pub fn normalize(result: &RabResult) -> NormalizedEstimate {
    let mut categories = result.categories.clone();
    categories.sort_by_key(|category| category_rank(&category.category_name));

    for category in &categories {
        let item_sum: f64 = category.items.iter().map(|item| item.total_price).sum();
        if (item_sum - category.subtotal).abs() > 1.0 {
            tracing::warn!(
                "Subtotal for '{}' ({}) differs from item sum ({})",
                category.category_name,
                category.subtotal,
                item_sum
            );
        }
    }

    let construction_cost: f64 = categories.iter().map(|category| category.subtotal).sum();
    let tax_amount = result.grand_total - construction_cost;
    if tax_amount < 0.0 {
        tracing::warn!(
            "Grand total {} is below the sum of subtotals {}",
            result.grand_total,
            construction_cost
        );
    }

    NormalizedEstimate {
        project_summary: result.project_summary.clone(),
        categories,
        grand_total: result.grand_total,
        estimated_duration: result.estimated_duration.clone(),
        construction_cost,
        tax_amount,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::model::{RabCategory, RabItem};

    fn category(name: &str, subtotal: f64) -> RabCategory {
        RabCategory {
            category_name: name.to_string(),
            items: vec![RabItem {
                description: format!("Pekerjaan {}", name),
                unit: "ls".to_string(),
                volume: 1.0,
                unit_price: subtotal,
                total_price: subtotal,
            }],
            subtotal,
        }
    }

    fn result_with(categories: Vec<RabCategory>, grand_total: f64) -> RabResult {
        RabResult {
            project_summary: "Ringkasan".to_string(),
            categories,
            grand_total,
            estimated_duration: "6 Bulan".to_string(),
        }
    }

    #[test]
    fn test_category_rank_table() {
        assert_eq!(category_rank("I. Pekerjaan Persiapan"), 1);
        assert_eq!(category_rank("II. Pekerjaan Tanah"), 2);
        assert_eq!(category_rank("IV. Pekerjaan Beton"), 4);
        assert_eq!(category_rank("IX. Pekerjaan Plafon"), 9);
        assert_eq!(category_rank("XII. Pekerjaan Elektrikal"), 12);
        assert_eq!(category_rank("XV. Pekerjaan Lain"), 15);
    }

    #[test]
    fn test_category_rank_sentinel() {
        assert_eq!(category_rank("Lain-lain"), UNRANKED);
        assert_eq!(category_rank("Pekerjaan IV. Beton"), UNRANKED);
        assert_eq!(category_rank("IV Pekerjaan tanpa titik"), UNRANKED);
        assert_eq!(category_rank(""), UNRANKED);
    }

    #[test]
    fn test_sort_is_stable_and_total() {
        let result = result_with(
            vec![
                category("I. A", 1.0),
                category("III. C", 3.0),
                category("II. B", 2.0),
                category("Lain-lain", 4.0),
            ],
            10.0,
        );

        let normalized = normalize(&result);
        let names: Vec<&str> = normalized
            .categories
            .iter()
            .map(|c| c.category_name.as_str())
            .collect();
        assert_eq!(names, vec!["I. A", "II. B", "III. C", "Lain-lain"]);
    }

    #[test]
    fn test_unranked_categories_keep_input_order() {
        let result = result_with(
            vec![
                category("Pekerjaan Tambahan", 1.0),
                category("Lain-lain", 2.0),
                category("I. Persiapan", 3.0),
            ],
            6.0,
        );

        let normalized = normalize(&result);
        let names: Vec<&str> = normalized
            .categories
            .iter()
            .map(|c| c.category_name.as_str())
            .collect();
        assert_eq!(
            names,
            vec!["I. Persiapan", "Pekerjaan Tambahan", "Lain-lain"]
        );
    }

    #[test]
    fn test_derived_totals_independent_of_input_order() {
        let forward = result_with(
            vec![category("I. A", 1_000_000.0), category("II. B", 2_000_000.0)],
            3_330_000.0,
        );
        let reversed = result_with(
            vec![category("II. B", 2_000_000.0), category("I. A", 1_000_000.0)],
            3_330_000.0,
        );

        for result in [forward, reversed] {
            let normalized = normalize(&result);
            assert_eq!(normalized.construction_cost, 3_000_000.0);
            assert_eq!(normalized.tax_amount, 330_000.0);
        }
    }

    #[test]
    fn test_inconsistent_grand_total_passes_through() {
        let result = result_with(vec![category("I. A", 2_000_000.0)], 1_000_000.0);
        let normalized = normalize(&result);
        assert_eq!(normalized.tax_amount, -1_000_000.0);
        assert_eq!(normalized.grand_total, 1_000_000.0);
    }

    #[test]
    fn test_item_order_within_category_untouched() {
        let mut cat = category("I. A", 5.0);
        cat.items.push(RabItem {
            description: "Kedua".to_string(),
            unit: "m2".to_string(),
            volume: 2.0,
            unit_price: 1.0,
            total_price: 2.0,
        });
        let result = result_with(vec![cat], 5.0);

        let normalized = normalize(&result);
        assert_eq!(normalized.categories[0].items[0].description, "Pekerjaan I. A");
        assert_eq!(normalized.categories[0].items[1].description, "Kedua");
    }
}
