//! Plain-text rendering of comparison reports.

use std::fmt::{self, Write};

use comfy_table::{Cell, CellAlignment, Table, presets::UTF8_FULL_CONDENSED};
use pricing_types::{ComparisonReport, CurrencyCode};
use rust_decimal::{Decimal, RoundingStrategy};

/// Formats an amount with two decimals (half away from zero) and `,`
/// thousands separators.
pub fn format_amount(value: Decimal) -> String {
    let rounded = value.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    let fixed = format!("{:.2}", rounded);
    let (sign, unsigned) = match fixed.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", fixed.as_str()),
    };
    let (int_part, frac_part) = unsigned.split_once('.').unwrap_or((unsigned, "00"));

    let mut grouped = String::with_capacity(int_part.len() + int_part.len() / 3);
    for (idx, ch) in int_part.chars().enumerate() {
        if idx > 0 && (int_part.len() - idx) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    format!("{}{}.{}", sign, grouped, frac_part)
}

/// Ranking table, one row per priced offer. Suppliers priced with a
/// fallback rate are marked with `*`.
pub fn ranking_table(report: &ComparisonReport) -> Table {
    let mut table = Table::new();
    table.load_preset(UTF8_FULL_CONDENSED);
    table.set_header(vec![
        "Rank",
        "Supplier",
        "Original",
        "In DZD",
        "With customs",
        "With tax",
        "Final",
        "Per unit",
    ]);

    for offer in &report.offers {
        let cost = &offer.cost;
        let per_unit = cost
            .price_per_unit
            .map(format_amount)
            .unwrap_or_else(|| "n/a".to_string());
        let marker = if cost.used_fallback_rate() { "*" } else { "" };

        table.add_row(vec![
            Cell::new(format!("#{}", offer.rank)),
            Cell::new(format!("{}{}", offer.supplier_name, marker)),
            amount_cell(format!(
                "{} {}",
                format_amount(cost.original_price),
                cost.currency
            )),
            amount_cell(format_amount(cost.local_price)),
            amount_cell(format_amount(cost.with_customs)),
            amount_cell(format_amount(cost.with_tax)),
            amount_cell(format_amount(cost.final_price)),
            amount_cell(per_unit),
        ]);
    }

    table
}

fn amount_cell(text: String) -> Cell {
    Cell::new(text).set_alignment(CellAlignment::Right)
}

/// Renders the ranking table, the best-offer breakdown and any offers that
/// could not be priced.
pub fn render_report(report: &ComparisonReport) -> Result<String, fmt::Error> {
    let local = CurrencyCode::LOCAL;
    let mut out = String::new();

    writeln!(
        out,
        "Price comparison for {} (customs {}%, VAT {}%, fees {} {})",
        report.rfq_id,
        report.parameters.customs_duty_percent(),
        report.parameters.tax_percent(),
        format_amount(report.parameters.additional_fee_fixed()),
        local,
    )?;
    for rate in &report.exchange_rates {
        writeln!(
            out,
            "  1 {} = {} {} (as of {})",
            rate.currency, rate.rate, local, rate.last_updated
        )?;
    }
    writeln!(out)?;

    if report.offers.is_empty() {
        writeln!(out, "No offer could be priced.")?;
    } else {
        writeln!(out, "{}", ranking_table(report))?;
        if report.offers.iter().any(|o| o.cost.used_fallback_rate()) {
            writeln!(out, "* priced with a fallback exchange rate")?;
        }
    }

    if let Some(best) = report.best() {
        let cost = &best.cost;
        writeln!(out)?;
        writeln!(
            out,
            "Best offer: {} ({}) at {} {}",
            best.supplier_name,
            best.offer_id,
            format_amount(cost.final_price),
            local
        )?;
        if let Some(savings) = report.savings_vs_second {
            writeln!(out, "Savings vs 2nd best: {} {}", format_amount(savings), local)?;
        }

        let mut breakdown = Table::new();
        breakdown.load_preset(UTF8_FULL_CONDENSED);
        breakdown.set_header(vec!["Step", "Amount"]);
        breakdown.add_row(vec![
            Cell::new("Base price"),
            amount_cell(format!(
                "{} {}",
                format_amount(cost.original_price),
                cost.currency
            )),
        ]);
        let steps = [
            ("Converted", format_amount(cost.local_price)),
            ("Customs duties", format!("+{}", format_amount(cost.customs_amount()))),
            ("Taxes", format!("+{}", format_amount(cost.tax_amount()))),
            ("Additional fees", format!("+{}", format_amount(cost.additional_fee()))),
        ];
        for (label, amount) in steps {
            breakdown.add_row(vec![
                Cell::new(label),
                amount_cell(format!("{} {}", amount, local)),
            ]);
        }
        writeln!(out, "{}", breakdown)?;
    }

    if !report.unpriced.is_empty() {
        writeln!(out)?;
        writeln!(out, "Not priced:")?;
        for offer in &report.unpriced {
            writeln!(
                out,
                "  {} {} ({}): {}",
                offer.offer_id, offer.supplier_name, offer.currency, offer.reason
            )?;
        }
    }

    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pricing_types::{
        CostParameters, FallbackRates, MissingRatePolicy, PriceComparator, RateTable, RfqId,
        RfqSnapshot,
    };
    use rust_decimal_macros::dec;

    #[test]
    fn test_format_amount_groups_thousands() {
        assert_eq!(format_amount(dec!(30912096.25)), "30,912,096.25");
        assert_eq!(format_amount(dec!(587903.75)), "587,903.75");
        assert_eq!(format_amount(dec!(100)), "100.00");
        assert_eq!(format_amount(dec!(1000)), "1,000.00");
    }

    #[test]
    fn test_format_amount_rounds_and_signs() {
        assert_eq!(format_amount(dec!(618241.925)), "618,241.93");
        assert_eq!(format_amount(dec!(-1234.5)), "-1,234.50");
        assert_eq!(format_amount(Decimal::ZERO), "0.00");
    }

    fn report_for(json: &str, policy: MissingRatePolicy) -> ComparisonReport {
        let snapshot: RfqSnapshot = serde_json::from_str(json).unwrap();
        let rates = RateTable::new(snapshot.exchange_rates).unwrap();
        let params = CostParameters::default();
        let comparison =
            PriceComparator::new(policy.clone()).compare(&snapshot.offers, &rates, &params);
        ComparisonReport::new(RfqId::new("RFQ-2024-009"), &rates, params, &policy, comparison)
    }

    #[test]
    fn test_render_marks_unit_price_not_computable() {
        let report = report_for(
            r#"{
                "exchange_rates": [
                    {"currency": "EUR", "rate": "145.50", "last_updated": "2024-01-15"}
                ],
                "offers": [{
                    "id": "OFF-009",
                    "rfq_id": "RFQ-2024-009",
                    "supplier_id": "9",
                    "supplier_name": "Samples Only SARL",
                    "currency": "EUR",
                    "items": [{
                        "product_id": "1",
                        "product_name": "Titanium Dioxide",
                        "quantity": "0",
                        "cfr_price": "2950"
                    }],
                    "freight_price": "7500",
                    "valid_until": "2024-02-10"
                }]
            }"#,
            MissingRatePolicy::Reject,
        );

        let text = render_report(&report).unwrap();

        assert!(text.contains("Samples Only SARL"));
        assert!(text.contains("n/a"));
        assert!(text.contains("Best offer: Samples Only SARL (OFF-009)"));
        assert!(!text.contains("Savings vs 2nd best"));
    }

    #[test]
    fn test_ranking_table_stays_aligned_with_long_names() {
        let report = report_for(
            r#"{
                "exchange_rates": [
                    {"currency": "EUR", "rate": "145.50", "last_updated": "2024-01-15"}
                ],
                "offers": [
                    {
                        "id": "OFF-010",
                        "rfq_id": "RFQ-2024-009",
                        "supplier_id": "10",
                        "supplier_name": "Mediterranean Industrial Chemicals Trading Company",
                        "currency": "USD",
                        "items": [{
                            "product_id": "1",
                            "product_name": "Titanium Dioxide",
                            "quantity": "50",
                            "cfr_price": "3100"
                        }],
                        "freight_price": "8000",
                        "valid_until": "2024-02-10"
                    },
                    {
                        "id": "OFF-011",
                        "rfq_id": "RFQ-2024-009",
                        "supplier_id": "11",
                        "supplier_name": "Acme",
                        "currency": "EUR",
                        "items": [{
                            "product_id": "1",
                            "product_name": "Titanium Dioxide",
                            "quantity": "50",
                            "cfr_price": "2950"
                        }],
                        "freight_price": "7500",
                        "valid_until": "2024-02-10"
                    }
                ]
            }"#,
            MissingRatePolicy::Fallback(FallbackRates::builtin()),
        );

        let table = ranking_table(&report).to_string();
        let widths: Vec<usize> = table.lines().map(|l| l.chars().count()).collect();

        assert!(table.contains("Mediterranean Industrial Chemicals Trading Company*"));
        assert!(widths.len() > 3);
        assert!(widths.iter().all(|w| *w == widths[0]));

        let text = render_report(&report).unwrap();
        assert!(text.contains("* priced with a fallback exchange rate"));
    }
}
