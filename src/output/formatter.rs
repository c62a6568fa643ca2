use owo_colors::OwoColorize;
use std::io::IsTerminal;

use crate::valuation::{PropertyAttributes, ValuationResult};

/// Check if stdout is a TTY (for auto-detecting color support)
pub fn should_use_colors() -> bool {
    std::io::stdout().is_terminal()
}

/// Format a price with thousands separators: 12345 -> "12,345"
pub fn format_price(price: i64) -> String {
    let digits = price.unsigned_abs().to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }
    if price < 0 {
        format!("-{}", grouped)
    } else {
        grouped
    }
}

/// Format a [0,100] score with one decimal, trimming a trailing ".0"
pub fn format_score(score: f64) -> String {
    let formatted = format!("{:.1}", score);
    match formatted.strip_suffix(".0") {
        Some(whole) => whole.to_string(),
        None => formatted,
    }
}

/// Describe the property on one line: "雨湖区 / 3室2厅 / 100㎡ / 精装"
pub fn format_property(attributes: &PropertyAttributes) -> String {
    let mut parts = Vec::new();
    let location = match (attributes.district.is_empty(), attributes.sub_district.is_empty()) {
        (false, false) => format!("{} {}", attributes.district, attributes.sub_district),
        (false, true) => attributes.district.clone(),
        (true, false) => attributes.sub_district.clone(),
        (true, true) => "(unknown district)".to_string(),
    };
    parts.push(location);
    if !attributes.layout.is_empty() {
        parts.push(attributes.layout.clone());
    }
    parts.push(format!("{}㎡", format_score(attributes.area)));
    if !attributes.decoration.is_empty() {
        parts.push(attributes.decoration.clone());
    }
    parts.join(" / ")
}

/// Format a valuation result with its breakdown (multi-line)
pub fn format_result_detail(
    attributes: &PropertyAttributes,
    result: &ValuationResult,
    use_colors: bool,
) -> String {
    let mut lines = Vec::new();
    let price = format!("¥{}/㎡", format_price(result.estimated_price));
    let confidence = format!("{}%", format_score(result.confidence));

    if use_colors {
        lines.push(format!("{}", format_property(attributes).bold()));
        lines.push(format!("  Algorithm: {}", result.strategy.cyan()));
        lines.push(format!("  Estimate: {}", price.bold().green()));
        lines.push(format!("  Confidence: {}", confidence.yellow()));
    } else {
        lines.push(format_property(attributes));
        lines.push(format!("  Algorithm: {}", result.strategy));
        lines.push(format!("  Estimate: {}", price));
        lines.push(format!("  Confidence: {}", confidence));
    }
    lines.push(format!(
        "  Base price: ¥{}/㎡, final score {}",
        format_price(result.base_price.round() as i64),
        format_score(result.final_score)
    ));

    if !result.breakdown.is_empty() {
        lines.push("  Breakdown:".to_string());
        for (factor, score) in result.breakdown.iter() {
            lines.push(format!("    {:<18}{:>6}", factor.label(), format_score(score)));
        }
    }

    if let Some(ref market) = result.market_analysis {
        lines.push("  Market:".to_string());
        lines.push(format!("    {:<18}{:>6}", "Trend", format_score(market.trend_score)));
        lines.push(format!(
            "    {:<18}{:>6}",
            "Supply/demand",
            format_score(market.supply_demand_score)
        ));
        lines.push(format!(
            "    {:<18}{:>6}",
            "Price comparison",
            format_score(market.price_comparison_score)
        ));
    }

    if let Some(ref risk) = result.risk_assessment {
        lines.push("  Risk:".to_string());
        lines.push(format!("    {:<18}{:>6}", "Policy", format_score(risk.policy_risk)));
        lines.push(format!("    {:<18}{:>6}", "Market", format_score(risk.market_risk)));
        lines.push(format!("    {:<18}{:>6}", "Location", format_score(risk.location_risk)));
    }

    if let Some(ref advice) = result.investment_advice {
        if use_colors {
            lines.push(format!("  Advice: {}", advice.bold()));
        } else {
            lines.push(format!("  Advice: {}", advice));
        }
    }

    lines.join("\n")
}

/// Format results of several algorithms as a table, one line each.
/// Columns: index, algorithm, estimate, confidence
pub fn format_comparison_table(results: &[ValuationResult], use_colors: bool) -> String {
    if results.is_empty() {
        return "No valuations.".to_string();
    }

    results
        .iter()
        .enumerate()
        .map(|(idx, result)| {
            let index_str = format!("{:>2}.", idx + 1);
            let algorithm = format!("{:<14}", result.strategy.as_str());
            let price = format!("{:>10}", format!("¥{}", format_price(result.estimated_price)));
            let confidence = format!("{:>6}%", format_score(result.confidence));

            if use_colors {
                format!(
                    "{} {}{}  {}",
                    index_str.dimmed(),
                    algorithm.cyan(),
                    price.bold(),
                    confidence
                )
            } else {
                format!("{} {}{}  {}", index_str, algorithm, price, confidence)
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Format results as tab-separated values for scripting
/// Columns: algorithm, estimated price, confidence, final score (no headers, no colors)
pub fn format_tsv(results: &[ValuationResult]) -> String {
    results
        .iter()
        .map(|result| {
            format!(
                "{}\t{}\t{:.2}\t{:.2}",
                result.strategy, result.estimated_price, result.confidence, result.final_score
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}
