//! Plain-text tables for the terminal.

use tabled::{Table, Tabled, settings::Style};

use crate::{
    domain::CandleLabel,
    models::{PatternReport, RegimeAnalysis},
    utils::epoch_ms_to_date_string,
};

#[derive(Tabled)]
struct Field {
    #[tabled(rename = "Field")]
    name: &'static str,
    #[tabled(rename = "Value")]
    value: String,
}

impl Field {
    fn new(name: &'static str, value: impl ToString) -> Self {
        Self {
            name,
            value: value.to_string(),
        }
    }
}

#[derive(Tabled)]
struct MatchRow {
    #[tabled(rename = "End")]
    end_index: usize,
    #[tabled(rename = "Pattern dates")]
    pattern_dates: String,
    #[tabled(rename = "Next date")]
    next_date: String,
    #[tabled(rename = "Next")]
    next_label: CandleLabel,
}

#[derive(Tabled)]
struct ComponentRow {
    #[tabled(rename = "Series")]
    name: String,
    #[tabled(rename = "Value")]
    value: String,
    #[tabled(rename = "Z")]
    zscore: String,
    #[tabled(rename = "Weight")]
    weight: String,
    #[tabled(rename = "Flag at")]
    flag_threshold: String,
    #[tabled(rename = "Flagged")]
    flagged: bool,
    #[tabled(rename = "Last obs")]
    last_observed: String,
}

#[derive(Tabled)]
struct AlertRow {
    #[tabled(rename = "Date")]
    date: String,
    #[tabled(rename = "From")]
    previous: String,
    #[tabled(rename = "To")]
    regime: String,
    #[tabled(rename = "Composite")]
    composite: String,
}

fn styled<T: Tabled>(rows: Vec<T>) -> String {
    let mut table = Table::new(rows);
    table.with(Style::rounded());
    table.to_string()
}

fn or_dash<T: ToString>(value: Option<T>) -> String {
    value.map_or_else(|| "-".to_string(), |v| v.to_string())
}

pub fn pattern_report(report: &PatternReport, with_details: bool) -> String {
    let result = &report.result;
    let summary = &report.summary;
    let (bull, bear) = result.rounded_probabilities();
    let pattern = report
        .pattern
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(" → ");

    let mut out = styled(vec![
        Field::new("Symbol", &report.symbol),
        Field::new("Pattern", pattern),
        Field::new("Precision", report.precision),
        Field::new("Candles", summary.total_candles),
        Field::new(
            "Range",
            format!(
                "{} .. {}",
                or_dash(summary.first_timestamp_ms.map(epoch_ms_to_date_string)),
                or_dash(summary.last_timestamp_ms.map(epoch_ms_to_date_string))
            ),
        ),
        Field::new(
            "Bull / Bear / Doji",
            format!(
                "{} / {} / {}",
                summary.label_counts.bullish, summary.label_counts.bearish, summary.label_counts.doji
            ),
        ),
        Field::new("Matches", result.total_matches),
        Field::new("Next bullish", format!("{} ({:.2}%)", result.next_bullish, bull)),
        Field::new("Next bearish", format!("{} ({:.2}%)", result.next_bearish, bear)),
    ]);

    if with_details && !result.match_details.is_empty() {
        let rows = result
            .match_details
            .iter()
            .map(|m| MatchRow {
                end_index: m.end_index,
                pattern_dates: m.pattern_date_strings().join(", "),
                next_date: m.next_date_string(),
                next_label: m.next_label,
            })
            .collect();
        out.push('\n');
        out.push_str(&styled::<MatchRow>(rows));
    }
    out
}

pub fn regime_analysis(analysis: &RegimeAnalysis) -> String {
    let mut out = styled(vec![
        Field::new("As of", analysis.as_of),
        Field::new("Regime", analysis.current_regime),
        Field::new("Composite", format!("{:+.2}", analysis.current_composite)),
        Field::new(
            "Flagged",
            format!("{}/{}", analysis.flagged_count, analysis.available_count),
        ),
    ]);

    let components: Vec<ComponentRow> = analysis
        .per_series_components
        .iter()
        .map(|c| ComponentRow {
            name: c.name.clone(),
            value: or_dash(c.value.map(|v| format!("{v:.2}"))),
            zscore: or_dash(c.zscore),
            weight: format!("{:.2} → {:.2}", c.base_weight, c.effective_weight),
            flag_threshold: format!("{:.1}", c.flag_threshold),
            flagged: c.flagged,
            last_observed: or_dash(c.last_observed),
        })
        .collect();
    out.push('\n');
    out.push_str(&styled(components));

    if !analysis.transition_alerts.is_empty() {
        let alerts: Vec<AlertRow> = analysis
            .transition_alerts
            .iter()
            .map(|a| AlertRow {
                date: a.date.to_string(),
                previous: a.previous.to_string(),
                regime: a.regime.to_string(),
                composite: format!("{:+.2}", a.composite),
            })
            .collect();
        out.push('\n');
        out.push_str(&styled(alerts));
    }

    let stats = &analysis.statistics;
    let distribution = stats
        .distribution
        .iter()
        .map(|(regime, count)| format!("{regime} {count}"))
        .collect::<Vec<_>>()
        .join(", ");
    let mut rows = vec![
        Field::new("Rows", stats.total_rows),
        Field::new("Distribution", distribution),
    ];
    if let Some(c) = stats.composite {
        rows.push(Field::new(
            "Composite mean / std",
            format!("{:+.2} / {}", c.mean, or_dash(c.std.map(|s| format!("{s:.2}")))),
        ));
        rows.push(Field::new(
            "Composite min / max",
            format!("{:+.2} / {:+.2}", c.min, c.max),
        ));
    }
    out.push('\n');
    out.push_str(&styled(rows));
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        analysis::analyze_pattern,
        domain::{Candle, DecimalPrecision},
        utils::TimeUtils,
    };

    #[test]
    fn pattern_table_mentions_probabilities() {
        let candles: Vec<Candle> = (0..12)
            .map(|i| {
                let (open, close) = if i % 2 == 0 { (1.0, 2.0) } else { (2.0, 1.0) };
                Candle::new(i * TimeUtils::MS_IN_D, open, 2.0, 1.0, close)
            })
            .collect();
        let report = analyze_pattern(
            "AAPL",
            &candles,
            &[CandleLabel::Bullish],
            DecimalPrecision::Two,
        )
        .unwrap();

        let text = pattern_report(&report, true);
        assert!(text.contains("AAPL"));
        assert!(text.contains("100.00%"));
        assert!(text.contains("1970-01-01"));
    }
}
