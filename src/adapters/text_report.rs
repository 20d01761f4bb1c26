//! Fixed-width plain-text reports.
//!
//! Analysis rows: `label | value | note | score`, right-aligned in widths
//! 20/15/40/30. Portfolio rows use the column widths in [`PORTFOLIO_COLUMNS`].

use crate::domain::analysis::Analysis;
use crate::domain::indicator::Indicator;
use crate::domain::ledger::Ledger;
use crate::domain::position::PositionEntry;
use crate::domain::scoring::HIGH_RELATIVE_VOLUME;
use crate::ports::report_port::ReportPort;

pub const NO_ANALYSES: &str = "No valid symbols to analyze.";
pub const NO_HOLDINGS: &str = "No holdings yet.";

const LABEL_WIDTH: usize = 20;
const VALUE_WIDTH: usize = 15;
const NOTE_WIDTH: usize = 40;
const SCORE_WIDTH: usize = 30;

const BREAK_EVEN_BAND: f64 = 0.01;

pub const PORTFOLIO_COLUMNS: [(&str, usize); 7] = [
    ("Symbol", 12),
    ("Shares", 10),
    ("WACC Price", 15),
    ("Current Price", 15),
    ("Total Value", 15),
    ("P&L", 12),
    ("P&L%", 10),
];

#[derive(Debug, Clone, Copy, Default)]
pub struct TextReport;

impl TextReport {
    pub fn new() -> Self {
        TextReport
    }
}

impl ReportPort for TextReport {
    fn render_analyses(&self, analyses: &[Analysis]) -> String {
        if analyses.is_empty() {
            return format!("{}\n", NO_ANALYSES);
        }
        analyses.iter().map(format_analysis).collect()
    }

    fn render_portfolio(&self, ledger: &Ledger) -> String {
        let mut out = String::new();
        out.push_str(&format_portfolio_header());

        for entry in ledger.entries() {
            out.push_str(&format_portfolio_row(entry));
        }

        if ledger.position_count() == 0 {
            out.push('\n');
            out.push_str(NO_HOLDINGS);
            out.push('\n');
        }

        out.push_str("\n=== PORTFOLIO SUMMARY ===\n");
        out.push_str(&format!("Available Cash: ${:.2}\n", ledger.cash_balance()));
        out.push_str(&format!("Total Shares Owned: {}\n", ledger.total_shares()));
        out.push_str(&format!("Total Portfolio Value: ${:.2}\n", ledger.total_value()));
        out.push_str(&format!("Total P&L: ${:.2}\n", ledger.total_profit_loss()));
        out
    }
}

fn format_row(label: &str, value: &str, note: &str, score: i8) -> String {
    format!(
        "{:>lw$} | {:>vw$} | {:>nw$} | {:>sw$}\n",
        label,
        value,
        note,
        score,
        lw = LABEL_WIDTH,
        vw = VALUE_WIDTH,
        nw = NOTE_WIDTH,
        sw = SCORE_WIDTH,
    )
}

fn macd_note(score: i8) -> &'static str {
    match score {
        2 => "Bullish crossover",
        -2 => "Bearish crossover",
        1 => "Above signal line",
        -1 => "Below signal line",
        _ => "At signal line",
    }
}

fn volume_note(relative_volume: f64) -> &'static str {
    if relative_volume > HIGH_RELATIVE_VOLUME {
        "High volume"
    } else {
        "Normal volume"
    }
}

fn eps_note(eps: f64) -> &'static str {
    if eps > BREAK_EVEN_BAND {
        "Profitable"
    } else if eps < -BREAK_EVEN_BAND {
        "Loss-making"
    } else {
        "Break-even"
    }
}

pub fn format_analysis(analysis: &Analysis) -> String {
    let v = &analysis.values;
    let s = &analysis.scores.sub;

    let mut out = format!("=== {} ===\n", analysis.symbol);
    for indicator in Indicator::ALL {
        let label = indicator.to_string();
        let row = match indicator {
            Indicator::Macd => format_row(&label, &format!("{:.2}", v.macd), macd_note(s.macd), s.macd),
            Indicator::Rsi => format_row(&label, &format!("{:.2}", v.rsi), "Momentum indicator", s.rsi),
            Indicator::RelativeVolume => format_row(
                &label,
                &format!("{:.2}", v.relative_volume),
                volume_note(v.relative_volume),
                s.volume,
            ),
            Indicator::YearPosition => format_row(
                &label,
                &format!("{:.2}%", v.year_position),
                "52-week position",
                s.position,
            ),
            Indicator::PeRatio => format_row(
                &label,
                &format!("{:.2} vs {:.2}", v.pe_ratio, v.industry_pe),
                "Valuation",
                s.pe,
            ),
            Indicator::Eps => format_row(&label, &format!("${:.2}", v.eps), eps_note(v.eps), s.eps),
        };
        out.push_str(&row);
    }
    out.push_str(&format!("Weighted Score: {:.2}\n", analysis.scores.overall));
    out.push_str(&format!("OVERALL: {}\n\n", analysis.scores.recommendation));
    out
}

fn format_portfolio_header() -> String {
    let header: Vec<String> = PORTFOLIO_COLUMNS
        .iter()
        .map(|(name, width)| format!("{:>width$}", name, width = width))
        .collect();
    let separator: Vec<String> = PORTFOLIO_COLUMNS
        .iter()
        .map(|(_, width)| "-".repeat(*width))
        .collect();
    format!("{}\n{}\n", header.join(" | "), separator.join("-+-"))
}

fn signed(value: f64) -> String {
    if value >= 0.0 {
        format!("+{:.2}", value)
    } else {
        format!("{:.2}", value)
    }
}

fn format_portfolio_row(entry: &PositionEntry) -> String {
    let cells = [
        entry.symbol.clone(),
        entry.shares.to_string(),
        format!("{:.2}", entry.wacc_price),
        format!("{:.2}", entry.current_price),
        format!("{:.2}", entry.market_value()),
        signed(entry.unrealized_pnl()),
        format!("{}%", signed(entry.pnl_percent())),
    ];
    let row: Vec<String> = cells
        .iter()
        .zip(PORTFOLIO_COLUMNS)
        .map(|(cell, (_, width))| format!("{:>width$}", cell, width = width))
        .collect();
    format!("{}\n", row.join(" | "))
}
