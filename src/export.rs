//! Paginated quote document.
//!
//! The document only carries strings that were already computed and formatted from a
//! [`QuoteSession`]. Layout follows an A4 page measured in vertical units: blocks advance a
//! running position and a new page starts once it passes [`PAGE_BREAK_AT`].

use crate::format::{format_clp, format_fixed, format_percent, format_uf};
use crate::pricing::effective_price;
use crate::session::{ClientContact, QuoteSession};
use chrono::NaiveDate;
use serde::Serialize;
use std::fmt::Write;

/// Vertical position after which no new block is started on the current page.
pub const PAGE_BREAK_AT: u32 = 250;
/// Vertical position where content starts on continuation pages.
const PAGE_TOP: u32 = 20;
/// Vertical position of the title on the first page, below the header band.
const FIRST_PAGE_TITLE: u32 = 55;

const BRAND: &str = "ELITE ESTATES";
const TAGLINE: &str = "Exclusive Properties & Investments";
const NOT_AVAILABLE: &str = "N/A";

/// One selected property as printed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct QuoteLine {
    pub name: String,
    pub model: String,
    pub address: String,
    pub quantity: u32,
    pub unit_price_uf: String,
    pub line_total_uf: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FinancialSummary {
    pub gross_total_uf: String,
    pub discount_total_uf: String,
    pub net_total_uf: String,
    pub net_total_clp: String,
}

/// Present only when part of the price is financed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FinancingSection {
    pub loan_pct: String,
    pub financed_amount_uf: String,
    pub down_payment_pct: String,
    pub down_payment_uf: String,
    pub term_years: u32,
    pub annual_rate_pct: String,
    pub monthly_payment_uf: String,
    pub monthly_payment_clp: String,
    pub minimum_income_uf: String,
}

/// A text line and the vertical position it is printed at.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PlacedLine {
    pub y: u32,
    pub text: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Page {
    pub lines: Vec<PlacedLine>,
}

/// The exported quote: its content and its paginated layout.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct QuoteDocument {
    pub issued_on: NaiveDate,
    pub client: ClientContact,
    pub lines: Vec<QuoteLine>,
    pub summary: FinancialSummary,
    pub financing: Option<FinancingSection>,
    pub pages: Vec<Page>,
}

impl QuoteDocument {
    /// Builds the document for the current state of `session`.
    ///
    /// # Errors
    ///
    /// Returns an error if the quote has no properties.
    pub fn build(session: &QuoteSession, issued_on: NaiveDate) -> Result<Self, anyhow::Error> {
        if session.ledger().is_empty() {
            return Err(anyhow::anyhow!("Cannot export a quote without properties."));
        }

        let lines: Vec<QuoteLine> = session
            .ledger()
            .iter()
            .map(|entry| {
                let property = &entry.property;
                QuoteLine {
                    name: property.name.clone(),
                    model: property.model.clone(),
                    address: format!("{}, {}", property.address, property.commune),
                    quantity: entry.quantity,
                    unit_price_uf: format_uf(effective_price(property)),
                    line_total_uf: format_uf(entry.line_total()),
                }
            })
            .collect();

        let totals = session.totals();
        let summary = FinancialSummary {
            gross_total_uf: format_uf(totals.gross_total),
            discount_total_uf: format_uf(totals.discount_total),
            net_total_uf: format_uf(totals.net_total),
            net_total_clp: format_clp(session.to_clp(totals.net_total)),
        };

        let params = session.financing();
        let financing = (params.loan_pct > rust_decimal::Decimal::ZERO).then(|| {
            let simulation = session.simulation();
            FinancingSection {
                loan_pct: format_percent(params.loan_pct),
                financed_amount_uf: format_uf(simulation.financed_amount),
                down_payment_pct: format_percent(params.down_payment_pct),
                down_payment_uf: format_uf(session.down_payment_amount()),
                term_years: params.term_years,
                annual_rate_pct: format_percent(params.annual_rate_pct),
                monthly_payment_uf: format_fixed(simulation.monthly_payment, 2),
                monthly_payment_clp: format_clp(session.to_clp(simulation.monthly_payment)),
                minimum_income_uf: format_fixed(simulation.minimum_income, 1),
            }
        });

        let client = session.client().clone();
        let pages = layout(&client, issued_on, &lines, &summary, financing.as_ref());

        Ok(Self {
            issued_on,
            client,
            lines,
            summary,
            financing,
            pages,
        })
    }

    /// Renders the pages as plain text, one page after another.
    pub fn render_text(&self) -> String {
        let mut out = String::new();
        let count = self.pages.len();
        for (number, page) in self.pages.iter().enumerate() {
            if number > 0 {
                out.push('\n');
            }
            let _ = writeln!(out, "--- page {} of {} ---", number + 1, count);
            for line in &page.lines {
                let _ = writeln!(out, "{}", line.text);
            }
        }
        out
    }
}

/// Running cursor over the pages being laid out.
struct Layout {
    pages: Vec<Page>,
    y: u32,
}

impl Layout {
    fn new() -> Self {
        Self {
            pages: vec![Page::default()],
            y: 0,
        }
    }

    fn line(&mut self, text: impl Into<String>, advance: u32) {
        if let Some(page) = self.pages.last_mut() {
            page.lines.push(PlacedLine {
                y: self.y,
                text: text.into(),
            });
        }
        self.y += advance;
    }

    /// Starts a new page if the cursor is past the break position.
    fn keep_block_together(&mut self) {
        if self.y > PAGE_BREAK_AT {
            self.pages.push(Page::default());
            self.y = PAGE_TOP;
        }
    }
}

fn or_not_available(value: &str) -> &str {
    if value.trim().is_empty() { NOT_AVAILABLE } else { value }
}

fn layout(
    client: &ClientContact,
    issued_on: NaiveDate,
    lines: &[QuoteLine],
    summary: &FinancialSummary,
    financing: Option<&FinancingSection>,
) -> Vec<Page> {
    let mut layout = Layout::new();

    layout.y = 25;
    layout.line(BRAND, 7);
    layout.line(TAGLINE, 0);

    layout.y = FIRST_PAGE_TITLE;
    layout.line("PROPERTY QUOTE", 15);
    layout.line("Client information:", 8);
    let name = format!(
        "Name: {} {}",
        or_not_available(&client.first_name),
        client.last_name.trim()
    );
    layout.line(name.trim_end(), 6);
    layout.line(format!("Email: {}", or_not_available(&client.email)), 6);
    layout.line(format!("Phone: {}", or_not_available(&client.phone)), 6);
    layout.line(format!("Date: {}", issued_on.format("%d-%m-%Y")), 15);

    layout.line("Property detail", 10);
    for (index, line) in lines.iter().enumerate() {
        layout.keep_block_together();
        layout.line(format!("{}. {} - {}", index + 1, line.name, line.model), 6);
        layout.line(format!("   {}", line.address), 6);
        layout.line(
            format!(
                "   Quantity: {} | Unit: {} UF | Total: {} UF",
                line.quantity, line.unit_price_uf, line.line_total_uf
            ),
            10,
        );
    }

    layout.y += 5;
    layout.keep_block_together();
    layout.line("FINANCIAL SUMMARY", 8);
    layout.line(
        format!("Subtotal before discounts: {} UF", summary.gross_total_uf),
        6,
    );
    layout.line(format!("Discount applied: -{} UF", summary.discount_total_uf), 8);
    layout.line(
        format!(
            "TOTAL INVESTMENT: {} UF (CLP ${})",
            summary.net_total_uf, summary.net_total_clp
        ),
        15,
    );

    if let Some(financing) = financing {
        layout.keep_block_together();
        layout.line("Financing simulation", 8);
        layout.line(
            format!(
                "Bank financing ({}%): {} UF",
                financing.loan_pct, financing.financed_amount_uf
            ),
            6,
        );
        layout.line(
            format!(
                "Down payment ({}%): {} UF",
                financing.down_payment_pct, financing.down_payment_uf
            ),
            6,
        );
        layout.line(
            format!(
                "Term: {} years at a {}% annual rate",
                financing.term_years, financing.annual_rate_pct
            ),
            8,
        );
        layout.line(
            format!(
                "ESTIMATED MONTHLY PAYMENT: {} UF (approx. CLP ${})",
                financing.monthly_payment_uf, financing.monthly_payment_clp
            ),
            6,
        );
        layout.line(
            format!("Minimum monthly income: {} UF", financing.minimum_income_uf),
            6,
        );
    }

    layout.pages
}
