//! Command handlers. Each returns the text to print on stdout.

use crate::args::{CatalogArgs, OutputFormat, QuoteArgs};
use crate::catalog::Catalog;
use crate::config::AppConfig;
use crate::export::QuoteDocument;
use crate::financing::PercentageKind;
use crate::format::{format_clp, format_uf};
use crate::pricing::{effective_price, external_price};
use crate::property::Property;
use crate::session::{ClientContact, QuoteSession};
use anyhow::Context;
use chrono::Local;
use std::fmt::Write;
use tracing::debug;

/// Lists the catalog grouped by category.
pub fn catalog(args: &CatalogArgs, config: &AppConfig) -> anyhow::Result<String> {
    let catalog = Catalog::load(args.catalog())
        .with_context(|| format!("Unable to open catalog {}", args.catalog().display()))?;
    Ok(render_catalog(&catalog, args, config))
}

fn render_catalog(catalog: &Catalog, args: &CatalogArgs, config: &AppConfig) -> String {
    let mut out = String::new();
    for (category, properties) in catalog.grouped() {
        if args.category().is_some_and(|wanted| wanted != category) {
            continue;
        }
        let listed: Vec<_> = properties
            .into_iter()
            .filter(|(_, p)| !args.featured() || p.featured)
            .collect();
        if listed.is_empty() {
            continue;
        }

        let _ = writeln!(out, "== {} ==", category.label());
        for (index, property) in listed {
            let _ = writeln!(out, "{}", catalog_line(index, property, config));
        }
        out.push('\n');
    }
    if out.is_empty() {
        out.push_str("No properties match.\n");
    }
    out
}

fn catalog_line(index: usize, property: &Property, config: &AppConfig) -> String {
    let price = effective_price(property);
    let original = external_price(property);
    let mut line = format!(
        "[{index}] {} - {} | {}, {} | {} bd / {} ba / {} m2",
        property.name,
        property.model,
        property.address,
        property.commune,
        property.bedrooms.unwrap_or_default(),
        property.bathrooms.unwrap_or_default(),
        property.total_surface.normalize(),
    );
    if original != price {
        let _ = write!(line, " | was UF {}", format_uf(original));
    }
    let _ = write!(
        line,
        " | UF {} (CLP ${})",
        format_uf(price),
        format_clp(price.saturating_mul(config.uf_rate))
    );
    if property.featured {
        line.push_str(" *");
    }
    line
}

/// Builds a session from the arguments and renders its quote document.
pub fn quote(args: &QuoteArgs, config: &AppConfig) -> anyhow::Result<String> {
    let catalog = Catalog::load(&args.catalog)
        .with_context(|| format!("Unable to open catalog {}", args.catalog.display()))?;
    let session = build_session(&catalog, args, config)?;

    let issued_on = args.date.unwrap_or_else(|| Local::now().date_naive());
    let document = QuoteDocument::build(&session, issued_on)?;
    match args.format {
        OutputFormat::Text => Ok(document.render_text()),
        OutputFormat::Json => {
            serde_json::to_string_pretty(&document).context("Unable to serialize the quote")
        }
    }
}

/// Applies the arguments to a fresh session, in the order a user would fill the form.
pub fn build_session(
    catalog: &Catalog,
    args: &QuoteArgs,
    config: &AppConfig,
) -> anyhow::Result<QuoteSession> {
    let mut session = QuoteSession::new(config.financing.clone(), config.uf_rate);

    for &index in &args.add {
        let property = catalog.get(index)?;
        session.add_property(property);
    }

    if let Some(raw) = &args.down_payment {
        session.adjust_percentage(PercentageKind::DownPayment, raw);
    }
    if let Some(raw) = &args.loan {
        session.adjust_percentage(PercentageKind::Loan, raw);
    }
    if let Some(raw) = &args.extra {
        session.set_extra_contribution(raw);
    }
    if let Some(raw) = &args.term {
        session.set_term_years(raw);
    }
    if let Some(raw) = &args.rate {
        session.set_annual_rate(raw);
    }

    session.set_client(ClientContact {
        first_name: args.first_name.clone(),
        last_name: args.last_name.clone(),
        email: args.email.clone(),
        phone: args.phone.clone(),
    });

    debug!(
        entries = session.ledger().len(),
        financing = ?session.financing(),
        "Built quote session"
    );
    Ok(session)
}
