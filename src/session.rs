//! The state of one quoting session.

use crate::financing::{FinancingParams, PercentageKind};
use crate::ledger::{Ledger, LedgerError, SelectionEntry};
use crate::property::Property;
use crate::simulation::{SimulationResult, simulate};
use crate::totals::{Totals, compute_totals};
use rust_decimal::{Decimal, RoundingStrategy};
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use tracing::info;

/// CLP value of one UF used when none is configured.
pub const DEFAULT_UF_RATE: Decimal = dec!(37500);

/// The screen the session is showing.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum View {
    #[default]
    Catalog,
    Quote,
}

/// Contact details of the client the quote is prepared for. Every field may be empty.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientContact {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
}

/// Everything a quoting session holds: the selection, the financing inputs, the client and the
/// current view.
///
/// Derived values ([`QuoteSession::totals`], [`QuoteSession::simulation`]) are recomputed from
/// the current state on every call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuoteSession {
    ledger: Ledger,
    financing: FinancingParams,
    client: ClientContact,
    view: View,
    /// CLP per UF.
    uf_rate: Decimal,
    /// Financing the session starts from and returns to on reset.
    initial_financing: FinancingParams,
}

impl Default for QuoteSession {
    fn default() -> Self {
        Self::new(FinancingParams::default(), DEFAULT_UF_RATE)
    }
}

impl QuoteSession {
    pub fn new(financing: FinancingParams, uf_rate: Decimal) -> Self {
        Self {
            ledger: Ledger::new(),
            financing: financing.clone(),
            client: ClientContact::default(),
            view: View::Catalog,
            uf_rate,
            initial_financing: financing,
        }
    }

    /// Adds one unit of `property` to the quote and switches to the quote view.
    pub fn add_property(&mut self, property: &Property) {
        self.ledger.add(property);
        self.view = View::Quote;
    }

    pub fn remove(&mut self, index: usize) -> Result<SelectionEntry, LedgerError> {
        self.ledger.remove(index)
    }

    pub fn change_quantity(&mut self, index: usize, delta: i64) -> Result<u32, LedgerError> {
        self.ledger.set_quantity_delta(index, delta)
    }

    /// See [`FinancingParams::adjust`].
    pub fn adjust_percentage(&mut self, kind: PercentageKind, raw: &str) -> (Decimal, Decimal) {
        self.financing.adjust(kind, raw)
    }

    pub fn set_extra_contribution(&mut self, raw: &str) {
        self.financing.set_extra_contribution(raw);
    }

    pub fn set_term_years(&mut self, raw: &str) {
        self.financing.set_term_years(raw);
    }

    pub fn set_annual_rate(&mut self, raw: &str) {
        self.financing.set_annual_rate(raw);
    }

    pub fn set_client(&mut self, client: ClientContact) {
        self.client = client;
    }

    pub fn set_view(&mut self, view: View) {
        self.view = view;
    }

    /// Flips between the catalog and the quote.
    pub fn toggle_view(&mut self) -> View {
        self.view = match self.view {
            View::Catalog => View::Quote,
            View::Quote => View::Catalog,
        };
        self.view
    }

    /// Clears the selection, client and financing inputs.
    pub fn reset(&mut self) {
        info!(entries = self.ledger.len(), "Resetting quote session");
        *self = Self::new(self.initial_financing.clone(), self.uf_rate);
    }

    pub fn ledger(&self) -> &Ledger {
        &self.ledger
    }

    pub fn financing(&self) -> &FinancingParams {
        &self.financing
    }

    pub fn client(&self) -> &ClientContact {
        &self.client
    }

    pub fn view(&self) -> View {
        self.view
    }

    pub fn uf_rate(&self) -> Decimal {
        self.uf_rate
    }

    pub fn totals(&self) -> Totals {
        compute_totals(&self.ledger)
    }

    /// Simulates the mortgage over the net total with the current financing inputs.
    pub fn simulation(&self) -> SimulationResult {
        let financing = &self.financing;
        simulate(
            self.totals().net_total,
            financing.loan_pct,
            financing.annual_rate_pct,
            financing.term_years,
        )
    }

    /// The upfront part of the net total, in UF.
    pub fn down_payment_amount(&self) -> Decimal {
        self.totals()
            .net_total
            .saturating_mul(self.financing.down_payment_pct / Decimal::ONE_HUNDRED)
    }

    /// Converts a UF amount to whole CLP.
    pub fn to_clp(&self, uf: Decimal) -> Decimal {
        uf.saturating_mul(self.uf_rate)
            .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
    }
}
