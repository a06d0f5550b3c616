#![warn(clippy::all, clippy::pedantic)]

use bevy_ecs::prelude::*;
use log::{debug, info};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::game::PURCHASE_DELAY;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Currency {
    Rub,
    Usd,
}

impl Currency {
    /// Price of 1000 PZZLS.
    #[must_use]
    pub fn rate(self) -> f64 {
        match self {
            Currency::Rub => 50.0,
            Currency::Usd => 1.0,
        }
    }

    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Currency::Rub => "₽",
            Currency::Usd => "$",
        }
    }

    #[must_use]
    pub fn code(self) -> &'static str {
        match self {
            Currency::Rub => "RUB",
            Currency::Usd => "USD",
        }
    }

    #[must_use]
    pub fn toggle(self) -> Self {
        match self {
            Currency::Rub => Currency::Usd,
            Currency::Usd => Currency::Rub,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PzzlPack {
    pub id: u32,
    pub pzzls: i64,
    pub multiplier: u32,
    pub popular: bool,
}

pub const PACKS: [PzzlPack; 3] = [
    PzzlPack {
        id: 1,
        pzzls: 1_000,
        multiplier: 1,
        popular: false,
    },
    PzzlPack {
        id: 2,
        pzzls: 5_000,
        multiplier: 5,
        popular: true,
    },
    PzzlPack {
        id: 3,
        pzzls: 10_000,
        multiplier: 10,
        popular: false,
    },
];

impl PzzlPack {
    #[must_use]
    pub fn price(&self, currency: Currency) -> f64 {
        currency.rate() * f64::from(self.multiplier)
    }

    /// Whole rubles, or dollars with cents.
    #[must_use]
    pub fn format_price(&self, currency: Currency) -> String {
        let price = self.price(currency);
        match currency {
            Currency::Rub => format!("{}", price.floor()),
            Currency::Usd => format!("{price:.2}"),
        }
    }
}

#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum CheckoutError {
    #[error("a purchase is already being processed")]
    Busy,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PendingPurchase {
    pub pack: PzzlPack,
    pub currency: Currency,
    remaining: f32,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompletedPurchase {
    pub pzzls: i64,
    pub description: String,
}

/// Simulated payment processor: a purchase settles after a fixed delay.
#[derive(Resource, Debug, Clone)]
pub struct Checkout {
    delay: f32,
    pending: Option<PendingPurchase>,
}

impl Default for Checkout {
    fn default() -> Self {
        Self::new(PURCHASE_DELAY)
    }
}

impl Checkout {
    #[must_use]
    pub fn new(delay: f32) -> Self {
        Self {
            delay: delay.max(0.0),
            pending: None,
        }
    }

    #[must_use]
    pub fn pending(&self) -> Option<&PendingPurchase> {
        self.pending.as_ref()
    }

    #[must_use]
    pub fn is_busy(&self) -> bool {
        self.pending.is_some()
    }

    pub fn begin(&mut self, pack: PzzlPack, currency: Currency) -> Result<(), CheckoutError> {
        if self.pending.is_some() {
            return Err(CheckoutError::Busy);
        }
        debug!(
            "Checkout started: {} PZZLS for {} {}",
            pack.pzzls,
            pack.format_price(currency),
            currency.code()
        );
        self.pending = Some(PendingPurchase {
            pack,
            currency,
            remaining: self.delay,
        });
        Ok(())
    }

    /// Advances the pending purchase; returns it once payment has gone through.
    pub fn tick(&mut self, delta_seconds: f32) -> Option<CompletedPurchase> {
        let pending = self.pending.as_mut()?;
        pending.remaining -= delta_seconds;
        if pending.remaining > 0.0 {
            return None;
        }

        let done = self.pending.take()?;
        info!("Checkout complete: {} PZZLS", done.pack.pzzls);
        Some(CompletedPurchase {
            pzzls: done.pack.pzzls,
            description: format!(
                "Покупка пакета ({} {})",
                done.pack.format_price(done.currency),
                done.currency.label()
            ),
        })
    }
}
