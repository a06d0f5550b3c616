#![warn(clippy::all, clippy::pedantic)]

use bevy_ecs::prelude::*;
use chrono::{DateTime, Local};
use log::{info, warn};
use thiserror::Error;

use crate::game::{
    COST_HINT, COST_PREMIUM_DISCOUNT, COST_SKIP, STARTING_LEVEL, TRANSACTION_ID_LEN, level_points,
    level_pzzls,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransactionKind {
    Earn,
    Spend,
    Purchase,
}

impl TransactionKind {
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            TransactionKind::Earn => "EARN",
            TransactionKind::Spend => "SPEND",
            TransactionKind::Purchase => "PURCHASE",
        }
    }
}

/// One ledger entry. Positive amounts for earnings and purchases, negative for spends.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transaction {
    pub id: String,
    pub kind: TransactionKind,
    pub amount: i64,
    pub description: String,
    pub date: DateTime<Local>,
}

/// Paid actions priced in PZZLS.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpendAction {
    Hint,
    Skip,
    PremiumDiscount,
}

impl SpendAction {
    #[must_use]
    pub fn cost(self) -> i64 {
        match self {
            SpendAction::Hint => COST_HINT,
            SpendAction::Skip => COST_SKIP,
            SpendAction::PremiumDiscount => COST_PREMIUM_DISCOUNT,
        }
    }

    #[must_use]
    pub fn description(self) -> &'static str {
        match self {
            SpendAction::Hint => "Покупка: Подсказка",
            SpendAction::Skip => "Покупка: Пропуск уровня",
            SpendAction::PremiumDiscount => "Покупка: Скидка на подписку",
        }
    }
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ProgressionError {
    #[error("insufficient PZZLS: need {needed}, have {available}")]
    InsufficientFunds { needed: i64, available: i64 },
}

/// What solving a level paid out.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LevelReward {
    /// The level that was completed.
    pub level: u32,
    pub points: u64,
    pub pzzls: i64,
}

/// Session progress: level counter, score, PZZLS balance and its ledger.
///
/// The balance is private so every change goes through a method that also appends the
/// matching transaction.
#[derive(Resource, Debug, Clone)]
pub struct Progression {
    pub level: u32,
    pub score: u64,
    balance: i64,
    transactions: Vec<Transaction>,
    premium_discount: bool,
    rng: fastrand::Rng,
}

impl Default for Progression {
    fn default() -> Self {
        Self::new(0)
    }
}

impl Progression {
    #[must_use]
    pub fn new(starting_balance: i64) -> Self {
        Self::with_rng(starting_balance, fastrand::Rng::new())
    }

    #[must_use]
    pub fn with_rng(starting_balance: i64, rng: fastrand::Rng) -> Self {
        Self {
            level: STARTING_LEVEL,
            score: 0,
            balance: starting_balance,
            transactions: Vec::new(),
            premium_discount: false,
            rng,
        }
    }

    #[must_use]
    pub fn balance(&self) -> i64 {
        self.balance
    }

    /// Ledger, newest first.
    #[must_use]
    pub fn transactions(&self) -> &[Transaction] {
        &self.transactions
    }

    #[must_use]
    pub fn has_premium_discount(&self) -> bool {
        self.premium_discount
    }

    #[must_use]
    pub fn can_afford(&self, action: SpendAction) -> bool {
        self.balance >= action.cost()
    }

    /// Scores the current level, pays its reward and moves on to the next one.
    pub fn complete_level(&mut self) -> LevelReward {
        let level = self.level;
        let reward = LevelReward {
            level,
            points: level_points(level),
            pzzls: level_pzzls(level),
        };

        self.score += reward.points;
        self.record(
            TransactionKind::Earn,
            reward.pzzls,
            format!("Победа: Уровень {level}"),
        );
        self.level += 1;

        info!(
            "Level {level} complete: +{} points, +{} PZZLS",
            reward.points, reward.pzzls
        );
        reward
    }

    /// Charges for a paid action. Nothing changes when the balance is short.
    pub fn spend(&mut self, action: SpendAction) -> Result<Transaction, ProgressionError> {
        let cost = action.cost();
        if self.balance < cost {
            warn!("Rejected {action:?}: need {cost}, have {}", self.balance);
            return Err(ProgressionError::InsufficientFunds {
                needed: cost,
                available: self.balance,
            });
        }

        if action == SpendAction::PremiumDiscount {
            self.premium_discount = true;
        }
        info!("Spent {cost} PZZLS on {action:?}");
        Ok(self.record(TransactionKind::Spend, -cost, action.description().to_string()))
    }

    /// Pays for a skip, then completes the level as if it had been solved.
    pub fn skip_level(&mut self) -> Result<LevelReward, ProgressionError> {
        self.spend(SpendAction::Skip)?;
        Ok(self.complete_level())
    }

    pub fn credit_purchase(&mut self, amount: i64, description: String) -> Transaction {
        info!("Purchased {amount} PZZLS");
        self.record(TransactionKind::Purchase, amount, description)
    }

    fn record(&mut self, kind: TransactionKind, amount: i64, description: String) -> Transaction {
        self.balance += amount;
        let transaction = Transaction {
            id: self.transaction_id(),
            kind,
            amount,
            description,
            date: Local::now(),
        };
        self.transactions.insert(0, transaction.clone());
        transaction
    }

    fn transaction_id(&mut self) -> String {
        (0..TRANSACTION_ID_LEN)
            .map(|_| char::from_digit(self.rng.u32(0..36), 36).unwrap_or('0'))
            .collect()
    }
}
