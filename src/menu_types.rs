use crate::content::{GameConcept, MarketingData};
use crate::shop::{Currency, PACKS};

// Every screen the app can show
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    Intro,
    About,
    Terms,
    Subscription,
    Loading,
    Playing,
    Won,
    Shop,
    Transactions,
    Leaderboard,
    Studio,
}

impl Screen {
    /// Screens that show the board.
    #[must_use]
    pub fn is_game(self) -> bool {
        matches!(self, Screen::Loading | Screen::Playing | Screen::Won)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TermsOption {
    Decline,
    Accept,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubscriptionOption {
    Subscribe,
    PlayFree,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShopOption {
    Pack(usize),
    SkipLevel,
    PremiumDiscount,
}

impl ShopOption {
    pub const ALL: [ShopOption; PACKS.len() + 2] = [
        ShopOption::SkipLevel,
        ShopOption::PremiumDiscount,
        ShopOption::Pack(0),
        ShopOption::Pack(1),
        ShopOption::Pack(2),
    ];

    #[must_use]
    pub fn index(self) -> usize {
        Self::ALL.iter().position(|option| *option == self).unwrap_or(0)
    }
}

#[derive(Debug, Clone)]
pub struct Menu {
    pub screen: Screen,
    pub previous: Screen,
    pub terms_selected: TermsOption,
    pub subscription_selected: SubscriptionOption,
    pub shop_selected: ShopOption,
    pub currency: Currency,
    pub scroll: usize,
}

impl Default for Menu {
    fn default() -> Self {
        Self {
            screen: Screen::Intro,
            previous: Screen::Intro,
            terms_selected: TermsOption::Accept,
            subscription_selected: SubscriptionOption::Subscribe,
            shop_selected: ShopOption::SkipLevel,
            currency: Currency::Rub,
            scroll: 0,
        }
    }
}

impl Menu {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Opens an overlay screen, remembering where to go back to.
    pub fn open(&mut self, screen: Screen) {
        if self.screen != screen {
            self.previous = self.screen;
            self.screen = screen;
            self.scroll = 0;
        }
    }

    pub fn back(&mut self) {
        let target = match self.screen {
            Screen::Transactions => Screen::Shop,
            Screen::Shop | Screen::Leaderboard | Screen::Studio => {
                if self.previous.is_game() {
                    self.previous
                } else {
                    Screen::Playing
                }
            }
            Screen::About => Screen::Intro,
            Screen::Terms => Screen::About,
            Screen::Subscription => Screen::Terms,
            other => other,
        };
        self.screen = target;
        self.scroll = 0;
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StudioJob {
    Concept,
    Marketing,
}

/// Concept generator and marketing assistant state.
#[derive(Debug, Clone, Default)]
pub struct StudioState {
    pub topic: String,
    pub concept: Option<GameConcept>,
    pub marketing: Option<MarketingData>,
    pub pending: Option<(u64, StudioJob)>,
    pub error: Option<String>,
}

impl StudioState {
    #[must_use]
    pub fn is_busy(&self) -> bool {
        self.pending.is_some()
    }
}
