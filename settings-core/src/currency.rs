use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::errors::SettingsError;

macro_rules! currencies {
    ($($variant:ident => $code:literal),+ $(,)?) => {
        /// Display currency for balances and prices, keyed by ISO 4217 code.
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        pub enum Currency {
            $(
                #[serde(rename = $code)]
                $variant,
            )+
        }

        impl Currency {
            pub const ALL: &'static [Currency] = &[$(Currency::$variant),+];

            pub fn code(&self) -> &'static str {
                match self {
                    $(Currency::$variant => $code,)+
                }
            }
        }
    };
}

currencies! {
    Aud => "AUD",
    Brl => "BRL",
    Cad => "CAD",
    Chf => "CHF",
    Clp => "CLP",
    Cny => "CNY",
    Czk => "CZK",
    Dkk => "DKK",
    Eur => "EUR",
    Gbp => "GBP",
    Hkd => "HKD",
    Huf => "HUF",
    Idr => "IDR",
    Ils => "ILS",
    Inr => "INR",
    Jpy => "JPY",
    Krw => "KRW",
    Mxn => "MXN",
    Myr => "MYR",
    Nok => "NOK",
    Nzd => "NZD",
    Php => "PHP",
    Pkr => "PKR",
    Pln => "PLN",
    Rub => "RUB",
    Sek => "SEK",
    Sgd => "SGD",
    Thb => "THB",
    Try => "TRY",
    Twd => "TWD",
    Usd => "USD",
    Zar => "ZAR",
}

/// Picker section a currency is listed under.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CurrencySection {
    Popular,
    All,
}

impl CurrencySection {
    pub fn header(&self) -> &'static str {
        match self {
            CurrencySection::Popular => "Popular",
            CurrencySection::All => "All",
        }
    }
}

impl Currency {
    pub fn section(&self) -> CurrencySection {
        match self {
            Currency::Usd | Currency::Eur | Currency::Gbp | Currency::Aud | Currency::Rub => {
                CurrencySection::Popular
            }
            _ => CurrencySection::All,
        }
    }

    /// Popular currencies first, then the rest, each in catalog order.
    pub fn grouped() -> Vec<(CurrencySection, Vec<Currency>)> {
        let (popular, all): (Vec<Currency>, Vec<Currency>) = Self::ALL
            .iter()
            .copied()
            .partition(|currency| currency.section() == CurrencySection::Popular);
        vec![
            (CurrencySection::Popular, popular),
            (CurrencySection::All, all),
        ]
    }
}

impl Default for Currency {
    fn default() -> Self {
        Currency::Usd
    }
}

impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for Currency {
    type Err = SettingsError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let code = value.trim().to_ascii_uppercase();
        Self::ALL
            .iter()
            .copied()
            .find(|currency| currency.code() == code)
            .ok_or_else(|| SettingsError::InvalidCurrency(format!("Unknown currency code '{}'", value)))
    }
}
