//! Встроенные каталоги формы: типы активов, биржи, монеты, акции, частота
//! покупок и дни недели.
//!
//! Каталоги закрытые и не настраиваются извне. Коды и подписи формируются
//! derive-макросом [`CatalogEnum`].

use crate::errors::FormError;
use macros::CatalogEnum;
use serde::Serialize;
use std::fmt::{Display, Formatter};

/// Тип актива: криптовалюта или акция.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, CatalogEnum)]
#[catalog(serialize)]
pub enum AssetType {
    /// Криптовалюта.
    #[default]
    #[label("코인")]
    Coin,
    /// Акция.
    #[label("주식")]
    Stock,
}

impl AssetType {
    /// Второе значение переключателя.
    pub fn other(&self) -> AssetType {
        match self {
            AssetType::Coin => AssetType::Stock,
            AssetType::Stock => AssetType::Coin,
        }
    }
}

/// Биржа для покупки криптовалюты.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, CatalogEnum)]
#[catalog(serialize)]
pub enum Exchange {
    #[default]
    #[label("빗썸")]
    Bithumb,
    #[label("업비트")]
    Upbit,
}

/// Монеты, доступные для регулярной покупки.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, CatalogEnum)]
#[catalog(serialize)]
pub enum Coin {
    #[code("BTC")]
    #[label("비트코인")]
    Btc,
    #[code("ETH")]
    #[label("이더리움")]
    Eth,
    #[code("XRP")]
    #[label("리플")]
    Xrp,
    #[code("SOL")]
    #[label("솔라나")]
    Sol,
}

/// Акции, доступные для регулярной покупки.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, CatalogEnum)]
#[catalog(serialize)]
pub enum Stock {
    #[code("AAPL")]
    #[label("애플 (AAPL)")]
    Aapl,
    #[code("GOOGL")]
    #[label("구글 (GOOGL)")]
    Googl,
    #[code("TSLA")]
    #[label("테슬라 (TSLA)")]
    Tsla,
    #[code("AMZN")]
    #[label("아마존 (AMZN)")]
    Amzn,
}

/// Частота покупок.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, CatalogEnum)]
#[catalog(serialize)]
pub enum Frequency {
    #[default]
    #[label("매일")]
    Daily,
    #[label("매주")]
    Weekly,
    #[label("매월")]
    Monthly,
}

/// День недели для еженедельных покупок. Неделя начинается с воскресенья.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, CatalogEnum)]
#[catalog(serialize)]
pub enum DayOfWeek {
    #[code("SUN")]
    #[label("일요일")]
    Sunday,
    #[code("MON")]
    #[label("월요일")]
    Monday,
    #[code("TUE")]
    #[label("화요일")]
    Tuesday,
    #[code("WED")]
    #[label("수요일")]
    Wednesday,
    #[code("THU")]
    #[label("목요일")]
    Thursday,
    #[code("FRI")]
    #[label("금요일")]
    Friday,
    #[code("SAT")]
    #[label("토요일")]
    Saturday,
}

/// Актив, привязанный к своему каталогу.
///
/// Вариант перечисления совпадает с типом актива, поэтому актив из чужого
/// каталога невозможно сохранить в форме с другим [`AssetType`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(untagged)]
pub enum Asset {
    Coin(Coin),
    Stock(Stock),
}

impl Asset {
    /// Значение по умолчанию для типа актива: первый элемент каталога.
    pub fn default_for(asset_type: AssetType) -> Asset {
        match asset_type {
            AssetType::Coin => Asset::Coin(Coin::ALL[0]),
            AssetType::Stock => Asset::Stock(Stock::ALL[0]),
        }
    }

    /// Каталог активов для типа актива.
    pub fn catalog(asset_type: AssetType) -> Vec<Asset> {
        match asset_type {
            AssetType::Coin => Coin::ALL.iter().copied().map(Asset::Coin).collect(),
            AssetType::Stock => Stock::ALL.iter().copied().map(Asset::Stock).collect(),
        }
    }

    /// Тип актива, которому принадлежит значение.
    pub fn asset_type(&self) -> AssetType {
        match self {
            Asset::Coin(_) => AssetType::Coin,
            Asset::Stock(_) => AssetType::Stock,
        }
    }

    pub fn code(&self) -> &'static str {
        match self {
            Asset::Coin(c) => c.code(),
            Asset::Stock(s) => s.code(),
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Asset::Coin(c) => c.label(),
            Asset::Stock(s) => s.label(),
        }
    }

    /// Разобрать код актива в каталоге указанного типа.
    ///
    /// ## Ошибки
    ///
    /// - [`FormError::CatalogMismatch`] — код есть, но в каталоге другого типа
    /// - [`FormError::ValueError`] — код неизвестен
    pub fn parse_for(asset_type: AssetType, s: &str) -> Result<Asset, FormError> {
        let coin = s.parse::<Coin>().map(Asset::Coin);
        let stock = s.parse::<Stock>().map(Asset::Stock);

        match (asset_type, coin, stock) {
            (AssetType::Coin, Ok(asset), _) | (AssetType::Stock, _, Ok(asset)) => Ok(asset),
            (_, Ok(_), _) | (_, _, Ok(_)) => Err(FormError::catalog_err(format!(
                "{} не относится к типу '{}'",
                s.trim(),
                asset_type
            ))),
            _ => Err(FormError::value_err(format!("неизвестный актив: {}", s.trim()))),
        }
    }
}

impl Display for Asset {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.code())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn catalogs_keep_declared_order() {
        let codes: Vec<_> = Coin::ALL.iter().map(|c| c.code()).collect();
        assert_eq!(codes, ["BTC", "ETH", "XRP", "SOL"]);

        let codes: Vec<_> = Stock::ALL.iter().map(|c| c.code()).collect();
        assert_eq!(codes, ["AAPL", "GOOGL", "TSLA", "AMZN"]);

        let codes: Vec<_> = Exchange::ALL.iter().map(|c| c.code()).collect();
        assert_eq!(codes, ["bithumb", "upbit"]);
    }

    #[test]
    fn week_starts_on_sunday() {
        assert_eq!(DayOfWeek::ALL.len(), 7);
        assert_eq!(DayOfWeek::ALL[0], DayOfWeek::Sunday);
        assert_eq!(DayOfWeek::ALL[1].code(), "MON");
        assert_eq!(DayOfWeek::ALL[6].label(), "토요일");
    }

    #[test]
    fn codes_parse_case_insensitive() {
        assert_eq!(Coin::from_str("btc").unwrap(), Coin::Btc);
        assert_eq!(Exchange::from_str(" Upbit ").unwrap(), Exchange::Upbit);
        assert_eq!(DayOfWeek::from_str("mon").unwrap(), DayOfWeek::Monday);
        assert!(Frequency::from_str("hourly").is_err());
    }

    #[test]
    fn display_prints_code() {
        assert_eq!(Frequency::Monthly.to_string(), "monthly");
        assert_eq!(Asset::Stock(Stock::Googl).to_string(), "GOOGL");
        assert_eq!(AssetType::Stock.label(), "주식");
    }

    #[test]
    fn default_asset_is_first_catalog_entry() {
        assert_eq!(Asset::default_for(AssetType::Coin), Asset::Coin(Coin::Btc));
        assert_eq!(Asset::default_for(AssetType::Stock), Asset::Stock(Stock::Aapl));
    }

    #[test]
    fn parse_for_respects_asset_type() {
        assert_eq!(
            Asset::parse_for(AssetType::Coin, "eth").unwrap(),
            Asset::Coin(Coin::Eth)
        );
        assert!(matches!(
            Asset::parse_for(AssetType::Coin, "TSLA"),
            Err(FormError::CatalogMismatch(_))
        ));
        assert!(matches!(
            Asset::parse_for(AssetType::Stock, "DOGE"),
            Err(FormError::ValueError(_))
        ));
    }

    #[test]
    fn asset_serializes_as_code() {
        let json = serde_json::to_string(&Asset::Coin(Coin::Sol)).unwrap();
        assert_eq!(json, "\"SOL\"");
    }

    #[test]
    fn asset_type_toggles() {
        assert_eq!(AssetType::Coin.other(), AssetType::Stock);
        assert_eq!(AssetType::Stock.other(), AssetType::Coin);
    }
}
