//! Сумма покупки: нормализация свободного ввода и отображение с разделителями
//! разрядов.
//!
//! Каноническое представление суммы — отображаемая строка (`"12,500"`).
//! Числовое значение восстанавливается удалением всех нецифровых символов.
//! Верхняя граница не задаётся: нормализация работает со строкой цифр, а не с
//! целым фиксированной разрядности.

use crate::config::{GROUP_SEPARATOR, GROUP_SIZE};
use serde::Serialize;
use std::cmp::Ordering;
use std::fmt::{Display, Formatter};

/// Сумма покупки в отображаемом виде. Пустая строка — сумма не задана.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
#[serde(transparent)]
pub struct Amount(String);

impl Amount {
    /// Нормализовать ввод пользователя.
    ///
    /// Удаляет все нецифровые символы. Пустой результат даёт пустую сумму,
    /// иначе ведущие нули отбрасываются и цифры группируются по три.
    ///
    /// ## Пример
    ///
    /// ```
    /// use dca_core::amount::Amount;
    ///
    /// assert_eq!(Amount::from_input("12500원").as_str(), "12,500");
    /// assert_eq!(Amount::from_input("abc").as_str(), "");
    /// ```
    pub fn from_input(raw: &str) -> Amount {
        let digits = strip_non_digits(raw);
        if digits.is_empty() {
            return Amount::default();
        }
        Amount(group_digits(trim_leading_zeros(&digits)))
    }

    /// Сумма не задана.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Отображаемая строка суммы.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Цифры суммы без разделителей. Для пустой суммы — пустая строка.
    pub fn digits(&self) -> String {
        strip_non_digits(&self.0)
    }

    /// Числовое значение.
    ///
    /// `None` для пустой суммы и для значения, не помещающегося в `u64`.
    pub fn value(&self) -> Option<u64> {
        self.digits().parse().ok()
    }

    /// Сравнить сумму с порогом. Пустая сумма меньше любого порога, сумма
    /// вне `u64` больше любого порога.
    pub fn cmp_value(&self, threshold: u64) -> Ordering {
        match self.value() {
            Some(value) => value.cmp(&threshold),
            None if self.is_empty() => Ordering::Less,
            None => Ordering::Greater,
        }
    }
}

impl Display for Amount {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

fn strip_non_digits(raw: &str) -> String {
    raw.chars().filter(|c| c.is_ascii_digit()).collect()
}

/// Отбросить ведущие нули, сохранив хотя бы одну цифру.
fn trim_leading_zeros(digits: &str) -> &str {
    let trimmed = digits.trim_start_matches('0');
    if trimmed.is_empty() && !digits.is_empty() {
        "0"
    } else {
        trimmed
    }
}

fn group_digits(digits: &str) -> String {
    let mut out = String::with_capacity(digits.len() + digits.len() / GROUP_SIZE);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % GROUP_SIZE == 0 {
            out.push(GROUP_SEPARATOR);
        }
        out.push(ch);
    }
    out
}
