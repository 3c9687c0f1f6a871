//! Опорное время покупки: значение по умолчанию, 15-минутная сетка выбора и
//! длина месяца для выбора дня.

use crate::config::TIME_STEP_MINUTES;
use crate::errors::FormError;
use chrono::{Datelike, Duration, NaiveDate, NaiveDateTime, NaiveTime, Timelike};

/// Формат ввода времени суток.
pub const TIME_FORMAT: &str = "%H:%M";

/// Формат ввода даты и времени.
pub const DATE_TIME_FORMAT: &str = "%Y-%m-%d %H:%M";

/// Ближайшая следующая граница четверти часа.
///
/// Минуты округляются вверх до кратного 15, `:60` переходит в следующий час
/// (и при необходимости в следующие сутки). Секунды и доли секунды
/// обнуляются, в округлении они не участвуют: `10:00:30` даёт `10:00`.
///
/// ## Пример
///
/// ```
/// use chrono::NaiveDate;
/// use dca_core::time::next_quarter;
///
/// let now = NaiveDate::from_ymd_opt(2026, 3, 1).unwrap().and_hms_opt(9, 7, 12).unwrap();
/// assert_eq!(next_quarter(now).format("%H:%M").to_string(), "09:15");
/// ```
pub fn next_quarter(now: NaiveDateTime) -> NaiveDateTime {
    let step = TIME_STEP_MINUTES;
    let next = now.minute().div_ceil(step) * step;

    let hour_start = now
        - Duration::minutes(now.minute() as i64)
        - Duration::seconds(now.second() as i64)
        - Duration::nanoseconds(now.nanosecond() as i64);

    hour_start + Duration::minutes(next as i64)
}

/// Количество дней в месяце указанной даты.
pub fn days_in_month(date: NaiveDate) -> u32 {
    match date.month() {
        1 | 3 | 5 | 7 | 8 | 10 | 12 => 31,
        4 | 6 | 9 | 11 => 30,
        2 if date.leap_year() => 29,
        _ => 28,
    }
}

/// Время лежит на 15-минутной сетке.
pub fn is_on_grid(time: NaiveTime) -> bool {
    time.minute() % TIME_STEP_MINUTES == 0 && time.second() == 0 && time.nanosecond() == 0
}

/// Все значения времени суток, доступные в виджете выбора (96 четвертей часа).
pub fn time_slots() -> Vec<NaiveTime> {
    let step = TIME_STEP_MINUTES * 60;
    (0..24 * 60 * 60 / step)
        .filter_map(|i| NaiveTime::from_num_seconds_from_midnight_opt(i * step, 0))
        .collect()
}

/// Разобрать ввод времени.
///
/// Допустимые варианты:
/// - `none` — виджет не вернул значение, результат `Ok(None)`;
/// - `HH:MM` — время суток на дату `today`;
/// - `YYYY-MM-DD HH:MM` — дата и время.
///
/// ## Ошибки
///
/// [`FormError::ValueError`] при нераспознанном формате и при времени вне
/// 15-минутной сетки.
pub fn parse_reference_time(
    input: &str,
    today: NaiveDate,
) -> Result<Option<NaiveDateTime>, FormError> {
    let input = input.trim();
    if input.eq_ignore_ascii_case("none") {
        return Ok(None);
    }

    let parsed = NaiveDateTime::parse_from_str(input, DATE_TIME_FORMAT)
        .or_else(|_| NaiveTime::parse_from_str(input, TIME_FORMAT).map(|t| today.and_time(t)))
        .map_err(|err| FormError::value_err(format!("время '{}': {}", input, err)))?;

    if !is_on_grid(parsed.time()) {
        return Err(FormError::value_err(format!(
            "время '{}' не кратно {} минутам",
            input, TIME_STEP_MINUTES
        )));
    }

    Ok(Some(parsed))
}
