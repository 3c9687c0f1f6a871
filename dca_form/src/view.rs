//! Текстовое представление формы.
//!
//! Отображаются только поля, видимые для текущего состояния: биржа и время
//! для монет, выбор дня недели для `weekly`, выбор дня месяца для `monthly`.

use crate::config::*;
use dca_core::amount::Amount;
use dca_core::catalog::{Asset, AssetType, DayOfWeek, Exchange, Frequency};
use dca_core::config::{CURRENCY, MIN_AMOUNT};
use dca_core::form::{FormController, FormMode};
use dca_core::time::TIME_FORMAT;

/// Подсказка в пустом поле суммы.
pub fn amount_placeholder() -> String {
    format!("최소 {}원부터 모을 수 있어요", min_amount())
}

/// Предупреждение о слишком маленькой сумме.
pub fn amount_warning() -> String {
    format!("최소 {}원 이상이어야 해요", min_amount())
}

fn min_amount() -> Amount {
    Amount::from_input(&MIN_AMOUNT.to_string())
}

/// Отметить выбранный вариант: `[x]` или `[ ]`.
fn mark(selected: bool) -> &'static str {
    if selected { "[x]" } else { "[ ]" }
}

/// Подпись актива. Код добавляется, если его нет в подписи.
fn asset_caption(asset: &Asset) -> String {
    match asset.label().contains(asset.code()) {
        true => asset.label().to_string(),
        false => format!("{} ({})", asset.label(), asset.code()),
    }
}

/// Сформировать строки экрана формы.
pub fn render(form: &FormController) -> Vec<String> {
    let state = form.state();
    let locked = if form.identity_locked() { " (변경 불가)" } else { "" };
    let mut lines = Vec::new();

    let mode = match form.mode() {
        FormMode::Create => "",
        FormMode::Edit => " [edit]",
    };
    lines.push(format!("{} {}{}", state.asset_type.label(), TITLE_SUFFIX, mode));

    if state.shows_exchange() {
        lines.push(EXCHANGE_QUESTION.to_string());
        let options: Vec<_> = Exchange::ALL
            .iter()
            .map(|e| format!("{} {} ({})", mark(*e == state.exchange), e.label(), e))
            .collect();
        lines.push(format!("  {}{}", options.join("  "), locked));
    }

    let question = match state.asset_type {
        AssetType::Coin => COIN_QUESTION,
        AssetType::Stock => STOCK_QUESTION,
    };
    lines.push(question.to_string());
    let options: Vec<_> = state
        .asset_options()
        .iter()
        .map(|a| format!("{} {}", mark(*a == state.asset), asset_caption(a)))
        .collect();
    lines.push(format!("  {}{}", options.join("  "), locked));

    lines.push(AMOUNT_QUESTION.to_string());
    match state.amount.is_empty() {
        true => lines.push(format!("  {} {}", amount_placeholder(), CURRENCY)),
        false => lines.push(format!("  {} {}", state.amount, CURRENCY)),
    }
    if form.is_amount_too_low() {
        lines.push(format!("  ! {}", amount_warning()));
    }

    lines.push(WHEN_QUESTION.to_string());
    let options: Vec<_> = Frequency::ALL
        .iter()
        .map(|f| format!("{} {}", mark(*f == state.frequency), f.label()))
        .collect();
    lines.push(format!("  {}", options.join("  ")));

    if state.shows_weekday_picker() {
        lines.push(WEEKDAY_CAPTION.to_string());
        let options: Vec<_> = DayOfWeek::ALL
            .iter()
            .map(|d| format!("{} {}", mark(Some(*d) == state.day_of_week), d.code()))
            .collect();
        lines.push(format!("  {}", options.join(" ")));
    }

    if state.shows_day_picker() {
        let range = state.day_of_month_options();
        let selected = state
            .day_of_month
            .map(|d| d.to_string())
            .unwrap_or_else(|| "-".to_string());
        lines.push(format!(
            "{}: {} ({}..={})",
            DAY_CAPTION,
            selected,
            range.start(),
            range.end()
        ));
    }

    if state.shows_time_picker() {
        lines.push(format!(
            "{}: {}",
            TIME_CAPTION,
            state.reference_time.format(TIME_FORMAT)
        ));
    }

    let submit = if form.is_form_valid() { "활성" } else { "비활성" };
    lines.push(format!("[{}] {}", SUBMIT_CAPTION, submit));

    lines
}
