//! Состояние формы регулярной покупки и правила его изменения.
//!
//! [`FormState`] — единственный источник истины. Производные флаги
//! ([`is_form_valid`], [`is_amount_too_low`]) вычисляются по запросу чистыми
//! функциями и нигде не кэшируются. Переходы, затрагивающие несколько полей,
//! собраны в функции [`apply_asset_type`] и [`apply_frequency`].

use crate::amount::Amount;
use crate::catalog::{Asset, AssetType, DayOfWeek, Exchange, Frequency};
use crate::config::MIN_AMOUNT;
use crate::errors::FormError;
use crate::sink::SubmissionSink;
use crate::time::{days_in_month, next_quarter};
use chrono::NaiveDateTime;
use log::{debug, info, warn};
use serde::Serialize;
use std::cmp::Ordering;
use std::ops::RangeInclusive;

/// Режим открытия формы.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FormMode {
    /// Новое расписание.
    #[default]
    Create,
    /// Существующее расписание: биржа и актив неизменяемы.
    Edit,
}

impl FormMode {
    /// Определить режим по строке запроса маршрута (`edit=true&...`).
    ///
    /// Режим редактирования включается только значением `true`.
    pub fn from_query(query: &str) -> FormMode {
        let is_edit = query
            .trim_start_matches('?')
            .split('&')
            .filter_map(|pair| pair.split_once('='))
            .any(|(key, value)| key == "edit" && value == "true");

        if is_edit { FormMode::Edit } else { FormMode::Create }
    }
}

/// Состояние формы на время жизни экрана.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormState {
    pub asset_type: AssetType,
    pub exchange: Exchange,
    pub asset: Asset,
    pub amount: Amount,
    pub frequency: Frequency,
    /// Задан только для [`Frequency::Weekly`].
    pub day_of_week: Option<DayOfWeek>,
    /// Задан только для [`Frequency::Monthly`].
    pub day_of_month: Option<u32>,
    pub reference_time: NaiveDateTime,
}

impl FormState {
    /// Начальное состояние: монета, первая биржа и первый актив каталога,
    /// пустая сумма, ежедневно, время — следующая четверть часа после `now`.
    pub fn new(now: NaiveDateTime) -> Self {
        let asset_type = AssetType::default();
        Self {
            asset_type,
            exchange: Exchange::default(),
            asset: Asset::default_for(asset_type),
            amount: Amount::default(),
            frequency: Frequency::default(),
            day_of_week: None,
            day_of_month: None,
            reference_time: next_quarter(now),
        }
    }

    /// Выбор биржи отображается только для монет.
    pub fn shows_exchange(&self) -> bool {
        self.asset_type == AssetType::Coin
    }

    /// Выбор времени отображается только для монет.
    pub fn shows_time_picker(&self) -> bool {
        self.asset_type == AssetType::Coin
    }

    pub fn shows_weekday_picker(&self) -> bool {
        self.frequency == Frequency::Weekly
    }

    pub fn shows_day_picker(&self) -> bool {
        self.frequency == Frequency::Monthly
    }

    /// Активы, доступные для текущего типа актива.
    pub fn asset_options(&self) -> Vec<Asset> {
        Asset::catalog(self.asset_type)
    }

    /// Допустимые дни месяца для текущего опорного времени.
    pub fn day_of_month_options(&self) -> RangeInclusive<u32> {
        1..=days_in_month(self.reference_time.date())
    }
}

/// Сменить тип актива.
///
/// Если тип отличается от текущего, актив сбрасывается на первый элемент
/// каталога нового типа. Тот же тип состояние не меняет.
pub fn apply_asset_type(state: FormState, next: AssetType) -> FormState {
    if state.asset_type == next {
        return state;
    }
    FormState {
        asset_type: next,
        asset: Asset::default_for(next),
        ..state
    }
}

/// Сменить частоту. Оба поля выбора дня очищаются всегда, в том числе при
/// повторном выборе той же частоты.
pub fn apply_frequency(state: FormState, frequency: Frequency) -> FormState {
    FormState {
        frequency,
        day_of_week: None,
        day_of_month: None,
        ..state
    }
}

/// Форма готова к отправке: сумма задана и для выбранной частоты выбран день.
pub fn is_form_valid(state: &FormState) -> bool {
    !state.amount.is_empty()
        && match state.frequency {
            Frequency::Daily => true,
            Frequency::Weekly => state.day_of_week.is_some(),
            Frequency::Monthly => state.day_of_month.is_some(),
        }
}

/// Сумма задана и меньше минимальной. Только предупреждение, отправку не
/// блокирует.
pub fn is_amount_too_low(state: &FormState) -> bool {
    !state.amount.is_empty() && state.amount.cmp_value(MIN_AMOUNT) == Ordering::Less
}

/// Снимок расписания, передаваемый внешнему получателю при отправке.
///
/// Биржа и время заполняются только для монет.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScheduleSnapshot {
    pub asset_type: AssetType,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub exchange: Option<Exchange>,
    pub asset: Asset,
    pub amount: Amount,
    pub frequency: Frequency,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub day_of_week: Option<DayOfWeek>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub day_of_month: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub time: Option<NaiveDateTime>,
}

impl From<&FormState> for ScheduleSnapshot {
    fn from(state: &FormState) -> Self {
        let is_coin = state.asset_type == AssetType::Coin;
        Self {
            asset_type: state.asset_type,
            exchange: is_coin.then_some(state.exchange),
            asset: state.asset,
            amount: state.amount.clone(),
            frequency: state.frequency,
            day_of_week: state.day_of_week,
            day_of_month: state.day_of_month,
            time: is_coin.then_some(state.reference_time),
        }
    }
}

/// Контроллер формы: владеет состоянием и применяет к нему действия
/// пользователя.
///
/// Каждый метод либо полностью применяет изменение, либо возвращает
/// [`FormError`] и оставляет состояние прежним.
#[derive(Debug, Clone)]
pub struct FormController {
    mode: FormMode,
    state: FormState,
}

impl FormController {
    /// Открыть форму в указанном режиме. `now` — момент открытия экрана.
    pub fn new(mode: FormMode, now: NaiveDateTime) -> Self {
        debug!("Форма открыта в режиме {:?}", mode);
        Self {
            mode,
            state: FormState::new(now),
        }
    }

    pub fn mode(&self) -> FormMode {
        self.mode
    }

    pub fn state(&self) -> &FormState {
        &self.state
    }

    pub fn is_form_valid(&self) -> bool {
        is_form_valid(&self.state)
    }

    pub fn is_amount_too_low(&self) -> bool {
        is_amount_too_low(&self.state)
    }

    /// Биржа и актив заблокированы в режиме редактирования.
    pub fn identity_locked(&self) -> bool {
        self.mode == FormMode::Edit
    }

    fn ensure_unlocked(&self, field: &'static str) -> Result<(), FormError> {
        if self.identity_locked() {
            warn!("Попытка изменить поле '{}' в режиме редактирования", field);
            return Err(FormError::FieldLocked(field));
        }
        Ok(())
    }

    /// Применить переход к состоянию.
    fn update(&mut self, transition: impl FnOnce(FormState) -> FormState) {
        self.state = transition(self.state.clone());
    }

    /// Выбрать тип актива.
    ///
    /// Смена типа сбрасывает актив, поэтому в режиме редактирования она
    /// недоступна.
    pub fn set_asset_type(&mut self, next: AssetType) -> Result<(), FormError> {
        if next == self.state.asset_type {
            return Ok(());
        }
        self.ensure_unlocked("asset_type")?;
        self.update(|state| apply_asset_type(state, next));
        debug!("Тип актива: {}, актив: {}", next, self.state.asset);
        Ok(())
    }

    /// Переключить тип актива на второе значение.
    pub fn toggle_asset_type(&mut self) -> Result<(), FormError> {
        self.set_asset_type(self.state.asset_type.other())
    }

    /// Выбрать актив из каталога текущего типа.
    pub fn set_asset(&mut self, asset: Asset) -> Result<(), FormError> {
        self.ensure_unlocked("asset")?;
        if asset.asset_type() != self.state.asset_type {
            return Err(FormError::catalog_err(format!(
                "{} не относится к типу '{}'",
                asset, self.state.asset_type
            )));
        }
        self.state.asset = asset;
        debug!("Актив: {}", asset);
        Ok(())
    }

    /// Выбрать биржу. Для акций значение сохраняется, но не используется.
    pub fn set_exchange(&mut self, exchange: Exchange) -> Result<(), FormError> {
        self.ensure_unlocked("exchange")?;
        self.state.exchange = exchange;
        debug!("Биржа: {}", exchange);
        Ok(())
    }

    /// Принять ввод суммы в свободной форме.
    pub fn set_amount(&mut self, raw: &str) {
        self.state.amount = Amount::from_input(raw);
        debug!("Сумма: '{}'", self.state.amount);
    }

    pub fn set_frequency(&mut self, frequency: Frequency) {
        self.update(|state| apply_frequency(state, frequency));
        debug!("Частота: {}", frequency);
    }

    /// Выбрать день недели. Доступно только для еженедельной частоты.
    pub fn set_day_of_week(&mut self, day: DayOfWeek) -> Result<(), FormError> {
        if !self.state.shows_weekday_picker() {
            return Err(FormError::value_err(format!(
                "день недели не выбирается для частоты '{}'",
                self.state.frequency
            )));
        }
        self.state.day_of_week = Some(day);
        debug!("День недели: {}", day);
        Ok(())
    }

    /// Выбрать день месяца в пределах месяца опорного времени. Доступно только
    /// для ежемесячной частоты.
    pub fn set_day_of_month(&mut self, day: u32) -> Result<(), FormError> {
        if !self.state.shows_day_picker() {
            return Err(FormError::value_err(format!(
                "день месяца не выбирается для частоты '{}'",
                self.state.frequency
            )));
        }
        let range = self.state.day_of_month_options();
        if !range.contains(&day) {
            return Err(FormError::value_err(format!(
                "день {} вне диапазона {}..={}",
                day,
                range.start(),
                range.end()
            )));
        }
        self.state.day_of_month = Some(day);
        debug!("День месяца: {}", day);
        Ok(())
    }

    /// Установить опорное время.
    ///
    /// Доступно только для монет: для акций выбор времени скрыт. Пустое
    /// значение отклоняется, прежнее время сохраняется. Если новый месяц
    /// короче и выбранный день месяца в него не попадает, день сбрасывается и
    /// форма требует выбрать его заново.
    pub fn set_reference_time(&mut self, time: Option<NaiveDateTime>) -> Result<(), FormError> {
        if !self.state.shows_time_picker() {
            return Err(FormError::value_err(format!(
                "время не выбирается для типа '{}'",
                self.state.asset_type
            )));
        }
        let Some(time) = time else {
            warn!(
                "Пустое время отклонено, сохранено {}",
                self.state.reference_time
            );
            return Err(FormError::MissingTime);
        };

        self.state.reference_time = time;
        if let Some(day) = self.state.day_of_month
            && !self.state.day_of_month_options().contains(&day)
        {
            warn!("День месяца {} сброшен: в месяце {} меньше дней", day, time.format("%Y-%m"));
            self.state.day_of_month = None;
        }
        debug!("Время: {}", time);
        Ok(())
    }

    /// Снимок текущего состояния для отправки.
    pub fn snapshot(&self) -> ScheduleSnapshot {
        ScheduleSnapshot::from(&self.state)
    }

    /// Передать снимок расписания получателю.
    ///
    /// ## Ошибки
    ///
    /// - [`FormError::Incomplete`] — форма не готова ([`is_form_valid`])
    /// - ошибки получателя передаются без изменений
    pub fn submit<S: SubmissionSink + ?Sized>(&self, sink: &mut S) -> Result<(), FormError> {
        if !self.is_form_valid() {
            return Err(FormError::Incomplete);
        }
        if self.is_amount_too_low() {
            warn!(
                "Сумма {} меньше минимальной {}, расписание всё равно отправлено",
                self.state.amount, MIN_AMOUNT
            );
        }

        let snapshot = self.snapshot();
        sink.accept(&snapshot)?;
        info!("Расписание отправлено: {} {}", snapshot.asset, snapshot.amount);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{Coin, Stock};
    use chrono::NaiveDate;

    /// Получатель, сохраняющий снимки в памяти.
    #[derive(Default)]
    struct Collect(Vec<ScheduleSnapshot>);

    impl SubmissionSink for Collect {
        fn accept(&mut self, snapshot: &ScheduleSnapshot) -> Result<(), FormError> {
            self.0.push(snapshot.clone());
            Ok(())
        }
    }

    fn opened_at(y: i32, m: u32, d: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d)
            .unwrap()
            .and_hms_opt(9, 7, 0)
            .unwrap()
    }

    fn controller() -> FormController {
        FormController::new(FormMode::Create, opened_at(2026, 1, 15))
    }

    #[test]
    fn initial_state() {
        let form = controller();
        let state = form.state();

        assert_eq!(state.asset_type, AssetType::Coin);
        assert_eq!(state.exchange, Exchange::Bithumb);
        assert_eq!(state.asset, Asset::Coin(Coin::Btc));
        assert!(state.amount.is_empty());
        assert_eq!(state.frequency, Frequency::Daily);
        assert_eq!(state.day_of_week, None);
        assert_eq!(state.day_of_month, None);
        assert_eq!(state.reference_time.format("%H:%M").to_string(), "09:15");
        assert!(!form.is_form_valid());
    }

    #[test]
    fn mode_from_query() {
        assert_eq!(FormMode::from_query("edit=true"), FormMode::Edit);
        assert_eq!(FormMode::from_query("?id=7&edit=true"), FormMode::Edit);
        assert_eq!(FormMode::from_query("edit=false"), FormMode::Create);
        assert_eq!(FormMode::from_query(""), FormMode::Create);
    }

    #[test]
    fn empty_amount_is_never_valid() {
        let mut form = controller();
        for f in Frequency::ALL {
            form.set_frequency(*f);
            let _ = form.set_day_of_week(DayOfWeek::Monday);
            let _ = form.set_day_of_month(1);
            assert!(!form.is_form_valid(), "frequency {f}");
        }
    }

    #[test]
    fn coin_daily_low_amount_is_valid_with_warning() {
        let mut form = controller();
        form.set_asset_type(AssetType::Coin).unwrap();
        form.set_amount("1000");
        form.set_frequency(Frequency::Daily);

        assert!(form.is_form_valid());
        assert!(form.is_amount_too_low());
    }

    #[test]
    fn minimum_amount_boundary() {
        let mut form = controller();
        assert!(!form.is_amount_too_low());

        form.set_amount("4999");
        assert!(form.is_amount_too_low());

        form.set_amount("5000");
        assert!(!form.is_amount_too_low());

        form.set_amount("0");
        assert!(form.is_amount_too_low());
    }

    #[test]
    fn switching_to_stock_resets_asset_and_hides_coin_fields() {
        let mut form = controller();
        form.set_asset(Asset::Coin(Coin::Sol)).unwrap();
        form.set_asset_type(AssetType::Stock).unwrap();

        let state = form.state();
        assert_eq!(state.asset, Asset::Stock(Stock::Aapl));
        assert!(!state.shows_exchange());
        assert!(!state.shows_time_picker());
        assert_eq!(state.asset_options().len(), 4);
    }

    #[test]
    fn same_asset_type_keeps_asset() {
        let mut form = controller();
        form.set_asset(Asset::Coin(Coin::Xrp)).unwrap();
        form.set_asset_type(AssetType::Coin).unwrap();
        assert_eq!(form.state().asset, Asset::Coin(Coin::Xrp));

        form.toggle_asset_type().unwrap();
        form.toggle_asset_type().unwrap();
        assert_eq!(form.state().asset, Asset::Coin(Coin::Btc));
    }

    #[test]
    fn asset_must_match_type() {
        let mut form = controller();
        let err = form.set_asset(Asset::Stock(Stock::Tsla)).unwrap_err();
        assert!(matches!(err, FormError::CatalogMismatch(_)));
        assert_eq!(form.state().asset, Asset::Coin(Coin::Btc));
    }

    #[test]
    fn edit_mode_locks_identity_fields() {
        let mut form = FormController::new(FormMode::Edit, opened_at(2026, 1, 15));

        assert_eq!(
            form.set_asset(Asset::Coin(Coin::Eth)),
            Err(FormError::FieldLocked("asset"))
        );
        assert_eq!(
            form.set_exchange(Exchange::Upbit),
            Err(FormError::FieldLocked("exchange"))
        );
        assert!(form.toggle_asset_type().is_err());

        let state = form.state();
        assert_eq!(state.asset, Asset::Coin(Coin::Btc));
        assert_eq!(state.exchange, Exchange::Bithumb);
        assert_eq!(state.asset_type, AssetType::Coin);

        form.set_amount("10000");
        form.set_frequency(Frequency::Weekly);
        form.set_day_of_week(DayOfWeek::Friday).unwrap();
        assert!(form.is_form_valid());
    }

    #[test]
    fn frequency_change_clears_days() {
        for from in Frequency::ALL {
            for to in Frequency::ALL {
                let mut form = controller();
                form.set_frequency(*from);
                let _ = form.set_day_of_week(DayOfWeek::Tuesday);
                let _ = form.set_day_of_month(3);

                form.set_frequency(*to);
                assert_eq!(form.state().day_of_week, None, "{from} -> {to}");
                assert_eq!(form.state().day_of_month, None, "{from} -> {to}");
            }
        }
    }

    #[test]
    fn same_frequency_still_clears_day() {
        let mut form = controller();
        form.set_frequency(Frequency::Weekly);
        form.set_day_of_week(DayOfWeek::Sunday).unwrap();
        form.set_frequency(Frequency::Weekly);
        assert_eq!(form.state().day_of_week, None);
    }

    #[test]
    fn day_pickers_follow_frequency() {
        let mut form = controller();
        assert!(form.set_day_of_week(DayOfWeek::Monday).is_err());
        assert!(form.set_day_of_month(1).is_err());

        form.set_frequency(Frequency::Weekly);
        assert!(form.state().shows_weekday_picker());
        assert!(form.set_day_of_month(1).is_err());
        assert_eq!(form.state().day_of_month, None);
    }

    #[test]
    fn weekly_needs_weekday() {
        let mut form = controller();
        form.set_amount("20,000");
        form.set_frequency(Frequency::Weekly);
        assert!(!form.is_form_valid());

        form.set_day_of_week(DayOfWeek::Monday).unwrap();
        assert!(form.is_form_valid());
    }

    #[test]
    fn monthly_needs_day() {
        let mut form = controller();
        form.set_amount("20000");
        form.set_frequency(Frequency::Monthly);
        assert!(!form.is_form_valid());

        form.set_day_of_month(31).unwrap();
        assert!(form.is_form_valid());

        form.set_amount("");
        assert!(!form.is_form_valid());
    }

    #[test]
    fn day_of_month_bound_follows_reference_month() {
        let mut form = FormController::new(FormMode::Create, opened_at(2026, 2, 3));
        form.set_frequency(Frequency::Monthly);

        assert_eq!(form.state().day_of_month_options(), 1..=28);
        assert!(matches!(
            form.set_day_of_month(29),
            Err(FormError::ValueError(_))
        ));
        assert!(form.set_day_of_month(0).is_err());
        assert_eq!(form.state().day_of_month, None);
    }

    #[test]
    fn shorter_month_drops_out_of_range_day() {
        let mut form = controller();
        form.set_frequency(Frequency::Monthly);
        form.set_day_of_month(31).unwrap();

        let april = NaiveDate::from_ymd_opt(2026, 4, 1)
            .unwrap()
            .and_hms_opt(8, 0, 0)
            .unwrap();
        form.set_reference_time(Some(april)).unwrap();
        assert_eq!(form.state().day_of_month, None);

        form.set_day_of_month(30).unwrap();
        let may = opened_at(2026, 5, 1);
        form.set_reference_time(Some(may)).unwrap();
        assert_eq!(form.state().day_of_month, Some(30));
    }

    #[test]
    fn stock_form_keeps_time_and_day() {
        let mut form = controller();
        form.set_asset_type(AssetType::Stock).unwrap();
        form.set_frequency(Frequency::Monthly);
        form.set_day_of_month(31).unwrap();
        let before = form.state().reference_time;

        let february = opened_at(2026, 2, 1);
        assert!(matches!(
            form.set_reference_time(Some(february)),
            Err(FormError::ValueError(_))
        ));
        assert_eq!(form.state().reference_time, before);
        assert_eq!(form.state().day_of_month, Some(31));
    }

    #[test]
    fn null_time_is_ignored() {
        let mut form = controller();
        let before = form.state().reference_time;

        assert_eq!(form.set_reference_time(None), Err(FormError::MissingTime));
        assert_eq!(form.state().reference_time, before);
    }

    #[test]
    fn submit_requires_valid_form() {
        let mut form = controller();
        let mut sink = Collect::default();

        assert_eq!(form.submit(&mut sink), Err(FormError::Incomplete));
        assert!(sink.0.is_empty());

        form.set_amount("3000");
        form.submit(&mut sink).unwrap();
        assert_eq!(sink.0.len(), 1);
        assert_eq!(sink.0[0].amount.as_str(), "3,000");
    }

    #[test]
    fn snapshot_omits_coin_only_fields_for_stock() {
        let mut form = controller();
        form.set_exchange(Exchange::Upbit).unwrap();
        form.set_amount("50000");

        let coin = form.snapshot();
        assert_eq!(coin.exchange, Some(Exchange::Upbit));
        assert!(coin.time.is_some());

        form.set_asset_type(AssetType::Stock).unwrap();
        let stock = form.snapshot();
        assert_eq!(stock.exchange, None);
        assert_eq!(stock.time, None);
        assert_eq!(stock.asset, Asset::Stock(Stock::Aapl));
    }

    #[test]
    fn snapshot_json_shape() {
        let mut form = controller();
        form.set_amount("12500");
        form.set_frequency(Frequency::Weekly);
        form.set_day_of_week(DayOfWeek::Monday).unwrap();

        let json = serde_json::to_value(form.snapshot()).unwrap();
        assert_eq!(json["asset_type"], "coin");
        assert_eq!(json["exchange"], "bithumb");
        assert_eq!(json["asset"], "BTC");
        assert_eq!(json["amount"], "12,500");
        assert_eq!(json["frequency"], "weekly");
        assert_eq!(json["day_of_week"], "MON");
        assert_eq!(json["time"], "2026-01-15T09:15:00");
        assert!(json.get("day_of_month").is_none());
    }
}
