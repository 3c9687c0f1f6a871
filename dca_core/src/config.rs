//! Константы правил формы.

/// Минимальная сумма одной покупки, KRW. Меньшая сумма допускается, но
/// сопровождается предупреждением.
pub const MIN_AMOUNT: u64 = 5000;

/// Шаг выбора времени, минуты.
pub const TIME_STEP_MINUTES: u32 = 15;

/// Валюта суммы.
pub const CURRENCY: &str = "KRW";

/// Разделитель групп разрядов в отображаемой сумме.
pub const GROUP_SEPARATOR: char = ',';

/// Размер группы разрядов.
pub const GROUP_SIZE: usize = 3;
