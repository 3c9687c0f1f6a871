//! Конфигурация приложения DCA Form.

/// Название директории для log-файлов.
pub const LOG_FOLDER: &str = "log";

/// Маршрут списка расписаний, куда ведёт закрытие формы.
pub const PARENT_ROUTE: &str = "/dca";

/// Приветствие при запуске сессии.
pub const WELCOME: &str = "DCA Form. Введите `help` для списка команд, `close` для выхода.";

/// Справка по командам сессии.
pub const HELP: &str = "\
type <coin|stock>                     тип актива
toggle                                переключить тип актива
exchange <bithumb|upbit>              биржа (только для монет)
asset <код>                           актив из каталога текущего типа
amount <сумма>                        сумма покупки, KRW
frequency <daily|weekly|monthly>      частота покупок
weekday <SUN|MON|TUE|WED|THU|FRI|SAT> день недели (weekly)
day <число>                           день месяца (monthly)
time <HH:MM|YYYY-MM-DD HH:MM|none>    время покупки (только для монет)
time                                  доступные значения времени
show                                  показать форму
submit                                отправить расписание
close                                 закрыть форму";

// Тексты экрана.
pub const TITLE_SUFFIX: &str = "모으기";
pub const EXCHANGE_QUESTION: &str = "어느 거래소에서 모을까요?";
pub const COIN_QUESTION: &str = "어떤 코인을 모을까요?";
pub const STOCK_QUESTION: &str = "어떤 주식을 모을까요?";
pub const AMOUNT_QUESTION: &str = "얼마씩 모을까요?";
pub const WHEN_QUESTION: &str = "언제 모을까요?";
pub const WEEKDAY_CAPTION: &str = "요일 선택";
pub const DAY_CAPTION: &str = "일자 선택";
pub const TIME_CAPTION: &str = "시간";
pub const SUBMIT_CAPTION: &str = "모으기";
