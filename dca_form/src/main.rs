//! DCA Form. Консольная форма настройки регулярной покупки актива: тип
//! актива, биржа, актив, сумма, частота и время покупки.

#![warn(missing_docs)]

use log::{error, info};
use std::fs::OpenOptions;
use std::io;

mod cli;
mod config;
mod session;
mod view;

use cli::{ExitCode, FormSet, exit_err, parse_cli_args};
use dca_core::form::FormController;
use dca_core::init_simple_logger;
use dca_core::sink::{FanOut, JsonLinesSink, LogSink};
use dca_core::utils::now_local;
use session::Session;

fn main() {
    let settings = parse_cli_args();

    // Инициализация логгера.
    init_logger(&settings);
    info!("DCA Form запущена в режиме {:?}", settings.mode);

    let form = FormController::new(settings.mode, now_local());
    let mut session = Session::new(form, build_sink(&settings));

    let stdin = io::stdin();
    let mut stdout = io::stdout();
    match session.run(stdin.lock(), &mut stdout) {
        Ok(route) => info!(
            "DCA Form завершена, маршрут: {}, форма заполнена: {}",
            route,
            session.form().is_form_valid()
        ),
        Err(err) => {
            error!("Ошибка сессии: {}", err);
            exit_err(&err.to_string(), ExitCode::Session)
        }
    }
}

/// Инициализировать логгер приложения.
///
/// Используется метод [`init_simple_logger`] из крейта [`dca_core`].
fn init_logger(settings: &FormSet) {
    let app_name = env!("CARGO_PKG_NAME");
    if let Err(err) = init_simple_logger(app_name, &settings.log_dir) {
        exit_err(&err.to_string(), ExitCode::Logger);
    }
}

/// Собрать получателя отправленных расписаний: лог приложения и, если указан,
/// файл JSON-строк.
fn build_sink(settings: &FormSet) -> FanOut {
    let sink = FanOut::new().with(LogSink);

    let Some(path) = &settings.output else {
        return sink;
    };

    match OpenOptions::new().create(true).append(true).open(path) {
        Ok(file) => {
            info!("Расписания дописываются в {}", path.display());
            sink.with(JsonLinesSink::new(file))
        }
        Err(err) => exit_err(
            &format!("не удалось открыть {}: {}", path.display(), err),
            ExitCode::OutputFile,
        ),
    }
}
