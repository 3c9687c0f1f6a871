//! Форма настройки регулярной покупки актива (dollar-cost averaging).
//!
//! Крейт содержит модель формы, правила её изменения и границу передачи
//! готового расписания внешнему получателю. Планировщика покупок здесь нет.
//!
//! ## Пример
//!
//! ```
//! use chrono::NaiveDate;
//! use dca_core::catalog::Frequency;
//! use dca_core::form::{FormController, FormMode};
//! use dca_core::sink::LogSink;
//!
//! let now = NaiveDate::from_ymd_opt(2026, 10, 19).unwrap().and_hms_opt(9, 5, 0).unwrap();
//! let mut form = FormController::new(FormMode::Create, now);
//!
//! form.set_amount("10000");
//! form.set_frequency(Frequency::Daily);
//! assert!(form.is_form_valid());
//!
//! form.submit(&mut LogSink).unwrap();
//! ```

use crate::errors::FormError;
use log::*;
use simplelog::{CombinedLogger, Config, WriteLogger};
use std::fs;
use std::fs::File;
use std::path::Path;

pub mod amount;
pub mod catalog;
pub mod config;
pub mod errors;
pub mod form;
pub mod sink;
pub mod time;
pub mod traits;
pub mod utils;

/// Фабрика по созданию индивидуальных логгеров для приложений.
///
/// Инициализация требуется один раз при запуске приложения. Далее используются
/// стандартные макросы [`log::info`], [`log::warn`], [`log::debug`] для
/// логирования событий.
///
/// ## Args
///
/// - `app_name` — название приложения (будет использовано для создания файла)
/// - `log_dir` — путь к директории расположения log-файлов (при отсутствии
///   пытается создать)
///
/// ## Пример
///
/// ```no_run
/// use log::*;
/// use dca_core::init_simple_logger;
/// use dca_core::utils::get_workspace_root;
///
/// let log_dir = get_workspace_root().join("log");
/// init_simple_logger("dca", &log_dir).unwrap();
///
/// info!("Форма открыта");
/// ```
///
/// ## Ошибки
///
/// [`FormError::Logger`] при ошибке создания директории или log-файла и при
/// повторной инициализации логгера.
pub fn init_simple_logger(app_name: &str, log_dir: &Path) -> Result<(), FormError> {
    let config = Config::default();
    let log_file_path = log_dir.join(format!("{}.log", app_name));

    if !log_dir.exists() {
        fs::create_dir_all(log_dir).map_err(|e| {
            FormError::Logger(format!(
                "не удалось сформировать путь {}: {e}",
                log_dir.display()
            ))
        })?;
    }

    let log_file = File::create(&log_file_path).map_err(|e| {
        FormError::Logger(format!(
            "ошибка работы с log-файлом {}: {e}",
            log_file_path.display()
        ))
    })?;

    let logger = WriteLogger::new(LevelFilter::Debug, config, log_file);

    CombinedLogger::init(vec![logger])
        .map_err(|e| FormError::Logger(format!("ошибка инициализации логгера: {e}")))
}
