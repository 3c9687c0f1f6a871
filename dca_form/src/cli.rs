//! Обработка аргументов командной строки при запуске приложения.
//!
//! Пользователь может указать:
//! - режим формы (`--edit` или строку запроса маршрута `--query edit=true`)
//! - файл для записи отправленных расписаний
//! - директорию log-файлов

use crate::config::LOG_FOLDER;
use clap::Parser;
use dca_core::form::FormMode;
use dca_core::utils::get_workspace_root;
use log::error;
use std::path::PathBuf;
use std::process::exit;

/// Перечисление ошибок при завершении приложения.
#[derive(Copy, Clone, Debug)]
#[repr(u8)]
pub enum ExitCode {
    /// Ошибка инициализации логгера.
    Logger = 1,
    /// Ошибка открытия файла для расписаний.
    OutputFile,
    /// Ошибка ввода-вывода сессии.
    Session,
}

impl ExitCode {
    /// Предоставить цифровое значение выбранного перечисления (`u8`).
    pub fn value(&self) -> u8 {
        *self as u8
    }
}

#[derive(Debug, Parser)]
#[command(about = "DCA Form. Configure a recurring purchase schedule.")]
#[command(author, version, long_about = None)]
struct CliArgs {
    /// Open the form for an existing schedule (exchange and asset are locked).
    #[arg(short, long)]
    edit: bool,

    /// Route query string, for example `edit=true`.
    #[arg(short, long, required = false, default_value = "")]
    query: String,

    /// Append submitted schedules as JSON lines to FILE.
    #[arg(short, long, required = false, value_name = "FILE", value_parser = validate_output)]
    output: Option<PathBuf>,

    /// Directory for log files.
    #[arg(short, long, required = false, value_name = "DIR")]
    log_dir: Option<PathBuf>,
}

/// Валидатор для поля `output`: путь не должен указывать на директорию.
fn validate_output(s: &str) -> Result<PathBuf, String> {
    let path = PathBuf::from(s);
    if path.is_dir() {
        return Err(format!("{s} is a directory"));
    }
    Ok(path)
}

/// Параметры, полученные из командной строки при запуске приложения.
#[derive(Debug)]
pub struct FormSet {
    /// Режим открытия формы.
    pub mode: FormMode,
    /// Файл для отправленных расписаний.
    pub output: Option<PathBuf>,
    /// Директория log-файлов.
    pub log_dir: PathBuf,
}

impl FormSet {
    /// Сформировать экземпляр [`FormSet`] на основе аргументов командной
    /// строки.
    fn new(args: &CliArgs) -> Self {
        let mode = match args.edit {
            true => FormMode::Edit,
            false => FormMode::from_query(&args.query),
        };
        let log_dir = args
            .log_dir
            .clone()
            .unwrap_or_else(|| get_workspace_root().join(LOG_FOLDER));

        Self {
            mode,
            output: args.output.clone(),
            log_dir,
        }
    }
}

/// Получить от пользователя первичные настройки приложения.
pub fn parse_cli_args() -> FormSet {
    let args = CliArgs::parse();

    FormSet::new(&args)
}

/// Опубликовать сообщение об ошибке и завершить работу приложения.
pub fn exit_err(message: &str, code: ExitCode) -> ! {
    error!("Ошибка: {} (код {})", message, code.value());
    eprintln!("Ошибка: {}", message);
    exit(code.value() as i32);
}
