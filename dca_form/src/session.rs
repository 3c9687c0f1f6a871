//! Сессия формы: построчные команды пользователя и ответы на них.
//!
//! Каждая строка ввода — одна команда. Ответ — `OK|<сообщение>` или
//! `ERROR|<причина>`. Отклонённая команда не меняет форму.

use crate::config::{HELP, PARENT_ROUTE, WELCOME};
use crate::view::{amount_warning, render};
use dca_core::catalog::{Asset, AssetType, DayOfWeek, Exchange, Frequency};
use dca_core::errors::FormError;
use dca_core::form::FormController;
use dca_core::sink::SubmissionSink;
use dca_core::time::{parse_reference_time, time_slots, TIME_FORMAT};
use dca_core::traits::WriteExt;
use log::{debug, info};
use macros::CatalogEnum;
use std::fmt::Display;
use std::io::{self, BufRead, Write};
use std::str::FromStr;

/// Ответ сессии на команду.
#[derive(Debug, PartialEq, Eq)]
pub enum Response {
    /// Команда выполнена.
    Ok { message: Option<String> },
    /// Команда отклонена.
    Err { message: Option<String> },
}

impl Display for Response {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Response::Ok { message } => match message {
                Some(msg) => write!(f, "OK|{}", msg),
                None => write!(f, "OK"),
            },
            Response::Err { message } => match message {
                Some(msg) => write!(f, "ERROR|{}", msg),
                None => write!(f, "ERROR"),
            },
        }
    }
}

impl Response {
    /// Успешный ответ.
    pub fn ok(message: impl Into<String>) -> Self {
        let message = message.into();
        match message.trim().is_empty() {
            true => Response::Ok { message: None },
            false => Response::Ok {
                message: Some(message),
            },
        }
    }

    /// Ответ с ошибкой.
    pub fn err(message: impl Into<String>) -> Self {
        let message = message.into();
        match message.trim().is_empty() {
            true => Response::Err { message: None },
            false => Response::Err {
                message: Some(message),
            },
        }
    }
}

impl From<FormError> for Response {
    fn from(err: FormError) -> Self {
        Response::err(err.to_string())
    }
}

/// Команды пользователя.
#[derive(Debug, Clone, Copy, PartialEq, Eq, CatalogEnum)]
pub enum Command {
    /// Тип актива.
    Type,
    /// Переключить тип актива.
    Toggle,
    Exchange,
    Asset,
    Amount,
    Frequency,
    Weekday,
    Day,
    Time,
    /// Показать форму.
    Show,
    /// Отправить расписание.
    Submit,
    /// Закрыть форму.
    Close,
    Help,
}

/// Продолжать ли сессию после команды.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Close,
}

/// Сессия формы с получателем отправленных расписаний.
pub struct Session<S: SubmissionSink> {
    form: FormController,
    sink: S,
}

impl<S: SubmissionSink> Session<S> {
    pub fn new(form: FormController, sink: S) -> Self {
        Self { form, sink }
    }

    pub fn form(&self) -> &FormController {
        &self.form
    }

    /// Обработать одну строку ввода.
    ///
    /// Возвращает дополнительные строки вывода (экран формы или справку),
    /// ответ и решение о продолжении сессии.
    pub fn handle_line(&mut self, line: &str) -> (Vec<String>, Response, Flow) {
        let input = line.trim();
        if input.is_empty() {
            return (vec![], Response::err("empty line"), Flow::Continue);
        }

        let (cmd, arg) = match input.split_once(char::is_whitespace) {
            Some((cmd, arg)) => (cmd, arg.trim()),
            None => (input, ""),
        };

        let command = match Command::from_str(cmd) {
            Ok(command) => command,
            Err(_) => return (vec![], Response::err("invalid command"), Flow::Continue),
        };
        debug!("Команда: {} '{}'", command, arg);

        match command {
            Command::Show => (render(&self.form), Response::ok(""), Flow::Continue),
            Command::Help => (
                HELP.lines().map(str::to_string).collect(),
                Response::ok(""),
                Flow::Continue,
            ),
            Command::Time if arg.is_empty() => match self.time_slot_lines() {
                Ok(lines) => (lines, Response::ok(""), Flow::Continue),
                Err(err) => (vec![], Response::from(err), Flow::Continue),
            },
            Command::Close => {
                info!("Форма закрыта, переход на {}", PARENT_ROUTE);
                (vec![], Response::ok(PARENT_ROUTE), Flow::Close)
            }
            _ => {
                let response = self
                    .apply(command, arg)
                    .unwrap_or_else(Response::from);
                (vec![], response, Flow::Continue)
            }
        }
    }

    /// Значения виджета выбора времени по 8 в строке, текущее в скобках.
    fn time_slot_lines(&self) -> Result<Vec<String>, FormError> {
        let state = self.form.state();
        if !state.shows_time_picker() {
            return Err(FormError::value_err(format!(
                "время не выбирается для типа '{}'",
                state.asset_type
            )));
        }

        let current = state.reference_time.time();
        let slots: Vec<String> = time_slots()
            .into_iter()
            .map(|slot| match slot == current {
                true => format!("[{}]", slot.format(TIME_FORMAT)),
                false => slot.format(TIME_FORMAT).to_string(),
            })
            .collect();

        Ok(slots.chunks(8).map(|row| row.join(" ")).collect())
    }

    /// Применить команду, изменяющую форму.
    fn apply(&mut self, command: Command, arg: &str) -> Result<Response, FormError> {
        let form = &mut self.form;
        let response = match command {
            Command::Type => {
                form.set_asset_type(AssetType::from_str(arg)?)?;
                Response::ok(form.state().asset.code())
            }
            Command::Toggle => {
                form.toggle_asset_type()?;
                Response::ok(format!(
                    "{} {}",
                    form.state().asset_type,
                    form.state().asset
                ))
            }
            Command::Exchange => {
                form.set_exchange(Exchange::from_str(arg)?)?;
                Response::ok(arg.to_lowercase())
            }
            Command::Asset => {
                let asset = Asset::parse_for(form.state().asset_type, arg)?;
                form.set_asset(asset)?;
                Response::ok(asset.code())
            }
            Command::Amount => {
                form.set_amount(arg);
                let amount = form.state().amount.to_string();
                match form.is_amount_too_low() {
                    true => Response::ok(format!("{}|{}", amount, amount_warning())),
                    false => Response::ok(amount),
                }
            }
            Command::Frequency => {
                form.set_frequency(Frequency::from_str(arg)?);
                Response::ok(form.state().frequency.code())
            }
            Command::Weekday => {
                form.set_day_of_week(DayOfWeek::from_str(arg)?)?;
                Response::ok(arg.to_uppercase())
            }
            Command::Day => {
                let day: u32 = arg
                    .parse()
                    .map_err(|_| FormError::value_err(format!("день месяца: '{}'", arg)))?;
                form.set_day_of_month(day)?;
                Response::ok(day.to_string())
            }
            Command::Time => {
                let today = form.state().reference_time.date();
                form.set_reference_time(parse_reference_time(arg, today)?)?;
                Response::ok(form.state().reference_time.format(TIME_FORMAT).to_string())
            }
            Command::Submit => {
                form.submit(&mut self.sink)?;
                Response::ok("submitted")
            }
            Command::Show | Command::Help | Command::Close => Response::err("unexpected command"),
        };
        Ok(response)
    }

    /// Читать команды из `reader` до `close` или конца ввода.
    ///
    /// Конец ввода равносилен закрытию формы. Возвращает маршрут, на который
    /// переходит пользователь.
    pub fn run<R: BufRead, W: Write>(&mut self, reader: R, writer: &mut W) -> io::Result<String> {
        writer.write_line(WELCOME)?;

        for line in reader.lines() {
            let (output, response, flow) = self.handle_line(&line?);
            for out in output {
                writer.write_line(out)?;
            }
            writer.write_line(response.to_string())?;

            if flow == Flow::Close {
                return Ok(PARENT_ROUTE.to_string());
            }
        }

        info!("Ввод завершён, форма закрыта");
        Ok(PARENT_ROUTE.to_string())
    }
}
