//! Передача снимка расписания внешнему получателю.
//!
//! Сам планировщик покупок находится вне формы. Форма лишь отдаёт
//! [`ScheduleSnapshot`] реализации [`SubmissionSink`].

use crate::errors::FormError;
use crate::form::ScheduleSnapshot;
use crate::traits::WriteExt;
use log::info;
use std::io::Write;

/// Получатель отправленных расписаний.
pub trait SubmissionSink {
    /// Принять снимок расписания.
    fn accept(&mut self, snapshot: &ScheduleSnapshot) -> Result<(), FormError>;
}

/// Записывает снимок в лог приложения в формате JSON.
#[derive(Debug, Default)]
pub struct LogSink;

impl SubmissionSink for LogSink {
    fn accept(&mut self, snapshot: &ScheduleSnapshot) -> Result<(), FormError> {
        let json = serde_json::to_string(snapshot)?;
        info!("Настройка регулярной покупки: {}", json);
        Ok(())
    }
}

/// Дописывает каждый снимок отдельной JSON-строкой в `writer`.
#[derive(Debug)]
pub struct JsonLinesSink<W: Write> {
    writer: W,
}

impl<W: Write> JsonLinesSink<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    /// Вернуть writer, например, чтобы прочитать записанное.
    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: Write> SubmissionSink for JsonLinesSink<W> {
    fn accept(&mut self, snapshot: &ScheduleSnapshot) -> Result<(), FormError> {
        let json = serde_json::to_string(snapshot)?;
        self.writer.write_line(json)?;
        Ok(())
    }
}

/// Передаёт снимок нескольким получателям по очереди. Первая ошибка
/// прерывает передачу.
#[derive(Default)]
pub struct FanOut {
    sinks: Vec<Box<dyn SubmissionSink>>,
}

impl FanOut {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, sink: impl SubmissionSink + 'static) -> Self {
        self.sinks.push(Box::new(sink));
        self
    }
}

impl SubmissionSink for FanOut {
    fn accept(&mut self, snapshot: &ScheduleSnapshot) -> Result<(), FormError> {
        self.sinks
            .iter_mut()
            .try_for_each(|sink| sink.accept(snapshot))
    }
}
