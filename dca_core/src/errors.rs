//! Собственные типы ошибок формы.
//!
//! Для поддержки функциональности применяется крейт `thiserror`.
//!
//! Любая отклонённая операция контроллера возвращает [`FormError`] и не меняет
//! состояние формы.

use thiserror::Error;

/// Дерево ошибок формы DCA.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FormError {
    /// Некорректное значение.
    ///
    /// Например, день месяца 31 для февраля или время вне 15-минутной сетки.
    #[error("неверное значение: {0}")]
    ValueError(String),

    /// Значение не входит в каталог, действующий для текущего типа актива.
    #[error("значение вне каталога: {0}")]
    CatalogMismatch(String),

    /// Поле заблокировано в режиме редактирования.
    #[error("поле '{0}' нельзя изменить в режиме редактирования")]
    FieldLocked(&'static str),

    /// Виджет выбора времени вернул пустое значение.
    #[error("время не выбрано, сохранено прежнее значение")]
    MissingTime,

    /// Форма заполнена не полностью, отправка недоступна.
    #[error("форма заполнена не полностью")]
    Incomplete,

    /// Ошибка передачи снимка расписания внешнему получателю.
    #[error("ошибка передачи расписания: {0}")]
    Sink(String),

    /// Ошибка инициализации логгера.
    #[error("ошибка логгера: {0}")]
    Logger(String),
}

impl From<std::io::Error> for FormError {
    fn from(err: std::io::Error) -> Self {
        FormError::sink_err(err.to_string())
    }
}

impl From<serde_json::Error> for FormError {
    fn from(err: serde_json::Error) -> Self {
        FormError::sink_err(err.to_string())
    }
}

impl FormError {
    /// Конструктор для ошибки [`FormError::ValueError`].
    pub fn value_err(message: impl Into<String>) -> FormError {
        Self::ValueError(message.into())
    }

    /// Конструктор для ошибки [`FormError::CatalogMismatch`].
    pub fn catalog_err(message: impl Into<String>) -> FormError {
        Self::CatalogMismatch(message.into())
    }

    /// Конструктор для ошибки [`FormError::Sink`].
    pub fn sink_err(message: impl Into<String>) -> FormError {
        Self::Sink(message.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_are_human_readable() {
        assert_eq!(
            FormError::value_err("32").to_string(),
            "неверное значение: 32"
        );
        assert_eq!(
            FormError::FieldLocked("asset").to_string(),
            "поле 'asset' нельзя изменить в режиме редактирования"
        );
    }

    #[test]
    fn io_error_becomes_sink_error() {
        let io = std::io::Error::other("disk full");
        assert!(matches!(FormError::from(io), FormError::Sink(msg) if msg == "disk full"));
    }
}
