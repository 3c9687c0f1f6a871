//! Универсальные утилиты.

use chrono::{Local, NaiveDateTime};
use std::path::PathBuf;

/// Текущее локальное время без часового пояса — момент открытия формы.
pub fn now_local() -> NaiveDateTime {
    Local::now().naive_local()
}

/// Предоставить родительский каталог проекта.
///
/// Для `debug` это будет директория расположения `cargo.toml`, а для `release`
/// расположение скомпилированного файла.
#[cfg(debug_assertions)]
pub fn get_project_root() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
}

#[cfg(not(debug_assertions))]
pub fn get_project_root() -> PathBuf {
    std::env::current_exe()
        .ok()
        .and_then(|p| p.parent().map(|p| p.to_path_buf()))
        .unwrap_or_else(|| PathBuf::from("."))
}

/// Предоставить корневую директорию всего проекта.
///
/// Для `debug` — каталог `workspace`, для `release` — место расположения
/// скомпилированного файла.
pub fn get_workspace_root() -> PathBuf {
    let project_root = get_project_root();
    if cfg!(debug_assertions) {
        project_root
            .parent()
            .map(|p| p.to_path_buf())
            .unwrap_or(project_root)
    } else {
        project_root
    }
}
