//! Универсальные трейты для формы DCA и её оболочек.

use std::io::{self, Write};

pub trait WriteExt {
    /// Отправляет в `Write` строку с завершающим переводом строки и
    /// сбрасывает буфер.
    fn write_line(&mut self, s: impl AsRef<str>) -> io::Result<()>;
}

impl<W: Write + ?Sized> WriteExt for W {
    fn write_line(&mut self, s: impl AsRef<str>) -> io::Result<()> {
        self.write_all(s.as_ref().as_bytes())?;
        self.write_all(b"\n")?;
        self.flush()
    }
}
