//! Control page provider

use std::borrow::Cow;
use std::path::PathBuf;

use prompter_core::prelude::*;

/// The control page bundled with the binary
pub const EMBEDDED_PAGE: &str = include_str!("../../assets/index.html");

/// Supplies the HTML document served at `/`
pub trait PageSource: Send + Sync {
    fn control_page(&self) -> Result<Cow<'static, str>>;
}

/// Serves [`EMBEDDED_PAGE`]
#[derive(Debug, Clone, Copy, Default)]
pub struct EmbeddedPage;

impl PageSource for EmbeddedPage {
    fn control_page(&self) -> Result<Cow<'static, str>> {
        Ok(Cow::Borrowed(EMBEDDED_PAGE))
    }
}

/// Serves a page from disk, re-read on every request so it can be edited
/// while the server runs
#[derive(Debug, Clone)]
pub struct FilePage {
    path: PathBuf,
}

impl FilePage {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl PageSource for FilePage {
    fn control_page(&self) -> Result<Cow<'static, str>> {
        std::fs::read_to_string(&self.path)
            .map(Cow::Owned)
            .map_err(|e| Error::page(format!("{}: {}", self.path.display(), e)))
    }
}
