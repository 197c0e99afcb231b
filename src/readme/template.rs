//! Template engines for the README module list.

use anyhow::Result;
use tera::{Context as TeraContext, Tera};

use crate::core::ModuleError;
use crate::manifest::Manifest;

/// Renders a template source against the manifest.
///
/// Implementations must be deterministic: the same source and manifest always
/// produce the same string, which keeps README updates idempotent.
pub trait TemplateEngine: Send + Sync {
    /// Render `source` with the manifest as context.
    fn render(&self, source: &str, manifest: &Manifest) -> Result<String>;
}

/// [`TemplateEngine`] backed by Tera.
///
/// Every top-level manifest key is available to the template, and `modules` is
/// always defined (empty when the manifest has none yet). Autoescaping is off
/// because the output is Markdown.
#[derive(Debug, Default, Clone, Copy)]
pub struct TeraTemplateEngine;

impl TeraTemplateEngine {
    /// Create the engine.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl TemplateEngine for TeraTemplateEngine {
    fn render(&self, source: &str, manifest: &Manifest) -> Result<String> {
        let mut context = TeraContext::from_serialize(manifest).map_err(|e| template_error(&e))?;
        context.insert("modules", manifest.modules());

        Tera::one_off(source, &context, false).map_err(|e| template_error(&e).into())
    }
}

fn template_error(error: &tera::Error) -> ModuleError {
    let mut reason = error.to_string();
    let mut source = std::error::Error::source(error);
    while let Some(cause) = source {
        reason.push_str(": ");
        reason.push_str(&cause.to_string());
        source = cause.source();
    }
    ModuleError::TemplateError {
        reason,
    }
}
