//! Projection of the module manifest into the project README.
//!
//! The README contains one generated region:
//!
//! ```markdown
//! # My site
//!
//! [//]: <> (Modules start)
//! ...rendered module list...
//! [//]: <> (Modules end)
//!
//! Everything else is hand-written and never touched.
//! ```
//!
//! [`render`] evaluates the `_cartridge/modules.tpl` template against the manifest,
//! and [`splice`] replaces the interior of the region with the result. Both marker
//! lines and everything outside them are preserved byte for byte.

mod template;

pub use template::{TemplateEngine, TeraTemplateEngine};

use anyhow::Result;
use regex::Regex;
use std::sync::LazyLock;

use crate::config::ProjectPaths;
use crate::constants::{README_END_MARKER, README_START_MARKER};
use crate::core::ModuleError;
use crate::manifest::Manifest;
use crate::utils::{read_text_file, write_text_file};

/// First start-marker line, then the shortest interior up to the next end marker.
static MODULES_REGION: LazyLock<Regex> = LazyLock::new(|| {
    let pattern = format!(
        r"(?s)({}[^\n]*\n)(.*?)({})",
        regex::escape(README_START_MARKER),
        regex::escape(README_END_MARKER)
    );
    Regex::new(&pattern).unwrap_or_else(|e| unreachable!("marker pattern is valid: {e}"))
});

/// Render the module list with `engine`.
pub fn render(engine: &dyn TemplateEngine, template_source: &str, manifest: &Manifest) -> Result<String> {
    engine.render(template_source, manifest)
}

/// Replace the interior of the first marker region with `rendered`.
///
/// A trailing newline is added to `rendered` when missing so the end marker stays
/// on its own line. Fails with [`ModuleError::MarkerNotFound`] when the region is
/// absent; `readme_name` only labels that error.
pub fn splice(readme: &str, rendered: &str, readme_name: &str) -> Result<String> {
    let captures = MODULES_REGION.captures(readme).ok_or_else(|| ModuleError::MarkerNotFound {
        file: readme_name.to_string(),
    })?;

    let (Some(start), Some(end)) = (captures.get(1), captures.get(3)) else {
        return Err(ModuleError::MarkerNotFound {
            file: readme_name.to_string(),
        }
        .into());
    };

    let mut output = String::with_capacity(readme.len() + rendered.len());
    output.push_str(&readme[..start.end()]);
    output.push_str(rendered);
    if !rendered.is_empty() && !rendered.ends_with('\n') {
        output.push('\n');
    }
    output.push_str(&readme[end.start()..]);
    Ok(output)
}

/// Re-render the README module region from `manifest`.
///
/// `load template -> render -> load readme -> splice -> save readme`.
pub async fn update_readme(
    paths: &ProjectPaths,
    engine: &dyn TemplateEngine,
    manifest: &Manifest,
) -> Result<()> {
    let template_path = paths.modules_template();
    let template_source = read_text_file(&template_path).await?;
    let rendered = render(engine, &template_source, manifest)?;

    let readme = read_text_file(&paths.readme).await?;
    let updated = splice(&readme, &rendered, &paths.readme.display().to_string())?;

    if updated == readme {
        tracing::debug!("{} already up to date", paths.readme.display());
        return Ok(());
    }

    write_text_file(&paths.readme, &updated)?;
    tracing::debug!("rendered {} module(s) into {}", manifest.modules().len(), paths.readme.display());
    Ok(())
}
