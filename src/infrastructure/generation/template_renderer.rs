//! Tera-based template renderer implementation

use std::error::Error as StdError;

use tera::Tera;
use tracing::debug;

use crate::core::error::{Error, Result};
use crate::core::templates::TemplateRepository;
use crate::generation::{RenderContext, TemplateRenderer};

/// Extension marking files that go through tera
pub const TEMPLATE_EXTENSION: &str = ".tera";

/// Tera-based template renderer
///
/// Every `.tera` file of every bundle is registered as
/// `<bundle>/<relative path>`.
pub struct TeraTemplateRenderer {
    tera: Tera,
}

impl TeraTemplateRenderer {
    pub fn from_repository(repository: &dyn TemplateRepository) -> Result<Self> {
        let mut sources = Vec::new();
        for template in repository.list_templates() {
            for file in repository.get_template_files(&template.name) {
                if file.relative_path.ends_with(TEMPLATE_EXTENSION) {
                    let name = format!("{}/{}", template.name, file.relative_path);
                    sources.push((name, file.text()?.to_string()));
                }
            }
        }

        debug!(template_count = sources.len(), "Registering templates");

        let mut tera = Tera::default();
        tera.add_raw_templates(sources)
            .map_err(|e| Error::template(format!("Failed to add templates: {}", describe(&e))))?;
        Ok(Self { tera })
    }

    #[cfg(test)]
    fn template_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.tera.get_template_names().collect();
        names.sort_unstable();
        names
    }
}

impl TemplateRenderer for TeraTemplateRenderer {
    fn render(&self, template: &str, context: &RenderContext) -> Result<String> {
        self.tera
            .render(template, &context.to_tera_context())
            .map_err(|e| {
                Error::template(format!(
                    "Failed to render template {template}: {}",
                    describe(&e)
                ))
            })
    }
}

/// Tera puts the useful part of a failure in the source chain.
fn describe(error: &tera::Error) -> String {
    let mut message = error.to_string();
    let mut source = error.source();
    while let Some(cause) = source {
        message.push_str(": ");
        message.push_str(&cause.to_string());
        source = cause.source();
    }
    message
}
