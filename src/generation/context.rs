//! Render context shared by every template

use std::collections::BTreeMap;

use serde::Serialize;
use serde_json::Value as JsonValue;

use crate::core::config::{LOCALES, SiteConfig};
use crate::core::error::Result;
use crate::release::{VersionEntry, version_dir_name};

/// Variables handed to the template engine
#[derive(Debug, Clone, Default)]
pub struct RenderContext {
    pub variables: BTreeMap<String, JsonValue>,
}

impl RenderContext {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a variable to the render context
    pub fn add_variable(&mut self, key: &str, value: JsonValue) {
        self.variables.insert(key.to_string(), value);
    }

    /// Serialize `value` and add it under `key`.
    pub fn add_serialized<T: Serialize + ?Sized>(&mut self, key: &str, value: &T) -> Result<()> {
        let value = serde_json::to_value(value)
            .map_err(|e| crate::core::Error::template(format!("Cannot serialize '{key}': {e}")))?;
        self.add_variable(key, value);
        Ok(())
    }

    pub fn to_tera_context(&self) -> tera::Context {
        let mut context = tera::Context::new();
        for (key, value) in &self.variables {
            context.insert(key.as_str(), value);
        }
        context
    }

    /// Context for the initial scaffold.
    ///
    /// The root page lists a single entry: the configured initial version,
    /// marked as latest.
    pub fn for_site(config: &SiteConfig) -> Result<Self> {
        let initial_dir = version_dir_name(&config.site.initial_version)?;
        let versions = vec![VersionEntry::new(&initial_dir, true)];

        let mut context = Self::base(config);
        context.add_serialized("versions", &versions)?;
        context.add_variable(
            "site_version",
            JsonValue::String(versions[0].number.clone()),
        );
        Ok(context)
    }

    /// Variables every template may use
    pub fn base(config: &SiteConfig) -> Self {
        let mut context = Self::new();
        context.add_variable("site_title", JsonValue::from(config.site.title.as_str()));
        context.add_variable("pages_branch", JsonValue::from(config.pages.branch.as_str()));
        context.add_variable("pages_path", JsonValue::from(config.pages.path.as_str()));
        context.add_variable(
            "locales",
            JsonValue::Array(LOCALES.iter().map(|l| JsonValue::from(*l)).collect()),
        );
        context
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_add_variable() {
        let mut context = RenderContext::new();
        context.add_variable("site_title", json!("Docs"));
        assert!(context.variables.contains_key("site_title"));
        assert!(!context.variables.contains_key("versions"));
        assert_eq!(
            context.to_tera_context().get("site_title"),
            Some(&json!("Docs"))
        );
    }

    #[test]
    fn test_site_context_lists_initial_version() {
        let context = RenderContext::for_site(&SiteConfig::default()).unwrap();
        assert_eq!(
            context.variables["versions"],
            json!([{ "dir": "v1.0.0", "number": "1.0.0", "latest": true }])
        );
        assert_eq!(context.variables["site_version"], json!("1.0.0"));
        assert_eq!(context.variables["locales"], json!(["ru", "en"]));
        assert_eq!(context.variables["pages_branch"], json!("gh-pages"));
    }

    #[test]
    fn test_initial_version_with_v_prefix_not_doubled() {
        let mut config = SiteConfig::default();
        config.site.initial_version = "v2.1".to_string();
        let context = RenderContext::for_site(&config).unwrap();
        assert_eq!(context.variables["versions"][0]["dir"], json!("v2.1"));
        assert_eq!(context.variables["site_version"], json!("2.1"));
    }
}
