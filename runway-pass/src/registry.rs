use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;

use runway_core::repository::StyleConfigRepository;
use runway_core::style::{BoardingStylePayload, DEFAULT_STYLE};
use runway_core::{CoreError, StyleParams, StyleReference};
use tracing::{debug, warn};

use crate::layout::LayoutRenderer;
use crate::styles::{DefaultStyle, KjaStyle};

/// A renderer picked for one request, with the parameters of the stored
/// config that selected it (if any).
#[derive(Clone)]
pub struct RendererHandle {
    pub renderer: Arc<dyn LayoutRenderer>,
    pub params: StyleParams,
}

impl RendererHandle {
    pub fn name(&self) -> &'static str {
        self.renderer.name()
    }
}

impl std::fmt::Debug for RendererHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RendererHandle")
            .field("renderer", &self.renderer.name())
            .field("params", &self.params)
            .finish()
    }
}

/// Maps style references to renderers.
///
/// Populated once at start-up; lookups never fail, anything that cannot be
/// resolved lands on the default layout.
pub struct StyleRegistry {
    default: Arc<dyn LayoutRenderer>,
    renderers: HashMap<String, Arc<dyn LayoutRenderer>>,
    aliases: HashMap<String, String>,
}

impl StyleRegistry {
    /// Registry with only the default layout.
    pub fn new() -> Self {
        Self {
            default: Arc::new(DefaultStyle),
            renderers: HashMap::new(),
            aliases: HashMap::new(),
        }
    }

    /// Registry with every style compiled into this crate.
    pub fn builtin() -> Self {
        let mut registry = Self::new();
        registry.register(Arc::new(KjaStyle));
        registry
    }

    pub fn register(&mut self, renderer: Arc<dyn LayoutRenderer>) {
        self.renderers.insert(renderer.name().to_string(), renderer);
    }

    /// Makes `alias` resolve to the already registered style `target`.
    pub fn alias(&mut self, alias: &str, target: &str) -> Result<(), CoreError> {
        if alias == DEFAULT_STYLE || self.renderers.contains_key(alias) {
            return Err(CoreError::ValidationError(format!(
                "alias {} shadows a registered style",
                alias
            )));
        }
        if target != DEFAULT_STYLE && !self.renderers.contains_key(target) {
            return Err(CoreError::ValidationError(format!(
                "alias {} points at unknown style {}",
                alias, target
            )));
        }
        self.aliases.insert(alias.to_string(), target.to_string());
        Ok(())
    }

    /// Applies an alias table, typically from configuration.
    pub fn with_aliases(mut self, aliases: &BTreeMap<String, String>) -> Result<Self, CoreError> {
        for (alias, target) in aliases {
            self.alias(alias, target)?;
        }
        Ok(self)
    }

    pub fn default_handle(&self) -> RendererHandle {
        RendererHandle {
            renderer: self.default.clone(),
            params: StyleParams::default(),
        }
    }

    /// Registered style names, default first, then alphabetical.
    pub fn names(&self) -> Vec<String> {
        let mut names: Vec<String> = self
            .renderers
            .keys()
            .chain(self.aliases.keys())
            .cloned()
            .collect();
        names.sort();
        names.insert(0, DEFAULT_STYLE.to_string());
        names
    }

    /// Renderer registered under `name` (following aliases).
    pub fn lookup(&self, name: &str) -> Option<Arc<dyn LayoutRenderer>> {
        let name = self.aliases.get(name).map(String::as_str).unwrap_or(name);
        if name == DEFAULT_STYLE {
            return Some(self.default.clone());
        }
        self.renderers.get(name).cloned()
    }

    fn by_name(&self, name: &str, params: StyleParams) -> RendererHandle {
        match self.lookup(name) {
            Some(renderer) => RendererHandle { renderer, params },
            None => {
                warn!(style = name, "Boarding style not found, using default");
                self.default_handle()
            }
        }
    }

    /// Resolves a style reference. Stored configs are read through `configs`;
    /// any failure along the way falls back to the default layout.
    pub async fn resolve(
        &self,
        reference: &StyleReference,
        configs: &dyn StyleConfigRepository,
    ) -> RendererHandle {
        match reference {
            StyleReference::Default => self.default_handle(),
            StyleReference::ByName(name) => self.by_name(name, StyleParams::default()),
            StyleReference::ById(id) => {
                let data = match configs.find_boarding_style(*id).await {
                    Ok(Some(data)) => data,
                    Ok(None) => {
                        warn!(style_id = id, "No active boarding style config, using default");
                        return self.default_handle();
                    }
                    Err(e) => {
                        warn!(style_id = id, error = %e, "Error loading boarding style config, using default");
                        return self.default_handle();
                    }
                };

                let payload = match BoardingStylePayload::from_json(&data) {
                    Ok(payload) => payload,
                    Err(e) => {
                        warn!(style_id = id, error = %e, "Boarding style config is not valid JSON, using default");
                        return self.default_handle();
                    }
                };

                match payload.renderer_name() {
                    Some(name) => {
                        debug!(style_id = id, style = name, "Resolved boarding style config");
                        self.by_name(name, payload.params.clone())
                    }
                    None => {
                        warn!(style_id = id, "Boarding style config has no draw_function, using default");
                        self.default_handle()
                    }
                }
            }
        }
    }
}

impl Default for StyleRegistry {
    fn default() -> Self {
        Self::builtin()
    }
}
