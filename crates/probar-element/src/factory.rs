//! Element construction for search results.

use crate::config::ElementConfig;
use crate::driver::Driver;
use crate::element::Element;
use crate::locator::Locator;
use crate::selector::SelectorTranslator;
use std::rc::Rc;

/// Builds elements for nodes returned by a driver search
///
/// Takes `self: Rc<Self>` so the factory can hand itself to the elements it
/// creates.
pub trait ElementFactory {
    /// Create an element addressing `node`
    fn create_element(
        self: Rc<Self>,
        node: Locator,
        driver: Rc<dyn Driver>,
        selectors: Rc<dyn SelectorTranslator>,
    ) -> Element;
}

/// Factory that stamps one [`ElementConfig`] onto every element it creates
#[derive(Debug, Clone, Default)]
pub struct DefaultElementFactory {
    config: ElementConfig,
}

impl DefaultElementFactory {
    /// Create a factory with default configuration
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a factory with the given configuration
    #[must_use]
    pub const fn with_config(config: ElementConfig) -> Self {
        Self { config }
    }

    /// Get the configuration
    #[must_use]
    pub const fn config(&self) -> &ElementConfig {
        &self.config
    }
}

impl ElementFactory for DefaultElementFactory {
    fn create_element(
        self: Rc<Self>,
        node: Locator,
        driver: Rc<dyn Driver>,
        selectors: Rc<dyn SelectorTranslator>,
    ) -> Element {
        let config = self.config.clone();
        Element::new(node, driver, selectors, self).with_config(config)
    }
}
