//! Probar Element: locator-addressed nodes over an abstract driver
//!
//! An [`Element`] is a locator plus the collaborators needed to evaluate it.
//! It never caches document state; every query goes back to the [`Driver`].
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                    PROBAR ELEMENT                                │
//! ├─────────────────────────────────────────────────────────────────┤
//! │   ┌────────────┐    ┌────────────┐    ┌────────────┐            │
//! │   │ Selector   │    │ Locator    │    │ Driver     │            │
//! │   │ Translator │───►│ Algebra    │───►│ (find,     │            │
//! │   │ (kinds)    │    │ (compose)  │    │  click...) │            │
//! │   └────────────┘    └────────────┘    └─────┬──────┘            │
//! │                                             │ node locators     │
//! │   ┌────────────┐    ┌────────────┐    ┌─────▼──────┐            │
//! │   │ Waiter     │    │ Option     │    │ Element    │            │
//! │   │ (100ms     │◄──►│ Resolver   │◄──►│ Factory    │            │
//! │   │  polling)  │    │            │    │            │            │
//! │   └────────────┘    └────────────┘    └────────────┘            │
//! └─────────────────────────────────────────────────────────────────┘
//! ```
//!
//! # Example
//!
//! ```
//! use probar_element::prelude::*;
//! use std::rc::Rc;
//!
//! let driver = Rc::new(MockDriver::new());
//! driver.on_find("//ul/li", ["(//ul/li)[1]", "(//ul/li)[2]"]);
//!
//! let list = Element::new(
//!     "//ul",
//!     driver.clone(),
//!     Rc::new(SelectorsHandler::new()),
//!     Rc::new(DefaultElementFactory::new()),
//! );
//! let items = list.find_all(SelectorKind::XPath, "li").unwrap();
//! assert_eq!(items.len(), 2);
//! assert_eq!(items[1].locator(), "(//ul/li)[2]");
//! ```

#![warn(missing_docs)]
// Lints are configured in workspace Cargo.toml [workspace.lints.clippy]

mod config;
#[allow(clippy::missing_errors_doc, clippy::must_use_candidate)]
mod driver;
#[allow(clippy::missing_errors_doc, clippy::must_use_candidate)]
mod element;
mod event;
mod factory;
#[allow(clippy::missing_errors_doc)]
mod locator;
mod result;
#[allow(clippy::missing_errors_doc, clippy::doc_markdown)]
mod select;
#[allow(clippy::missing_errors_doc, clippy::doc_markdown)]
mod selector;

/// Bounded polling (`wait_for`, `wait_until`)
#[allow(clippy::missing_errors_doc, clippy::cast_possible_truncation)]
pub mod wait;

pub use config::{ElementConfig, DEFAULT_SELECT_TAG};
pub use driver::{Driver, MockDriver};
pub use element::Element;
pub use event::{Key, KeyModifier};
pub use factory::{DefaultElementFactory, ElementFactory};
pub use locator::{compose, is_union, split_union, Locator};
pub use result::{DriverError, DriverResult, ProbarError, ProbarResult};
pub use select::{OptionMatch, OptionResolver, ResolvedOption};
pub use selector::{
    xpath_literal, MatchMode, NamedSelector, NamedTarget, SelectorArgs, SelectorEngine,
    SelectorKind, SelectorTranslator, SelectorsHandler, XPathSelector,
};
pub use wait::{
    wait_until, WaitOptions, WaitOutcome, WaitResult, WaitState, Waiter,
    DEFAULT_POLL_INTERVAL_MS, DEFAULT_WAIT_TIMEOUT_MS,
};

/// Prelude for convenient imports
pub mod prelude {
    pub use super::config::*;
    pub use super::driver::*;
    pub use super::element::*;
    pub use super::event::*;
    pub use super::factory::*;
    pub use super::locator::*;
    pub use super::result::*;
    pub use super::select::*;
    pub use super::selector::*;
    pub use super::wait::*;
}
