//! Driver - Abstract Document Automation Trait
//!
//! Every element operation ends up as exactly one call on a [`Driver`]. The
//! element layer never talks to a concrete backend.
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │  Element (locator + collaborators)                           │
//! ├──────────────────────────────────────────────────────────────┤
//! │  Driver (Abstract Trait)                                     │
//! │                                                              │
//! │  ┌──────────────────┐  ┌──────────────────┐  ┌────────────┐ │
//! │  │  WebDriver       │  │  CDP backend     │  │ MockDriver │ │
//! │  │  backend         │  │                  │  │ (tests)    │ │
//! │  └──────────────────┘  └──────────────────┘  └────────────┘ │
//! └──────────────────────────────────────────────────────────────┘
//! ```
//!
//! Calls are synchronous. Failures come back as [`DriverError`] and the
//! element layer hands them to the caller untouched.

use crate::event::{Key, KeyModifier};
use crate::locator::Locator;
use crate::result::{DriverError, DriverResult};
use std::cell::RefCell;
use std::collections::{HashMap, VecDeque};
use std::path::Path;

/// Capability interface every driver backend implements
///
/// `find` returns one locator per matched node, each addressing exactly that
/// node (e.g. `(//li)[2]`), in document order.
pub trait Driver {
    /// Find all nodes matching a locator
    fn find(&self, locator: &Locator) -> DriverResult<Vec<Locator>>;

    /// Visible text of the node
    fn text(&self, locator: &Locator) -> DriverResult<String>;

    /// Inner HTML of the node
    fn html(&self, locator: &Locator) -> DriverResult<String>;

    /// Outer HTML of the node
    fn outer_html(&self, locator: &Locator) -> DriverResult<String>;

    /// Attribute value, `None` when absent
    fn attribute(&self, locator: &Locator, name: &str) -> DriverResult<Option<String>>;

    /// Form value, `None` when the node has none
    fn value(&self, locator: &Locator) -> DriverResult<Option<String>>;

    /// Set the form value
    fn set_value(&self, locator: &Locator, value: &str) -> DriverResult<()>;

    /// Tag name of the node
    fn tag_name(&self, locator: &Locator) -> DriverResult<String>;

    /// Check if the node is visible
    fn is_visible(&self, locator: &Locator) -> DriverResult<bool>;

    /// Check if a checkbox/radio is checked
    fn is_checked(&self, locator: &Locator) -> DriverResult<bool>;

    /// Check if an option is selected
    fn is_selected(&self, locator: &Locator) -> DriverResult<bool>;

    /// Click
    fn click(&self, locator: &Locator) -> DriverResult<()>;

    /// Right click
    fn right_click(&self, locator: &Locator) -> DriverResult<()>;

    /// Double click
    fn double_click(&self, locator: &Locator) -> DriverResult<()>;

    /// Check a checkbox/radio
    fn check(&self, locator: &Locator) -> DriverResult<()>;

    /// Uncheck a checkbox
    fn uncheck(&self, locator: &Locator) -> DriverResult<()>;

    /// Focus the node
    fn focus(&self, locator: &Locator) -> DriverResult<()>;

    /// Remove focus from the node
    fn blur(&self, locator: &Locator) -> DriverResult<()>;

    /// Move the pointer over the node
    fn mouse_over(&self, locator: &Locator) -> DriverResult<()>;

    /// Attach a file to a file input
    fn attach_file(&self, locator: &Locator, path: &Path) -> DriverResult<()>;

    /// Dispatch a key press
    fn key_press(&self, locator: &Locator, key: Key, modifier: Option<KeyModifier>)
        -> DriverResult<()>;

    /// Dispatch a key down
    fn key_down(&self, locator: &Locator, key: Key, modifier: Option<KeyModifier>)
        -> DriverResult<()>;

    /// Dispatch a key up
    fn key_up(&self, locator: &Locator, key: Key, modifier: Option<KeyModifier>)
        -> DriverResult<()>;

    /// Submit the form the node belongs to
    fn submit_form(&self, locator: &Locator) -> DriverResult<()>;

    /// Select an option of a select-like control
    fn select_option(&self, locator: &Locator, value: &str, multiple: bool) -> DriverResult<()>;

    /// Drag `source` onto `target`
    fn drag_to(&self, source: &Locator, target: &Locator) -> DriverResult<()>;
}

/// Scripted answers for one key: consumed in order, the last one sticks
#[derive(Debug, Clone)]
struct Responses<T>(VecDeque<T>);

impl<T: Clone> Responses<T> {
    fn next(&mut self) -> Option<T> {
        if self.0.len() > 1 {
            self.0.pop_front()
        } else {
            self.0.front().cloned()
        }
    }
}

fn push<K: Eq + std::hash::Hash, T>(map: &mut HashMap<K, Responses<T>>, key: K, value: T) {
    map.entry(key)
        .or_insert_with(|| Responses(VecDeque::new()))
        .0
        .push_back(value);
}

/// Mock driver for unit testing
///
/// Answers are scripted per locator. When several answers are scripted for
/// the same call they are returned in order and the last one repeats.
/// Every call is recorded in [`MockDriver::history`] as
/// `method:locator[:arg...]`.
#[derive(Debug, Default)]
pub struct MockDriver {
    finds: RefCell<HashMap<String, Responses<Vec<Locator>>>>,
    strings: RefCell<HashMap<(&'static str, String), Responses<String>>>,
    attributes: RefCell<HashMap<(String, String), Responses<Option<String>>>>,
    values: RefCell<HashMap<String, Responses<Option<String>>>>,
    flags: RefCell<HashMap<(&'static str, String), Responses<bool>>>,
    failures: RefCell<HashMap<&'static str, DriverError>>,
    call_history: RefCell<Vec<String>>,
}

impl MockDriver {
    /// Create new mock driver
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Script the nodes `find` returns for a locator
    pub fn on_find<I, L>(&self, locator: &str, nodes: I)
    where
        I: IntoIterator<Item = L>,
        L: Into<Locator>,
    {
        let nodes = nodes.into_iter().map(Into::into).collect();
        push(&mut self.finds.borrow_mut(), locator.to_string(), nodes);
    }

    /// Script the visible text of a node
    pub fn on_text(&self, locator: &str, text: &str) {
        self.script_string("text", locator, text);
    }

    /// Script the inner HTML of a node
    pub fn on_html(&self, locator: &str, html: &str) {
        self.script_string("html", locator, html);
    }

    /// Script the outer HTML of a node
    pub fn on_outer_html(&self, locator: &str, html: &str) {
        self.script_string("outer_html", locator, html);
    }

    /// Script the tag name of a node
    pub fn on_tag_name(&self, locator: &str, tag: &str) {
        self.script_string("tag_name", locator, tag);
    }

    /// Script an attribute value (`None` = absent)
    pub fn on_attribute(&self, locator: &str, name: &str, value: Option<&str>) {
        push(
            &mut self.attributes.borrow_mut(),
            (locator.to_string(), name.to_string()),
            value.map(str::to_string),
        );
    }

    /// Script the form value of a node
    pub fn on_value(&self, locator: &str, value: Option<&str>) {
        push(
            &mut self.values.borrow_mut(),
            locator.to_string(),
            value.map(str::to_string),
        );
    }

    /// Script `is_visible`
    pub fn on_visible(&self, locator: &str, visible: bool) {
        self.script_flag("is_visible", locator, visible);
    }

    /// Script `is_checked`
    pub fn on_checked(&self, locator: &str, checked: bool) {
        self.script_flag("is_checked", locator, checked);
    }

    /// Script `is_selected`
    pub fn on_selected(&self, locator: &str, selected: bool) {
        self.script_flag("is_selected", locator, selected);
    }

    /// Make every call to `method` fail with `error`
    pub fn fail_on(&self, method: &'static str, error: DriverError) {
        self.failures.borrow_mut().insert(method, error);
    }

    /// Get call history
    #[must_use]
    pub fn history(&self) -> Vec<String> {
        self.call_history.borrow().clone()
    }

    /// Check if method was called
    #[must_use]
    pub fn was_called(&self, method: &str) -> bool {
        self.call_history
            .borrow()
            .iter()
            .any(|c| c.split(':').next() == Some(method))
    }

    /// Number of calls made to a method
    #[must_use]
    pub fn calls_to(&self, method: &str) -> usize {
        self.call_history
            .borrow()
            .iter()
            .filter(|c| c.split(':').next() == Some(method))
            .count()
    }

    fn script_string(&self, method: &'static str, locator: &str, value: &str) {
        push(
            &mut self.strings.borrow_mut(),
            (method, locator.to_string()),
            value.to_string(),
        );
    }

    fn script_flag(&self, method: &'static str, locator: &str, value: bool) {
        push(
            &mut self.flags.borrow_mut(),
            (method, locator.to_string()),
            value,
        );
    }

    fn record(&self, method: &'static str, args: &[&str]) -> DriverResult<()> {
        let mut entry = method.to_string();
        for arg in args {
            entry.push(':');
            entry.push_str(arg);
        }
        self.call_history.borrow_mut().push(entry);

        match self.failures.borrow().get(method) {
            Some(err) => Err(err.clone()),
            None => Ok(()),
        }
    }

    fn string(&self, method: &'static str, locator: &Locator) -> DriverResult<String> {
        self.record(method, &[locator.as_str()])?;
        self.strings
            .borrow_mut()
            .get_mut(&(method, locator.as_str().to_string()))
            .and_then(Responses::next)
            .ok_or_else(|| DriverError::node_not_found(locator.as_str()))
    }

    fn flag(&self, method: &'static str, locator: &Locator) -> DriverResult<bool> {
        self.record(method, &[locator.as_str()])?;
        Ok(self
            .flags
            .borrow_mut()
            .get_mut(&(method, locator.as_str().to_string()))
            .and_then(Responses::next)
            .unwrap_or(false))
    }

    fn key_event(
        &self,
        method: &'static str,
        locator: &Locator,
        key: Key,
        modifier: Option<KeyModifier>,
    ) -> DriverResult<()> {
        let key = key.to_string();
        match modifier {
            Some(modifier) => {
                self.record(method, &[locator.as_str(), key.as_str(), modifier.as_str()])
            }
            None => self.record(method, &[locator.as_str(), key.as_str()]),
        }
    }
}

impl Driver for MockDriver {
    fn find(&self, locator: &Locator) -> DriverResult<Vec<Locator>> {
        self.record("find", &[locator.as_str()])?;
        Ok(self
            .finds
            .borrow_mut()
            .get_mut(locator.as_str())
            .and_then(Responses::next)
            .unwrap_or_default())
    }

    fn text(&self, locator: &Locator) -> DriverResult<String> {
        self.string("text", locator)
    }

    fn html(&self, locator: &Locator) -> DriverResult<String> {
        self.string("html", locator)
    }

    fn outer_html(&self, locator: &Locator) -> DriverResult<String> {
        self.string("outer_html", locator)
    }

    fn attribute(&self, locator: &Locator, name: &str) -> DriverResult<Option<String>> {
        self.record("attribute", &[locator.as_str(), name])?;
        Ok(self
            .attributes
            .borrow_mut()
            .get_mut(&(locator.as_str().to_string(), name.to_string()))
            .and_then(Responses::next)
            .flatten())
    }

    fn value(&self, locator: &Locator) -> DriverResult<Option<String>> {
        self.record("value", &[locator.as_str()])?;
        Ok(self
            .values
            .borrow_mut()
            .get_mut(locator.as_str())
            .and_then(Responses::next)
            .flatten())
    }

    fn set_value(&self, locator: &Locator, value: &str) -> DriverResult<()> {
        self.record("set_value", &[locator.as_str(), value])
    }

    fn tag_name(&self, locator: &Locator) -> DriverResult<String> {
        self.string("tag_name", locator)
    }

    fn is_visible(&self, locator: &Locator) -> DriverResult<bool> {
        self.flag("is_visible", locator)
    }

    fn is_checked(&self, locator: &Locator) -> DriverResult<bool> {
        self.flag("is_checked", locator)
    }

    fn is_selected(&self, locator: &Locator) -> DriverResult<bool> {
        self.flag("is_selected", locator)
    }

    fn click(&self, locator: &Locator) -> DriverResult<()> {
        self.record("click", &[locator.as_str()])
    }

    fn right_click(&self, locator: &Locator) -> DriverResult<()> {
        self.record("right_click", &[locator.as_str()])
    }

    fn double_click(&self, locator: &Locator) -> DriverResult<()> {
        self.record("double_click", &[locator.as_str()])
    }

    fn check(&self, locator: &Locator) -> DriverResult<()> {
        self.record("check", &[locator.as_str()])
    }

    fn uncheck(&self, locator: &Locator) -> DriverResult<()> {
        self.record("uncheck", &[locator.as_str()])
    }

    fn focus(&self, locator: &Locator) -> DriverResult<()> {
        self.record("focus", &[locator.as_str()])
    }

    fn blur(&self, locator: &Locator) -> DriverResult<()> {
        self.record("blur", &[locator.as_str()])
    }

    fn mouse_over(&self, locator: &Locator) -> DriverResult<()> {
        self.record("mouse_over", &[locator.as_str()])
    }

    fn attach_file(&self, locator: &Locator, path: &Path) -> DriverResult<()> {
        let path = path.to_string_lossy();
        self.record("attach_file", &[locator.as_str(), path.as_ref()])
    }

    fn key_press(
        &self,
        locator: &Locator,
        key: Key,
        modifier: Option<KeyModifier>,
    ) -> DriverResult<()> {
        self.key_event("key_press", locator, key, modifier)
    }

    fn key_down(
        &self,
        locator: &Locator,
        key: Key,
        modifier: Option<KeyModifier>,
    ) -> DriverResult<()> {
        self.key_event("key_down", locator, key, modifier)
    }

    fn key_up(
        &self,
        locator: &Locator,
        key: Key,
        modifier: Option<KeyModifier>,
    ) -> DriverResult<()> {
        self.key_event("key_up", locator, key, modifier)
    }

    fn submit_form(&self, locator: &Locator) -> DriverResult<()> {
        self.record("submit_form", &[locator.as_str()])
    }

    fn select_option(&self, locator: &Locator, value: &str, multiple: bool) -> DriverResult<()> {
        let multiple = multiple.to_string();
        self.record("select_option", &[locator.as_str(), value, multiple.as_str()])
    }

    fn drag_to(&self, source: &Locator, target: &Locator) -> DriverResult<()> {
        self.record("drag_to", &[source.as_str(), target.as_str()])
    }
}
