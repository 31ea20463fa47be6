//! Page collaborator interface.
//!
//! The pipeline never owns a browser. Everything it needs from the page (finding
//! elements, reading text, typing, clicking) goes through the [`Page`] trait,
//! so a real browser binding and the in-memory [`HtmlPage`] are interchangeable.
//!
//! All calls are blocking. Implementations may fail any call; the pipeline
//! treats locator-level failures as "no match" and surfaces the rest.

use crate::error::Result;
use crate::selector::SelectorRule;

mod html;

pub use html::{Action, ElementRef, HtmlPage};

/// Access to the currently loaded page.
pub trait Page {
    /// Handle to an element on the current page. Handles may go stale when
    /// the page navigates.
    type Element: Clone + std::fmt::Debug;

    /// Load `url` in place of the current page.
    fn navigate(&mut self, url: &str) -> Result<()>;

    /// Address of the current page, when known.
    fn current_url(&self) -> Option<String>;

    /// Whether the page has finished loading.
    fn is_ready(&self) -> Result<bool>;

    /// Every element matching `rule` within `scope` (whole page when `None`),
    /// in document order.
    fn find_all(
        &self,
        rule: &SelectorRule,
        scope: Option<&Self::Element>,
    ) -> Result<Vec<Self::Element>>;

    /// Visible text of an element.
    fn element_text(&self, element: &Self::Element) -> Result<String>;

    /// Attribute value of an element.
    fn attribute(&self, element: &Self::Element, name: &str) -> Result<Option<String>>;

    /// Full HTML of the current page.
    fn html(&self) -> Result<String>;

    /// Full visible text of the current page, one line per block.
    fn text(&self) -> Result<String>;

    /// Clear an input and type `text` into it.
    fn clear_and_type(&mut self, element: &Self::Element, text: &str) -> Result<()>;

    /// Click or otherwise activate an element.
    fn click(&mut self, element: &Self::Element) -> Result<()>;

    /// Send an Enter keystroke to an element.
    fn press_enter(&mut self, element: &Self::Element) -> Result<()>;
}
