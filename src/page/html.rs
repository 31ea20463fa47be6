//! In-memory page backed by a parsed HTML snapshot.
//!
//! `HtmlPage` serves fixed HTML, follows scripted navigation routes and swaps
//! in a scripted response when the form is submitted. Every interaction is
//! recorded. Element handles carry the document generation they were issued
//! for, so a handle kept across a navigation is reported as stale.

use std::cell::Cell;
use std::collections::HashMap;

use dom_query::{Document, NodeId, Selection};

use super::Page;
use crate::dom;
use crate::error::{Error, Result};
use crate::selector::SelectorRule;

/// Handle to an element of an [`HtmlPage`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ElementRef {
    generation: u64,
    index: usize,
}

/// An interaction performed on an [`HtmlPage`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    Navigated(String),
    Typed { element: String, text: String },
    Clicked(String),
    PressedEnter(String),
}

/// Static HTML page with scripted navigation.
pub struct HtmlPage {
    document: Document,
    url: Option<String>,
    generation: u64,
    routes: HashMap<String, String>,
    submit_response: Option<String>,
    load_polls: u32,
    pending_polls: Cell<u32>,
    actions: Vec<Action>,
}

impl HtmlPage {
    /// Page showing `html`, with no URL and no scripted behaviour.
    #[must_use]
    pub fn new(html: &str) -> Self {
        Self {
            document: dom::parse(html),
            url: None,
            generation: 0,
            routes: HashMap::new(),
            submit_response: None,
            load_polls: 0,
            pending_polls: Cell::new(0),
            actions: Vec::new(),
        }
    }

    /// Page that starts blank and only knows the given routes.
    #[must_use]
    pub fn blank() -> Self {
        Self::new("<html><head></head><body></body></html>")
    }

    #[must_use]
    pub fn with_url(mut self, url: &str) -> Self {
        self.url = Some(url.to_string());
        self
    }

    /// Serve `html` when `url` is navigated to.
    #[must_use]
    pub fn with_route(mut self, url: &str, html: &str) -> Self {
        self.routes.insert(url.to_string(), html.to_string());
        self
    }

    /// Replace the page with `html` when a control is clicked or Enter is
    /// pressed in an input.
    #[must_use]
    pub fn with_submit_response(mut self, html: &str) -> Self {
        self.submit_response = Some(html.to_string());
        self
    }

    /// Report "not ready" for the first `polls` readiness checks after every load.
    #[must_use]
    pub fn with_load_polls(mut self, polls: u32) -> Self {
        self.load_polls = polls;
        self.pending_polls.set(polls);
        self
    }

    /// Interactions so far, oldest first.
    #[must_use]
    pub fn actions(&self) -> &[Action] {
        &self.actions
    }

    /// The current document.
    #[must_use]
    pub fn document(&self) -> &Document {
        &self.document
    }

    /// `value` attribute of the first element matching `css`.
    #[must_use]
    pub fn value_of(&self, css: &str) -> Option<String> {
        let found = dom::try_query_all(&self.document.select("html"), css)?;
        dom::get_attribute(&found, "value")
    }

    fn load(&mut self, html: &str) {
        self.document = dom::parse(html);
        self.generation += 1;
        self.pending_polls.set(self.load_polls);
    }

    fn node_ids(&self) -> Vec<NodeId> {
        self.document.select("*").nodes().iter().map(|n| n.id).collect()
    }

    fn resolve(&self, element: &ElementRef) -> Result<Selection<'_>> {
        if element.generation != self.generation {
            return Err(Error::StaleElement);
        }
        self.document
            .select("*")
            .nodes()
            .get(element.index)
            .copied()
            .map(Selection::from)
            .ok_or(Error::StaleElement)
    }

    fn describe(&self, element: &ElementRef) -> String {
        let Ok(sel) = self.resolve(element) else {
            return "<stale>".to_string();
        };
        let tag = dom::tag_name(&sel).unwrap_or_default();
        if let Some(id) = dom::get_attribute(&sel, "id") {
            format!("{tag}#{id}")
        } else if let Some(name) = dom::get_attribute(&sel, "name") {
            format!("{tag}[name={name}]")
        } else {
            tag
        }
    }

    fn submit(&mut self) {
        if let Some(html) = self.submit_response.clone() {
            self.load(&html);
        }
    }
}

impl Page for HtmlPage {
    type Element = ElementRef;

    fn navigate(&mut self, url: &str) -> Result<()> {
        let html = self
            .routes
            .get(url)
            .cloned()
            .ok_or_else(|| Error::Page(format!("no route for {url}")))?;
        self.actions.push(Action::Navigated(url.to_string()));
        self.url = Some(url.to_string());
        self.load(&html);
        Ok(())
    }

    fn current_url(&self) -> Option<String> {
        self.url.clone()
    }

    fn is_ready(&self) -> Result<bool> {
        let pending = self.pending_polls.get();
        if pending > 0 {
            self.pending_polls.set(pending - 1);
            return Ok(false);
        }
        Ok(true)
    }

    fn find_all(&self, rule: &SelectorRule, scope: Option<&ElementRef>) -> Result<Vec<ElementRef>> {
        let scope = match scope {
            Some(element) => self.resolve(element)?,
            None => self.document.select("html"),
        };
        let ids = self.node_ids();

        Ok(rule
            .select_all(&scope)
            .iter()
            .filter_map(|sel| {
                let id = sel.nodes().first()?.id;
                let index = ids.iter().position(|known| *known == id)?;
                Some(ElementRef {
                    generation: self.generation,
                    index,
                })
            })
            .collect())
    }

    fn element_text(&self, element: &ElementRef) -> Result<String> {
        Ok(dom::clean_text(&self.resolve(element)?))
    }

    fn attribute(&self, element: &ElementRef, name: &str) -> Result<Option<String>> {
        Ok(dom::get_attribute(&self.resolve(element)?, name))
    }

    fn html(&self) -> Result<String> {
        Ok(self.document.html().to_string())
    }

    fn text(&self) -> Result<String> {
        Ok(dom::page_lines(&self.document).join("\n"))
    }

    fn clear_and_type(&mut self, element: &ElementRef, text: &str) -> Result<()> {
        let sel = self.resolve(element)?;
        let tag = dom::tag_name(&sel).unwrap_or_default();
        if tag != "input" && tag != "textarea" {
            return Err(Error::Page(format!("<{tag}> is not editable")));
        }
        dom::set_attribute(&sel, "value", text);

        let described = self.describe(element);
        self.actions.push(Action::Typed {
            element: described,
            text: text.to_string(),
        });
        Ok(())
    }

    fn click(&mut self, element: &ElementRef) -> Result<()> {
        self.resolve(element)?;
        let described = self.describe(element);
        self.actions.push(Action::Clicked(described));
        self.submit();
        Ok(())
    }

    fn press_enter(&mut self, element: &ElementRef) -> Result<()> {
        self.resolve(element)?;
        let described = self.describe(element);
        self.actions.push(Action::PressedEnter(described));
        self.submit();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_find_all_and_type() {
        let mut page = HtmlPage::new(r#"<form><input id="q"><button>Найти</button></form>"#);
        let inputs = page.find_all(&SelectorRule::css("#q"), None).unwrap();
        assert_eq!(inputs.len(), 1);

        page.clear_and_type(&inputs[0], "турбина").unwrap();
        assert_eq!(page.value_of("#q"), Some("турбина".to_string()));
        assert_eq!(
            page.actions(),
            &[Action::Typed {
                element: "input#q".to_string(),
                text: "турбина".to_string()
            }]
        );
    }

    #[test]
    fn test_type_into_non_input_fails() {
        let mut page = HtmlPage::new("<div id='d'>x</div>");
        let div = page.find_all(&SelectorRule::css("#d"), None).unwrap();
        assert!(matches!(page.clear_and_type(&div[0], "x"), Err(Error::Page(_))));
    }

    #[test]
    fn test_handles_go_stale_after_submit() {
        let mut page = HtmlPage::new("<input id='q'><button>Go</button>")
            .with_submit_response("<p>results</p>");
        let button = page.find_all(&SelectorRule::css("button"), None).unwrap();
        let input = page.find_all(&SelectorRule::css("#q"), None).unwrap();

        page.click(&button[0]).unwrap();
        assert!(matches!(page.element_text(&input[0]), Err(Error::StaleElement)));
        assert_eq!(page.text().unwrap(), "results");
    }

    #[test]
    fn test_scoped_find() {
        let page = HtmlPage::new(
            r#"<div id="a"><span>1</span></div><div id="b"><span>2</span><span>3</span></div>"#,
        );
        let scope = page.find_all(&SelectorRule::css("#b"), None).unwrap();
        let spans = page.find_all(&SelectorRule::css("span"), Some(&scope[0])).unwrap();
        assert_eq!(spans.len(), 2);
        assert_eq!(page.element_text(&spans[0]).unwrap(), "2");
    }

    #[test]
    fn test_navigate_unknown_route_fails() {
        let mut page = HtmlPage::blank();
        assert!(matches!(page.navigate("https://www.fips.ru/"), Err(Error::Page(_))));
        assert!(page.actions().is_empty());
    }

    #[test]
    fn test_load_polls() {
        let mut page = HtmlPage::blank()
            .with_route("https://www.fips.ru/", "<p>x</p>")
            .with_load_polls(2);
        page.navigate("https://www.fips.ru/").unwrap();
        assert!(!page.is_ready().unwrap());
        assert!(!page.is_ready().unwrap());
        assert!(page.is_ready().unwrap());
    }
}
