//! Mock presentation surface
//!
//! One text input holding the expression, one output element for the
//! result, and a container of keypad buttons. Lets the whole event path be
//! driven without a browser.

use std::collections::HashMap;

use crate::keypad::Keypad;

/// ID of the expression input
pub const INPUT_ID: &str = "expression";
/// ID of the result output
pub const RESULT_ID: &str = "result";
/// ID of the button container
pub const GRID_ID: &str = "buttonGrid";

/// Represents a DOM element for testing
#[derive(Debug, Clone, PartialEq)]
pub struct DomElement {
    /// Element ID
    pub id: String,
    /// Element tag name
    pub tag: String,
    /// Text content
    pub text_content: String,
    /// Element attributes
    pub attributes: HashMap<String, String>,
    /// CSS classes
    pub classes: Vec<String>,
    /// Child elements
    pub children: Vec<DomElement>,
}

impl Default for DomElement {
    fn default() -> Self {
        Self::new("div")
    }
}

impl DomElement {
    /// Creates a new DOM element with the given tag
    #[must_use]
    pub fn new(tag: &str) -> Self {
        Self {
            id: String::new(),
            tag: tag.to_string(),
            text_content: String::new(),
            attributes: HashMap::new(),
            classes: Vec::new(),
            children: Vec::new(),
        }
    }

    /// Creates an element with an ID
    #[must_use]
    pub fn with_id(mut self, id: &str) -> Self {
        self.id = id.to_string();
        self
    }

    /// Sets the text content
    #[must_use]
    pub fn with_text(mut self, text: &str) -> Self {
        self.text_content = text.to_string();
        self
    }

    /// Adds a class
    #[must_use]
    pub fn with_class(mut self, class: &str) -> Self {
        self.classes.push(class.to_string());
        self
    }

    /// Sets an attribute
    #[must_use]
    pub fn with_attr(mut self, key: &str, value: &str) -> Self {
        self.attributes.insert(key.to_string(), value.to_string());
        self
    }

    /// Adds a child element
    #[must_use]
    pub fn with_child(mut self, child: DomElement) -> Self {
        self.children.push(child);
        self
    }

    /// Sets text content
    pub fn set_text(&mut self, text: &str) {
        self.text_content = text.to_string();
    }

    /// Checks if element has a class
    #[must_use]
    pub fn has_class(&self, class: &str) -> bool {
        self.classes.iter().any(|c| c == class)
    }

    /// Gets an attribute value
    #[must_use]
    pub fn get_attr(&self, key: &str) -> Option<&str> {
        self.attributes.get(key).map(String::as_str)
    }
}

/// DOM events that can be dispatched
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DomEvent {
    /// Click on an element
    Click {
        /// The ID of the clicked element
        element_id: String,
    },
    /// Text typed into an input
    Input {
        /// The ID of the input element
        element_id: String,
        /// The new value
        value: String,
    },
    /// Key press on an element
    KeyPress {
        /// The ID of the element with focus
        element_id: String,
        /// The key that was pressed
        key: String,
    },
}

impl DomEvent {
    /// Creates a click event
    #[must_use]
    pub fn click(element_id: &str) -> Self {
        Self::Click {
            element_id: element_id.to_string(),
        }
    }

    /// Creates an input event
    #[must_use]
    pub fn input(element_id: &str, value: &str) -> Self {
        Self::Input {
            element_id: element_id.to_string(),
            value: value.to_string(),
        }
    }

    /// Creates a key press event
    #[must_use]
    pub fn key_press(element_id: &str, key: &str) -> Self {
        Self::KeyPress {
            element_id: element_id.to_string(),
            key: key.to_string(),
        }
    }
}

/// Mock DOM for driving the keypad without a browser
#[derive(Debug, Default)]
pub struct MockDom {
    /// Elements by ID
    elements: HashMap<String, DomElement>,
    /// Child ID to parent ID
    parents: HashMap<String, String>,
    /// Event history for verification
    event_history: Vec<DomEvent>,
}

impl MockDom {
    /// Creates an empty mock DOM
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates the calculator page: input, result and button grid
    #[must_use]
    pub fn calculator(keypad: &Keypad) -> Self {
        let mut dom = Self::new();

        dom.register_element(
            DomElement::new("input")
                .with_id(INPUT_ID)
                .with_attr("type", "text")
                .with_attr("value", ""),
        );
        dom.register_element(DomElement::new("div").with_id(RESULT_ID));
        dom.register_element(DomElement::new("div").with_id(GRID_ID));

        for btn in keypad.buttons() {
            dom.append_child(GRID_ID, btn.to_element());
        }

        dom
    }

    /// Registers an element for ID lookup
    pub fn register_element(&mut self, element: DomElement) {
        if !element.id.is_empty() {
            self.elements.insert(element.id.clone(), element);
        }
    }

    /// Adds a child element to a parent
    pub fn append_child(&mut self, parent_id: &str, child: DomElement) {
        let child_id = child.id.clone();
        if let Some(parent) = self.elements.get_mut(parent_id) {
            parent.children.push(child.clone());
        }
        if !child_id.is_empty() {
            self.parents.insert(child_id.clone(), parent_id.to_string());
            self.elements.insert(child_id, child);
        }
    }

    /// Gets an element by ID
    #[must_use]
    pub fn get_element(&self, id: &str) -> Option<&DomElement> {
        self.elements.get(id)
    }

    /// Walks from `id` up through its ancestors to the first element with
    /// `class`, like `Element.closest`
    #[must_use]
    pub fn closest(&self, id: &str, class: &str) -> Option<&DomElement> {
        let mut current = Some(id);
        while let Some(cur) = current {
            let element = self.elements.get(cur)?;
            if element.has_class(class) {
                return Some(element);
            }
            current = self.parents.get(cur).map(String::as_str);
        }
        None
    }

    /// Records an event; input events also update the element's value
    pub fn dispatch_event(&mut self, event: DomEvent) {
        if let DomEvent::Input { element_id, value } = &event {
            self.set_element_value(element_id, value);
        }
        self.event_history.push(event);
    }

    /// Gets the event history
    #[must_use]
    pub fn event_history(&self) -> &[DomEvent] {
        &self.event_history
    }

    /// Updates element text by ID
    pub fn set_element_text(&mut self, id: &str, text: &str) {
        if let Some(elem) = self.elements.get_mut(id) {
            elem.set_text(text);
        }
    }

    /// Gets element text by ID
    #[must_use]
    pub fn get_element_text(&self, id: &str) -> Option<&str> {
        self.elements.get(id).map(|e| e.text_content.as_str())
    }

    /// Sets an input element's `value`
    pub fn set_element_value(&mut self, id: &str, value: &str) {
        if let Some(elem) = self.elements.get_mut(id) {
            elem.attributes.insert("value".to_string(), value.to_string());
        }
    }

    /// Gets an input element's `value`
    #[must_use]
    pub fn get_element_value(&self, id: &str) -> Option<&str> {
        self.elements.get(id).and_then(|e| e.get_attr("value"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::keypad::BUTTON_CLASS;

    // ===== DomElement tests =====

    #[test]
    fn test_dom_element_builders() {
        let elem = DomElement::new("button")
            .with_id("btn-7")
            .with_text("7")
            .with_class("btn")
            .with_attr("data-value", "7");
        assert_eq!(elem.tag, "button");
        assert_eq!(elem.id, "btn-7");
        assert_eq!(elem.text_content, "7");
        assert!(elem.has_class("btn"));
        assert_eq!(elem.get_attr("data-value"), Some("7"));
        assert_eq!(elem.get_attr("data-action"), None);
    }

    #[test]
    fn test_dom_element_default() {
        assert_eq!(DomElement::default().tag, "div");
    }

    // ===== DomEvent tests =====

    #[test]
    fn test_dom_event_constructors() {
        assert!(matches!(DomEvent::click("b"), DomEvent::Click { element_id } if element_id == "b"));
        assert!(matches!(
            DomEvent::key_press(INPUT_ID, "Enter"),
            DomEvent::KeyPress { key, .. } if key == "Enter"
        ));
    }

    // ===== MockDom tests =====

    #[test]
    fn test_calculator_page_structure() {
        let keypad = Keypad::new();
        let dom = MockDom::calculator(&keypad);
        assert_eq!(dom.get_element_value(INPUT_ID), Some(""));
        assert!(dom.get_element(RESULT_ID).is_some());
        let grid = dom.get_element(GRID_ID).unwrap();
        assert_eq!(grid.children.len(), keypad.button_count());
        assert!(dom.get_element("btn-evaluate").is_some());
    }

    #[test]
    fn test_input_event_updates_value() {
        let mut dom = MockDom::calculator(&Keypad::new());
        dom.dispatch_event(DomEvent::input(INPUT_ID, "x^2"));
        assert_eq!(dom.get_element_value(INPUT_ID), Some("x^2"));
        assert_eq!(dom.event_history().len(), 1);
    }

    #[test]
    fn test_closest_finds_button_from_child() {
        let mut dom = MockDom::calculator(&Keypad::new());
        dom.append_child("btn-sin", DomElement::new("span").with_id("sin-label"));
        let button = dom.closest("sin-label", BUTTON_CLASS).unwrap();
        assert_eq!(button.id, "btn-sin");
    }

    #[test]
    fn test_closest_misses_outside_buttons() {
        let dom = MockDom::calculator(&Keypad::new());
        assert!(dom.closest(GRID_ID, BUTTON_CLASS).is_none());
        assert!(dom.closest("missing", BUTTON_CLASS).is_none());
    }

    #[test]
    fn test_register_element_without_id_is_ignored() {
        let mut dom = MockDom::new();
        dom.register_element(DomElement::new("span"));
        assert!(dom.get_element("").is_none());
    }

    #[test]
    fn test_set_and_get_text() {
        let mut dom = MockDom::calculator(&Keypad::new());
        dom.set_element_text(RESULT_ID, "7");
        assert_eq!(dom.get_element_text(RESULT_ID), Some("7"));
        assert_eq!(dom.get_element_text("nope"), None);
    }
}
