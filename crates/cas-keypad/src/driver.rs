//! Session driver
//!
//! Binds an [`InputController`] to the mock page: clicks on the button grid
//! are resolved to their button, decoded and dispatched; Enter in the
//! expression field evaluates; after every event the page is synced from
//! the controller. The [`KeypadDriver`] trait lets the verification routines
//! below run against any surface.

use crate::config::KeypadConfig;
use crate::controller::{InputController, KeyOutcome};
use crate::delegate::MathDelegate;
use crate::dom::{DomEvent, MockDom, INPUT_ID, RESULT_ID};
use crate::keypad::{ButtonIntent, Keypad, BUTTON_CLASS};

/// Interface for driving a keypad surface
pub trait KeypadDriver {
    /// Types an expression into the field and submits it with Enter
    fn enter_expression(&mut self, expr: &str);

    /// Clicks the button with this element ID
    fn press(&mut self, button_id: &str);

    /// Gets the current result display
    fn get_result(&self) -> String;

    /// Gets the current expression text
    fn get_input(&self) -> String;

    /// Presses the clear button
    fn clear(&mut self);
}

/// Drives a controller through the mock page
#[derive(Debug)]
pub struct SessionDriver<D> {
    controller: InputController<D>,
    keypad: Keypad,
    dom: MockDom,
}

impl<D: MathDelegate> SessionDriver<D> {
    /// Creates a driver with the standard keypad and default config
    #[must_use]
    pub fn new(delegate: D) -> Self {
        Self::with_controller(InputController::new(delegate))
    }

    /// Creates a driver with a custom config
    #[must_use]
    pub fn with_config(delegate: D, config: KeypadConfig) -> Self {
        Self::with_controller(InputController::with_config(delegate, config))
    }

    /// Creates a driver around an existing controller
    #[must_use]
    pub fn with_controller(controller: InputController<D>) -> Self {
        let keypad = Keypad::new();
        let dom = MockDom::calculator(&keypad);
        let mut driver = Self {
            controller,
            keypad,
            dom,
        };
        driver.sync_dom();
        driver
    }

    /// Returns the controller
    #[must_use]
    pub fn controller(&self) -> &InputController<D> {
        &self.controller
    }

    /// Returns the keypad layout
    #[must_use]
    pub fn keypad(&self) -> &Keypad {
        &self.keypad
    }

    /// Returns the DOM
    #[must_use]
    pub fn dom(&self) -> &MockDom {
        &self.dom
    }

    /// Loads the page with a pre-filled expression and runs the startup
    /// simplification, as if its delay had elapsed
    pub fn boot(&mut self, prefilled: &str) {
        self.type_input(prefilled);
        self.controller.run_startup_demo();
        self.sync_dom();
    }

    /// Simulates typing into the expression field
    pub fn type_input(&mut self, text: &str) {
        self.dom.dispatch_event(DomEvent::input(INPUT_ID, text));
        self.controller.set_buffer(text);
        self.sync_dom();
    }

    /// Simulates a click on any element; returns whether a button handled it
    pub fn click(&mut self, element_id: &str) -> bool {
        self.dom.dispatch_event(DomEvent::click(element_id));

        let Some(button) = self.dom.closest(element_id, BUTTON_CLASS) else {
            return false;
        };
        let Some(action) = ButtonIntent::from_element(button).decode() else {
            return false;
        };

        self.controller.dispatch(action);
        self.sync_dom();
        true
    }

    /// Simulates a key press in the expression field
    pub fn press_key(&mut self, key: &str) -> KeyOutcome {
        self.dom.dispatch_event(DomEvent::key_press(INPUT_ID, key));
        let outcome = self.controller.handle_key(key);
        self.sync_dom();
        outcome
    }

    /// Gets the result element's text
    #[must_use]
    pub fn result_element_text(&self) -> Option<&str> {
        self.dom.get_element_text(RESULT_ID)
    }

    /// Gets the expression field's value
    #[must_use]
    pub fn input_element_value(&self) -> Option<&str> {
        self.dom.get_element_value(INPUT_ID)
    }

    /// Synchronizes the page with the controller
    fn sync_dom(&mut self) {
        self.dom
            .set_element_value(INPUT_ID, self.controller.buffer());
        self.dom
            .set_element_text(RESULT_ID, self.controller.display());
    }
}

impl<D: MathDelegate> KeypadDriver for SessionDriver<D> {
    fn enter_expression(&mut self, expr: &str) {
        self.type_input(expr);
        self.press_key("Enter");
    }

    fn press(&mut self, button_id: &str) {
        self.click(button_id);
    }

    fn get_result(&self) -> String {
        self.result_element_text().unwrap_or_default().to_string()
    }

    fn get_input(&self) -> String {
        self.input_element_value().unwrap_or_default().to_string()
    }

    fn clear(&mut self) {
        self.click("btn-clear");
    }
}

// ===== Shared verification routines =====
// These run against any KeypadDriver backed by a real math engine

/// Verifies evaluation by typing and by keypad presses
pub fn verify_arithmetic<K: KeypadDriver>(driver: &mut K) {
    driver.enter_expression("3+4");
    assert_eq!(driver.get_result(), "7");
    driver.clear();

    for id in ["btn-6", "btn-times", "btn-7", "btn-evaluate"] {
        driver.press(id);
    }
    assert_eq!(driver.get_input(), "6*7");
    assert_eq!(driver.get_result(), "42");
    driver.clear();
}

/// Verifies that assignments persist across evaluations and clears
pub fn verify_scope_persistence<K: KeypadDriver>(driver: &mut K) {
    driver.enter_expression("x=5");
    assert_eq!(driver.get_result(), "5");
    driver.clear();

    driver.enter_expression("x+1");
    assert_eq!(driver.get_result(), "6");
    driver.clear();
}

/// Verifies that a rejected expression stays in the field
pub fn verify_error_keeps_buffer<K: KeypadDriver>(driver: &mut K) {
    driver.enter_expression("sin(x");
    assert!(driver.get_result().starts_with("Error: "));
    assert_eq!(driver.get_input(), "sin(x");
    driver.clear();
}

/// Verifies clear and the empty-expression notice
pub fn verify_clear<K: KeypadDriver>(driver: &mut K) {
    let defaults = KeypadConfig::default();

    driver.enter_expression("1+");
    driver.clear();
    assert!(driver.get_input().is_empty());
    assert_eq!(driver.get_result(), defaults.idle_message);

    driver.press("btn-evaluate");
    assert_eq!(driver.get_result(), defaults.empty_message);
}

/// Runs every verification routine
pub fn run_full_verification<K: KeypadDriver>(driver: &mut K) {
    verify_arithmetic(driver);
    verify_scope_persistence(driver);
    verify_error_keeps_buffer(driver);
    verify_clear(driver);
}
