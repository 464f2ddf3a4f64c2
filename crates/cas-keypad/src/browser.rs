//! Browser WASM bindings
//!
//! The page keeps its own markup and listeners; it forwards each button
//! click (the element's `data-action`, `data-value` and label), each key
//! press in the expression field, and the startup timer to this class, then
//! writes `input` and `result` back into the page.

// Note: This module is already conditionally compiled via #[cfg(feature = "wasm")] in lib.rs

use wasm_bindgen::prelude::*;
use web_sys::console;

use crate::config::KeypadConfig;
use crate::controller::{InputController, KeyOutcome};
use crate::delegate::SymbolicDelegate;
use crate::keypad::ButtonIntent;

/// Browser keypad - the main WASM entry point
#[derive(Debug)]
#[wasm_bindgen]
pub struct BrowserKeypad {
    controller: InputController<SymbolicDelegate>,
}

#[wasm_bindgen]
impl BrowserKeypad {
    /// Create a keypad with the default configuration
    #[wasm_bindgen(constructor)]
    pub fn new() -> Self {
        console_error_panic_hook::set_once();
        Self {
            controller: InputController::new(SymbolicDelegate::new()),
        }
    }

    /// Create a keypad from a JSON configuration
    #[wasm_bindgen(js_name = withConfig)]
    pub fn with_config(json: &str) -> Result<BrowserKeypad, JsValue> {
        console_error_panic_hook::set_once();
        let config = KeypadConfig::from_json_str(json)
            .map_err(|e| JsValue::from_str(&e.to_string()))?;
        Ok(Self {
            controller: InputController::with_config(SymbolicDelegate::new(), config),
        })
    }

    /// Get the expression text
    #[wasm_bindgen(getter)]
    pub fn input(&self) -> String {
        self.controller.buffer().to_string()
    }

    /// Set the expression text (the user typed into the field)
    #[wasm_bindgen(setter)]
    pub fn set_input(&mut self, value: String) {
        self.controller.set_buffer(&value);
    }

    /// Get the result display
    #[wasm_bindgen(getter)]
    pub fn result(&self) -> String {
        self.controller.display().to_string()
    }

    /// Handle a click on a `.btn` element; returns whether it did anything
    pub fn handle_button(
        &mut self,
        action: Option<String>,
        value: Option<String>,
        label: String,
    ) -> bool {
        let intent = ButtonIntent {
            action,
            value,
            label,
        };
        match intent.decode() {
            Some(action) => {
                self.controller.dispatch(action);
                true
            }
            None => false,
        }
    }

    /// Handle a key press in the expression field; returns true when the
    /// page must call `preventDefault()`
    pub fn handle_key(&mut self, key: &str) -> bool {
        self.controller.handle_key(key) == KeyOutcome::Submitted
    }

    /// Run the startup simplification; call after `startupDelayMs`
    #[wasm_bindgen(js_name = startupDemo)]
    pub fn startup_demo(&mut self) {
        self.controller.run_startup_demo();
    }

    /// Delay before the startup simplification, in milliseconds
    #[wasm_bindgen(js_name = startupDelayMs)]
    pub fn startup_delay_ms(&self) -> u32 {
        u32::try_from(self.controller.config().startup_delay_ms).unwrap_or(u32::MAX)
    }
}

impl Default for BrowserKeypad {
    fn default() -> Self {
        Self::new()
    }
}

/// Initialize the keypad module in the browser
#[wasm_bindgen(start)]
pub fn init() {
    console_error_panic_hook::set_once();
    console::log_1(&"CAS keypad WASM initialized".into());
}
