//! Keypad layout and button dispatch
//!
//! A button declares its intent through a `data-action` attribute (one of the
//! six controller commands), a `data-value` attribute (literal text to
//! append), or, when neither is present, its visible label. The intent is
//! decoded once into a [`KeypadAction`] which the controller matches
//! exhaustively.

use crate::dom::DomElement;

/// Attribute naming a controller command
pub const ACTION_ATTR: &str = "data-action";
/// Attribute carrying literal text to append
pub const VALUE_ATTR: &str = "data-value";
/// Class every keypad button carries
pub const BUTTON_CLASS: &str = "btn";

/// Controller commands a button can trigger
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Command {
    /// Empty the buffer and show the idle placeholder
    Clear,
    /// Remove the last character
    Backspace,
    /// Evaluate numerically
    Evaluate,
    /// Simplify symbolically
    Simplify,
    /// Differentiate with respect to the configured variable
    Differentiate,
    /// Expand symbolically
    Expand,
}

impl Command {
    /// All commands, in keypad order
    pub const ALL: [Command; 6] = [
        Command::Clear,
        Command::Backspace,
        Command::Evaluate,
        Command::Simplify,
        Command::Differentiate,
        Command::Expand,
    ];

    /// Parses a `data-action` name
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "clear" => Some(Self::Clear),
            "backspace" => Some(Self::Backspace),
            "evaluate" => Some(Self::Evaluate),
            "simplify" => Some(Self::Simplify),
            "derivative" => Some(Self::Differentiate),
            "expand" => Some(Self::Expand),
            _ => None,
        }
    }

    /// The `data-action` name
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::Clear => "clear",
            Self::Backspace => "backspace",
            Self::Evaluate => "evaluate",
            Self::Simplify => "simplify",
            Self::Differentiate => "derivative",
            Self::Expand => "expand",
        }
    }

    /// Button label
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Clear => "C",
            Self::Backspace => "⌫",
            Self::Evaluate => "=",
            Self::Simplify => "simplify",
            Self::Differentiate => "d/dx",
            Self::Expand => "expand",
        }
    }
}

/// Symbols whose label differs from the text they insert
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Symbol {
    /// π
    Pi,
    /// Euler's number
    Euler,
    /// Natural logarithm
    NaturalLog,
    /// Base-10 logarithm
    CommonLog,
    /// Sine
    Sin,
    /// Cosine
    Cos,
    /// Tangent
    Tan,
    /// Square root
    Sqrt,
}

impl Symbol {
    /// Every symbol in the table
    pub const ALL: [Symbol; 8] = [
        Symbol::Pi,
        Symbol::Euler,
        Symbol::NaturalLog,
        Symbol::CommonLog,
        Symbol::Sin,
        Symbol::Cos,
        Symbol::Tan,
        Symbol::Sqrt,
    ];

    /// Display label
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Pi => "π",
            Self::Euler => "e",
            Self::NaturalLog => "ln",
            Self::CommonLog => "log",
            Self::Sin => "sin",
            Self::Cos => "cos",
            Self::Tan => "tan",
            Self::Sqrt => "√",
        }
    }

    /// Text inserted into the buffer, in the math engine's spelling
    #[must_use]
    pub fn token(self) -> &'static str {
        match self {
            Self::Pi => "pi",
            Self::Euler => "e",
            // the engine spells the natural log `log`
            Self::NaturalLog => "log(",
            Self::CommonLog => "log10(",
            Self::Sin => "sin(",
            Self::Cos => "cos(",
            Self::Tan => "tan(",
            Self::Sqrt => "sqrt(",
        }
    }

    /// Looks a label up in the table
    #[must_use]
    pub fn from_label(label: &str) -> Option<Self> {
        match label {
            "sqrt" => Some(Self::Sqrt),
            _ => Self::ALL.into_iter().find(|s| s.label() == label),
        }
    }
}

/// What a button press does
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KeypadAction {
    /// Run a controller command
    Run(Command),
    /// Append text to the buffer
    Append(String),
}

impl KeypadAction {
    /// Decodes the label fallback: control labels do nothing, table
    /// symbols insert their token, anything else is appended as is
    #[must_use]
    pub fn from_label(label: &str) -> Option<Self> {
        let label = label.trim();
        match label {
            "" | "C" | "⌫" | "=" => None,
            _ => Some(Self::Append(
                Symbol::from_label(label)
                    .map_or(label, |symbol| symbol.token())
                    .to_string(),
            )),
        }
    }
}

/// Declared intent of a button element
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ButtonIntent {
    /// `data-action` attribute
    pub action: Option<String>,
    /// `data-value` attribute
    pub value: Option<String>,
    /// Visible label
    pub label: String,
}

impl ButtonIntent {
    /// Intent carrying a command
    #[must_use]
    pub fn command(command: Command) -> Self {
        Self {
            action: Some(command.name().to_string()),
            value: None,
            label: command.label().to_string(),
        }
    }

    /// Intent carrying literal text
    #[must_use]
    pub fn value(value: &str, label: &str) -> Self {
        Self {
            action: None,
            value: Some(value.to_string()),
            label: label.to_string(),
        }
    }

    /// Intent carrying only a label
    #[must_use]
    pub fn label(label: &str) -> Self {
        Self {
            label: label.to_string(),
            ..Self::default()
        }
    }

    /// Reads the intent off a DOM element
    #[must_use]
    pub fn from_element(element: &DomElement) -> Self {
        Self {
            action: element.get_attr(ACTION_ATTR).map(str::to_string),
            value: element.get_attr(VALUE_ATTR).map(str::to_string),
            label: element.text_content.clone(),
        }
    }

    /// Decodes the intent; `action` wins over `value`, which wins over
    /// the label
    #[must_use]
    pub fn decode(&self) -> Option<KeypadAction> {
        if let Some(action) = self.action.as_deref().filter(|a| !a.is_empty()) {
            return match Command::from_name(action) {
                Some(command) => Some(KeypadAction::Run(command)),
                // unknown action: fall back to a non-empty value
                None => self
                    .value
                    .as_deref()
                    .filter(|v| !v.is_empty())
                    .map(|v| KeypadAction::Append(v.to_string())),
            };
        }
        if let Some(value) = &self.value {
            return Some(KeypadAction::Append(value.clone()));
        }
        KeypadAction::from_label(&self.label)
    }
}

/// A single keypad button definition
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeypadButtonDef {
    /// The DOM element ID for this button
    pub id: String,
    /// Declared intent
    pub intent: ButtonIntent,
    /// Grid row (0-indexed)
    pub row: usize,
    /// Grid column (0-indexed)
    pub col: usize,
}

impl KeypadButtonDef {
    /// Button running a command
    #[must_use]
    pub fn command(command: Command, row: usize, col: usize) -> Self {
        Self {
            id: format!("btn-{}", command.name()),
            intent: ButtonIntent::command(command),
            row,
            col,
        }
    }

    /// Button appending literal text
    #[must_use]
    pub fn text(text: &str, row: usize, col: usize) -> Self {
        Self {
            id: format!("btn-{}", text_name(text)),
            intent: ButtonIntent::value(text, text),
            row,
            col,
        }
    }

    /// Button inserting a table symbol
    #[must_use]
    pub fn symbol(symbol: Symbol, row: usize, col: usize) -> Self {
        Self {
            id: format!("btn-{}", symbol_name(symbol)),
            intent: ButtonIntent::value(symbol.token(), symbol.label()),
            row,
            col,
        }
    }

    /// Builds the DOM element for this button
    #[must_use]
    pub fn to_element(&self) -> DomElement {
        let mut element = DomElement::new("button")
            .with_id(&self.id)
            .with_text(&self.intent.label)
            .with_class(BUTTON_CLASS);
        if let Some(action) = &self.intent.action {
            element = element.with_attr(ACTION_ATTR, action);
        }
        if let Some(value) = &self.intent.value {
            element = element.with_attr(VALUE_ATTR, value);
        }
        element
    }
}

/// Returns a name for literal button text (for element IDs)
fn text_name(text: &str) -> &str {
    match text {
        "+" => "plus",
        "-" => "minus",
        "*" => "times",
        "/" => "divide",
        "^" => "power",
        "." => "decimal",
        "(" => "open-paren",
        ")" => "close-paren",
        _ => text,
    }
}

fn symbol_name(symbol: Symbol) -> &'static str {
    match symbol {
        Symbol::Pi => "pi",
        Symbol::Euler => "e",
        Symbol::NaturalLog => "ln",
        Symbol::CommonLog => "log",
        Symbol::Sin => "sin",
        Symbol::Cos => "cos",
        Symbol::Tan => "tan",
        Symbol::Sqrt => "sqrt",
    }
}

/// CAS keypad layout
/// ```text
/// [ C ]   [ ⌫ ]  [ ( ]    [ ) ] [ / ]
/// [ 7 ]   [ 8 ]  [ 9 ]    [ * ] [ ^ ]
/// [ 4 ]   [ 5 ]  [ 6 ]    [ - ] [ x ]
/// [ 1 ]   [ 2 ]  [ 3 ]    [ + ] [ = ]
/// [ 0 ]   [ . ]  [ π ]    [ e ] [ √ ]
/// [sin]   [cos]  [tan]    [ln ] [log]
/// [simp]  [d/dx] [expand]
/// ```
#[derive(Debug, Clone)]
pub struct Keypad {
    buttons: Vec<KeypadButtonDef>,
}

impl Default for Keypad {
    fn default() -> Self {
        Self::new()
    }
}

impl Keypad {
    /// Creates the standard CAS keypad
    #[must_use]
    pub fn new() -> Self {
        use KeypadButtonDef as B;

        let buttons = vec![
            B::command(Command::Clear, 0, 0),
            B::command(Command::Backspace, 0, 1),
            B::text("(", 0, 2),
            B::text(")", 0, 3),
            B::text("/", 0, 4),
            B::text("7", 1, 0),
            B::text("8", 1, 1),
            B::text("9", 1, 2),
            B::text("*", 1, 3),
            B::text("^", 1, 4),
            B::text("4", 2, 0),
            B::text("5", 2, 1),
            B::text("6", 2, 2),
            B::text("-", 2, 3),
            B::text("x", 2, 4),
            B::text("1", 3, 0),
            B::text("2", 3, 1),
            B::text("3", 3, 2),
            B::text("+", 3, 3),
            B::command(Command::Evaluate, 3, 4),
            B::text("0", 4, 0),
            B::text(".", 4, 1),
            B::symbol(Symbol::Pi, 4, 2),
            B::symbol(Symbol::Euler, 4, 3),
            B::symbol(Symbol::Sqrt, 4, 4),
            B::symbol(Symbol::Sin, 5, 0),
            B::symbol(Symbol::Cos, 5, 1),
            B::symbol(Symbol::Tan, 5, 2),
            B::symbol(Symbol::NaturalLog, 5, 3),
            B::symbol(Symbol::CommonLog, 5, 4),
            B::command(Command::Simplify, 6, 0),
            B::command(Command::Differentiate, 6, 1),
            B::command(Command::Expand, 6, 2),
        ];

        Self { buttons }
    }

    /// Returns the number of buttons
    #[must_use]
    pub fn button_count(&self) -> usize {
        self.buttons.len()
    }

    /// Gets all button definitions
    #[must_use]
    pub fn buttons(&self) -> &[KeypadButtonDef] {
        &self.buttons
    }

    /// Gets a button by row and column
    #[must_use]
    pub fn get_button_at(&self, row: usize, col: usize) -> Option<&KeypadButtonDef> {
        self.buttons.iter().find(|b| b.row == row && b.col == col)
    }

    /// Finds a button by element ID
    #[must_use]
    pub fn find_button_by_id(&self, id: &str) -> Option<&KeypadButtonDef> {
        self.buttons.iter().find(|b| b.id == id)
    }

    /// Decodes the action of the button with this ID
    #[must_use]
    pub fn handle_click(&self, element_id: &str) -> Option<KeypadAction> {
        self.find_button_by_id(element_id)
            .and_then(|btn| btn.intent.decode())
    }

    /// Creates a container element holding every button
    #[must_use]
    pub fn create_grid_element(&self, id: &str) -> DomElement {
        self.buttons
            .iter()
            .fold(DomElement::new("div").with_id(id), |grid, btn| {
                grid.with_child(btn.to_element())
            })
    }
}
