//! # Input Components
//!
//! Form inputs shared by every Sejour form. Each input shows its label, an
//! inline error when the form reports one for the field, and calls back
//! with the raw edit; the form state decides what to do with it.

use dioxus::prelude::*;

// ============================================================================
// Text Input Component
// ============================================================================

/// Properties for TextInput component
#[derive(Props, Clone, PartialEq)]
pub struct TextInputProps {
    /// Input value
    pub value: String,

    /// Label text
    #[props(default)]
    pub label: Option<String>,

    #[props(default)]
    pub placeholder: Option<String>,

    /// Error message (shows error state)
    #[props(default)]
    pub error: Option<String>,

    #[props(default = false)]
    pub required: bool,

    #[props(default = false)]
    pub disabled: bool,

    /// Input type (text, email, password, tel...)
    #[props(default = "text".to_string())]
    pub input_type: String,

    /// Change handler
    #[props(default)]
    pub on_change: EventHandler<String>,

    /// Focus lost
    #[props(default)]
    pub on_blur: EventHandler<()>,
}

/// Single-line text input component
#[component]
pub fn TextInput(props: TextInputProps) -> Element {
    let input_class = build_input_class(props.error.is_some(), props.disabled);

    rsx! {
        div {
            class: "input-group",

            FieldLabel { label: props.label.clone(), required: props.required }

            input {
                class: "{input_class}",
                r#type: "{props.input_type}",
                value: "{props.value}",
                placeholder: props.placeholder.as_deref().unwrap_or(""),
                disabled: props.disabled,
                oninput: move |e| props.on_change.call(e.value()),
                onblur: move |_| props.on_blur.call(()),
            }

            FieldError { error: props.error.clone() }
        }
    }
}

// ============================================================================
// Text Area Component
// ============================================================================

/// Properties for TextArea component
#[derive(Props, Clone, PartialEq)]
pub struct TextAreaProps {
    pub value: String,

    #[props(default)]
    pub label: Option<String>,

    #[props(default)]
    pub placeholder: Option<String>,

    #[props(default)]
    pub error: Option<String>,

    /// Number of visible rows
    #[props(default = 3)]
    pub rows: usize,

    #[props(default = false)]
    pub disabled: bool,

    #[props(default)]
    pub on_change: EventHandler<String>,
}

/// Multi-line text input component
#[component]
pub fn TextArea(props: TextAreaProps) -> Element {
    let class = format!(
        "{} resize-y",
        build_input_class(props.error.is_some(), props.disabled)
    );

    rsx! {
        div {
            class: "input-group",
            FieldLabel { label: props.label.clone() }
            textarea {
                class: "{class}",
                rows: "{props.rows}",
                placeholder: props.placeholder.as_deref().unwrap_or(""),
                disabled: props.disabled,
                oninput: move |e| props.on_change.call(e.value()),
                "{props.value}"
            }
            FieldError { error: props.error.clone() }
        }
    }
}

// ============================================================================
// Number Input Component
// ============================================================================

/// Properties for NumberInput component
#[derive(Props, Clone, PartialEq)]
pub struct NumberInputProps {
    /// Current value; `None` renders an empty field
    pub value: Option<f64>,

    #[props(default)]
    pub label: Option<String>,

    #[props(default)]
    pub error: Option<String>,

    #[props(default = false)]
    pub required: bool,

    /// Unit suffix (e.g. "XAF", "guests")
    #[props(default)]
    pub unit: Option<String>,

    #[props(default = false)]
    pub disabled: bool,

    /// Parsed value; `None` when the field is blank or not a number
    #[props(default)]
    pub on_change: EventHandler<Option<f64>>,
}

/// Numeric input that keeps the raw text while the user types
///
/// Intermediate text such as `"12."` or `"-"` stays in the field instead of
/// being normalised away on every keystroke.
#[component]
pub fn NumberInput(props: NumberInputProps) -> Element {
    let mut text = use_signal(|| format_number(props.value));
    let input_class = build_input_class(props.error.is_some(), props.disabled);

    // The value was changed from outside (form reset or reopened)
    let shown = if parse_number(&text.read()) == props.value {
        text()
    } else {
        format_number(props.value)
    };

    rsx! {
        div {
            class: "input-group",

            FieldLabel { label: props.label.clone(), required: props.required }

            div {
                class: "relative flex items-center",
                input {
                    class: "{input_class}",
                    class: if props.unit.is_some() { "pr-14" } else { "" },
                    r#type: "text",
                    value: "{shown}",
                    disabled: props.disabled,
                    oninput: move |e| {
                        let raw = e.value();
                        let parsed = parse_number(&raw);
                        text.set(raw);
                        props.on_change.call(parsed);
                    },
                }
                if let Some(unit) = &props.unit {
                    span {
                        class: "absolute right-3 text-slate-400 text-sm pointer-events-none",
                        "{unit}"
                    }
                }
            }

            FieldError { error: props.error.clone() }
        }
    }
}

// ============================================================================
// Select Component
// ============================================================================

/// A single option for the Select component
#[derive(Clone, PartialEq, Debug)]
pub struct SelectOption {
    pub value: String,
    pub label: String,
}

impl SelectOption {
    pub fn new(value: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            label: label.into(),
        }
    }
}

/// Properties for Select component
#[derive(Props, Clone, PartialEq)]
pub struct SelectProps {
    /// Selected value
    pub value: String,

    pub options: Vec<SelectOption>,

    #[props(default)]
    pub label: Option<String>,

    /// Placeholder (shown when no selection)
    #[props(default)]
    pub placeholder: Option<String>,

    #[props(default)]
    pub error: Option<String>,

    #[props(default = false)]
    pub required: bool,

    #[props(default = false)]
    pub disabled: bool,

    #[props(default)]
    pub on_change: EventHandler<String>,
}

/// Dropdown select component
#[component]
pub fn Select(props: SelectProps) -> Element {
    let class = format!(
        "{} appearance-none pr-10 cursor-pointer",
        build_input_class(props.error.is_some(), props.disabled)
    );

    rsx! {
        div {
            class: "input-group",

            FieldLabel { label: props.label.clone(), required: props.required }

            select {
                class: "{class}",
                disabled: props.disabled,
                onchange: move |e| props.on_change.call(e.value()),

                if let Some(placeholder) = &props.placeholder {
                    option {
                        value: "",
                        disabled: true,
                        selected: props.value.is_empty(),
                        "{placeholder}"
                    }
                }

                for choice in &props.options {
                    option {
                        key: "{choice.value}",
                        value: "{choice.value}",
                        selected: props.value == choice.value,
                        "{choice.label}"
                    }
                }
            }

            FieldError { error: props.error.clone() }
        }
    }
}

// ============================================================================
// Checkbox Component
// ============================================================================

/// Properties for Checkbox component
#[derive(Props, Clone, PartialEq)]
pub struct CheckboxProps {
    pub checked: bool,

    pub label: String,

    #[props(default = false)]
    pub disabled: bool,

    #[props(default)]
    pub on_change: EventHandler<bool>,
}

/// Checkbox input component
#[component]
pub fn Checkbox(props: CheckboxProps) -> Element {
    rsx! {
        label {
            class: "inline-flex items-center gap-2 cursor-pointer text-sm text-slate-200",
            class: if props.disabled { "opacity-50 cursor-not-allowed" } else { "" },
            input {
                class: "w-4 h-4 rounded border-slate-500 bg-slate-800 accent-indigo-600",
                r#type: "checkbox",
                checked: props.checked,
                disabled: props.disabled,
                onchange: move |_| props.on_change.call(!props.checked),
            }
            "{props.label}"
        }
    }
}

// ============================================================================
// Label and Error
// ============================================================================

#[component]
fn FieldLabel(label: Option<String>, #[props(default)] required: bool) -> Element {
    rsx! {
        if let Some(text) = label {
            label {
                class: "block text-sm font-medium text-slate-300 mb-1.5",
                "{text}"
                if required {
                    span { class: "text-rose-400 ml-0.5", "*" }
                }
            }
        }
    }
}

/// Inline field error
#[component]
pub fn FieldError(error: Option<String>) -> Element {
    rsx! {
        if let Some(message) = error {
            p { class: "mt-1 text-xs text-rose-400", "{message}" }
        }
    }
}

// ============================================================================
// Choice Helpers
// ============================================================================

/// Select options for a closed enumeration, valued by position
pub fn choice_options<T>(all: &[T], label: fn(&T) -> &'static str) -> Vec<SelectOption> {
    all.iter()
        .enumerate()
        .map(|(i, item)| SelectOption::new(i.to_string(), label(item)))
        .collect()
}

/// Select value of the current choice
pub fn choice_value<T: PartialEq>(all: &[T], current: &T) -> String {
    all.iter()
        .position(|item| item == current)
        .map(|i| i.to_string())
        .unwrap_or_default()
}

/// Choice behind a select value
pub fn pick_choice<T: Copy>(all: &[T], value: &str) -> Option<T> {
    value.parse::<usize>().ok().and_then(|i| all.get(i).copied())
}

/// Blank strings become `None` for optional text fields
pub fn optional_text(value: String) -> Option<String> {
    if value.trim().is_empty() { None } else { Some(value) }
}

// ============================================================================
// Helper Functions
// ============================================================================

/// Build input class string
fn build_input_class(has_error: bool, disabled: bool) -> String {
    let mut classes = vec![
        "w-full",
        "px-3",
        "py-2",
        "bg-slate-800",
        "border",
        "rounded-lg",
        "text-sm",
        "text-slate-100",
        "placeholder-slate-500",
        "transition-colors",
        "focus:outline-none",
        "focus:ring-2",
    ];

    if has_error {
        classes.extend(["border-rose-500", "focus:ring-rose-500/30"]);
    } else {
        classes.extend(["border-slate-700", "focus:ring-indigo-500/30"]);
    }

    if disabled {
        classes.extend(["opacity-50", "cursor-not-allowed"]);
    }

    classes.join(" ")
}

fn format_number(value: Option<f64>) -> String {
    value.map(|v| v.to_string()).unwrap_or_default()
}

/// Parse user input; a comma is accepted as decimal separator
fn parse_number(text: &str) -> Option<f64> {
    let normalized = text.trim().replace(',', ".");
    normalized.parse::<f64>().ok().filter(|v| v.is_finite())
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use sejour_core::RoomType;

    #[test]
    fn test_build_input_class() {
        let class = build_input_class(false, false);
        assert!(class.contains("border-slate-700"));
        assert!(!class.contains("border-rose-500"));

        let class = build_input_class(true, true);
        assert!(class.contains("border-rose-500"));
        assert!(class.contains("opacity-50"));
    }

    #[test]
    fn test_parse_number() {
        assert_eq!(parse_number("12.5"), Some(12.5));
        assert_eq!(parse_number(" 12,5 "), Some(12.5));
        assert_eq!(parse_number(""), None);
        assert_eq!(parse_number("abc"), None);
        assert_eq!(format_number(None), "");
    }

    #[test]
    fn test_choice_round_trip() {
        let options = choice_options(RoomType::all(), RoomType::display_name);
        assert_eq!(options.len(), RoomType::all().len());
        assert_eq!(options[3].label, "Suite");

        let value = choice_value(RoomType::all(), &RoomType::Suite);
        assert_eq!(pick_choice(RoomType::all(), &value), Some(RoomType::Suite));
        assert_eq!(pick_choice::<RoomType>(RoomType::all(), "99"), None);
    }

    #[test]
    fn test_optional_text() {
        assert_eq!(optional_text("  ".to_string()), None);
        assert_eq!(optional_text("Grill".to_string()), Some("Grill".to_string()));
    }
}
