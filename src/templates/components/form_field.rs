use crate::forms::FieldErrors;
use maud::{html, Markup};

pub fn field_error(errors: &FieldErrors, name: &str) -> Markup {
    html! {
        @if let Some(msg) = errors.get(name) {
            p class="field-error" id=(format!("{name}-error")) { (msg) }
        }
    }
}

pub fn text_field(
    name: &str,
    label: &str,
    input_type: &str,
    value: &str,
    required: bool,
    errors: &FieldErrors,
) -> Markup {
    let invalid = errors.get(name).is_some();
    html! {
        div class="field" {
            label for=(name) { (label) @if required { " *" } }
            input
                type=(input_type)
                id=(name)
                name=(name)
                value=(value)
                required[required]
                aria-invalid=[invalid.then_some("true")];
            (field_error(errors, name))
        }
    }
}
