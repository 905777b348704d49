//! Small stateless building blocks shared by the forms and list pages.

use web_sys::{HtmlInputElement, HtmlSelectElement, HtmlTextAreaElement};
use yew::prelude::*;

/// Fingerprint of a serialized form, used to tell whether it was edited.
pub fn compute_md5(input: &str) -> String {
    format!("{:x}", md5::compute(input))
}

pub fn icon_button(
    icon_name: &str,
    label: &str,
    on_click: Callback<MouseEvent>,
    disabled: bool,
) -> Html {
    html! {
        <button class="icon-btn" onclick={on_click} disabled={disabled} title={label.to_string()}>
            <i class="material-icons">{icon_name}</i>
            <span class="icon-label">{label}</span>
        </button>
    }
}

/// Icon-only variant for table rows.
pub fn row_action(icon_name: &str, title: &str, on_click: Callback<MouseEvent>) -> Html {
    html! {
        <button class="icon-btn row-action" onclick={on_click} title={title.to_string()}>
            <i class="material-icons">{icon_name}</i>
        </button>
    }
}

pub fn spinner() -> Html {
    html! { <div class="spinner" aria-label="Loading"></div> }
}

pub fn error_banner(message: &str, on_dismiss: Callback<MouseEvent>) -> Html {
    html! {
        <div class="error-banner" role="alert">
            <i class="material-icons">{"error_outline"}</i>
            <span>{message}</span>
            <button class="icon-btn" title="Dismiss" onclick={on_dismiss}>
                <i class="material-icons">{"close"}</i>
            </button>
        </div>
    }
}

pub fn empty_state(icon_name: &str, message: &str) -> Html {
    html! {
        <div class="empty-state">
            <i class="material-icons">{icon_name}</i>
            <p>{message}</p>
        </div>
    }
}

fn field_error(error: Option<&str>) -> Html {
    match error {
        Some(message) => html! { <span class="field-error">{message}</span> },
        None => html! {},
    }
}

pub fn text_input(
    id: &str,
    label: &str,
    value: &str,
    error: Option<&str>,
    on_change: Callback<String>,
) -> Html {
    let oninput =
        on_change.reform(|e: InputEvent| e.target_unchecked_into::<HtmlInputElement>().value());
    html! {
        <div class={classes!("form-field", error.map(|_| "invalid"))}>
            <label for={id.to_string()}>{label}</label>
            <input id={id.to_string()} type="text" value={value.to_string()} {oninput} />
            { field_error(error) }
        </div>
    }
}

pub fn text_area(
    id: &str,
    label: &str,
    value: &str,
    error: Option<&str>,
    on_change: Callback<String>,
) -> Html {
    let oninput =
        on_change.reform(|e: InputEvent| e.target_unchecked_into::<HtmlTextAreaElement>().value());
    html! {
        <div class={classes!("form-field", error.map(|_| "invalid"))}>
            <label for={id.to_string()}>{label}</label>
            <textarea id={id.to_string()} rows="3" value={value.to_string()} {oninput} />
            { field_error(error) }
        </div>
    }
}

/// Numeric input. Text that does not parse is reported as 0 so the
/// validator flags it instead of the edit being silently dropped.
pub fn number_input(
    id: &str,
    label: &str,
    value: u32,
    error: Option<&str>,
    on_change: Callback<u32>,
) -> Html {
    let oninput = on_change.reform(|e: InputEvent| {
        e.target_unchecked_into::<HtmlInputElement>()
            .value()
            .trim()
            .parse()
            .unwrap_or(0)
    });
    html! {
        <div class={classes!("form-field", error.map(|_| "invalid"))}>
            <label for={id.to_string()}>{label}</label>
            <input id={id.to_string()} type="number" min="0" value={value.to_string()} {oninput} />
            { field_error(error) }
        </div>
    }
}

pub fn checkbox(id: &str, label: &str, checked: bool, on_change: Callback<bool>) -> Html {
    let onchange =
        on_change.reform(|e: Event| e.target_unchecked_into::<HtmlInputElement>().checked());
    html! {
        <label class="checkbox" for={id.to_string()}>
            <input id={id.to_string()} type="checkbox" {checked} {onchange} />
            <span>{label}</span>
        </label>
    }
}

/// `options` are `(value, label)` pairs.
pub fn select(
    id: &str,
    label: &str,
    options: &[(String, String)],
    selected: &str,
    on_change: Callback<String>,
) -> Html {
    let onchange =
        on_change.reform(|e: Event| e.target_unchecked_into::<HtmlSelectElement>().value());
    html! {
        <div class="form-field">
            <label for={id.to_string()}>{label}</label>
            <select id={id.to_string()} {onchange}>
                { for options.iter().map(|(value, text)| html! {
                    <option value={value.clone()} selected={value == selected}>{text}</option>
                }) }
            </select>
        </div>
    }
}

pub fn search_box(placeholder: &str, value: &str, on_change: Callback<String>) -> Html {
    let oninput =
        on_change.reform(|e: InputEvent| e.target_unchecked_into::<HtmlInputElement>().value());
    html! {
        <div class="search-box">
            <i class="material-icons">{"search"}</i>
            <input type="search" placeholder={placeholder.to_string()} value={value.to_string()} {oninput} />
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn md5_fingerprint_tracks_content() {
        let a = compute_md5("{\"host\":\"a\"}");
        assert_eq!(a, compute_md5("{\"host\":\"a\"}"));
        assert_ne!(a, compute_md5("{\"host\":\"b\"}"));
        assert_eq!(a.len(), 32);
    }
}
