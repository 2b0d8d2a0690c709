use leptos::prelude::*;
use thaw::*;

/// Error message bar bound to a view model's error signal
#[component]
pub fn ErrorDisplay(#[prop(into)] error: Signal<Option<String>>) -> impl IntoView {
    view! {
        {move || error.get().map(|e| view! {
            <div style="margin-bottom: var(--spacing-md);">
                <MessageBar intent=MessageBarIntent::Error>
                    <span>{e}</span>
                </MessageBar>
            </div>
        })}
    }
}
