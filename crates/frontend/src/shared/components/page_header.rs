use crate::shared::icons::icon;
use leptos::prelude::*;

/// Header of a mounted page section: icon, title, reactive subtitle and
/// action buttons on the right
#[component]
pub fn PageHeader(
    #[prop(into)]
    title: String,
    /// Name understood by `icon()`
    #[prop(optional, into)]
    icon_name: Option<&'static str>,
    #[prop(optional, into)]
    subtitle: MaybeProp<String>,
    #[prop(optional)]
    children: Option<Children>,
) -> impl IntoView {
    view! {
        <div class="page-header">
            <div class="page-header__content">
                {icon_name.map(|name| view! { <span class="page-header__icon">{icon(name)}</span> })}
                <div class="page-header__text">
                    <h1 class="page-header__title">{title}</h1>
                    {move || subtitle.get().map(|s| view! {
                        <div class="page-header__subtitle">{s}</div>
                    })}
                </div>
            </div>
            <div class="page-header__actions">
                {children.map(|c| c())}
            </div>
        </div>
    }
}
