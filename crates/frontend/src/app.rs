use crate::domain::a001_pedido::ui::form::{FormMount, OrderItemsForm};
use crate::domain::a001_pedido::ui::list::OrderList;
use leptos::prelude::*;
use thaw::ConfigProvider;
use wasm_bindgen::JsCast;
use web_sys::HtmlElement;

/// Element the order list and details dialog mount into
pub const ORDER_LIST_ROOT: &str = "pedidos-app";
/// Element the item rows of the create/edit form mount into
pub const ORDER_FORM_ROOT: &str = "pedido-form";

#[component]
pub fn OrdersApp() -> impl IntoView {
    view! {
        <ConfigProvider>
            <OrderList />
        </ConfigProvider>
    }
}

#[component]
pub fn OrderFormApp(mount: FormMount) -> impl IntoView {
    view! {
        <ConfigProvider>
            <OrderItemsForm mount=mount />
        </ConfigProvider>
    }
}

fn find_root(id: &str) -> Option<HtmlElement> {
    let document = web_sys::window()?.document()?;
    document.get_element_by_id(id)?.dyn_into::<HtmlElement>().ok()
}

/// Mount every widget whose root element is present on the page.
/// Pages are server-rendered, so each one carries at most a few of them.
pub fn mount_islands() {
    let mut mounted = 0;

    if let Some(root) = find_root(ORDER_LIST_ROOT) {
        leptos::mount::mount_to(root, OrdersApp).forget();
        mounted += 1;
    }

    if let Some(root) = find_root(ORDER_FORM_ROOT) {
        let mount = FormMount::from_attributes(|name| root.get_attribute(name));
        log::debug!("order form mount: {:?}", mount);
        leptos::mount::mount_to(root, move || view! { <OrderFormApp mount=mount /> }).forget();
        mounted += 1;
    }

    if mounted == 0 {
        log::warn!("no #{} or #{} element on this page", ORDER_LIST_ROOT, ORDER_FORM_ROOT);
    }
}
