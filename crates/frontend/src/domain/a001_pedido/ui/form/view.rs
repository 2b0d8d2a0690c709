use super::mount::FormMount;
use super::state::{field_name, FormField, ItemsFormState, RowKey};
use crate::domain::a001_pedido::api;
use crate::shared::components::{ErrorDisplay, PageHeader};
use crate::shared::icons::icon;
use leptos::prelude::*;
use thaw::*;
use wasm_bindgen_futures::spawn_local;

/// Item rows of the create/edit order form.
///
/// The form itself is submitted natively; this component only keeps the
/// `itens[N].*` field names contiguous and the running total current.
#[component]
pub fn OrderItemsForm(mount: FormMount) -> impl IntoView {
    let state = RwSignal::new(ItemsFormState::new());
    let cliente_id = RwSignal::new(mount.cliente_id.clone());
    let (loading, set_loading) = signal(false);
    let error = RwSignal::new(None::<String>);

    if let Some(id) = mount.pedido_id {
        set_loading.set(true);
        spawn_local(async move {
            match api::fetch_by_id(id).await {
                Ok(pedido) => {
                    let dto = pedido.to_update_dto();
                    log::debug!("prefilling form with {} itens of pedido {}", dto.itens.len(), id);
                    state.update(|s| s.replace_items(&dto.itens));
                    if cliente_id.get_untracked().is_none() {
                        cliente_id.set(dto.cliente_id.map(|c| c.to_string()));
                    }
                }
                Err(e) => {
                    log::error!("failed to prefill pedido {}: {}", id, e);
                    error.set(Some(format!("Erro ao carregar itens do pedido: {}", e)));
                }
            }
            set_loading.set(false);
        });
    }

    let total = Memo::new(move |_| state.with(|s| s.total_display()));
    let title = if mount.is_edit() { "Editar pedido" } else { "Novo pedido" };

    view! {
        <form method="post" action=mount.action.clone() class="pedido-form">
            <PageHeader title=title icon_name="orders" />

            {move || {
                cliente_id
                    .get()
                    .map(|c| view! { <input type="hidden" name="clienteId" value=c /> })
            }}

            <ErrorDisplay error=error />
            <Show when=move || loading.get()>
                <Spinner />
            </Show>

            <div id="itens-container">
                <For
                    each=move || state.with(|s| s.keys())
                    key=|k| *k
                    children=move |row_key| view! { <ItemCard state=state row_key=row_key /> }
                />
            </div>

            <button
                type="button"
                class="button button--secondary"
                on:click=move |_| {
                    state.update(|s| {
                        s.add_row();
                    });
                }
            >
                {icon("plus")}
                " Adicionar item"
            </button>

            <div class="pedido-form__total">
                "Total: R$ "
                <strong id="total-pedido">{move || total.get()}</strong>
            </div>

            <button type="submit" class="button button--primary" disabled=move || loading.get()>
                {icon("save")}
                " Salvar pedido"
            </button>
        </form>
    }
}

/// One item row. Mounted once per key; only its label and field names
/// follow the index when earlier rows are removed.
#[component]
fn ItemCard(state: RwSignal<ItemsFormState>, row_key: RowKey) -> impl IntoView {
    let index = Memo::new(move |_| state.with(|s| s.row(row_key).map(|r| r.index)));
    let label = move || index.get().map(|i| format!("Item {}", i + 1)).unwrap_or_default();
    let name = move |field: FormField| index.get().map(|i| field_name(i, field)).unwrap_or_default();

    // Inputs own their text after mount
    let initial = move |field: FormField| {
        state.with_untracked(|s| s.row(row_key).map(|r| r.value(field).to_string()).unwrap_or_default())
    };
    let set = move |field: FormField, value: String| {
        state.update(|s| {
            s.set_field(row_key, field, value);
        });
    };

    view! {
        <div class="card item-pedido" data-index=move || index.get().map(|i| i.to_string())>
            <div class="card__header">
                <strong>{label}</strong>
                <button
                    type="button"
                    class="button button--small button--danger"
                    on:click=move |_| {
                        state.update(|s| {
                            s.remove_row(row_key);
                        });
                    }
                >
                    {icon("trash")}
                    " Remover"
                </button>
            </div>
            <div class="card__body form__row">
                <label class="form__label">
                    "Descrição"
                    <input
                        type="text"
                        class="form__input item-descricao"
                        name=move || name(FormField::Descricao)
                        value=initial(FormField::Descricao)
                        required=true
                        on:input=move |ev| set(FormField::Descricao, event_target_value(&ev))
                    />
                </label>
                <label class="form__label">
                    "Quantidade"
                    <input
                        type="number"
                        min="1"
                        step="1"
                        class="form__input item-quantidade"
                        name=move || name(FormField::Quantidade)
                        value=initial(FormField::Quantidade)
                        required=true
                        on:input=move |ev| set(FormField::Quantidade, event_target_value(&ev))
                    />
                </label>
                <label class="form__label">
                    "Valor unitário"
                    <input
                        type="number"
                        min="0"
                        step="0.01"
                        class="form__input item-valor"
                        name=move || name(FormField::ValorUnitario)
                        value=initial(FormField::ValorUnitario)
                        required=true
                        on:input=move |ev| set(FormField::ValorUnitario, event_target_value(&ev))
                    />
                </label>
            </div>
        </div>
    }
}
