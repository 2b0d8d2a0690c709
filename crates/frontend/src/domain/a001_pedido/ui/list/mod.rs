pub mod state;

use self::state::create_state;
use super::details::{OrderDetailsDialog, OrderDetailsVm};
use crate::domain::a001_pedido::api;
use crate::shared::components::{ErrorDisplay, PageHeader};
use crate::shared::icons::icon;
use crate::shared::number_format::format_currency;
use contracts::domain::a001_pedido::aggregate::PedidoListagem;
use leptos::prelude::*;
use thaw::*;
use wasm_bindgen_futures::spawn_local;

/// Orders of the logged-in customer with the details dialog
#[component]
pub fn OrderList() -> impl IntoView {
    let state = create_state();
    let (loading, set_loading) = signal(false);
    let (error, set_error) = signal::<Option<String>>(None);
    let details = OrderDetailsVm::new();

    let load_items = move || {
        spawn_local(async move {
            set_loading.set(true);
            set_error.set(None);

            match api::fetch_list().await {
                Ok(orders) => {
                    log::debug!("loaded {} pedidos", orders.len());
                    state.update(|s| s.set_orders(orders));
                }
                Err(e) => {
                    log::error!("failed to load pedidos: {}", e);
                    set_error.set(Some(format!("Erro ao carregar pedidos: {}", e)));
                }
            }
            set_loading.set(false);
        });
    };

    load_items();

    let on_changed = Callback::new(move |_: ()| load_items());

    let subtitle = Signal::derive(move || {
        state.with(|s| {
            s.is_loaded.then(|| {
                format!(
                    "{} pedidos · {} em aberto · {}",
                    s.orders.len(),
                    s.unpaid_count(),
                    format_currency(s.total_value())
                )
            })
        })
    });

    view! {
        <div class="page">
            <PageHeader title="Pedidos" icon_name="orders" subtitle=subtitle>
                <Button
                    appearance=ButtonAppearance::Secondary
                    on_click=move |_| load_items()
                    disabled=loading
                >
                    {icon("refresh")}
                    " Atualizar"
                </Button>
            </PageHeader>

            <ErrorDisplay error=error />
            // Errors of row actions while the dialog is closed
            <Show when=move || !details.open.get()>
                <ErrorDisplay error=details.error />
            </Show>

            {move || {
                if loading.get() && !state.with(|s| s.is_loaded) {
                    return view! { <Spinner /> }.into_any();
                }
                let orders = state.with(|s| s.orders.clone());
                if orders.is_empty() {
                    return view! { <p class="text-muted">"Nenhum pedido encontrado"</p> }.into_any();
                }
                view! {
                    <Table>
                        <TableHeader>
                            <TableRow>
                                <TableHeaderCell>"Data"</TableHeaderCell>
                                <TableHeaderCell>"Total"</TableHeaderCell>
                                <TableHeaderCell>"Pagamento"</TableHeaderCell>
                                <TableHeaderCell>"Status"</TableHeaderCell>
                                <TableHeaderCell>"Ações"</TableHeaderCell>
                            </TableRow>
                        </TableHeader>
                        <TableBody>
                            {orders
                                .into_iter()
                                .map(|order| view! { <OrderRow order=order details=details on_changed=on_changed /> })
                                .collect_view()}
                        </TableBody>
                    </Table>
                }
                .into_any()
            }}

            <OrderDetailsDialog vm=details on_changed=on_changed />
        </div>
    }
}

#[component]
fn OrderRow(order: PedidoListagem, details: OrderDetailsVm, on_changed: Callback<()>) -> impl IntoView {
    let id = order.id;
    let pago = order.pago;
    let status = order.status.clone();
    let editable = order.is_editable();

    view! {
        <TableRow>
            <TableCell><TableCellLayout>{order.data_pedido.clone()}</TableCellLayout></TableCell>
            <TableCell><TableCellLayout>{format_currency(order.valor_total)}</TableCellLayout></TableCell>
            <TableCell>
                <TableCellLayout>
                    <Badge
                        appearance=BadgeAppearance::Filled
                        color={if pago { BadgeColor::Success } else { BadgeColor::Warning }}
                    >
                        {if pago { "Pago" } else { "Pendente" }}
                    </Badge>
                </TableCellLayout>
            </TableCell>
            <TableCell><TableCellLayout>{order.status.label().to_string()}</TableCellLayout></TableCell>
            <TableCell>
                <Flex gap=FlexGap::Small>
                    <Button
                        size=ButtonSize::Small
                        appearance=ButtonAppearance::Subtle
                        on_click=move |_| details.load_details(id, pago, status.clone())
                    >
                        {icon("eye")}
                        " Detalhes"
                    </Button>
                    {(!pago).then(|| view! {
                        <Button
                            size=ButtonSize::Small
                            appearance=ButtonAppearance::Primary
                            on_click=move |_| details.mark_paid(id, on_changed)
                            disabled=details.busy()
                        >
                            {icon("payments")}
                            " Pagar"
                        </Button>
                    })}
                    {editable.then(|| view! {
                        <a class="button button--small" href=format!("/pedido/{}/editar", id)>
                            {icon("pencil")}
                            " Editar"
                        </a>
                    })}
                    <Button
                        size=ButtonSize::Small
                        appearance=ButtonAppearance::Secondary
                        on_click=move |_| details.delete_order(id, on_changed)
                        disabled=details.busy()
                    >
                        {icon("trash")}
                        " Excluir"
                    </Button>
                </Flex>
            </TableCell>
        </TableRow>
    }
}
