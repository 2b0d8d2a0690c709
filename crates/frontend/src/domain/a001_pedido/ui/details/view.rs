//! Order details dialog (pure UI over `OrderDetailsVm`)

use super::state::{DetailsView, ItemField, ItemRowView};
use super::view_model::OrderDetailsVm;
use crate::shared::components::ErrorDisplay;
use crate::shared::icons::icon;
use leptos::prelude::*;
use thaw::*;

#[component]
pub fn OrderDetailsDialog(vm: OrderDetailsVm, #[prop(into)] on_changed: Callback<()>) -> impl IntoView {
    let details = vm.details();
    let can_save = vm.can_save();

    view! {
        <Dialog open=vm.open>
            <DialogSurface>
                <DialogBody>
                    <DialogTitle>"Detalhes do pedido"</DialogTitle>
                    <DialogContent>
                        <ErrorDisplay error=vm.error />
                        {move || {
                            if vm.loading.get() {
                                return view! { <Spinner /> }.into_any();
                            }
                            match details.get() {
                                Some(d) => view! { <DetailsBody vm=vm details=d /> }.into_any(),
                                None => view! { <p class="text-muted">"Nenhum pedido carregado"</p> }.into_any(),
                            }
                        }}
                    </DialogContent>
                    <DialogActions>
                        <Show when=move || can_save.get()>
                            <Button
                                appearance=ButtonAppearance::Primary
                                on_click=move |_| vm.save(on_changed)
                                disabled=vm.busy()
                            >
                                {icon("save")}
                                " Salvar alterações"
                            </Button>
                        </Show>
                        <Button appearance=ButtonAppearance::Secondary on_click=move |_| vm.close()>
                            {icon("x")}
                            " Fechar"
                        </Button>
                    </DialogActions>
                </DialogBody>
            </DialogSurface>
        </Dialog>
    }
}

#[component]
fn DetailsBody(vm: OrderDetailsVm, details: DetailsView) -> impl IntoView {
    let edit_mode = details.edit_mode;
    let rows = details
        .rows
        .into_iter()
        .map(|row| view! { <ItemRow vm=vm row=row edit_mode=edit_mode /> })
        .collect_view();

    view! {
        {details.show_banner.then(|| view! {
            <p class="text-muted">{icon("pencil")}" Modo edição ativo"</p>
        })}
        <Flex gap=FlexGap::Medium style="margin-bottom: var(--spacing-sm); flex-wrap: wrap;">
            <Badge appearance=BadgeAppearance::Tint color=BadgeColor::Informative>
                {details.status_label}
            </Badge>
            <Badge
                appearance=BadgeAppearance::Filled
                color={if details.pago { BadgeColor::Success } else { BadgeColor::Warning }}
            >
                {if details.pago { "Pago" } else { "Pendente" }}
            </Badge>
            {details.data_display.map(|d| view! { <span class="text-muted">{d}</span> })}
        </Flex>
        <h5 class="text-end text-success">{format!("Total: R$ {}", details.total_display)}</h5>
        <Table>
            <TableHeader>
                <TableRow>
                    <TableHeaderCell>"Descrição"</TableHeaderCell>
                    <TableHeaderCell>"Qtd"</TableHeaderCell>
                    <TableHeaderCell>"Unitário"</TableHeaderCell>
                    <TableHeaderCell>"Subtotal"</TableHeaderCell>
                </TableRow>
            </TableHeader>
            <TableBody>{rows}</TableBody>
        </Table>
    }
}

#[component]
fn ItemRow(vm: OrderDetailsVm, row: ItemRowView, edit_mode: bool) -> impl IntoView {
    let index = row.index;
    let subtotal = format!("R$ {}", row.subtotal_display);

    if !edit_mode {
        return view! {
            <TableRow>
                <TableCell><TableCellLayout truncate=true>{row.descricao}</TableCellLayout></TableCell>
                <TableCell><TableCellLayout>{row.quantidade.to_string()}</TableCellLayout></TableCell>
                <TableCell><TableCellLayout>{format!("R$ {}", row.preco_display)}</TableCellLayout></TableCell>
                <TableCell><TableCellLayout>{subtotal}</TableCellLayout></TableCell>
            </TableRow>
        }
        .into_any();
    }

    view! {
        <TableRow>
            <TableCell>
                <input
                    class="form__input"
                    value=row.descricao
                    on:change=move |ev| vm.update_field(index, ItemField::Descricao, event_target_value(&ev))
                />
            </TableCell>
            <TableCell>
                <input
                    type="number"
                    min="0"
                    step="1"
                    class="form__input text-center"
                    value=row.quantidade.to_string()
                    on:change=move |ev| vm.update_field(index, ItemField::Quantidade, event_target_value(&ev))
                />
            </TableCell>
            <TableCell>
                <input
                    type="number"
                    min="0"
                    step="0.01"
                    class="form__input text-end"
                    value=row.preco_display.clone()
                    on:change=move |ev| vm.update_field(index, ItemField::PrecoUnitario, event_target_value(&ev))
                />
            </TableCell>
            <TableCell><TableCellLayout>{subtotal}</TableCellLayout></TableCell>
        </TableRow>
    }
    .into_any()
}
