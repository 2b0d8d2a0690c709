//! ViewModel for the order details dialog
//!
//! Wraps `OrderDetailState` in a signal and exposes the commands of the
//! dialog: load, edit a line, save, mark as paid and delete. Successful
//! mutations re-fetch from the server instead of reloading the page.

use super::state::{Command, CommandOutcome, DetailsView, ItemField, LoadTicket, OrderDetailState};
use crate::domain::a001_pedido::api;
use crate::shared::api_utils::ApiError;
use contracts::domain::a001_pedido::aggregate::{OrderStatus, PedidoId};
use leptos::prelude::*;

#[derive(Clone, Copy)]
pub struct OrderDetailsVm {
    pub state: RwSignal<OrderDetailState>,
    pub open: RwSignal<bool>,
    pub loading: RwSignal<bool>,
    pub error: RwSignal<Option<String>>,
}

impl OrderDetailsVm {
    pub fn new() -> Self {
        Self {
            state: RwSignal::new(OrderDetailState::default()),
            open: RwSignal::new(false),
            loading: RwSignal::new(false),
            error: RwSignal::new(None),
        }
    }

    // === Derived signals ===

    pub fn details(&self) -> Signal<Option<DetailsView>> {
        let state = self.state;
        Signal::derive(move || state.with(|s| s.render()))
    }

    pub fn can_save(&self) -> Signal<bool> {
        let state = self.state;
        Signal::derive(move || state.with(|s| s.is_edit_mode() && s.is_dirty()))
    }

    /// A save, mark-paid or delete request is in flight
    pub fn busy(&self) -> Signal<bool> {
        let state = self.state;
        Signal::derive(move || state.with(|s| s.is_busy()))
    }

    // === Commands ===

    /// Open the dialog and fetch the order. `paid` and `status` come from the
    /// list row and decide whether the lines are editable.
    pub fn load_details(&self, id: PedidoId, paid: bool, status: OrderStatus) {
        let Some(ticket) = self.state.try_update(|s| s.begin_load(paid, &status)) else {
            return;
        };
        self.fetch(id, ticket);
    }

    pub fn update_field(&self, index: usize, field: ItemField, raw: String) {
        match self.state.try_update(|s| s.update_field(index, field, &raw)) {
            Some(Ok(())) => self.error.set(None),
            Some(Err(e)) => {
                log::warn!("rejected edit of item {} ({:?}): {}", index, field, e);
                self.error.set(Some(e.to_string()));
            }
            None => {}
        }
    }

    pub fn save(&self, on_changed: Callback<()>) {
        let Some((id, dto)) = self.state.with_untracked(|s| s.save_payload()) else {
            return;
        };
        if !self.begin_command(Command::Save) {
            return;
        }

        let this = *self;
        wasm_bindgen_futures::spawn_local(async move {
            let result = api::update(id, &dto).await;
            this.finish_command(Command::Save, id, result, on_changed);
        });
    }

    pub fn mark_paid(&self, id: PedidoId, on_changed: Callback<()>) {
        if !self.begin_command(Command::MarkPaid) {
            return;
        }
        let this = *self;
        wasm_bindgen_futures::spawn_local(async move {
            let result = api::mark_paid(id).await;
            this.finish_command(Command::MarkPaid, id, result, on_changed);
        });
    }

    pub fn delete_order(&self, id: PedidoId, on_changed: Callback<()>) {
        if !self.begin_command(Command::Delete) {
            return;
        }
        let this = *self;
        wasm_bindgen_futures::spawn_local(async move {
            let result = api::delete_by_id(id).await;
            this.finish_command(Command::Delete, id, result, on_changed);
        });
    }

    pub fn close(&self) {
        self.open.set(false);
        self.loading.set(false);
        self.error.set(None);
        self.state.update(|s| s.reset());
    }

    // === Private helpers ===

    fn fetch(&self, id: PedidoId, ticket: LoadTicket) {
        self.open.set(true);
        self.loading.set(true);
        self.error.set(None);

        let this = *self;
        wasm_bindgen_futures::spawn_local(async move {
            let result = api::fetch_by_id(id).await;
            if !this.state.with_untracked(|s| s.is_current(ticket)) {
                log::debug!("discarding stale response for pedido {}", id);
                return;
            }
            match result {
                Ok(order) => {
                    this.state.update(|s| {
                        s.finish_load(ticket, order);
                    });
                }
                Err(e) => {
                    log::error!("failed to load pedido {}: {}", id, e);
                    this.state.update(|s| {
                        s.fail_load(ticket);
                    });
                    this.error.set(Some(format!("Erro ao carregar o pedido: {}", e)));
                }
            }
            this.loading.set(false);
        });
    }

    fn begin_command(&self, command: Command) -> bool {
        let started = self.state.try_update(|s| s.begin_command()).unwrap_or(false);
        if started {
            self.error.set(None);
        } else {
            log::warn!("{:?} ignored: another request is in flight", command);
        }
        started
    }

    fn finish_command(
        &self,
        command: Command,
        id: PedidoId,
        result: Result<(), ApiError>,
        on_changed: Callback<()>,
    ) {
        let outcome: CommandOutcome = self
            .state
            .try_update(|s| s.finish_command(command, id, result.is_ok()))
            .unwrap_or_default();

        match result {
            Ok(()) => log::info!("{:?} of pedido {} done", command, id),
            Err(e) => {
                log::error!("{:?} of pedido {} failed: {}", command, id, e);
                let prefix = match command {
                    Command::Save => "Erro ao salvar",
                    Command::MarkPaid => "Erro ao marcar como pago",
                    Command::Delete => "Erro ao excluir",
                };
                self.error.set(Some(format!("{}: {}", prefix, e)));
            }
        }

        if outcome.close_dialog {
            self.close();
        }
        if outcome.refresh_details {
            if let Some((id, ticket)) = self.state.try_update(|s| s.begin_refresh()).flatten() {
                self.fetch(id, ticket);
            }
        }
        if outcome.refresh_list {
            on_changed.run(());
        }
    }
}

impl Default for OrderDetailsVm {
    fn default() -> Self {
        Self::new()
    }
}
