//! Plain state of the order details view
//!
//! Owned by the view model inside a single `RwSignal`; every method here is
//! synchronous and free of DOM or network access.

use crate::shared::date_utils::format_timestamp;
use crate::shared::number_format::format_money;
use contracts::domain::a001_pedido::aggregate::{
    edit_allowed, CriarPedidoDto, OrderStatus, Pedido, PedidoId,
};
use thiserror::Error;

/// Editable column of an order line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ItemField {
    Descricao,
    Quantidade,
    PrecoUnitario,
}

/// Rejected edit; the item keeps its previous value
#[derive(Debug, Clone, PartialEq, Error)]
pub enum FieldError {
    #[error("Este pedido não pode ser editado")]
    NotEditable,
    #[error("O item {0} não existe")]
    NoSuchItem(usize),
    #[error("Quantidade inválida: \"{0}\". Informe um número inteiro maior ou igual a zero")]
    InvalidQuantity(String),
    #[error("Valor unitário inválido: \"{0}\". Informe um número maior ou igual a zero")]
    InvalidPrice(String),
}

pub type LoadTicket = u64;

/// Mutating request sent from the dialog or a list row
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Save,
    MarkPaid,
    Delete,
}

/// What the view model does once a command's request has finished
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CommandOutcome {
    pub refresh_details: bool,
    pub refresh_list: bool,
    pub close_dialog: bool,
}

/// One rendered line of the items table
#[derive(Debug, Clone, PartialEq)]
pub struct ItemRowView {
    pub index: usize,
    pub descricao: String,
    pub quantidade: u32,
    pub preco_unitario: f64,
    pub preco_display: String,
    pub subtotal_display: String,
}

/// Everything the details component draws
#[derive(Debug, Clone, PartialEq)]
pub struct DetailsView {
    pub id: PedidoId,
    pub edit_mode: bool,
    pub show_banner: bool,
    pub show_save: bool,
    pub pago: bool,
    pub status_label: String,
    pub data_display: Option<String>,
    pub rows: Vec<ItemRowView>,
    pub total: f64,
    pub total_display: String,
}

#[derive(Debug, Clone, Default)]
pub struct OrderDetailState {
    order: Option<Pedido>,
    edit_mode: bool,
    dirty: bool,
    load_seq: LoadTicket,
    /// Pending load takes edit mode from the fetched order instead of the caller
    flags_from_order: bool,
    busy: bool,
}

impl OrderDetailState {
    pub fn order(&self) -> Option<&Pedido> {
        self.order.as_ref()
    }

    pub fn is_edit_mode(&self) -> bool {
        self.edit_mode
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    pub fn is_busy(&self) -> bool {
        self.busy
    }

    pub fn is_current(&self, ticket: LoadTicket) -> bool {
        ticket == self.load_seq
    }

    /// Start loading an order with the flags known by the caller.
    /// The previous order is dropped right away so nothing stale stays on screen.
    pub fn begin_load(&mut self, paid: bool, status: &OrderStatus) -> LoadTicket {
        self.load_seq += 1;
        self.edit_mode = edit_allowed(paid, status);
        self.flags_from_order = false;
        self.dirty = false;
        self.order = None;
        self.load_seq
    }

    /// Reload the shown order after a save. Edit mode is decided again from
    /// the `pago`/`statusPedido` the server returns.
    pub fn begin_refresh(&mut self) -> Option<(PedidoId, LoadTicket)> {
        let id = self.order.as_ref()?.id;
        self.load_seq += 1;
        self.flags_from_order = true;
        self.dirty = false;
        self.order = None;
        Some((id, self.load_seq))
    }

    /// Apply a loaded order; responses of superseded loads are ignored
    pub fn finish_load(&mut self, ticket: LoadTicket, order: Pedido) -> bool {
        if !self.is_current(ticket) {
            return false;
        }
        if self.flags_from_order {
            self.edit_mode = order.is_editable();
            self.flags_from_order = false;
        }
        self.order = Some(order);
        self.dirty = false;
        true
    }

    pub fn fail_load(&mut self, ticket: LoadTicket) -> bool {
        if !self.is_current(ticket) {
            return false;
        }
        self.order = None;
        self.dirty = false;
        true
    }

    /// Forget the order; in-flight loads become stale.
    /// A running command stays busy until it finishes.
    pub fn reset(&mut self) {
        self.load_seq += 1;
        self.order = None;
        self.edit_mode = false;
        self.flags_from_order = false;
        self.dirty = false;
    }

    /// Claim the single command slot; `false` while another request is in flight
    pub fn begin_command(&mut self) -> bool {
        if self.busy {
            return false;
        }
        self.busy = true;
        true
    }

    /// Release the command slot and decide the follow-up.
    /// Failures change nothing; the caller only reports the error.
    pub fn finish_command(&mut self, command: Command, target: PedidoId, ok: bool) -> CommandOutcome {
        self.busy = false;
        if !ok {
            return CommandOutcome::default();
        }
        let showing = self.order.as_ref().map(|o| o.id) == Some(target);
        match command {
            Command::Save => CommandOutcome {
                refresh_details: showing,
                refresh_list: true,
                close_dialog: false,
            },
            Command::MarkPaid | Command::Delete => CommandOutcome {
                refresh_details: false,
                refresh_list: true,
                close_dialog: showing,
            },
        }
    }

    pub fn update_field(
        &mut self,
        index: usize,
        field: ItemField,
        raw: &str,
    ) -> Result<(), FieldError> {
        if !self.edit_mode {
            return Err(FieldError::NotEditable);
        }
        let item = self
            .order
            .as_mut()
            .and_then(|o| o.itens.get_mut(index))
            .ok_or(FieldError::NoSuchItem(index))?;

        match field {
            ItemField::Descricao => item.descricao = raw.to_string(),
            ItemField::Quantidade => item.quantidade = parse_quantity(raw)?,
            ItemField::PrecoUnitario => item.preco_unitario = parse_price(raw)?,
        }
        self.dirty = true;
        Ok(())
    }

    /// Id and body for `PUT /pedido/api/{id}`; only when there are unsaved edits
    pub fn save_payload(&self) -> Option<(PedidoId, CriarPedidoDto)> {
        if !self.edit_mode || !self.dirty {
            return None;
        }
        self.order.as_ref().map(|o| (o.id, o.to_update_dto()))
    }

    pub fn render(&self) -> Option<DetailsView> {
        let order = self.order.as_ref()?;
        let rows = order
            .itens
            .iter()
            .enumerate()
            .map(|(index, item)| ItemRowView {
                index,
                descricao: item.descricao.clone(),
                quantidade: item.quantidade,
                preco_unitario: item.preco_unitario,
                preco_display: format_money(item.preco_unitario),
                subtotal_display: format_money(item.subtotal()),
            })
            .collect();
        let total = order.total();

        Some(DetailsView {
            id: order.id,
            edit_mode: self.edit_mode,
            show_banner: self.edit_mode,
            show_save: self.edit_mode && self.dirty,
            pago: order.pago,
            status_label: order.status.label().to_string(),
            data_display: order.data_pedido.as_ref().map(format_timestamp),
            rows,
            total,
            total_display: format_money(total),
        })
    }
}

fn parse_quantity(raw: &str) -> Result<u32, FieldError> {
    let invalid = || FieldError::InvalidQuantity(raw.to_string());
    let value: f64 = raw.trim().parse().map_err(|_| invalid())?;
    if !value.is_finite() || value < 0.0 || value.fract() != 0.0 || value > f64::from(u32::MAX) {
        return Err(invalid());
    }
    Ok(value as u32)
}

fn parse_price(raw: &str) -> Result<f64, FieldError> {
    let invalid = || FieldError::InvalidPrice(raw.to_string());
    let value: f64 = raw.trim().parse().map_err(|_| invalid())?;
    if !value.is_finite() || value < 0.0 {
        return Err(invalid());
    }
    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use contracts::domain::a001_pedido::aggregate::ItemPedido;
    use uuid::Uuid;

    fn order(itens: Vec<ItemPedido>) -> Pedido {
        Pedido {
            id: PedidoId::new(Uuid::new_v4()),
            cliente_id: Some(Uuid::new_v4()),
            pago: false,
            status: OrderStatus::Criado,
            data_pedido: None,
            valor_total: None,
            itens,
        }
    }

    fn loaded(paid: bool, status: OrderStatus, itens: Vec<ItemPedido>) -> OrderDetailState {
        let mut state = OrderDetailState::default();
        let ticket = state.begin_load(paid, &status);
        assert!(state.finish_load(ticket, order(itens)));
        state
    }

    #[test]
    fn test_edit_mode_follows_flags() {
        let statuses = [
            OrderStatus::Criado,
            OrderStatus::EmProducao,
            OrderStatus::parse("PRONTO"),
            OrderStatus::parse("CANCELADO"),
        ];
        for status in statuses {
            for paid in [false, true] {
                let state = loaded(paid, status.clone(), vec![]);
                let expected = !paid && status.allows_editing();
                assert_eq!(state.is_edit_mode(), expected, "paid={paid} status={status}");
                let view = state.render().unwrap();
                assert_eq!(view.show_banner, expected);
                assert!(!view.show_save);
            }
        }
    }

    #[test]
    fn test_render_rounds_for_display_only() {
        let state = loaded(false, OrderStatus::Criado, vec![ItemPedido::new("A", 2, 10.005)]);
        let view = state.render().unwrap();
        assert_eq!(view.rows[0].subtotal_display, "20.01");
        assert_eq!(view.rows[0].preco_display, "10.01");
        assert_eq!(view.rows[0].preco_unitario, 10.005);
        assert_eq!(view.total_display, "20.01");
    }

    #[test]
    fn test_price_shown_with_two_places() {
        let state = loaded(false, OrderStatus::Criado, vec![ItemPedido::new("A", 1, 5.0)]);
        let view = state.render().unwrap();
        assert_eq!(view.rows[0].preco_display, "5.00");
        assert_eq!(view.rows[0].preco_unitario, 5.0);
    }

    #[test]
    fn test_total_is_sum_of_subtotals() {
        let itens = vec![
            ItemPedido::new("Coxinha", 3, 5.0),
            ItemPedido::new("Kibe", 4, 4.5),
            ItemPedido::new("Empada", 0, 7.25),
        ];
        let state = loaded(true, OrderStatus::Criado, itens);
        let view = state.render().unwrap();
        assert_eq!(view.total, 33.0);
        assert_eq!(view.total_display, "33.00");
        assert_eq!(view.rows.len(), 3);
        assert_eq!(view.rows[2].subtotal_display, "0.00");
    }

    #[test]
    fn test_edit_sets_dirty_and_shows_save() {
        let mut state = loaded(false, OrderStatus::EmProducao, vec![ItemPedido::new("A", 1, 2.0)]);
        assert!(!state.is_dirty());

        state.update_field(0, ItemField::Quantidade, "3").unwrap();
        state.update_field(0, ItemField::PrecoUnitario, "2.5").unwrap();
        state.update_field(0, ItemField::Descricao, "Pastel").unwrap();

        assert!(state.is_dirty());
        let view = state.render().unwrap();
        assert!(view.show_save);
        assert_eq!(view.rows[0].descricao, "Pastel");
        assert_eq!(view.total_display, "7.50");
    }

    #[test]
    fn test_fresh_load_resets_dirty() {
        let mut state = loaded(false, OrderStatus::Criado, vec![ItemPedido::new("A", 1, 2.0)]);
        state.update_field(0, ItemField::Quantidade, "5").unwrap();
        assert!(state.is_dirty());

        let ticket = state.begin_load(false, &OrderStatus::Criado);
        assert!(!state.is_dirty());
        assert!(state.render().is_none());
        state.finish_load(ticket, order(vec![ItemPedido::new("B", 1, 1.0)]));
        assert!(!state.is_dirty());
        assert!(!state.render().unwrap().show_save);
    }

    #[test]
    fn test_invalid_input_keeps_previous_value() {
        let mut state = loaded(false, OrderStatus::Criado, vec![ItemPedido::new("A", 2, 3.0)]);

        for raw in ["abc", "-1", "1.5", "", "NaN"] {
            assert_eq!(
                state.update_field(0, ItemField::Quantidade, raw),
                Err(FieldError::InvalidQuantity(raw.to_string()))
            );
        }
        for raw in ["dez", "-0.01", "inf"] {
            assert_eq!(
                state.update_field(0, ItemField::PrecoUnitario, raw),
                Err(FieldError::InvalidPrice(raw.to_string()))
            );
        }

        assert!(!state.is_dirty());
        let item = &state.order().unwrap().itens[0];
        assert_eq!(item.quantidade, 2);
        assert_eq!(item.preco_unitario, 3.0);
    }

    #[test]
    fn test_update_rejected_outside_edit_mode_or_range() {
        let mut state = loaded(true, OrderStatus::Criado, vec![ItemPedido::new("A", 1, 1.0)]);
        assert_eq!(
            state.update_field(0, ItemField::Descricao, "B"),
            Err(FieldError::NotEditable)
        );

        let mut state = loaded(false, OrderStatus::Criado, vec![ItemPedido::new("A", 1, 1.0)]);
        assert_eq!(
            state.update_field(1, ItemField::Descricao, "B"),
            Err(FieldError::NoSuchItem(1))
        );
        assert!(!state.is_dirty());
    }

    #[test]
    fn test_stale_response_is_ignored() {
        let mut state = OrderDetailState::default();
        let first = state.begin_load(false, &OrderStatus::Criado);
        let second = state.begin_load(true, &OrderStatus::Criado);

        assert!(!state.finish_load(first, order(vec![ItemPedido::new("old", 1, 1.0)])));
        assert!(state.render().is_none());
        assert!(!state.fail_load(first));

        assert!(state.finish_load(second, order(vec![ItemPedido::new("new", 1, 1.0)])));
        assert_eq!(state.render().unwrap().rows[0].descricao, "new");
        assert!(!state.is_edit_mode());
    }

    #[test]
    fn test_failed_load_clears_order() {
        let mut state = loaded(false, OrderStatus::Criado, vec![ItemPedido::new("A", 1, 1.0)]);
        let ticket = state.begin_load(false, &OrderStatus::Criado);
        assert!(state.fail_load(ticket));
        assert!(state.render().is_none());
    }

    #[test]
    fn test_reset_invalidates_pending_load() {
        let mut state = OrderDetailState::default();
        let ticket = state.begin_load(false, &OrderStatus::Criado);
        state.reset();
        assert!(!state.finish_load(ticket, order(vec![])));
        assert!(state.order().is_none());
    }

    #[test]
    fn test_refresh_takes_edit_mode_from_server() {
        let mut state = loaded(false, OrderStatus::Criado, vec![ItemPedido::new("A", 1, 1.0)]);
        state.update_field(0, ItemField::Quantidade, "2").unwrap();
        let id = state.order().unwrap().id;

        let (refresh_id, ticket) = state.begin_refresh().unwrap();
        assert_eq!(refresh_id, id);
        let mut paid = order(vec![ItemPedido::new("A", 2, 1.0)]);
        paid.id = id;
        paid.pago = true;
        assert!(state.finish_load(ticket, paid));

        assert!(!state.is_edit_mode());
        assert!(!state.is_dirty());
        assert_eq!(
            state.update_field(0, ItemField::Quantidade, "3"),
            Err(FieldError::NotEditable)
        );
        assert!(!state.render().unwrap().show_banner);
    }

    #[test]
    fn test_refresh_keeps_editing_when_server_allows() {
        let mut state = loaded(false, OrderStatus::Criado, vec![ItemPedido::new("A", 1, 1.0)]);
        let (_, ticket) = state.begin_refresh().unwrap();
        let mut in_production = order(vec![]);
        in_production.status = OrderStatus::EmProducao;
        state.finish_load(ticket, in_production);
        assert!(state.is_edit_mode());

        // an ordinary load after a refresh trusts the caller again
        let ticket = state.begin_load(true, &OrderStatus::Criado);
        state.finish_load(ticket, order(vec![]));
        assert!(!state.is_edit_mode());
    }

    #[test]
    fn test_refresh_needs_a_loaded_order() {
        let mut state = OrderDetailState::default();
        assert!(state.begin_refresh().is_none());
    }

    #[test]
    fn test_second_command_refused_while_busy() {
        let mut state = loaded(false, OrderStatus::Criado, vec![]);
        let id = state.order().unwrap().id;

        assert!(state.begin_command());
        assert!(state.is_busy());
        assert!(!state.begin_command());

        state.finish_command(Command::Save, id, false);
        assert!(!state.is_busy());
        assert!(state.begin_command());
    }

    #[test]
    fn test_reset_keeps_command_in_flight() {
        let mut state = loaded(false, OrderStatus::Criado, vec![]);
        assert!(state.begin_command());
        state.reset();
        assert!(state.is_busy());
        assert!(!state.begin_command());
    }

    #[test]
    fn test_failed_command_changes_nothing() {
        let mut state = loaded(false, OrderStatus::Criado, vec![]);
        let id = state.order().unwrap().id;
        for command in [Command::Save, Command::MarkPaid, Command::Delete] {
            assert!(state.begin_command());
            assert_eq!(state.finish_command(command, id, false), CommandOutcome::default());
        }
        assert!(state.order().is_some());
    }

    #[test]
    fn test_successful_command_outcomes() {
        let mut state = loaded(false, OrderStatus::Criado, vec![]);
        let shown = state.order().unwrap().id;
        let other = PedidoId::new(Uuid::new_v4());

        state.begin_command();
        assert_eq!(
            state.finish_command(Command::Save, shown, true),
            CommandOutcome { refresh_details: true, refresh_list: true, close_dialog: false }
        );

        for command in [Command::MarkPaid, Command::Delete] {
            state.begin_command();
            assert_eq!(
                state.finish_command(command, shown, true),
                CommandOutcome { refresh_details: false, refresh_list: true, close_dialog: true }
            );
            state.begin_command();
            assert_eq!(
                state.finish_command(command, other, true),
                CommandOutcome { refresh_details: false, refresh_list: true, close_dialog: false }
            );
        }
    }

    #[test]
    fn test_save_payload_only_when_dirty() {
        let mut state = loaded(false, OrderStatus::Criado, vec![ItemPedido::new("X", 1, 5.0)]);
        assert!(state.save_payload().is_none());

        state.update_field(0, ItemField::Quantidade, "3").unwrap();
        let (id, dto) = state.save_payload().unwrap();
        assert_eq!(id, state.order().unwrap().id);

        let json = serde_json::to_value(&dto).unwrap();
        assert_eq!(json["itens"][0]["descricao"], "X");
        assert_eq!(json["itens"][0]["quantidade"], 3);
        assert_eq!(json["itens"][0]["valorUnitario"], 5.0);
        assert!(json["itens"][0].get("precoUnitario").is_none());
    }
}
