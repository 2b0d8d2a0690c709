use contracts::domain::a001_pedido::aggregate::PedidoListagem;
use leptos::prelude::*;

#[derive(Clone, Debug, Default)]
pub struct OrderListState {
    pub orders: Vec<PedidoListagem>,
    pub is_loaded: bool,
}

impl OrderListState {
    pub fn set_orders(&mut self, orders: Vec<PedidoListagem>) {
        self.orders = orders;
        self.is_loaded = true;
    }

    /// Sum of the server totals of all listed orders
    pub fn total_value(&self) -> f64 {
        self.orders.iter().map(|o| o.valor_total).sum()
    }

    pub fn unpaid_count(&self) -> usize {
        self.orders.iter().filter(|o| !o.pago).count()
    }
}

// Create state within component scope instead of thread-local
// This ensures state is properly disposed when component unmounts
pub fn create_state() -> RwSignal<OrderListState> {
    RwSignal::new(OrderListState::default())
}
