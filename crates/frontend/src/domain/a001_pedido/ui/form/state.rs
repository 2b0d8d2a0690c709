//! Rows of the order item form
//!
//! The server binds submitted fields by position (`itens[N].descricao`, ...),
//! so every row's index must equal its position: 0..len, no gaps.

use crate::shared::number_format::{format_money_comma, parse_or_zero};
use contracts::domain::a001_pedido::aggregate::CriarItemPedidoDto;

/// Stable identity of a row for keyed rendering; never reused
pub type RowKey = u64;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormField {
    Descricao,
    Quantidade,
    ValorUnitario,
}

impl FormField {
    pub fn wire_name(&self) -> &'static str {
        match self {
            FormField::Descricao => "descricao",
            FormField::Quantidade => "quantidade",
            FormField::ValorUnitario => "valorUnitario",
        }
    }
}

/// Name of a submitted form field, e.g. `itens[0].valorUnitario`
pub fn field_name(index: usize, field: FormField) -> String {
    format!("itens[{}].{}", index, field.wire_name())
}

#[derive(Debug, Clone, PartialEq)]
pub struct FormRow {
    pub key: RowKey,
    pub index: usize,
    pub descricao: String,
    pub quantidade: String,
    pub valor_unitario: String,
}

impl FormRow {
    fn blank(key: RowKey, index: usize) -> Self {
        Self {
            key,
            index,
            descricao: String::new(),
            quantidade: "1".to_string(),
            valor_unitario: "0.00".to_string(),
        }
    }

    pub fn label(&self) -> String {
        format!("Item {}", self.index + 1)
    }

    pub fn field_name(&self, field: FormField) -> String {
        field_name(self.index, field)
    }

    pub fn value(&self, field: FormField) -> &str {
        match field {
            FormField::Descricao => &self.descricao,
            FormField::Quantidade => &self.quantidade,
            FormField::ValorUnitario => &self.valor_unitario,
        }
    }

    /// Unparseable input counts as 0
    pub fn subtotal(&self) -> f64 {
        parse_or_zero(&self.quantidade) * parse_or_zero(&self.valor_unitario)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ItemsFormState {
    rows: Vec<FormRow>,
    next_index: usize,
    next_key: RowKey,
}

impl Default for ItemsFormState {
    fn default() -> Self {
        Self::new()
    }
}

impl ItemsFormState {
    /// A new order starts with one blank row
    pub fn new() -> Self {
        let mut state = Self {
            rows: Vec::new(),
            next_index: 0,
            next_key: 0,
        };
        state.add_row();
        state
    }

    /// Prefill from an existing order's items (edit mode)
    pub fn from_items(items: &[CriarItemPedidoDto]) -> Self {
        let mut state = Self {
            rows: Vec::new(),
            next_index: 0,
            next_key: 0,
        };
        state.replace_items(items);
        state
    }

    /// Swap all rows for `items`. New rows get fresh keys, so rows already
    /// mounted are dropped rather than patched.
    pub fn replace_items(&mut self, items: &[CriarItemPedidoDto]) {
        self.rows.clear();
        self.next_index = 0;
        if items.is_empty() {
            self.add_row();
            return;
        }
        for item in items {
            let key = self.add_row();
            self.set_field(key, FormField::Descricao, item.descricao.clone());
            self.set_field(key, FormField::Quantidade, item.quantidade.to_string());
            self.set_field(key, FormField::ValorUnitario, format!("{:.2}", item.valor_unitario));
        }
    }

    pub fn rows(&self) -> &[FormRow] {
        &self.rows
    }

    pub fn keys(&self) -> Vec<RowKey> {
        self.rows.iter().map(|r| r.key).collect()
    }

    pub fn row(&self, key: RowKey) -> Option<&FormRow> {
        self.rows.iter().find(|r| r.key == key)
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn next_index(&self) -> usize {
        self.next_index
    }

    /// Append a blank row labelled with the current counter
    pub fn add_row(&mut self) -> RowKey {
        let key = self.next_key;
        self.next_key += 1;
        self.rows.push(FormRow::blank(key, self.next_index));
        self.next_index += 1;
        key
    }

    /// Remove a row and renumber the rest
    pub fn remove_row(&mut self, key: RowKey) -> bool {
        let before = self.rows.len();
        self.rows.retain(|r| r.key != key);
        if self.rows.len() == before {
            return false;
        }
        self.reindex();
        true
    }

    fn reindex(&mut self) {
        for (position, row) in self.rows.iter_mut().enumerate() {
            row.index = position;
        }
        self.next_index = self.rows.len();
    }

    pub fn set_field(&mut self, key: RowKey, field: FormField, value: String) -> bool {
        let Some(row) = self.rows.iter_mut().find(|r| r.key == key) else {
            return false;
        };
        match field {
            FormField::Descricao => row.descricao = value,
            FormField::Quantidade => row.quantidade = value,
            FormField::ValorUnitario => row.valor_unitario = value,
        }
        true
    }

    pub fn total(&self) -> f64 {
        self.rows.iter().map(FormRow::subtotal).sum()
    }

    /// "12,50"
    pub fn total_display(&self) -> String {
        format_money_comma(self.total())
    }
}
