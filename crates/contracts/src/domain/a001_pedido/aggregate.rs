use crate::domain::common::AggregateId;
use chrono::{DateTime, NaiveDateTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Typed id of an order (pedido)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PedidoId(pub Uuid);

impl PedidoId {
    pub fn new(value: Uuid) -> Self {
        Self(value)
    }
    pub fn value(&self) -> Uuid {
        self.0
    }
}

impl AggregateId for PedidoId {
    fn as_string(&self) -> String {
        self.0.to_string()
    }
    fn from_string(s: &str) -> Result<Self, String> {
        Uuid::parse_str(s.trim())
            .map(PedidoId::new)
            .map_err(|e| format!("Invalid UUID: {}", e))
    }
}

impl std::fmt::Display for PedidoId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Order lifecycle status (`statusPedido` on the wire)
///
/// Only `CRIADO` and `EM_PRODUCAO` matter to the client; any other value the
/// server sends is kept verbatim so it can be displayed and sent back.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum OrderStatus {
    #[default]
    Criado,
    EmProducao,
    Other(String),
}

impl OrderStatus {
    pub fn parse(raw: &str) -> Self {
        match raw.trim() {
            "CRIADO" => OrderStatus::Criado,
            "EM_PRODUCAO" => OrderStatus::EmProducao,
            other => OrderStatus::Other(other.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            OrderStatus::Criado => "CRIADO",
            OrderStatus::EmProducao => "EM_PRODUCAO",
            OrderStatus::Other(raw) => raw,
        }
    }

    /// Human readable label for tables and badges
    pub fn label(&self) -> &str {
        match self {
            OrderStatus::Criado => "Criado",
            OrderStatus::EmProducao => "Em produção",
            OrderStatus::Other(raw) => raw,
        }
    }

    /// Statuses in which the items of an unpaid order may still change
    pub fn allows_editing(&self) -> bool {
        matches!(self, OrderStatus::Criado | OrderStatus::EmProducao)
    }
}

impl From<String> for OrderStatus {
    fn from(raw: String) -> Self {
        OrderStatus::parse(&raw)
    }
}

impl From<OrderStatus> for String {
    fn from(status: OrderStatus) -> Self {
        status.as_str().to_string()
    }
}

impl std::fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Edit gate: items can be edited only on unpaid orders that are still
/// `CRIADO` or `EM_PRODUCAO`.
pub fn edit_allowed(paid: bool, status: &OrderStatus) -> bool {
    !paid && status.allows_editing()
}

/// Order date as sent by the server: an ISO string or epoch milliseconds,
/// depending on the server's date serialization settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum OrderTimestamp {
    Millis(i64),
    Text(String),
}

impl OrderTimestamp {
    pub fn to_datetime(&self) -> Option<DateTime<Utc>> {
        match self {
            OrderTimestamp::Millis(ms) => Utc.timestamp_millis_opt(*ms).single(),
            OrderTimestamp::Text(raw) => DateTime::parse_from_rfc3339(raw)
                .map(|d| d.with_timezone(&Utc))
                .ok()
                .or_else(|| {
                    NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f")
                        .ok()
                        .map(|n| n.and_utc())
                }),
        }
    }
}

/// Line of an order as returned by `GET /pedido/api/{id}`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ItemPedido {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<Uuid>,
    #[serde(default)]
    pub descricao: String,
    #[serde(default)]
    pub quantidade: u32,
    #[serde(default)]
    pub preco_unitario: f64,
    /// Subtotal computed by the server; informational only
    #[serde(rename = "subtotal", default, skip_serializing_if = "Option::is_none")]
    pub reported_subtotal: Option<f64>,
}

impl ItemPedido {
    pub fn new(descricao: impl Into<String>, quantidade: u32, preco_unitario: f64) -> Self {
        Self {
            id: None,
            descricao: descricao.into(),
            quantidade,
            preco_unitario,
            reported_subtotal: None,
        }
    }

    /// quantity * unit price, never stored
    pub fn subtotal(&self) -> f64 {
        f64::from(self.quantidade) * self.preco_unitario
    }
}

/// Sum of line subtotals, unrounded
pub fn total_of(itens: &[ItemPedido]) -> f64 {
    itens.iter().map(ItemPedido::subtotal).sum()
}

/// Full order read model (`GET /pedido/api/{id}`)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Pedido {
    pub id: PedidoId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cliente_id: Option<Uuid>,
    #[serde(rename = "pago", alias = "paid", default)]
    pub pago: bool,
    #[serde(rename = "statusPedido", alias = "status", default)]
    pub status: OrderStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data_pedido: Option<OrderTimestamp>,
    /// Total stored by the server; the client always recomputes its own
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub valor_total: Option<f64>,
    #[serde(default)]
    pub itens: Vec<ItemPedido>,
}

impl Pedido {
    pub fn total(&self) -> f64 {
        total_of(&self.itens)
    }

    pub fn is_editable(&self) -> bool {
        edit_allowed(self.pago, &self.status)
    }

    /// Write model for `PUT /pedido/api/{id}`
    pub fn to_update_dto(&self) -> CriarPedidoDto {
        CriarPedidoDto {
            cliente_id: self.cliente_id,
            itens: self.itens.iter().map(CriarItemPedidoDto::from).collect(),
        }
    }
}

/// Row of the order list (`GET /pedido/api`)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PedidoListagem {
    pub id: PedidoId,
    /// Already formatted by the server
    #[serde(default)]
    pub data_pedido: String,
    #[serde(default)]
    pub valor_total: f64,
    #[serde(rename = "pago", alias = "paid", default)]
    pub pago: bool,
    #[serde(rename = "statusPedido", alias = "status", default)]
    pub status: OrderStatus,
}

impl PedidoListagem {
    pub fn is_editable(&self) -> bool {
        edit_allowed(self.pago, &self.status)
    }
}

/// Item of the write model. The unit price travels as `valorUnitario` here,
/// while the read model calls it `precoUnitario`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CriarItemPedidoDto {
    pub descricao: String,
    pub quantidade: u32,
    pub valor_unitario: f64,
}

impl From<&ItemPedido> for CriarItemPedidoDto {
    fn from(item: &ItemPedido) -> Self {
        Self {
            descricao: item.descricao.clone(),
            quantidade: item.quantidade,
            valor_unitario: item.preco_unitario,
        }
    }
}

/// Write model for creating or replacing an order
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CriarPedidoDto {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cliente_id: Option<Uuid>,
    pub itens: Vec<CriarItemPedidoDto>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn pedido_json() -> serde_json::Value {
        json!({
            "id": "0b6a3f52-8f5e-4a5d-9d4e-2f7c1d9a0b11",
            "dataPedido": "2026-01-31T12:30:00.000+00:00",
            "valorTotal": 35.0,
            "pago": false,
            "statusPedido": "EM_PRODUCAO",
            "clienteId": "5d1e7c2a-3b4f-4e6a-8c9d-0a1b2c3d4e5f",
            "itens": [
                {
                    "id": "9f8e7d6c-5b4a-4392-8170-6f5e4d3c2b1a",
                    "descricao": "Coxinha",
                    "quantidade": 3,
                    "precoUnitario": 5,
                    "subtotal": 15
                },
                { "descricao": "Kibe", "quantidade": 4, "precoUnitario": 5.0 }
            ]
        })
    }

    #[test]
    fn test_edit_gate() {
        assert!(edit_allowed(false, &OrderStatus::Criado));
        assert!(edit_allowed(false, &OrderStatus::EmProducao));
        assert!(!edit_allowed(true, &OrderStatus::Criado));
        assert!(!edit_allowed(true, &OrderStatus::EmProducao));
        assert!(!edit_allowed(false, &OrderStatus::parse("ENTREGUE")));
        assert!(!edit_allowed(false, &OrderStatus::parse("")));
    }

    #[test]
    fn test_status_keeps_unknown_values() {
        let status: OrderStatus = serde_json::from_value(json!("CANCELADO")).unwrap();
        assert_eq!(status, OrderStatus::Other("CANCELADO".to_string()));
        assert_eq!(serde_json::to_value(&status).unwrap(), json!("CANCELADO"));
        assert_eq!(
            serde_json::to_value(OrderStatus::EmProducao).unwrap(),
            json!("EM_PRODUCAO")
        );
        assert_eq!(OrderStatus::EmProducao.label(), "Em produção");
    }

    #[test]
    fn test_deserialize_server_order() {
        let pedido: Pedido = serde_json::from_value(pedido_json()).unwrap();
        assert_eq!(pedido.status, OrderStatus::EmProducao);
        assert!(!pedido.pago);
        assert!(pedido.is_editable());
        assert_eq!(pedido.itens.len(), 2);
        assert_eq!(pedido.itens[0].reported_subtotal, Some(15.0));
        assert_eq!(pedido.total(), 35.0);
        let when = pedido.data_pedido.as_ref().and_then(|d| d.to_datetime()).unwrap();
        assert_eq!(when.format("%d/%m/%Y %H:%M").to_string(), "31/01/2026 12:30");
    }

    #[test]
    fn test_deserialize_short_flag_names() {
        let pedido: Pedido = serde_json::from_value(json!({
            "id": "0b6a3f52-8f5e-4a5d-9d4e-2f7c1d9a0b11",
            "clienteId": "5d1e7c2a-3b4f-4e6a-8c9d-0a1b2c3d4e5f",
            "paid": true,
            "status": "CRIADO",
            "itens": []
        }))
        .unwrap();
        assert!(pedido.pago);
        assert_eq!(pedido.status, OrderStatus::Criado);
        assert!(!pedido.is_editable());
        assert_eq!(pedido.total(), 0.0);
    }

    #[test]
    fn test_update_payload_uses_valor_unitario() {
        let mut pedido: Pedido = serde_json::from_value(pedido_json()).unwrap();
        pedido.itens = vec![ItemPedido::new("X", 3, 5.0)];
        let payload = serde_json::to_value(pedido.to_update_dto()).unwrap();
        assert_eq!(
            payload,
            json!({
                "clienteId": "5d1e7c2a-3b4f-4e6a-8c9d-0a1b2c3d4e5f",
                "itens": [{ "descricao": "X", "quantidade": 3, "valorUnitario": 5.0 }]
            })
        );
        assert!(payload["itens"][0].get("precoUnitario").is_none());
    }

    #[test]
    fn test_subtotal_is_unrounded() {
        let item = ItemPedido::new("A", 2, 10.005);
        assert!((item.subtotal() - 20.01).abs() < 1e-9);
        assert_eq!(format!("{:.2}", total_of(&[item])), "20.01");
    }

    #[test]
    fn test_timestamp_from_millis() {
        let ts: OrderTimestamp = serde_json::from_value(json!(0)).unwrap();
        assert_eq!(ts.to_datetime(), Utc.timestamp_millis_opt(0).single());
        assert_eq!(OrderTimestamp::Text("ontem".into()).to_datetime(), None);
    }

    #[test]
    fn test_listing_row() {
        let row: PedidoListagem = serde_json::from_value(json!({
            "id": "0b6a3f52-8f5e-4a5d-9d4e-2f7c1d9a0b11",
            "dataPedido": "31/01/2026 12:30",
            "valorTotal": 12.5,
            "pago": false,
            "statusPedido": "CRIADO"
        }))
        .unwrap();
        assert!(row.is_editable());
        assert_eq!(row.data_pedido, "31/01/2026 12:30");
        assert_eq!(
            PedidoId::from_string(&row.id.as_string()),
            Ok(row.id)
        );
    }
}
