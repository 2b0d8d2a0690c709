//! REST calls of the order (pedido) API
//!
//! | Method | Path                   |
//! |--------|------------------------|
//! | GET    | /pedido/api            |
//! | GET    | /pedido/api/{id}       |
//! | PUT    | /pedido/api/{id}       |
//! | PUT    | /pedido/api/{id}/pagar |
//! | DELETE | /pedido/api/{id}       |

use crate::shared::api_utils::{api_url, read_json, send, send_json, ApiError};
use contracts::domain::a001_pedido::aggregate::{CriarPedidoDto, Pedido, PedidoId, PedidoListagem};
use gloo_net::http::Request;

pub(crate) fn order_path(id: PedidoId) -> String {
    format!("/pedido/api/{}", id)
}

pub(crate) fn mark_paid_path(id: PedidoId) -> String {
    format!("/pedido/api/{}/pagar", id)
}

/// Orders of the authenticated customer
pub async fn fetch_list() -> Result<Vec<PedidoListagem>, ApiError> {
    let cache_buster = js_sys::Date::now() as i64;
    let url = api_url(&format!("/pedido/api?_ts={}", cache_buster));
    log::debug!("GET {}", url);

    let response = send(
        Request::get(&url)
            .header("Accept", "application/json")
            .header("Cache-Control", "no-cache, no-store, must-revalidate"),
    )
    .await?;
    read_json(response).await
}

pub async fn fetch_by_id(id: PedidoId) -> Result<Pedido, ApiError> {
    let url = api_url(&order_path(id));
    log::debug!("GET {}", url);

    let response = send(Request::get(&url).header("Accept", "application/json")).await?;
    read_json(response).await
}

/// Replace the items of an order
pub async fn update(id: PedidoId, dto: &CriarPedidoDto) -> Result<(), ApiError> {
    let url = api_url(&order_path(id));
    log::debug!("PUT {} ({} itens)", url, dto.itens.len());

    send_json(Request::put(&url), dto).await?;
    Ok(())
}

pub async fn mark_paid(id: PedidoId) -> Result<(), ApiError> {
    let url = api_url(&mark_paid_path(id));
    log::debug!("PUT {}", url);

    send(Request::put(&url)).await?;
    Ok(())
}

pub async fn delete_by_id(id: PedidoId) -> Result<(), ApiError> {
    let url = api_url(&order_path(id));
    log::debug!("DELETE {}", url);

    send(Request::delete(&url)).await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use contracts::domain::common::AggregateId;

    #[test]
    fn test_paths() {
        let id = PedidoId::from_string("0b6a3f52-8f5e-4a5d-9d4e-2f7c1d9a0b11").unwrap();
        assert_eq!(order_path(id), "/pedido/api/0b6a3f52-8f5e-4a5d-9d4e-2f7c1d9a0b11");
        assert_eq!(
            mark_paid_path(id),
            "/pedido/api/0b6a3f52-8f5e-4a5d-9d4e-2f7c1d9a0b11/pagar"
        );
    }
}
