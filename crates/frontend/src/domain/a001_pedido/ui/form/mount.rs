use contracts::domain::a001_pedido::aggregate::PedidoId;
use contracts::domain::common::AggregateId;

pub const DEFAULT_ACTION: &str = "/pedido";

/// Settings of the item form, read from its mount element:
/// `data-action`, `data-pedido-id` (edit mode) and `data-cliente-id`
#[derive(Debug, Clone, PartialEq)]
pub struct FormMount {
    pub action: String,
    pub pedido_id: Option<PedidoId>,
    pub cliente_id: Option<String>,
}

impl Default for FormMount {
    fn default() -> Self {
        Self {
            action: DEFAULT_ACTION.to_string(),
            pedido_id: None,
            cliente_id: None,
        }
    }
}

impl FormMount {
    pub fn from_attributes(get: impl Fn(&str) -> Option<String>) -> Self {
        let non_empty = |name: &str| get(name).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());

        let pedido_id = non_empty("data-pedido-id").and_then(|raw| match PedidoId::from_string(&raw) {
            Ok(id) => Some(id),
            Err(e) => {
                log::warn!("ignoring data-pedido-id {:?}: {}", raw, e);
                None
            }
        });

        Self {
            action: non_empty("data-action").unwrap_or_else(|| DEFAULT_ACTION.to_string()),
            pedido_id,
            cliente_id: non_empty("data-cliente-id"),
        }
    }

    pub fn is_edit(&self) -> bool {
        self.pedido_id.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_to_create_mode() {
        let mount = FormMount::from_attributes(|_| None);
        assert_eq!(mount, FormMount::default());
        assert!(!mount.is_edit());
    }

    #[test]
    fn test_edit_mode_attributes() {
        let mount = FormMount::from_attributes(|name| match name {
            "data-action" => Some("/pedido/salvar".to_string()),
            "data-pedido-id" => Some("0b6a3f52-8f5e-4a5d-9d4e-2f7c1d9a0b11".to_string()),
            "data-cliente-id" => Some("  ".to_string()),
            _ => None,
        });
        assert_eq!(mount.action, "/pedido/salvar");
        assert!(mount.is_edit());
        assert_eq!(mount.cliente_id, None);
    }

    #[test]
    fn test_bad_pedido_id_is_ignored() {
        let mount = FormMount::from_attributes(|name| {
            (name == "data-pedido-id").then(|| "42".to_string())
        });
        assert!(!mount.is_edit());
    }
}
