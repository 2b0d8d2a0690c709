pub mod a001_pedido;
pub mod common;
