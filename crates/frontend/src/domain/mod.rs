pub mod a001_pedido;
