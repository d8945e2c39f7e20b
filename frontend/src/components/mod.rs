pub mod calendar_picker;
pub mod categorias;
pub mod comisiones;
pub mod compras;
pub mod confirm_dialog;
pub mod egresos;
pub mod pagination;
pub mod pagos;
