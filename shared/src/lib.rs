use serde::{Deserialize, Serialize};
use std::fmt;

pub mod calc;
pub mod validacion;

/// Destination of an expense: workshop money or the owner's household.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum Destino {
    #[default]
    Taller,
    Casa,
}

impl fmt::Display for Destino {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Destino::Taller => write!(f, "Taller"),
            Destino::Casa => write!(f, "Casa"),
        }
    }
}

/// Currency of a monetary amount. Serialized with the exact spelling the
/// backend stores ("Bolivianos" / "Dólares").
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum Moneda {
    #[default]
    Bolivianos,
    #[serde(rename = "Dólares")]
    Dolares,
}

impl Moneda {
    pub fn simbolo(&self) -> &'static str {
        match self {
            Moneda::Bolivianos => "Bs",
            Moneda::Dolares => "$us",
        }
    }
}

impl fmt::Display for Moneda {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Moneda::Bolivianos => write!(f, "Bolivianos"),
            Moneda::Dolares => write!(f, "Dólares"),
        }
    }
}

/// Activation state shared by lookup entities (payment methods, card
/// commissions, service categories).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Estado {
    #[default]
    Activo,
    Inactivo,
}

impl Estado {
    pub fn es_activo(&self) -> bool {
        matches!(self, Estado::Activo)
    }
}

impl fmt::Display for Estado {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Estado::Activo => write!(f, "activo"),
            Estado::Inactivo => write!(f, "inactivo"),
        }
    }
}

/// A recorded cash outflow. Dates travel as ISO `YYYY-MM-DD` strings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Egreso {
    pub id: i64,
    pub fecha: String,
    pub destino: Destino,
    pub detalle: String,
    pub monto: f64,
    pub moneda: Moneda,
    pub forma_pago_id: i64,
}

/// Payload for creating or updating an expense.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NuevoEgreso {
    pub fecha: String,
    pub destino: Destino,
    pub detalle: String,
    pub monto: f64,
    pub moneda: Moneda,
    pub forma_pago_id: i64,
}

/// Payment method lookup (cash, card, transfer...). Entities reference it
/// by id; the "tarjeta" substring in its name is what enables the card
/// commission flow on payments.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FormaPago {
    pub id: i64,
    pub nombre: String,
    pub estado: Estado,
}

/// Card-network commission: a percentage applied to card payments.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComisionTarjeta {
    pub id: i64,
    pub banco: String,
    pub porcentaje: f64,
    pub estado: Estado,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NuevaComisionTarjeta {
    pub banco: String,
    pub porcentaje: f64,
    pub estado: Estado,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoriaServicio {
    pub id: i64,
    pub nombre: String,
    pub estado: Estado,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NuevaCategoriaServicio {
    pub nombre: String,
    pub estado: Estado,
}

/// Supplier lookup referenced by supply purchases.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Proveedor {
    pub id: i64,
    pub nombre: String,
}

/// A recorded purchase of supplies or parts, optionally tied to a work
/// order. `total` is computed and owned by the backend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompraInsumo {
    pub id: i64,
    pub fecha: String,
    pub descripcion: String,
    pub cantidad: f64,
    pub precio_unitario: f64,
    pub total: f64,
    pub moneda: Moneda,
    pub nro_factura: Option<String>,
    pub nro_recibo: Option<String>,
    pub orden_trabajo_id: Option<i64>,
    pub proveedor_id: i64,
    pub forma_pago_id: i64,
}

/// Purchase payload. The locally estimated total is display-only and is
/// deliberately absent here.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NuevaCompraInsumo {
    pub fecha: String,
    pub descripcion: String,
    pub cantidad: f64,
    pub precio_unitario: f64,
    pub moneda: Moneda,
    pub nro_factura: Option<String>,
    pub nro_recibo: Option<String>,
    pub orden_trabajo_id: Option<i64>,
    pub proveedor_id: i64,
    pub forma_pago_id: i64,
}

/// A customer payment applied to a work order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PagoOrden {
    pub id: i64,
    pub orden_trabajo_id: i64,
    pub fecha: String,
    pub monto: f64,
    pub moneda: Moneda,
    /// Required by the backend when `moneda` is Dólares.
    pub tipo_cambio: Option<f64>,
    pub nro_factura: Option<String>,
    pub nro_recibo: Option<String>,
    pub forma_pago_id: i64,
    pub observacion: String,
    pub usuario_id: Option<i64>,
    pub comision_tarjeta_id: Option<i64>,
    /// Commission computed client-side at registration time and persisted
    /// with the payment.
    pub monto_comision: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NuevoPagoOrden {
    pub orden_trabajo_id: i64,
    pub fecha: String,
    pub monto: f64,
    pub moneda: Moneda,
    pub tipo_cambio: Option<f64>,
    pub nro_factura: Option<String>,
    pub nro_recibo: Option<String>,
    pub forma_pago_id: i64,
    pub observacion: String,
    pub usuario_id: Option<i64>,
    pub comision_tarjeta_id: Option<i64>,
    pub monto_comision: Option<f64>,
}

/// Read-only projection served by `/pago-orden/ordenes-con-saldo`: work
/// orders whose balance is still open. All derived figures are the
/// backend's.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrdenConSaldo {
    pub orden_trabajo_id: i64,
    pub fecha_registro: String,
    pub cliente: String,
    pub placa: String,
    pub moneda: Moneda,
    pub sub_total: f64,
    pub total_pagado: f64,
    pub saldo: f64,
}

/// Query parameters for the server-paginated expense list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EgresoListRequest {
    pub page: u32,
    pub limit: u32,
    /// Inclusive range bounds, ISO `YYYY-MM-DD`.
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    pub search: Option<String>,
}

impl EgresoListRequest {
    /// Fixed page size used by every expense list view.
    pub const PAGE_SIZE: u32 = 10;

    pub fn primera_pagina() -> Self {
        Self {
            page: 1,
            limit: Self::PAGE_SIZE,
            start_date: None,
            end_date: None,
            search: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PaginationInfo {
    pub page: u32,
    pub limit: u32,
    pub total: u64,
    pub total_pages: u32,
}

/// Aggregate total for one payment-method/currency pair, computed by the
/// backend over the whole filtered set (not just the loaded page).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TotalPorFormaPago {
    pub forma_pago: String,
    pub moneda: Moneda,
    pub total: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EgresoListResponse {
    pub egresos: Vec<Egreso>,
    pub pagination: PaginationInfo,
    pub totales: Vec<TotalPorFormaPago>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn moneda_serializa_con_acento() {
        assert_eq!(
            serde_json::to_string(&Moneda::Dolares).unwrap(),
            "\"Dólares\""
        );
        assert_eq!(
            serde_json::to_string(&Moneda::Bolivianos).unwrap(),
            "\"Bolivianos\""
        );
    }

    #[test]
    fn moneda_deserializa_desde_el_backend() {
        let m: Moneda = serde_json::from_str("\"Dólares\"").unwrap();
        assert_eq!(m, Moneda::Dolares);
    }

    #[test]
    fn estado_serializa_en_minusculas() {
        assert_eq!(serde_json::to_string(&Estado::Activo).unwrap(), "\"activo\"");
        assert_eq!(
            serde_json::to_string(&Estado::Inactivo).unwrap(),
            "\"inactivo\""
        );
        assert!(Estado::Activo.es_activo());
        assert!(!Estado::Inactivo.es_activo());
    }

    #[test]
    fn pago_orden_round_trip() {
        let pago = PagoOrden {
            id: 7,
            orden_trabajo_id: 42,
            fecha: "2025-03-10".to_string(),
            monto: 100.0,
            moneda: Moneda::Bolivianos,
            tipo_cambio: None,
            nro_factura: Some("F-001".to_string()),
            nro_recibo: None,
            forma_pago_id: 2,
            observacion: "pago parcial".to_string(),
            usuario_id: Some(1),
            comision_tarjeta_id: Some(3),
            monto_comision: Some(3.0),
        };
        let json = serde_json::to_string(&pago).unwrap();
        let back: PagoOrden = serde_json::from_str(&json).unwrap();
        assert_eq!(back, pago);
    }

    #[test]
    fn primera_pagina_usa_el_tamano_fijo() {
        let req = EgresoListRequest::primera_pagina();
        assert_eq!(req.page, 1);
        assert_eq!(req.limit, EgresoListRequest::PAGE_SIZE);
        assert!(req.search.is_none());
    }
}
