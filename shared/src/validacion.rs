//! Form state and submit-time validation for every screen.
//!
//! Each form struct mirrors the raw text inputs the UI holds; `to_request`
//! parses, validates and builds the exact payload sent to the backend.
//! Validation failures are typed so the screens can surface a message
//! without any network call having happened.

use chrono::NaiveDate;
use std::fmt;

use crate::calc;
use crate::{
    CompraInsumo, ComisionTarjeta, Destino, Egreso, Moneda, NuevaCategoriaServicio,
    NuevaComisionTarjeta, NuevaCompraInsumo, NuevoEgreso, NuevoPagoOrden, OrdenConSaldo,
    PagoOrden,
};

fn fecha_valida(fecha: &str) -> bool {
    NaiveDate::parse_from_str(fecha, "%Y-%m-%d").is_ok()
}

fn parse_positivo(texto: &str) -> Option<f64> {
    match texto.trim().parse::<f64>() {
        Ok(valor) if valor > 0.0 => Some(valor),
        _ => None,
    }
}

/// Empty or whitespace-only optional fields travel as `None`.
fn campo_opcional(texto: &str) -> Option<String> {
    let limpio = texto.trim();
    if limpio.is_empty() {
        None
    } else {
        Some(limpio.to_string())
    }
}

// ---------------------------------------------------------------------------
// Egresos
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Default)]
pub struct EgresoForm {
    pub fecha: String,
    pub destino: Destino,
    pub detalle: String,
    pub monto: String,
    pub moneda: Moneda,
    pub forma_pago_id: Option<i64>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum EgresoError {
    FechaInvalida,
    DetalleRequerido,
    MontoNoPositivo,
    FormaPagoRequerida,
}

impl fmt::Display for EgresoError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EgresoError::FechaInvalida => write!(f, "Ingrese una fecha válida"),
            EgresoError::DetalleRequerido => write!(f, "El detalle es obligatorio"),
            EgresoError::MontoNoPositivo => write!(f, "El monto debe ser mayor a cero"),
            EgresoError::FormaPagoRequerida => write!(f, "Seleccione una forma de pago"),
        }
    }
}

impl std::error::Error for EgresoError {}

impl EgresoForm {
    /// Rebuild the form from an existing record for editing.
    pub fn from_egreso(egreso: &Egreso) -> Self {
        Self {
            fecha: egreso.fecha.clone(),
            destino: egreso.destino,
            detalle: egreso.detalle.clone(),
            monto: format!("{:.2}", egreso.monto),
            moneda: egreso.moneda,
            forma_pago_id: Some(egreso.forma_pago_id),
        }
    }

    pub fn to_request(&self) -> Result<NuevoEgreso, EgresoError> {
        if !fecha_valida(&self.fecha) {
            return Err(EgresoError::FechaInvalida);
        }
        let detalle = self.detalle.trim();
        if detalle.is_empty() {
            return Err(EgresoError::DetalleRequerido);
        }
        let monto = parse_positivo(&self.monto).ok_or(EgresoError::MontoNoPositivo)?;
        let forma_pago_id = self.forma_pago_id.ok_or(EgresoError::FormaPagoRequerida)?;
        Ok(NuevoEgreso {
            fecha: self.fecha.clone(),
            destino: self.destino,
            detalle: detalle.to_string(),
            monto,
            moneda: self.moneda,
            forma_pago_id,
        })
    }
}

// ---------------------------------------------------------------------------
// Pagos de orden
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Default)]
pub struct PagoForm {
    pub orden_trabajo_id: i64,
    pub fecha: String,
    pub monto: String,
    pub moneda: Moneda,
    pub tipo_cambio: String,
    pub nro_factura: String,
    pub nro_recibo: String,
    pub forma_pago_id: Option<i64>,
    pub observacion: String,
    pub comision_tarjeta_id: Option<i64>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum PagoError {
    FechaInvalida,
    MontoNoPositivo,
    SaldoExcedido { saldo: f64 },
    TipoCambioRequerido,
    FormaPagoRequerida,
}

impl fmt::Display for PagoError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PagoError::FechaInvalida => write!(f, "Ingrese una fecha válida"),
            PagoError::MontoNoPositivo => write!(f, "El monto debe ser mayor a cero"),
            PagoError::SaldoExcedido { saldo } => {
                write!(f, "El monto excede el saldo pendiente ({:.2})", saldo)
            }
            PagoError::TipoCambioRequerido => {
                write!(f, "Ingrese un tipo de cambio válido para pagos en Dólares")
            }
            PagoError::FormaPagoRequerida => write!(f, "Seleccione una forma de pago"),
        }
    }
}

impl std::error::Error for PagoError {}

impl PagoForm {
    /// Prefill for registering a payment against a pending order: amount
    /// starts at the remaining balance, currency at the order's currency.
    pub fn para_orden(orden: &OrdenConSaldo, fecha: String) -> Self {
        Self {
            orden_trabajo_id: orden.orden_trabajo_id,
            fecha,
            monto: format!("{:.2}", orden.saldo),
            moneda: orden.moneda,
            ..Self::default()
        }
    }

    /// Rebuild the form from a recorded payment for editing.
    pub fn from_pago(pago: &PagoOrden) -> Self {
        Self {
            orden_trabajo_id: pago.orden_trabajo_id,
            fecha: pago.fecha.clone(),
            monto: format!("{:.2}", pago.monto),
            moneda: pago.moneda,
            tipo_cambio: pago
                .tipo_cambio
                .map(|tc| tc.to_string())
                .unwrap_or_default(),
            nro_factura: pago.nro_factura.clone().unwrap_or_default(),
            nro_recibo: pago.nro_recibo.clone().unwrap_or_default(),
            forma_pago_id: Some(pago.forma_pago_id),
            observacion: pago.observacion.clone(),
            comision_tarjeta_id: pago.comision_tarjeta_id,
        }
    }

    /// Validate and build the payload. `saldo` is the cap for new payments;
    /// pass `None` when editing an existing one, where the cap is
    /// deliberately not enforced. `comision` is the selected card
    /// commission, if any; its amount is computed here and sent along.
    pub fn to_request(
        &self,
        saldo: Option<f64>,
        comision: Option<&ComisionTarjeta>,
        usuario_id: Option<i64>,
    ) -> Result<NuevoPagoOrden, PagoError> {
        if !fecha_valida(&self.fecha) {
            return Err(PagoError::FechaInvalida);
        }
        let monto = parse_positivo(&self.monto).ok_or(PagoError::MontoNoPositivo)?;
        if let Some(saldo) = saldo {
            if monto > saldo {
                return Err(PagoError::SaldoExcedido { saldo });
            }
        }
        let tipo_cambio = match self.moneda {
            Moneda::Dolares => {
                Some(parse_positivo(&self.tipo_cambio).ok_or(PagoError::TipoCambioRequerido)?)
            }
            Moneda::Bolivianos => None,
        };
        let forma_pago_id = self.forma_pago_id.ok_or(PagoError::FormaPagoRequerida)?;
        Ok(NuevoPagoOrden {
            orden_trabajo_id: self.orden_trabajo_id,
            fecha: self.fecha.clone(),
            monto,
            moneda: self.moneda,
            tipo_cambio,
            nro_factura: campo_opcional(&self.nro_factura),
            nro_recibo: campo_opcional(&self.nro_recibo),
            forma_pago_id,
            observacion: self.observacion.trim().to_string(),
            usuario_id,
            comision_tarjeta_id: comision.map(|c| c.id),
            monto_comision: comision.map(|c| calc::comision_amount(monto, c.porcentaje)),
        })
    }
}

// ---------------------------------------------------------------------------
// Compras de insumos
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Default)]
pub struct CompraForm {
    pub fecha: String,
    pub descripcion: String,
    pub cantidad: String,
    pub precio_unitario: String,
    pub moneda: Moneda,
    pub nro_factura: String,
    pub nro_recibo: String,
    pub orden_trabajo: String,
    pub proveedor_id: Option<i64>,
    pub forma_pago_id: Option<i64>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum CompraError {
    FechaInvalida,
    ProveedorRequerido,
    FormaPagoRequerida,
    DescripcionRequerida,
    CantidadNoPositiva,
    PrecioNoPositivo,
    OrdenInvalida,
}

impl fmt::Display for CompraError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CompraError::FechaInvalida => write!(f, "Ingrese una fecha válida"),
            CompraError::ProveedorRequerido => write!(f, "Seleccione un proveedor"),
            CompraError::FormaPagoRequerida => write!(f, "Seleccione una forma de pago"),
            CompraError::DescripcionRequerida => write!(f, "La descripción es obligatoria"),
            CompraError::CantidadNoPositiva => write!(f, "La cantidad debe ser mayor a cero"),
            CompraError::PrecioNoPositivo => {
                write!(f, "El precio unitario debe ser mayor a cero")
            }
            CompraError::OrdenInvalida => {
                write!(f, "El número de orden de trabajo no es válido")
            }
        }
    }
}

impl std::error::Error for CompraError {}

impl CompraForm {
    pub fn from_compra(compra: &CompraInsumo) -> Self {
        Self {
            fecha: compra.fecha.clone(),
            descripcion: compra.descripcion.clone(),
            cantidad: compra.cantidad.to_string(),
            precio_unitario: format!("{:.2}", compra.precio_unitario),
            moneda: compra.moneda,
            nro_factura: compra.nro_factura.clone().unwrap_or_default(),
            nro_recibo: compra.nro_recibo.clone().unwrap_or_default(),
            orden_trabajo: compra
                .orden_trabajo_id
                .map(|id| id.to_string())
                .unwrap_or_default(),
            proveedor_id: Some(compra.proveedor_id),
            forma_pago_id: Some(compra.forma_pago_id),
        }
    }

    /// Display-only total estimate while the user types. Never sent.
    pub fn total_estimado(&self) -> Option<f64> {
        let cantidad = parse_positivo(&self.cantidad)?;
        let precio = parse_positivo(&self.precio_unitario)?;
        Some(calc::compra_total(cantidad, precio))
    }

    pub fn to_request(&self) -> Result<NuevaCompraInsumo, CompraError> {
        if !fecha_valida(&self.fecha) {
            return Err(CompraError::FechaInvalida);
        }
        let proveedor_id = self.proveedor_id.ok_or(CompraError::ProveedorRequerido)?;
        let forma_pago_id = self.forma_pago_id.ok_or(CompraError::FormaPagoRequerida)?;
        let descripcion = self.descripcion.trim();
        if descripcion.is_empty() {
            return Err(CompraError::DescripcionRequerida);
        }
        let cantidad = parse_positivo(&self.cantidad).ok_or(CompraError::CantidadNoPositiva)?;
        let precio_unitario =
            parse_positivo(&self.precio_unitario).ok_or(CompraError::PrecioNoPositivo)?;
        let orden_trabajo_id = match campo_opcional(&self.orden_trabajo) {
            Some(texto) => Some(texto.parse::<i64>().map_err(|_| CompraError::OrdenInvalida)?),
            None => None,
        };
        Ok(NuevaCompraInsumo {
            fecha: self.fecha.clone(),
            descripcion: descripcion.to_string(),
            cantidad,
            precio_unitario,
            moneda: self.moneda,
            nro_factura: campo_opcional(&self.nro_factura),
            nro_recibo: campo_opcional(&self.nro_recibo),
            orden_trabajo_id,
            proveedor_id,
            forma_pago_id,
        })
    }
}

// ---------------------------------------------------------------------------
// Comisiones y categorías
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Default)]
pub struct ComisionForm {
    pub banco: String,
    pub porcentaje: String,
    pub estado: crate::Estado,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ComisionError {
    BancoRequerido,
    PorcentajeInvalido,
}

impl fmt::Display for ComisionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ComisionError::BancoRequerido => write!(f, "El nombre del banco es obligatorio"),
            ComisionError::PorcentajeInvalido => {
                write!(f, "Ingrese un porcentaje mayor a cero")
            }
        }
    }
}

impl std::error::Error for ComisionError {}

impl ComisionForm {
    pub fn from_comision(comision: &ComisionTarjeta) -> Self {
        Self {
            banco: comision.banco.clone(),
            porcentaje: comision.porcentaje.to_string(),
            estado: comision.estado,
        }
    }

    pub fn to_request(&self) -> Result<NuevaComisionTarjeta, ComisionError> {
        let banco = self.banco.trim();
        if banco.is_empty() {
            return Err(ComisionError::BancoRequerido);
        }
        let porcentaje =
            parse_positivo(&self.porcentaje).ok_or(ComisionError::PorcentajeInvalido)?;
        Ok(NuevaComisionTarjeta {
            banco: banco.to_string(),
            porcentaje,
            estado: self.estado,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct CategoriaForm {
    pub nombre: String,
    pub estado: crate::Estado,
}

#[derive(Debug, Clone, PartialEq)]
pub enum CategoriaError {
    NombreRequerido,
}

impl fmt::Display for CategoriaError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CategoriaError::NombreRequerido => write!(f, "El nombre es obligatorio"),
        }
    }
}

impl std::error::Error for CategoriaError {}

impl CategoriaForm {
    pub fn from_categoria(categoria: &crate::CategoriaServicio) -> Self {
        Self {
            nombre: categoria.nombre.clone(),
            estado: categoria.estado,
        }
    }

    pub fn to_request(&self) -> Result<NuevaCategoriaServicio, CategoriaError> {
        let nombre = self.nombre.trim();
        if nombre.is_empty() {
            return Err(CategoriaError::NombreRequerido);
        }
        Ok(NuevaCategoriaServicio {
            nombre: nombre.to_string(),
            estado: self.estado,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Estado;

    fn orden_pendiente(saldo: f64, moneda: Moneda) -> OrdenConSaldo {
        OrdenConSaldo {
            orden_trabajo_id: 42,
            fecha_registro: "2025-02-01".to_string(),
            cliente: "Juan Pérez".to_string(),
            placa: "1234-ABC".to_string(),
            moneda,
            sub_total: saldo + 300.0,
            total_pagado: 300.0,
            saldo,
        }
    }

    fn comision_visa() -> ComisionTarjeta {
        ComisionTarjeta {
            id: 5,
            banco: "Visa".to_string(),
            porcentaje: 3.0,
            estado: Estado::Activo,
        }
    }

    #[test]
    fn egreso_construye_el_payload_exacto() {
        let form = EgresoForm {
            fecha: "2025-03-10".to_string(),
            destino: Destino::Taller,
            detalle: "compra de lijas".to_string(),
            monto: "150.50".to_string(),
            moneda: Moneda::Bolivianos,
            forma_pago_id: Some(2),
        };
        let req = form.to_request().unwrap();
        assert_eq!(
            req,
            NuevoEgreso {
                fecha: "2025-03-10".to_string(),
                destino: Destino::Taller,
                detalle: "compra de lijas".to_string(),
                monto: 150.50,
                moneda: Moneda::Bolivianos,
                forma_pago_id: 2,
            }
        );
    }

    #[test]
    fn egreso_requiere_cada_campo() {
        let valido = EgresoForm {
            fecha: "2025-03-10".to_string(),
            destino: Destino::Casa,
            detalle: "luz".to_string(),
            monto: "80".to_string(),
            moneda: Moneda::Bolivianos,
            forma_pago_id: Some(1),
        };

        let mut sin_fecha = valido.clone();
        sin_fecha.fecha = "10/03/2025".to_string();
        assert_eq!(sin_fecha.to_request(), Err(EgresoError::FechaInvalida));

        let mut sin_detalle = valido.clone();
        sin_detalle.detalle = "   ".to_string();
        assert_eq!(sin_detalle.to_request(), Err(EgresoError::DetalleRequerido));

        let mut monto_cero = valido.clone();
        monto_cero.monto = "0".to_string();
        assert_eq!(monto_cero.to_request(), Err(EgresoError::MontoNoPositivo));

        let mut sin_forma = valido;
        sin_forma.forma_pago_id = None;
        assert_eq!(sin_forma.to_request(), Err(EgresoError::FormaPagoRequerida));
    }

    #[test]
    fn pago_prefija_saldo_y_moneda_de_la_orden() {
        let orden = orden_pendiente(200.0, Moneda::Bolivianos);
        let form = PagoForm::para_orden(&orden, "2025-03-10".to_string());
        assert_eq!(form.monto, "200.00");
        assert_eq!(form.moneda, Moneda::Bolivianos);
        assert_eq!(form.orden_trabajo_id, 42);
    }

    #[test]
    fn pago_rechaza_monto_sobre_el_saldo() {
        let orden = orden_pendiente(200.0, Moneda::Bolivianos);
        let mut form = PagoForm::para_orden(&orden, "2025-03-10".to_string());
        form.forma_pago_id = Some(1);

        form.monto = "250".to_string();
        assert_eq!(
            form.to_request(Some(orden.saldo), None, None),
            Err(PagoError::SaldoExcedido { saldo: 200.0 })
        );

        form.monto = "200".to_string();
        let req = form.to_request(Some(orden.saldo), None, None).unwrap();
        assert_eq!(req.monto, 200.0);
        assert_eq!(req.orden_trabajo_id, 42);
    }

    #[test]
    fn editar_un_pago_omite_el_tope_de_saldo() {
        let pago = PagoOrden {
            id: 9,
            orden_trabajo_id: 42,
            fecha: "2025-03-01".to_string(),
            monto: 120.0,
            moneda: Moneda::Bolivianos,
            tipo_cambio: None,
            nro_factura: None,
            nro_recibo: None,
            forma_pago_id: 1,
            observacion: String::new(),
            usuario_id: Some(1),
            comision_tarjeta_id: None,
            monto_comision: None,
        };
        let mut form = PagoForm::from_pago(&pago);
        form.monto = "250".to_string();
        // Sin saldo no hay tope: la edición se acepta.
        let req = form.to_request(None, None, Some(1)).unwrap();
        assert_eq!(req.monto, 250.0);
    }

    #[test]
    fn pago_en_dolares_exige_tipo_de_cambio() {
        let orden = orden_pendiente(500.0, Moneda::Dolares);
        let mut form = PagoForm::para_orden(&orden, "2025-03-10".to_string());
        form.forma_pago_id = Some(1);
        form.monto = "100".to_string();

        assert_eq!(
            form.to_request(Some(orden.saldo), None, None),
            Err(PagoError::TipoCambioRequerido)
        );

        form.tipo_cambio = "6.96".to_string();
        let req = form.to_request(Some(orden.saldo), None, None).unwrap();
        assert_eq!(req.tipo_cambio, Some(6.96));
    }

    #[test]
    fn pago_con_tarjeta_envia_la_comision_calculada() {
        let orden = orden_pendiente(500.0, Moneda::Bolivianos);
        let mut form = PagoForm::para_orden(&orden, "2025-03-10".to_string());
        form.forma_pago_id = Some(3);
        form.monto = "100".to_string();
        form.comision_tarjeta_id = Some(5);

        let comision = comision_visa();
        let req = form
            .to_request(Some(orden.saldo), Some(&comision), Some(1))
            .unwrap();
        assert_eq!(req.monto_comision, Some(3.0));
        assert_eq!(req.comision_tarjeta_id, Some(5));
    }

    #[test]
    fn pago_sin_forma_de_pago_se_rechaza() {
        let orden = orden_pendiente(200.0, Moneda::Bolivianos);
        let form = PagoForm::para_orden(&orden, "2025-03-10".to_string());
        assert_eq!(
            form.to_request(Some(orden.saldo), None, None),
            Err(PagoError::FormaPagoRequerida)
        );
    }

    #[test]
    fn compra_valida_requeridos_y_positivos() {
        let valido = CompraForm {
            fecha: "2025-03-10".to_string(),
            descripcion: "aceite 10W40".to_string(),
            cantidad: "4".to_string(),
            precio_unitario: "35.50".to_string(),
            moneda: Moneda::Bolivianos,
            nro_factura: String::new(),
            nro_recibo: String::new(),
            orden_trabajo: "17".to_string(),
            proveedor_id: Some(2),
            forma_pago_id: Some(1),
        };

        let req = valido.to_request().unwrap();
        assert_eq!(req.cantidad, 4.0);
        assert_eq!(req.precio_unitario, 35.50);
        assert_eq!(req.orden_trabajo_id, Some(17));

        let mut sin_proveedor = valido.clone();
        sin_proveedor.proveedor_id = None;
        assert_eq!(
            sin_proveedor.to_request(),
            Err(CompraError::ProveedorRequerido)
        );

        let mut cantidad_cero = valido.clone();
        cantidad_cero.cantidad = "0".to_string();
        assert_eq!(
            cantidad_cero.to_request(),
            Err(CompraError::CantidadNoPositiva)
        );

        let mut precio_negativo = valido.clone();
        precio_negativo.precio_unitario = "-1".to_string();
        assert_eq!(
            precio_negativo.to_request(),
            Err(CompraError::PrecioNoPositivo)
        );

        let mut orden_mala = valido;
        orden_mala.orden_trabajo = "abc".to_string();
        assert_eq!(orden_mala.to_request(), Err(CompraError::OrdenInvalida));
    }

    #[test]
    fn compra_estima_el_total_solo_para_mostrar() {
        let mut form = CompraForm::default();
        form.cantidad = "4".to_string();
        form.precio_unitario = "25.50".to_string();
        assert_eq!(form.total_estimado(), Some(102.0));

        form.cantidad = "x".to_string();
        assert_eq!(form.total_estimado(), None);
    }

    #[test]
    fn comision_y_categoria_solo_exigen_presencia() {
        let comision = ComisionForm {
            banco: "  ".to_string(),
            porcentaje: "3".to_string(),
            estado: Estado::Activo,
        };
        assert_eq!(comision.to_request(), Err(ComisionError::BancoRequerido));

        let categoria = CategoriaForm {
            nombre: "Mecánica general".to_string(),
            estado: Estado::Activo,
        };
        let req = categoria.to_request().unwrap();
        assert_eq!(req.nombre, "Mecánica general");
    }
}
