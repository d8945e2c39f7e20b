//! Pure money arithmetic shared by the form screens.
//!
//! Every derived figure the UI shows before a submit (card commission,
//! purchase total estimate, remaining balance, per-currency sums) lives
//! here instead of inline in change handlers, so it can be tested without
//! a browser.

use crate::{CompraInsumo, Moneda};

/// Round to the two-decimal display convention used for every amount.
pub fn round2(x: f64) -> f64 {
    (x * 100.0).round() / 100.0
}

/// Commission charged by a card network: `monto × porcentaje / 100`,
/// rounded to two decimals.
pub fn comision_amount(monto: f64, porcentaje: f64) -> f64 {
    round2(monto * porcentaje / 100.0)
}

/// Local estimate of a purchase total (quantity × unit price). The backend
/// owns the persisted figure; this one is display-only.
pub fn compra_total(cantidad: f64, precio_unitario: f64) -> f64 {
    round2(cantidad * precio_unitario)
}

/// Remaining balance on a work order.
pub fn saldo_restante(sub_total: f64, total_pagado: f64) -> f64 {
    round2(sub_total - total_pagado)
}

/// True when a payment method name refers to a card, which is what enables
/// the commission selector on the payment form.
pub fn es_forma_pago_tarjeta(nombre: &str) -> bool {
    nombre.to_lowercase().contains("tarjeta")
}

/// Per-currency sums over a set of purchases (the client-filtered list on
/// the supply-purchase screen). Currencies appear in first-seen order.
pub fn totales_por_moneda<'a, I>(compras: I) -> Vec<(Moneda, f64)>
where
    I: IntoIterator<Item = &'a CompraInsumo>,
{
    let mut totales: Vec<(Moneda, f64)> = Vec::new();
    for compra in compras {
        match totales.iter_mut().find(|(m, _)| *m == compra.moneda) {
            Some((_, total)) => *total += compra.total,
            None => totales.push((compra.moneda, compra.total)),
        }
    }
    for (_, total) in totales.iter_mut() {
        *total = round2(*total);
    }
    totales
}

#[cfg(test)]
mod tests {
    use super::*;

    fn compra(moneda: Moneda, total: f64) -> CompraInsumo {
        CompraInsumo {
            id: 0,
            fecha: "2025-01-15".to_string(),
            descripcion: "filtro de aceite".to_string(),
            cantidad: 1.0,
            precio_unitario: total,
            total,
            moneda,
            nro_factura: None,
            nro_recibo: None,
            orden_trabajo_id: None,
            proveedor_id: 1,
            forma_pago_id: 1,
        }
    }

    #[test]
    fn comision_del_tres_por_ciento() {
        // 100 al 3% son exactamente 3.00
        assert_eq!(comision_amount(100.0, 3.0), 3.0);
        assert_eq!(round2(100.0 + comision_amount(100.0, 3.0)), 103.0);
    }

    #[test]
    fn comision_redondea_a_dos_decimales() {
        // 150.50 al 2.85% = 4.28925 -> 4.29
        assert_eq!(comision_amount(150.50, 2.85), 4.29);
        // 33.33 al 3% = 0.9999 -> 1.00
        assert_eq!(comision_amount(33.33, 3.0), 1.0);
    }

    #[test]
    fn total_de_compra_es_cantidad_por_precio() {
        assert_eq!(compra_total(4.0, 25.5), 102.0);
        assert_eq!(compra_total(3.0, 0.333), 1.0);
    }

    #[test]
    fn saldo_es_subtotal_menos_pagado() {
        assert_eq!(saldo_restante(500.0, 300.0), 200.0);
        assert_eq!(saldo_restante(100.0, 100.0), 0.0);
    }

    #[test]
    fn detecta_formas_de_pago_con_tarjeta() {
        assert!(es_forma_pago_tarjeta("Tarjeta Visa"));
        assert!(es_forma_pago_tarjeta("TARJETA de débito"));
        assert!(!es_forma_pago_tarjeta("Efectivo"));
        assert!(!es_forma_pago_tarjeta("Transferencia"));
    }

    #[test]
    fn totales_agrupados_por_moneda() {
        let compras = vec![
            compra(Moneda::Bolivianos, 100.0),
            compra(Moneda::Dolares, 15.5),
            compra(Moneda::Bolivianos, 50.25),
        ];
        let totales = totales_por_moneda(&compras);
        assert_eq!(
            totales,
            vec![(Moneda::Bolivianos, 150.25), (Moneda::Dolares, 15.5)]
        );
    }

    #[test]
    fn totales_de_lista_vacia() {
        assert!(totales_por_moneda(&[]).is_empty());
    }
}
