//! Export conveniences for the expense list: CSV over the currently loaded
//! page and a print trigger. The CSV text is built as a pure string so it
//! can be tested on the host; only the download itself touches the DOM.

use shared::{Egreso, FormaPago};
use wasm_bindgen::JsCast;

/// Quote a CSV field when it carries a separator, a quote or a newline.
fn campo_csv(valor: &str) -> String {
    if valor.contains([',', '"', '\n']) {
        format!("\"{}\"", valor.replace('"', "\"\""))
    } else {
        valor.to_string()
    }
}

fn nombre_forma_pago(formas_pago: &[FormaPago], id: i64) -> String {
    formas_pago
        .iter()
        .find(|fp| fp.id == id)
        .map(|fp| fp.nombre.clone())
        .unwrap_or_else(|| format!("#{}", id))
}

/// CSV rendering of the loaded expense page, one row per expense.
pub fn csv_egresos(egresos: &[Egreso], formas_pago: &[FormaPago]) -> String {
    let mut salida = String::from("Fecha,Destino,Detalle,Monto,Moneda,Forma de pago\n");
    for egreso in egresos {
        salida.push_str(&format!(
            "{},{},{},{:.2},{},{}\n",
            egreso.fecha,
            egreso.destino,
            campo_csv(&egreso.detalle),
            egreso.monto,
            egreso.moneda,
            campo_csv(&nombre_forma_pago(formas_pago, egreso.forma_pago_id)),
        ));
    }
    salida
}

/// Offer `contenido` as a file download through a temporary object URL.
pub fn descargar_csv(nombre_archivo: &str, contenido: &str) -> Result<(), String> {
    let props = web_sys::BlobPropertyBag::new();
    props.set_type("text/csv;charset=utf-8");

    let partes = js_sys::Array::new();
    partes.push(&wasm_bindgen::JsValue::from_str(contenido));
    let blob = web_sys::Blob::new_with_str_sequence_and_options(&partes, &props)
        .map_err(|_| "No se pudo preparar el archivo".to_string())?;
    let url = web_sys::Url::create_object_url_with_blob(&blob)
        .map_err(|_| "No se pudo preparar el archivo".to_string())?;

    let document = web_sys::window()
        .and_then(|w| w.document())
        .ok_or_else(|| "No hay documento disponible".to_string())?;
    let enlace: web_sys::HtmlAnchorElement = document
        .create_element("a")
        .map_err(|_| "No se pudo crear el enlace de descarga".to_string())?
        .dyn_into()
        .map_err(|_| "No se pudo crear el enlace de descarga".to_string())?;
    enlace.set_href(&url);
    enlace.set_download(nombre_archivo);
    enlace.click();

    let _ = web_sys::Url::revoke_object_url(&url);
    Ok(())
}

/// Open the browser print dialog over the current view.
pub fn imprimir() {
    if let Some(ventana) = web_sys::window() {
        let _ = ventana.print();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::{Destino, Estado, Moneda};

    fn formas() -> Vec<FormaPago> {
        vec![
            FormaPago {
                id: 1,
                nombre: "Efectivo".to_string(),
                estado: Estado::Activo,
            },
            FormaPago {
                id: 2,
                nombre: "Tarjeta Visa".to_string(),
                estado: Estado::Activo,
            },
        ]
    }

    #[test]
    fn csv_con_cabecera_y_una_fila_por_egreso() {
        let egresos = vec![Egreso {
            id: 1,
            fecha: "2025-03-10".to_string(),
            destino: Destino::Taller,
            detalle: "compra de lijas".to_string(),
            monto: 150.5,
            moneda: Moneda::Bolivianos,
            forma_pago_id: 1,
        }];
        let csv = csv_egresos(&egresos, &formas());
        let lineas: Vec<&str> = csv.lines().collect();
        assert_eq!(lineas.len(), 2);
        assert_eq!(lineas[0], "Fecha,Destino,Detalle,Monto,Moneda,Forma de pago");
        assert_eq!(
            lineas[1],
            "2025-03-10,Taller,compra de lijas,150.50,Bolivianos,Efectivo"
        );
    }

    #[test]
    fn csv_escapa_comas_y_comillas() {
        let egresos = vec![Egreso {
            id: 2,
            fecha: "2025-03-11".to_string(),
            destino: Destino::Casa,
            detalle: "repuestos, \"varios\"".to_string(),
            monto: 80.0,
            moneda: Moneda::Dolares,
            forma_pago_id: 2,
        }];
        let csv = csv_egresos(&egresos, &formas());
        assert!(csv.contains("\"repuestos, \"\"varios\"\"\""));
        assert!(csv.contains("Dólares"));
    }

    #[test]
    fn forma_de_pago_desconocida_se_muestra_por_id() {
        let egresos = vec![Egreso {
            id: 3,
            fecha: "2025-03-12".to_string(),
            destino: Destino::Taller,
            detalle: "soldadura".to_string(),
            monto: 20.0,
            moneda: Moneda::Bolivianos,
            forma_pago_id: 99,
        }];
        let csv = csv_egresos(&egresos, &formas());
        assert!(csv.contains("#99"));
    }

    #[test]
    fn pagina_vacia_produce_solo_la_cabecera() {
        let csv = csv_egresos(&[], &formas());
        assert_eq!(csv.lines().count(), 1);
    }
}
