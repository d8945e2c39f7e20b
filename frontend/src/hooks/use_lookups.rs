use shared::{ComisionTarjeta, FormaPago, Proveedor};
use wasm_bindgen_futures::spawn_local;
use yew::prelude::*;

use crate::services::api::ApiClient;
use crate::services::logging::Logger;

/// Reference lists the form screens depend on: payment methods, card
/// commissions and suppliers. Loaded once per screen mount; a failed
/// lookup logs and leaves its list empty rather than blocking the screen.
#[derive(Clone, PartialEq, Default)]
pub struct Lookups {
    pub formas_pago: Vec<FormaPago>,
    pub comisiones: Vec<ComisionTarjeta>,
    pub proveedores: Vec<Proveedor>,
    pub cargado: bool,
}

impl Lookups {
    /// Selection lists only offer active payment methods.
    pub fn formas_pago_activas(&self) -> Vec<&FormaPago> {
        self.formas_pago
            .iter()
            .filter(|fp| fp.estado.es_activo())
            .collect()
    }

    pub fn comisiones_activas(&self) -> Vec<&ComisionTarjeta> {
        self.comisiones
            .iter()
            .filter(|c| c.estado.es_activo())
            .collect()
    }

    pub fn forma_pago(&self, id: i64) -> Option<&FormaPago> {
        self.formas_pago.iter().find(|fp| fp.id == id)
    }

    pub fn nombre_forma_pago(&self, id: i64) -> String {
        self.forma_pago(id)
            .map(|fp| fp.nombre.clone())
            .unwrap_or_else(|| format!("#{}", id))
    }

    pub fn comision(&self, id: i64) -> Option<&ComisionTarjeta> {
        self.comisiones.iter().find(|c| c.id == id)
    }

    pub fn nombre_proveedor(&self, id: i64) -> String {
        self.proveedores
            .iter()
            .find(|p| p.id == id)
            .map(|p| p.nombre.clone())
            .unwrap_or_else(|| format!("#{}", id))
    }
}

#[hook]
pub fn use_lookups(api: &ApiClient) -> UseStateHandle<Lookups> {
    let lookups = use_state(Lookups::default);

    {
        let api = api.clone();
        let lookups = lookups.clone();
        use_effect_with((), move |_| {
            spawn_local(async move {
                let formas_pago = match api.listar_formas_pago().await {
                    Ok(lista) => lista,
                    Err(e) => {
                        Logger::error("lookups", &format!("formas de pago: {}", e));
                        Vec::new()
                    }
                };
                let comisiones = match api.listar_comisiones().await {
                    Ok(lista) => lista,
                    Err(e) => {
                        Logger::error("lookups", &format!("comisiones: {}", e));
                        Vec::new()
                    }
                };
                let proveedores = match api.listar_proveedores().await {
                    Ok(lista) => lista,
                    Err(e) => {
                        Logger::error("lookups", &format!("proveedores: {}", e));
                        Vec::new()
                    }
                };
                lookups.set(Lookups {
                    formas_pago,
                    comisiones,
                    proveedores,
                    cargado: true,
                });
            });
            || ()
        });
    }

    lookups
}
