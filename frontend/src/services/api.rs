use gloo::net::http::{Request, Response};
use serde::de::DeserializeOwned;
use serde::Serialize;
use shared::{
    CategoriaServicio, ComisionTarjeta, CompraInsumo, Egreso, EgresoListRequest,
    EgresoListResponse, FormaPago, NuevaCategoriaServicio, NuevaComisionTarjeta,
    NuevaCompraInsumo, NuevoEgreso, NuevoPagoOrden, OrdenConSaldo, PagoOrden, Proveedor,
};

/// HTTP client for the taller backend. Every method returns the decoded
/// body on success or a user-facing message on failure: the server's own
/// error text when it rejected the request, a generic network message
/// otherwise.
#[derive(Clone, PartialEq)]
pub struct ApiClient {
    base_url: String,
}

impl ApiClient {
    pub fn new() -> Self {
        Self {
            base_url: "http://localhost:3000/api".to_string(),
        }
    }

    pub fn with_base_url(base_url: String) -> Self {
        Self { base_url }
    }

    async fn leer<T: DeserializeOwned>(response: Response) -> Result<T, String> {
        if response.ok() {
            response
                .json::<T>()
                .await
                .map_err(|e| format!("Respuesta inválida del servidor: {}", e))
        } else {
            Err(response
                .text()
                .await
                .unwrap_or_else(|_| "Error desconocido".to_string()))
        }
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, String> {
        let response = Request::get(&format!("{}{}", self.base_url, path))
            .send()
            .await
            .map_err(|e| format!("Error de red: {}", e))?;
        Self::leer(response).await
    }

    async fn post_json<B: Serialize, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, String> {
        let response = Request::post(&format!("{}{}", self.base_url, path))
            .json(body)
            .map_err(|e| format!("No se pudo serializar la petición: {}", e))?
            .send()
            .await
            .map_err(|e| format!("Error de red: {}", e))?;
        Self::leer(response).await
    }

    async fn put_json<B: Serialize, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, String> {
        let response = Request::put(&format!("{}{}", self.base_url, path))
            .json(body)
            .map_err(|e| format!("No se pudo serializar la petición: {}", e))?
            .send()
            .await
            .map_err(|e| format!("Error de red: {}", e))?;
        Self::leer(response).await
    }

    async fn delete(&self, path: &str) -> Result<(), String> {
        let response = Request::delete(&format!("{}{}", self.base_url, path))
            .send()
            .await
            .map_err(|e| format!("Error de red: {}", e))?;
        if response.ok() {
            Ok(())
        } else {
            Err(response
                .text()
                .await
                .unwrap_or_else(|_| "Error desconocido".to_string()))
        }
    }

    // ----- Egresos ---------------------------------------------------------

    pub async fn listar_egresos(
        &self,
        req: &EgresoListRequest,
    ) -> Result<EgresoListResponse, String> {
        let mut path = format!("/egresos?page={}&limit={}", req.page, req.limit);
        if let Some(desde) = &req.start_date {
            path.push_str(&format!("&startDate={}", desde));
        }
        if let Some(hasta) = &req.end_date {
            path.push_str(&format!("&endDate={}", hasta));
        }
        if let Some(busqueda) = &req.search {
            let codificada: String = js_sys::encode_uri_component(busqueda).into();
            path.push_str(&format!("&search={}", codificada));
        }
        self.get_json(&path).await
    }

    pub async fn crear_egreso(&self, egreso: &NuevoEgreso) -> Result<Egreso, String> {
        self.post_json("/egresos", egreso).await
    }

    pub async fn actualizar_egreso(
        &self,
        id: i64,
        egreso: &NuevoEgreso,
    ) -> Result<Egreso, String> {
        self.put_json(&format!("/egresos/{}", id), egreso).await
    }

    pub async fn eliminar_egreso(&self, id: i64) -> Result<(), String> {
        self.delete(&format!("/egresos/{}", id)).await
    }

    // ----- Lookups ---------------------------------------------------------

    pub async fn listar_formas_pago(&self) -> Result<Vec<FormaPago>, String> {
        self.get_json("/forma-pago").await
    }

    pub async fn listar_proveedores(&self) -> Result<Vec<Proveedor>, String> {
        self.get_json("/proveedores").await
    }

    // ----- Comisiones de tarjeta -------------------------------------------

    pub async fn listar_comisiones(&self) -> Result<Vec<ComisionTarjeta>, String> {
        self.get_json("/comision-tarjeta").await
    }

    pub async fn crear_comision(
        &self,
        comision: &NuevaComisionTarjeta,
    ) -> Result<ComisionTarjeta, String> {
        self.post_json("/comision-tarjeta", comision).await
    }

    pub async fn actualizar_comision(
        &self,
        id: i64,
        comision: &NuevaComisionTarjeta,
    ) -> Result<ComisionTarjeta, String> {
        self.put_json(&format!("/comision-tarjeta/{}", id), comision)
            .await
    }

    pub async fn eliminar_comision(&self, id: i64) -> Result<(), String> {
        self.delete(&format!("/comision-tarjeta/{}", id)).await
    }

    // ----- Categorías de servicio ------------------------------------------

    pub async fn listar_categorias(&self) -> Result<Vec<CategoriaServicio>, String> {
        self.get_json("/categoria-servicio").await
    }

    pub async fn crear_categoria(
        &self,
        categoria: &NuevaCategoriaServicio,
    ) -> Result<CategoriaServicio, String> {
        self.post_json("/categoria-servicio", categoria).await
    }

    pub async fn actualizar_categoria(
        &self,
        id: i64,
        categoria: &NuevaCategoriaServicio,
    ) -> Result<CategoriaServicio, String> {
        self.put_json(&format!("/categoria-servicio/{}", id), categoria)
            .await
    }

    pub async fn eliminar_categoria(&self, id: i64) -> Result<(), String> {
        self.delete(&format!("/categoria-servicio/{}", id)).await
    }

    // ----- Compras de insumos ----------------------------------------------

    pub async fn listar_compras(&self) -> Result<Vec<CompraInsumo>, String> {
        self.get_json("/compra-insumos").await
    }

    pub async fn crear_compra(
        &self,
        compra: &NuevaCompraInsumo,
    ) -> Result<CompraInsumo, String> {
        self.post_json("/compra-insumos", compra).await
    }

    pub async fn actualizar_compra(
        &self,
        id: i64,
        compra: &NuevaCompraInsumo,
    ) -> Result<CompraInsumo, String> {
        self.put_json(&format!("/compra-insumos/{}", id), compra).await
    }

    pub async fn eliminar_compra(&self, id: i64) -> Result<(), String> {
        self.delete(&format!("/compra-insumos/{}", id)).await
    }

    // ----- Pagos de orden --------------------------------------------------

    pub async fn listar_pagos(&self) -> Result<Vec<PagoOrden>, String> {
        self.get_json("/pago-orden").await
    }

    pub async fn listar_ordenes_con_saldo(&self) -> Result<Vec<OrdenConSaldo>, String> {
        self.get_json("/pago-orden/ordenes-con-saldo").await
    }

    pub async fn crear_pago(&self, pago: &NuevoPagoOrden) -> Result<PagoOrden, String> {
        self.post_json("/pago-orden", pago).await
    }

    pub async fn actualizar_pago(
        &self,
        id: i64,
        pago: &NuevoPagoOrden,
    ) -> Result<PagoOrden, String> {
        self.put_json(&format!("/pago-orden/{}", id), pago).await
    }

    pub async fn eliminar_pago(&self, id: i64) -> Result<(), String> {
        self.delete(&format!("/pago-orden/{}", id)).await
    }
}

impl Default for ApiClient {
    fn default() -> Self {
        Self::new()
    }
}
