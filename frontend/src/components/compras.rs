use shared::validacion::CompraForm;
use shared::{calc, CompraInsumo, Moneda};
use wasm_bindgen_futures::spawn_local;
use web_sys::{HtmlInputElement, HtmlSelectElement};
use yew::prelude::*;

use crate::components::calendar_picker::CalendarPicker;
use crate::components::confirm_dialog::{ConfirmDialog, EliminacionPendiente};
use crate::hooks::use_lookups::use_lookups;
use crate::services::api::ApiClient;
use crate::services::date_utils;
use crate::services::logging::Logger;
use crate::services::request_seq::RequestSeq;

#[derive(Properties, PartialEq)]
pub struct ComprasScreenProps {
    pub api: ApiClient,
}

/// Supply purchases: the entry form on the left stays visible while the
/// list on the right shows every purchase, filterable on the client by
/// description or supplier name.
#[function_component(ComprasScreen)]
pub fn compras_screen(props: &ComprasScreenProps) -> Html {
    let lookups = use_lookups(&props.api);

    let compras = use_state(Vec::<CompraInsumo>::new);
    let cargando = use_state(|| true);
    let error = use_state(|| Option::<String>::None);
    let filtro = use_state(String::new);
    let recarga = use_state(|| 0u32);
    let seq = use_mut_ref(RequestSeq::new);

    let form = use_state(|| CompraForm {
        fecha: date_utils::hoy(),
        ..CompraForm::default()
    });
    let editando = use_state(|| Option::<i64>::None);
    let guardando = use_state(|| false);
    let form_error = use_state(|| Option::<String>::None);

    let eliminar = use_state(EliminacionPendiente::default);

    {
        let api = props.api.clone();
        let compras = compras.clone();
        let cargando = cargando.clone();
        let error = error.clone();
        let seq = seq.clone();
        use_effect_with(*recarga, move |_| {
            let token = seq.borrow().siguiente();
            cargando.set(true);
            spawn_local(async move {
                match api.listar_compras().await {
                    Ok(lista) => {
                        if seq.borrow().es_actual(token) {
                            compras.set(lista);
                            error.set(None);
                            cargando.set(false);
                        }
                    }
                    Err(mensaje) => {
                        if seq.borrow().es_actual(token) {
                            Logger::error("compras", &mensaje);
                            error.set(Some(mensaje));
                            cargando.set(false);
                        }
                    }
                }
            });
            || ()
        });
    }

    // Filtro local sobre la página ya cargada.
    let aguja = filtro.trim().to_lowercase();
    let filtradas: Vec<CompraInsumo> = compras
        .iter()
        .filter(|compra| {
            if aguja.is_empty() {
                return true;
            }
            compra.descripcion.to_lowercase().contains(&aguja)
                || lookups
                    .nombre_proveedor(compra.proveedor_id)
                    .to_lowercase()
                    .contains(&aguja)
        })
        .cloned()
        .collect();
    let totales = calc::totales_por_moneda(&filtradas);

    // --- formulario --------------------------------------------------------

    let set_form = {
        let form = form.clone();
        Callback::from(move |nuevo: CompraForm| form.set(nuevo))
    };

    let limpiar_form = {
        let form = form.clone();
        let editando = editando.clone();
        let form_error = form_error.clone();
        Callback::from(move |_: MouseEvent| {
            form.set(CompraForm {
                fecha: date_utils::hoy(),
                ..CompraForm::default()
            });
            editando.set(None);
            form_error.set(None);
        })
    };

    let editar = {
        let form = form.clone();
        let editando = editando.clone();
        let form_error = form_error.clone();
        Callback::from(move |compra: CompraInsumo| {
            form.set(CompraForm::from_compra(&compra));
            editando.set(Some(compra.id));
            form_error.set(None);
        })
    };

    let guardar = {
        let api = props.api.clone();
        let form = form.clone();
        let editando = editando.clone();
        let guardando = guardando.clone();
        let form_error = form_error.clone();
        let recarga = recarga.clone();
        let valor_recarga = *recarga;
        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();
            let peticion = match form.to_request() {
                Ok(peticion) => peticion,
                Err(motivo) => {
                    form_error.set(Some(motivo.to_string()));
                    return;
                }
            };
            let api = api.clone();
            let form = form.clone();
            let editando = editando.clone();
            let guardando = guardando.clone();
            let form_error = form_error.clone();
            let recarga = recarga.clone();
            let id_editando = *editando;
            spawn_local(async move {
                guardando.set(true);
                let resultado = match id_editando {
                    Some(id) => api.actualizar_compra(id, &peticion).await.map(|_| ()),
                    None => api.crear_compra(&peticion).await.map(|_| ()),
                };
                match resultado {
                    Ok(()) => {
                        form.set(CompraForm {
                            fecha: date_utils::hoy(),
                            ..CompraForm::default()
                        });
                        editando.set(None);
                        form_error.set(None);
                        recarga.set(valor_recarga + 1);
                    }
                    Err(mensaje) => form_error.set(Some(mensaje)),
                }
                guardando.set(false);
            });
        })
    };

    // --- eliminación -------------------------------------------------------

    let pedir_eliminar = {
        let eliminar = eliminar.clone();
        Callback::from(move |id: i64| {
            let mut pendiente = *eliminar;
            pendiente.pedir(id);
            eliminar.set(pendiente);
        })
    };
    let cancelar_eliminar = {
        let eliminar = eliminar.clone();
        Callback::from(move |_| {
            let mut pendiente = *eliminar;
            pendiente.cancelar();
            eliminar.set(pendiente);
        })
    };
    let confirmar_eliminar = {
        let api = props.api.clone();
        let eliminar = eliminar.clone();
        let error = error.clone();
        let recarga = recarga.clone();
        let valor_recarga = *recarga;
        Callback::from(move |_| {
            let mut pendiente = *eliminar;
            let Some(id) = pendiente.confirmar() else { return };
            eliminar.set(pendiente);
            let api = api.clone();
            let error = error.clone();
            let recarga = recarga.clone();
            spawn_local(async move {
                match api.eliminar_compra(id).await {
                    Ok(()) => recarga.set(valor_recarga + 1),
                    Err(mensaje) => {
                        Logger::error("compras", &mensaje);
                        error.set(Some(mensaje));
                    }
                }
            });
        })
    };

    let al_filtrar = {
        let filtro = filtro.clone();
        Callback::from(move |e: InputEvent| {
            let input: HtmlInputElement = e.target_unchecked_into();
            filtro.set(input.value());
        })
    };

    // --- campos del formulario ---------------------------------------------

    let actual = (*form).clone();
    let total_estimado = actual.total_estimado();

    let al_elegir_fecha = {
        let set_form = set_form.clone();
        let actual = actual.clone();
        Callback::from(move |fecha: String| {
            let mut nuevo = actual.clone();
            nuevo.fecha = fecha;
            set_form.emit(nuevo);
        })
    };
    let campo_texto = |aplicar: fn(&mut CompraForm, String)| {
        let set_form = set_form.clone();
        let actual = actual.clone();
        Callback::from(move |e: Event| {
            let input: HtmlInputElement = e.target_unchecked_into();
            let mut nuevo = actual.clone();
            aplicar(&mut nuevo, input.value());
            set_form.emit(nuevo);
        })
    };
    let al_cambiar_descripcion = campo_texto(|f, v| f.descripcion = v);
    let al_cambiar_cantidad = campo_texto(|f, v| f.cantidad = v);
    let al_cambiar_precio = campo_texto(|f, v| f.precio_unitario = v);
    let al_cambiar_factura = campo_texto(|f, v| f.nro_factura = v);
    let al_cambiar_recibo = campo_texto(|f, v| f.nro_recibo = v);
    let al_cambiar_orden = campo_texto(|f, v| f.orden_trabajo = v);

    let al_cambiar_moneda = {
        let set_form = set_form.clone();
        let actual = actual.clone();
        Callback::from(move |e: Event| {
            let select: HtmlSelectElement = e.target_unchecked_into();
            let mut nuevo = actual.clone();
            nuevo.moneda = if select.value() == "Dólares" {
                Moneda::Dolares
            } else {
                Moneda::Bolivianos
            };
            set_form.emit(nuevo);
        })
    };
    let al_cambiar_proveedor = {
        let set_form = set_form.clone();
        let actual = actual.clone();
        Callback::from(move |e: Event| {
            let select: HtmlSelectElement = e.target_unchecked_into();
            let mut nuevo = actual.clone();
            nuevo.proveedor_id = select.value().parse::<i64>().ok();
            set_form.emit(nuevo);
        })
    };
    let al_cambiar_forma_pago = {
        let set_form = set_form.clone();
        let actual = actual.clone();
        Callback::from(move |e: Event| {
            let select: HtmlSelectElement = e.target_unchecked_into();
            let mut nuevo = actual.clone();
            nuevo.forma_pago_id = select.value().parse::<i64>().ok();
            set_form.emit(nuevo);
        })
    };

    html! {
        <section class="pantalla compras">
            <div class="pantalla-cabecera">
                <h2>{"Compra de insumos"}</h2>
            </div>

            <div class="panel-dividido">
                <div class="panel-formulario">
                    <h3>{if editando.is_some() { "Editar compra" } else { "Nueva compra" }}</h3>

                    {if let Some(mensaje) = (*form_error).as_ref() {
                        html! { <div class="mensaje error">{mensaje}</div> }
                    } else { html! {} }}

                    <form onsubmit={guardar}>
                        <div class="campo">
                            <CalendarPicker
                                selected={Some(actual.fecha.clone())}
                                on_select={al_elegir_fecha}
                                label={Some("Fecha".to_string())}
                                disabled={*guardando}
                            />
                        </div>

                        <div class="campo">
                            <label>{"Proveedor"}</label>
                            <select onchange={al_cambiar_proveedor} disabled={*guardando}>
                                <option value="" selected={actual.proveedor_id.is_none()}>{"-- Seleccione --"}</option>
                                {for lookups.proveedores.iter().map(|p| html! {
                                    <option
                                        value={p.id.to_string()}
                                        selected={actual.proveedor_id == Some(p.id)}
                                    >
                                        {&p.nombre}
                                    </option>
                                })}
                            </select>
                        </div>

                        <div class="campo">
                            <label>{"Descripción"}</label>
                            <input
                                type="text"
                                value={actual.descripcion.clone()}
                                onchange={al_cambiar_descripcion}
                                disabled={*guardando}
                            />
                        </div>

                        <div class="campo-doble">
                            <div class="campo">
                                <label>{"Cantidad"}</label>
                                <input
                                    type="number"
                                    step="0.01"
                                    min="0.01"
                                    value={actual.cantidad.clone()}
                                    onchange={al_cambiar_cantidad}
                                    disabled={*guardando}
                                />
                            </div>
                            <div class="campo">
                                <label>{"Precio unitario"}</label>
                                <input
                                    type="number"
                                    step="0.01"
                                    min="0.01"
                                    value={actual.precio_unitario.clone()}
                                    onchange={al_cambiar_precio}
                                    disabled={*guardando}
                                />
                            </div>
                        </div>

                        {if let Some(total) = total_estimado {
                            html! {
                                <p class="total-estimado">
                                    {format!("Total estimado: {} {:.2}", actual.moneda.simbolo(), total)}
                                </p>
                            }
                        } else { html! {} }}

                        <div class="campo">
                            <label>{"Moneda"}</label>
                            <select onchange={al_cambiar_moneda} disabled={*guardando}>
                                <option value="Bolivianos" selected={actual.moneda == Moneda::Bolivianos}>{"Bolivianos"}</option>
                                <option value="Dólares" selected={actual.moneda == Moneda::Dolares}>{"Dólares"}</option>
                            </select>
                        </div>

                        <div class="campo">
                            <label>{"Forma de pago"}</label>
                            <select onchange={al_cambiar_forma_pago} disabled={*guardando}>
                                <option value="" selected={actual.forma_pago_id.is_none()}>{"-- Seleccione --"}</option>
                                {for lookups.formas_pago_activas().iter().map(|fp| html! {
                                    <option
                                        value={fp.id.to_string()}
                                        selected={actual.forma_pago_id == Some(fp.id)}
                                    >
                                        {&fp.nombre}
                                    </option>
                                })}
                            </select>
                        </div>

                        <div class="campo-doble">
                            <div class="campo">
                                <label>{"Nro. factura"}</label>
                                <input
                                    type="text"
                                    value={actual.nro_factura.clone()}
                                    onchange={al_cambiar_factura}
                                    disabled={*guardando}
                                />
                            </div>
                            <div class="campo">
                                <label>{"Nro. recibo"}</label>
                                <input
                                    type="text"
                                    value={actual.nro_recibo.clone()}
                                    onchange={al_cambiar_recibo}
                                    disabled={*guardando}
                                />
                            </div>
                        </div>

                        <div class="campo">
                            <label>{"Orden de trabajo (opcional)"}</label>
                            <input
                                type="text"
                                placeholder="Número de orden"
                                value={actual.orden_trabajo.clone()}
                                onchange={al_cambiar_orden}
                                disabled={*guardando}
                            />
                        </div>

                        <div class="modal-acciones">
                            <button type="submit" class="boton primario" disabled={*guardando}>
                                {if *guardando {
                                    "Guardando..."
                                } else if editando.is_some() {
                                    "Actualizar"
                                } else {
                                    "Registrar compra"
                                }}
                            </button>
                            {if editando.is_some() {
                                html! {
                                    <button
                                        type="button"
                                        class="boton secundario"
                                        onclick={limpiar_form}
                                        disabled={*guardando}
                                    >
                                        {"Cancelar edición"}
                                    </button>
                                }
                            } else { html! {} }}
                        </div>
                    </form>
                </div>

                <div class="panel-lista">
                    <div class="filtros">
                        <input
                            type="text"
                            placeholder="Filtrar por descripción o proveedor"
                            value={(*filtro).clone()}
                            oninput={al_filtrar}
                        />
                    </div>

                    {if let Some(mensaje) = (*error).as_ref() {
                        html! { <div class="mensaje error">{mensaje}</div> }
                    } else { html! {} }}

                    <table class="tabla">
                        <thead>
                            <tr>
                                <th>{"Fecha"}</th>
                                <th>{"Descripción"}</th>
                                <th>{"Proveedor"}</th>
                                <th>{"Cant."}</th>
                                <th>{"P. unitario"}</th>
                                <th>{"Total"}</th>
                                <th>{"Moneda"}</th>
                                <th>{"Acciones"}</th>
                            </tr>
                        </thead>
                        <tbody>
                            {if *cargando {
                                html! { <tr><td colspan="8" class="cargando">{"Cargando compras..."}</td></tr> }
                            } else if filtradas.is_empty() {
                                html! { <tr><td colspan="8" class="vacio">{"No hay compras registradas"}</td></tr> }
                            } else {
                                html! {
                                    <>
                                    {for filtradas.iter().map(|compra| {
                                        let editar = editar.clone();
                                        let pedir_eliminar = pedir_eliminar.clone();
                                        let esta = compra.clone();
                                        let id = compra.id;
                                        html! {
                                            <tr key={compra.id}>
                                                <td>{&compra.fecha}</td>
                                                <td>{&compra.descripcion}</td>
                                                <td>{lookups.nombre_proveedor(compra.proveedor_id)}</td>
                                                <td class="numero">{compra.cantidad.to_string()}</td>
                                                <td class="numero">{format!("{:.2}", compra.precio_unitario)}</td>
                                                <td class="numero">{format!("{:.2}", compra.total)}</td>
                                                <td>{compra.moneda.to_string()}</td>
                                                <td class="acciones">
                                                    <button
                                                        type="button"
                                                        class="boton enlace"
                                                        onclick={Callback::from(move |_: MouseEvent| editar.emit(esta.clone()))}
                                                    >
                                                        {"Editar"}
                                                    </button>
                                                    <button
                                                        type="button"
                                                        class="boton enlace peligro"
                                                        onclick={Callback::from(move |_: MouseEvent| pedir_eliminar.emit(id))}
                                                    >
                                                        {"Eliminar"}
                                                    </button>
                                                </td>
                                            </tr>
                                        }
                                    })}
                                    </>
                                }
                            }}
                        </tbody>
                        {if !totales.is_empty() {
                            html! {
                                <tfoot>
                                    {for totales.iter().map(|(moneda, total)| html! {
                                        <tr key={moneda.to_string()}>
                                            <td colspan="5" class="etiqueta-total">
                                                {format!("Total en {}", moneda)}
                                            </td>
                                            <td class="numero total">{format!("{:.2}", total)}</td>
                                            <td>{moneda.simbolo()}</td>
                                            <td></td>
                                        </tr>
                                    })}
                                </tfoot>
                            }
                        } else { html! {} }}
                    </table>
                </div>
            </div>

            <ConfirmDialog
                abierto={eliminar.abierta()}
                mensaje={"¿Eliminar esta compra de insumos?".to_string()}
                on_confirm={confirmar_eliminar}
                on_cancel={cancelar_eliminar}
            />
        </section>
    }
}
