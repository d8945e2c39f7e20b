use shared::validacion::PagoForm;
use shared::{calc, ComisionTarjeta, FormaPago, Moneda, OrdenConSaldo, PagoOrden};
use wasm_bindgen_futures::spawn_local;
use web_sys::{HtmlInputElement, HtmlSelectElement, HtmlTextAreaElement};
use yew::prelude::*;

use crate::components::calendar_picker::CalendarPicker;
use crate::components::confirm_dialog::{ConfirmDialog, EliminacionPendiente};
use crate::hooks::use_lookups::use_lookups;
use crate::services::api::ApiClient;
use crate::services::date_utils;
use crate::services::logging::Logger;
use crate::services::request_seq::RequestSeq;

#[derive(Clone, Copy, PartialEq)]
enum Vista {
    Pendientes,
    Historial,
}

/// A payment form in progress: either a new payment against a pending
/// order (with its balance as cap) or an edit of a recorded payment
/// (no cap).
#[derive(Clone, PartialEq)]
struct PagoAbierto {
    editando: Option<i64>,
    saldo: Option<f64>,
    usuario_id: Option<i64>,
    contexto: Option<String>,
    form: PagoForm,
}

#[derive(Properties, PartialEq)]
pub struct PagosScreenProps {
    pub api: ApiClient,
}

/// Payment registry: pending work orders on one tab, recorded payments on
/// the other. The pending list is fetched fresh on every tab switch.
#[function_component(PagosScreen)]
pub fn pagos_screen(props: &PagosScreenProps) -> Html {
    let lookups = use_lookups(&props.api);

    let vista = use_state(|| Vista::Pendientes);
    let ordenes = use_state(Vec::<OrdenConSaldo>::new);
    let pagos = use_state(Vec::<PagoOrden>::new);
    let cargando = use_state(|| true);
    let error = use_state(|| Option::<String>::None);
    let recarga = use_state(|| 0u32);
    let seq = use_mut_ref(RequestSeq::new);

    let abierto = use_state(|| Option::<PagoAbierto>::None);
    let guardando = use_state(|| false);
    let form_error = use_state(|| Option::<String>::None);

    let eliminar = use_state(EliminacionPendiente::default);

    {
        let api = props.api.clone();
        let ordenes = ordenes.clone();
        let pagos = pagos.clone();
        let cargando = cargando.clone();
        let error = error.clone();
        let seq = seq.clone();
        use_effect_with((*vista, *recarga), move |(vista, _)| {
            let vista = *vista;
            let token = seq.borrow().siguiente();
            cargando.set(true);
            spawn_local(async move {
                match vista {
                    Vista::Pendientes => match api.listar_ordenes_con_saldo().await {
                        Ok(lista) => {
                            if seq.borrow().es_actual(token) {
                                ordenes.set(lista);
                                error.set(None);
                                cargando.set(false);
                            }
                        }
                        Err(mensaje) => {
                            if seq.borrow().es_actual(token) {
                                Logger::error("pagos", &mensaje);
                                error.set(Some(mensaje));
                                cargando.set(false);
                            }
                        }
                    },
                    Vista::Historial => match api.listar_pagos().await {
                        Ok(lista) => {
                            if seq.borrow().es_actual(token) {
                                pagos.set(lista);
                                error.set(None);
                                cargando.set(false);
                            }
                        }
                        Err(mensaje) => {
                            if seq.borrow().es_actual(token) {
                                Logger::error("pagos", &mensaje);
                                error.set(Some(mensaje));
                                cargando.set(false);
                            }
                        }
                    },
                }
            });
            || ()
        });
    }

    let cambiar_vista = {
        let vista = vista.clone();
        Callback::from(move |nueva: Vista| vista.set(nueva))
    };

    // --- apertura del formulario -------------------------------------------

    let registrar_pago = {
        let abierto = abierto.clone();
        let form_error = form_error.clone();
        Callback::from(move |orden: OrdenConSaldo| {
            let form = PagoForm::para_orden(&orden, date_utils::hoy());
            abierto.set(Some(PagoAbierto {
                editando: None,
                saldo: Some(orden.saldo),
                usuario_id: None,
                contexto: Some(format!(
                    "Orden #{} · {} · Placa {}",
                    orden.orden_trabajo_id, orden.cliente, orden.placa
                )),
                form,
            }));
            form_error.set(None);
        })
    };

    let editar_pago = {
        let abierto = abierto.clone();
        let form_error = form_error.clone();
        Callback::from(move |pago: PagoOrden| {
            abierto.set(Some(PagoAbierto {
                editando: Some(pago.id),
                // Al editar no se aplica el tope del saldo.
                saldo: None,
                usuario_id: pago.usuario_id,
                contexto: Some(format!("Orden #{}", pago.orden_trabajo_id)),
                form: PagoForm::from_pago(&pago),
            }));
            form_error.set(None);
        })
    };

    let cerrar_form = {
        let abierto = abierto.clone();
        Callback::from(move |_: MouseEvent| abierto.set(None))
    };

    // --- guardado ----------------------------------------------------------

    let guardar = {
        let api = props.api.clone();
        let abierto = abierto.clone();
        let lookups = lookups.clone();
        let guardando = guardando.clone();
        let form_error = form_error.clone();
        let recarga = recarga.clone();
        let valor_recarga = *recarga;
        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();
            let Some(actual) = (*abierto).clone() else { return };

            // La comisión solo aplica con una forma de pago con tarjeta.
            let es_tarjeta = actual
                .form
                .forma_pago_id
                .and_then(|id| lookups.forma_pago(id))
                .map(|fp| calc::es_forma_pago_tarjeta(&fp.nombre))
                .unwrap_or(false);
            let comision = if es_tarjeta {
                actual
                    .form
                    .comision_tarjeta_id
                    .and_then(|id| lookups.comision(id))
                    .cloned()
            } else {
                None
            };

            let peticion = match actual
                .form
                .to_request(actual.saldo, comision.as_ref(), actual.usuario_id)
            {
                Ok(peticion) => peticion,
                Err(motivo) => {
                    form_error.set(Some(motivo.to_string()));
                    return;
                }
            };

            let api = api.clone();
            let abierto = abierto.clone();
            let guardando = guardando.clone();
            let form_error = form_error.clone();
            let recarga = recarga.clone();
            spawn_local(async move {
                guardando.set(true);
                let resultado = match actual.editando {
                    Some(id) => api.actualizar_pago(id, &peticion).await.map(|_| ()),
                    None => api.crear_pago(&peticion).await.map(|_| ()),
                };
                match resultado {
                    Ok(()) => {
                        abierto.set(None);
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
                match api.eliminar_pago(id).await {
                    Ok(()) => recarga.set(valor_recarga + 1),
                    Err(mensaje) => {
                        Logger::error("pagos", &mensaje);
                        error.set(Some(mensaje));
                    }
                }
            });
        })
    };

    // --- render ------------------------------------------------------------

    let tab = |etiqueta: &str, valor: Vista| {
        let activo = *vista == valor;
        let cambiar_vista = cambiar_vista.clone();
        html! {
            <button
                type="button"
                class={classes!("tab", activo.then_some("activo"))}
                onclick={Callback::from(move |_: MouseEvent| cambiar_vista.emit(valor))}
            >
                {etiqueta.to_string()}
            </button>
        }
    };

    html! {
        <section class="pantalla pagos">
            <div class="pantalla-cabecera">
                <h2>{"Registro de pagos"}</h2>
                <div class="tabs">
                    {tab("Órdenes pendientes", Vista::Pendientes)}
                    {tab("Historial de pagos", Vista::Historial)}
                </div>
            </div>

            {if let Some(mensaje) = (*error).as_ref() {
                html! { <div class="mensaje error">{mensaje}</div> }
            } else { html! {} }}

            {match *vista {
                Vista::Pendientes => html! {
                    <table class="tabla">
                        <thead>
                            <tr>
                                <th>{"Orden"}</th>
                                <th>{"Fecha"}</th>
                                <th>{"Cliente"}</th>
                                <th>{"Placa"}</th>
                                <th>{"Sub total"}</th>
                                <th>{"Pagado"}</th>
                                <th>{"Saldo"}</th>
                                <th>{"Moneda"}</th>
                                <th></th>
                            </tr>
                        </thead>
                        <tbody>
                            {if *cargando {
                                html! { <tr><td colspan="9" class="cargando">{"Cargando órdenes..."}</td></tr> }
                            } else if ordenes.is_empty() {
                                html! { <tr><td colspan="9" class="vacio">{"No hay órdenes con saldo pendiente"}</td></tr> }
                            } else {
                                html! {
                                    <>
                                    {for ordenes.iter().map(|orden| {
                                        let registrar_pago = registrar_pago.clone();
                                        let esta = orden.clone();
                                        html! {
                                            <tr key={orden.orden_trabajo_id}>
                                                <td>{format!("#{}", orden.orden_trabajo_id)}</td>
                                                <td>{&orden.fecha_registro}</td>
                                                <td>{&orden.cliente}</td>
                                                <td>{&orden.placa}</td>
                                                <td class="numero">{format!("{:.2}", orden.sub_total)}</td>
                                                <td class="numero">{format!("{:.2}", orden.total_pagado)}</td>
                                                <td class="numero saldo">{format!("{:.2}", orden.saldo)}</td>
                                                <td>{orden.moneda.to_string()}</td>
                                                <td>
                                                    <button
                                                        type="button"
                                                        class="boton primario"
                                                        onclick={Callback::from(move |_: MouseEvent| registrar_pago.emit(esta.clone()))}
                                                    >
                                                        {"Registrar pago"}
                                                    </button>
                                                </td>
                                            </tr>
                                        }
                                    })}
                                    </>
                                }
                            }}
                        </tbody>
                    </table>
                },
                Vista::Historial => html! {
                    <table class="tabla">
                        <thead>
                            <tr>
                                <th>{"Orden"}</th>
                                <th>{"Fecha"}</th>
                                <th>{"Monto"}</th>
                                <th>{"Moneda"}</th>
                                <th>{"Forma de pago"}</th>
                                <th>{"Comisión"}</th>
                                <th>{"Observación"}</th>
                                <th>{"Acciones"}</th>
                            </tr>
                        </thead>
                        <tbody>
                            {if *cargando {
                                html! { <tr><td colspan="8" class="cargando">{"Cargando pagos..."}</td></tr> }
                            } else if pagos.is_empty() {
                                html! { <tr><td colspan="8" class="vacio">{"Sin pagos registrados"}</td></tr> }
                            } else {
                                html! {
                                    <>
                                    {for pagos.iter().map(|pago| {
                                        let editar_pago = editar_pago.clone();
                                        let pedir_eliminar = pedir_eliminar.clone();
                                        let este = pago.clone();
                                        let id = pago.id;
                                        html! {
                                            <tr key={pago.id}>
                                                <td>{format!("#{}", pago.orden_trabajo_id)}</td>
                                                <td>{&pago.fecha}</td>
                                                <td class="numero">{format!("{:.2}", pago.monto)}</td>
                                                <td>{pago.moneda.to_string()}</td>
                                                <td>{lookups.nombre_forma_pago(pago.forma_pago_id)}</td>
                                                <td class="numero">
                                                    {pago.monto_comision
                                                        .map(|c| format!("{:.2}", c))
                                                        .unwrap_or_else(|| "-".to_string())}
                                                </td>
                                                <td>{&pago.observacion}</td>
                                                <td class="acciones">
                                                    <button
                                                        type="button"
                                                        class="boton enlace"
                                                        onclick={Callback::from(move |_: MouseEvent| editar_pago.emit(este.clone()))}
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
                    </table>
                },
            }}

            {if let Some(actual) = (*abierto).clone() {
                html! {
                    <PagoFormModal
                        form={actual.form.clone()}
                        set_form={{
                            let abierto = abierto.clone();
                            Callback::from(move |nuevo: PagoForm| {
                                if let Some(mut actual) = (*abierto).clone() {
                                    actual.form = nuevo;
                                    abierto.set(Some(actual));
                                }
                            })
                        }}
                        saldo={actual.saldo}
                        contexto={actual.contexto.clone()}
                        editando={actual.editando.is_some()}
                        formas_pago={lookups.formas_pago_activas().into_iter().cloned().collect::<Vec<_>>()}
                        comisiones={lookups.comisiones_activas().into_iter().cloned().collect::<Vec<_>>()}
                        guardando={*guardando}
                        error={(*form_error).clone()}
                        on_submit={guardar.clone()}
                        on_close={cerrar_form.clone()}
                    />
                }
            } else { html! {} }}

            <ConfirmDialog
                abierto={eliminar.abierta()}
                mensaje={"¿Eliminar este pago? El saldo de la orden se recalculará.".to_string()}
                on_confirm={confirmar_eliminar}
                on_cancel={cancelar_eliminar}
            />
        </section>
    }
}

#[derive(Properties, PartialEq)]
struct PagoFormModalProps {
    form: PagoForm,
    set_form: Callback<PagoForm>,
    saldo: Option<f64>,
    contexto: Option<String>,
    editando: bool,
    formas_pago: Vec<FormaPago>,
    comisiones: Vec<ComisionTarjeta>,
    guardando: bool,
    error: Option<String>,
    on_submit: Callback<SubmitEvent>,
    on_close: Callback<MouseEvent>,
}

#[function_component(PagoFormModal)]
fn pago_form_modal(props: &PagoFormModalProps) -> Html {
    let form = props.form.clone();

    let forma_seleccionada = form
        .forma_pago_id
        .and_then(|id| props.formas_pago.iter().find(|fp| fp.id == id));
    let es_tarjeta = forma_seleccionada
        .map(|fp| calc::es_forma_pago_tarjeta(&fp.nombre))
        .unwrap_or(false);
    let comision_seleccionada = if es_tarjeta {
        form.comision_tarjeta_id
            .and_then(|id| props.comisiones.iter().find(|c| c.id == id))
    } else {
        None
    };

    // Comisión y total a cobrar, visibles antes de enviar.
    let monto_actual = form.monto.trim().parse::<f64>().unwrap_or(0.0);
    let comision_calculada = comision_seleccionada
        .map(|c| calc::comision_amount(monto_actual, c.porcentaje));

    let al_elegir_fecha = {
        let set_form = props.set_form.clone();
        let form = form.clone();
        Callback::from(move |fecha: String| {
            let mut nuevo = form.clone();
            nuevo.fecha = fecha;
            set_form.emit(nuevo);
        })
    };
    let al_cambiar_monto = {
        let set_form = props.set_form.clone();
        let form = form.clone();
        Callback::from(move |e: Event| {
            let input: HtmlInputElement = e.target_unchecked_into();
            let mut nuevo = form.clone();
            nuevo.monto = input.value();
            set_form.emit(nuevo);
        })
    };
    let al_cambiar_moneda = {
        let set_form = props.set_form.clone();
        let form = form.clone();
        Callback::from(move |e: Event| {
            let select: HtmlSelectElement = e.target_unchecked_into();
            let mut nuevo = form.clone();
            nuevo.moneda = if select.value() == "Dólares" {
                Moneda::Dolares
            } else {
                Moneda::Bolivianos
            };
            set_form.emit(nuevo);
        })
    };
    let al_cambiar_tipo_cambio = {
        let set_form = props.set_form.clone();
        let form = form.clone();
        Callback::from(move |e: Event| {
            let input: HtmlInputElement = e.target_unchecked_into();
            let mut nuevo = form.clone();
            nuevo.tipo_cambio = input.value();
            set_form.emit(nuevo);
        })
    };
    let al_cambiar_forma_pago = {
        let set_form = props.set_form.clone();
        let form = form.clone();
        let formas_pago = props.formas_pago.clone();
        Callback::from(move |e: Event| {
            let select: HtmlSelectElement = e.target_unchecked_into();
            let mut nuevo = form.clone();
            nuevo.forma_pago_id = select.value().parse::<i64>().ok();
            // Al salir de una forma con tarjeta se descarta la comisión.
            let sigue_tarjeta = nuevo
                .forma_pago_id
                .and_then(|id| formas_pago.iter().find(|fp| fp.id == id))
                .map(|fp| calc::es_forma_pago_tarjeta(&fp.nombre))
                .unwrap_or(false);
            if !sigue_tarjeta {
                nuevo.comision_tarjeta_id = None;
            }
            set_form.emit(nuevo);
        })
    };
    let al_cambiar_comision = {
        let set_form = props.set_form.clone();
        let form = form.clone();
        Callback::from(move |e: Event| {
            let select: HtmlSelectElement = e.target_unchecked_into();
            let mut nuevo = form.clone();
            nuevo.comision_tarjeta_id = select.value().parse::<i64>().ok();
            set_form.emit(nuevo);
        })
    };
    let al_cambiar_factura = {
        let set_form = props.set_form.clone();
        let form = form.clone();
        Callback::from(move |e: Event| {
            let input: HtmlInputElement = e.target_unchecked_into();
            let mut nuevo = form.clone();
            nuevo.nro_factura = input.value();
            set_form.emit(nuevo);
        })
    };
    let al_cambiar_recibo = {
        let set_form = props.set_form.clone();
        let form = form.clone();
        Callback::from(move |e: Event| {
            let input: HtmlInputElement = e.target_unchecked_into();
            let mut nuevo = form.clone();
            nuevo.nro_recibo = input.value();
            set_form.emit(nuevo);
        })
    };
    let al_cambiar_observacion = {
        let set_form = props.set_form.clone();
        let form = form.clone();
        Callback::from(move |e: Event| {
            let area: HtmlTextAreaElement = e.target_unchecked_into();
            let mut nuevo = form.clone();
            nuevo.observacion = area.value();
            set_form.emit(nuevo);
        })
    };

    html! {
        <div class="modal-fondo">
            <div class="modal">
                <h3>{if props.editando { "Editar pago" } else { "Registrar pago" }}</h3>

                {if let Some(contexto) = props.contexto.as_ref() {
                    html! { <p class="contexto">{contexto}</p> }
                } else { html! {} }}

                {if let Some(saldo) = props.saldo {
                    html! {
                        <p class="saldo-pendiente">
                            {format!("Saldo pendiente: {} {:.2}", form.moneda.simbolo(), saldo)}
                        </p>
                    }
                } else { html! {} }}

                {if let Some(mensaje) = props.error.as_ref() {
                    html! { <div class="mensaje error">{mensaje}</div> }
                } else { html! {} }}

                <form onsubmit={props.on_submit.clone()}>
                    <div class="campo">
                        <CalendarPicker
                            selected={Some(form.fecha.clone())}
                            on_select={al_elegir_fecha}
                            label={Some("Fecha".to_string())}
                            disabled={props.guardando}
                        />
                    </div>

                    <div class="campo">
                        <label>{"Monto"}</label>
                        <input
                            type="number"
                            step="0.01"
                            min="0.01"
                            value={form.monto.clone()}
                            onchange={al_cambiar_monto}
                            disabled={props.guardando}
                        />
                    </div>

                    <div class="campo">
                        <label>{"Moneda"}</label>
                        <select onchange={al_cambiar_moneda} disabled={props.guardando}>
                            <option value="Bolivianos" selected={form.moneda == Moneda::Bolivianos}>{"Bolivianos"}</option>
                            <option value="Dólares" selected={form.moneda == Moneda::Dolares}>{"Dólares"}</option>
                        </select>
                    </div>

                    {if form.moneda == Moneda::Dolares {
                        html! {
                            <div class="campo">
                                <label>{"Tipo de cambio"}</label>
                                <input
                                    type="number"
                                    step="0.01"
                                    min="0.01"
                                    placeholder="6.96"
                                    value={form.tipo_cambio.clone()}
                                    onchange={al_cambiar_tipo_cambio}
                                    disabled={props.guardando}
                                />
                            </div>
                        }
                    } else { html! {} }}

                    <div class="campo">
                        <label>{"Forma de pago"}</label>
                        <select onchange={al_cambiar_forma_pago} disabled={props.guardando}>
                            <option value="" selected={form.forma_pago_id.is_none()}>{"-- Seleccione --"}</option>
                            {for props.formas_pago.iter().map(|fp| html! {
                                <option
                                    value={fp.id.to_string()}
                                    selected={form.forma_pago_id == Some(fp.id)}
                                >
                                    {&fp.nombre}
                                </option>
                            })}
                        </select>
                    </div>

                    {if es_tarjeta {
                        html! {
                            <div class="campo">
                                <label>{"Comisión de tarjeta"}</label>
                                <select onchange={al_cambiar_comision} disabled={props.guardando}>
                                    <option value="" selected={form.comision_tarjeta_id.is_none()}>{"-- Sin comisión --"}</option>
                                    {for props.comisiones.iter().map(|c| html! {
                                        <option
                                            value={c.id.to_string()}
                                            selected={form.comision_tarjeta_id == Some(c.id)}
                                        >
                                            {format!("{} ({}%)", c.banco, c.porcentaje)}
                                        </option>
                                    })}
                                </select>
                            </div>
                        }
                    } else { html! {} }}

                    {if let Some(comision) = comision_calculada {
                        html! {
                            <div class="resumen-comision">
                                <span>{format!("Comisión: {} {:.2}", form.moneda.simbolo(), comision)}</span>
                                <span>{format!(
                                    "Total a cobrar: {} {:.2}",
                                    form.moneda.simbolo(),
                                    calc::round2(monto_actual + comision)
                                )}</span>
                            </div>
                        }
                    } else { html! {} }}

                    <div class="campo-doble">
                        <div class="campo">
                            <label>{"Nro. factura"}</label>
                            <input
                                type="text"
                                value={form.nro_factura.clone()}
                                onchange={al_cambiar_factura}
                                disabled={props.guardando}
                            />
                        </div>
                        <div class="campo">
                            <label>{"Nro. recibo"}</label>
                            <input
                                type="text"
                                value={form.nro_recibo.clone()}
                                onchange={al_cambiar_recibo}
                                disabled={props.guardando}
                            />
                        </div>
                    </div>

                    <div class="campo">
                        <label>{"Observación"}</label>
                        <textarea
                            value={form.observacion.clone()}
                            onchange={al_cambiar_observacion}
                            disabled={props.guardando}
                        />
                    </div>

                    <div class="modal-acciones">
                        <button type="submit" class="boton primario" disabled={props.guardando}>
                            {if props.guardando { "Guardando..." } else { "Guardar" }}
                        </button>
                        <button
                            type="button"
                            class="boton secundario"
                            onclick={props.on_close.clone()}
                            disabled={props.guardando}
                        >
                            {"Cancelar"}
                        </button>
                    </div>
                </form>
            </div>
        </div>
    }
}
