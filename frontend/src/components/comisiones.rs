use shared::validacion::ComisionForm;
use shared::{ComisionTarjeta, Estado};
use wasm_bindgen_futures::spawn_local;
use web_sys::{HtmlInputElement, HtmlSelectElement};
use yew::prelude::*;

use crate::components::confirm_dialog::{ConfirmDialog, EliminacionPendiente};
use crate::services::api::ApiClient;
use crate::services::logging::Logger;
use crate::services::request_seq::RequestSeq;

#[derive(Properties, PartialEq)]
pub struct ComisionesScreenProps {
    pub api: ApiClient,
}

/// Card commission catalog: bank name plus the percentage charged per
/// card payment.
#[function_component(ComisionesScreen)]
pub fn comisiones_screen(props: &ComisionesScreenProps) -> Html {
    let comisiones = use_state(Vec::<ComisionTarjeta>::new);
    let cargando = use_state(|| true);
    let error = use_state(|| Option::<String>::None);
    let recarga = use_state(|| 0u32);
    let seq = use_mut_ref(RequestSeq::new);

    let form = use_state(|| Option::<ComisionForm>::None);
    let editando = use_state(|| Option::<i64>::None);
    let guardando = use_state(|| false);
    let form_error = use_state(|| Option::<String>::None);

    let eliminar = use_state(EliminacionPendiente::default);

    {
        let api = props.api.clone();
        let comisiones = comisiones.clone();
        let cargando = cargando.clone();
        let error = error.clone();
        let seq = seq.clone();
        use_effect_with(*recarga, move |_| {
            let token = seq.borrow().siguiente();
            cargando.set(true);
            spawn_local(async move {
                match api.listar_comisiones().await {
                    Ok(lista) => {
                        if seq.borrow().es_actual(token) {
                            comisiones.set(lista);
                            error.set(None);
                            cargando.set(false);
                        }
                    }
                    Err(mensaje) => {
                        if seq.borrow().es_actual(token) {
                            Logger::error("comisiones", &mensaje);
                            error.set(Some(mensaje));
                            cargando.set(false);
                        }
                    }
                }
            });
            || ()
        });
    }

    let abrir_nueva = {
        let form = form.clone();
        let editando = editando.clone();
        let form_error = form_error.clone();
        Callback::from(move |_: MouseEvent| {
            form.set(Some(ComisionForm::default()));
            editando.set(None);
            form_error.set(None);
        })
    };
    let abrir_edicion = {
        let form = form.clone();
        let editando = editando.clone();
        let form_error = form_error.clone();
        Callback::from(move |comision: ComisionTarjeta| {
            form.set(Some(ComisionForm::from_comision(&comision)));
            editando.set(Some(comision.id));
            form_error.set(None);
        })
    };
    let cerrar_form = {
        let form = form.clone();
        Callback::from(move |_: MouseEvent| form.set(None))
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
            let Some(actual) = (*form).clone() else { return };
            let peticion = match actual.to_request() {
                Ok(peticion) => peticion,
                Err(motivo) => {
                    form_error.set(Some(motivo.to_string()));
                    return;
                }
            };
            let api = api.clone();
            let form = form.clone();
            let guardando = guardando.clone();
            let form_error = form_error.clone();
            let recarga = recarga.clone();
            let id_editando = *editando;
            spawn_local(async move {
                guardando.set(true);
                let resultado = match id_editando {
                    Some(id) => api.actualizar_comision(id, &peticion).await.map(|_| ()),
                    None => api.crear_comision(&peticion).await.map(|_| ()),
                };
                match resultado {
                    Ok(()) => {
                        form.set(None);
                        recarga.set(valor_recarga + 1);
                    }
                    Err(mensaje) => form_error.set(Some(mensaje)),
                }
                guardando.set(false);
            });
        })
    };

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
                match api.eliminar_comision(id).await {
                    Ok(()) => recarga.set(valor_recarga + 1),
                    Err(mensaje) => {
                        Logger::error("comisiones", &mensaje);
                        error.set(Some(mensaje));
                    }
                }
            });
        })
    };

    html! {
        <section class="pantalla comisiones">
            <div class="pantalla-cabecera">
                <h2>{"Comisiones de tarjeta"}</h2>
                <button type="button" class="boton primario" onclick={abrir_nueva}>
                    {"Nueva comisión"}
                </button>
            </div>

            {if let Some(mensaje) = (*error).as_ref() {
                html! { <div class="mensaje error">{mensaje}</div> }
            } else { html! {} }}

            <table class="tabla">
                <thead>
                    <tr>
                        <th>{"Banco"}</th>
                        <th>{"Porcentaje"}</th>
                        <th>{"Estado"}</th>
                        <th>{"Acciones"}</th>
                    </tr>
                </thead>
                <tbody>
                    {if *cargando {
                        html! { <tr><td colspan="4" class="cargando">{"Cargando comisiones..."}</td></tr> }
                    } else if comisiones.is_empty() {
                        html! { <tr><td colspan="4" class="vacio">{"Sin comisiones registradas"}</td></tr> }
                    } else {
                        html! {
                            <>
                            {for comisiones.iter().map(|comision| {
                                let abrir_edicion = abrir_edicion.clone();
                                let pedir_eliminar = pedir_eliminar.clone();
                                let esta = comision.clone();
                                let id = comision.id;
                                html! {
                                    <tr key={comision.id}>
                                        <td>{&comision.banco}</td>
                                        <td class="numero">{format!("{}%", comision.porcentaje)}</td>
                                        <td>{if comision.estado.es_activo() { "Activo" } else { "Inactivo" }}</td>
                                        <td class="acciones">
                                            <button
                                                type="button"
                                                class="boton enlace"
                                                onclick={Callback::from(move |_: MouseEvent| abrir_edicion.emit(esta.clone()))}
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

            {if let Some(actual) = (*form).clone() {
                let al_cambiar_banco = {
                    let form = form.clone();
                    let actual = actual.clone();
                    Callback::from(move |e: Event| {
                        let input: HtmlInputElement = e.target_unchecked_into();
                        let mut nuevo = actual.clone();
                        nuevo.banco = input.value();
                        form.set(Some(nuevo));
                    })
                };
                let al_cambiar_porcentaje = {
                    let form = form.clone();
                    let actual = actual.clone();
                    Callback::from(move |e: Event| {
                        let input: HtmlInputElement = e.target_unchecked_into();
                        let mut nuevo = actual.clone();
                        nuevo.porcentaje = input.value();
                        form.set(Some(nuevo));
                    })
                };
                let al_cambiar_estado = {
                    let form = form.clone();
                    let actual = actual.clone();
                    Callback::from(move |e: Event| {
                        let select: HtmlSelectElement = e.target_unchecked_into();
                        let mut nuevo = actual.clone();
                        nuevo.estado = if select.value() == "inactivo" {
                            Estado::Inactivo
                        } else {
                            Estado::Activo
                        };
                        form.set(Some(nuevo));
                    })
                };

                html! {
                    <div class="modal-fondo">
                        <div class="modal">
                            <h3>{if editando.is_some() { "Editar comisión" } else { "Nueva comisión" }}</h3>

                            {if let Some(mensaje) = (*form_error).as_ref() {
                                html! { <div class="mensaje error">{mensaje}</div> }
                            } else { html! {} }}

                            <form onsubmit={guardar.clone()}>
                                <div class="campo">
                                    <label>{"Banco"}</label>
                                    <input
                                        type="text"
                                        value={actual.banco.clone()}
                                        onchange={al_cambiar_banco}
                                        disabled={*guardando}
                                    />
                                </div>
                                <div class="campo">
                                    <label>{"Porcentaje"}</label>
                                    <input
                                        type="number"
                                        step="0.01"
                                        min="0.01"
                                        value={actual.porcentaje.clone()}
                                        onchange={al_cambiar_porcentaje}
                                        disabled={*guardando}
                                    />
                                </div>
                                <div class="campo">
                                    <label>{"Estado"}</label>
                                    <select onchange={al_cambiar_estado} disabled={*guardando}>
                                        <option value="activo" selected={actual.estado.es_activo()}>{"Activo"}</option>
                                        <option value="inactivo" selected={!actual.estado.es_activo()}>{"Inactivo"}</option>
                                    </select>
                                </div>
                                <div class="modal-acciones">
                                    <button type="submit" class="boton primario" disabled={*guardando}>
                                        {if *guardando { "Guardando..." } else { "Guardar" }}
                                    </button>
                                    <button
                                        type="button"
                                        class="boton secundario"
                                        onclick={cerrar_form.clone()}
                                        disabled={*guardando}
                                    >
                                        {"Cancelar"}
                                    </button>
                                </div>
                            </form>
                        </div>
                    </div>
                }
            } else { html! {} }}

            <ConfirmDialog
                abierto={eliminar.abierta()}
                mensaje={"¿Eliminar esta comisión de tarjeta?".to_string()}
                on_confirm={confirmar_eliminar}
                on_cancel={cancelar_eliminar}
            />
        </section>
    }
}
