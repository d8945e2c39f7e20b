use gloo::timers::callback::Timeout;
use shared::validacion::EgresoForm;
use shared::{Egreso, EgresoListRequest, PaginationInfo, TotalPorFormaPago};
use shared::{Destino, Moneda};
use wasm_bindgen_futures::spawn_local;
use web_sys::{HtmlInputElement, HtmlSelectElement};
use yew::prelude::*;

use crate::components::calendar_picker::CalendarPicker;
use crate::components::confirm_dialog::{ConfirmDialog, EliminacionPendiente};
use crate::components::pagination::Pagination;
use crate::hooks::use_lookups::use_lookups;
use crate::services::api::ApiClient;
use crate::services::export;
use crate::services::logging::Logger;
use crate::services::request_seq::RequestSeq;

#[derive(Properties, PartialEq)]
pub struct EgresosScreenProps {
    pub api: ApiClient,
}

/// Expense list and form: server-paginated, filterable by text and date
/// range, with backend-supplied totals grouped by payment method and
/// currency. Every mutation triggers one full refetch of the current page.
#[function_component(EgresosScreen)]
pub fn egresos_screen(props: &EgresosScreenProps) -> Html {
    let lookups = use_lookups(&props.api);

    // Estado de la lista
    let egresos = use_state(Vec::<Egreso>::new);
    let totales = use_state(Vec::<TotalPorFormaPago>::new);
    let paginacion = use_state(|| Option::<PaginationInfo>::None);
    let cargando = use_state(|| true);
    let error = use_state(|| Option::<String>::None);

    // Filtros. El texto tecleado se refleja al instante; la consulta al
    // servidor se dispara tras una pausa corta de tecleo.
    let pagina = use_state(|| 1u32);
    let busqueda_texto = use_state(String::new);
    let busqueda = use_state(String::new);
    let debounce = use_mut_ref(|| Option::<Timeout>::None);
    let desde = use_state(|| Option::<String>::None);
    let hasta = use_state(|| Option::<String>::None);

    let recarga = use_state(|| 0u32);
    let seq = use_mut_ref(RequestSeq::new);

    // Formulario modal
    let form_abierto = use_state(|| false);
    let editando = use_state(|| Option::<i64>::None);
    let form = use_state(EgresoForm::default);
    let guardando = use_state(|| false);
    let form_error = use_state(|| Option::<String>::None);

    // Eliminación
    let eliminar = use_state(EliminacionPendiente::default);

    {
        let api = props.api.clone();
        let egresos = egresos.clone();
        let totales = totales.clone();
        let paginacion = paginacion.clone();
        let cargando = cargando.clone();
        let error = error.clone();
        let seq = seq.clone();
        use_effect_with(
            (
                *pagina,
                (*busqueda).clone(),
                (*desde).clone(),
                (*hasta).clone(),
                *recarga,
            ),
            move |(pagina, busqueda, desde, hasta, _)| {
                let filtro = busqueda.trim();
                let req = EgresoListRequest {
                    page: *pagina,
                    limit: EgresoListRequest::PAGE_SIZE,
                    start_date: desde.clone(),
                    end_date: hasta.clone(),
                    search: (!filtro.is_empty()).then(|| filtro.to_string()),
                };
                let token = seq.borrow().siguiente();
                cargando.set(true);
                spawn_local(async move {
                    match api.listar_egresos(&req).await {
                        Ok(respuesta) => {
                            if seq.borrow().es_actual(token) {
                                egresos.set(respuesta.egresos);
                                totales.set(respuesta.totales);
                                paginacion.set(Some(respuesta.pagination));
                                error.set(None);
                                cargando.set(false);
                            }
                        }
                        Err(mensaje) => {
                            if seq.borrow().es_actual(token) {
                                Logger::error("egresos", &mensaje);
                                error.set(Some(mensaje));
                                cargando.set(false);
                            }
                        }
                    }
                });
                || ()
            },
        );
    }

    // --- filtros -----------------------------------------------------------

    let al_buscar = {
        let busqueda_texto = busqueda_texto.clone();
        let busqueda = busqueda.clone();
        let pagina = pagina.clone();
        let debounce = debounce.clone();
        Callback::from(move |e: InputEvent| {
            let input: HtmlInputElement = e.target_unchecked_into();
            let texto = input.value();
            busqueda_texto.set(texto.clone());
            let busqueda = busqueda.clone();
            let pagina = pagina.clone();
            // Reemplazar el Timeout anterior cancela la consulta pendiente.
            *debounce.borrow_mut() = Some(Timeout::new(300, move || {
                busqueda.set(texto);
                pagina.set(1);
            }));
        })
    };

    let al_elegir_desde = {
        let desde = desde.clone();
        let pagina = pagina.clone();
        Callback::from(move |fecha: String| {
            desde.set(Some(fecha));
            pagina.set(1);
        })
    };
    let limpiar_desde = {
        let desde = desde.clone();
        let pagina = pagina.clone();
        Callback::from(move |_| {
            desde.set(None);
            pagina.set(1);
        })
    };
    let al_elegir_hasta = {
        let hasta = hasta.clone();
        let pagina = pagina.clone();
        Callback::from(move |fecha: String| {
            hasta.set(Some(fecha));
            pagina.set(1);
        })
    };
    let limpiar_hasta = {
        let hasta = hasta.clone();
        let pagina = pagina.clone();
        Callback::from(move |_| {
            hasta.set(None);
            pagina.set(1);
        })
    };

    let cambiar_pagina = {
        let pagina = pagina.clone();
        Callback::from(move |nueva: u32| pagina.set(nueva))
    };

    // --- formulario --------------------------------------------------------

    let abrir_nuevo = {
        let form_abierto = form_abierto.clone();
        let editando = editando.clone();
        let form = form.clone();
        let form_error = form_error.clone();
        let hoy = crate::services::date_utils::hoy();
        Callback::from(move |_: MouseEvent| {
            editando.set(None);
            form.set(EgresoForm {
                fecha: hoy.clone(),
                ..EgresoForm::default()
            });
            form_error.set(None);
            form_abierto.set(true);
        })
    };

    let abrir_edicion = {
        let form_abierto = form_abierto.clone();
        let editando = editando.clone();
        let form = form.clone();
        let form_error = form_error.clone();
        Callback::from(move |egreso: Egreso| {
            editando.set(Some(egreso.id));
            form.set(EgresoForm::from_egreso(&egreso));
            form_error.set(None);
            form_abierto.set(true);
        })
    };

    let cerrar_form = {
        let form_abierto = form_abierto.clone();
        Callback::from(move |_: MouseEvent| form_abierto.set(false))
    };

    let guardar = {
        let api = props.api.clone();
        let form = form.clone();
        let form_abierto = form_abierto.clone();
        let form_error = form_error.clone();
        let guardando = guardando.clone();
        let editando = *editando;
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
            let form_abierto = form_abierto.clone();
            let form_error = form_error.clone();
            let guardando = guardando.clone();
            let recarga = recarga.clone();
            spawn_local(async move {
                guardando.set(true);
                let resultado = match editando {
                    Some(id) => api.actualizar_egreso(id, &peticion).await.map(|_| ()),
                    None => api.crear_egreso(&peticion).await.map(|_| ()),
                };
                match resultado {
                    Ok(()) => {
                        form_abierto.set(false);
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
                match api.eliminar_egreso(id).await {
                    Ok(()) => recarga.set(valor_recarga + 1),
                    Err(mensaje) => {
                        Logger::error("egresos", &mensaje);
                        error.set(Some(mensaje));
                    }
                }
            });
        })
    };

    // --- exportación -------------------------------------------------------

    let exportar_csv = {
        let egresos = egresos.clone();
        let lookups = lookups.clone();
        let error = error.clone();
        Callback::from(move |_: MouseEvent| {
            let csv = export::csv_egresos(&egresos, &lookups.formas_pago);
            if let Err(mensaje) = export::descargar_csv("egresos.csv", &csv) {
                error.set(Some(mensaje));
            }
        })
    };
    let imprimir = Callback::from(|_: MouseEvent| export::imprimir());

    // --- render ------------------------------------------------------------

    html! {
        <section class="pantalla egresos">
            <div class="pantalla-cabecera">
                <h2>{"Egresos"}</h2>
                <div class="acciones">
                    <button type="button" class="boton secundario" onclick={exportar_csv}>{"Planilla (CSV)"}</button>
                    <button type="button" class="boton secundario" onclick={imprimir}>{"Imprimir"}</button>
                    <button type="button" class="boton primario" onclick={abrir_nuevo}>{"Nuevo egreso"}</button>
                </div>
            </div>

            <div class="filtros">
                <input
                    type="text"
                    class="busqueda"
                    placeholder="Buscar por detalle..."
                    value={(*busqueda_texto).clone()}
                    oninput={al_buscar}
                />
                <CalendarPicker
                    selected={(*desde).clone()}
                    on_select={al_elegir_desde}
                    on_clear={limpiar_desde}
                    label={Some("Desde".to_string())}
                />
                <CalendarPicker
                    selected={(*hasta).clone()}
                    on_select={al_elegir_hasta}
                    on_clear={limpiar_hasta}
                    label={Some("Hasta".to_string())}
                />
            </div>

            {if let Some(mensaje) = (*error).as_ref() {
                html! { <div class="mensaje error">{mensaje}</div> }
            } else { html! {} }}

            <div class="totales">
                {for totales.iter().map(|total| html! {
                    <span class="total-chip">
                        {format!("{}: {} {:.2}", total.forma_pago, total.moneda.simbolo(), total.total)}
                    </span>
                })}
            </div>

            <table class="tabla">
                <thead>
                    <tr>
                        <th>{"Fecha"}</th>
                        <th>{"Destino"}</th>
                        <th>{"Detalle"}</th>
                        <th>{"Monto"}</th>
                        <th>{"Moneda"}</th>
                        <th>{"Forma de pago"}</th>
                        <th>{"Acciones"}</th>
                    </tr>
                </thead>
                <tbody>
                    {if *cargando {
                        html! { <tr><td colspan="7" class="cargando">{"Cargando egresos..."}</td></tr> }
                    } else if egresos.is_empty() {
                        html! { <tr><td colspan="7" class="vacio">{"Sin egresos registrados"}</td></tr> }
                    } else {
                        html! {
                            <>
                            {for egresos.iter().map(|egreso| {
                                let abrir_edicion = abrir_edicion.clone();
                                let pedir_eliminar = pedir_eliminar.clone();
                                let este = egreso.clone();
                                let id = egreso.id;
                                html! {
                                    <tr key={egreso.id}>
                                        <td>{&egreso.fecha}</td>
                                        <td>{egreso.destino.to_string()}</td>
                                        <td>{&egreso.detalle}</td>
                                        <td class="numero">{format!("{:.2}", egreso.monto)}</td>
                                        <td>{egreso.moneda.to_string()}</td>
                                        <td>{lookups.nombre_forma_pago(egreso.forma_pago_id)}</td>
                                        <td class="acciones">
                                            <button
                                                type="button"
                                                class="boton enlace"
                                                onclick={Callback::from(move |_: MouseEvent| abrir_edicion.emit(este.clone()))}
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

            {if let Some(info) = (*paginacion).clone() {
                html! { <Pagination info={info} on_page={cambiar_pagina} disabled={*cargando} /> }
            } else { html! {} }}

            {if *form_abierto {
                html! {
                    <EgresoFormModal
                        form={(*form).clone()}
                        set_form={{
                            let form = form.clone();
                            Callback::from(move |nuevo: EgresoForm| form.set(nuevo))
                        }}
                        formas_pago={lookups.formas_pago_activas().into_iter().cloned().collect::<Vec<_>>()}
                        editando={editando.is_some()}
                        guardando={*guardando}
                        error={(*form_error).clone()}
                        on_submit={guardar}
                        on_close={cerrar_form}
                    />
                }
            } else { html! {} }}

            <ConfirmDialog
                abierto={eliminar.abierta()}
                mensaje={"¿Eliminar este egreso? Esta acción no se puede deshacer.".to_string()}
                on_confirm={confirmar_eliminar}
                on_cancel={cancelar_eliminar}
            />
        </section>
    }
}

#[derive(Properties, PartialEq)]
struct EgresoFormModalProps {
    form: EgresoForm,
    set_form: Callback<EgresoForm>,
    formas_pago: Vec<shared::FormaPago>,
    editando: bool,
    guardando: bool,
    error: Option<String>,
    on_submit: Callback<SubmitEvent>,
    on_close: Callback<MouseEvent>,
}

#[function_component(EgresoFormModal)]
fn egreso_form_modal(props: &EgresoFormModalProps) -> Html {
    let form = props.form.clone();

    let al_elegir_fecha = {
        let set_form = props.set_form.clone();
        let form = form.clone();
        Callback::from(move |fecha: String| {
            let mut nuevo = form.clone();
            nuevo.fecha = fecha;
            set_form.emit(nuevo);
        })
    };
    let al_cambiar_destino = {
        let set_form = props.set_form.clone();
        let form = form.clone();
        Callback::from(move |e: Event| {
            let select: HtmlSelectElement = e.target_unchecked_into();
            let mut nuevo = form.clone();
            nuevo.destino = if select.value() == "Casa" {
                Destino::Casa
            } else {
                Destino::Taller
            };
            set_form.emit(nuevo);
        })
    };
    let al_cambiar_detalle = {
        let set_form = props.set_form.clone();
        let form = form.clone();
        Callback::from(move |e: Event| {
            let input: HtmlInputElement = e.target_unchecked_into();
            let mut nuevo = form.clone();
            nuevo.detalle = input.value();
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
    let al_cambiar_forma_pago = {
        let set_form = props.set_form.clone();
        let form = form.clone();
        Callback::from(move |e: Event| {
            let select: HtmlSelectElement = e.target_unchecked_into();
            let mut nuevo = form.clone();
            nuevo.forma_pago_id = select.value().parse::<i64>().ok();
            set_form.emit(nuevo);
        })
    };

    html! {
        <div class="modal-fondo">
            <div class="modal">
                <h3>{if props.editando { "Editar egreso" } else { "Nuevo egreso" }}</h3>

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
                        <label>{"Destino"}</label>
                        <select
                            onchange={al_cambiar_destino}
                            disabled={props.guardando}
                        >
                            <option value="Taller" selected={form.destino == Destino::Taller}>{"Taller"}</option>
                            <option value="Casa" selected={form.destino == Destino::Casa}>{"Casa"}</option>
                        </select>
                    </div>

                    <div class="campo">
                        <label>{"Detalle"}</label>
                        <input
                            type="text"
                            placeholder="Compra de lijas, pago de luz..."
                            value={form.detalle.clone()}
                            onchange={al_cambiar_detalle}
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
                        <select
                            onchange={al_cambiar_moneda}
                            disabled={props.guardando}
                        >
                            <option value="Bolivianos" selected={form.moneda == Moneda::Bolivianos}>{"Bolivianos"}</option>
                            <option value="Dólares" selected={form.moneda == Moneda::Dolares}>{"Dólares"}</option>
                        </select>
                    </div>

                    <div class="campo">
                        <label>{"Forma de pago"}</label>
                        <select
                            onchange={al_cambiar_forma_pago}
                            disabled={props.guardando}
                        >
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
