use wasm_bindgen::JsCast;
use web_sys::Element;
use yew::prelude::*;

use crate::services::date_utils::{self, DIAS_SEMANA};

#[derive(Properties, PartialEq)]
pub struct CalendarPickerProps {
    /// Selected date in `YYYY-MM-DD`, or None when nothing is picked.
    pub selected: Option<String>,
    /// Reports the picked date upward as `YYYY-MM-DD`.
    pub on_select: Callback<String>,
    /// When present, the picker offers a clear action (used by the date
    /// range filters).
    #[prop_or_default]
    pub on_clear: Option<Callback<()>>,
    #[prop_or_default]
    pub label: Option<String>,
    #[prop_or_default]
    pub disabled: bool,
}

#[derive(Clone, PartialEq)]
pub struct CeldaDia {
    pub dia: u32,
    pub fecha: String,
    pub del_mes: bool,
}

/// Fixed 6-week grid (42 cells) for a month, Monday as the first column.
/// Leading and trailing cells are padded with the neighbour months.
pub fn cuadricula_mes(year: i32, month: u32) -> Vec<CeldaDia> {
    let mut celdas = Vec::with_capacity(42);
    let offset = date_utils::dia_de_semana_lunes0(year, month, 1);

    let (anio_prev, mes_prev) = if month == 1 {
        (year - 1, 12)
    } else {
        (year, month - 1)
    };
    let dias_prev = date_utils::dias_en_mes(anio_prev, mes_prev);
    for i in 0..offset {
        let dia = dias_prev - offset + i + 1;
        celdas.push(CeldaDia {
            dia,
            fecha: format!("{:04}-{:02}-{:02}", anio_prev, mes_prev, dia),
            del_mes: false,
        });
    }

    for dia in 1..=date_utils::dias_en_mes(year, month) {
        celdas.push(CeldaDia {
            dia,
            fecha: format!("{:04}-{:02}-{:02}", year, month, dia),
            del_mes: true,
        });
    }

    let (anio_sig, mes_sig) = if month == 12 {
        (year + 1, 1)
    } else {
        (year, month + 1)
    };
    let mut dia = 1;
    while celdas.len() < 42 {
        celdas.push(CeldaDia {
            dia,
            fecha: format!("{:04}-{:02}-{:02}", anio_sig, mes_sig, dia),
            del_mes: false,
        });
        dia += 1;
    }

    celdas
}

/// CSS classes for one day cell. Today is distinguished only while it is
/// not the selected date.
pub fn clases_celda(del_mes: bool, seleccionado: bool, es_hoy: bool) -> Vec<&'static str> {
    let mut clases = vec!["dia-celda"];
    clases.push(if del_mes { "del-mes" } else { "otro-mes" });
    if seleccionado {
        clases.push("seleccionado");
    } else if es_hoy {
        clases.push("hoy");
    }
    clases
}

#[function_component(CalendarPicker)]
pub fn calendar_picker(props: &CalendarPickerProps) -> Html {
    let abierto = use_state(|| false);
    let contenedor_ref = use_node_ref();

    let hoy = date_utils::hoy();
    let (anio_inicial, mes_inicial) = props
        .selected
        .as_deref()
        .and_then(date_utils::descomponer_fecha)
        .or_else(|| date_utils::descomponer_fecha(&hoy))
        .map(|(a, m, _)| (a, m))
        .unwrap_or((2025, 1));
    let anio = use_state(|| anio_inicial);
    let mes = use_state(|| mes_inicial);

    let alternar = {
        let abierto = abierto.clone();
        let anio = anio.clone();
        let mes = mes.clone();
        Callback::from(move |_: MouseEvent| {
            if !*abierto {
                // Reubica la cuadrícula en el mes de la fecha elegida.
                anio.set(anio_inicial);
                mes.set(mes_inicial);
            }
            abierto.set(!*abierto);
        })
    };

    // Cierra el desplegable al hacer clic fuera del componente.
    {
        let abierto = abierto.clone();
        let contenedor_ref = contenedor_ref.clone();
        use_effect_with(*abierto, move |esta_abierto| {
            let listener = esta_abierto.then(|| {
                gloo::events::EventListener::new(
                    &web_sys::window().expect("sin ventana"),
                    "click",
                    move |evento| {
                        if let Some(objetivo) = evento.target() {
                            if let Ok(elemento) = objetivo.dyn_into::<Element>() {
                                if let Some(contenedor) = contenedor_ref.cast::<Element>() {
                                    if !contenedor.contains(Some(&elemento)) {
                                        abierto.set(false);
                                    }
                                }
                            }
                        }
                    },
                )
            });
            move || drop(listener)
        });
    }

    let mes_anterior = {
        let anio = anio.clone();
        let mes = mes.clone();
        Callback::from(move |_: MouseEvent| {
            if *mes == 1 {
                mes.set(12);
                anio.set(*anio - 1);
            } else {
                mes.set(*mes - 1);
            }
        })
    };
    let mes_siguiente = {
        let anio = anio.clone();
        let mes = mes.clone();
        Callback::from(move |_: MouseEvent| {
            if *mes == 12 {
                mes.set(1);
                anio.set(*anio + 1);
            } else {
                mes.set(*mes + 1);
            }
        })
    };
    let anio_anterior = {
        let anio = anio.clone();
        Callback::from(move |_: MouseEvent| anio.set(*anio - 1))
    };
    let anio_siguiente = {
        let anio = anio.clone();
        Callback::from(move |_: MouseEvent| anio.set(*anio + 1))
    };

    let al_elegir = {
        let on_select = props.on_select.clone();
        let abierto = abierto.clone();
        Callback::from(move |fecha: String| {
            on_select.emit(fecha);
            abierto.set(false);
        })
    };

    let texto = match &props.selected {
        Some(fecha) => date_utils::formatear_fecha(fecha),
        None => "Seleccionar fecha".to_string(),
    };

    let celdas = cuadricula_mes(*anio, *mes);

    html! {
        <div class="calendar-picker" ref={contenedor_ref.clone()}>
            {if let Some(label) = &props.label {
                html! { <label class="calendar-picker-label">{label}</label> }
            } else { html! {} }}

            <button
                type="button"
                class="calendar-picker-boton"
                onclick={alternar}
                disabled={props.disabled}
            >
                <span>{texto}</span>
                <span class="icono-calendario">{"📅"}</span>
            </button>

            {if *abierto && !props.disabled {
                html! {
                    <div class="calendar-desplegable">
                        <div class="calendar-cabecera">
                            <button type="button" class="nav-boton" title="Año anterior" onclick={anio_anterior}>{"«"}</button>
                            <button type="button" class="nav-boton" title="Mes anterior" onclick={mes_anterior}>{"‹"}</button>
                            <span class="mes-anio">
                                {format!("{} {}", date_utils::nombre_mes(*mes), *anio)}
                            </span>
                            <button type="button" class="nav-boton" title="Mes siguiente" onclick={mes_siguiente}>{"›"}</button>
                            <button type="button" class="nav-boton" title="Año siguiente" onclick={anio_siguiente}>{"»"}</button>
                        </div>

                        <div class="dias-semana">
                            {for DIAS_SEMANA.iter().map(|dia| html! { <span>{*dia}</span> })}
                        </div>

                        <div class="dias-grid">
                            {for celdas.iter().map(|celda| {
                                let seleccionado = props.selected.as_deref() == Some(celda.fecha.as_str());
                                let es_hoy = celda.fecha == hoy;
                                let clases = clases_celda(celda.del_mes, seleccionado, es_hoy);
                                let al_elegir = al_elegir.clone();
                                let fecha = celda.fecha.clone();
                                html! {
                                    <button
                                        type="button"
                                        class={classes!(clases)}
                                        onclick={Callback::from(move |_: MouseEvent| al_elegir.emit(fecha.clone()))}
                                    >
                                        {celda.dia}
                                    </button>
                                }
                            })}
                        </div>

                        <div class="calendar-pie">
                            <button
                                type="button"
                                class="hoy-boton"
                                onclick={{
                                    let al_elegir = al_elegir.clone();
                                    let hoy = hoy.clone();
                                    Callback::from(move |_: MouseEvent| al_elegir.emit(hoy.clone()))
                                }}
                            >
                                {"Hoy"}
                            </button>
                            {if let Some(on_clear) = &props.on_clear {
                                let on_clear = on_clear.clone();
                                let abierto = abierto.clone();
                                html! {
                                    <button
                                        type="button"
                                        class="limpiar-boton"
                                        onclick={Callback::from(move |_: MouseEvent| {
                                            on_clear.emit(());
                                            abierto.set(false);
                                        })}
                                    >
                                        {"Limpiar"}
                                    </button>
                                }
                            } else { html! {} }}
                        </div>
                    </div>
                }
            } else { html! {} }}
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn la_cuadricula_siempre_tiene_seis_semanas() {
        for (anio, mes) in [(2025, 2), (2025, 3), (2024, 2), (2025, 12), (2026, 1)] {
            assert_eq!(cuadricula_mes(anio, mes).len(), 42, "{}-{}", anio, mes);
        }
    }

    #[test]
    fn marzo_2025_empieza_en_sabado_con_lunes_primero() {
        // El 1 de marzo de 2025 fue sábado: 5 celdas de relleno de febrero.
        let celdas = cuadricula_mes(2025, 3);
        assert!(!celdas[4].del_mes);
        assert_eq!(celdas[4].fecha, "2025-02-28");
        assert!(celdas[5].del_mes);
        assert_eq!(celdas[5].fecha, "2025-03-01");
        assert_eq!(celdas.iter().filter(|c| c.del_mes).count(), 31);
    }

    #[test]
    fn septiembre_2025_empieza_sin_relleno() {
        // El 1 de septiembre de 2025 fue lunes.
        let celdas = cuadricula_mes(2025, 9);
        assert!(celdas[0].del_mes);
        assert_eq!(celdas[0].fecha, "2025-09-01");
        assert_eq!(celdas.iter().filter(|c| c.del_mes).count(), 30);
    }

    #[test]
    fn febrero_bisiesto_tiene_29_dias_del_mes() {
        let celdas = cuadricula_mes(2024, 2);
        assert_eq!(celdas.iter().filter(|c| c.del_mes).count(), 29);
    }

    #[test]
    fn el_relleno_final_es_del_mes_siguiente() {
        let celdas = cuadricula_mes(2025, 12);
        let ultima = celdas.last().unwrap();
        assert!(!ultima.del_mes);
        assert!(ultima.fecha.starts_with("2026-01-"));
    }

    #[test]
    fn hoy_se_distingue_salvo_que_este_seleccionado() {
        assert!(clases_celda(true, false, true).contains(&"hoy"));
        let seleccionado = clases_celda(true, true, true);
        assert!(seleccionado.contains(&"seleccionado"));
        assert!(!seleccionado.contains(&"hoy"));
        assert!(!clases_celda(true, false, false).contains(&"hoy"));
    }
}
