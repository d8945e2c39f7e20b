use shared::PaginationInfo;
use yew::prelude::*;

#[derive(Properties, PartialEq)]
pub struct PaginationProps {
    pub info: PaginationInfo,
    pub on_page: Callback<u32>,
    #[prop_or_default]
    pub disabled: bool,
}

/// Prev/next control over server-side pagination metadata.
#[function_component(Pagination)]
pub fn pagination(props: &PaginationProps) -> Html {
    let pagina = props.info.page;
    let total_paginas = props.info.total_pages.max(1);

    let anterior = {
        let on_page = props.on_page.clone();
        Callback::from(move |_: MouseEvent| on_page.emit(pagina - 1))
    };
    let siguiente = {
        let on_page = props.on_page.clone();
        Callback::from(move |_: MouseEvent| on_page.emit(pagina + 1))
    };

    html! {
        <div class="paginacion">
            <button
                type="button"
                class="paginacion-boton"
                onclick={anterior}
                disabled={props.disabled || pagina <= 1}
            >
                {"‹ Anterior"}
            </button>
            <span class="paginacion-info">
                {format!("Página {} de {} ({} registros)", pagina, total_paginas, props.info.total)}
            </span>
            <button
                type="button"
                class="paginacion-boton"
                onclick={siguiente}
                disabled={props.disabled || pagina >= total_paginas}
            >
                {"Siguiente ›"}
            </button>
        </div>
    }
}
