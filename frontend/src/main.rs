mod components;
mod hooks;
mod services;

use yew::prelude::*;

use components::categorias::CategoriasScreen;
use components::comisiones::ComisionesScreen;
use components::compras::ComprasScreen;
use components::egresos::EgresosScreen;
use components::pagos::PagosScreen;
use services::api::ApiClient;
use services::logging::Logger;

#[derive(Clone, Copy, PartialEq)]
enum Pantalla {
    Egresos,
    Pagos,
    Compras,
    Comisiones,
    Categorias,
}

impl Pantalla {
    fn titulo(self) -> &'static str {
        match self {
            Pantalla::Egresos => "Egresos",
            Pantalla::Pagos => "Pagos",
            Pantalla::Compras => "Compras",
            Pantalla::Comisiones => "Comisiones",
            Pantalla::Categorias => "Categorías",
        }
    }
}

#[function_component(App)]
fn app() -> Html {
    let api = use_memo((), |_| ApiClient::new());
    let pantalla = use_state(|| Pantalla::Egresos);

    let enlace = |destino: Pantalla| {
        let pantalla = pantalla.clone();
        let activo = *pantalla == destino;
        html! {
            <button
                type="button"
                class={classes!("nav-enlace", activo.then_some("activo"))}
                onclick={Callback::from(move |_: MouseEvent| pantalla.set(destino))}
            >
                {destino.titulo()}
            </button>
        }
    };

    html! {
        <div class="app">
            <header class="app-cabecera">
                <h1>{"Administración del taller"}</h1>
                <nav>
                    {enlace(Pantalla::Egresos)}
                    {enlace(Pantalla::Pagos)}
                    {enlace(Pantalla::Compras)}
                    {enlace(Pantalla::Comisiones)}
                    {enlace(Pantalla::Categorias)}
                </nav>
            </header>
            <main>
                {match *pantalla {
                    Pantalla::Egresos => html! { <EgresosScreen api={(*api).clone()} /> },
                    Pantalla::Pagos => html! { <PagosScreen api={(*api).clone()} /> },
                    Pantalla::Compras => html! { <ComprasScreen api={(*api).clone()} /> },
                    Pantalla::Comisiones => html! { <ComisionesScreen api={(*api).clone()} /> },
                    Pantalla::Categorias => html! { <CategoriasScreen api={(*api).clone()} /> },
                }}
            </main>
        </div>
    }
}

fn main() {
    Logger::info("app", "iniciando la interfaz de administración");
    yew::Renderer::<App>::new().render();
}
