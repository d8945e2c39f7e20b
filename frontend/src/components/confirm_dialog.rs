use yew::prelude::*;

/// Pending confirm-gated deletion for a list row.
///
/// The prompt opens on a target id. Dismissing it clears the target
/// without any endpoint call; confirming takes the target, so one
/// confirmation resolves to at most one delete call (and the one refetch
/// the owner triggers afterwards).
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct EliminacionPendiente {
    objetivo: Option<i64>,
}

impl EliminacionPendiente {
    pub fn pedir(&mut self, id: i64) {
        self.objetivo = Some(id);
    }

    pub fn cancelar(&mut self) {
        self.objetivo = None;
    }

    /// Take the confirmed target; a repeat confirmation yields nothing.
    pub fn confirmar(&mut self) -> Option<i64> {
        self.objetivo.take()
    }

    pub fn abierta(&self) -> bool {
        self.objetivo.is_some()
    }
}

#[derive(Properties, PartialEq)]
pub struct ConfirmDialogProps {
    pub abierto: bool,
    pub mensaje: String,
    /// Fired exactly once per confirmation; the owner performs the delete
    /// and the subsequent refetch.
    pub on_confirm: Callback<()>,
    pub on_cancel: Callback<()>,
}

/// Confirmation modal in front of every delete. Cancelling never reaches
/// the backend.
#[function_component(ConfirmDialog)]
pub fn confirm_dialog(props: &ConfirmDialogProps) -> Html {
    if !props.abierto {
        return html! {};
    }

    let confirmar = {
        let on_confirm = props.on_confirm.clone();
        Callback::from(move |_: MouseEvent| on_confirm.emit(()))
    };
    let cancelar = {
        let on_cancel = props.on_cancel.clone();
        Callback::from(move |_: MouseEvent| on_cancel.emit(()))
    };

    html! {
        <div class="modal-fondo">
            <div class="modal confirmacion">
                <h3>{"Confirmar eliminación"}</h3>
                <p>{&props.mensaje}</p>
                <div class="modal-acciones">
                    <button type="button" class="boton peligro" onclick={confirmar}>
                        {"Eliminar"}
                    </button>
                    <button type="button" class="boton secundario" onclick={cancelar}>
                        {"Cancelar"}
                    </button>
                </div>
            </div>
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cancelar_no_produce_ninguna_llamada() {
        let mut pendiente = EliminacionPendiente::default();
        pendiente.pedir(7);
        pendiente.cancelar();
        let mut borrados = 0;
        if pendiente.confirmar().is_some() {
            borrados += 1;
        }
        assert_eq!(borrados, 0);
        assert!(!pendiente.abierta());
    }

    #[test]
    fn confirmar_borra_y_recarga_exactamente_una_vez() {
        let mut pendiente = EliminacionPendiente::default();
        pendiente.pedir(7);
        let mut borrados = Vec::new();
        let mut recargas = 0;
        // Un segundo clic en Eliminar no puede duplicar la llamada.
        for _ in 0..2 {
            if let Some(id) = pendiente.confirmar() {
                borrados.push(id);
                recargas += 1;
            }
        }
        assert_eq!(borrados, vec![7]);
        assert_eq!(recargas, 1);
    }

    #[test]
    fn pedir_reabre_sobre_otra_fila() {
        let mut pendiente = EliminacionPendiente::default();
        pendiente.pedir(1);
        pendiente.cancelar();
        pendiente.pedir(2);
        assert!(pendiente.abierta());
        assert_eq!(pendiente.confirmar(), Some(2));
    }
}
