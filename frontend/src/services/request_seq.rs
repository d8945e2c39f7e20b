use std::cell::Cell;
use std::rc::Rc;

/// Guard against out-of-order list responses.
///
/// Rapid filter changes can leave several fetches in flight at once and
/// nothing guarantees they resolve in dispatch order. Each fetch takes a
/// token when it starts; a response is applied only while its token is
/// still the latest one issued, so a superseded response is dropped
/// instead of overwriting newer data.
#[derive(Clone, Default, PartialEq)]
pub struct RequestSeq {
    actual: Rc<Cell<u64>>,
}

impl RequestSeq {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a new fetch and return its token, superseding any fetch
    /// still in flight.
    pub fn siguiente(&self) -> u64 {
        let token = self.actual.get() + 1;
        self.actual.set(token);
        token
    }

    /// Whether the fetch holding `token` is still the latest.
    pub fn es_actual(&self, token: u64) -> bool {
        self.actual.get() == token
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn el_ultimo_token_gana() {
        let seq = RequestSeq::new();
        let primero = seq.siguiente();
        let segundo = seq.siguiente();
        // La respuesta vieja llega tarde y se descarta.
        assert!(!seq.es_actual(primero));
        assert!(seq.es_actual(segundo));
    }

    #[test]
    fn los_clones_comparten_el_contador() {
        let seq = RequestSeq::new();
        let clon = seq.clone();
        let token = seq.siguiente();
        assert!(clon.es_actual(token));
        clon.siguiente();
        assert!(!seq.es_actual(token));
    }

    #[test]
    fn un_solo_fetch_sigue_vigente() {
        let seq = RequestSeq::new();
        let token = seq.siguiente();
        assert!(seq.es_actual(token));
    }
}
