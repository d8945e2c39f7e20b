//! Gregorian helpers for the calendar picker and date display.
//!
//! Everything except [`hoy`] is pure arithmetic so the calendar grid can be
//! tested without a browser; only "what day is today" crosses into
//! `js_sys`.

/// Current date as `YYYY-MM-DD`, taken from the browser clock.
pub fn hoy() -> String {
    use js_sys::Date;
    let ahora = Date::new_0();
    let year = ahora.get_full_year() as i32;
    let month = ahora.get_month() + 1; // JS months are 0-indexed
    let day = ahora.get_date();
    format!("{:04}-{:02}-{:02}", year, month, day)
}

pub fn es_bisiesto(year: i32) -> bool {
    (year % 4 == 0 && year % 100 != 0) || (year % 400 == 0)
}

pub fn dias_en_mes(year: i32, month: u32) -> u32 {
    match month {
        1 | 3 | 5 | 7 | 8 | 10 | 12 => 31,
        4 | 6 | 9 | 11 => 30,
        2 => {
            if es_bisiesto(year) {
                29
            } else {
                28
            }
        }
        _ => 30,
    }
}

/// Day of week with Monday = 0 ... Sunday = 6 (Sakamoto's method).
pub fn dia_de_semana_lunes0(year: i32, month: u32, day: u32) -> u32 {
    const T: [i32; 12] = [0, 3, 2, 5, 0, 3, 5, 1, 4, 6, 2, 4];
    let y = if month < 3 { year - 1 } else { year };
    let domingo0 =
        (y + y / 4 - y / 100 + y / 400 + T[(month - 1) as usize] + day as i32).rem_euclid(7);
    ((domingo0 + 6) % 7) as u32
}

pub fn nombre_mes(month: u32) -> &'static str {
    match month {
        1 => "Enero",
        2 => "Febrero",
        3 => "Marzo",
        4 => "Abril",
        5 => "Mayo",
        6 => "Junio",
        7 => "Julio",
        8 => "Agosto",
        9 => "Septiembre",
        10 => "Octubre",
        11 => "Noviembre",
        12 => "Diciembre",
        _ => "Enero",
    }
}

/// Monday-first weekday headers for the calendar grid.
pub const DIAS_SEMANA: [&str; 7] = ["Lun", "Mar", "Mié", "Jue", "Vie", "Sáb", "Dom"];

/// Split a `YYYY-MM-DD` string into numeric components.
pub fn descomponer_fecha(fecha: &str) -> Option<(i32, u32, u32)> {
    let partes: Vec<&str> = fecha.split('-').collect();
    if partes.len() != 3 {
        return None;
    }
    let year = partes[0].parse::<i32>().ok()?;
    let month = partes[1].parse::<u32>().ok()?;
    let day = partes[2].parse::<u32>().ok()?;
    if (1..=12).contains(&month) && day >= 1 && day <= dias_en_mes(year, month) {
        Some((year, month, day))
    } else {
        None
    }
}

/// `YYYY-MM-DD` formatted for display, e.g. "10 de Marzo de 2025".
pub fn formatear_fecha(fecha: &str) -> String {
    match descomponer_fecha(fecha) {
        Some((year, month, day)) => {
            format!("{} de {} de {}", day, nombre_mes(month), year)
        }
        None => fecha.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bisiestos() {
        assert!(es_bisiesto(2024));
        assert!(es_bisiesto(2000));
        assert!(!es_bisiesto(2025));
        assert!(!es_bisiesto(1900));
    }

    #[test]
    fn dias_por_mes() {
        assert_eq!(dias_en_mes(2025, 1), 31);
        assert_eq!(dias_en_mes(2025, 2), 28);
        assert_eq!(dias_en_mes(2024, 2), 29);
        assert_eq!(dias_en_mes(2025, 4), 30);
    }

    #[test]
    fn dia_de_semana_con_lunes_primero() {
        // 2025-03-01 fue sábado
        assert_eq!(dia_de_semana_lunes0(2025, 3, 1), 5);
        // 2025-09-01 fue lunes
        assert_eq!(dia_de_semana_lunes0(2025, 9, 1), 0);
        // 2025-06-01 fue domingo
        assert_eq!(dia_de_semana_lunes0(2025, 6, 1), 6);
        // 2000-01-01 fue sábado
        assert_eq!(dia_de_semana_lunes0(2000, 1, 1), 5);
    }

    #[test]
    fn descompone_y_valida_fechas() {
        assert_eq!(descomponer_fecha("2025-03-10"), Some((2025, 3, 10)));
        assert_eq!(descomponer_fecha("2025-02-30"), None);
        assert_eq!(descomponer_fecha("10/03/2025"), None);
        assert_eq!(descomponer_fecha("2024-02-29"), Some((2024, 2, 29)));
    }

    #[test]
    fn formatea_para_mostrar() {
        assert_eq!(formatear_fecha("2025-03-10"), "10 de Marzo de 2025");
        assert_eq!(formatear_fecha("sin-fecha"), "sin-fecha");
    }
}
