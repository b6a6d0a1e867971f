//! # Terminal Rendering
//!
//! Plain-text views of the session. Every function returns a `String` so the
//! command layer decides where it goes.
//!
//! ```text
//! Total escaneados: 5 | Únicos: 3 | Duplicados: 2
//!
//! Seriales escaneados
//!   01  ABC123
//!   02  XYZ999
//!
//! Duplicados detectados
//!   01  ABC123  picado en #3 · original en #1
//! ```

use serialguard_core::{
    NumberedDuplicate, NumberedSerial, ScanSession, ScanStatus, SessionSummary, StatusKind,
};

use crate::state::ScanResponse;

/// Shown when the unique list is empty.
pub const NO_SERIALS_YET: &str = "Aún no hay seriales. Escanea el primero.";

/// Two-digit, zero-padded, 1-based list number.
pub fn list_number(position: u64) -> String {
    format!("{:02}", position)
}

/// Status line with a short marker per kind.
pub fn status_line(status: &ScanStatus) -> String {
    let marker = match status.kind {
        StatusKind::Added => "[+]",
        StatusKind::Duplicate => "[!]",
        StatusKind::Empty => "[ ]",
        StatusKind::Info => "[i]",
    };
    format!("{} {}", marker, status.message)
}

/// Status line, save warning if any, then the stats line.
pub fn response(response: &ScanResponse) -> String {
    let mut out = status_line(&response.status);
    if let Some(warning) = &response.warning {
        out.push('\n');
        out.push_str(&status_line(warning));
    }
    out.push('\n');
    out.push_str(&stats_line(&response.summary));
    out
}

/// `Total escaneados: n | Únicos: n | Duplicados: n`
pub fn stats_line(summary: &SessionSummary) -> String {
    format!(
        "Total escaneados: {} | Únicos: {} | Duplicados: {}",
        summary.scan_count, summary.unique_count, summary.duplicate_count
    )
}

/// One unique serial row.
pub fn serial_row(row: &NumberedSerial) -> String {
    format!("  {}  {}", list_number(row.position), row.serial)
}

/// One duplicate row.
pub fn duplicate_row(row: &NumberedDuplicate) -> String {
    format!(
        "  {}  {}  picado en #{} · original en #{}",
        list_number(row.position),
        row.event.serial,
        row.event.dup_at,
        row.event.first_position
    )
}

/// The unique list with its heading.
pub fn serial_list(session: &ScanSession) -> String {
    let mut out = String::from("Seriales escaneados");
    if session.unique_count() == 0 {
        out.push_str("\n  ");
        out.push_str(NO_SERIALS_YET);
        return out;
    }
    for row in session.numbered_serials() {
        out.push('\n');
        out.push_str(&serial_row(&row));
    }
    out
}

/// The duplicate list with its heading, or `None` when there are none.
pub fn duplicate_list(session: &ScanSession) -> Option<String> {
    if session.duplicate_count() == 0 {
        return None;
    }
    let mut out = String::from("Duplicados detectados");
    for row in session.numbered_duplicates() {
        out.push('\n');
        out.push_str(&duplicate_row(&row));
    }
    Some(out)
}

/// Stats, unique list and (if any) duplicate list.
pub fn session_view(session: &ScanSession) -> String {
    let mut out = stats_line(&session.summary());
    out.push_str("\n\n");
    out.push_str(&serial_list(session));
    if let Some(dups) = duplicate_list(session) {
        out.push_str("\n\n");
        out.push_str(&dups);
    }
    out
}

/// Interactive banner.
pub fn banner() -> String {
    [
        "Serial Guard",
        "Escanea o escribe un número de serie y pulsa Enter.",
        "Los duplicados se detectan al instante. Escribe :help para ver los comandos.",
    ]
    .join("\n")
}

/// Interactive command help.
pub fn help() -> String {
    [
        "Comandos:",
        "  :undo    deshacer el último serial único",
        "  :reset   reiniciar el pallet",
        "  :list    ver seriales escaneados",
        "  :dups    ver duplicados",
        "  :export  imprimir los seriales separados por comas",
        "  :help    esta ayuda",
        "  :quit    salir",
    ]
    .join("\n")
}
