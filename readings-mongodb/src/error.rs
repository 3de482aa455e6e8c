//! Mapping of driver errors onto the readings error taxonomy.

use mongodb::error::{Error as DriverError, ErrorKind};

use readings_core::error::DocumentStoreError;


/// Server error codes reported while a replica set changes state: the node stepped
/// down, is not primary, or is shutting down.
pub(crate) const STATE_CHANGE_CODES: [i32; 7] = [
    10107, // NotWritablePrimary
    13435, // NotPrimaryNoSecondaryOk
    11600, // InterruptedAtShutdown
    11602, // InterruptedDueToReplStateChange
    13436, // NotPrimaryOrSecondary
    189,   // PrimarySteppedDown
    91,    // ShutdownInProgress
];

/// Returns `true` for driver errors meaning the store is unreachable or failing over,
/// so the same operation may succeed once the driver reconnects.
///
/// Covers dropped and timed out sockets, cleared pools, server selection timeouts and
/// replica set state changes.
pub(crate) fn is_connection_drop(kind: &ErrorKind) -> bool {
    match kind {
        ErrorKind::Io(_)
        | ErrorKind::ConnectionPoolCleared { .. }
        | ErrorKind::ServerSelection { .. } => true,
        ErrorKind::Command(err) => STATE_CHANGE_CODES.contains(&err.code),
        _ => false,
    }
}

/// Maps a driver error to [`DocumentStoreError::ConnectionLost`] when the connection
/// dropped, and to [`DocumentStoreError::Backend`] otherwise.
pub(crate) fn map_driver_error(err: DriverError) -> DocumentStoreError {
    if is_connection_drop(&err.kind) {
        DocumentStoreError::ConnectionLost(err.to_string())
    } else {
        DocumentStoreError::Backend(err.to_string())
    }
}
