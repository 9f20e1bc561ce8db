use sarif_explorer_schema::Importance;

/// Importance threshold selected by the user. Defaults to `important`.
pub type Verbosity = Importance;

/// Whether a step of `importance` is shown at `verbosity`.
///
/// Essential steps are always shown and `unimportant` shows everything.
/// Otherwise only steps whose importance equals the verbosity are shown, so
/// `important` hides unimportant steps but keeps essential ones.
pub fn step_visible(importance: Importance, verbosity: Verbosity) -> bool {
    importance == Importance::Essential
        || verbosity == Importance::Unimportant
        || importance == verbosity
}
