/// Blocking yes/no gate used before destructive operations. A failed prompt
/// counts as a "no".
pub fn get_confirm(message: &str) -> bool {
    cliclack::confirm(message)
        .initial_value(false)
        .interact()
        .unwrap_or(false)
}
