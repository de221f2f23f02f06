// Keyboard shortcuts; pure so they can be tested on the host.

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum KeyAction {
    ToggleFullscreen,
    ExitFullscreen,
    ToggleCamera,
    ToggleDeviceOrientation,
    ToggleUiZoom,
}

#[inline]
pub fn action_for_key(key: &str) -> Option<KeyAction> {
    match key {
        "Enter" => Some(KeyAction::ToggleFullscreen),
        "Escape" => Some(KeyAction::ExitFullscreen),
        "c" | "C" => Some(KeyAction::ToggleCamera),
        "o" | "O" => Some(KeyAction::ToggleDeviceOrientation),
        "z" | "Z" => Some(KeyAction::ToggleUiZoom),
        _ => None,
    }
}
