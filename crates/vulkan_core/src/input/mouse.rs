//! Mouse button classification

use glfw::MouseButton;

/// Whether the button is the left mouse button
pub fn is_left_button(button: MouseButton) -> bool {
    button == MouseButton::Button1
}

/// Whether the button is the right mouse button
pub fn is_right_button(button: MouseButton) -> bool {
    button == MouseButton::Button2
}

/// Whether the button is the middle mouse button
pub fn is_middle_button(button: MouseButton) -> bool {
    button == MouseButton::Button3
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn buttons_classify_correctly() {
        assert!(is_left_button(MouseButton::Button1));
        assert!(is_right_button(MouseButton::Button2));
        assert!(is_middle_button(MouseButton::Button3));
        assert!(!is_left_button(MouseButton::Button4));
    }
}
