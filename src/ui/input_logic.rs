//! Pure button-to-layer logic, shared with the host tests.

/// Next layer, wrapping back to the base layer after the last one.
pub fn layer_up(layer: u8, count: u8) -> u8 {
    if layer.saturating_add(1) < count {
        layer + 1
    } else {
        0
    }
}

/// Previous layer, wrapping from the base layer to the last one.
pub fn layer_down(layer: u8, count: u8) -> u8 {
    match layer {
        0 => count.saturating_sub(1),
        l if l >= count => count.saturating_sub(1),
        l => l - 1,
    }
}
