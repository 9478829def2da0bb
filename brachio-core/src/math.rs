//! Single-precision maths routines
//!
//! Thin wrappers over `libm`, used on host and target alike.

pub fn sqrt(x: f32) -> f32 {
    libm::sqrtf(x)
}

pub fn sin(x: f32) -> f32 {
    libm::sinf(x)
}

pub fn cos(x: f32) -> f32 {
    libm::cosf(x)
}

pub fn acos(x: f32) -> f32 {
    libm::acosf(x)
}

pub fn atan2(y: f32, x: f32) -> f32 {
    libm::atan2f(y, x)
}
