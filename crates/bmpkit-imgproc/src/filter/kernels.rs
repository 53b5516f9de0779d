use super::Kernel;

/// Create the 3x3 box blur kernel with uniform 1/9 weights.
pub fn box_blur_kernel() -> Kernel {
    Kernel::from_weights(3, &[1.0 / 9.0; 9])
}

/// Create the 3x3 Gaussian blur kernel (1,2,1 / 2,4,2 / 1,2,1 over 16).
pub fn gaussian_blur_kernel() -> Kernel {
    Kernel::from_weights(
        3,
        &[
            1.0 / 16.0,
            2.0 / 16.0,
            1.0 / 16.0,
            2.0 / 16.0,
            4.0 / 16.0,
            2.0 / 16.0,
            1.0 / 16.0,
            2.0 / 16.0,
            1.0 / 16.0,
        ],
    )
}

/// Create the 3x3 sharpen kernel.
pub fn sharpen_kernel() -> Kernel {
    #[rustfmt::skip]
    let weights = [
        0.0, -1.0, 0.0,
        -1.0, 5.0, -1.0,
        0.0, -1.0, 0.0,
    ];
    Kernel::from_weights(3, &weights)
}

/// Create the 3x3 outline (edge detection) kernel.
pub fn outline_kernel() -> Kernel {
    #[rustfmt::skip]
    let weights = [
        -1.0, -1.0, -1.0,
        -1.0, 8.0, -1.0,
        -1.0, -1.0, -1.0,
    ];
    Kernel::from_weights(3, &weights)
}

/// Create the 3x3 emboss kernel.
pub fn emboss_kernel() -> Kernel {
    #[rustfmt::skip]
    let weights = [
        -2.0, -1.0, 0.0,
        -1.0, 1.0, 1.0,
        0.0, 1.0, 2.0,
    ];
    Kernel::from_weights(3, &weights)
}
