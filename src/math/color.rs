//! RGBA color scoring and compositing shared by both engines

/// An 8-bit-per-channel RGBA color
pub type Rgba = [u8; 4];

/// Squared Euclidean distance between two colors over the RGB channels
///
/// Alpha is ignored. Kept free of branches because it sits in the inner loop
/// of both the patch scorer and the nearest-color sampler.
pub const fn color_distance_squared(a: Rgba, b: Rgba) -> u32 {
    let [ar, ag, ab, _] = a;
    let [br, bg, bb, _] = b;
    let dr = ar.abs_diff(br) as u32;
    let dg = ag.abs_diff(bg) as u32;
    let db = ab.abs_diff(bb) as u32;
    dr * dr + dg * dg + db * db
}

/// Composite a translucent patch color over an opaque base color
///
/// Each channel is `(a * patch + (255 - a) * base) / 255`, truncated, where
/// `a` is the patch alpha. The result is always fully opaque.
pub const fn blend_over(patch: Rgba, base: Rgba) -> Rgba {
    let [pr, pg, pb, alpha] = patch;
    let [br, bg, bb, _] = base;
    let a = alpha as u32;
    let keep = 255 - a;
    [
        ((a * pr as u32 + keep * br as u32) / 255) as u8,
        ((a * pg as u32 + keep * bg as u32) / 255) as u8,
        ((a * pb as u32 + keep * bb as u32) / 255) as u8,
        255,
    ]
}

/// Whether a color is fully transparent
pub const fn is_transparent(color: Rgba) -> bool {
    color[3] == 0
}
