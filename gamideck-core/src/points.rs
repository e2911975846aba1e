use crate::Rating;

pub fn base_points(rating: Rating) -> u32 {
    match rating {
        Rating::Again => 0,
        Rating::Hard => 2,
        Rating::Good => 10,
        Rating::Easy => 15,
    }
}

/// Points earned for one rating under a spin multiplier. Multipliers never
/// shrink the base amount.
pub fn award(rating: Rating, multiplier: f32) -> u32 {
    let m = if multiplier.is_finite() { multiplier.max(1.0) } else { 1.0 };
    (base_points(rating) as f32 * m).round() as u32
}
