/// Easing curves for progress-driven tweens.
///
/// `Power2*` follow the usual animation-library naming, where `Power2` is the
/// cubic curve: `Power2Out` starts fast and settles slowly, `Power2InOut`
/// accelerates through the first half and decelerates through the second.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Ease {
    #[default]
    Linear,
    Power2Out,
    Power2InOut,
}

impl Ease {
    /// Map linear progress in \[0, 1\] to eased progress. Input is clamped.
    #[inline]
    pub fn apply(self, t: f32) -> f32 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Ease::Linear => t,
            Ease::Power2Out => {
                let u = 1.0 - t;
                1.0 - u * u * u
            }
            Ease::Power2InOut => {
                if t < 0.5 {
                    let u = 2.0 * t;
                    u * u * u / 2.0
                } else {
                    let u = 2.0 * (1.0 - t);
                    1.0 - u * u * u / 2.0
                }
            }
        }
    }
}
