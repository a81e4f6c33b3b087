use hf_core::Error;
use serde::{Deserialize, Serialize};
use tracing::warn;

/// What to do with a blur coefficient outside `[0, 1]`.
///
/// Outside that range the kernel can carry negative weights or a centre
/// weight above 1, so cells can go negative even though the total is kept.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DomainPolicy {
    /// Clamp into `[0, 1]` and log a warning. NaN is rejected.
    #[default]
    Clamp,
    /// Return [`Error::InvalidBlurring`].
    Reject,
    /// Use the coefficient unchanged and log a warning.
    Allow,
}

impl DomainPolicy {
    pub fn resolve(self, blurring: f32) -> Result<f32, Error> {
        if (0.0..=1.0).contains(&blurring) {
            return Ok(blurring);
        }

        match self {
            Self::Clamp => {
                if blurring.is_nan() {
                    return Err(Error::InvalidBlurring { value: blurring });
                }
                let clamped = blurring.clamp(0.0, 1.0);
                warn!(blurring, clamped, "blurring outside [0, 1], clamping");
                Ok(clamped)
            }
            Self::Reject => Err(Error::InvalidBlurring { value: blurring }),
            Self::Allow => {
                warn!(
                    blurring,
                    "blurring outside [0, 1], kernel weights may be negative"
                );
                Ok(blurring)
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BlurConfig {
    pub blurring: f32,
    pub domain: DomainPolicy,
}

impl Default for BlurConfig {
    fn default() -> Self {
        Self {
            blurring: 0.12,
            domain: DomainPolicy::Clamp,
        }
    }
}
