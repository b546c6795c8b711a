use anyhow::Result;
use serde::{Deserialize, Serialize};

/// Tuning constants for the strain evaluator.
///
/// Near-duplicate revisions of the reference algorithm disagree on several
/// of these values (anchor tolerance 47 ms vs 90 ms, hand nerf 0.12 vs
/// 0.35). They are tuning data, not competing algorithms, so every value is
/// a named field here and `Default` is the canonical table. Overriding a
/// field never changes the evaluator's structure.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StrainParams {
    /// Per-1000 ms retention factor of the per-column strain
    pub individual_decay_base: f64,
    /// Per-1000 ms retention factor of the global strain
    pub overall_decay_base: f64,
    /// Logistic midpoint (ms) of the hold-release bonus
    pub release_threshold: f64,
    /// Multiplier applied while another column's hold spans this note
    pub hold_factor_bonus: f64,
    /// Flat per-note addition to the column strain
    pub base_increment: f64,
    /// Delta time (ms) at or under which consecutive notes form a chord
    pub chord_threshold: f64,
    /// Allowed drift (ms) between consecutive same-column gaps before the
    /// anchor run resets
    pub anchor_tolerance: f64,
    /// Run length at which the anchor bonus starts applying
    pub min_anchor: u32,
    /// Clamp on the effective anchor length used in the bonus
    pub max_anchor: u32,
    /// Bonus per effective anchor-run note
    pub anchor_bonus: f64,
    /// Maximum gap (ms) to an adjacent column's note for a trill hit
    pub trill_min_time: f64,
    /// Clamp on the trill run length
    pub max_trill: u32,
    /// Bonus scale: adjacent column strain x run length x this factor
    pub trill_bonus: f64,
    /// Pair idle gap (ms) beyond which an adjacent pair counts as easy
    pub hand_idle_threshold: f64,
    /// Flat multiplier applied to the column strain when every adjacent
    /// pair in the note's hand is easy
    pub hand_nerf_multiplier: f64,
}

impl Default for StrainParams {
    fn default() -> Self {
        Self {
            individual_decay_base: 0.125,
            overall_decay_base: 0.30,
            release_threshold: 24.0,
            hold_factor_bonus: 1.25,
            base_increment: 2.0,
            chord_threshold: 1.0,
            anchor_tolerance: 47.0,
            min_anchor: 3,
            max_anchor: 5,
            anchor_bonus: 0.3,
            trill_min_time: 400.0,
            max_trill: 10,
            trill_bonus: 0.08,
            hand_idle_threshold: 2000.0,
            hand_nerf_multiplier: 0.35,
        }
    }
}

impl StrainParams {
    /// Check that an overridden parameter set is usable by the evaluator.
    pub fn validate(&self) -> Result<()> {
        if !(self.individual_decay_base > 0.0 && self.individual_decay_base <= 1.0) {
            anyhow::bail!(
                "individual_decay_base must be in (0, 1], got {}",
                self.individual_decay_base
            );
        }
        if !(self.overall_decay_base > 0.0 && self.overall_decay_base <= 1.0) {
            anyhow::bail!(
                "overall_decay_base must be in (0, 1], got {}",
                self.overall_decay_base
            );
        }
        if self.hold_factor_bonus < 1.0 {
            anyhow::bail!(
                "hold_factor_bonus must be at least 1.0, got {}",
                self.hold_factor_bonus
            );
        }
        if self.chord_threshold < 0.0 {
            anyhow::bail!("chord_threshold must be non-negative, got {}", self.chord_threshold);
        }
        if self.anchor_tolerance < 0.0 {
            anyhow::bail!("anchor_tolerance must be non-negative, got {}", self.anchor_tolerance);
        }
        if self.max_anchor == 0 || self.max_trill == 0 {
            anyhow::bail!("anchor and trill caps must be at least 1");
        }
        if self.trill_min_time <= 0.0 {
            anyhow::bail!("trill_min_time must be positive, got {}", self.trill_min_time);
        }
        if !(self.hand_nerf_multiplier > 0.0 && self.hand_nerf_multiplier <= 1.0) {
            anyhow::bail!(
                "hand_nerf_multiplier must be in (0, 1], got {}",
                self.hand_nerf_multiplier
            );
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_params_validate() {
        StrainParams::default().validate().unwrap();
    }

    #[test]
    fn test_bad_decay_base_rejected() {
        let params = StrainParams {
            individual_decay_base: 0.0,
            ..Default::default()
        };
        assert!(params.validate().is_err());

        let params = StrainParams {
            overall_decay_base: 1.5,
            ..Default::default()
        };
        assert!(params.validate().is_err());
    }

    #[test]
    fn test_bad_nerf_multiplier_rejected() {
        let params = StrainParams {
            hand_nerf_multiplier: 0.0,
            ..Default::default()
        };
        assert!(params.validate().is_err());
    }

    #[test]
    fn test_zero_caps_rejected() {
        let params = StrainParams {
            max_anchor: 0,
            ..Default::default()
        };
        assert!(params.validate().is_err());
    }

    #[test]
    fn test_partial_override_from_json() {
        // serde(default) lets a config file override a single constant
        let params: StrainParams =
            serde_json::from_str(r#"{"anchor_tolerance": 90.0}"#).unwrap();
        assert_eq!(params.anchor_tolerance, 90.0);
        assert_eq!(params.individual_decay_base, 0.125);
        params.validate().unwrap();
    }
}
