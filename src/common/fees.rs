//! Fee-split arithmetic for claimed trading fees.
//!
//! Claimed creator fees are split between the pool creator and the platform
//! by a configured basis-point share. The split is exact: the two shares
//! always sum to the claimed amount, with the remainder of the integer
//! division going to the creator.

use anyhow::anyhow;

use crate::constants::fees::BPS_DENOMINATOR;

/// Platform share configuration, validated at construction
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FeeSplitConfig {
    platform_bps: u64,
}

impl FeeSplitConfig {
    pub fn new(platform_bps: u64) -> Result<Self, anyhow::Error> {
        if platform_bps > BPS_DENOMINATOR {
            return Err(anyhow!(
                "platform fee {} bps exceeds {} bps",
                platform_bps,
                BPS_DENOMINATOR
            ));
        }
        Ok(Self { platform_bps })
    }

    pub fn platform_bps(&self) -> u64 {
        self.platform_bps
    }

    /// Splits a claimed amount into (creator, platform) shares
    pub fn split(&self, claimed: u64) -> FeeSplit {
        let platform =
            (claimed as u128 * self.platform_bps as u128 / BPS_DENOMINATOR as u128) as u64;
        FeeSplit {
            creator: claimed - platform,
            platform,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FeeSplit {
    pub creator: u64,
    pub platform: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn split_is_exact() {
        let config = FeeSplitConfig::new(500).unwrap();
        for claimed in [0u64, 1, 99, 10_000, 1_000_000_007, u64::MAX] {
            let split = config.split(claimed);
            assert_eq!(split.creator + split.platform, claimed);
        }
    }

    #[test]
    fn five_percent_share() {
        let config = FeeSplitConfig::new(500).unwrap();
        let split = config.split(1_000_000);
        assert_eq!(split.platform, 50_000);
        assert_eq!(split.creator, 950_000);
    }

    #[test]
    fn remainder_goes_to_creator() {
        let config = FeeSplitConfig::new(333).unwrap();
        let split = config.split(101);
        // 101 * 333 / 10000 == 3 (floor), creator keeps the rest
        assert_eq!(split.platform, 3);
        assert_eq!(split.creator, 98);
    }

    #[test]
    fn zero_and_full_share() {
        assert_eq!(FeeSplitConfig::new(0).unwrap().split(1_000).platform, 0);
        let full = FeeSplitConfig::new(10_000).unwrap().split(1_000);
        assert_eq!(full.platform, 1_000);
        assert_eq!(full.creator, 0);
    }

    #[test]
    fn rejects_over_denominator() {
        assert!(FeeSplitConfig::new(10_001).is_err());
    }
}
