use crate::core::CreditPolicy;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CreditTier {
    pub min_gpa: f64,
    pub max_credits: u32,
}

/// Step function from GPA to credit cap: the highest tier whose `min_gpa`
/// the student reaches wins, otherwise `default_max_credits` applies.
#[derive(Debug, Clone, PartialEq)]
pub struct TieredCreditPolicy {
    default_max_credits: u32,
    tiers: Vec<CreditTier>,
}

impl TieredCreditPolicy {
    pub fn new(default_max_credits: u32, mut tiers: Vec<CreditTier>) -> Self {
        tiers.sort_by(|a, b| b.min_gpa.total_cmp(&a.min_gpa));
        Self {
            default_max_credits,
            tiers,
        }
    }
}

impl CreditPolicy for TieredCreditPolicy {
    fn calculate_max_credits(&self, gpa: f64) -> u32 {
        self.tiers
            .iter()
            .find(|tier| gpa >= tier.min_gpa)
            .map(|tier| tier.max_credits)
            .unwrap_or(self.default_max_credits)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn policy() -> TieredCreditPolicy {
        TieredCreditPolicy::new(
            15,
            vec![
                CreditTier {
                    min_gpa: 2.5,
                    max_credits: 20,
                },
                CreditTier {
                    min_gpa: 3.0,
                    max_credits: 24,
                },
                CreditTier {
                    min_gpa: 2.0,
                    max_credits: 18,
                },
            ],
        )
    }

    #[test]
    fn test_highest_reached_tier_wins() {
        let policy = policy();
        assert_eq!(policy.calculate_max_credits(3.8), 24);
        assert_eq!(policy.calculate_max_credits(3.0), 24);
        assert_eq!(policy.calculate_max_credits(2.99), 20);
        assert_eq!(policy.calculate_max_credits(2.0), 18);
    }

    #[test]
    fn test_below_every_tier_uses_default() {
        assert_eq!(policy().calculate_max_credits(1.4), 15);
        assert_eq!(TieredCreditPolicy::new(12, vec![]).calculate_max_credits(4.0), 12);
    }
}
