//! The validator power registry backing supermajority accounting.

use thiserror::Error;
use tracing::debug;

use crate::types::validator::{ValidatorAddress, ValidatorPower};

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidatorSetError {
    #[error("total power after update is {actual}, expected {expected}")]
    TotalPowerMismatch { expected: u64, actual: u64 },
}

/// The current validator set and each member's voting power.
///
/// Entries keep insertion order so paginated reads are stable across calls;
/// a validator whose power drops to zero leaves the set, and re-adding it
/// later places it at the end.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ValidatorSet {
    validators: Vec<ValidatorPower>,
    total_power: u64,
}

impl ValidatorSet {
    /// Builds a set from an initial power listing. Later entries for the
    /// same address overwrite earlier ones.
    pub fn new(initial: Vec<ValidatorPower>) -> Self {
        let mut set = Self::default();
        for entry in initial {
            set.apply(entry);
        }
        set
    }

    /// Sum of all members' voting power.
    pub fn total_power(&self) -> u64 {
        self.total_power
    }

    /// Voting power of `address`, or zero for non-members.
    pub fn power_of(&self, address: &ValidatorAddress) -> u64 {
        self.validators
            .iter()
            .find(|v| v.address == *address)
            .map(|v| v.power)
            .unwrap_or(0)
    }

    pub fn len(&self) -> usize {
        self.validators.len()
    }

    pub fn is_empty(&self) -> bool {
        self.validators.is_empty()
    }

    /// A page of `size` members starting at `offset`, in insertion order.
    /// Pages past the end come back truncated or empty rather than failing.
    pub fn validators(&self, offset: usize, size: usize) -> &[ValidatorPower] {
        let start = offset.min(self.validators.len());
        let end = offset.saturating_add(size).min(self.validators.len());
        &self.validators[start..end]
    }

    /// Every member with its power, in insertion order.
    pub fn all_validator_powers(&self) -> &[ValidatorPower] {
        &self.validators
    }

    /// Applies a batch of power changes atomically.
    ///
    /// `expected_total_power` is the caller's view of the total after the
    /// batch; if the applied set disagrees, nothing changes. This guards
    /// relayers racing each other with stale power listings.
    pub fn update_validator_powers(
        &mut self,
        updates: Vec<ValidatorPower>,
        expected_total_power: u64,
    ) -> Result<(), ValidatorSetError> {
        let mut staged = self.clone();
        for entry in updates {
            staged.apply(entry);
        }
        if staged.total_power != expected_total_power {
            return Err(ValidatorSetError::TotalPowerMismatch {
                expected: expected_total_power,
                actual: staged.total_power,
            });
        }
        debug!(
            validators = staged.validators.len(),
            total_power = staged.total_power,
            "validator powers updated"
        );
        *self = staged;
        Ok(())
    }

    fn apply(&mut self, entry: ValidatorPower) {
        if let Some(pos) = self
            .validators
            .iter()
            .position(|v| v.address == entry.address)
        {
            self.total_power -= self.validators[pos].power;
            if entry.power == 0 {
                self.validators.remove(pos);
            } else {
                self.validators[pos].power = entry.power;
                self.total_power += entry.power;
            }
        } else if entry.power > 0 {
            self.total_power += entry.power;
            self.validators.push(entry);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hex_literal::hex;

    fn addr(bytes: [u8; 20]) -> ValidatorAddress {
        ValidatorAddress(bytes)
    }

    fn fixture_set() -> ValidatorSet {
        ValidatorSet::new(vec![
            ValidatorPower {
                address: addr(hex!("661f2c8D9CF784B7aAa9e19D94836B1a14cddd2A")),
                power: 100,
            },
            ValidatorPower {
                address: addr(hex!("DbebCF3D304fA3461e6FaD9CBeA2e77Fa3a06fCE")),
                power: 100,
            },
            ValidatorPower {
                address: addr(hex!("Ff8f4195F7aBf32d0716Cb1e000A7eA96eF57328")),
                power: 100,
            },
            ValidatorPower {
                address: addr(hex!("E1C0Be3b8acE7dfC33D70bf57f4d23565b15B5d6")),
                power: 100,
            },
        ])
    }

    #[test]
    fn test_new_sums_total_power() {
        let set = fixture_set();
        assert_eq!(set.total_power(), 400);
        assert_eq!(set.len(), 4);
        assert_eq!(
            set.power_of(&addr(hex!("661f2c8D9CF784B7aAa9e19D94836B1a14cddd2A"))),
            100
        );
        assert_eq!(set.power_of(&addr([0u8; 20])), 0);
    }

    #[test]
    fn test_update_changes_and_removes() {
        let mut set = fixture_set();
        set.update_validator_powers(
            vec![
                ValidatorPower {
                    address: addr(hex!("661f2c8D9CF784B7aAa9e19D94836B1a14cddd2A")),
                    power: 150,
                },
                ValidatorPower {
                    address: addr(hex!("DbebCF3D304fA3461e6FaD9CBeA2e77Fa3a06fCE")),
                    power: 0,
                },
            ],
            350,
        )
        .unwrap();
        assert_eq!(set.total_power(), 350);
        assert_eq!(set.len(), 3);
        assert_eq!(
            set.power_of(&addr(hex!("DbebCF3D304fA3461e6FaD9CBeA2e77Fa3a06fCE"))),
            0
        );
    }

    #[test]
    fn test_update_total_mismatch_is_all_or_nothing() {
        let mut set = fixture_set();
        let before = set.clone();
        let err = set
            .update_validator_powers(
                vec![ValidatorPower {
                    address: addr(hex!("661f2c8D9CF784B7aAa9e19D94836B1a14cddd2A")),
                    power: 150,
                }],
                999,
            )
            .unwrap_err();
        assert_eq!(
            err,
            ValidatorSetError::TotalPowerMismatch {
                expected: 999,
                actual: 450
            }
        );
        assert_eq!(set, before);
    }

    #[test]
    fn test_readded_validator_moves_to_the_end() {
        let mut set = fixture_set();
        let first = addr(hex!("661f2c8D9CF784B7aAa9e19D94836B1a14cddd2A"));
        set.update_validator_powers(
            vec![ValidatorPower {
                address: first,
                power: 0,
            }],
            300,
        )
        .unwrap();
        set.update_validator_powers(
            vec![ValidatorPower {
                address: first,
                power: 50,
            }],
            350,
        )
        .unwrap();
        let page = set.validators(3, 10);
        assert_eq!(page, &[ValidatorPower { address: first, power: 50 }]);
    }

    #[test]
    fn test_pagination_clamps_to_set_size() {
        let set = fixture_set();
        assert_eq!(set.validators(0, 2).len(), 2);
        assert_eq!(set.validators(3, 5).len(), 1);
        assert_eq!(set.validators(10, 5), &[]);
    }
}
