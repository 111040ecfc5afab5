use thiserror::Error;

/// The shop was full when the customer tried to enter.
///
/// This is a normal terminal outcome, not a fault: the customer walks away and still
/// counts as a completed visit.
#[derive(Debug, Clone, Copy, Error, PartialEq, Eq)]
#[error("Shop is full")]
pub struct Rejected;

/// Caps how many customers are inside the shop at once.
#[derive(Debug)]
pub struct AdmissionGate {
    capacity: usize,
    inside: usize,
}

impl AdmissionGate {
    pub fn new(capacity: usize) -> Self {
        Self { capacity, inside: 0 }
    }

    /// Lets one customer in, or refuses when the shop is at capacity.
    pub fn try_enter(&mut self) -> Result<(), Rejected> {
        if self.inside >= self.capacity {
            return Err(Rejected);
        }
        self.inside += 1;
        Ok(())
    }

    /// One customer walks out.
    pub fn leave(&mut self) {
        assert!(self.inside > 0, "leave() with nobody inside");
        self.inside -= 1;
    }

    pub fn inside(&self) -> usize {
        self.inside
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gate_rejects_at_capacity() {
        let mut gate = AdmissionGate::new(2);
        assert_eq!(gate.try_enter(), Ok(()));
        assert_eq!(gate.try_enter(), Ok(()));
        assert_eq!(gate.try_enter(), Err(Rejected));
        assert_eq!(gate.inside(), 2);

        gate.leave();
        assert_eq!(gate.try_enter(), Ok(()));
        assert_eq!(gate.inside(), 2);
    }

    #[test]
    #[should_panic(expected = "nobody inside")]
    fn test_leave_on_empty_shop_is_fatal() {
        AdmissionGate::new(1).leave();
    }
}
