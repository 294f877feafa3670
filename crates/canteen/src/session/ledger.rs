use crate::model::OrderId;
use std::collections::HashSet;

/// Orders already announced as ready in the current venue scope.
#[derive(Debug, Clone, Default)]
pub struct NotificationLedger {
    announced: HashSet<OrderId>,
}

impl NotificationLedger {
    /// Records `id` and returns whether this is the first time it was seen.
    pub fn first_time(&mut self, id: OrderId) -> bool {
        self.announced.insert(id)
    }

    pub fn contains(&self, id: OrderId) -> bool {
        self.announced.contains(&id)
    }

    pub fn len(&self) -> usize {
        self.announced.len()
    }

    pub fn is_empty(&self) -> bool {
        self.announced.is_empty()
    }

    pub fn clear(&mut self) {
        self.announced.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_each_order_announced_once_until_cleared() {
        let mut ledger = NotificationLedger::default();
        assert!(ledger.first_time(OrderId(1)));
        assert!(!ledger.first_time(OrderId(1)));
        assert!(ledger.first_time(OrderId(2)));

        ledger.clear();
        assert!(ledger.is_empty());
        assert!(ledger.first_time(OrderId(1)));
    }
}
