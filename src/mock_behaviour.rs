//! This module provides ways to tweak mocked feeds, so that they can return errors on some tests

use std::error::Error;

use crate::category::Category;

/// This stores some behaviour tweaks, that describe how a mocked feed will behave during a given test
///
/// So that fetching a category fails _n_ times after _m_ initial successes, set `(m, n)` for the suited parameter
#[derive(Default, Clone, Debug)]
pub struct MockBehaviour {
    /// If this is true, every fetch will be allowed
    pub is_suspended: bool,

    pub events_behaviour: (u32, u32),
    pub births_behaviour: (u32, u32),
    pub deaths_behaviour: (u32, u32),
    pub holidays_behaviour: (u32, u32),
}

impl MockBehaviour {
    pub fn new() -> Self {
        Self::default()
    }

    /// All categories will fail at once, for `n_fails` times
    pub fn fail_now(n_fails: u32) -> Self {
        Self {
            is_suspended: false,
            events_behaviour: (0, n_fails),
            births_behaviour: (0, n_fails),
            deaths_behaviour: (0, n_fails),
            holidays_behaviour: (0, n_fails),
        }
    }

    /// Only `category` will fail, for `n_fails` times
    pub fn fail_category(category: Category, n_fails: u32) -> Self {
        let mut behaviour = Self::default();
        *behaviour.behaviour_mut(category) = (0, n_fails);
        behaviour
    }

    /// Suspend this mock behaviour until you call `resume`
    pub fn suspend(&mut self) {
        self.is_suspended = true;
    }
    /// Make this behaviour active again
    pub fn resume(&mut self) {
        self.is_suspended = false;
    }

    pub fn can_fetch(&mut self, category: Category) -> Result<(), Box<dyn Error + Send + Sync>> {
        if self.is_suspended { return Ok(()) }
        decrement(self.behaviour_mut(category), category.as_str())
    }

    fn behaviour_mut(&mut self, category: Category) -> &mut (u32, u32) {
        match category {
            Category::Events => &mut self.events_behaviour,
            Category::Births => &mut self.births_behaviour,
            Category::Deaths => &mut self.deaths_behaviour,
            Category::Holidays => &mut self.holidays_behaviour,
        }
    }
}


/// Return Ok(()) in case the value is `(1+, _)` or `(_, 0)`, or return Err and decrement otherwise
fn decrement(value: &mut (u32, u32), descr: &str) -> Result<(), Box<dyn Error + Send + Sync>> {
    let remaining_successes = value.0;
    let remaining_failures = value.1;

    if remaining_successes > 0 {
        value.0 = value.0 - 1;
        log::debug!("Mock behaviour: allowing a fetch of {} ({:?})", descr, value);
        Ok(())
    } else {
        if remaining_failures > 0 {
            value.1 = value.1 - 1;
            log::debug!("Mock behaviour: failing a fetch of {} ({:?})", descr, value);
            Err(format!("Mocked behaviour requires this fetch of {} to fail this time. ({:?})", descr, value).into())
        } else {
            log::debug!("Mock behaviour: allowing a fetch of {} ({:?})", descr, value);
            Ok(())
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_mock_behaviour() {
        let mut ok = MockBehaviour::new();
        for _ in 0..5 {
            assert!(ok.can_fetch(Category::Events).is_ok());
            assert!(ok.can_fetch(Category::Holidays).is_ok());
        }

        let mut now = MockBehaviour::fail_now(2);
        assert!(now.can_fetch(Category::Events).is_err());
        assert!(now.can_fetch(Category::Births).is_err());
        assert!(now.can_fetch(Category::Births).is_err());
        assert!(now.can_fetch(Category::Events).is_err());
        assert!(now.can_fetch(Category::Events).is_ok());
        assert!(now.can_fetch(Category::Births).is_ok());
        assert!(now.can_fetch(Category::Deaths).is_err());

        let mut holidays = MockBehaviour::fail_category(Category::Holidays, 1);
        assert!(holidays.can_fetch(Category::Events).is_ok());
        assert!(holidays.can_fetch(Category::Holidays).is_err());
        assert!(holidays.can_fetch(Category::Holidays).is_ok());

        let mut custom = MockBehaviour{
            deaths_behaviour: (1,2),
            ..MockBehaviour::default()
        };
        assert!(custom.can_fetch(Category::Deaths).is_ok());
        custom.suspend();
        assert!(custom.can_fetch(Category::Deaths).is_ok());
        custom.resume();
        assert!(custom.can_fetch(Category::Deaths).is_err());
        assert!(custom.can_fetch(Category::Deaths).is_err());
        assert!(custom.can_fetch(Category::Deaths).is_ok());
    }
}
