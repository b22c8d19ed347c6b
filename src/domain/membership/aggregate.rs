//! Membership billing state carried on every client record.
//!
//! A client pays for a fixed 30-day period. Expiry is not swept by a job: it is
//! detected, and persisted, the next time the status is read.

use serde::Serialize;

use crate::domain::foundation::{ClientId, Money, StateMachine, Timestamp};

use super::{MembershipError, MembershipStatus};

/// Length of one paid membership period.
pub const MEMBERSHIP_PERIOD_DAYS: i64 = 30;

const MILLIS_PER_DAY: i64 = 24 * 60 * 60 * 1000;

/// Membership fields of a client.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Membership {
    pub status: MembershipStatus,
    pub paid_date: Option<Timestamp>,
    pub due_date: Option<Timestamp>,
    pub last_paid_amount: Option<Money>,
    /// Reference of the most recent membership payment, pending or verified.
    pub payment_reference: Option<String>,
}

/// Read model returned by the status query.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MembershipSnapshot {
    pub status: MembershipStatus,
    pub paid_date: Option<Timestamp>,
    pub due_date: Option<Timestamp>,
    pub last_paid_amount: Option<Money>,
    pub is_expired: bool,
    pub days_remaining: i64,
}

impl Membership {
    /// Rejects starting a payment while the membership is still active.
    pub fn ensure_payable(&self, client_id: ClientId) -> Result<(), MembershipError> {
        if self.status.is_active() {
            return Err(MembershipError::already_active(client_id));
        }
        Ok(())
    }

    /// Remembers the reference of a payment that has been started.
    pub fn record_pending_payment(&mut self, reference: impl Into<String>) {
        self.payment_reference = Some(reference.into());
    }

    /// Activates for one period starting at `paid_at`.
    pub fn activate_from_payment(
        &mut self,
        paid_at: Timestamp,
        amount: Option<Money>,
        reference: impl Into<String>,
    ) -> Result<(), MembershipError> {
        self.transition_to(MembershipStatus::Active, "activate")?;
        self.paid_date = Some(paid_at);
        self.due_date = Some(paid_at.add_days(MEMBERSHIP_PERIOD_DAYS));
        if amount.is_some() {
            self.last_paid_amount = amount;
        }
        self.payment_reference = Some(reference.into());
        Ok(())
    }

    /// Activates with dates chosen by an admin (cash payments, corrections).
    pub fn activate_manually(
        &mut self,
        paid_date: Timestamp,
        due_date: Timestamp,
        amount: Money,
    ) -> Result<(), MembershipError> {
        if due_date.is_before(&paid_date) {
            return Err(MembershipError::validation(
                "membership_due_date",
                "Due date cannot be before the paid date",
            ));
        }
        self.transition_to(MembershipStatus::Active, "activate")?;
        self.paid_date = Some(paid_date);
        self.due_date = Some(due_date);
        self.last_paid_amount = Some(amount);
        Ok(())
    }

    /// Switches the membership off. Dates are kept for history.
    pub fn deactivate(&mut self) -> Result<(), MembershipError> {
        if self.status == MembershipStatus::Inactive {
            return Ok(());
        }
        self.transition_to(MembershipStatus::Inactive, "deactivate")
    }

    /// True when a due date exists and lies strictly before `now`.
    pub fn is_expired(&self, now: Timestamp) -> bool {
        self.due_date.is_some_and(|due| due.is_before(&now))
    }

    /// Whole days left in the period, rounded up, never negative.
    pub fn days_remaining(&self, now: Timestamp) -> i64 {
        let Some(due) = self.due_date else {
            return 0;
        };
        let millis = due.duration_since(&now).num_milliseconds();
        if millis <= 0 {
            return 0;
        }
        (millis + MILLIS_PER_DAY - 1) / MILLIS_PER_DAY
    }

    /// Flips an overdue active membership to expired.
    ///
    /// Returns true when the status changed and must be persisted.
    pub fn refresh(&mut self, now: Timestamp) -> bool {
        if self.status == MembershipStatus::Active && self.is_expired(now) {
            self.status = MembershipStatus::Expired;
            return true;
        }
        false
    }

    pub fn snapshot(&self, now: Timestamp) -> MembershipSnapshot {
        MembershipSnapshot {
            status: self.status,
            paid_date: self.paid_date,
            due_date: self.due_date,
            last_paid_amount: self.last_paid_amount,
            is_expired: self.is_expired(now),
            days_remaining: self.days_remaining(now),
        }
    }

    fn transition_to(
        &mut self,
        target: MembershipStatus,
        attempted: &str,
    ) -> Result<(), MembershipError> {
        self.status = self
            .status
            .transition_to(target)
            .map_err(|_| MembershipError::invalid_state(self.status.as_str(), attempted))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn at(secs: i64) -> Timestamp {
        Timestamp::from_unix_secs(secs).unwrap()
    }

    fn active_until(due: Timestamp) -> Membership {
        Membership {
            status: MembershipStatus::Active,
            paid_date: Some(due.add_days(-MEMBERSHIP_PERIOD_DAYS)),
            due_date: Some(due),
            last_paid_amount: Some(Money::from_major(5000.0).unwrap()),
            payment_reference: None,
        }
    }

    // ════════════════════════════════════════════════════════════════════════════
    // Payment lifecycle
    // ════════════════════════════════════════════════════════════════════════════

    #[test]
    fn active_membership_is_not_payable() {
        let membership = active_until(Timestamp::now().add_days(5));
        let err = membership.ensure_payable(ClientId::new()).unwrap_err();
        assert!(matches!(err, MembershipError::AlreadyActive(_)));
    }

    #[test]
    fn inactive_and_expired_memberships_are_payable() {
        let mut membership = Membership::default();
        assert!(membership.ensure_payable(ClientId::new()).is_ok());
        membership.status = MembershipStatus::Expired;
        assert!(membership.ensure_payable(ClientId::new()).is_ok());
    }

    #[test]
    fn payment_activates_for_thirty_days() {
        let paid_at = at(1_700_000_000);
        let mut membership = Membership::default();
        membership.record_pending_payment("membership_1_abc");

        membership
            .activate_from_payment(paid_at, Some(Money::from_minor(500_000).unwrap()), "membership_1_abc")
            .unwrap();

        assert_eq!(membership.status, MembershipStatus::Active);
        assert_eq!(membership.paid_date, Some(paid_at));
        assert_eq!(
            membership.due_date.unwrap().duration_since(&paid_at),
            Duration::days(30)
        );
        assert_eq!(membership.last_paid_amount.unwrap().minor(), 500_000);
        assert_eq!(membership.payment_reference.as_deref(), Some("membership_1_abc"));
    }

    #[test]
    fn payment_without_amount_keeps_previous_amount() {
        let mut membership = active_until(at(1_000));
        membership.status = MembershipStatus::Expired;
        membership.activate_from_payment(at(2_000), None, "ref").unwrap();
        assert_eq!(membership.last_paid_amount.unwrap().to_major(), 5000.0);
    }

    #[test]
    fn manual_activation_rejects_due_before_paid() {
        let mut membership = Membership::default();
        let result = membership.activate_manually(
            at(10_000),
            at(5_000),
            Money::from_major(100.0).unwrap(),
        );
        assert!(matches!(result, Err(MembershipError::ValidationFailed { .. })));
        assert_eq!(membership.status, MembershipStatus::Inactive);
    }

    #[test]
    fn deactivate_is_idempotent() {
        let mut membership = active_until(Timestamp::now().add_days(3));
        membership.deactivate().unwrap();
        assert_eq!(membership.status, MembershipStatus::Inactive);
        membership.deactivate().unwrap();
        assert_eq!(membership.status, MembershipStatus::Inactive);
        assert!(membership.due_date.is_some());
    }

    // ════════════════════════════════════════════════════════════════════════════
    // Expiry
    // ════════════════════════════════════════════════════════════════════════════

    #[test]
    fn overdue_active_membership_expires_on_refresh() {
        let now = at(1_000_000);
        let mut membership = active_until(at(999_000));

        assert!(membership.refresh(now));
        let snapshot = membership.snapshot(now);
        assert_eq!(snapshot.status, MembershipStatus::Expired);
        assert!(snapshot.is_expired);
        assert_eq!(snapshot.days_remaining, 0);
    }

    #[test]
    fn refresh_leaves_current_membership_alone() {
        let now = at(1_000_000);
        let mut membership = active_until(now.add_days(2));
        assert!(!membership.refresh(now));
        assert_eq!(membership.status, MembershipStatus::Active);
    }

    #[test]
    fn refresh_does_not_touch_inactive_membership_with_old_dates() {
        let now = at(1_000_000);
        let mut membership = active_until(at(10));
        membership.status = MembershipStatus::Inactive;
        assert!(!membership.refresh(now));
        assert!(membership.is_expired(now));
    }

    #[test]
    fn due_date_equal_to_now_is_not_expired() {
        let now = at(1_000_000);
        let membership = active_until(now);
        assert!(!membership.is_expired(now));
        assert_eq!(membership.days_remaining(now), 0);
    }

    #[test]
    fn days_remaining_rounds_partial_days_up() {
        let now = at(0);
        let membership = active_until(Timestamp::from_unix_secs(36 * 3600).unwrap());
        assert_eq!(membership.days_remaining(now), 2);
    }

    #[test]
    fn days_remaining_is_zero_without_due_date() {
        assert_eq!(Membership::default().days_remaining(Timestamp::now()), 0);
    }
}
