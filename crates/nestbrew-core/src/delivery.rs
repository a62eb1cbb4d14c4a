//! # Delivery Eligibility Module
//!
//! Decides, given "now" and a purchase type, which calendar dates a
//! customer may select for delivery, and derives the earliest legal date.
//!
//! ## Decision List (first matching rule wins — order matters!)
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                  Candidate Date Decision List                           │
//! │                                                                         │
//! │  1. no date               ──► deny MissingDate                          │
//! │  2. candidate == today    ──► deny SameDay      (any purchase type)     │
//! │  3. candidate == tomorrow                                               │
//! │     AND now >= cutoff     ──► deny AfterCutoff  (forfeits next-day)     │
//! │  4. candidate <  today    ──► deny PastDate                             │
//! │  5a. one-time:                                                          │
//! │      before lead floor    ──► deny LeadTime                             │
//! │      weekday not served   ──► deny WeekdayNotAvailable                  │
//! │  5b. subscription:                                                      │
//! │      wrong weekday        ──► deny NotSubscriptionWeekday               │
//! │      before next slot     ──► deny BeforeNextSubscriptionSlot           │
//! │  6. otherwise             ──► allow                                     │
//! │                                                                         │
//! │  Rules 2-4 overlap rule 5 on purpose: the cutoff denial must carry a   │
//! │  cutoff-specific reason, distinct from the generic lead-time reason.   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Consistency Invariant
//! `decide_at` and `min_date_at` share one cutoff/lead computation, so a
//! date produced by `min_date_at` ALWAYS passes `decide_at` for the same
//! purchase type and instant. This is a required property, covered by a
//! fixture grid in the tests, not an implementation accident.
//!
//! Decisions depend on the current instant — produce them fresh per query,
//! never cache one.

use chrono::{Datelike, Days, Local, NaiveDate, NaiveDateTime, Timelike, Weekday};

use crate::config::DeliveryPolicy;
use crate::types::{DateDecision, DenyReason, PurchaseType};

// =============================================================================
// Delivery Calendar
// =============================================================================

/// Evaluates delivery-date eligibility against a policy.
///
/// Stateless beyond the immutable policy; the `*_at` entry points take the
/// current instant explicitly so every rule is exactly reproducible in
/// tests. The plain `decide`/`min_date` wrappers read the local wall clock.
#[derive(Debug, Clone)]
pub struct DeliveryCalendar {
    policy: DeliveryPolicy,
}

impl DeliveryCalendar {
    /// Creates a calendar for the given policy.
    pub fn new(policy: DeliveryPolicy) -> Self {
        DeliveryCalendar { policy }
    }

    /// Returns the policy this calendar evaluates.
    pub fn policy(&self) -> &DeliveryPolicy {
        &self.policy
    }

    /// Decides a candidate date against the local wall clock.
    pub fn decide(&self, candidate: Option<NaiveDate>, purchase: PurchaseType) -> DateDecision {
        self.decide_at(Local::now().naive_local(), candidate, purchase)
    }

    /// Earliest legal delivery date against the local wall clock.
    pub fn min_date(&self, purchase: PurchaseType) -> NaiveDate {
        self.min_date_at(Local::now().naive_local(), purchase)
    }

    /// Decides a candidate date at an explicit instant.
    ///
    /// Never errors for well-formed inputs: every rejection is a typed
    /// deny decision. Malformed date strings are the caller's contract
    /// violation and must be rejected at the serde boundary before this.
    pub fn decide_at(
        &self,
        now: NaiveDateTime,
        candidate: Option<NaiveDate>,
        purchase: PurchaseType,
    ) -> DateDecision {
        let candidate = match candidate {
            Some(date) => date,
            None => return DateDecision::deny(DenyReason::MissingDate),
        };

        let today = now.date();
        let tomorrow = today + Days::new(1);

        // Same-day delivery is never offered, regardless of lead time rules.
        if candidate == today {
            return DateDecision::deny(DenyReason::SameDay);
        }

        // Ordering after the cutoff hour forfeits next-day delivery. This
        // fires before the generic lead/past checks so the UI can show the
        // cutoff-specific message.
        if candidate == tomorrow && self.past_cutoff(now) {
            return DateDecision::deny(DenyReason::AfterCutoff);
        }

        if candidate < today {
            return DateDecision::deny(DenyReason::PastDate);
        }

        match purchase {
            PurchaseType::OneTime => {
                if candidate < self.lead_floor(now) {
                    return DateDecision::deny(DenyReason::LeadTime);
                }
                if !self.policy.delivers_one_time_on(candidate.weekday()) {
                    return DateDecision::deny(DenyReason::WeekdayNotAvailable);
                }
            }
            PurchaseType::Subscription => {
                if candidate.weekday() != self.policy.subscription_weekday {
                    return DateDecision::deny(DenyReason::NotSubscriptionWeekday);
                }
                // The designated weekday alone is not enough: "this" instance
                // of it may no longer satisfy the cutoff/lead constraints.
                if candidate < self.min_date_at(now, PurchaseType::Subscription) {
                    return DateDecision::deny(DenyReason::BeforeNextSubscriptionSlot);
                }
            }
        }

        DateDecision::allow()
    }

    /// Earliest legal delivery date at an explicit instant.
    ///
    /// One-time: today + lead days (at least tomorrow), pushed one more day
    /// when that lands on tomorrow and the cutoff has passed, then advanced
    /// to the next weekday the policy serves.
    ///
    /// Subscription: the first designated weekday on/after the one-time
    /// floor — which pushes a full week out when the naive next occurrence
    /// is tomorrow and the cutoff has passed.
    pub fn min_date_at(&self, now: NaiveDateTime, purchase: PurchaseType) -> NaiveDate {
        let floor = self.lead_floor(now);

        match purchase {
            PurchaseType::OneTime => {
                let mut date = floor;
                // Bounded by the weekday cycle; the policy validator
                // guarantees a non-empty one-time weekday set.
                for _ in 0..7 {
                    if self.policy.delivers_one_time_on(date.weekday()) {
                        break;
                    }
                    date = date + Days::new(1);
                }
                date
            }
            PurchaseType::Subscription => {
                next_weekday_on_or_after(floor, self.policy.subscription_weekday)
            }
        }
    }

    /// The shared cutoff/lead computation both entry points rely on.
    ///
    /// Earliest date reachable by lead time alone: today + lead days, never
    /// earlier than tomorrow, plus one day when that is tomorrow and the
    /// cutoff has already passed.
    fn lead_floor(&self, now: NaiveDateTime) -> NaiveDate {
        let today = now.date();
        let tomorrow = today + Days::new(1);

        let mut floor = today + Days::new(self.policy.min_lead_days.max(1) as u64);
        if floor == tomorrow && self.past_cutoff(now) {
            floor = floor + Days::new(1);
        }
        floor
    }

    /// At or after the cutoff hour counts as past cutoff (20:00 sharp
    /// already forfeits next-day delivery).
    fn past_cutoff(&self, now: NaiveDateTime) -> bool {
        now.time().hour() >= self.policy.cutoff_hour
    }
}

/// First `weekday` on or after `date`.
fn next_weekday_on_or_after(date: NaiveDate, weekday: Weekday) -> NaiveDate {
    let ahead = (weekday.num_days_from_monday() + 7 - date.weekday().num_days_from_monday()) % 7;
    date + Days::new(ahead as u64)
}

// =============================================================================
// Unit Tests
// =============================================================================
