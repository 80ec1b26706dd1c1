//! # Fulfillment Plan
//!
//! The simulated warehouse: which statuses an order moves through on its
//! own, and how long after creation each one lands.
//!
//! ```text
//!   created ──2s──► confirmed ──3s──► processing ──3s──► shipped
//!   (t=0)           (t=2s)            (t=5s)             (t=8s)
//! ```
//!
//! Delays are measured from order creation, not from the previous step.

use std::time::Duration;

use serde::{Deserialize, Serialize};
use shopgrid_core::{OrderStatus, ValidationError};

/// Location stamped on every tracking update.
pub const DEFAULT_LOCATION: &str = "Mumbai, Maharashtra";

/// Days from creation to the estimated delivery date.
pub const DEFAULT_ESTIMATED_DELIVERY_DAYS: u32 = 3;

/// One automatic advance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FulfillmentStep {
    /// Milliseconds after order creation.
    pub after_ms: u64,
    pub status: OrderStatus,
}

impl FulfillmentStep {
    pub const fn new(after_ms: u64, status: OrderStatus) -> Self {
        FulfillmentStep { after_ms, status }
    }

    pub fn delay(&self) -> Duration {
        Duration::from_millis(self.after_ms)
    }
}

/// Ordered list of automatic advances applied to every new order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FulfillmentPlan {
    steps: Vec<FulfillmentStep>,
}

impl Default for FulfillmentPlan {
    fn default() -> Self {
        FulfillmentPlan {
            steps: vec![
                FulfillmentStep::new(2_000, OrderStatus::Confirmed),
                FulfillmentStep::new(5_000, OrderStatus::Processing),
                FulfillmentStep::new(8_000, OrderStatus::Shipped),
            ],
        }
    }
}

impl FulfillmentPlan {
    pub fn new(steps: Vec<FulfillmentStep>) -> Self {
        FulfillmentPlan { steps }
    }

    /// No automatic advances; orders stay pending until updated by hand.
    pub fn none() -> Self {
        FulfillmentPlan { steps: Vec::new() }
    }

    pub fn steps(&self) -> &[FulfillmentStep] {
        &self.steps
    }

    /// Checks the plan walks forward through the lifecycle.
    ///
    /// Each step must be a legal transition from the one before it (starting
    /// at `pending`), must not cancel, and must land strictly after its
    /// predecessor. The first step must land after order creation.
    pub fn validate(&self) -> Result<(), ValidationError> {
        let invalid = |reason: String| ValidationError::InvalidFormat {
            field: "fulfillment.steps".to_string(),
            reason,
        };

        let mut previous = FulfillmentStep::new(0, OrderStatus::Pending);
        for step in &self.steps {
            if step.status == OrderStatus::Cancelled {
                return Err(invalid("a plan cannot cancel orders".to_string()));
            }
            if !previous.status.can_transition_to(step.status) {
                return Err(invalid(format!(
                    "{} cannot follow {}",
                    step.status, previous.status
                )));
            }
            if step.after_ms <= previous.after_ms {
                return Err(invalid(format!(
                    "{} at {}ms must come after {} at {}ms",
                    step.status, step.after_ms, previous.status, previous.after_ms
                )));
            }
            previous = *step;
        }
        Ok(())
    }
}

/// Everything the order book needs besides its clock and scheduler.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LifecycleSettings {
    pub location: String,
    pub estimated_delivery_days: u32,
    pub plan: FulfillmentPlan,
}

impl Default for LifecycleSettings {
    fn default() -> Self {
        LifecycleSettings {
            location: DEFAULT_LOCATION.to_string(),
            estimated_delivery_days: DEFAULT_ESTIMATED_DELIVERY_DAYS,
            plan: FulfillmentPlan::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_plan() {
        let plan = FulfillmentPlan::default();
        let delays: Vec<u64> = plan.steps().iter().map(|s| s.after_ms).collect();
        assert_eq!(delays, vec![2_000, 5_000, 8_000]);
        assert!(plan.validate().is_ok());
        assert!(FulfillmentPlan::none().validate().is_ok());
    }

    #[test]
    fn test_backward_plan_rejected() {
        let plan = FulfillmentPlan::new(vec![
            FulfillmentStep::new(1_000, OrderStatus::Shipped),
            FulfillmentStep::new(2_000, OrderStatus::Confirmed),
        ]);
        assert!(plan.validate().is_err());
    }

    #[test]
    fn test_out_of_order_delays_rejected() {
        let plan = FulfillmentPlan::new(vec![
            FulfillmentStep::new(5_000, OrderStatus::Confirmed),
            FulfillmentStep::new(2_000, OrderStatus::Processing),
        ]);
        assert!(plan.validate().is_err());
    }

    #[test]
    fn test_equal_delays_rejected() {
        let plan = FulfillmentPlan::new(vec![
            FulfillmentStep::new(2_000, OrderStatus::Confirmed),
            FulfillmentStep::new(2_000, OrderStatus::Processing),
        ]);
        assert!(plan.validate().is_err());
    }

    #[test]
    fn test_zero_first_delay_rejected() {
        let plan = FulfillmentPlan::new(vec![FulfillmentStep::new(0, OrderStatus::Confirmed)]);
        assert!(plan.validate().is_err());

        let plan = FulfillmentPlan::new(vec![FulfillmentStep::new(1, OrderStatus::Confirmed)]);
        assert!(plan.validate().is_ok());
    }

    #[test]
    fn test_cancelling_plan_rejected() {
        let plan = FulfillmentPlan::new(vec![FulfillmentStep::new(1_000, OrderStatus::Cancelled)]);
        assert!(plan.validate().is_err());
    }

    #[test]
    fn test_plan_deserializes_from_step_list() {
        let json = r#"[{"after_ms":100,"status":"confirmed"},{"after_ms":200,"status":"out-for-delivery"}]"#;
        let plan: FulfillmentPlan = serde_json::from_str(json).unwrap();
        assert_eq!(plan.steps()[1].status, OrderStatus::OutForDelivery);
        assert!(plan.validate().is_ok());
    }
}
