use serde_json::Value;
use uuid::Uuid;

use crate::audit::{AuditCategory, AuditContext, AuditEvent, AuditOutcome, AuditSink};
use crate::clock::{Clock, SystemClock};
use crate::domain::quote::QuoteId;
use crate::domain::shipper::ShipperId;
use crate::errors::DomainError;
use crate::workflow::states::{
    AcceptanceWorkflow, StepName, StepStatus, WorkflowId, WorkflowPlan, WorkflowStep,
};

/// Advances acceptance workflows step by step. There are no automatic
/// transitions, retries, or rollback; every completion is an explicit call.
pub struct WorkflowEngine<C = SystemClock> {
    clock: C,
}

impl Default for WorkflowEngine<SystemClock> {
    fn default() -> Self {
        Self { clock: SystemClock }
    }
}

impl<C> WorkflowEngine<C>
where
    C: Clock,
{
    pub fn new(clock: C) -> Self {
        Self { clock }
    }

    /// Builds a fresh workflow with every step pending. Deliberately not
    /// idempotent: a second call for the same quote yields a distinct
    /// workflow id, and callers own deduplication.
    pub fn initialize(
        &self,
        plan: WorkflowPlan,
        quote_id: QuoteId,
        broker_id: impl Into<String>,
        shipper_id: ShipperId,
        snapshot: Value,
    ) -> AcceptanceWorkflow {
        AcceptanceWorkflow {
            id: WorkflowId(Uuid::new_v4().to_string()),
            quote_id,
            broker_id: broker_id.into(),
            shipper_id,
            plan,
            snapshot,
            steps: plan.steps().iter().copied().map(WorkflowStep::pending).collect(),
            created_at: self.clock.now(),
        }
    }

    /// Marks `step` completed, stamping the actor and a timestamp that never
    /// moves backwards relative to earlier steps. Rejects skips: the
    /// immediate predecessor must already be completed.
    pub fn complete_step(
        &self,
        workflow: &mut AcceptanceWorkflow,
        step: StepName,
        payload: Value,
        actor: impl Into<String>,
    ) -> Result<(), DomainError> {
        let index = workflow
            .steps
            .iter()
            .position(|candidate| candidate.name == step)
            .ok_or(DomainError::StepNotInPlan { step })?;

        if workflow.steps[index].is_completed() {
            return Err(DomainError::StepAlreadyCompleted { step });
        }

        if index > 0 && !workflow.steps[index - 1].is_completed() {
            return Err(DomainError::InvalidStepTransition {
                step,
                blocked_on: workflow.steps[index - 1].name,
            });
        }

        let floor = workflow.steps[..index]
            .iter()
            .filter_map(|earlier| earlier.completed_at)
            .max();
        let mut completed_at = self.clock.now();
        if let Some(floor) = floor {
            completed_at = completed_at.max(floor);
        }

        let entry = &mut workflow.steps[index];
        entry.status = StepStatus::Completed;
        entry.completed_at = Some(completed_at);
        entry.completed_by = Some(actor.into());
        entry.payload = Some(payload);
        Ok(())
    }

    pub fn complete_step_with_audit<S>(
        &self,
        workflow: &mut AcceptanceWorkflow,
        step: StepName,
        payload: Value,
        actor: impl Into<String>,
        sink: &S,
        audit: &AuditContext,
    ) -> Result<(), DomainError>
    where
        S: AuditSink,
    {
        let result = self.complete_step(workflow, step, payload, actor);
        match &result {
            Ok(()) => {
                sink.emit(
                    AuditEvent::new(
                        Some(workflow.quote_id.clone()),
                        audit.correlation_id.clone(),
                        "workflow.step_completed",
                        AuditCategory::Workflow,
                        audit.actor.clone(),
                        AuditOutcome::Success,
                    )
                    .with_metadata("workflow_id", workflow.id.0.clone())
                    .with_metadata("step", step.as_str()),
                );
            }
            Err(error) => {
                sink.emit(
                    AuditEvent::new(
                        Some(workflow.quote_id.clone()),
                        audit.correlation_id.clone(),
                        "workflow.step_rejected",
                        AuditCategory::Workflow,
                        audit.actor.clone(),
                        AuditOutcome::Rejected,
                    )
                    .with_metadata("workflow_id", workflow.id.0.clone())
                    .with_metadata("step", step.as_str())
                    .with_metadata("error", error.to_string()),
                );
            }
        }
        result
    }
}

#[cfg(test)]
mod tests {
    use chrono::Duration;
    use serde_json::json;

    use crate::audit::{AuditContext, InMemoryAuditSink};
    use crate::clock::{Clock, FixedClock};
    use crate::domain::quote::QuoteId;
    use crate::domain::shipper::ShipperId;
    use crate::errors::DomainError;
    use crate::workflow::engine::WorkflowEngine;
    use crate::workflow::states::{AcceptanceWorkflow, StepName, WorkflowPlan};

    fn engine() -> WorkflowEngine<FixedClock> {
        WorkflowEngine::new(FixedClock::at_epoch_millis(1_730_000_000_000))
    }

    fn workflow(engine: &WorkflowEngine<FixedClock>, plan: WorkflowPlan) -> AcceptanceWorkflow {
        engine.initialize(
            plan,
            QuoteId("LTL-1730000000000".to_owned()),
            "broker-001",
            ShipperId("shipper-17".to_owned()),
            json!({"total": 1443}),
        )
    }

    #[test]
    fn initialize_starts_every_step_pending() {
        let engine = engine();
        let workflow = workflow(&engine, WorkflowPlan::WithShipperOnboarding);

        assert_eq!(workflow.steps.len(), 7);
        assert_eq!(workflow.completed_count(), 0);
        assert!(!workflow.is_complete());
    }

    #[test]
    fn initialize_twice_produces_distinct_workflow_ids() {
        // Documented gap: no dedup by quote id; callers must avoid double
        // initialization themselves.
        let engine = engine();
        let first = workflow(&engine, WorkflowPlan::Standard);
        let second = workflow(&engine, WorkflowPlan::Standard);
        assert_ne!(first.id, second.id);
        assert_eq!(first.quote_id, second.quote_id);
    }

    #[test]
    fn steps_complete_in_order_through_contract_generation() {
        let engine = engine();
        let mut workflow = workflow(&engine, WorkflowPlan::Standard);

        for step in WorkflowPlan::Standard.steps() {
            engine
                .complete_step(&mut workflow, *step, json!({}), "broker-001")
                .expect("in-order completion");
        }

        assert!(workflow.is_complete());
        let last = workflow
            .step(StepName::ContractGenerationTriggered)
            .expect("final step exists");
        assert_eq!(last.completed_by.as_deref(), Some("broker-001"));
    }

    #[test]
    fn completing_a_step_before_its_predecessor_is_rejected() {
        let engine = engine();
        let mut workflow = workflow(&engine, WorkflowPlan::Standard);

        let error = engine
            .complete_step(&mut workflow, StepName::QuoteSentToShipper, json!({}), "broker-001")
            .expect_err("send before generate must fail");

        assert_eq!(
            error,
            DomainError::InvalidStepTransition {
                step: StepName::QuoteSentToShipper,
                blocked_on: StepName::QuoteGenerated,
            }
        );
    }

    #[test]
    fn completing_a_completed_step_again_is_rejected() {
        let engine = engine();
        let mut workflow = workflow(&engine, WorkflowPlan::Standard);

        engine
            .complete_step(&mut workflow, StepName::QuoteGenerated, json!({}), "broker-001")
            .expect("first completion");
        let error = engine
            .complete_step(&mut workflow, StepName::QuoteGenerated, json!({}), "broker-001")
            .expect_err("second completion must fail");

        assert_eq!(error, DomainError::StepAlreadyCompleted { step: StepName::QuoteGenerated });
    }

    #[test]
    fn onboarding_steps_are_rejected_under_the_standard_plan() {
        let engine = engine();
        let mut workflow = workflow(&engine, WorkflowPlan::Standard);

        let error = engine
            .complete_step(
                &mut workflow,
                StepName::ShipperInformationCollected,
                json!({}),
                "shipper",
            )
            .expect_err("step outside the plan must fail");

        assert_eq!(
            error,
            DomainError::StepNotInPlan { step: StepName::ShipperInformationCollected }
        );
    }

    #[test]
    fn completion_timestamps_never_move_backwards() {
        let forward = FixedClock::at_epoch_millis(1_730_000_100_000);
        let backward = FixedClock::at_epoch_millis(1_730_000_000_000);

        let mut workflow = WorkflowEngine::new(forward).initialize(
            WorkflowPlan::Standard,
            QuoteId("FTL-1".to_owned()),
            "broker-001",
            ShipperId("shipper-17".to_owned()),
            json!({}),
        );

        WorkflowEngine::new(forward)
            .complete_step(&mut workflow, StepName::QuoteGenerated, json!({}), "broker-001")
            .expect("first step");
        WorkflowEngine::new(backward)
            .complete_step(&mut workflow, StepName::QuoteSentToShipper, json!({}), "broker-001")
            .expect("second step with a lagging clock");

        let first = workflow.steps[0].completed_at.expect("stamped");
        let second = workflow.steps[1].completed_at.expect("stamped");
        assert!(second >= first);
        assert_eq!(second, forward.now());
        assert!(second - first < Duration::seconds(1));
    }

    #[test]
    fn step_completion_emits_audit_events() {
        let engine = engine();
        let mut workflow = workflow(&engine, WorkflowPlan::Standard);
        let sink = InMemoryAuditSink::default();
        let context = AuditContext::new(Some(workflow.quote_id.clone()), "req-7", "broker-001");

        engine
            .complete_step_with_audit(
                &mut workflow,
                StepName::QuoteGenerated,
                json!({}),
                "broker-001",
                &sink,
                &context,
            )
            .expect("completion succeeds");
        let _ = engine.complete_step_with_audit(
            &mut workflow,
            StepName::QuoteAcceptedByShipper,
            json!({}),
            "shipper-17",
            &sink,
            &context,
        );

        let events = sink.events();
        assert_eq!(events.len(), 2);
        assert_eq!(events[0].event_type, "workflow.step_completed");
        assert_eq!(events[1].event_type, "workflow.step_rejected");
        assert_eq!(events[1].metadata.get("step").map(String::as_str), Some("quote_accepted_by_shipper"));
    }
}
