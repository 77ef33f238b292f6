use serde_json::Value;
use tracing::{info, warn};

use freightdesk_core::clock::Clock;
use freightdesk_core::domain::quote::QuoteId;
use freightdesk_core::domain::shipper::{NewShipper, Shipper, ShipperId};
use freightdesk_core::errors::{ApplicationError, DomainError};
use freightdesk_core::integrations::{ShipperCreated, ShipperDirectory};
use freightdesk_core::workflow::engine::WorkflowEngine;
use freightdesk_core::workflow::states::{StepName, WorkflowId, WorkflowPlan};

use crate::repositories::{RepositoryError, ShipperRepository, WorkflowRepository};

impl From<RepositoryError> for ApplicationError {
    fn from(error: RepositoryError) -> Self {
        ApplicationError::Persistence(error.to_string())
    }
}

/// Id-keyed surface over acceptance workflows: loads from the repository,
/// applies the engine, saves back. One caller at a time per workflow is
/// assumed; there is no cross-process locking here.
pub struct AcceptanceWorkflowManager<R, S, C> {
    workflows: R,
    shippers: S,
    directory: Box<dyn ShipperDirectory>,
    engine: WorkflowEngine<C>,
    clock: C,
}

impl<R, S, C> AcceptanceWorkflowManager<R, S, C>
where
    R: WorkflowRepository,
    S: ShipperRepository,
    C: Clock + Clone,
{
    pub fn new(workflows: R, shippers: S, directory: Box<dyn ShipperDirectory>, clock: C) -> Self {
        Self { workflows, shippers, directory, engine: WorkflowEngine::new(clock.clone()), clock }
    }

    /// Creates and stores a fresh workflow, every step pending. Calling this
    /// twice for one quote stores two workflows with distinct ids.
    pub async fn initialize(
        &self,
        plan: WorkflowPlan,
        quote_id: QuoteId,
        broker_id: &str,
        shipper_id: ShipperId,
        snapshot: Value,
    ) -> Result<WorkflowId, ApplicationError> {
        let workflow = self.engine.initialize(plan, quote_id, broker_id, shipper_id, snapshot);
        let id = workflow.id.clone();
        info!(
            workflow_id = %id.0,
            quote_id = %workflow.quote_id.0,
            plan = ?plan,
            "acceptance workflow initialized"
        );
        self.workflows.save(workflow).await?;
        Ok(id)
    }

    pub async fn complete_step(
        &self,
        workflow_id: &WorkflowId,
        step: StepName,
        payload: Value,
        actor: &str,
    ) -> Result<(), ApplicationError> {
        let mut workflow = self
            .workflows
            .find_by_id(workflow_id)
            .await?
            .ok_or_else(|| DomainError::not_found("workflow", workflow_id.0.clone()))?;

        if let Err(error) = self.engine.complete_step(&mut workflow, step, payload, actor) {
            warn!(
                workflow_id = %workflow_id.0,
                step = step.as_str(),
                error = %error,
                "workflow step rejected"
            );
            return Err(error.into());
        }

        info!(workflow_id = %workflow_id.0, step = step.as_str(), actor, "workflow step completed");
        self.workflows.save(workflow).await?;
        Ok(())
    }

    /// Hands the intake to the shipper directory, records the resulting
    /// shipper locally, and re-points the workflow at the new id. The caller
    /// proceeds to `contract_generation_triggered` on success.
    pub async fn create_shipper_in_system(
        &self,
        workflow_id: &WorkflowId,
        intake: NewShipper,
    ) -> Result<ShipperCreated, ApplicationError> {
        let mut workflow = self
            .workflows
            .find_by_id(workflow_id)
            .await?
            .ok_or_else(|| DomainError::not_found("workflow", workflow_id.0.clone()))?;

        let created = self
            .directory
            .create_shipper(intake.clone())
            .await
            .map_err(|error| ApplicationError::Integration(error.to_string()))?;

        let shipper =
            Shipper::from_intake(created.shipper_id.clone(), intake, self.clock.now());
        self.shippers.save(shipper).await?;

        workflow.shipper_id = created.shipper_id.clone();
        self.workflows.save(workflow).await?;

        info!(
            workflow_id = %workflow_id.0,
            shipper_id = %created.shipper_id.0,
            "shipper created in system"
        );
        Ok(created)
    }

    pub async fn find(
        &self,
        workflow_id: &WorkflowId,
    ) -> Result<freightdesk_core::workflow::states::AcceptanceWorkflow, ApplicationError> {
        self.workflows
            .find_by_id(workflow_id)
            .await?
            .ok_or_else(|| DomainError::not_found("workflow", workflow_id.0.clone()).into())
    }
}
