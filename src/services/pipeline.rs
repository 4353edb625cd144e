//! Issuance pipeline: S1..S9 in strict order, aborting at the first failure.
//!
//! Each stage's output is threaded into the next as a plain value. Remote side
//! effects of completed stages are never undone; a failure after issuer
//! registration names the issuer left behind in `StageFailure::registered_issuer`.

use crate::domain::models::{RunConfig, RunReport, Stage};
use crate::error::{IssuanceError, StageFailure};
use crate::issuance::IssuanceApi;
use crate::services::csv_writer::write_dataset;
use crate::services::dataset::{DatasetGenerator, IssuerDraft, NameSource};
use crate::services::progress::StageObserver;
use crate::services::report::build_run_report;
use crate::services::upload::{build_upload_request, upload_artifact};
use chrono::{Local, Utc};
use rand::RngCore;

pub struct Pipeline<'a, A: IssuanceApi + ?Sized, R: RngCore> {
    config: &'a RunConfig,
    api: &'a A,
    names: &'a dyn NameSource,
    rng: R,
    observer: &'a mut dyn StageObserver,
    registered_issuer: Option<String>,
}

impl<'a, A: IssuanceApi + ?Sized, R: RngCore> Pipeline<'a, A, R> {
    pub fn new(
        config: &'a RunConfig,
        api: &'a A,
        names: &'a dyn NameSource,
        rng: R,
        observer: &'a mut dyn StageObserver,
    ) -> Self {
        Self {
            config,
            api,
            names,
            rng,
            observer,
            registered_issuer: None,
        }
    }

    fn stage<T>(
        &mut self,
        stage: Stage,
        f: impl FnOnce(&mut Self) -> Result<T, IssuanceError>,
    ) -> Result<T, StageFailure> {
        self.observer.started(stage);
        match f(self) {
            Ok(v) => {
                self.observer.succeeded(stage);
                Ok(v)
            }
            Err(error) => {
                self.observer.failed(stage, &error);
                Err(StageFailure {
                    stage,
                    error,
                    registered_issuer: self.registered_issuer.clone(),
                })
            }
        }
    }

    pub fn run(mut self) -> Result<RunReport, StageFailure> {
        let run_ts = Local::now().naive_local();

        let client_token = self.stage(Stage::GetClientToken, |p| {
            p.api
                .client_token(&p.config.client_username, &p.config.default_password)
        })?;

        let issuer = self.stage(Stage::GetDid, |p| {
            let draft = IssuerDraft::generate(p.names, &mut p.rng);
            tracing::debug!(issuer_id = %draft.issuer_id, "generated issuer id");
            let did = p.api.get_did(&draft.issuer_id)?;
            Ok(draft.into_identity(did))
        })?;
        tracing::debug!(did = %issuer.did, "issuer DID assigned");

        self.stage(Stage::RegisterIssuer, |p| {
            let confirmation = p.api.register_issuer(&client_token, &issuer)?;
            tracing::debug!(response = %confirmation, "issuer registered");
            p.registered_issuer = Some(issuer.issuer_id.clone());
            Ok(())
        })?;

        let issuer_token = self.stage(Stage::GetIssuerToken, |p| {
            p.api
                .issuer_token(&issuer.issuer_id, &p.config.default_password)
        })?;

        let dataset = self.stage(Stage::GenerateDataset, |p| {
            let generator = DatasetGenerator::new(
                p.names,
                p.config.student_count,
                &p.config.profile.credential.quarterly_assessment,
            );
            Ok(generator.generate(&mut p.rng))
        })?;

        let (enrollment, assessment) = self.stage(Stage::WriteCsv, |p| {
            write_dataset(&p.config.out_dir, run_ts, &dataset)
        })?;

        let enrollment_upload = self.stage(Stage::UploadEnrollment, |p| {
            let request =
                build_upload_request(&enrollment, &issuer.did, &p.config.profile, Utc::now())?;
            upload_artifact(p.api, &issuer_token, &request)
        })?;

        let assessment_upload = self.stage(Stage::UploadAssessment, |p| {
            let request =
                build_upload_request(&assessment, &issuer.did, &p.config.profile, Utc::now())?;
            upload_artifact(p.api, &issuer_token, &request)
        })?;

        self.stage(Stage::Report, |p| {
            Ok(build_run_report(
                p.config,
                issuer,
                &dataset.students,
                vec![enrollment, assessment],
                vec![enrollment_upload, assessment_upload],
            ))
        })
    }
}
