use async_trait::async_trait;
use reqwest::{Method, RequestBuilder, StatusCode};
use serde::Serialize;
use serde::de::DeserializeOwned;
use uuid::Uuid;

use crate::config::Config;
use crate::error::{ChartError, ChartResult};
use crate::models::{
    ChartPayload, CreateBridgeRequest, DentalBridge, PeriodontalMeasurement, PeriodontalUpdate,
    RecordType, SaveCompositeStateRequest, ToothCompositeState, UpdateChartRequest,
};

/// Remote chart collaborator. The engine talks only to this trait; the
/// production implementation is [`RestChartApi`], tests script their own.
#[async_trait]
pub trait ChartApi: Send + Sync {
    async fn get_chart(
        &self,
        patient_id: &str,
        record_type: RecordType,
    ) -> ChartResult<ChartPayload>;

    /// Sends one atomic update batch; the server recomputes and returns the
    /// full current chart.
    async fn patch_chart(
        &self,
        patient_id: &str,
        req: &UpdateChartRequest,
    ) -> ChartResult<ChartPayload>;

    async fn save_tooth_state(
        &self,
        patient_id: &str,
        req: &SaveCompositeStateRequest,
    ) -> ChartResult<ToothCompositeState>;

    async fn clear_tooth_state(&self, patient_id: &str, state_id: Uuid) -> ChartResult<()>;

    async fn create_bridge(
        &self,
        patient_id: &str,
        req: &CreateBridgeRequest,
    ) -> ChartResult<DentalBridge>;

    async fn delete_bridge(&self, patient_id: &str, bridge_id: Uuid) -> ChartResult<()>;

    async fn get_periodontogram(
        &self,
        patient_id: &str,
    ) -> ChartResult<Vec<PeriodontalMeasurement>>;

    async fn patch_periodontogram(
        &self,
        patient_id: &str,
        updates: &[PeriodontalUpdate],
    ) -> ChartResult<()>;
}

/// HTTP client for the DCMS chart endpoints.
pub struct RestChartApi {
    http: reqwest::Client,
    base_url: String,
    token: Option<String>,
}

impl RestChartApi {
    pub fn new(config: &Config) -> ChartResult<Self> {
        let http = reqwest::Client::builder()
            .user_agent(concat!("dcms-chart-client/", env!("CARGO_PKG_VERSION")))
            .timeout(std::time::Duration::from_secs(config.request_timeout_secs))
            .build()
            .map_err(|e| ChartError::Transport(e.to_string()))?;

        Ok(Self {
            http,
            base_url: config.api_base_url.clone(),
            token: config.api_token.clone(),
        })
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let mut req = self.http.request(method, format!("{}{path}", self.base_url));
        if let Some(token) = &self.token {
            req = req.bearer_auth(token);
        }
        req
    }

    async fn send_json<T: DeserializeOwned>(&self, req: RequestBuilder) -> ChartResult<T> {
        let resp = Self::check(req.send().await?).await?;
        resp.json::<T>()
            .await
            .map_err(|e| ChartError::Decode(e.to_string()))
    }

    async fn send_unit(&self, req: RequestBuilder) -> ChartResult<()> {
        Self::check(req.send().await?).await?;
        Ok(())
    }

    async fn check(resp: reqwest::Response) -> ChartResult<reqwest::Response> {
        let status = resp.status();
        if status.is_success() {
            return Ok(resp);
        }
        let body = resp.text().await.unwrap_or_default();
        if status == StatusCode::UNAUTHORIZED {
            tracing::warn!("chart API rejected credentials");
        }
        Err(ChartError::from_response(status.as_u16(), &body))
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct RecordTypeQuery {
    record_type: RecordType,
}

#[derive(Serialize)]
struct PeriodontalPatchBody<'a> {
    updates: &'a [PeriodontalUpdate],
}

#[async_trait]
impl ChartApi for RestChartApi {
    async fn get_chart(
        &self,
        patient_id: &str,
        record_type: RecordType,
    ) -> ChartResult<ChartPayload> {
        let req = self
            .request(Method::GET, &format!("/patients/{patient_id}/odontogram"))
            .query(&RecordTypeQuery { record_type });
        self.send_json(req).await
    }

    async fn patch_chart(
        &self,
        patient_id: &str,
        req: &UpdateChartRequest,
    ) -> ChartResult<ChartPayload> {
        let req = self
            .request(Method::PATCH, &format!("/patients/{patient_id}/odontogram"))
            .json(req);
        self.send_json(req).await
    }

    async fn save_tooth_state(
        &self,
        patient_id: &str,
        req: &SaveCompositeStateRequest,
    ) -> ChartResult<ToothCompositeState> {
        let req = self
            .request(
                Method::POST,
                &format!("/patients/{patient_id}/odontogram/state"),
            )
            .json(req);
        self.send_json(req).await
    }

    async fn clear_tooth_state(&self, patient_id: &str, state_id: Uuid) -> ChartResult<()> {
        let req = self.request(
            Method::DELETE,
            &format!("/patients/{patient_id}/odontogram/state/{state_id}"),
        );
        self.send_unit(req).await
    }

    async fn create_bridge(
        &self,
        patient_id: &str,
        req: &CreateBridgeRequest,
    ) -> ChartResult<DentalBridge> {
        let req = self
            .request(
                Method::POST,
                &format!("/patients/{patient_id}/odontogram/bridge"),
            )
            .json(req);
        self.send_json(req).await
    }

    async fn delete_bridge(&self, patient_id: &str, bridge_id: Uuid) -> ChartResult<()> {
        let req = self.request(
            Method::DELETE,
            &format!("/patients/{patient_id}/odontogram/bridge/{bridge_id}"),
        );
        self.send_unit(req).await
    }

    async fn get_periodontogram(
        &self,
        patient_id: &str,
    ) -> ChartResult<Vec<PeriodontalMeasurement>> {
        let req = self.request(
            Method::GET,
            &format!("/patients/{patient_id}/periodontogram"),
        );
        self.send_json(req).await
    }

    async fn patch_periodontogram(
        &self,
        patient_id: &str,
        updates: &[PeriodontalUpdate],
    ) -> ChartResult<()> {
        let req = self
            .request(
                Method::PATCH,
                &format!("/patients/{patient_id}/periodontogram"),
            )
            .json(&PeriodontalPatchBody { updates });
        self.send_unit(req).await
    }
}
